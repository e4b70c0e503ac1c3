//! Revenue calculators: one module per category plus the entry aggregator.

pub mod breakfast;
pub mod consumo_interno;
pub mod cuisine;
pub mod entry;
pub mod events;
pub mod frigobar;
pub mod period;
pub mod room_service;
pub mod shift;

pub use entry::{EntryTotals, aggregate_entry};
pub use period::{period_totals, sum_channels};
