pub mod audit;
pub mod entry;
pub mod lenient;
pub mod period;
pub mod period_id;
pub mod settings;
pub mod totals;
pub mod user;
