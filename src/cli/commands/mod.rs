pub mod config;
pub mod db;
pub mod entry;
pub mod export;
pub mod init;
pub mod log;
pub mod report;
pub mod serve;
pub mod settings;
pub mod user;

use crate::errors::{AppError, AppResult};
use crate::models::lenient::parse_decimal;
use rust_decimal::Decimal;

/// Money typed on the command line; accepts `25.50` and `25,50`.
pub(crate) fn parse_money(raw: &str) -> AppResult<Decimal> {
    parse_decimal(raw).ok_or_else(|| AppError::InvalidInput(format!("invalid amount '{raw}'")))
}
