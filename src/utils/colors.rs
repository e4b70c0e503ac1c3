//! ANSI color helper utilities for terminal output.

use rust_decimal::Decimal;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";
pub const CYAN: &str = "\x1b[36m";

/// Zero amounts are greyed out so the days with sales stand out.
pub fn colorize_amount(value: &str, is_zero: bool) -> String {
    if is_zero {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Adjustment color:
/// \>0 → green (more reported than valued)
/// \<0 → red
/// 0 → reset
pub fn color_for_adjustment(value: Decimal) -> &'static str {
    if value.is_zero() {
        RESET
    } else if value.is_sign_positive() {
        GREEN
    } else {
        RED
    }
}
