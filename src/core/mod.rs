pub mod calculator;
pub mod entry;
pub mod log;
pub mod range;
pub mod report;
pub mod settings;
pub mod user;
