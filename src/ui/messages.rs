//! Status lines printed by the CLI.
//!
//! Every line starts with a coloured marker; the text itself stays plain so
//! that scripts grepping the output are not disturbed by escape codes.

use ansi_term::Colour::{Blue, Green, Red, Yellow};
use ansi_term::Style;
use std::fmt::Display;

fn marker(style: Style, symbol: &str) -> String {
    style.bold().paint(symbol).to_string()
}

pub fn info(msg: impl Display) {
    println!("{} {}", marker(Blue.normal(), "i"), msg);
}

pub fn success(msg: impl Display) {
    println!("{} {}", marker(Green.normal(), "✔"), msg);
}

pub fn warning(msg: impl Display) {
    println!("{} {}", marker(Yellow.normal(), "!"), msg);
}

/// Errors go to stderr.
pub fn error(msg: impl Display) {
    eprintln!("{} {}", marker(Red.normal(), "✘"), msg);
}

pub fn header(msg: impl Display) {
    let title = msg.to_string();
    let rule = "=".repeat(title.chars().count().max(20));
    println!("{}\n{}\n", Blue.bold().paint(title), Blue.paint(rule));
}
