//! Caixa Tulsi command-line entrypoint.

use caixa_tulsi::run;
use caixa_tulsi::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
