use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Fails unless `path` is free, `force` is set, or the user agrees to
/// replace it.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if force || !path.exists() {
        return Ok(());
    }

    warning(format!("'{}' already exists.", path.display()));
    print!("Replace it? [y/N]: ");
    io::stdout().flush().ok();

    if confirmed(io::stdin().lock())? {
        Ok(())
    } else {
        Err(AppError::Export(format!(
            "export cancelled: {} left untouched",
            path.display()
        )))
    }
}

fn confirmed(mut input: impl BufRead) -> AppResult<bool> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(matches!(
        line.trim().to_ascii_lowercase().as_str(),
        "y" | "yes" | "s" | "sim"
    ))
}
