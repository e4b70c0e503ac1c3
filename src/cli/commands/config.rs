use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, success, warning};
use std::process::Command;

/// `$EDITOR`, then `$VISUAL`, then the platform default.
fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

/// Handle the `config` subcommand
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = &cli.command
    else {
        return Ok(());
    };
    let path = Config::config_file();

    if *print_config {
        header(format!("Configuration ({})", path.display()));
        println!("{}", serde_yaml::to_string(cfg)?);
    }

    if *edit_config {
        let fallback = default_editor();
        let mut candidates = vec![editor.clone().unwrap_or_else(|| fallback.clone())];
        if candidates[0] != fallback {
            candidates.push(fallback);
        }

        for candidate in &candidates {
            match Command::new(candidate).arg(&path).status() {
                Ok(s) if s.success() => {
                    success(format!("Configuration edited with '{candidate}'."));
                    return Ok(());
                }
                _ => warning(format!("Editor '{candidate}' not available.")),
            }
        }

        return Err(AppError::Config(format!(
            "could not open {} with any editor",
            path.display()
        )));
    }

    Ok(())
}
