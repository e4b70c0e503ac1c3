use crate::cli::parser::{Cli, Commands, UserCommands};
use crate::config::Config;
use crate::core::user::UserLogic;
use crate::db::open_storage;
use crate::errors::{AppError, AppResult};
use crate::models::user::Role;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::User { action } = &cli.command else {
        return Ok(());
    };
    let mut store = open_storage(cfg)?;
    let actor = cli.username(cfg);

    match action {
        UserCommands::Add {
            username,
            role,
            shifts,
            pages,
        } => {
            let role = Role::from_code(role)
                .ok_or_else(|| AppError::InvalidInput(format!("invalid role '{role}'")))?;
            let user = UserLogic::save(store.as_mut(), username, role, shifts, pages, &actor)?;
            success(format!("User '{}' saved ({}).", user.username, user.role.as_str()));
        }
        UserCommands::List => {
            let users = UserLogic::list(store.as_ref())?;
            if users.is_empty() {
                info("No users found.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("Username"),
                Column::left("Role"),
                Column::left("Shifts"),
                Column::left("Pages"),
            ]);
            for u in &users {
                table.add_row(vec![
                    u.id.to_string(),
                    u.username.clone(),
                    u.role.as_str().to_string(),
                    u.shifts.join(", "),
                    u.allowed_pages.join(", "),
                ]);
            }
            print!("{}", table.render());
        }
        UserCommands::Del { username } => {
            UserLogic::delete(store.as_mut(), username, &actor)?;
            success(format!("User '{}' deleted.", username.trim()));
        }
    }

    Ok(())
}
