use crate::db::Storage;
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::models::user::{Role, User};

pub struct UserLogic;

impl UserLogic {
    /// Create a user, or replace role, shifts and pages of an existing one.
    pub fn save(
        store: &mut dyn Storage,
        username: &str,
        role: Role,
        shifts: &[String],
        allowed_pages: &[String],
        actor: &str,
    ) -> AppResult<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::InvalidInput("username cannot be empty".into()));
        }
        if role == Role::Administrator && !shifts.is_empty() {
            return Err(AppError::InvalidInput(
                "shifts can only be assigned to operators".into(),
            ));
        }

        let user = User {
            id: 0,
            username: username.to_string(),
            role,
            shifts: clean_list(shifts),
            allowed_pages: clean_list(allowed_pages),
        };
        let saved = store.save_user(&user)?;

        audit(
            store,
            actor,
            "user_save",
            &format!("{} ({})", saved.username, saved.role.as_str()),
        )?;
        Ok(saved)
    }

    pub fn list(store: &dyn Storage) -> AppResult<Vec<User>> {
        store.list_users()
    }

    pub fn delete(store: &mut dyn Storage, username: &str, actor: &str) -> AppResult<()> {
        if !store.delete_user(username.trim())? {
            return Err(AppError::NotFound(format!("user '{}'", username.trim())));
        }
        audit(store, actor, "user_del", username.trim())
    }
}

fn clean_list(items: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        if !out.iter().any(|o| o == item) {
            out.push(item.to_string());
        }
    }
    out
}
