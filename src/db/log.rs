use crate::db::Storage;
use crate::errors::AppResult;
use crate::models::audit::AuditRecord;
use tracing::debug;

/// Append a line to the audit trail.
pub fn audit(store: &mut dyn Storage, username: &str, action: &str, details: &str) -> AppResult<()> {
    debug!(username, action, details, "audit");
    store.append_audit(&AuditRecord::now(username, action, details))
}
