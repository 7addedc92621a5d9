mod check;
mod project;
mod user;

pub use check::cmd_check;
pub use project::{NewProject, cmd_add_project, cmd_list_projects};
pub use user::{NewUser, cmd_add_user};

use crate::forms::Field;

/// Runs a field's rules on a trimmed argument, returning the message to print
/// on failure.
fn checked(field: &Field, raw: &str) -> Result<String, String> {
    let raw = raw.trim();
    field
        .validate(Some(raw))
        .map(|value| value.unwrap_or_default())
        .map_err(|e| e.message)
}
