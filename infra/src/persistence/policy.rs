//! Row policies for the user table.
//!
//! These stand in for the rules a policy-enforcing persistence engine would
//! evaluate: reads of hidden rows look like missing rows, refused writes are
//! reported as policy rejections.

use ks_core::auth::{roles, AuthenticatedUser};
use ks_core::domain::entities::UserRecord;
use ks_core::errors::PersistenceError;

/// Rule names reported in policy rejection messages
pub const RULE_OWNER_ONLY: &str = "users.owner_only";
pub const RULE_ROLES_ADMIN_MANAGED: &str = "users.roles_admin_managed";

pub fn is_admin(actor: Option<&AuthenticatedUser>) -> bool {
    actor.is_some_and(|actor| actor.has_role(roles::ADMIN))
}

pub fn is_owner(actor: Option<&AuthenticatedUser>, row: &UserRecord) -> bool {
    actor.is_some_and(|actor| actor.id == row.id.to_string())
}

/// Any authenticated principal may read a live row
pub fn can_read(actor: Option<&AuthenticatedUser>, row: &UserRecord) -> bool {
    actor.is_some() && row.deleted_at.is_none()
}

/// Admins list every live row; everyone else lists only their own
pub fn can_list(actor: Option<&AuthenticatedUser>, row: &UserRecord) -> bool {
    row.deleted_at.is_none() && (is_admin(actor) || is_owner(actor, row))
}

/// Check a write of `next` over `current` (`None` for an insert)
pub fn check_write(
    actor: Option<&AuthenticatedUser>,
    current: Option<&UserRecord>,
    next: &UserRecord,
) -> Result<(), PersistenceError> {
    if is_admin(actor) {
        return Ok(());
    }

    match current {
        None if next.roles.is_empty() => Ok(()),
        None => Err(PersistenceError::rejected_by_policy(format!(
            "insert denied by rule `{RULE_ROLES_ADMIN_MANAGED}`"
        ))),
        Some(current) if !is_owner(actor, current) => Err(PersistenceError::rejected_by_policy(
            format!("update of user {} denied by rule `{RULE_OWNER_ONLY}`", current.id),
        )),
        Some(current) if current.roles != next.roles => Err(PersistenceError::rejected_by_policy(
            format!("update of user {} denied by rule `{RULE_ROLES_ADMIN_MANAGED}`", current.id),
        )),
        Some(_) => Ok(()),
    }
}
