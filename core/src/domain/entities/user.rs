//! User aggregate: an account that can act as a principal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::domain::aggregate::{Aggregate, AggregateRoot};
use crate::domain::events::DomainEvent;
use crate::errors::{DomainError, DomainResult};

/// Maximum length of a display name, in characters
pub const MAX_DISPLAY_NAME_LENGTH: usize = 80;

/// Events recorded by [`User`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserEvent {
    Registered { email: String },
    Renamed { from: String, to: String },
    RoleGranted { role: String },
    Deleted,
}

impl DomainEvent for UserEvent {
    fn event_name(&self) -> &'static str {
        match self {
            UserEvent::Registered { .. } => "user.registered",
            UserEvent::Renamed { .. } => "user.renamed",
            UserEvent::RoleGranted { .. } => "user.role_granted",
            UserEvent::Deleted => "user.deleted",
        }
    }
}

/// Storage row for a user. Carries state only, never pending events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub roles: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// User aggregate
#[derive(Debug)]
pub struct User {
    root: AggregateRoot<UserEvent>,
    email: String,
    display_name: String,
    roles: BTreeSet<String>,
}

impl User {
    /// Register a new user, recording [`UserEvent::Registered`]
    pub fn register(email: impl Into<String>, display_name: impl Into<String>) -> DomainResult<Self> {
        let email = normalize_email(email.into())?;
        let display_name = validate_display_name(display_name.into())?;

        let mut user = Self {
            root: AggregateRoot::new(),
            email: email.clone(),
            display_name,
            roles: BTreeSet::new(),
        };
        user.add_domain_event(UserEvent::Registered { email });
        Ok(user)
    }

    /// Rebuild a user from its storage row
    pub fn from_record(record: UserRecord) -> Self {
        Self {
            root: AggregateRoot::restore(
                record.id,
                record.created_at,
                record.updated_at,
                record.deleted_at,
            ),
            email: record.email,
            display_name: record.display_name,
            roles: record.roles,
        }
    }

    /// Snapshot the persistable state
    pub fn to_record(&self) -> UserRecord {
        UserRecord {
            id: self.root.id(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            roles: self.roles.clone(),
            created_at: self.root.created_at(),
            updated_at: self.root.updated_at(),
            deleted_at: self.root.deleted_at(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.root.created_at()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.root.updated_at()
    }

    /// Change the display name. Renaming to the current name records nothing.
    pub fn rename(&mut self, display_name: impl Into<String>) -> DomainResult<()> {
        self.ensure_active()?;
        let display_name = validate_display_name(display_name.into())?;
        if display_name == self.display_name {
            return Ok(());
        }

        let from = std::mem::replace(&mut self.display_name, display_name.clone());
        self.mark_updated();
        self.add_domain_event(UserEvent::Renamed {
            from,
            to: display_name,
        });
        Ok(())
    }

    /// Grant a role. Returns `false` when the user already held it.
    pub fn grant_role(&mut self, role: impl Into<String>) -> DomainResult<bool> {
        self.ensure_active()?;
        let role = role.into();
        if role.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "role must not be empty".to_string(),
            });
        }
        if !self.roles.insert(role.clone()) {
            return Ok(false);
        }

        self.mark_updated();
        self.add_domain_event(UserEvent::RoleGranted { role });
        Ok(true)
    }

    /// Soft delete. Only the first call records [`UserEvent::Deleted`].
    pub fn delete(&mut self) {
        if self.is_deleted() {
            return;
        }
        self.mark_deleted();
        self.add_domain_event(UserEvent::Deleted);
    }

    fn ensure_active(&self) -> DomainResult<()> {
        if self.is_deleted() {
            return Err(DomainError::Validation {
                message: "user has been deleted".to_string(),
            });
        }
        Ok(())
    }
}

impl Aggregate for User {
    type Event = UserEvent;

    const AGGREGATE_TYPE: &'static str = "user";

    fn root(&self) -> &AggregateRoot<UserEvent> {
        &self.root
    }

    fn root_mut(&mut self) -> &mut AggregateRoot<UserEvent> {
        &mut self.root
    }
}

fn normalize_email(email: String) -> DomainResult<String> {
    let email = email.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };
    if !valid {
        return Err(DomainError::Validation {
            message: "email address is not valid".to_string(),
        });
    }
    Ok(email)
}

fn validate_display_name(display_name: String) -> DomainResult<String> {
    let display_name = display_name.trim().to_string();
    if display_name.is_empty() || display_name.chars().count() > MAX_DISPLAY_NAME_LENGTH {
        return Err(DomainError::Validation {
            message: format!(
                "display name must be between 1 and {} characters",
                MAX_DISPLAY_NAME_LENGTH
            ),
        });
    }
    Ok(display_name)
}
