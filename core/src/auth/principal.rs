//! The authenticated principal attached to an in-flight request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// An authenticated actor.
///
/// Beyond the identifier and role set, any additional claims carried by the
/// credential are kept as-is and are reachable through [`field`](Self::field).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,

    #[serde(default)]
    pub roles: BTreeSet<String>,

    #[serde(default, flatten)]
    pub claims: Map<String, Value>,
}

impl AuthenticatedUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            roles: BTreeSet::new(),
            claims: Map::new(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    pub fn with_roles<I, R>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    pub fn with_claim(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.claims.insert(key.into(), value.into());
        self
    }

    /// Look up one field of the principal by name.
    ///
    /// `id` and `roles` resolve to the typed fields; any other name is read
    /// from the extra claims.
    pub fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::String(self.id.clone())),
            "roles" => Some(Value::Array(
                self.roles.iter().cloned().map(Value::String).collect(),
            )),
            other => self.claims.get(other).cloned(),
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// True when this principal holds at least one of `roles`
    pub fn has_any_role(&self, roles: &BTreeSet<String>) -> bool {
        !self.roles.is_disjoint(roles)
    }
}
