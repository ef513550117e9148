//! Session state types

use fdk_core::Role;
use serde::{Deserialize, Serialize};

/// The authenticated user's identity for the current session.
///
/// Created on successful login, persisted under the `user` key to survive
/// restarts, destroyed on logout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub role: Role,
    /// Access token attached as a bearer header on outbound requests.
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Two-state session machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(Identity),
}

impl SessionState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Unauthenticated => None,
            Self::Authenticated(identity) => Some(identity),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity().is_some()
    }

    pub fn is_manager(&self) -> bool {
        matches!(self.identity(), Some(identity) if identity.role == Role::Manager)
    }

    pub fn is_employee(&self) -> bool {
        matches!(self.identity(), Some(identity) if identity.role == Role::Employee)
    }
}
