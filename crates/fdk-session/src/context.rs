//! Session lifecycle: hydrate, login, logout.

use anyhow::Result;
use fdk_core::Role;
use fdk_store::{StoragePort, keys};

use crate::state::{Identity, SessionState};

/// Owns the current session state and its persisted form.
///
/// The identity is stored under the `user` key; login additionally writes
/// the role-matched denormalized id key (`managerId` or `employeeId`), and
/// logout clears all of them.
pub struct SessionContext<'a> {
    store: &'a dyn StoragePort,
    state: SessionState,
}

impl<'a> SessionContext<'a> {
    /// A fresh, unauthenticated context.
    pub fn new(store: &'a dyn StoragePort) -> Self {
        Self {
            store,
            state: SessionState::Unauthenticated,
        }
    }

    /// Restore the session from durable storage.
    ///
    /// A malformed stored identity is discarded (and its key cleared); the
    /// context stays unauthenticated rather than surfacing an error.
    pub fn hydrate(store: &'a dyn StoragePort) -> Result<Self> {
        let Some(raw) = store.get_raw(keys::USER)? else {
            return Ok(Self::new(store));
        };

        match serde_json::from_str::<Identity>(&raw) {
            Ok(identity) => Ok(Self {
                store,
                state: SessionState::Authenticated(identity),
            }),
            Err(e) => {
                tracing::warn!(error = %e, "Stored session identity is malformed, discarding");
                store.remove(keys::USER)?;
                Ok(Self::new(store))
            }
        }
    }

    /// Persist `identity` and transition to Authenticated.
    pub fn login(&mut self, identity: Identity) -> Result<()> {
        let json = serde_json::to_string(&identity)?;
        self.store.put_raw(keys::USER, &json)?;

        match identity.role {
            Role::Manager => self.store.put_raw(keys::MANAGER_ID, &identity.id)?,
            Role::Employee => self.store.put_raw(keys::EMPLOYEE_ID, &identity.id)?,
        }

        self.state = SessionState::Authenticated(identity);
        Ok(())
    }

    /// Clear the persisted identity and derived keys, transition to
    /// Unauthenticated.
    pub fn logout(&mut self) -> Result<()> {
        self.store.remove(keys::USER)?;
        self.store.remove(keys::MANAGER_ID)?;
        self.store.remove(keys::EMPLOYEE_ID)?;
        self.state = SessionState::Unauthenticated;
        Ok(())
    }

    pub fn current(&self) -> &SessionState {
        &self.state
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.state.identity()
    }

    pub fn token(&self) -> Option<&str> {
        self.identity().map(|identity| identity.token.as_str())
    }

    pub fn is_manager(&self) -> bool {
        self.state.is_manager()
    }

    pub fn is_employee(&self) -> bool {
        self.state.is_employee()
    }
}
