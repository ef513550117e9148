//! Session identity and role-gated access decisions.

pub mod access;
pub mod context;
pub mod state;

pub use access::{AccessDecision, authorize};
pub use context::SessionContext;
pub use state::{Identity, SessionState};
