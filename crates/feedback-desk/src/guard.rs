//! CLI rendition of the view-level authorization gate.

use anyhow::Result;
use fdk_core::{AppError, Role};
use fdk_session::{AccessDecision, SessionState, authorize};

/// Enforce a view's role requirement before running its command.
///
/// The redirect outcomes of the gate become printed hints plus a non-zero
/// exit: RedirectToLogin points at `fdk login`, RedirectToUnauthorized
/// names the role that was refused.
pub fn require_view(state: &SessionState, required: &[Role], view: &str) -> Result<()> {
    match (authorize(state, required), state.identity()) {
        (AccessDecision::Render, _) => Ok(()),
        (AccessDecision::RedirectToUnauthorized, Some(identity)) => {
            eprintln!("Unauthorized: {view} requires one of: {}", role_list(required));
            Err(AppError::Unauthorized {
                role: identity.role,
                view: view.to_string(),
            }
            .into())
        }
        // RedirectToLogin, or an unauthorized decision with no identity to name
        _ => {
            eprintln!("Not logged in. Run `fdk login <EMP_ID> --role <ROLE>` first.");
            Err(AppError::NotLoggedIn.into())
        }
    }
}

fn role_list(roles: &[Role]) -> String {
    roles
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fdk_session::Identity;

    fn authenticated(role: Role) -> SessionState {
        SessionState::Authenticated(Identity {
            id: "U1".into(),
            role,
            token: "tok".into(),
            email: None,
        })
    }

    #[test]
    fn test_unauthenticated_yields_not_logged_in() {
        let err = require_view(&SessionState::Unauthenticated, &[Role::Manager], "history")
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AppError>(),
            Some(AppError::NotLoggedIn)
        ));
    }

    #[test]
    fn test_wrong_role_yields_unauthorized() {
        let err = require_view(&authenticated(Role::Employee), &[Role::Manager], "history")
            .unwrap_err();
        match err.downcast_ref::<AppError>() {
            Some(AppError::Unauthorized { role, view }) => {
                assert_eq!(*role, Role::Employee);
                assert_eq!(view, "history");
            }
            other => panic!("Expected Unauthorized, got {other:?}"),
        }
    }

    #[test]
    fn test_matching_role_passes() {
        assert!(require_view(&authenticated(Role::Manager), &[Role::Manager], "history").is_ok());
    }

    #[test]
    fn test_no_requirement_passes_any_identity() {
        assert!(require_view(&authenticated(Role::Employee), &[], "whoami").is_ok());
    }

    #[test]
    fn test_role_list_format() {
        assert_eq!(role_list(&[Role::Manager, Role::Employee]), "manager, employee");
    }
}
