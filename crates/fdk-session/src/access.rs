//! Role-gated access decisions for protected views.

use fdk_core::Role;

use crate::state::SessionState;

/// Outcome of an access check for a protected view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Render the requested view.
    Render,
    /// Not logged in; send the user to the login view.
    RedirectToLogin,
    /// Logged in with the wrong role; send to the unauthorized view.
    RedirectToUnauthorized,
}

/// Decide whether the current session may access a view.
///
/// Unauthenticated sessions always redirect to login, regardless of the
/// requirement. An empty `required` set means any authenticated identity
/// renders.
pub fn authorize(state: &SessionState, required: &[Role]) -> AccessDecision {
    let Some(identity) = state.identity() else {
        return AccessDecision::RedirectToLogin;
    };

    if required.is_empty() || required.contains(&identity.role) {
        AccessDecision::Render
    } else {
        AccessDecision::RedirectToUnauthorized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Identity;

    fn authenticated(role: Role) -> SessionState {
        SessionState::Authenticated(Identity {
            id: "U1".into(),
            role,
            token: "tok".into(),
            email: None,
        })
    }

    #[test]
    fn test_unauthenticated_always_redirects_to_login() {
        let state = SessionState::Unauthenticated;
        assert_eq!(authorize(&state, &[]), AccessDecision::RedirectToLogin);
        assert_eq!(
            authorize(&state, &[Role::Manager]),
            AccessDecision::RedirectToLogin
        );
        assert_eq!(
            authorize(&state, &[Role::Manager, Role::Employee]),
            AccessDecision::RedirectToLogin
        );
    }

    #[test]
    fn test_matching_role_renders() {
        assert_eq!(
            authorize(&authenticated(Role::Manager), &[Role::Manager]),
            AccessDecision::Render
        );
        assert_eq!(
            authorize(&authenticated(Role::Employee), &[Role::Employee]),
            AccessDecision::Render
        );
    }

    #[test]
    fn test_wrong_role_redirects_to_unauthorized() {
        assert_eq!(
            authorize(&authenticated(Role::Employee), &[Role::Manager]),
            AccessDecision::RedirectToUnauthorized
        );
        assert_eq!(
            authorize(&authenticated(Role::Manager), &[Role::Employee]),
            AccessDecision::RedirectToUnauthorized
        );
    }

    #[test]
    fn test_no_required_role_renders_any_identity() {
        assert_eq!(
            authorize(&authenticated(Role::Manager), &[]),
            AccessDecision::Render
        );
        assert_eq!(
            authorize(&authenticated(Role::Employee), &[]),
            AccessDecision::Render
        );
    }

    #[test]
    fn test_role_set_membership() {
        let both = [Role::Manager, Role::Employee];
        assert_eq!(
            authorize(&authenticated(Role::Manager), &both),
            AccessDecision::Render
        );
        assert_eq!(
            authorize(&authenticated(Role::Employee), &both),
            AccessDecision::Render
        );
    }
}
