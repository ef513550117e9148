use crate::types::Role;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Role '{role}' is not permitted to access {view}")]
    Unauthorized { role: Role, view: String },

    #[error("Role mismatch: account '{emp_id}' is not registered as {role}")]
    RoleMismatch { emp_id: String, role: Role },

    #[error("Invalid credentials for '{0}'")]
    InvalidCredentials(String),

    #[error("User '{0}' already exists")]
    UserExists(String),

    #[error("Authentication service error (HTTP {status}): {message}")]
    AuthFailed { status: u16, message: String },

    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_not_logged_in() {
        let err = AppError::NotLoggedIn;
        assert_eq!(err.to_string(), "Not logged in");
    }

    #[test]
    fn test_display_unauthorized() {
        let err = AppError::Unauthorized {
            role: Role::Employee,
            view: "feedback history".into(),
        };
        assert_eq!(
            err.to_string(),
            "Role 'employee' is not permitted to access feedback history"
        );
    }

    #[test]
    fn test_display_role_mismatch() {
        let err = AppError::RoleMismatch {
            emp_id: "E42".into(),
            role: Role::Manager,
        };
        assert_eq!(
            err.to_string(),
            "Role mismatch: account 'E42' is not registered as manager"
        );
    }

    #[test]
    fn test_display_invalid_credentials() {
        let err = AppError::InvalidCredentials("E42".into());
        assert_eq!(err.to_string(), "Invalid credentials for 'E42'");
    }

    #[test]
    fn test_display_user_exists() {
        let err = AppError::UserExists("E42".into());
        assert_eq!(err.to_string(), "User 'E42' already exists");
    }

    #[test]
    fn test_display_auth_failed() {
        let err = AppError::AuthFailed {
            status: 500,
            message: "internal error".into(),
        };
        assert_eq!(
            err.to_string(),
            "Authentication service error (HTTP 500): internal error"
        );
    }

    #[test]
    fn test_display_missing_field() {
        let err = AppError::MissingField("strengths");
        assert_eq!(err.to_string(), "Missing required field 'strengths'");
    }

    #[test]
    fn test_display_invalid_key() {
        let err = AppError::InvalidKey("../etc/passwd".into());
        assert_eq!(err.to_string(), "Invalid storage key '../etc/passwd'");
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AppError>();
    }
}
