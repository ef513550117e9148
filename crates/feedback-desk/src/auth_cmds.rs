//! Login, signup, logout and whoami commands.

use anyhow::{Context, Result};
use fdk_core::{AppError, OutputFormat, Role};
use fdk_remote::{AuthClient, SignupRequest};
use fdk_session::{Identity, SessionContext};

use crate::config::Config;
use crate::guard::require_view;

pub async fn login(
    config: &Config,
    session: &mut SessionContext<'_>,
    emp_id: &str,
    role: Role,
    password: Option<String>,
) -> Result<()> {
    let password = resolve_password(password)?;
    let client = client_for(config, session);

    let response = match client.login(emp_id, &password, role).await {
        Ok(response) => response,
        Err(e) => {
            // 403 is the unauthorized view: the account exists under a
            // different role.
            if matches!(
                e.downcast_ref::<AppError>(),
                Some(AppError::RoleMismatch { .. })
            ) {
                eprintln!("Unauthorized: this account is registered under a different role.");
            }
            return Err(e);
        }
    };

    println!("Logged in as '{}' ({})", response.id, response.role);
    session.login(Identity {
        id: response.id,
        role: response.role,
        token: response.token,
        email: None,
    })?;
    Ok(())
}

pub async fn signup(
    config: &Config,
    session: &SessionContext<'_>,
    name: String,
    emp_id: String,
    role: Role,
    department: String,
    password: Option<String>,
) -> Result<()> {
    let password = resolve_password(password)?;
    let client = client_for(config, session);

    client
        .signup(&SignupRequest {
            name,
            emp_id: emp_id.clone(),
            password,
            role,
            department,
        })
        .await?;

    println!("Registered '{emp_id}' as {role}. You can now run `fdk login`.");
    Ok(())
}

pub fn logout(session: &mut SessionContext<'_>) -> Result<()> {
    session.logout()?;
    println!("Logged out");
    Ok(())
}

pub fn whoami(session: &SessionContext<'_>, format: &OutputFormat) -> Result<()> {
    require_view(session.current(), &[], "whoami")?;
    let identity = session.identity().context("Session identity missing")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(identity)?),
        OutputFormat::Text => {
            println!("id:    {}", identity.id);
            println!("role:  {}", identity.role);
            if let Some(email) = &identity.email {
                println!("email: {email}");
            }
        }
    }
    Ok(())
}

/// Build the endpoint client, attaching the stored session token when one
/// is present.
fn client_for(config: &Config, session: &SessionContext<'_>) -> AuthClient {
    let client = AuthClient::new(&config.api.base_url);
    match session.token() {
        Some(token) => client.with_token(token),
        None => client,
    }
}

/// Take the password from the flag, or prompt for it on stdin.
fn resolve_password(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    eprint!("Password: ");
    std::io::Write::flush(&mut std::io::stderr()).context("Failed to flush stderr")?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;

    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        return Err(AppError::MissingField("password").into());
    }
    Ok(password)
}
