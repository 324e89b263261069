//! Session commands: login, logout, status.

use catalog_keeper::{AuthClient, CatalogConfig, Credentials, SessionGate, SessionState};
use tracing::info;

use super::CommandError;

/// Log in at the configured endpoint and store the token.
///
/// # Errors
///
/// Returns `CommandError::Auth` if the credentials are incomplete, refused,
/// or the endpoint cannot be reached.
pub async fn login(
    config: &CatalogConfig,
    gate: &SessionGate,
    email: &str,
    password: &str,
) -> Result<(), CommandError> {
    let credentials = Credentials::new(email, password)?;
    let client = AuthClient::new(&config.auth)?;
    client.login_and_begin_session(gate, &credentials).await?;
    info!("Logged in as {}", credentials.email());
    Ok(())
}

/// Remove the stored token. Products are kept.
///
/// # Errors
///
/// Returns `CommandError::Storage` if the token cannot be removed.
pub async fn logout(gate: &SessionGate) -> Result<(), CommandError> {
    gate.end_session().await?;
    info!("Logged out");
    Ok(())
}

/// Report whether a session is active.
///
/// # Errors
///
/// Returns `CommandError::Storage` if the token cannot be read.
pub async fn status(gate: &SessionGate) -> Result<SessionState, CommandError> {
    let state = gate.state().await?;
    match state {
        SessionState::Authenticated => info!("Logged in"),
        SessionState::Unauthenticated => info!("Not logged in"),
    }
    Ok(state)
}
