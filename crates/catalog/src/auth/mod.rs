//! Authentication client.
//!
//! Exchanges email and password for a session token at a remote login
//! endpoint. The endpoint takes a JSON body `{"email", "password"}` and
//! answers `{"token"}` on success or `{"error"}` on refusal.

mod error;

pub use error::AuthError;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::AuthConfig;
use crate::session::{SessionGate, SessionToken};

/// Message used when a refusal carries no error text.
const DEFAULT_REJECTION: &str = "Login failed";

/// Login credentials. The password is redacted in `Debug` output.
#[derive(Debug, Clone)]
pub struct Credentials {
    email: String,
    password: SecretString,
}

impl Credentials {
    /// Build credentials, requiring both fields to be non-empty.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` naming the first empty field.
    pub fn new(email: &str, password: &str) -> Result<Self, AuthError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }
        Ok(Self {
            email: email.to_string(),
            password: SecretString::from(password),
        })
    }

    /// The email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Body of a login response. Either field may be absent.
#[derive(Debug, Default, Deserialize)]
struct LoginResponse {
    token: Option<String>,
    error: Option<String>,
}

/// Client for the login endpoint.
#[derive(Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    login_url: Url,
}

impl AuthClient {
    /// Create a new authentication client.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(api_key) = &config.api_key {
            let mut value = HeaderValue::from_str(api_key.expose_secret())
                .map_err(|e| AuthError::Parse(format!("Invalid API key format: {e}")))?;
            value.set_sensitive(true);
            headers.insert("x-api-key", value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            login_url: config.login_url.clone(),
        })
    }

    /// The endpoint credentials are posted to.
    #[must_use]
    pub const fn login_url(&self) -> &Url {
        &self.login_url
    }

    /// Exchange credentials for a session token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Rejected` if the endpoint refuses the credentials,
    /// `AuthError::Http` if the request fails in transit, and
    /// `AuthError::Parse` if a successful response has no usable token.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionToken, AuthError> {
        let body = serde_json::json!({
            "email": credentials.email,
            "password": credentials.password.expose_secret(),
        });

        let response = self
            .client
            .post(self.login_url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Login request failed");
                AuthError::Http(e)
            })?;
        let status = response.status();
        let text = response.text().await?;
        debug!(status = status.as_u16(), "Login response received");

        let token = interpret_response(status, &text)?;
        info!("Login succeeded");
        Ok(token)
    }

    /// Log in and store the resulting token in `gate`.
    ///
    /// # Errors
    ///
    /// Any error from [`AuthClient::login`], or `AuthError::Session` if the
    /// token cannot be stored.
    pub async fn login_and_begin_session(
        &self,
        gate: &SessionGate,
        credentials: &Credentials,
    ) -> Result<SessionToken, AuthError> {
        let token = self.login(credentials).await?;
        gate.begin_session(&token).await?;
        Ok(token)
    }
}

/// Turn a login response into a token or the reason there is none.
fn interpret_response(status: StatusCode, body: &str) -> Result<SessionToken, AuthError> {
    if status.is_success() {
        let parsed: LoginResponse =
            serde_json::from_str(body).map_err(|e| AuthError::Parse(e.to_string()))?;
        return parsed
            .token
            .and_then(SessionToken::new)
            .ok_or_else(|| AuthError::Parse("response has no token".to_string()));
    }

    // Refusals may carry any body; only a non-empty `error` field is used.
    let message = serde_json::from_str::<LoginResponse>(body)
        .ok()
        .and_then(|r| r.error)
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| DEFAULT_REJECTION.to_string());
    warn!(status = status.as_u16(), %message, "Login rejected");
    Err(AuthError::Rejected(message))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_require_both_fields() {
        assert!(matches!(
            Credentials::new("", "secret"),
            Err(AuthError::MissingField("email"))
        ));
        assert!(matches!(
            Credentials::new("   ", "secret"),
            Err(AuthError::MissingField("email"))
        ));
        assert!(matches!(
            Credentials::new("eve.holt@reqres.in", ""),
            Err(AuthError::MissingField("password"))
        ));
        let credentials = Credentials::new(" eve.holt@reqres.in ", "cityslicka").unwrap();
        assert_eq!(credentials.email(), "eve.holt@reqres.in");
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("eve.holt@reqres.in", "cityslicka").unwrap();
        assert!(!format!("{credentials:?}").contains("cityslicka"));
    }

    #[test]
    fn test_success_yields_token() {
        let token = interpret_response(StatusCode::OK, r#"{"token":"QpwL5tke4Pnpja7X4"}"#).unwrap();
        assert_eq!(token.expose(), "QpwL5tke4Pnpja7X4");
    }

    #[test]
    fn test_success_without_token_is_parse_error() {
        assert!(matches!(
            interpret_response(StatusCode::OK, "{}"),
            Err(AuthError::Parse(_))
        ));
        assert!(matches!(
            interpret_response(StatusCode::OK, r#"{"token":""}"#),
            Err(AuthError::Parse(_))
        ));
        assert!(matches!(
            interpret_response(StatusCode::OK, "<html>"),
            Err(AuthError::Parse(_))
        ));
    }

    #[test]
    fn test_rejection_uses_error_field() {
        let err =
            interpret_response(StatusCode::BAD_REQUEST, r#"{"error":"user not found"}"#).unwrap_err();
        assert!(matches!(err, AuthError::Rejected(ref m) if m == "user not found"));
    }

    #[test]
    fn test_rejection_defaults_message() {
        for body in ["", "{}", r#"{"error":""}"#, "Service Unavailable"] {
            let err = interpret_response(StatusCode::SERVICE_UNAVAILABLE, body).unwrap_err();
            assert!(matches!(err, AuthError::Rejected(ref m) if m == "Login failed"));
        }
    }

    #[test]
    fn test_client_rejects_bad_api_key() {
        let mut config = AuthConfig::new("http://127.0.0.1:1/login".parse().unwrap());
        config.api_key = Some(SecretString::from("bad\nkey"));
        assert!(matches!(AuthClient::new(&config), Err(AuthError::Parse(_))));
    }

    #[test]
    fn test_client_keeps_login_url() {
        let config = AuthConfig::new("http://127.0.0.1:1/api/login".parse().unwrap());
        let client = AuthClient::new(&config).unwrap();
        assert_eq!(client.login_url().path(), "/api/login");
    }
}
