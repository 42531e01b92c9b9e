//! Session tokens signed by the auth service.
//!
//! A session token is an HS256 JWT carrying [`SessionClaims`]. It arrives
//! either as `Authorization: Bearer <token>` (RPC client) or in the session
//! cookie (page surface). Anything missing, malformed, expired, or signed
//! with another secret resolves to "no session".

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rankly_core::types::UserId;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Default cookie carrying the session token.
const DEFAULT_COOKIE_NAME: &str = "rankly_session";
/// Default location of the auth service's login page.
const DEFAULT_LOGIN_URL: &str = "/login";

/// Configuration for session token verification.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret shared with the auth service.
    pub secret: String,
    /// Cookie name read when no `Authorization` header is present.
    pub cookie_name: String,
    /// Where page routes send visitors without a session.
    pub login_url: String,
}

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var          | Required | Default          |
    /// |------------------|----------|------------------|
    /// | `SESSION_SECRET` | **yes**  | --               |
    /// | `SESSION_COOKIE` | no       | `rankly_session` |
    /// | `LOGIN_URL`      | no       | `/login`         |
    ///
    /// # Panics
    ///
    /// Panics if `SESSION_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "SESSION_SECRET must not be empty");

        Self {
            secret,
            cookie_name: std::env::var("SESSION_COOKIE")
                .unwrap_or_else(|_| DEFAULT_COOKIE_NAME.to_string()),
            login_url: std::env::var("LOGIN_URL").unwrap_or_else(|_| DEFAULT_LOGIN_URL.to_string()),
        }
    }

    /// Config with the given secret and default cookie/login settings.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            login_url: DEFAULT_LOGIN_URL.to_string(),
        }
    }
}

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Subject -- the auth service's user id.
    pub sub: UserId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct SessionUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
}

/// A verified session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Session {
    pub user: SessionUser,
}

impl From<SessionClaims> for Session {
    fn from(claims: SessionClaims) -> Self {
        Session {
            user: SessionUser {
                id: claims.sub,
                name: claims.name,
                email: claims.email,
                image: claims.image,
            },
        }
    }
}

/// Resolve the session for a request, or `None` when there is no valid one.
pub fn get_session(headers: &HeaderMap, config: &SessionConfig) -> Option<Session> {
    let token = bearer_token(headers).or_else(|| cookie_value(headers, &config.cookie_name))?;

    match validate_session_token(token, config) {
        Ok(claims) => Some(claims.into()),
        Err(err) => {
            tracing::debug!(error = %err, "Rejected session token");
            None
        }
    }
}

/// Validate and decode a session token, returning its [`SessionClaims`].
///
/// Validates the signature and expiration.
pub fn validate_session_token(
    token: &str,
    config: &SessionConfig,
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

/// Sign a session token for `user`, valid for `ttl_secs`.
///
/// This is the auth service's half of the contract. Rankly never calls it
/// while handling a request; it exists for that collaborator and for tests.
pub fn issue_session_token(
    user: &SessionUser,
    ttl_secs: i64,
    config: &SessionConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = SessionClaims {
        sub: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        image: user.image.clone(),
        exp: now + ttl_secs,
        iat: now,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|v| !v.is_empty())
}
