//! Login against the league host and session cookie handling.
//!
//! The login endpoint answers with a small XML document; on success the
//! root element carries the session token as an `MFL_USER_ID` attribute:
//!
//! ```text
//! <status cookie_name="MFL_USER_ID" MFL_USER_ID="aXpQ...">OK</status>
//! ```
//!
//! and on rejection it returns `<error>Invalid Password</error>`.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::{info, warn};

use super::transport::{GetRequest, Transport};
use crate::error::{MflError, Result};

pub const COOKIE_NAME: &str = "MFL_USER_ID";

/// League account credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Authenticated session token, sent back as `Cookie: MFL_USER_ID=<token>`.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCookie {
    token: String,
}

impl SessionCookie {
    pub fn header_value(&self) -> String {
        format!("{}={}", COOKIE_NAME, self.token)
    }
}

impl fmt::Debug for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionCookie(<redacted>)")
    }
}

/// Session token attribute on the login `<status>` element.
static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bMFL_USER_ID="([^"]+)""#).expect("Invalid session token regex pattern")
});

/// Rejection text, e.g. `<error>Invalid Password</error>`.
static ERROR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<error[^>]*>([^<]*)</error>").expect("Invalid login error regex pattern")
});

/// Pull the session token out of a login response body.
pub fn extract_session(body: &str) -> Result<SessionCookie> {
    if let Some(token) = TOKEN_REGEX
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|t| !t.is_empty())
    {
        return Ok(SessionCookie {
            token: token.to_string(),
        });
    }

    let reason = ERROR_REGEX
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| format!("no {} in login response", COOKIE_NAME));
    Err(MflError::Authentication(reason))
}

/// Log in and return the session cookie for later export requests.
pub async fn authenticate(
    transport: &dyn Transport,
    login_url: &str,
    credentials: &Credentials,
) -> Result<SessionCookie> {
    let request = GetRequest::new(
        login_url,
        vec![
            ("USERNAME".to_string(), credentials.username.clone()),
            ("PASSWORD".to_string(), credentials.password.clone()),
            ("XML".to_string(), "1".to_string()),
        ],
    );

    let body = transport.get(&request).await?;
    match extract_session(&body) {
        Ok(session) => {
            info!("Authenticated against league host");
            Ok(session)
        }
        Err(e) => {
            warn!("Login rejected: {}", e);
            Err(e)
        }
    }
}
