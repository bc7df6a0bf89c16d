//! Core types for dify-export
//!
//! Wire shapes of the console API responses plus the session token derived
//! from a successful login.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a console application
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(pub String);

impl AppId {
    /// Create a new AppId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of this application's entry inside the export archive
    pub fn entry_name(&self) -> String {
        format!("{}.yml", self.0)
    }
}

impl From<&str> for AppId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl PartialEq<&str> for AppId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `POST /login`
#[derive(Clone, Serialize)]
pub struct LoginRequest<'a> {
    /// Account email
    pub email: &'a str,
    /// Account password
    pub password: &'a str,
}

/// Response of `POST /login`
///
/// Both fields default when absent so that an unexpected but well-formed
/// JSON answer decodes, and is then rejected by the login checks.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LoginResponse {
    /// "success" on a successful login
    #[serde(default)]
    pub result: String,

    /// Issued tokens
    #[serde(default)]
    pub data: SessionToken,
}

/// Tokens issued by a successful login
///
/// Lives for one run; there is no refresh. If the access token expires
/// mid-run the next call fails with an authorization error.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SessionToken {
    /// Bearer token for authenticated calls
    #[serde(default)]
    pub access_token: String,

    /// Refresh token (kept, never used)
    #[serde(default)]
    pub refresh_token: String,
}

impl SessionToken {
    /// Value of the `Authorization` header for authenticated calls
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// One application in a listing page
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AppRef {
    /// Application identifier
    pub id: AppId,
}

/// One page of `GET /apps`
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AppPage {
    /// Whether another page follows this one
    #[serde(default)]
    pub has_more: bool,

    /// Applications on this page, in listing order
    #[serde(default)]
    pub data: Vec<AppRef>,
}

/// Response of `GET /apps/{id}/export`
#[derive(Clone, Debug, Deserialize)]
pub struct ExportResponse {
    /// The exported document, passed through untouched
    pub data: String,
}

/// Error body returned by the console API on failures
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code
    #[serde(default)]
    pub code: Option<String>,

    /// Human-readable message
    #[serde(default)]
    pub message: Option<String>,
}

/// Outcome of a completed export run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportSummary {
    /// Number of applications written to the archive
    pub exported: usize,

    /// Path of the written archive
    pub output: std::path::PathBuf,
}
