//! Collaborator error taxonomy.
//!
//! Every backend failure is folded into [`ApiError`] at the transport edge so
//! callers match on meaning (missing relation, no rows, unauthenticated)
//! instead of status codes.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;

/// Postgres "undefined table" code. Surfaces when an optional view is absent.
pub const MISSING_RELATION_CODE: &str = "42P01";
/// PostgREST "single row requested, none found" code.
pub const NO_ROWS_CODE: &str = "PGRST116";

/// Errors returned by backend collaborators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("backend error ({status}): {message}")]
    Backend { status: u16, code: Option<String>, message: String },
    #[error("relation does not exist: {0}")]
    MissingRelation(String),
    #[error("not found")]
    NotFound,
    #[error("not authenticated")]
    Unauthenticated,
    #[error("decode error: {0}")]
    Decode(String),
    #[error("backend unavailable in this build")]
    Unavailable,
}

impl ApiError {
    #[must_use]
    pub fn is_missing_relation(&self) -> bool {
        matches!(self, Self::MissingRelation(_))
    }

    /// Classify a non-2xx response from its status and raw body.
    ///
    /// Row-access errors carry `{code, message, details, hint}`; auth errors
    /// use `msg`, `error_description`, or `error` instead.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = parsed
            .message
            .or(parsed.msg)
            .or(parsed.error_description)
            .or(parsed.error)
            .unwrap_or_else(|| format!("HTTP {status}"));

        match parsed.code.as_deref() {
            Some(MISSING_RELATION_CODE) => return Self::MissingRelation(message),
            Some(NO_ROWS_CODE) => return Self::NotFound,
            _ => {}
        }
        if status == 401 {
            return Self::Unauthenticated;
        }
        Self::Backend { status, code: parsed.code, message }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default, deserialize_with = "code_as_string")]
    code: Option<String>,
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

/// Auth errors send a numeric `code`; row errors send a string one.
fn code_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
