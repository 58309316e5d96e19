use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Timestamp layout used by login histories, e.g. `2025-01-01 09:15:00`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors raised while building a login event from raw fields
#[derive(Error, Debug)]
pub enum EventError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Outcome of a login attempt
///
/// Anything other than `success` or `fail` is kept verbatim and counts
/// as a non-failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginResult {
    Success,
    Fail,
    Other(String),
}

impl LoginResult {
    pub fn is_failure(&self) -> bool {
        matches!(self, LoginResult::Fail)
    }

    pub fn as_str(&self) -> &str {
        match self {
            LoginResult::Success => "success",
            LoginResult::Fail => "fail",
            LoginResult::Other(value) => value,
        }
    }
}

impl From<&str> for LoginResult {
    fn from(value: &str) -> Self {
        match value {
            "success" => LoginResult::Success,
            "fail" => LoginResult::Fail,
            other => LoginResult::Other(other.to_string()),
        }
    }
}

/// A single authentication attempt from the login history
#[derive(Debug, Clone)]
pub struct LoginEvent {
    pub login_id: String,
    pub user_id: String,
    pub country: String,
    pub login_result: LoginResult,
    pub timestamp: NaiveDateTime,
    /// Timestamp exactly as it appeared in the source
    pub raw_timestamp: String,
}

impl LoginEvent {
    /// Build an event from raw text fields, parsing the timestamp
    pub fn parse(
        login_id: &str,
        user_id: &str,
        country: &str,
        login_result: &str,
        timestamp: &str,
    ) -> Result<Self, EventError> {
        let parsed = parse_timestamp(timestamp)?;
        Ok(LoginEvent {
            login_id: login_id.to_string(),
            user_id: user_id.to_string(),
            country: country.to_string(),
            login_result: LoginResult::from(login_result),
            timestamp: parsed,
            raw_timestamp: timestamp.to_string(),
        })
    }
}

/// Parse a timestamp in [`TIMESTAMP_FORMAT`]
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, EventError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|source| {
        EventError::InvalidTimestamp {
            value: value.to_string(),
            source,
        }
    })
}

/// A login event that tripped at least one detection rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedEvent {
    pub login_id: String,
    pub user_id: String,
    pub country: String,
    pub timestamp: String,
    pub reasons: Vec<String>,
}

impl FlaggedEvent {
    pub fn from_event(event: &LoginEvent, reasons: Vec<String>) -> Self {
        FlaggedEvent {
            login_id: event.login_id.clone(),
            user_id: event.user_id.clone(),
            country: event.country.clone(),
            timestamp: event.raw_timestamp.clone(),
            reasons,
        }
    }
}
