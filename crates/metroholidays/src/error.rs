//! Error types for the Holidays API client.
//!
//! Two layers:
//!
//! - [`ValidationError`]: construction-time checks on domain values and
//!   configuration (country codes, URLs, environment).
//! - [`HolidaysError`]: what every client operation returns, classified by
//!   [`HolidaysErrorKind`].

use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::http_client::{HttpError, HttpErrorKind};

/// Validation and configuration errors exposed by `metroholidays`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("country code cannot be empty")]
    EmptyCountryCode,
    #[error("country code must be two ASCII letters: '{value}'")]
    InvalidCountryCode { value: String },

    #[error("date must be formatted as YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
    #[error("date_from {date_from} is after date_to {date_to}")]
    InvalidDateRange { date_from: String, date_to: String },
    #[error("calendar query must include at least one country code")]
    EmptyCountryCodes,

    #[error("base url is not a valid URL: '{value}'")]
    InvalidBaseUrl { value: String },
    #[error("base url must use http or https, got '{scheme}'")]
    UnsupportedScheme { scheme: String },

    #[error("environment variable {name} is not set")]
    MissingEnv { name: &'static str },
    #[error("environment variable {name} has an invalid value: '{value}'")]
    InvalidEnv { name: &'static str, value: String },
}

/// Client-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HolidaysErrorKind {
    /// The service rejected the credentials (HTTP 401/403).
    Authentication,
    /// Unreachable host, refused connection or timeout.
    Network,
    /// The service answered with a non-success status other than 401/403.
    Service,
    /// The response body does not match the expected schema.
    Parse,
    /// The request was rejected locally before any network call.
    InvalidRange,
    /// The blocking client could not start its runtime.
    Runtime,
}

/// Structured error returned by every client operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidaysError {
    kind: HolidaysErrorKind,
    message: String,
    status: Option<u16>,
}

impl HolidaysError {
    pub fn authentication(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: HolidaysErrorKind::Authentication,
            message: message.into(),
            status: Some(status),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: HolidaysErrorKind::Network,
            message: message.into(),
            status: None,
        }
    }

    pub fn service(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: HolidaysErrorKind::Service,
            message: message.into(),
            status: Some(status),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: HolidaysErrorKind::Parse,
            message: message.into(),
            status: None,
        }
    }

    pub fn invalid_range(message: impl Into<String>) -> Self {
        Self {
            kind: HolidaysErrorKind::InvalidRange,
            message: message.into(),
            status: None,
        }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self {
            kind: HolidaysErrorKind::Runtime,
            message: message.into(),
            status: None,
        }
    }

    pub const fn kind(&self) -> HolidaysErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status that produced this error, when there was a response.
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn is_authentication(&self) -> bool {
        self.kind == HolidaysErrorKind::Authentication
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            HolidaysErrorKind::Authentication => "holidays.authentication",
            HolidaysErrorKind::Network => "holidays.network",
            HolidaysErrorKind::Service => "holidays.service",
            HolidaysErrorKind::Parse => "holidays.parse",
            HolidaysErrorKind::InvalidRange => "holidays.invalid_range",
            HolidaysErrorKind::Runtime => "holidays.runtime",
        }
    }
}

impl Display for HolidaysError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (status {status}, {})", self.message, self.code()),
            None => write!(f, "{} ({})", self.message, self.code()),
        }
    }
}

impl std::error::Error for HolidaysError {}

impl From<ValidationError> for HolidaysError {
    fn from(error: ValidationError) -> Self {
        Self::invalid_range(error.to_string())
    }
}

impl From<HttpError> for HolidaysError {
    fn from(error: HttpError) -> Self {
        let prefix = match error.kind() {
            HttpErrorKind::Timeout => "request timed out",
            HttpErrorKind::Connect => "connection failed",
            HttpErrorKind::Other => "transport error",
        };
        Self::network(format!("{prefix}: {}", error.message()))
    }
}
