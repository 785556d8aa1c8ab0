//! Connection configuration for the Holidays API.

use std::fmt::{Debug, Formatter};

use url::Url;

use crate::ValidationError;

pub const ENV_URL: &str = "HOLIDAYS_API_URL";
pub const ENV_USER: &str = "HOLIDAYS_API_USER";
pub const ENV_PASSWORD: &str = "HOLIDAYS_API_PASSWORD";
pub const ENV_AUTH: &str = "HOLIDAYS_API_AUTH";
pub const ENV_WIRE: &str = "HOLIDAYS_API_WIRE";
pub const ENV_TIMEOUT_MS: &str = "HOLIDAYS_API_TIMEOUT_MS";

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// How requests are authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    /// HTTP Basic credentials on every request.
    #[default]
    Basic,
    /// Log in once against the auth endpoint and send the issued bearer token.
    Token,
}

impl AuthScheme {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(Self::Basic),
            "token" | "bearer" => Some(Self::Token),
            _ => None,
        }
    }
}

/// Endpoint paths and query parameter names spoken by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireFormat {
    pub holidays_path: String,
    pub auth_path: String,
    pub from_param: String,
    pub to_param: String,
    /// When set, requested countries are sent comma-separated under this name.
    pub countries_param: Option<String>,
    /// When set, the weekends flag is sent under this name.
    pub weekends_param: Option<String>,
}

impl WireFormat {
    /// `GET holidays?from=..&to=..`, country filtering happens client-side.
    pub fn holidays() -> Self {
        Self {
            holidays_path: String::from("holidays"),
            auth_path: String::from("auth"),
            from_param: String::from("from"),
            to_param: String::from("to"),
            countries_param: None,
            weekends_param: None,
        }
    }

    /// `GET api/v1/calendar?date_from=..&date_to=..&country_codes=..&weekends=..`
    pub fn calendar_v1() -> Self {
        Self {
            holidays_path: String::from("api/v1/calendar"),
            auth_path: String::from("api/v1/auth"),
            from_param: String::from("date_from"),
            to_param: String::from("date_to"),
            countries_param: Some(String::from("country_codes")),
            weekends_param: Some(String::from("weekends")),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "holidays" => Some(Self::holidays()),
            "calendar_v1" | "v1" => Some(Self::calendar_v1()),
            _ => None,
        }
    }
}

impl Default for WireFormat {
    fn default() -> Self {
        Self::holidays()
    }
}

/// Immutable connection settings for one client.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
    username: String,
    password: String,
    auth: AuthScheme,
    wire: WireFormat,
    timeout_ms: u64,
}

impl ClientConfig {
    /// Validate `base_url` (http or https) and store the credentials.
    pub fn new(
        base_url: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            username: username.into(),
            password: password.into(),
            auth: AuthScheme::default(),
            wire: WireFormat::default(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        })
    }

    /// Read settings from `HOLIDAYS_API_*` environment variables.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ValidationError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ValidationError::MissingEnv { name })
        };

        let mut config = Self::new(
            &required(ENV_URL)?,
            required(ENV_USER)?,
            required(ENV_PASSWORD)?,
        )?;

        if let Some(value) = lookup(ENV_AUTH) {
            config.auth = AuthScheme::parse(&value).ok_or(ValidationError::InvalidEnv {
                name: ENV_AUTH,
                value,
            })?;
        }

        if let Some(value) = lookup(ENV_WIRE) {
            config.wire = WireFormat::parse(&value).ok_or(ValidationError::InvalidEnv {
                name: ENV_WIRE,
                value,
            })?;
        }

        if let Some(value) = lookup(ENV_TIMEOUT_MS) {
            config.timeout_ms = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or(ValidationError::InvalidEnv {
                    name: ENV_TIMEOUT_MS,
                    value,
                })?;
        }

        Ok(config)
    }

    pub fn with_auth(mut self, auth: AuthScheme) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_wire_format(mut self, wire: WireFormat) -> Self {
        self.wire = wire;
        self
    }

    /// Per-request timeout; `0` falls back to [`DEFAULT_TIMEOUT_MS`].
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = if timeout_ms > 0 {
            timeout_ms
        } else {
            DEFAULT_TIMEOUT_MS
        };
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    pub const fn auth(&self) -> AuthScheme {
        self.auth
    }

    pub fn wire(&self) -> &WireFormat {
        &self.wire
    }

    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Absolute URL of an endpoint path relative to the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, ValidationError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|_| ValidationError::InvalidBaseUrl {
                value: format!("{}{path}", self.base_url),
            })
    }
}

impl Debug for ClientConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("password", &"***")
            .field("auth", &self.auth)
            .field("wire", &self.wire)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

/// Relative endpoint paths join under the base path only when it ends in `/`.
fn parse_base_url(value: &str) -> Result<Url, ValidationError> {
    let mut url = Url::parse(value.trim()).map_err(|_| ValidationError::InvalidBaseUrl {
        value: value.to_owned(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ValidationError::UnsupportedScheme {
            scheme: url.scheme().to_owned(),
        });
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
