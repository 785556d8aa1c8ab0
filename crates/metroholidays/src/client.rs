//! Async client for the Holidays API.
//!
//! ```rust,ignore
//! use metroholidays::HolidaysClient;
//! use time::macros::date;
//!
//! let client = HolidaysClient::new("https://holidays.example.com/", "user", "pwd")?;
//! let table = client
//!     .load_calendar(date!(2020 - 01 - 01), date!(2020 - 12 - 31), ["jp", "us"], true)
//!     .await?;
//! ```

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use time::Date;
use url::Url;

use crate::config::{AuthScheme, ClientConfig};
use crate::domain::date::format_date;
use crate::domain::{validate_range, CalendarQuery, CalendarTable, CountryCode, Holiday, HolidayRecord};
use crate::http_client::{HttpAuth, HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient};
use crate::session::TokenSession;
use crate::HolidaysError;

/// Keys under which an object-shaped response may carry the record list.
const RECORD_KEYS: [&str; 3] = ["holidays", "data", "results"];

/// Longest slice of an error body quoted in error messages.
const BODY_EXCERPT_CHARS: usize = 200;

/// Holidays API client.
///
/// Configuration is fixed at construction. With [`AuthScheme::Token`] the
/// issued token is cached in memory and shared by every call.
pub struct HolidaysClient {
    config: ClientConfig,
    http_client: Arc<dyn HttpClient>,
    session: TokenSession,
}

impl std::fmt::Debug for HolidaysClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HolidaysClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HolidaysClient {
    /// Basic-auth client for `url` over the default wire format.
    pub fn new(
        url: &str,
        user: impl Into<String>,
        pwd: impl Into<String>,
    ) -> Result<Self, HolidaysError> {
        let config = ClientConfig::new(url, user, pwd)?;
        Ok(Self::with_config(config))
    }

    /// Client configured from `HOLIDAYS_API_*` environment variables.
    pub fn from_env() -> Result<Self, HolidaysError> {
        let config = ClientConfig::from_env()?;
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::default()))
    }

    pub fn with_http_client(config: ClientConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            http_client,
            session: TokenSession::default(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Calendar flags for every date of `[date_from, date_to]` and each
    /// requested country reported by the service. With `weekends == false`
    /// Saturdays and Sundays are left out of the table.
    ///
    /// # Errors
    ///
    /// - `InvalidRange` before any network call when `date_from > date_to`,
    ///   `country_codes` is empty or a code is malformed.
    /// - `Authentication`, `Network`, `Service`, `Parse` from the round trip.
    pub async fn load_calendar<I, S>(
        &self,
        date_from: Date,
        date_to: Date,
        country_codes: I,
        weekends: bool,
    ) -> Result<CalendarTable, HolidaysError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let query = CalendarQuery::parse(date_from, date_to, country_codes, weekends)?;
        self.load_calendar_with(&query).await
    }

    pub async fn load_calendar_with(
        &self,
        query: &CalendarQuery,
    ) -> Result<CalendarTable, HolidaysError> {
        let records = self
            .fetch_records(
                query.date_from(),
                query.date_to(),
                Some(query.country_codes()),
                Some(query.include_weekends()),
            )
            .await?;
        let holidays = flatten(&records)?;

        let table = CalendarTable::build(query, &holidays);
        tracing::debug!(
            rows = table.len(),
            countries = table.countries().len(),
            "built holidays calendar"
        );
        Ok(table)
    }

    /// Holiday records exactly as the service returned them.
    pub async fn load_holidays_raw(
        &self,
        date_from: Date,
        date_to: Date,
    ) -> Result<Vec<HolidayRecord>, HolidaysError> {
        validate_range(date_from, date_to)?;
        self.fetch_records(date_from, date_to, None, None).await
    }

    /// Holiday records flattened to one entry per date.
    pub async fn load_holidays(
        &self,
        date_from: Date,
        date_to: Date,
    ) -> Result<Vec<Holiday>, HolidaysError> {
        let records = self.load_holidays_raw(date_from, date_to).await?;
        let holidays = flatten(&records)?;
        tracing::debug!(count = holidays.len(), "holidays loaded");
        Ok(holidays)
    }

    /// Authenticated GET of any endpoint relative to the base URL.
    pub async fn exec_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, HolidaysError> {
        let query = params
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect::<Vec<_>>();
        self.get_json(path, query).await
    }

    /// Log in with the token scheme unless a live token is cached; `force`
    /// always logs in. Basic auth needs no login and returns immediately.
    pub async fn authenticate(&self, force: bool) -> Result<(), HolidaysError> {
        if self.config.auth() == AuthScheme::Basic {
            return Ok(());
        }
        if force {
            tracing::debug!("forcing holidays api authentication");
        } else if self.session.current().is_some() {
            return Ok(());
        }
        self.login().await.map(|_| ())
    }

    async fn fetch_records(
        &self,
        date_from: Date,
        date_to: Date,
        countries: Option<&[CountryCode]>,
        weekends: Option<bool>,
    ) -> Result<Vec<HolidayRecord>, HolidaysError> {
        let wire = self.config.wire();
        let mut query = vec![
            (wire.from_param.clone(), format_date(date_from)),
            (wire.to_param.clone(), format_date(date_to)),
        ];

        if let (Some(param), Some(countries)) = (&wire.countries_param, countries) {
            let joined = countries
                .iter()
                .map(CountryCode::as_str)
                .collect::<Vec<_>>()
                .join(",");
            query.push((param.clone(), joined));
        }

        if let (Some(param), Some(weekends)) = (&wire.weekends_param, weekends) {
            query.push((param.clone(), weekends.to_string()));
        }

        let body = self.get_json(&wire.holidays_path, query).await?;
        let records = extract_records(body)?;
        tracing::debug!(count = records.len(), "holiday records received");
        Ok(records)
    }

    async fn get_json(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<Value, HolidaysError> {
        let url = self.config.endpoint(path)?;
        let (auth, cached) = self.credentials().await?;

        match self.get_once(&url, &query, &auth).await {
            Err(error) if cached && error.status() == Some(401) => {
                tracing::info!(path, "cached holidays api token rejected, authenticating again");
                self.session.invalidate();
                let token = self.login().await?;
                self.get_once(&url, &query, &HttpAuth::BearerToken(token))
                    .await
            }
            result => result,
        }
    }

    async fn get_once(
        &self,
        url: &Url,
        query: &[(String, String)],
        auth: &HttpAuth,
    ) -> Result<Value, HolidaysError> {
        let request = query
            .iter()
            .fold(HttpRequest::get(url.as_str()), |request, (name, value)| {
                request.with_query(name.as_str(), value.as_str())
            })
            .with_header("accept", "application/json")
            .with_auth(auth)
            .with_timeout_ms(self.config.timeout_ms());

        let response = self.send(request).await?;
        serde_json::from_str(&response.body).map_err(|e| {
            HolidaysError::parse(format!("holidays api returned invalid JSON from {url}: {e}"))
        })
    }

    /// Current request credentials and whether they came from the token cache.
    async fn credentials(&self) -> Result<(HttpAuth, bool), HolidaysError> {
        match self.config.auth() {
            AuthScheme::Basic => Ok((
                HttpAuth::Basic {
                    username: self.config.username().to_owned(),
                    password: self.config.password().to_owned(),
                },
                false,
            )),
            AuthScheme::Token => match self.session.current() {
                Some(token) => Ok((HttpAuth::BearerToken(token), true)),
                None => Ok((HttpAuth::BearerToken(self.login().await?), false)),
            },
        }
    }

    async fn login(&self) -> Result<String, HolidaysError> {
        let url = self.config.endpoint(&self.config.wire().auth_path)?;
        let payload = serde_json::json!({
            "email": self.config.username(),
            "password": self.config.password(),
        });

        let request = HttpRequest::post(url.as_str())
            .with_json_body(payload.to_string())
            .with_header("accept", "application/json")
            .with_timeout_ms(self.config.timeout_ms());

        let response = self.send(request).await.map_err(|error| {
            tracing::warn!(user = self.config.username(), "holidays api authentication failed");
            error
        })?;

        let token = serde_json::from_str::<Value>(&response.body)
            .ok()
            .and_then(|body| body.get("token").and_then(Value::as_str).map(str::to_owned))
            .filter(|token| !token.is_empty())
            .ok_or_else(|| HolidaysError::parse("holidays api auth response has no token"))?;

        self.session.store(token.clone());
        tracing::debug!("authenticated against holidays api");
        Ok(token)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HolidaysError> {
        let method = request.method.as_str();
        let url = request.url.clone();
        let started = Instant::now();
        tracing::debug!(method, url = %url, "holidays api request");

        let response = self.http_client.execute(request).await.map_err(|error| {
            tracing::warn!(method, url = %url, error = %error, "holidays api transport error");
            HolidaysError::from(error)
        })?;

        tracing::info!(
            method,
            url = %url,
            status = response.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "holidays api response"
        );

        check_status(method, &url, response)
    }
}

fn check_status(method: &str, url: &str, response: HttpResponse) -> Result<HttpResponse, HolidaysError> {
    if response.is_success() {
        return Ok(response);
    }

    let excerpt = response
        .body
        .chars()
        .take(BODY_EXCERPT_CHARS)
        .collect::<String>();

    match response.status {
        401 | 403 => Err(HolidaysError::authentication(
            response.status,
            format!("holidays api rejected credentials for {method} {url}"),
        )),
        status => Err(HolidaysError::service(
            status,
            format!("holidays api {method} {url} failed: {excerpt}"),
        )),
    }
}

/// Accept a bare array or an object carrying the array under a known key.
fn extract_records(body: Value) -> Result<Vec<HolidayRecord>, HolidaysError> {
    let list = match body {
        list @ Value::Array(_) => list,
        Value::Object(mut object) => RECORD_KEYS
            .iter()
            .find_map(|key| object.remove(*key).filter(Value::is_array))
            .ok_or_else(|| {
                HolidaysError::parse(format!(
                    "holidays api response object has none of the keys {RECORD_KEYS:?}"
                ))
            })?,
        other => {
            return Err(HolidaysError::parse(format!(
                "holidays api response must be a list of holidays, got {other}"
            )))
        }
    };

    serde_json::from_value(list)
        .map_err(|e| HolidaysError::parse(format!("unexpected holiday record shape: {e}")))
}

fn flatten(records: &[HolidayRecord]) -> Result<Vec<Holiday>, HolidaysError> {
    let mut holidays = Vec::with_capacity(records.len());
    for record in records {
        let flattened = record.flatten().map_err(|e| {
            HolidaysError::parse(format!(
                "holiday record for '{}' has an invalid date: {e}",
                record.country_code
            ))
        })?;
        holidays.extend(flattened);
    }
    Ok(holidays)
}
