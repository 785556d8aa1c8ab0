//! # Metroholidays
//!
//! Client for the Holidays API: public holidays and weekends per country,
//! shaped into a day-by-day calendar table.
//!
//! ## Overview
//!
//! - **Authenticated access** with HTTP Basic credentials or a login token
//! - **Calendar tables** with one row per date and country, holiday and
//!   weekend flags, and a long-holiday day category
//! - **Raw records** for callers that need the service payload as-is
//! - **Structured errors** separating credential, transport, service,
//!   schema and input failures
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`blocking`] | Synchronous client wrapper |
//! | [`client`] | Async Holidays API client |
//! | [`config`] | Connection settings, auth scheme and wire format |
//! | [`domain`] | Country codes, holiday records and calendar tables |
//! | [`error`] | Validation and client error types |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`session`] | Cached login token |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use metroholidays::HolidaysClient;
//! use time::macros::date;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HolidaysClient::new("https://holidays.example.com/", "user", "pwd")?;
//!
//!     let table = client
//!         .load_calendar(date!(2020 - 01 - 01), date!(2020 - 01 - 03), ["jp"], true)
//!         .await?;
//!
//!     for row in &table {
//!         println!("{} {} holiday={}", row.date, row.country_code, row.is_holiday);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use metroholidays::{HolidaysError, HolidaysErrorKind};
//!
//! fn handle_error(error: HolidaysError) {
//!     match error.kind() {
//!         HolidaysErrorKind::Authentication => {
//!             // Check credentials
//!         }
//!         HolidaysErrorKind::Network | HolidaysErrorKind::Service => {
//!             // Retry later
//!         }
//!         HolidaysErrorKind::InvalidRange => {
//!             // Fix the request
//!         }
//!         _ => {}
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! - Passwords and tokens never appear in `Debug` output or logs
//! - All HTTP requests use TLS via rustls

pub mod blocking;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod session;

pub use blocking::BlockingHolidaysClient;
pub use client::HolidaysClient;
pub use config::{AuthScheme, ClientConfig, WireFormat};

pub use domain::{
    CalendarQuery, CalendarRow, CalendarTable, CountryCode, DayType, Holiday, HolidayRecord,
    DEFAULT_COUNTRIES, DEFAULT_LONG_HOLIDAYS,
};

pub use error::{HolidaysError, HolidaysErrorKind, ValidationError};

pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpErrorKind, HttpMethod, HttpRequest, HttpResponse,
    ReqwestHttpClient,
};

pub use session::TokenSession;
