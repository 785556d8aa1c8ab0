//! Synchronous wrapper around [`HolidaysClient`] for callers without a runtime.
//!
//! Do not call these methods from inside an async context: blocking on the
//! private runtime from a tokio worker panics.

use serde_json::Value;
use time::Date;
use tokio::runtime::{Builder, Runtime};

use crate::client::HolidaysClient;
use crate::config::ClientConfig;
use crate::domain::{CalendarQuery, CalendarTable, Holiday, HolidayRecord};
use crate::HolidaysError;

/// Blocking Holidays API client driving a private current-thread runtime.
#[derive(Debug)]
pub struct BlockingHolidaysClient {
    inner: HolidaysClient,
    runtime: Runtime,
}

impl BlockingHolidaysClient {
    pub fn new(
        url: &str,
        user: impl Into<String>,
        pwd: impl Into<String>,
    ) -> Result<Self, HolidaysError> {
        Self::with_client(HolidaysClient::new(url, user, pwd)?)
    }

    pub fn from_env() -> Result<Self, HolidaysError> {
        Self::with_client(HolidaysClient::from_env()?)
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, HolidaysError> {
        Self::with_client(HolidaysClient::with_config(config))
    }

    pub fn with_client(inner: HolidaysClient) -> Result<Self, HolidaysError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| HolidaysError::runtime(format!("failed to start tokio runtime: {e}")))?;
        Ok(Self { inner, runtime })
    }

    pub fn client(&self) -> &HolidaysClient {
        &self.inner
    }

    pub fn load_calendar<I, S>(
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
        self.runtime
            .block_on(self.inner.load_calendar(date_from, date_to, country_codes, weekends))
    }

    pub fn load_calendar_with(&self, query: &CalendarQuery) -> Result<CalendarTable, HolidaysError> {
        self.runtime.block_on(self.inner.load_calendar_with(query))
    }

    pub fn load_holidays_raw(
        &self,
        date_from: Date,
        date_to: Date,
    ) -> Result<Vec<HolidayRecord>, HolidaysError> {
        self.runtime
            .block_on(self.inner.load_holidays_raw(date_from, date_to))
    }

    pub fn load_holidays(&self, date_from: Date, date_to: Date) -> Result<Vec<Holiday>, HolidaysError> {
        self.runtime.block_on(self.inner.load_holidays(date_from, date_to))
    }

    pub fn exec_json(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, HolidaysError> {
        self.runtime.block_on(self.inner.exec_json(path, params))
    }

    pub fn authenticate(&self, force: bool) -> Result<(), HolidaysError> {
        self.runtime.block_on(self.inner.authenticate(force))
    }
}
