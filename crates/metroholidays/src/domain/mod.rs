//! # Domain Models
//!
//! Calendar types produced by the holidays client.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`CountryCode`] | Validated ISO-3166 alpha-2 code |
//! | [`HolidayRecord`] | Holiday entry as returned by the service |
//! | [`Holiday`] | Holiday entry flattened to one date |
//! | [`CalendarQuery`] | Validated date range and country filter |
//! | [`CalendarRow`] | Flags for one date and one country |
//! | [`CalendarTable`] | Ordered rows for a whole query |
//! | [`DayType`] | Weekday / long-holiday category of a row |
//!
//! Construction validates invariants up front, so a [`CalendarQuery`] that
//! exists always has `date_from <= date_to` and at least one country.

mod calendar;
mod country;
pub mod date;
mod day_type;
mod holiday;

pub use calendar::{CalendarQuery, CalendarRow, CalendarTable};
pub(crate) use calendar::validate_range;
pub use country::{CountryCode, DEFAULT_COUNTRIES};
pub use day_type::{classify, DayType, DEFAULT_LONG_HOLIDAYS};
pub use holiday::{Holiday, HolidayRecord};
