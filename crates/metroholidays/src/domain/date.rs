use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, Weekday};

use crate::ValidationError;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parse a `YYYY-MM-DD` date. Longer timestamps (`2020-01-01T00:00:00`) are
/// accepted and truncated to their date part.
pub fn parse_date(input: &str) -> Result<Date, ValidationError> {
    let trimmed = input.trim();
    let head = trimmed.get(..10).unwrap_or(trimmed);
    Date::parse(head, ISO_DATE).map_err(|_| ValidationError::InvalidDate {
        value: input.to_owned(),
    })
}

pub fn format_date(date: Date) -> String {
    date.format(ISO_DATE)
        .unwrap_or_else(|_| String::from("<unformattable>"))
}

pub fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}

/// Inclusive day range `[from, to]`; empty when `from > to`.
pub fn days_between(from: Date, to: Date) -> impl Iterator<Item = Date> {
    let mut next = (from <= to).then_some(from);
    std::iter::from_fn(move || {
        let current = next?;
        next = if current < to {
            current.checked_add(Duration::days(1))
        } else {
            None
        };
        Some(current)
    })
}

/// Serde adapter for `YYYY-MM-DD` dates.
pub mod iso_date {
    use serde::de::Error as DeError;
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        super::parse_date(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn parses_plain_and_timestamped_dates() {
        assert_eq!(parse_date("2020-01-01").expect("must parse"), date!(2020 - 01 - 01));
        assert_eq!(
            parse_date("2020-05-04T00:00:00.000Z").expect("must parse"),
            date!(2020 - 05 - 04)
        );
    }

    #[test]
    fn rejects_malformed_dates() {
        let err = parse_date("01/02/2020").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidDate { .. }));
    }

    #[test]
    fn day_range_is_inclusive_and_crosses_years() {
        let days = days_between(date!(2019 - 12 - 30), date!(2020 - 01 - 02)).collect::<Vec<_>>();

        assert_eq!(days.len(), 4);
        assert_eq!(days.first(), Some(&date!(2019 - 12 - 30)));
        assert_eq!(days.last(), Some(&date!(2020 - 01 - 02)));
    }

    #[test]
    fn inverted_range_is_empty() {
        assert_eq!(days_between(date!(2020 - 01 - 02), date!(2020 - 01 - 01)).count(), 0);
    }

    #[test]
    fn saturday_and_sunday_are_weekend() {
        assert!(!is_weekend(date!(2020 - 01 - 03)));
        assert!(is_weekend(date!(2020 - 01 - 04)));
        assert!(is_weekend(date!(2020 - 01 - 05)));
    }
}
