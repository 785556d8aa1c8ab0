use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use time::Date;

use super::date::{days_between, format_date, is_weekend, iso_date};
use super::day_type::{classify, DayType, DEFAULT_LONG_HOLIDAYS};
use super::{CountryCode, Holiday};
use crate::ValidationError;

/// Validated calendar request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarQuery {
    date_from: Date,
    date_to: Date,
    country_codes: Vec<CountryCode>,
    include_weekends: bool,
    long_holidays: usize,
}

impl CalendarQuery {
    /// Duplicate country codes are collapsed, keeping the first occurrence.
    pub fn new(
        date_from: Date,
        date_to: Date,
        country_codes: impl IntoIterator<Item = CountryCode>,
        include_weekends: bool,
    ) -> Result<Self, ValidationError> {
        validate_range(date_from, date_to)?;

        let mut seen = HashSet::new();
        let country_codes = country_codes
            .into_iter()
            .filter(|code| seen.insert(code.clone()))
            .collect::<Vec<_>>();

        if country_codes.is_empty() {
            return Err(ValidationError::EmptyCountryCodes);
        }

        Ok(Self {
            date_from,
            date_to,
            country_codes,
            include_weekends,
            long_holidays: DEFAULT_LONG_HOLIDAYS,
        })
    }

    /// Parse raw country codes and build the query.
    pub fn parse<I, S>(
        date_from: Date,
        date_to: Date,
        country_codes: I,
        include_weekends: bool,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        validate_range(date_from, date_to)?;
        let codes = country_codes
            .into_iter()
            .map(|code| CountryCode::parse(code.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(date_from, date_to, codes, include_weekends)
    }

    /// Minimum run of days off counted as a long holiday; `0` disables it.
    pub fn with_long_holidays(mut self, long_holidays: usize) -> Self {
        self.long_holidays = long_holidays;
        self
    }

    pub const fn date_from(&self) -> Date {
        self.date_from
    }

    pub const fn date_to(&self) -> Date {
        self.date_to
    }

    pub fn country_codes(&self) -> &[CountryCode] {
        &self.country_codes
    }

    pub const fn include_weekends(&self) -> bool {
        self.include_weekends
    }

    pub const fn long_holidays(&self) -> usize {
        self.long_holidays
    }
}

pub(crate) fn validate_range(date_from: Date, date_to: Date) -> Result<(), ValidationError> {
    if date_from > date_to {
        return Err(ValidationError::InvalidDateRange {
            date_from: format_date(date_from),
            date_to: format_date(date_to),
        });
    }
    Ok(())
}

/// One date for one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarRow {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub country_code: CountryCode,
    pub is_holiday: bool,
    /// Only set when the query asked for weekends; otherwise weekend dates
    /// have no row at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_weekend: Option<bool>,
    pub day_type: DayType,
}

/// Calendar rows ordered by date, then by the query's country order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarTable {
    #[serde(with = "iso_date")]
    date_from: Date,
    #[serde(with = "iso_date")]
    date_to: Date,
    countries: Vec<CountryCode>,
    rows: Vec<CalendarRow>,
}

impl CalendarTable {
    /// Map flattened holidays onto the query's date grid.
    ///
    /// Only requested countries that appear in `holidays` produce rows; each
    /// of them gets one row per date of the range, with Saturdays and Sundays
    /// left out unless the query includes weekends. Day types are always
    /// classified over the whole range. Holidays dated outside the range are
    /// ignored.
    pub fn build(query: &CalendarQuery, holidays: &[Holiday]) -> Self {
        let reported = holidays
            .iter()
            .map(|holiday| holiday.country_code.as_str())
            .collect::<HashSet<_>>();

        let countries = query
            .country_codes()
            .iter()
            .filter(|code| reported.contains(code.as_str()))
            .cloned()
            .collect::<Vec<_>>();

        let days_off = holidays
            .iter()
            .filter(|holiday| holiday.day_off)
            .filter(|holiday| holiday.date >= query.date_from() && holiday.date <= query.date_to())
            .map(|holiday| (holiday.country_code.as_str(), holiday.date))
            .collect::<HashSet<_>>();

        let dates = days_between(query.date_from(), query.date_to()).collect::<Vec<_>>();

        let columns = countries
            .iter()
            .map(|code| {
                let flags = dates
                    .iter()
                    .map(|date| (*date, days_off.contains(&(code.as_str(), *date))))
                    .collect::<Vec<_>>();
                let types = classify(&flags, query.long_holidays());
                (flags, types)
            })
            .collect::<Vec<_>>();

        let mut rows = Vec::with_capacity(dates.len() * countries.len());
        for (index, date) in dates.iter().enumerate() {
            if !query.include_weekends() && is_weekend(*date) {
                continue;
            }
            for (code, (flags, types)) in countries.iter().zip(&columns) {
                rows.push(CalendarRow {
                    date: *date,
                    country_code: code.clone(),
                    is_holiday: flags[index].1,
                    is_weekend: query.include_weekends().then(|| is_weekend(*date)),
                    day_type: types[index],
                });
            }
        }

        Self {
            date_from: query.date_from(),
            date_to: query.date_to(),
            countries,
            rows,
        }
    }

    pub const fn date_from(&self) -> Date {
        self.date_from
    }

    pub const fn date_to(&self) -> Date {
        self.date_to
    }

    /// Countries that have rows, in query order.
    pub fn countries(&self) -> &[CountryCode] {
        &self.countries
    }

    pub fn rows(&self) -> &[CalendarRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CalendarRow> {
        self.rows.iter()
    }

    pub fn get(&self, date: Date, country: &CountryCode) -> Option<&CalendarRow> {
        self.rows
            .iter()
            .find(|row| row.date == date && &row.country_code == country)
    }

    pub fn for_country<'a>(
        &'a self,
        country: &'a CountryCode,
    ) -> impl Iterator<Item = &'a CalendarRow> + 'a {
        self.rows
            .iter()
            .filter(move |row| &row.country_code == country)
    }

    pub fn holidays(&self) -> impl Iterator<Item = &CalendarRow> {
        self.rows.iter().filter(|row| row.is_holiday)
    }

    /// Wide view: every date with its per-country rows.
    pub fn by_date(&self) -> BTreeMap<Date, Vec<&CalendarRow>> {
        let mut grouped = BTreeMap::<Date, Vec<&CalendarRow>>::new();
        for row in &self.rows {
            grouped.entry(row.date).or_default().push(row);
        }
        grouped
    }

    pub fn into_rows(self) -> Vec<CalendarRow> {
        self.rows
    }
}

impl<'a> IntoIterator for &'a CalendarTable {
    type Item = &'a CalendarRow;
    type IntoIter = std::slice::Iter<'a, CalendarRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    fn holiday(country: &str, date: Date, day_off: bool) -> Holiday {
        Holiday {
            country_code: String::from(country),
            en_name: None,
            day_off,
            observed: false,
            created_at: None,
            updated_at: None,
            date,
        }
    }

    fn codes(values: &[&str]) -> Vec<CountryCode> {
        values
            .iter()
            .map(|value| CountryCode::parse(value).expect("valid code"))
            .collect()
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = CalendarQuery::new(date!(2020 - 01 - 03), date!(2020 - 01 - 01), codes(&["jp"]), false)
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidDateRange { .. }));
    }

    #[test]
    fn empty_country_list_is_rejected() {
        let err = CalendarQuery::new(date!(2020 - 01 - 01), date!(2020 - 01 - 03), Vec::new(), false)
            .expect_err("must fail");
        assert_eq!(err, ValidationError::EmptyCountryCodes);
    }

    #[test]
    fn duplicate_codes_collapse_in_order() {
        let query = CalendarQuery::parse(
            date!(2020 - 01 - 01),
            date!(2020 - 01 - 01),
            ["us", "JP", "us"],
            false,
        )
        .expect("valid query");

        assert_eq!(query.country_codes(), codes(&["us", "jp"]).as_slice());
    }

    #[test]
    fn new_year_example_yields_one_row_per_date() {
        let query = CalendarQuery::parse(date!(2020 - 01 - 01), date!(2020 - 01 - 03), ["jp"], true)
            .expect("valid query");
        let holidays = vec![
            holiday("jp", date!(2020 - 01 - 01), true),
            holiday("jp", date!(2020 - 01 - 04), true),
        ];

        let table = CalendarTable::build(&query, &holidays);

        assert_eq!(table.len(), 3);
        let flags = table
            .iter()
            .map(|row| (row.date, row.is_holiday, row.is_weekend))
            .collect::<Vec<_>>();
        assert_eq!(
            flags,
            vec![
                (date!(2020 - 01 - 01), true, Some(false)),
                (date!(2020 - 01 - 02), false, Some(false)),
                (date!(2020 - 01 - 03), false, Some(false)),
            ]
        );
    }

    #[test]
    fn unreported_countries_produce_no_rows() {
        let query = CalendarQuery::parse(date!(2020 - 01 - 01), date!(2020 - 01 - 02), ["jp", "us"], false)
            .expect("valid query");
        let holidays = vec![holiday("us", date!(2020 - 01 - 01), true)];

        let table = CalendarTable::build(&query, &holidays);

        assert_eq!(table.countries(), codes(&["us"]).as_slice());
        assert!(table.iter().all(|row| row.country_code.as_str() == "us"));
        assert!(table.iter().all(|row| row.is_weekend.is_none()));
    }

    #[test]
    fn no_holidays_yields_empty_table() {
        let query = CalendarQuery::parse(date!(2020 - 02 - 01), date!(2020 - 02 - 29), ["jp"], true)
            .expect("valid query");

        let table = CalendarTable::build(&query, &[]);

        assert!(table.is_empty());
        assert!(table.by_date().is_empty());
    }

    #[test]
    fn weekend_rows_are_dropped_unless_requested() {
        // Thu 2020-01-09 .. Tue 2020-01-14; Monday 2020-01-13 is Coming of Age Day
        let holidays = vec![holiday("jp", date!(2020 - 01 - 13), true)];
        let without = CalendarQuery::parse(date!(2020 - 01 - 09), date!(2020 - 01 - 14), ["jp"], false)
            .expect("valid query");
        let with = CalendarQuery::parse(date!(2020 - 01 - 09), date!(2020 - 01 - 14), ["jp"], true)
            .expect("valid query");

        let weekdays = CalendarTable::build(&without, &holidays);
        let all_days = CalendarTable::build(&with, &holidays);

        let rows = weekdays
            .iter()
            .map(|row| (row.date, row.day_type))
            .collect::<Vec<_>>();
        assert_eq!(
            rows,
            vec![
                (date!(2020 - 01 - 09), DayType::Others),
                (date!(2020 - 01 - 10), DayType::FirstDay),
                (date!(2020 - 01 - 13), DayType::LastDay),
                (date!(2020 - 01 - 14), DayType::Others),
            ]
        );
        assert_eq!(all_days.len(), 6);
        let saturday = all_days
            .get(date!(2020 - 01 - 11), &codes(&["jp"])[0])
            .expect("weekend row present when requested");
        assert_eq!(saturday.is_weekend, Some(true));
    }

    #[test]
    fn working_day_flag_is_not_a_holiday() {
        let query = CalendarQuery::parse(date!(2020 - 01 - 01), date!(2020 - 01 - 01), ["jp"], false)
            .expect("valid query");
        let holidays = vec![holiday("jp", date!(2020 - 01 - 01), false)];

        let table = CalendarTable::build(&query, &holidays);

        let row = table
            .get(date!(2020 - 01 - 01), &codes(&["jp"])[0])
            .expect("row should exist");
        assert!(!row.is_holiday);
    }

    #[test]
    fn rows_are_grouped_by_date_in_query_order() {
        let query = CalendarQuery::parse(date!(2020 - 07 - 03), date!(2020 - 07 - 04), ["us", "jp"], false)
            .expect("valid query");
        let holidays = vec![
            holiday("jp", date!(2020 - 07 - 23), true),
            holiday("us", date!(2020 - 07 - 03), true),
        ];

        let table = CalendarTable::build(&query, &holidays);
        let grouped = table.by_date();

        let first_day = grouped.get(&date!(2020 - 07 - 03)).expect("date present");
        let order = first_day
            .iter()
            .map(|row| row.country_code.as_str())
            .collect::<Vec<_>>();
        assert_eq!(order, vec!["us", "jp"]);
        assert_eq!(table.holidays().count(), 1);
    }

    #[test]
    fn row_serializes_without_weekend_column_when_not_requested() {
        let row = CalendarRow {
            date: date!(2020 - 01 - 01),
            country_code: CountryCode::parse("jp").expect("valid code"),
            is_holiday: true,
            is_weekend: None,
            day_type: DayType::Others,
        };

        let json = serde_json::to_value(&row).expect("serializes");
        assert_eq!(
            json,
            serde_json::json!({
                "date": "2020-01-01",
                "country_code": "jp",
                "is_holiday": true,
                "day_type": "others"
            })
        );
    }
}
