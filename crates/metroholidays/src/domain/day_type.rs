use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::{Date, Weekday};

use super::date::is_weekend;

/// Minimum run of consecutive days off treated as a long holiday.
pub const DEFAULT_LONG_HOLIDAYS: usize = 3;

/// Category of a calendar day for one country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayType {
    Friday,
    Saturday,
    Sunday,
    /// Working day right before a long holiday.
    #[serde(rename = "first_day")]
    FirstDay,
    #[serde(rename = "middle_days")]
    MiddleDays,
    /// Closing day of a long holiday that is followed by a working day.
    #[serde(rename = "last_day")]
    LastDay,
    #[serde(rename = "others")]
    Others,
}

impl DayType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
            Self::FirstDay => "first_day",
            Self::MiddleDays => "middle_days",
            Self::LastDay => "last_day",
            Self::Others => "others",
        }
    }

    fn from_weekday(date: Date) -> Self {
        match date.weekday() {
            Weekday::Friday => Self::Friday,
            Weekday::Saturday => Self::Saturday,
            Weekday::Sunday => Self::Sunday,
            _ => Self::Others,
        }
    }
}

impl Display for DayType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a contiguous, ascending run of days.
///
/// `days` pairs each date with its holiday flag. Saturdays and Sundays always
/// count as days off here. `long_holidays == 0` disables long-holiday
/// detection and leaves only the weekday labels.
///
/// Runs are judged only by what lies inside `days`. At the edges:
/// - a run starting on the first day is all `MiddleDays` and has no
///   `FirstDay`, since the working day before it is outside the slice;
/// - a run ending on the last day keeps `MiddleDays` on its final day and has
///   no `LastDay`, since it is not known to be followed by a working day;
/// - a run cut by either edge is still measured by its visible length only.
pub fn classify(days: &[(Date, bool)], long_holidays: usize) -> Vec<DayType> {
    let mut types = days
        .iter()
        .map(|(date, _)| DayType::from_weekday(*date))
        .collect::<Vec<_>>();

    if long_holidays == 0 {
        return types;
    }

    let off = days
        .iter()
        .map(|(date, holiday)| *holiday || is_weekend(*date))
        .collect::<Vec<_>>();

    let mut start = 0;
    while start < off.len() {
        if !off[start] {
            start += 1;
            continue;
        }

        let mut end = start;
        while end + 1 < off.len() && off[end + 1] {
            end += 1;
        }

        if end - start + 1 >= long_holidays {
            for day in &mut types[start..=end] {
                *day = DayType::MiddleDays;
            }
            if start > 0 {
                types[start - 1] = DayType::FirstDay;
            }
            if end + 1 < off.len() {
                types[end] = DayType::LastDay;
            }
        }

        start = end + 1;
    }

    types
}

#[cfg(test)]
mod tests {
    use time::macros::date;
    use time::Duration;

    use super::*;

    fn span(from: Date, len: i64, holidays: &[Date]) -> Vec<(Date, bool)> {
        (0..len)
            .map(|offset| {
                let day = from + Duration::days(offset);
                (day, holidays.contains(&day))
            })
            .collect()
    }

    #[test]
    fn plain_week_gets_weekday_labels() {
        // Monday 2020-01-06 .. Sunday 2020-01-12, no holidays, long weekend disabled
        let days = span(date!(2020 - 01 - 06), 7, &[]);

        let types = classify(&days, 0);

        assert_eq!(
            types,
            vec![
                DayType::Others,
                DayType::Others,
                DayType::Others,
                DayType::Others,
                DayType::Friday,
                DayType::Saturday,
                DayType::Sunday,
            ]
        );
    }

    #[test]
    fn two_day_weekend_is_not_long() {
        let days = span(date!(2020 - 01 - 06), 8, &[]);

        let types = classify(&days, DEFAULT_LONG_HOLIDAYS);

        assert_eq!(types[4], DayType::Friday);
        assert_eq!(types[5], DayType::Saturday);
        assert_eq!(types[6], DayType::Sunday);
        assert_eq!(types[7], DayType::Others);
    }

    #[test]
    fn weekend_plus_monday_holiday_is_long() {
        // Thu 2020-01-09 .. Tue 2020-01-14; Monday 2020-01-13 is Coming of Age Day
        let days = span(date!(2020 - 01 - 09), 6, &[date!(2020 - 01 - 13)]);

        let types = classify(&days, DEFAULT_LONG_HOLIDAYS);

        assert_eq!(
            types,
            vec![
                DayType::Others,
                DayType::FirstDay,
                DayType::MiddleDays,
                DayType::MiddleDays,
                DayType::LastDay,
                DayType::Others,
            ]
        );
    }

    #[test]
    fn run_touching_range_edges_has_no_boundary_markers() {
        // Sat 2020-05-02 .. Wed 2020-05-06 is entirely off in Japan
        let holidays = [
            date!(2020 - 05 - 04),
            date!(2020 - 05 - 05),
            date!(2020 - 05 - 06),
        ];
        let days = span(date!(2020 - 05 - 02), 5, &holidays);

        let types = classify(&days, DEFAULT_LONG_HOLIDAYS);

        assert!(types.iter().all(|day| *day == DayType::MiddleDays));
    }

    #[test]
    fn empty_input_yields_no_types() {
        assert!(classify(&[], DEFAULT_LONG_HOLIDAYS).is_empty());
    }

    #[test]
    fn labels_match_service_vocabulary() {
        assert_eq!(
            serde_json::to_string(&DayType::MiddleDays).expect("serializes"),
            "\"middle_days\""
        );
        assert_eq!(DayType::Friday.to_string(), "Friday");
    }
}
