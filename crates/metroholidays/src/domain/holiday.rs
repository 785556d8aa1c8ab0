use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use time::Date;

use super::date::{iso_date, parse_date};
use crate::ValidationError;

/// Holiday entry exactly as the service returns it: one name, many dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    pub country_code: String,
    #[serde(default)]
    pub en_name: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub day_off: bool,
    #[serde(default, deserialize_with = "flag")]
    pub observed: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    pub dates: Vec<String>,
}

impl HolidayRecord {
    /// One [`Holiday`] per listed date, in listing order.
    pub fn flatten(&self) -> Result<Vec<Holiday>, ValidationError> {
        self.dates
            .iter()
            .map(|raw| {
                Ok(Holiday {
                    country_code: self.country_code.trim().to_ascii_lowercase(),
                    en_name: self.en_name.clone(),
                    day_off: self.day_off,
                    observed: self.observed,
                    created_at: self.created_at.clone(),
                    updated_at: self.updated_at.clone(),
                    date: parse_date(raw)?,
                })
            })
            .collect()
    }
}

/// A holiday record flattened to a single date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Holiday {
    pub country_code: String,
    pub en_name: Option<String>,
    pub day_off: bool,
    pub observed: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(with = "iso_date")]
    pub date: Date,
}

/// The service has used both JSON booleans and 0/1 integers for flags.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Null(()),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Int(0) | Flag::Null(()) => Ok(false),
        Flag::Int(1) => Ok(true),
        Flag::Int(other) => Err(D::Error::custom(format!(
            "flag must be a boolean or 0/1, got {other}"
        ))),
    }
}
