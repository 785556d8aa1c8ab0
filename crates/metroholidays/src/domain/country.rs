use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Countries loaded when a caller asks for the default calendar set.
pub const DEFAULT_COUNTRIES: [&str; 6] = ["jp", "cn", "kr", "tw", "us", "th"];

/// ISO-3166 alpha-2 country code, normalized to lowercase.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCountryCode);
        }

        let valid = trimmed.len() == 2 && trimmed.chars().all(|ch| ch.is_ascii_alphabetic());
        if !valid {
            return Err(ValidationError::InvalidCountryCode {
                value: trimmed.to_owned(),
            });
        }

        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn defaults() -> Vec<Self> {
        DEFAULT_COUNTRIES
            .iter()
            .map(|code| Self(String::from(*code)))
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CountryCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for CountryCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for CountryCode {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<CountryCode> for String {
    fn from(value: CountryCode) -> Self {
        value.0
    }
}
