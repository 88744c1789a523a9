use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A calendar month, stored as the first day of that month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthYear(NaiveDate);

impl MonthYear {
    /// January of year 1, used as the "unset" value.
    pub fn zero() -> MonthYear {
        Self(NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN))
    }

    /// Parses a date in `MM-YYYY` format.
    pub fn parse(value: &str) -> Result<MonthYear, String> {
        let invalid = || format!("{} is not a valid MM-YYYY date", value);

        let (month, year) = value.split_once('-').ok_or_else(invalid)?;
        let is_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());

        if month.len() != 2 || year.len() != 4 || !is_digits(month) || !is_digits(year) {
            return Err(invalid());
        }

        let month: u32 = month.parse().map_err(|_| invalid())?;
        let year: i32 = year.parse().map_err(|_| invalid())?;

        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(invalid)
    }

    pub fn from_date(date: NaiveDate) -> MonthYear {
        // Day 1 always exists for a month that already exists.
        Self(date.with_day(1).unwrap_or(date))
    }

    pub fn as_date(&self) -> NaiveDate {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

impl Default for MonthYear {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for MonthYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}-{:04}", self.0.month(), self.0.year())
    }
}

impl Serialize for MonthYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthYear {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;

        MonthYear::parse(&value).map_err(serde::de::Error::custom)
    }
}
