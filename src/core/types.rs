use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::ChartResult;

/// Output document size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// A data-space quantity, as opposed to a pixel coordinate.
///
/// JSON numbers become `Number`, RFC 3339 strings become `Date` and every
/// other string is a `Category`. A category whose text would read back as a
/// date is written as `{"category": "..."}` so serialization round-trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DomainValueRepr", into = "DomainValueRepr")]
pub enum DomainValue {
    Number(f64),
    Date(DateTime<Utc>),
    Category(String),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DomainValueRepr {
    Number(f64),
    Date(DateTime<Utc>),
    TaggedCategory { category: String },
    Category(String),
}

impl From<DomainValueRepr> for DomainValue {
    fn from(repr: DomainValueRepr) -> Self {
        match repr {
            DomainValueRepr::Number(value) => Self::Number(value),
            DomainValueRepr::Date(time) => Self::Date(time),
            DomainValueRepr::TaggedCategory { category } | DomainValueRepr::Category(category) => {
                Self::Category(category)
            }
        }
    }
}

impl From<DomainValue> for DomainValueRepr {
    fn from(value: DomainValue) -> Self {
        match value {
            DomainValue::Number(value) => Self::Number(value),
            DomainValue::Date(time) => Self::Date(time),
            DomainValue::Category(category) if category.parse::<DateTime<Utc>>().is_ok() => {
                Self::TaggedCategory { category }
            }
            DomainValue::Category(category) => Self::Category(category),
        }
    }
}

impl DomainValue {
    pub fn from_decimal(value: Decimal) -> ChartResult<Self> {
        Ok(Self::Number(decimal_to_f64(value, "domain value")?))
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Continuous position of the value: numbers as-is, dates as unix seconds.
    #[must_use]
    pub fn as_continuous(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Date(time) => Some(datetime_to_unix_seconds(*time)),
            Self::Category(_) => None,
        }
    }

    #[must_use]
    pub fn as_category(&self) -> Option<&str> {
        match self {
            Self::Category(name) => Some(name),
            _ => None,
        }
    }

    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Date(_) => "date",
            Self::Category(_) => "category",
        }
    }
}

impl Default for DomainValue {
    fn default() -> Self {
        Self::Number(0.0)
    }
}

impl fmt::Display for DomainValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Date(time) => f.write_str(&time.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Category(name) => f.write_str(name),
        }
    }
}

impl From<f64> for DomainValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for DomainValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<DateTime<Utc>> for DomainValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl From<&str> for DomainValue {
    fn from(value: &str) -> Self {
        Self::Category(value.to_owned())
    }
}

impl From<String> for DomainValue {
    fn from(value: String) -> Self {
        Self::Category(value)
    }
}
