// Tool argument parsing and validation
//
// Every tool receives a JSON object. Parsing happens here, before any
// upstream request is built, so a bad argument never costs an FMP call.

use crate::types::{IndicatorKind, Symbol};
use chrono::NaiveDate;
use serde_json::{Map, Value};

pub const MAX_SYMBOL_LEN: usize = 20;
pub const MAX_TIME_PERIOD: u64 = 1000;
pub const MAX_LIMIT: u64 = 1000;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Invalid tool arguments
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Arguments must be a JSON object")]
    NotAnObject,

    #[error("Missing required parameter: {0}")]
    Missing(&'static str),

    #[error("Parameter '{name}' must be {expected}")]
    WrongType {
        name: &'static str,
        expected: &'static str,
    },

    #[error("Invalid symbol '{0}': expected 1-20 characters of A-Z, a-z, 0-9, '.', '-', '^' or '=', including a letter or digit")]
    InvalidSymbol(String),

    #[error("Parameter '{name}' must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        min: u64,
        max: u64,
        value: i128,
    },

    #[error("Parameter '{name}' must be a date in YYYY-MM-DD format, got '{value}'")]
    InvalidDate { name: &'static str, value: String },

    #[error("from_date ({from}) must not be after to_date ({to})")]
    InvertedRange { from: NaiveDate, to: NaiveDate },
}

/// Borrowed view over a tool's argument object
pub struct Arguments<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> Arguments<'a> {
    /// `null` is treated as an empty object so argument-less calls work
    pub fn new(value: &'a Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) => Ok(Self { fields: Some(map) }),
            Value::Null => Ok(Self { fields: None }),
            _ => Err(ValidationError::NotAnObject),
        }
    }

    fn get(&self, name: &str) -> Option<&'a Value> {
        self.fields
            .and_then(|map| map.get(name))
            .filter(|v| !v.is_null())
    }

    pub fn optional_str(&self, name: &'static str) -> Result<Option<&'a str>, ValidationError> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(ValidationError::WrongType {
                name,
                expected: "a string",
            }),
        }
    }

    pub fn required_str(&self, name: &'static str) -> Result<&'a str, ValidationError> {
        self.optional_str(name)?.ok_or(ValidationError::Missing(name))
    }

    /// Integer in `min..=max`; floats and numeric strings are rejected
    pub fn optional_int(
        &self,
        name: &'static str,
        min: u64,
        max: u64,
    ) -> Result<Option<u32>, ValidationError> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };

        let wrong_type = ValidationError::WrongType {
            name,
            expected: "an integer",
        };

        let n = match (value.as_i64(), value.as_u64()) {
            (Some(n), _) => i128::from(n),
            (None, Some(n)) => i128::from(n),
            _ => return Err(wrong_type),
        };

        let out_of_range = ValidationError::OutOfRange {
            name,
            min,
            max,
            value: n,
        };
        if n < i128::from(min) || n > i128::from(max) {
            return Err(out_of_range);
        }

        u32::try_from(n).map(Some).map_err(|_| out_of_range)
    }

    pub fn optional_date(&self, name: &'static str) -> Result<Option<NaiveDate>, ValidationError> {
        self.optional_str(name)?
            .map(|raw| parse_date(name, raw))
            .transpose()
    }

    pub fn required_symbol(&self) -> Result<Symbol, ValidationError> {
        parse_symbol(self.required_str("symbol")?)
    }

    /// An empty or blank symbol means "no filter"
    pub fn optional_symbol(&self) -> Result<Option<Symbol>, ValidationError> {
        self.optional_str("symbol")?
            .filter(|raw| !raw.trim().is_empty())
            .map(parse_symbol)
            .transpose()
    }
}

pub fn parse_symbol(raw: &str) -> Result<Symbol, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing("symbol"));
    }

    // At least one alphanumeric, so "." and ".." cannot collapse a URL path
    let valid = trimmed.len() <= MAX_SYMBOL_LEN
        && trimmed.chars().any(|c| c.is_ascii_alphanumeric())
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));

    if !valid {
        return Err(ValidationError::InvalidSymbol(trimmed.to_string()));
    }

    Ok(Symbol(trimmed.to_string()))
}

pub fn parse_date(name: &'static str, raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| ValidationError::InvalidDate {
        name,
        value: raw.to_string(),
    })
}

fn check_order(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(ValidationError::InvertedRange { from, to });
        }
    }
    Ok(())
}

// Typed requests

/// Arguments for tools that only take a symbol
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolRequest {
    pub symbol: Symbol,
}

impl SymbolRequest {
    pub fn from_arguments(value: &Value) -> Result<Self, ValidationError> {
        let args = Arguments::new(value)?;
        Ok(Self {
            symbol: args.required_symbol()?,
        })
    }
}

/// Arguments for `get_rsi` / `get_sma`
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRequest {
    pub symbol: Symbol,
    pub kind: IndicatorKind,
    pub time_period: u32,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

impl IndicatorRequest {
    pub fn from_arguments(kind: IndicatorKind, value: &Value) -> Result<Self, ValidationError> {
        let args = Arguments::new(value)?;
        let symbol = args.required_symbol()?;
        let time_period = args
            .optional_int("time_period", 1, MAX_TIME_PERIOD)?
            .unwrap_or_else(|| kind.default_period());
        let from_date = args.optional_date("from_date")?;
        let to_date = args.optional_date("to_date")?;
        check_order(from_date, to_date)?;

        Ok(Self {
            symbol,
            kind,
            time_period,
            from_date,
            to_date,
        })
    }
}

/// Arguments for `get_insider_trading`
#[derive(Debug, Clone, PartialEq)]
pub struct InsiderTradingRequest {
    pub symbol: Symbol,
    pub page: u32,
    pub limit: u32,
}

impl InsiderTradingRequest {
    pub const DEFAULT_LIMIT: u32 = 100;

    pub fn from_arguments(value: &Value) -> Result<Self, ValidationError> {
        let args = Arguments::new(value)?;
        Ok(Self {
            symbol: args.required_symbol()?,
            page: args.optional_int("page", 0, u32::MAX as u64)?.unwrap_or(0),
            limit: args
                .optional_int("limit", 1, MAX_LIMIT)?
                .unwrap_or(Self::DEFAULT_LIMIT),
        })
    }
}

/// Arguments for `get_earnings_calendar`
#[derive(Debug, Clone, PartialEq)]
pub struct EarningsCalendarRequest {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub symbol: Option<Symbol>,
}

impl EarningsCalendarRequest {
    pub fn from_arguments(value: &Value) -> Result<Self, ValidationError> {
        let args = Arguments::new(value)?;
        let from_date = args.optional_date("from_date")?;
        let to_date = args.optional_date("to_date")?;
        check_order(from_date, to_date)?;

        Ok(Self {
            from_date,
            to_date,
            symbol: args.optional_symbol()?,
        })
    }
}
