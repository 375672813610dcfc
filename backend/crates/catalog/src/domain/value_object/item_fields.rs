//! Validated descriptive fields of an item

use chrono::{DateTime, NaiveDate};
use kernel::error::app_error::{AppError, AppResult};
use std::fmt;

pub const TITLE_MIN_LENGTH: usize = 3;
pub const TITLE_MAX_LENGTH: usize = 200;
pub const BRAND_MIN_LENGTH: usize = 2;
pub const BRAND_MAX_LENGTH: usize = 100;
pub const MODEL_MIN_LENGTH: usize = 2;
pub const MODEL_MAX_LENGTH: usize = 100;
/// Limit for short optional fields (size, color, purchase location)
pub const SHORT_TEXT_MAX_LENGTH: usize = 255;
/// Upper bound of a `NUMERIC(10, 2)` amount, in cents
pub const PRICE_MAX_CENTS: i64 = 9_999_999_999;

fn bounded(field: &str, raw: &str, min: usize, max: usize) -> AppResult<String> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if len < min || len > max {
        return Err(AppError::bad_request(format!(
            "{field} must be between {min} and {max} characters"
        )));
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    pub fn new(raw: &str) -> AppResult<Self> {
        bounded("Title", raw, TITLE_MIN_LENGTH, TITLE_MAX_LENGTH).map(Self)
    }

    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brand(String);

impl Brand {
    pub fn new(raw: &str) -> AppResult<Self> {
        bounded("Brand", raw, BRAND_MIN_LENGTH, BRAND_MAX_LENGTH).map(Self)
    }

    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Product model name (e.g. "AJ1")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelName(String);

impl ModelName {
    pub fn new(raw: &str) -> AppResult<Self> {
        bounded("Model", raw, MODEL_MIN_LENGTH, MODEL_MAX_LENGTH).map(Self)
    }

    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Trimmed free text; blank input means "no value"
pub fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Like [`optional_text`], with the short-field length limit
pub fn optional_short_text(field: &str, raw: &str) -> AppResult<Option<String>> {
    let value = optional_text(raw);
    if value
        .as_ref()
        .is_some_and(|v| v.chars().count() > SHORT_TEXT_MAX_LENGTH)
    {
        return Err(AppError::bad_request(format!(
            "{field} must be at most {SHORT_TEXT_MAX_LENGTH} characters"
        )));
    }
    Ok(value)
}

/// Non-negative amount with two decimal places, held in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(i64);

impl Price {
    /// Parse a decimal such as `199.9` or `1250.00`
    pub fn parse(raw: &str) -> AppResult<Self> {
        let invalid = || {
            AppError::bad_request(
                "purchasePrice must be a non-negative amount with at most two decimal places",
            )
        };

        let raw = raw.trim();
        let (whole, frac) = raw.split_once('.').unwrap_or((raw, ""));

        if (whole.is_empty() && frac.is_empty())
            || frac.len() > 2
            || !whole.chars().all(|c| c.is_ascii_digit())
            || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(frac))
            .filter(|cents| *cents <= PRICE_MAX_CENTS)
            .map(Self)
            .ok_or_else(invalid)
    }

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp
pub fn parse_purchase_date(raw: &str) -> AppResult<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| AppError::bad_request("purchaseDate must be a date (YYYY-MM-DD)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_bounds() {
        assert!(Title::new("AJ").is_err());
        assert_eq!(Title::new("  Air Jordan 1 ").unwrap().as_str(), "Air Jordan 1");
        assert!(Title::new(&"x".repeat(TITLE_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_brand_and_model_bounds() {
        assert!(Brand::new("N").is_err());
        assert!(Brand::new("Nike").is_ok());
        assert!(ModelName::new("AJ1").is_ok());
        assert!(ModelName::new(" ").is_err());
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text("  "), None);
        assert_eq!(optional_text(" Red "), Some("Red".to_string()));
        assert!(optional_short_text("Color", &"r".repeat(256)).is_err());
    }

    #[test]
    fn test_price_parse() {
        assert_eq!(Price::parse("199.9").unwrap().cents(), 19990);
        assert_eq!(Price::parse("1250").unwrap().cents(), 125000);
        assert_eq!(Price::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Price::parse(".5").unwrap().cents(), 50);
        assert_eq!(Price::parse("10.").unwrap().cents(), 1000);
    }

    #[test]
    fn test_price_rejects_invalid() {
        for raw in ["-1", "1.234", "abc", "", ".", "1e3", "99999999999"] {
            assert!(Price::parse(raw).is_err(), "{raw}");
        }
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::from_cents(19990).to_string(), "199.90");
        assert_eq!(Price::from_cents(5).to_string(), "0.05");
    }

    #[test]
    fn test_purchase_date() {
        let expected = NaiveDate::from_ymd_opt(2023, 5, 14).unwrap();
        assert_eq!(parse_purchase_date("2023-05-14").unwrap(), expected);
        assert_eq!(parse_purchase_date("2023-05-14T10:00:00Z").unwrap(), expected);
        assert!(parse_purchase_date("14/05/2023").is_err());
    }
}
