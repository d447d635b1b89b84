use chrono::NaiveDate;
use std::fmt;
use zeroize::Zeroize;

use crate::error::{FetchError, Field};
use crate::secret::ApiKey;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Bytes reserved up front for the key buffer. Editing in place below this
/// never reallocates, so no stale copy of the key is left on the heap.
pub const KEY_CAPACITY: usize = 256;

/// Raw text of the four form fields, exactly as typed.
///
/// The key buffer is zeroed on drop.
#[derive(Clone)]
pub struct FormInput {
    pub api_key: String,
    pub symbol: String,
    pub from_date: String,
    pub to_date: String,
}

impl fmt::Debug for FormInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormInput")
            .field("api_key", &"<redacted>")
            .field("symbol", &self.symbol)
            .field("from_date", &self.from_date)
            .field("to_date", &self.to_date)
            .finish()
    }
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            api_key: String::with_capacity(KEY_CAPACITY),
            symbol: String::new(),
            from_date: String::new(),
            to_date: String::new(),
        }
    }
}

impl Drop for FormInput {
    fn drop(&mut self) {
        self.api_key.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub symbol: String,
    pub api_key: ApiKey,
}

#[derive(Debug, Clone)]
pub struct NewsRequest {
    pub symbol: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub api_key: ApiKey,
}

impl NewsRequest {
    pub fn from_param(&self) -> String {
        self.from.format(DATE_FORMAT).to_string()
    }

    pub fn to_param(&self) -> String {
        self.to.format(DATE_FORMAT).to_string()
    }
}

impl FormInput {
    pub fn quote_request(&self) -> Result<QuoteRequest, FetchError> {
        let api_key = required(Field::ApiKey, &self.api_key)?;
        let symbol = required(Field::Symbol, &self.symbol)?;
        Ok(QuoteRequest {
            symbol: symbol.to_string(),
            api_key: ApiKey::new(api_key),
        })
    }

    /// Blank fields are reported before malformed dates, in form order.
    pub fn news_request(&self) -> Result<NewsRequest, FetchError> {
        let api_key = required(Field::ApiKey, &self.api_key)?;
        let symbol = required(Field::Symbol, &self.symbol)?;
        let from = required(Field::FromDate, &self.from_date)?;
        let to = required(Field::ToDate, &self.to_date)?;

        let from_date = parse_date(Field::FromDate, from)?;
        let to_date = parse_date(Field::ToDate, to)?;
        if from_date > to_date {
            return Err(FetchError::DateRange {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        Ok(NewsRequest {
            symbol: symbol.to_string(),
            from: from_date,
            to: to_date,
            api_key: ApiKey::new(api_key),
        })
    }
}

pub(crate) fn required(field: Field, value: &str) -> Result<&str, FetchError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FetchError::EmptyRequiredField(field));
    }
    Ok(value)
}

/// Strict `YYYY-MM-DD`; chrono alone would also take unpadded months and days.
pub fn parse_date(field: Field, value: &str) -> Result<NaiveDate, FetchError> {
    let invalid = || FetchError::InvalidDate {
        field,
        value: value.to_string(),
    };
    if value.len() != 10 {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}
