use chrono::DateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::FetchError;

// `quote` schema
#[derive(Deserialize, Debug)]
pub struct QuoteResponse {
    pub c: Option<f64>,
    pub pc: Option<f64>,
    pub d: Option<f64>,
    pub dp: Option<f64>,
}

impl QuoteResponse {
    /// Finnhub answers an unknown symbol with a missing or zero price rather
    /// than an error status; neither is ever a valid quote.
    pub fn into_quote(self, symbol: &str) -> Result<QuoteResult, FetchError> {
        let current_price = match self.c {
            Some(c) if c != 0.0 => c,
            _ => return Err(FetchError::DataUnavailable(symbol.to_string())),
        };

        let field = |value: Option<f64>, name: &str| {
            value.ok_or_else(|| FetchError::MalformedResponse(format!("missing field `{name}`")))
        };
        Ok(QuoteResult {
            current_price,
            previous_close: field(self.pc, "pc")?,
            change: field(self.d, "d")?,
            percent_change: field(self.dp, "dp")?,
        })
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct QuoteResult {
    pub current_price: f64,
    pub previous_close: f64,
    pub change: f64,
    pub percent_change: f64,
}

impl QuoteResult {
    pub fn recommendation(&self) -> Recommendation {
        match self.current_price.partial_cmp(&self.previous_close) {
            Some(Ordering::Greater) => Recommendation::Call,
            Some(Ordering::Less) => Recommendation::Put,
            _ => Recommendation::Neutral,
        }
    }
}

/// Direction of the last move; a display hint, not advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Call,
    Put,
    Neutral,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Recommendation::Call => "call",
            Recommendation::Put => "put",
            Recommendation::Neutral => "none",
        })
    }
}

// `company-news` schema
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    #[serde(rename(deserialize = "datetime"), default, deserialize_with = "de_published_at")]
    pub published_at: String,
    pub headline: String,
    pub summary: String,
    #[serde(default, deserialize_with = "de_optional_string")]
    pub url: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Published {
    Timestamp(i64),
    Text(String),
    Other(serde_json::Value),
}

/// Unix seconds become `YYYY-MM-DD HH:MM UTC`; text passes through.
pub fn de_published_at<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let published: Option<Published> = Option::deserialize(deserializer)?;
    let text = match published {
        Some(Published::Timestamp(ts)) => DateTime::from_timestamp(ts, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| ts.to_string()),
        Some(Published::Text(text)) => text,
        Some(Published::Other(value)) => value.to_string(),
        None => String::new(),
    };
    Ok(text)
}

pub fn de_optional_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
