//! Failures of a single user action.
//!
//! Every variant is recoverable: the action that raised it renders the
//! message into the output pane and the application carries on. No message
//! ever carries the API key.
use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

use crate::secret::ApiKey;

/// The user-facing form fields, named as they are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ApiKey,
    Symbol,
    FromDate,
    ToDate,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::ApiKey => "API Key",
            Field::Symbol => "Stock Symbol",
            Field::FromDate => "From Date",
            Field::ToDate => "To Date",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// A required form field was blank.
    #[error("{0} is required.")]
    EmptyRequiredField(Field),

    /// A date field is not a calendar date in `YYYY-MM-DD` form.
    #[error("{field} must be a date in YYYY-MM-DD form, got \"{value}\".")]
    InvalidDate { field: Field, value: String },

    /// The news range ends before it starts.
    #[error("From Date {from} is after To Date {to}.")]
    DateRange { from: String, to: String },

    /// The provider answered with a non-success status.
    #[error("Error fetching data. Response code: {0}")]
    HttpStatus(u16),

    /// The provider has no quote for this symbol.
    #[error("No quote data available for symbol {0}.")]
    DataUnavailable(String),

    /// The body was not the JSON shape we expect.
    #[error("Malformed response from the data provider: {0}")]
    MalformedResponse(String),

    /// Connection or I/O level failure.
    #[error("Could not reach the data provider: {0}")]
    NetworkFailure(String),
}

impl FetchError {
    /// Convert a transport error, dropping the request URL (it carries the
    /// token) and scrubbing the key from whatever text is left.
    pub fn transport(err: reqwest::Error, api_key: &ApiKey) -> Self {
        let decode = err.is_decode();
        let err = err.without_url();

        let mut detail = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            detail.push_str(": ");
            detail.push_str(&cause.to_string());
            source = cause.source();
        }
        let detail = api_key.scrub(&detail);

        if decode {
            FetchError::MalformedResponse(detail)
        } else {
            FetchError::NetworkFailure(detail)
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::MalformedResponse(err.to_string())
    }
}
