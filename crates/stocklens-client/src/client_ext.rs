use reqwest::Client;
use std::future::Future;

use crate::config::Endpoints;
use crate::error::{FetchError, Field};
use crate::input::required;
use crate::schema::{NewsItem, QuoteResponse, QuoteResult};
use crate::secret::ApiKey;

/// Finnhub calls as add-on methods for [`reqwest::Client`].
///
/// [`reqwest::Client`]: https://docs.rs/reqwest/latest/reqwest/struct.Client.html
pub trait ClientExt {
    fn fetch_quote(
        &self,
        endpoints: &Endpoints,
        symbol: &str,
        api_key: &ApiKey,
    ) -> impl Future<Output = Result<QuoteResult, FetchError>> + Send;

    fn fetch_news(
        &self,
        endpoints: &Endpoints,
        symbol: &str,
        from: &str,
        to: &str,
        api_key: &ApiKey,
    ) -> impl Future<Output = Result<Vec<NewsItem>, FetchError>> + Send;

    fn get_body(
        &self,
        url: &str,
        params: &[(&str, &str)],
        api_key: &ApiKey,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}

impl ClientExt for Client {
    /// Fetch the latest quote of a single stock.
    async fn fetch_quote(
        &self,
        endpoints: &Endpoints,
        symbol: &str,
        api_key: &ApiKey,
    ) -> Result<QuoteResult, FetchError> {
        let symbol = required(Field::Symbol, symbol)?;
        required(Field::ApiKey, api_key.expose())?;

        let body = self
            .get_body(&endpoints.quote, &[("symbol", symbol)], api_key)
            .await?;
        let response: QuoteResponse = serde_json::from_str(&body)?;
        response.into_quote(symbol)
    }

    /// Fetch company news between two `YYYY-MM-DD` dates, in provider order.
    async fn fetch_news(
        &self,
        endpoints: &Endpoints,
        symbol: &str,
        from: &str,
        to: &str,
        api_key: &ApiKey,
    ) -> Result<Vec<NewsItem>, FetchError> {
        let symbol = required(Field::Symbol, symbol)?;
        let from = required(Field::FromDate, from)?;
        let to = required(Field::ToDate, to)?;
        required(Field::ApiKey, api_key.expose())?;

        let body = self
            .get_body(
                &endpoints.news,
                &[("symbol", symbol), ("from", from), ("to", to)],
                api_key,
            )
            .await?;
        let news: Vec<NewsItem> = serde_json::from_str(&body)?;
        log::debug!("[{symbol}] {} news items received", news.len());
        Ok(news)
    }

    /// GET `url` with `params` plus the token, returning the body of a
    /// successful response. Non-success statuses are never parsed.
    async fn get_body(
        &self,
        url: &str,
        params: &[(&str, &str)],
        api_key: &ApiKey,
    ) -> Result<String, FetchError> {
        let query = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        log::info!("GET {url}?{query}&token=<redacted>");

        let response = self
            .get(url)
            .query(params)
            .query(&[("token", api_key.expose())])
            .send()
            .await
            .map_err(|e| FetchError::transport(e, api_key))?;

        let status = response.status();
        log::debug!("{url} responded with {status}");
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::transport(e, api_key))
    }
}
