//! One user action, end to end: form → request → fetch → markup.
//!
//! Every failure is folded into the returned [`Markup`], so callers only ever
//! have one thing to display.
use reqwest::Client;

use crate::client_ext::ClientExt;
use crate::config::Endpoints;
use crate::error::FetchError;
use crate::input::{FormInput, NewsRequest, QuoteRequest};
use crate::render::{self, Markup};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quote,
    News,
}

/// A validated request, detached from the form so it can move to a task.
#[derive(Debug, Clone)]
pub enum Request {
    Quote(QuoteRequest),
    News(NewsRequest),
}

impl Action {
    pub fn request(self, form: &FormInput) -> Result<Request, FetchError> {
        match self {
            Action::Quote => form.quote_request().map(Request::Quote),
            Action::News => form.news_request().map(Request::News),
        }
    }
}

pub async fn run(client: &Client, endpoints: &Endpoints, request: Request) -> Markup {
    match request {
        Request::Quote(QuoteRequest { symbol, api_key }) => {
            match client.fetch_quote(endpoints, &symbol, &api_key).await {
                Ok(quote) => render::quote(&symbol, &quote),
                Err(err) => failure(&err),
            }
        }
        Request::News(request) => {
            let result = client
                .fetch_news(
                    endpoints,
                    &request.symbol,
                    &request.from_param(),
                    &request.to_param(),
                    &request.api_key,
                )
                .await;
            match result {
                Ok(items) => render::news(&request.symbol, &items),
                Err(err) => failure(&err),
            }
        }
    }
}

/// Validate the form and run the action in one step.
///
/// The window calls [`Action::request`] and [`run`] separately, so invalid
/// input is rendered without ever reaching the runtime.
pub async fn execute(
    client: &Client,
    endpoints: &Endpoints,
    action: Action,
    form: &FormInput,
) -> Markup {
    match action.request(form) {
        Ok(request) => run(client, endpoints, request).await,
        Err(err) => failure(&err),
    }
}

pub fn failure(err: &FetchError) -> Markup {
    log::warn!("{err}");
    render::error(err)
}
