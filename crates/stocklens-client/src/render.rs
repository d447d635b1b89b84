//! HTML rendering for the output pane.
//!
//! Markup comes from the tera templates under `templates/`, which only use
//! `<p>`, `<br>`, `<b>`, `<i>`, `<h3>` and `<a href>`. Autoescaping is always
//! on, so remote text cannot add tags of its own.
use html_escape::{decode_html_entities, encode_text};
use std::fmt;
use tera::{Context, Tera};

use crate::config::DASHBOARD_URL;
use crate::error::FetchError;
use crate::schema::{NewsItem, QuoteResult};

/// Rendered markup, ready for the display surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const INSTRUCTIONS: &str = include_str!("../templates/instructions.html");
const QUOTE: &str = include_str!("../templates/quote.html");
const NEWS: &str = include_str!("../templates/news.html");
const ERROR: &str = include_str!("../templates/error.html");

/// Render one of the bundled templates with autoescaping on.
fn render(name: &str, template: &str, context: &Context) -> Markup {
    match Tera::one_off(template, context, true) {
        Ok(html) => Markup(html.trim_end().to_string()),
        Err(err) => {
            log::error!("failed to render the {name} template: {err}");
            Markup(format!(
                "<html><body><p><b>Error:</b> could not render {}.</p></body></html>",
                encode_text(name)
            ))
        }
    }
}

/// Shown before the first action.
pub fn instructions() -> Markup {
    let mut context = Context::new();
    context.insert("dashboard_url", DASHBOARD_URL);
    render("instructions", INSTRUCTIONS, &context)
}

pub fn quote(symbol: &str, quote: &QuoteResult) -> Markup {
    let mut context = Context::new();
    context.insert("symbol", symbol);
    context.insert("quote", quote);
    context.insert("recommendation", &quote.recommendation().to_string());
    render("quote", QUOTE, &context)
}

pub fn news(symbol: &str, items: &[NewsItem]) -> Markup {
    let mut context = Context::new();
    context.insert("symbol", symbol);
    context.insert("items", items);
    render("news", NEWS, &context)
}

pub fn error(err: &FetchError) -> Markup {
    let mut context = Context::new();
    context.insert("message", &err.to_string());
    render("error", ERROR, &context)
}

/// Plain text of a rendered markup: tags dropped, entities decoded, block
/// boundaries turned into newlines.
pub fn strip_markup(markup: &Markup) -> String {
    let mut text = String::new();
    let mut rest = markup.as_str();

    while let Some(open) = rest.find('<') {
        text.push_str(&decode_html_entities(&rest[..open]));
        let Some(close) = rest[open..].find('>') else {
            rest = "";
            break;
        };
        let tag = rest[open + 1..open + close].trim().to_ascii_lowercase();
        if matches!(tag.as_str(), "br" | "br/" | "/p" | "/h3") {
            text.push('\n');
        }
        rest = &rest[open + close + 1..];
    }
    text.push_str(&decode_html_entities(rest));
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(published_at: &str, headline: &str, summary: &str, url: &str) -> NewsItem {
        NewsItem {
            published_at: published_at.into(),
            headline: headline.into(),
            summary: summary.into(),
            url: url.into(),
        }
    }

    #[test]
    fn quote_lists_values_and_direction() {
        let q = QuoteResult {
            current_price: 189.84,
            previous_close: 187.5,
            change: 2.34,
            percent_change: 1.248,
        };
        let text = strip_markup(&quote("AAPL", &q));
        assert!(text.contains("Current Stock Quote for AAPL:"));
        assert!(text.contains("Current Price: 189.84"));
        assert!(text.contains("Previous Close: 187.5"));
        assert!(text.contains("Change: 2.34"));
        assert!(text.contains("Percent Change: 1.248%"));
        assert!(text.contains("Recommendation: call"));
    }

    #[test]
    fn single_item_round_trip() {
        let markup = news("AAPL", &[item("2024-01-01", "H", "S", "http://x")]);
        let text = strip_markup(&markup);
        for literal in ["H", "S", "http://x", "2024-01-01"] {
            assert_eq!(text.matches(literal).count(), 1, "{literal} in {text:?}");
        }
        assert!(markup.as_str().contains(">H</a>"));
    }

    #[test]
    fn empty_news_is_a_bare_shell() {
        let markup = news("AAPL", &[]);
        assert_eq!(
            markup.as_str(),
            "<html><body><h3>Company News for AAPL</h3></body></html>"
        );
        assert_eq!(markup.as_str().matches("<p>").count(), 0);
    }

    #[test]
    fn news_keeps_order_and_count() {
        let items = [
            item("", "first", "a", ""),
            item("", "second", "b", "http://b"),
            item("", "third", "c", ""),
        ];
        let text = strip_markup(&news("MSFT", &items));
        let first = text.find("first").unwrap();
        let second = text.find("second").unwrap();
        let third = text.find("third").unwrap();
        assert!(first < second && second < third);
        assert_eq!(news("MSFT", &items).as_str().matches("<p>").count(), 3);
    }

    #[test]
    fn remote_text_cannot_inject_markup() {
        let markup = news(
            "AAPL",
            &[item("", "<script>x</script>", "a & b", "http://x/\"onclick=\"")],
        );
        assert!(!markup.as_str().contains("<script>"));
        assert!(!markup.as_str().contains("\"onclick"));
        assert!(markup.as_str().contains("&lt;script&gt;"));

        let text = strip_markup(&markup);
        assert!(text.contains("<script>x</script>"));
        assert!(text.contains("a & b"));
        assert!(text.contains("http://x/\"onclick=\""));
    }

    #[test]
    fn errors_share_the_channel() {
        let markup = error(&FetchError::HttpStatus(404));
        assert_eq!(
            strip_markup(&markup),
            "Error: Error fetching data. Response code: 404\n"
        );
    }

    #[test]
    fn instructions_link_the_dashboard() {
        let html = instructions();
        assert!(decode_html_entities(html.as_str()).contains(DASHBOARD_URL));
        assert!(strip_markup(&html).contains("Finnhub Dashboard"));
    }

    #[test]
    fn quote_symbol_is_escaped() {
        let q = QuoteResult {
            current_price: 2.0,
            previous_close: 1.0,
            change: 1.0,
            percent_change: 100.0,
        };
        let markup = quote("<b>X</b>", &q);
        assert!(!markup.as_str().contains("<b>X</b>"));
        assert!(strip_markup(&markup).contains("Current Stock Quote for <b>X</b>:"));
    }
}
