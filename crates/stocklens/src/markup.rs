//! Parser for the HTML subset produced by `stocklens_client::render`.
//!
//! Unknown tags are skipped; their text still shows. Only `http` and
//! `https` anchors become links.
use html_escape::decode_html_entities;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text { text: String, bold: bool, italic: bool },
    Link { text: String, url: String },
}

/// A paragraph or heading, split into lines at `<br>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub heading: bool,
    pub lines: Vec<Vec<Inline>>,
}

#[derive(Default)]
struct Parser {
    blocks: Vec<Block>,
    block: Block,
    line: Vec<Inline>,
    bold: usize,
    italic: usize,
    link: Option<(String, String)>,
}

impl Parser {
    fn text(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        let text = decode_html_entities(raw).into_owned();
        match &mut self.link {
            Some((_, label)) => label.push_str(&text),
            None => self.line.push(Inline::Text {
                text,
                bold: self.bold > 0,
                italic: self.italic > 0,
            }),
        }
    }

    fn break_line(&mut self) {
        let line = std::mem::take(&mut self.line);
        self.block.lines.push(line);
    }

    fn end_block(&mut self) {
        if !self.line.is_empty() {
            self.break_line();
        }
        let block = std::mem::take(&mut self.block);
        if block.lines.iter().any(|line| !line.is_empty()) {
            self.blocks.push(block);
        }
    }

    fn tag(&mut self, tag: &str) {
        let name = tag
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .trim_end_matches('/')
            .to_ascii_lowercase();

        match name.as_str() {
            "p" | "/p" | "/h1" | "/h2" | "/h3" | "/h4" => self.end_block(),
            "h1" | "h2" | "h3" | "h4" => {
                self.end_block();
                self.block.heading = true;
            }
            "br" => self.break_line(),
            "b" | "strong" => self.bold += 1,
            "/b" | "/strong" => self.bold = self.bold.saturating_sub(1),
            "i" | "em" => self.italic += 1,
            "/i" | "/em" => self.italic = self.italic.saturating_sub(1),
            "a" => self.link = Some((href(tag).unwrap_or_default(), String::new())),
            "/a" => {
                if let Some((url, text)) = self.link.take() {
                    if url.is_empty() {
                        self.line.push(Inline::Text {
                            text,
                            bold: self.bold > 0,
                            italic: self.italic > 0,
                        });
                    } else {
                        self.line.push(Inline::Link { text, url });
                    }
                }
            }
            _ => {}
        }
    }
}

/// The decoded `href` of an anchor tag, if it points at the web.
fn href(tag: &str) -> Option<String> {
    let start = tag.find("href=")? + "href=".len();
    let rest = &tag[start..];
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &rest[1..];
    let end = value.find(quote)?;
    let url = decode_html_entities(&value[..end]).trim().to_string();

    let scheme = url.split_once(':').map(|(scheme, _)| scheme.to_ascii_lowercase());
    match scheme.as_deref() {
        Some("http") | Some("https") => Some(url),
        _ => None,
    }
}

pub fn parse(markup: &str) -> Vec<Block> {
    let mut parser = Parser::default();
    let mut rest = markup;

    while let Some(open) = rest.find('<') {
        parser.text(&rest[..open]);
        let Some(close) = rest[open..].find('>') else {
            rest = "";
            break;
        };
        parser.tag(rest[open + 1..open + close].trim());
        rest = &rest[open + close + 1..];
    }
    parser.text(rest);
    parser.end_block();
    parser.blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use stocklens_client::render;
    use stocklens_client::schema::NewsItem;

    fn text(text: &str, bold: bool) -> Inline {
        Inline::Text {
            text: text.into(),
            bold,
            italic: false,
        }
    }

    #[test]
    fn news_item_becomes_link_and_lines() {
        let item = NewsItem {
            published_at: "2024-01-01".into(),
            headline: "Q&A".into(),
            summary: "S".into(),
            url: "http://x?a=1&b=2".into(),
        };
        let blocks = parse(render::news("AAPL", &[item]).as_str());
        assert_eq!(blocks.len(), 2);

        assert!(blocks[0].heading);
        assert_eq!(blocks[0].lines, vec![vec![text("Company News for AAPL", false)]]);

        assert!(!blocks[1].heading);
        assert_eq!(
            blocks[1].lines[0],
            vec![
                text("2024-01-01", true),
                text(": ", false),
                Inline::Link {
                    text: "Q&A".into(),
                    url: "http://x?a=1&b=2".into()
                },
            ]
        );
        assert_eq!(blocks[1].lines[1], vec![text("S", false)]);
        assert_eq!(
            blocks[1].lines[2],
            vec![Inline::Text {
                text: "http://x?a=1&b=2".into(),
                bold: false,
                italic: true
            }]
        );
    }

    #[test]
    fn empty_news_has_only_heading() {
        let blocks = parse(render::news("AAPL", &[]).as_str());
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].heading);
    }

    #[test]
    fn instructions_keep_the_dashboard_link() {
        let blocks = parse(render::instructions().as_str());
        let links: Vec<_> = blocks
            .iter()
            .flat_map(|b| b.lines.iter().flatten())
            .filter_map(|inline| match inline {
                Inline::Link { url, .. } => Some(url.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(links, ["https://finnhub.io/dashboard"]);
    }

    #[test]
    fn anchors_without_href_are_text() {
        let blocks = parse("<p><a>plain</a></p>");
        assert_eq!(blocks[0].lines, vec![vec![text("plain", false)]]);
    }

    #[test]
    fn only_web_links_are_clickable() {
        let blocks = parse(
            "<p><a href=\"javascript:alert(1)\">js</a><a href=\"file:///etc/passwd\">file</a>\
             <a href=\"HTTPS://example.com\">web</a></p>",
        );
        assert_eq!(
            blocks[0].lines[0],
            vec![
                text("js", false),
                text("file", false),
                Inline::Link {
                    text: "web".into(),
                    url: "HTTPS://example.com".into()
                },
            ]
        );
    }

    #[test]
    fn unterminated_tag_is_dropped() {
        let blocks = parse("<p>ok</p><b");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].lines, vec![vec![text("ok", false)]]);
    }
}
