use std::fmt;
use zeroize::Zeroizing;

/// The Finnhub token.
///
/// Formatting never reveals the key, and the backing buffer is zeroed when
/// the last copy is dropped.
#[derive(Clone)]
pub struct ApiKey(Zeroizing<String>);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Zeroizing::new(key.into()))
    }

    /// Borrow the raw token; only the request builder should need this.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Replace every occurrence of the token in `text`.
    pub fn scrub(&self, text: &str) -> String {
        if self.is_empty() {
            return text.to_string();
        }
        text.replace(self.expose(), "<redacted>")
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatting_is_redacted() {
        let key = ApiKey::new("abc123");
        assert_eq!(format!("{key}"), "<redacted>");
        assert_eq!(format!("{key:?}"), "ApiKey(<redacted>)");
        assert_eq!(key.expose(), "abc123");
    }

    #[test]
    fn scrub_removes_token() {
        let key = ApiKey::new("abc123");
        let text = "GET /quote?symbol=AAPL&token=abc123 failed";
        assert_eq!(
            key.scrub(text),
            "GET /quote?symbol=AAPL&token=<redacted> failed"
        );
        assert_eq!(ApiKey::new("").scrub("unchanged"), "unchanged");
    }
}
