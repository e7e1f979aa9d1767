//! Positioned page content as delivered by the token/line provider.

/// A positioned piece of rendered page text.
///
/// Tokens are the atomic unit of the positioned-token parsing path: a text
/// fragment together with its vertical offset from the top of the page and
/// its horizontal start position. Tokens are scoped to a single page and
/// discarded once transactions have been derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The rendered text of this fragment.
    pub text: String,

    /// Vertical position, measured from the top of the page.
    ///
    /// Tokens rendered on the same visual line share the same `top` value.
    pub top: f64,

    /// Horizontal start position.
    pub x0: f64,
}

impl Token {
    /// Convenience constructor, mostly useful in tests.
    pub fn new(text: impl Into<String>, top: f64, x0: f64) -> Self {
        Token {
            text: text.into(),
            top,
            x0,
        }
    }
}

/// Everything the provider could extract from one page.
///
/// A page exposes two independent views: positioned tokens (preferred, drives
/// the column-based parser) and reflowed plain text (the fallback). Either may
/// be empty/absent — the extraction engine probes both at runtime.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    /// Positioned text tokens, sorted by `(top, x0)`. May be empty.
    pub tokens: Vec<Token>,

    /// Reflowed page text, `None` when the page has no extractable text.
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_new_populates_fields() {
        let token = Token::new("45.00", 120.5, 300.0);
        assert_eq!(token.text, "45.00");
        assert_eq!(token.top, 120.5);
        assert_eq!(token.x0, 300.0);
    }

    #[test]
    fn page_content_default_is_empty() {
        let page = PageContent::default();
        assert!(page.tokens.is_empty());
        assert!(page.text.is_none());
    }
}
