use dom_query::{Document, Matcher};
use std::fmt::{Debug, Formatter};
use thiserror::Error;

/// A parsed HTML document, ready to be queried by CSS selectors.
///
/// Parsing is HTML5-tolerant: any input, including an empty string or a fragment without `<html>`,
/// produces a document.
pub struct HtmlDoc {
    document: Document,
}

/// A selector string that the query engine couldn't compile.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Error)]
#[error("invalid selector: {selector}")]
pub struct SelectorSyntaxError {
    selector: String,
}

impl SelectorSyntaxError {
    pub fn selector(&self) -> &str {
        &self.selector
    }
}

impl HtmlDoc {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Document::from(html),
        }
    }

    /// Whether at least one element in the document matches `selector`.
    pub fn contains(&self, selector: &str) -> Result<bool, SelectorSyntaxError> {
        let matcher = Matcher::new(selector).map_err(|_| SelectorSyntaxError {
            selector: selector.to_string(),
        })?;
        Ok(self.document.select_matcher(&matcher).exists())
    }
}

impl Debug for HtmlDoc {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlDoc").finish_non_exhaustive()
    }
}
