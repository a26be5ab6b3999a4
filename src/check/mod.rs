//! Checking an HTML document for the presence of CSS selectors.
//!
//! ```
//! use html_grader::check::{check, Checks, HtmlDoc, InvalidSelectors};
//!
//! let doc = HtmlDoc::parse("<html><h1>Hi</h1></html>");
//! let checks: Checks = ["h2", "h1"].into_iter().collect();
//! let results = check(&doc, &checks, InvalidSelectors::Fail).unwrap();
//!
//! assert_eq!(results.get("h1"), Some(true));
//! assert_eq!(results.get("h2"), Some(false));
//! ```
mod checks;
mod html_doc;
mod results;

pub use checks::*;
pub use html_doc::*;
pub use results::*;

use clap::ValueEnum;
use std::fmt::{Display, Formatter};
use tracing::{trace, warn};

/// What to do with a selector the query engine can't parse.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum InvalidSelectors {
    /// Abort the whole check with an error.
    #[default]
    Fail,

    /// Record the selector as not present, and keep going.
    Absent,
}

impl Display for InvalidSelectors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let self_str = match self {
            InvalidSelectors::Fail => "fail",
            InvalidSelectors::Absent => "absent",
        };
        f.write_str(self_str)
    }
}

/// Queries `doc` for each of the `checks`, recording whether each selector matched at least one element.
///
/// Every selector gets an entry in the results, including the ones that matched nothing.
pub fn check(
    doc: &HtmlDoc,
    checks: &Checks,
    on_invalid: InvalidSelectors,
) -> Result<CheckResults, SelectorSyntaxError> {
    let mut results = CheckResults::default();
    for selector in checks.iter() {
        let present = match (doc.contains(selector), on_invalid) {
            (Ok(present), _) => present,
            (Err(err), InvalidSelectors::Fail) => return Err(err),
            (Err(err), InvalidSelectors::Absent) => {
                warn!("{err}; recording it as absent");
                false
            }
        };
        trace!(selector = selector.as_str(), present, "checked selector");
        results.record(selector, present);
    }
    Ok(results)
}
