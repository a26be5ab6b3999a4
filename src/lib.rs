//! Checks an HTML document for CSS selectors, and reports which ones are present.
//!
//! The [`check`] module does the actual checking, [`fetch`] loads remote documents, and [`run`] ties them together
//! the way the `html-grader` CLI does.
pub mod check;
pub mod fetch;
pub mod run;
