//! End-to-end runs.
//!
//! This module combines the [`crate::check`] and [`crate::fetch`] mods into a single workflow. It's useful for
//! building functionality like the CLI's, but running it within-process.
//!
//! ## Example
//!
//! ```
//! # use html_grader::run;
//! # use html_grader::fetch::FetchError;
//! # use std::time::Duration;
//!
//! // First, let's define a mocked I/O. Replace this with whatever you need.
//! #[derive(Default)]
//! struct MockIo {
//!     stdout: Vec<u8>,
//! }
//!
//! impl run::OsFacade for MockIo {
//!     fn path_exists(&self, path: &str) -> bool {
//!         path == "checks.json" || path == "index.html"
//!     }
//!
//!     fn read_file(&self, path: &str) -> std::io::Result<String> {
//!         match path {
//!             "checks.json" => Ok(r#"["h1", "div#applicake"]"#.to_string()),
//!             _ => Ok("<html><h1>Hi</h1></html>".to_string()),
//!         }
//!     }
//!
//!     fn fetch_url(&self, _url: &str, _timeout: Option<Duration>) -> Result<String, FetchError> {
//!         unimplemented!("this example only reads files")
//!     }
//!
//!     fn stdout(&mut self) -> impl std::io::Write {
//!         &mut self.stdout
//!     }
//!
//!     fn write_error(&mut self, err: run::Error) {
//!         println!("{err}")
//!     }
//! }
//!
//! // Now, use it:
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut os_facade = MockIo::default();
//! let success = run::run(&run::RunOptions::default(), &mut os_facade);
//! let stdout_text = String::from_utf8(os_facade.stdout)?;
//!
//! assert!(success);
//! assert_eq!(stdout_text, "{\n    \"div#applicake\": false,\n    \"h1\": true\n}\n");
//! #
//! #     Ok(())
//! # }
//! ```
mod cli;
mod run_main;

pub use cli::*;
pub use run_main::*;
