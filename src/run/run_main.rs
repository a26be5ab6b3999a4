use crate::check::{check, Checks, HtmlDoc, MalformedChecks, SelectorSyntaxError};
use crate::fetch::FetchError;
use crate::run::{RunOptions, HTML_FILE_DEFAULT};
use std::io;
use std::io::Write;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} does not exist. Exiting.")]
    MissingFile(String),

    #[error("{path} is not a valid checks file: {source}")]
    MalformedChecks { path: String, source: MalformedChecks },

    #[error("{source} while reading file {path:?}")]
    FileRead { path: String, source: io::Error },

    #[error("failed on url: {url} ({source})")]
    Fetch { url: String, source: FetchError },

    #[error(transparent)]
    SelectorSyntax(#[from] SelectorSyntaxError),

    #[error("couldn't write results: {0}")]
    Output(io::Error),
}

/// Where the HTML document comes from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Source<'a> {
    File(&'a str),
    Url(&'a str),
}

impl RunOptions {
    pub fn source(&self) -> Source<'_> {
        match &self.url {
            Some(url) => Source::Url(url),
            None => Source::File(self.file.as_deref().unwrap_or(HTML_FILE_DEFAULT)),
        }
    }
}

pub trait OsFacade {
    fn path_exists(&self, path: &str) -> bool;
    fn read_file(&self, path: &str) -> io::Result<String>;
    fn fetch_url(&self, url: &str, timeout: Option<Duration>) -> Result<String, FetchError>;
    fn stdout(&mut self) -> impl Write;
    fn write_error(&mut self, err: Error);

    fn require_exists(&self, path: &str) -> Result<(), Error> {
        if self.path_exists(path) {
            Ok(())
        } else {
            Err(Error::MissingFile(path.to_string()))
        }
    }

    fn read_existing_file(&self, path: &str) -> Result<String, Error> {
        self.require_exists(path)?;
        self.read_file(path).map_err(|source| Error::FileRead {
            path: path.to_string(),
            source,
        })
    }
}

/// Runs html-grader end to end.
///
/// This reads the checks file named by [`RunOptions::checks`], loads the HTML document from either
/// [`RunOptions::url`] or [`RunOptions::file`], checks it, and writes the results as JSON to the [`OsFacade`]'s
/// stdout. Any failure is reported through [`OsFacade::write_error`] instead, and nothing is written to stdout.
///
/// An explicitly given [`RunOptions::file`] must exist even when [`RunOptions::url`] is set, in which case it's
/// otherwise unused.
///
/// Returns whether the run succeeded. Note that a run where some selectors matched nothing still succeeds.
pub fn run(options: &RunOptions, os: &mut impl OsFacade) -> bool {
    match run_or_error(options, os) {
        Ok(()) => true,
        Err(err) => {
            os.write_error(err);
            false
        }
    }
}

fn run_or_error(options: &RunOptions, os: &mut impl OsFacade) -> Result<(), Error> {
    let checks_path = &options.checks;
    os.require_exists(checks_path)?;
    if let Some(file) = &options.file {
        os.require_exists(file)?;
    }

    let checks_json = os.read_existing_file(checks_path)?;
    let checks = Checks::from_json(&checks_json).map_err(|source| Error::MalformedChecks {
        path: checks_path.to_string(),
        source,
    })?;
    debug!(path = checks_path.as_str(), count = checks.len(), "loaded checks");

    let html = match options.source() {
        Source::File(path) => os.read_existing_file(path)?,
        Source::Url(url) => os.fetch_url(url, options.timeout()).map_err(|source| Error::Fetch {
            url: url.to_string(),
            source,
        })?,
    };
    debug!(source = ?options.source(), bytes = html.len(), "read document");

    let doc = HtmlDoc::parse(&html);
    let results = check(&doc, &checks, options.invalid_selectors)?;
    debug!(passed = results.passed(), failed = results.failed(), "checked document");

    results.write_pretty(os.stdout()).map_err(Error::Output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use crate::run::RunOptionsBuilder;
    use crate::util::utils_for_test::*;
    use reqwest::StatusCode;
    use std::cell::Cell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MockOs {
        files: HashMap<&'static str, &'static str>,
        urls: HashMap<&'static str, &'static str>,
        fetched_with: Cell<Option<Option<Duration>>>,
        stdout: Vec<u8>,
        errors: Vec<Error>,
    }

    impl MockOs {
        fn with_files(files: &[(&'static str, &'static str)]) -> Self {
            Self {
                files: files.iter().copied().collect(),
                ..Self::default()
            }
        }

        fn stdout_str(&self) -> &str {
            std::str::from_utf8(&self.stdout).unwrap()
        }
    }

    impl OsFacade for MockOs {
        fn path_exists(&self, path: &str) -> bool {
            self.files.contains_key(path)
        }

        fn read_file(&self, path: &str) -> io::Result<String> {
            match self.files.get(path) {
                Some(contents) => Ok(contents.to_string()),
                None => Err(io::Error::new(io::ErrorKind::NotFound, path)),
            }
        }

        fn fetch_url(&self, url: &str, timeout: Option<Duration>) -> Result<String, FetchError> {
            self.fetched_with.set(Some(timeout));
            match self.urls.get(url) {
                Some(body) => Ok(body.to_string()),
                None => Err(FetchError::Status(StatusCode::NOT_FOUND)),
            }
        }

        fn stdout(&mut self) -> impl Write {
            &mut self.stdout
        }

        fn write_error(&mut self, err: Error) {
            self.errors.push(err)
        }
    }

    #[test]
    fn default_paths() {
        let mut os = MockOs::with_files(&[("checks.json", r#"["h1"]"#), ("index.html", "<h1>Hi</h1>")]);
        assert!(run(&RunOptions::default(), &mut os));
        assert_eq!(os.stdout_str(), "{\n    \"h1\": true\n}\n");
        assert!(os.errors.is_empty());
    }

    #[test]
    fn missing_checks_file() {
        let mut os = MockOs::with_files(&[("index.html", "<h1>Hi</h1>")]);
        assert!(!run(&RunOptions::default(), &mut os));
        assert_eq!(os.stdout_str(), "");
        let err = get_only(os.errors);
        unwrap!(&err, Error::MissingFile(path));
        assert_eq!(path, "checks.json");
        assert_eq!(err.to_string(), "checks.json does not exist. Exiting.");
    }

    #[test]
    fn missing_html_file() {
        let mut os = MockOs::with_files(&[("checks.json", "[]")]);
        unwrap!(RunOptionsBuilder::default().file(Some("missing.html".to_string())).build(), Ok(options));
        assert!(!run(&options, &mut os));
        assert_eq!(os.stdout_str(), "");
        let err = get_only(os.errors);
        assert_eq!(err.to_string(), "missing.html does not exist. Exiting.");
    }

    #[test]
    fn html_file_not_needed_for_url() {
        let mut os = MockOs::with_files(&[("checks.json", r#"["p"]"#)]);
        os.urls.insert("http://example.com/", "<p>remote</p>");
        unwrap!(
            RunOptionsBuilder::default().url(Some("http://example.com/".to_string())).build(),
            Ok(options)
        );
        assert!(run(&options, &mut os));
        assert_eq!(os.stdout_str(), "{\n    \"p\": true\n}\n");
    }

    #[test]
    fn explicit_html_file_must_exist_with_url() {
        let mut os = MockOs::with_files(&[("checks.json", r#"["h1"]"#)]);
        os.urls.insert("http://x/", "<h1>Hi</h1>");
        unwrap!(
            RunOptionsBuilder::default()
                .file(Some("missing.html".to_string()))
                .url(Some("http://x/".to_string()))
                .build(),
            Ok(options)
        );
        assert!(!run(&options, &mut os));
        assert_eq!(os.stdout_str(), "");
        assert_eq!(os.fetched_with.get(), None);
        let err = get_only(os.errors);
        assert_eq!(err.to_string(), "missing.html does not exist. Exiting.");
    }

    #[test]
    fn missing_checks_file_reported_before_html_file() {
        let mut os = MockOs::default();
        unwrap!(RunOptionsBuilder::default().file(Some("missing.html".to_string())).build(), Ok(options));
        assert!(!run(&options, &mut os));
        let err = get_only(os.errors);
        assert_eq!(err.to_string(), "checks.json does not exist. Exiting.");
    }

    #[test]
    fn timeout_passed_to_fetch() {
        let mut os = MockOs::with_files(&[("checks.json", "[]")]);
        os.urls.insert("http://x/", "");
        unwrap!(
            RunOptionsBuilder::default()
                .url(Some("http://x/".to_string()))
                .timeout_secs(Some(7))
                .build(),
            Ok(options)
        );
        assert!(run(&options, &mut os));
        assert_eq!(os.fetched_with.get(), Some(Some(Duration::from_secs(7))));
    }

    #[test]
    fn no_timeout_by_default() {
        let mut os = MockOs::with_files(&[("checks.json", "[]")]);
        os.urls.insert("http://x/", "");
        unwrap!(RunOptionsBuilder::default().url(Some("http://x/".to_string())).build(), Ok(options));
        assert!(run(&options, &mut os));
        assert_eq!(os.fetched_with.get(), Some(None));
    }

    #[test]
    fn url_overrides_file() {
        let mut os = MockOs::with_files(&[("checks.json", r#"["p", "h1"]"#), ("index.html", "<h1>local</h1>")]);
        os.urls.insert("http://example.com/", "<p>remote</p>");
        unwrap!(
            RunOptionsBuilder::default().url(Some("http://example.com/".to_string())).build(),
            Ok(options)
        );
        assert!(run(&options, &mut os));
        assert_eq!(os.stdout_str(), "{\n    \"h1\": false,\n    \"p\": true\n}\n");
    }

    #[test]
    fn failed_fetch() {
        let mut os = MockOs::with_files(&[("checks.json", r#"["p"]"#)]);
        unwrap!(
            RunOptionsBuilder::default().url(Some("http://bad-host.invalid".to_string())).build(),
            Ok(options)
        );
        assert!(!run(&options, &mut os));
        assert_eq!(os.stdout_str(), "");
        let err = get_only(os.errors);
        assert_eq!(
            err.to_string(),
            "failed on url: http://bad-host.invalid (server responded with HTTP 404 Not Found)"
        );
    }

    #[test]
    fn malformed_checks_file() {
        let mut os = MockOs::with_files(&[("checks.json", "{not json"), ("index.html", "<h1>Hi</h1>")]);
        assert!(!run(&RunOptions::default(), &mut os));
        let err = get_only(os.errors);
        unwrap!(&err, Error::MalformedChecks { path, .. });
        assert_eq!(path, "checks.json");
        assert!(err.to_string().starts_with("checks.json is not a valid checks file: "));
    }

    #[test]
    fn malformed_checks_file_reported_before_fetch() {
        let mut os = MockOs::with_files(&[("checks.json", r#"[1, 2]"#)]);
        unwrap!(
            RunOptionsBuilder::default().url(Some("http://unreachable/".to_string())).build(),
            Ok(options)
        );
        assert!(!run(&options, &mut os));
        unwrap!(get_only(os.errors), Error::MalformedChecks { .. });
    }

    #[test]
    fn invalid_selector_fails_by_default() {
        let mut os = MockOs::with_files(&[("checks.json", r#"["h1", "h1[["]"#), ("index.html", "<h1>Hi</h1>")]);
        assert!(!run(&RunOptions::default(), &mut os));
        assert_eq!(os.stdout_str(), "");
        let err = get_only(os.errors);
        assert_eq!(err.to_string(), "invalid selector: h1[[");
    }

    #[test]
    fn invalid_selector_absent() {
        let mut os = MockOs::with_files(&[("checks.json", r#"["h1", "h1[["]"#), ("index.html", "<h1>Hi</h1>")]);
        unwrap!(
            RunOptionsBuilder::default().invalid_selectors(crate::check::InvalidSelectors::Absent).build(),
            Ok(options)
        );
        assert!(run(&options, &mut os));
        assert_eq!(os.stdout_str(), "{\n    \"h1\": true,\n    \"h1[[\": false\n}\n");
    }

    #[test]
    fn unreadable_file() {
        struct ExistsButUnreadable;
        impl OsFacade for ExistsButUnreadable {
            fn path_exists(&self, _path: &str) -> bool {
                true
            }
            fn read_file(&self, _path: &str) -> io::Result<String> {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"))
            }
            fn fetch_url(&self, _url: &str, _timeout: Option<Duration>) -> Result<String, FetchError> {
                unreachable!()
            }
            fn stdout(&mut self) -> impl Write {
                io::sink()
            }
            fn write_error(&mut self, err: Error) {
                assert_eq!(err.to_string(), r#"permission denied while reading file "checks.json""#);
            }
        }
        assert!(!run(&RunOptions::default(), &mut ExistsButUnreadable));
    }

    #[test]
    fn source_selection() {
        let options = RunOptions::default();
        assert_eq!(options.source(), Source::File("index.html"));
        unwrap!(RunOptionsBuilder::default().url(Some("http://x/".to_string())).build(), Ok(options));
        assert_eq!(options.source(), Source::Url("http://x/"));
    }
}
