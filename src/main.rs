use clap::Parser;
use html_grader::fetch::{FetchError, Fetcher};
use html_grader::run::{CliOptions, Error, OsFacade};
use std::io;
use std::io::stdout;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "HTML_GRADER_LOG";

struct RealOs;

#[doc(hidden)]
impl OsFacade for RealOs {
    fn path_exists(&self, path: &str) -> bool {
        Path::new(path).exists()
    }

    fn read_file(&self, path: &str) -> io::Result<String> {
        let bytes = std::fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn fetch_url(&self, url: &str, timeout: Option<Duration>) -> Result<String, FetchError> {
        Fetcher::new(timeout)?.get(url)
    }

    fn stdout(&mut self) -> impl io::Write {
        stdout().lock()
    }

    fn write_error(&mut self, err: Error) {
        println!("{err}")
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = CliOptions::parse();

    if html_grader::run::run(&cli.into(), &mut RealOs) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
