use crate::check::InvalidSelectors;
use clap::Parser;
use derive_builder::Builder;
use std::time::Duration;

pub const CHECKS_FILE_DEFAULT: &str = "checks.json";
pub const HTML_FILE_DEFAULT: &str = "index.html";

macro_rules! create_options_structs {
    (
        $(
            $(#[$meta:meta])*
            clap $clap:tt
            pub $name:ident : $ty:ty
        ),* $(,)?
    ) => {
        #[derive(Clone, Default, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Parser)]
        #[command(version, about, long_about = None)]
        #[doc(hidden)]
        pub struct CliOptions {
            $(
            $(#[$meta])*
            #[arg$clap]
            pub(crate) $name: $ty,
            )*
        }

        /// Options analogous to the html-grader CLI's switches.
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Builder)]
        #[builder(default)]
        pub struct RunOptions {
            $(
            $(#[$meta])*
            pub $name: $ty,
            )*
        }

        impl From<CliOptions> for RunOptions {
            fn from(value: CliOptions) -> Self {
                Self {
                    $($name: value.$name,)*
                }
            }
        }
    };
}

create_options_structs! {
    /// Path to the checks file: a JSON array of CSS selectors.
    clap(long, short, value_name = "CHECK_FILE", default_value = CHECKS_FILE_DEFAULT)
    pub checks: String,

    /// Path to the HTML file to check [default: index.html]. If --url is given, this file isn't read, but it still
    /// has to exist if named explicitly.
    clap(long, short, value_name = "HTML_FILE")
    pub file: Option<String>,

    /// URL of a remote HTML document to check, instead of a local file.
    clap(long, short, value_name = "URL")
    pub url: Option<String>,

    /// Give up on fetching --url after this many seconds. By default, waits indefinitely.
    clap(long = "timeout", value_name = "SECONDS")
    pub timeout_secs: Option<u64>,

    /// What to do with a selector that can't be parsed: fail the whole run, or report that selector as absent.
    clap(long, value_enum, default_value_t = InvalidSelectors::Fail)
    pub invalid_selectors: InvalidSelectors,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            checks: CHECKS_FILE_DEFAULT.to_string(),
            file: None,
            url: None,
            timeout_secs: None,
            invalid_selectors: InvalidSelectors::Fail,
        }
    }
}

impl RunOptions {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
