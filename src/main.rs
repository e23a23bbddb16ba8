//! gdf CLI - list Google Drive files whose names contain the given words.

use std::ffi::OsString;
use std::io::{self, Write};
use std::iter;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gdrive_find::{format_listing, Authenticator, Config, DriveClient, DriveError, SearchCriteria};

const USAGE: &str = "error: no search criteria specified.\nUsage:\n\t$ gdf <string or strings>\n\n";

/// Find files in Google Drive whose names contain the given words.
#[derive(Parser, Debug)]
#[command(name = "gdf")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Words to search for; joined with single spaces.
    terms: Vec<String>,
}

impl Cli {
    /// Parse a full argument list, program name first.
    ///
    /// An escape `--` is inserted after the program name, so every later
    /// argument (a literal `--` included) is taken as a search term.
    fn try_parse_terms<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args = args.into_iter().map(Into::into);
        let program = args.next().unwrap_or_else(|| OsString::from("gdf"));

        Cli::try_parse_from(
            iter::once(program)
                .chain(iter::once(OsString::from("--")))
                .chain(args),
        )
    }
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::try_parse_terms(std::env::args_os()).unwrap_or_else(|e| e.exit());
    init_tracing();

    let Some(criteria) = SearchCriteria::from_args(&cli.terms) else {
        print!("{}", USAGE);
        return ExitCode::SUCCESS;
    };

    match run(&criteria, &Config::from_env()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(kind) = err.downcast_ref::<DriveError>().map(DriveError::kind) {
                debug!(?kind, "search aborted");
            }
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(criteria: &SearchCriteria, config: &Config) -> Result<()> {
    let credentials = gdrive_find::load_credentials(&config.credentials_path)
        .with_context(|| format!("reading {}", config.credentials_path.display()))?;

    let auth = Authenticator::from_json(&credentials, config)
        .context("creating authenticated http client")?;
    debug!(issuer = auth.client_email(), subject = auth.subject(), "authenticator ready");

    let client = DriveClient::new(auth, config);
    let result = client
        .search(criteria)
        .await
        .context("listing files in Google Drive")?;

    let listing = format_listing(&result.files, chrono::Utc::now())
        .context("converting last modified time")?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(listing.as_bytes())?;
    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrase(args: &[&str]) -> Option<String> {
        let cli = Cli::try_parse_terms(iter::once("gdf").chain(args.iter().copied())).unwrap();
        SearchCriteria::from_args(&cli.terms).map(|c| c.phrase().to_string())
    }

    #[test]
    fn test_no_arguments() {
        assert_eq!(phrase(&[]), None);
    }

    #[test]
    fn test_terms_joined() {
        assert_eq!(
            phrase(&["Queen", "Elizabeth", "II"]).as_deref(),
            Some("Queen Elizabeth II")
        );
    }

    #[test]
    fn test_double_dash_is_a_term() {
        assert_eq!(phrase(&["--"]).as_deref(), Some("--"));
        assert_eq!(phrase(&["--", "foo"]).as_deref(), Some("-- foo"));
        assert_eq!(phrase(&["foo", "--", "bar"]).as_deref(), Some("foo -- bar"));
        assert_eq!(phrase(&["--", "--"]).as_deref(), Some("-- --"));
    }

    #[test]
    fn test_flag_like_words_are_terms() {
        assert_eq!(phrase(&["--help"]).as_deref(), Some("--help"));
        assert_eq!(phrase(&["-V", "x"]).as_deref(), Some("-V x"));
    }
}
