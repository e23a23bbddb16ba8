//! Tests for the gdf binary: exit codes, stdout and stderr.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

const USAGE: &str = "error: no search criteria specified.\nUsage:\n\t$ gdf <string or strings>\n\n";

fn gdf(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gdf"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("GDF_SUBJECT")
        .output()
        .unwrap()
}

fn stderr_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stderr)
        .lines()
        .map(str::to_string)
        .collect()
}

mod usage {
    use super::*;

    #[test]
    fn no_arguments_prints_usage() {
        let dir = tempdir().unwrap();
        // Would fail the run if it were read.
        fs::write(dir.path().join("credentials.json"), "not valid json").unwrap();

        let output = gdf(dir.path(), &[]);

        assert_eq!(output.status.code(), Some(0));
        assert_eq!(String::from_utf8_lossy(&output.stdout), USAGE);
        assert!(output.stderr.is_empty());
    }
}

mod failures {
    use super::*;

    #[test]
    fn missing_credentials_single_diagnostic() {
        let dir = tempdir().unwrap();

        let output = gdf(dir.path(), &["report"]);

        assert_eq!(output.status.code(), Some(1));
        assert!(output.stdout.is_empty());

        let lines = stderr_lines(&output);
        assert_eq!(lines.len(), 1, "stderr: {:?}", lines);
        assert!(lines[0].starts_with("error: reading credentials.json: "));
        assert_eq!(lines[0].matches("Failed to read credentials file").count(), 1);
        assert_eq!(lines[0].matches("(os error").count(), 1);
    }

    #[test]
    fn malformed_credentials_single_diagnostic() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("credentials.json"), "not valid json").unwrap();

        let output = gdf(dir.path(), &["report"]);

        assert_eq!(output.status.code(), Some(1));
        assert!(output.stdout.is_empty());

        let lines = stderr_lines(&output);
        assert_eq!(lines.len(), 1, "stderr: {:?}", lines);
        assert!(lines[0].starts_with(
            "error: creating authenticated http client: Failed to parse credentials JSON: "
        ));
    }
}

mod terms {
    use super::*;

    #[test]
    fn double_dash_is_searched_not_usage() {
        let dir = tempdir().unwrap();

        for args in [&["--"][..], &["--", "foo"][..], &["--help"][..]] {
            let output = gdf(dir.path(), args);

            // Got as far as loading credentials, so the words were taken as a search.
            assert_eq!(output.status.code(), Some(1), "args: {:?}", args);
            assert!(output.stdout.is_empty(), "args: {:?}", args);
            assert_eq!(stderr_lines(&output).len(), 1, "args: {:?}", args);
        }
    }
}
