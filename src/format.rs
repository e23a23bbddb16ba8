//! Plain-text rendering of search results.
//!
//! Rendering takes "now" as an argument, so the same input always produces
//! the same bytes.

use chrono::{DateTime, Utc};

use crate::error::{DriveError, Result};
use crate::models::FileMetadata;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 12 * MONTH;
const LONG_TIME: i64 = 37 * YEAR;

/// Format bytes into human-readable size.
///
/// Binary scaling; one decimal below ten units, none above.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if value < 10.0 {
        format!("{:.1} {}", value, UNITS[unit])
    } else {
        format!("{:.0} {}", value, UNITS[unit])
    }
}

/// Describe `then` relative to `now` ("3 days ago", "2 hours from now").
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let mut secs = (now - then).num_seconds();
    let suffix = if secs < 0 {
        secs = -secs;
        "from now"
    } else {
        "ago"
    };

    let phrase = match secs {
        0 => return "now".to_string(),
        1 => "1 second".to_string(),
        s if s < MINUTE => format!("{} seconds", s),
        s if s < 2 * MINUTE => "1 minute".to_string(),
        s if s < HOUR => format!("{} minutes", s / MINUTE),
        s if s < 2 * HOUR => "1 hour".to_string(),
        s if s < DAY => format!("{} hours", s / HOUR),
        s if s < 2 * DAY => "1 day".to_string(),
        s if s < WEEK => format!("{} days", s / DAY),
        s if s < 2 * WEEK => "1 week".to_string(),
        s if s < MONTH => format!("{} weeks", s / WEEK),
        s if s < 2 * MONTH => "1 month".to_string(),
        s if s < YEAR => format!("{} months", s / MONTH),
        s if s < 18 * MONTH => "1 year".to_string(),
        s if s < 2 * YEAR => "2 years".to_string(),
        s if s < LONG_TIME => format!("{} years", s / YEAR),
        _ => return format!("a long while {}", suffix),
    };

    format!("{} {}", phrase, suffix)
}

/// Parse the RFC 3339 modification time of a file.
pub fn modified_at(file: &FileMetadata) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&file.modified_time)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| DriveError::InvalidTimestamp {
            name: file.name.clone(),
            value: file.modified_time.clone(),
            source,
        })
}

/// One listing line, without the trailing newline.
pub fn format_line(file: &FileMetadata, now: DateTime<Utc>) -> Result<String> {
    let modified = modified_at(file)?;
    let size = if file.is_folder() {
        "folder".to_string()
    } else {
        format_size(file.size.unwrap_or(0))
    };

    Ok(format!(
        "|{:>8} |{:>14} | {}",
        size,
        format_relative(modified, now),
        file.name
    ))
}

/// Render every file in the order given, followed by the count.
///
/// Fails on the first unparsable timestamp without producing any output.
pub fn format_listing(files: &[FileMetadata], now: DateTime<Utc>) -> Result<String> {
    if files.is_empty() {
        return Ok("0 files found.\n".to_string());
    }

    let mut out = String::new();
    for file in files {
        out.push_str(&format_line(file, now)?);
        out.push('\n');
    }
    out.push_str(&format!("{} files found.\n", files.len()));
    Ok(out)
}
