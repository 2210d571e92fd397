//! JSONL session log viewer
//!
//! Each input line is a JSON object with a `type` of `user`, `assistant`,
//! `tool_use` or `summary`. Lines that fail to parse, are not UTF-8 or
//! carry another type are skipped.

use std::io::BufRead;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;

use crate::error::CliResult;
use crate::output::Reporter;

/// Longest assistant text shown before truncation, in characters
pub const TEXT_LIMIT: usize = 300;

/// Longest tool input shown, in characters
pub const INPUT_LIMIT: usize = 100;

/// Formats an ISO-8601 timestamp as `[YYYY-MM-DD HH:MM:SS] `.
///
/// The time is shown in the offset it was written in.
#[must_use]
pub fn time_prefix(timestamp: &str) -> Option<String> {
    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(format!("[{}] ", dt.format(FORMAT)));
    }
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| format!("[{}] ", dt.format(FORMAT)))
}

/// Cuts `text` to `limit` characters, marking the cut with `...`
#[must_use]
pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

fn text_items(content: &Value) -> impl Iterator<Item = &str> {
    content
        .as_array()
        .into_iter()
        .flatten()
        .filter(|item| item.get("type").and_then(Value::as_str) == Some("text"))
        .map(|item| item.get("text").and_then(Value::as_str).unwrap_or_default())
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Renders one log line; `None` means the line is skipped.
///
/// The first rendered line is always blank, separating records.
#[must_use]
pub fn render_line(line: &str) -> Option<Vec<String>> {
    let record: Value = serde_json::from_str(line).ok()?;
    let kind = record.get("type")?.as_str()?;

    let prefix = match record.get("timestamp").and_then(Value::as_str) {
        Some(ts) if !ts.is_empty() => time_prefix(ts)?,
        _ => String::new(),
    };

    let content = record.get("message").and_then(|m| m.get("content"));
    let mut out = vec![String::new()];

    match kind {
        "user" => {
            out.push(format!("{prefix}USER:"));
            match content {
                Some(c @ Value::Array(_)) => out.extend(text_items(c).map(str::to_string)),
                Some(c) => out.push(value_text(c)),
                None => out.push(String::new()),
            }
        }
        "assistant" => {
            out.push(format!("{prefix}CLAUDE:"));
            match content {
                Some(c @ Value::Array(_)) => {
                    out.extend(text_items(c).map(|t| truncate(t, TEXT_LIMIT)));
                }
                Some(c) => out.push(truncate(&value_text(c), TEXT_LIMIT)),
                None => {}
            }
        }
        "tool_use" => {
            let name = record
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("Unknown");
            let input = record
                .get("input")
                .map_or_else(|| "{}".to_string(), Value::to_string);
            let shown: String = input.chars().take(INPUT_LIMIT).collect();
            out.push(format!("{prefix}TOOL: {name}"));
            out.push(format!("Input: {shown}..."));
        }
        "summary" => {
            let summary = record.get("summary").map(value_text).unwrap_or_default();
            out.push(format!("{prefix}SUMMARY: {summary}"));
        }
        other => {
            tracing::trace!(kind = other, "skipping record");
            return None;
        }
    }

    Some(out)
}

/// A rendered session log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionView {
    /// Output lines
    pub lines: Vec<String>,
    /// Non-blank input lines that produced no output
    pub skipped: usize,
}

/// Renders every line of a session log
pub fn render<R: BufRead>(reader: R) -> CliResult<SessionView> {
    let mut view = SessionView::default();
    for raw in reader.split(b'\n') {
        let raw = raw?;
        let Ok(line) = std::str::from_utf8(&raw) else {
            tracing::trace!(len = raw.len(), "skipping line that is not UTF-8");
            view.skipped += 1;
            continue;
        };
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        match render_line(line) {
            Some(lines) => view.lines.extend(lines),
            None => view.skipped += 1,
        }
    }
    tracing::debug!(skipped = view.skipped, "session rendered");
    Ok(view)
}

/// Prints a session log file
pub fn run(path: &Path, reporter: &Reporter) -> CliResult<()> {
    tracing::info!(path = %path.display(), "viewing session");
    let file = std::fs::File::open(path)?;
    let view = render(std::io::BufReader::new(file))?;
    for line in &view.lines {
        reporter.line(line);
    }
    if view.skipped > 0 {
        reporter.warning(&format!("skipped {} unreadable line(s)", view.skipped));
    }
    Ok(())
}
