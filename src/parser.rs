use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

/// Raw entry from a Claude Code JSONL file
#[derive(Debug, Deserialize)]
pub struct RawEntry {
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
    // Kept loose so an odd assistant payload cannot make the whole line unreadable
    pub message: Option<serde_json::Value>,
    pub snapshot: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct MessageObject {
    /// A plain string or a list of content blocks; blocks are read one by one
    pub content: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotObject {
    #[serde(rename = "trackedFileBackups", default)]
    pub tracked_file_backups: serde_json::Map<String, serde_json::Value>,
}

/// A log record the extractor knows how to read
#[derive(Debug, Clone, PartialEq)]
pub enum MessageRecord {
    User(UserContent),
    Assistant,
    FileHistorySnapshot { tracked_files: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserContent {
    Text(String),
    /// Text of each `text` block, in order; other blocks are dropped
    Blocks(Vec<String>),
    Empty,
}

/// What a single line of a session log turned into
#[derive(Debug, PartialEq)]
pub enum LineOutcome {
    Record(MessageRecord),
    /// Valid JSON whose type is not one we extract from
    Ignored,
    /// Not parseable as a log entry
    Skipped,
}

/// Records loaded from one session log, plus how many lines were dropped
#[derive(Debug, Default)]
pub struct SessionLog {
    pub records: Vec<MessageRecord>,
    pub skipped: usize,
}

/// Classify one line of a JSONL session log
pub fn parse_line(line: &[u8]) -> LineOutcome {
    let entry = match serde_json::from_slice::<RawEntry>(line) {
        Ok(entry) => entry,
        Err(_) => return LineOutcome::Skipped,
    };

    match entry.entry_type.as_deref() {
        Some("user") => {
            let content = entry
                .message
                .and_then(|v| serde_json::from_value::<MessageObject>(v).ok())
                .and_then(|m| m.content)
                .map(user_content)
                .unwrap_or(UserContent::Empty);
            LineOutcome::Record(MessageRecord::User(content))
        }
        Some("assistant") => LineOutcome::Record(MessageRecord::Assistant),
        Some("file-history-snapshot") => {
            let tracked_files = entry
                .snapshot
                .and_then(|v| serde_json::from_value::<SnapshotObject>(v).ok())
                .map(|s| s.tracked_file_backups.into_iter().map(|(path, _)| path).collect())
                .unwrap_or_default();
            LineOutcome::Record(MessageRecord::FileHistorySnapshot { tracked_files })
        }
        _ => LineOutcome::Ignored,
    }
}

fn user_content(content: serde_json::Value) -> UserContent {
    match content {
        serde_json::Value::String(s) => UserContent::Text(s),
        serde_json::Value::Array(items) => {
            UserContent::Blocks(items.iter().filter_map(text_block).collect())
        }
        _ => UserContent::Empty,
    }
}

/// Text of a `{"type": "text"}` block. Anything else in the list is passed over.
fn text_block(item: &serde_json::Value) -> Option<String> {
    let block = item.as_object()?;
    if block.get("type").and_then(|t| t.as_str()) != Some("text") {
        return None;
    }
    match block.get("text") {
        None => Some(String::new()),
        Some(text) => text.as_str().map(str::to_string),
    }
}

/// Parse JSONL content into records, skipping lines that fail to parse
pub fn parse_session_bytes(bytes: &[u8]) -> SessionLog {
    let mut log = SessionLog::default();

    for line in bytes.split(|&b| b == b'\n') {
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        match parse_line(line) {
            LineOutcome::Record(record) => log.records.push(record),
            LineOutcome::Ignored => {}
            LineOutcome::Skipped => log.skipped += 1,
        }
    }

    log
}

/// Load a session log. A log that does not exist is an empty log.
pub fn load_session_log(path: &Path) -> Result<SessionLog> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(SessionLog::default()),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read session log: {}", path.display()))
        }
    };

    let log = parse_session_bytes(&bytes);
    if log.skipped > 0 {
        log::debug!("Skipped {} malformed lines in {}", log.skipped, path.display());
    }

    Ok(log)
}
