use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

use crate::io::lock::try_lock;

/// Maximum size of the recovery log before inline trimming (1 MB).
const MAX_LOG_SIZE: u64 = 1_048_576;

/// Default number of days before entries are prunable.
pub const PRUNE_AGE_DAYS: i64 = 30;

/// Self-documenting header written at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- daypad recovery log: append-only error recovery data
     Days whose stored data could not be read, and edits that could
     not be written, are kept here.
     View with: dp recovery
     Prune old entries: dp recovery prune
     Safe to delete if empty or stale. -->

---
";

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Category of a recovery entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryCategory {
    /// A stored value (or the whole data file) could not be decoded
    Corrupt,
    /// A write to the data file failed
    Write,
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Corrupt => write!(f, "corrupt"),
            RecoveryCategory::Write => write!(f, "write"),
        }
    }
}

impl RecoveryCategory {
    pub fn parse_category(s: &str) -> Option<Self> {
        match s {
            "corrupt" => Some(RecoveryCategory::Corrupt),
            "write" => Some(RecoveryCategory::Write),
            _ => None,
        }
    }
}

/// A single entry in the recovery log.
#[derive(Debug, Clone)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub category: RecoveryCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

impl RecoveryEntry {
    pub fn now(category: RecoveryCategory, description: impl Into<String>) -> Self {
        RecoveryEntry {
            timestamp: Utc::now(),
            category,
            description: description.into(),
            fields: Vec::new(),
            body: String::new(),
        }
    }

    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.push((key.to_string(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

// ---------------------------------------------------------------------------
// Path helper
// ---------------------------------------------------------------------------

/// Return the path to the recovery log file in `dir`.
pub fn recovery_log_path(dir: &Path) -> PathBuf {
    dir.join(".recovery.log")
}

// ---------------------------------------------------------------------------
// Atomic file write
// ---------------------------------------------------------------------------

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry formatting
// ---------------------------------------------------------------------------

impl RecoveryEntry {
    /// Format this entry as a markdown block for the recovery log.
    fn to_markdown(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "## {} - {}: {}\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.description,
        ));
        out.push('\n');

        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }

        if !self.body.is_empty() {
            out.push('\n');
            out.push_str("```text\n");
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }

        out.push('\n');
        out.push_str("---\n");
        out
    }

    /// Format as human-readable raw markdown for display.
    pub fn to_display_markdown(&self) -> String {
        self.to_markdown()
    }

    /// Serialize to JSON value for `dp recovery --json`.
    pub fn to_json(&self) -> serde_json::Value {
        let fields: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();

        serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            "category": self.category.to_string(),
            "description": self.description,
            "fields": fields,
            "body": self.body,
        })
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Append a recovery entry to the log. Errors are swallowed and printed to stderr.
pub fn log_recovery(dir: &Path, entry: RecoveryEntry) {
    if let Err(e) = log_recovery_inner(dir, entry) {
        eprintln!("warning: could not write to recovery log: {}", e);
    }
}

fn log_recovery_inner(dir: &Path, entry: RecoveryEntry) -> io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let path = recovery_log_path(dir);

    if let Ok(meta) = std::fs::metadata(&path)
        && meta.len() > MAX_LOG_SIZE
    {
        try_inline_trim(&path);
    }

    let needs_header = std::fs::metadata(&path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;

    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }

    file.write_all(entry.to_markdown().as_bytes())?;

    Ok(())
}

/// Drop entries older than the prune age once the log exceeds MAX_LOG_SIZE.
/// Skipped when another process holds the log.
fn try_inline_trim(path: &Path) {
    let file = match OpenOptions::new().read(true).write(true).open(path) {
        Ok(f) => f,
        Err(_) => return,
    };
    if try_lock(&file).is_err() {
        return;
    }

    let mut content = String::new();
    let mut reader = io::BufReader::new(&file);
    if reader.read_to_string(&mut content).is_err() {
        return;
    }

    let cutoff = Utc::now() - chrono::Duration::days(PRUNE_AGE_DAYS);
    let trimmed = prune_entries_before(&content, &cutoff);

    if trimmed.len() < content.len()
        && let Ok(mut f) = File::create(path)
    {
        let _ = f.write_all(trimmed.as_bytes());
    }
}

// ---------------------------------------------------------------------------
// Reading entries
// ---------------------------------------------------------------------------

/// Read recovery entries from the log file, most recent first.
pub fn read_recovery_entries(dir: &Path, limit: Option<usize>) -> Vec<RecoveryEntry> {
    let path = recovery_log_path(dir);
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };

    let mut entries = parse_entries(&content);

    // Entries are parsed oldest-first
    if let Some(n) = limit {
        let skip = entries.len().saturating_sub(n);
        entries = entries.into_iter().skip(skip).collect();
    }

    entries.reverse();
    entries
}

/// Parse all entries from the log content string.
fn parse_entries(content: &str) -> Vec<RecoveryEntry> {
    let mut entries = Vec::new();
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        let Some(header) = line.strip_prefix("## ") else {
            continue;
        };
        let Some((timestamp, category, description)) = parse_entry_header(header) else {
            continue;
        };

        let mut fields = Vec::new();
        let mut body = String::new();
        let mut in_code_block = false;

        for line in lines.by_ref() {
            if line == "---" && !in_code_block {
                break;
            }

            if in_code_block {
                if line == "```" {
                    in_code_block = false;
                } else {
                    if !body.is_empty() {
                        body.push('\n');
                    }
                    body.push_str(line);
                }
                continue;
            }

            if line.starts_with("```") {
                in_code_block = true;
                continue;
            }

            if let Some((key, value)) = line.trim().split_once(": ") {
                fields.push((key.to_string(), value.to_string()));
            }
        }

        entries.push(RecoveryEntry {
            timestamp,
            category,
            description,
            fields,
            body,
        });
    }

    entries
}

/// Parse an entry header: `<timestamp> - <category>: <description>`
fn parse_entry_header(header: &str) -> Option<(DateTime<Utc>, RecoveryCategory, String)> {
    let (timestamp_str, rest) = header.split_once(" - ")?;
    let timestamp = DateTime::parse_from_rfc3339(timestamp_str)
        .ok()?
        .with_timezone(&Utc);

    let (category_str, description) = rest.split_once(": ")?;
    let category = RecoveryCategory::parse_category(category_str)?;

    Some((timestamp, category, description.to_string()))
}

// ---------------------------------------------------------------------------
// Pruning
// ---------------------------------------------------------------------------

/// Prune entries from the recovery log.
/// Returns the number of entries removed.
pub fn prune_recovery(dir: &Path, before: Option<DateTime<Utc>>, all: bool) -> io::Result<usize> {
    let path = recovery_log_path(dir);
    if !path.exists() {
        return Ok(0);
    }

    let file = OpenOptions::new().read(true).write(true).open(&path)?;
    let mut locked = false;
    for _ in 0..10 {
        if try_lock(&file).is_ok() {
            locked = true;
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(100));
    }
    if !locked {
        return Err(io::Error::new(
            io::ErrorKind::WouldBlock,
            "recovery log is in use, try again later",
        ));
    }

    let content = std::fs::read_to_string(&path)?;
    let original_count = parse_entries(&content).len();

    if all {
        std::fs::write(&path, FILE_HEADER)?;
        return Ok(original_count);
    }

    let cutoff = before.unwrap_or_else(|| Utc::now() - chrono::Duration::days(PRUNE_AGE_DAYS));
    let trimmed = prune_entries_before(&content, &cutoff);
    let new_count = parse_entries(&trimmed).len();

    std::fs::write(&path, &trimmed)?;
    Ok(original_count - new_count)
}

/// Remove entries with timestamps before `cutoff` from the raw content.
/// Preserves the file header.
fn prune_entries_before(content: &str, cutoff: &DateTime<Utc>) -> String {
    let mut result = String::new();
    let mut current_entry = String::new();
    let mut current_timestamp: Option<DateTime<Utc>> = None;
    let mut in_header = true;

    for line in content.lines() {
        if in_header {
            result.push_str(line);
            result.push('\n');
            if line == "---" {
                in_header = false;
            }
            continue;
        }

        if let Some(stripped) = line.strip_prefix("## ") {
            if let Some(ts) = current_timestamp
                && ts >= *cutoff
            {
                result.push_str(&current_entry);
            }
            current_entry.clear();
            current_timestamp = parse_entry_header(stripped).map(|(ts, _, _)| ts);
        }
        current_entry.push_str(line);
        current_entry.push('\n');
    }

    if let Some(ts) = current_timestamp
        && ts >= *cutoff
    {
        result.push_str(&current_entry);
    }

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
