// ABOUTME: Renders a document and its transcript as canonical markdown
// ABOUTME: Pure and deterministic so unchanged exports can be byte-compared

use crate::model::{Document, TranscriptEntry};
use chrono::NaiveDateTime;

/// Fallback formats for timestamps that RFC3339 parsing rejects.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.3fZ", "%Y-%m-%dT%H:%M:%SZ"];

/// Formats a document and its transcript as markdown.
///
/// Section order is fixed: header block, AI-generated notes (if any),
/// transcript (if any), with a `---` rule between notes and transcript
/// when both are present. Transcript entries whose text trims to
/// nothing are dropped without leaving a gap.
pub fn format_document(doc: &Document, transcript: &[TranscriptEntry]) -> String {
    let title = if doc.title.is_empty() {
        "Untitled"
    } else {
        &doc.title
    };

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("# {}", title));
    lines.push(format!("Date: {}", format_date(&doc.created_at)));
    lines.push(format!("Meeting ID: {}", doc.id));
    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(String::new());

    let notes = doc.notes();
    let has_notes = !notes.trim().is_empty();

    if has_notes {
        lines.push("## AI-Generated Notes".to_string());
        lines.push(String::new());
        lines.push(notes.to_string());
        lines.push(String::new());
    }

    if !transcript.is_empty() {
        if has_notes {
            lines.push("---".to_string());
            lines.push(String::new());
        }
        lines.push("## Transcript".to_string());
        lines.push(String::new());

        for entry in transcript {
            let text = entry.text.trim();
            if text.is_empty() {
                continue;
            }
            lines.push(format!("**{}:** {}", source_to_speaker(&entry.source), text));
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

/// Parses an ISO8601-ish timestamp, trying RFC3339 first (which also
/// covers nanosecond precision) and then the explicit Z-suffixed
/// fallback formats. First success wins.
fn parse_timestamp(timestamp: &str) -> Option<NaiveDateTime> {
    if let Ok(t) = chrono::DateTime::parse_from_rfc3339(timestamp) {
        // Render in the timestamp's own offset, not normalized to UTC.
        return Some(t.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(timestamp, fmt).ok())
}

/// Formats a timestamp as "YYYY-MM-DD HH:MM", or "Unknown date" when
/// the input is empty or unparseable.
pub fn format_date(timestamp: &str) -> String {
    if timestamp.is_empty() {
        return "Unknown date".to_string();
    }
    match parse_timestamp(timestamp) {
        Some(t) => t.format("%Y-%m-%d %H:%M").to_string(),
        None => "Unknown date".to_string(),
    }
}

/// Formats a timestamp as "YYYY-MM-DD" for filenames, or
/// "unknown-date" when the input is empty or unparseable.
pub fn format_date_for_filename(timestamp: &str) -> String {
    if timestamp.is_empty() {
        return "unknown-date".to_string();
    }
    match parse_timestamp(timestamp) {
        Some(t) => t.format("%Y-%m-%d").to_string(),
        None => "unknown-date".to_string(),
    }
}

/// Maps a transcript source channel to its rendered speaker label.
pub fn source_to_speaker(source: &str) -> String {
    match source {
        "microphone" => "Me".to_string(),
        "system" => "Them".to_string(),
        "" => "Unknown".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => "Unknown".to_string(),
            }
        }
    }
}
