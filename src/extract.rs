// ABOUTME: Recovers transcript entries from previously exported markdown
// ABOUTME: Partial inverse of convert.rs used to preserve evicted cache data

use crate::model::TranscriptEntry;
use once_cell::sync::Lazy;
use regex::Regex;

pub const TRANSCRIPT_HEADING: &str = "## Transcript";

/// Matches rendered transcript entries: `**Speaker:** text` terminated
/// by a blank line, a single trailing newline, or end of input.
static TRANSCRIPT_ENTRY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(\w+):\*\* (.+?)(?:\n\n|\n$|$)").unwrap());

/// Extracts transcript entries from an existing markdown export.
///
/// Only the transcript section is recovered; notes are not. Recovered
/// entries carry only `text` and `source` — timestamps and ids were
/// never written to markdown in the first place. Returns `None` when
/// the text has no transcript section or the section yields no entries;
/// callers treat both the same way.
pub fn extract_transcript(content: &str) -> Option<Vec<TranscriptEntry>> {
    let (_, section) = content.split_once(TRANSCRIPT_HEADING)?;

    let entries: Vec<TranscriptEntry> = TRANSCRIPT_ENTRY_RE
        .captures_iter(section)
        .filter_map(|caps| {
            let text = caps[2].trim();
            if text.is_empty() {
                return None;
            }
            Some(TranscriptEntry {
                text: text.to_string(),
                source: speaker_to_source(&caps[1]),
                ..Default::default()
            })
        })
        .collect();

    if entries.is_empty() {
        None
    } else {
        Some(entries)
    }
}

/// Maps a rendered speaker label back to a source channel. Lossy for
/// labels outside the two well-known ones: the forward mapping
/// uppercased their first character, and this direction lowercases the
/// whole label, so original casing is not recoverable.
pub fn speaker_to_source(speaker: &str) -> String {
    match speaker {
        "Me" => "microphone".to_string(),
        "Them" => "system".to_string(),
        other => other.to_lowercase(),
    }
}
