// ABOUTME: Serde data models for the Granola cache state
// ABOUTME: Tolerant parsing with defaulted fields and derived content predicates

use serde::Deserialize;
use std::collections::HashMap;

/// One meeting document from the Granola cache.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub notes_markdown: String,
    #[serde(default)]
    pub notes_plain: String,
}

/// A single utterance from a meeting transcript, attributed to a
/// source channel ("microphone" for the local user, "system" for
/// everyone else).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranscriptEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub document_id: String,
    #[serde(default)]
    pub start_timestamp: String,
    #[serde(default)]
    pub end_timestamp: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub is_final: bool,
}

/// The decoded cache snapshot: documents by id, transcript entries by
/// document id. Entry order within a transcript is chronological and
/// is preserved as-is.
#[derive(Debug, Default, Deserialize)]
pub struct CacheState {
    #[serde(default)]
    pub documents: HashMap<String, Document>,
    #[serde(default)]
    pub transcripts: HashMap<String, Vec<TranscriptEntry>>,
}

/// Notes shorter than this are placeholder artifacts from the source
/// app, not real content.
const MIN_NOTES_LEN: usize = 10;

impl Document {
    /// Returns the best available notes content, preferring the richer
    /// markdown form over the plain-text fallback.
    pub fn notes(&self) -> &str {
        if !self.notes_markdown.is_empty() {
            &self.notes_markdown
        } else {
            &self.notes_plain
        }
    }

    /// A document is worth exporting if it has transcript entries, or
    /// notes longer than the placeholder threshold. The two notes
    /// fields are checked independently, not through `notes()`.
    pub fn has_exportable_content(
        &self,
        transcripts: &HashMap<String, Vec<TranscriptEntry>>,
    ) -> bool {
        if transcripts.get(&self.id).is_some_and(|t| !t.is_empty()) {
            return true;
        }
        self.notes_markdown.len() > MIN_NOTES_LEN || self.notes_plain.len() > MIN_NOTES_LEN
    }
}
