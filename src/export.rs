// ABOUTME: Export engine turning cache documents into markdown files
// ABOUTME: Idempotent write/skip/merge decisions, per-document error capture

use crate::convert::{self, format_date_for_filename};
use crate::extract::{extract_transcript, TRANSCRIPT_HEADING};
use crate::model::{CacheState, Document, TranscriptEntry};
use crate::storage;
use crate::util::{number_with_commas, safe_filename};
use crate::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Statistics from one export run.
#[derive(Debug, Default)]
pub struct ExportResult {
    pub written: usize,
    pub skipped: usize,
    pub empty: usize,
    pub errors: Vec<ExportError>,
}

/// A non-fatal failure while exporting one document.
#[derive(Debug)]
pub struct ExportError {
    pub document_id: String,
    pub title: String,
    pub error: String,
}

impl ExportResult {
    /// Prints a human-readable summary of the run.
    pub fn print_summary(&self, output_dir: &std::path::Path) {
        println!("\nSummary:");
        println!("  Written: {} documents", self.written);
        println!("  Skipped (unchanged): {} documents", self.skipped);
        println!("  Empty: {} documents", self.empty);
        println!("  Errors: {}", self.errors.len());
        println!("\nAll documents saved to: {}", output_dir.display());

        if !self.errors.is_empty() {
            println!("\nErrors:");
            for e in &self.errors {
                println!("  {}: {}", e.document_id, e.error);
            }
        }
    }
}

/// Returns the default output directory, `~/.local/share/granola-transcripts`.
pub fn default_output_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".local").join("share").join("granola-transcripts"))
}

/// Exports Granola documents to markdown files in one output directory.
pub struct Exporter {
    output_dir: PathBuf,
}

impl Exporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Exporter {
            output_dir: output_dir.into(),
        }
    }

    /// Exports every exportable document from the cache state.
    ///
    /// Each document lands in exactly one bucket: written, skipped
    /// (identical file already on disk), empty (nothing renderable), or
    /// errored. A single document's I/O failure never aborts the run;
    /// only an uncreatable output directory does.
    pub fn export(&self, state: &CacheState, verbose: bool) -> Result<ExportResult> {
        storage::ensure_dir(&self.output_dir)?;

        let mut result = ExportResult::default();

        let mut candidates: Vec<&Document> = state
            .documents
            .values()
            .filter(|doc| doc.has_exportable_content(&state.transcripts))
            .collect();
        // The cache maps are unordered; sort so summaries and error
        // lists come out the same on every run.
        candidates.sort_by(|a, b| a.id.cmp(&b.id));

        if verbose {
            println!("Found {} documents with content to export\n", candidates.len());
            println!("Exporting Granola documents:");
            println!("{}", "=".repeat(70));
        }

        let pb = if verbose {
            None
        } else {
            let pb = ProgressBar::new(candidates.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{bar:40}] {pos}/{len} docs")
                    .unwrap()
                    .progress_chars("##-"),
            );
            Some(pb)
        };

        for doc in candidates {
            if let Err(e) = self.export_document(doc, &state.transcripts, &mut result, verbose) {
                if verbose {
                    println!("✗ Error with {} ({}): {}", doc.id, doc.title, e);
                }
                result.errors.push(ExportError {
                    document_id: doc.id.clone(),
                    title: doc.title.clone(),
                    error: e.to_string(),
                });
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }

        if let Some(pb) = &pb {
            pb.finish_and_clear();
        }
        if verbose {
            println!("\n{}", "=".repeat(70));
        }

        Ok(result)
    }

    fn export_document(
        &self,
        doc: &Document,
        transcripts: &HashMap<String, Vec<TranscriptEntry>>,
        result: &mut ExportResult,
        verbose: bool,
    ) -> std::io::Result<()> {
        let date_str = format_date_for_filename(&doc.created_at);
        let filename = safe_filename(&doc.title, &date_str);
        let path = self.output_dir.join(&filename);

        let mut transcript: Vec<TranscriptEntry> =
            transcripts.get(&doc.id).cloned().unwrap_or_default();

        // A later cache snapshot may have evicted transcript data that
        // an earlier export captured. If the cache has none but a prior
        // file does, recover it from the file instead of clobbering it.
        if transcript.is_empty() && path.exists() {
            let bytes = fs::read(&path)?;
            let existing = String::from_utf8_lossy(&bytes);
            if existing.contains(TRANSCRIPT_HEADING) {
                if let Some(recovered) = extract_transcript(&existing) {
                    transcript = recovered;
                }
            }
        }

        // Render-time emptiness is a separate check from the
        // exportability gate: that one is length-based on raw fields,
        // this one is trim-based on what would actually be emitted.
        let notes = doc.notes();
        let has_notes = !notes.trim().is_empty();
        let has_transcript = transcript.iter().any(|e| !e.text.trim().is_empty());
        if !has_notes && !has_transcript {
            result.empty += 1;
            return Ok(());
        }

        let content = convert::format_document(doc, &transcript);

        if path.exists() {
            let existing = fs::read(&path)?;
            if existing == content.as_bytes() {
                result.skipped += 1;
                return Ok(());
            }
        }

        storage::write_atomic(&path, content.as_bytes())?;
        result.written += 1;

        if verbose {
            let word_count = content.split_whitespace().count();
            let mut parts = Vec::new();
            if has_notes {
                parts.push("notes".to_string());
            }
            if has_transcript {
                parts.push(format!("transcript ({} entries)", transcript.len()));
            }
            println!("✓ {}", filename);
            println!(
                "  [{}] {} words, {} bytes",
                parts.join(" + "),
                number_with_commas(word_count as u64),
                number_with_commas(content.len() as u64)
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn state_with(
        docs: Vec<Document>,
        transcripts: Vec<(&str, Vec<TranscriptEntry>)>,
    ) -> CacheState {
        CacheState {
            documents: docs.into_iter().map(|d| (d.id.clone(), d)).collect(),
            transcripts: transcripts
                .into_iter()
                .map(|(id, t)| (id.to_string(), t))
                .collect(),
        }
    }

    fn doc(id: &str, title: &str, notes_markdown: &str) -> Document {
        Document {
            id: id.into(),
            title: title.into(),
            created_at: "2026-01-21T10:00:00Z".into(),
            notes_markdown: notes_markdown.into(),
            ..Default::default()
        }
    }

    fn entry(text: &str, source: &str) -> TranscriptEntry {
        TranscriptEntry {
            text: text.into(),
            source: source.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_exports_documents_with_transcripts() {
        let temp = TempDir::new().unwrap();
        let exporter = Exporter::new(temp.path());

        let state = state_with(
            vec![
                doc("doc1", "Doc with transcript", ""),
                doc("doc2", "Doc without anything", ""),
            ],
            vec![("doc1", vec![entry("Hello", "microphone")])],
        );

        let result = exporter.export(&state, false).unwrap();
        assert_eq!(result.written, 1);
        assert!(temp
            .path()
            .join("2026-01-21_Doc with transcript.md")
            .exists());
    }

    #[test]
    fn test_exports_documents_with_long_enough_notes() {
        let temp = TempDir::new().unwrap();
        let exporter = Exporter::new(temp.path());

        let state = state_with(
            vec![
                doc("doc1", "Doc with notes", "This is a long enough note to export"),
                doc("doc2", "Doc with short notes", "Short"),
            ],
            vec![],
        );

        let result = exporter.export(&state, false).unwrap();
        assert_eq!(result.written, 1);
    }

    #[test]
    fn test_ignores_documents_with_nothing() {
        let temp = TempDir::new().unwrap();
        let exporter = Exporter::new(temp.path());

        let state = state_with(vec![doc("doc1", "Empty doc", "")], vec![]);

        let result = exporter.export(&state, false).unwrap();
        assert_eq!(result.written, 0);
        assert_eq!(result.empty, 0);
        assert_eq!(result.errors.len(), 0);
    }

    #[test]
    fn test_preserves_transcript_when_cache_lacks_it() {
        let temp = TempDir::new().unwrap();
        let exporter = Exporter::new(temp.path());

        let existing = "# Existing Meeting\n\
            Date: 2026-01-21 10:00\n\
            Meeting ID: doc1\n\
            \n\
            ---\n\
            \n\
            ## Transcript\n\
            \n\
            **Me:** Preserved transcript entry.\n\
            \n";
        let path = temp.path().join("2026-01-21_Existing Meeting.md");
        fs::write(&path, existing).unwrap();

        let state = state_with(
            vec![doc("doc1", "Existing Meeting", "New notes added")],
            vec![],
        );

        let result = exporter.export(&state, false).unwrap();
        assert_eq!(result.written, 1);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("## Transcript"));
        assert!(content.contains("Preserved transcript entry"));
        assert!(content.contains("New notes added"));
    }

    #[test]
    fn test_second_run_skips_unchanged_files() {
        let temp = TempDir::new().unwrap();
        let exporter = Exporter::new(temp.path());

        let state = state_with(vec![doc("doc1", "Test", "Some notes here")], vec![]);

        let first = exporter.export(&state, false).unwrap();
        assert_eq!(first.written, 1);

        let second = exporter.export(&state, false).unwrap();
        assert_eq!(second.written, 0);
        assert_eq!(second.skipped, 1);
    }

    #[test]
    fn test_creates_output_directory() {
        let temp = TempDir::new().unwrap();
        let output_dir = temp.path().join("nested").join("output").join("dir");
        let exporter = Exporter::new(&output_dir);

        let state = state_with(vec![doc("doc1", "Test", "Some notes here")], vec![]);

        exporter.export(&state, false).unwrap();
        assert!(output_dir.is_dir());
    }

    #[test]
    fn test_whitespace_only_transcript_classified_empty() {
        let temp = TempDir::new().unwrap();
        let exporter = Exporter::new(temp.path());

        // Passes the exportability gate (non-empty transcript list) but
        // collapses to nothing at render time.
        let state = state_with(
            vec![doc("doc1", "Whitespace", "")],
            vec![("doc1", vec![entry("   ", "microphone")])],
        );

        let result = exporter.export(&state, false).unwrap();
        assert_eq!(result.written, 0);
        assert_eq!(result.empty, 1);
        assert!(fs::read_dir(temp.path()).unwrap().next().is_none());
    }

    #[test]
    fn test_per_document_error_does_not_abort_run() {
        let temp = TempDir::new().unwrap();
        let exporter = Exporter::new(temp.path());

        // A directory squatting on doc1's output path forces a read
        // failure for that document only.
        fs::create_dir(temp.path().join("2026-01-21_Blocked.md")).unwrap();

        let state = state_with(
            vec![
                doc("doc1", "Blocked", "Notes long enough to export"),
                doc("doc2", "Fine", "Notes long enough to export"),
            ],
            vec![],
        );

        let result = exporter.export(&state, false).unwrap();
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].document_id, "doc1");
        assert_eq!(result.errors[0].title, "Blocked");
        assert_eq!(result.written, 1);
        assert!(temp.path().join("2026-01-21_Fine.md").exists());
    }

    #[test]
    fn test_updated_notes_rewrite_file() {
        let temp = TempDir::new().unwrap();
        let exporter = Exporter::new(temp.path());

        let state = state_with(vec![doc("doc1", "Test", "Original notes text")], vec![]);
        exporter.export(&state, false).unwrap();

        let state = state_with(vec![doc("doc1", "Test", "Revised notes text")], vec![]);
        let result = exporter.export(&state, false).unwrap();
        assert_eq!(result.written, 1);
        assert_eq!(result.skipped, 0);

        let content = fs::read_to_string(temp.path().join("2026-01-21_Test.md")).unwrap();
        assert!(content.contains("Revised notes text"));
        assert!(!content.contains("Original notes text"));
    }

    #[test]
    fn test_default_output_dir_shape() {
        if let Some(dir) = default_output_dir() {
            let s = dir.to_string_lossy();
            assert!(s.contains(".local"));
            assert!(s.contains("granola-transcripts"));
        }
    }
}
