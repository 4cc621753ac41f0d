// ABOUTME: Utility functions for filename sanitizing and report formatting
// ABOUTME: Keeps titles human-readable while staying filesystem-safe

/// Characters that are unsafe for filenames on most filesystems.
const UNSAFE_CHARS: &str = "<>:\"/\\|?*";

const MAX_TITLE_CHARS: usize = 100;

/// Generates a safe filename from a title and a date stamp.
/// Format: YYYY-MM-DD_Title.md. Total: every input yields a filename.
pub fn safe_filename(title: &str, date_str: &str) -> String {
    let title = if title.trim().is_empty() || title == "None" {
        "Untitled"
    } else {
        title
    };

    let mut safe: String = title.chars().filter(|c| !UNSAFE_CHARS.contains(*c)).collect();
    safe = safe.trim().to_string();

    if safe.is_empty() {
        safe = "Untitled".to_string();
    }

    if safe.chars().count() > MAX_TITLE_CHARS {
        safe = safe.chars().take(MAX_TITLE_CHARS).collect();
    }

    format!("{}_{}.md", date_str, safe)
}

/// Formats a number with thousand separators for the verbose report.
pub fn number_with_commas(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % 3 == offset {
            out.push(',');
        }
        out.push(c);
    }
    out
}
