use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Letters (with their combining marks), digits, whitespace and `: / - .`
    static ref DISALLOWED_CHARS: Regex = Regex::new(r"[^\p{L}\p{M}\p{N}\s:/.\-]").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Split OCR output into trimmed, character-filtered, non-empty lines.
/// Relative order is preserved; it is the scan order for extraction and
/// identifier validation alike.
pub fn clean_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(clean_line)
        .collect()
}

fn clean_line(line: &str) -> Option<String> {
    let stripped = DISALLOWED_CHARS.replace_all(line, "");
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");
    let cleaned = collapsed.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
