//! Anchored three-stage section search.

/// Extracts the text between `start_delim` and `end_delim` that follows
/// `marker`.
///
/// The search finds the first `marker`, then the first `start_delim` at or
/// after it, then the first `end_delim` after the start delimiter. If any of
/// the three is missing, returns `""`. The result is trimmed.
///
/// ```
/// use tbforge_extract::extract_section;
/// let text = "TEST_PATTERNS:\n```json\n[1, 2]\n```";
/// assert_eq!(extract_section(text, "TEST_PATTERNS:", "```json", "```"), "[1, 2]");
/// ```
pub fn extract_section(text: &str, marker: &str, start_delim: &str, end_delim: &str) -> String {
    let Some(marker_idx) = text.find(marker) else {
        return String::new();
    };
    let Some(start_rel) = text[marker_idx..].find(start_delim) else {
        return String::new();
    };
    let body_start = marker_idx + start_rel + start_delim.len();
    let Some(end_rel) = text[body_start..].find(end_delim) else {
        return String::new();
    };
    text[body_start..body_start + end_rel].trim().to_string()
}
