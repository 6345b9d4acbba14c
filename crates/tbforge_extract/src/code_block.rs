//! Code-block extraction from model responses.
//!
//! A response may wrap code in a fence tagged with the language, in an
//! untagged fence, or not fence it at all. [`extract_code_block`] tries a
//! fixed ladder of strategies and always returns something:
//!
//! 1. the interior of the first fence tagged with the requested language;
//! 2. the interior of the first fence pair, minus a leading tag line;
//! 3. when the text has no fence at all, everything from the first line that
//!    starts with the definition keyword;
//! 4. the whole text, trimmed.
//!
//! A strategy that finds only whitespace counts as a miss.

/// The fence token that opens and closes a code block.
pub const FENCE: &str = "```";

/// What to look for when extracting a code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeBlockQuery<'a> {
    /// Language tag expected right after an opening fence (e.g. `verilog`).
    pub language: &'a str,
    /// Keyword that starts a definition in unfenced text (e.g. `fn `).
    pub definition_keyword: &'a str,
}

/// Query for reference-model scripts.
pub const SCRIPT_QUERY: CodeBlockQuery<'static> = CodeBlockQuery {
    language: "rhai",
    definition_keyword: "fn ",
};

type Strategy = fn(&str, &CodeBlockQuery<'_>) -> Option<String>;

const LADDER: [Strategy; 3] = [tagged_fence, first_fence, definition_scan];

/// Extracts a code block from free-form text using the fallback ladder.
pub fn extract_code_block(text: &str, query: &CodeBlockQuery<'_>) -> String {
    LADDER
        .iter()
        .find_map(|strategy| strategy(text, query).filter(|block| !block.trim().is_empty()))
        .unwrap_or_else(|| text.trim().to_string())
}

/// Extracts a reference-model script from free-form text.
pub fn extract_script(text: &str) -> String {
    extract_code_block(text, &SCRIPT_QUERY)
}

fn tagged_fence(text: &str, query: &CodeBlockQuery<'_>) -> Option<String> {
    if query.language.is_empty() {
        return None;
    }
    let open = format!("{FENCE}{}", query.language);
    for (idx, _) in text.match_indices(&open) {
        let rest = &text[idx + open.len()..];
        // `rhai` must not match a fence tagged `rhaiscript`.
        if rest.chars().next().is_some_and(is_tag_char) {
            continue;
        }
        let end = rest.find(FENCE)?;
        return Some(rest[..end].trim().to_string());
    }
    None
}

fn first_fence(text: &str, _query: &CodeBlockQuery<'_>) -> Option<String> {
    let mut parts = text.split(FENCE);
    parts.next()?;
    let interior = parts.next()?;
    parts.next()?;
    Some(strip_tag_line(interior).trim().to_string())
}

fn definition_scan(text: &str, query: &CodeBlockQuery<'_>) -> Option<String> {
    if text.contains(FENCE) || query.definition_keyword.is_empty() {
        return None;
    }
    let lines: Vec<&str> = text.lines().collect();
    let first = lines
        .iter()
        .position(|line| line.trim_start().starts_with(query.definition_keyword))?;
    Some(lines[first..].join("\n"))
}

/// Drops a leading `lang` line left over from an opening fence.
fn strip_tag_line(interior: &str) -> &str {
    match interior.split_once('\n') {
        Some((first, rest))
            if !first.trim().is_empty()
                && !first.starts_with(char::is_whitespace)
                && first.trim_end().chars().all(is_tag_char) =>
        {
            rest
        }
        _ => interior,
    }
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+' | '.' | '#')
}
