//! Size reduction for packed materials
//!
//! Materials are lower-cased, comments and indentation are dropped, quotes
//! are removed where the value cannot need them, and editor-only keys
//! (`%keywords`, `%tooltexture`) are removed.

use regex::Regex;
use std::sync::OnceLock;

/// First words of lines only the editor reads
pub const EDITOR_ONLY_KEYS: [&str; 2] = ["%keywords", "%tooltexture"];

fn unquotable() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9$.]+$").expect("invalid unquotable regex"))
}

fn strip_quotes(word: &str) -> &str {
    match word
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) if unquotable().is_match(inner) => inner,
        _ => word,
    }
}

/// Minify a material document
pub fn minify(text: &str) -> String {
    let mut output = String::with_capacity(text.len());

    for line in text.trim().to_lowercase().lines() {
        let content = line.split("//").next().unwrap_or_default();
        let words: Vec<&str> = content.split_whitespace().map(strip_quotes).collect();

        match words.first() {
            None => continue,
            Some(first) if EDITOR_ONLY_KEYS.contains(&first.trim_matches('"')) => continue,
            Some(_) => {}
        }

        output.push_str(&words.join(" "));
        output.push('\n');
    }

    output
}
