// src/util/text.rs
use regex::Regex;
use std::sync::OnceLock;

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static whitespace pattern"))
}

/// Collapse any run of whitespace (including line breaks) to one space.
///
/// Free-text notes arrive with embedded newlines and tabs; a table cell needs
/// a single line.
///
/// # Examples
///
/// ```
/// use notedash::util::text::normalize_cell;
///
/// assert_eq!(normalize_cell("  left at\n\tdock 4 "), "left at dock 4");
/// ```
pub fn normalize_cell(text: &str) -> String {
    whitespace_re().replace_all(text.trim(), " ").into_owned()
}

/// Shorten to at most `max_chars` characters, marking the cut with `…`.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

/// Greedy word wrap into lines of at most `max_chars` characters.
///
/// Words longer than a line are split hard. Empty input yields one empty line
/// so every cell occupies at least one row.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in normalize_cell(text).split(' ').filter(|w| !w.is_empty()) {
        let mut chars: Vec<char> = word.chars().collect();

        if current_len > 0 && current_len + 1 + chars.len() > max_chars {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }

        while chars.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = chars.split_off(max_chars);
            lines.push(chars.into_iter().collect());
            chars = rest;
        }

        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += chars.len();
        current.extend(chars);
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}
