//! KEY=VALUE blocks stored as a single secret
//!
//! Line syntax:
//! - blank lines and lines starting with `#` are skipped
//! - `KEY=VALUE` or `KEY: VALUE`, whichever separator comes first; a leading
//!   `export ` on the key is dropped
//! - an unquoted `#` starts a comment
//! - `'single quoted'` values are literal
//! - `"double quoted"` values understand `\n`, `\r` and backslash escapes
//! - unquoted and double-quoted values expand `$NAME` / `${NAME}` where NAME
//!   is `[A-Z0-9_]+`, looked up only among assignments earlier in the same
//!   block (unknown names expand to nothing); `\$` and any other `$` stay
//!   literal
//!
//! The process environment is never consulted.

use std::collections::HashMap;

use thiserror::Error;

/// Why a block could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvBlockError {
    #[error("value is not valid UTF-8")]
    NotUtf8,

    #[error("line {line}: can't separate key from value")]
    MissingSeparator { line: usize },

    #[error("line {line}: empty key")]
    EmptyKey { line: usize },
}

/// Parse a block into `(key, value)` pairs in first-seen order
///
/// A key assigned more than once keeps its position and its last value.
pub fn parse_env_block(raw: &[u8]) -> Result<Vec<(String, String)>, EnvBlockError> {
    let text = std::str::from_utf8(raw).map_err(|_| EnvBlockError::NotUtf8)?;

    let mut entries: Vec<(String, String)> = Vec::new();
    let mut assigned: HashMap<String, String> = HashMap::new();

    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (key, value) = parse_line(line, index + 1, &assigned)?;
        assigned.insert(key.clone(), value.clone());
        match entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => entries.push((key, value)),
        }
    }
    Ok(entries)
}

fn parse_line(
    line: &str,
    number: usize,
    assigned: &HashMap<String, String>,
) -> Result<(String, String), EnvBlockError> {
    let line = strip_comment(line);

    let split_at = match (line.find('='), line.find(':')) {
        (Some(equals), Some(colon)) => equals.min(colon),
        (Some(equals), None) => equals,
        (None, Some(colon)) => colon,
        (None, None) => return Err(EnvBlockError::MissingSeparator { line: number }),
    };

    let key = line[..split_at].trim();
    let key = key
        .strip_prefix("export")
        .filter(|rest| rest.starts_with(char::is_whitespace))
        .map(str::trim_start)
        .unwrap_or(key);
    if key.is_empty() {
        return Err(EnvBlockError::EmptyKey { line: number });
    }

    Ok((key.to_string(), parse_value(&line[split_at + 1..], assigned)))
}

/// Cut the line at the first `#` outside quotes
fn strip_comment(line: &str) -> &str {
    let mut open: Option<char> = None;
    for (pos, c) in line.char_indices() {
        match (open, c) {
            (None, '#') => return &line[..pos],
            (None, '"' | '\'') => open = Some(c),
            (Some(quote), _) if quote == c => open = None,
            _ => {}
        }
    }
    line
}

fn parse_value(raw: &str, assigned: &HashMap<String, String>) -> String {
    let value = raw.trim_matches(' ');
    if value.len() <= 1 {
        return value.to_string();
    }
    if let Some(inner) = quoted(value, '\'') {
        return inner.to_string();
    }
    if let Some(inner) = quoted(value, '"') {
        return expand(&unescape(inner), assigned);
    }
    expand(value, assigned)
}

fn quoted(value: &str, quote: char) -> Option<&str> {
    value.strip_prefix(quote)?.strip_suffix(quote)
}

/// Resolve backslash escapes in a double-quoted value
///
/// `\$` is left in place so that `expand` keeps the dollar literal.
fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('$') => out.push_str("\\$"),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn expand(value: &str, assigned: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(pos) = rest.find('$') {
        let escaped = rest[..pos].ends_with('\\');
        out.push_str(if escaped { &rest[..pos - 1] } else { &rest[..pos] });

        let after = &rest[pos + 1..];
        let (len, name) = reference(after);
        match name {
            Some(name) if !escaped => {
                out.push_str(assigned.get(name).map(String::as_str).unwrap_or(""));
            }
            _ => {
                out.push('$');
                out.push_str(&after[..len]);
            }
        }
        rest = &after[len..];
    }
    out.push_str(rest);
    out
}

/// Length and name of a `{?NAME?}?` reference following a `$`
fn reference(after: &str) -> (usize, Option<&str>) {
    let bytes = after.as_bytes();
    let mut end = usize::from(bytes.first() == Some(&b'{'));
    let start = end;
    while end < bytes.len()
        && (bytes[end].is_ascii_uppercase() || bytes[end].is_ascii_digit() || bytes[end] == b'_')
    {
        end += 1;
    }
    let name = (end > start).then(|| &after[start..end]);
    if bytes.get(end) == Some(&b'}') {
        end += 1;
    }
    (end, name)
}
