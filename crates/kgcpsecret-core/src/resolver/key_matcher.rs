//! Candidate key names for a logical key

use std::iter::FusedIterator;

use crate::types::Scope;

const SLOTS: usize = 4;

/// Qualified key names to try for one logical key, most specific first
///
/// Names are `prefix + key + postfix`, prefix-major:
///
/// | prefixes (outer)          | postfixes (inner)   |
/// |---------------------------|---------------------|
/// | `{namespace}_{name}_`     | `_{stage}_{tag}`    |
/// | `{name}_`                 | `_{stage}`          |
/// | `{namespace}_`            | `_{tag}`            |
/// | (none)                    | (none)              |
///
/// Empty qualifiers are concatenated as-is, so an empty namespace still
/// yields `_{name}_` and `_` prefixes. There are always sixteen names and
/// the last one is the bare key.
///
/// The sequence is lazy and cheap to clone; clone it to replay from the start.
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    key: &'a str,
    prefixes: [String; SLOTS],
    postfixes: [String; SLOTS],
    next: usize,
}

/// Build the candidate sequence for `key` under `scope`
pub fn candidates<'a>(key: &'a str, scope: &Scope<'_>) -> Candidates<'a> {
    let Scope {
        name,
        namespace,
        stage,
        tag,
    } = *scope;

    Candidates {
        key,
        prefixes: [
            format!("{}_{}_", namespace, name),
            format!("{}_", name),
            format!("{}_", namespace),
            String::new(),
        ],
        postfixes: [
            format!("_{}_{}", stage, tag),
            format!("_{}", stage),
            format!("_{}", tag),
            String::new(),
        ],
        next: 0,
    }
}

impl Iterator for Candidates<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.next >= SLOTS * SLOTS {
            return None;
        }
        let prefix = &self.prefixes[self.next / SLOTS];
        let postfix = &self.postfixes[self.next % SLOTS];
        self.next += 1;
        Some(format!("{}{}{}", prefix, self.key, postfix))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = SLOTS * SLOTS - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Candidates<'_> {}

impl FusedIterator for Candidates<'_> {}
