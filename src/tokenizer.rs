//! Argument vector tokenization and flag matching
//!
//! Single left-to-right scan with one token of lookahead. A token with the
//! leading `-` marker is flag-shaped; everything else is a value. A known
//! argument flag greedily takes the next token as its value unless that
//! token is itself flag-shaped, so a value can never start with the marker.
//! Unrecognized tokens are ignored - the vector may carry arguments meant
//! for other consumers.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::trace;

/// Marker character that introduces a flag.
pub const FLAG_MARKER: char = '-';

/// Classification of one argv element. Transient: produced during the scan
/// and consumed immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A flag-shaped token, with the marker stripped.
    Flag(&'a str),
    /// Anything else.
    Value(&'a str),
}

pub fn classify(raw: &str) -> Token<'_> {
    match raw.strip_prefix(FLAG_MARKER) {
        Some(name) => Token::Flag(name),
        None => Token::Value(raw),
    }
}

/// Result of matching one argument vector against the known flag names.
#[derive(Debug, Default)]
pub struct Matches {
    /// Matched argument flags, in input order, with their optional raw
    /// value. Repeated flags keep the last occurrence.
    pub arguments: IndexMap<String, Option<String>>,
    /// Command flags seen in the input. Presence only.
    pub commands: HashSet<String>,
}

/// Walk the argument vector once, associating each known argument flag
/// with zero or one following value token. Command flags never consume a
/// value.
pub fn scan(
    args: &[String],
    argument_names: &HashSet<String>,
    command_names: &HashSet<String>,
) -> Matches {
    let mut matches = Matches::default();
    let mut cursor = 0;

    while cursor < args.len() {
        let name = match classify(&args[cursor]) {
            Token::Flag(name) => name,
            Token::Value(raw) => {
                trace!(token = %raw, "Skipping unrecognized value token");
                cursor += 1;
                continue;
            }
        };

        if argument_names.contains(name) {
            // Peek: the next token is this flag's value unless it is
            // flag-shaped or missing.
            let value = match args.get(cursor + 1).map(|raw| classify(raw)) {
                Some(Token::Value(raw)) => Some(raw.to_string()),
                _ => None,
            };
            cursor += if value.is_some() { 2 } else { 1 };
            matches.arguments.insert(name.to_string(), value);
        } else if command_names.contains(name) {
            matches.commands.insert(name.to_string());
            cursor += 1;
        } else {
            trace!(flag = %name, "Skipping unrecognized flag");
            cursor += 1;
        }
    }

    matches
}
