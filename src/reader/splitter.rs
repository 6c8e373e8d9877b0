//! Line splitting and quote stripping.
//!
//! Lines are split strictly on the delimiter: a delimiter between quotes still
//! splits. Each token that starts with a quote loses one leading and one
//! trailing character.

use crate::constants::{DELIMITER, QUOTE};

/// Split a line into raw tokens with one layer of quotes removed.
///
/// A line without any delimiter is returned as its only token, so an empty
/// line yields one empty token. Otherwise trailing empty tokens are dropped:
/// `a,b,,` yields `["a", "b"]`.
pub fn split_line(line: &str) -> Vec<&str> {
    if !line.contains(DELIMITER) {
        return vec![strip_quotes(line)];
    }

    let mut tokens: Vec<&str> = line.split(DELIMITER).collect();
    while tokens.last().is_some_and(|token| token.is_empty()) {
        tokens.pop();
    }

    tokens.into_iter().map(strip_quotes).collect()
}

/// Remove one leading quote and one trailing character from a quoted token.
///
/// The trailing character is not checked to be a quote. A token shorter than
/// two characters (a lone `"`) is returned unchanged.
pub fn strip_quotes(token: &str) -> &str {
    match token.strip_prefix(QUOTE) {
        Some(rest) if !rest.is_empty() => {
            let mut chars = rest.chars();
            chars.next_back();
            chars.as_str()
        }
        _ => token,
    }
}
