//! Locale-aware string ordering for component labels
//!
//! Approximates root-locale collation with three levels:
//! 1. base characters, ignoring case and accents; whitespace, punctuation
//!    and symbols sort before digits, digits before letters
//! 2. accents
//! 3. case, lowercase first
//!
//! Strings equal on all three levels fall back to code-point order, so the
//! comparison is a total order.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compare two labels the way a browser's `localeCompare` orders them
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(&tertiary_key(b)))
        .then_with(|| a.cmp(b))
}

/// Character group: non-alphanumerics < digits < letters
fn group(c: char) -> u8 {
    if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    }
}

fn primary_key(s: &str) -> Vec<(u8, char)> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| (group(c), c))
        .collect()
}

fn secondary_key(s: &str) -> Vec<char> {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn tertiary_key(s: &str) -> Vec<bool> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
        .collect()
}
