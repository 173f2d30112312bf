//! Budget enforcement for the assembled context.
//!
//! Lengths are counted in `char`s so a cut never lands inside a UTF-8
//! sequence. When the text is over budget the result is exactly `budget`
//! characters long and ends with [`TRUNCATION_NOTICE`] (or a prefix of it when
//! the budget is smaller than the notice itself).

use membank_core::memory_bank::TRUNCATION_NOTICE;

/// Outcome of [`truncate_to_budget`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncated {
    pub text: String,
    /// Whether anything was cut.
    pub truncated: bool,
}

/// Fit `text` into `budget` characters.
pub fn truncate_to_budget(text: String, budget: usize) -> Truncated {
    if char_len(&text) <= budget {
        return Truncated {
            text,
            truncated: false,
        };
    }

    let reserve = char_len(TRUNCATION_NOTICE);
    if budget <= reserve {
        return Truncated {
            text: take_chars(TRUNCATION_NOTICE, budget).to_string(),
            truncated: true,
        };
    }

    let kept = take_chars(&text, budget - reserve);
    let mut out = String::with_capacity(kept.len() + TRUNCATION_NOTICE.len());
    out.push_str(kept);
    out.push_str(TRUNCATION_NOTICE);
    Truncated {
        text: out,
        truncated: true,
    }
}

/// Number of Unicode scalar values in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The first `n` characters of `s` (all of it if shorter).
fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
