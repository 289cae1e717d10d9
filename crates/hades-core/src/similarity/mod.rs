//! Similarity scoring between two documents

mod matcher;

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::config::JunkMode;

pub use matcher::{Match, SequenceMatcher};

/// Classifies characters that may not seed a matching block
#[derive(Clone, Default)]
pub enum JunkPolicy {
    /// No character is junk
    #[default]
    None,
    /// Whitespace is junk
    Whitespace,
    /// Caller-supplied predicate
    Custom(Arc<dyn Fn(char) -> bool + Send + Sync>),
}

impl JunkPolicy {
    /// Wrap a predicate as a custom policy
    pub fn custom(predicate: impl Fn(char) -> bool + Send + Sync + 'static) -> Self {
        JunkPolicy::Custom(Arc::new(predicate))
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, JunkPolicy::None)
    }

    pub fn is_junk(&self, c: char) -> bool {
        match self {
            JunkPolicy::None => false,
            JunkPolicy::Whitespace => c.is_whitespace(),
            JunkPolicy::Custom(predicate) => predicate(c),
        }
    }
}

impl fmt::Debug for JunkPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JunkPolicy::None => write!(f, "None"),
            JunkPolicy::Whitespace => write!(f, "Whitespace"),
            JunkPolicy::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl From<JunkMode> for JunkPolicy {
    fn from(mode: JunkMode) -> Self {
        match mode {
            JunkMode::None => JunkPolicy::None,
            JunkMode::Whitespace => JunkPolicy::Whitespace,
        }
    }
}

/// Similarity ratio of two character sequences, in `[0.0, 1.0]`.
///
/// Identical sequences (including two empty ones) score `1.0`. Operands are
/// put in a canonical order (shorter first, then lexicographically smaller
/// first) before matching, so `ratio(a, b) == ratio(b, a)` holds exactly.
pub fn ratio(a: &[char], b: &[char], junk: &JunkPolicy) -> f64 {
    if a == b {
        return 1.0;
    }
    let (first, second) = canonical_order(a, b);
    SequenceMatcher::new(first, second, junk).ratio()
}

/// Convenience wrapper over [`ratio`] for string slices
pub fn ratio_str(a: &str, b: &str, junk: &JunkPolicy) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio(&a, &b, junk)
}

fn canonical_order<'a>(a: &'a [char], b: &'a [char]) -> (&'a [char], &'a [char]) {
    match a.len().cmp(&b.len()).then_with(|| a.cmp(b)) {
        Ordering::Greater => (b, a),
        _ => (a, b),
    }
}

#[cfg(test)]
mod tests;
