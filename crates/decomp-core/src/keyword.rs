//! Keyword spans
//!
//! A keyword occurrence is addressed by the 3-index triple
//! `[start, innerEnd, main]`: the first token of the span, the token just
//! before the main token, and the main (rightmost) token itself.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Index triple locating one keyword occurrence inside a sentence.
///
/// Serializes as a plain 3-element array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[usize; 3]", into = "[usize; 3]")]
pub struct KeywordSpan {
    /// Index of the first token of the keyword
    pub start: usize,
    /// Index of the keyword token before the main token
    pub inner_end: usize,
    /// Index of the main (rightmost) token
    pub main: usize,
}

impl From<[usize; 3]> for KeywordSpan {
    fn from(indices: [usize; 3]) -> Self {
        Self {
            start: indices[0],
            inner_end: indices[1],
            main: indices[2],
        }
    }
}

impl From<KeywordSpan> for [usize; 3] {
    fn from(span: KeywordSpan) -> Self {
        [span.start, span.inner_end, span.main]
    }
}

impl KeywordSpan {
    pub fn new(start: usize, inner_end: usize, main: usize) -> Self {
        Self {
            start,
            inner_end,
            main,
        }
    }

    /// Single-token span at `index`
    pub fn single(index: usize) -> Self {
        Self::new(index, index, index)
    }

    /// The span left of (and including) the token before the main token.
    /// This is the exclusion range used by verb search.
    pub fn left_range(&self) -> Range<usize> {
        self.start..self.inner_end + 1
    }

    /// The whole keyword, main token included. Used by the expertise check.
    pub fn full_range(&self) -> Range<usize> {
        self.start..self.main + 1
    }

    /// Whether `index` falls inside the exclusion span
    pub fn contains(&self, index: usize) -> bool {
        self.left_range().contains(&index)
    }

    /// Whether `index` falls anywhere inside the keyword
    pub fn covers(&self, index: usize) -> bool {
        self.full_range().contains(&index)
    }
}

/// One keyword occurrence with its surface and canonical forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyword {
    /// Literal surface text as originally found
    pub found: String,

    /// Improved canonical form
    pub improved: String,

    /// Location inside the sentence
    pub span: KeywordSpan,

    /// Part-of-speech metadata for the improved keyword
    #[serde(default)]
    pub pos: String,

    /// Head-token text metadata for the improved keyword
    #[serde(default)]
    pub head_text: String,
}

impl Keyword {
    pub fn new(found: impl Into<String>, improved: impl Into<String>, span: KeywordSpan) -> Self {
        Self {
            found: found.into(),
            improved: improved.into(),
            span,
            pos: String::new(),
            head_text: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_ranges() {
        let span = KeywordSpan::new(3, 4, 5);
        assert_eq!(span.left_range(), 3..5);
        assert_eq!(span.full_range(), 3..6);
        assert!(span.contains(3));
        assert!(span.contains(4));
        assert!(!span.contains(5));
        assert!(span.covers(5));
    }

    #[test]
    fn test_span_serializes_as_triple() {
        let span = KeywordSpan::new(1, 2, 3);
        assert_eq!(serde_json::to_string(&span).unwrap(), "[1,2,3]");
        let back: KeywordSpan = serde_json::from_str("[1,2,3]").unwrap();
        assert_eq!(back, span);
    }
}
