//! Expertise detection.
//!
//! Decides whether a keyword is used in an "expertise in" role: an
//! expertise-indicating phrase matches the keyword exactly, sits next to
//! it, opens the sentence, or governs it up to three levels up the tree.
//! All matching is case-insensitive.

use std::collections::HashSet;

use decomp_core::{Dep, Keyword, Sentence};

use crate::lexicon::{EXPERTISE_WORDS_1, EXPERTISE_WORDS_2, EXPERTISE_WORDS_3};

/// Compiled expertise phrase set
pub struct ExpertiseChecker {
    phrases: HashSet<String>,
}

impl ExpertiseChecker {
    pub fn new() -> Self {
        let mut phrases = HashSet::new();
        for phrase in EXPERTISE_WORDS_1
            .iter()
            .chain(EXPERTISE_WORDS_2)
            .chain(EXPERTISE_WORDS_3)
        {
            let lowered = phrase.to_lowercase();
            phrases.insert(lowered.replace(' ', "_"));
            phrases.insert(lowered);
        }
        Self { phrases }
    }

    fn is_phrase(&self, text: &str) -> bool {
        let trimmed = text.trim().to_lowercase();
        !trimmed.is_empty() && self.phrases.contains(&trimmed)
    }

    /// Whether the keyword plays the "expertise in" role in the sentence.
    pub fn check(&self, sent: &Sentence, keyword: &Keyword) -> bool {
        let span = keyword.span;
        let span_text = sent.span_text(span.start, span.main + 1);
        let sentence_text = sent.text().to_lowercase();

        // Improved keyword of the form "<found>_<expertise phrase>"
        if self.is_phrase(&span_text.replace(&keyword.found, "")) {
            return true;
        }

        // Phrase immediately after the keyword
        if let Some(next) = sent.next(span.main) {
            if self.is_phrase(&next.text) {
                return true;
            }
        }

        // "<phrase> <keyword>" anywhere in the sentence
        let lowered_span = span_text.to_lowercase();
        if self
            .phrases
            .iter()
            .any(|phrase| sentence_text.contains(&format!("{phrase} {lowered_span}")))
        {
            return true;
        }

        // Climb out of a coordination chain first. The cue must sit outside
        // the keyword itself: a keyword like "marketing specialist" is not
        // evidence of an expertise list just because "specialist" is a cue
        // word.
        let mut anchor = span.main;
        while sent.get(anchor).map(|t| t.dep == Dep::Conj).unwrap_or(false) {
            match sent.head(anchor) {
                Some(head) if head.index != anchor => anchor = head.index,
                _ => break,
            }
        }
        if !span.covers(anchor) {
            if let Some(token) = sent.get(anchor) {
                if self.is_phrase(&token.text) && !self.is_phrase(&span_text) {
                    return true;
                }
            }
        }

        // Sentence-initial cues: any of the first three tokens or their
        // bigrams
        let first = |i: usize| sent.get(i).map(|t| t.text.clone()).unwrap_or_default();
        let len = sent.len();
        if len > 1 && self.is_phrase(&first(0)) {
            return true;
        }
        if len > 2
            && (self.is_phrase(&first(1)) || self.is_phrase(&format!("{} {}", first(0), first(1))))
        {
            return true;
        }
        if len > 3
            && (self.is_phrase(&first(2)) || self.is_phrase(&format!("{} {}", first(1), first(2))))
        {
            return true;
        }

        // Ancestor match up to three levels up
        let head1 = sent.head(anchor);
        let head2 = head1.and_then(|t| sent.head(t.index));
        let head3 = head2.and_then(|t| sent.head(t.index));
        let text = |t: Option<&decomp_core::Token>| {
            t.map(|t| t.text.clone()).unwrap_or_default()
        };
        let (t1, t2, t3) = (text(head1), text(head2), text(head3));
        if self.is_phrase(&t1)
            || self.is_phrase(&t2)
            || self.is_phrase(&format!("{t2} {t1}"))
            || self.is_phrase(&format!("{t3} {t2} {t1}"))
        {
            return true;
        }

        false
    }
}

impl Default for ExpertiseChecker {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
