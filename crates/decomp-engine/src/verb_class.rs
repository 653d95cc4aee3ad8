//! Verb type classification.
//!
//! Three independent predicates decide whether a verb reads as a result, a
//! means, or an indirect engagement. They are evaluated in a fixed order,
//! first match wins; a verb matching none keeps its action reading (or
//! state when the lemma is the copula, decided by the caller).

use decomp_core::{Dep, Pos, RoleFlag, Sentence};

use crate::lexicon::{
    has, is_role_noun, CCOMP_VERBS, MEANS_VERBS, PREP_MEANS, PREP_RESULT, RESULT_BIGRAMS,
    RESULT_EXCLUDE, RESULT_VERBS, WITH_USE_PHRASES,
};

/// Result reading: "to/for V" outside the exclusion lexicon, a result-verb
/// lemma, a clausal complement of an enabling verb, or a "led to" /
/// "resulted in" bigram.
pub fn is_result_verb(sent: &Sentence, verb: usize) -> Option<RoleFlag> {
    let token = sent.get(verb)?;

    if token.dep != Dep::Root {
        let prev = sent.prev(verb);
        let prev2 = sent.prev_n(verb, 2);
        let head = sent.head(verb);
        let to_for_before = prev.map(|t| has(PREP_RESULT, &t.text)).unwrap_or(false)
            && !prev2.map(|t| has(RESULT_EXCLUDE, &t.text)).unwrap_or(false)
            && !head.map(|t| has(RESULT_EXCLUDE, &t.text)).unwrap_or(false);
        if to_for_before {
            return Some(RoleFlag::Result);
        }
        if has(RESULT_VERBS, &token.lemma) {
            return Some(RoleFlag::Result);
        }
        let ccomp_of_enabler = head
            .map(|t| has(CCOMP_VERBS, &t.text))
            .unwrap_or(false)
            && token.dep == Dep::Ccomp
            && sent.head(verb).map(|h| verb > h.index).unwrap_or(false)
            && token.text != "using";
        if ccomp_of_enabler {
            return Some(RoleFlag::Result);
        }
    }

    if let Some(next) = sent.next(verb) {
        let bigram = format!("{} {}", token.text, next.text);
        if has(RESULT_BIGRAMS, &bigram) {
            return Some(RoleFlag::Result);
        }
    }
    None
}

/// Means reading: governed by or preceded by "via/by/through", a means-verb
/// lemma, or a "with the use/help of" idiom.
pub fn is_means_verb(sent: &Sentence, verb: usize) -> Option<RoleFlag> {
    let token = sent.get(verb)?;

    let head_means = sent
        .head(verb)
        .map(|t| has(PREP_MEANS, &t.text))
        .unwrap_or(false);
    let prev_means = sent
        .prev(verb)
        .map(|t| has(PREP_MEANS, &t.text))
        .unwrap_or(false);
    if head_means || prev_means {
        return Some(RoleFlag::Means);
    }
    if has(MEANS_VERBS, &token.lemma) {
        return Some(RoleFlag::Means);
    }
    if verb >= 4 {
        let idiom = sent.span_text(verb - 4, verb).to_lowercase();
        if WITH_USE_PHRASES.contains(&idiom.as_str()) {
            return Some(RoleFlag::Means);
        }
    }
    None
}

/// Indirect engagement: a participial or relative-clause verb hanging off a
/// preceding non-role noun.
pub fn is_indirect_engagement(sent: &Sentence, verb: usize) -> Option<RoleFlag> {
    let token = sent.get(verb)?;
    let head = sent.head(verb)?;

    if !head.pos.is_nominal()
        || verb <= head.index
        || is_role_noun(&head.text)
        || matches!(token.dep, Dep::Root | Dep::Conj)
    {
        return None;
    }
    if token.dep == Dep::Relcl {
        return Some(RoleFlag::IndirectEngagement);
    }
    let participial = token.ends_with("ing") || token.ends_with("ed");
    let followed_by_punct = sent
        .next(verb)
        .map(|t| t.pos == Pos::Punct)
        .unwrap_or(true);
    if participial && token.dep != Dep::Amod && token.text != "using" && !followed_by_punct {
        return Some(RoleFlag::IndirectEngagement);
    }
    None
}

/// Ordered classifier list, evaluated first-match-wins
pub const CLASSIFIERS: &[(&str, fn(&Sentence, usize) -> Option<RoleFlag>)] = &[
    ("result", is_result_verb),
    ("means", is_means_verb),
    ("indirect engagement", is_indirect_engagement),
];

/// Classify a verb against the ordered predicate list
pub fn classify(sent: &Sentence, verb: usize) -> Option<RoleFlag> {
    CLASSIFIERS
        .iter()
        .find_map(|(_, predicate)| predicate(sent, verb))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{tok, tokl};
    use decomp_core::Sentence;

    fn to_increase_sentence() -> Sentence {
        // "We work to increase revenue ."
        Sentence::new(vec![
            tok(0, "We", Pos::Pron, "PRP", Dep::Nsubj, 1),
            tokl(1, "work", "work", Pos::Verb, "VBP", Dep::Root, 1),
            tok(2, "to", Pos::Part, "TO", Dep::Aux, 3),
            tokl(3, "increase", "increase", Pos::Verb, "VB", Dep::Xcomp, 1),
            tok(4, "revenue", Pos::Noun, "NN", Dep::Dobj, 3),
            tok(5, ".", Pos::Punct, ".", Dep::Punct, 1),
        ])
    }

    #[test]
    fn test_to_verb_is_result() {
        let sent = to_increase_sentence();
        assert_eq!(is_result_verb(&sent, 3), Some(RoleFlag::Result));
        assert_eq!(classify(&sent, 3), Some(RoleFlag::Result));
    }

    #[test]
    fn test_result_exclusion() {
        // "We want to expand ." - "want" blocks the result reading
        let sent = Sentence::new(vec![
            tok(0, "We", Pos::Pron, "PRP", Dep::Nsubj, 1),
            tokl(1, "want", "want", Pos::Verb, "VBP", Dep::Root, 1),
            tok(2, "to", Pos::Part, "TO", Dep::Aux, 3),
            tokl(3, "expand", "expand", Pos::Verb, "VB", Dep::Xcomp, 1),
            tok(4, ".", Pos::Punct, ".", Dep::Punct, 1),
        ]);
        assert_eq!(is_result_verb(&sent, 3), None);
    }

    #[test]
    fn test_led_to_bigram() {
        // "Our work led to growth ."
        let sent = Sentence::new(vec![
            tok(0, "Our", Pos::Pron, "PRP$", Dep::Poss, 1),
            tok(1, "work", Pos::Noun, "NN", Dep::Nsubj, 2),
            tokl(2, "led", "lead", Pos::Verb, "VBD", Dep::Root, 2),
            tok(3, "to", Pos::Adp, "IN", Dep::Prep, 2),
            tok(4, "growth", Pos::Noun, "NN", Dep::Pobj, 3),
            tok(5, ".", Pos::Punct, ".", Dep::Punct, 2),
        ]);
        assert_eq!(is_result_verb(&sent, 2), Some(RoleFlag::Result));
    }

    #[test]
    fn test_by_verb_is_means() {
        // "We grow by building partnerships ."
        let sent = Sentence::new(vec![
            tok(0, "We", Pos::Pron, "PRP", Dep::Nsubj, 1),
            tokl(1, "grow", "grow", Pos::Verb, "VBP", Dep::Root, 1),
            tok(2, "by", Pos::Adp, "IN", Dep::Prep, 1),
            tokl(3, "building", "build", Pos::Verb, "VBG", Dep::Pobj, 2),
            tok(4, "partnerships", Pos::Noun, "NNS", Dep::Dobj, 3),
            tok(5, ".", Pos::Punct, ".", Dep::Punct, 1),
        ]);
        assert_eq!(is_means_verb(&sent, 3), Some(RoleFlag::Means));
        assert_eq!(classify(&sent, 3), Some(RoleFlag::Means));
    }

    #[test]
    fn test_means_lemma() {
        let sent = Sentence::new(vec![
            tok(0, "We", Pos::Pron, "PRP", Dep::Nsubj, 1),
            tokl(1, "leverage", "leverage", Pos::Verb, "VBP", Dep::Root, 1),
            tok(2, "data", Pos::Noun, "NNS", Dep::Dobj, 1),
            tok(3, ".", Pos::Punct, ".", Dep::Punct, 1),
        ]);
        assert_eq!(is_means_verb(&sent, 1), Some(RoleFlag::Means));
    }

    #[test]
    fn test_relative_clause_is_indirect() {
        // "a company that builds tools ."
        let sent = Sentence::new(vec![
            tok(0, "a", Pos::Det, "DT", Dep::Det, 1),
            tok(1, "company", Pos::Noun, "NN", Dep::Root, 1),
            tok(2, "that", Pos::Pron, "WDT", Dep::Nsubj, 3),
            tokl(3, "builds", "build", Pos::Verb, "VBZ", Dep::Relcl, 1),
            tok(4, "tools", Pos::Noun, "NNS", Dep::Dobj, 3),
            tok(5, ".", Pos::Punct, ".", Dep::Punct, 1),
        ]);
        assert_eq!(
            is_indirect_engagement(&sent, 3),
            Some(RoleFlag::IndirectEngagement)
        );
    }

    #[test]
    fn test_role_noun_head_blocks_indirect() {
        // "a manager leading teams ." - role-noun head blocks the reading
        let sent = Sentence::new(vec![
            tok(0, "a", Pos::Det, "DT", Dep::Det, 1),
            tok(1, "manager", Pos::Noun, "NN", Dep::Root, 1),
            tokl(2, "leading", "lead", Pos::Verb, "VBG", Dep::Acl, 1),
            tok(3, "teams", Pos::Noun, "NNS", Dep::Dobj, 2),
            tok(4, ".", Pos::Punct, ".", Dep::Punct, 1),
        ]);
        assert_eq!(is_indirect_engagement(&sent, 2), None);
    }

    #[test]
    fn test_first_match_order() {
        // A verb that is both "to"-governed and participial classifies as
        // result because result is tried first.
        let sent = to_increase_sentence();
        for (name, predicate) in CLASSIFIERS {
            if *name == "result" {
                assert!(predicate(&sent, 3).is_some());
                break;
            }
        }
        assert_eq!(classify(&sent, 3), Some(RoleFlag::Result));
    }
}
