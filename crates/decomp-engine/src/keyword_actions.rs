//! Verb search for one keyword.
//!
//! Dispatches on the main token's dependency and position: subject search,
//! means markers, benefactive "for", verb-headed extraction, derivable
//! direct objects, adposition-governed phrases, and the nearest-verb
//! fallback. Each branch yields zero or more role-tagged verb tuples.

use decomp_core::{Dep, KeywordSpan, Pos, RoleFlag, Sentence, VerbTuple};

use crate::conjuncts::{main_token, main_verb_chain};
use crate::lexicon::{has, is_placeholder_object, is_role_noun, is_stoplisted, PREP_MEANS,
    WITH_USE_PHRASES};
use crate::morph::has_verb_sense;
use crate::query::{nearest_verb, Direction};
use crate::tuples::{action_verb_tuples, other_verbs};

/// Resolve the anchor token of a keyword span: usually the main (rightmost)
/// token, unless the span's first or last inner token heads it.
pub fn main_token_from_span(sent: &Sentence, span: &KeywordSpan) -> usize {
    let main = span.main;
    let Some(main_token) = sent.get(main) else {
        return main;
    };
    if span.start != main && main_token.head == span.start {
        return span.start;
    }
    let inner_end = span.inner_end;
    if inner_end != main
        && main_token.head == inner_end
        && sent
            .get(span.start)
            .map(|t| t.head == inner_end)
            .unwrap_or(false)
    {
        return inner_end;
    }
    main
}

/// "for X" beneficiary: the keyword (or its phrase) is introduced by a
/// non-initial "for".
fn benefactive(sent: &Sentence, main_tok: usize, span: &KeywordSpan) -> Option<Vec<VerbTuple>> {
    let mut candidates: Vec<usize> = Vec::new();
    if let Some(head) = sent.head(main_tok) {
        candidates.push(head.index);
    }
    if let Some(prev) = sent.prev(main_tok) {
        candidates.push(prev.index);
    }
    if let Some(first_left) = sent.lefts(main_tok).next() {
        if let Some(before) = sent.prev(first_left.index) {
            candidates.push(before.index);
        }
    }
    for candidate in candidates {
        let Some(token) = sent.get(candidate) else {
            continue;
        };
        if token.text_is("for") && candidate != 0 {
            let mut tuples = other_verbs(sent, candidate, span);
            tuples.push(VerbTuple::marker(main_tok, RoleFlag::Benefactive));
            return Some(tuples);
        }
    }
    None
}

/// Whether the main token's head is a usable governing verb (not an
/// adjectival participle posing as one).
fn verb_parent_condition(sent: &Sentence, main_tok: usize, span: &KeywordSpan) -> bool {
    let Some(head) = sent.head(main_tok) else {
        return false;
    };
    if !head.pos.is_verbal() || span.contains(head.index) {
        return false;
    }
    if !head.ends_with("ed") {
        return true;
    }
    let head_of_head_role = sent
        .head(head.index)
        .map(|t| is_role_noun(&t.text))
        .unwrap_or(false);
    let comma_adj = sent.prev(head.index).map(|t| t.text == ",").unwrap_or(false)
        && sent
            .prev_n(head.index, 2)
            .map(|t| t.pos == Pos::Adj)
            .unwrap_or(false);
    let adj_before = sent
        .prev(head.index)
        .map(|t| t.pos == Pos::Adj)
        .unwrap_or(false);
    let dangling_conjunct = head.dep.is_coordinating()
        && !sent
            .head(head.index)
            .map(|t| t.ends_with("ed"))
            .unwrap_or(false);
    !(head_of_head_role || comma_adj || adj_before || dangling_conjunct)
}

/// Whether the keyword is introduced as a means ("by/through/via" or a
/// "with the use/help of" idiom), excluding passive agents.
fn means_condition(sent: &Sentence, main_tok: usize, span: &KeywordSpan) -> bool {
    let head = sent.head(main_tok);
    let before_span = sent.prev(span.start);
    let head_means = head.map(|t| has(PREP_MEANS, &t.text)).unwrap_or(false);
    let before_means = before_span.map(|t| has(PREP_MEANS, &t.text)).unwrap_or(false);
    let idiom = main_tok >= 4
        && WITH_USE_PHRASES.contains(&sent.span_text(main_tok - 4, main_tok).to_lowercase().as_str());
    if !(head_means || before_means || idiom) {
        return false;
    }
    let head_agent = head
        .map(|t| t.text_is("by") && t.dep == Dep::Agent)
        .unwrap_or(false);
    let before_agent = before_span
        .map(|t| t.text_is("by") && t.dep == Dep::Agent)
        .unwrap_or(false);
    !(head_agent && !before_agent)
}

/// Subject path: the keyword is the clause subject; its predicate verb is
/// searched to the right.
fn subject_verbs(
    sent: &Sentence,
    main_tok: usize,
    kw: usize,
    span: &KeywordSpan,
) -> Vec<VerbTuple> {
    let marker = || vec![VerbTuple::marker(main_tok, RoleFlag::Subject)];
    if let Some(head) = sent.head(main_tok) {
        if head.pos.is_verbal() && !span.contains(head.index) && is_stoplisted(&head.text) {
            // A stoplisted governor forces the rightward search below
            if nearest_verb(sent, main_tok, span, Direction::Right).is_none() {
                return marker();
            }
        }
    }
    match nearest_verb(sent, main_tok, span, Direction::Right) {
        Some(verb) => action_verb_tuples(sent, main_tok, kw, verb, span, "", RoleFlag::Action),
        None => marker(),
    }
}

/// The keyword's verb search: returns zero or more role-tagged tuples, or
/// an empty list when nothing governs the keyword (the no-verb handler
/// takes over).
pub fn actions_for_keyword(sent: &Sentence, span: &KeywordSpan) -> Vec<VerbTuple> {
    let resolved = main_token_from_span(sent, span);
    let kw = resolved;
    let mut main_tok = resolved;

    // Coordinated keywords anchor at the head of their enumeration
    match sent.get(main_tok) {
        Some(token) if token.pos == Pos::Verb => {
            main_tok = main_verb_chain(sent, main_tok).main_verb;
        }
        Some(_) => {
            main_tok = main_token(sent, main_tok, span.start, span.inner_end);
        }
        None => return Vec::new(),
    }

    // "... include X": the enumeration head takes over; a ROOT "include"
    // marks a bare enumeration
    if sent
        .head(main_tok)
        .map(|t| t.lemma == "include")
        .unwrap_or(false)
    {
        main_tok = sent.head(main_tok).map(|t| t.index).unwrap_or(main_tok);
        if sent.get(main_tok).map(|t| t.dep == Dep::Root).unwrap_or(false) {
            return vec![VerbTuple::marker(main_tok, RoleFlag::Enum)];
        }
    }

    // "a range of X" style placeholders reattach to the placeholder noun
    let of_placeholder = sent
        .head(main_tok)
        .filter(|h| h.text_is("of"))
        .and_then(|h| sent.head(h.index))
        .filter(|g| is_placeholder_object(&g.text.to_lowercase()))
        .map(|g| g.index);
    if let Some(placeholder) = of_placeholder {
        main_tok = placeholder;
    }

    // A role noun under the copula is not an action context at all; the
    // no-verb handler classifies it as a role.
    let Some(main) = sent.get(main_tok) else {
        return Vec::new();
    };
    let names_role = is_role_noun(&main.text)
        || sent.next(main_tok).map(|t| is_role_noun(&t.text)).unwrap_or(false);
    if names_role && sent.head(main_tok).map(|t| t.lemma == "be").unwrap_or(false) {
        return Vec::new();
    }

    if main.dep == Dep::Nsubj || (main.dep == Dep::Root && main.pos != Pos::Verb) {
        return subject_verbs(sent, main_tok, kw, span);
    }

    if means_condition(sent, main_tok, span) {
        let mut tuples = other_verbs(sent, main_tok, span);
        tuples.push(VerbTuple::marker(main_tok, RoleFlag::Means));
        return tuples;
    }

    if let Some(tuples) = benefactive(sent, main_tok, span) {
        return tuples;
    }

    if verb_parent_condition(sent, main_tok, span)
        && !matches!(main.dep, Dep::Root | Dep::Conj)
    {
        let head = sent.head(main_tok).map(|t| t.index).unwrap_or(main_tok);
        let verb = if head > main_tok
            || sent.get(head).map(|t| is_stoplisted(&t.text)).unwrap_or(false)
        {
            match nearest_verb(sent, main_tok, span, Direction::Left) {
                Some(verb) => verb,
                None => return Vec::new(),
            }
        } else {
            head
        };
        return action_verb_tuples(sent, main_tok, kw, verb, span, "", RoleFlag::Action);
    }

    if main.dep == Dep::Dobj
        && sent.head(main_tok).map(|h| !span.contains(h.index)).unwrap_or(false)
    {
        if let Some(head) = sent.head(main_tok) {
            if has_verb_sense(&head.lemma) {
                return action_verb_tuples(sent, main_tok, kw, head.index, span, "", RoleFlag::Action);
            }
        }
    } else if sent.head(main_tok).map(|h| h.pos == Pos::Adp).unwrap_or(false) {
        let prep = sent.head(main_tok).map(|t| t.index).unwrap_or(main_tok);
        if verb_parent_condition(sent, prep, span) {
            let prep_text = sent.get(prep).map(|t| t.text.clone()).unwrap_or_default();
            let governing = sent.head(prep).map(|t| t.index).unwrap_or(prep);
            let verb = if sent
                .get(governing)
                .map(|t| is_stoplisted(&t.text))
                .unwrap_or(false)
            {
                match nearest_verb(sent, main_tok, span, Direction::Left) {
                    Some(verb) => verb,
                    None => return Vec::new(),
                }
            } else {
                governing
            };
            return action_verb_tuples(sent, main_tok, kw, verb, span, &prep_text, RoleFlag::Action);
        }
    }

    match nearest_verb(sent, main_tok, span, Direction::Left) {
        Some(verb) => action_verb_tuples(sent, main_tok, kw, verb, span, "", RoleFlag::Action),
        None => Vec::new(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{launch_and_drive, marketing_specialist, tok, tokl};
    use decomp_core::Sentence;

    #[test]
    fn test_direct_object_keyword_gets_action_tuples() {
        let sent = launch_and_drive();
        let tuples = actions_for_keyword(&sent, &KeywordSpan::single(4));
        assert_eq!(tuples.len(), 2);
        assert_eq!(tuples[0].verb, "launch");
        assert_eq!(tuples[1].verb, "drive");
        assert!(tuples.iter().all(|t| t.flag == RoleFlag::Action));
    }

    #[test]
    fn test_benefactive_keyword() {
        let sent = launch_and_drive();
        // keyword "startups": pobj of "for"
        let tuples = actions_for_keyword(&sent, &KeywordSpan::single(6));
        assert!(tuples
            .iter()
            .any(|t| t.flag == RoleFlag::Benefactive && t.verb_index == Some(6)));
    }

    #[test]
    fn test_means_keyword() {
        // "We grow revenue through partnerships ."
        let sent = Sentence::new(vec![
            tok(0, "We", Pos::Pron, "PRP", Dep::Nsubj, 1),
            tokl(1, "grow", "grow", Pos::Verb, "VBP", Dep::Root, 1),
            tok(2, "revenue", Pos::Noun, "NN", Dep::Dobj, 1),
            tok(3, "through", Pos::Adp, "IN", Dep::Prep, 1),
            tok(4, "partnerships", Pos::Noun, "NNS", Dep::Pobj, 3),
            tok(5, ".", Pos::Punct, ".", Dep::Punct, 1),
        ]);
        let tuples = actions_for_keyword(&sent, &KeywordSpan::single(4));
        assert!(tuples
            .iter()
            .any(|t| t.flag == RoleFlag::Means && t.verb.is_empty()));
    }

    #[test]
    fn test_subject_keyword_searches_right() {
        // "Growth marketing drives revenue ." keyword "growth marketing"
        let sent = Sentence::new(vec![
            tok(0, "Growth", Pos::Noun, "NN", Dep::Compound, 1),
            tok(1, "marketing", Pos::Noun, "NN", Dep::Nsubj, 2),
            tokl(2, "drives", "drive", Pos::Verb, "VBZ", Dep::Root, 2),
            tok(3, "revenue", Pos::Noun, "NN", Dep::Dobj, 2),
            tok(4, ".", Pos::Punct, ".", Dep::Punct, 2),
        ]);
        let tuples = actions_for_keyword(&sent, &KeywordSpan::new(0, 0, 1));
        assert!(!tuples.is_empty());
        assert_eq!(tuples[0].verb, "drive");
    }

    #[test]
    fn test_role_noun_copula_defers_to_no_verb_handler() {
        let sent = marketing_specialist();
        assert!(actions_for_keyword(&sent, &KeywordSpan::new(3, 3, 4)).is_empty());
    }

    #[test]
    fn test_enum_under_root_include() {
        // "Specialties include SEO , PPC ."
        let sent = Sentence::new(vec![
            tok(0, "Specialties", Pos::Noun, "NNS", Dep::Nsubj, 1),
            tokl(1, "include", "include", Pos::Verb, "VBP", Dep::Root, 1),
            tok(2, "SEO", Pos::Noun, "NN", Dep::Dobj, 1),
            tok(3, ",", Pos::Punct, ",", Dep::Punct, 2),
            tok(4, "PPC", Pos::Noun, "NN", Dep::Conj, 2),
            tok(5, ".", Pos::Punct, ".", Dep::Punct, 1),
        ]);
        let tuples = actions_for_keyword(&sent, &KeywordSpan::single(2));
        assert_eq!(tuples.len(), 1);
        assert_eq!(tuples[0].flag, RoleFlag::Enum);
    }
}
