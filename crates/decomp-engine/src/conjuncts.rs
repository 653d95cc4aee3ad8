//! Conjunct resolution.
//!
//! Coordination ("and" / "&" / ","), apposition, and verb-conjunct chains
//! are followed to find the canonical main token or main verb of a
//! coordinated/enumerated phrase. Coordination is only followed when the
//! textual separator before the token is a recognized marker and the token
//! further back is itself verb-like, which keeps unrelated clauses apart.

use decomp_core::{Dep, Pos, Sentence};

use crate::lexicon::{is_conj_marker, PREP_MEANS};
use crate::morph;

/// Resolved verb coordination: the main (leftmost semantic) verb and the
/// ordered list of all coordinated verbs, main included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConjunctChain {
    pub main_verb: usize,
    pub all_verbs: Vec<usize>,
}

fn text_at(sent: &Sentence, index: Option<usize>) -> &str {
    index
        .and_then(|i| sent.get(i))
        .map(|t| t.text.as_str())
        .unwrap_or("")
}

fn is_verbish(sent: &Sentence, index: usize) -> bool {
    sent.get(index)
        .map(|t| t.pos == Pos::Verb || t.ends_with("ing"))
        .unwrap_or(false)
}

/// Whether the two tokens before `index` read as a verb-coordination
/// context: "V and _", "Ving , _", or "V , and _".
fn coordination_context(sent: &Sentence, index: usize) -> bool {
    let marker = sent
        .prev(index)
        .map(|t| is_conj_marker(&t.text))
        .unwrap_or(false);
    let as_well_as = index > 2 && sent.span_text(index - 3, index).eq_ignore_ascii_case("as well as");
    if !(marker || as_well_as) {
        return false;
    }
    let back2_verbish = index >= 2 && is_verbish(sent, index - 2);
    let comma_back2 = text_at(sent, index.checked_sub(2)) == ","
        && (index >= 3 && sent.get(index - 3).map(|t| t.pos == Pos::Verb).unwrap_or(false)
            || index >= 2 && sent.get(index - 2).map(|t| t.ends_with("ing")).unwrap_or(false));
    back2_verbish || comma_back2
}

/// Resolve the verbs coordinated with `verb` when they form a textual row
/// joined by "and"/"&"/",". Returns None when no marker-adjacent
/// coordination exists.
///
/// e.g. "We re-engineer & launch a new platform", input "launch" ->
/// main "re-engineer", all [re-engineer, launch].
pub fn verb_conjuncts(sent: &Sentence, verb: usize) -> Option<ConjunctChain> {
    let token = sent.get(verb)?;

    if !token.conjuncts.is_empty() {
        if token.dep == Dep::Conj {
            if !coordination_context(sent, verb) {
                return None;
            }
            // Find the head of the chain (the conjunct that is not itself
            // labeled conj) and collect the verb-like members before `verb`.
            for &chain_head in &token.conjuncts {
                let head_token = sent.get(chain_head)?;
                if head_token.dep == Dep::Conj {
                    continue;
                }
                let head_is_verbish = head_token.pos == Pos::Verb
                    || head_token.ends_with("ing")
                    || head_token.conjuncts.iter().all(|&other| {
                        sent.get(other)
                            .map(|t| t.ends_with("ing") && t.index > chain_head)
                            .unwrap_or(false)
                    });
                if !head_is_verbish {
                    continue;
                }

                let mut all_verbs = Vec::new();
                for &member in &head_token.conjuncts {
                    if member == verb {
                        continue;
                    }
                    let member_verbish = sent
                        .get(member)
                        .map(|t| t.pos == Pos::Verb || t.ends_with("ing"))
                        .unwrap_or(false);
                    let followed_by_marker = sent
                        .next(member)
                        .map(|t| {
                            is_conj_marker(&t.text) || head_token.conjuncts.contains(&t.index)
                        })
                        .unwrap_or(false);
                    if member_verbish && member < verb && followed_by_marker {
                        all_verbs.push(member);
                    }
                }
                all_verbs.push(verb);

                let head_in_row = sent
                    .next(chain_head)
                    .map(|t| is_conj_marker(&t.text))
                    .unwrap_or(false)
                    && (head_token.pos == Pos::Verb || head_token.ends_with("ing"));
                let main_verb = if head_in_row {
                    all_verbs.insert(0, chain_head);
                    chain_head
                } else {
                    all_verbs[0]
                };
                return Some(ConjunctChain {
                    main_verb,
                    all_verbs,
                });
            }
            None
        } else {
            // `verb` heads the chain itself
            if !sent
                .next(verb)
                .map(|t| is_conj_marker(&t.text))
                .unwrap_or(false)
            {
                return None;
            }
            let mut all_verbs = vec![verb];
            let members = &token.conjuncts;
            for &member in &members[..members.len().saturating_sub(1)] {
                let member_verbish = sent
                    .get(member)
                    .map(|t| t.pos == Pos::Verb || t.ends_with("ing"))
                    .unwrap_or(false);
                let followed_by_marker = sent
                    .next(member)
                    .map(|t| is_conj_marker(&t.text) || members.contains(&t.index))
                    .unwrap_or(false);
                if member_verbish && followed_by_marker {
                    all_verbs.push(member);
                }
            }
            if let Some(&last) = members.last() {
                all_verbs.push(last);
            }
            Some(ConjunctChain {
                main_verb: verb,
                all_verbs,
            })
        }
    } else if coordination_context(sent, verb) {
        // No parser conjuncts, but the texture says coordination: accept the
        // head two or three tokens back as the main verb.
        let head = token.head;
        if verb >= 2 && (head == verb - 2 || (verb >= 3 && head == verb - 3)) {
            Some(ConjunctChain {
                main_verb: head,
                all_verbs: vec![head, verb],
            })
        } else {
            None
        }
    } else {
        None
    }
}

/// Climb from `token` through conjunct/apposition links and through
/// adposition-headed enumeration structures to the token anchoring the
/// enumeration the keyword is part of.
pub fn main_token(sent: &Sentence, token: usize, span_start: usize, span_end: usize) -> usize {
    let mut current = token;
    let mut span = (span_start, span_end);

    // Climb non-verb conjunct/apposition heads
    while sent
        .get(current)
        .map(|t| t.dep.is_coordinating())
        .unwrap_or(false)
    {
        let head = match sent.head(current) {
            Some(h) => h,
            None => break,
        };
        if head.pos != Pos::Verb && !(span.0..span.1 + 1).contains(&head.index) {
            current = head.index;
            span = (current, current);
        } else {
            break;
        }
    }

    let Some(head) = sent.head(current) else {
        return current;
    };

    // A means/benefactive preposition pins the token in place
    if PREP_MEANS
        .iter()
        .chain(std::iter::once(&"for"))
        .any(|p| head.text_is(p))
    {
        return current;
    }

    // "including" / "like" / "such as" marker lists
    if is_inclusion_marker(sent, head.index) {
        let incl = head.index;
        let incl_head = sent.head(incl).map(|t| t.index).unwrap_or(incl);
        if sent.get(incl_head).map(|t| t.pos == Pos::Verb).unwrap_or(false) {
            let before = sent.prev(incl);
            let before2 = sent.prev_n(incl, 2);
            let propn_before = before.map(|t| t.pos == Pos::Propn).unwrap_or(false)
                || (before.map(|t| t.text == ",").unwrap_or(false)
                    && before2.map(|t| t.pos == Pos::Propn).unwrap_or(false));
            let for_head = |t: Option<&decomp_core::Token>| {
                t.and_then(|t| sent.head(t.index))
                    .filter(|h| h.text_is("for"))
                    .map(|h| h.index)
            };
            if propn_before {
                if let Some(prep) = for_head(before).or_else(|| for_head(before2)) {
                    return sent.head(prep).map(|t| t.index).unwrap_or(current);
                }
            }
            if incl > 1 {
                let Some(prev) = sent.prev(incl) else {
                    return current;
                };
                if prev.text != "," && prev.dep.is_coordinating() {
                    return main_token(sent, incl - 1, incl - 1, incl - 1);
                }
                let prev2 = sent.prev_n(incl, 2);
                if prev.text == ","
                    && prev2.map(|t| t.dep.is_coordinating()).unwrap_or(false)
                {
                    return main_token(sent, incl - 2, incl - 2, incl - 2);
                }
                return if prev.text != "," {
                    prev.index
                } else {
                    prev2.map(|t| t.index).unwrap_or(current)
                };
            }
        } else if incl_head != incl {
            return main_token(sent, incl_head, incl_head, incl_head);
        }
        return current;
    }

    // Adposition-governed structures that continue an enumeration
    if head.pos == Pos::Adp && !is_means_or_for(head) {
        let grand = sent.head(head.index);
        if let Some(grand) = grand {
            if grand.dep.is_coordinating() || is_inclusion_marker(sent, head.index) {
                let and_noun_before = sent
                    .prev(grand.index)
                    .map(|t| t.text == "and")
                    .unwrap_or(false)
                    && sent
                        .prev_n(grand.index, 2)
                        .map(|t| t.pos == Pos::Noun)
                        .unwrap_or(false);
                if and_noun_before {
                    return current;
                }
                if head.dep != Dep::Root && !grand.pos.is_verbal() {
                    return main_token(sent, grand.index, grand.index, grand.index);
                }
            } else if grand.dep == Dep::Pobj {
                // pobj chain: climb to the governing phrase head
                if let Some(anchor) = sent
                    .head(grand.index)
                    .and_then(|t| sent.head(t.index))
                {
                    if !anchor.pos.is_verbal() {
                        return main_token(sent, anchor.index, anchor.index, anchor.index);
                    }
                }
            }
        }
    }

    // Left-neighbor fallbacks: an item preceded by "X and" / "X ," where X
    // is not verb-like continues an enumeration started further left.
    let candidates: Vec<usize> = [
        sent.lefts(current).next().map(|t| t.index),
        sent.lefts(span.1).next().map(|t| t.index),
        Some(current),
        Some(span.0),
    ]
    .into_iter()
    .flatten()
    .collect();
    for candidate in candidates {
        if candidate <= 2 {
            continue;
        }
        let marker_before = sent
            .prev(candidate)
            .map(|t| is_conj_marker(&t.text))
            .unwrap_or(false);
        let back2_nonverbal = sent
            .prev_n(candidate, 2)
            .map(|t| !t.pos.is_verbal())
            .unwrap_or(false);
        let back3_nonverbal = sent
            .prev_n(candidate, 3)
            .map(|t| !t.pos.is_verbal())
            .unwrap_or(false);
        if marker_before && back2_nonverbal && back3_nonverbal {
            let back2 = candidate - 2;
            return if sent.get(back2).map(|t| t.text != ",").unwrap_or(false) {
                main_token(sent, back2, back2, back2)
            } else {
                main_token(sent, candidate - 3, candidate - 3, candidate - 3)
            };
        }
    }
    current
}

fn is_means_or_for(token: &decomp_core::Token) -> bool {
    PREP_MEANS.iter().any(|p| token.text_is(p)) || token.text_is("for")
}

/// "including", "like", or "such as"
fn is_inclusion_marker(sent: &Sentence, index: usize) -> bool {
    let Some(token) = sent.get(index) else {
        return false;
    };
    if token.text_is("including") || token.text_is("like") {
        return true;
    }
    token.text_is("as") && sent.lefts(index).any(|t| t.text_is("such"))
}

/// Walk up through conjunct dependencies while the head is syntactically a
/// verb or lexically verb-like, accumulating the chain.
pub fn main_verb_chain(sent: &Sentence, verb: usize) -> ConjunctChain {
    let last_verb = verb;
    let mut current = verb;
    let mut all_verbs = Vec::new();

    while sent
        .get(current)
        .map(|t| t.dep.is_coordinating())
        .unwrap_or(false)
    {
        let Some(head) = sent.head(current) else {
            break;
        };
        if head.index == current {
            break;
        }
        if head.pos == Pos::Verb {
            current = head.index;
            all_verbs.push(current);
        } else if morph::has_verb_sense(&head.lemma) && !head.ends_with("ings") {
            current = head.index;
            all_verbs.push(current);
        } else {
            break;
        }
    }
    all_verbs.push(last_verb);
    ConjunctChain {
        main_verb: current,
        all_verbs,
    }
}

/// Verb coordination with the conjunct-chain fallback: when the parser
/// labels the verb conj but no textual row is found, climb the conj heads.
pub fn all_verbs(sent: &Sentence, verb: usize) -> ConjunctChain {
    if let Some(chain) = verb_conjuncts(sent, verb) {
        if !chain.all_verbs.is_empty() {
            return chain;
        }
    }
    if sent.get(verb).map(|t| t.dep == Dep::Conj).unwrap_or(false) {
        let chain = main_verb_chain(sent, verb);
        if !chain.all_verbs.is_empty() {
            return chain;
        }
    }
    ConjunctChain {
        main_verb: verb,
        all_verbs: vec![verb],
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{launch_and_drive, tok};
    use decomp_core::Sentence;

    #[test]
    fn test_verb_conjuncts_row() {
        let sent = launch_and_drive();
        // "launch and drive": resolving from "drive"
        let chain = verb_conjuncts(&sent, 3).unwrap();
        assert_eq!(chain.main_verb, 1);
        assert_eq!(chain.all_verbs, vec![1, 3]);
    }

    #[test]
    fn test_verb_conjuncts_requires_marker() {
        // "We plan to launch products ." - no coordination marker anywhere
        let sent = Sentence::new(vec![
            tok(0, "We", Pos::Pron, "PRP", Dep::Nsubj, 1),
            tok(1, "plan", Pos::Verb, "VBP", Dep::Root, 1),
            tok(2, "to", Pos::Part, "TO", Dep::Aux, 3),
            tok(3, "launch", Pos::Verb, "VB", Dep::Xcomp, 1),
            tok(4, "products", Pos::Noun, "NNS", Dep::Dobj, 3),
            tok(5, ".", Pos::Punct, ".", Dep::Punct, 1),
        ]);
        assert!(verb_conjuncts(&sent, 3).is_none());
        assert!(verb_conjuncts(&sent, 1).is_none());
    }

    #[test]
    fn test_three_verb_row() {
        // "We launch , drive and own growth ."
        let sent = Sentence::new(vec![
            tok(0, "We", Pos::Pron, "PRP", Dep::Nsubj, 1),
            tok(1, "launch", Pos::Verb, "VBP", Dep::Root, 1),
            tok(2, ",", Pos::Punct, ",", Dep::Punct, 1),
            tok(3, "drive", Pos::Verb, "VBP", Dep::Conj, 1),
            tok(4, "and", Pos::Cconj, "CC", Dep::Cc, 3),
            tok(5, "own", Pos::Verb, "VBP", Dep::Conj, 3),
            tok(6, "growth", Pos::Noun, "NN", Dep::Dobj, 5),
            tok(7, ".", Pos::Punct, ".", Dep::Punct, 1),
        ]);
        let chain = verb_conjuncts(&sent, 5).unwrap();
        assert_eq!(chain.main_verb, 1);
        assert!(chain.all_verbs.contains(&3));
        assert!(chain.all_verbs.contains(&5));
    }

    #[test]
    fn test_all_verbs_falls_back_to_self() {
        let sent = launch_and_drive();
        let chain = all_verbs(&sent, 1);
        // "launch" heads its own row
        assert_eq!(chain.main_verb, 1);
        assert_eq!(chain.all_verbs, vec![1, 3]);
    }

    #[test]
    fn test_main_token_enumeration() {
        // "Expertise : SEO , PPC and analytics ."
        let sent = Sentence::new(vec![
            tok(0, "Expertise", Pos::Noun, "NN", Dep::Root, 0),
            tok(1, ":", Pos::Punct, ":", Dep::Punct, 0),
            tok(2, "SEO", Pos::Noun, "NN", Dep::Appos, 0),
            tok(3, ",", Pos::Punct, ",", Dep::Punct, 2),
            tok(4, "PPC", Pos::Noun, "NN", Dep::Conj, 2),
            tok(5, "and", Pos::Cconj, "CC", Dep::Cc, 4),
            tok(6, "analytics", Pos::Noun, "NN", Dep::Conj, 4),
            tok(7, ".", Pos::Punct, ".", Dep::Punct, 0),
        ]);
        // "analytics" climbs conj -> conj -> appos up to the anchor noun
        assert_eq!(main_token(&sent, 6, 6, 6), 0);
    }

    #[test]
    fn test_main_token_stops_at_means_prep() {
        // "growth through partnerships" - pobj of "through" stays put
        let sent = Sentence::new(vec![
            tok(0, "We", Pos::Pron, "PRP", Dep::Nsubj, 1),
            tok(1, "grow", Pos::Verb, "VBP", Dep::Root, 1),
            tok(2, "through", Pos::Adp, "IN", Dep::Prep, 1),
            tok(3, "partnerships", Pos::Noun, "NNS", Dep::Pobj, 2),
            tok(4, ".", Pos::Punct, ".", Dep::Punct, 1),
        ]);
        assert_eq!(main_token(&sent, 3, 3, 3), 3);
    }

    #[test]
    fn test_main_verb_chain() {
        // "launching , growing and owning products" with conj links
        let sent = Sentence::new(vec![
            tok(0, "launching", Pos::Verb, "VBG", Dep::Root, 0),
            tok(1, ",", Pos::Punct, ",", Dep::Punct, 0),
            tok(2, "growing", Pos::Verb, "VBG", Dep::Conj, 0),
            tok(3, "and", Pos::Cconj, "CC", Dep::Cc, 2),
            tok(4, "owning", Pos::Verb, "VBG", Dep::Conj, 2),
            tok(5, "products", Pos::Noun, "NNS", Dep::Dobj, 0),
        ]);
        let chain = main_verb_chain(&sent, 4);
        assert_eq!(chain.main_verb, 0);
        assert_eq!(chain.all_verbs, vec![2, 0, 4]);
    }
}
