//! Verb-tuple assembly.
//!
//! Renders verb text (auxiliary merging, negation, copular predicates),
//! pairs every verb with its objects, and filters out non-agentive verbs.

use decomp_core::{Dep, KeywordSpan, Pos, RoleFlag, Sentence, VerbTuple};

use crate::conjuncts::{self, ConjunctChain};
use crate::query::{
    action_verb_objects, compound_phrase, nearest_verb, preposition, span_preposition, Direction,
};
use crate::verb_class::classify;

/// Rendered verb text anchored at a verb index
pub type VerbText = (usize, String);

/// Whether the keyword functions as the clause subject or a copular
/// predicate, overriding the default action reading.
pub fn subject_state_flag(
    sent: &Sentence,
    main_tok: usize,
    verb: usize,
    flag: RoleFlag,
) -> RoleFlag {
    let Some(main) = sent.get(main_tok) else {
        return flag;
    };
    if main.dep.is_subject() || (main.dep == Dep::Root && main.pos.is_nominal()) {
        return RoleFlag::Subject;
    }
    if sent.get(verb).map(|t| t.lemma == "be").unwrap_or(false) {
        return RoleFlag::State;
    }
    flag
}

/// Render each verb of the chain: auxiliaries merge with their participles,
/// negation is kept, and a copula picks up its predicate nominal/adjective.
pub fn verbs_text(sent: &Sentence, all_verbs: &[usize], main_tok: usize) -> Vec<VerbText> {
    let mut rendered = Vec::with_capacity(all_verbs.len());
    for &v in all_verbs {
        let Some(verb) = sent.get(v) else {
            continue;
        };

        let mut base = verb.lemma.clone();
        let negated = sent
            .prev_n(v, 2)
            .map(|t| t.lemma == "be" || t.lemma == "do")
            .unwrap_or(false)
            && sent.prev(v).map(|t| t.text == "not").unwrap_or(false);
        if negated {
            base = sent.span_text(v - 2, v + 1);
        }

        if verb.pos == Pos::Aux {
            if let Some(participle) = sent
                .next(v)
                .filter(|t| t.pos == Pos::Verb && t.tag == "VBN")
            {
                rendered.push((v, format!("{} {}", verb.text, participle.text)));
                continue;
            }
        }
        if verb.tag == "VBN" {
            if let Some(aux) = sent.lefts(v).find(|t| t.pos == Pos::Aux) {
                rendered.push((v, format!("{} {}", aux.text, verb.text)));
                continue;
            }
            if !verb.conjuncts.is_empty() {
                let mut aux_text = None;
                for conjunct in sent.conjuncts(v) {
                    if let Some(aux) = sent.lefts(conjunct.index).find(|t| t.pos == Pos::Aux) {
                        aux_text = Some(aux.text.clone());
                    }
                }
                match aux_text {
                    Some(aux) => rendered.push((v, format!("{} {}", aux, verb.text))),
                    None => rendered.push((v, base)),
                }
                continue;
            }
        }
        if verb.lemma == "be" {
            if let Some(pred) = sent
                .rights(v)
                .find(|t| matches!(t.pos, Pos::Adj | Pos::Noun))
                .filter(|t| t.pos == Pos::Adj || sent.rights(v).any(|r| r.pos == Pos::Adj))
            {
                let prep = preposition(sent, pred.index)
                    .and_then(|i| sent.get(i))
                    .map(|t| format!(" {}", t.text))
                    .unwrap_or_default();
                rendered.push((v, format!("{} {}{}", verb.text, pred.text, prep)));
                continue;
            }
            if let Some(one) = sent.rights(v).find(|t| t.text == "one") {
                // "is one of the <noun>" idiom
                let noun = sent
                    .rights(one.index)
                    .find(|t| t.text == "of")
                    .and_then(|of| sent.rights(of.index).find(|t| t.pos == Pos::Noun));
                match noun {
                    Some(noun) if noun.index != main_tok => {
                        if let Some(compound) = compound_phrase(sent, noun.index) {
                            rendered.push((v, format!("{} {}", verb.text, compound)));
                        } else if main_tok + 1 == noun.index {
                            let main_text = sent
                                .get(main_tok)
                                .map(|t| t.text.as_str())
                                .unwrap_or("");
                            rendered
                                .push((v, format!("{} {} {}", verb.text, main_text, noun.text)));
                        } else {
                            rendered.push((v, format!("{} {}", verb.text, noun.text)));
                        }
                    }
                    _ => rendered.push((v, base)),
                }
                continue;
            }
            if let Some(noun) = sent.rights(v).find(|t| t.pos == Pos::Noun) {
                if noun.index != main_tok {
                    if let Some(compound) = compound_phrase(sent, noun.index) {
                        rendered.push((v, format!("{} {}", verb.text, compound)));
                    } else if main_tok + 1 == noun.index {
                        let main_text =
                            sent.get(main_tok).map(|t| t.text.as_str()).unwrap_or("");
                        rendered.push((v, format!("{} {} {}", verb.text, main_text, noun.text)));
                    } else {
                        rendered.push((v, format!("{} {}", verb.text, noun.text)));
                    }
                } else {
                    rendered.push((v, base));
                }
                continue;
            }
        }
        rendered.push((v, base));
    }
    rendered
}

/// Objects per verb of the chain, aligned with `all_verbs`. Empty lists
/// become a single empty string so zipping stays aligned.
pub fn objects_text(
    sent: &Sentence,
    main_tok: usize,
    kw: usize,
    span: &KeywordSpan,
    all_verbs: &[usize],
) -> Vec<(usize, Vec<String>)> {
    let mut per_verb = Vec::with_capacity(all_verbs.len());
    for &v in all_verbs {
        let mut objects = action_verb_objects(sent, v, all_verbs, main_tok, span);
        if !objects.is_empty() && sent.get(kw).map(|t| t.dep == Dep::Pobj).unwrap_or(false) {
            // A keyword that is itself a prepositional object keeps its
            // governing phrase attached to each object.
            let lead = span
                .start
                .checked_sub(2)
                .map(|s| sent.span_text(s, span.start))
                .unwrap_or_default();
            let lead_word = sent
                .prev_n(span.start, 2)
                .map(|t| t.text.clone())
                .unwrap_or_default();
            objects = objects
                .into_iter()
                .map(|o| {
                    if !lead.is_empty() && !o.contains(&lead_word) && span.start > v {
                        format!("{o} {lead}")
                    } else {
                        o
                    }
                })
                .collect();
        }
        if objects.is_empty() {
            objects.push(String::new());
        }
        per_verb.push((v, objects));
    }
    per_verb
}

/// Cross verbs with objects into tuples. One list of real objects is shared
/// across all verbs (full product); several lists pair verb-by-verb.
pub fn form_verb_object_tuples(
    mut tuples: Vec<VerbTuple>,
    verbs_text: &[VerbText],
    objects: &[(usize, Vec<String>)],
    prep: &str,
    flag: RoleFlag,
) -> Vec<VerbTuple> {
    let relevant: Vec<&Vec<String>> = objects
        .iter()
        .filter(|(_, objs)| objs.as_slice() != [String::new()])
        .map(|(_, objs)| objs)
        .collect();

    if relevant.len() == 1 {
        for (index, verb) in verbs_text {
            for object in relevant[0] {
                tuples.push(VerbTuple::new(Some(*index), verb, object, prep, flag));
            }
        }
    } else if !relevant.is_empty() {
        for ((index, verb), (_, objs)) in verbs_text.iter().zip(objects.iter()) {
            for object in objs {
                tuples.push(VerbTuple::new(Some(*index), verb, object, prep, flag));
            }
        }
    } else {
        for (index, verb) in verbs_text {
            tuples.push(VerbTuple::new(Some(*index), verb, "", prep, flag));
        }
    }
    tuples
}

/// Drop tuples for verbs that do not refer to any agent: impersonal
/// third-person singular ("it helps ...") and certain bare past forms of an
/// adjectival main verb.
pub fn filter_non_agentive(
    sent: &Sentence,
    tuples: Vec<VerbTuple>,
    verb: usize,
    main_verb: usize,
) -> Vec<VerbTuple> {
    let Some(token) = sent.get(verb) else {
        return tuples;
    };
    if token.tag == "VBZ" && has_impersonal_subject(sent, verb) {
        return Vec::new();
    }
    if token.tag == "VBD" {
        let main = sent.get(main_verb);
        if main.map(|t| t.dep == Dep::Amod).unwrap_or(false) {
            let prep_before = sent
                .prev(main_verb)
                .map(|t| t.pos == Pos::Adp)
                .unwrap_or(false);
            let verbal_head = sent
                .head(main_verb)
                .map(|h| h.pos == Pos::Verb)
                .unwrap_or(false)
                && main
                    .map(|t| !matches!(t.dep, Dep::Root | Dep::Conj))
                    .unwrap_or(false);
            if prep_before || verbal_head {
                return Vec::new();
            }
        }
    }
    tuples
}

/// "it" as nominal subject of the verb
pub fn has_impersonal_subject(sent: &Sentence, verb: usize) -> bool {
    sent.lefts(verb)
        .chain(sent.rights(verb))
        .any(|t| t.text == "it" && t.dep == Dep::Nsubj)
}

/// For a main token whose keyword carries a non-action flag, search for a
/// second verb to its left and return its tuples tagged with that verb's
/// own classified flag (state/result/means/indirect engagement).
pub fn other_verbs(sent: &Sentence, main_tok: usize, span: &KeywordSpan) -> Vec<VerbTuple> {
    let Some(verb2) = nearest_verb(sent, main_tok, span, Direction::Left) else {
        return Vec::new();
    };

    let chain = conjuncts::all_verbs(sent, verb2);
    let mut all = chain.all_verbs.clone();
    let prep = span_preposition(sent, preposition(sent, verb2), span);

    let mut flag2 = classify(sent, verb2);
    if let Some(found) = flag2 {
        if !all.iter().all(|&v| classify(sent, v) == Some(found)) {
            all = vec![verb2];
        }
    }
    if sent.get(verb2).map(|t| t.lemma == "be").unwrap_or(false) {
        flag2 = Some(RoleFlag::State);
    }
    let Some(flag2) = flag2 else {
        return Vec::new();
    };

    let texts = verbs_text(sent, &all, main_tok);
    let objects = action_verb_objects(sent, verb2, &all, main_tok, span);

    let last = *all.last().unwrap_or(&verb2);
    let has_object_context = sent
        .rights(verb2)
        .any(|t| t.dep == Dep::Dobj)
        || sent.next(last).map(|t| t.pos == Pos::Noun).unwrap_or(false);

    if has_object_context && !objects.is_empty() {
        let mut tuples = Vec::new();
        for (index, verb) in &texts {
            for object in &objects {
                tuples.push(VerbTuple::new(Some(*index), verb, object, &prep, flag2));
            }
        }
        tuples
    } else {
        texts
            .iter()
            .map(|(index, verb)| VerbTuple::new(Some(*index), verb, "", &prep, flag2))
            .collect()
    }
}

/// Clausal complements of an enabling verb ("help", "enable", ...) and
/// their conjuncts, rendered as "<verb> to <complement>" chains.
pub fn ccomp_chain(sent: &Sentence, verb: usize) -> (Vec<usize>, Vec<VerbText>) {
    let mut all = Vec::new();
    let mut texts = Vec::new();
    let Some(token) = sent.get(verb) else {
        return (vec![verb], texts);
    };
    let lemma = token.lemma.clone();

    let complements: Vec<usize> = sent
        .rights(verb)
        .filter(|t| matches!(t.dep, Dep::Ccomp | Dep::Conj))
        .map(|t| t.index)
        .collect();
    for comp in complements {
        all.push(comp);
        let comp_text = sent.get(comp).map(|t| t.text.clone()).unwrap_or_default();
        texts.push((verb, format!("{lemma} to {comp_text}")));
        if let Some(chain) = conjuncts::verb_conjuncts(sent, comp) {
            for &member in &chain.all_verbs {
                all.push(member);
                let text = sent.get(member).map(|t| t.text.clone()).unwrap_or_default();
                texts.push((verb, format!("{lemma} to {text}")));
            }
        }
        let conj_rights: Vec<usize> = sent
            .rights(comp)
            .filter(|t| t.dep == Dep::Conj)
            .map(|t| t.index)
            .collect();
        for member in conj_rights {
            all.push(member);
            let text = sent.get(member).map(|t| t.text.clone()).unwrap_or_default();
            texts.push((verb, format!("{lemma} to {text}")));
        }
    }

    if all.is_empty() {
        all.push(verb);
    }
    if texts.is_empty() {
        texts.push((verb, lemma));
    }
    (all, texts)
}

/// The full action-tuple extraction for one governing verb: resolve the
/// conjunct chain, re-classify, render verb texts, pair objects, and filter
/// non-agentive forms.
pub fn action_verb_tuples(
    sent: &Sentence,
    main_tok: usize,
    kw: usize,
    verb: usize,
    span: &KeywordSpan,
    prep: &str,
    flag: RoleFlag,
) -> Vec<VerbTuple> {
    let mut tuples = Vec::new();
    let prep = if prep.is_empty() {
        span_preposition(sent, None, span)
    } else {
        prep.to_string()
    };

    let ConjunctChain {
        mut main_verb,
        mut all_verbs,
    } = conjuncts::all_verbs(sent, verb);

    let mut flag = subject_state_flag(sent, main_tok, verb, flag);
    if flag == RoleFlag::Action {
        if let Some(found) = classify(sent, verb) {
            flag = found;
            if !all_verbs.iter().all(|&v| classify(sent, v) == Some(found)) {
                all_verbs = vec![verb];
                main_verb = verb;
            }
            let secondary = other_verbs(sent, main_verb, span);
            if !secondary.is_empty() {
                tuples = secondary;
            }
        }
    }

    let texts = verbs_text(sent, &all_verbs, main_tok);
    let objects = objects_text(sent, main_tok, kw, span, &all_verbs);

    let tuples = form_verb_object_tuples(tuples, &texts, &objects, &prep, flag);
    filter_non_agentive(sent, tuples, verb, main_verb)
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
    fn test_action_tuples_for_coordinated_verbs() {
        let sent = launch_and_drive();
        let span = KeywordSpan::single(4);
        let tuples = action_verb_tuples(&sent, 4, 4, 3, &span, "", RoleFlag::Action);
        assert_eq!(tuples.len(), 2);
        assert_eq!(tuples[0].verb, "launch");
        assert_eq!(tuples[1].verb, "drive");
        assert!(tuples.iter().all(|t| t.flag == RoleFlag::Action));
        assert!(tuples.iter().all(|t| t.object.is_empty()));
    }

    #[test]
    fn test_copula_becomes_state() {
        let sent = marketing_specialist();
        let span = KeywordSpan::new(3, 3, 4);
        let tuples = action_verb_tuples(&sent, 4, 4, 1, &span, "", RoleFlag::Action);
        assert!(tuples.iter().all(|t| t.flag == RoleFlag::State));
    }

    #[test]
    fn test_subject_flag_overrides() {
        // "Growth drives revenue ." with keyword "growth" as subject
        let sent = Sentence::new(vec![
            tok(0, "Growth", Pos::Noun, "NN", Dep::Nsubj, 1),
            tok(1, "drives", Pos::Verb, "VBZ", Dep::Root, 1),
            tok(2, "revenue", Pos::Noun, "NN", Dep::Dobj, 1),
            tok(3, ".", Pos::Punct, ".", Dep::Punct, 1),
        ]);
        assert_eq!(
            subject_state_flag(&sent, 0, 1, RoleFlag::Action),
            RoleFlag::Subject
        );
    }

    #[test]
    fn test_verbs_text_merges_auxiliary() {
        // "Campaigns were launched ."
        let sent = Sentence::new(vec![
            tok(0, "Campaigns", Pos::Noun, "NNS", Dep::Nsubjpass, 2),
            tokl(1, "were", "be", Pos::Aux, "VBD", Dep::Auxpass, 2),
            tokl(2, "launched", "launch", Pos::Verb, "VBN", Dep::Root, 2),
            tok(3, ".", Pos::Punct, ".", Dep::Punct, 2),
        ]);
        let texts = verbs_text(&sent, &[2], 0);
        assert_eq!(texts, vec![(2, "were launched".to_string())]);
    }

    #[test]
    fn test_verbs_text_keeps_negation() {
        // "We do not sell data ."
        let sent = Sentence::new(vec![
            tok(0, "We", Pos::Pron, "PRP", Dep::Nsubj, 3),
            tokl(1, "do", "do", Pos::Aux, "VBP", Dep::Aux, 3),
            tok(2, "not", Pos::Part, "RB", Dep::Advmod, 3),
            tokl(3, "sell", "sell", Pos::Verb, "VB", Dep::Root, 3),
            tok(4, "data", Pos::Noun, "NNS", Dep::Dobj, 3),
            tok(5, ".", Pos::Punct, ".", Dep::Punct, 3),
        ]);
        let texts = verbs_text(&sent, &[3], 4);
        assert_eq!(texts, vec![(3, "do not sell".to_string())]);
    }

    #[test]
    fn test_impersonal_subject_filtered() {
        // "it helps startups ."
        let sent = Sentence::new(vec![
            tok(0, "it", Pos::Pron, "PRP", Dep::Nsubj, 1),
            tokl(1, "helps", "help", Pos::Verb, "VBZ", Dep::Root, 1),
            tok(2, "startups", Pos::Noun, "NNS", Dep::Dobj, 1),
            tok(3, ".", Pos::Punct, ".", Dep::Punct, 1),
        ]);
        let tuples = vec![VerbTuple::new(Some(1), "help", "", "", RoleFlag::Action)];
        assert!(filter_non_agentive(&sent, tuples, 1, 1).is_empty());
    }

    #[test]
    fn test_ccomp_chain() {
        // "We help clients grow and scale ."
        let sent = Sentence::new(vec![
            tok(0, "We", Pos::Pron, "PRP", Dep::Nsubj, 1),
            tokl(1, "help", "help", Pos::Verb, "VBP", Dep::Root, 1),
            tok(2, "clients", Pos::Noun, "NNS", Dep::Dobj, 1),
            tokl(3, "grow", "grow", Pos::Verb, "VB", Dep::Ccomp, 1),
            tok(4, "and", Pos::Cconj, "CC", Dep::Cc, 3),
            tokl(5, "scale", "scale", Pos::Verb, "VB", Dep::Conj, 3),
            tok(6, ".", Pos::Punct, ".", Dep::Punct, 1),
        ]);
        let (all, texts) = ccomp_chain(&sent, 1);
        assert!(all.contains(&3));
        assert!(texts.iter().any(|(_, t)| t == "help to grow"));
    }
}
