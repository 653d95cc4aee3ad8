//! Read-only query primitives over an annotated sentence.
//!
//! Nearest-verb search, preposition lookup, and object/complement
//! extraction. All functions are total: out-of-range indices simply yield
//! nothing, so one bad annotation never takes down a batch.

use decomp_core::{Dep, KeywordSpan, Pos, Sentence, Token};

use crate::conjuncts::verb_conjuncts;
use crate::lexicon::{self, is_placeholder_object, is_stoplisted};

/// Direction of a nearest-verb scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Whether the token looks like a past participle used adjectivally rather
/// than as a true predicate: "-ed" with an adjective (or comma+adjective)
/// context, a role-noun head, or a coordinate/apposed link to a non-"-ed"
/// head.
fn is_adjectival_participle(sent: &Sentence, token: &Token) -> bool {
    if !token.ends_with("ed") {
        return false;
    }
    let head_is_role = sent
        .head(token.index)
        .map(|h| lexicon::is_role_noun(&h.text))
        .unwrap_or(false);
    let comma_adj = sent
        .prev(token.index)
        .map(|p| p.text == ",")
        .unwrap_or(false)
        && sent
            .prev_n(token.index, 2)
            .map(|p| p.pos == Pos::Adj)
            .unwrap_or(false);
    let adj_before = sent
        .prev(token.index)
        .map(|p| p.pos == Pos::Adj)
        .unwrap_or(false);
    let dangling_conjunct = token.dep.is_coordinating()
        && !sent
            .head(token.index)
            .map(|h| h.ends_with("ed"))
            .unwrap_or(false);
    head_is_role || comma_adj || adj_before || dangling_conjunct
}

/// Whether an adjective behaves as a predicate: ROOT/subject-linked head and
/// a participial "-ed"/"-ing" shape, outside any adjective run.
fn is_predicative_adjective(sent: &Sentence, token: &Token, span: &KeywordSpan) -> bool {
    if token.pos != Pos::Adj || span.contains(token.index) {
        return false;
    }
    if !(token.ends_with("ed") || token.ends_with("ing")) {
        return false;
    }
    let head_dep = sent
        .head(token.index)
        .map(|h| h.dep)
        .unwrap_or(Dep::Other);
    if !matches!(head_dep, Dep::Root | Dep::Nsubj) {
        return false;
    }
    let comma_adj = sent
        .prev(token.index)
        .map(|p| p.text == ",")
        .unwrap_or(false)
        && sent
            .prev_n(token.index, 2)
            .map(|p| p.pos == Pos::Adj)
            .unwrap_or(false);
    let adj_before = sent
        .prev(token.index)
        .map(|p| p.pos == Pos::Adj)
        .unwrap_or(false);
    !(comma_adj || adj_before)
}

/// Nearest governing verb to the left (or right) of `from`, skipping tokens
/// inside the keyword span, adjectival participles, stoplisted verbs, and
/// two-word stoplisted phrases (with a conjunct fallback returning the
/// second-to-last coordinated verb). An adjective acting as a predicate is
/// accepted too.
pub fn nearest_verb(
    sent: &Sentence,
    from: usize,
    span: &KeywordSpan,
    direction: Direction,
) -> Option<usize> {
    let indices: Vec<usize> = match direction {
        Direction::Left => (0..from).rev().collect(),
        Direction::Right => (from + 1..sent.len()).collect(),
    };

    for index in indices {
        let token = sent.get(index)?;
        if token.pos.is_verbal() && !span.contains(index) {
            if token.dep == Dep::Amod
                && sent.head(index).map(|h| h.dep != Dep::Root).unwrap_or(true)
            {
                continue;
            }
            if is_stoplisted(&token.lemma) {
                continue;
            }
            if is_adjectival_participle(sent, token) {
                continue;
            }
            if let Some(next) = sent.next(index) {
                let bigram = format!("{} {}", token.text, next.text);
                if is_stoplisted(&bigram) {
                    match verb_conjuncts(sent, index) {
                        Some(chain) if chain.all_verbs.len() >= 2 => {
                            return Some(chain.all_verbs[chain.all_verbs.len() - 2]);
                        }
                        _ => continue,
                    }
                }
            }
            return Some(index);
        }
        if is_predicative_adjective(sent, token, span) {
            return Some(index);
        }
    }
    None
}

/// First adposition among the token's right children
pub fn preposition(sent: &Sentence, token: usize) -> Option<usize> {
    sent.rights(token).find(|t| t.pos == Pos::Adp).map(|t| t.index)
}

/// Secondary preposition lookup: when the primary is empty, the token
/// immediately preceding the keyword span counts if it is an adposition.
pub fn span_preposition(sent: &Sentence, prep: Option<usize>, span: &KeywordSpan) -> String {
    if let Some(index) = prep {
        return sent.get(index).map(|t| t.text.clone()).unwrap_or_default();
    }
    match sent.prev(span.start) {
        Some(token) if token.pos == Pos::Adp => token.text.clone(),
        _ => String::new(),
    }
}

/// First direct object among the verb's right children
pub fn direct_object(sent: &Sentence, verb: usize) -> Option<usize> {
    sent.rights(verb).find(|t| t.dep == Dep::Dobj).map(|t| t.index)
}

/// Compound modifiers of a noun joined with its lemma, e.g.
/// "e-commerce platform" for the token "platform"
pub fn compound_phrase(sent: &Sentence, token: usize) -> Option<String> {
    let compounds: Vec<&str> = sent
        .lefts(token)
        .filter(|t| t.dep == Dep::Compound)
        .map(|t| t.text.as_str())
        .collect();
    if compounds.is_empty() {
        return None;
    }
    let lemma = &sent.get(token)?.lemma;
    Some(format!("{} {}", compounds.join(" "), lemma))
}

/// Left part of an object phrase: subtree tokens up to the object, minus
/// determiners
fn object_lefts(sent: &Sentence, object: usize) -> Vec<String> {
    sent.subtree(object)
        .into_iter()
        .filter(|&i| i <= object)
        .filter_map(|i| sent.get(i))
        .filter(|t| t.pos != Pos::Det)
        .map(|t| t.text.clone())
        .collect()
}

/// Direct objects and prepositional objects of a verb, with left children
/// attached and determiners dropped. Conjunct objects produce one entry
/// each. Used by the secondary means/result extraction.
pub fn verb_objects(sent: &Sentence, verb: usize) -> Vec<String> {
    let mut answer = Vec::new();

    if let Some(mut obj) = direct_object(sent, verb) {
        let mut lefts = object_lefts(sent, obj);
        if sent.get(obj).map(|t| t.pos != Pos::Noun).unwrap_or(true) {
            if let Some(noun) = sent
                .subtree(obj)
                .into_iter()
                .find(|&i| sent.get(i).map(|t| t.pos == Pos::Noun).unwrap_or(false))
            {
                obj = noun;
                lefts = (verb + 1..obj + 1)
                    .filter_map(|i| sent.get(i))
                    .filter(|t| t.pos != Pos::Det)
                    .map(|t| t.text.clone())
                    .collect();
            }
        }
        answer.push(lefts.join(" "));
        for conjunct in sent.conjuncts(obj) {
            answer.push(object_lefts(sent, conjunct.index).join(" "));
        }
        return answer;
    }

    if let Some(prep) = preposition(sent, verb) {
        let pobj = sent.rights(prep).find(|t| t.dep == Dep::Pobj).map(|t| t.index);
        let prep_text = sent.get(prep).map(|t| t.text.clone()).unwrap_or_default();
        match pobj {
            Some(mut pobj) => {
                let mut lefts = object_lefts(sent, pobj);
                if sent.get(pobj).map(|t| t.pos != Pos::Noun).unwrap_or(true) {
                    if let Some(noun) = sent
                        .subtree(pobj)
                        .into_iter()
                        .find(|&i| sent.get(i).map(|t| t.pos == Pos::Noun).unwrap_or(false))
                    {
                        pobj = noun;
                        lefts = (verb + 2..pobj + 1)
                            .filter_map(|i| sent.get(i))
                            .filter(|t| t.pos != Pos::Det)
                            .map(|t| t.text.clone())
                            .collect();
                    }
                }
                answer.push(format!("{} {}", prep_text, lefts.join(" ")));
                for conjunct in sent.conjuncts(pobj) {
                    answer.push(format!(
                        "{} {}",
                        prep_text,
                        object_lefts(sent, conjunct.index).join(" ")
                    ));
                }
            }
            None => answer.push(prep_text),
        }
        return answer;
    }

    if let Some(token) = sent.get(verb) {
        if matches!(token.dep, Dep::Amod | Dep::Compound) {
            if let Some(head) = sent.head(verb) {
                answer.push(head.text.clone());
                for conjunct in sent.conjuncts(head.index) {
                    answer.push(conjunct.text.clone());
                }
            }
        }
    }
    answer
}

/// Whether the token at `index` may contribute to an extracted object:
/// outside the keyword span, not the main token, not one of its conjuncts.
fn usable_for_object(sent: &Sentence, index: usize, main_tok: usize, span: &KeywordSpan) -> bool {
    if span.contains(index) || index == main_tok {
        return false;
    }
    !sent
        .get(main_tok)
        .map(|t| t.conjuncts.contains(&index))
        .unwrap_or(false)
}

/// Direct or prepositional objects of an action verb, extended across the
/// object's conjuncts (omitting ones inside the keyword span or at/after the
/// main token), with compound/modifier left children prepended and
/// placeholder nouns excluded. Returns one rendered string per object.
pub fn action_verb_objects(
    sent: &Sentence,
    verb: usize,
    all_verbs: &[usize],
    main_tok: usize,
    span: &KeywordSpan,
) -> Vec<String> {
    let Some(&last_verb) = all_verbs.last() else {
        return Vec::new();
    };
    if sent.get(main_tok).is_none() {
        return Vec::new();
    }

    let dobj = direct_object(sent, verb);
    let noun_after_last = sent
        .next(last_verb)
        .map(|t| {
            t.pos == Pos::Noun
                && sent.get(last_verb).map(|v| v.lemma != "be").unwrap_or(false)
                && t.index != main_tok
        })
        .unwrap_or(false);

    if dobj.is_some() || noun_after_last {
        // The keyword itself sitting right after its span as the direct
        // object is not an object worth reporting.
        if let Some(obj) = dobj {
            if main_tok == span.inner_end + 1 && obj == main_tok {
                return Vec::new();
            }
        }

        let (effective_verb, obj_start, obj_end) = match dobj {
            Some(first) => {
                let last = sent
                    .rights(verb)
                    .filter(|t| t.dep == Dep::Dobj)
                    .map(|t| t.index)
                    .last()
                    .unwrap_or(first);
                (verb, first, last)
            }
            None => (last_verb, last_verb + 1, last_verb + 1),
        };
        let obj_text = sent.span_text(obj_start, obj_end + 1);

        let kw_text = sent.span_text(span.start, span.inner_end + 1);
        if !obj_text.is_empty() && !kw_text.contains(&obj_text) {
            let mut rights: Vec<usize> = sent
                .rights(effective_verb)
                .filter(|t| t.index > obj_end)
                .map(|t| t.index)
                .chain(sent.rights(obj_end).map(|t| t.index))
                .collect();

            let mut objects: Vec<(usize, String)> = vec![(obj_start, obj_text.clone())];
            let conjunct_source = if sent
                .get(obj_start)
                .map(|t| !t.conjuncts.is_empty())
                .unwrap_or(false)
            {
                Some(obj_start)
            } else if sent
                .get(obj_end)
                .map(|t| !t.conjuncts.is_empty())
                .unwrap_or(false)
            {
                Some(obj_end)
            } else {
                None
            };
            if let Some(source) = conjunct_source {
                for conjunct in sent.conjuncts(source) {
                    let index = conjunct.index;
                    if index < main_tok && usable_for_object(sent, index, main_tok, span) {
                        rights.extend(sent.rights(index).map(|t| t.index));
                        objects.push((index, conjunct.text.clone()));
                    }
                }
            }

            let mut rendered: Vec<String> = Vec::with_capacity(objects.len());
            if !is_placeholder_object(&obj_text) {
                for (anchor, text) in &objects {
                    let lefts: Vec<String> = sent
                        .subtree(*anchor)
                        .into_iter()
                        .filter(|&i| i < *anchor)
                        .filter(|&i| !all_verbs.contains(&i))
                        .filter(|&i| usable_for_object(sent, i, main_tok, span))
                        .filter_map(|i| sent.get(i))
                        .map(|t| t.text.clone())
                        .collect();
                    if lefts.is_empty() {
                        rendered.push(text.clone());
                    } else {
                        rendered.push(format!("{} {}", lefts.join(" "), text));
                    }
                }
            } else {
                rendered = objects.iter().map(|(_, text)| text.clone()).collect();
            }

            if let Some(prep) = rights
                .iter()
                .find(|&&i| sent.get(i).map(|t| t.pos == Pos::Adp).unwrap_or(false))
                .copied()
            {
                let prep_text = sent.get(prep).map(|t| t.text.clone()).unwrap_or_default();
                for entry in rendered.iter_mut() {
                    entry.push(' ');
                    entry.push_str(&prep_text);
                }
                if let Some(pobj) = sent
                    .rights(prep)
                    .find(|t| {
                        t.dep == Dep::Pobj && usable_for_object(sent, t.index, main_tok, span)
                    })
                    .map(|t| t.index)
                {
                    let pobj_lefts: Vec<String> = sent
                        .subtree(pobj)
                        .into_iter()
                        .filter(|&i| {
                            i <= pobj
                                || sent.get(i).map(|t| t.pos == Pos::Adp).unwrap_or(false)
                        })
                        .filter(|&i| usable_for_object(sent, i, main_tok, span))
                        .filter_map(|i| sent.get(i))
                        .map(|t| t.text.clone())
                        .collect();
                    for entry in rendered.iter_mut() {
                        entry.push(' ');
                        entry.push_str(&pobj_lefts.join(" "));
                    }
                }
            }
            return rendered;
        }
    }

    // Prepositional-object path
    if let Some(prep) = preposition(sent, verb) {
        if prep < main_tok {
            if let Some(pobj) = sent
                .rights(prep)
                .find(|t| t.dep == Dep::Pobj)
                .map(|t| t.index)
            {
                if usable_for_object(sent, pobj, main_tok, span) {
                    let prep_text =
                        sent.get(prep).map(|t| t.text.clone()).unwrap_or_default();
                    let mut rights: Vec<usize> = sent
                        .rights(verb)
                        .filter(|t| t.index > pobj)
                        .map(|t| t.index)
                        .chain(sent.rights(pobj).map(|t| t.index))
                        .collect();

                    let mut objects: Vec<usize> = vec![pobj];
                    for conjunct in sent.conjuncts(pobj) {
                        let index = conjunct.index;
                        if index < main_tok && usable_for_object(sent, index, main_tok, span) {
                            rights.extend(sent.rights(index).map(|t| t.index));
                            objects.push(index);
                        }
                    }

                    let pobj_text = sent
                        .get(pobj)
                        .map(|t| t.text.clone())
                        .unwrap_or_default();
                    let mut rendered: Vec<String> = Vec::with_capacity(objects.len());
                    if !is_placeholder_object(&pobj_text) {
                        for &anchor in &objects {
                            let lefts: Vec<String> = sent
                                .subtree(anchor)
                                .into_iter()
                                .filter(|&i| i <= anchor)
                                .filter(|&i| !all_verbs.contains(&i))
                                .filter(|&i| usable_for_object(sent, i, main_tok, span))
                                .filter_map(|i| sent.get(i))
                                .map(|t| t.text.clone())
                                .collect();
                            rendered.push(format!("{} {}", prep_text, lefts.join(" ")));
                        }
                    } else {
                        rendered = objects
                            .iter()
                            .filter_map(|&i| sent.get(i))
                            .map(|t| format!("{} {}", prep_text, t.text))
                            .collect();
                    }

                    if let Some(prep2) = rights
                        .iter()
                        .find(|&&i| sent.get(i).map(|t| t.pos == Pos::Adp).unwrap_or(false))
                        .copied()
                    {
                        let prep2_text =
                            sent.get(prep2).map(|t| t.text.clone()).unwrap_or_default();
                        for entry in rendered.iter_mut() {
                            entry.push(' ');
                            entry.push_str(&prep2_text);
                        }
                        if let Some(pobj2) = sent
                            .rights(prep2)
                            .find(|t| {
                                t.dep == Dep::Pobj
                                    && usable_for_object(sent, t.index, main_tok, span)
                            })
                            .map(|t| t.index)
                        {
                            let lefts2: Vec<String> = sent
                                .subtree(pobj2)
                                .into_iter()
                                .filter(|&i| {
                                    i <= pobj2
                                        || sent
                                            .get(i)
                                            .map(|t| t.pos == Pos::Adp)
                                            .unwrap_or(false)
                                })
                                .filter(|&i| {
                                    !span.contains(i)
                                        && !sent
                                            .get(main_tok)
                                            .map(|t| t.conjuncts.contains(&i))
                                            .unwrap_or(false)
                                })
                                .filter_map(|i| sent.get(i))
                                .map(|t| t.text.clone())
                                .collect();
                            for entry in rendered.iter_mut() {
                                entry.push(' ');
                                entry.push_str(&lefts2.join(" "));
                            }
                        }
                    }
                    return rendered;
                }
            }
        }
    }
    Vec::new()
}

// ============================================================================
// Tests
// ============================================================================
