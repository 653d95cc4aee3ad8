//! Secondary action extraction for means and result keywords.
//!
//! A keyword tagged means/result/benefactive/indirect names how or why
//! something was done; the action it qualifies still has to be found. These
//! functions search for that governing action and return action tuples
//! carrying the link text that connects them to the keyword's own role.

use decomp_core::{Dep, KeywordSpan, Pos, RoleFlag, Sentence, VerbTuple};

use crate::conjuncts::{self, main_token, ConjunctChain};
use crate::keyword_actions::main_token_from_span;
use crate::lexicon::{has, is_stoplisted, CCOMP_VERBS, PREP_MEANS, WITH_USE_PHRASES};
use crate::query::{nearest_verb, preposition, span_preposition, verb_objects, Direction};
use crate::tuples::{ccomp_chain, has_impersonal_subject, verbs_text, VerbText};
use crate::verb_class::is_result_verb;

/// A secondary extraction starts either from the keyword span (for marker
/// tuples with no verb of their own) or from the classified verb itself.
fn resolve_target(
    sent: &Sentence,
    span: &KeywordSpan,
    anchor: Option<usize>,
) -> (usize, KeywordSpan) {
    match anchor {
        Some(index) => (index, KeywordSpan::single(index)),
        None => (main_token_from_span(sent, span), *span),
    }
}

/// One action tuple per verb/object pair, every tuple carrying the link
fn verb_tuples(
    sent: &Sentence,
    verb: usize,
    all_verbs: &[usize],
    texts: &[VerbText],
    prep: &str,
    link: &str,
) -> Vec<VerbTuple> {
    let mut tuples = Vec::new();
    let objects = verb_objects(sent, verb);

    if let Some(shared_object) = objects.first() {
        for (position, &member) in all_verbs.iter().enumerate() {
            let Some((index, text)) = texts.get(position) else {
                continue;
            };
            let own = verb_objects(sent, member);
            if own.is_empty() {
                tuples.push(
                    VerbTuple::new(Some(*index), text, shared_object, prep, RoleFlag::Action)
                        .with_link(link),
                );
            } else {
                for phrase in own.into_iter().filter(|p| !p.is_empty()) {
                    tuples.push(
                        VerbTuple::new(Some(*index), text, phrase, prep, RoleFlag::Action)
                            .with_link(link),
                    );
                }
            }
        }
    } else {
        for (index, text) in texts {
            tuples.push(
                VerbTuple::new(Some(*index), text, "", prep, RoleFlag::Action).with_link(link),
            );
        }
    }
    tuples
}

/// Governing-action tuples for a result-style verb: the nearest verb to its
/// left, rendered with the connective ("grew revenue to increase reach").
fn other_result_tuple(
    sent: &Sentence,
    main_verb: usize,
    all_verbs: &[usize],
    prep: &str,
    span: &KeywordSpan,
) -> Option<Vec<VerbTuple>> {
    let verb2 = nearest_verb(sent, main_verb, span, Direction::Left)?;
    let main = sent.get(main_verb)?;
    let second = sent.get(verb2)?;

    if second.tag == "VBZ" && has_impersonal_subject(sent, verb2) {
        return Some(Vec::new());
    }

    let link_verb = sent
        .head(main_verb)
        .filter(|h| h.pos != Pos::Verb)
        .map(|h| h.text.clone())
        .unwrap_or_default();
    let rights: Vec<&str> = sent
        .rights(main_verb)
        .filter(|t| t.pos != Pos::Verb)
        .map(|t| t.text.as_str())
        .collect();
    let link = format!("{} to {} {}", link_verb, main.text, rights.join(" "))
        .trim()
        .to_string();

    let object = verb_objects(sent, verb2)
        .into_iter()
        .next()
        .map(|o| format!(" {o}"))
        .unwrap_or_default();

    // "grew<obj> to increase" for result verbs, "grew<obj> for expansion"
    // style otherwise
    let tail = if is_result_verb(sent, main_verb).is_some() {
        format!(" to {}", main.lemma)
    } else {
        let head_text = sent
            .head(main_verb)
            .map(|h| h.text.clone())
            .unwrap_or_default();
        format!(" {} {}", head_text, main.lemma)
    };

    let base = if second.lemma == "be" {
        match sent.rights(verb2).find(|t| t.pos == Pos::Adj) {
            Some(adj) => format!("{} {}{}", second.text, adj.text, object),
            None => format!("{}{}", second.text, object),
        }
    } else if second.tag == "VBN" {
        match sent.lefts(verb2).find(|t| t.pos == Pos::Aux) {
            Some(aux) => format!("{} {}{}", aux.text, second.text, object),
            None => format!("{}{}", second.text, object),
        }
    } else {
        format!("{}{}", second.text, object)
    };

    let texts: Vec<VerbText> = all_verbs
        .iter()
        .map(|_| (verb2, format!("{base}{tail}")))
        .collect();
    Some(verb_tuples(sent, main_verb, all_verbs, &texts, prep, &link))
}

/// Action tuples for a keyword introduced as a means. `anchor` is the means
/// verb when one was classified, absent for bare "via X" marker tuples.
pub fn actions_for_means(
    sent: &Sentence,
    span: &KeywordSpan,
    anchor: Option<usize>,
) -> Vec<VerbTuple> {
    let (resolved, kw_span) = resolve_target(sent, span, anchor);
    let mut main_tok = resolved;

    if sent.get(main_tok).map(|t| t.pos != Pos::Verb).unwrap_or(true) {
        main_tok = main_token(sent, main_tok, kw_span.start, kw_span.inner_end);
    }
    if sent
        .head(main_tok)
        .map(|t| t.lemma == "include")
        .unwrap_or(false)
    {
        main_tok = sent.head(main_tok).map(|t| t.index).unwrap_or(main_tok);
    }

    let mut link = String::new();
    if sent
        .get(main_tok)
        .map(|t| t.text == "using")
        .unwrap_or(false)
    {
        link = "using".to_string();
    }
    let mut means_governor: Option<usize> = None;
    if let Some(head) = sent.head(main_tok) {
        if has(PREP_MEANS, &head.text) {
            link = head.text.clone();
            means_governor = sent
                .head(head.index)
                .filter(|g| g.pos.is_verbal())
                .map(|g| g.index);
        }
    }
    if main_tok >= 4 {
        let idiom = sent.span_text(main_tok - 4, main_tok).to_lowercase();
        if WITH_USE_PHRASES.contains(&idiom.as_str()) {
            link = idiom;
        }
    }

    let head = sent.head(main_tok);
    let head_index = head.map(|h| h.index);
    let head_usable = head
        .map(|h| {
            h.pos.is_verbal()
                && !is_stoplisted(&h.text)
                && sent
                    .get(main_tok)
                    .map(|t| !matches!(t.dep, Dep::Conj | Dep::Appos | Dep::Root))
                    .unwrap_or(false)
                && !(h.pos == Pos::Aux && h.index + 1 == main_tok)
        })
        .unwrap_or(false);
    let nearest = nearest_verb(sent, main_tok, &kw_span, Direction::Left).filter(|&n| {
        sent.get(n).map(|t| !is_stoplisted(&t.text)).unwrap_or(false)
            && Some(n) != head_index
            && n.checked_sub(1) != head_index
            && !(sent.get(n).map(|t| t.pos == Pos::Aux).unwrap_or(false) && n + 1 == main_tok)
    });

    let verb = if head_usable {
        head_index
    } else {
        nearest.or(means_governor)
    };
    let Some(verb) = verb else {
        return Vec::new();
    };

    let prep = span_preposition(sent, preposition(sent, verb), &kw_span);
    let ConjunctChain {
        main_verb,
        mut all_verbs,
    } = conjuncts::all_verbs(sent, verb);
    let mut texts = verbs_text(sent, &all_verbs, main_tok);

    if sent
        .get(main_verb)
        .map(|t| has(CCOMP_VERBS, &t.lemma))
        .unwrap_or(false)
    {
        let (comp_verbs, comp_texts) = ccomp_chain(sent, main_verb);
        if comp_verbs != [main_verb] && !comp_verbs.contains(&main_tok) {
            all_verbs = comp_verbs;
            texts = comp_texts;
        }
    }

    let last = *all_verbs.last().unwrap_or(&verb);
    if sent.get(last).map(|t| t.tag == "VBZ").unwrap_or(false)
        && has_impersonal_subject(sent, last)
    {
        return Vec::new();
    }

    let vbd_amod = sent.get(last).map(|t| t.tag == "VBD").unwrap_or(false)
        && sent
            .get(main_verb)
            .map(|t| t.dep == Dep::Amod)
            .unwrap_or(false)
        && (sent
            .prev(main_verb)
            .map(|t| t.pos == Pos::Adp)
            .unwrap_or(false)
            || (sent
                .head(main_verb)
                .map(|h| h.pos == Pos::Verb)
                .unwrap_or(false)
                && sent
                    .get(main_verb)
                    .map(|t| !matches!(t.dep, Dep::Root | Dep::Conj))
                    .unwrap_or(false)));
    if is_result_verb(sent, main_verb).is_some() || vbd_amod {
        if let Some(tuples) = other_result_tuple(sent, main_verb, &all_verbs, &prep, &kw_span) {
            return tuples;
        }
    }
    verb_tuples(sent, last, &all_verbs, &texts, &prep, &link)
}

/// Action tuples for a keyword (or verb) in a result-style role: resolve the
/// result verb chain, then search left for the governing action.
pub fn actions_for_result(
    sent: &Sentence,
    span: &KeywordSpan,
    anchor: Option<usize>,
) -> Vec<VerbTuple> {
    let (resolved, kw_span) = resolve_target(sent, span, anchor);
    let mut main_tok = resolved;

    if sent.get(main_tok).map(|t| t.pos != Pos::Verb).unwrap_or(true) {
        main_tok = main_token(sent, main_tok, kw_span.start, kw_span.inner_end);
    }
    if sent
        .head(main_tok)
        .map(|t| t.lemma == "include")
        .unwrap_or(false)
    {
        main_tok = sent.head(main_tok).map(|t| t.index).unwrap_or(main_tok);
    }

    let chain = conjuncts::all_verbs(sent, main_tok);
    let prep = span_preposition(sent, preposition(sent, chain.main_verb), &kw_span);
    other_result_tuple(sent, chain.main_verb, &chain.all_verbs, &prep, &kw_span)
        .unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================
