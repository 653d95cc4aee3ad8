//! No-verb keyword handling.
//!
//! Classifies keywords with zero candidate verbs: junk sentences, role
//! nouns, bare subjects, and objects whose implicit verb can be derived
//! morphologically from a governing deverbal noun.

use decomp_core::{Dep, Derivation, KeywordSpan, NoVerbKind, NoVerbOutcome, Pos, Sentence,
    WordClass};

use crate::conjuncts::main_token;
use crate::keyword_actions::main_token_from_span;
use crate::lexicon::{has, is_role_noun, PART_NOUNS};
use crate::morph::{has_deverbal_suffix, has_verb_sense};

/// Classify a keyword that produced no verb tuples. Returns None when no
/// special reading applies (the keyword stays a plain "no-verbs" record).
pub fn process_no_verbs(
    sent: &Sentence,
    span: &KeywordSpan,
    derivation: &dyn Derivation,
) -> Option<NoVerbOutcome> {
    let mut main_tok = main_token_from_span(sent, span);

    // Conditional sentences carry no usable claims
    if sent.get(0).map(|t| t.text_is("if")).unwrap_or(false) {
        return Some(NoVerbOutcome::new(NoVerbKind::Junk));
    }

    // Role nouns and bare subjects, re-checked once after a coordinated
    // keyword re-resolves to the anchor of its enumeration
    let mut resolved_conj = false;
    loop {
        let main = sent.get(main_tok)?;
        let role_text = if is_role_noun(&main.text) {
            Some(main.text.clone())
        } else {
            sent.next(main_tok)
                .filter(|t| is_role_noun(&t.text))
                .map(|t| t.text.clone())
        };
        let copular_attr = main.dep == Dep::Attr
            && sent.head(main_tok).map(|h| h.pos == Pos::Aux).unwrap_or(false);
        if role_text.is_some() || copular_attr {
            let mut outcome = NoVerbOutcome::new(NoVerbKind::Role);
            outcome.link = role_text.unwrap_or_else(|| main.text.clone());
            return Some(outcome);
        }

        if main.dep == Dep::Nsubj {
            return Some(NoVerbOutcome::new(NoVerbKind::Subject));
        }

        if main.dep == Dep::Conj && !resolved_conj {
            resolved_conj = true;
            main_tok = main_token(sent, main_tok, span.start, span.inner_end);
            continue;
        }
        break;
    }

    // A ROOT keyword with a derivable modifier to its left: the modifier
    // itself is the implicit verb ("award-winning growth" style)
    if sent.get(main_tok).map(|t| t.dep == Dep::Root).unwrap_or(false) {
        let candidates: Vec<&decomp_core::Token> = (0..main_tok)
            .filter_map(|i| sent.get(i))
            .filter(|t| matches!(t.dep, Dep::Amod | Dep::Nmod))
            .collect();
        if candidates.iter().any(|t| has_verb_sense(&t.text)) {
            let kw_text = format!(
                "{}{}",
                sent.span_text(span.start, span.inner_end + 1),
                sent.get(main_tok).map(|t| t.text.as_str()).unwrap_or("")
            );
            let verbs: Vec<String> = candidates
                .iter()
                .filter(|t| has_verb_sense(&t.text) && !kw_text.contains(&t.text))
                .map(|t| t.text.trim_matches('-').to_string())
                .collect();
            let mut outcome = NoVerbOutcome::new(NoVerbKind::ExtractedObject);
            outcome.verbs = verbs;
            return Some(outcome);
        }
    }

    // An adposition-governed keyword whose governing noun is deverbal:
    // derive the verb from the noun ("management of campaigns" -> manage)
    let head = sent.head(main_tok)?;
    if head.pos == Pos::Adp {
        let governor = sent.head(head.index)?;
        if head.text_is("of") && has(PART_NOUNS, &governor.text) {
            return None;
        }
        let link = if head.text_is("of") {
            String::new()
        } else {
            head.text.clone()
        };

        let mut anchors = vec![governor.index];
        for conjunct in sent.conjuncts(governor.index) {
            if conjunct.index < main_tok {
                anchors.push(conjunct.index);
            }
        }
        let any_deverbal = anchors
            .iter()
            .filter_map(|&i| sent.get(i))
            .any(|t| has_deverbal_suffix(&t.text));
        if any_deverbal {
            let mut verbs = Vec::new();
            for &anchor in &anchors {
                let Some(token) = sent.get(anchor) else {
                    continue;
                };
                if let Some((best, _)) = derivation
                    .related(&token.text, WordClass::Noun, WordClass::Verb)
                    .into_iter()
                    .next()
                {
                    verbs.push(best);
                }
            }
            if !verbs.is_empty() {
                let mut outcome = NoVerbOutcome::new(NoVerbKind::ExtractedObject);
                outcome.verbs = verbs;
                outcome.link = link;
                return Some(outcome);
            }
        }
    }

    None
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morph::RuleDerivation;
    use crate::testutil::{marketing_specialist, tok};
    use decomp_core::Sentence;

    #[test]
    fn test_if_sentence_is_junk() {
        // "if you need growth ..."
        let sent = Sentence::new(vec![
            tok(0, "if", Pos::Sconj, "IN", Dep::Mark, 2),
            tok(1, "you", Pos::Pron, "PRP", Dep::Nsubj, 2),
            tok(2, "need", Pos::Verb, "VBP", Dep::Root, 2),
            tok(3, "growth", Pos::Noun, "NN", Dep::Dobj, 2),
        ]);
        let outcome = process_no_verbs(&sent, &KeywordSpan::single(3), &RuleDerivation).unwrap();
        assert_eq!(outcome.kind, NoVerbKind::Junk);
    }

    #[test]
    fn test_role_noun() {
        let sent = marketing_specialist();
        let outcome =
            process_no_verbs(&sent, &KeywordSpan::new(3, 3, 4), &RuleDerivation).unwrap();
        assert_eq!(outcome.kind, NoVerbKind::Role);
        assert_eq!(outcome.link, "specialist");
    }

    #[test]
    fn test_bare_subject() {
        // "Digital marketing matters ." with no usable verb
        let sent = Sentence::new(vec![
            tok(0, "Digital", Pos::Adj, "JJ", Dep::Amod, 1),
            tok(1, "marketing", Pos::Noun, "NN", Dep::Nsubj, 2),
            tok(2, "matters", Pos::Verb, "VBZ", Dep::Root, 2),
            tok(3, ".", Pos::Punct, ".", Dep::Punct, 2),
        ]);
        let outcome = process_no_verbs(&sent, &KeywordSpan::new(0, 0, 1), &RuleDerivation).unwrap();
        assert_eq!(outcome.kind, NoVerbKind::Subject);
    }

    #[test]
    fn test_conjunct_keyword_reresolves_to_subject_anchor() {
        // "SEO , PPC and analytics drive results ." keyword "analytics":
        // the conjunct resolves back to "SEO", which is the clause subject
        let sent = Sentence::new(vec![
            tok(0, "SEO", Pos::Noun, "NN", Dep::Nsubj, 5),
            tok(1, ",", Pos::Punct, ",", Dep::Punct, 0),
            tok(2, "PPC", Pos::Noun, "NN", Dep::Conj, 0),
            tok(3, "and", Pos::Cconj, "CC", Dep::Cc, 2),
            tok(4, "analytics", Pos::Noun, "NN", Dep::Conj, 2),
            tok(5, "drive", Pos::Verb, "VBP", Dep::Root, 5),
            tok(6, "results", Pos::Noun, "NNS", Dep::Dobj, 5),
            tok(7, ".", Pos::Punct, ".", Dep::Punct, 5),
        ]);
        let outcome = process_no_verbs(&sent, &KeywordSpan::single(4), &RuleDerivation).unwrap();
        assert_eq!(outcome.kind, NoVerbKind::Subject);
    }

    #[test]
    fn test_deverbal_governor_extracts_verb() {
        // "Management of digital campaigns ." keyword "digital campaigns"
        let sent = Sentence::new(vec![
            tok(0, "Management", Pos::Noun, "NN", Dep::Root, 0),
            tok(1, "of", Pos::Adp, "IN", Dep::Prep, 0),
            tok(2, "digital", Pos::Adj, "JJ", Dep::Amod, 3),
            tok(3, "campaigns", Pos::Noun, "NNS", Dep::Pobj, 1),
            tok(4, ".", Pos::Punct, ".", Dep::Punct, 0),
        ]);
        let outcome = process_no_verbs(&sent, &KeywordSpan::new(2, 2, 3), &RuleDerivation).unwrap();
        assert_eq!(outcome.kind, NoVerbKind::ExtractedObject);
        assert_eq!(outcome.verbs, vec!["manage".to_string()]);
        assert_eq!(outcome.link, ""); // "of" carries no link text
    }

    #[test]
    fn test_part_of_team_is_uninformative() {
        // "part of the team" suppresses extraction entirely
        let sent = Sentence::new(vec![
            tok(0, "part", Pos::Noun, "NN", Dep::Root, 0),
            tok(1, "of", Pos::Adp, "IN", Dep::Prep, 0),
            tok(2, "the", Pos::Det, "DT", Dep::Det, 3),
            tok(3, "team", Pos::Noun, "NN", Dep::Pobj, 1),
        ]);
        assert!(process_no_verbs(&sent, &KeywordSpan::single(3), &RuleDerivation).is_none());
    }
}
