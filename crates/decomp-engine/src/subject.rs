//! Subject type classification.
//!
//! Maps a subject token to a coarse entity type (PERSON, COMPANY, TEAM,
//! SOMEONE, Undefined) using the coded noun-phrase/entity map, the surface
//! lexicon, possessive/pronoun cues, and a verb-attribute fallback.

use decomp_core::{Dep, Pos, PreprocessingInfo, Sentence};

use crate::lexicon::subject_group;

const UNDEFINED: &str = "Undefined";
const ORG_GROUPS: &[&str] = &["COMPANY", "TEAM", "SOMEONE"];

/// Fallback over the governing verb: a copular ROOT with an attribute child
/// naming a company/team/someone word types the subject.
fn verb_procedure(sent: &Sentence, verb_index: usize) -> String {
    let Some(verb) = sent.get(verb_index) else {
        return UNDEFINED.to_string();
    };
    if verb.dep != Dep::Root || verb.pos != Pos::Aux {
        return UNDEFINED.to_string();
    }
    let has_attr_child = sent
        .lefts(verb_index)
        .chain(sent.rights(verb_index))
        .any(|t| t.dep == Dep::Attr);
    if !has_attr_child {
        return UNDEFINED.to_string();
    }
    let Some(attr) = sent.iter().find(|t| t.dep == Dep::Attr) else {
        return UNDEFINED.to_string();
    };
    subject_group(&attr.text, ORG_GROUPS)
        .unwrap_or(UNDEFINED)
        .to_string()
}

/// Classify the subject at `subject_index` given the noun-phrase/entity map
/// and the index of the governing verb. Entity types are returned verbatim
/// (they may embed a profile id as `TYPE=profileId`; the caller resolves
/// the `_MAYBE` suffix).
pub fn subject_type(
    sent: &Sentence,
    subject_index: Option<usize>,
    preprocessing: &PreprocessingInfo,
    verb_index: usize,
) -> String {
    let Some(subject_index) = subject_index else {
        return UNDEFINED.to_string();
    };

    // Coded phrase lookup first: the full phrase and its entity type
    let phrases = preprocessing.phrases_rooted_at(subject_index);
    let (name, ent_type) = match phrases.first() {
        Some(phrase) => (
            phrase.phrase.clone(),
            (!phrase.ent_type.is_empty()).then(|| phrase.ent_type.clone()),
        ),
        None => (
            sent.get(subject_index)
                .map(|t| t.text.clone())
                .unwrap_or_default(),
            None,
        ),
    };

    if let Some(ent_type) = ent_type {
        return ent_type;
    }

    // Surface lexicon on the full phrase
    if let Some(group) = subject_group(&name, ORG_GROUPS) {
        return group.to_string();
    }

    let words: Vec<&str> = name.split_whitespace().collect();
    if words.len() > 1 {
        // Multi-word subject: look up the head word, then branch on the
        // leading possessive/pronoun
        let root_text = sent
            .get(subject_index)
            .map(|t| t.text.clone())
            .unwrap_or_default();
        let root_group = subject_group(&root_text, ORG_GROUPS);
        let leading = words[0].to_lowercase();

        match (root_group, leading.as_str()) {
            (Some(group), lead) if !matches!(lead, "my" | "her" | "his") => group.to_string(),
            (_, "my" | "her" | "his") => "PERSON".to_string(),
            (_, "our") => "COMPANY".to_string(),
            (_, "their" | "its") => "SOMEONE".to_string(),
            (None, _) => verb_procedure(sent, verb_index),
            _ => UNDEFINED.to_string(),
        }
    } else {
        // Single-word subject
        let pos = sent.get(subject_index).map(|t| t.pos);
        if pos == Some(Pos::Pron) {
            if name.eq_ignore_ascii_case("we") {
                return "COMPANY".to_string();
            }
            match subject_group(&name.to_lowercase(), &["CompanyPronoun", "PERSON"]) {
                Some("PERSON") => "PERSON".to_string(),
                _ => verb_procedure(sent, verb_index),
            }
        } else {
            verb_procedure(sent, verb_index)
        }
    }
}

/// Apply profile matching to a raw subject type: `TYPE=profileId` resolves
/// to `TYPE` when the profile matches, else `TYPE_MAYBE`.
pub fn resolve_profile_suffix(raw_type: &str, profile_id: &str) -> String {
    match raw_type.split_once('=') {
        None => raw_type.to_string(),
        Some((base, owner)) if owner == profile_id => base.to_string(),
        Some((base, _)) => format!("{base}_MAYBE"),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{launch_and_drive, tok, tokl};
    use decomp_core::{NounPhrase, Sentence};
    use std::collections::HashMap;

    fn with_entity(phrase: &str, root_index: usize, ent_type: &str) -> PreprocessingInfo {
        let mut ne_np = HashMap::new();
        ne_np.insert(
            "NE1".to_string(),
            vec![NounPhrase {
                phrase: phrase.to_string(),
                root_index,
                ent_type: ent_type.to_string(),
            }],
        );
        PreprocessingInfo {
            ne_np,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_subject_is_undefined() {
        let sent = launch_and_drive();
        let info = PreprocessingInfo::default();
        assert_eq!(subject_type(&sent, None, &info, 1), "Undefined");
    }

    #[test]
    fn test_we_is_company() {
        let sent = launch_and_drive();
        let info = PreprocessingInfo::default();
        assert_eq!(subject_type(&sent, Some(0), &info, 1), "COMPANY");
    }

    #[test]
    fn test_entity_type_wins() {
        let sent = launch_and_drive();
        let info = with_entity("We", 0, "ORG");
        assert_eq!(subject_type(&sent, Some(0), &info, 1), "ORG");
    }

    #[test]
    fn test_possessive_branches() {
        // "My team delivers results ."
        let sent = Sentence::new(vec![
            tok(0, "My", Pos::Pron, "PRP$", Dep::Poss, 1),
            tok(1, "team", Pos::Noun, "NN", Dep::Nsubj, 2),
            tokl(2, "delivers", "deliver", Pos::Verb, "VBZ", Dep::Root, 2),
            tok(3, "results", Pos::Noun, "NNS", Dep::Dobj, 2),
        ]);
        let info = with_entity("My team", 1, "");
        assert_eq!(subject_type(&sent, Some(1), &info, 2), "PERSON");

        let sent2 = Sentence::new(vec![
            tok(0, "Our", Pos::Pron, "PRP$", Dep::Poss, 1),
            tok(1, "team", Pos::Noun, "NN", Dep::Nsubj, 2),
            tokl(2, "delivers", "deliver", Pos::Verb, "VBZ", Dep::Root, 2),
            tok(3, "results", Pos::Noun, "NNS", Dep::Dobj, 2),
        ]);
        let info2 = with_entity("Our team", 1, "");
        // "our team" maps to the head-word lexicon entry, not the pronoun
        assert_eq!(subject_type(&sent2, Some(1), &info2, 2), "TEAM");
    }

    #[test]
    fn test_surface_lexicon_single_word() {
        // "The company grows ."
        let sent = Sentence::new(vec![
            tok(0, "The", Pos::Det, "DT", Dep::Det, 1),
            tok(1, "company", Pos::Noun, "NN", Dep::Nsubj, 2),
            tokl(2, "grows", "grow", Pos::Verb, "VBZ", Dep::Root, 2),
        ]);
        let info = PreprocessingInfo::default();
        assert_eq!(subject_type(&sent, Some(1), &info, 2), "COMPANY");
    }

    #[test]
    fn test_verb_attribute_fallback() {
        // "Acme is a company ." - subject typed through the copula's attr
        let sent = Sentence::new(vec![
            tok(0, "Acme", Pos::Propn, "NNP", Dep::Nsubj, 1),
            tokl(1, "is", "be", Pos::Aux, "VBZ", Dep::Root, 1),
            tok(2, "a", Pos::Det, "DT", Dep::Det, 3),
            tok(3, "company", Pos::Noun, "NN", Dep::Attr, 1),
            tok(4, ".", Pos::Punct, ".", Dep::Punct, 1),
        ]);
        let info = PreprocessingInfo::default();
        assert_eq!(subject_type(&sent, Some(0), &info, 1), "COMPANY");
    }

    #[test]
    fn test_profile_suffix() {
        assert_eq!(resolve_profile_suffix("PERSON", "p1"), "PERSON");
        assert_eq!(resolve_profile_suffix("PERSON=p1", "p1"), "PERSON");
        assert_eq!(resolve_profile_suffix("PERSON=p2", "p1"), "PERSON_MAYBE");
    }
}
