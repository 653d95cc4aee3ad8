//! Sentence-level preprocessing info supplied by upstream collaborators.
//!
//! The verb/subject determiner runs once per sentence before decomposition
//! and reports every verb-phrase range, the aligned subject phrase for each,
//! and a map of coded noun phrases and named entities. The engine only reads
//! these; it never recomputes them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Agent phrase of a passive verb phrase
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentSpan {
    pub phrase_start: usize,
    pub phrase_end: usize,
}

/// Voice information for one verb phrase
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PassiveInfo {
    pub is_passive: bool,
    pub agent: Option<AgentSpan>,
}

/// One verb phrase found by preprocessing: half-open token range plus the
/// index of the phrase's head verb.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerbPhrase {
    pub phrase_start: usize,
    pub phrase_end: usize,
    pub head_index: usize,
    pub passive: PassiveInfo,
}

impl VerbPhrase {
    /// Whether the verb at `index` falls inside this phrase
    pub fn covers(&self, index: usize) -> bool {
        (self.phrase_start..self.phrase_end).contains(&index)
    }

    /// `start-end` rendering used by diagnostic placeholders
    pub fn bounds_label(&self) -> String {
        format!("{}-{}", self.phrase_start, self.phrase_end)
    }
}

/// Subject phrase aligned with one verb phrase. `subject_index` is absent
/// for subjectless phrases (imperatives, fragments).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubjectPhrase {
    pub subject_index: Option<usize>,
    pub phrase_start: usize,
    pub phrase_end: usize,
}

/// Verb phrases and their aligned subject phrases, index-for-index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerbsSubjects {
    pub verbs: Vec<VerbPhrase>,
    pub subjects: Vec<SubjectPhrase>,
}

/// One coded noun phrase or named entity. `ent_type` is empty for plain
/// noun phrases and may embed the owning profile id as `TYPE=profileId`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NounPhrase {
    pub phrase: String,
    pub root_index: usize,
    pub ent_type: String,
}

/// Everything preprocessing hands to the engine for one sentence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreprocessingInfo {
    pub verbs_subjects: VerbsSubjects,
    /// Keyed by coded label (e.g. "NP1", "NE2")
    pub ne_np: HashMap<String, Vec<NounPhrase>>,
}

impl PreprocessingInfo {
    /// Verb phrase covering the verb at `index`, with its aligned subject
    pub fn phrase_for_verb(&self, index: usize) -> Option<(&VerbPhrase, Option<&SubjectPhrase>)> {
        let position = self
            .verbs_subjects
            .verbs
            .iter()
            .position(|phrase| phrase.covers(index))?;
        Some((
            &self.verbs_subjects.verbs[position],
            self.verbs_subjects.subjects.get(position),
        ))
    }

    /// Noun phrases whose root sits at `index`
    pub fn phrases_rooted_at(&self, index: usize) -> Vec<&NounPhrase> {
        let mut found: Vec<&NounPhrase> = self
            .ne_np
            .values()
            .flatten()
            .filter(|phrase| phrase.root_index == index)
            .collect();
        found.sort_by(|a, b| a.phrase.cmp(&b.phrase));
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_for_verb() {
        let info = PreprocessingInfo {
            verbs_subjects: VerbsSubjects {
                verbs: vec![
                    VerbPhrase {
                        phrase_start: 1,
                        phrase_end: 4,
                        head_index: 1,
                        ..Default::default()
                    },
                    VerbPhrase {
                        phrase_start: 6,
                        phrase_end: 8,
                        head_index: 6,
                        ..Default::default()
                    },
                ],
                subjects: vec![
                    SubjectPhrase {
                        subject_index: Some(0),
                        phrase_start: 0,
                        phrase_end: 1,
                    },
                    SubjectPhrase::default(),
                ],
            },
            ..Default::default()
        };

        let (phrase, subject) = info.phrase_for_verb(3).unwrap();
        assert_eq!(phrase.bounds_label(), "1-4");
        assert_eq!(subject.unwrap().subject_index, Some(0));
        assert!(info.phrase_for_verb(5).is_none());
    }

    #[test]
    fn test_phrases_rooted_at() {
        let mut ne_np = HashMap::new();
        ne_np.insert(
            "NE1".to_string(),
            vec![NounPhrase {
                phrase: "Acme Corp".to_string(),
                root_index: 2,
                ent_type: "ORG".to_string(),
            }],
        );
        let info = PreprocessingInfo {
            ne_np,
            ..Default::default()
        };
        assert_eq!(info.phrases_rooted_at(2).len(), 1);
        assert!(info.phrases_rooted_at(0).is_empty());
    }
}
