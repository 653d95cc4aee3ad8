//! Per-keyword analysis pipeline.
//!
//! Four steps per keyword: expertise check, verb search with role-flag
//! grouping, subject resolution against the precomputed verb phrases, and
//! output flattening. Every failure is local to the keyword being analyzed;
//! an unclassifiable keyword is logged and contributes zero rows.

use decomp_core::{
    Derivation, FlagPart, Keyword, KeywordRecord, OutputRecord, PreprocessingInfo, RoleFlag,
    Sentence, SentenceContext, SubjectInfo, VerbTuple,
};

use crate::expertise::ExpertiseChecker;
use crate::flatten::flatten_record;
use crate::keyword_actions::actions_for_keyword;
use crate::morph::RuleDerivation;
use crate::no_verbs::process_no_verbs;
use crate::secondary::{actions_for_means, actions_for_result};
use crate::subject::{resolve_profile_suffix, subject_type};

/// Tag embedded in the subject-type field when a classified verb is not
/// covered by any preprocessing verb phrase
pub const SUBJECT_ERROR_FLAG: &str = "error-subject-no-verb";

/// Tag for tuples that carry no verb index at all
pub const NO_VERB_INDEX_FLAG: &str = "error-no-verb-index";

fn push_part(parts: &mut Vec<FlagPart>, part: FlagPart) {
    if !parts.iter().any(|p| p.label() == part.label()) {
        parts.push(part);
    }
}

fn secondary_actions(
    sent: &Sentence,
    record: &KeywordRecord,
    tuple: &VerbTuple,
) -> Vec<VerbTuple> {
    let anchor = if tuple.verb.is_empty() {
        None
    } else {
        tuple.verb_index
    };
    if tuple.flag == RoleFlag::Means {
        actions_for_means(sent, &record.keyword.span, anchor)
    } else {
        actions_for_result(sent, &record.keyword.span, anchor)
    }
}

fn assign_single_flag(
    sent: &Sentence,
    record: &mut KeywordRecord,
    flag: RoleFlag,
    tuples: Vec<VerbTuple>,
) -> bool {
    match flag {
        RoleFlag::Subject | RoleFlag::Action | RoleFlag::State | RoleFlag::Enum => {
            record.parts = vec![FlagPart::plain(flag)];
            for tuple in tuples {
                record.push_tuple(tuple);
            }
            true
        }
        RoleFlag::Means
        | RoleFlag::Result
        | RoleFlag::IndirectEngagement
        | RoleFlag::Benefactive => {
            let actions = tuples
                .last()
                .map(|last| secondary_actions(sent, record, last))
                .unwrap_or_default();
            if actions.is_empty() {
                record.parts = vec![FlagPart::plain(flag)];
            } else {
                record.parts = vec![FlagPart::with_action(flag)];
                for action in actions {
                    record.push_tuple(action);
                }
            }
            for tuple in tuples {
                record.push_tuple(tuple);
            }
            true
        }
        other => {
            tracing::error!(keyword = %record.keyword.improved, flag = %other,
                "unexpected single role flag");
            false
        }
    }
}

fn assign_two_flags(
    sent: &Sentence,
    record: &mut KeywordRecord,
    tuples: Vec<VerbTuple>,
) -> bool {
    let mut parts = Vec::new();
    for (position, tuple) in tuples.iter().enumerate() {
        match tuple.flag {
            RoleFlag::Action | RoleFlag::State => {
                push_part(&mut parts, FlagPart::plain(tuple.flag));
                record.push_tuple(tuple.clone());
            }
            RoleFlag::Means
            | RoleFlag::Result
            | RoleFlag::IndirectEngagement
            | RoleFlag::Benefactive => {
                // Only the leading tuple of the pair gets the secondary
                // action search
                if position == 0 {
                    let actions = secondary_actions(sent, record, tuple);
                    if actions.is_empty() {
                        push_part(&mut parts, FlagPart::plain(tuple.flag));
                    } else {
                        push_part(&mut parts, FlagPart::with_action(tuple.flag));
                        for action in actions {
                            record.push_tuple(action);
                        }
                    }
                } else {
                    push_part(&mut parts, FlagPart::plain(tuple.flag));
                }
                record.push_tuple(tuple.clone());
            }
            other => {
                tracing::error!(keyword = %record.keyword.improved, flag = %other,
                    "unexpected role flag in a two-flag combination");
                return false;
            }
        }
    }
    record.parts = parts;
    true
}

/// Steps 1 and 2: expertise check, then verb search and role-flag grouping.
/// Returns None for a keyword whose flag combination cannot be classified.
pub fn build_record(
    sent: &Sentence,
    keyword: &Keyword,
    expertise: &ExpertiseChecker,
    derivation: &dyn Derivation,
) -> Option<KeywordRecord> {
    let mut record = KeywordRecord::new(keyword.clone());

    if expertise.check(sent, keyword) {
        record.expertise = true;
        return Some(record);
    }

    let tuples = actions_for_keyword(sent, &keyword.span);
    if tuples.is_empty() {
        record.no_verbs = true;
        record.special = process_no_verbs(sent, &keyword.span, derivation);
        return Some(record);
    }

    let mut distinct: Vec<RoleFlag> = Vec::new();
    for tuple in &tuples {
        if !distinct.contains(&tuple.flag) {
            distinct.push(tuple.flag);
        }
    }

    let assigned = match distinct.len() {
        1 => assign_single_flag(sent, &mut record, distinct[0], tuples),
        2 => assign_two_flags(sent, &mut record, tuples),
        _ => {
            tracing::error!(keyword = %keyword.improved, flags = ?distinct,
                "keyword carries more than two distinct role flags");
            false
        }
    };
    assigned.then_some(record)
}

/// Step 3: subject resolution for every primary tuple with a verb index.
pub fn resolve_subjects(
    sent: &Sentence,
    record: &mut KeywordRecord,
    preprocessing: &PreprocessingInfo,
    profile_id: &str,
) {
    if record.expertise || record.no_verbs {
        return;
    }
    if let [part] = record.parts.as_slice() {
        if !part.with_action && matches!(part.base, RoleFlag::Benefactive | RoleFlag::Enum) {
            return;
        }
    }

    let keyword_is_subject = record
        .parts
        .first()
        .map(|p| p.base == RoleFlag::Subject && !p.with_action)
        .unwrap_or(false);
    let primary = record.primary_tuples().to_vec();

    let mut subjects = Vec::with_capacity(primary.len());
    for tuple in &primary {
        let Some(verb_index) = tuple.verb_index else {
            let diagnostic = format!("{NO_VERB_INDEX_FLAG}__{}", tuple.verb);
            subjects.push(SubjectInfo {
                token: diagnostic,
                subject_type: SUBJECT_ERROR_FLAG.to_string(),
                ..Default::default()
            });
            continue;
        };

        match preprocessing.phrase_for_verb(verb_index) {
            Some((phrase, subject_phrase)) => {
                let (token, subject_index) = match subject_phrase {
                    Some(sp) if sp.subject_index.is_some() => (
                        sent.span_text(sp.phrase_start, sp.phrase_end),
                        sp.subject_index,
                    ),
                    _ => (String::new(), None),
                };
                let raw = subject_type(sent, subject_index, preprocessing, phrase.head_index);
                let agent = phrase
                    .passive
                    .agent
                    .as_ref()
                    .map(|a| sent.span_text(a.phrase_start, a.phrase_end))
                    .unwrap_or_default();
                subjects.push(SubjectInfo {
                    token,
                    subject_type: resolve_profile_suffix(&raw, profile_id),
                    verb_phrase: sent.span_text(phrase.phrase_start, phrase.phrase_end),
                    is_passive: phrase.passive.is_passive,
                    agent,
                    resolved: true,
                });
            }
            None if keyword_is_subject && tuple.verb.is_empty() => {
                // The keyword itself is the subject; there is no predicate
                // phrase to look up
                subjects.push(SubjectInfo {
                    token: record.keyword.improved.clone(),
                    subject_type: "Undefined".to_string(),
                    resolved: true,
                    ..Default::default()
                });
            }
            None => {
                let bounds: Vec<String> = preprocessing
                    .verbs_subjects
                    .verbs
                    .iter()
                    .map(|v| v.bounds_label())
                    .collect();
                let diagnostic =
                    format!("{SUBJECT_ERROR_FLAG}_{verb_index}_{}", bounds.join("|"));
                tracing::warn!(keyword = %record.keyword.improved, verb_index,
                    "verb not covered by any preprocessing verb phrase");
                subjects.push(SubjectInfo {
                    token: diagnostic,
                    subject_type: SUBJECT_ERROR_FLAG.to_string(),
                    ..Default::default()
                });
            }
        }
    }
    record.subjects = subjects;
}

// ============================================================================
// Engine
// ============================================================================

/// The decomposition engine: compiled expertise phrases plus a derivation
/// backend. Stateless across calls and safe to share between threads.
pub struct DecompositionEngine {
    expertise: ExpertiseChecker,
    derivation: Box<dyn Derivation>,
}

impl DecompositionEngine {
    pub fn new() -> Self {
        Self::with_derivation(Box::new(RuleDerivation::new()))
    }

    pub fn with_derivation(derivation: Box<dyn Derivation>) -> Self {
        Self {
            expertise: ExpertiseChecker::new(),
            derivation,
        }
    }

    /// Run the full pipeline over every keyword of one sentence.
    pub fn analyze(
        &self,
        sent: &Sentence,
        keywords: &[Keyword],
        preprocessing: &PreprocessingInfo,
        context: &SentenceContext,
    ) -> Vec<OutputRecord> {
        let mut rows = Vec::new();
        for keyword in keywords {
            let Some(mut record) =
                build_record(sent, keyword, &self.expertise, self.derivation.as_ref())
            else {
                continue;
            };
            resolve_subjects(sent, &mut record, preprocessing, &context.ref_id);
            tracing::debug!(keyword = %keyword.improved, flag = %record.flag_label(),
                "keyword classified");
            rows.extend(
                flatten_record(&record)
                    .into_iter()
                    .map(|row| row.with_context(context)),
            );
        }
        rows
    }
}

impl Default for DecompositionEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
