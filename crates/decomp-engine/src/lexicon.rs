//! Static rule lexicons.
//!
//! Every table here is read-only, process-wide, and consulted by the
//! classifiers and traversal code. Two-word entries are matched against
//! space-joined token bigrams.

/// Light/auxiliary-like verbs that never count as governing verbs
pub const VERB_STOPLIST: &[&str] = &[
    "including",
    "include",
    "includes",
    "consist",
    "start up",
    "paid",
    "driven",
    "proven",
    "oriented",
    "spans",
    "span",
    "limit",
    "limited",
    "thought",
    "based",
    "like",
    "like to",
    "love",
    "love to",
    "need",
    "need to",
    "want",
    "want to",
    "lead nurturing",
    "lead generation",
];

/// Job-title nouns
pub const ROLE_NOUNS: &[&str] = &[
    "leader",
    "specialist",
    "professional",
    "strategist",
    "manager",
    "coordinator",
    "intern",
    "admin",
    "consultant",
    "director",
    "marketer",
    "officer",
    "apprentice",
    "associate",
    "assistant",
    "expert",
];

/// Generic placeholder nouns never treated as real objects
pub const OBJECT_PLACEHOLDERS: &[&str] = &["lot", "plenty", "variety", "deal", "range"];

/// Enabling verbs whose clausal complements carry the semantics
pub const CCOMP_VERBS: &[&str] = &["help", "allow", "let", "discover", "enable"];

/// Words blocking the to/for result reading
pub const RESULT_EXCLUDE: &[&str] = &[
    "appointed",
    "selected",
    "tasked",
    "intend",
    "want",
    "need",
    "love",
    "like",
    "ask",
    "hope",
    "ensure",
    "plan",
    "exist",
];

/// Lemmas that read as result verbs on their own
pub const RESULT_VERBS: &[&str] = &[
    "help",
    "increase",
    "maximize",
    "develop",
    "enhance",
    "enforce",
    "transform",
];

/// Lemmas that read as means verbs on their own
pub const MEANS_VERBS: &[&str] = &["use", "leverage", "navigate", "visit", "follow", "subscribe"];

/// Prepositions introducing a result clause
pub const PREP_RESULT: &[&str] = &["to", "for"];

/// Prepositions introducing a means phrase
pub const PREP_MEANS: &[&str] = &["via", "by", "through"];

/// Verb+next-token bigrams that force the result reading
pub const RESULT_BIGRAMS: &[&str] = &["led to", "leading to", "resulted in", "resulting in"];

/// Four-token means idioms
pub const WITH_USE_PHRASES: &[&str] = &["with the use of", "with the help of"];

/// Textual coordination markers
pub const CONJ_MARKERS: &[&str] = &["and", "&", ","];

/// Suffixes of deverbal nouns
pub const DEVERBAL_SUFFIXES: &[&str] = &["age", "ance", "ence", "ion", "ment", "ness", "ery"];

/// Membership nouns that suppress extraction ("part of", "member of")
pub const PART_NOUNS: &[&str] = &["part", "member"];

// ============================================================================
// Expertise phrases
// ============================================================================

pub const EXPERTISE_WORDS_1: &[&str] = &[
    "specialties",
    "skills",
    "responsibilities",
    "expertise",
    "experience",
    "competencies",
    "specialities",
    "expert",
    "familiarity",
    "specialist",
    "professional",
    "focus",
    "skilled",
];

pub const EXPERTISE_WORDS_2: &[&str] = &[
    "of expertise",
    "core competencies",
    "specialties include",
    "key achievements",
    "responsibilities include",
    "strengths include",
    "skilled in",
    "skilled at",
    "key skills",
    "skills include",
    "skills in",
    "expertise in",
    "key accomplishments",
    "strengths in",
    "experience with",
    "experience in",
    "experience of",
    "experience includes",
    "specialized in",
    "knowledge of",
    "skilled with",
    "expert in",
    "success in",
    "experienced with",
    "experienced in",
    "professional interests",
    "focused on",
    "focus on",
    "accomplished in",
    "years of",
    "years in",
    "years at",
    "decades of",
    "decades in",
    "decades at",
    "leader in",
    "record in",
    "recored of",
    "backgroud in",
    "experience across",
    "experiences across",
    "charge of",
    "understanding of",
    "experience from",
    "aspects of",
    "my strengths",
    "strong background",
    "key competencies",
    "key experience",
    "main competencies",
    "core qualifications",
    "responsible for",
    "knowledgeable in",
    "proficient in",
    "knowledgeable amongst",
    "affinity for",
    "specialization in",
    "specialist in",
    "emphasis in",
    "diploma in",
    "focus in",
    "area of",
    "responsibility for",
    "background in",
    "of knowledge",
    "accomplishments in",
    "experts in",
    "years within",
    "passion for",
];

pub const EXPERTISE_WORDS_3: &[&str] = &[
    "in charge of",
    "of expertise include",
    "areas of expertise",
    "what i do",
    "the following areas",
    "key responsibilities include",
    "core competencies include",
    "what drives me",
    "the areas of",
    "in field of",
    "focus is on",
];

// ============================================================================
// Subject-type lexicon
// ============================================================================

/// Surface words naming each coarse subject type
pub const SUBJECT_LEXICON: &[(&str, &[&str])] = &[
    ("SOMEONE", &["community"]),
    (
        "COMPANY",
        &[
            "company",
            "companies",
            "inc",
            "llc",
            "services",
            "platform",
            "employees",
            "agency",
            "organization",
            "organizations",
            "organisation",
            "organisations",
            "firm",
            "firms",
            "us",
            "solution",
            "solutions",
            "startup",
            "group",
        ],
    ),
    ("CompanyPronoun", &["we", "it"]),
    (
        "PERSON",
        &[
            "i", "my", "he", "she", "whom", "its", "her", "his", "anybody", "anyone", "anything",
            "each one", "everybody", "everyone", "nobody", "no one", "one", "somebody", "someone",
            "yourself",
        ],
    ),
    ("TEAM", &["team", "teams"]),
];

// ============================================================================
// Lookup helpers
// ============================================================================

/// Case-insensitive membership test
pub fn has(table: &[&str], word: &str) -> bool {
    table.iter().any(|entry| entry.eq_ignore_ascii_case(word))
}

pub fn is_stoplisted(word: &str) -> bool {
    has(VERB_STOPLIST, word)
}

pub fn is_role_noun(word: &str) -> bool {
    has(ROLE_NOUNS, word)
}

pub fn is_conj_marker(word: &str) -> bool {
    CONJ_MARKERS.contains(&word)
}

pub fn is_placeholder_object(word: &str) -> bool {
    has(OBJECT_PLACEHOLDERS, word)
}

/// Surface lexicon lookup restricted to the given type groups; returns the
/// matching group name.
pub fn subject_group(word: &str, groups: &[&str]) -> Option<&'static str> {
    let lowered = word.to_lowercase();
    for (name, members) in SUBJECT_LEXICON {
        if !groups.is_empty() && !groups.contains(name) {
            continue;
        }
        if members.iter().any(|m| *m == word || *m == lowered) {
            return Some(name);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stoplist_lookup() {
        assert!(is_stoplisted("include"));
        assert!(is_stoplisted("Like")); // case-insensitive
        assert!(!is_stoplisted("launch"));
    }

    #[test]
    fn test_subject_group_restriction() {
        assert_eq!(subject_group("team", &["COMPANY", "TEAM"]), Some("TEAM"));
        assert_eq!(subject_group("team", &["COMPANY"]), None);
        assert_eq!(
            subject_group("We", &["CompanyPronoun", "PERSON"]),
            Some("CompanyPronoun")
        );
    }

    #[test]
    fn test_role_nouns() {
        assert!(is_role_noun("specialist"));
        assert!(!is_role_noun("growth"));
    }
}
