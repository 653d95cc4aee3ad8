//! Rule-based derivational morphology.
//!
//! Stands in for a full dictionary backend behind the `Derivation` trait:
//! a verb-sense lexicon plus deverbal-suffix stripping with an exception
//! table, returning ranked candidates the way a synset lookup would.

use decomp_core::{Derivation, WordClass};

use crate::lexicon::{has, DEVERBAL_SUFFIXES};

/// Words usable as verbs. Consulted when deciding whether a noun-looking
/// token can anchor a verb chain or yield an extracted object.
const VERB_SENSES: &[&str] = &[
    "accelerate", "achieve", "acquire", "act", "advertise", "advise", "analyze", "approve",
    "audit", "automate", "brand", "budget", "build", "buy", "campaign", "coach", "code",
    "collaborate", "communicate", "consult", "coordinate", "cover", "craft", "create", "decide",
    "deliver", "demo", "design", "develop", "direct", "distribute", "drive", "engage",
    "engineer", "execute", "expand", "experiment", "export", "forecast", "fund", "grow",
    "guide", "hire", "implement", "import", "improve", "increase", "influence", "innovate",
    "insure", "integrate", "invest", "launch", "lead", "leverage", "maintain", "manage",
    "market", "maximize", "measure", "mentor", "merge", "migrate", "model", "negotiate",
    "operate", "optimize", "organize", "own", "partner", "perform", "pitch", "plan",
    "position", "present", "produce", "program", "promote", "prospect", "prototype", "publish",
    "recruit", "report", "research", "scale", "schedule", "sell", "serve", "ship", "support",
    "survey", "target", "test", "train", "transform", "translate", "use",
];

/// Irregular noun-to-verb derivations the suffix rules cannot reach
const NOUN_TO_VERB_EXCEPTIONS: &[(&str, &str)] = &[
    ("analysis", "analyze"),
    ("decision", "decide"),
    ("delivery", "deliver"),
    ("growth", "grow"),
    ("maintenance", "maintain"),
    ("performance", "perform"),
    ("sale", "sell"),
    ("sales", "sell"),
];

/// Whether `word` itself has a verb sense
pub fn has_verb_sense(word: &str) -> bool {
    let trimmed = word
        .trim_matches(|c: char| c.is_ascii_punctuation())
        .to_lowercase();
    has(VERB_SENSES, &trimmed)
}

/// Whether `word` carries one of the deverbal suffixes
pub fn has_deverbal_suffix(word: &str) -> bool {
    let lowered = word.to_lowercase();
    DEVERBAL_SUFFIXES
        .iter()
        .any(|suffix| lowered.ends_with(suffix) && lowered.len() > suffix.len())
}

/// Candidate verbs for a deverbal noun, unverified
fn raw_candidates(noun: &str) -> Vec<String> {
    let mut candidates = Vec::new();
    for (exception, verb) in NOUN_TO_VERB_EXCEPTIONS {
        if noun == *exception {
            candidates.push((*verb).to_string());
        }
    }

    let stem = |suffix: &str| noun.strip_suffix(suffix).map(str::to_string);

    if let Some(stem) = noun
        .strip_suffix("isation")
        .or_else(|| noun.strip_suffix("ization"))
    {
        candidates.push(format!("{stem}ize"));
    }
    if let Some(stem) = stem("ation") {
        candidates.push(format!("{stem}ate"));
    }
    if let Some(stem) = stem("ion") {
        candidates.push(format!("{stem}e"));
        candidates.push(stem);
    }
    for suffix in ["ment", "ance", "ence", "age", "ery"] {
        if let Some(stem) = noun.strip_suffix(suffix) {
            candidates.push(stem.to_string());
            candidates.push(format!("{stem}e"));
        }
    }
    candidates
}

/// Rule-based implementation of the `Derivation` trait
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleDerivation;

impl RuleDerivation {
    pub fn new() -> Self {
        Self
    }
}

impl Derivation for RuleDerivation {
    fn related(&self, word: &str, from: WordClass, to: WordClass) -> Vec<(String, f32)> {
        if from != WordClass::Noun || to != WordClass::Verb {
            return Vec::new();
        }
        let noun = word
            .trim_matches(|c: char| c.is_ascii_punctuation())
            .to_lowercase();
        if noun.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<(String, f32)> = Vec::new();
        let candidates = raw_candidates(&noun);
        let total = candidates.len().max(1) as f32;
        for (position, candidate) in candidates.into_iter().enumerate() {
            if !has(VERB_SENSES, &candidate) {
                continue;
            }
            if ranked.iter().any(|(seen, _)| *seen == candidate) {
                continue;
            }
            // Earlier rules are the more specific ones
            let weight = (total - position as f32) / total;
            ranked.push((candidate, weight));
        }
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }

    fn has_verb_sense(&self, word: &str) -> bool {
        has_verb_sense(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn best(word: &str) -> Option<String> {
        RuleDerivation
            .related(word, WordClass::Noun, WordClass::Verb)
            .into_iter()
            .next()
            .map(|(w, _)| w)
    }

    #[test]
    fn test_suffix_derivations() {
        assert_eq!(best("management"), Some("manage".to_string()));
        assert_eq!(best("automation"), Some("automate".to_string()));
        assert_eq!(best("optimization"), Some("optimize".to_string()));
        assert_eq!(best("coverage"), Some("cover".to_string()));
        assert_eq!(best("delivery"), Some("deliver".to_string()));
    }

    #[test]
    fn test_exceptions() {
        assert_eq!(best("analysis"), Some("analyze".to_string()));
        assert_eq!(best("sales"), Some("sell".to_string()));
    }

    #[test]
    fn test_non_deverbal_yields_nothing() {
        assert!(best("leadership").is_none());
        assert!(best("and").is_none());
        assert!(best("").is_none());
    }

    #[test]
    fn test_verb_sense() {
        assert!(has_verb_sense("drive"));
        assert!(has_verb_sense("Launch"));
        assert!(has_verb_sense("-manage-"));
        assert!(!has_verb_sense("strategy"));
    }

    #[test]
    fn test_wrong_word_classes() {
        let lookup = RuleDerivation;
        assert!(lookup
            .related("management", WordClass::Verb, WordClass::Noun)
            .is_empty());
    }
}
