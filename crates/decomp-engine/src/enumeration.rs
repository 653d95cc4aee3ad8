//! Enumeration sentence splitting.
//!
//! Profile sentences like "Skills: SEO, content marketing and PPC" carry no
//! clause structure worth parsing; the splitter detects the generalizing
//! opener, classifies the list (skills / industries / brands), and breaks
//! the remainder into keyword-sized items.

use regex::Regex;
use serde::{Deserialize, Serialize};

const SKILLS_WORDS_1: &[&str] = &[
    "specialties",
    "include",
    "skills",
    "responsibilities",
    "expertise",
    "including",
    "experience",
    "achievements",
    "competencies",
    "includes",
    "areas",
    "accomplishments",
    "specialities",
    "tools",
    "results",
    "strengths",
    "included",
    "role",
];

const SKILLS_WORDS_2: &[&str] = &[
    "of expertise",
    "core competencies",
    "specialties include",
    "key achievements",
    "responsibilities include",
    "such as",
    "responsible for",
    "strengths include",
    "skilled in",
    "key skills",
    "skills include",
    "skills in",
    "expertise in",
    "services include",
    "following areas",
    "key accomplishments",
    "strengths in",
    "key words",
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
    "professional interests",
    "focused on",
    "specialist in",
];

const SKILLS_WORDS_3: &[&str] = &[
    "in charge of",
    "of expertise include",
    "areas of expertise",
    "what i do",
    "the following areas",
    "key responsibilities include",
    "core competencies include",
    "what drives me",
    "the areas of",
    "of expertise in",
];

const BRANDS_WORDS_1: &[&str] = &["brands", "clients"];

const BRANDS_WORDS_2: &[&str] = &[
    "brands include",
    "brands including",
    "brands are",
    "client experience",
    "clients include",
    "accounts responsibility",
    "main accounts",
];

const BRANDS_WORDS_3: &[&str] = &["brands such as", "brand partner experience"];

const INDUSTRIES_WORDS_1: &[&str] = &["industries"];

const INDUSTRIES_WORDS_2: &[&str] = &["industries include"];

const INDUSTRIES_WORDS_3: &[&str] = &["industry experience in"];

/// List category detected from the generalizing opener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumerationCategory {
    Skills,
    Brands,
    Industries,
    Undefined,
}

impl EnumerationCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Skills => "skills",
            Self::Brands => "brands",
            Self::Industries => "industries",
            Self::Undefined => "undefined",
        }
    }
}

/// One split sentence: the category plus items partitioned by length
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumerationResult {
    pub sentence: String,
    pub category: EnumerationCategory,
    pub keywords: Vec<String>,
    pub long_phrases: Vec<String>,
}

/// Compiled opener patterns, most specific (three-word) first
pub struct EnumerationSplitter {
    patterns: Vec<(Regex, EnumerationCategory)>,
    brackets: Option<Regex>,
    url: Option<Regex>,
    search_len: usize,
}

fn opener_pattern(words: &[&str]) -> Option<Regex> {
    let alternation = words
        .iter()
        .map(|word| format!(r"{}[\w()]*[ :]+", regex::escape(word)))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&alternation).ok()
}

impl EnumerationSplitter {
    pub fn new() -> Self {
        use EnumerationCategory::{Brands, Industries, Skills};

        let tiers: [(&[&str], EnumerationCategory); 9] = [
            (SKILLS_WORDS_3, Skills),
            (INDUSTRIES_WORDS_3, Industries),
            (BRANDS_WORDS_3, Brands),
            (SKILLS_WORDS_2, Skills),
            (INDUSTRIES_WORDS_2, Industries),
            (BRANDS_WORDS_2, Brands),
            (SKILLS_WORDS_1, Skills),
            (INDUSTRIES_WORDS_1, Industries),
            (BRANDS_WORDS_1, Brands),
        ];
        let mut patterns = Vec::with_capacity(tiers.len());
        let mut search_len = 0;
        for (words, category) in tiers {
            for word in words {
                search_len = search_len.max(word.len());
            }
            if let Some(pattern) = opener_pattern(words) {
                patterns.push((pattern, category));
            }
        }

        Self {
            patterns,
            brackets: Regex::new(r"\((.*?)\)").ok(),
            url: Regex::new(r"www\.|https://|http://|@").ok(),
            search_len: search_len * 2,
        }
    }

    /// Text inside brackets becomes standalone items; the sentence loses it
    fn extract_bracketed(&self, sentence: &str) -> (String, Vec<String>) {
        let Some(brackets) = &self.brackets else {
            return (sentence.to_string(), Vec::new());
        };
        let items: Vec<String> = brackets
            .captures_iter(sentence)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .collect();
        let clear = brackets.replace_all(sentence, "").to_string();
        (clear, items)
    }

    /// Split "a & b" / "a/b" / "a and b" items into their parts, keeping
    /// shared head/tail words with each part ("brand & content strategy" ->
    /// "brand strategy", "content strategy").
    fn split_items(&self, items: Vec<String>) -> Vec<String> {
        let mut granular = Vec::new();
        for item in items {
            for piece in item.split(',').flat_map(|p| p.split(": ")) {
                granular.push(piece.to_string());
            }
        }

        let mut result = Vec::new();
        for item in granular {
            if self
                .url
                .as_ref()
                .map(|url| url.is_match(&item))
                .unwrap_or(false)
            {
                continue;
            }
            let after_amp = split_on_marker(&item, "&", false);
            let after_slash: Vec<String> =
                after_amp.into_iter().flat_map(split_slashes).collect();
            for piece in after_slash {
                result.extend(split_on_marker(&piece, "and", true));
            }
        }
        result
    }

    /// Drop one-letter leftovers and partition by item length
    fn clean_items(&self, items: Vec<String>) -> (Vec<String>, Vec<String>) {
        let mut keywords = Vec::new();
        let mut long_phrases = Vec::new();
        for item in items {
            let normalized = item.split_whitespace().collect::<Vec<_>>().join(" ");
            if normalized.len() <= 1 {
                continue;
            }
            if normalized.split_whitespace().count() <= 4 {
                keywords.push(normalized);
            } else {
                long_phrases.push(normalized);
            }
        }
        (keywords, long_phrases)
    }

    /// Split one enumeration sentence into typed items.
    pub fn split(&self, sentence: &str) -> EnumerationResult {
        let lowered = sentence.to_lowercase();
        let (clear, mut items) = self.extract_bracketed(&lowered);
        let search_part: String = clear.chars().take(self.search_len).collect();

        let mut category = EnumerationCategory::Undefined;
        let mut enumeration_part = clear.as_str();
        for (pattern, pattern_category) in &self.patterns {
            if pattern.is_match(&search_part) {
                if let Some(found) = pattern.find(&clear) {
                    category = *pattern_category;
                    enumeration_part = &clear[found.end()..];
                    break;
                }
            }
        }

        items.extend(
            enumeration_part
                .split([',', '*'])
                .map(|piece| piece.to_string()),
        );
        if category != EnumerationCategory::Brands {
            items = self.split_items(items);
        }
        let (keywords, long_phrases) = self.clean_items(items);

        EnumerationResult {
            sentence: sentence.to_string(),
            category,
            keywords,
            long_phrases,
        }
    }

    pub fn split_all(&self, sentences: &[String]) -> Vec<EnumerationResult> {
        sentences.iter().map(|s| self.split(s)).collect()
    }
}

impl Default for EnumerationSplitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Positional recombination around a single "&" or "and": the other words
/// of a short item distribute over both sides of the marker. Items too long
/// for recombination are split plainly ("and") or kept whole ("&").
fn split_on_marker(item: &str, marker: &str, split_when_long: bool) -> Vec<String> {
    let padded = format!(" {item} ");
    let separator = format!(" {marker} ");
    let plain_split = || {
        padded
            .split(&separator)
            .map(|p| p.trim().to_string())
            .collect::<Vec<_>>()
    };
    if padded.matches(&separator).count() != 1 {
        return if marker == "and" && padded.contains(&separator) {
            plain_split()
        } else {
            vec![item.to_string()]
        };
    }
    let pieces: Vec<&str> = item.split_whitespace().collect();
    if pieces.len() > 5 {
        return if split_when_long {
            plain_split()
        } else {
            vec![item.to_string()]
        };
    }
    let Some(at) = pieces.iter().position(|p| *p == marker) else {
        return vec![item.to_string()];
    };

    let join = |indices: &[usize]| {
        indices
            .iter()
            .map(|&i| pieces[i])
            .collect::<Vec<_>>()
            .join(" ")
    };
    match (pieces.len(), at) {
        (3, 1) => vec![join(&[0]), join(&[2])],
        (5, 2) => vec![join(&[0, 1]), join(&[3, 4])],
        (5, 1) => vec![join(&[0, 3, 4]), join(&[2, 3, 4])],
        (5, 3) => vec![join(&[0, 1, 2]), join(&[0, 1, 4])],
        (4, 1) => vec![join(&[0, 3]), join(&[2, 3])],
        (4, 2) => vec![join(&[0, 1]), join(&[0, 3])],
        (_, 0) if split_when_long => vec![join(&(1..pieces.len()).collect::<Vec<_>>())],
        _ if split_when_long => plain_split(),
        _ => vec![item.to_string()],
    }
}

/// "a/b" splits unless the pieces look like an abbreviation ("p/l")
fn split_slashes(item: String) -> Vec<String> {
    if !item.contains('/') {
        return vec![item];
    }
    let pieces: Vec<&str> = item.split(['/', ' ']).collect();
    let single_letters = pieces.iter().filter(|p| p.len() == 1).count();
    if single_letters >= 2 {
        vec![item]
    } else {
        item.split('/').map(|p| p.to_string()).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn splitter() -> EnumerationSplitter {
        EnumerationSplitter::new()
    }

    #[test]
    fn test_skills_enumeration() {
        let result = splitter().split("Skills: SEO, content marketing and PPC");
        assert_eq!(result.category, EnumerationCategory::Skills);
        assert!(result.keywords.contains(&"seo".to_string()));
        assert!(result.keywords.contains(&"content marketing".to_string()));
        assert!(result.long_phrases.is_empty());
    }

    #[test]
    fn test_brands_keep_items_whole() {
        let result = splitter().split("Clients include Acme, Initech and Globex");
        assert_eq!(result.category, EnumerationCategory::Brands);
        // brand names never get recombined around "and"
        assert!(result
            .keywords
            .contains(&"initech and globex".to_string()));
    }

    #[test]
    fn test_undefined_without_opener() {
        let result = splitter().split("We build software for banks");
        assert_eq!(result.category, EnumerationCategory::Undefined);
    }

    #[test]
    fn test_ampersand_distributes_tail() {
        let result = splitter().split("Skills: brand & content strategy");
        assert!(result.keywords.contains(&"brand strategy".to_string()));
        assert!(result.keywords.contains(&"content strategy".to_string()));
    }

    #[test]
    fn test_slash_abbreviation_survives() {
        let result = splitter().split("Skills: p/l management, seo/sem");
        assert!(result.keywords.contains(&"p/l management".to_string()));
        assert!(result.keywords.contains(&"seo".to_string()));
        assert!(result.keywords.contains(&"sem".to_string()));
    }

    #[test]
    fn test_bracketed_text_becomes_item() {
        let result = splitter().split("Skills: analytics (google analytics), seo");
        assert!(result.keywords.contains(&"google analytics".to_string()));
        assert!(!result.sentence.is_empty());
    }

    #[test]
    fn test_urls_filtered_out() {
        let result = splitter().split("Skills: seo, www.example.com, ppc");
        assert!(!result.keywords.iter().any(|k| k.contains("www")));
        assert!(result.keywords.contains(&"ppc".to_string()));
    }
}
