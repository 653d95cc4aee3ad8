//! Role flags, verb tuples, keyword records, and the fixed output schema.

use crate::keyword::Keyword;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Role Flags
// ============================================================================

/// Classification assigned to a keyword (or to one extracted verb tuple).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RoleFlag {
    #[serde(rename = "action")]
    Action,
    #[serde(rename = "state")]
    State,
    #[serde(rename = "subject")]
    Subject,
    #[serde(rename = "means")]
    Means,
    #[serde(rename = "result")]
    Result,
    #[serde(rename = "indirect engagement")]
    IndirectEngagement,
    #[serde(rename = "benefactive")]
    Benefactive,
    #[serde(rename = "expertise")]
    Expertise,
    #[serde(rename = "no-verbs")]
    NoVerbs,
    #[serde(rename = "enum")]
    Enum,
    #[serde(rename = "junk")]
    Junk,
    #[serde(rename = "role")]
    Role,
    #[serde(rename = "extracted object")]
    ExtractedObject,
}

impl RoleFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::State => "state",
            Self::Subject => "subject",
            Self::Means => "means",
            Self::Result => "result",
            Self::IndirectEngagement => "indirect engagement",
            Self::Benefactive => "benefactive",
            Self::Expertise => "expertise",
            Self::NoVerbs => "no-verbs",
            Self::Enum => "enum",
            Self::Junk => "junk",
            Self::Role => "role",
            Self::ExtractedObject => "extracted object",
        }
    }

    /// Short form used for output column naming
    pub fn short(self) -> &'static str {
        match self {
            Self::IndirectEngagement => "indirect",
            other => other.as_str(),
        }
    }

    /// Flags that trigger the secondary result-style extraction
    pub fn is_result_like(self) -> bool {
        matches!(
            self,
            Self::Result | Self::IndirectEngagement | Self::Benefactive
        )
    }

    /// Flags that carry their own verb/object output columns
    pub fn has_role_columns(self) -> bool {
        matches!(
            self,
            Self::Result | Self::Means | Self::IndirectEngagement
        )
    }
}

impl std::fmt::Display for RoleFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One part of a combined keyword flag. A keyword carries 1-3 parts joined
/// with `_`; a part whose role co-occurred with found action verbs renders
/// as `action+role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagPart {
    pub base: RoleFlag,
    pub with_action: bool,
}

impl FlagPart {
    pub fn plain(base: RoleFlag) -> Self {
        Self {
            base,
            with_action: false,
        }
    }

    pub fn with_action(base: RoleFlag) -> Self {
        Self {
            base,
            with_action: true,
        }
    }

    pub fn label(&self) -> String {
        if self.with_action {
            format!("action+{}", self.base.as_str())
        } else {
            self.base.as_str().to_string()
        }
    }
}

// ============================================================================
// Verb Tuples
// ============================================================================

/// Atomic output unit of verb/object extraction: one verb paired with one of
/// its objects. Verbless marker tuples (benefactive, bare means, subject,
/// enum) anchor at the keyword's main token and carry empty verb text;
/// `verb_index` is absent only when no anchor exists at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerbTuple {
    pub verb_index: Option<usize>,
    pub verb: String,
    pub object: String,
    pub prep: String,
    /// Link text carried by secondary (means/result) action tuples
    #[serde(default)]
    pub link: String,
    pub flag: RoleFlag,
}

impl VerbTuple {
    pub fn new(
        verb_index: Option<usize>,
        verb: impl Into<String>,
        object: impl Into<String>,
        prep: impl Into<String>,
        flag: RoleFlag,
    ) -> Self {
        Self {
            verb_index,
            verb: verb.into(),
            object: object.into(),
            prep: prep.into(),
            link: String::new(),
            flag,
        }
    }

    /// A verbless marker tuple anchored at the keyword's main token
    pub fn marker(main_index: usize, flag: RoleFlag) -> Self {
        Self::new(Some(main_index), "", "", "", flag)
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }
}

// ============================================================================
// No-Verb Outcome
// ============================================================================

/// Sub-classification for keywords with zero candidate verbs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoVerbKind {
    Junk,
    Role,
    Subject,
    #[serde(rename = "extracted object")]
    ExtractedObject,
}

impl NoVerbKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Junk => "junk",
            Self::Role => "role",
            Self::Subject => "subject",
            Self::ExtractedObject => "extracted object",
        }
    }
}

/// Result of the no-verb handler: sub-kind, derived verbs (for extracted
/// objects), and the link text (role noun or governing preposition).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoVerbOutcome {
    pub kind: NoVerbKind,
    pub verbs: Vec<String>,
    pub link: String,
}

impl NoVerbOutcome {
    pub fn new(kind: NoVerbKind) -> Self {
        Self {
            kind,
            verbs: Vec::new(),
            link: String::new(),
        }
    }
}

// ============================================================================
// Keyword Record
// ============================================================================

/// Subject resolution for one primary verb tuple
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectInfo {
    /// Resolved subject phrase text, or a diagnostic placeholder tag
    pub token: String,
    /// PERSON / COMPANY / TEAM / SOMEONE / Undefined, with optional _MAYBE
    pub subject_type: String,
    /// Text of the enclosing verb phrase, when known
    pub verb_phrase: String,
    pub is_passive: bool,
    pub agent: String,
    /// Whether preprocessing covered the verb at all
    pub resolved: bool,
}

/// Per-keyword aggregate built up through the four pipeline steps and
/// flattened into output rows at the end.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordRecord {
    pub keyword: Keyword,
    pub expertise: bool,
    pub no_verbs: bool,
    /// Ordered flag parts; joined with `_` for the combined label
    pub parts: Vec<FlagPart>,
    /// One tuple list per base flag
    pub tuples: BTreeMap<RoleFlag, Vec<VerbTuple>>,
    /// Outcome of the no-verb handler, when it ran and classified
    pub special: Option<NoVerbOutcome>,
    /// Aligned with the primary tuple list
    pub subjects: Vec<SubjectInfo>,
}

impl KeywordRecord {
    pub fn new(keyword: Keyword) -> Self {
        Self {
            keyword,
            expertise: false,
            no_verbs: false,
            parts: Vec::new(),
            tuples: BTreeMap::new(),
            special: None,
            subjects: Vec::new(),
        }
    }

    /// Combined flag label, e.g. `action+result_means`
    pub fn flag_label(&self) -> String {
        if self.expertise {
            return "expertise".to_string();
        }
        if self.no_verbs {
            return "no-verbs".to_string();
        }
        self.parts
            .iter()
            .map(FlagPart::label)
            .collect::<Vec<_>>()
            .join("_")
    }

    pub fn push_tuple(&mut self, tuple: VerbTuple) {
        self.tuples.entry(tuple.flag).or_default().push(tuple);
    }

    pub fn tuples_for(&self, flag: RoleFlag) -> &[VerbTuple] {
        self.tuples.get(&flag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The tuple list subject resolution runs over: the action list when the
    /// leading part is an `action+` combination, else the leading base flag.
    pub fn primary_tuples(&self) -> &[VerbTuple] {
        match self.parts.first() {
            Some(part) if part.with_action => self.tuples_for(RoleFlag::Action),
            Some(part) => self.tuples_for(part.base),
            None => &[],
        }
    }
}

// ============================================================================
// Output Schema
// ============================================================================

/// POS and head-text metadata echoed with every output row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeywordAddInfo {
    pub pos: String,
    pub head_text: String,
}

/// Static per-sentence context merged into every output row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SentenceContext {
    pub profile: String,
    pub person_name: String,
    pub company_name: String,
    /// Raw sentence text
    pub text: String,
    pub section: String,
    pub order: i64,
    pub ref_id: String,
    pub ref_type: String,
    pub sentence_id: String,
}

/// One flattened output row. Every field is always present; unset string
/// fields hold the empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputRecord {
    pub found_keyword: String,
    pub improved_keyword: String,
    pub where_found: String,

    pub verb: String,
    pub verb_prep: String,
    pub additional_object: String,
    pub object: String,

    pub result_link: String,
    pub result_verb: String,
    pub result_verb_prep: String,
    pub result_additional_object: String,
    pub result_object: String,

    pub means_link: String,
    pub means_verb: String,
    pub means_verb_prep: String,
    pub means_additional_object: String,
    pub means_object: String,

    pub indirect_link: String,
    pub indirect_verb: String,
    pub indirect_verb_prep: String,
    pub indirect_additional_object: String,
    pub indirect_object: String,

    pub extracted_link: String,
    pub extracted_verb: String,
    pub extracted_object: String,

    pub benefactive: String,
    pub benefactive_link: String,
    pub role: String,

    pub subject_token: String,
    pub subject_type: String,
    pub is_passive: String,
    pub agent_info: String,

    pub improved_keyword_add_info: KeywordAddInfo,

    // Static context
    pub profile: String,
    pub person_name: String,
    pub company_name: String,
    pub sentence: String,
    pub section: String,
    pub order: i64,
    pub ref_id: String,
    pub ref_type: String,
    pub sentence_id: String,
}

impl OutputRecord {
    /// Base row for a keyword: both keyword forms plus the add-info echo
    pub fn for_keyword(keyword: &Keyword, where_found: impl Into<String>) -> Self {
        Self {
            found_keyword: keyword.found.clone(),
            improved_keyword: keyword.improved.clone(),
            where_found: where_found.into(),
            improved_keyword_add_info: KeywordAddInfo {
                pos: keyword.pos.clone(),
                head_text: keyword.head_text.clone(),
            },
            ..Self::default()
        }
    }

    /// Merge the static sentence context into the row
    pub fn with_context(mut self, ctx: &SentenceContext) -> Self {
        self.profile = ctx.profile.clone();
        self.person_name = ctx.person_name.clone();
        self.company_name = ctx.company_name.clone();
        self.sentence = ctx.text.clone();
        self.section = ctx.section.clone();
        self.order = ctx.order;
        self.ref_id = ctx.ref_id.clone();
        self.ref_type = ctx.ref_type.clone();
        self.sentence_id = ctx.sentence_id.clone();
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
