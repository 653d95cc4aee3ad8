//! Decomp Core - Domain models, traits, and shared types
//!
//! This crate defines the core abstractions used throughout the sentence
//! decomposition system:
//! - The annotated-sentence arena (tokens, POS/dependency labels)
//! - Keyword spans and role flags
//! - Verb tuples, keyword records, and the fixed output schema
//! - Preprocessing info produced by upstream collaborators
//! - The lexical-derivation trait
//! - Configuration management
//! - Common error types

pub mod config;
pub mod keyword;
pub mod preprocess;
pub mod record;
pub mod token;

pub use config::{AppConfig, ConfigError, LoggingConfig, ServerConfig};
pub use keyword::{Keyword, KeywordSpan};
pub use preprocess::{
    AgentSpan, NounPhrase, PassiveInfo, PreprocessingInfo, SubjectPhrase, VerbPhrase,
    VerbsSubjects,
};
pub use record::{
    FlagPart, KeywordAddInfo, KeywordRecord, NoVerbKind, NoVerbOutcome, OutputRecord, RoleFlag,
    SentenceContext, SubjectInfo, VerbTuple,
};
pub use token::{Dep, Pos, Sentence, Token};

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for decomposition operations
#[derive(Error, Debug)]
pub enum DecompError {
    #[error("token index {index} out of range for sentence of {len} tokens")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("unclassifiable role combination: {0}")]
    UnclassifiableRoles(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DecompError>;

// ============================================================================
// Lexical Derivation
// ============================================================================

/// Word classes used by derivation lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordClass {
    Noun,
    Verb,
    Adjective,
}

/// Trait for lexical-derivation backends.
///
/// Given a word and a source/target word class, a backend returns ranked
/// candidate related words (e.g. "management" -> "manage"). The engine ships
/// a rule-based implementation; richer dictionary-backed lookups can be
/// plugged in behind this trait.
pub trait Derivation: Send + Sync {
    /// Ranked related words for `word` converted from `from` to `to`,
    /// best candidate first, with a relative weight in (0.0, 1.0].
    fn related(&self, word: &str, from: WordClass, to: WordClass) -> Vec<(String, f32)>;

    /// Whether `word` itself has a verb sense (e.g. "drive", "plan").
    fn has_verb_sense(&self, word: &str) -> bool;
}
