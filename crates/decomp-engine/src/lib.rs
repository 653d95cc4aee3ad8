//! Decomp Engine - keyword role classification and extraction
//!
//! The core of the sentence decomposition system: given an annotated
//! sentence, keyword spans, and precomputed verb/subject phrases, the engine
//! decides how each keyword functions in the sentence and extracts the
//! verbs, objects, prepositions, and subjects tied to that role.
//!
//! - `query` - read-only dependency-tree primitives
//! - `conjuncts` - coordination and enumeration resolution
//! - `verb_class` - result / means / indirect-engagement predicates
//! - `subject` - coarse subject typing
//! - `no_verbs` - keywords with no governing verb
//! - `expertise` - "expertise in" detection
//! - `keyword_actions` / `tuples` / `secondary` - verb tuple extraction
//! - `orchestrate` / `flatten` - the per-keyword pipeline and output rows
//! - `enumeration` - list-sentence splitting
//!
//! The engine performs no I/O and holds no mutable state: lexicons are
//! compiled constants, and every analysis works on caller-owned snapshots.

pub mod conjuncts;
pub mod enumeration;
pub mod expertise;
pub mod flatten;
pub mod keyword_actions;
pub mod lexicon;
pub mod morph;
pub mod no_verbs;
pub mod orchestrate;
pub mod query;
pub mod secondary;
pub mod subject;
pub mod tuples;
pub mod verb_class;

#[cfg(test)]
pub mod testutil;

pub use enumeration::{EnumerationCategory, EnumerationResult, EnumerationSplitter};
pub use expertise::ExpertiseChecker;
pub use morph::RuleDerivation;
pub use orchestrate::{DecompositionEngine, NO_VERB_INDEX_FLAG, SUBJECT_ERROR_FLAG};
