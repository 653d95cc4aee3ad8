//! Annotated-sentence arena
//!
//! A `Sentence` owns its `Token`s in a flat arena indexed by sentence
//! position. Head, children, and conjunct links are stored as indices into
//! the arena, never as references, so the dependency tree carries no cycles
//! while traversal stays O(1).

use serde::{Deserialize, Serialize};

// ============================================================================
// Part-of-Speech and Dependency Labels
// ============================================================================

/// Coarse part-of-speech tags (Universal POS inventory)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Pos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    /// Catch-all for tags outside the inventory
    #[serde(other)]
    X,
}

impl Pos {
    /// VERB or AUX
    pub fn is_verbal(self) -> bool {
        matches!(self, Self::Verb | Self::Aux)
    }

    /// NOUN or PROPN
    pub fn is_nominal(self) -> bool {
        matches!(self, Self::Noun | Self::Propn)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Adj => "ADJ",
            Self::Adp => "ADP",
            Self::Adv => "ADV",
            Self::Aux => "AUX",
            Self::Cconj => "CCONJ",
            Self::Det => "DET",
            Self::Intj => "INTJ",
            Self::Noun => "NOUN",
            Self::Num => "NUM",
            Self::Part => "PART",
            Self::Pron => "PRON",
            Self::Propn => "PROPN",
            Self::Punct => "PUNCT",
            Self::Sconj => "SCONJ",
            Self::Sym => "SYM",
            Self::Verb => "VERB",
            Self::X => "X",
        }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dependency labels (ClearNLP-style inventory)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dep {
    #[serde(rename = "ROOT")]
    Root,
    Nsubj,
    Nsubjpass,
    Dobj,
    Pobj,
    Iobj,
    Attr,
    Conj,
    Appos,
    Amod,
    Nmod,
    Advmod,
    Compound,
    Relcl,
    Acl,
    Ccomp,
    Xcomp,
    Prep,
    Agent,
    Det,
    Aux,
    Auxpass,
    Cc,
    Mark,
    Poss,
    Punct,
    /// Catch-all for labels outside the inventory
    #[serde(other)]
    Other,
}

impl Dep {
    /// conj or appos: the label joins coordinated/apposed items
    pub fn is_coordinating(self) -> bool {
        matches!(self, Self::Conj | Self::Appos)
    }

    /// nsubj or nsubjpass
    pub fn is_subject(self) -> bool {
        matches!(self, Self::Nsubj | Self::Nsubjpass)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Root => "ROOT",
            Self::Nsubj => "nsubj",
            Self::Nsubjpass => "nsubjpass",
            Self::Dobj => "dobj",
            Self::Pobj => "pobj",
            Self::Iobj => "iobj",
            Self::Attr => "attr",
            Self::Conj => "conj",
            Self::Appos => "appos",
            Self::Amod => "amod",
            Self::Nmod => "nmod",
            Self::Advmod => "advmod",
            Self::Compound => "compound",
            Self::Relcl => "relcl",
            Self::Acl => "acl",
            Self::Ccomp => "ccomp",
            Self::Xcomp => "xcomp",
            Self::Prep => "prep",
            Self::Agent => "agent",
            Self::Det => "det",
            Self::Aux => "aux",
            Self::Auxpass => "auxpass",
            Self::Cc => "cc",
            Self::Mark => "mark",
            Self::Poss => "poss",
            Self::Punct => "punct",
            Self::Other => "dep",
        }
    }
}

impl std::fmt::Display for Dep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Token
// ============================================================================

/// One annotated token of a parsed sentence.
///
/// `left_children`, `right_children`, and `conjuncts` are derived from the
/// head links when the sentence is constructed; callers deserializing a
/// sentence may omit them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// 0-based sentence position
    pub index: usize,

    /// Surface text
    pub text: String,

    /// Lemma; filled from lowercased text when absent
    #[serde(default)]
    pub lemma: String,

    /// Coarse part-of-speech
    pub pos: Pos,

    /// Fine-grained tag (e.g. "VBN", "VBD", "VBZ")
    #[serde(default)]
    pub tag: String,

    /// Dependency label relating this token to its head
    pub dep: Dep,

    /// Head index; the ROOT token is its own head
    pub head: usize,

    /// Children left of this token, ordered by index
    #[serde(default, skip_serializing)]
    pub left_children: Vec<usize>,

    /// Children right of this token, ordered by index
    #[serde(default, skip_serializing)]
    pub right_children: Vec<usize>,

    /// Tokens coordinated with this one (symmetric, excludes self)
    #[serde(default, skip_serializing)]
    pub conjuncts: Vec<usize>,
}

impl Token {
    pub fn new(
        index: usize,
        text: impl Into<String>,
        lemma: impl Into<String>,
        pos: Pos,
        tag: impl Into<String>,
        dep: Dep,
        head: usize,
    ) -> Self {
        Self {
            index,
            text: text.into(),
            lemma: lemma.into(),
            pos,
            tag: tag.into(),
            dep,
            head,
            left_children: Vec::new(),
            right_children: Vec::new(),
            conjuncts: Vec::new(),
        }
    }

    /// Whether this token is the sentence root
    pub fn is_root(&self) -> bool {
        self.dep == Dep::Root || self.head == self.index
    }

    /// Case-insensitive text comparison
    pub fn text_is(&self, other: &str) -> bool {
        self.text.eq_ignore_ascii_case(other)
    }

    /// Whether the surface text ends with `suffix` (word-final, so "based"
    /// matches "ed" but "red" alone also does - callers filter by POS)
    pub fn ends_with(&self, suffix: &str) -> bool {
        self.text.to_lowercase().ends_with(suffix)
    }
}

// ============================================================================
// Sentence
// ============================================================================

/// An annotated sentence: an ordered arena of tokens forming one dependency
/// tree. Immutable for the duration of analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<Token>", into = "Vec<Token>")]
pub struct Sentence {
    tokens: Vec<Token>,
}

impl From<Vec<Token>> for Sentence {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl From<Sentence> for Vec<Token> {
    fn from(sentence: Sentence) -> Self {
        sentence.tokens
    }
}

impl Sentence {
    /// Build a sentence from annotated tokens, relinking children and
    /// conjunct groups from the head/dep annotations.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let len = tokens.len();
        for (position, token) in tokens.iter_mut().enumerate() {
            token.index = position;
            if token.head >= len {
                token.head = position;
            }
            if token.lemma.is_empty() {
                token.lemma = token.text.to_lowercase();
            }
            token.left_children.clear();
            token.right_children.clear();
            token.conjuncts.clear();
        }

        // Children, ordered by index and split around the head
        for child in 0..len {
            let head = tokens[child].head;
            if head == child {
                continue;
            }
            if child < head {
                tokens[head].left_children.push(child);
            } else {
                tokens[head].right_children.push(child);
            }
        }

        // Conjunct groups: transitive closure over conj edges
        let mut group = (0..len).collect::<Vec<usize>>();
        fn find(group: &mut [usize], i: usize) -> usize {
            let mut root = i;
            while group[root] != root {
                root = group[root];
            }
            let mut cur = i;
            while group[cur] != root {
                let next = group[cur];
                group[cur] = root;
                cur = next;
            }
            root
        }
        for child in 0..len {
            if tokens[child].dep == Dep::Conj {
                let head = tokens[child].head;
                let a = find(&mut group, child);
                let b = find(&mut group, head);
                group[a] = b;
            }
        }
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); len];
        for token in 0..len {
            members[find(&mut group, token)].push(token);
        }
        for token in 0..len {
            let root = find(&mut group, token);
            tokens[token].conjuncts = members[root]
                .iter()
                .copied()
                .filter(|&other| other != token)
                .collect();
        }

        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Total accessor: out-of-range indices are None, never a panic, so a
    /// bad annotation fails only the keyword being analyzed.
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.iter()
    }

    /// The single ROOT token
    pub fn root(&self) -> Option<&Token> {
        self.tokens.iter().find(|t| t.is_root())
    }

    /// Head token of `index`
    pub fn head(&self, index: usize) -> Option<&Token> {
        self.get(self.get(index)?.head)
    }

    /// Token immediately before `index`
    pub fn prev(&self, index: usize) -> Option<&Token> {
        index.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Token `back` positions before `index`
    pub fn prev_n(&self, index: usize, back: usize) -> Option<&Token> {
        index.checked_sub(back).and_then(|i| self.get(i))
    }

    /// Token immediately after `index`
    pub fn next(&self, index: usize) -> Option<&Token> {
        self.get(index + 1)
    }

    /// Children left of the token, in sentence order
    pub fn lefts(&self, index: usize) -> impl Iterator<Item = &Token> + '_ {
        self.get(index)
            .map(|t| t.left_children.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &self.tokens[i])
    }

    /// Children right of the token, in sentence order
    pub fn rights(&self, index: usize) -> impl Iterator<Item = &Token> + '_ {
        self.get(index)
            .map(|t| t.right_children.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &self.tokens[i])
    }

    /// Coordinated tokens, in sentence order
    pub fn conjuncts(&self, index: usize) -> impl Iterator<Item = &Token> + '_ {
        self.get(index)
            .map(|t| t.conjuncts.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &self.tokens[i])
    }

    /// Indices of the subtree rooted at `index` (self included), sorted
    pub fn subtree(&self, index: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![index];
        while let Some(current) = stack.pop() {
            let Some(token) = self.get(current) else {
                continue;
            };
            out.push(current);
            stack.extend(token.left_children.iter().copied());
            stack.extend(token.right_children.iter().copied());
        }
        out.sort_unstable();
        out
    }

    /// Reconstructed sentence text (space-joined)
    pub fn text(&self) -> String {
        self.span_text(0, self.tokens.len())
    }

    /// Text of the half-open token range `[start, end)`, space-joined
    pub fn span_text(&self, start: usize, end: usize) -> String {
        let end = end.min(self.tokens.len());
        if start >= end {
            return String::new();
        }
        self.tokens[start..end]
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Sentence {
        // "We launch and drive growth ."
        Sentence::new(vec![
            Token::new(0, "We", "we", Pos::Pron, "PRP", Dep::Nsubj, 1),
            Token::new(1, "launch", "launch", Pos::Verb, "VBP", Dep::Root, 1),
            Token::new(2, "and", "and", Pos::Cconj, "CC", Dep::Cc, 1),
            Token::new(3, "drive", "drive", Pos::Verb, "VBP", Dep::Conj, 1),
            Token::new(4, "growth", "growth", Pos::Noun, "NN", Dep::Dobj, 3),
            Token::new(5, ".", ".", Pos::Punct, ".", Dep::Punct, 1),
        ])
    }

    #[test]
    fn test_children_linking() {
        let sent = sample();
        let root = sent.get(1).unwrap();
        assert_eq!(root.left_children, vec![0]);
        assert_eq!(root.right_children, vec![2, 3, 5]);
        assert_eq!(sent.get(3).unwrap().right_children, vec![4]);
    }

    #[test]
    fn test_conjunct_groups_are_symmetric() {
        let sent = sample();
        assert_eq!(sent.get(1).unwrap().conjuncts, vec![3]);
        assert_eq!(sent.get(3).unwrap().conjuncts, vec![1]);
        assert!(sent.get(4).unwrap().conjuncts.is_empty());
    }

    #[test]
    fn test_out_of_range_is_none() {
        let sent = sample();
        assert!(sent.get(99).is_none());
        assert!(sent.prev(0).is_none());
        assert!(sent.next(5).is_none());
    }

    #[test]
    fn test_span_text() {
        let sent = sample();
        assert_eq!(sent.span_text(1, 4), "launch and drive");
        assert_eq!(sent.span_text(4, 99), "growth .");
        assert_eq!(sent.span_text(3, 3), "");
    }

    #[test]
    fn test_subtree() {
        let sent = sample();
        assert_eq!(sent.subtree(3), vec![3, 4]);
        assert_eq!(sent.subtree(1), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_deserialize_relinks() {
        let json = r#"[
            {"index":0,"text":"We","pos":"PRON","dep":"nsubj","head":1},
            {"index":1,"text":"win","pos":"VERB","dep":"ROOT","head":1}
        ]"#;
        let sent: Sentence = serde_json::from_str(json).unwrap();
        assert_eq!(sent.get(1).unwrap().left_children, vec![0]);
        assert_eq!(sent.get(0).unwrap().lemma, "we");
    }

    #[test]
    fn test_unknown_labels_fall_back() {
        let json = r#"[{"index":0,"text":"hm","pos":"WHAT","dep":"weird","head":0}]"#;
        let sent: Sentence = serde_json::from_str(json).unwrap();
        assert_eq!(sent.get(0).unwrap().pos, Pos::X);
        assert_eq!(sent.get(0).unwrap().dep, Dep::Other);
    }
}
