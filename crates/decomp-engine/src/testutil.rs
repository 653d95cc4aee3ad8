//! Shared test fixtures: small hand-annotated sentences.

use decomp_core::{Dep, Pos, Sentence, Token};

/// Token with the lemma derived from the text
pub fn tok(index: usize, text: &str, pos: Pos, tag: &str, dep: Dep, head: usize) -> Token {
    Token::new(index, text, "", pos, tag, dep, head)
}

/// Token with an explicit lemma
pub fn tokl(
    index: usize,
    text: &str,
    lemma: &str,
    pos: Pos,
    tag: &str,
    dep: Dep,
    head: usize,
) -> Token {
    Token::new(index, text, lemma, pos, tag, dep, head)
}

/// "We launch and drive growth for startups ."
pub fn launch_and_drive() -> Sentence {
    Sentence::new(vec![
        tok(0, "We", Pos::Pron, "PRP", Dep::Nsubj, 1),
        tok(1, "launch", Pos::Verb, "VBP", Dep::Root, 1),
        tok(2, "and", Pos::Cconj, "CC", Dep::Cc, 1),
        tok(3, "drive", Pos::Verb, "VBP", Dep::Conj, 1),
        tok(4, "growth", Pos::Noun, "NN", Dep::Dobj, 3),
        tok(5, "for", Pos::Adp, "IN", Dep::Prep, 3),
        tok(6, "startups", Pos::Noun, "NNS", Dep::Pobj, 5),
        tok(7, ".", Pos::Punct, ".", Dep::Punct, 1),
    ])
}

/// "Skilled in project management and leadership ."
pub fn skilled_in() -> Sentence {
    Sentence::new(vec![
        tok(0, "Skilled", Pos::Adj, "JJ", Dep::Root, 0),
        tok(1, "in", Pos::Adp, "IN", Dep::Prep, 0),
        tok(2, "project", Pos::Noun, "NN", Dep::Compound, 3),
        tok(3, "management", Pos::Noun, "NN", Dep::Pobj, 1),
        tok(4, "and", Pos::Cconj, "CC", Dep::Cc, 3),
        tok(5, "leadership", Pos::Noun, "NN", Dep::Conj, 3),
        tok(6, ".", Pos::Punct, ".", Dep::Punct, 0),
    ])
}

/// "I am a marketing specialist ."
pub fn marketing_specialist() -> Sentence {
    Sentence::new(vec![
        tok(0, "I", Pos::Pron, "PRP", Dep::Nsubj, 1),
        tokl(1, "am", "be", Pos::Aux, "VBP", Dep::Root, 1),
        tok(2, "a", Pos::Det, "DT", Dep::Det, 4),
        tok(3, "marketing", Pos::Noun, "NN", Dep::Compound, 4),
        tok(4, "specialist", Pos::Noun, "NN", Dep::Attr, 1),
        tok(5, ".", Pos::Punct, ".", Dep::Punct, 1),
    ])
}
