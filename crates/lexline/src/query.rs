//! Parsing of the query-string surface (`word`, `word#pos`,
//! `word#pos#sense`).
//!
//! Argument violations are reported before any file work, with the exact
//! messages callers of the original surface match on.

use lexline_types::{Pos, normalize_lemma};

use crate::error::{Error, Result};

/// A `word` or `word#pos` query. An unknown or absent POS tag means the
/// query runs against every part of speech in enumeration order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Query {
    pub word: String,
    pub pos: Option<Pos>,
}

impl Query {
    pub fn positions(&self) -> &[Pos] {
        match &self.pos {
            Some(pos) => std::slice::from_ref(pos),
            None => &Pos::ALL,
        }
    }
}

/// Split an optional trailing `#pos` and normalize the word. Lenient: a tag
/// that names no part of speech degrades to "all parts of speech".
pub fn parse_query(input: &str) -> Query {
    let (word, tag) = match input.split_once('#') {
        Some((word, tag)) => (word, Some(tag)),
        None => (input, None),
    };
    Query {
        word: normalize_lemma(word),
        pos: tag.and_then(Pos::from_tag),
    }
}

/// A fully qualified `word#pos#sense` reference with a 1-based sense rank.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SenseRef {
    pub word: String,
    pub pos: Pos,
    pub sense: usize,
}

/// Strict parse of `word#pos#sense`. The part of speech is required and
/// must be recognized; the sense segment must be a positive integer.
pub fn parse_sense_ref(input: &str) -> Result<SenseRef> {
    let mut parts = input.split('#');
    let word = parts.next().unwrap_or("");
    let tag = parts.next().unwrap_or("");
    if tag.is_empty() {
        return Err(Error::invalid("Missing part of speech"));
    }
    let pos = Pos::from_tag(tag)
        .ok_or_else(|| Error::invalid(format!("Unknown part of speech: {tag}")))?;

    let sense: i64 = parts
        .next()
        .unwrap_or("")
        .parse()
        .map_err(|_| Error::invalid("Sense number should be an integer"))?;
    if sense < 1 {
        return Err(Error::invalid("Sense number should be a positive integer"));
    }

    Ok(SenseRef {
        word: normalize_lemma(word),
        pos,
        sense: sense as usize,
    })
}

/// Parse a synset offset given as text, e.g. from a command line.
pub fn parse_offset(raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| Error::invalid("Synset offset must be an integer"))
}

/// Parse a part-of-speech argument given as text. Required and strict, as
/// for [`parse_sense_ref`].
pub fn parse_pos_arg(raw: &str) -> Result<Pos> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::invalid("Missing part of speech"));
    }
    Pos::from_tag(raw).ok_or_else(|| Error::invalid(format!("Unknown part of speech: {raw}")))
}
