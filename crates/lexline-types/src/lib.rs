//! Shared types for the lexline flat-file lexical database.
//!
//! These mirror the fields found in the `data.*`/`index.*` files: numeric
//! fields keep their decoded representation (`offset`, `lex_id`, pointer
//! source/target indices) and text fields own their strings, since records
//! are fetched lazily one line at a time rather than borrowed from a
//! resident buffer.
//!
//! Use [`Pos`] and [`SynsetId`] to key into a database, [`SenseRecord`] and
//! [`IndexEntry`] to inspect decoded records, and helpers like [`decode_st`]
//! to interpret pointer source/target pairs.
//!
//! ```rust
//! use lexline_types::{Pos, SynsetId, decode_st};
//!
//! let pos = Pos::from_char('n').unwrap();
//! let id = SynsetId { pos, offset: 1740 };
//! assert_eq!(decode_st("0a0b"), (Some(10), Some(11)));
//! ```

use std::fmt;

use serde::Serialize;

/// Part-of-speech marker as used by the database files (`n`, `v`, `a`/`s`, `r`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pos {
    Noun,
    Verb,
    Adj,
    Adv,
}

impl Pos {
    /// Every part of speech, in the fixed enumeration order used when a
    /// query names no part of speech.
    pub const ALL: [Pos; 4] = [Pos::Noun, Pos::Verb, Pos::Adj, Pos::Adv];

    /// Parse a POS character into an enum.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(Pos::Noun),
            'v' => Some(Pos::Verb),
            'a' | 's' => Some(Pos::Adj),
            'r' => Some(Pos::Adv),
            _ => None,
        }
    }

    /// Parse a POS tag as it appears in query strings (`word#n`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        let mut chars = tag.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Pos::from_char(c),
            _ => None,
        }
    }

    /// Emit the POS character used in `index.*`/`data.*` and sense ids.
    pub fn to_char(self) -> char {
        match self {
            Pos::Noun => 'n',
            Pos::Verb => 'v',
            Pos::Adj => 'a',
            Pos::Adv => 'r',
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pos::Noun => "noun",
            Pos::Verb => "verb",
            Pos::Adj => "adj",
            Pos::Adv => "adv",
        })
    }
}

/// `(offset, pos)` pair uniquely identifying a sense record within the
/// database files. The offset is the byte position of the record's first
/// character in its data file.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct SynsetId {
    pub pos: Pos,
    pub offset: u64,
}

/// Raw `ss_type` marker from `data.*`, including adjective satellites.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SynsetType {
    Noun,
    Verb,
    Adj,
    Adv,
    AdjSatellite,
}

impl SynsetType {
    /// Parse the `ss_type` character from a data line.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(SynsetType::Noun),
            'v' => Some(SynsetType::Verb),
            'a' => Some(SynsetType::Adj),
            's' => Some(SynsetType::AdjSatellite),
            'r' => Some(SynsetType::Adv),
            _ => None,
        }
    }
}

/// A lemma string and its per-record `lex_id`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Synonym {
    pub lemma: String,
    pub lex_id: u8,
}

/// Verb frame (`f_cnt`) entry describing example template applicability.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Frame {
    pub frame_number: u16,
    pub word_number: Option<u16>,
}

/// A typed relation edge to another sense record.
///
/// `src_word`/`dst_word` of `None` mean the relation holds between whole
/// records; `Some(n)` names the n-th lemma (1-based) on either side.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Pointer {
    pub symbol: String,
    pub target: SynsetId,
    pub src_word: Option<u16>,
    pub dst_word: Option<u16>,
}

/// Gloss text with the definition split out while keeping the stored text
/// intact, trailing whitespace included.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Gloss {
    pub raw: String,
    pub definition: String,
    pub examples: Vec<String>,
}

/// A fully decoded sense record from a data file.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SenseRecord {
    pub id: SynsetId,
    pub lex_filenum: u8,
    pub synset_type: SynsetType,
    /// Declared `w_cnt`; always equals `synonyms.len()` after decoding.
    pub word_count: usize,
    pub synonyms: Vec<Synonym>,
    pub pointers: Vec<Pointer>,
    pub frames: Vec<Frame>,
    pub gloss: Gloss,
}

impl SenseRecord {
    /// The head lemma (first entry of the synonym set).
    pub fn lemma(&self) -> &str {
        &self.synonyms[0].lemma
    }

    /// The head lemma's `lex_id`.
    pub fn lex_id(&self) -> u8 {
        self.synonyms[0].lex_id
    }

    pub fn offset(&self) -> u64 {
        self.id.offset
    }

    pub fn pos(&self) -> Pos {
        self.id.pos
    }
}

/// Index record from `index.*`, including sense and tagsense counts.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct IndexEntry {
    pub lemma: String,
    pub pos: Pos,
    pub synset_cnt: u32,
    pub p_cnt: u32,
    pub ptr_symbols: Vec<String>,
    pub sense_cnt: u32,
    pub tagsense_cnt: u32,
    /// Data-file offsets in sense-rank order (rank 1 first).
    pub synset_offsets: Vec<u64>,
}

/// Decode the four-hex source/target field used in pointer blocks.
///
/// High byte is the source word number, low byte is the target word number.
/// Zero indicates "not specified" per the file format conventions.
pub fn decode_st(hex4: &str) -> (Option<u16>, Option<u16>) {
    if hex4.len() != 4 {
        return (None, None);
    }

    match u16::from_str_radix(hex4, 16) {
        Ok(val) => {
            let src = val >> 8;
            let dst = val & 0x00FF;
            let src = if src == 0 { None } else { Some(src) };
            let dst = if dst == 0 { None } else { Some(dst) };
            (src, dst)
        }
        Err(_) => (None, None),
    }
}

/// Fold a surface form into index key shape: trimmed, lowercased, spaces
/// replaced by underscores.
pub fn normalize_lemma(text: &str) -> String {
    let mut s = text.trim().to_lowercase();
    if s.contains(' ') {
        s = s.replace(' ', "_");
    }
    s
}
