use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use lexline_db::{DbError, LexDb};
use lexline_morph::{ExceptionTable, Morph};
use lexline_types::{IndexEntry, Pos, SenseRecord};

use crate::cache::{NoopCache, SenseCache};
use crate::error::{Error, Result};
use crate::query::{parse_query, parse_sense_ref};

/// Pointer symbols whose relation is synonym-like: similar-to, verb group,
/// also-see.
const SYNONYM_SYMBOLS: [&str; 3] = ["&", "$", "^"];

/// The lookup engine: an open database handle plus morphology, with an
/// optional sense cache in front of [`find_sense`](Lexicon::find_sense).
///
/// Each query runs normalize, a direct index probe, a morphology fallback
/// on a miss, record fetches, and assembly. Nothing is stateful across
/// queries beyond the open descriptors and the lazily loaded exception
/// tables.
pub struct Lexicon {
    db: LexDb,
    morph: Morph,
    cache: Arc<dyn SenseCache>,
}

impl Lexicon {
    /// Open the database directory (eight index/data files) and prepare
    /// lazy morphology over its exception files.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            db: LexDb::open(dir)?,
            morph: Morph::new(dir),
            cache: Arc::new(NoopCache),
        })
    }

    /// Attach a sense cache consulted by [`find_sense`](Lexicon::find_sense).
    pub fn with_cache(mut self, cache: Arc<dyn SenseCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Release all file descriptors. Later operations fail with
    /// [`DbError::Closed`].
    pub fn close(&mut self) {
        self.db.close();
    }

    pub fn is_open(&self) -> bool {
        self.db.is_open()
    }

    /// The morphology handle, e.g. to inject exception tables in tests.
    pub fn morph(&self) -> &Morph {
        &self.morph
    }

    /// Fetch the sense record anchored at `offset` for `pos`.
    ///
    /// An offset that anchors no record fails with
    /// [`Error::InvalidOffset`]; I/O and closed-handle failures pass
    /// through unchanged.
    pub fn get(&self, offset: u64, pos: Pos) -> Result<SenseRecord> {
        match self.db.resolve(pos, offset) {
            Ok(record) => Ok(record),
            Err(DbError::Corrupt { .. } | DbError::Parse { .. } | DbError::Utf8 { .. }) => {
                Err(Error::InvalidOffset { offset, pos })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// All sense records for a `word` or `word#pos` query, flattened across
    /// parts of speech in enumeration order, rank order within each. A word
    /// absent from every index yields an empty list, never an error.
    pub fn lookup(&self, input: &str) -> Result<Vec<SenseRecord>> {
        let query = parse_query(input);
        if query.word.is_empty() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for &pos in query.positions() {
            if let Some((_, entry)) = self.resolve_entry(pos, &query.word)? {
                for &offset in &entry.synset_offsets {
                    records.push(self.db.resolve(pos, offset)?);
                }
            }
        }
        Ok(records)
    }

    /// Sense identifiers (`word#pos#rank`) for a query, in rank order, one
    /// per sense. Same resolution as [`lookup`](Lexicon::lookup).
    pub fn query_sense(&self, input: &str) -> Result<Vec<String>> {
        let query = parse_query(input);
        if query.word.is_empty() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for &pos in query.positions() {
            if let Some((lemma, entry)) = self.resolve_entry(pos, &query.word)? {
                let tag = pos.to_char();
                for rank in 1..=entry.synset_offsets.len() {
                    ids.push(format!("{lemma}#{tag}#{rank}"));
                }
            }
        }
        Ok(ids)
    }

    /// Resolve a fully qualified `word#pos#rank` reference to its record.
    ///
    /// The attached cache is consulted by the full input string before any
    /// file work and populated after a miss.
    pub fn find_sense(&self, input: &str) -> Result<SenseRecord> {
        let sref = parse_sense_ref(input)?;

        if let Some(hit) = self.cache.get(input) {
            debug!("sense cache hit for {input:?}");
            return Ok(hit);
        }

        let no_such_sense = || Error::NoSuchSense {
            lemma: sref.word.clone(),
            pos: sref.pos,
            sense: sref.sense,
        };
        let (_, entry) = self
            .resolve_entry(sref.pos, &sref.word)?
            .ok_or_else(no_such_sense)?;
        let offset = *entry
            .synset_offsets
            .get(sref.sense - 1)
            .ok_or_else(no_such_sense)?;

        let record = self.db.resolve(sref.pos, offset)?;
        self.cache.put(input, record.clone());
        Ok(record)
    }

    /// Base forms of a query that exist as real lemmas, as `form#pos`
    /// strings. With a `#pos` the candidates come from that part of speech
    /// alone; bare words are tried against every part of speech they (or a
    /// base form) belong to. Empty input yields an empty list.
    pub fn valid_forms(&self, input: &str) -> Result<Vec<String>> {
        let query = parse_query(input);
        if query.word.is_empty() {
            return Ok(Vec::new());
        }

        let mut forms = Vec::new();
        for &pos in query.positions() {
            let tag = pos.to_char();
            for candidate in self.morph.base_forms(pos, &query.word)? {
                if self.db.lemma_exists(pos, &candidate)? {
                    let qualified = format!("{candidate}#{tag}");
                    if !forms.contains(&qualified) {
                        forms.push(qualified);
                    }
                }
            }
        }
        Ok(forms)
    }

    /// Resolve the record at `(offset, pos)` and then every pointer whose
    /// relation is synonym-like, one hop each.
    pub fn synonyms(&self, offset: u64, pos: Pos) -> Result<Vec<SenseRecord>> {
        let record = self.get(offset, pos)?;
        let mut out = Vec::new();
        for pointer in &record.pointers {
            if SYNONYM_SYMBOLS.contains(&pointer.symbol.as_str()) {
                out.push(self.db.resolve_pointer(pointer)?);
            }
        }
        Ok(out)
    }

    /// Every part of speech's exception table, loading any not yet cached.
    pub fn load_exceptions(&self) -> Result<HashMap<Pos, Arc<ExceptionTable>>> {
        Ok(self.morph.load_all()?)
    }

    /// Direct index probe, then morphology fallback. Returns the lemma that
    /// actually matched alongside its index entry.
    fn resolve_entry(&self, pos: Pos, word: &str) -> Result<Option<(String, IndexEntry)>> {
        if let Some(entry) = self.db.find(pos, word)? {
            return Ok(Some((word.to_string(), entry)));
        }
        for candidate in self.morph.base_forms(pos, word)? {
            if candidate == word {
                continue;
            }
            if let Some(entry) = self.db.find(pos, &candidate)? {
                debug!("{word:?} reduced to base form {candidate:?} ({pos})");
                return Ok(Some((candidate, entry)));
            }
        }
        Ok(None)
    }
}
