//! Indexed line-store access to lexline database files.
//!
//! A [`LexDb`] owns one `(index.*, data.*)` file pair per part of speech
//! and resolves everything lazily: index lookups binary-search the sorted
//! index file on disk, and sense records are decoded one line at a time
//! from the byte offsets the index names. Nothing is parsed up front, so
//! opening is cheap and memory use stays flat no matter how large the
//! corpus is.
//!
//! All reads are positional (explicit offsets, no shared cursor), so any
//! number of lookups may run concurrently against one open handle.
//!
//! # Example
//! ```no_run
//! use lexline_db::LexDb;
//! use lexline_types::Pos;
//!
//! # fn main() -> Result<(), lexline_db::DbError> {
//! let db = LexDb::open("/path/to/dict")?;
//! if let Some(entry) = db.find(Pos::Noun, "dog")? {
//!     for offset in &entry.synset_offsets {
//!         let record = db.resolve(Pos::Noun, *offset)?;
//!         println!("{}: {}", record.offset(), record.gloss.definition);
//!     }
//! }
//! # Ok(()) }
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use lexline_types::{IndexEntry, Pointer, Pos, SenseRecord, normalize_lemma};

mod error;
pub mod index;
pub mod line;
mod record;

pub use error::{DbError, Result};

struct FilePair {
    index: File,
    data: File,
}

struct OpenFiles {
    noun: FilePair,
    verb: FilePair,
    adj: FilePair,
    adv: FilePair,
}

impl OpenFiles {
    fn pair(&self, pos: Pos) -> &FilePair {
        match pos {
            Pos::Noun => &self.noun,
            Pos::Verb => &self.verb,
            Pos::Adj => &self.adj,
            Pos::Adv => &self.adv,
        }
    }
}

/// An open handle onto the database directory.
///
/// Dropping or [`close`](LexDb::close)-ing the handle releases every
/// descriptor; operations on a closed handle fail with [`DbError::Closed`].
pub struct LexDb {
    dir: PathBuf,
    files: Option<OpenFiles>,
}

impl LexDb {
    /// Open the index/data file pair for every part of speech.
    ///
    /// Fails up front if any of the eight files is missing.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        for pos in Pos::ALL {
            for kind in ["index", "data"] {
                let path = dir.join(format!("{kind}.{pos}"));
                if !path.exists() {
                    return Err(DbError::MissingFile(path));
                }
            }
        }

        let files = OpenFiles {
            noun: open_pair(dir, Pos::Noun)?,
            verb: open_pair(dir, Pos::Verb)?,
            adj: open_pair(dir, Pos::Adj)?,
            adv: open_pair(dir, Pos::Adv)?,
        };
        info!("opened lexical database at {}", dir.display());

        Ok(Self {
            dir: dir.to_path_buf(),
            files: Some(files),
        })
    }

    /// Release all descriptors. Idempotent.
    pub fn close(&mut self) {
        if self.files.take().is_some() {
            info!("closed lexical database at {}", self.dir.display());
        }
    }

    pub fn is_open(&self) -> bool {
        self.files.is_some()
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn pair(&self, pos: Pos) -> Result<&FilePair> {
        self.files
            .as_ref()
            .map(|files| files.pair(pos))
            .ok_or(DbError::Closed)
    }

    /// Look up a lemma in the part-of-speech index. The query is normalized
    /// (case-folded, spaces to underscores) before the search.
    pub fn find(&self, pos: Pos, lemma: &str) -> Result<Option<IndexEntry>> {
        let key = normalize_lemma(lemma);
        if key.is_empty() {
            return Ok(None);
        }
        let entry = index::find_entry(&self.pair(pos)?.index, pos, &key)?;
        if entry.is_none() {
            debug!("no {pos} index entry for {key:?}");
        }
        Ok(entry)
    }

    /// Whether the index has an entry for this lemma.
    pub fn lemma_exists(&self, pos: Pos, lemma: &str) -> Result<bool> {
        Ok(self.find(pos, lemma)?.is_some())
    }

    /// Fetch and decode the sense record anchored at `offset` in the data
    /// file for `pos`.
    pub fn resolve(&self, pos: Pos, offset: u64) -> Result<SenseRecord> {
        let raw = line::read_line_at(&self.pair(pos)?.data, offset)?;
        record::parse_data_line(pos, offset, &raw)
    }

    /// Resolve a relation pointer's target record. One hop, on demand; no
    /// transitive traversal.
    pub fn resolve_pointer(&self, pointer: &Pointer) -> Result<SenseRecord> {
        self.resolve(pointer.target.pos, pointer.target.offset)
    }
}

fn open_pair(dir: &Path, pos: Pos) -> Result<FilePair> {
    Ok(FilePair {
        index: File::open(dir.join(format!("index.{pos}")))?,
        data: File::open(dir.join(format!("data.{pos}")))?,
    })
}
