//! Word lookup over a flat-file lexical database.
//!
//! [`Lexicon`] ties the pieces together: the positional line store and
//! on-disk index search from `lexline-db`, base-form reduction from
//! `lexline-morph`, and an optional sense cache. Queries go in as plain
//! strings (`"dog"`, `"beautiful#a"`, `"cat#n#1"`) and come out as decoded
//! [`SenseRecord`]s or sense-id strings.
//!
//! # Example
//! ```no_run
//! use lexline::Lexicon;
//!
//! # fn main() -> Result<(), lexline::Error> {
//! let lexicon = Lexicon::open("/path/to/dict")?;
//! for record in lexicon.lookup("dog#n")? {
//!     println!("{}: {}", record.offset(), record.gloss.definition);
//! }
//! for id in lexicon.query_sense("beautiful#a")? {
//!     println!("{id}");
//! }
//! # Ok(()) }
//! ```

pub mod cache;
mod error;
mod lexicon;
pub mod query;

pub use cache::{MemoryCache, NoopCache, SenseCache};
pub use error::{Error, Result};
pub use lexicon::Lexicon;

pub use lexline_db::{DbError, LexDb};
pub use lexline_morph::{ExceptionTable, Morph, RuleLayering};
pub use lexline_types::{
    Frame, Gloss, IndexEntry, Pointer, Pos, SenseRecord, Synonym, SynsetId, SynsetType,
};
