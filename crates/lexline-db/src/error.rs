use std::io;
use std::path::PathBuf;

use thiserror::Error;

use lexline_types::Pos;

/// Errors surfaced by the line store, index search, and record resolver.
///
/// A `Parse` or `Corrupt` failure is unrecoverable for the single lookup
/// that hit it but leaves the open handle usable for other lookups.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("database handle is closed")]
    Closed,

    #[error("missing required dictionary file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("invalid UTF-8 in line starting at byte {offset}")]
    Utf8 { offset: u64 },

    #[error("{pos} record at byte {offset}: {reason}")]
    Parse {
        pos: Pos,
        offset: u64,
        reason: String,
    },

    /// The record fetched at an offset reports a different offset in its
    /// first field, so the requested offset does not anchor a record.
    #[error("{pos} record at byte {expected} self-reports offset {found}")]
    Corrupt { pos: Pos, expected: u64, found: u64 },
}

impl DbError {
    pub(crate) fn parse(pos: Pos, offset: u64, reason: impl Into<String>) -> Self {
        DbError::Parse {
            pos,
            offset,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
