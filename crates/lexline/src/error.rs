use thiserror::Error;

use lexline_db::DbError;
use lexline_types::Pos;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input detected before any file work.
    #[error("{0}")]
    InvalidArgument(String),

    /// `get` was asked for an offset that anchors no record for that part
    /// of speech.
    #[error("Invalid synsetOffset: {offset} for part of speech {pos}")]
    InvalidOffset { offset: u64, pos: Pos },

    /// A well-formed sense id whose rank exceeds the word's sense count.
    #[error("no sense {sense} for {lemma}#{pos}")]
    NoSuchSense {
        lemma: String,
        pos: Pos,
        sense: usize,
    },

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("morphology: {0}")]
    Morph(#[from] anyhow::Error),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
