//! Positional line reads over an open file descriptor.
//!
//! The database files are newline-delimited records addressed by byte
//! offset, and a record's length is unknown until its terminator is seen.
//! [`read_line_at`] reads a fixed-size chunk at the offset and, when no
//! terminator falls inside it, re-reads the whole span at double the size
//! until one does (or EOF). The doubling bounds the number of reads by
//! O(log L) for a record of length L.
//!
//! Every call is self-contained: reads use explicit offsets rather than the
//! descriptor's shared cursor, so concurrent callers never corrupt each
//! other.

use std::fs::File;
use std::io;

use crate::error::{DbError, Result};

/// Chunk size for the first read of a line.
pub const INITIAL_CHUNK: usize = 256;

/// Read the line beginning at `offset`, excluding its terminator.
///
/// At end of file, everything read so far is returned. Read failures other
/// than EOF surface as [`DbError::Io`].
pub fn read_line_at(file: &File, offset: u64) -> Result<String> {
    read_line_with(file, offset, INITIAL_CHUNK)
}

/// [`read_line_at`] with an explicit initial chunk size, so the regrowth
/// path can be exercised directly.
pub fn read_line_with(file: &File, offset: u64, initial_chunk: usize) -> Result<String> {
    let mut chunk_size = initial_chunk.max(1);
    loop {
        let mut buf = vec![0u8; chunk_size];
        let filled = read_full_at(file, &mut buf, offset)?;
        let chunk = &buf[..filled];

        if let Some(end) = chunk.iter().position(|b| *b == b'\n') {
            return decode_line(&chunk[..end], offset);
        }
        if filled < chunk_size {
            // EOF inside the chunk and no terminator seen.
            return decode_line(chunk, offset);
        }

        chunk_size = chunk_size.saturating_mul(2);
    }
}

fn decode_line(bytes: &[u8], offset: u64) -> Result<String> {
    let bytes = match bytes.strip_suffix(b"\r") {
        Some(stripped) => stripped,
        None => bytes,
    };
    String::from_utf8(bytes.to_vec()).map_err(|_| DbError::Utf8 { offset })
}

/// Fill as much of `buf` as the file holds at `offset`, retrying short
/// reads. Returns the number of bytes filled; less than `buf.len()` only at
/// end of file.
pub(crate) fn read_full_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match pread(file, &mut buf[filled..], offset + filled as u64) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(unix)]
fn pread(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    use std::os::unix::fs::FileExt;
    file.read_at(buf, offset)
}

#[cfg(windows)]
fn pread(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    use std::os::windows::fs::FileExt;
    file.seek_read(buf, offset)
}
