//! Binary search over a sorted index file.
//!
//! Index files are sorted lexicographically by lemma, one entry per line.
//! The search probes byte midpoints, so a probe usually lands inside a
//! line; [`next_line_start`] realigns to the following line boundary before
//! the lemma comparison. Once the remaining range is too narrow to hold an
//! aligned probe, a short linear walk of the residue finishes the search.

use std::cmp::Ordering;
use std::fs::File;

use lexline_types::{IndexEntry, Pos};

use crate::error::{DbError, Result};
use crate::line::{read_full_at, read_line_at};

/// Find the index entry for `lemma` (already normalized), or `None`.
pub fn find_entry(file: &File, pos: Pos, lemma: &str) -> Result<Option<IndexEntry>> {
    let len = file.metadata()?.len();
    let mut lo = 0u64; // always the start of a line
    let mut hi = len; // exclusive

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let probe = if mid == lo {
            Some(lo)
        } else {
            next_line_start(file, mid)?
        };
        let Some(start) = probe.filter(|s| *s < hi) else {
            // No aligned probe left in range; the straddling line (and at
            // most a handful of others) remain between lo and hi.
            return scan_range(file, pos, lemma, lo, hi);
        };

        let line = read_line_at(file, start)?;
        match compare_line(&line, lemma) {
            Ordering::Equal => return parse_index_line(pos, start, &line).map(Some),
            Ordering::Less => {
                lo = next_line_start(file, start)?.unwrap_or(hi);
            }
            Ordering::Greater => hi = start,
        }
    }

    Ok(None)
}

/// Walk complete lines from `at` (a line start) up to `hi`, comparing keys
/// in order. Used for the residue of a collapsed binary-search range.
fn scan_range(file: &File, pos: Pos, lemma: &str, at: u64, hi: u64) -> Result<Option<IndexEntry>> {
    let mut at = at;
    while at < hi {
        let line = read_line_at(file, at)?;
        match compare_line(&line, lemma) {
            Ordering::Equal => return parse_index_line(pos, at, &line).map(Some),
            Ordering::Greater => return Ok(None),
            Ordering::Less => {
                let Some(next) = next_line_start(file, at)? else {
                    return Ok(None);
                };
                at = next;
            }
        }
    }
    Ok(None)
}

fn compare_line(line: &str, lemma: &str) -> Ordering {
    // License header lines are indented and sort before every lemma.
    if line.starts_with(' ') || line.starts_with('\t') || line.is_empty() {
        return Ordering::Less;
    }
    let key = line.split_ascii_whitespace().next().unwrap_or("");
    key.cmp(lemma)
}

/// Byte offset of the first line starting at or after `from`, i.e. one past
/// the next terminator. `None` when the rest of the file has no terminator.
pub(crate) fn next_line_start(file: &File, from: u64) -> Result<Option<u64>> {
    const STEP: usize = 256;
    let mut at = from;
    loop {
        let mut buf = [0u8; STEP];
        let filled = read_full_at(file, &mut buf, at)?;
        if filled == 0 {
            return Ok(None);
        }
        if let Some(i) = buf[..filled].iter().position(|b| *b == b'\n') {
            return Ok(Some(at + i as u64 + 1));
        }
        if filled < STEP {
            return Ok(None);
        }
        at += filled as u64;
    }
}

/// Decode one index line: `lemma pos synset_cnt p_cnt [ptr_symbols...]
/// sense_cnt tagsense_cnt offset1 ... offsetN`.
pub(crate) fn parse_index_line(pos: Pos, offset: u64, line: &str) -> Result<IndexEntry> {
    let err = |reason: &str| DbError::parse(pos, offset, reason);

    let tokens: Vec<&str> = line.split_ascii_whitespace().collect();
    if tokens.len() < 6 {
        return Err(err("index line has too few fields"));
    }

    let lemma = tokens[0].to_string();
    let synset_cnt: u32 = tokens[2]
        .parse()
        .map_err(|_| err("synset_cnt is not an integer"))?;
    let p_cnt: u32 = tokens[3]
        .parse()
        .map_err(|_| err("p_cnt is not an integer"))?;

    let mut at = 4;
    let symbols = p_cnt as usize;
    if tokens.len() < at + symbols {
        return Err(err("pointer symbol count mismatch"));
    }
    let ptr_symbols = tokens[at..at + symbols]
        .iter()
        .map(|s| s.to_string())
        .collect();
    at += symbols;

    if tokens.len() < at + 2 {
        return Err(err("missing sense counts"));
    }
    let sense_cnt: u32 = tokens[at]
        .parse()
        .map_err(|_| err("sense_cnt is not an integer"))?;
    let tagsense_cnt: u32 = tokens[at + 1]
        .parse()
        .map_err(|_| err("tagsense_cnt is not an integer"))?;
    at += 2;

    let synset_offsets = tokens[at..]
        .iter()
        .map(|t| t.parse::<u64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| err("synset offset is not an integer"))?;
    if synset_offsets.len() != synset_cnt as usize {
        return Err(err("synset_cnt disagrees with listed offsets"));
    }

    Ok(IndexEntry {
        lemma,
        pos,
        synset_cnt,
        p_cnt,
        ptr_symbols,
        sense_cnt,
        tagsense_cnt,
        synset_offsets,
    })
}
