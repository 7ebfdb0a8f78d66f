//! Decoding of data-file lines into [`SenseRecord`]s.
//!
//! A data line is positional: `synset_offset lex_filenum ss_type w_cnt
//! (lemma lex_id){w_cnt} p_cnt (symbol offset pos st){p_cnt} [frames]
//! | gloss`. `w_cnt` and `lex_id` are hexadecimal; the frame block only
//! appears in verb files. The gloss tail after `|` is kept verbatim.

use lexline_types::{
    Frame, Gloss, Pointer, Pos, SenseRecord, Synonym, SynsetId, SynsetType, decode_st,
};

use crate::error::{DbError, Result};

/// Decode the line fetched at `offset`. The record's self-reported offset
/// must anchor the request exactly; disagreement is a corruption error, not
/// a soft failure.
pub(crate) fn parse_data_line(pos: Pos, offset: u64, line: &str) -> Result<SenseRecord> {
    let err = |reason: &str| DbError::parse(pos, offset, reason);

    let (head, gloss_tail) = match line.split_once('|') {
        Some((head, tail)) => (head, tail),
        None => (line, ""),
    };

    let tokens: Vec<&str> = head.split_ascii_whitespace().collect();
    if tokens.len() < 4 {
        return Err(err("truncated record"));
    }

    let found: u64 = tokens[0]
        .parse()
        .map_err(|_| err("synset offset is not an integer"))?;
    if found != offset {
        return Err(DbError::Corrupt {
            pos,
            expected: offset,
            found,
        });
    }

    let lex_filenum: u8 = tokens[1]
        .parse()
        .map_err(|_| err("lex_filenum is not an integer"))?;
    let synset_type = tokens[2]
        .chars()
        .next()
        .and_then(SynsetType::from_char)
        .ok_or_else(|| err("unknown ss_type"))?;
    let word_count =
        usize::from_str_radix(tokens[3], 16).map_err(|_| err("w_cnt is not hexadecimal"))?;
    if word_count == 0 {
        return Err(err("w_cnt must be at least 1"));
    }

    let mut at = 4;
    if tokens.len() < at + word_count * 2 {
        return Err(err("not enough lemma/lex_id pairs"));
    }
    let mut synonyms = Vec::with_capacity(word_count);
    for _ in 0..word_count {
        let lex_id = u8::from_str_radix(tokens[at + 1], 16)
            .map_err(|_| err("lex_id is not hexadecimal"))?;
        synonyms.push(Synonym {
            lemma: tokens[at].to_string(),
            lex_id,
        });
        at += 2;
    }

    if tokens.len() <= at {
        return Err(err("missing pointer count"));
    }
    let p_cnt: usize = tokens[at]
        .parse()
        .map_err(|_| err("p_cnt is not an integer"))?;
    at += 1;

    let mut pointers = Vec::with_capacity(p_cnt);
    for _ in 0..p_cnt {
        if tokens.len() < at + 4 {
            return Err(err("incomplete pointer block"));
        }
        let target_offset: u64 = tokens[at + 1]
            .parse()
            .map_err(|_| err("pointer target offset is not an integer"))?;
        let target_pos = tokens[at + 2]
            .chars()
            .next()
            .and_then(Pos::from_char)
            .ok_or_else(|| err("unknown pointer target part of speech"))?;
        let (src_word, dst_word) = decode_st(tokens[at + 3]);
        pointers.push(Pointer {
            symbol: tokens[at].to_string(),
            target: SynsetId {
                pos: target_pos,
                offset: target_offset,
            },
            src_word,
            dst_word,
        });
        at += 4;
    }

    let mut frames = Vec::new();
    if pos == Pos::Verb && tokens.len() > at {
        let f_cnt: usize = tokens[at]
            .parse()
            .map_err(|_| err("f_cnt is not an integer"))?;
        at += 1;
        for _ in 0..f_cnt {
            if tokens.len() < at + 3 {
                return Err(err("incomplete frame entry"));
            }
            if tokens[at] != "+" {
                return Err(err("expected '+' before frame entry"));
            }
            let frame_number: u16 = tokens[at + 1]
                .parse()
                .map_err(|_| err("frame_number is not an integer"))?;
            let word_number = parse_word_number(tokens[at + 2]);
            frames.push(Frame {
                frame_number,
                word_number,
            });
            at += 3;
        }
    }

    Ok(SenseRecord {
        id: SynsetId { pos, offset },
        lex_filenum,
        synset_type,
        word_count,
        synonyms,
        pointers,
        frames,
        gloss: parse_gloss(gloss_tail),
    })
}

/// Split the definition off the stored gloss: everything before the first
/// `;` outside quotes, trimmed. Quoted spans become example sentences. The
/// raw text keeps its stored form, a single separator space after `|`
/// excepted.
fn parse_gloss(tail: &str) -> Gloss {
    let raw = tail.strip_prefix(' ').unwrap_or(tail);

    let mut examples = Vec::new();
    let mut in_quote = false;
    let mut quote_start: Option<usize> = None;
    let mut def_end = raw.len();
    for (idx, ch) in raw.char_indices() {
        match ch {
            '"' => {
                if in_quote {
                    if let Some(start) = quote_start.take()
                        && idx > start + 1
                    {
                        examples.push(raw[start + 1..idx].to_string());
                    }
                } else {
                    quote_start = Some(idx);
                }
                in_quote = !in_quote;
            }
            ';' if !in_quote && def_end == raw.len() => {
                def_end = idx;
            }
            _ => {}
        }
    }

    Gloss {
        raw: raw.to_string(),
        definition: raw[..def_end].trim().to_string(),
        examples,
    }
}

fn parse_word_number(token: &str) -> Option<u16> {
    u16::from_str_radix(token, 16)
        .ok()
        .and_then(|v| if v == 0 { None } else { Some(v) })
}
