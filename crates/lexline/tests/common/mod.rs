//! Builds miniature dictionary directories whose index offsets really are
//! the byte positions of the data lines they name.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// One record to place in a data file. `key` is a builder-local handle used
/// for pointer targets and offset lookups.
#[derive(Clone, Copy)]
pub struct SynsetSpec {
    pub key: &'static str,
    pub pos: char,
    pub ss_type: char,
    pub lex_filenum: &'static str,
    pub words: &'static [(&'static str, &'static str)],
    /// (symbol, target key, target pos, source/target hex pair)
    pub pointers: &'static [(&'static str, &'static str, char, &'static str)],
    /// Raw frame segment appended after the pointers (verbs only).
    pub frames: &'static str,
    pub gloss: &'static str,
}

impl Default for SynsetSpec {
    fn default() -> Self {
        Self {
            key: "",
            pos: 'n',
            ss_type: 'n',
            lex_filenum: "03",
            words: &[],
            pointers: &[],
            frames: "",
            gloss: "",
        }
    }
}

pub struct Fixture {
    dir: TempDir,
    offsets: HashMap<&'static str, u64>,
}

impl Fixture {
    pub fn build(specs: &[SynsetSpec]) -> Fixture {
        let dir = tempfile::tempdir().expect("create fixture dir");

        // Offsets are rendered at a fixed width, so line lengths are final
        // even with placeholder targets; one measuring pass pins every
        // record's byte position.
        let mut offsets: HashMap<&'static str, u64> = HashMap::new();
        let mut cursors: HashMap<char, u64> = HashMap::new();
        for spec in specs {
            let at = cursors.entry(spec.pos).or_insert(0);
            offsets.insert(spec.key, *at);
            *at += render(spec, &offsets).len() as u64 + 1;
        }

        let mut data: HashMap<char, String> = HashMap::new();
        for spec in specs {
            let file = data.entry(spec.pos).or_default();
            file.push_str(&render(spec, &offsets));
            file.push('\n');
        }

        // Index entries: offsets in declaration order (sense rank), plus
        // the distinct pointer symbols the lemma's records carry.
        type Entries = BTreeMap<String, (Vec<u64>, Vec<&'static str>)>;
        let mut index: HashMap<char, Entries> = HashMap::new();
        for spec in specs {
            for (lemma, _) in spec.words {
                let entry = index
                    .entry(spec.pos)
                    .or_default()
                    .entry(lemma.to_string())
                    .or_default();
                entry.0.push(offsets[spec.key]);
                for (symbol, ..) in spec.pointers {
                    if !entry.1.contains(symbol) {
                        entry.1.push(symbol);
                    }
                }
            }
        }

        for pos in ['n', 'v', 'a', 'r'] {
            let name = pos_name(pos);
            let body = data.get(&pos).map(String::as_str).unwrap_or("");
            fs::write(dir.path().join(format!("data.{name}")), body).unwrap();

            let mut out = String::new();
            if let Some(entries) = index.get(&pos) {
                for (lemma, (offs, symbols)) in entries {
                    out.push_str(&format!("{lemma} {pos} {} {}", offs.len(), symbols.len()));
                    for symbol in symbols {
                        out.push(' ');
                        out.push_str(symbol);
                    }
                    out.push_str(&format!(" {} {}", offs.len(), offs.len()));
                    for off in offs {
                        out.push_str(&format!(" {off:08}"));
                    }
                    out.push('\n');
                }
            }
            fs::write(dir.path().join(format!("index.{name}")), out).unwrap();
        }

        Fixture { dir, offsets }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn offset(&self, key: &str) -> u64 {
        self.offsets[key]
    }

    #[allow(dead_code)]
    pub fn write_exc(&self, pos_name: &str, lines: &[&str]) {
        let body = lines.join("\n") + "\n";
        fs::write(self.dir.path().join(format!("{pos_name}.exc")), body).unwrap();
    }
}

fn render(spec: &SynsetSpec, offsets: &HashMap<&'static str, u64>) -> String {
    let own = offsets.get(spec.key).copied().unwrap_or(0);
    let mut line = format!(
        "{own:08} {} {} {:02x}",
        spec.lex_filenum,
        spec.ss_type,
        spec.words.len()
    );
    for (lemma, lex_id) in spec.words {
        line.push_str(&format!(" {lemma} {lex_id}"));
    }
    line.push_str(&format!(" {:03}", spec.pointers.len()));
    for (symbol, target, tpos, st) in spec.pointers {
        let toff = offsets.get(target).copied().unwrap_or(0);
        line.push_str(&format!(" {symbol} {toff:08} {tpos} {st}"));
    }
    if !spec.frames.is_empty() {
        line.push(' ');
        line.push_str(spec.frames);
    }
    line.push_str(" | ");
    line.push_str(spec.gloss);
    line
}

fn pos_name(pos: char) -> &'static str {
    match pos {
        'n' => "noun",
        'v' => "verb",
        'a' => "adj",
        'r' => "adv",
        _ => panic!("unknown pos char {pos}"),
    }
}
