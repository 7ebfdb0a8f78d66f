//! Morphological reduction of inflected surface forms to base forms.
//!
//! Faithful to the classic morphy algorithm: check the part-of-speech
//! exception table, apply suffix-substitution rules, and keep the literal
//! surface form as the final candidate so already-base-form queries still
//! resolve. Candidates are *unverified* guesses; callers filter them
//! against an index of real lemmas.
//!
//! Exception tables (`noun.exc` etc.) load lazily on first use for a part
//! of speech and stay cached for the lifetime of the handle. Concurrent
//! first uses race benignly: loading is idempotent and whichever table
//! lands in the cache is identical.
//!
//! # Example
//! ```no_run
//! use lexline_morph::Morph;
//! use lexline_types::Pos;
//!
//! # fn main() -> anyhow::Result<()> {
//! let morph = Morph::new("/path/to/dict");
//! for form in morph.base_forms(Pos::Verb, "running")? {
//!     println!("{form}");
//! }
//! # Ok(()) }
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use dashmap::DashMap;
use tracing::debug;

use lexline_types::{Pos, normalize_lemma};

/// Inflected surface form to base form(s), one table per part of speech.
pub type ExceptionTable = HashMap<String, Vec<String>>;

/// Whether suffix rules still run once the exception table has produced a
/// hit. Exception precedence and the literal-form fallback hold either way.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RuleLayering {
    /// Exceptions first, then rule candidates, then the surface form.
    #[default]
    Accumulate,
    /// An exception hit suppresses the suffix rules; the surface form is
    /// still appended.
    ExceptionShortCircuit,
}

/// Morphology handle over a dictionary directory's exception files.
pub struct Morph {
    dir: PathBuf,
    layering: RuleLayering,
    exceptions: DashMap<Pos, Arc<ExceptionTable>>,
}

impl Morph {
    /// Create a handle. No I/O happens until a part of speech is first
    /// consulted.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::with_layering(dir, RuleLayering::default())
    }

    pub fn with_layering(dir: impl AsRef<Path>, layering: RuleLayering) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            layering,
            exceptions: DashMap::new(),
        }
    }

    /// Install a precomputed table for `pos`, replacing whatever would have
    /// been (or was) loaded from disk. Intended for tests and embedders.
    pub fn set_exceptions(&self, pos: Pos, table: ExceptionTable) {
        self.exceptions.insert(pos, Arc::new(table));
    }

    /// The exception table for `pos`, loading and caching it on first use.
    pub fn exceptions(&self, pos: Pos) -> Result<Arc<ExceptionTable>> {
        if let Some(table) = self.exceptions.get(&pos) {
            return Ok(Arc::clone(&table));
        }
        let loaded = Arc::new(load_exc(self.dir.join(format!("{pos}.exc")))?);
        debug!("loaded {} {pos} exception entries", loaded.len());
        // First writer wins on a concurrent load; the content is the same.
        Ok(Arc::clone(&self.exceptions.entry(pos).or_insert(loaded)))
    }

    /// Load every part of speech's table: the `loadExceptions` surface.
    pub fn load_all(&self) -> Result<HashMap<Pos, Arc<ExceptionTable>>> {
        let mut all = HashMap::new();
        for pos in Pos::ALL {
            all.insert(pos, self.exceptions(pos)?);
        }
        Ok(all)
    }

    /// Candidate base forms for a surface form, in priority order:
    /// exception-table hits, then suffix-rule derivations in rule-table
    /// order, then the surface form itself. De-duplicated, order preserved.
    /// The empty string yields nothing.
    pub fn base_forms(&self, pos: Pos, surface: &str) -> Result<Vec<String>> {
        let surface = normalize_lemma(surface);
        if surface.is_empty() {
            return Ok(Vec::new());
        }

        let mut out: Vec<String> = Vec::new();
        let push_unique = |candidate: String, out: &mut Vec<String>| {
            if !out.contains(&candidate) {
                out.push(candidate);
            }
        };

        let table = self.exceptions(pos)?;
        let exception_hit = match table.get(&surface) {
            Some(bases) => {
                for base in bases {
                    push_unique(base.clone(), &mut out);
                }
                true
            }
            None => false,
        };

        if !(exception_hit && self.layering == RuleLayering::ExceptionShortCircuit) {
            for (suffix, replacement) in rules_for(pos) {
                if let Some(candidate) = apply_rule(&surface, suffix, replacement) {
                    push_unique(candidate, &mut out);
                }
            }
        }

        push_unique(surface, &mut out);
        Ok(out)
    }
}

fn load_exc(path: PathBuf) -> Result<ExceptionTable> {
    if !path.exists() {
        return Ok(ExceptionTable::new());
    }
    let file =
        File::open(&path).with_context(|| format!("open exception file {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut map = ExceptionTable::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line =
            line.with_context(|| format!("read line {} in {}", lineno + 1, path.display()))?;
        let mut parts = line.split_whitespace();
        let surface = match parts.next() {
            Some(s) => normalize_lemma(s),
            None => continue,
        };
        let bases: Vec<String> = parts.map(normalize_lemma).collect();
        if !bases.is_empty() {
            map.insert(surface, bases);
        }
    }
    Ok(map)
}

fn apply_rule(surface: &str, suffix: &str, replacement: &str) -> Option<String> {
    let stem = surface.strip_suffix(suffix).filter(|s| !s.is_empty())?;
    let mut candidate = if replacement.is_empty() {
        stem.to_string()
    } else {
        format!("{stem}{replacement}")
    };

    // Undo doubled final consonants from inflection ("running" -> "runn").
    if replacement.is_empty() && candidate.len() >= 2 {
        let mut chars = candidate.chars();
        let last = chars.next_back();
        let prev = chars.next_back();
        if let (Some(a), Some(b)) = (last, prev)
            && a == b
        {
            candidate.pop();
        }
    }

    Some(candidate)
}

fn rules_for(pos: Pos) -> &'static [(&'static str, &'static str)] {
    match pos {
        Pos::Noun => &[
            ("s", ""),
            ("ses", "s"),
            ("xes", "x"),
            ("zes", "z"),
            ("ches", "ch"),
            ("shes", "sh"),
            ("men", "man"),
            ("ies", "y"),
        ],
        Pos::Verb => &[
            ("s", ""),
            ("ies", "y"),
            ("es", "e"),
            ("es", ""),
            ("ed", "e"),
            ("ed", ""),
            ("ing", "e"),
            ("ing", ""),
        ],
        Pos::Adj | Pos::Adv => &[("er", ""), ("er", "e"), ("est", ""), ("est", "e")],
    }
}
