use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use lexline::Lexicon;

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let dict_dir = args.next().map(PathBuf::from).context(
        "usage: cargo run -p lexline --example lookup -- <dict-dir> [--demo | <word[#pos]>]",
    )?;
    let next = args.next();
    if args.next().is_some() {
        bail!("too many arguments");
    }

    let queries: Vec<String> = match next {
        Some(arg) if arg == "--demo" => vec![
            "dog".into(),
            "running#v".into(),
            "beautiful#a".into(),
            "children".into(),
        ],
        Some(arg) => vec![arg],
        None => {
            bail!("usage: cargo run -p lexline --example lookup -- <dict-dir> [--demo | <word[#pos]>]")
        }
    };

    let lexicon = Lexicon::open(&dict_dir)
        .with_context(|| format!("opening dictionary at {}", dict_dir.display()))?;

    println!("Dictionary: {}", dict_dir.display());

    for query in queries {
        println!("\nQuery: {query}");
        let records = lexicon.lookup(&query)?;
        if records.is_empty() {
            println!("  (no senses)");
            continue;
        }
        for record in records {
            let lemmas: Vec<&str> = record.synonyms.iter().map(|s| s.lemma.as_str()).collect();
            println!(
                "  {}#{} [{}] {}",
                record.offset(),
                record.pos().to_char(),
                lemmas.join(", "),
                record.gloss.definition
            );
        }
        for id in lexicon.query_sense(&query)? {
            println!("    {id}");
        }
    }

    Ok(())
}
