use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use lexline::Lexicon;
use lexline::query::{parse_offset, parse_pos_arg};

const DEFAULT_DICT_DIR: &str = "dict";

const USAGE: &str = "usage: lexline [--dict-dir <dir>] <command> <args>

commands:
  lookup <word[#pos]>       full sense records for a word
  senses <word[#pos]>       sense ids (word#pos#rank) for a word
  sense <word#pos#rank>     one fully qualified sense
  forms <word[#pos]>        valid base forms that exist in the index
  get <offset> <pos>        record anchored at a data-file byte offset
  synonyms <offset> <pos>   synonym-related records for a sense

the dictionary directory defaults to WORDNET_DIR, then ./dict";

fn main() -> Result<()> {
    init_tracing();

    let config = load_config()?;
    info!("using dictionary at {}", config.dict_dir.display());

    let lexicon = Lexicon::open(&config.dict_dir)
        .with_context(|| format!("opening dictionary at {}", config.dict_dir.display()))?;
    let out = run(&lexicon, &config.command)?;
    println!("{out}");
    Ok(())
}

fn run(lexicon: &Lexicon, command: &Command) -> Result<String> {
    let json = match command {
        Command::Lookup { input } => serde_json::to_string_pretty(&lexicon.lookup(input)?)?,
        Command::Senses { input } => serde_json::to_string_pretty(&lexicon.query_sense(input)?)?,
        Command::Sense { input } => serde_json::to_string_pretty(&lexicon.find_sense(input)?)?,
        Command::Forms { input } => serde_json::to_string_pretty(&lexicon.valid_forms(input)?)?,
        Command::Get { offset, pos } => {
            let offset = parse_offset(offset)?;
            let pos = parse_pos_arg(pos)?;
            serde_json::to_string_pretty(&lexicon.get(offset, pos)?)?
        }
        Command::Synonyms { offset, pos } => {
            let offset = parse_offset(offset)?;
            let pos = parse_pos_arg(pos)?;
            serde_json::to_string_pretty(&lexicon.synonyms(offset, pos)?)?
        }
    };
    Ok(json)
}

#[derive(Debug)]
enum Command {
    Lookup { input: String },
    Senses { input: String },
    Sense { input: String },
    Forms { input: String },
    Get { offset: String, pos: String },
    Synonyms { offset: String, pos: String },
}

#[derive(Debug)]
struct Config {
    dict_dir: PathBuf,
    command: Command,
}

fn load_config() -> Result<Config> {
    let mut dict_dir: Option<PathBuf> = None;
    let mut positional: Vec<String> = Vec::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--dict-dir" => {
                if let Some(path) = args.next() {
                    dict_dir = Some(PathBuf::from(path));
                }
            }
            "--help" | "-h" => bail!("{USAGE}"),
            _ => {
                if let Some(path) = arg.strip_prefix("--dict-dir=") {
                    dict_dir = Some(PathBuf::from(path));
                } else {
                    positional.push(arg);
                }
            }
        }
    }

    let dict_dir = dict_dir
        .or_else(|| env::var("WORDNET_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DICT_DIR));

    let mut positional = positional.into_iter();
    let command = match positional.next().as_deref() {
        Some("lookup") => Command::Lookup {
            input: required(&mut positional, "lookup <word[#pos]>")?,
        },
        Some("senses") => Command::Senses {
            input: required(&mut positional, "senses <word[#pos]>")?,
        },
        Some("sense") => Command::Sense {
            input: required(&mut positional, "sense <word#pos#rank>")?,
        },
        Some("forms") => Command::Forms {
            input: required(&mut positional, "forms <word[#pos]>")?,
        },
        Some("get") => Command::Get {
            offset: required(&mut positional, "get <offset> <pos>")?,
            pos: positional.next().unwrap_or_default(),
        },
        Some("synonyms") => Command::Synonyms {
            offset: required(&mut positional, "synonyms <offset> <pos>")?,
            pos: positional.next().unwrap_or_default(),
        },
        Some(other) => bail!("unknown command {other:?}\n{USAGE}"),
        None => bail!("{USAGE}"),
    };

    Ok(Config { dict_dir, command })
}

fn required(args: &mut impl Iterator<Item = String>, usage: &str) -> Result<String> {
    args.next().context(format!("missing argument: {usage}"))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::WARN);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
