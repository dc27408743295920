use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use env_logger::Env;
use log::{LevelFilter, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_lexgen_core::lexical::synonyms::SynonymTable;
use rs_lexgen_core::present::{self, DEFAULT_WIDTH};
use rs_lexgen_core::{DefaultPipeline, FallbackPolicy, GenerationInput, NormalizerConfig, io as corpus_io};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate text from a Markov chain over normalized words", long_about = None)]
struct Cli {
    /// Source text file. Prompted for (under `corpora/`) when omitted.
    #[arg(short = 'i', long = "ifile", visible_short_alias = 'f', visible_alias = "file", value_name = "PATH")]
    input: Option<PathBuf>,

    /// Chain order: number of words in a window.
    #[arg(short, long, default_value_t = 1)]
    order: usize,

    /// Number of words to generate.
    #[arg(short, long, default_value_t = 200)]
    length: usize,

    /// Sampling temperature, > 0. Lower is more conservative.
    #[arg(short, long, default_value_t = 0.5)]
    temperature: f64,

    /// What to do when the current window was never seen.
    #[arg(long, value_name = "POLICY", default_value_t = FallbackPolicy::Resample)]
    fallback: FallbackPolicy,

    /// Seed for reproducible output.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// JSON synonym table replacing the built-in one.
    #[arg(long, value_name = "PATH")]
    lexicon: Option<PathBuf>,

    /// Normalize on all cores.
    #[arg(long)]
    parallel: bool,

    /// Normalization passes over the source text.
    #[arg(long, value_name = "N", default_value_t = 2)]
    passes: usize,

    /// Write the result to this file. Prompted for when omitted.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Line width of the printed and written text.
    #[arg(long, value_name = "COLUMNS", default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Increase logging verbosity (-v debug, -vv trace).
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    builder.parse_env(Env::default());
    let _ = builder.try_init();
}

fn run(cli: Cli) -> Result<()> {
    // Reject bad arguments before touching any file
    let mut input = GenerationInput::new(cli.length, cli.order, cli.temperature)?;
    input.fallback = cli.fallback;

    let mut config = NormalizerConfig::default();
    config.set_passes(cli.passes)?;
    config.parallel = cli.parallel;

    let source = match cli.input {
        Some(path) => path,
        None => corpus_io::corpus_path(&prompt("Enter the text file name: ")?),
    };
    let seed_text = corpus_io::load_text(&source).with_context(|| format!("cannot read {}", source.display()))?;
    info!("loaded {} ({} bytes)", source.display(), seed_text.len());

    let lexicon = match &cli.lexicon {
        Some(path) => SynonymTable::load(path).with_context(|| format!("cannot load lexicon {}", path.display()))?,
        None => SynonymTable::builtin().context("built-in lexicon is invalid")?,
    };
    let pipeline = DefaultPipeline::with_lexicon(lexicon).with_config(config);

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let generation = pipeline.generate(&seed_text, &input, &mut rng)?;
    let text = present::wrap(&present::capitalize(&generation.text), cli.width);

    println!("\nThe results:\n");
    println!("{text}");

    let output = match cli.output {
        Some(path) => Some(path),
        None => {
            let name = prompt("\nEnter filename to write output to <Enter for skip>: ")?;
            (!name.is_empty()).then(|| PathBuf::from(name))
        }
    };
    if let Some(path) = output {
        corpus_io::write_text(&path, &text).with_context(|| format!("cannot write {}", path.display()))?;
        info!("wrote {}", path.display());
    }

    Ok(())
}

/// Prints `message` and reads one trimmed line from stdin.
fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("cannot read from stdin")?;
    Ok(line.trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_flags() {
        let cli = Cli::try_parse_from(["lexgen", "-i", "book.txt"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("book.txt")));
        assert_eq!(cli.order, 1);
        assert_eq!(cli.length, 200);
        assert_eq!(cli.temperature, 0.5);
        assert_eq!(cli.fallback, FallbackPolicy::Resample);
        assert_eq!(cli.passes, 2);
        assert_eq!(cli.width, DEFAULT_WIDTH);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn short_flags_and_aliases() {
        let cli = Cli::try_parse_from(["lexgen", "-f", "a.txt", "-o", "3", "-l", "50", "-t", "1.5", "-vv"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("a.txt")));
        assert_eq!(cli.order, 3);
        assert_eq!(cli.length, 50);
        assert_eq!(cli.temperature, 1.5);
        assert_eq!(cli.verbose, 2);

        let cli = Cli::try_parse_from(["lexgen", "--file", "b.txt", "--fallback", "backoff"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("b.txt")));
        assert_eq!(cli.fallback, FallbackPolicy::Backoff);
    }

    #[test]
    fn rejects_unknown_fallback() {
        assert!(Cli::try_parse_from(["lexgen", "--fallback", "shorter"]).is_err());
    }

    #[test]
    fn invalid_temperature_fails_before_reading_input() {
        let cli = Cli::try_parse_from(["lexgen", "-i", "/nonexistent/source.txt", "-t", "0"]).unwrap();
        let err = run(cli).unwrap_err();
        assert!(err.to_string().contains("temperature"));
    }

    #[test]
    fn writes_seeded_output() {
        let dir = std::env::temp_dir();
        let source = dir.join(format!("lexgen-cli-source-{}.txt", std::process::id()));
        let target = dir.join(format!("lexgen-cli-output-{}.txt", std::process::id()));
        std::fs::write(&source, "The cat sat on the mat. The dog sat on the rug.").unwrap();

        let args = [
            "lexgen".to_owned(),
            "-i".to_owned(),
            source.display().to_string(),
            "-l".to_owned(),
            "12".to_owned(),
            "--seed".to_owned(),
            "7".to_owned(),
            "--output".to_owned(),
            target.display().to_string(),
        ];
        run(Cli::try_parse_from(args).unwrap()).unwrap();

        let written = std::fs::read_to_string(&target).unwrap();
        assert!(written.chars().next().is_some_and(char::is_uppercase));
        std::fs::remove_file(&source).unwrap();
        std::fs::remove_file(&target).unwrap();
    }
}
