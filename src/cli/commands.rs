//! CLI command implementations

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::candidate::CandidateGenerator;
use crate::config::{self, RulegenConfig};
use crate::dictionary::WordList;
use crate::pipeline::{CancellationToken, OutputPaths, Pipeline, Report, RunSummary};
use crate::rule;
use crate::synth::{synthesize, RuleStyle};

use super::args::{Cli, Commands, TuningArgs};

/// Execute a CLI command
pub fn execute(cli: Cli, cancel: CancellationToken) -> Result<()> {
    let file_config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            corpus,
            dict,
            basename,
            workers,
            queue_capacity,
            quiet,
            tuning,
        } => cmd_analyze(
            &file_config,
            &corpus,
            dict.as_deref(),
            &basename,
            workers,
            queue_capacity,
            quiet,
            &tuning,
            cancel,
        ),
        Commands::Password {
            password,
            dict,
            tuning,
        } => cmd_password(&file_config, &password, dict.as_deref(), &tuning),
        Commands::Rules {
            word,
            password,
            simple,
        } => cmd_rules(&word, &password, simple),
        Commands::Apply { rule, words } => cmd_apply(&rule, &words),
        Commands::Stats { basename } => cmd_stats(&basename),
    }
}

/// Explicit config paths must load; the default one may be absent or broken.
fn load_config(custom: Option<&Path>) -> Result<RulegenConfig> {
    match custom {
        Some(path) => RulegenConfig::load(path),
        None => Ok(config::default_path()
            .and_then(|path| RulegenConfig::load_or_default(&path))
            .unwrap_or_default()),
    }
}

/// Word list from `--dict`, or an empty one when `--word` makes it unnecessary.
fn load_dictionary(dict: Option<&Path>, config: &RulegenConfig) -> Result<WordList> {
    let list = match dict {
        Some(path) => WordList::load(path)
            .with_context(|| format!("Failed to load word list: {}", path.display()))?,
        None if config.fixed_word.is_some() => WordList::from_terms(Vec::<String>::new()),
        None => bail!("a word list is required (--dict), or a fixed source word (--word)"),
    };

    Ok(list
        .with_max_distance(config.suggest_distance)
        .with_max_suggestions(config.max_suggestions))
}

/// `<basename>.json` holds the run counters for `stats`.
fn summary_path(basename: &Path) -> PathBuf {
    let mut name = basename.as_os_str().to_owned();
    name.push(".json");
    PathBuf::from(name)
}

#[allow(clippy::too_many_arguments)]
fn cmd_analyze(
    file_config: &RulegenConfig,
    corpus: &Path,
    dict: Option<&Path>,
    basename: &Path,
    workers: Option<usize>,
    queue_capacity: Option<usize>,
    quiet: bool,
    tuning: &TuningArgs,
    cancel: CancellationToken,
) -> Result<()> {
    let config = file_config.merge_with_cli(&tuning.overrides());
    let dictionary = load_dictionary(dict, &config)?;
    let outputs = OutputPaths::from_basename(basename);

    let mut pipeline = Pipeline::new(dictionary, config).with_cancellation(cancel);
    if let Some(workers) = workers {
        pipeline = pipeline.with_workers(workers);
    }
    if let Some(capacity) = queue_capacity {
        pipeline = pipeline.with_queue_capacity(capacity);
    }

    eprintln!(
        "  Analyzing {} with {} worker(s)...",
        corpus.display().to_string().cyan(),
        pipeline.workers().to_string().green()
    );

    let summary = pipeline
        .run(corpus, &outputs)
        .with_context(|| format!("Failed to analyze {}", corpus.display()))?;

    let json = serde_json::to_string_pretty(&summary)?;
    let summary_file = summary_path(basename);
    std::fs::write(&summary_file, json)
        .with_context(|| format!("Failed to write summary: {}", summary_file.display()))?;

    if summary.cancelled {
        eprintln!("{}: run interrupted, output is partial", "Warning".yellow());
    }

    eprintln!(
        "  Wrote {} and {}",
        outputs.rules.display().to_string().cyan(),
        outputs.words.display().to_string().cyan()
    );

    if !quiet {
        let report = Report::from_files(&outputs.rules, &outputs.words, &summary)?;
        print_report(&report);
    }

    Ok(())
}

fn cmd_password(
    file_config: &RulegenConfig,
    password: &str,
    dict: Option<&Path>,
    tuning: &TuningArgs,
) -> Result<()> {
    let config = file_config.merge_with_cli(&tuning.overrides());
    let dictionary = load_dictionary(dict, &config)?;
    let generator = CandidateGenerator::new(dictionary, config);

    let analysis = generator.analyze(password);
    if analysis.is_empty() {
        println!("{}", "No source words found".yellow());
        return Ok(());
    }

    for entry in &analysis.words {
        println!(
            "{} (rule length {})",
            entry.word.green().bold(),
            entry.best_rule_len
        );
        for rule in &entry.rules {
            println!("   {}", rule.cyan());
        }
    }

    Ok(())
}

fn cmd_rules(word: &str, password: &str, simple: bool) -> Result<()> {
    let style = if simple {
        RuleStyle::Simple
    } else {
        RuleStyle::Advanced
    };

    let sequences = synthesize(word, password, style);
    if sequences.is_empty() {
        bail!("no rule sequence turns {:?} into {:?}", word, password);
    }

    for sequence in &sequences {
        println!("{}", sequence.encode()?);
    }
    eprintln!("{} sequence(s)", sequences.len());

    Ok(())
}

fn cmd_apply(line: &str, words: &[String]) -> Result<()> {
    let ops = rule::parse_line(line).with_context(|| format!("Invalid rule: {line}"))?;

    for word in words {
        match rule::apply_all(word, &ops) {
            Ok(result) => println!("{}", result),
            Err(e) => eprintln!("{}: {}: {}", "Skipped".yellow(), word, e),
        }
    }

    Ok(())
}

fn cmd_stats(basename: &Path) -> Result<()> {
    let outputs = OutputPaths::from_basename(basename);
    let summary_file = summary_path(basename);

    let summary: RunSummary = if summary_file.exists() {
        let contents = std::fs::read_to_string(&summary_file)
            .with_context(|| format!("Failed to read summary: {}", summary_file.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse summary: {}", summary_file.display()))?
    } else {
        RunSummary::default()
    };

    let report = Report::from_files(&outputs.rules, &outputs.words, &summary)?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &Report) {
    println!();
    println!("{}", "Analysis Summary".bold().underline());
    println!();
    print!("{}", report);
}
