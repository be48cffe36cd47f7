//! Batch analysis of a password corpus.
//!
//! The calling thread reads the corpus and feeds a bounded queue; a pool of
//! workers analyzes passwords and hands `(word, rule)` lines to two writer
//! threads, one per output file.
//!
//! ```text
//! corpus ──▶ producer ──[bounded]──▶ worker × N ──[unbounded]──▶ rule writer ──▶ <base>.rule
//!                                                 └─[unbounded]──▶ word writer ──▶ <base>.word
//! ```
//!
//! Shutdown sends one `Stop` per worker, joins the workers (which drains the
//! queue), then stops and joins the writers. Output order across workers is
//! not defined; statistics come from a separate pass over the files, see
//! [`report`].

mod filter;
pub mod report;

pub use filter::{classify, Classification};
pub use report::Report;

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::candidate::CandidateGenerator;
use crate::config::RulegenConfig;
use crate::dictionary::Dictionary;
use crate::error::PipelineError;

/// Input lines between progress log entries.
pub const PROGRESS_INTERVAL: usize = 5000;

/// Queue slots per worker when no capacity is given.
pub const QUEUE_SLOTS_PER_WORKER: usize = 100;

/// Cooperative stop flag shared by the producer and the workers.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// A fresh, unset token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the run to stop. Already written lines stay intact.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// True once [`cancel`](Self::cancel) was called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Non-blank corpus lines read
    pub total: usize,
    /// Lines passed to the workers
    pub accepted: usize,
    /// Rejected as digits only
    pub numeric: usize,
    /// Rejected for too few letters
    pub low_alpha: usize,
    /// Rejected for non-printable or non-ASCII characters
    pub non_ascii: usize,
    /// Accepted lines the workers finished analyzing
    pub processed: usize,
    /// The run was stopped early
    pub cancelled: bool,
}

impl RunSummary {
    fn count(&mut self, class: Classification) {
        match class {
            Classification::Accepted => self.accepted += 1,
            Classification::Numeric => self.numeric += 1,
            Classification::LowAlpha => self.low_alpha += 1,
            Classification::NonAscii => self.non_ascii += 1,
        }
    }
}

/// Locations of the two output files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// One rule line per emitted pair
    pub rules: PathBuf,
    /// One source word per emitted pair
    pub words: PathBuf,
}

impl OutputPaths {
    /// `<basename>.rule` and `<basename>.word`
    pub fn from_basename(basename: impl AsRef<Path>) -> Self {
        let with_suffix = |suffix: &str| {
            let mut name = basename.as_ref().as_os_str().to_owned();
            name.push(suffix);
            PathBuf::from(name)
        };

        Self {
            rules: with_suffix(".rule"),
            words: with_suffix(".word"),
        }
    }
}

enum Job {
    Password(String),
    Stop,
}

enum Line {
    Text(String),
    Stop,
}

/// Batch runner over a corpus.
///
/// ```rust,no_run
/// use rulegen::config::RulegenConfig;
/// use rulegen::dictionary::WordList;
/// use rulegen::pipeline::{OutputPaths, Pipeline};
///
/// let dict = WordList::load("words.txt")?;
/// let summary = Pipeline::new(dict, RulegenConfig::default())
///     .with_workers(4)
///     .run("leaked.txt", &OutputPaths::from_basename("analysis"))?;
/// println!("{} of {} accepted", summary.accepted, summary.total);
/// # Ok::<(), rulegen::error::PipelineError>(())
/// ```
pub struct Pipeline<D> {
    dictionary: D,
    config: RulegenConfig,
    workers: usize,
    queue_capacity: Option<usize>,
    cancel: CancellationToken,
}

impl<D> Pipeline<D>
where
    D: Dictionary + Clone + 'static,
{
    /// One worker per available CPU.
    pub fn new(dictionary: D, config: RulegenConfig) -> Self {
        let workers = thread::available_parallelism().map_or(1, |n| n.get());
        Self {
            dictionary,
            config,
            workers,
            queue_capacity: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Set the number of worker threads (at least one).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Override the input queue capacity (default workers × 100).
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity.max(1));
        self
    }

    /// Use an externally owned cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Token that stops this pipeline when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Worker thread count.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Effective input queue capacity.
    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
            .unwrap_or(self.workers * QUEUE_SLOTS_PER_WORKER)
    }

    /// Analyze the corpus file at `corpus`, writing to `outputs`.
    pub fn run(
        &self,
        corpus: impl AsRef<Path>,
        outputs: &OutputPaths,
    ) -> Result<RunSummary, PipelineError> {
        let corpus = corpus.as_ref();
        let file = File::open(corpus).map_err(|e| PipelineError::io(corpus, e))?;
        self.run_reader(BufReader::new(file), corpus, outputs)
    }

    /// Analyze lines from `reader`. `source` names it in errors.
    ///
    /// Both output files are created (truncated) before any line is read.
    pub fn run_reader<R: BufRead>(
        &self,
        reader: R,
        source: &Path,
        outputs: &OutputPaths,
    ) -> Result<RunSummary, PipelineError> {
        let rule_file =
            File::create(&outputs.rules).map_err(|e| PipelineError::io(&outputs.rules, e))?;
        let word_file =
            File::create(&outputs.words).map_err(|e| PipelineError::io(&outputs.words, e))?;

        let (rule_tx, rule_rx) = mpsc::channel();
        let (word_tx, word_rx) = mpsc::channel();
        let rule_writer = spawn_writer("rule-writer", outputs.rules.clone(), rule_file, rule_rx)?;
        let word_writer = spawn_writer("word-writer", outputs.words.clone(), word_file, word_rx)?;

        let (job_tx, job_rx) = mpsc::sync_channel(self.queue_capacity());
        let job_rx = Arc::new(Mutex::new(job_rx));
        let processed = Arc::new(AtomicUsize::new(0));

        let mut workers = Vec::with_capacity(self.workers);
        let mut spawn_error = None;
        for id in 0..self.workers {
            let context = WorkerContext {
                generator: CandidateGenerator::new(self.dictionary.clone(), self.config.clone()),
                all_optimal: self.config.all_optimal,
                jobs: Arc::clone(&job_rx),
                rules: rule_tx.clone(),
                words: word_tx.clone(),
                cancel: self.cancel.clone(),
                processed: Arc::clone(&processed),
            };
            match thread::Builder::new()
                .name(format!("rulegen-worker-{id}"))
                .spawn(move || context.run())
            {
                Ok(handle) => workers.push(handle),
                Err(source) => {
                    spawn_error = Some(PipelineError::Spawn {
                        name: "worker",
                        source,
                    });
                    break;
                }
            }
        }
        // Only workers hold the receiving end, so a pool that died turns
        // producer sends into errors instead of a deadlock
        drop(job_rx);

        let produced = match spawn_error {
            Some(err) => Err(err),
            None => self.produce(reader, source, &job_tx),
        };

        for _ in 0..workers.len() {
            if job_tx.send(Job::Stop).is_err() {
                break;
            }
        }
        let worker_result = join_all(workers, "worker");

        // Writers see their Stop only after every worker line
        let _ = rule_tx.send(Line::Stop);
        let _ = word_tx.send(Line::Stop);
        let rule_result = join(rule_writer, "rule writer");
        let word_result = join(word_writer, "word writer");

        let mut summary = produced?;
        worker_result?;
        let rule_lines = rule_result??;
        let word_lines = word_result??;

        summary.processed = processed.load(Ordering::SeqCst);
        summary.cancelled = self.cancel.is_cancelled();
        info!(
            total = summary.total,
            accepted = summary.accepted,
            processed = summary.processed,
            rule_lines,
            word_lines,
            cancelled = summary.cancelled,
            "run finished"
        );
        Ok(summary)
    }

    fn produce<R: BufRead>(
        &self,
        mut reader: R,
        source: &Path,
        jobs: &SyncSender<Job>,
    ) -> Result<RunSummary, PipelineError> {
        let mut summary = RunSummary::default();
        let mut buf = Vec::new();

        loop {
            if self.cancel.is_cancelled() {
                warn!(read = summary.total, "cancelled, no further input is read");
                break;
            }

            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| PipelineError::io(source, e))?;
            if read == 0 {
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            let password = line.trim_end_matches(['\n', '\r']);
            if password.is_empty() {
                continue;
            }

            summary.total += 1;
            if summary.total % PROGRESS_INTERVAL == 0 {
                info!(read = summary.total, accepted = summary.accepted, "progress");
            }

            let class = classify(password);
            summary.count(class);
            if class == Classification::Accepted
                && jobs.send(Job::Password(password.to_string())).is_err()
            {
                debug!("all workers gone, stopping input");
                break;
            }
        }

        Ok(summary)
    }
}

struct WorkerContext<D> {
    generator: CandidateGenerator<D>,
    all_optimal: bool,
    jobs: Arc<Mutex<Receiver<Job>>>,
    rules: Sender<Line>,
    words: Sender<Line>,
    cancel: CancellationToken,
    processed: Arc<AtomicUsize>,
}

impl<D: Dictionary> WorkerContext<D> {
    fn run(self) {
        loop {
            let job = self.jobs.lock().recv();
            let password = match job {
                Ok(Job::Password(password)) => password,
                Ok(Job::Stop) | Err(_) => break,
            };

            // Keep draining until Stop so the producer never blocks
            if self.cancel.is_cancelled() {
                continue;
            }

            let analysis = self.generator.analyze(&password);
            for (word, rule) in analysis.emitted(self.all_optimal) {
                if !send_pair(&self.rules, &self.words, word, rule) {
                    debug!("writer gone, worker exiting");
                    return;
                }
            }
            self.processed.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Queue one output pair, rule first. A word line is only queued once its
/// rule line was, so `.word` never runs ahead of `.rule`.
fn send_pair(rules: &Sender<Line>, words: &Sender<Line>, word: &str, rule: &str) -> bool {
    rules.send(Line::Text(rule.to_string())).is_ok()
        && words.send(Line::Text(word.to_string())).is_ok()
}

fn spawn_writer(
    name: &'static str,
    path: PathBuf,
    file: File,
    lines: Receiver<Line>,
) -> Result<JoinHandle<Result<usize, PipelineError>>, PipelineError> {
    thread::Builder::new()
        .name(format!("rulegen-{name}"))
        .spawn(move || write_lines(&path, file, lines))
        .map_err(|source| PipelineError::Spawn { name, source })
}

fn write_lines(path: &Path, file: File, lines: Receiver<Line>) -> Result<usize, PipelineError> {
    let mut out = BufWriter::new(file);
    let mut written = 0;

    for line in lines {
        match line {
            Line::Text(text) => {
                writeln!(out, "{text}")
                    .and_then(|_| out.flush())
                    .map_err(|e| PipelineError::io(path, e))?;
                written += 1;
            }
            Line::Stop => break,
        }
    }

    Ok(written)
}

fn join<T>(handle: JoinHandle<T>, role: &'static str) -> Result<T, PipelineError> {
    handle
        .join()
        .map_err(|_| PipelineError::ThreadPanicked(role))
}

fn join_all(handles: Vec<JoinHandle<()>>, role: &'static str) -> Result<(), PipelineError> {
    let mut result = Ok(());
    for handle in handles {
        if let Err(err) = join(handle, role) {
            result = Err(err);
        }
    }
    result
}
