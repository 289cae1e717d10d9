//! Parallel evaluation of every document pair
//!
//! Workers claim small batches of pairs from a shared queue, score them, and
//! send the results over a bounded channel. The calling thread is the single
//! consumer: it offers each result to the [`TopKSelector`] and reports
//! progress. With one worker everything runs on the calling thread.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, SyncSender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

use crate::config::{Configuration, ScoringErrorPolicy};
use crate::corpus::Corpus;
use crate::error::{HadesError, Result};
use crate::pairs::{ComparisonTask, PairEnumerator, Pairs};
use crate::rank::{ComparisonResult, TopKSelector};
use crate::similarity::{self, JunkPolicy};
use crate::trace_time;

/// Pairs handed to a worker per queue lock
pub const DEFAULT_BATCH_SIZE: usize = 32;

/// Cooperative cancellation flag shared between the caller and the workers
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Completed comparisons out of the total for the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

/// What a scheduler run did
#[derive(Debug, Default)]
pub struct ScheduleOutcome {
    /// `N * (N - 1) / 2`
    pub total: usize,
    /// Pairs whose result reached the selector
    pub scored: usize,
    /// Pairs skipped under [`ScoringErrorPolicy::Skip`]
    pub failed: Vec<HadesError>,
    /// The run stopped before every pair was processed
    pub truncated: bool,
}

impl ScheduleOutcome {
    pub fn completed(&self) -> usize {
        self.scored + self.failed.len()
    }
}

/// Runs the all-pairs comparison over a worker pool
#[derive(Debug, Clone)]
pub struct ComparisonScheduler {
    workers: usize,
    batch_size: usize,
    junk: JunkPolicy,
    on_error: ScoringErrorPolicy,
    cancel: CancellationToken,
}

impl ComparisonScheduler {
    /// Create a scheduler with `workers` threads (at least one)
    pub fn new(workers: usize) -> Self {
        ComparisonScheduler {
            workers: workers.max(1),
            batch_size: DEFAULT_BATCH_SIZE,
            junk: JunkPolicy::None,
            on_error: ScoringErrorPolicy::Abort,
            cancel: CancellationToken::new(),
        }
    }

    /// Scheduler settings taken from a run configuration
    pub fn from_config(config: &Configuration) -> Self {
        Self::new(config.number_of_processes)
            .with_junk(config.junk.into())
            .with_error_policy(config.on_scoring_error)
    }

    pub fn with_junk(mut self, junk: JunkPolicy) -> Self {
        self.junk = junk;
        self
    }

    pub fn with_error_policy(mut self, on_error: ScoringErrorPolicy) -> Self {
        self.on_error = on_error;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Score every pair of `corpus` and offer each result to `selector`.
    ///
    /// `on_progress` is called on the calling thread after every processed
    /// pair. Under [`ScoringErrorPolicy::Abort`] the first failing pair stops
    /// the run and is returned as [`HadesError::Scoring`].
    pub fn run<F>(
        &self,
        corpus: &Corpus,
        selector: &TopKSelector,
        on_progress: F,
    ) -> Result<ScheduleOutcome>
    where
        F: FnMut(Progress),
    {
        let start = Instant::now();
        let enumerator = PairEnumerator::new(corpus.len());
        let mut collector = Collector {
            corpus,
            selector,
            on_error: self.on_error,
            on_progress,
            total: enumerator.total(),
            scored: 0,
            failed: Vec::new(),
            fatal: None,
        };

        if self.workers == 1 {
            self.run_sequential(corpus, enumerator, &mut collector);
        } else {
            self.run_parallel(corpus, enumerator, &mut collector);
        }

        let Collector {
            total,
            scored,
            failed,
            fatal,
            ..
        } = collector;

        if let Some(err) = fatal {
            tracing::error!(error = %err, "Comparison aborted");
            return Err(err);
        }

        let outcome = ScheduleOutcome {
            total,
            scored,
            truncated: scored + failed.len() < total,
            failed,
        };

        if outcome.truncated {
            tracing::warn!(
                completed = outcome.completed(),
                total = outcome.total,
                "Comparison cancelled before all pairs were scored"
            );
        }
        trace_time!(
            start,
            "compare_all_pairs",
            workers = self.workers,
            scored = outcome.scored
        );

        Ok(outcome)
    }

    fn run_sequential<F: FnMut(Progress)>(
        &self,
        corpus: &Corpus,
        enumerator: PairEnumerator,
        collector: &mut Collector<'_, F>,
    ) {
        for task in enumerator.iter() {
            if self.cancel.is_cancelled() {
                break;
            }
            if !collector.accept(score_task(corpus, task, &self.junk)) {
                break;
            }
        }
    }

    fn run_parallel<F: FnMut(Progress)>(
        &self,
        corpus: &Corpus,
        enumerator: PairEnumerator,
        collector: &mut Collector<'_, F>,
    ) {
        let queue = TaskQueue::new(enumerator.iter(), self.batch_size);
        let halt = AtomicBool::new(false);
        let (tx, rx) = mpsc::sync_channel(self.workers * self.batch_size);

        thread::scope(|scope| {
            for worker in 0..self.workers {
                let tx = tx.clone();
                let queue = &queue;
                let halt = &halt;
                scope.spawn(move || self.work(worker, corpus, queue, halt, tx));
            }
            drop(tx);

            // Keep draining after a halt so no worker stays blocked on send
            for event in rx {
                if !collector.accept(event) {
                    halt.store(true, Ordering::SeqCst);
                }
            }
        });
    }

    fn work(
        &self,
        worker: usize,
        corpus: &Corpus,
        queue: &TaskQueue,
        halt: &AtomicBool,
        tx: SyncSender<Event>,
    ) {
        let mut processed = 0usize;

        'claim: loop {
            let batch = queue.next_batch();
            if batch.is_empty() {
                break;
            }
            for task in batch {
                if halt.load(Ordering::SeqCst) || self.cancel.is_cancelled() {
                    break 'claim;
                }
                if tx.send(score_task(corpus, task, &self.junk)).is_err() {
                    break 'claim;
                }
                processed += 1;
            }
        }

        tracing::trace!(worker, processed, "Worker finished");
    }
}

/// Shared cursor over the pair sequence
struct TaskQueue {
    pairs: Mutex<Pairs>,
    batch_size: usize,
}

impl TaskQueue {
    fn new(pairs: Pairs, batch_size: usize) -> Self {
        TaskQueue {
            pairs: Mutex::new(pairs),
            batch_size,
        }
    }

    fn next_batch(&self) -> Vec<ComparisonTask> {
        let mut pairs = match self.pairs.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        pairs.by_ref().take(self.batch_size).collect()
    }
}

enum Event {
    Scored(ComparisonResult),
    Failed(ComparisonTask, String),
}

fn score_task(corpus: &Corpus, task: ComparisonTask, junk: &JunkPolicy) -> Event {
    let left = corpus[task.i].content();
    let right = corpus[task.j].content();
    match panic::catch_unwind(AssertUnwindSafe(|| similarity::ratio(left, right, junk))) {
        Ok(score) => Event::Scored(ComparisonResult::new(task, score)),
        Err(payload) => Event::Failed(task, panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "scorer panicked".to_string()
    }
}

/// Consumer side: feeds the selector, counts progress, applies the error policy
struct Collector<'a, F> {
    corpus: &'a Corpus,
    selector: &'a TopKSelector,
    on_error: ScoringErrorPolicy,
    on_progress: F,
    total: usize,
    scored: usize,
    failed: Vec<HadesError>,
    fatal: Option<HadesError>,
}

impl<F: FnMut(Progress)> Collector<'_, F> {
    /// Record one event; returns `false` once the run must stop
    fn accept(&mut self, event: Event) -> bool {
        if self.fatal.is_some() {
            return false;
        }

        match event {
            Event::Scored(result) => {
                self.selector.offer(result);
                self.scored += 1;
            }
            Event::Failed(task, reason) => {
                let err = HadesError::Scoring {
                    i: task.i,
                    j: task.j,
                    left: self.corpus[task.i].id().to_string(),
                    right: self.corpus[task.j].id().to_string(),
                    reason,
                };
                match self.on_error {
                    ScoringErrorPolicy::Abort => {
                        self.fatal = Some(err);
                        return false;
                    }
                    ScoringErrorPolicy::Skip => {
                        tracing::warn!(i = task.i, j = task.j, error = %err, "Skipping pair");
                        self.failed.push(err);
                    }
                }
            }
        }

        (self.on_progress)(Progress {
            completed: self.scored + self.failed.len(),
            total: self.total,
        });
        true
    }
}
