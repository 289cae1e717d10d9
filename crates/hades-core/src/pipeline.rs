//! End-to-end plagiarism check: load, compare, rank

use std::time::Instant;

use crate::config::Configuration;
use crate::corpus::{load_corpus, Corpus, LoadedCorpus};
use crate::error::{HadesError, Result};
use crate::normalize::Normalizer;
use crate::rank::{RankedMatches, TopKSelector};
use crate::scheduler::{CancellationToken, ComparisonScheduler, Progress};
use crate::trace_time;

/// Everything a finished (or cancelled) check produced
#[derive(Debug)]
pub struct CheckOutcome {
    pub corpus: Corpus,
    pub ranked: RankedMatches,
    /// `N * (N - 1) / 2`
    pub total_pairs: usize,
    /// Pairs processed before the run ended
    pub completed_pairs: usize,
    /// Cancelled before every pair was processed
    pub truncated: bool,
    /// Files left out of the corpus
    pub skipped_documents: Vec<HadesError>,
    /// Pairs whose scoring failed under the skip policy
    pub skipped_pairs: Vec<HadesError>,
}

impl CheckOutcome {
    /// Every recoverable problem from the run, documents first
    pub fn warnings(&self) -> impl Iterator<Item = &HadesError> {
        self.skipped_documents.iter().chain(self.skipped_pairs.iter())
    }
}

/// Runs a plagiarism check for one configuration
#[derive(Debug)]
pub struct PlagiarismCheck<'a> {
    config: &'a Configuration,
    cancel: CancellationToken,
}

impl<'a> PlagiarismCheck<'a> {
    pub fn new(config: &'a Configuration) -> Self {
        PlagiarismCheck {
            config,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.config.line_breaks)
    }

    /// Walk `dir_name` and build the corpus.
    ///
    /// An empty corpus is an error; skipped files are returned alongside.
    pub fn load(&self) -> Result<LoadedCorpus> {
        let loaded = load_corpus(
            &self.config.dir_name,
            &self.config.file_extensions,
            &self.normalizer(),
        )?;
        if loaded.corpus.is_empty() {
            return Err(HadesError::EmptyCorpus {
                root: self.config.dir_name.clone(),
            });
        }
        Ok(loaded)
    }

    /// Load the corpus and compare every pair.
    ///
    /// `on_start` is called once the corpus is loaded, before any pair is
    /// scored; `on_progress` after every processed pair.
    #[tracing::instrument(skip_all, fields(dir = %self.config.dir_name.display()))]
    pub fn run<S, F>(&self, on_start: S, on_progress: F) -> Result<CheckOutcome>
    where
        S: FnOnce(&Corpus),
        F: FnMut(Progress),
    {
        let LoadedCorpus { corpus, skipped } = self.load()?;
        on_start(&corpus);
        self.compare(corpus, skipped, on_progress)
    }

    /// Compare every pair of an already loaded corpus
    pub fn compare<F>(
        &self,
        corpus: Corpus,
        skipped_documents: Vec<HadesError>,
        on_progress: F,
    ) -> Result<CheckOutcome>
    where
        F: FnMut(Progress),
    {
        let start = Instant::now();
        tracing::info!(
            files = corpus.len(),
            combinations = corpus.combinations(),
            processes = self.config.number_of_processes,
            "Comparing files"
        );

        let selector = TopKSelector::new(self.config.number_of_top_results);
        let scheduler =
            ComparisonScheduler::from_config(self.config).with_cancellation(self.cancel.clone());
        let outcome = scheduler.run(&corpus, &selector, on_progress)?;
        let ranked = selector.finalize();

        trace_time!(start, "plagiarism_check", ranked = ranked.len());

        Ok(CheckOutcome {
            corpus,
            ranked,
            total_pairs: outcome.total,
            completed_pairs: outcome.completed(),
            truncated: outcome.truncated,
            skipped_documents,
            skipped_pairs: outcome.failed,
        })
    }
}
