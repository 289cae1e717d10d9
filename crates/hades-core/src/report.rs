//! Report files for the best matches
//!
//! One plain-text file per ranked pair, named by rank (`0.txt`, `1.txt`, ...),
//! holding the score, both identifiers and both original documents.

use std::fs;
use std::path::{Path, PathBuf};

use crate::corpus::{Corpus, Document};
use crate::error::{HadesError, Result};
use crate::rank::{ComparisonResult, RankedMatches};

/// Width of the rule between sections of a report
pub const RULE_WIDTH: usize = 80;

/// Outcome of writing a batch of reports
#[derive(Debug, Default)]
pub struct ReportSummary {
    pub written: Vec<PathBuf>,
    pub failed: Vec<HadesError>,
}

/// Path of the report for `rank` inside `dir`
pub fn report_path(dir: &Path, rank: usize) -> PathBuf {
    dir.join(format!("{rank}.txt"))
}

/// Render one report.
///
/// The score is printed in shortest round-trip form (`0.5`, `1.0`).
pub fn render_report(score: f64, left: &Document, right: &Document) -> String {
    let separator = format!("\n{}\n", "-".repeat(RULE_WIDTH));
    let mut out = String::with_capacity(
        left.original().len() + right.original().len() + 2 * separator.len() + 128,
    );
    out.push_str(&format!("Match ratio: {score:?}\n"));
    out.push_str(&format!("File 0: {}\n", left.id()));
    out.push_str(&format!("File 1: {}\n", right.id()));
    out.push_str(&separator);
    out.push_str(left.original());
    out.push_str(&separator);
    out.push_str(right.original());
    out
}

/// Writes ranked matches as report files
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ReportWriter { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write one report per ranked match.
    ///
    /// Creating the directory is fatal; a failure on a single report is
    /// logged and collected, and the remaining ranks are still written.
    #[tracing::instrument(skip_all, fields(dir = %self.dir.display(), count = ranked.len()))]
    pub fn write_all(&self, ranked: &RankedMatches, corpus: &Corpus) -> Result<ReportSummary> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            HadesError::io_operation("create reports directory", self.dir.display(), e)
        })?;

        let mut summary = ReportSummary::default();
        for (rank, result) in ranked.iter().enumerate() {
            match self.write_one(rank, result, corpus) {
                Ok(path) => summary.written.push(path),
                Err(e) => {
                    tracing::warn!(rank, i = result.i, j = result.j, error = %e, "Skipping report");
                    summary.failed.push(e);
                }
            }
        }

        tracing::info!(
            written = summary.written.len(),
            failed = summary.failed.len(),
            "Reports written"
        );
        Ok(summary)
    }

    fn write_one(&self, rank: usize, result: &ComparisonResult, corpus: &Corpus) -> Result<PathBuf> {
        let path = report_path(&self.dir, rank);
        let (Some(left), Some(right)) = (corpus.get(result.i), corpus.get(result.j)) else {
            return Err(HadesError::ReportWrite {
                rank,
                path,
                reason: format!("pair ({}, {}) is outside the corpus", result.i, result.j),
            });
        };

        fs::write(&path, render_report(result.score, left, right)).map_err(|e| {
            HadesError::ReportWrite {
                rank,
                path: path.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::Normalizer;
    use crate::rank::TopKSelector;
    use tempfile::tempdir;

    fn two_docs() -> Corpus {
        Corpus::from_texts(
            [("f1.txt", "first line\nsecond line\n"), ("f2.txt", "other\ncontent")],
            &Normalizer::default(),
        )
    }

    #[test]
    fn test_render_report_layout() {
        let corpus = two_docs();
        let report = render_report(0.5, &corpus[0], &corpus[1]);
        let rule = "-".repeat(80);

        assert!(report.contains("Match ratio: 0.5"));
        assert!(report.contains("File 0: f1.txt"));
        assert!(report.contains("File 1: f2.txt"));
        assert_eq!(
            report,
            format!(
                "Match ratio: 0.5\nFile 0: f1.txt\nFile 1: f2.txt\n\n{rule}\nfirst line\nsecond line\n\n{rule}\nother\ncontent"
            )
        );
    }

    #[test]
    fn test_render_report_whole_score() {
        let corpus = two_docs();
        assert!(render_report(1.0, &corpus[0], &corpus[1]).starts_with("Match ratio: 1.0\n"));
    }

    #[test]
    fn test_write_all_names_files_by_rank() {
        let dir = tempdir().unwrap();
        let reports = dir.path().join("out/reports");
        let corpus = Corpus::from_texts(
            [("a", "abc"), ("b", "abc"), ("c", "xyz")],
            &Normalizer::default(),
        );
        let selector = TopKSelector::new(2);
        selector.offer(ComparisonResult { score: 1.0, i: 0, j: 1 });
        selector.offer(ComparisonResult { score: 0.0, i: 0, j: 2 });
        let ranked = selector.finalize();

        let summary = ReportWriter::new(&reports).write_all(&ranked, &corpus).unwrap();

        assert_eq!(summary.written, vec![reports.join("0.txt"), reports.join("1.txt")]);
        assert!(summary.failed.is_empty());
        let first = fs::read_to_string(reports.join("0.txt")).unwrap();
        assert!(first.starts_with("Match ratio: 1.0\nFile 0: a\nFile 1: b\n"));
    }

    #[test]
    fn test_write_all_is_idempotent_on_directory() {
        let dir = tempdir().unwrap();
        let corpus = two_docs();
        let writer = ReportWriter::new(dir.path());
        let ranked = RankedMatches::default();

        writer.write_all(&ranked, &corpus).unwrap();
        writer.write_all(&ranked, &corpus).unwrap();
    }

    #[test]
    fn test_single_failure_does_not_stop_other_reports() {
        let dir = tempdir().unwrap();
        // A directory squatting on the first report's name makes that write fail
        fs::create_dir_all(dir.path().join("0.txt")).unwrap();

        let corpus = Corpus::from_texts(
            [("a", "abc"), ("b", "abd"), ("c", "abe")],
            &Normalizer::default(),
        );
        let selector = TopKSelector::new(2);
        selector.offer(ComparisonResult { score: 0.9, i: 0, j: 1 });
        selector.offer(ComparisonResult { score: 0.8, i: 1, j: 2 });

        let summary = ReportWriter::new(dir.path())
            .write_all(&selector.finalize(), &corpus)
            .unwrap();

        assert_eq!(summary.written, vec![dir.path().join("1.txt")]);
        assert_eq!(summary.failed.len(), 1);
        assert!(matches!(summary.failed[0], HadesError::ReportWrite { rank: 0, .. }));
    }
}
