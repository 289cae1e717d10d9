//! Progress bar for the pairwise comparison

use std::io::{self, Write};
use std::time::Instant;

use hades_core::scheduler::Progress;

const BAR_WIDTH: usize = 30;

/// Redraws a single stderr line whenever the whole-percent value changes
pub struct ProgressTracker {
    enabled: bool,
    started: Option<Instant>,
    last_percent: Option<usize>,
    drawn: bool,
}

impl ProgressTracker {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            started: None,
            last_percent: None,
            drawn: false,
        }
    }

    pub fn update(&mut self, progress: Progress) {
        if !self.enabled || progress.total == 0 {
            return;
        }

        let started = *self.started.get_or_insert_with(Instant::now);
        let percent = progress.completed * 100 / progress.total;
        if self.last_percent == Some(percent) {
            return;
        }
        self.last_percent = Some(percent);

        let elapsed = started.elapsed().as_secs_f64();
        let pairs_per_sec = if elapsed > 0.0 {
            progress.completed as f64 / elapsed
        } else {
            0.0
        };
        let remaining = progress.total - progress.completed;
        let eta = if pairs_per_sec > 0.0 {
            format_eta(remaining as f64 / pairs_per_sec)
        } else {
            "---".to_string()
        };

        let filled = (BAR_WIDTH * percent / 100).min(BAR_WIDTH);
        let bar = "█".repeat(filled) + &"░".repeat(BAR_WIDTH - filled);

        let mut stderr = io::stderr().lock();
        let _ = write!(
            stderr,
            "\r  [{}] {:>3}% ({} / {}) {:.0} pairs/sec  ETA: {:<8}",
            bar, percent, progress.completed, progress.total, pairs_per_sec, eta
        );
        let _ = stderr.flush();
        self.drawn = true;
    }

    /// End the progress line so later output starts on a fresh line
    pub fn finish(&mut self) {
        if self.drawn {
            eprintln!();
            self.drawn = false;
        }
    }
}

fn format_eta(secs: f64) -> String {
    if secs < 1.0 {
        "1s".to_string()
    } else if secs < 60.0 {
        format!("{:.0}s", secs.ceil())
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_eta() {
        assert_eq!(format_eta(0.2), "1s");
        assert_eq!(format_eta(41.3), "42s");
        assert_eq!(format_eta(125.0), "2m 5s");
    }

    #[test]
    fn test_redraws_only_on_percent_change() {
        let mut tracker = ProgressTracker::new(true);
        tracker.update(Progress { completed: 1, total: 1000 });
        assert_eq!(tracker.last_percent, Some(0));
        tracker.update(Progress { completed: 9, total: 1000 });
        assert_eq!(tracker.last_percent, Some(0));
        tracker.update(Progress { completed: 10, total: 1000 });
        assert_eq!(tracker.last_percent, Some(1));
        tracker.finish();
        assert!(!tracker.drawn);
    }

    #[test]
    fn test_disabled_tracker_draws_nothing() {
        let mut tracker = ProgressTracker::new(false);
        tracker.update(Progress { completed: 5, total: 10 });
        assert!(!tracker.drawn);
        assert_eq!(tracker.last_percent, None);
    }
}
