//! Bounded top-K selection of comparison results

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use crate::pairs::ComparisonTask;

/// Score for one pair of documents
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// Similarity in `[0.0, 1.0]`
    pub score: f64,
    pub i: usize,
    pub j: usize,
}

impl ComparisonResult {
    pub fn new(task: ComparisonTask, score: f64) -> Self {
        ComparisonResult {
            score,
            i: task.i,
            j: task.j,
        }
    }

    pub fn task(&self) -> ComparisonTask {
        ComparisonTask::new(self.i, self.j)
    }

    /// Ranking order: higher score first, then lower `(i, j)` first.
    ///
    /// `Ordering::Less` means `self` ranks ahead of `other`.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| (self.i, self.j).cmp(&(other.i, other.j)))
    }
}

/// Heap entry ordered so that better results compare greater
#[derive(Debug, Clone, Copy)]
struct Ranked(ComparisonResult);

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.rank_cmp(&self.0)
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Keeps the K best results offered so far.
///
/// `offer` takes `&self` and may be called from several threads; the heap is
/// guarded by a mutex held only for a single push or replace.
#[derive(Debug)]
pub struct TopKSelector {
    capacity: usize,
    heap: Mutex<BinaryHeap<Reverse<Ranked>>>,
}

impl TopKSelector {
    pub fn new(capacity: usize) -> Self {
        TopKSelector {
            capacity,
            heap: Mutex::new(BinaryHeap::with_capacity(capacity.min(4096))),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of results currently retained
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Offer a result; returns whether it was retained
    pub fn offer(&self, result: ComparisonResult) -> bool {
        if self.capacity == 0 {
            return false;
        }

        let entry = Ranked(result);
        let mut heap = self.lock();
        if heap.len() < self.capacity {
            heap.push(Reverse(entry));
            true
        } else if let Some(mut current_min) = heap.peek_mut() {
            if entry > current_min.0 {
                *current_min = Reverse(entry);
                true
            } else {
                false
            }
        } else {
            false
        }
    }

    /// Drain into a best-first ranking
    pub fn finalize(self) -> RankedMatches {
        let heap = match self.heap.into_inner() {
            Ok(heap) => heap,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Ascending by `Reverse` is descending by rank
        let matches = heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(Ranked(result))| result)
            .collect();
        RankedMatches { matches }
    }

    fn lock(&self) -> MutexGuard<'_, BinaryHeap<Reverse<Ranked>>> {
        // A panic while holding the lock cannot leave the heap half-updated,
        // so a poisoned heap is still usable.
        match self.heap.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// The best results of a run, best first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankedMatches {
    matches: Vec<ComparisonResult>,
}

impl RankedMatches {
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn as_slice(&self) -> &[ComparisonResult] {
        &self.matches
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ComparisonResult> {
        self.matches.iter()
    }

    pub fn into_vec(self) -> Vec<ComparisonResult> {
        self.matches
    }
}

impl<'a> IntoIterator for &'a RankedMatches {
    type Item = &'a ComparisonResult;
    type IntoIter = std::slice::Iter<'a, ComparisonResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}
