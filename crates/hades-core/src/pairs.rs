//! Enumeration of unordered document pairs

use std::iter::FusedIterator;

/// A pair of corpus indices to compare, always with `i < j`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComparisonTask {
    pub i: usize,
    pub j: usize,
}

impl ComparisonTask {
    pub fn new(i: usize, j: usize) -> Self {
        debug_assert!(i < j, "comparison task requires i < j");
        ComparisonTask { i, j }
    }
}

/// Number of unordered pairs over `n` items
pub fn combinations(n: usize) -> usize {
    if n < 2 {
        0
    } else {
        n * (n - 1) / 2
    }
}

/// Restartable source of every `(i, j)` pair with `0 <= i < j < n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairEnumerator {
    n: usize,
}

impl PairEnumerator {
    pub fn new(n: usize) -> Self {
        PairEnumerator { n }
    }

    /// Total number of pairs produced by a full iteration
    pub fn total(&self) -> usize {
        combinations(self.n)
    }

    /// A fresh iterator in lexicographic `(i, j)` order
    pub fn iter(&self) -> Pairs {
        Pairs {
            n: self.n,
            i: 0,
            j: 1,
            remaining: self.total(),
        }
    }
}

impl IntoIterator for PairEnumerator {
    type Item = ComparisonTask;
    type IntoIter = Pairs;

    fn into_iter(self) -> Pairs {
        self.iter()
    }
}

impl IntoIterator for &PairEnumerator {
    type Item = ComparisonTask;
    type IntoIter = Pairs;

    fn into_iter(self) -> Pairs {
        self.iter()
    }
}

/// Iterator over the pairs of a [`PairEnumerator`]
#[derive(Debug, Clone)]
pub struct Pairs {
    n: usize,
    i: usize,
    j: usize,
    remaining: usize,
}

impl Iterator for Pairs {
    type Item = ComparisonTask;

    fn next(&mut self) -> Option<ComparisonTask> {
        if self.remaining == 0 {
            return None;
        }

        let task = ComparisonTask::new(self.i, self.j);
        self.remaining -= 1;

        self.j += 1;
        if self.j == self.n {
            self.i += 1;
            self.j = self.i + 1;
        }

        Some(task)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Pairs {}

impl FusedIterator for Pairs {}
