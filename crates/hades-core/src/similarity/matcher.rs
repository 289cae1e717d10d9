//! Block matcher in the Ratcliff/Obershelp style
//!
//! Finds the longest common block of two sequences, then recurses into the
//! unmatched regions on either side. Characters that are junk, or that are
//! too common in a long `b`, never seed a block but can still extend one.

use std::collections::{HashMap, HashSet};

use super::JunkPolicy;

/// `b` must be at least this long before autojunk kicks in
const AUTOJUNK_MIN_LEN: usize = 200;

/// A matching block: `a[a..a + size] == b[b..b + size]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Match {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

/// Compares two sequences with a fixed orientation.
///
/// All preprocessing happens on `b`, so the result can differ when the
/// operands are swapped; [`super::ratio`] hides that by ordering them.
#[derive(Debug)]
pub struct SequenceMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    b2j: HashMap<char, Vec<usize>>,
    bjunk: HashSet<char>,
    bpopular: HashSet<char>,
}

impl<'a> SequenceMatcher<'a> {
    pub fn new(a: &'a [char], b: &'a [char], junk: &JunkPolicy) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        let mut bjunk = HashSet::new();
        if junk.is_enabled() {
            bjunk.extend(b2j.keys().copied().filter(|&c| junk.is_junk(c)));
            for c in &bjunk {
                b2j.remove(c);
            }
        }

        let mut bpopular = HashSet::new();
        if b.len() >= AUTOJUNK_MIN_LEN {
            let ntest = b.len() / 100 + 1;
            bpopular.extend(
                b2j.iter()
                    .filter(|(_, positions)| positions.len() > ntest)
                    .map(|(&c, _)| c),
            );
            for c in &bpopular {
                b2j.remove(c);
            }
        }

        SequenceMatcher {
            a,
            b,
            b2j,
            bjunk,
            bpopular,
        }
    }

    /// Characters of `b` classified as junk
    pub fn junk(&self) -> &HashSet<char> {
        &self.bjunk
    }

    /// Characters of `b` dropped by autojunk
    pub fn popular(&self) -> &HashSet<char> {
        &self.bpopular
    }

    fn is_bjunk(&self, c: char) -> bool {
        self.bjunk.contains(&c)
    }

    /// Longest matching block within `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Ties go to the block starting earliest in `a`, then earliest in `b`.
    /// The block is grown first by equal non-junk neighbours, then by equal
    /// junk neighbours.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let (a, b) = (self.a, self.b);
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0usize);

        // j2len[j] is the length of the match ending at a[i - 1] and b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        let mut newj2len: HashMap<usize, usize> = HashMap::new();

        for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
            newj2len.clear();
            if let Some(positions) = self.b2j.get(c) {
                let first = positions.partition_point(|&j| j < blo);
                for &j in &positions[first..] {
                    if j >= bhi {
                        break;
                    }
                    let prev = if j > 0 {
                        j2len.get(&(j - 1)).copied().unwrap_or(0)
                    } else {
                        0
                    };
                    let k = prev + 1;
                    newj2len.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            std::mem::swap(&mut j2len, &mut newj2len);
        }

        while besti > alo
            && bestj > blo
            && !self.is_bjunk(b[bestj - 1])
            && a[besti - 1] == b[bestj - 1]
        {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && !self.is_bjunk(b[bestj + bestsize])
            && a[besti + bestsize] == b[bestj + bestsize]
        {
            bestsize += 1;
        }

        while besti > alo
            && bestj > blo
            && self.is_bjunk(b[bestj - 1])
            && a[besti - 1] == b[bestj - 1]
        {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && self.is_bjunk(b[bestj + bestsize])
            && a[besti + bestsize] == b[bestj + bestsize]
        {
            bestsize += 1;
        }

        Match {
            a: besti,
            b: bestj,
            size: bestsize,
        }
    }

    /// Every matching block, sorted, with adjacent blocks merged.
    ///
    /// Unlike some implementations no zero-size sentinel is appended.
    pub fn matching_blocks(&self) -> Vec<Match> {
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            blocks.push(m);
            if alo < m.a && blo < m.b {
                queue.push((alo, m.a, blo, m.b));
            }
            if m.a + m.size < ahi && m.b + m.size < bhi {
                queue.push((m.a + m.size, ahi, m.b + m.size, bhi));
            }
        }
        blocks.sort_unstable();

        let mut collapsed: Vec<Match> = Vec::with_capacity(blocks.len());
        for m in blocks {
            match collapsed.last_mut() {
                Some(last) if last.a + last.size == m.a && last.b + last.size == m.b => {
                    last.size += m.size;
                }
                _ => collapsed.push(m),
            }
        }
        collapsed
    }

    /// Total number of matched characters
    pub fn matched_len(&self) -> usize {
        self.matching_blocks().iter().map(|m| m.size).sum()
    }

    /// `2 * M / (len(a) + len(b))`, or `1.0` when both are empty
    pub fn ratio(&self) -> f64 {
        calculate_ratio(self.matched_len(), self.a.len() + self.b.len())
    }
}

pub(crate) fn calculate_ratio(matches: usize, length: usize) -> f64 {
    if length == 0 {
        1.0
    } else {
        2.0 * matches as f64 / length as f64
    }
}
