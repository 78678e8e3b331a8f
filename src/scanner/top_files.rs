use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::result::RankedEntry;

/// Bounded set of the largest files offered so far.
///
/// Memory stays proportional to the capacity no matter how many files a scan
/// visits. On exact size ties the file offered first is kept.
#[derive(Debug)]
pub struct TopFiles {
    capacity: usize,
    heap: BinaryHeap<Reverse<Candidate>>,
    offered: u64,
}

#[derive(Debug, PartialEq, Eq)]
struct Candidate {
    size: u64,
    seq: u64,
    path: String,
}

// Smaller size is lesser; among equal sizes the later arrival is lesser, so
// the heap minimum is the entry to evict first.
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.size
            .cmp(&other.size)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl TopFiles {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity),
            offered: 0,
        }
    }

    pub fn offer(&mut self, size: u64, path: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }

        let seq = self.offered;
        self.offered += 1;

        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(Candidate {
                size,
                seq,
                path: path.into(),
            }));
            return;
        }

        if let Some(mut min) = self.heap.peek_mut() {
            if size > min.0.size {
                *min = Reverse(Candidate {
                    size,
                    seq,
                    path: path.into(),
                });
            }
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Smallest size currently held, if any.
    pub fn min_size(&self) -> Option<u64> {
        self.heap.peek().map(|min| min.0.size)
    }

    /// Held files, largest first; equal sizes in the order they were offered.
    pub fn snapshot(&self) -> Vec<RankedEntry> {
        let mut held: Vec<&Candidate> = self.heap.iter().map(|c| &c.0).collect();
        held.sort_unstable_by(|a, b| b.cmp(a));
        held.into_iter()
            .map(|c| RankedEntry::new(c.path.clone(), c.size))
            .collect()
    }

    pub fn into_snapshot(self) -> Vec<RankedEntry> {
        // into_sorted_vec is ascending over Reverse, i.e. largest Candidate first
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(c)| RankedEntry::new(c.path, c.size))
            .collect()
    }
}
