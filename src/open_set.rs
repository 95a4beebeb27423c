//! The open set of A*: a binary min-heap of [Node]s keyed by `f`, with a position index so that
//! membership tests and decrease-key run without scanning the heap.
use std::cmp::Ordering;

use fxhash::FxHashMap;
use grid_util::point::Point;

use crate::Node;

struct HeapSlot {
    node: Node,
    /// Insertion sequence number, the final tie-breaker.
    seq: u64,
}

impl HeapSlot {
    /// Orders per estimated total cost first, then favors smaller heuristic values (nodes that
    /// are further along), then earlier insertion.
    fn cmp_priority(&self, other: &Self) -> Ordering {
        self.node
            .f
            .total_cmp(&other.node.f)
            .then_with(|| self.node.h.total_cmp(&other.node.h))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

#[derive(Default)]
pub struct OpenSet {
    heap: Vec<HeapSlot>,
    index: FxHashMap<Point, usize>,
    next_seq: u64,
}

impl OpenSet {
    pub fn new() -> OpenSet {
        OpenSet::default()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, position: &Point) -> bool {
        self.index.contains_key(position)
    }

    /// The stored entry for `position`, if it is queued.
    pub fn get(&self, position: &Point) -> Option<&Node> {
        self.index.get(position).map(|&i| &self.heap[i].node)
    }

    pub fn peek_min(&self) -> Option<&Node> {
        self.heap.first().map(|slot| &slot.node)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.index.clear();
        self.next_seq = 0;
    }

    /// Inserts `node` if its position is not queued yet. If it is, and `node.f` is strictly lower
    /// than the stored `f`, the stored search state is overwritten and the entry moved up.
    /// Otherwise nothing happens. Returns whether the open set changed.
    pub fn insert_or_improve(&mut self, node: Node) -> bool {
        match self.index.get(&node.position) {
            Some(&i) => {
                let stored = &mut self.heap[i].node;
                if node.f < stored.f {
                    stored.g = node.g;
                    stored.h = node.h;
                    stored.f = node.f;
                    stored.predecessor = node.predecessor;
                    self.sift_up(i);
                    true
                } else {
                    false
                }
            }
            None => {
                let i = self.heap.len();
                self.index.insert(node.position, i);
                self.heap.push(HeapSlot {
                    node,
                    seq: self.next_seq,
                });
                self.next_seq += 1;
                self.sift_up(i);
                true
            }
        }
    }

    /// Removes and returns the entry with the smallest `f`.
    pub fn extract_min(&mut self) -> Option<Node> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let slot = self.heap.pop()?;
        self.index.remove(&slot.node.position);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(slot.node)
    }

    /// Sets the `f` of a queued entry and restores heap order in whichever direction is needed.
    /// Returns false if `position` is not queued.
    pub fn update_priority(&mut self, position: &Point, f: f64) -> bool {
        match self.index.get(position) {
            Some(&i) => {
                self.heap[i].node.f = f;
                let i = self.sift_up(i);
                self.sift_down(i);
                true
            }
            None => false,
        }
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.heap[a].cmp_priority(&self.heap[b]) == Ordering::Less
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.index.insert(self.heap[a].node.position, a);
        self.index.insert(self.heap[b].node.position, b);
    }

    fn sift_up(&mut self, mut i: usize) -> usize {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.less(i, parent) {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
        i
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < n && self.less(left, smallest) {
                smallest = left;
            }
            if right < n && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }
}
