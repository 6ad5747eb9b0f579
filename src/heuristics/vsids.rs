//! Stable-mode decision heap: a max-heap over active, currently unassigned
//! variables keyed by VSIDS score (spec.md §3 "VSIDS heap", §4.7). Grounded
//! on the teacher's activity-heap pattern, generalized to the spec's
//! "exactly one structure consulted per decision, per current mode" split
//! between this heap and the focused-mode [`super::queue::Queue`].
//!
//! Uses the standard increasing-bump-increment trick instead of literally
//! rescaling every score on decay (spec.md §4.6 "decay all scores" is
//! behaviorally equivalent to scaling the incoming bump instead of the
//! whole array, and avoids an O(n) pass per conflict).

use crate::types::Var;

const RESCALE_THRESHOLD: f64 = 1e100;

#[derive(Clone, Debug)]
pub struct VsidsHeap {
    heap: Vec<Var>,
    pos: Vec<Option<usize>>,
    score: Vec<f64>,
    bump_inc: f64,
    decay: f64,
}

impl VsidsHeap {
    pub fn new(num_vars: usize, decay: f64) -> Self {
        let mut h = VsidsHeap {
            heap: Vec::with_capacity(num_vars),
            pos: vec![None; num_vars],
            score: vec![0.0; num_vars],
            bump_inc: 1.0,
            decay,
        };
        for i in 0..num_vars {
            h.insert(Var::from(i));
        }
        h
    }

    pub fn grow_to(&mut self, num_vars: usize) {
        if self.pos.len() < num_vars {
            self.pos.resize(num_vars, None);
            self.score.resize(num_vars, 0.0);
        }
        for i in 0..num_vars {
            if self.pos[i].is_none() {
                self.insert(Var::from(i));
            }
        }
    }

    #[inline]
    pub fn score_of(&self, var: Var) -> f64 {
        self.score[var.index()]
    }

    #[inline]
    pub fn contains(&self, var: Var) -> bool {
        self.pos[var.index()].is_some()
    }

    /// Bump a variable's score, applying the current increment, and
    /// rescale everything down if scores risk overflowing (spec.md §4.6).
    pub fn bump(&mut self, var: Var) {
        self.score[var.index()] += self.bump_inc;
        if self.score[var.index()] > RESCALE_THRESHOLD {
            for s in self.score.iter_mut() {
                *s *= 1.0 / RESCALE_THRESHOLD;
            }
            self.bump_inc *= 1.0 / RESCALE_THRESHOLD;
        }
        if let Some(i) = self.pos[var.index()] {
            self.sift_up(i);
        }
    }

    /// Decay all scores (spec.md §4.6), implemented as growing the
    /// increment applied by future bumps.
    pub fn decay_all(&mut self) {
        self.bump_inc *= 1.0 / self.decay;
    }

    pub fn insert(&mut self, var: Var) {
        if self.pos[var.index()].is_some() {
            return;
        }
        let i = self.heap.len();
        self.heap.push(var);
        self.pos[var.index()] = Some(i);
        self.sift_up(i);
    }

    /// Remove and return the highest-scored variable, or `None` if empty.
    pub fn pop_max(&mut self) -> Option<Var> {
        if self.heap.is_empty() {
            return None;
        }
        let top = self.heap[0];
        let last = self.heap.pop().unwrap();
        self.pos[top.index()] = None;
        if !self.heap.is_empty() {
            self.heap[0] = last;
            self.pos[last.index()] = Some(0);
            self.sift_down(0);
        }
        Some(top)
    }

    /// Pop assigned variables off the top until an unassigned one surfaces
    /// (spec.md §4.7 "the heap is drained of assigned variables until the
    /// top is unassigned"), returning it without removing it — the caller
    /// is expected to assign it and then call [`VsidsHeap::pop_max`] or
    /// simply treat it as consumed via the next [`VsidsHeap::remove`] call.
    pub fn next_unassigned<F>(&mut self, mut is_assigned: F) -> Option<Var>
    where
        F: FnMut(Var) -> bool,
    {
        while let Some(&top) = self.heap.first() {
            if !is_assigned(top) {
                return Some(top);
            }
            self.pop_max();
        }
        None
    }

    /// Remove a specific (now-assigned) variable from the heap.
    pub fn remove(&mut self, var: Var) {
        let Some(i) = self.pos[var.index()] else { return };
        let last_idx = self.heap.len() - 1;
        self.heap.swap(i, last_idx);
        self.pos[self.heap[i].index()] = Some(i);
        self.heap.pop();
        self.pos[var.index()] = None;
        if i < self.heap.len() {
            self.sift_up(i);
            self.sift_down(i);
        }
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.score[self.heap[parent].index()] >= self.score[self.heap[i].index()] {
                break;
            }
            self.heap.swap(parent, i);
            self.pos[self.heap[i].index()] = Some(i);
            self.pos[self.heap[parent].index()] = Some(parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let (l, r) = (2 * i + 1, 2 * i + 2);
            let mut largest = i;
            if l < n && self.score[self.heap[l].index()] > self.score[self.heap[largest].index()] {
                largest = l;
            }
            if r < n && self.score[self.heap[r].index()] > self.score[self.heap[largest].index()] {
                largest = r;
            }
            if largest == i {
                break;
            }
            self.heap.swap(i, largest);
            self.pos[self.heap[i].index()] = Some(i);
            self.pos[self.heap[largest].index()] = Some(largest);
            i = largest;
        }
    }
}
