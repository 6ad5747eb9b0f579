//! Focused-mode decision queue: a doubly linked list over variables with a
//! monotone "last touched" stamp (spec.md §3 "Links queue", §4.7). The
//! search cursor starts at the most recently bumped variable and walks
//! `prev` until it finds one unassigned; after each decision the cursor is
//! updated to that variable. Also the source of the trail-reuse stamp
//! comparison the focused-mode restart controller needs (spec.md §4.8).

use crate::types::Var;

#[derive(Clone, Debug)]
pub struct Queue {
    next: Vec<Option<Var>>,
    prev: Vec<Option<Var>>,
    stamp: Vec<u64>,
    head: Option<Var>,
    tail: Option<Var>,
    cursor: Option<Var>,
    next_stamp: u64,
}

impl Queue {
    pub fn new(num_vars: usize) -> Self {
        let mut q = Queue {
            next: vec![None; num_vars],
            prev: vec![None; num_vars],
            stamp: vec![0; num_vars],
            head: None,
            tail: None,
            cursor: None,
            next_stamp: 1,
        };
        for i in 0..num_vars {
            q.link_at_tail(Var::from(i));
        }
        q.cursor = q.tail;
        q
    }

    pub fn grow_to(&mut self, num_vars: usize) {
        let old_len = self.next.len();
        if old_len >= num_vars {
            return;
        }
        self.next.resize(num_vars, None);
        self.prev.resize(num_vars, None);
        self.stamp.resize(num_vars, 0);
        for i in old_len..num_vars {
            self.link_at_tail(Var::from(i));
        }
        if self.cursor.is_none() {
            self.cursor = self.tail;
        }
    }

    #[inline]
    pub fn stamp_of(&self, var: Var) -> u64 {
        self.stamp[var.index()]
    }

    fn link_at_tail(&mut self, var: Var) {
        self.prev[var.index()] = self.tail;
        self.next[var.index()] = None;
        if let Some(t) = self.tail {
            self.next[t.index()] = Some(var);
        } else {
            self.head = Some(var);
        }
        self.tail = Some(var);
        self.stamp[var.index()] = self.next_stamp;
        self.next_stamp += 1;
    }

    fn unlink(&mut self, var: Var) {
        let p = self.prev[var.index()];
        let n = self.next[var.index()];
        match p {
            Some(p) => self.next[p.index()] = n,
            None => self.head = n,
        }
        match n {
            Some(n) => self.prev[n.index()] = p,
            None => self.tail = p,
        }
    }

    /// Move `var` to the tail (most recently bumped) with a fresh stamp,
    /// and advance the cursor to it.
    pub fn bump(&mut self, var: Var) {
        self.unlink(var);
        self.link_at_tail(var);
        self.cursor = Some(var);
    }

    /// Called when `var` becomes unassigned (backtrack): if it is more
    /// recent than the current cursor, the cursor moves back to it, since
    /// the search should reconsider it before anything staler.
    pub fn on_unassign(&mut self, var: Var) {
        let reconsider = match self.cursor {
            Some(c) => self.stamp[var.index()] > self.stamp[c.index()],
            None => true,
        };
        if reconsider {
            self.cursor = Some(var);
        }
    }

    /// Walk backward from the cursor until an unassigned variable surfaces.
    pub fn next_decision<F>(&mut self, mut is_assigned: F) -> Option<Var>
    where
        F: FnMut(Var) -> bool,
    {
        let mut cur = self.cursor;
        while let Some(v) = cur {
            if !is_assigned(v) {
                self.cursor = Some(v);
                return Some(v);
            }
            cur = self.prev[v.index()];
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_moves_to_tail_and_cursor() {
        let mut q = Queue::new(4);
        q.bump(Var::from(1u32));
        assert_eq!(q.cursor, Some(Var::from(1u32)));
        assert!(q.stamp_of(Var::from(1u32)) > q.stamp_of(Var::from(0u32)));
    }

    #[test]
    fn next_decision_skips_assigned() {
        let mut q = Queue::new(4);
        q.bump(Var::from(3u32));
        let picked = q.next_decision(|v| v == Var::from(3u32));
        assert_ne!(picked, Some(Var::from(3u32)));
    }

    #[test]
    fn on_unassign_moves_cursor_back_if_more_recent() {
        let mut q = Queue::new(4);
        q.bump(Var::from(0u32));
        q.bump(Var::from(1u32));
        q.cursor = Some(Var::from(0u32));
        q.on_unassign(Var::from(1u32));
        assert_eq!(q.cursor, Some(Var::from(1u32)));
    }
}
