//! Random decision bursts (spec.md §4.7): fired in bursts of length
//! proportional to `log(N_burst)`, triggered on a conflict budget.
//! `on_conflict` is driven once per conflict from
//! `solver::search::Solver::periodic_maintenance`, using `randecstable`/
//! `randecfocused` to size the burst for the active mode. Enriched from
//! `plaans-aries` (the example pack's only repo that pulls in `rand`)
//! since neither the teacher nor the rest of the spec's search core needs
//! true randomness anywhere else.

use rand::{rngs::SmallRng, Rng, SeedableRng};

#[derive(Debug)]
pub struct RandomBursts {
    rng: SmallRng,
    remaining: usize,
    next_burst_at_conflict: usize,
    /// Base burst length scale, `length ~ base * log(n_burst)` (spec.md §4.7).
    base_length: f64,
}

impl RandomBursts {
    pub fn new(seed: u64, base_length: f64) -> Self {
        RandomBursts {
            rng: SmallRng::seed_from_u64(seed),
            remaining: 0,
            next_burst_at_conflict: 0,
            base_length,
        }
    }

    /// Call once per conflict; begins a new burst when the conflict budget
    /// is reached. `n_burst` scales the burst's length logarithmically and
    /// the interval before the next one.
    pub fn on_conflict(&mut self, conflicts: usize, n_burst: usize, period: usize) {
        if self.remaining == 0 && conflicts >= self.next_burst_at_conflict {
            let n = n_burst.max(2) as f64;
            self.remaining = (self.base_length * n.ln()).round().max(1.0) as usize;
            self.next_burst_at_conflict = conflicts + period;
        }
    }

    /// Consume one slot of the current burst, if any remain.
    pub fn take(&mut self) -> bool {
        if self.remaining > 0 {
            self.remaining -= 1;
            true
        } else {
            false
        }
    }

    /// Uniformly pick an active variable index in `[0, num_vars)`.
    pub fn pick_index(&mut self, num_vars: usize) -> usize {
        self.rng.random_range(0..num_vars.max(1))
    }

    pub fn pick_phase(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_grants_exactly_its_length() {
        let mut rb = RandomBursts::new(42, 2.0);
        rb.on_conflict(0, 8, 100);
        let mut taken = 0;
        while rb.take() {
            taken += 1;
        }
        assert!(taken > 0);
        assert!(!rb.take());
    }

    #[test]
    fn pick_index_stays_in_range() {
        let mut rb = RandomBursts::new(7, 1.0);
        for _ in 0..50 {
            assert!(rb.pick_index(10) < 10);
        }
    }
}
