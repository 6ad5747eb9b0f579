//! Exponential moving averages, used by the restart controller's glue
//! tracking and by the reducer's adaptive-overhead signal.

/// A single exponential moving average with a fixed smoothing window.
#[derive(Clone, Debug)]
pub struct Ema {
    value: f64,
    sca: f64,
}

impl Ema {
    pub fn new(window: usize) -> Self {
        Ema {
            value: 0.0,
            sca: 1.0 / (window.max(1) as f64),
        }
    }

    #[inline]
    pub fn get(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn update(&mut self, x: f64) {
        self.value = self.sca * x + (1.0 - self.sca) * self.value;
    }

    pub fn reset_to(&mut self, x: f64) {
        self.value = x;
    }
}

/// A pair of exponential moving averages (fast/slow) over the same signal,
/// used for the focused-mode glue-based restart trigger (`fast_glue`,
/// `slow_glue` in spec.md §4.8) and for the assignment-trend blocking test.
#[derive(Clone, Debug)]
pub struct Ema2 {
    fast: f64,
    slow: f64,
    fe: f64,
    se: f64,
}

impl Ema2 {
    pub fn new(fast_window: usize, slow_window: usize) -> Self {
        Ema2 {
            fast: 0.0,
            slow: 0.0,
            fe: 1.0 / (fast_window.max(1) as f64),
            se: 1.0 / (slow_window.max(1) as f64),
        }
    }

    #[inline]
    pub fn fast(&self) -> f64 {
        self.fast
    }

    #[inline]
    pub fn slow(&self) -> f64 {
        self.slow
    }

    #[inline]
    pub fn update(&mut self, x: f64) {
        self.fast = self.fe * x + (1.0 - self.fe) * self.fast;
        self.slow = self.se * x + (1.0 - self.se) * self.slow;
    }

    /// Ratio of fast over slow; `< 1` means the recent trend is better
    /// (lower) than the long-run trend.
    #[inline]
    pub fn trend(&self) -> f64 {
        if self.slow == 0.0 {
            1.0
        } else {
            self.fast / self.slow
        }
    }

    pub fn reset_to(&mut self, x: f64) {
        self.fast = x;
        self.slow = x;
    }
}
