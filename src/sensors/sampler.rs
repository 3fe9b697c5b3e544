//! Fixed-capacity windowed mean.
//!
//! Each probe owns one [`WindowedSampler`]. The mean is recomputed from the
//! buffer on every `record`, never maintained incrementally, so it is always
//! exactly the average of the slots currently in the window. Before the
//! window fills the mean covers only the samples seen so far.

#[derive(Debug, Clone)]
pub struct WindowedSampler<const N: usize> {
    ring: [f64; N],
    cursor: usize,
    filled: bool,
    last: f64,
    mean: f64,
}

impl<const N: usize> Default for WindowedSampler<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> WindowedSampler<N> {
    pub const fn new() -> Self {
        Self {
            ring: [0.0; N],
            cursor: 0,
            filled: false,
            last: 0.0,
            mean: 0.0,
        }
    }

    pub fn record(&mut self, value: f64) {
        self.last = value;
        self.ring[self.cursor] = value;
        self.cursor = (self.cursor + 1) % N;
        if self.cursor == 0 {
            self.filled = true;
        }

        let window = &self.ring[..self.len()];
        self.mean = window.iter().sum::<f64>() / window.len() as f64;
    }

    /// Most recent raw value; `0.0` before the first record.
    pub fn last_value(&self) -> f64 {
        self.last
    }

    /// Mean of the current window; `0.0` before the first record.
    pub fn average_value(&self) -> f64 {
        self.mean
    }

    /// Number of samples in the window.
    pub fn len(&self) -> usize {
        if self.filled { N } else { self.cursor }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }
}
