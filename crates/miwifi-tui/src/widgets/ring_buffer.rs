//! Bounded rolling window of recent samples for time-series plots.

use std::collections::VecDeque;

/// Fixed-capacity buffer that drops its oldest sample when full.
///
/// Capacity follows the plot width, so it changes on resize.
#[derive(Debug, Clone, PartialEq)]
pub struct RingBuffer<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Capacity used until the first resize reports a real width.
pub const DEFAULT_CAPACITY: usize = 100;

impl<T> RingBuffer<T> {
    /// Create an empty buffer. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest one if the buffer is full.
    pub fn push(&mut self, value: T) {
        while self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(value);
    }

    /// Change the capacity, dropping the oldest samples if it shrinks.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.data.len() > self.capacity {
            self.data.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Most recent sample.
    pub fn latest(&self) -> Option<&T> {
        self.data.back()
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Extend<T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl RingBuffer<f64> {
    /// Largest sample, or `0.0` when empty.
    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(0.0, f64::max)
    }

    /// Chart points with the newest sample at `x = capacity - 1`, so a
    /// partly filled buffer grows in from the right edge.
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn points(&self) -> Vec<(f64, f64)> {
        let offset = self.capacity.saturating_sub(self.data.len());
        self.data
            .iter()
            .enumerate()
            .map(|(i, &v)| ((offset + i) as f64, v))
            .collect()
    }
}
