//! Fixed-capacity circular sample storage.
//!
//! Incoming samples arrive at arbitrary rates and must never grow memory, so
//! the store is a ring: one allocation at construction, a write cursor, and
//! modular index arithmetic. Once full, each push silently evicts the oldest
//! retained sample.

use crate::error::ChartError;

/// A single timestamped measurement.
///
/// `x` is conventionally a monotonically non-decreasing timestamp or index;
/// `y` is the measured value. The store itself does not assume any x
/// ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Fixed-capacity FIFO-overwrite store of samples.
///
/// Logical index 0 is the oldest retained sample, `len() - 1` the newest.
pub struct SampleBuffer {
    data: Vec<Sample>,
    head: usize,
    count: usize,
}

impl SampleBuffer {
    /// Create a buffer that retains at most `capacity` samples.
    ///
    /// The backing storage is allocated here and never reallocated.
    pub fn new(capacity: usize) -> Result<Self, ChartError> {
        if capacity == 0 {
            return Err(ChartError::InvalidCapacity);
        }
        Ok(Self {
            data: vec![Sample::default(); capacity],
            head: 0,
            count: 0,
        })
    }

    /// Append a sample, evicting the oldest once the buffer is full. O(1).
    pub fn push(&mut self, sample: Sample) {
        self.data[self.head] = sample;
        self.head = (self.head + 1) % self.data.len();
        if self.count < self.data.len() {
            self.count += 1;
        }
    }

    /// Get the sample at logical index `i` (0 = oldest).
    ///
    /// Returns `None` outside `[0, len())`.
    pub fn get(&self, index: usize) -> Option<Sample> {
        if index >= self.count {
            return None;
        }
        let capacity = self.data.len();
        // head - count + index, kept non-negative before the modulo
        let physical = (self.head + capacity - self.count + index) % capacity;
        Some(self.data[physical])
    }

    /// All retained samples, oldest to newest.
    ///
    /// Allocates; used for auto-scaling and full rebuilds, not the per-frame
    /// hot path.
    pub fn to_ordered_vec(&self) -> Vec<Sample> {
        (0..self.count).filter_map(|i| self.get(i)).collect()
    }

    /// Reset to empty without freeing the backing storage. O(1).
    pub fn clear(&mut self) {
        self.head = 0;
        self.count = 0;
    }

    /// Number of retained samples.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether the buffer has reached capacity (every push now evicts).
    pub fn is_full(&self) -> bool {
        self.count == self.data.len()
    }

    /// Maximum number of retained samples.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }
}
