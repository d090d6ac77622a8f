//! Linear domain-to-range mapping for chart axes.
//!
//! A `LinearScale` maps a data-space interval (the domain) onto a
//! device-space interval (the range). Both intervals are replaced in place
//! every frame while a time window slides, so all mutators are O(1) and
//! allocation-free.

use crate::math::{denormalize, normalize, value_range};

/// Bidirectional linear mapping between a domain and a range.
#[derive(Clone, Debug)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl LinearScale {
    /// Create a scale with the given domain and range intervals.
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    /// Map a value from the domain into the range.
    ///
    /// A zero-width domain maps every input to the low end of the range.
    pub fn scale(&self, value: f64) -> f64 {
        let t = normalize(value, self.domain[0], self.domain[1]);
        denormalize(t, self.range[0], self.range[1])
    }

    /// Map a value from the range back into the domain.
    ///
    /// Exact algebraic inverse of [`scale`](Self::scale) for non-degenerate
    /// intervals.
    pub fn invert(&self, value: f64) -> f64 {
        let t = normalize(value, self.range[0], self.range[1]);
        denormalize(t, self.domain[0], self.domain[1])
    }

    /// Replace the domain in place.
    pub fn set_domain(&mut self, domain: [f64; 2]) {
        self.domain = domain;
    }

    /// Replace the range in place.
    pub fn set_range(&mut self, range: [f64; 2]) {
        self.range = range;
    }

    /// Current domain interval.
    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    /// Current range interval.
    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    /// Fit the domain to the given values, padded on both sides by
    /// `padding` as a fraction of the value spread.
    ///
    /// An empty slice leaves the domain unchanged; a single distinct value
    /// produces a zero-width domain which the zero-domain rule in
    /// [`scale`](Self::scale) handles without dividing by zero.
    pub fn auto_scale(&mut self, values: &[f64], padding: f64) {
        let Some((min, max)) = value_range(values) else {
            return;
        };
        let pad = (max - min) * padding;
        self.domain = [min - pad, max + pad];
    }
}

/// Generate `count` evenly spaced tick values across a scale's domain.
///
/// Tick values are in data units; callers map them through the scale to
/// position grid lines or labels.
pub fn generate_ticks(scale: &LinearScale, count: usize) -> Vec<f64> {
    let domain = scale.domain();
    if count < 2 {
        return vec![domain[0]];
    }
    let step = (domain[1] - domain[0]) / (count - 1) as f64;
    (0..count).map(|i| domain[0] + step * i as f64).collect()
}
