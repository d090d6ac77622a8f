//! Streaming series: the orchestration core of the chart.
//!
//! A `StreamingSeries` owns a circular sample store, a coordinate frame, and
//! a vertex position buffer allocated once at construction. Samples are
//! ingested at any rate; projection into vertex positions happens in exactly
//! one place, `update()`, which runs once per render frame, only when
//! something changed, and never allocates.

use crate::buffer::{Sample, SampleBuffer};
use crate::config::ChartConfig;
use crate::coordinate::{CoordinateFrame, Padding};
use crate::error::ChartError;

/// Fixed-capacity streaming line series producing renderer-ready vertex
/// positions.
pub struct StreamingSeries {
    buffer: SampleBuffer,
    frame: CoordinateFrame,
    /// (x, y, z) triplets, length `capacity * 3`, never resized.
    positions: Vec<f32>,
    /// Number of leading vertices valid for drawing this frame.
    draw_count: usize,
    /// Projected output is stale and must be rebuilt on the next update.
    dirty: bool,
    /// Reused y-value scratch for auto-scaling.
    y_scratch: Vec<f64>,
}

impl StreamingSeries {
    /// Create a series retaining at most `capacity` samples.
    ///
    /// Both the sample store and the vertex buffer are allocated here; the
    /// per-frame path performs no further allocation for the lifetime of the
    /// series.
    pub fn new(
        capacity: usize,
        x_domain: [f64; 2],
        y_domain: [f64; 2],
    ) -> Result<Self, ChartError> {
        let buffer = SampleBuffer::new(capacity)?;
        let mut frame = CoordinateFrame::new(1.0, 1.0, Padding::default());
        frame.set_x_domain(x_domain);
        frame.set_y_domain(y_domain);
        // Default range matches normalized device-style output until the
        // embedder calls set_x_range/set_y_range or resize.
        frame.x_scale_mut().set_range([0.0, 1.0]);
        frame.y_scale_mut().set_range([0.0, 1.0]);
        log::debug!("streaming series created, capacity {}", capacity);
        Ok(Self {
            buffer,
            frame,
            positions: vec![0.0; capacity * 3],
            draw_count: 0,
            dirty: false,
            y_scratch: Vec::with_capacity(capacity),
        })
    }

    /// Build a series from a validated chart config: capacity, initial
    /// domains, canvas size, and plot padding.
    pub fn from_config(config: &ChartConfig) -> Result<Self, ChartError> {
        config.validate()?;
        let mut series = Self::new(
            config.capacity,
            config.x_domain.unwrap_or([0.0, config.window_ms]),
            config.y_domain.unwrap_or([0.0, 1.0]),
        )?;
        let x_domain = series.frame.x_scale().domain();
        let y_domain = series.frame.y_scale().domain();
        let mut frame = CoordinateFrame::new(
            config.width as f64,
            config.height as f64,
            Padding::uniform(config.plot_padding),
        );
        frame.set_x_domain(x_domain);
        frame.set_y_domain(y_domain);
        series.frame = frame;
        series.dirty = true;
        Ok(series)
    }

    /// Ingest one sample. O(1); evicts the oldest sample when full.
    pub fn add_sample(&mut self, x: f64, y: f64) {
        self.buffer.push(Sample::new(x, y));
        self.dirty = true;
    }

    /// Ingest a batch of samples. O(k).
    pub fn add_samples(&mut self, samples: &[Sample]) {
        for &sample in samples {
            self.buffer.push(sample);
        }
        if !samples.is_empty() {
            self.dirty = true;
        }
    }

    /// Re-project retained samples into the vertex buffer if anything
    /// changed since the last call.
    ///
    /// Returns the valid vertex prefix ((x, y, z) triplets in device space)
    /// and the draw count. Idempotent: a second call with no intervening
    /// mutation returns bit-identical output and does no work. This is the
    /// single O(count) hot-path operation and does not allocate.
    pub fn update(&mut self) -> (&[f32], usize) {
        if self.dirty {
            let count = self.buffer.len();
            if count == 0 {
                self.draw_count = 0;
            } else {
                for i in 0..count {
                    // get() cannot miss inside [0, count)
                    let Some(sample) = self.buffer.get(i) else {
                        break;
                    };
                    let (px, py) = self.frame.project(sample);
                    let offset = i * 3;
                    self.positions[offset] = px as f32;
                    self.positions[offset + 1] = py as f32;
                    self.positions[offset + 2] = 0.0;
                }
                self.draw_count = count;
            }
            self.dirty = false;
        }
        (&self.positions[..self.draw_count * 3], self.draw_count)
    }

    /// Fit the Y domain to the retained samples, padded by `padding` as a
    /// fraction of the value spread.
    ///
    /// No-op on an empty series. O(count); decoupled from `update()` so
    /// embedders rescale only when they want to. Marks the series dirty.
    pub fn auto_scale_y(&mut self, padding: f64) {
        if self.buffer.is_empty() {
            return;
        }
        self.y_scratch.clear();
        for i in 0..self.buffer.len() {
            if let Some(sample) = self.buffer.get(i) {
                self.y_scratch.push(sample.y);
            }
        }
        self.frame.y_scale_mut().auto_scale(&self.y_scratch, padding);
        self.dirty = true;
    }

    /// Replace the X domain. O(1); marks dirty.
    pub fn set_x_domain(&mut self, domain: [f64; 2]) {
        self.frame.set_x_domain(domain);
        self.dirty = true;
    }

    /// Replace the Y domain. O(1); marks dirty.
    pub fn set_y_domain(&mut self, domain: [f64; 2]) {
        self.frame.set_y_domain(domain);
        self.dirty = true;
    }

    /// Replace the X screen range. O(1); marks dirty.
    pub fn set_x_range(&mut self, range: [f64; 2]) {
        self.frame.x_scale_mut().set_range(range);
        self.dirty = true;
    }

    /// Replace the Y screen range. O(1); marks dirty.
    pub fn set_y_range(&mut self, range: [f64; 2]) {
        self.frame.y_scale_mut().set_range(range);
        self.dirty = true;
    }

    /// Recompute both screen ranges for a new canvas size (container
    /// resize). Domains are untouched; marks dirty.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.frame.resize(width, height);
        self.dirty = true;
    }

    /// Drop all samples and zero the draw count. The backing storage is
    /// retained for reuse.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.draw_count = 0;
        self.dirty = false;
        log::debug!("streaming series cleared");
    }

    /// Number of retained samples.
    pub fn data_count(&self) -> usize {
        self.buffer.len()
    }

    /// Maximum number of retained samples.
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Retained samples, oldest to newest. Allocates.
    pub fn to_ordered_samples(&self) -> Vec<Sample> {
        self.buffer.to_ordered_vec()
    }

    /// The vertex positions valid as of the last `update()`.
    pub fn positions(&self) -> &[f32] {
        &self.positions[..self.draw_count * 3]
    }

    /// Number of leading vertices valid as of the last `update()`.
    pub fn draw_count(&self) -> usize {
        self.draw_count
    }

    /// The coordinate frame used for projection.
    pub fn frame(&self) -> &CoordinateFrame {
        &self.frame
    }

    /// Release the series and its backing buffers.
    ///
    /// Consuming `self` makes use-after-dispose a compile error rather than
    /// a runtime precondition.
    pub fn dispose(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(capacity: usize) -> StreamingSeries {
        let mut series = StreamingSeries::new(capacity, [0.0, 10.0], [0.0, 10.0]).unwrap();
        series.set_x_range([0.0, 100.0]);
        series.set_y_range([0.0, 100.0]);
        series
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(StreamingSeries::new(0, [0.0, 1.0], [0.0, 1.0]).is_err());
    }

    #[test]
    fn test_empty_update() {
        let mut series = series(4);
        let (positions, count) = series.update();
        assert_eq!(count, 0);
        assert!(positions.is_empty());
    }

    #[test]
    fn test_update_projects_all_samples() {
        let mut series = series(4);
        series.add_sample(0.0, 0.0);
        series.add_sample(5.0, 10.0);

        let (positions, count) = series.update();
        assert_eq!(count, 2);
        assert_eq!(positions.len(), 6);
        assert!((positions[0] - 0.0).abs() < 1e-6);
        assert!((positions[1] - 0.0).abs() < 1e-6);
        assert_eq!(positions[2], 0.0);
        assert!((positions[3] - 50.0).abs() < 1e-6);
        assert!((positions[4] - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_draw_count_tracks_data_count() {
        let mut series = series(3);
        for n in 1..=6 {
            series.add_sample(n as f64, n as f64);
            series.update();
            assert_eq!(series.draw_count(), series.data_count());
        }
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut series = series(8);
        series.add_sample(1.0, 2.0);
        series.add_sample(2.0, 4.0);

        let (first, count_a) = series.update();
        let snapshot: Vec<f32> = first.to_vec();
        let (second, count_b) = series.update();
        assert_eq!(count_a, count_b);
        // Bit-identical, not merely approximately equal
        assert_eq!(snapshot, second);
    }

    #[test]
    fn test_domain_change_marks_dirty() {
        let mut series = series(4);
        series.add_sample(5.0, 5.0);
        series.update();
        let before = series.positions()[1];

        series.set_y_domain([0.0, 20.0]);
        series.update();
        let after = series.positions()[1];
        assert!((before - after).abs() > 1e-6);
    }

    #[test]
    fn test_auto_scale_y() {
        let mut series = series(8);
        for (x, y) in [(0.0, 2.0), (1.0, 6.0), (2.0, 4.0)] {
            series.add_sample(x, y);
        }
        series.auto_scale_y(0.0);
        assert_eq!(series.frame().y_scale().domain(), [2.0, 6.0]);
    }

    #[test]
    fn test_auto_scale_y_empty_is_noop() {
        let mut series = series(4);
        series.auto_scale_y(0.1);
        assert_eq!(series.frame().y_scale().domain(), [0.0, 10.0]);
    }

    #[test]
    fn test_unsorted_x_is_preserved_in_store_order() {
        // The core assumes nothing about x ordering; projection iterates
        // store order, not sorted x order.
        let mut series = series(4);
        series.add_sample(9.0, 1.0);
        series.add_sample(3.0, 2.0);
        let (positions, count) = series.update();
        assert_eq!(count, 2);
        assert!((positions[0] - 90.0).abs() < 1e-6);
        assert!((positions[3] - 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_clear_resets_draw_count() {
        let mut series = series(4);
        series.add_sample(1.0, 1.0);
        series.update();
        assert_eq!(series.draw_count(), 1);

        series.clear();
        assert_eq!(series.draw_count(), 0);
        assert_eq!(series.data_count(), 0);
        let (positions, count) = series.update();
        assert_eq!(count, 0);
        assert!(positions.is_empty());
    }

    #[test]
    fn test_add_samples_batch() {
        let mut series = series(3);
        let batch = [
            Sample::new(1.0, 1.0),
            Sample::new(2.0, 2.0),
            Sample::new(3.0, 3.0),
            Sample::new(4.0, 4.0),
        ];
        series.add_samples(&batch);
        assert_eq!(series.data_count(), 3);
        let retained = series.to_ordered_samples();
        assert_eq!(retained[0], Sample::new(2.0, 2.0));
        assert_eq!(retained[2], Sample::new(4.0, 4.0));
    }
}
