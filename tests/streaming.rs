//! End-to-end scenarios for the streaming chart core.
//!
//! Run with: cargo test --test streaming

use liveline::axes::{frame_ticks, grid_vertices};
use liveline::{ChartConfig, CoordinateFrame, Padding, Sample, StreamingSeries, TimeWindow};

/// Capacity 5, push y = 1..=6: the oldest sample is evicted, auto-scale
/// fits the Y domain to [2, 6], and the projected y positions hit the range
/// ends exactly.
#[test]
fn capacity_five_scenario() {
    let mut series = StreamingSeries::new(5, [0.0, 10.0], [0.0, 1.0]).unwrap();
    series.set_x_range([0.0, 100.0]);
    series.set_y_range([100.0, 0.0]); // inverted, screen style

    for (i, y) in (1..=6).enumerate() {
        series.add_sample(i as f64, y as f64);
    }

    let retained: Vec<f64> = series.to_ordered_samples().iter().map(|s| s.y).collect();
    assert_eq!(retained, vec![2.0, 3.0, 4.0, 5.0, 6.0]);

    series.auto_scale_y(0.0);
    assert_eq!(series.frame().y_scale().domain(), [2.0, 6.0]);

    let (positions, draw_count) = series.update();
    assert_eq!(draw_count, 5);
    assert_eq!(positions.len(), 15);

    // y = 2 (oldest retained) maps to the range's low end, y = 6 to the high
    // end, exactly
    assert_eq!(positions[1], 100.0);
    assert_eq!(positions[13], 0.0);
    // z is always 0
    for i in 0..5 {
        assert_eq!(positions[i * 3 + 2], 0.0);
    }
}

/// A sliding window drives the X domain; samples that fall out of the window
/// slide off the left edge of the range.
#[test]
fn window_driven_domain_slides() {
    let mut series = StreamingSeries::new(16, [0.0, 1.0], [0.0, 1.0]).unwrap();
    series.set_x_range([0.0, 100.0]);
    series.set_y_range([0.0, 100.0]);
    let mut window = TimeWindow::new(10_000.0, Some(10_000.0));

    series.add_sample(10_000.0, 0.5);
    series.set_x_domain([window.start(), window.end()]);
    let (positions, _) = series.update();
    // Newest sample sits at the right edge
    assert!((positions[0] - 100.0).abs() < 1e-6);

    // Five seconds later the same sample has slid to the middle
    window.advance(Some(15_000.0));
    series.set_x_domain([window.start(), window.end()]);
    let (positions, _) = series.update();
    assert!((positions[0] - 50.0).abs() < 1e-6);
}

/// The monotonic window property: advancing now from 1000 to 11000 with a
/// 10s window yields [1000, 11000].
#[test]
fn monotonic_window() {
    let mut window = TimeWindow::new(10_000.0, Some(1_000.0));
    window.advance(Some(11_000.0));
    assert_eq!(window.range(), (1_000.0, 11_000.0));
    assert!(!window.contains(500.0));
    assert!(window.contains(5_000.0));
}

/// Update must be idempotent across the whole pipeline: no new data and no
/// domain change means bit-identical vertex output.
#[test]
fn idempotent_update_full_pipeline() {
    let mut series = StreamingSeries::from_config(&ChartConfig::default()).unwrap();
    for i in 0..100 {
        let t = i as f64 * 10.0;
        series.add_sample(t, (t / 200.0).sin());
    }
    series.auto_scale_y(0.1);

    let first: Vec<f32> = {
        let (positions, _) = series.update();
        positions.to_vec()
    };
    let (second, draw_count) = series.update();
    assert_eq!(first, second);
    assert_eq!(draw_count, 100);
    assert_eq!(draw_count, series.data_count());
}

/// Ingestion past capacity keeps the draw count pinned at capacity and the
/// vertex prefix in sync with the retained samples.
#[test]
fn saturated_stream_stays_bounded() {
    let capacity = 32;
    let mut series = StreamingSeries::new(capacity, [0.0, 1_000.0], [-1.0, 1.0]).unwrap();
    series.set_x_range([0.0, 640.0]);
    series.set_y_range([480.0, 0.0]);

    for i in 0..1_000 {
        series.add_sample(i as f64, (i as f64 / 50.0).cos());
        let (positions, draw_count) = series.update();
        let positions_len = positions.len();
        assert_eq!(draw_count, series.data_count());
        assert_eq!(positions_len, draw_count * 3);
        assert!(draw_count <= capacity);
    }
    assert_eq!(series.data_count(), capacity);
}

/// Grid generation follows the frame's live domains, so tick vertices stay
/// inside the plot rectangle as the window slides.
#[test]
fn grid_follows_sliding_domain() {
    let mut frame = CoordinateFrame::new(800.0, 600.0, Padding::uniform(20.0));
    frame.set_y_domain([-1.0, 1.0]);

    for start in [0.0, 5_000.0, 50_000.0] {
        frame.set_x_domain([start, start + 10_000.0]);
        let ticks = frame_ticks(&frame, 5, 5);
        let vertices = grid_vertices(&frame, &ticks);
        assert_eq!(vertices.len(), 10 * 2 * 3);
        for chunk in vertices.chunks(3) {
            assert!(chunk[0] >= 20.0 - 1e-3 && chunk[0] <= 780.0 + 1e-3);
            assert!(chunk[1] >= 20.0 - 1e-3 && chunk[1] <= 580.0 + 1e-3);
        }
    }
}

/// Pointer translation: unproject is the exact inverse of the projection
/// used to build the vertex buffer.
#[test]
fn hover_unproject_round_trip() {
    let mut series = StreamingSeries::from_config(&ChartConfig {
        capacity: 8,
        x_domain: Some([0.0, 100.0]),
        y_domain: Some([-5.0, 5.0]),
        ..ChartConfig::default()
    })
    .unwrap();
    series.add_sample(25.0, 2.5);
    let (positions, _) = series.update();
    let (px, py) = (positions[0] as f64, positions[1] as f64);

    let sample = series.frame().unproject(px, py);
    assert!((sample.x - 25.0).abs() < 1e-3);
    assert!((sample.y - 2.5).abs() < 1e-3);
}

/// Batch ingestion matches one-at-a-time ingestion.
#[test]
fn batch_matches_single_ingestion() {
    let batch: Vec<Sample> = (0..10).map(|i| Sample::new(i as f64, i as f64 * 2.0)).collect();

    let mut a = StreamingSeries::new(6, [0.0, 10.0], [0.0, 20.0]).unwrap();
    let mut b = StreamingSeries::new(6, [0.0, 10.0], [0.0, 20.0]).unwrap();

    a.add_samples(&batch);
    for s in &batch {
        b.add_sample(s.x, s.y);
    }

    assert_eq!(a.to_ordered_samples(), b.to_ordered_samples());
    let (pa, ca) = a.update();
    let pa = pa.to_vec();
    let (pb, cb) = b.update();
    assert_eq!(ca, cb);
    assert_eq!(pa, pb);
}
