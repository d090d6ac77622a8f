//! Numeric tick and grid-line generation.
//!
//! Produces device-space endpoint positions only; colors, materials, and
//! label formatting belong to the embedding presentation layer.

use crate::coordinate::CoordinateFrame;
use crate::scale::generate_ticks;

/// Tick values for both axes of a frame.
pub struct Ticks {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Generate evenly spaced tick values for both axes.
pub fn frame_ticks(frame: &CoordinateFrame, x_count: usize, y_count: usize) -> Ticks {
    Ticks {
        x: generate_ticks(frame.x_scale(), x_count),
        y: generate_ticks(frame.y_scale(), y_count),
    }
}

/// Device-space grid line endpoints for a `LineList` draw.
///
/// Each grid line contributes two (x, y, z) triplets. Vertical lines span
/// the plot rectangle at every X tick; horizontal lines at every Y tick.
pub fn grid_vertices(frame: &CoordinateFrame, ticks: &Ticks) -> Vec<f32> {
    let (plot_x, plot_y, plot_w, plot_h) = frame.plot_area();
    let top = plot_y as f32;
    let bottom = (plot_y + plot_h) as f32;
    let left = plot_x as f32;
    let right = (plot_x + plot_w) as f32;

    let mut vertices = Vec::with_capacity((ticks.x.len() + ticks.y.len()) * 6);
    for &tick in &ticks.x {
        let x = frame.x_scale().scale(tick) as f32;
        vertices.extend_from_slice(&[x, top, 0.0, x, bottom, 0.0]);
    }
    for &tick in &ticks.y {
        let y = frame.y_scale().scale(tick) as f32;
        vertices.extend_from_slice(&[left, y, 0.0, right, y, 0.0]);
    }
    vertices
}

/// Device-space endpoints of the two axis lines (bottom X axis, left Y
/// axis) as (x, y, z) triplets for a `LineList` draw.
pub fn axis_vertices(frame: &CoordinateFrame) -> Vec<f32> {
    let (plot_x, plot_y, plot_w, plot_h) = frame.plot_area();
    let left = plot_x as f32;
    let right = (plot_x + plot_w) as f32;
    let top = plot_y as f32;
    let bottom = (plot_y + plot_h) as f32;
    vec![
        left, bottom, 0.0, right, bottom, 0.0, // X axis
        left, top, 0.0, left, bottom, 0.0, // Y axis
    ]
}
