//! 2D coordinate frame mapping data space to device space.
//!
//! Composes an X and a Y [`LinearScale`] with a padding-adjusted plot
//! rectangle. The two axes are scaled independently, so aspect ratio is not
//! preserved by design. Holds no sample data; it is purely a mapping.

use crate::buffer::Sample;
use crate::scale::LinearScale;

/// Plot padding in device units.
#[derive(Clone, Copy, Debug, Default)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    /// Equal padding on all four sides.
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Mapping between sample space and a padded device-space plot rectangle.
pub struct CoordinateFrame {
    x_scale: LinearScale,
    y_scale: LinearScale,
    width: f64,
    height: f64,
    padding: Padding,
}

impl CoordinateFrame {
    /// Create a frame for a `width` x `height` canvas.
    ///
    /// The Y range is inverted (low domain values map to the bottom of the
    /// plot rectangle) to match device coordinates that grow downward.
    pub fn new(width: f64, height: f64, padding: Padding) -> Self {
        let mut frame = Self {
            x_scale: LinearScale::new([0.0, 1.0], [0.0, 1.0]),
            y_scale: LinearScale::new([0.0, 1.0], [0.0, 1.0]),
            width,
            height,
            padding,
        };
        frame.update_ranges();
        frame
    }

    fn update_ranges(&mut self) {
        let plot_width = self.width - self.padding.left - self.padding.right;
        let plot_height = self.height - self.padding.top - self.padding.bottom;
        self.x_scale
            .set_range([self.padding.left, self.padding.left + plot_width]);
        self.y_scale
            .set_range([self.padding.bottom + plot_height, self.padding.bottom]);
    }

    /// Map a sample to a device-space position.
    pub fn project(&self, sample: Sample) -> (f64, f64) {
        (self.x_scale.scale(sample.x), self.y_scale.scale(sample.y))
    }

    /// Map a device-space position back to sample space.
    ///
    /// Exact inverse of [`project`](Self::project); the primitive behind
    /// pointer/hover translation in embedding UIs.
    pub fn unproject(&self, px: f64, py: f64) -> Sample {
        Sample::new(self.x_scale.invert(px), self.y_scale.invert(py))
    }

    /// Recompute both scale ranges for a new canvas size.
    ///
    /// Domains are left untouched.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.update_ranges();
        log::debug!("coordinate frame resized to {}x{}", width, height);
    }

    /// Replace the X domain.
    pub fn set_x_domain(&mut self, domain: [f64; 2]) {
        self.x_scale.set_domain(domain);
    }

    /// Replace the Y domain.
    pub fn set_y_domain(&mut self, domain: [f64; 2]) {
        self.y_scale.set_domain(domain);
    }

    /// The X scale.
    pub fn x_scale(&self) -> &LinearScale {
        &self.x_scale
    }

    /// The Y scale.
    pub fn y_scale(&self) -> &LinearScale {
        &self.y_scale
    }

    /// Mutable access to the X scale.
    pub fn x_scale_mut(&mut self) -> &mut LinearScale {
        &mut self.x_scale
    }

    /// Mutable access to the Y scale.
    pub fn y_scale_mut(&mut self) -> &mut LinearScale {
        &mut self.y_scale
    }

    /// The plot rectangle as `(x, y, width, height)` in device units.
    pub fn plot_area(&self) -> (f64, f64, f64, f64) {
        (
            self.padding.left,
            self.padding.bottom,
            self.width - self.padding.left - self.padding.right,
            self.height - self.padding.top - self.padding.bottom,
        )
    }
}
