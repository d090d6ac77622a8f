pub mod math;
pub mod scale;
pub mod buffer;
pub mod time_window;
pub mod coordinate;
pub mod series;
pub mod axes;

pub mod config;
pub mod error;

// GPU adapter and offline driver
pub mod gpu;
pub mod cli;

pub use buffer::{Sample, SampleBuffer};
pub use config::ChartConfig;
pub use coordinate::{CoordinateFrame, Padding};
pub use error::ChartError;
pub use scale::LinearScale;
pub use series::StreamingSeries;
pub use time_window::TimeWindow;
