pub mod dispatch;
pub mod error;
pub mod keyframes;
pub mod sanitize;
pub mod scene;
pub mod shots;
pub mod timestamp;

pub use error::{Error, ErrorKind, Result};

use timestamp::FrameRate;

/// Knobs shared by every conversion step.
#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    pub frame_rate: FrameRate,
    /// Fail on lines that look like a range but can't be parsed, instead of skipping
    /// them.
    pub strict: bool,
}
