use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum PixelFormat {
    Bgr8,
    Rgb8,
    Gray8,
}

impl PixelFormat {
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Bgr8 | PixelFormat::Rgb8 => 3,
            PixelFormat::Gray8 => 1,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixel_format: PixelFormat,
    pub data: Vec<u8>,
    pub ts: Option<OffsetDateTime>,
}

/// Still-capture configuration: output size and sensor orientation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StillConfig {
    pub width: u32,
    pub height: u32,
    pub hflip: bool,
    pub vflip: bool,
}

impl Default for StillConfig {
    /// The robot's camera is mounted upside down.
    fn default() -> Self {
        Self {
            width: 1640,
            height: 1232,
            hflip: true,
            vflip: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum AutofocusMode {
    Manual,
    Auto,
    Continuous,
}

/// Lifecycle call observed by the mock camera and preview.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CameraEvent {
    Configured(StillConfig),
    Started,
    Autofocus(AutofocusMode),
    Captured,
    Stopped,
    Shown(String),
    PreviewClosed,
}
