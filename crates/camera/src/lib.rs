//! camera: still capture with a live countdown preview
//!
//! The [`StillCamera`] trait covers the configure/start/capture/stop lifecycle of a still
//! camera and [`Preview`] covers the window that shows frames with a caption while the
//! operator gets ready. Frames are persisted as PNG through [`io::save_png`].

mod types;
pub use types::{AutofocusMode, CameraEvent, Frame, PixelFormat, StillConfig};

mod error;
pub use error::{Error, Result};

mod traits;
pub use traits::{Preview, StillCamera};

pub mod io;

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use mock::{CameraLog, MockCamera, MockPreview};

#[cfg(feature = "opencv")]
mod opencv_backend;
#[cfg(feature = "opencv")]
pub use opencv_backend::{OpenCvCamera, OpenCvPreview};
