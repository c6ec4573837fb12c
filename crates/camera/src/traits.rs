use crate::{AutofocusMode, Frame, Result, StillConfig};

pub trait StillCamera {
    /// Apply a still configuration. Takes effect on the next `start`.
    fn configure(&mut self, config: &StillConfig) -> Result<()>;

    fn start(&mut self) -> Result<()>;

    fn set_autofocus(&mut self, mode: AutofocusMode) -> Result<()>;

    /// Grab the current frame as RGB. Fails with `NotStarted` outside start/stop.
    fn capture(&mut self) -> Result<Frame>;

    fn stop(&mut self) -> Result<()>;
}

pub trait Preview {
    /// Show a frame with a caption overlaid. Returns `true` when the operator asked to
    /// cancel (pressed `q`).
    fn show(&mut self, frame: &Frame, caption: &str) -> Result<bool>;

    fn close(&mut self) -> Result<()>;
}
