use crate::{
    AutofocusMode, CameraEvent, Error, Frame, PixelFormat, Preview, Result, StillCamera,
    StillConfig,
};
use parking_lot::Mutex;
use std::sync::Arc;
use time::OffsetDateTime;

/// Ordered journal shared by the mock camera and preview.
#[derive(Clone, Debug, Default)]
pub struct CameraLog {
    events: Arc<Mutex<Vec<CameraEvent>>>,
}

impl CameraLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<CameraEvent> {
        self.events.lock().clone()
    }

    fn push(&self, event: CameraEvent) {
        self.events.lock().push(event);
    }
}

/// Camera producing a small RGB ramp image. Frames are downscaled from the configured
/// size so tests stay cheap.
pub struct MockCamera {
    log: CameraLog,
    running: bool,
    counter: u64,
}

impl MockCamera {
    pub fn new(log: CameraLog) -> Self {
        Self {
            log,
            running: false,
            counter: 0,
        }
    }
}

impl StillCamera for MockCamera {
    fn configure(&mut self, config: &StillConfig) -> Result<()> {
        self.log.push(CameraEvent::Configured(*config));
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        self.running = true;
        self.log.push(CameraEvent::Started);
        Ok(())
    }

    fn set_autofocus(&mut self, mode: AutofocusMode) -> Result<()> {
        self.log.push(CameraEvent::Autofocus(mode));
        Ok(())
    }

    fn capture(&mut self) -> Result<Frame> {
        if !self.running {
            return Err(Error::NotStarted);
        }
        self.counter += 1;
        self.log.push(CameraEvent::Captured);
        let width = 32u32;
        let height = 24u32;
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((x + y + self.counter as u32) % 256) as u8;
                data.extend_from_slice(&[v, v, v]);
            }
        }
        Ok(Frame {
            width,
            height,
            pixel_format: PixelFormat::Rgb8,
            data,
            ts: Some(OffsetDateTime::now_utc()),
        })
    }

    fn stop(&mut self) -> Result<()> {
        self.running = false;
        self.log.push(CameraEvent::Stopped);
        Ok(())
    }
}

/// Preview window that records captions and optionally cancels after a number of frames.
pub struct MockPreview {
    log: CameraLog,
    shown: usize,
    cancel_after: Option<usize>,
}

impl MockPreview {
    pub fn new(log: CameraLog) -> Self {
        Self {
            log,
            shown: 0,
            cancel_after: None,
        }
    }

    /// Report a cancel keypress once `frames` frames have been shown.
    pub fn cancel_after(mut self, frames: usize) -> Self {
        self.cancel_after = Some(frames);
        self
    }
}

impl Preview for MockPreview {
    fn show(&mut self, _frame: &Frame, caption: &str) -> Result<bool> {
        self.shown += 1;
        self.log.push(CameraEvent::Shown(caption.to_string()));
        Ok(self.cancel_after.is_some_and(|n| self.shown >= n))
    }

    fn close(&mut self) -> Result<()> {
        self.log.push(CameraEvent::PreviewClosed);
        Ok(())
    }
}
