use crate::{
    AutofocusMode, Error, Frame, PixelFormat, Preview, Result, StillCamera, StillConfig,
};
use opencv::prelude::*;
use opencv::{core, highgui, imgproc, videoio};
use time::OffsetDateTime;
use tracing::{debug, info};

const WINDOW: &str = "photo taking...";

fn backend(e: opencv::Error) -> Error {
    Error::Backend(e.to_string())
}

/// Still camera over OpenCV's V4L2/libcamera capture.
pub struct OpenCvCamera {
    spec: String,
    config: StillConfig,
    cap: Option<videoio::VideoCapture>,
}

impl OpenCvCamera {
    /// `spec` is a device index like `0` or a device path.
    pub fn new(spec: &str) -> Self {
        Self {
            spec: spec.to_string(),
            config: StillConfig::default(),
            cap: None,
        }
    }

    fn flip_code(&self) -> Option<i32> {
        match (self.config.hflip, self.config.vflip) {
            (true, true) => Some(-1),
            (true, false) => Some(1),
            (false, true) => Some(0),
            (false, false) => None,
        }
    }
}

impl StillCamera for OpenCvCamera {
    fn configure(&mut self, config: &StillConfig) -> Result<()> {
        self.config = *config;
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        let mut cap = if let Ok(idx) = self.spec.parse::<i32>() {
            videoio::VideoCapture::new(idx, videoio::CAP_ANY).map_err(backend)?
        } else {
            videoio::VideoCapture::from_file(&self.spec, videoio::CAP_ANY).map_err(backend)?
        };
        let opened = videoio::VideoCapture::is_opened(&cap).map_err(backend)?;
        if !opened {
            return Err(Error::NotFound(self.spec.clone()));
        }
        cap.set(videoio::CAP_PROP_FRAME_WIDTH, self.config.width as f64)
            .map_err(backend)?;
        cap.set(videoio::CAP_PROP_FRAME_HEIGHT, self.config.height as f64)
            .map_err(backend)?;
        info!(spec = %self.spec, "camera started");
        self.cap = Some(cap);
        Ok(())
    }

    fn set_autofocus(&mut self, mode: AutofocusMode) -> Result<()> {
        let cap = self.cap.as_mut().ok_or(Error::NotStarted)?;
        let value = match mode {
            AutofocusMode::Manual => 0.0,
            AutofocusMode::Auto | AutofocusMode::Continuous => 1.0,
        };
        // Many UVC drivers ignore the property; treat a refusal as best effort.
        let accepted = cap
            .set(videoio::CAP_PROP_AUTOFOCUS, value)
            .map_err(backend)?;
        debug!(?mode, accepted, "autofocus");
        Ok(())
    }

    fn capture(&mut self) -> Result<Frame> {
        let flip = self.flip_code();
        let cap = self.cap.as_mut().ok_or(Error::NotStarted)?;
        let mut mat = core::Mat::default();
        cap.read(&mut mat).map_err(backend)?;
        if mat.empty() {
            return Err(Error::Io("empty frame".into()));
        }
        if let Some(code) = flip {
            let mut flipped = core::Mat::default();
            core::flip(&mat, &mut flipped, code).map_err(backend)?;
            mat = flipped;
        }

        let mut rgb = core::Mat::default();
        imgproc::cvt_color(&mat, &mut rgb, imgproc::COLOR_BGR2RGB, 0).map_err(backend)?;
        let data = rgb.data_bytes().map_err(backend)?.to_vec();
        Ok(Frame {
            width: rgb.cols() as u32,
            height: rgb.rows() as u32,
            pixel_format: PixelFormat::Rgb8,
            data,
            ts: Some(OffsetDateTime::now_utc()),
        })
    }

    fn stop(&mut self) -> Result<()> {
        if let Some(mut cap) = self.cap.take() {
            cap.release().map_err(backend)?;
            info!("camera stopped");
        }
        Ok(())
    }
}

/// HighGUI window with a large green caption.
#[derive(Default)]
pub struct OpenCvPreview;

impl OpenCvPreview {
    pub fn new() -> Self {
        Self
    }
}

impl Preview for OpenCvPreview {
    fn show(&mut self, frame: &Frame, caption: &str) -> Result<bool> {
        let flat = core::Mat::from_slice(&frame.data).map_err(backend)?;
        let rgb = flat
            .reshape(frame.pixel_format.channels() as i32, frame.height as i32)
            .map_err(backend)?;
        let mut bgr = core::Mat::default();
        match frame.pixel_format {
            PixelFormat::Bgr8 => bgr = rgb.try_clone().map_err(backend)?,
            PixelFormat::Rgb8 => {
                imgproc::cvt_color(&rgb, &mut bgr, imgproc::COLOR_RGB2BGR, 0).map_err(backend)?
            }
            PixelFormat::Gray8 => {
                imgproc::cvt_color(&rgb, &mut bgr, imgproc::COLOR_GRAY2BGR, 0).map_err(backend)?
            }
        }
        imgproc::put_text(
            &mut bgr,
            caption,
            core::Point::new(450, 500),
            imgproc::FONT_HERSHEY_SIMPLEX,
            4.0,
            core::Scalar::new(0.0, 255.0, 0.0, 0.0),
            8,
            imgproc::LINE_AA,
            false,
        )
        .map_err(backend)?;
        highgui::imshow(WINDOW, &bgr).map_err(backend)?;
        let key = highgui::wait_key(1).map_err(backend)?;
        Ok(key & 0xFF == 'q' as i32)
    }

    fn close(&mut self) -> Result<()> {
        highgui::destroy_all_windows().map_err(backend)
    }
}
