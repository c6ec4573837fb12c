use crate::{Error, Frame, PixelFormat, Result};
use image::{GrayImage, RgbImage};
use std::path::Path;
use time::macros::format_description;
use time::OffsetDateTime;

/// File name for a photo taken at `at`: `image_<YYYYMMDD>_<HHMMSS>.png`.
pub fn photo_file_name(at: OffsetDateTime) -> Result<String> {
    at.format(format_description!(
        "image_[year][month][day]_[hour][minute][second].png"
    ))
    .map_err(|e| Error::Io(format!("photo name: {e}")))
}

/// Write a frame to disk as PNG.
pub fn save_png(path: impl AsRef<Path>, frame: &Frame) -> Result<()> {
    let path = path.as_ref();
    let expected =
        frame.width as usize * frame.height as usize * frame.pixel_format.channels();
    if frame.data.len() != expected {
        return Err(Error::InvalidFrame("buffer size does not match dimensions"));
    }
    match frame.pixel_format {
        PixelFormat::Rgb8 => {
            let img = RgbImage::from_raw(frame.width, frame.height, frame.data.clone())
                .ok_or(Error::InvalidFrame("rgb buffer"))?;
            img.save(path).map_err(|e| Error::Io(e.to_string()))
        }
        PixelFormat::Bgr8 => {
            let mut rgb = frame.data.clone();
            for px in rgb.chunks_exact_mut(3) {
                px.swap(0, 2);
            }
            let img = RgbImage::from_raw(frame.width, frame.height, rgb)
                .ok_or(Error::InvalidFrame("bgr buffer"))?;
            img.save(path).map_err(|e| Error::Io(e.to_string()))
        }
        PixelFormat::Gray8 => {
            let img = GrayImage::from_raw(frame.width, frame.height, frame.data.clone())
                .ok_or(Error::InvalidFrame("gray buffer"))?;
            img.save(path).map_err(|e| Error::Io(e.to_string()))
        }
    }
}
