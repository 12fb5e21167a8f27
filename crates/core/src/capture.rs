//! Screen capture for the moment a shake is recognized.
//!
//! The screenshot is taken before any prompt is drawn, so the report shows
//! what the user was looking at rather than the report UI itself.
//!
//! # Example
//!
//! ```ignore
//! use bugshake_core::capture::{ScreenCapturer, ScreenSurface};
//!
//! let mut capturer = ScreenCapturer::new();
//! if let Some(screenshot) = capturer.capture() {
//!     println!("{}x{}", screenshot.width(), screenshot.height());
//! }
//! ```

use crate::error::{ReportError, Result};
use image::DynamicImage;
use screenshots::Screen;
use tracing::debug;

/// A surface the report flow can photograph when a shake arrives.
///
/// `None` means the surface has nothing renderable right now (headless
/// session, no display server). That is a valid outcome, not an error;
/// the flow continues and the report simply carries no screenshot.
pub trait ScreenSurface {
    /// Captures the current contents of the surface.
    fn capture(&mut self) -> Option<DynamicImage>;
}

/// Default [`ScreenSurface`] backed by the `screenshots` crate.
///
/// Captures the primary display at its native pixel scale. Screens are
/// re-enumerated on every capture so displays attached after startup are
/// picked up.
#[derive(Debug, Default)]
pub struct ScreenCapturer;

impl ScreenCapturer {
    pub fn new() -> Self {
        Self
    }

    fn grab_primary() -> Result<DynamicImage> {
        let screens = Screen::all()
            .map_err(|e| ReportError::capture(format!("Failed to enumerate screens: {}", e)))?;

        let screen = screens
            .into_iter()
            .next()
            .ok_or_else(|| ReportError::capture("No screens detected"))?;

        let captured = screen
            .capture()
            .map_err(|e| ReportError::capture(format!("Failed to capture screen: {}", e)))?;

        // Convert screenshots::Image to image::DynamicImage
        let width = captured.width();
        let height = captured.height();
        let rgba_data = captured.into_raw();

        let img_buffer = image::ImageBuffer::from_raw(width, height, rgba_data)
            .ok_or_else(|| ReportError::capture("Failed to create image buffer"))?;

        Ok(DynamicImage::ImageRgba8(img_buffer))
    }
}

impl ScreenSurface for ScreenCapturer {
    fn capture(&mut self) -> Option<DynamicImage> {
        match Self::grab_primary() {
            Ok(image) => Some(image),
            Err(err) => {
                debug!("screen capture unavailable: {err}");
                None
            }
        }
    }
}
