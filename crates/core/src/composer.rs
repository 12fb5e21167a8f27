//! Assembly of the pre-filled report handed to the host's composer surface.
//!
//! The library never sends anything itself. It builds a [`ComposerRequest`]
//! (recipients, subject, body, attachments) and the host presents it on
//! whatever mail or report surface it owns, reporting the terminal result
//! back as a [`ComposerOutcome`].

use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use std::fmt;
use std::io::Cursor;
use tracing::warn;

/// Subject line used when the host configured none.
pub const DEFAULT_SUBJECT: &str = "Bug Report";
/// Filename of the screenshot attachment.
pub const SCREENSHOT_FILENAME: &str = "screenshot.jpeg";
/// MIME type of the screenshot attachment.
pub const SCREENSHOT_MIME_TYPE: &str = "image/jpeg";
/// JPEG quality for the screenshot attachment.
const SCREENSHOT_JPEG_QUALITY: u8 = 100;

/// A file attached to an assembled report.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub data: Vec<u8>,
    pub mime_type: String,
    pub filename: String,
}

impl Attachment {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
            filename: filename.into(),
        }
    }
}

// Attachments hold raw image bytes; keep them out of debug output.
impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("filename", &self.filename)
            .field("mime_type", &self.mime_type)
            .field("data", &format_args!("{} bytes", self.data.len()))
            .finish()
    }
}

/// A fully assembled, pre-filled report ready for presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposerRequest {
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<Attachment>,
}

impl ComposerRequest {
    /// Assembles a report from the host configuration and the screenshot
    /// captured when the shake arrived.
    ///
    /// The subject falls back to [`DEFAULT_SUBJECT`] and the body to an
    /// empty string. A screenshot becomes the first attachment, encoded as
    /// JPEG at maximum quality; one that fails to encode is logged and
    /// dropped, and the report goes out without it.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::MissingRecipients`] if the configuration
    /// holds no recipient addresses.
    pub fn assemble(config: &ReportConfig, screenshot: Option<DynamicImage>) -> Result<Self> {
        if config.recipients.is_empty() {
            return Err(ReportError::MissingRecipients);
        }

        let mut request = Self {
            recipients: config.recipients.clone(),
            subject: config
                .subject
                .clone()
                .unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
            body: config.body.clone().unwrap_or_default(),
            attachments: Vec::new(),
        };

        if let Some(screenshot) = screenshot {
            match encode_screenshot(&screenshot) {
                Ok(data) => request.add_attachment(Attachment::new(
                    data,
                    SCREENSHOT_MIME_TYPE,
                    SCREENSHOT_FILENAME,
                )),
                Err(err) => warn!("dropping screenshot attachment: {err}"),
            }
        }

        Ok(request)
    }

    /// Appends an attachment after any already present.
    pub fn add_attachment(&mut self, attachment: Attachment) {
        self.attachments.push(attachment);
    }
}

/// Encodes a screenshot as a maximum-quality JPEG.
fn encode_screenshot(screenshot: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer: Vec<u8> = Vec::new();
    let mut cursor = Cursor::new(&mut buffer);

    // JPEG carries no alpha channel; captures arrive as RGBA
    let rgb = DynamicImage::ImageRgb8(screenshot.to_rgb8());
    rgb.write_with_encoder(JpegEncoder::new_with_quality(
        &mut cursor,
        SCREENSHOT_JPEG_QUALITY,
    ))
    .map_err(|e| ReportError::encoding(format!("Failed to encode screenshot: {}", e)))?;

    Ok(buffer)
}

/// Terminal result of a presented composer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComposeResult {
    /// The user sent the report.
    Sent,
    /// The composer tried to send and failed.
    Failed,
    /// The user gave up without sending.
    Cancelled,
}

/// What the composer surface reports back when it finishes.
///
/// Hosts whose surfaces know additional terminal states (a draft saved for
/// later, for instance) map them to [`ComposeResult::Cancelled`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposerOutcome {
    pub result: ComposeResult,
    pub error: Option<String>,
}

impl ComposerOutcome {
    pub fn sent() -> Self {
        Self {
            result: ComposeResult::Sent,
            error: None,
        }
    }

    pub fn cancelled() -> Self {
        Self {
            result: ComposeResult::Cancelled,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            result: ComposeResult::Failed,
            error: Some(error.into()),
        }
    }
}

/// The host surface that presents an assembled report for sending.
pub trait ComposerHost {
    /// Whether a composer can be presented at all right now.
    fn can_compose(&self) -> bool;

    /// Presents the request and blocks until the user is done with it.
    fn present(&mut self, request: ComposerRequest) -> ComposerOutcome;

    /// Tears the presented composer down. Called exactly once per
    /// presented composer, after [`present`](Self::present) returns.
    fn dismiss(&mut self);
}
