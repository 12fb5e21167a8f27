//! Built-in prompt presentation.
//!
//! Hosts with their own UI toolkit implement
//! [`PromptPresenter`](crate::prompt::PromptPresenter) directly; this module
//! provides a ready-made presenter that opens a small native window via
//! `eframe`.
//!
//! # Usage
//!
//! ```ignore
//! use bugshake_core::prompt::{FormFactor, PromptRequest};
//! use bugshake_core::ui;
//!
//! let request = PromptRequest::for_form_factor(FormFactor::Regular);
//! let choice = ui::run_prompt_dialog(request)?;
//! ```

mod dialog;

pub use dialog::DialogPresenter;

use crate::error::Result;
use crate::prompt::{PromptChoice, PromptRequest};

/// Opens the confirmation dialog and blocks until it resolves.
///
/// Must run on the main thread (an `eframe` requirement on most
/// platforms). Closing the window without choosing resolves to
/// [`PromptChoice::Cancel`].
///
/// # Errors
///
/// Returns [`ReportError::Ui`](crate::error::ReportError::Ui) if the
/// window cannot be created, typically on a headless session.
pub fn run_prompt_dialog(request: PromptRequest) -> Result<PromptChoice> {
    dialog::run(request)
}
