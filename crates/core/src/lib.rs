//! BugShake Core Library
//!
//! This library turns a shake gesture into a pre-filled bug report: it
//! captures the screen the moment the shake arrives, asks the user for
//! confirmation, and assembles a report (recipients, subject, body,
//! screenshot attachment) for the host's composer surface to present.
//!
//! # Overview
//!
//! The host recognizes shakes and owns the composer; everything in between
//! is handled here:
//!
//! - **Gate**: an optional host delegate can veto the prompt via [`delegate`]
//! - **Screen Capture**: eager screenshot of the primary display via [`capture`]
//! - **Confirmation Prompt**: fixed yes/no prompt, styled per form factor, via [`prompt`] and [`ui`]
//! - **Report Assembly**: recipients, subject, body and attachments via [`composer`]
//! - **Flow Control**: the state machine tying it together via [`flow`]
//!
//! # Quick Start
//!
//! The simplest way to use the library is through the [`BugShaker`] facade:
//!
//! ```ignore
//! use bugshake_core::{BugShaker, ReportConfig};
//!
//! let config = ReportConfig::new(vec!["bugs@example.com".into()])
//!     .with_subject("Bug in MyApp");
//! let mut shaker = BugShaker::new(config);
//!
//! // Whenever the host recognizes a shake:
//! shaker.shake(&mut my_composer);
//! ```
//!
//! # Module Structure
//!
//! - [`capture`]: Screen capture at shake time
//! - [`composer`]: Report assembly and the composer surface seam
//! - [`config`]: Report configuration
//! - [`delegate`]: Host hooks (gate and extra attachments)
//! - [`error`]: Error types and result aliases
//! - [`flow`]: The shake-to-report state machine
//! - [`prompt`]: The confirmation prompt and its presenter seam
//! - [`ui`]: Built-in native confirmation dialog

pub mod capture;
pub mod composer;
pub mod config;
pub mod delegate;
pub mod error;
pub mod flow;
pub mod prompt;
pub mod ui;

// Re-export primary types for convenience
pub use capture::{ScreenCapturer, ScreenSurface};
pub use composer::{Attachment, ComposeResult, ComposerHost, ComposerOutcome, ComposerRequest};
pub use config::ReportConfig;
pub use delegate::ReportDelegate;
pub use error::{ReportError, Result};
pub use flow::{FlowStep, ShakeReporter};
pub use prompt::{FormFactor, PromptChoice, PromptPresenter, PromptRequest, PromptStyle};
pub use ui::DialogPresenter;

use std::sync::Weak;

/// Main entry point for shake-to-report.
///
/// This struct is a facade over the flow controller with the built-in
/// collaborators already wired up: the screen capturer for screenshots and
/// the native dialog for the confirmation prompt. The host supplies only
/// its composer surface.
///
/// Event-driven hosts that cannot block on [`shake`](Self::shake) drive
/// the underlying [`ShakeReporter`] directly via
/// [`reporter_mut`](Self::reporter_mut).
///
/// # Example
///
/// ```ignore
/// use bugshake_core::{BugShaker, ReportConfig};
///
/// let mut shaker = BugShaker::new(ReportConfig::new(vec!["bugs@example.com".into()]));
/// shaker.shake(&mut my_composer);
/// ```
pub struct BugShaker {
    reporter: ShakeReporter,
}

impl BugShaker {
    /// Creates a facade capturing through the built-in screen capturer.
    pub fn new(config: ReportConfig) -> Self {
        Self {
            reporter: ShakeReporter::new(config, Box::new(ScreenCapturer::new())),
        }
    }

    /// Registers the host delegate. Only a weak reference is kept.
    pub fn with_delegate(mut self, delegate: Weak<dyn ReportDelegate>) -> Self {
        self.reporter = self.reporter.with_delegate(delegate);
        self
    }

    /// Overrides the form factor used to style the confirmation prompt.
    pub fn with_form_factor(mut self, form_factor: FormFactor) -> Self {
        self.reporter = self.reporter.with_form_factor(form_factor);
        self
    }

    /// Runs one complete flow for a recognized shake, prompting through
    /// the built-in dialog.
    ///
    /// Blocks until the flow reaches a terminal step and returns it.
    pub fn shake(&mut self, composer: &mut dyn ComposerHost) -> FlowStep {
        let mut presenter = DialogPresenter::new();
        self.reporter.run_shake(&mut presenter, composer)
    }

    /// Runs one complete flow with a custom prompt presenter.
    pub fn shake_with(
        &mut self,
        presenter: &mut dyn PromptPresenter,
        composer: &mut dyn ComposerHost,
    ) -> FlowStep {
        self.reporter.run_shake(presenter, composer)
    }

    /// Returns a reference to the underlying flow controller.
    pub fn reporter(&self) -> &ShakeReporter {
        &self.reporter
    }

    /// Returns the underlying flow controller for event-driven hosts that
    /// drive the split-phase API themselves.
    pub fn reporter_mut(&mut self) -> &mut ShakeReporter {
        &mut self.reporter
    }
}
