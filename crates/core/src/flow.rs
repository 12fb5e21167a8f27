//! The shake-to-report flow controller.
//!
//! [`ShakeReporter`] turns a recognized shake gesture into a pre-filled bug
//! report: gate check, eager screenshot, confirmation prompt, composer
//! assembly, completion. It is an explicit state machine driven by the host
//! event loop through a split-phase API; hosts with blocking presenters can
//! let [`ShakeReporter::run_shake`] drive a whole flow in one call.
//!
//! Every failure is handled (and logged) inside the flow. Nothing here
//! propagates errors into host application code.

use crate::capture::ScreenSurface;
use crate::composer::{ComposeResult, ComposerHost, ComposerOutcome, ComposerRequest};
use crate::config::ReportConfig;
use crate::delegate::ReportDelegate;
use crate::prompt::{FormFactor, PromptChoice, PromptPresenter, PromptRequest};
use image::DynamicImage;
use std::mem;
use std::sync::Weak;
use tracing::{debug, error, info};

/// What the flow asks the host to do next, or how it ended.
///
/// Terminal variants (everything except [`ShowPrompt`](Self::ShowPrompt)
/// and [`PresentComposer`](Self::PresentComposer)) leave the reporter idle
/// and ready for the next shake.
#[derive(Debug, PartialEq)]
pub enum FlowStep {
    /// The call did not fit the current state and was dropped.
    Ignored,
    /// The delegate vetoed the prompt; nothing was captured or shown.
    Suppressed,
    /// No recipients are configured; the flow aborted before any UI.
    MissingRecipients,
    /// Show the confirmation prompt and feed the user's choice to
    /// [`ShakeReporter::resolve_prompt`].
    ShowPrompt(PromptRequest),
    /// The user declined the prompt.
    Cancelled,
    /// Present this report and feed the terminal outcome to
    /// [`ShakeReporter::finish_composer`].
    PresentComposer(ComposerRequest),
    /// No composer surface was available; the report was dropped silently.
    ComposerUnavailable,
    /// The composer finished with this result. The host dismisses the
    /// presented composer exactly once on seeing this step.
    Completed(ComposeResult),
}

/// Where the reporter currently is between shake and dismissal.
enum FlowState {
    Idle,
    /// The prompt is on screen; the screenshot taken before it was drawn
    /// rides along until the user decides.
    PromptShown { screenshot: Option<DynamicImage> },
    ComposerRequested,
}

/// The flow controller. One instance per host application.
///
/// Holds the report configuration, an optional weak delegate and the
/// screen surface to photograph. All methods take `&mut self`; at most one
/// flow is ever in flight, and shakes arriving mid-flow are dropped.
pub struct ShakeReporter {
    config: ReportConfig,
    delegate: Option<Weak<dyn ReportDelegate>>,
    surface: Box<dyn ScreenSurface>,
    form_factor: FormFactor,
    state: FlowState,
}

impl ShakeReporter {
    /// Creates a reporter that captures through the given surface.
    pub fn new(config: ReportConfig, surface: Box<dyn ScreenSurface>) -> Self {
        Self {
            config,
            delegate: None,
            surface,
            form_factor: FormFactor::Regular,
            state: FlowState::Idle,
        }
    }

    /// Registers the host delegate. Only a weak reference is kept; a
    /// delegate dropped by the host reverts the reporter to its default
    /// behavior.
    pub fn with_delegate(mut self, delegate: Weak<dyn ReportDelegate>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// Overrides the form factor used to style the confirmation prompt.
    pub fn with_form_factor(mut self, form_factor: FormFactor) -> Self {
        self.form_factor = form_factor;
        self
    }

    /// Feeds a recognized shake into the flow.
    ///
    /// A shake arriving while a report is already in flight is dropped. On
    /// a fresh shake the delegate gate runs first, then the recipient
    /// check, and only then is the screen captured; the prompt comes
    /// strictly after the capture so it never ends up in the screenshot.
    pub fn handle_shake(&mut self) -> FlowStep {
        if !matches!(self.state, FlowState::Idle) {
            debug!("shake ignored: a report flow is already in progress");
            return FlowStep::Ignored;
        }

        if !self.gate_allows() {
            debug!("report prompt suppressed by delegate");
            return FlowStep::Suppressed;
        }

        if self.config.recipients.is_empty() {
            error!("no report recipients configured; dropping shake");
            return FlowStep::MissingRecipients;
        }

        let screenshot = self.surface.capture();
        if screenshot.is_none() {
            debug!("no screenshot available; the report will go out without one");
        }

        self.state = FlowState::PromptShown { screenshot };
        FlowStep::ShowPrompt(PromptRequest::for_form_factor(self.form_factor))
    }

    /// Feeds the user's prompt choice back into the flow.
    ///
    /// Cancel ends the flow; confirm assembles the composer request,
    /// offers it to the delegate for extra attachments and asks the host
    /// to present it.
    pub fn resolve_prompt(&mut self, choice: PromptChoice) -> FlowStep {
        let screenshot = match mem::replace(&mut self.state, FlowState::Idle) {
            FlowState::PromptShown { screenshot } => screenshot,
            other => {
                self.state = other;
                debug!("prompt choice ignored: no prompt is showing");
                return FlowStep::Ignored;
            }
        };

        if choice == PromptChoice::Cancel {
            debug!("user declined the report prompt");
            return FlowStep::Cancelled;
        }

        match ComposerRequest::assemble(&self.config, screenshot) {
            Ok(mut request) => {
                if let Some(delegate) = self.delegate.as_ref().and_then(Weak::upgrade) {
                    delegate.add_report_attachments(&mut request);
                }
                self.state = FlowState::ComposerRequested;
                FlowStep::PresentComposer(request)
            }
            Err(err) => {
                error!("failed to assemble bug report: {err}");
                FlowStep::MissingRecipients
            }
        }
    }

    /// The host found no surface to present the assembled report on.
    ///
    /// A normal outcome, not an error: the flow ends silently and nothing
    /// is dismissed because nothing was presented.
    pub fn composer_unavailable(&mut self) -> FlowStep {
        if !matches!(self.state, FlowState::ComposerRequested) {
            debug!("composer availability ignored: no composer was requested");
            return FlowStep::Ignored;
        }

        self.state = FlowState::Idle;
        debug!("composer surface unavailable; dropping the assembled report");
        FlowStep::ComposerUnavailable
    }

    /// Feeds the composer's terminal outcome back into the flow.
    ///
    /// Logs the result (and any underlying error) and returns
    /// [`FlowStep::Completed`]; the host then dismisses the composer
    /// exactly once. Outcomes delivered with no composer in flight are
    /// dropped, so a stray second completion cannot trigger a second
    /// dismissal.
    pub fn finish_composer(&mut self, outcome: ComposerOutcome) -> FlowStep {
        if !matches!(self.state, FlowState::ComposerRequested) {
            debug!("composer outcome ignored: no composer is in flight");
            return FlowStep::Ignored;
        }
        self.state = FlowState::Idle;

        if let Some(error) = &outcome.error {
            error!("composer reported an error: {error}");
        }
        match outcome.result {
            ComposeResult::Sent => info!("bug report sent"),
            ComposeResult::Failed => error!("bug report send failed"),
            ComposeResult::Cancelled => debug!("bug report cancelled"),
        }

        FlowStep::Completed(outcome.result)
    }

    /// Drives one complete shake-to-report flow with blocking presenters.
    ///
    /// Strings the split-phase calls together: prompt, composer
    /// availability check, presentation, then a single dismissal once the
    /// composer finishes. Returns the terminal step; the reporter is idle
    /// again afterwards.
    pub fn run_shake(
        &mut self,
        presenter: &mut dyn PromptPresenter,
        composer: &mut dyn ComposerHost,
    ) -> FlowStep {
        let request = match self.handle_shake() {
            FlowStep::ShowPrompt(request) => request,
            step => return step,
        };

        let choice = presenter.present(&request);
        let request = match self.resolve_prompt(choice) {
            FlowStep::PresentComposer(request) => request,
            step => return step,
        };

        if !composer.can_compose() {
            return self.composer_unavailable();
        }

        let outcome = composer.present(request);
        let step = self.finish_composer(outcome);
        if matches!(step, FlowStep::Completed(_)) {
            composer.dismiss();
        }
        step
    }

    /// Consults the delegate gate. A missing or already dropped delegate
    /// leaves the gate open.
    fn gate_allows(&self) -> bool {
        match self.delegate.as_ref().and_then(Weak::upgrade) {
            Some(delegate) => delegate.should_present_report_prompt(),
            None => true,
        }
    }
}
