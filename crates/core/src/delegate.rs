//! Host hooks for gating and enriching bug reports.

use crate::composer::ComposerRequest;

/// Optional hooks a host application implements to influence the flow.
///
/// The flow controller keeps only a [`Weak`](std::sync::Weak) reference;
/// the host owns the delegate. A delegate that has already been dropped
/// behaves exactly like no delegate at all: the prompt is offered and no
/// extra attachments are added.
pub trait ReportDelegate {
    /// Asked on every recognized shake, before anything is captured or
    /// shown. Returning `false` suppresses the report flow for this shake.
    fn should_present_report_prompt(&self) -> bool;

    /// Invited to append extra attachments (logs, traces) to an assembled
    /// report. The default implementation adds nothing.
    fn add_report_attachments(&self, _request: &mut ComposerRequest) {}
}
