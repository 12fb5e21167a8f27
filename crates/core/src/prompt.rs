//! The confirmation prompt offered after a shake is recognized.

/// Title of the confirmation prompt.
pub const PROMPT_TITLE: &str = "Shake detected!";
/// Message of the confirmation prompt.
pub const PROMPT_MESSAGE: &str = "Would you like to report a bug?";
/// Label of the confirming button.
pub const REPORT_ACTION_TITLE: &str = "Report A Bug";
/// Label of the declining button.
pub const CANCEL_ACTION_TITLE: &str = "Cancel";

/// Rough size class of the host device, used to pick a prompt style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormFactor {
    /// Phone-sized screens; the prompt is presented as a bottom sheet.
    Compact,
    /// Everything else; the prompt is presented as a centered dialog.
    Regular,
}

/// Visual style of the confirmation prompt.
///
/// Purely presentational; both styles offer the same two choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptStyle {
    Sheet,
    Dialog,
}

/// The user's answer to the confirmation prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptChoice {
    Report,
    Cancel,
}

/// Everything a presenter needs to draw the confirmation prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PromptRequest {
    pub title: &'static str,
    pub message: &'static str,
    pub style: PromptStyle,
}

impl PromptRequest {
    /// Builds the stock prompt in the style fitting the given form factor.
    pub fn for_form_factor(form_factor: FormFactor) -> Self {
        let style = match form_factor {
            FormFactor::Compact => PromptStyle::Sheet,
            FormFactor::Regular => PromptStyle::Dialog,
        };
        Self {
            title: PROMPT_TITLE,
            message: PROMPT_MESSAGE,
            style,
        }
    }
}

/// Presents a confirmation prompt and reports the user's single choice.
///
/// Implementations must resolve to exactly one [`PromptChoice`] per call.
/// A prompt dismissed without an explicit choice reports
/// [`PromptChoice::Cancel`].
pub trait PromptPresenter {
    fn present(&mut self, request: &PromptRequest) -> PromptChoice;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_hosts_get_a_sheet() {
        let request = PromptRequest::for_form_factor(FormFactor::Compact);
        assert_eq!(request.style, PromptStyle::Sheet);
        assert_eq!(request.title, "Shake detected!");
        assert_eq!(request.message, "Would you like to report a bug?");
    }

    #[test]
    fn regular_hosts_get_a_dialog() {
        let request = PromptRequest::for_form_factor(FormFactor::Regular);
        assert_eq!(request.style, PromptStyle::Dialog);
    }
}
