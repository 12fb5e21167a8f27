//! Report configuration supplied by the host application.

/// Static report settings: who receives bug reports and the prefilled
/// subject and body text.
///
/// Constructed once by the host and handed to the flow controller. The
/// recipient list is deliberately not validated here; a flow validates it
/// the moment a report is actually being prepared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportConfig {
    /// Addresses that receive bug reports.
    pub recipients: Vec<String>,
    /// Custom subject line; `None` falls back to a stock subject at assembly.
    pub subject: Option<String>,
    /// Custom body text; `None` falls back to an empty body.
    pub body: Option<String>,
}

impl ReportConfig {
    /// Creates a configuration addressed to the given recipients.
    pub fn new(recipients: Vec<String>) -> Self {
        Self {
            recipients,
            subject: None,
            body: None,
        }
    }

    /// Sets the prefilled subject line.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets the prefilled body text.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_fill_optional_fields() {
        let config = ReportConfig::new(vec!["qa@example.com".into()])
            .with_subject("Crash on launch")
            .with_body("Steps: open the app");
        assert_eq!(config.recipients, vec!["qa@example.com".to_string()]);
        assert_eq!(config.subject.as_deref(), Some("Crash on launch"));
        assert_eq!(config.body.as_deref(), Some("Steps: open the app"));
    }

    #[test]
    fn default_config_has_no_recipients() {
        let config = ReportConfig::default();
        assert!(config.recipients.is_empty());
        assert!(config.subject.is_none());
        assert!(config.body.is_none());
    }
}
