//! End-to-end tests of the shake-to-report flow through the public API,
//! with scripted collaborators recording a shared event log.

use bugshake_core::{
    BugShaker, ComposeResult, ComposerHost, ComposerOutcome, ComposerRequest, FlowStep,
    PromptChoice, PromptPresenter, PromptRequest, ReportConfig, ReportDelegate, ScreenSurface,
    ShakeReporter,
};
use image::DynamicImage;
use std::sync::{Arc, Mutex};

type EventLog = Arc<Mutex<Vec<&'static str>>>;

fn log(events: &EventLog, event: &'static str) {
    events.lock().unwrap().push(event);
}

struct LoggingSurface {
    events: EventLog,
    image: Option<DynamicImage>,
}

impl ScreenSurface for LoggingSurface {
    fn capture(&mut self) -> Option<DynamicImage> {
        log(&self.events, "capture");
        self.image.clone()
    }
}

struct ScriptedPresenter {
    events: EventLog,
    choice: PromptChoice,
}

impl PromptPresenter for ScriptedPresenter {
    fn present(&mut self, _request: &PromptRequest) -> PromptChoice {
        log(&self.events, "prompt");
        self.choice
    }
}

struct ScriptedComposer {
    events: EventLog,
    available: bool,
    outcome: ComposerOutcome,
    presented: Vec<ComposerRequest>,
    dismissals: u32,
}

impl ScriptedComposer {
    fn new(events: EventLog, outcome: ComposerOutcome) -> Self {
        Self {
            events,
            available: true,
            outcome,
            presented: Vec::new(),
            dismissals: 0,
        }
    }
}

impl ComposerHost for ScriptedComposer {
    fn can_compose(&self) -> bool {
        self.available
    }

    fn present(&mut self, request: ComposerRequest) -> ComposerOutcome {
        log(&self.events, "composer");
        self.presented.push(request);
        self.outcome.clone()
    }

    fn dismiss(&mut self) {
        log(&self.events, "dismiss");
        self.dismissals += 1;
    }
}

fn test_image() -> DynamicImage {
    DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        8,
        6,
        image::Rgba([120, 130, 140, 255]),
    ))
}

fn scenario_config() -> ReportConfig {
    ReportConfig::new(vec!["a@x.com".into()])
        .with_subject("Bug")
        .with_body("Hi")
}

fn reporter(config: ReportConfig, events: &EventLog, image: Option<DynamicImage>) -> ShakeReporter {
    let surface = LoggingSurface {
        events: Arc::clone(events),
        image,
    };
    ShakeReporter::new(config, Box::new(surface))
}

#[test]
fn confirmed_flow_produces_the_prefilled_report() {
    let events: EventLog = Arc::default();
    let mut reporter = reporter(scenario_config(), &events, Some(test_image()));
    let mut presenter = ScriptedPresenter {
        events: Arc::clone(&events),
        choice: PromptChoice::Report,
    };
    let mut composer = ScriptedComposer::new(Arc::clone(&events), ComposerOutcome::sent());

    let step = reporter.run_shake(&mut presenter, &mut composer);
    assert_eq!(step, FlowStep::Completed(ComposeResult::Sent));

    let request = &composer.presented[0];
    assert_eq!(request.recipients, vec!["a@x.com".to_string()]);
    assert_eq!(request.subject, "Bug");
    assert_eq!(request.body, "Hi");
    assert_eq!(request.attachments.len(), 1);
    assert_eq!(request.attachments[0].filename, "screenshot.jpeg");
    assert_eq!(request.attachments[0].mime_type, "image/jpeg");
}

#[test]
fn missing_recipients_shows_no_prompt() {
    let events: EventLog = Arc::default();
    let mut reporter = reporter(ReportConfig::default(), &events, Some(test_image()));
    let mut presenter = ScriptedPresenter {
        events: Arc::clone(&events),
        choice: PromptChoice::Report,
    };
    let mut composer = ScriptedComposer::new(Arc::clone(&events), ComposerOutcome::sent());

    let step = reporter.run_shake(&mut presenter, &mut composer);
    assert_eq!(step, FlowStep::MissingRecipients);
    assert!(events.lock().unwrap().is_empty());

    // Back at idle: the next shake is evaluated afresh.
    assert_eq!(
        reporter.run_shake(&mut presenter, &mut composer),
        FlowStep::MissingRecipients
    );
}

#[test]
fn vetoing_delegate_means_no_capture_and_no_prompt() {
    struct Veto;

    impl ReportDelegate for Veto {
        fn should_present_report_prompt(&self) -> bool {
            false
        }
    }

    let delegate: Arc<dyn ReportDelegate> = Arc::new(Veto);
    let events: EventLog = Arc::default();
    let mut reporter = reporter(scenario_config(), &events, Some(test_image()))
        .with_delegate(Arc::downgrade(&delegate));
    let mut presenter = ScriptedPresenter {
        events: Arc::clone(&events),
        choice: PromptChoice::Report,
    };
    let mut composer = ScriptedComposer::new(Arc::clone(&events), ComposerOutcome::sent());

    let step = reporter.run_shake(&mut presenter, &mut composer);
    assert_eq!(step, FlowStep::Suppressed);
    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn capture_strictly_precedes_the_prompt() {
    let events: EventLog = Arc::default();
    let mut reporter = reporter(scenario_config(), &events, Some(test_image()));
    let mut presenter = ScriptedPresenter {
        events: Arc::clone(&events),
        choice: PromptChoice::Report,
    };
    let mut composer = ScriptedComposer::new(Arc::clone(&events), ComposerOutcome::sent());

    reporter.run_shake(&mut presenter, &mut composer);
    assert_eq!(
        *events.lock().unwrap(),
        vec!["capture", "prompt", "composer", "dismiss"]
    );
}

#[test]
fn declined_prompt_presents_nothing() {
    let events: EventLog = Arc::default();
    let mut reporter = reporter(scenario_config(), &events, Some(test_image()));
    let mut presenter = ScriptedPresenter {
        events: Arc::clone(&events),
        choice: PromptChoice::Cancel,
    };
    let mut composer = ScriptedComposer::new(Arc::clone(&events), ComposerOutcome::sent());

    let step = reporter.run_shake(&mut presenter, &mut composer);
    assert_eq!(step, FlowStep::Cancelled);
    assert!(composer.presented.is_empty());
    assert_eq!(composer.dismissals, 0);
    assert_eq!(*events.lock().unwrap(), vec!["capture", "prompt"]);
}

#[test]
fn dismissal_happens_once_for_each_terminal_result() {
    let outcomes = [
        (ComposerOutcome::sent(), ComposeResult::Sent),
        (ComposerOutcome::failed("SMTP failure"), ComposeResult::Failed),
        (ComposerOutcome::cancelled(), ComposeResult::Cancelled),
    ];

    for (outcome, result) in outcomes {
        let events: EventLog = Arc::default();
        let mut reporter = reporter(scenario_config(), &events, Some(test_image()));
        let mut presenter = ScriptedPresenter {
            events: Arc::clone(&events),
            choice: PromptChoice::Report,
        };
        let mut composer = ScriptedComposer::new(Arc::clone(&events), outcome);

        let step = reporter.run_shake(&mut presenter, &mut composer);
        assert_eq!(step, FlowStep::Completed(result));
        assert_eq!(composer.dismissals, 1);
    }
}

#[test]
fn unavailable_composer_skips_presentation_and_dismissal() {
    let events: EventLog = Arc::default();
    let mut reporter = reporter(scenario_config(), &events, Some(test_image()));
    let mut presenter = ScriptedPresenter {
        events: Arc::clone(&events),
        choice: PromptChoice::Report,
    };
    let mut composer = ScriptedComposer::new(Arc::clone(&events), ComposerOutcome::sent());
    composer.available = false;

    let step = reporter.run_shake(&mut presenter, &mut composer);
    assert_eq!(step, FlowStep::ComposerUnavailable);
    assert!(composer.presented.is_empty());
    assert_eq!(composer.dismissals, 0);
}

#[test]
fn delegate_attachments_keep_their_order() {
    struct TwoLogs;

    impl ReportDelegate for TwoLogs {
        fn should_present_report_prompt(&self) -> bool {
            true
        }

        fn add_report_attachments(&self, request: &mut ComposerRequest) {
            request.add_attachment(bugshake_core::Attachment::new(
                b"first".to_vec(),
                "text/plain",
                "one.txt",
            ));
            request.add_attachment(bugshake_core::Attachment::new(
                b"second".to_vec(),
                "text/plain",
                "two.txt",
            ));
        }
    }

    let delegate: Arc<dyn ReportDelegate> = Arc::new(TwoLogs);
    let events: EventLog = Arc::default();
    let mut reporter = reporter(scenario_config(), &events, Some(test_image()))
        .with_delegate(Arc::downgrade(&delegate));
    let mut presenter = ScriptedPresenter {
        events: Arc::clone(&events),
        choice: PromptChoice::Report,
    };
    let mut composer = ScriptedComposer::new(Arc::clone(&events), ComposerOutcome::sent());

    reporter.run_shake(&mut presenter, &mut composer);

    let names: Vec<&str> = composer.presented[0]
        .attachments
        .iter()
        .map(|a| a.filename.as_str())
        .collect();
    assert_eq!(names, vec!["screenshot.jpeg", "one.txt", "two.txt"]);
}

#[test]
fn facade_drives_a_flow_with_custom_presenters() {
    let events: EventLog = Arc::default();
    let mut shaker = BugShaker::new(scenario_config());
    let mut presenter = ScriptedPresenter {
        events: Arc::clone(&events),
        choice: PromptChoice::Report,
    };
    let mut composer = ScriptedComposer::new(Arc::clone(&events), ComposerOutcome::sent());

    // The facade captures through the real screen capturer; on a headless
    // machine that yields no screenshot, which the flow tolerates.
    let step = shaker.shake_with(&mut presenter, &mut composer);
    assert_eq!(step, FlowStep::Completed(ComposeResult::Sent));
    assert_eq!(composer.presented[0].recipients, vec!["a@x.com".to_string()]);
    assert_eq!(composer.dismissals, 1);
}
