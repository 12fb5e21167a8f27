mod mailto;
mod settings;

use anyhow::{Context, Result};
use bugshake_core::{
    BugShaker, ComposeResult, FlowStep, PromptChoice, PromptPresenter, PromptRequest, ReportConfig,
};
use clap::Parser;
use mailto::MailtoComposer;
use settings::Settings;
use std::cell::Cell;
use std::env;
use std::io::{self, Write};
use std::sync::mpsc;
use std::thread;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Recipient address for bug reports (repeatable)
    #[arg(short, long)]
    to: Vec<String>,

    /// Subject line for the report
    #[arg(short, long)]
    subject: Option<String>,

    /// Body text for the report
    #[arg(short, long)]
    body: Option<String>,

    /// Keep running and file a report on every Ctrl+Alt+B
    #[arg(short, long)]
    watch: bool,

    /// Confirm on stdin instead of opening a dialog window
    #[arg(long)]
    no_gui: bool,

    /// Persist the resolved recipients/subject/body for future runs
    #[arg(long)]
    save: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Load .env file if it exists, ignore if it doesn't
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    init_logging(args.verbose);

    let stored = Settings::load();
    let config = resolve_config(&args, stored);

    if args.save {
        let snapshot = Settings {
            recipients: config.recipients.clone(),
            subject: config.subject.clone(),
            body: config.body.clone(),
        };
        snapshot.save().context("Failed to save settings")?;
        info!("settings saved");
    }

    let mut shaker = BugShaker::new(config);
    let mut composer = MailtoComposer::new();

    if args.watch {
        info!("watching for Ctrl+Alt+B; press it to file a bug report");
        let shakes = spawn_hotkey_listener();
        while shakes.recv().is_ok() {
            let step = run_flow(&mut shaker, &mut composer, args.no_gui);
            print_outcome(&step);
            // Drop hotkey presses that queued up while the flow was busy
            while shakes.try_recv().is_ok() {}
        }
        error!("hotkey listener disconnected");
    } else {
        // One synthetic shake, then exit once the flow settles
        let step = run_flow(&mut shaker, &mut composer, args.no_gui);
        print_outcome(&step);
    }

    Ok(())
}

/// Runs one flow, confirming on stdin or through the dialog window.
fn run_flow(shaker: &mut BugShaker, composer: &mut MailtoComposer, no_gui: bool) -> FlowStep {
    if no_gui {
        let mut presenter = StdinPresenter;
        shaker.shake_with(&mut presenter, composer)
    } else {
        shaker.shake(composer)
    }
}

/// One user-facing line per terminal step; detail lives in the logs.
fn print_outcome(step: &FlowStep) {
    match step {
        FlowStep::MissingRecipients => {
            println!("No recipients configured. Pass --to, set BUGSHAKE_TO or use --save.");
        }
        FlowStep::Cancelled | FlowStep::Completed(ComposeResult::Cancelled) => {
            println!("Report cancelled.");
        }
        FlowStep::Completed(ComposeResult::Sent) => {
            println!("Report handed to your mail client.");
        }
        FlowStep::Completed(ComposeResult::Failed) => {
            println!("Could not open a mail client for the report.");
        }
        _ => {}
    }
}

/// Flags beat environment variables beat the settings file.
fn resolve_config(args: &Args, stored: Settings) -> ReportConfig {
    let recipients = if !args.to.is_empty() {
        args.to.clone()
    } else if let Some(from_env) = env_recipients() {
        from_env
    } else {
        stored.recipients
    };

    ReportConfig {
        recipients,
        subject: args
            .subject
            .clone()
            .or_else(|| env::var("BUGSHAKE_SUBJECT").ok())
            .or(stored.subject),
        body: args
            .body
            .clone()
            .or_else(|| env::var("BUGSHAKE_BODY").ok())
            .or(stored.body),
    }
}

/// Comma-separated recipients from BUGSHAKE_TO.
fn env_recipients() -> Option<Vec<String>> {
    let raw = env::var("BUGSHAKE_TO").ok()?;
    let recipients: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    (!recipients.is_empty()).then_some(recipients)
}

/// Confirmation prompt on stdin for sessions without a display.
struct StdinPresenter;

impl PromptPresenter for StdinPresenter {
    fn present(&mut self, request: &PromptRequest) -> PromptChoice {
        println!("{}", request.title);
        print!("{} [y/N]: ", request.message);
        let _ = io::stdout().flush();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(n) if n > 0 && input.trim().eq_ignore_ascii_case("y") => PromptChoice::Report,
            _ => PromptChoice::Cancel,
        }
    }
}

/// Global hotkey listener standing in for a shake recognizer.
///
/// Sends one unit event per Ctrl+Alt+B press. The listener runs on its
/// own thread; flows always run on the caller's thread so the dialog
/// window stays on the main thread.
fn spawn_hotkey_listener() -> mpsc::Receiver<()> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let ctrl = Cell::new(false);
        let alt = Cell::new(false);

        let result = rdev::listen(move |event: rdev::Event| match event.event_type {
            rdev::EventType::KeyPress(key) => match key {
                rdev::Key::ControlLeft | rdev::Key::ControlRight => ctrl.set(true),
                rdev::Key::Alt | rdev::Key::AltGr => alt.set(true),
                rdev::Key::KeyB => {
                    if ctrl.get() && alt.get() {
                        let _ = tx.send(());
                    }
                }
                _ => {}
            },
            rdev::EventType::KeyRelease(key) => match key {
                rdev::Key::ControlLeft | rdev::Key::ControlRight => ctrl.set(false),
                rdev::Key::Alt | rdev::Key::AltGr => alt.set(false),
                _ => {}
            },
            _ => {}
        });

        // ListenError only implements Debug
        if let Err(err) = result {
            error!("hotkey listener stopped: {err:?}");
        }
    });

    rx
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
