//! A `mailto:`-based composer surface.
//!
//! `mailto:` URLs cannot carry attachments, so assembled attachments are
//! staged as files under the user's data directory and their paths are
//! appended to the report body for manual attaching. The report is
//! reviewed on the terminal before the mail client opens.

use crate::settings;
use bugshake_core::{ComposeResult, ComposerHost, ComposerOutcome, ComposerRequest};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

/// Composer surface that opens the user's mail client via a `mailto:` URL.
#[derive(Default)]
pub struct MailtoComposer {
    staged: Option<StagedReport>,
}

/// Files written for a presented report, kept until dismissal decides
/// their fate.
struct StagedReport {
    dir: PathBuf,
    result: ComposeResult,
}

impl MailtoComposer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ComposerHost for MailtoComposer {
    fn can_compose(&self) -> bool {
        // A mailto URL can always be handed to the OS; whether a mail
        // client picks it up is only known at launch time.
        true
    }

    fn present(&mut self, request: ComposerRequest) -> ComposerOutcome {
        let (dir, files) = stage_attachments(&request);
        let url = build_mailto_url(&request, &files);

        print_review(&request, &files);
        let outcome = if confirm_send() {
            match webbrowser::open(&url) {
                Ok(()) => ComposerOutcome::sent(),
                Err(e) => ComposerOutcome::failed(format!("Failed to open mail client: {}", e)),
            }
        } else {
            ComposerOutcome::cancelled()
        };

        self.staged = dir.map(|dir| StagedReport {
            dir,
            result: outcome.result,
        });
        outcome
    }

    /// Sent reports keep their staged files around for the mail client;
    /// every other result removes them.
    fn dismiss(&mut self) {
        let Some(staged) = self.staged.take() else {
            return;
        };

        if staged.result == ComposeResult::Sent {
            info!("report attachments staged at {}", staged.dir.display());
        } else if let Err(e) = fs::remove_dir_all(&staged.dir) {
            warn!("failed to remove staged attachments: {}", e);
        }
    }
}

/// Writes each attachment under a fresh timestamped directory.
///
/// Staging failures are logged and skipped; the report still goes out,
/// just without that file on disk.
fn stage_attachments(request: &ComposerRequest) -> (Option<PathBuf>, Vec<PathBuf>) {
    if request.attachments.is_empty() {
        return (None, Vec::new());
    }

    let Some(root) = settings::staging_root() else {
        warn!("no data directory available; attachments will not be staged");
        return (None, Vec::new());
    };

    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let dir = root.join(stamp.to_string());
    if let Err(e) = fs::create_dir_all(&dir) {
        warn!("failed to create staging directory {}: {}", dir.display(), e);
        return (None, Vec::new());
    }

    let mut staged = Vec::new();
    for attachment in &request.attachments {
        let path = dir.join(&attachment.filename);
        match fs::write(&path, &attachment.data) {
            Ok(()) => staged.push(path),
            Err(e) => warn!("failed to stage {}: {}", attachment.filename, e),
        }
    }

    (Some(dir), staged)
}

/// Builds the `mailto:` URL, percent-encoding the subject and body.
fn build_mailto_url(request: &ComposerRequest, staged: &[PathBuf]) -> String {
    let mut body = request.body.clone();
    if !staged.is_empty() {
        if !body.is_empty() {
            body.push_str("\n\n");
        }
        body.push_str("Attachments staged at:\n");
        for path in staged {
            body.push_str(&path.display().to_string());
            body.push('\n');
        }
    }

    format!(
        "mailto:{}?subject={}&body={}",
        request.recipients.join(","),
        urlencoding::encode(&request.subject),
        urlencoding::encode(&body)
    )
}

fn print_review(request: &ComposerRequest, staged: &[PathBuf]) {
    println!();
    println!("Bug report ready:");
    println!("  To:      {}", request.recipients.join(", "));
    println!("  Subject: {}", request.subject);
    if !request.body.is_empty() {
        println!("  Body:    {}", request.body);
    }
    for path in staged {
        println!("  Attachment: {}", path.display());
    }
}

/// Reads the send decision from the terminal. EOF counts as cancel.
fn confirm_send() -> bool {
    print!("Open your mail client now? [s]end/[c]ancel: ");
    let _ = io::stdout().flush();

    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(n) if n > 0 => {
            let answer = input.trim().to_ascii_lowercase();
            answer == "s" || answer == "send"
        }
        _ => false,
    }
}
