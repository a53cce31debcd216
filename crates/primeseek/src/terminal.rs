//! Terminal front end: progress bar, escalation prompt and Ctrl-C.

use std::io;
use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};
use primeseek_search::{
    percent, CancelToken, EscalationPrompt, FixedAnswer, LevelReport, LinePrompt,
    ProgressReporter,
};
use tracing::warn;

/// Exit status after a second interrupt, as a shell reports SIGINT.
const INTERRUPTED_EXIT: i32 = 130;

/// Renders each level as an indicatif progress bar.
#[derive(Debug, Default)]
pub struct BarProgress {
    bar: Mutex<Option<ProgressBar>>,
    hidden: bool,
}

impl BarProgress {
    /// A visible progress bar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A bar that draws nothing.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            bar: Mutex::new(None),
            hidden: true,
        }
    }

    fn current(&self) -> Option<ProgressBar> {
        self.bar.lock().ok().and_then(|bar| bar.clone())
    }
}

impl ProgressReporter for BarProgress {
    fn level_started(&self, node_count: usize, total: u128) {
        let length = u64::try_from(total).unwrap_or(u64::MAX);
        let bar = if self.hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(length)
        };
        bar.set_length(length);
        bar.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(format!("0% of {total} {node_count}-node expressions evaluated"));

        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(bar);
        }
    }

    fn report(&self, evaluated: u64, total: u128, node_count: usize) {
        if let Some(bar) = self.current() {
            bar.set_position(evaluated);
            bar.set_message(format!(
                "{}% of {total} {node_count}-node expressions evaluated",
                percent(evaluated, total)
            ));
        }
    }

    fn level_finished(&self, report: &LevelReport) {
        let bar = self.bar.lock().ok().and_then(|mut slot| slot.take());
        if let Some(bar) = bar {
            bar.finish_with_message(format!(
                "{} of {} {}-node expressions evaluated, {} matched",
                report.processed(),
                report.total,
                report.node_count,
                report.matches
            ));
        }
    }
}

/// The prompt used between levels: automatic when `assume_yes`, otherwise
/// a Y/N question on standard input.
#[must_use]
pub fn escalation_prompt(assume_yes: bool) -> Box<dyn EscalationPrompt> {
    if assume_yes {
        Box::new(FixedAnswer(true))
    } else {
        Box::new(LinePrompt::new(io::stdin().lock(), io::stdout()))
    }
}

/// Routes Ctrl-C to `token`.
///
/// The first interrupt lets in-flight candidates finish so the summary can
/// still be printed; a second one exits immediately.
///
/// # Errors
///
/// If a handler is already installed or the signal cannot be hooked.
pub fn install_interrupt_handler(token: &CancelToken) -> Result<(), ctrlc::Error> {
    let token = token.clone();
    ctrlc::set_handler(move || {
        if interrupt(&token) {
            std::process::exit(INTERRUPTED_EXIT);
        }
    })
}

/// Handles one interrupt; returns true when the run was already cancelled.
fn interrupt(token: &CancelToken) -> bool {
    if token.is_cancelled() {
        return true;
    }
    warn!("interrupted; stopping after the current candidates (press Ctrl-C again to quit)");
    token.cancel();
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_bar_tracks_levels() {
        let progress = BarProgress::hidden();
        assert!(progress.current().is_none());

        progress.level_started(1, 26);
        progress.report(13, 26, 1);
        let bar = progress.current().unwrap();
        assert_eq!(bar.position(), 13);
        assert!(bar.message().starts_with("50% of 26 1-node"));

        progress.level_finished(&LevelReport {
            node_count: 1,
            total: 26,
            evaluated: 26,
            skipped: 0,
            matches: 0,
            cancelled: false,
        });
        assert!(progress.current().is_none());
    }

    #[test]
    fn test_interrupt_cancels_then_quits() {
        let token = CancelToken::new();
        let worker = token.clone();
        assert!(!interrupt(&token));
        assert!(worker.is_cancelled());
        assert!(interrupt(&token));
    }
}
