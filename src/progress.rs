//! Progress and ETA accounting, and the terminal reporter built on it.

use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    engine::{Attempt, Match, Observer},
    estimate::Estimate,
};

/// Minimum time between two redraws of the progress line.
const REDRAW_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    pub attempt: u64,
    pub total: Estimate,
    pub elapsed: Duration,
}

impl Progress {
    pub fn new(attempt: u64, total: Estimate, elapsed: Duration) -> Self {
        Self {
            attempt,
            total,
            elapsed,
        }
    }

    /// Share of the estimated work done, in percent.
    pub fn percent(&self) -> Option<f64> {
        match self.total {
            Estimate::Exact(0) => Some(100.0),
            Estimate::Exact(total) => Some(self.attempt as f64 / total as f64 * 100.0),
            Estimate::Overflow => None,
        }
    }

    /// Time left at the rate observed so far.
    ///
    /// `None` before the first attempt, when the total overflowed, or when the
    /// projection does not fit in a `Duration`.
    pub fn remaining(&self) -> Option<Duration> {
        let total = self.total.exact()?;
        if self.attempt == 0 {
            return None;
        }
        let left = total.saturating_sub(u128::from(self.attempt));
        let secs = self.elapsed.as_secs_f64() * left as f64 / self.attempt as f64;
        Duration::try_from_secs_f64(secs).ok()
    }
}

/// Formats a duration as `HH:MM:SS`, hours unbounded.
pub fn format_clock(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
}

/// Prints run events to the terminal.
///
/// Verbose runs get one line per comparison, otherwise a single progress
/// line is kept up to date.
pub struct TerminalReporter {
    verbose: bool,
    bar: ProgressBar,
    last_draw: Option<Instant>,
}

impl TerminalReporter {
    pub fn new(total: Estimate, verbose: bool) -> Self {
        let bar = match total.exact().map(u64::try_from) {
            _ if verbose => ProgressBar::hidden(),
            Some(Ok(len)) => {
                let bar = ProgressBar::new(len);
                if let Ok(style) = ProgressStyle::with_template(
                    "{spinner:.green} [{wide_bar:.cyan/blue}] {msg}",
                ) {
                    bar.set_style(style);
                }
                bar
            }
            _ => {
                let bar = ProgressBar::new_spinner();
                if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
                    bar.set_style(style);
                }
                bar
            }
        };
        Self {
            verbose,
            bar,
            last_draw: None,
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    fn print(&self, line: String) {
        if self.bar.is_hidden() {
            println!("{line}");
        } else {
            self.bar.println(line);
        }
    }
}

impl Observer for TerminalReporter {
    fn on_attempt(&mut self, attempt: &Attempt<'_>) {
        if !self.verbose {
            return;
        }
        println!(
            "[ATTEMPT {}/{}] Algorithm:{} | Separator='{}' | Input:'{}' | Hash={}",
            attempt.index,
            attempt.total,
            attempt.algorithm,
            attempt.separator,
            attempt.candidate,
            hex::encode(attempt.digest)
        );
    }

    fn on_progress(&mut self, progress: &Progress) {
        if self.verbose {
            return;
        }
        let now = Instant::now();
        if self
            .last_draw
            .is_some_and(|last| now.duration_since(last) < REDRAW_INTERVAL)
        {
            return;
        }
        self.last_draw = Some(now);

        let percent = progress
            .percent()
            .map_or_else(|| "?".to_string(), |p| format!("{p:.2}%"));
        let remaining = progress
            .remaining()
            .map_or_else(|| "--:--:--".to_string(), format_clock);
        self.bar.set_position(progress.attempt);
        self.bar.set_message(format!(
            "Attempt {}/{} ({percent}) | Elapsed: {} | Remaining: {remaining}",
            progress.attempt,
            progress.total,
            format_clock(progress.elapsed)
        ));
    }

    fn on_match(&mut self, found: &Match) {
        self.print(format!(
            "[MATCH] Hash={} | Algo={} | Separator='{}' | Input:'{}'",
            found.target, found.algorithm, found.separator, found.candidate
        ));
    }
}
