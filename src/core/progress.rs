//! Progress line for recursive walks and the spinner for single operations

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use super::config::{
    ETA_REFRESH_INTERVAL, ETA_UNKNOWN, PATH_DISPLAY_WIDTH, PROGRESS_BAR_WIDTH,
    PROGRESS_EMPTY_CHAR, PROGRESS_FILLED_CHAR, PROGRESS_RENDER_INTERVAL, PROGRESS_TEMPLATE,
    SPINNER_TEMPLATE, SPINNER_TICK_CHARS, SPINNER_TICK_INTERVAL,
};
use crate::utils::shorten_path;

/// Mutable progress state, guarded as a whole by one mutex
#[derive(Debug)]
struct ProgressState {
    total: usize,
    current: usize,
    repos_found: usize,
    started_at: Option<Instant>,
    last_render: Option<Instant>,
    last_eta: Option<Instant>,
    eta: String,
    enabled: bool,
    #[cfg(test)]
    renders: usize,
}

/// Copy of the state a render is computed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub total: usize,
    pub current: usize,
    pub repos_found: usize,
    pub eta: String,
}

/// Tracks directories processed during a walk and draws a throttled progress line
///
/// Lifecycle: `new` → `set_total` → `start` → `update`* → `finish`.
/// The line is computed from a snapshot taken under the lock; drawing happens
/// after the lock is released.
pub struct ProgressTracker {
    state: Mutex<ProgressState>,
    bar: ProgressBar,
}

impl ProgressTracker {
    /// Creates a tracker; with `enabled == false` nothing is ever drawn
    pub fn new(enabled: bool) -> Self {
        let bar = if enabled {
            let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
            bar.set_style(
                ProgressStyle::with_template(PROGRESS_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            bar
        } else {
            ProgressBar::hidden()
        };

        Self {
            state: Mutex::new(ProgressState {
                total: 0,
                current: 0,
                repos_found: 0,
                started_at: None,
                last_render: None,
                last_eta: None,
                eta: ETA_UNKNOWN.to_string(),
                enabled,
                #[cfg(test)]
                renders: 0,
            }),
            bar,
        }
    }

    pub fn set_total(&self, total: usize) {
        self.lock().total = total;
    }

    /// Records the start time and draws the initial line
    pub fn start(&self) {
        self.start_at(Instant::now());
    }

    pub(crate) fn start_at(&self, now: Instant) {
        let line = {
            let mut state = self.lock();
            state.started_at = Some(now);
            state.last_render = Some(now);
            state.enabled.then(|| take_render(&mut state))
        };
        self.draw(line.flatten());
    }

    /// Counts one processed directory and redraws if the render interval elapsed
    pub fn update(&self, is_repository: bool) {
        self.update_at(is_repository, Instant::now());
    }

    pub(crate) fn update_at(&self, is_repository: bool, now: Instant) {
        let line = {
            let mut state = self.lock();
            state.current += 1;
            if is_repository {
                state.repos_found += 1;
            }

            let due = state
                .last_render
                .map_or(true, |last| now.saturating_duration_since(last) >= PROGRESS_RENDER_INTERVAL);
            if !due {
                return;
            }
            state.last_render = Some(now);
            refresh_eta(&mut state, now);
            if state.enabled {
                take_render(&mut state)
            } else {
                None
            }
        };
        self.draw(line);
    }

    /// Clears the progress line and restores the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// Whether the line is drawn at all
    pub fn is_enabled(&self) -> bool {
        self.lock().enabled
    }

    /// Side channel for out-of-band lines
    ///
    /// The progress line is cleared, `emit` prints, and the line is redrawn
    /// beneath whatever it printed so the bar stays last on screen.
    pub fn show_message<F: FnOnce() -> R, R>(&self, emit: F) -> R {
        self.bar.suspend(emit)
    }

    #[cfg(test)]
    fn snapshot(&self) -> ProgressSnapshot {
        snapshot_of(&self.lock())
    }

    #[cfg(test)]
    fn render_count(&self) -> usize {
        self.lock().renders
    }

    fn draw(&self, line: Option<String>) {
        if let Some(line) = line {
            self.bar.set_message(line);
        }
    }

    fn lock(&self) -> MutexGuard<'_, ProgressState> {
        // A poisoned lock only means a render panicked; the counters are still usable
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn snapshot_of(state: &ProgressState) -> ProgressSnapshot {
    ProgressSnapshot {
        total: state.total,
        current: state.current,
        repos_found: state.repos_found,
        eta: state.eta.clone(),
    }
}

fn take_render(state: &mut ProgressState) -> Option<String> {
    #[cfg(test)]
    {
        state.renders += 1;
    }
    render_line(&snapshot_of(state))
}

fn refresh_eta(state: &mut ProgressState, now: Instant) {
    let due = state
        .last_eta
        .map_or(true, |last| now.saturating_duration_since(last) >= ETA_REFRESH_INTERVAL);
    if !due {
        return;
    }
    if let Some(started) = state.started_at {
        state.eta = estimate_eta(
            state.current,
            state.total,
            now.saturating_duration_since(started),
        );
        state.last_eta = Some(now);
    }
}

/// Formats the progress line; None until a total is known
///
/// `Progress: ██████░░░░  60% [6/10 dirs, 2 git repos found] ETA 4s`
pub fn render_line(snapshot: &ProgressSnapshot) -> Option<String> {
    if snapshot.total == 0 {
        return None;
    }

    let fraction = (snapshot.current as f64 / snapshot.total as f64).min(1.0);
    let filled = ((fraction * PROGRESS_BAR_WIDTH as f64) as usize).min(PROGRESS_BAR_WIDTH);
    let bar: String = std::iter::repeat(PROGRESS_FILLED_CHAR)
        .take(filled)
        .chain(std::iter::repeat(PROGRESS_EMPTY_CHAR).take(PROGRESS_BAR_WIDTH - filled))
        .collect();

    Some(format!(
        "Progress: {bar} {:3.0}% [{}/{} dirs, {} git repos found] ETA {}",
        fraction * 100.0,
        snapshot.current,
        snapshot.total,
        snapshot.repos_found,
        snapshot.eta
    ))
}

/// Remaining time at the current rate: `remaining / (current / elapsed)`
pub fn estimate_eta(current: usize, total: usize, elapsed: Duration) -> String {
    let elapsed_secs = elapsed.as_secs_f64();
    if current == 0 || elapsed_secs <= 0.0 {
        return ETA_UNKNOWN.to_string();
    }
    let rate = current as f64 / elapsed_secs;
    let remaining = total.saturating_sub(current) as f64 / rate;
    format_duration(Duration::from_secs_f64(remaining))
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let mins = secs / 60;
    let rem = secs % 60;
    if mins > 0 {
        format!("{mins}m {rem}s")
    } else {
        format!("{rem}s")
    }
}

/// Transient spinner for a mutating git operation outside of a walk
///
/// The steady tick runs on indicatif's own thread; dropping the spinner
/// stops it and clears the line.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn start(operation: &str, path: &Path) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template(SPINNER_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars(SPINNER_TICK_CHARS),
        );
        bar.set_message(format!(
            "Running git {operation} on {}",
            shorten_path(&path.display().to_string(), PATH_DISPLAY_WIDTH)
        ));
        bar.enable_steady_tick(SPINNER_TICK_INTERVAL);
        Self { bar }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}
