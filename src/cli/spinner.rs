//! Interval-driven progress line for interactive terminals.

use crate::services::progress::ProgressTracker;
use std::io::Write;
use std::time::Duration;
use tokio::task::JoinHandle;

const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// Format one progress line, e.g. `⠋ Compressing files... 40% (2/5)`.
#[must_use]
pub fn render_line(frame: usize, message: &str, tracker: &ProgressTracker) -> String {
    let snapshot = tracker.snapshot();
    format!(
        "\r{} {message}... {}% ({}/{})",
        FRAMES[frame % FRAMES.len()],
        snapshot.percent(),
        snapshot.files_processed,
        snapshot.total_files
    )
}

fn draw(line: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(line.as_bytes());
    let _ = stdout.flush();
}

/// Background task redrawing the progress line on a fixed interval.
///
/// Stopped with [`Spinner::stop`]; dropping it aborts the task as well, so it cannot
/// outlive the run.
pub struct Spinner {
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    /// Start redrawing every `tick`.
    #[must_use]
    pub fn start(message: &str, tracker: ProgressTracker, tick: Duration) -> Self {
        let message = message.to_string();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            let mut frame = 0usize;
            loop {
                interval.tick().await;
                draw(&render_line(frame, &message, &tracker));
                frame = frame.wrapping_add(1);
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    /// A spinner that never draws, for non-interactive output.
    #[must_use]
    pub fn disabled() -> Self {
        Self { handle: None }
    }

    /// Cancel the timer and clear the line.
    pub async fn stop(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
            draw("\r\x1b[2K");
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
