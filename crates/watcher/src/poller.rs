use std::time::Duration;

use tokio::sync::mpsc;

use review_common::config::AppConfig;
use review_common::error::WatchError;
use review_common::types::Cursor;
use review_notifier::Notifier;

use crate::fetcher::StatusSource;
use crate::translator::translate_status;

/// Outcome of one successful fetch → translate → notify → advance cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// Whether a notification went out this cycle.
    pub notified: bool,
    /// Cursor after the cycle.
    pub cursor: Cursor,
}

/// Timing knobs for the poll loop.
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    /// Sleep after a successful cycle.
    pub poll_interval: Duration,
    /// Sleep after a failed cycle.
    pub retry_backoff: Duration,
}

impl PollSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            retry_backoff: config.retry_backoff(),
        }
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(300),
            retry_backoff: Duration::from_secs(5),
        }
    }
}

/// Poller that watches the newest review status and forwards it to the chat.
///
/// The cursor only moves after a fully successful cycle, so a window that
/// failed anywhere along the way is fetched again on the next attempt.
pub struct StatusPoller<S, N> {
    source: S,
    notifier: N,
    settings: PollSettings,
    cursor: Cursor,
}

impl<S: StatusSource, N: Notifier> StatusPoller<S, N> {
    pub fn new(source: S, notifier: N, settings: PollSettings, start: Cursor) -> Self {
        Self {
            source,
            notifier,
            settings,
            cursor: start,
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Run cycles until `shutdown_rx` fires or its sender is dropped.
    pub async fn run(&mut self, mut shutdown_rx: mpsc::Receiver<()>) {
        tracing::info!(
            cursor = self.cursor,
            poll_interval_secs = self.settings.poll_interval.as_secs(),
            retry_backoff_secs = self.settings.retry_backoff.as_secs(),
            "Status poller started"
        );

        loop {
            // Shutdown is checked first so a pending stop never starts another cycle
            let outcome = tokio::select! {
                biased;
                _ = shutdown_rx.recv() => break,
                outcome = self.run_cycle() => outcome,
            };

            let pause = match outcome {
                Ok(report) => {
                    tracing::debug!(
                        cursor = report.cursor,
                        notified = report.notified,
                        "Cycle complete"
                    );
                    self.settings.poll_interval
                }
                Err(e) => {
                    tracing::error!(
                        operation = e.operation(),
                        error = %e,
                        cursor = self.cursor,
                        "Cycle failed, retrying after backoff"
                    );
                    self.settings.retry_backoff
                }
            };

            tokio::select! {
                _ = tokio::time::sleep(pause) => {}
                _ = shutdown_rx.recv() => break,
            }
        }

        tracing::info!(cursor = self.cursor, "Status poller stopped");
    }

    /// Run a single cycle against the current cursor.
    ///
    /// On error the cursor is left untouched.
    pub async fn run_cycle(&mut self) -> Result<CycleReport, WatchError> {
        let response = self.source.fetch(self.cursor).await?;

        let mut notified = false;
        if let Some(latest) = response.latest() {
            let text = translate_status(latest)?;
            self.notifier.send(&text).await?;
            tracing::info!(
                homework = %latest.name,
                status = %latest.status,
                "Review status forwarded"
            );
            notified = true;
        }

        if let Some(next) = response.current_date {
            if next != self.cursor {
                tracing::debug!(from = self.cursor, to = next, "Cursor advanced");
            }
            self.cursor = next;
        }

        Ok(CycleReport {
            notified,
            cursor: self.cursor,
        })
    }
}
