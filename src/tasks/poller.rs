use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use super::client::StatusApi;
use super::status::{DisplayStatus, StatusReport, TaskUpdate};
use crate::error::PollError;

const FETCH_FAILED_TEXT: &str = "Could not fetch the current task status.";
const STOP_FAILED_TEXT: &str = "Failed to stop the current task.";

/// Runtime options for the poller
#[derive(Debug, Clone)]
pub struct PollerOptions {
    /// Delay between two status requests
    pub interval: Duration,
}

impl Default for PollerOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
        }
    }
}

/// How a polling session ended
#[derive(Debug, Clone, PartialEq)]
pub struct PollSummary {
    /// Last display status seen
    pub status: DisplayStatus,
    /// Where the server wants the user to continue, if anywhere
    pub next_url: Option<String>,
    /// Last status text
    pub text: String,
    /// Number of successful status requests
    pub polls: usize,
    /// False if the session was interrupted before the task finished
    pub finished: bool,
}

/// Polls the status of one task until it finishes.
pub struct TaskPoller<A: StatusApi> {
    api: A,
    task_id: String,
    options: PollerOptions,
    running: Arc<AtomicBool>,
    stop_requested: Arc<AtomicBool>,
    stop_sent: bool,
}

impl<A: StatusApi> TaskPoller<A> {
    pub fn new(api: A, task_id: impl Into<String>, options: PollerOptions) -> Self {
        Self {
            api,
            task_id: task_id.into(),
            options,
            running: Arc::new(AtomicBool::new(true)),
            stop_requested: Arc::new(AtomicBool::new(false)),
            stop_sent: false,
        }
    }

    /// Clearing this flag ends the session after the current request.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Raising this flag sends one stop request to the server.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_requested)
    }

    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::SeqCst);
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run the polling loop, reporting every fetched status to `on_update`.
    ///
    /// A failed stop request is reported as an `ApiError` update and polling
    /// goes on. A failed status request is reported the same way, then the
    /// error is returned.
    pub fn run<F>(&mut self, mut on_update: F) -> Result<PollSummary, PollError>
    where
        F: FnMut(&TaskUpdate),
    {
        tracing::info!(
            task = %self.task_id,
            "Polling task status every {}ms",
            self.options.interval.as_millis()
        );

        let mut polls = 0;

        loop {
            let start = Instant::now();

            if let Err(e) = self.send_stop_if_requested() {
                tracing::warn!(task = %self.task_id, error = %e, "Stop request failed");
                on_update(&TaskUpdate::api_error(STOP_FAILED_TEXT));
            }

            let (status, report) = match self.fetch() {
                Ok(fetched) => fetched,
                Err(e) => {
                    tracing::warn!(task = %self.task_id, error = %e, "Status request failed");
                    on_update(&TaskUpdate::api_error(FETCH_FAILED_TEXT));
                    return Err(e);
                }
            };
            polls += 1;

            tracing::debug!(
                task = %self.task_id,
                status = status.label(),
                progress = report.progress,
                "Task status"
            );
            on_update(&TaskUpdate::from_report(status, &report));

            if report.is_finished() {
                tracing::info!(task = %self.task_id, status = status.label(), "Task finished");
                return Ok(PollSummary {
                    status,
                    next_url: report.next_url,
                    text: report.text,
                    polls,
                    finished: true,
                });
            }

            if !self.running.load(Ordering::SeqCst) {
                tracing::info!(task = %self.task_id, "Poller stopping");
                return Ok(PollSummary {
                    status,
                    next_url: None,
                    text: report.text,
                    polls,
                    finished: false,
                });
            }

            self.sleep_until_next_poll(start);
        }
    }

    fn fetch(&self) -> Result<(DisplayStatus, StatusReport), PollError> {
        let report = self.api.status(&self.task_id)?;
        let status = DisplayStatus::from_report(&report)?;
        Ok((status, report))
    }

    fn send_stop_if_requested(&mut self) -> Result<(), PollError> {
        if self.stop_sent || !self.stop_requested.load(Ordering::SeqCst) {
            return Ok(());
        }
        self.stop_sent = true;
        tracing::info!(task = %self.task_id, "Requesting task stop");
        self.api.stop(&self.task_id)
    }

    fn stop_pending(&self) -> bool {
        !self.stop_sent && self.stop_requested.load(Ordering::SeqCst)
    }

    fn sleep_until_next_poll(&self, start: Instant) {
        let elapsed = start.elapsed();
        if elapsed >= self.options.interval {
            return;
        }

        // Sleep in small chunks so shutdown and stop requests are noticed.
        let chunk = Duration::from_millis(50);
        let mut remaining = self.options.interval - elapsed;

        while remaining > Duration::ZERO
            && self.running.load(Ordering::SeqCst)
            && !self.stop_pending()
        {
            let sleep = remaining.min(chunk);
            thread::sleep(sleep);
            remaining = remaining.saturating_sub(sleep);
        }
    }
}
