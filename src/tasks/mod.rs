//! Background task status polling.
//!
//! This module provides:
//! - The status reply model and its mapping to display states
//! - A blocking HTTP client for the task API
//! - The polling loop with a single stop request
//! - Completion notifications

mod client;
pub mod notify;
mod poller;
pub mod signals;
mod status;

pub use client::{HttpStatusApi, StatusApi};
pub use notify::{create_notifier, NotificationBackend, Notifier};
pub use poller::{PollSummary, PollerOptions, TaskPoller};
pub use signals::install_signal_handlers;
pub use status::{DisplayStatus, Severity, StatusReport, TaskOutcome, TaskState, TaskUpdate};
