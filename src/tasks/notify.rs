use std::io::{self, Write};

use super::poller::PollSummary;
use super::status::{DisplayStatus, Severity};
use crate::error::{BrowserError, Result};

/// Which backend announces a finished task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationBackend {
    /// Desktop notification, falling back to stderr
    #[default]
    Auto,
    Desktop,
    Stderr,
}

impl NotificationBackend {
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "auto" => Ok(NotificationBackend::Auto),
            "desktop" => Ok(NotificationBackend::Desktop),
            "stderr" => Ok(NotificationBackend::Stderr),
            _ => Err(BrowserError::Other(format!(
                "Unknown notification backend: {}. Valid options: auto, desktop, stderr",
                name
            ))),
        }
    }
}

/// Trait for notification backends
pub trait Notifier {
    /// Get the name of this backend
    fn name(&self) -> &'static str;

    /// Announce the end of a polling session
    fn notify_finished(&self, task_id: &str, summary: &PollSummary) -> Result<()>;
}

/// Format the notification title
pub fn format_finish_title(status: DisplayStatus) -> String {
    format!("Task {}", status.label().to_lowercase())
}

/// Format the notification body
pub fn format_finish_body(task_id: &str, summary: &PollSummary) -> String {
    let mut body = format!("Task {}: {}", task_id, summary.status.label());
    if !summary.text.is_empty() {
        body.push('\n');
        body.push_str(&summary.text);
    }
    if let Some(url) = &summary.next_url {
        body.push_str(&format!("\nContinue at {}", url));
    }
    body
}

pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn name(&self) -> &'static str {
        "desktop"
    }

    fn notify_finished(&self, task_id: &str, summary: &PollSummary) -> Result<()> {
        notify_rust::Notification::new()
            .appname("doc-browser")
            .summary(&format_finish_title(summary.status))
            .body(&format_finish_body(task_id, summary))
            .show()
            .map_err(|e| BrowserError::Other(format!("Desktop notification failed: {}", e)))?;
        Ok(())
    }
}

pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn name(&self) -> &'static str {
        "stderr"
    }

    fn notify_finished(&self, task_id: &str, summary: &PollSummary) -> Result<()> {
        let prefix = match summary.status.severity() {
            Severity::Danger => "[FAILED]",
            Severity::Normal => "[DONE]",
        };

        let mut stderr = io::stderr().lock();
        writeln!(stderr, "\n{} {}", prefix, format_finish_title(summary.status))?;
        writeln!(stderr, "{}", "-".repeat(60))?;
        for line in format_finish_body(task_id, summary).lines() {
            writeln!(stderr, "  {}", line)?;
        }
        Ok(())
    }
}

/// Sends through the desktop backend, falling back to stderr on failure.
pub struct AutoNotifier {
    desktop: DesktopNotifier,
    fallback: StderrNotifier,
}

impl Notifier for AutoNotifier {
    fn name(&self) -> &'static str {
        "auto"
    }

    fn notify_finished(&self, task_id: &str, summary: &PollSummary) -> Result<()> {
        if let Err(e) = self.desktop.notify_finished(task_id, summary) {
            tracing::warn!(error = %e, "Falling back to stderr notification");
            return self.fallback.notify_finished(task_id, summary);
        }
        Ok(())
    }
}

pub fn create_notifier(backend: NotificationBackend) -> Box<dyn Notifier> {
    match backend {
        NotificationBackend::Auto => Box::new(AutoNotifier {
            desktop: DesktopNotifier,
            fallback: StderrNotifier,
        }),
        NotificationBackend::Desktop => Box::new(DesktopNotifier),
        NotificationBackend::Stderr => Box::new(StderrNotifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(status: DisplayStatus) -> PollSummary {
        PollSummary {
            status,
            next_url: Some("/project/3/".to_string()),
            text: "Imported 12 documents".to_string(),
            polls: 4,
            finished: true,
        }
    }

    #[test]
    fn test_parse_backend() {
        assert_eq!(NotificationBackend::parse("AUTO").unwrap(), NotificationBackend::Auto);
        assert_eq!(NotificationBackend::parse("desktop").unwrap(), NotificationBackend::Desktop);
        assert_eq!(NotificationBackend::parse("stderr").unwrap(), NotificationBackend::Stderr);
        assert!(NotificationBackend::parse("dbus").is_err());
    }

    #[test]
    fn test_format_finish_body() {
        let body = format_finish_body("ingest-7", &summary(DisplayStatus::Success));
        assert!(body.starts_with("Task ingest-7: Successfully Finished"));
        assert!(body.contains("Imported 12 documents"));
        assert!(body.contains("Continue at /project/3/"));
    }

    #[test]
    fn test_format_finish_title() {
        assert_eq!(format_finish_title(DisplayStatus::Failed), "Task failed");
    }

    #[test]
    fn test_stderr_notifier() {
        let notifier = create_notifier(NotificationBackend::Stderr);
        assert_eq!(notifier.name(), "stderr");
        assert!(notifier
            .notify_finished("t1", &summary(DisplayStatus::Stopped))
            .is_ok());
    }
}
