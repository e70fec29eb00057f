//! Status command implementation

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::StatusArgs;
use crate::config::PollerConfig;
use crate::error::{BrowserError, Result};
use crate::tasks::{
    create_notifier, install_signal_handlers, DisplayStatus, HttpStatusApi, NotificationBackend,
    PollSummary, PollerOptions, TaskPoller, TaskUpdate,
};

/// Effective poller settings after command line overrides
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    api_url: String,
    interval: Duration,
    csrf_token: Option<String>,
}

fn resolve_settings(args: &StatusArgs, config: &PollerConfig) -> Result<Settings> {
    let api_url = args
        .url
        .clone()
        .or_else(|| config.api_url.clone())
        .ok_or_else(|| {
            BrowserError::Other(
                "No task API URL given. Use --url or set poller.api_url in the config file"
                    .to_string(),
            )
        })?;

    let interval = args
        .interval
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.interval());
    if interval.is_zero() {
        return Err(BrowserError::Other(
            "Poll interval must be greater than 0".to_string(),
        ));
    }

    let csrf_token = args
        .csrf_token
        .clone()
        .or_else(|| Some(config.csrf_token.clone()))
        .filter(|token| !token.is_empty());

    Ok(Settings {
        api_url,
        interval,
        csrf_token,
    })
}

fn progress_bar(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(100);
    let style = ProgressStyle::with_template("{bar:40.cyan/blue} {pos:>3}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    bar.set_style(style);
    bar
}

fn show_update(bar: &ProgressBar, update: &TaskUpdate) {
    bar.set_position(update.progress.round() as u64);
    if update.text.is_empty() {
        bar.set_message(update.status.label());
    } else {
        bar.set_message(format!("{}: {}", update.status.label(), update.text));
    }
}

/// Run the status command
pub fn run(args: StatusArgs, config: &PollerConfig, quiet: bool) -> Result<()> {
    let settings = resolve_settings(&args, config)?;
    let backend = args
        .notify
        .as_deref()
        .map(NotificationBackend::parse)
        .transpose()?;

    let api = HttpStatusApi::new(settings.api_url, config.timeout(), settings.csrf_token)?;
    let options = PollerOptions {
        interval: settings.interval,
    };
    let mut poller = TaskPoller::new(api, args.task_id.as_str(), options);

    install_signal_handlers(poller.stop_flag(), poller.running_flag())
        .map_err(|e| BrowserError::Other(format!("Failed to install signal handlers: {}", e)))?;

    if args.stop {
        poller.request_stop();
    }

    tracing::info!(task = %args.task_id, url = poller.api().api_url(), "Following task");

    let bar = progress_bar(quiet);
    let result = poller.run(|update| show_update(&bar, update));

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            bar.abandon();
            return Err(e.into());
        }
    };
    bar.finish();

    report(&args.task_id, &summary);

    if let Some(backend) = backend {
        if summary.finished {
            let notifier = create_notifier(backend);
            if let Err(e) = notifier.notify_finished(&args.task_id, &summary) {
                tracing::warn!(backend = notifier.name(), error = %e, "Notification failed");
            }
        }
    }

    if summary.status == DisplayStatus::Failed {
        return Err(BrowserError::Other(format!("Task {} failed", args.task_id)));
    }

    Ok(())
}

fn report(task_id: &str, summary: &PollSummary) {
    if !summary.finished {
        println!("Stopped following task {} ({})", task_id, summary.status.label());
        return;
    }

    println!("Task {}: {}", task_id, summary.status.label());
    if !summary.text.is_empty() {
        println!("{}", summary.text);
    }
    if let Some(url) = &summary.next_url {
        println!("Next: {}", url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(url: Option<&str>, interval: Option<u64>, token: Option<&str>) -> StatusArgs {
        StatusArgs {
            task_id: "t1".to_string(),
            url: url.map(String::from),
            interval,
            csrf_token: token.map(String::from),
            stop: false,
            notify: None,
        }
    }

    #[test]
    fn test_command_line_overrides_config() {
        let config = PollerConfig {
            api_url: Some("http://config/api/".to_string()),
            csrf_token: "from-config".to_string(),
            ..PollerConfig::default()
        };

        let settings =
            resolve_settings(&args(Some("http://cli/api/"), Some(250), Some("cli")), &config)
                .unwrap();

        assert_eq!(settings.api_url, "http://cli/api/");
        assert_eq!(settings.interval, Duration::from_millis(250));
        assert_eq!(settings.csrf_token.as_deref(), Some("cli"));
    }

    #[test]
    fn test_config_fills_missing_settings() {
        let config = PollerConfig {
            api_url: Some("http://config/api/".to_string()),
            ..PollerConfig::default()
        };

        let settings = resolve_settings(&args(None, None, None), &config).unwrap();

        assert_eq!(settings.api_url, "http://config/api/");
        assert_eq!(settings.interval, Duration::from_secs(1));
        assert_eq!(settings.csrf_token, None);
    }

    #[test]
    fn test_missing_url_is_an_error() {
        let result = resolve_settings(&args(None, None, None), &PollerConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_interval_is_an_error() {
        let config = PollerConfig {
            api_url: Some("http://config/api/".to_string()),
            ..PollerConfig::default()
        };
        assert!(resolve_settings(&args(None, Some(0), None), &config).is_err());
    }

    #[test]
    fn test_show_update_sets_position() {
        let bar = ProgressBar::hidden();
        let update = TaskUpdate::api_error("Could not fetch the current task status.");
        show_update(&bar, &update);
        assert_eq!(bar.position(), 100);
    }
}
