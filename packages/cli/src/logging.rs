// ABOUTME: Tracing subscriber setup for the archiai binary
// ABOUTME: The TUI owns the terminal, so it only logs when a log file is configured

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Where log output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Disabled,
}

impl LogTarget {
    /// Pick a target for the current mode.
    ///
    /// Interactive mode never writes to the terminal; it logs to `log_file`
    /// when one is given and is silent otherwise.
    pub fn for_mode(interactive: bool, log_file: Option<String>) -> Self {
        let log_file = log_file
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        match (interactive, log_file) {
            (_, Some(path)) => LogTarget::File(PathBuf::from(path)),
            (true, None) => LogTarget::Disabled,
            (false, None) => LogTarget::Stderr,
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber for `target`
pub fn init_logging(target: &LogTarget) -> Result<()> {
    match target {
        LogTarget::Disabled => Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_target(false)
            .compact()
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow!("Failed to initialise logging: {}", e)),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .compact()
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow!("Failed to initialise logging: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interactive_mode_is_silent_without_log_file() {
        assert_eq!(LogTarget::for_mode(true, None), LogTarget::Disabled);
        assert_eq!(
            LogTarget::for_mode(true, Some("  ".to_string())),
            LogTarget::Disabled
        );
    }

    #[test]
    fn test_log_file_wins_in_both_modes() {
        let expected = LogTarget::File(PathBuf::from("/tmp/archiai.log"));
        assert_eq!(
            LogTarget::for_mode(true, Some("/tmp/archiai.log".to_string())),
            expected
        );
        assert_eq!(
            LogTarget::for_mode(false, Some("/tmp/archiai.log".to_string())),
            expected
        );
    }

    #[test]
    fn test_batch_mode_logs_to_stderr() {
        assert_eq!(LogTarget::for_mode(false, None), LogTarget::Stderr);
    }

    #[test]
    fn test_disabled_target_installs_nothing() {
        assert!(init_logging(&LogTarget::Disabled).is_ok());
    }
}
