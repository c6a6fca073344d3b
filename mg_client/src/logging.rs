//! Structured logging configuration.
//!
//! The terminal UI owns the screen, so in TUI mode logs go to a file.
//! Records emitted through the `log` crate by `memory_game` are forwarded
//! into the same subscriber.

use anyhow::{Context, Result};
use memory_game::Transition;
use std::{fs::OpenOptions, path::Path, sync::Mutex};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging
///
/// Log levels are configurable via the RUST_LOG env var.
///
/// # Arguments
///
/// * `log_file` - Append logs to this file instead of stderr
///
/// # Example
///
/// ```no_run
/// use mg_client::logging;
///
/// logging::init(None).unwrap();
/// tracing::info!("Client starting");
/// ```
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer.with_ansi(false).with_writer(Mutex::new(file)))
                .try_init()
                .context("Failed to install logger")?;
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer.with_writer(std::io::stderr))
                .try_init()
                .context("Failed to install logger")?;
        }
    }

    tracing::info!("Logging initialized");
    Ok(())
}

/// Log performance metric
///
/// # Arguments
///
/// * `operation` - Operation name
/// * `duration_ms` - Duration in milliseconds
/// * `metadata` - Additional metadata
pub fn log_performance(operation: &str, duration_ms: u64, metadata: Option<&str>) {
    if duration_ms > 5000 {
        tracing::warn!(
            operation = operation,
            duration_ms = duration_ms,
            metadata = metadata,
            "PERFORMANCE: Slow operation"
        );
    } else {
        tracing::debug!(
            operation = operation,
            duration_ms = duration_ms,
            metadata = metadata,
            "Performance metric"
        );
    }
}

/// Log the outcome of a card pick
pub fn log_transition(round: u64, position: usize, transition: &Transition) {
    match transition {
        Transition::Ignored => tracing::debug!(round, position, "Pick ignored until reset"),
        _ => tracing::info!(round, position, ?transition, "Card picked"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_performance() {
        log_performance("test_operation", 500, Some("metadata"));
        log_performance("slow_operation", 8000, None);
    }

    #[test]
    fn test_log_transition() {
        log_transition(1, 0, &Transition::Advanced { score: 1 });
        log_transition(1, 3, &Transition::Ignored);
    }
}
