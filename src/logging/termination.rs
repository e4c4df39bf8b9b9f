//! Termination event records and the logger that persists them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Why a monitored loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerminationReason {
    MaxIterations,
    PerformanceThreshold,
    ManualStop,
    Error,
    Unknown,
}

impl TerminationReason {
    pub fn name(&self) -> &'static str {
        match self {
            TerminationReason::MaxIterations => "MAX_ITERATIONS",
            TerminationReason::PerformanceThreshold => "PERFORMANCE_THRESHOLD",
            TerminationReason::ManualStop => "MANUAL_STOP",
            TerminationReason::Error => "ERROR",
            TerminationReason::Unknown => "UNKNOWN",
        }
    }
}

/// One loop termination, captured at the moment the loop decided to stop.
///
/// Never mutated after construction. `additional_context` serializes as an
/// empty mapping when no context was supplied, so every persisted record
/// carries the same six keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminationEvent {
    pub event_id: Uuid,
    pub reason: TerminationReason,
    pub iteration_count: u64,
    pub timestamp: DateTime<Utc>,
    pub performance_metrics: Map<String, Value>,
    #[serde(default)]
    pub additional_context: Map<String, Value>,
}

impl TerminationEvent {
    /// Build an event with a fresh id and the current time
    pub fn new(
        reason: TerminationReason,
        iteration_count: u64,
        performance_metrics: Map<String, Value>,
        additional_context: Option<Map<String, Value>>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            reason,
            iteration_count,
            timestamp: Utc::now(),
            performance_metrics,
            additional_context: additional_context.unwrap_or_default(),
        }
    }

    /// One-line human-readable summary, shared by all sinks
    pub fn summary(&self) -> String {
        format!(
            "ALP Loop Terminated: Reason={}, Iterations={}, Metrics={}",
            self.reason.name(),
            self.iteration_count,
            Value::Object(self.performance_metrics.clone()),
        )
    }
}

/// Sink configuration for [`TerminationLogger`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminationLoggerConfig {
    /// Directory holding the JSON records and the rolling log
    pub log_dir: PathBuf,
    /// Emit the summary line to stdout
    pub log_to_console: bool,
    /// Append the summary line to a rolling text log
    pub log_to_file: bool,
}

impl Default for TerminationLoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_to_console: true,
            log_to_file: true,
        }
    }
}

/// Persists termination events, one JSON record per event, and emits a
/// summary line to the configured sinks.
pub struct TerminationLogger {
    log_dir: PathBuf,
    log_to_console: bool,
    // Fixed at construction time; None when the file sink is disabled
    text_log_path: Option<PathBuf>,
}

impl TerminationLogger {
    /// Create the log directory (with parents) and attach sinks.
    ///
    /// Failure to create the directory is fatal and surfaces as
    /// [`Error::Initialization`].
    pub fn new(config: TerminationLoggerConfig) -> Result<Self> {
        fs::create_dir_all(&config.log_dir).map_err(|e| Error::Initialization {
            path: config.log_dir.clone(),
            source: e,
        })?;

        let text_log_path = config.log_to_file.then(|| {
            config.log_dir.join(format!(
                "termination_{}.log",
                Utc::now().format("%Y%m%d_%H%M%S")
            ))
        });

        Ok(Self {
            log_dir: config.log_dir,
            log_to_console: config.log_to_console,
            text_log_path,
        })
    }

    /// Record one termination event.
    ///
    /// Writes the event as a pretty-printed JSON record named by its event
    /// id, then emits the summary line to each attached sink. Returns the
    /// path of the JSON record. Any write failure propagates to the caller;
    /// a termination record is never dropped silently.
    pub fn log_termination(
        &self,
        reason: TerminationReason,
        iteration_count: u64,
        performance_metrics: Map<String, Value>,
        additional_context: Option<Map<String, Value>>,
    ) -> Result<PathBuf> {
        let event = TerminationEvent::new(
            reason,
            iteration_count,
            performance_metrics,
            additional_context,
        );

        let record_path = self
            .log_dir
            .join(format!("termination_{}.json", event.event_id));
        let json = serde_json::to_string_pretty(&event)?;
        fs::write(&record_path, json).map_err(|e| Error::Persistence {
            path: record_path.clone(),
            source: e,
        })?;

        let summary = event.summary();
        if self.log_to_console {
            println!("{summary}");
        }
        if let Some(path) = &self.text_log_path {
            self.append_line(path, &event.timestamp, &summary)?;
        }

        tracing::debug!(
            event_id = %event.event_id,
            reason = event.reason.name(),
            path = %record_path.display(),
            "Persisted termination record"
        );

        Ok(record_path)
    }

    fn append_line(&self, path: &Path, timestamp: &DateTime<Utc>, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| Error::Persistence {
                path: path.to_path_buf(),
                source: e,
            })?;

        writeln!(file, "{} - {}", timestamp.to_rfc3339(), line).map_err(|e| Error::Persistence {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
