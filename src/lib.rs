//! ALP Harness
//!
//! Support crate for a long-running adaptive learning process (ALP) loop:
//! - Validate the structured configuration that parameterizes the loop
//! - Record why the loop terminated, as durable per-event JSON records
//!
//! # Contract
//!
//! - Configuration validation is pure and strict: unknown keys and
//!   out-of-bound values are rejected eagerly with the offending field named
//! - Every loop termination produces exactly one immutable record with a
//!   unique event id; a record that cannot be written fails loudly

pub mod config;
pub mod logging;

mod error;

// Re-export commonly used types
pub use config::{validate, AlpConfig, ConfigInput, LearningAlgorithm, LoggingLevel};
pub use error::{Error, Result};
pub use logging::{TerminationEvent, TerminationLogger, TerminationLoggerConfig, TerminationReason};
