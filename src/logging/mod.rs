//! Loop termination logging
//!
//! Records one immutable, uniquely identified event per loop termination:
//! - JSON record, one file per event, named by event id
//! - Rolling text log, one timestamped line per event
//! - Console line on stdout
//!
//! Records are append-only artifacts; nothing here mutates or deletes them.

mod termination;

pub use termination::{
    TerminationEvent, TerminationLogger, TerminationLoggerConfig, TerminationReason,
};
