//! Deadline tracking for a single reactor loop.
//!
//! The [`scheduling`] module holds an ordered registry of pending timers and a
//! driver that answers, each loop iteration, how long the reactor may sleep and
//! which timers have fired.
use thiserror::Error;

pub mod config;
pub mod scheduling;

pub use config::TimerConfig;
pub use scheduling::{driver::TimerDriver, registry::TimerRegistry, Msec, TimerEvents};

/// Error type for registry contract violations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerError {
    #[error("Timer already registered for event {key}")]
    AlreadyRegistered { key: String },
    #[error("No timer registered for event {key}")]
    NotRegistered { key: String },
}

impl TimerError {
    pub(crate) fn already_registered(key: impl std::fmt::Debug) -> Self {
        Self::AlreadyRegistered {
            key: format!("{key:?}"),
        }
    }

    pub(crate) fn not_registered(key: impl std::fmt::Debug) -> Self {
        Self::NotRegistered {
            key: format!("{key:?}"),
        }
    }
}
