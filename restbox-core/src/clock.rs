//! Time source for mutation timestamps.

use chrono::{DateTime, Utc};
use std::fmt::Debug;

/// Supplies the current time to a collection backend.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
