//! System clock implementation of the core `Clock` trait.

use chrono::{DateTime, Utc};

use decora_core::credential::Clock;

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
