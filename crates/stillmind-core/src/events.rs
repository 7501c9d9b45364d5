use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerState;

/// Every state change in the countdown produces an Event.
/// Presentation layers render events; the library never prints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase_index: usize,
        phase_label: String,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        phase_index: usize,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase_index: usize,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// The running countdown exhausted a phase and moved to the next one
    /// (wrapping around in cyclic routines).
    PhaseAdvanced {
        phase_index: usize,
        phase_label: String,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// A terminal routine reached zero on its last phase.
    TimerCompleted {
        at: DateTime<Utc>,
    },
    TimerStopped {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        phase_index: usize,
        phase_label: String,
        remaining_secs: u64,
        total_secs: u64,
        phase_progress: f64,
        at: DateTime<Utc>,
    },
}
