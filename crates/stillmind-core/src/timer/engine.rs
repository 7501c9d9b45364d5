//! Countdown engine implementation.
//!
//! The engine is a caller-ticked state machine. It owns no thread and reads
//! no clock - the caller is responsible for calling `tick()` once per
//! elapsed second while the countdown is running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!             \-> Completed (terminal routines only)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = CountdownEngine::new(Routine::breathing());
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Some(Event) on phase advance / completion
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::routine::{Phase, Routine, RoutineMode};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    /// A terminal routine reached zero on its last phase. Stays here until
    /// an explicit `start()` or `stop()`.
    Completed,
}

/// Core countdown engine.
///
/// Counts caller-supplied logical seconds over a phase table. Invariants:
/// the phase index is always in range and the remaining time never exceeds
/// the active phase's duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownEngine {
    routine: Routine,
    state: TimerState,
    phase_index: usize,
    remaining_secs: u64,
}

impl CountdownEngine {
    /// Create a new engine over the given routine.
    ///
    /// Starts in the `Idle` state with the first phase ready.
    pub fn new(routine: Routine) -> Self {
        let remaining_secs = routine.phase(0).map(|p| p.duration_secs).unwrap_or(0);
        Self {
            routine,
            state: TimerState::Idle,
            phase_index: 0,
            remaining_secs,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn current_phase(&self) -> Option<&Phase> {
        self.routine.phase(self.phase_index)
    }

    pub fn routine(&self) -> &Routine {
        &self.routine
    }

    /// Duration of the active phase in seconds.
    pub fn total_secs(&self) -> u64 {
        self.current_phase().map(|p| p.duration_secs).unwrap_or(0)
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn phase_progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / total as f64)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let phase = self.current_phase();
        Event::StateSnapshot {
            state: self.state,
            phase_index: self.phase_index,
            phase_label: phase.map(|p| p.label.clone()).unwrap_or_default(),
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs(),
            phase_progress: self.phase_progress(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin counting. From `Idle` or `Completed` the engine rewinds to the
    /// first phase at full duration; from `Paused` it resumes exactly where
    /// it left off. Idempotent while already running.
    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle | TimerState::Completed => {
                self.rewind();
                self.state = TimerState::Running;
                let phase = self.current_phase()?;
                Some(Event::TimerStarted {
                    phase_index: self.phase_index,
                    phase_label: phase.label.clone(),
                    duration_secs: phase.duration_secs,
                    at: Utc::now(),
                })
            }
            TimerState::Paused => {
                self.state = TimerState::Running;
                Some(Event::TimerResumed {
                    phase_index: self.phase_index,
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            TimerState::Running => None, // Already running.
        }
    }

    /// Suspend counting, retaining the current phase and remaining time.
    pub fn pause(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.state = TimerState::Paused;
        Some(Event::TimerPaused {
            phase_index: self.phase_index,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop counting and rewind to the first phase at full duration.
    pub fn stop(&mut self) -> Option<Event> {
        self.state = TimerState::Idle;
        self.rewind();
        Some(Event::TimerStopped { at: Utc::now() })
    }

    /// Consume one elapsed second. No-op unless running.
    ///
    /// When the decrement exhausts the phase, the engine advances on the
    /// same tick: cyclic routines wrap to the next phase unconditionally;
    /// terminal routines complete after the last phase.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        let on_last_phase = self.phase_index + 1 >= self.routine.len();
        if on_last_phase && self.routine.mode() == RoutineMode::Terminal {
            self.state = TimerState::Completed;
            return Some(Event::TimerCompleted { at: Utc::now() });
        }
        self.advance();
        let phase = self.current_phase()?;
        Some(Event::PhaseAdvanced {
            phase_index: self.phase_index,
            phase_label: phase.label.clone(),
            duration_secs: phase.duration_secs,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn advance(&mut self) {
        let next = if self.phase_index + 1 < self.routine.len() {
            self.phase_index + 1
        } else {
            0 // Wrap around.
        };
        self.phase_index = next;
        self.remaining_secs = self
            .routine
            .phase(next)
            .map(|p| p.duration_secs)
            .unwrap_or(0);
    }

    fn rewind(&mut self) {
        self.phase_index = 0;
        self.remaining_secs = self.routine.phase(0).map(|p| p.duration_secs).unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::routine::Routine;

    fn breathing() -> CountdownEngine {
        CountdownEngine::new(Routine::breathing())
    }

    #[test]
    fn start_pause_resume() {
        let mut engine = breathing();
        assert_eq!(engine.state(), TimerState::Idle);

        assert!(engine.start().is_some());
        assert_eq!(engine.state(), TimerState::Running);

        // Idempotent while running.
        assert!(engine.start().is_none());

        assert!(engine.pause().is_some());
        assert_eq!(engine.state(), TimerState::Paused);

        assert!(engine.start().is_some());
        assert_eq!(engine.state(), TimerState::Running);
    }

    #[test]
    fn pause_retains_position() {
        let mut engine = breathing();
        engine.start();
        engine.tick();
        engine.tick();
        assert_eq!(engine.remaining_secs(), 2);

        engine.pause();
        engine.tick(); // No-op while paused.
        assert_eq!(engine.remaining_secs(), 2);

        engine.start();
        assert_eq!(engine.phase_index(), 0);
        assert_eq!(engine.remaining_secs(), 2);
    }

    #[test]
    fn cyclic_phase_walk() {
        // Inhale/4, Hold/4, Exhale/6: 4 ticks -> Hold/4, 8 -> Exhale/6,
        // 14 -> wrapped back to Inhale/4.
        let mut engine = breathing();
        engine.start();

        for _ in 0..4 {
            engine.tick();
        }
        assert_eq!(engine.current_phase().unwrap().label, "Hold");
        assert_eq!(engine.remaining_secs(), 4);

        for _ in 0..4 {
            engine.tick();
        }
        assert_eq!(engine.current_phase().unwrap().label, "Exhale");
        assert_eq!(engine.remaining_secs(), 6);

        for _ in 0..6 {
            engine.tick();
        }
        assert_eq!(engine.current_phase().unwrap().label, "Inhale");
        assert_eq!(engine.remaining_secs(), 4);
        assert_eq!(engine.state(), TimerState::Running);
    }

    #[test]
    fn terminal_countdown_completes() {
        let mut engine = CountdownEngine::new(Routine::meditation(300).unwrap());
        engine.start();
        for _ in 0..299 {
            assert!(engine.tick().is_none());
        }
        let event = engine.tick();
        assert!(matches!(event, Some(Event::TimerCompleted { .. })));
        assert_eq!(engine.state(), TimerState::Completed);
        assert_eq!(engine.remaining_secs(), 0);

        // Completed is sticky: further ticks do nothing.
        assert!(engine.tick().is_none());
        assert_eq!(engine.state(), TimerState::Completed);
        assert_eq!(engine.remaining_secs(), 0);
    }

    #[test]
    fn start_after_completion_restarts() {
        let mut engine = CountdownEngine::new(Routine::meditation(2).unwrap());
        engine.start();
        engine.tick();
        engine.tick();
        assert_eq!(engine.state(), TimerState::Completed);

        assert!(matches!(
            engine.start(),
            Some(Event::TimerStarted { .. })
        ));
        assert_eq!(engine.state(), TimerState::Running);
        assert_eq!(engine.remaining_secs(), 2);
    }

    #[test]
    fn stop_rewinds_from_any_state() {
        let mut engine = breathing();
        engine.start();
        for _ in 0..7 {
            engine.tick();
        }
        assert_eq!(engine.phase_index(), 1);

        engine.stop();
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.phase_index(), 0);
        assert_eq!(engine.remaining_secs(), 4);
    }

    #[test]
    fn tick_is_noop_when_idle() {
        let mut engine = breathing();
        assert!(engine.tick().is_none());
        assert_eq!(engine.remaining_secs(), 4);
    }

    #[test]
    fn snapshot_returns_valid_event() {
        let engine = breathing();
        match engine.snapshot() {
            Event::StateSnapshot {
                state,
                phase_index,
                remaining_secs,
                total_secs,
                ..
            } => {
                assert_eq!(state, TimerState::Idle);
                assert_eq!(phase_index, 0);
                assert_eq!(remaining_secs, 4);
                assert_eq!(total_secs, 4);
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }
}
