//! Wall-clock bridge for the caller-ticked engine.
//!
//! The engine never reads a clock. `TimerSession` pairs it with a last-sync
//! timestamp so a process that wakes up later (the CLI between invocations)
//! can replay the whole seconds that elapsed in between and land on the
//! same state a resident once-per-second ticker would have produced.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::engine::{CountdownEngine, TimerState};
use super::routine::RoutineMode;
use crate::events::Event;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSession {
    engine: CountdownEngine,
    /// Wall-clock instant up to which elapsed time has been accounted.
    /// `None` whenever the engine is not running.
    #[serde(default)]
    last_sync_at: Option<DateTime<Utc>>,
}

impl TimerSession {
    pub fn new(engine: CountdownEngine) -> Self {
        Self {
            engine,
            last_sync_at: None,
        }
    }

    pub fn engine(&self) -> &CountdownEngine {
        &self.engine
    }

    pub fn start(&mut self, now: DateTime<Utc>) -> Option<Event> {
        let event = self.engine.start();
        if event.is_some() && self.engine.is_running() {
            self.last_sync_at = Some(now);
        }
        event
    }

    /// Account elapsed time, then pause.
    pub fn pause(&mut self, now: DateTime<Utc>) -> Option<Event> {
        self.sync(now);
        let event = self.engine.pause();
        self.last_sync_at = None;
        event
    }

    pub fn stop(&mut self) -> Option<Event> {
        self.last_sync_at = None;
        self.engine.stop()
    }

    /// Replay the whole seconds elapsed since the last sync, retaining the
    /// sub-second remainder for the next call. Returns the events produced,
    /// in order.
    ///
    /// Full passes over a cyclic table collapse to their remainder (a whole
    /// cycle of ticks is the identity on engine state), so a sync after an
    /// arbitrarily long absence stays cheap; the collapsed cycles' phase
    /// events are not replayed.
    pub fn sync(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        let mut events = Vec::new();
        if !self.engine.is_running() {
            return events;
        }
        let Some(last) = self.last_sync_at else {
            self.last_sync_at = Some(now);
            return events;
        };
        let elapsed = (now - last).num_seconds();
        if elapsed <= 0 {
            return events;
        }
        let elapsed = elapsed as u64;
        let total = self.engine.routine().total_secs();
        let steps = match self.engine.routine().mode() {
            RoutineMode::Cyclic if total > 0 => elapsed % total,
            RoutineMode::Terminal => elapsed.min(total),
            _ => 0,
        };
        for _ in 0..steps {
            if let Some(event) = self.engine.tick() {
                events.push(event);
            }
            if self.engine.state() == TimerState::Completed {
                break;
            }
        }
        self.last_sync_at = Some(last + Duration::seconds(elapsed as i64));
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::routine::Routine;

    fn meditation_session() -> TimerSession {
        TimerSession::new(CountdownEngine::new(Routine::meditation(300).unwrap()))
    }

    #[test]
    fn sync_replays_elapsed_seconds() {
        let t0 = Utc::now();
        let mut session = meditation_session();
        session.start(t0);
        session.sync(t0 + Duration::seconds(90));
        assert_eq!(session.engine().remaining_secs(), 210);
    }

    #[test]
    fn sync_completes_terminal_countdown() {
        let t0 = Utc::now();
        let mut session = meditation_session();
        session.start(t0);
        let events = session.sync(t0 + Duration::seconds(500));
        assert_eq!(session.engine().state(), TimerState::Completed);
        assert_eq!(session.engine().remaining_secs(), 0);
        assert!(matches!(
            events.last(),
            Some(Event::TimerCompleted { .. })
        ));
    }

    #[test]
    fn cyclic_sync_collapses_full_cycles() {
        let t0 = Utc::now();
        let mut session = TimerSession::new(CountdownEngine::new(Routine::breathing()));
        session.start(t0);
        // 18s = one full 14s cycle plus 4s: lands on Hold/4.
        session.sync(t0 + Duration::seconds(18));
        assert_eq!(session.engine().current_phase().unwrap().label, "Hold");
        assert_eq!(session.engine().remaining_secs(), 4);
    }

    #[test]
    fn paused_time_is_not_counted() {
        let t0 = Utc::now();
        let mut session = meditation_session();
        session.start(t0);
        session.pause(t0 + Duration::seconds(5));
        assert_eq!(session.engine().remaining_secs(), 295);

        // A minute passes while paused, then resume for 5 more seconds.
        session.start(t0 + Duration::seconds(65));
        session.sync(t0 + Duration::seconds(70));
        assert_eq!(session.engine().remaining_secs(), 290);
    }

    #[test]
    fn subsecond_remainder_is_retained() {
        let t0 = Utc::now();
        let mut session = meditation_session();
        session.start(t0);
        session.sync(t0 + Duration::milliseconds(1500));
        assert_eq!(session.engine().remaining_secs(), 299);
        // 700ms later: 2.2s total elapsed, so exactly one more tick.
        session.sync(t0 + Duration::milliseconds(2200));
        assert_eq!(session.engine().remaining_secs(), 298);
    }

    #[test]
    fn sync_while_idle_is_noop() {
        let t0 = Utc::now();
        let mut session = meditation_session();
        assert!(session.sync(t0 + Duration::seconds(60)).is_empty());
        assert_eq!(session.engine().remaining_secs(), 300);
    }
}
