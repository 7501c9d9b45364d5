mod engine;
mod routine;
mod session;

pub use engine::{CountdownEngine, TimerState};
pub use routine::{Phase, Routine, RoutineMode};
pub use session::TimerSession;
