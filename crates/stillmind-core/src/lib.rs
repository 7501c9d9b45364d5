//! # Stillmind Core Library
//!
//! Core logic for Stillmind, a mental-wellness companion: guided breathing,
//! a meditation timer, a mood journal, and a wellness activity checklist.
//! All operations are available through a standalone CLI binary; any GUI is
//! expected to be a thin layer over this same library.
//!
//! ## Architecture
//!
//! - **Countdown Engine**: a caller-ticked state machine over a phase table;
//!   cyclic routines (breathing) wrap forever, terminal routines
//!   (meditation) complete at zero
//! - **Timer Session**: wall-clock bridge that replays elapsed seconds into
//!   the engine between process invocations
//! - **Storage**: SQLite session/mood storage and TOML configuration
//! - **Mood & Sentiment**: journal entries with derived insights and a
//!   keyword-based note tagger
//!
//! ## Key Components
//!
//! - [`CountdownEngine`]: core countdown state machine
//! - [`Routine`]: validated phase tables
//! - [`Database`]: session and mood persistence
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod mood;
pub mod sentiment;
pub mod storage;
pub mod timer;
pub mod wellness;

pub use error::{ConfigError, CoreError, StorageError};
pub use events::Event;
pub use mood::{Mood, MoodEntry, MoodInsights};
pub use sentiment::Sentiment;
pub use storage::{Config, Database, SessionKind};
pub use timer::{CountdownEngine, Phase, Routine, RoutineMode, TimerSession, TimerState};
pub use wellness::{Activity, DailyTip};
