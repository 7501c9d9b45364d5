use chrono::Utc;
use clap::Subcommand;
use stillmind_core::storage::Database;
use stillmind_core::{Config, CountdownEngine, Event, TimerSession, TimerState};

const SESSION_KEY: &str = "timer_session";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start or resume the background countdown
    Start {
        /// Routine to run
        #[arg(long, value_enum, default_value = "breathing")]
        routine: RoutineArg,
    },
    /// Pause, retaining the current position
    Pause,
    /// Resume a paused countdown
    Resume,
    /// Stop and rewind
    Stop,
    /// Wall-clock-sync, then print current timer state as JSON
    Status,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum RoutineArg {
    Breathing,
    Meditation,
}

fn build_session(
    routine: RoutineArg,
    config: &Config,
) -> Result<TimerSession, Box<dyn std::error::Error>> {
    let routine = match routine {
        RoutineArg::Breathing => config.breathing_routine()?,
        RoutineArg::Meditation => config.meditation_routine()?,
    };
    Ok(TimerSession::new(CountdownEngine::new(routine)))
}

fn load_session(db: &Database) -> Option<TimerSession> {
    let json = db.kv_get(SESSION_KEY).ok()??;
    serde_json::from_str(&json).ok()
}

fn save_session(db: &Database, session: &TimerSession) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(session)?;
    db.kv_set(SESSION_KEY, &json)?;
    Ok(())
}

fn print_event_or_snapshot(
    event: Option<Event>,
    session: &TimerSession,
) -> Result<(), Box<dyn std::error::Error>> {
    match event {
        Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
        None => println!("{}", serde_json::to_string_pretty(&session.engine().snapshot())?),
    }
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load_or_default();
    let now = Utc::now();

    match action {
        TimerAction::Start { routine } => {
            // A paused countdown resumes; anything else starts the chosen
            // routine from the beginning.
            let mut session = match load_session(&db) {
                Some(s) if s.engine().state() == TimerState::Paused => s,
                _ => build_session(routine, &config)?,
            };
            let event = session.start(now);
            print_event_or_snapshot(event, &session)?;
            save_session(&db, &session)?;
        }
        TimerAction::Pause => {
            let mut session = match load_session(&db) {
                Some(s) => s,
                None => build_session(RoutineArg::Breathing, &config)?,
            };
            let event = session.pause(now);
            print_event_or_snapshot(event, &session)?;
            save_session(&db, &session)?;
        }
        TimerAction::Resume => {
            let mut session = match load_session(&db) {
                Some(s) => s,
                None => build_session(RoutineArg::Breathing, &config)?,
            };
            let event = session.start(now);
            print_event_or_snapshot(event, &session)?;
            save_session(&db, &session)?;
        }
        TimerAction::Stop => {
            let mut session = match load_session(&db) {
                Some(s) => s,
                None => build_session(RoutineArg::Breathing, &config)?,
            };
            let event = session.stop();
            print_event_or_snapshot(event, &session)?;
            save_session(&db, &session)?;
        }
        TimerAction::Status => {
            let mut session = match load_session(&db) {
                Some(s) => s,
                None => build_session(RoutineArg::Breathing, &config)?,
            };
            let events = session.sync(now);
            println!("{}", serde_json::to_string_pretty(&session.engine().snapshot())?);
            // Surface a completion that happened while nobody was looking.
            if let Some(event @ Event::TimerCompleted { .. }) = events.last() {
                println!("{}", serde_json::to_string_pretty(event)?);
            }
            save_session(&db, &session)?;
        }
    }
    Ok(())
}
