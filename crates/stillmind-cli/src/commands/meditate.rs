use std::io::Write;

use chrono::Utc;
use clap::Args;
use stillmind_core::storage::{Database, SessionKind};
use stillmind_core::{Config, CountdownEngine, Routine};

use super::live;

#[derive(Args)]
pub struct MeditateArgs {
    /// Length in minutes (defaults to the configured duration)
    #[arg(long)]
    pub minutes: Option<u64>,
}

pub fn run(args: MeditateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let routine = match args.minutes {
        Some(minutes) => Routine::meditation(minutes.saturating_mul(60))?,
        None => config.meditation_routine()?,
    };
    let mut engine = CountdownEngine::new(routine);

    println!("Take a mindful break. Focus on your breath. Ctrl-C to stop early.");
    let started_at = Utc::now();
    let outcome = live::run_live(&mut engine, None, |engine| {
        let remaining = engine.remaining_secs();
        print!("\r{:02}:{:02} ", remaining / 60, remaining % 60);
        let _ = std::io::stdout().flush();
    })?;

    let db = Database::open()?;
    db.record_session(
        SessionKind::Meditation,
        outcome.ticks,
        started_at,
        Utc::now(),
        outcome.completed,
    )?;

    if outcome.completed {
        println!("meditation complete ({}s)", outcome.ticks);
    } else {
        println!("stopped after {}s", outcome.ticks);
    }
    Ok(())
}
