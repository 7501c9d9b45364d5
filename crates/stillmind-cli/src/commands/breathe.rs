use std::io::Write;

use chrono::Utc;
use clap::Args;
use stillmind_core::storage::{Database, SessionKind};
use stillmind_core::{Config, CountdownEngine};

use super::live;

#[derive(Args)]
pub struct BreatheArgs {
    /// Stop after this many full cycles (runs until Ctrl-C when omitted)
    #[arg(long)]
    pub cycles: Option<u32>,
}

pub fn run(args: BreatheArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut engine = CountdownEngine::new(config.breathing_routine()?);

    println!("Follow the guided breathing: Inhale, Hold, Exhale. Ctrl-C to stop.");
    let started_at = Utc::now();
    let outcome = live::run_live(&mut engine, args.cycles, |engine| {
        if let Some(phase) = engine.current_phase() {
            print!("\r{:<8} {:>2}s ", phase.label, engine.remaining_secs());
            let _ = std::io::stdout().flush();
        }
    })?;

    let db = Database::open()?;
    db.record_session(
        SessionKind::Breathing,
        outcome.ticks,
        started_at,
        Utc::now(),
        outcome.completed,
    )?;

    if outcome.completed {
        println!("breathing done ({}s)", outcome.ticks);
    } else {
        println!("stopped after {}s", outcome.ticks);
    }
    Ok(())
}
