use clap::Subcommand;
use stillmind_core::storage::Database;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's stats
    Today,
    /// All-time stats
    All,
    /// Recent sessions, newest first
    Recent {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        StatsAction::Today => {
            let stats = db.stats_today()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        StatsAction::All => {
            let stats = db.stats_all()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        StatsAction::Recent { limit } => {
            for session in db.recent_sessions(limit)? {
                let status = if session.completed { "completed" } else { "stopped" };
                println!(
                    "{}  {:<10} {:>5}s  {}",
                    session.ended_at.format("%Y-%m-%d %H:%M"),
                    session.kind,
                    session.duration_secs,
                    status
                );
            }
        }
    }
    Ok(())
}
