use std::str::FromStr;

use chrono::Utc;
use clap::Subcommand;
use stillmind_core::storage::Database;
use stillmind_core::{mood, sentiment, Config, Mood, MoodEntry, Sentiment};

#[derive(Subcommand)]
pub enum MoodAction {
    /// Record how you're feeling
    Log {
        /// One of: happy, calm, neutral, sad, anxious, angry
        mood: String,
        /// Optional note about why
        #[arg(long)]
        note: Option<String>,
    },
    /// Recent entries, newest first
    List {
        /// Entries to show (defaults to the configured limit)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Aggregate insights as JSON
    Insights,
    /// Per-day averages for the last seven days
    Trend,
}

pub fn run(action: MoodAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        MoodAction::Log { mood, note } => {
            let mood = Mood::from_str(&mood)?;
            let entry = MoodEntry::new(mood, note);
            db.insert_mood(&entry)?;
            println!("logged {} ({}/5)", entry.mood, entry.mood.score());
            if let Some(note) = &entry.note {
                let tone = sentiment::analyze(note);
                if tone != Sentiment::Neutral {
                    println!("note reads {tone}");
                }
            }
        }
        MoodAction::List { limit } => {
            let limit = limit.unwrap_or_else(|| Config::load_or_default().mood.recent_limit);
            for entry in db.recent_moods(limit)? {
                let note = entry.note.as_deref().unwrap_or("");
                println!(
                    "{}  {:<8} {}",
                    entry.at.format("%Y-%m-%d %H:%M"),
                    entry.mood.label(),
                    note
                );
            }
        }
        MoodAction::Insights => {
            let entries = db.all_moods()?;
            let insights = mood::insights(&entries);
            println!("{}", serde_json::to_string_pretty(&insights)?);
        }
        MoodAction::Trend => {
            let entries = db.all_moods()?;
            for day in mood::weekly_trend(&entries, Utc::now().date_naive()) {
                let bar = "#".repeat((day.average_score * 2.0).round() as usize);
                println!("{}  {:<10} {:.1}", day.date, bar, day.average_score);
            }
        }
    }
    Ok(())
}
