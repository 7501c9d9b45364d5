use clap::Subcommand;
use stillmind_core::storage::Database;
use stillmind_core::wellness::{self, Activity};

const ACTIVITIES_KEY: &str = "activities";

#[derive(Subcommand)]
pub enum ActivityAction {
    /// Show the checklist
    List,
    /// Toggle completion for an activity
    Complete {
        /// Activity id (see `activity list`)
        id: u32,
    },
    /// Clear all completions
    Reset,
}

fn load_activities(db: &Database) -> Vec<Activity> {
    db.kv_get(ACTIVITIES_KEY)
        .ok()
        .flatten()
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_else(wellness::default_activities)
}

fn save_activities(
    db: &Database,
    activities: &[Activity],
) -> Result<(), Box<dyn std::error::Error>> {
    db.kv_set(ACTIVITIES_KEY, &serde_json::to_string(activities)?)?;
    Ok(())
}

pub fn run(action: ActivityAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        ActivityAction::List => {
            let activities = load_activities(&db);
            for activity in &activities {
                let mark = if activity.completed { "x" } else { " " };
                println!(
                    "[{}] {}  {} ({} min)",
                    mark, activity.id, activity.title, activity.duration_min
                );
                println!("       {}", activity.description);
            }
            println!(
                "{:.0}% complete",
                wellness::completed_fraction(&activities) * 100.0
            );
        }
        ActivityAction::Complete { id } => {
            let mut activities = load_activities(&db);
            if !wellness::toggle_completed(&mut activities, id) {
                return Err(format!("no activity with id {id}").into());
            }
            save_activities(&db, &activities)?;
            match activities.iter().find(|a| a.id == id) {
                Some(a) if a.completed => println!("completed: {}", a.title),
                Some(a) => println!("unmarked: {}", a.title),
                None => {}
            }
        }
        ActivityAction::Reset => {
            save_activities(&db, &wellness::default_activities())?;
            println!("checklist reset");
        }
    }
    Ok(())
}
