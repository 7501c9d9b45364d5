//! Wellness activity checklist and daily tips.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A small self-care activity the user can check off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub duration_min: u32,
    #[serde(default)]
    pub completed: bool,
}

impl Activity {
    fn new(id: u32, title: &str, description: &str, duration_min: u32) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            duration_min,
            completed: false,
        }
    }
}

/// The built-in activity catalog.
pub fn default_activities() -> Vec<Activity> {
    vec![
        Activity::new(
            1,
            "Breathing Exercise",
            "5-minute guided breathing for stress relief",
            5,
        ),
        Activity::new(
            2,
            "Gratitude Practice",
            "Write down 3 things you're grateful for",
            3,
        ),
        Activity::new(
            3,
            "Mindful Meditation",
            "Guided meditation for inner peace",
            10,
        ),
        Activity::new(4, "Body Scan", "Progressive muscle relaxation", 8),
    ]
}

/// Toggle an activity's completion in place. Returns false if no activity
/// has the given id.
pub fn toggle_completed(activities: &mut [Activity], id: u32) -> bool {
    match activities.iter_mut().find(|a| a.id == id) {
        Some(activity) => {
            activity.completed = !activity.completed;
            true
        }
        None => false,
    }
}

/// Fraction of the catalog completed, 0.0 for an empty catalog.
pub fn completed_fraction(activities: &[Activity]) -> f64 {
    if activities.is_empty() {
        return 0.0;
    }
    let done = activities.iter().filter(|a| a.completed).count();
    done as f64 / activities.len() as f64
}

/// A daily wellness tip: the tip itself, a suggested activity, and the
/// focus area it belongs to.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DailyTip {
    pub tip: &'static str,
    pub activity: &'static str,
    pub focus: &'static str,
}

const TIPS: [DailyTip; 5] = [
    DailyTip {
        tip: "Start your day with intention. Take 5 minutes to set a positive intention for today.",
        activity: "Try our breathing exercise to center yourself.",
        focus: "Mindfulness",
    },
    DailyTip {
        tip: "Gratitude shifts perspective. Notice three small things that went well today.",
        activity: "Write them down in your gratitude practice.",
        focus: "Gratitude",
    },
    DailyTip {
        tip: "Your body holds tension you may not notice. Pause and relax your shoulders and jaw.",
        activity: "A body scan can help you find where stress is hiding.",
        focus: "Body Awareness",
    },
    DailyTip {
        tip: "Thoughts are not facts. Let them pass by like clouds instead of holding on.",
        activity: "Sit with the meditation timer for a few minutes.",
        focus: "Meditation",
    },
    DailyTip {
        tip: "Rest is productive. A short break now protects your energy for later.",
        activity: "Step away from the screen and breathe slowly for a minute.",
        focus: "Rest",
    },
];

/// The tip for a given calendar date. Deterministic rotation, so every
/// call on the same day returns the same tip.
pub fn daily_tip(date: NaiveDate) -> &'static DailyTip {
    let index = date.num_days_from_ce().rem_euclid(TIPS.len() as i32) as usize;
    &TIPS[index]
}
