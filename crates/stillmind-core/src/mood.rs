//! Mood journal: entries, scoring, and derived insights.
//!
//! Entries are plain data; insights are computed over a slice so callers
//! can aggregate whatever window they loaded from storage.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::sentiment::{self, Sentiment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Calm,
    Neutral,
    Sad,
    Anxious,
    Angry,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Calm,
        Mood::Neutral,
        Mood::Sad,
        Mood::Anxious,
        Mood::Angry,
    ];

    /// Wellbeing score on a 1-5 scale.
    pub fn score(self) -> u8 {
        match self {
            Mood::Happy => 5,
            Mood::Calm => 4,
            Mood::Neutral => 3,
            Mood::Sad => 2,
            Mood::Anxious | Mood::Angry => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Calm => "Calm",
            Mood::Neutral => "Neutral",
            Mood::Sad => "Sad",
            Mood::Anxious => "Anxious",
            Mood::Angry => "Angry",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mood::Happy => write!(f, "happy"),
            Mood::Calm => write!(f, "calm"),
            Mood::Neutral => write!(f, "neutral"),
            Mood::Sad => write!(f, "sad"),
            Mood::Anxious => write!(f, "anxious"),
            Mood::Angry => write!(f, "angry"),
        }
    }
}

impl std::str::FromStr for Mood {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "happy" => Ok(Mood::Happy),
            "calm" => Ok(Mood::Calm),
            "neutral" => Ok(Mood::Neutral),
            "sad" => Ok(Mood::Sad),
            "anxious" => Ok(Mood::Anxious),
            "angry" => Ok(Mood::Angry),
            other => Err(CoreError::invalid_configuration(format!(
                "unknown mood '{other}' (expected one of: happy, calm, neutral, sad, anxious, angry)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: Uuid,
    pub mood: Mood,
    pub note: Option<String>,
    pub at: DateTime<Utc>,
}

impl MoodEntry {
    pub fn new(mood: Mood, note: Option<String>) -> Self {
        Self::new_at(mood, note, Utc::now())
    }

    pub fn new_at(mood: Mood, note: Option<String>, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            mood,
            note,
            at,
        }
    }
}

/// Aggregates over a set of journal entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoodInsights {
    pub entry_count: usize,
    /// Mean wellbeing score, 0.0 when there are no entries.
    pub average_score: f64,
    /// Ties broken in favor of the higher-scoring mood.
    pub most_frequent: Option<Mood>,
    /// Consecutive calendar days with at least one entry, ending at the
    /// most recent entry's day.
    pub streak_days: u32,
    pub positive_notes: usize,
    pub negative_notes: usize,
}

pub fn insights(entries: &[MoodEntry]) -> MoodInsights {
    if entries.is_empty() {
        return MoodInsights::default();
    }

    let total_score: u64 = entries.iter().map(|e| e.mood.score() as u64).sum();
    let average_score = total_score as f64 / entries.len() as f64;

    let mut counts: HashMap<Mood, usize> = HashMap::new();
    for entry in entries {
        *counts.entry(entry.mood).or_insert(0) += 1;
    }
    let most_frequent = counts
        .into_iter()
        .max_by_key(|(mood, count)| (*count, mood.score()))
        .map(|(mood, _)| mood);

    let days: BTreeSet<NaiveDate> = entries.iter().map(|e| e.at.date_naive()).collect();
    let streak_days = streak(&days);

    let mut positive_notes = 0;
    let mut negative_notes = 0;
    for entry in entries {
        if let Some(note) = &entry.note {
            match sentiment::analyze(note) {
                Sentiment::Positive => positive_notes += 1,
                Sentiment::Negative => negative_notes += 1,
                Sentiment::Neutral => {}
            }
        }
    }

    MoodInsights {
        entry_count: entries.len(),
        average_score,
        most_frequent,
        streak_days,
        positive_notes,
        negative_notes,
    }
}

fn streak(days: &BTreeSet<NaiveDate>) -> u32 {
    let Some(&latest) = days.iter().next_back() else {
        return 0;
    };
    let mut streak = 1;
    let mut day = latest;
    while let Some(prev) = day.pred_opt() {
        if !days.contains(&prev) {
            break;
        }
        streak += 1;
        day = prev;
    }
    streak
}

/// One day of the weekly trend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayScore {
    pub date: NaiveDate,
    pub average_score: f64,
    pub entry_count: usize,
}

/// Per-day averages for the seven days ending at `today`, oldest first.
/// Days without entries appear with a zero count.
pub fn weekly_trend(entries: &[MoodEntry], today: NaiveDate) -> Vec<DayScore> {
    (0..7)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let scores: Vec<u64> = entries
                .iter()
                .filter(|e| e.at.date_naive() == date)
                .map(|e| e.mood.score() as u64)
                .collect();
            let average_score = if scores.is_empty() {
                0.0
            } else {
                scores.iter().sum::<u64>() as f64 / scores.len() as f64
            };
            DayScore {
                date,
                average_score,
                entry_count: scores.len(),
            }
        })
        .collect()
}
