//! Keyword-based sentiment tagging.
//!
//! A deliberately small lexicon scan for mood-journal notes. Matching is
//! lowercase substring containment, so "hopeful" counts as a hit for
//! "hope". This is a local heuristic, not a classifier.

use serde::{Deserialize, Serialize};

const POSITIVE_WORDS: [&str; 14] = [
    "good",
    "great",
    "wonderful",
    "amazing",
    "happy",
    "joy",
    "love",
    "hope",
    "better",
    "improve",
    "help",
    "support",
    "thank",
    "grateful",
];

const NEGATIVE_WORDS: [&str; 14] = [
    "bad",
    "terrible",
    "awful",
    "sad",
    "depressed",
    "anxious",
    "worried",
    "scared",
    "angry",
    "frustrated",
    "hopeless",
    "suicide",
    "kill",
    "die",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Negative => write!(f, "negative"),
            Sentiment::Neutral => write!(f, "neutral"),
        }
    }
}

/// Tag a piece of text by counting lexicon hits on each side.
/// Ties (including no hits at all) are neutral.
pub fn analyze(text: &str) -> Sentiment {
    let lower = text.to_lowercase();
    let positive = POSITIVE_WORDS.iter().filter(|w| lower.contains(*w)).count();
    let negative = NEGATIVE_WORDS.iter().filter(|w| lower.contains(*w)).count();
    if positive > negative {
        Sentiment::Positive
    } else if negative > positive {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Map a detected-emotion label to its polarity.
pub fn polarity_for_emotion(label: &str) -> Sentiment {
    match label {
        "happiness" | "joy" | "excitement" => Sentiment::Positive,
        "sadness" | "anxiety" | "anger" | "fear" | "loneliness" => Sentiment::Negative,
        _ => Sentiment::Neutral,
    }
}
