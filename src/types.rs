//! Core types for the affectlog analytics core
//!
//! This module defines the record schema produced by the upstream inference
//! pipeline and the closed set of psychological conditions the classifier
//! can assign.

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One categorical emotion observation within a measurement record.
///
/// The upstream models emit their top three emotions per audio sample, each
/// with a probability-like mean score and its dispersion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionSlot {
    /// Categorical emotion label (happiness, sadness, anger, fear, disgust,
    /// neutral, optionally surprise). Labels outside the vocabulary are
    /// tolerated and simply never match any reference table.
    pub label: String,
    /// Probability-like score in [0, 1]
    pub mean: f64,
    /// Score dispersion, >= 0
    pub std: f64,
}

/// One audio-derived emotional observation tied to a worker and a timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Opaque source identifier (typically the audio file name)
    pub file_name: String,
    /// Seconds since epoch. Duplicates are permitted; ordering is by value.
    pub timestamp: i64,
    /// Worker identity the record belongs to
    pub user_id: i64,
    /// Top-3 categorical emotions for this sample
    pub emotions: [EmotionSlot; 3],
    /// Dimensional arousal score
    pub arousal: f64,
    /// Dimensional valence score
    pub valence: f64,
    /// Dimensional dominance score
    pub dominance: f64,
}

impl MeasurementRecord {
    /// UTC datetime derived from the epoch-seconds timestamp
    pub fn datetime(&self) -> DateTime<Utc> {
        // timestamp_opt is only ambiguous for out-of-range values; epoch
        // seconds from the pipeline always resolve to a single instant.
        Utc.timestamp_opt(self.timestamp, 0)
            .single()
            .unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Time of day of the record, used for shift bucketing
    pub fn time_of_day(&self) -> NaiveTime {
        self.datetime().time()
    }

    /// The three categorical labels of this record, in slot order
    pub fn emotion_labels(&self) -> impl Iterator<Item = &str> {
        self.emotions.iter().map(|slot| slot.label.as_str())
    }

    /// The three dimensional scores, in (arousal, valence, dominance) order
    pub fn dimensions(&self) -> [f64; 3] {
        [self.arousal, self.valence, self.dominance]
    }
}

/// Psychological condition assigned by the classifier.
///
/// This is a closed enumeration; no label outside it is ever inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    NoDisorder,
    Depression,
    Anxiety,
}

impl Condition {
    /// Fixed enumeration order. Score ties are broken by the first condition
    /// reaching the maximum in this order, so an all-zero score map resolves
    /// to `NoDisorder`.
    pub const ALL: [Condition; 3] = [
        Condition::NoDisorder,
        Condition::Depression,
        Condition::Anxiety,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::NoDisorder => "no_disorder",
            Condition::Depression => "depression",
            Condition::Anxiety => "anxiety",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn slot(label: &str) -> EmotionSlot {
        EmotionSlot {
            label: label.to_string(),
            mean: 0.5,
            std: 0.05,
        }
    }

    #[test]
    fn test_datetime_from_timestamp() {
        let record = MeasurementRecord {
            file_name: "1706640000_0.wav".to_string(),
            timestamp: 1706640000, // 2024-01-30 18:40:00 UTC
            user_id: 1,
            emotions: [slot("happiness"), slot("neutral"), slot("sadness")],
            arousal: 0.5,
            valence: 0.7,
            dominance: 0.6,
        };

        assert_eq!(record.datetime().to_rfc3339(), "2024-01-30T18:40:00+00:00");
        assert_eq!(record.time_of_day().to_string(), "18:40:00");
    }

    #[test]
    fn test_condition_wire_names() {
        assert_eq!(Condition::NoDisorder.as_str(), "no_disorder");
        assert_eq!(
            serde_json::to_string(&Condition::Anxiety).unwrap(),
            "\"anxiety\""
        );
    }

    #[test]
    fn test_tie_break_order_starts_at_no_disorder() {
        assert_eq!(Condition::ALL[0], Condition::NoDisorder);
    }
}
