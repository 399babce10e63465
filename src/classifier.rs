//! Condition classification
//!
//! Scores a worker's accumulated measurements against the static reference
//! tables and returns the dominant psychological condition. The categorical
//! half draws a weight uniformly at random from each matching table range
//! (modelling measurement noise), so repeated runs over identical input are
//! only statistically consistent; callers needing determinism inject a
//! seeded [`Rng`].
//!
//! The same per-subject computation runs in bulk over a whole dataset
//! grouped by worker id.

use crate::dataset::RecordStore;
use crate::tables::{dimension_ranges, weight_range};
use crate::types::{Condition, MeasurementRecord};
use rand::Rng;
use std::collections::BTreeMap;

/// Per-condition score breakdown, indexed by [`Condition::ALL`] order.
///
/// The emotion and dimension halves are each normalized to sum to 1 (left
/// all-zero when nothing matched) before being combined.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionScores {
    pub emotion: [f64; 3],
    pub dimension: [f64; 3],
    pub combined: [f64; 3],
}

impl ConditionScores {
    /// Combined score for one condition
    pub fn combined_for(&self, condition: Condition) -> f64 {
        self.combined[index_of(condition)]
    }

    /// The winning condition. Ties go to the first condition reaching the
    /// maximum in [`Condition::ALL`] order, so an all-zero breakdown (no
    /// usable rows) resolves to `NoDisorder`.
    pub fn best(&self) -> Condition {
        let mut winner = 0;
        for i in 1..self.combined.len() {
            if self.combined[i] > self.combined[winner] {
                winner = i;
            }
        }
        Condition::ALL[winner]
    }
}

/// Position of a condition in [`Condition::ALL`]
fn index_of(condition: Condition) -> usize {
    match condition {
        Condition::NoDisorder => 0,
        Condition::Depression => 1,
        Condition::Anxiety => 2,
    }
}

/// Score one subject's rows.
///
/// Order-independent over the rows apart from the sequence in which random
/// weights are drawn.
pub fn score<'a, I, R>(rows: I, rng: &mut R) -> ConditionScores
where
    I: IntoIterator<Item = &'a MeasurementRecord>,
    R: Rng + ?Sized,
{
    let mut emotion = [0.0_f64; 3];
    let mut dimension = [0.0_f64; 3];

    for record in rows {
        for label in record.emotion_labels() {
            // Categorical half: a random draw from every condition's range
            // for this label.
            for (i, &condition) in Condition::ALL.iter().enumerate() {
                if let Some((low, high)) = weight_range(condition, label) {
                    emotion[i] += rng.gen_range(low..=high);
                }
            }

            // Dimensional half: one point per in-range dimension, credited
            // to every condition whose weight table carries this label.
            if let Some(ranges) = dimension_ranges(label) {
                let values = record.dimensions();
                for (value, (low, high)) in values.into_iter().zip(ranges.as_array()) {
                    if low <= value && value <= high {
                        for (i, &condition) in Condition::ALL.iter().enumerate() {
                            if weight_range(condition, label).is_some() {
                                dimension[i] += 1.0;
                            }
                        }
                    }
                }
            }
        }
    }

    normalize(&mut emotion);
    normalize(&mut dimension);

    let mut combined = [0.0_f64; 3];
    for i in 0..combined.len() {
        combined[i] = emotion[i] + dimension[i];
    }

    ConditionScores {
        emotion,
        dimension,
        combined,
    }
}

/// Normalize scores to sum to 1; an all-zero map stays all-zero.
fn normalize(scores: &mut [f64; 3]) {
    let total: f64 = scores.iter().sum();
    if total > 0.0 {
        for score in scores.iter_mut() {
            *score /= total;
        }
    }
}

/// Classify one subject's rows into a [`Condition`].
///
/// A subject with zero rows (or no recognized labels) yields all-zero scores
/// and resolves to `NoDisorder` via the tie-break; callers should treat that
/// as indeterminate rather than a confirmed absence of disorder.
pub fn classify<'a, I, R>(rows: I, rng: &mut R) -> Condition
where
    I: IntoIterator<Item = &'a MeasurementRecord>,
    R: Rng + ?Sized,
{
    score(rows, rng).best()
}

/// Classify every worker in the dataset independently.
///
/// Returns the `user_id -> Condition` table, ascending by worker id.
pub fn classify_all<R>(store: &RecordStore, rng: &mut R) -> BTreeMap<i64, Condition>
where
    R: Rng + ?Sized,
{
    store
        .user_ids()
        .into_iter()
        .map(|user_id| {
            let rows = store.records_for_user(user_id);
            (user_id, classify(rows, rng))
        })
        .collect()
}
