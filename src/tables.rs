//! Static reference tables for condition scoring
//!
//! Two fixed tables drive the classifier:
//! - the weight table: per condition, an inclusive weight range for each
//!   emotion label that supports it
//! - the dimension table: per emotion label, the arousal/valence/dominance
//!   ranges considered typical for that emotion
//!
//! This module is the single source of truth for both tables; nothing else
//! in the crate hard-codes a range.

use crate::types::Condition;

/// Inclusive [low, high] weight range
pub type WeightRange = (f64, f64);

/// Typical dimensional ranges for one emotion label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionRanges {
    pub arousal: (f64, f64),
    pub valence: (f64, f64),
    pub dominance: (f64, f64),
}

impl DimensionRanges {
    /// Ranges in the same order as `MeasurementRecord::dimensions`
    pub fn as_array(&self) -> [(f64, f64); 3] {
        [self.arousal, self.valence, self.dominance]
    }
}

/// Weight range an observed emotion contributes toward a condition, or
/// `None` when the emotion does not appear in that condition's table.
pub fn weight_range(condition: Condition, emotion: &str) -> Option<WeightRange> {
    match condition {
        Condition::NoDisorder => match emotion {
            "neutral" => Some((30.0, 50.0)),
            "happiness" => Some((20.0, 40.0)),
            "sadness" => Some((10.0, 20.0)),
            "fear" => Some((5.0, 15.0)),
            "anger" => Some((5.0, 10.0)),
            "disgust" => Some((5.0, 10.0)),
            _ => None,
        },
        Condition::Depression => match emotion {
            "sadness" => Some((40.0, 50.0)),
            "disgust" => Some((10.0, 20.0)),
            "anger" => Some((10.0, 15.0)),
            "fear" => Some((5.0, 15.0)),
            "neutral" => Some((10.0, 15.0)),
            "happiness" => Some((0.0, 5.0)),
            _ => None,
        },
        Condition::Anxiety => match emotion {
            "fear" => Some((40.0, 60.0)),
            "sadness" => Some((10.0, 20.0)),
            "anger" => Some((5.0, 15.0)),
            "disgust" => Some((5.0, 10.0)),
            "neutral" => Some((5.0, 15.0)),
            "happiness" => Some((5.0, 10.0)),
            _ => None,
        },
    }
}

/// Typical arousal/valence/dominance ranges for an emotion label, or `None`
/// for labels outside the dimensional vocabulary.
pub fn dimension_ranges(emotion: &str) -> Option<DimensionRanges> {
    match emotion {
        "happiness" => Some(DimensionRanges {
            arousal: (0.3, 0.7),
            valence: (0.5, 1.0),
            dominance: (0.5, 1.0),
        }),
        "sadness" => Some(DimensionRanges {
            arousal: (0.0, 0.3),
            valence: (-1.0, -0.5),
            dominance: (-0.7, -0.3),
        }),
        "fear" => Some(DimensionRanges {
            arousal: (0.6, 1.0),
            valence: (-1.0, -0.5),
            dominance: (-1.0, -0.6),
        }),
        "disgust" => Some(DimensionRanges {
            arousal: (0.4, 0.8),
            valence: (-1.0, -0.5),
            dominance: (-0.7, -0.4),
        }),
        "anger" => Some(DimensionRanges {
            arousal: (0.7, 1.0),
            valence: (-0.7, -0.3),
            dominance: (-0.5, -0.2),
        }),
        "neutral" => Some(DimensionRanges {
            arousal: (0.2, 0.5),
            valence: (-0.1, 0.1),
            dominance: (0.0, 0.3),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_happiness_weights_favor_no_disorder() {
        let (no_low, _) = weight_range(Condition::NoDisorder, "happiness").unwrap();
        let (_, dep_high) = weight_range(Condition::Depression, "happiness").unwrap();
        let (_, anx_high) = weight_range(Condition::Anxiety, "happiness").unwrap();

        // The happiness ranges for depression and anxiety sit entirely below
        // the no_disorder range.
        assert!(dep_high <= no_low);
        assert!(anx_high <= no_low);
    }

    #[test]
    fn test_unknown_emotion_matches_no_table() {
        assert_eq!(weight_range(Condition::NoDisorder, "surprise"), None);
        assert_eq!(dimension_ranges("surprise"), None);
        assert_eq!(dimension_ranges(""), None);
    }

    #[test]
    fn test_every_condition_covers_the_core_vocabulary() {
        for condition in Condition::ALL {
            for emotion in ["happiness", "sadness", "anger", "fear", "disgust", "neutral"] {
                assert!(
                    weight_range(condition, emotion).is_some(),
                    "{condition} missing {emotion}"
                );
            }
        }
    }
}
