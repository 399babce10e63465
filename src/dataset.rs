//! In-memory measurement record store
//!
//! This module loads the semicolon-delimited measurement dataset produced by
//! the inference pipeline and serves read-only queries over it:
//! - per-worker lookup via the `by_user` index
//! - time-range scans via the `by_user_time` index, sorted at load time
//! - shift-windowed scans across all workers
//! - the observed emotion vocabulary
//!
//! A load is all-or-nothing: one malformed row rejects the whole dataset so
//! a silently-truncated store is never served as if complete.

use crate::error::AnalyticsError;
use crate::shifts::ShiftSchedule;
use crate::types::{EmotionSlot, MeasurementRecord};
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

/// Immutable store over one loaded dataset.
///
/// All queries are read-only; replacing the dataset means constructing a new
/// store (see [`crate::handle::StoreHandle`]), never mutating this one.
#[derive(Debug, Clone)]
pub struct RecordStore {
    /// All records in file order
    records: Vec<MeasurementRecord>,
    /// user_id -> indices into `records`, file order preserved
    by_user: BTreeMap<i64, Vec<usize>>,
    /// user_id -> (timestamp, index) pairs sorted by timestamp
    by_user_time: HashMap<i64, Vec<(i64, usize)>>,
}

impl RecordStore {
    /// Load a dataset file and build both indices.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AnalyticsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            AnalyticsError::DataSource(format!("cannot read {}: {e}", path.display()))
        })?;
        let store = Self::parse(&text)?;
        info!(
            "loaded {} records for {} workers from {}",
            store.records.len(),
            store.by_user.len(),
            path.display()
        );
        Ok(store)
    }

    /// Parse dataset text (semicolon-delimited, header row required).
    ///
    /// Required columns: `user_id`, `timestamp`. The emotion label, mean/std
    /// and arousal/valence/dominance columns are read when present; any
    /// other column is ignored.
    pub fn parse(text: &str) -> Result<Self, AnalyticsError> {
        let mut lines = text.lines().enumerate();
        let header = loop {
            match lines.next() {
                Some((_, line)) if line.trim().is_empty() => continue,
                Some((_, line)) => break line,
                None => return Err(AnalyticsError::DataSource("empty dataset".to_string())),
            }
        };
        let columns = Columns::from_header(header)?;

        let mut records = Vec::new();
        for (line_no, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            let record = columns.parse_row(line).map_err(|msg| {
                AnalyticsError::DataSource(format!("line {}: {msg}", line_no + 1))
            })?;
            records.push(record);
        }

        Ok(Self::from_records(records))
    }

    /// Build a store from already-materialized records.
    pub fn from_records(records: Vec<MeasurementRecord>) -> Self {
        let mut by_user: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
        let mut by_user_time: HashMap<i64, Vec<(i64, usize)>> = HashMap::new();

        for (idx, record) in records.iter().enumerate() {
            by_user.entry(record.user_id).or_default().push(idx);
            by_user_time
                .entry(record.user_id)
                .or_default()
                .push((record.timestamp, idx));
        }

        // File order does not guarantee time order; range scans rely on it.
        for entries in by_user_time.values_mut() {
            entries.sort_by_key(|&(ts, _)| ts);
        }

        debug!("indexed {} records", records.len());
        Self {
            records,
            by_user,
            by_user_time,
        }
    }

    /// All records in file order
    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    /// Records for one worker in file order; empty for unknown workers
    pub fn records_for_user(&self, user_id: i64) -> Vec<&MeasurementRecord> {
        self.by_user
            .get(&user_id)
            .map(|indices| indices.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default()
    }

    /// Distinct worker ids, ascending
    pub fn user_ids(&self) -> Vec<i64> {
        self.by_user.keys().copied().collect()
    }

    /// Distinct, trimmed, non-empty emotion labels across all three slots
    pub fn emotions(&self) -> Vec<String> {
        let mut labels = BTreeSet::new();
        for record in &self.records {
            for label in record.emotion_labels() {
                let trimmed = label.trim();
                if !trimmed.is_empty() {
                    labels.insert(trimmed.to_string());
                }
            }
        }
        labels.into_iter().collect()
    }

    /// Records for one worker whose datetime lies in the inclusive interval
    /// `[start, end]`, ascending by timestamp. Unknown workers yield an
    /// empty result, not an error.
    pub fn filter_by_user_and_range(
        &self,
        user_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<&MeasurementRecord> {
        let Some(entries) = self.by_user_time.get(&user_id) else {
            return Vec::new();
        };
        let (start_ts, end_ts) = (start.timestamp(), end.timestamp());

        // Entries are sorted by timestamp, so the matching records form one
        // contiguous run.
        let lo = entries.partition_point(|&(ts, _)| ts < start_ts);
        let hi = entries.partition_point(|&(ts, _)| ts <= end_ts);
        entries[lo..hi].iter().map(|&(_, i)| &self.records[i]).collect()
    }

    /// Records across all workers whose datetime lies in `[start, end]`
    /// (bounds swapped if supplied reversed) and whose time of day falls in
    /// the named shift. Unknown shift names are a fatal query error.
    pub fn filter_by_shift_and_range(
        &self,
        shift_name: &str,
        schedule: &ShiftSchedule,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<&MeasurementRecord>, AnalyticsError> {
        let shift = schedule.get(shift_name)?;
        let (start, end) = if start > end { (end, start) } else { (start, end) };

        Ok(self
            .records
            .iter()
            .filter(|record| {
                let dt = record.datetime();
                start <= dt && dt <= end && shift.contains(dt.time())
            })
            .collect())
    }
}

/// Column layout resolved from the header row
struct Columns {
    user_id: usize,
    timestamp: usize,
    file_name: Option<usize>,
    emotion_labels: [Option<usize>; 3],
    emotion_means: [Option<usize>; 3],
    emotion_stds: [Option<usize>; 3],
    arousal: Option<usize>,
    valence: Option<usize>,
    dominance: Option<usize>,
    width: usize,
}

impl Columns {
    fn from_header(header: &str) -> Result<Self, AnalyticsError> {
        let names: Vec<&str> = header.split(';').map(str::trim).collect();
        let position = |name: &str| names.iter().position(|&n| n == name);
        let required = |name: &str| {
            position(name).ok_or_else(|| {
                AnalyticsError::DataSource(format!("missing required column '{name}'"))
            })
        };

        let slot = |prefix: &str| {
            [
                position(&format!("Emotion_1_{prefix}")),
                position(&format!("Emotion_2_{prefix}")),
                position(&format!("Emotion_3_{prefix}")),
            ]
        };

        Ok(Self {
            user_id: required("user_id")?,
            timestamp: required("timestamp")?,
            file_name: position("file_name"),
            emotion_labels: slot("label"),
            emotion_means: slot("mean"),
            emotion_stds: slot("std"),
            arousal: position("arousal"),
            valence: position("valence"),
            dominance: position("dominance"),
            width: names.len(),
        })
    }

    fn parse_row(&self, line: &str) -> Result<MeasurementRecord, String> {
        let fields: Vec<&str> = line.split(';').map(str::trim).collect();
        if fields.len() != self.width {
            return Err(format!(
                "expected {} fields, found {}",
                self.width,
                fields.len()
            ));
        }

        let user_id: i64 = fields[self.user_id]
            .parse()
            .map_err(|_| format!("invalid user_id '{}'", fields[self.user_id]))?;
        let timestamp: i64 = fields[self.timestamp]
            .parse()
            .map_err(|_| format!("invalid timestamp '{}'", fields[self.timestamp]))?;

        let text = |col: Option<usize>| col.map(|i| fields[i].to_string()).unwrap_or_default();
        let number = |col: Option<usize>| -> Result<f64, String> {
            match col {
                Some(i) if !fields[i].is_empty() => fields[i]
                    .parse()
                    .map_err(|_| format!("invalid number '{}'", fields[i])),
                _ => Ok(0.0),
            }
        };

        let slot = |i: usize| -> Result<EmotionSlot, String> {
            Ok(EmotionSlot {
                label: text(self.emotion_labels[i]),
                mean: number(self.emotion_means[i])?,
                std: number(self.emotion_stds[i])?,
            })
        };
        let emotions = [slot(0)?, slot(1)?, slot(2)?];

        Ok(MeasurementRecord {
            file_name: text(self.file_name),
            timestamp,
            user_id,
            emotions,
            arousal: number(self.arousal)?,
            valence: number(self.valence)?,
            dominance: number(self.dominance)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
user_id;timestamp;Emotion_1_label;Emotion_2_label;Emotion_3_label
1;1706640000;happiness;sadness;anger
1;1706726400;neutral;happiness;sadness
2;1706726400;anger;neutral;happiness
2;1706812800;sadness;anger;neutral
";

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_parse_builds_consistent_indices() {
        let store = RecordStore::parse(SAMPLE).unwrap();

        assert_eq!(store.records().len(), 4);
        assert_eq!(store.user_ids(), vec![1, 2]);
        assert_eq!(store.records_for_user(1).len(), 2);
        assert_eq!(store.records_for_user(2).len(), 2);
        assert_eq!(store.records_for_user(99).len(), 0);
    }

    #[test]
    fn test_emotions_are_trimmed_sorted_distinct() {
        let store = RecordStore::parse(SAMPLE).unwrap();
        assert_eq!(
            store.emotions(),
            vec!["anger", "happiness", "neutral", "sadness"]
        );
    }

    #[test]
    fn test_filter_by_user_and_range_is_inclusive() {
        let store = RecordStore::parse(SAMPLE).unwrap();

        // 1706640000 = 2024-01-30 18:40 UTC, 1706726400 = 2024-01-31 18:40 UTC
        let hits = store.filter_by_user_and_range(1, utc(2024, 1, 30, 0, 0), utc(2024, 2, 1, 0, 0));
        assert_eq!(hits.len(), 2);

        // Inclusive upper bound exactly at the record's instant
        let exact = store.filter_by_user_and_range(
            1,
            utc(2024, 1, 30, 0, 0),
            Utc.timestamp_opt(1706640000, 0).unwrap(),
        );
        assert_eq!(exact.len(), 1);

        let none = store.filter_by_user_and_range(1, utc(2025, 1, 1, 0, 0), utc(2025, 2, 1, 0, 0));
        assert!(none.is_empty());
    }

    #[test]
    fn test_by_user_time_is_sorted_even_when_file_is_not() {
        let shuffled = "\
user_id;timestamp;Emotion_1_label;Emotion_2_label;Emotion_3_label
1;1706812800;neutral;neutral;neutral
1;1706640000;neutral;neutral;neutral
1;1706726400;neutral;neutral;neutral
";
        let store = RecordStore::parse(shuffled).unwrap();
        let hits = store.filter_by_user_and_range(1, utc(2024, 1, 1, 0, 0), utc(2024, 3, 1, 0, 0));
        let timestamps: Vec<i64> = hits.iter().map(|r| r.timestamp).collect();
        assert_eq!(timestamps, vec![1706640000, 1706726400, 1706812800]);
    }

    #[test]
    fn test_malformed_row_fails_the_whole_load() {
        let bad = "\
user_id;timestamp;Emotion_1_label;Emotion_2_label;Emotion_3_label
1;1706640000;happiness;sadness;anger
2;not-a-timestamp;anger;neutral;happiness
";
        let err = RecordStore::parse(bad).unwrap_err();
        assert!(matches!(err, AnalyticsError::DataSource(msg) if msg.contains("line 3")));
    }

    #[test]
    fn test_missing_required_column_is_fatal() {
        let err = RecordStore::parse("timestamp;Emotion_1_label\n1706640000;happiness\n")
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::DataSource(msg) if msg.contains("user_id")));
    }

    #[test]
    fn test_full_schema_row() {
        let full = "\
file_name;timestamp;user_id;Emotion_1_mean;Emotion_1_std;Emotion_1_label;Emotion_2_mean;Emotion_2_std;Emotion_2_label;Emotion_3_mean;Emotion_3_std;Emotion_3_label;arousal;valence;dominance
1706640000_0.wav;1706640000;7;0.81;0.04;happiness;0.62;0.03;neutral;0.40;0.02;sadness;0.55;0.8;0.7
";
        let store = RecordStore::parse(full).unwrap();
        let record = &store.records()[0];

        assert_eq!(record.file_name, "1706640000_0.wav");
        assert_eq!(record.user_id, 7);
        assert_eq!(record.emotions[0].label, "happiness");
        assert_eq!(record.emotions[0].mean, 0.81);
        assert_eq!(record.emotions[2].std, 0.02);
        assert_eq!(record.dimensions(), [0.55, 0.8, 0.7]);
    }

    #[test]
    fn test_filter_by_shift_swaps_reversed_bounds() {
        let store = RecordStore::parse(SAMPLE).unwrap();
        let schedule = ShiftSchedule::default();

        // 18:40 UTC falls in the afternoon shift; bounds given reversed.
        let hits = store
            .filter_by_shift_and_range(
                "afternoon",
                &schedule,
                utc(2024, 2, 1, 0, 0),
                utc(2024, 1, 30, 0, 0),
            )
            .unwrap();
        assert_eq!(hits.len(), 3);

        let err = store
            .filter_by_shift_and_range(
                "graveyard",
                &schedule,
                utc(2024, 1, 30, 0, 0),
                utc(2024, 2, 1, 0, 0),
            )
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::UnknownShift(_)));
    }
}
