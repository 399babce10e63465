//! affectlog - batch analytics core for audio-derived worker emotion data
//!
//! The crate ingests per-interaction emotional measurements (categorical
//! emotion labels plus arousal/valence/dominance scores, one record per
//! audio sample) and provides two capabilities:
//!
//! - **Record Store**: loads a semicolon-delimited dataset into memory,
//!   indexes it by worker and by worker/time, and answers range, shift and
//!   vocabulary queries. Dataset swaps are construct-then-publish.
//! - **Condition Classifier**: scores a worker's accumulated measurements
//!   against static reference tables and returns the dominant psychological
//!   condition (`no_disorder`, `depression`, `anxiety`), per subject or in
//!   bulk across a dataset.
//!
//! Audio capture, transcription, feature extraction and the inference models
//! that produce the measurements live upstream; the web layer that exposes
//! these queries lives downstream. Neither belongs to this crate.

pub mod classifier;
pub mod dataset;
pub mod error;
pub mod export;
pub mod handle;
pub mod shifts;
pub mod tables;
pub mod timewindow;
pub mod types;

pub use classifier::{classify, classify_all, score, ConditionScores};
pub use dataset::RecordStore;
pub use error::AnalyticsError;
pub use export::{render_conditions_csv, write_conditions_csv};
pub use handle::StoreHandle;
pub use shifts::{Shift, ShiftSchedule};
pub use timewindow::{order_bounds, RangePreset};
pub use types::{Condition, EmotionSlot, MeasurementRecord};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
