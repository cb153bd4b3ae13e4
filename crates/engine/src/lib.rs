//! `metamerge-engine` — fixed/random-effect meta-analysis merge engine.
//!
//! Pure engine crate: receives tab-separated text, returns the joined table
//! with a sensitivity-analysis label per identifier. No CLI or filesystem
//! dependencies.

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod join;
pub mod loader;
pub mod model;
pub mod summary;
pub mod writer;

pub use classify::{classify, classify_with};
pub use config::{ColumnMapping, MergeConfig, Thresholds};
pub use engine::run;
pub use error::MergeError;
pub use model::{MergeResult, MergedRow, Model, SensitivityLabel, StatRow, Stats};
pub use writer::{output_file_name, render_tsv, write_tsv};
