use std::collections::BTreeMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Which meta-analysis model a table was computed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Model {
    Fixed,
    Random,
}

impl Model {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Random => "random",
        }
    }

    /// Suffix appended to statistic column names in the merged table.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Fixed => "_fixed",
            Self::Random => "_random",
        }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five per-identifier statistics of one model. NaN marks a missing value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub log_or: f64,
    pub se: f64,
    pub p: f64,
    pub q: f64,
    pub i2: f64,
}

impl Stats {
    /// Values in output column order: log-OR, SE, P, Q, I2.
    pub fn values(&self) -> [f64; 5] {
        [self.log_or, self.se, self.p, self.q, self.i2]
    }
}

/// A single parsed row from the fixed or random table.
#[derive(Debug, Clone, PartialEq)]
pub struct StatRow {
    pub id: String,
    pub stats: Stats,
}

// ---------------------------------------------------------------------------
// Join
// ---------------------------------------------------------------------------

/// Fixed and random statistics sharing one identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedPair {
    pub id: String,
    pub fixed: Stats,
    pub random: Stats,
}

#[derive(Debug)]
pub struct JoinOutput {
    /// One pair per identifier present in both tables, in fixed-table order.
    pub pairs: Vec<JoinedPair>,
    /// Identifiers dropped because the random table lacks them.
    pub fixed_only: Vec<String>,
    /// Identifiers dropped because the fixed table lacks them.
    pub random_only: Vec<String>,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SensitivityLabel {
    #[serde(rename = "Use fixed-effect")]
    UseFixedEffect,
    #[serde(rename = "Moderate heterogeneity")]
    ModerateHeterogeneity,
    #[serde(rename = "Use random-effect (conflicting results)")]
    UseRandomEffectConflicting,
    #[serde(rename = "High heterogeneity but consistent results")]
    HighHeterogeneityConsistent,
    #[serde(rename = "Check input")]
    CheckInput,
}

impl SensitivityLabel {
    pub const ALL: [SensitivityLabel; 5] = [
        Self::UseFixedEffect,
        Self::ModerateHeterogeneity,
        Self::UseRandomEffectConflicting,
        Self::HighHeterogeneityConsistent,
        Self::CheckInput,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UseFixedEffect => "Use fixed-effect",
            Self::ModerateHeterogeneity => "Moderate heterogeneity",
            Self::UseRandomEffectConflicting => "Use random-effect (conflicting results)",
            Self::HighHeterogeneityConsistent => "High heterogeneity but consistent results",
            Self::CheckInput => "Check input",
        }
    }
}

impl std::fmt::Display for SensitivityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A joined row with its sensitivity label appended.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRow {
    pub id: String,
    pub fixed: Stats,
    pub random: Stats,
    pub label: SensitivityLabel,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    pub fixed_rows: usize,
    pub random_rows: usize,
    pub merged: usize,
    pub fixed_only: usize,
    pub random_only: usize,
    /// Rows per label; every label is present, zero when unused.
    pub label_counts: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeMeta {
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone)]
pub struct MergeResult {
    pub meta: MergeMeta,
    pub summary: MergeSummary,
    pub rows: Vec<MergedRow>,
    pub fixed_only: Vec<String>,
    pub random_only: Vec<String>,
}
