use serde::Deserialize;

use crate::error::MergeError;

/// Phenotype used to name the output when none is given.
pub const DEFAULT_PHENOTYPE: &str = "pheno";

/// Default fixed-effect input file, resolved against the working directory.
pub const DEFAULT_FIXED_FILE: &str = "meta_fixed_results.txt";

/// Default random-effect input file, resolved against the working directory.
pub const DEFAULT_RANDOM_FILE: &str = "meta_random_results.txt";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    pub columns: ColumnMapping,
    pub thresholds: Thresholds,
    pub fixed_file: Option<String>,
    pub random_file: Option<String>,
    pub phenotype: Option<String>,
}

impl MergeConfig {
    pub fn from_toml(input: &str) -> Result<Self, MergeError> {
        let config: MergeConfig =
            toml::from_str(input).map_err(|e| MergeError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MergeError> {
        self.columns.validate()?;
        self.thresholds.validate()?;

        if let Some(ref phenotype) = self.phenotype {
            if phenotype.is_empty() {
                return Err(MergeError::ConfigValidation("phenotype must not be empty".into()));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Header names of the identifier and the five statistic columns.
///
/// The same names are used in both input tables. In the merged output each
/// statistic column appears twice, suffixed `_fixed` and `_random`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnMapping {
    pub id: String,
    pub log_or: String,
    pub se: String,
    pub p: String,
    pub q: String,
    pub i2: String,
    /// Name of the appended label column.
    pub label: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            id: "ID".into(),
            log_or: "META_LOG_OR".into(),
            se: "META_SE".into(),
            p: "META_P".into(),
            q: "Q".into(),
            i2: "I2".into(),
            label: "sensitivity_analysis".into(),
        }
    }
}

impl ColumnMapping {
    /// Statistic column names in output order, matching [`crate::Stats::values`].
    pub fn stat_columns(&self) -> [&str; 5] {
        [&self.log_or, &self.se, &self.p, &self.q, &self.i2]
    }

    pub fn validate(&self) -> Result<(), MergeError> {
        let mut names: Vec<&str> = vec![self.id.as_str()];
        names.extend(self.stat_columns());
        names.push(&self.label);

        for name in &names {
            if name.trim().is_empty() {
                return Err(MergeError::ConfigValidation("column names must not be empty".into()));
            }
        }

        for (i, name) in names.iter().enumerate() {
            if names[i + 1..].contains(name) {
                return Err(MergeError::ConfigValidation(format!(
                    "column '{name}' is mapped more than once"
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Cut-offs used by the sensitivity classifier.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    /// I² below this trusts the fixed-effect model outright.
    pub low_i2: f64,
    /// I² at or above this compares the two models' conclusions.
    pub high_i2: f64,
    /// A p-value strictly below this is significant.
    pub alpha: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low_i2: 30.0,
            high_i2: 50.0,
            alpha: 0.05,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), MergeError> {
        if !self.low_i2.is_finite() || !self.high_i2.is_finite() || !self.alpha.is_finite() {
            return Err(MergeError::ConfigValidation("thresholds must be finite numbers".into()));
        }
        if self.low_i2 > self.high_i2 {
            return Err(MergeError::ConfigValidation(format!(
                "low_i2 ({}) must not exceed high_i2 ({})",
                self.low_i2, self.high_i2
            )));
        }
        if self.alpha <= 0.0 || self.alpha >= 1.0 {
            return Err(MergeError::ConfigValidation(format!(
                "alpha must be between 0 and 1 (exclusive), got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}
