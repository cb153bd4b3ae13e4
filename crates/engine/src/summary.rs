use std::collections::BTreeMap;

use crate::model::{MergeSummary, MergedRow, SensitivityLabel};

/// Compute summary statistics from the labeled rows and the join's drop lists.
pub fn compute_summary(
    fixed_rows: usize,
    random_rows: usize,
    rows: &[MergedRow],
    fixed_only: &[String],
    random_only: &[String],
) -> MergeSummary {
    let mut label_counts: BTreeMap<String, usize> = SensitivityLabel::ALL
        .iter()
        .map(|label| (label.to_string(), 0))
        .collect();

    for r in rows {
        *label_counts.entry(r.label.to_string()).or_insert(0) += 1;
    }

    MergeSummary {
        fixed_rows,
        random_rows,
        merged: rows.len(),
        fixed_only: fixed_only.len(),
        random_only: random_only.len(),
        label_counts,
    }
}

impl MergeSummary {
    pub fn count(&self, label: SensitivityLabel) -> usize {
        self.label_counts.get(label.as_str()).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Stats;

    fn row(label: SensitivityLabel) -> MergedRow {
        let stats = Stats { log_or: 0.1, se: 0.1, p: 0.1, q: 0.1, i2: 0.1 };
        MergedRow {
            id: "k".into(),
            fixed: stats,
            random: stats,
            label,
        }
    }

    #[test]
    fn summary_counts() {
        let rows = vec![
            row(SensitivityLabel::UseFixedEffect),
            row(SensitivityLabel::UseFixedEffect),
            row(SensitivityLabel::UseRandomEffectConflicting),
            row(SensitivityLabel::CheckInput),
        ];
        let fixed_only = vec!["x".to_string(), "y".to_string()];
        let random_only = vec!["z".to_string()];
        let summary = compute_summary(6, 5, &rows, &fixed_only, &random_only);
        assert_eq!(summary.fixed_rows, 6);
        assert_eq!(summary.random_rows, 5);
        assert_eq!(summary.merged, 4);
        assert_eq!(summary.fixed_only, 2);
        assert_eq!(summary.random_only, 1);
        assert_eq!(summary.count(SensitivityLabel::UseFixedEffect), 2);
        assert_eq!(summary.count(SensitivityLabel::UseRandomEffectConflicting), 1);
        assert_eq!(summary.count(SensitivityLabel::CheckInput), 1);
    }

    #[test]
    fn every_label_present_even_when_unused() {
        let summary = compute_summary(0, 0, &[], &[], &[]);
        assert_eq!(summary.label_counts.len(), 5);
        assert!(summary.label_counts.values().all(|&c| c == 0));
    }
}
