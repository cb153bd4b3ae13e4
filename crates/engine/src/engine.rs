use crate::classify::annotate;
use crate::config::MergeConfig;
use crate::error::MergeError;
use crate::join::join;
use crate::loader::load_stat_rows;
use crate::model::{MergeMeta, MergeResult, Model};
use crate::summary::compute_summary;

/// Run the merge per config: parse both tables, join, label, summarize.
pub fn run(fixed_tsv: &str, random_tsv: &str, config: &MergeConfig) -> Result<MergeResult, MergeError> {
    config.validate()?;

    let fixed = load_stat_rows(Model::Fixed, fixed_tsv, &config.columns)?;
    let random = load_stat_rows(Model::Random, random_tsv, &config.columns)?;

    let joined = join(&fixed, &random)?;
    let rows = annotate(joined.pairs, &config.thresholds);

    let summary = compute_summary(
        fixed.len(),
        random.len(),
        &rows,
        &joined.fixed_only,
        &joined.random_only,
    );

    Ok(MergeResult {
        meta: MergeMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        rows,
        fixed_only: joined.fixed_only,
        random_only: joined.random_only,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SensitivityLabel;
    use crate::writer::render_tsv;

    const FIXED: &str = "\
ID\tMETA_LOG_OR\tMETA_SE\tMETA_P\tQ\tI2
rs1\t0.12\t0.05\t0.0164\t1.2\t10.5
rs2\t0.50\t0.20\t0.0124\t12.3\t60
rs3\t0.10\t0.09\t0.27\t0.5\t0
";

    const RANDOM: &str = "\
ID\tMETA_LOG_OR\tMETA_SE\tMETA_P\tQ\tI2
rs2\t0.45\t0.30\t0.1336\t12.3\t60
rs1\t0.11\t0.06\t0.066\t1.2\t10.5
rs9\t0.3\t0.1\t0.01\t1\t5
";

    #[test]
    fn run_two_tables() {
        let result = run(FIXED, RANDOM, &MergeConfig::default()).unwrap();

        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0].id, "rs1");
        assert_eq!(result.rows[0].label, SensitivityLabel::UseFixedEffect);
        assert_eq!(result.rows[1].id, "rs2");
        assert_eq!(result.rows[1].label, SensitivityLabel::UseRandomEffectConflicting);
        assert_eq!(result.fixed_only, vec!["rs3".to_string()]);
        assert_eq!(result.random_only, vec!["rs9".to_string()]);

        assert_eq!(result.summary.fixed_rows, 3);
        assert_eq!(result.summary.random_rows, 3);
        assert_eq!(result.summary.merged, 2);
        assert_eq!(result.summary.count(SensitivityLabel::UseFixedEffect), 1);
        assert_eq!(result.meta.engine_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn run_then_render() {
        let result = run(FIXED, RANDOM, &MergeConfig::default()).unwrap();
        let out = render_tsv(&result.rows, &MergeConfig::default().columns).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "rs1\t0.12\t0.05\t0.0164\t1.2\t10.5\t0.11\t0.06\t0.066\t1.2\t10.5\tUse fixed-effect"
        );
    }

    #[test]
    fn na_marker_in_i2_labels_row_check_input() {
        let fixed = FIXED.replace("12.3\t60\n", "12.3\tN/A\n");
        let result = run(&fixed, RANDOM, &MergeConfig::default()).unwrap();
        assert_eq!(result.rows[1].id, "rs2");
        assert_eq!(result.rows[1].label, SensitivityLabel::CheckInput);
        assert_eq!(result.rows[0].label, SensitivityLabel::UseFixedEffect);
    }

    #[test]
    fn run_rejects_invalid_config() {
        let mut config = MergeConfig::default();
        config.thresholds.alpha = 2.0;
        assert!(matches!(run(FIXED, RANDOM, &config), Err(MergeError::ConfigValidation(_))));
    }

    #[test]
    fn input_error_wins_over_join() {
        let bad = "ID\tMETA_LOG_OR\n";
        assert!(matches!(
            run(FIXED, bad, &MergeConfig::default()),
            Err(MergeError::MissingColumn { model: Model::Random, .. })
        ));
    }
}
