use crate::config::Thresholds;
use crate::model::{JoinedPair, MergedRow, SensitivityLabel};

/// Classify one identifier with the default thresholds (I² 30/50, alpha 0.05).
pub fn classify(
    p_fixed: f64,
    p_random: f64,
    i2: f64,
    logor_fixed: f64,
    logor_random: f64,
) -> SensitivityLabel {
    classify_with(&Thresholds::default(), p_fixed, p_random, i2, logor_fixed, logor_random)
}

/// Sensitivity verdict from the fixed-model I² and both models' p-values and
/// effect directions.
///
/// Tiers, first match wins:
/// - `i2 < low_i2` → UseFixedEffect
/// - `low_i2 <= i2 < high_i2` → ModerateHeterogeneity
/// - `i2 >= high_i2` → UseRandomEffectConflicting if exactly one model is
///   significant or the log-ORs differ in sign, else HighHeterogeneityConsistent
/// - anything else (NaN I²) → CheckInput
pub fn classify_with(
    t: &Thresholds,
    p_fixed: f64,
    p_random: f64,
    i2: f64,
    logor_fixed: f64,
    logor_random: f64,
) -> SensitivityLabel {
    if i2 < t.low_i2 {
        SensitivityLabel::UseFixedEffect
    } else if t.low_i2 <= i2 && i2 < t.high_i2 {
        SensitivityLabel::ModerateHeterogeneity
    } else if i2 >= t.high_i2 {
        let sign_conflict = sign(logor_fixed) != sign(logor_random);
        let significance_conflict = (p_fixed < t.alpha && p_random >= t.alpha)
            || (p_fixed >= t.alpha && p_random < t.alpha);

        if significance_conflict || sign_conflict {
            SensitivityLabel::UseRandomEffectConflicting
        } else {
            SensitivityLabel::HighHeterogeneityConsistent
        }
    } else {
        SensitivityLabel::CheckInput
    }
}

/// -1, 0 or +1; NaN stays NaN so it never equals another sign.
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else if x == 0.0 {
        0.0
    } else {
        f64::NAN
    }
}

/// Label for a joined pair: fixed I², both p-values, both log-ORs.
pub fn label_for(pair: &JoinedPair, thresholds: &Thresholds) -> SensitivityLabel {
    classify_with(
        thresholds,
        pair.fixed.p,
        pair.random.p,
        pair.fixed.i2,
        pair.fixed.log_or,
        pair.random.log_or,
    )
}

/// Append a label to every joined pair. Rows are independent; order is kept.
pub fn annotate(pairs: Vec<JoinedPair>, thresholds: &Thresholds) -> Vec<MergedRow> {
    pairs
        .into_iter()
        .map(|pair| {
            let label = label_for(&pair, thresholds);
            if label == SensitivityLabel::CheckInput {
                tracing::warn!(id = %pair.id, i2 = pair.fixed.i2, "I2 is not a number; labeled \"Check input\"");
            }
            MergedRow {
                id: pair.id,
                fixed: pair.fixed,
                random: pair.random,
                label,
            }
        })
        .collect()
}
