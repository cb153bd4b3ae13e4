use std::io::Write;

use crate::config::ColumnMapping;
use crate::error::MergeError;
use crate::model::{MergedRow, Model};

/// Suffix appended to the phenotype to name the merged table.
pub const OUTPUT_SUFFIX: &str = "_meta_merge_results.txt";

pub fn output_file_name(phenotype: &str) -> String {
    format!("{phenotype}{OUTPUT_SUFFIX}")
}

/// Output header: identifier, fixed statistics, random statistics, label.
pub fn header(columns: &ColumnMapping) -> Vec<String> {
    let mut header = Vec::with_capacity(12);
    header.push(columns.id.clone());
    for model in [Model::Fixed, Model::Random] {
        for name in columns.stat_columns() {
            header.push(format!("{name}{}", model.suffix()));
        }
    }
    header.push(columns.label.clone());
    header
}

/// Magnitudes outside [1e-5, 1e16) are written in exponent form.
const PLAIN_MIN: f64 = 1e-5;
const PLAIN_MAX: f64 = 1e16;

/// Shortest representation that parses back to the same value; NaN is an empty field.
pub fn format_stat(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }
    let magnitude = value.abs();
    if value != 0.0 && value.is_finite() && !(PLAIN_MIN..PLAIN_MAX).contains(&magnitude) {
        format!("{value:e}")
    } else {
        value.to_string()
    }
}

pub fn write_tsv<W: Write>(
    writer: W,
    rows: &[MergedRow],
    columns: &ColumnMapping,
) -> Result<(), MergeError> {
    let io_err = |e: csv::Error| MergeError::Io(e.to_string());

    let mut tsv = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);

    tsv.write_record(header(columns)).map_err(io_err)?;

    for row in rows {
        let mut record: Vec<String> = Vec::with_capacity(12);
        record.push(row.id.clone());
        record.extend(row.fixed.values().into_iter().map(format_stat));
        record.extend(row.random.values().into_iter().map(format_stat));
        record.push(row.label.as_str().to_string());
        tsv.write_record(&record).map_err(io_err)?;
    }

    tsv.flush().map_err(|e| MergeError::Io(e.to_string()))?;
    Ok(())
}

pub fn render_tsv(rows: &[MergedRow], columns: &ColumnMapping) -> Result<String, MergeError> {
    let mut buf = Vec::new();
    write_tsv(&mut buf, rows, columns)?;
    String::from_utf8(buf).map_err(|e| MergeError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SensitivityLabel, Stats};

    #[test]
    fn output_name_appends_suffix() {
        assert_eq!(output_file_name("pheno"), "pheno_meta_merge_results.txt");
        assert_eq!(output_file_name("T2D"), "T2D_meta_merge_results.txt");
    }

    #[test]
    fn header_has_twelve_columns_in_order() {
        assert_eq!(
            header(&ColumnMapping::default()),
            vec![
                "ID",
                "META_LOG_OR_fixed",
                "META_SE_fixed",
                "META_P_fixed",
                "Q_fixed",
                "I2_fixed",
                "META_LOG_OR_random",
                "META_SE_random",
                "META_P_random",
                "Q_random",
                "I2_random",
                "sensitivity_analysis",
            ]
        );
    }

    #[test]
    fn render_rows() {
        let rows = vec![MergedRow {
            id: "rs1".into(),
            fixed: Stats { log_or: 0.5, se: 0.1, p: 0.01, q: 3.0, i2: 60.0 },
            random: Stats { log_or: -0.5, se: 0.2, p: 1e-8, q: 3.0, i2: f64::NAN },
            label: SensitivityLabel::UseRandomEffectConflicting,
        }];
        let out = render_tsv(&rows, &ColumnMapping::default()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "rs1\t0.5\t0.1\t0.01\t3\t60\t-0.5\t0.2\t1e-8\t3\t\tUse random-effect (conflicting results)"
        );
    }

    #[test]
    fn empty_table_is_header_only() {
        let out = render_tsv(&[], &ColumnMapping::default()).unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.starts_with("ID\tMETA_LOG_OR_fixed\t"));
        assert!(out.trim_end().ends_with("sensitivity_analysis"));
    }

    #[test]
    fn format_stat_round_trips() {
        for v in [0.1, -2.5e-300, 1e21, 123456.789, 0.0] {
            assert_eq!(format_stat(v).parse::<f64>().unwrap(), v);
        }
        assert_eq!(format_stat(f64::NAN), "");
    }

    #[test]
    fn tiny_and_huge_values_use_exponent_form() {
        assert_eq!(format_stat(1e-300), "1e-300");
        assert_eq!(format_stat(-2.5e-12), "-2.5e-12");
        assert_eq!(format_stat(3.2e20), "3.2e20");
        assert_eq!(format_stat(0.00012), "0.00012");
        assert_eq!(format_stat(35.0), "35");
        assert_eq!(format_stat(0.0), "0");
    }
}
