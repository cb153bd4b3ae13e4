use crate::config::ColumnMapping;
use crate::error::MergeError;
use crate::model::{Model, StatRow, Stats};

/// Field values read as a missing statistic (NaN) rather than a parse error.
///
/// The default missing-value markers of the tabular tooling that writes these
/// files, so a row it left blank degrades to "Check input" instead of failing.
pub const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parse a statistic field: a decimal/scientific number or a missing-value token.
/// Returns None for anything else.
pub fn parse_stat(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if MISSING_TOKENS.contains(&trimmed) {
        return Some(f64::NAN);
    }
    trimmed.parse::<f64>().ok()
}

/// Parse one model's tab-separated results into rows.
///
/// Columns are located by header name; extra columns are ignored. Any missing
/// column, empty identifier or unparseable number aborts the load.
pub fn load_stat_rows(
    model: Model,
    tsv_data: &str,
    columns: &ColumnMapping,
) -> Result<Vec<StatRow>, MergeError> {
    let tsv_err = |e: csv::Error| MergeError::Tsv { model, message: e.to_string() };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(tsv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(tsv_err)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let idx = |name: &str| -> Result<usize, MergeError> {
        headers.iter().position(|h| h == name).ok_or_else(|| MergeError::MissingColumn {
            model,
            column: name.into(),
        })
    };

    let id_idx = idx(&columns.id)?;
    let stat_idx = [
        idx(&columns.log_or)?,
        idx(&columns.se)?,
        idx(&columns.p)?,
        idx(&columns.q)?,
        idx(&columns.i2)?,
    ];

    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record.map_err(tsv_err)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let id = record.get(id_idx).unwrap_or("");
        if id.trim().is_empty() {
            return Err(MergeError::EmptyIdentifier { model, line });
        }

        let mut values = [0.0f64; 5];
        for ((value, &col_idx), column) in values.iter_mut().zip(&stat_idx).zip(columns.stat_columns()) {
            let raw = record.get(col_idx).unwrap_or("");
            *value = parse_stat(raw).ok_or_else(|| MergeError::NumberParse {
                model,
                line,
                column: column.into(),
                value: raw.into(),
            })?;
        }
        let [log_or, se, p, q, i2] = values;

        rows.push(StatRow {
            id: id.to_string(),
            stats: Stats { log_or, se, p, q, i2 },
        });
    }

    tracing::debug!(model = %model, rows = rows.len(), "table parsed");
    Ok(rows)
}
