use std::fmt;

use crate::model::Model;

#[derive(Debug)]
pub enum MergeError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad threshold, clashing column names, etc.).
    ConfigValidation(String),
    /// Required column absent from a table header.
    MissingColumn { model: Model, column: String },
    /// Row with an empty identifier field.
    EmptyIdentifier { model: Model, line: u64 },
    /// Statistic field that is neither a number nor a missing-value token.
    NumberParse { model: Model, line: u64, column: String, value: String },
    /// Structural TSV error (ragged row, bad quoting, invalid UTF-8).
    Tsv { model: Model, message: String },
    /// Identifier repeated within one table.
    DuplicateIds(Vec<DuplicateId>),
    /// Output serialization error.
    Io(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateId {
    pub model: Model,
    pub id: String,
    pub count: usize,
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { model, column } => {
                write!(f, "{model} table: missing column '{column}'")
            }
            Self::EmptyIdentifier { model, line } => {
                write!(f, "{model} table, line {line}: empty identifier")
            }
            Self::NumberParse { model, line, column, value } => {
                write!(f, "{model} table, line {line}: cannot parse '{value}' in column '{column}' as a number")
            }
            Self::Tsv { model, message } => write!(f, "{model} table: {message}"),
            Self::DuplicateIds(dups) => {
                write!(f, "duplicate identifiers found:")?;
                for dup in dups {
                    write!(f, "\n  {} table: {:?} appears {} times", dup.model, dup.id, dup.count)?;
                }
                Ok(())
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for MergeError {}
