//! CLI Exit Code Registry
//!
//! Single source of truth for `metamerge` exit codes. Pipelines that call the
//! tool branch on these, so treat them as part of the shell contract.
//!
//! | Code | Meaning                                                     |
//! |------|-------------------------------------------------------------|
//! | 0    | Success, merged table written                               |
//! | 2    | Usage error (bad args, unreadable or invalid config)        |
//! | 3    | Input error (missing file, missing column, bad number)      |
//! | 4    | Duplicate identifiers within one input table                |
//! | 5    | Output error (cannot write the merged table or summary)     |

/// Success - merged table written.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments, unreadable or invalid config file.
pub const EXIT_USAGE: u8 = 2;

/// An input table could not be read or parsed.
pub const EXIT_INPUT: u8 = 3;

/// An identifier appears more than once in one input table.
pub const EXIT_DUPLICATE_IDS: u8 = 4;

/// The merged table or summary could not be written.
pub const EXIT_OUTPUT: u8 = 5;

/// Map an engine error to its exit code.
pub fn merge_exit_code(err: &metamerge_engine::MergeError) -> u8 {
    use metamerge_engine::MergeError;

    match err {
        MergeError::ConfigParse(_) | MergeError::ConfigValidation(_) => EXIT_USAGE,
        MergeError::MissingColumn { .. }
        | MergeError::EmptyIdentifier { .. }
        | MergeError::NumberParse { .. }
        | MergeError::Tsv { .. } => EXIT_INPUT,
        MergeError::DuplicateIds(_) => EXIT_DUPLICATE_IDS,
        MergeError::Io(_) => EXIT_OUTPUT,
    }
}
