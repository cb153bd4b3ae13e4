//! `metamerge` — join fixed/random-effect results and write the labeled table.

use std::path::{Path, PathBuf};

use metamerge_engine::config::{DEFAULT_FIXED_FILE, DEFAULT_PHENOTYPE, DEFAULT_RANDOM_FILE};
use metamerge_engine::{output_file_name, render_tsv, MergeConfig, MergeResult, SensitivityLabel};

use crate::exit_codes::{merge_exit_code, EXIT_INPUT, EXIT_OUTPUT, EXIT_USAGE};
use crate::input::read_file_as_utf8;
use crate::CliError;

/// Resolved command-line arguments for one merge run.
pub struct MergeArgs {
    pub phenotype: Option<String>,
    pub fixed: Option<PathBuf>,
    pub random: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub summary_json: Option<PathBuf>,
    pub quiet: bool,
}

fn merge_err(err: metamerge_engine::MergeError) -> CliError {
    let code = merge_exit_code(&err);
    let hint = match &err {
        metamerge_engine::MergeError::DuplicateIds(_) => {
            Some("each identifier must appear once per table; deduplicate the input first".to_string())
        }
        metamerge_engine::MergeError::MissingColumn { .. } => {
            Some("map renamed columns under [columns] in a --config file".to_string())
        }
        _ => None,
    };
    CliError { code, message: err.to_string(), hint }
}

pub fn cmd_merge(args: MergeArgs) -> Result<(), CliError> {
    let (config, base_dir) = load_config(args.config.as_deref())?;

    // Flags win over the config file; config file paths are relative to it.
    let fixed_path = resolve_input(args.fixed, config.fixed_file.as_deref(), &base_dir, DEFAULT_FIXED_FILE);
    let random_path = resolve_input(args.random, config.random_file.as_deref(), &base_dir, DEFAULT_RANDOM_FILE);

    let phenotype = args
        .phenotype
        .or_else(|| config.phenotype.clone())
        .unwrap_or_else(|| DEFAULT_PHENOTYPE.to_string());
    let output_path = resolve_output(&phenotype, args.out_dir.as_deref())?;

    let fixed_tsv = read_table(&fixed_path)?;
    let random_tsv = read_table(&random_path)?;

    let result = metamerge_engine::run(&fixed_tsv, &random_tsv, &config).map_err(merge_err)?;

    let tsv = render_tsv(&result.rows, &config.columns).map_err(merge_err)?;
    std::fs::write(&output_path, tsv).map_err(|e| {
        CliError::new(EXIT_OUTPUT, format!("cannot write {}: {e}", output_path.display()))
    })?;
    tracing::info!(path = %output_path.display(), rows = result.rows.len(), "merged table written");

    if let Some(ref path) = args.summary_json {
        write_summary_json(path, &result)?;
    }

    // Status channel: the invoker captures the output file name from stdout.
    println!("{}", output_path.display());

    if !args.quiet {
        eprintln!("{}", summary_line(&result));
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<(MergeConfig, PathBuf), CliError> {
    let Some(path) = path else {
        return Ok((MergeConfig::default(), PathBuf::new()));
    };

    let config_str = std::fs::read_to_string(path).map_err(|e| {
        CliError::new(EXIT_USAGE, format!("cannot read config {}: {e}", path.display()))
    })?;
    let config = MergeConfig::from_toml(&config_str).map_err(merge_err)?;
    tracing::info!(path = %path.display(), "config loaded");

    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok((config, base_dir))
}

fn resolve_input(flag: Option<PathBuf>, from_config: Option<&str>, base_dir: &Path, default: &str) -> PathBuf {
    flag.or_else(|| from_config.map(|f| base_dir.join(f)))
        .unwrap_or_else(|| PathBuf::from(default))
}

/// Build the output path. A phenotype may carry a directory prefix
/// (`results/T2D`), which must name an existing directory.
fn resolve_output(phenotype: &str, out_dir: Option<&Path>) -> Result<PathBuf, CliError> {
    if phenotype.is_empty() {
        return Err(CliError::new(EXIT_USAGE, "phenotype must not be empty"));
    }

    let file_name = output_file_name(phenotype);
    let path = match out_dir {
        Some(dir) => dir.join(&file_name),
        None => PathBuf::from(&file_name),
    };

    let has_prefix = Path::new(phenotype)
        .parent()
        .is_some_and(|p| !p.as_os_str().is_empty());
    if has_prefix {
        let parent = path.parent().unwrap_or(Path::new(""));
        if !parent.is_dir() {
            return Err(CliError::new(
                EXIT_USAGE,
                format!("phenotype {phenotype:?}: directory {} does not exist", parent.display()),
            )
            .with_hint("create the directory first, or use --out-dir"));
        }
    }

    Ok(path)
}

fn read_table(path: &Path) -> Result<String, CliError> {
    let text = read_file_as_utf8(path)
        .map_err(|e| CliError::new(EXIT_INPUT, format!("cannot read {}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), bytes = text.len(), "input table read");
    Ok(text)
}

fn write_summary_json(path: &Path, result: &MergeResult) -> Result<(), CliError> {
    let report = serde_json::json!({
        "meta": result.meta,
        "summary": result.summary,
        "fixed_only": result.fixed_only,
        "random_only": result.random_only,
    });
    let json_str = serde_json::to_string_pretty(&report)
        .map_err(|e| CliError::new(EXIT_OUTPUT, format!("JSON serialization error: {e}")))?;
    std::fs::write(path, json_str)
        .map_err(|e| CliError::new(EXIT_OUTPUT, format!("cannot write {}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), "summary written");
    Ok(())
}

fn summary_line(result: &MergeResult) -> String {
    let s = &result.summary;
    let labels: Vec<String> = SensitivityLabel::ALL
        .iter()
        .filter(|label| s.count(**label) > 0)
        .map(|label| format!("{}: {}", label, s.count(*label)))
        .collect();

    format!(
        "merged {} of {} fixed / {} random rows ({} fixed-only, {} random-only dropped){}{}",
        s.merged,
        s.fixed_rows,
        s.random_rows,
        s.fixed_only,
        s.random_only,
        if labels.is_empty() { "" } else { "; " },
        labels.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_config_beats_default() {
        let base = PathBuf::from("cfg");
        assert_eq!(
            resolve_input(Some(PathBuf::from("a.tsv")), Some("b.tsv"), &base, "c.tsv"),
            PathBuf::from("a.tsv")
        );
        assert_eq!(resolve_input(None, Some("b.tsv"), &base, "c.tsv"), PathBuf::from("cfg/b.tsv"));
        assert_eq!(resolve_input(None, None, &base, "c.tsv"), PathBuf::from("c.tsv"));
    }

    #[test]
    fn phenotype_rules() {
        assert_eq!(resolve_output("T2D", None).unwrap(), PathBuf::from("T2D_meta_merge_results.txt"));
        assert_eq!(
            resolve_output("height_2024", Some(Path::new("out"))).unwrap(),
            PathBuf::from("out/height_2024_meta_merge_results.txt")
        );
        assert_eq!(resolve_output("", None).unwrap_err().code, EXIT_USAGE);
        assert_eq!(resolve_output("no_such_dir_xyz/T2D", None).unwrap_err().code, EXIT_USAGE);
    }

    #[test]
    fn phenotype_prefix_into_existing_directory() {
        let dir = std::env::temp_dir();
        let phenotype = format!("{}/T2D", dir.display());
        assert_eq!(resolve_output(&phenotype, None).unwrap(), dir.join("T2D_meta_merge_results.txt"));
    }

    #[test]
    fn summary_line_lists_used_labels() {
        let fixed = "ID\tMETA_LOG_OR\tMETA_SE\tMETA_P\tQ\tI2\nrs1\t0.1\t0.1\t0.01\t1\t10\nrs2\t0.1\t0.1\t0.01\t1\t10\n";
        let random = "ID\tMETA_LOG_OR\tMETA_SE\tMETA_P\tQ\tI2\nrs1\t0.1\t0.1\t0.01\t1\t10\n";
        let result = metamerge_engine::run(fixed, random, &MergeConfig::default()).unwrap();
        assert_eq!(
            summary_line(&result),
            "merged 1 of 2 fixed / 1 random rows (1 fixed-only, 0 random-only dropped); Use fixed-effect: 1"
        );
    }
}
