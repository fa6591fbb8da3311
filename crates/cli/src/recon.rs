//! `topocheck run | compare | validate` — config-driven CSV vs. TopoJSON reconciliation.

use std::path::{Path, PathBuf};

use topocheck_recon::config::{ColumnMapping, HierarchyConfig, TabularConfig};
use topocheck_recon::{ReconConfig, ReconError, ReconReport};

use crate::exit_codes::{recon_exit_code, EXIT_RECON_INPUT, EXIT_RECON_UNMATCHED};
use crate::report::{render_text, summary_line};
use crate::CliError;

/// How the finished report is emitted.
pub struct OutputOptions {
    pub json: bool,
    pub output: Option<PathBuf>,
    pub strict: bool,
}

fn recon_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

impl From<ReconError> for CliError {
    fn from(err: ReconError) -> Self {
        let hint = match &err {
            ReconError::MissingColumn { .. } => {
                Some("check [tabular.columns] against the CSV header row".to_string())
            }
            ReconError::MissingPath { .. } | ReconError::NotAnArray { .. } => {
                Some("check hierarchy.collection or hierarchy.path".to_string())
            }
            _ => None,
        };
        CliError { code: recon_exit_code(err.kind()), message: err.to_string(), hint }
    }
}

fn read_config(config_path: &Path) -> Result<ReconConfig, CliError> {
    log::debug!("loading config {}", config_path.display());
    let config_str = std::fs::read_to_string(config_path).map_err(|e| {
        recon_err(EXIT_RECON_INPUT, format!("cannot read config {}: {e}", config_path.display()))
    })?;
    ReconConfig::from_toml(&config_str).map_err(CliError::from)
}

pub fn cmd_recon_run(config_path: PathBuf, opts: OutputOptions) -> Result<(), CliError> {
    let config = read_config(&config_path)?;

    // Resolve file paths relative to config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let report = topocheck_recon::reconcile(&config, base_dir)?;
    emit(&report, &opts)
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_recon_compare(
    csv: PathBuf,
    topology: PathBuf,
    id_columns: Vec<String>,
    name_columns: Vec<String>,
    id_key: String,
    name_key: String,
    collection: String,
    delimiter: char,
    opts: OutputOptions,
) -> Result<(), CliError> {
    let [id_primary, id_secondary] = two_columns("--id-columns", id_columns)?;
    let [name_primary, name_secondary] = two_columns("--name-columns", name_columns)?;

    let config = ReconConfig {
        name: format!("{} vs {}", csv.display(), topology.display()),
        tabular: TabularConfig {
            file: csv.display().to_string(),
            columns: ColumnMapping { id_primary, id_secondary, name_primary, name_secondary },
            delimiter,
            null_values: vec![String::new()],
        },
        hierarchy: HierarchyConfig {
            file: topology.display().to_string(),
            collection: Some(collection),
            path: None,
            id_key,
            name_key,
        },
    };
    config.validate()?;

    let report = topocheck_recon::reconcile(&config, Path::new("."))?;
    emit(&report, &opts)
}

fn two_columns(flag: &str, columns: Vec<String>) -> Result<[String; 2], CliError> {
    <[String; 2]>::try_from(columns).map_err(|got| {
        CliError::args(format!("{flag} takes exactly two column names, got {}", got.len()))
            .with_hint(format!("{flag} first,second"))
    })
}

fn emit(report: &ReconReport, opts: &OutputOptions) -> Result<(), CliError> {
    if opts.json || opts.output.is_some() {
        let json_str = serde_json::to_string_pretty(report)
            .map_err(|e| recon_err(EXIT_RECON_INPUT, format!("JSON serialization error: {e}")))?;

        if let Some(ref path) = opts.output {
            std::fs::write(path, &json_str).map_err(|e| {
                recon_err(EXIT_RECON_INPUT, format!("cannot write output: {e}"))
            })?;
            eprintln!("wrote {}", path.display());
        }

        if opts.json {
            println!("{json_str}");
        }
    }

    if !opts.json {
        print!("{}", render_text(&report.result));
    }

    // Human summary to stderr
    eprintln!("{}", summary_line(&report.meta.config_name, &report.result));

    if opts.strict && !report.result.fully_reconciled() {
        return Err(recon_err(EXIT_RECON_UNMATCHED, "unmatched values found (--strict)"));
    }

    Ok(())
}

pub fn cmd_recon_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = read_config(&config_path)?;
    eprintln!(
        "valid: recon '{}' ({} vs {}, geometries at '{}')",
        config.name,
        config.tabular.file,
        config.hierarchy.file,
        config.hierarchy.geometries_path().join("."),
    );
    Ok(())
}
