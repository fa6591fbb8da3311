use std::io::ErrorKind;
use std::path::Path;

use crate::compare::{compare_field, field_value_set, union};
use crate::config::ReconConfig;
use crate::error::ReconError;
use crate::hierarchy::load_hierarchy;
use crate::model::{ComparisonResult, ReconInput, ReconReport, ReportMeta};
use crate::tabular::load_tabular;

/// Compare the loaded datasets per config. Pure: no IO, no logging of values.
pub fn run(config: &ReconConfig, input: &ReconInput) -> ComparisonResult {
    let cols = &config.tabular.columns;
    let keys = &config.hierarchy;

    // Field-value sets
    let id_primary = field_value_set(input.tabular.iter().map(|r| r.id_primary.clone()));
    let id_secondary = field_value_set(input.tabular.iter().map(|r| r.id_secondary.clone()));
    let name_primary = field_value_set(input.tabular.iter().map(|r| r.name_primary.clone()));
    let name_secondary = field_value_set(input.tabular.iter().map(|r| r.name_secondary.clone()));
    let ids = field_value_set(input.geometries.iter().map(|g| g.id.clone()));
    let names = field_value_set(input.geometries.iter().map(|g| g.name.clone()));

    let id_columns = union(&id_primary, &id_secondary);
    let name_columns = union(&name_primary, &name_secondary);

    ComparisonResult {
        id_primary: compare_field(&cols.id_primary, &[keys.id_key.as_str()], &id_primary, &ids),
        id_secondary: compare_field(
            &cols.id_secondary,
            &[keys.id_key.as_str()],
            &id_secondary,
            &ids,
        ),
        name_primary: compare_field(
            &cols.name_primary,
            &[keys.name_key.as_str()],
            &name_primary,
            &names,
        ),
        name_secondary: compare_field(
            &cols.name_secondary,
            &[keys.name_key.as_str()],
            &name_secondary,
            &names,
        ),
        ids: compare_field(
            &keys.id_key,
            &[cols.id_primary.as_str(), cols.id_secondary.as_str()],
            &ids,
            &id_columns,
        ),
        names: compare_field(
            &keys.name_key,
            &[cols.name_primary.as_str(), cols.name_secondary.as_str()],
            &names,
            &name_columns,
        ),
    }
}

/// Read an input file, distinguishing a missing file from other IO failures.
pub fn read_input(path: &Path) -> Result<Vec<u8>, ReconError> {
    std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ReconError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => ReconError::Io(format!("cannot read {}: {e}", path.display())),
    })
}

/// Decode input bytes as UTF-8. Undecodable text is a parse error of the
/// given family, not an IO error.
fn decode_utf8(
    bytes: Vec<u8>,
    path: &Path,
    parse_err: fn(String) -> ReconError,
) -> Result<String, ReconError> {
    String::from_utf8(bytes).map_err(|e| {
        parse_err(format!("{} is not valid UTF-8: {}", path.display(), e.utf8_error()))
    })
}

/// Load both inputs. File paths resolve relative to `base_dir`.
pub fn load_input(config: &ReconConfig, base_dir: &Path) -> Result<ReconInput, ReconError> {
    let csv_path = base_dir.join(&config.tabular.file);
    log::debug!("reading tabular input {}", csv_path.display());
    let csv_data = decode_utf8(read_input(&csv_path)?, &csv_path, ReconError::CsvParse)?;

    let json_path = base_dir.join(&config.hierarchy.file);
    log::debug!("reading hierarchy input {}", json_path.display());
    let json_data = decode_utf8(read_input(&json_path)?, &json_path, ReconError::JsonParse)?;

    let tabular = load_tabular(&csv_data, &config.tabular)?;
    let geometries = load_hierarchy(&json_data, &config.hierarchy)?;

    Ok(ReconInput { tabular, geometries })
}

/// Load, compare, and wrap the result with run metadata.
pub fn reconcile(config: &ReconConfig, base_dir: &Path) -> Result<ReconReport, ReconError> {
    let input = load_input(config, base_dir)?;
    let result = run(config, &input);

    log::info!(
        "recon '{}': {} row(s) vs {} geometr(ies), {} non-matching value(s)",
        config.name,
        input.tabular.len(),
        input.geometries.len(),
        result.total_non_matching(),
    );

    Ok(ReconReport {
        meta: ReportMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            tabular_rows: input.tabular.len(),
            geometries: input.geometries.len(),
        },
        result,
    })
}
