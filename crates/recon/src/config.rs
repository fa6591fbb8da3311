use serde::Deserialize;

use crate::error::ReconError;

pub const DEFAULT_COLLECTION: &str = "world.geo";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ReconConfig {
    pub name: String,
    pub tabular: TabularConfig,
    pub hierarchy: HierarchyConfig,
}

// ---------------------------------------------------------------------------
// Tabular side
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct TabularConfig {
    pub file: String,
    pub columns: ColumnMapping,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Cell texts read as null. Only the empty cell by default; "NA" is a
    /// real ISO code.
    #[serde(default = "default_null_values")]
    pub null_values: Vec<String>,
}

/// The four compared columns. The `id_*` pair is checked against the
/// hierarchy identifiers, the `name_*` pair against the hierarchy names.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnMapping {
    pub id_primary: String,
    pub id_secondary: String,
    pub name_primary: String,
    pub name_secondary: String,
}

fn default_delimiter() -> char {
    ','
}

fn default_null_values() -> Vec<String> {
    vec![String::new()]
}

// ---------------------------------------------------------------------------
// Hierarchy side
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct HierarchyConfig {
    pub file: String,
    /// Named collection under `objects`. Ignored when `path` is set.
    #[serde(default)]
    pub collection: Option<String>,
    /// Explicit key path to the geometries array.
    #[serde(default)]
    pub path: Option<Vec<String>>,
    pub id_key: String,
    pub name_key: String,
}

impl HierarchyConfig {
    /// Key path to the geometries array: `path` if given, otherwise
    /// `objects.<collection>.geometries`.
    pub fn geometries_path(&self) -> Vec<String> {
        if let Some(ref path) = self.path {
            return path.clone();
        }
        let collection = self.collection.as_deref().unwrap_or(DEFAULT_COLLECTION);
        vec!["objects".into(), collection.into(), "geometries".into()]
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.name.trim().is_empty() {
            return Err(ReconError::ConfigValidation("name must not be empty".into()));
        }

        if self.tabular.file.is_empty() {
            return Err(ReconError::ConfigValidation("tabular.file must not be empty".into()));
        }
        if self.hierarchy.file.is_empty() {
            return Err(ReconError::ConfigValidation(
                "hierarchy.file must not be empty".into(),
            ));
        }

        let cols = &self.tabular.columns;
        for (key, value) in [
            ("id_primary", &cols.id_primary),
            ("id_secondary", &cols.id_secondary),
            ("name_primary", &cols.name_primary),
            ("name_secondary", &cols.name_secondary),
        ] {
            if value.is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "tabular.columns.{key} must not be empty"
                )));
            }
        }

        if !self.tabular.delimiter.is_ascii() {
            return Err(ReconError::ConfigValidation(format!(
                "tabular.delimiter must be an ASCII character, got {:?}",
                self.tabular.delimiter
            )));
        }

        if self.hierarchy.id_key.is_empty() || self.hierarchy.name_key.is_empty() {
            return Err(ReconError::ConfigValidation(
                "hierarchy.id_key and hierarchy.name_key must not be empty".into(),
            ));
        }

        if let Some(ref path) = self.hierarchy.path {
            if path.is_empty() {
                return Err(ReconError::ConfigValidation(
                    "hierarchy.path must have at least one segment".into(),
                ));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
