use crate::config::TabularConfig;
use crate::error::ReconError;
use crate::model::{FieldValue, TabularRecord};

/// Load CSV rows into TabularRecords, keeping only the four mapped columns.
pub fn load_tabular(
    csv_data: &str,
    config: &TabularConfig,
) -> Result<Vec<TabularRecord>, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(config.delimiter as u8)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReconError::CsvParse(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let col = &config.columns;

    let idx = |name: &str| -> Result<usize, ReconError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ReconError::MissingColumn { column: name.into() })
    };

    let id_primary_idx = idx(&col.id_primary)?;
    let id_secondary_idx = idx(&col.id_secondary)?;
    let name_primary_idx = idx(&col.name_primary)?;
    let name_secondary_idx = idx(&col.name_secondary)?;

    let cell = |record: &csv::StringRecord, i: usize| -> FieldValue {
        match record.get(i) {
            Some(val) if !config.null_values.iter().any(|n| n == val) => {
                FieldValue::Text(val.to_string())
            }
            _ => FieldValue::Null,
        }
    };

    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| ReconError::CsvParse(e.to_string()))?;

        // Short rows read their missing trailing cells as null; extra cells are malformed.
        if record.len() > headers.len() {
            let line = record.position().map_or(0, |p| p.line());
            return Err(ReconError::CsvParse(format!(
                "line {line}: found record with {} fields, but the header has {}",
                record.len(),
                headers.len(),
            )));
        }

        rows.push(TabularRecord {
            id_primary: cell(&record, id_primary_idx),
            id_secondary: cell(&record, id_secondary_idx),
            name_primary: cell(&record, name_primary_idx),
            name_secondary: cell(&record, name_secondary_idx),
        });
    }

    if rows.is_empty() {
        log::warn!("tabular input has a header row but no data rows");
    }
    log::debug!("loaded {} tabular row(s) ({} columns in header)", rows.len(), headers.len());

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnMapping;

    fn tabular_config() -> TabularConfig {
        TabularConfig {
            file: "flows.csv".into(),
            columns: ColumnMapping {
                id_primary: "coo_iso".into(),
                id_secondary: "coa_iso".into(),
                name_primary: "coo_name".into(),
                name_secondary: "coa_name".into(),
            },
            delimiter: ',',
            null_values: vec![String::new()],
        }
    }

    #[test]
    fn load_csv_basic() {
        let csv = "\
year,coo_iso,coa_iso,coo_name,coa_name,refugees
2023,SYR,TUR,Syria,Turkey,3200000
2023,AFG,PAK,Afghanistan,Pakistan,1700000
";
        let rows = load_tabular(csv, &tabular_config()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id_primary, FieldValue::text("SYR"));
        assert_eq!(rows[1].name_secondary, FieldValue::text("Pakistan"));
    }

    #[test]
    fn empty_cell_is_null() {
        let csv = "\
coo_iso,coa_iso,coo_name,coa_name
UKN,DEU,,Germany
";
        let rows = load_tabular(csv, &tabular_config()).unwrap();
        assert_eq!(rows[0].name_primary, FieldValue::Null);
        assert_eq!(rows[0].id_primary, FieldValue::text("UKN"));
    }

    #[test]
    fn na_is_text_unless_configured() {
        let csv = "\
coo_iso,coa_iso,coo_name,coa_name
NA,ZAF,Namibia,South Africa
";
        let rows = load_tabular(csv, &tabular_config()).unwrap();
        assert_eq!(rows[0].id_primary, FieldValue::text("NA"));

        let mut config = tabular_config();
        config.null_values.push("NA".into());
        let rows = load_tabular(csv, &config).unwrap();
        assert_eq!(rows[0].id_primary, FieldValue::Null);
    }

    #[test]
    fn no_normalization() {
        let csv = "\
coo_iso,coa_iso,coo_name,coa_name
\" us \",us,x,y
";
        let rows = load_tabular(csv, &tabular_config()).unwrap();
        assert_eq!(rows[0].id_primary, FieldValue::text(" us "));
        assert_eq!(rows[0].id_secondary, FieldValue::text("us"));
    }

    #[test]
    fn custom_delimiter() {
        let csv = "\
coo_iso;coa_iso;coo_name;coa_name
FRA;ESP;France;Spain
";
        let mut config = tabular_config();
        config.delimiter = ';';
        let rows = load_tabular(csv, &config).unwrap();
        assert_eq!(rows[0].name_secondary, FieldValue::text("Spain"));
    }

    #[test]
    fn missing_column() {
        let csv = "coo_iso,coa_iso,coo_name\nA,B,C\n";
        let err = load_tabular(csv, &tabular_config()).unwrap_err();
        match err {
            ReconError::MissingColumn { column } => assert_eq!(column, "coa_name"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn short_row_fills_null() {
        let csv = "\
coo_iso,coa_iso,coo_name,coa_name
US,CA,United States,Canada
MX,US,Mexico
";
        let rows = load_tabular(csv, &tabular_config()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].id_primary, FieldValue::text("MX"));
        assert_eq!(rows[1].name_primary, FieldValue::text("Mexico"));
        assert_eq!(rows[1].name_secondary, FieldValue::Null);
    }

    #[test]
    fn long_row_is_parse_error() {
        let csv = "\
coo_iso,coa_iso,coo_name,coa_name
A,B,C,D
A,B,C,D,E
";
        let err = load_tabular(csv, &tabular_config()).unwrap_err();
        assert!(matches!(err, ReconError::CsvParse(_)), "got {err:?}");
        assert!(err.to_string().contains("line 3"), "got {err}");
    }

    #[test]
    fn header_only() {
        let csv = "coo_iso,coa_iso,coo_name,coa_name\n";
        let rows = load_tabular(csv, &tabular_config()).unwrap();
        assert!(rows.is_empty());
    }
}
