use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// A single cell or property value.
///
/// Equality is exact and type-sensitive: the CSV cell `"4"` is `Text("4")`
/// while the JSON number `4` is `Number("4")`, and the two never match.
///
/// Ordering groups by kind (null, booleans, numbers, text, nested JSON).
/// Numbers order by value, so `9` sorts before `10`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Null,
    Bool(bool),
    /// Canonical JSON number text, as printed by `serde_json`.
    Number(String),
    Text(String),
    /// Nested array/object, compact JSON.
    Json(String),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Convert a JSON property value. Missing properties are handled by the caller.
    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::Number(n.to_string()),
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => Self::Json(value.to_string()),
        }
    }
}

impl FieldValue {
    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Number(_) => 2,
            Self::Text(_) => 3,
            Self::Json(_) => 4,
        }
    }
}

/// Numeric order, then text order to break ties (`1.0` vs `1`).
/// Text that does not parse as a number sorts after every number.
fn cmp_numbers(a: &str, b: &str) -> Ordering {
    let parse = |s: &str| s.parse::<f64>().ok().filter(|f| !f.is_nan());
    match (parse(a), parse(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => cmp_numbers(a, b),
            (Self::Text(a), Self::Text(b)) | (Self::Json(a), Self::Json(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Json(s) => write!(f, "{s}"),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => match serde_json::Number::from_str(n) {
                Ok(num) => num.serialize(serializer),
                Err(_) => serializer.serialize_str(n),
            },
            Self::Text(s) => serializer.serialize_str(s),
            Self::Json(raw) => match serde_json::from_str::<serde_json::Value>(raw) {
                Ok(v) => v.serialize(serializer),
                Err(_) => serializer.serialize_str(raw),
            },
        }
    }
}

/// Deduplicated values of one column or property.
pub type FieldValueSet = BTreeSet<FieldValue>;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single CSV row reduced to the four configured columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularRecord {
    pub id_primary: FieldValue,
    pub id_secondary: FieldValue,
    pub name_primary: FieldValue,
    pub name_secondary: FieldValue,
}

/// A geometry entry that carried a `properties` mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyGeometry {
    pub id: FieldValue,
    pub name: FieldValue,
}

/// Both datasets, loaded.
#[derive(Debug, Clone, Default)]
pub struct ReconInput {
    pub tabular: Vec<TabularRecord>,
    pub geometries: Vec<HierarchyGeometry>,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One comparison pair: a field-value set checked against a target set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldComparison {
    /// Label of the compared field (column name or property key).
    pub field: String,
    /// Labels of the fields whose union forms the target set.
    pub against: Vec<String>,
    /// Cardinality of the field-value set.
    pub unique: usize,
    /// Cardinality of the intersection with the target set.
    pub matching: usize,
    pub non_matching: FieldValueSet,
}

impl FieldComparison {
    pub fn all_matched(&self) -> bool {
        self.non_matching.is_empty()
    }
}

/// The full comparison: six pairs, each with two counts and one set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// Tabular `id_primary` column vs. hierarchy identifiers.
    pub id_primary: FieldComparison,
    /// Tabular `id_secondary` column vs. hierarchy identifiers.
    pub id_secondary: FieldComparison,
    /// Tabular `name_primary` column vs. hierarchy names.
    pub name_primary: FieldComparison,
    /// Tabular `name_secondary` column vs. hierarchy names.
    pub name_secondary: FieldComparison,
    /// Hierarchy identifiers vs. both identifier columns.
    pub ids: FieldComparison,
    /// Hierarchy names vs. both name columns.
    pub names: FieldComparison,
}

impl ComparisonResult {
    /// Pairs in presentation order.
    pub fn pairs(&self) -> [&FieldComparison; 6] {
        [
            &self.id_primary,
            &self.id_secondary,
            &self.name_primary,
            &self.name_secondary,
            &self.ids,
            &self.names,
        ]
    }

    pub fn total_non_matching(&self) -> usize {
        self.pairs().iter().map(|p| p.non_matching.len()).sum()
    }

    pub fn fully_reconciled(&self) -> bool {
        self.pairs().iter().all(|p| p.all_matched())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
    pub tabular_rows: usize,
    pub geometries: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub meta: ReportMeta,
    pub result: ComparisonResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_values_keep_their_type() {
        assert_eq!(FieldValue::from_json(&json!("US")), FieldValue::text("US"));
        assert_eq!(FieldValue::from_json(&json!(4)), FieldValue::Number("4".into()));
        assert_eq!(FieldValue::from_json(&json!(null)), FieldValue::Null);
        assert_ne!(FieldValue::from_json(&json!(4)), FieldValue::text("4"));
    }

    #[test]
    fn serializes_as_plain_json() {
        let values: FieldValueSet = [
            FieldValue::Null,
            FieldValue::Number("12".into()),
            FieldValue::text("CA"),
        ]
        .into_iter()
        .collect();
        let out = serde_json::to_string(&values).unwrap();
        assert_eq!(out, r#"[null,12,"CA"]"#);
    }

    #[test]
    fn numbers_sort_by_value() {
        let num = |n: &str| FieldValue::Number(n.into());
        let values: FieldValueSet = ["100", "10", "9", "-3", "2.5"].into_iter().map(num).collect();
        let order: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        assert_eq!(order, ["-3", "2.5", "9", "10", "100"]);

        let out = serde_json::to_string(&values).unwrap();
        assert_eq!(out, "[-3,2.5,9,10,100]");
    }

    #[test]
    fn equal_values_with_different_text_stay_distinct() {
        let a = FieldValue::Number("1".into());
        let b = FieldValue::Number("1.0".into());
        assert_ne!(a, b);
        assert_ne!(a.cmp(&b), Ordering::Equal);
        let values: FieldValueSet = [a, b].into_iter().collect();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn kinds_sort_in_fixed_order() {
        let values: FieldValueSet = [
            FieldValue::Json("[1]".into()),
            FieldValue::text("9"),
            FieldValue::Number("10".into()),
            FieldValue::Bool(true),
            FieldValue::Null,
        ]
        .into_iter()
        .collect();
        let out = serde_json::to_string(&values).unwrap();
        assert_eq!(out, r#"[null,true,10,"9",[1]]"#);
    }
}
