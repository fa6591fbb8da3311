//! Human-readable rendering of a comparison result.

use topocheck_recon::model::FieldValueSet;
use topocheck_recon::{ComparisonResult, FieldComparison, FieldValue};

/// Render all six pairs in fixed order, one blank line before each block.
pub fn render_text(result: &ComparisonResult) -> String {
    let mut out = String::new();
    for pair in result.pairs() {
        out.push('\n');
        out.push_str(&render_pair(pair));
    }
    out
}

fn render_pair(pair: &FieldComparison) -> String {
    let against = pair
        .against
        .iter()
        .map(|a| format!("'{a}'"))
        .collect::<Vec<_>>()
        .join(" or ");

    format!(
        "{} of {} values of '{}' match with {}.\n\
         The '{}' values that do not match with {} are: {}\n",
        pair.matching,
        pair.unique,
        pair.field,
        against,
        pair.field,
        against,
        render_values(&pair.non_matching),
    )
}

fn render_values(values: &FieldValueSet) -> String {
    let items: Vec<String> = values.iter().map(render_value).collect();
    format!("[{}]", items.join(", "))
}

fn render_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) => format!("'{s}'"),
        other => other.to_string(),
    }
}

/// One-line summary for stderr.
pub fn summary_line(name: &str, result: &ComparisonResult) -> String {
    let pairs = result.pairs();
    let clean = pairs.iter().filter(|p| p.all_matched()).count();
    format!(
        "recon '{}': {}/{} field(s) fully matched, {} non-matching value(s)",
        name,
        clean,
        pairs.len(),
        result.total_non_matching(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmp(field: &str, against: &[&str], unique: usize, non: Vec<FieldValue>) -> FieldComparison {
        let non_matching: FieldValueSet = non.into_iter().collect();
        FieldComparison {
            field: field.into(),
            against: against.iter().map(|s| s.to_string()).collect(),
            unique,
            matching: unique - non_matching.len(),
            non_matching,
        }
    }

    fn sample() -> ComparisonResult {
        ComparisonResult {
            id_primary: cmp("coo_iso", &["id"], 2, vec![FieldValue::text("CA")]),
            id_secondary: cmp("coa_iso", &["id"], 1, vec![]),
            name_primary: cmp("coo_name", &["name"], 1, vec![]),
            name_secondary: cmp("coa_name", &["name"], 1, vec![]),
            ids: cmp(
                "id",
                &["coo_iso", "coa_iso"],
                3,
                vec![FieldValue::Null, FieldValue::Number("840".into())],
            ),
            names: cmp("name", &["coo_name", "coa_name"], 1, vec![FieldValue::text("Narnia")]),
        }
    }

    #[test]
    fn single_target_pair() {
        let text = render_text(&sample());
        assert!(text.contains("1 of 2 values of 'coo_iso' match with 'id'.\n"));
        assert!(text.contains("The 'coo_iso' values that do not match with 'id' are: ['CA']\n"));
        assert!(text.contains("The 'coa_iso' values that do not match with 'id' are: []\n"));
    }

    #[test]
    fn union_target_pair() {
        let text = render_text(&sample());
        assert!(text.contains("1 of 3 values of 'id' match with 'coo_iso' or 'coa_iso'."));
        assert!(text.contains("are: [null, 840]"));
        assert!(text.contains("0 of 1 values of 'name' match with 'coo_name' or 'coa_name'."));
    }

    #[test]
    fn fixed_order() {
        let text = render_text(&sample());
        let pos = |needle: &str| text.find(needle).unwrap();
        assert!(pos("of 'coo_iso'") < pos("of 'coa_iso'"));
        assert!(pos("of 'coa_iso'") < pos("of 'coo_name'"));
        assert!(pos("of 'coa_name'") < pos("of 'id'"));
        assert!(pos("of 'id'") < pos("of 'name'"));
    }

    #[test]
    fn summary() {
        let line = summary_line("flows", &sample());
        assert_eq!(line, "recon 'flows': 3/6 field(s) fully matched, 4 non-matching value(s)");
    }
}
