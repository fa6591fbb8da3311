use crate::model::{FieldComparison, FieldValue, FieldValueSet};

/// Collect values (nulls included) into a deduplicated set.
pub fn field_value_set<I>(values: I) -> FieldValueSet
where
    I: IntoIterator<Item = FieldValue>,
{
    values.into_iter().collect()
}

pub fn union(a: &FieldValueSet, b: &FieldValueSet) -> FieldValueSet {
    a.union(b).cloned().collect()
}

/// Compare `source` against `target` by set membership.
///
/// `matching = |source ∩ target|`, `non_matching = source − target`.
pub fn compare_field(
    field: &str,
    against: &[&str],
    source: &FieldValueSet,
    target: &FieldValueSet,
) -> FieldComparison {
    let matching = source.intersection(target).count();
    let non_matching: FieldValueSet = source.difference(target).cloned().collect();

    FieldComparison {
        field: field.to_string(),
        against: against.iter().map(|s| s.to_string()).collect(),
        unique: source.len(),
        matching,
        non_matching,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[&str]) -> FieldValueSet {
        field_value_set(values.iter().map(|v| FieldValue::text(*v)))
    }

    #[test]
    fn duplicates_collapse() {
        let s = field_value_set(vec![
            FieldValue::text("US"),
            FieldValue::text("US"),
            FieldValue::Null,
            FieldValue::Null,
        ]);
        assert_eq!(s.len(), 2);
        assert!(s.contains(&FieldValue::Null));
    }

    #[test]
    fn column_vs_ids() {
        let col = field_value_set(vec![
            FieldValue::text("US"),
            FieldValue::text("US"),
            FieldValue::text("CA"),
        ]);
        let ids = set(&["US", "MX"]);
        let cmp = compare_field("coo_iso", &["id"], &col, &ids);
        assert_eq!(cmp.unique, 2);
        assert_eq!(cmp.matching, 1);
        assert_eq!(cmp.non_matching, set(&["CA"]));
        assert_eq!(cmp.against, vec!["id"]);
    }

    #[test]
    fn empty_target() {
        let names = set(&["Narnia"]);
        let target = union(&FieldValueSet::new(), &FieldValueSet::new());
        let cmp = compare_field("name", &["coo_name", "coa_name"], &names, &target);
        assert_eq!(cmp.matching, 0);
        assert_eq!(cmp.non_matching, set(&["Narnia"]));
    }

    #[test]
    fn case_sensitive() {
        let cmp = compare_field("a", &["b"], &set(&["us"]), &set(&["US"]));
        assert_eq!(cmp.matching, 0);
    }

    #[test]
    fn union_covers_both() {
        let u = union(&set(&["A", "B"]), &set(&["B", "C"]));
        assert_eq!(u, set(&["A", "B", "C"]));
    }
}
