//! Numeric vs categorical column classification.

use crate::types::Dataset;

use super::NUMERIC_THRESHOLD_PERCENT;

/// Classification label for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// More than 70 % of the non-empty values parse as finite numbers.
    Numeric,
    /// Everything else with at least one non-empty value.
    Categorical,
}

/// Per-column labels in column-discovery order.
///
/// Columns without any non-empty value are not listed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnClassification {
    columns: Vec<(String, ColumnKind)>,
}

impl ColumnClassification {
    /// Label of `column`, if it was classified.
    pub fn kind_of(&self, column: &str) -> Option<ColumnKind> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, kind)| *kind)
    }

    /// All classified columns in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ColumnKind)> {
        self.columns.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    /// Numeric column names in order.
    pub fn numeric(&self) -> impl Iterator<Item = &str> {
        self.of_kind(ColumnKind::Numeric)
    }

    /// Categorical column names in order.
    pub fn categorical(&self) -> impl Iterator<Item = &str> {
        self.of_kind(ColumnKind::Categorical)
    }

    /// Number of numeric columns.
    pub fn numeric_count(&self) -> usize {
        self.numeric().count()
    }

    /// Number of categorical columns.
    pub fn categorical_count(&self) -> usize {
        self.categorical().count()
    }

    fn of_kind(&self, kind: ColumnKind) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(move |(_, k)| *k == kind)
            .map(|(name, _)| name.as_str())
    }
}

/// Classify the columns of the first record by inspecting every record's values.
pub fn classify_columns(dataset: &Dataset) -> ColumnClassification {
    let mut columns = Vec::new();

    for name in dataset.column_names() {
        let (total, numeric) = dataset
            .column_values(name)
            .filter(|v| !v.is_empty())
            .fold((0usize, 0usize), |(total, numeric), v| {
                (total + 1, numeric + usize::from(v.as_number().is_some()))
            });

        if total == 0 {
            continue;
        }

        let kind = if numeric * 100 > total * NUMERIC_THRESHOLD_PERCENT {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        };
        columns.push((name.to_owned(), kind));
    }

    ColumnClassification { columns }
}

#[cfg(test)]
mod tests {
    use super::{ColumnKind, classify_columns};
    use crate::types::{Dataset, Record, Value};

    fn single_column(values: &[&str]) -> Dataset {
        Dataset::new(
            values
                .iter()
                .map(|v| Record::from_iter([("col", *v)]))
                .collect(),
        )
    }

    #[test]
    fn eighty_percent_numeric_is_numeric() {
        let ds = single_column(&["1", "2", "x", "4", "5"]);
        assert_eq!(classify_columns(&ds).kind_of("col"), Some(ColumnKind::Numeric));
    }

    #[test]
    fn twenty_percent_numeric_is_categorical() {
        let ds = single_column(&["1", "x", "y", "z", "w"]);
        assert_eq!(classify_columns(&ds).kind_of("col"), Some(ColumnKind::Categorical));
    }

    #[test]
    fn exactly_seventy_percent_is_categorical() {
        let ds = single_column(&["1", "2", "3", "4", "5", "6", "7", "a", "b", "c"]);
        assert_eq!(classify_columns(&ds).kind_of("col"), Some(ColumnKind::Categorical));
    }

    #[test]
    fn empty_values_are_ignored_and_all_empty_columns_skipped() {
        let ds = Dataset::new(vec![
            Record::from_iter([("n", Value::text("1")), ("blank", Value::Empty)]),
            Record::from_iter([("n", Value::text("")), ("blank", Value::text("  "))]),
            Record::from_iter([("n", Value::Number(3.0)), ("blank", Value::Empty)]),
        ]);
        let c = classify_columns(&ds);
        assert_eq!(c.kind_of("n"), Some(ColumnKind::Numeric));
        assert_eq!(c.kind_of("blank"), None);
        assert_eq!(c.numeric_count(), 1);
        assert_eq!(c.categorical_count(), 0);
    }

    #[test]
    fn only_first_record_keys_are_considered() {
        let ds = Dataset::new(vec![
            Record::from_iter([("a", "x")]),
            Record::from_iter([("a", "y"), ("late", "1")]),
        ]);
        let c = classify_columns(&ds);
        assert_eq!(c.iter().map(|(n, _)| n).collect::<Vec<_>>(), vec!["a"]);
    }
}
