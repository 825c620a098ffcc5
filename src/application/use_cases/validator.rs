// ============================================================
// DATA VALIDATOR
// ============================================================
// Independent data-quality checks over a bounded row sample.
// Findings are informational only; conversion always proceeds.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use super::type_detector::{is_decimal, parse_calendar_date};
use crate::domain::{
    DataTable, FindingCategory, Severity, ValidationFinding, ValidationReport,
};

/// Surface patterns that make a value look like a date without
/// committing to calendar validity: ISO-like YYYY-M-D, M-D-YYYY, or a
/// three-letter month name.
static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}[-/]\d{1,2}[-/]\d{1,2}$").unwrap());

static MDY_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}[-/]\d{1,2}[-/]\d{4}$").unwrap());

static MONTH_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\b").unwrap()
});

/// Common placeholder spellings. These are NOT treated as NULL by the
/// escaper; only exact empty/absent values are.
const PLACEHOLDER_VALUES: [&str; 9] = [
    "N/A", "n/a", "null", "NULL", "None", "none", "#N/A", "TBD", "tbd",
];

/// Ratio of null values above which a column is flagged as a warning
/// instead of an informational note
const NULL_WARNING_RATIO: f64 = 0.5;

/// Minimum fraction of date-looking values for a column to be treated
/// as a date column by the plausibility check
const DATE_COLUMN_RATIO: f64 = 0.5;

/// Fraction threshold for the mixed-type check: both numeric and
/// non-numeric shares must exceed this
const MIXED_TYPE_RATIO: f64 = 0.1;

/// Value length above which an unbounded text type is suggested
const EXCESSIVE_LENGTH: usize = 1000;

/// Maximum example values quoted in a finding message
const MAX_EXAMPLES: usize = 3;

fn looks_like_date(value: &str) -> bool {
    ISO_DATE_RE.is_match(value) || MDY_DATE_RE.is_match(value) || MONTH_NAME_RE.is_match(value)
}

/// Runs the data-quality checks over a bounded prefix of the table
pub struct DataValidator {
    /// Maximum rows inspected
    sample_size: usize,
}

impl DataValidator {
    pub fn new(sample_size: usize) -> Self {
        Self { sample_size }
    }

    /// Run every check and collect findings. Checks are independent and
    /// never short-circuit each other.
    pub fn validate(&self, table: &DataTable) -> ValidationReport {
        let mut report = ValidationReport::new();
        let sample = &table.rows[..table.rows.len().min(self.sample_size)];

        self.check_column_counts(table, sample, &mut report);

        for header in &table.headers {
            let values: Vec<Option<&str>> = sample.iter().map(|r| r.get(header)).collect();
            let non_empty: Vec<(usize, &str)> = values
                .iter()
                .enumerate()
                .filter_map(|(i, v)| v.map(|s| (i, s.trim())))
                .filter(|(_, s)| !s.is_empty())
                .collect();

            self.check_duplicates(header, &non_empty, &mut report);
            self.check_null_ratio(header, sample.len(), non_empty.len(), &mut report);
            self.check_date_plausibility(header, &non_empty, &mut report);
            self.check_mixed_types(header, &non_empty, &mut report);
            self.check_excessive_length(header, &non_empty, &mut report);
            self.check_placeholders(header, &non_empty, &mut report);
        }

        report.finalize();
        report
    }

    /// Check 1: rows whose field count differs from the header count
    fn check_column_counts(
        &self,
        table: &DataTable,
        sample: &[crate::domain::TableRow],
        report: &mut ValidationReport,
    ) {
        let expected = table.headers.len();
        let mismatched = sample.iter().filter(|r| r.field_count != expected).count();
        if mismatched > 0 {
            report.push(ValidationFinding::new(
                FindingCategory::ColumnCount,
                None,
                Severity::Warning,
                format!(
                    "{} sampled row(s) have a field count different from the {} header column(s)",
                    mismatched, expected
                ),
            ));
        }
    }

    /// Check 2: repeated non-empty values within a column
    fn check_duplicates(
        &self,
        header: &str,
        non_empty: &[(usize, &str)],
        report: &mut ValidationReport,
    ) {
        let mut occurrences: HashMap<&str, Vec<usize>> = HashMap::new();
        for (row, value) in non_empty {
            occurrences.entry(*value).or_default().push(*row + 1);
        }

        let duplicate_count = non_empty.len() - occurrences.len();
        if duplicate_count == 0 {
            return;
        }

        // Example groups in first-appearance order
        let mut examples = Vec::new();
        let mut seen = std::collections::HashSet::new();
        for (_, value) in non_empty {
            if examples.len() >= MAX_EXAMPLES {
                break;
            }
            if let Some(rows) = occurrences.get(value) {
                if rows.len() > 1 && seen.insert(*value) {
                    examples.push(format!("'{}' (rows {:?})", value, rows));
                }
            }
        }

        report.push(ValidationFinding::new(
            FindingCategory::Duplicates,
            Some(header.to_string()),
            Severity::Warning,
            format!(
                "Column '{}' has {} duplicate value(s), e.g. {}",
                header,
                duplicate_count,
                examples.join(", ")
            ),
        ));
    }

    /// Check 3: NULL-equivalent ratio per column
    fn check_null_ratio(
        &self,
        header: &str,
        sampled_rows: usize,
        non_empty_count: usize,
        report: &mut ValidationReport,
    ) {
        let null_count = sampled_rows - non_empty_count;
        if null_count == 0 || sampled_rows == 0 {
            return;
        }

        let ratio = null_count as f64 / sampled_rows as f64;
        let (severity, qualifier) = if ratio > NULL_WARNING_RATIO {
            (Severity::Warning, "mostly empty")
        } else {
            (Severity::Info, "partially empty")
        };

        report.push(ValidationFinding::new(
            FindingCategory::NullValues,
            Some(header.to_string()),
            severity,
            format!(
                "Column '{}' is {}: {} of {} sampled row(s) have no value ({:.0}%)",
                header,
                qualifier,
                null_count,
                sampled_rows,
                ratio * 100.0
            ),
        ));
    }

    /// Check 4: date-looking values that are not valid calendar dates.
    /// A column only qualifies when more than half its non-empty values
    /// match a date surface pattern, so incidental numeric strings are
    /// not misread as dates.
    fn check_date_plausibility(
        &self,
        header: &str,
        non_empty: &[(usize, &str)],
        report: &mut ValidationReport,
    ) {
        if non_empty.is_empty() {
            return;
        }

        let date_like = non_empty
            .iter()
            .filter(|(_, v)| looks_like_date(v))
            .count();
        if (date_like as f64 / non_empty.len() as f64) <= DATE_COLUMN_RATIO {
            return;
        }

        let invalid: Vec<&str> = non_empty
            .iter()
            .filter(|(_, v)| looks_like_date(v) && parse_calendar_date(v).is_none())
            .map(|(_, v)| *v)
            .take(MAX_EXAMPLES)
            .collect();

        if !invalid.is_empty() {
            report.push(ValidationFinding::new(
                FindingCategory::DateFormat,
                Some(header.to_string()),
                Severity::Error,
                format!(
                    "Column '{}' contains date-like values that are not valid calendar dates, e.g. {}",
                    header,
                    invalid
                        .iter()
                        .map(|v| format!("'{}'", v))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            ));
        }
    }

    /// Check 5: a column whose values are a substantial mix of numeric
    /// and non-numeric strings has an ambiguous type
    fn check_mixed_types(
        &self,
        header: &str,
        non_empty: &[(usize, &str)],
        report: &mut ValidationReport,
    ) {
        if non_empty.is_empty() {
            return;
        }

        let total = non_empty.len() as f64;
        let numeric = non_empty.iter().filter(|(_, v)| is_decimal(v)).count() as f64;
        let non_numeric = total - numeric;

        if numeric / total > MIXED_TYPE_RATIO && non_numeric / total > MIXED_TYPE_RATIO {
            report.push(ValidationFinding::new(
                FindingCategory::MixedTypes,
                Some(header.to_string()),
                Severity::Warning,
                format!(
                    "Column '{}' mixes numeric and non-numeric values ({:.0}% numeric); its inferred type may be wrong",
                    header,
                    numeric / total * 100.0
                ),
            ));
        }
    }

    /// Check 6: very long values suggest an unbounded text type
    fn check_excessive_length(
        &self,
        header: &str,
        non_empty: &[(usize, &str)],
        report: &mut ValidationReport,
    ) {
        let max_len = non_empty.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
        if max_len > EXCESSIVE_LENGTH {
            report.push(ValidationFinding::new(
                FindingCategory::ValueLength,
                Some(header.to_string()),
                Severity::Info,
                format!(
                    "Column '{}' has values up to {} characters; consider an unbounded text type",
                    header, max_len
                ),
            ));
        }
    }

    /// Check 7: values from the placeholder vocabulary. These are kept
    /// as-is in the output, not converted to NULL.
    fn check_placeholders(
        &self,
        header: &str,
        non_empty: &[(usize, &str)],
        report: &mut ValidationReport,
    ) {
        let count = non_empty
            .iter()
            .filter(|(_, v)| PLACEHOLDER_VALUES.contains(v))
            .count();
        if count > 0 {
            report.push(ValidationFinding::new(
                FindingCategory::Placeholders,
                Some(header.to_string()),
                Severity::Info,
                format!(
                    "Column '{}' contains {} placeholder value(s) such as N/A or TBD; these are inserted verbatim, not as NULL",
                    header, count
                ),
            ));
        }
    }
}

impl Default for DataValidator {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TableRow;
    use std::collections::HashMap;

    fn table(headers: &[&str], rows: &[&[(&str, &str)]]) -> DataTable {
        let rows = rows
            .iter()
            .enumerate()
            .map(|(i, pairs)| {
                let values: HashMap<String, String> = pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                TableRow::new(i, values, pairs.len())
            })
            .collect();
        DataTable::new(headers.iter().map(|h| h.to_string()).collect(), rows)
    }

    fn single_column(values: &[&str]) -> DataTable {
        let rows: Vec<&[(&str, &str)]> = Vec::new();
        let mut t = table(&["col"], &rows);
        t.rows = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let mut m = HashMap::new();
                m.insert("col".to_string(), v.to_string());
                TableRow::new(i, m, 1)
            })
            .collect();
        t
    }

    #[test]
    fn test_duplicate_detection() {
        let report = DataValidator::default().validate(&single_column(&["A", "A", "B"]));
        let finding = report
            .warnings
            .iter()
            .find(|f| f.category == FindingCategory::Duplicates)
            .expect("duplicate finding");
        assert_eq!(finding.column.as_deref(), Some("col"));
        assert!(finding.message.contains("1 duplicate"));
    }

    #[test]
    fn test_invalid_calendar_date_is_error() {
        let report = DataValidator::default().validate(&single_column(&["2024-13-45"]));
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].category, FindingCategory::DateFormat);
        assert!(report.errors[0].message.contains("2024-13-45"));
    }

    #[test]
    fn test_valid_dates_produce_no_error() {
        let report =
            DataValidator::default().validate(&single_column(&["2024-01-15", "2024-02-29"]));
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_date_prefilter_ignores_sparse_date_lookalikes() {
        // Only 1 of 4 values looks like a date, so the column is not a
        // date column and the unparseable value is not an error.
        let report = DataValidator::default()
            .validate(&single_column(&["2024-99-99", "red", "green", "blue"]));
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_null_ratio_thresholds() {
        let mostly_empty = DataValidator::default()
            .validate(&single_column(&["", "", "", "x"]));
        assert!(mostly_empty
            .warnings
            .iter()
            .any(|f| f.category == FindingCategory::NullValues));

        let slightly_empty = DataValidator::default()
            .validate(&single_column(&["a", "b", "c", ""]));
        assert!(slightly_empty
            .passed
            .iter()
            .any(|f| f.category == FindingCategory::NullValues));
        assert!(slightly_empty.warnings.is_empty());
    }

    #[test]
    fn test_mixed_type_warning() {
        let report = DataValidator::default()
            .validate(&single_column(&["1", "2", "3", "abc", "def"]));
        assert!(report
            .warnings
            .iter()
            .any(|f| f.category == FindingCategory::MixedTypes));
    }

    #[test]
    fn test_uniform_columns_not_mixed() {
        let report = DataValidator::default().validate(&single_column(&["1", "2", "3"]));
        assert!(!report
            .warnings
            .iter()
            .any(|f| f.category == FindingCategory::MixedTypes));
    }

    #[test]
    fn test_placeholder_detection() {
        let report = DataValidator::default()
            .validate(&single_column(&["N/A", "TBD", "value", "value2"]));
        assert!(report
            .passed
            .iter()
            .any(|f| f.category == FindingCategory::Placeholders
                && f.message.contains("2 placeholder")));
    }

    #[test]
    fn test_excessive_length() {
        let long = "x".repeat(1500);
        let report = DataValidator::default().validate(&single_column(&[long.as_str()]));
        assert!(report
            .passed
            .iter()
            .any(|f| f.category == FindingCategory::ValueLength));
    }

    #[test]
    fn test_column_count_mismatch() {
        let mut t = single_column(&["a", "b"]);
        t.rows[1].field_count = 3;
        let report = DataValidator::default().validate(&t);
        assert!(report
            .warnings
            .iter()
            .any(|f| f.category == FindingCategory::ColumnCount));
    }

    #[test]
    fn test_clean_table_reports_no_issues() {
        let report = DataValidator::default().validate(&single_column(&["a", "b", "c"]));
        assert!(!report.has_issues());
        assert!(report
            .passed
            .iter()
            .any(|f| f.category == FindingCategory::General));
    }

    #[test]
    fn test_sample_bound_respected() {
        // Duplicates past the sample boundary are not seen
        let values: Vec<String> = (0..10)
            .map(|i| if i < 5 { i.to_string() } else { "dup".to_string() })
            .collect();
        let refs: Vec<&str> = values.iter().map(|s| s.as_str()).collect();
        let report = DataValidator::new(5).validate(&single_column(&refs));
        assert!(!report
            .warnings
            .iter()
            .any(|f| f.category == FindingCategory::Duplicates));
    }
}
