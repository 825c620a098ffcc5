// ============================================================
// VALIDATION FINDINGS
// ============================================================
// Structured data-quality results. Findings are informational:
// they never stop a conversion.

use serde::{Deserialize, Serialize};

/// Severity of a single finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Category of the check that produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCategory {
    ColumnCount,
    Duplicates,
    NullValues,
    DateFormat,
    MixedTypes,
    ValueLength,
    Placeholders,
    General,
}

/// One data-quality result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationFinding {
    pub category: FindingCategory,

    /// Affected column, when the check is column-scoped
    pub column: Option<String>,

    pub message: String,

    pub severity: Severity,
}

impl ValidationFinding {
    pub fn new(
        category: FindingCategory,
        column: Option<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            column,
            message: message.into(),
            severity,
        }
    }
}

/// Findings bucketed by severity. Buckets are append-only and are not
/// deduplicated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub passed: Vec<ValidationFinding>,
    pub warnings: Vec<ValidationFinding>,
    pub errors: Vec<ValidationFinding>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a finding into its bucket by severity
    pub fn push(&mut self, finding: ValidationFinding) {
        match finding.severity {
            Severity::Info => self.passed.push(finding),
            Severity::Warning => self.warnings.push(finding),
            Severity::Error => self.errors.push(finding),
        }
    }

    pub fn has_issues(&self) -> bool {
        !self.warnings.is_empty() || !self.errors.is_empty()
    }

    /// Append the "no issues" finding when nothing was flagged
    pub fn finalize(&mut self) {
        if !self.has_issues() {
            self.push(ValidationFinding::new(
                FindingCategory::General,
                None,
                Severity::Info,
                "No data-quality issues detected in the sampled rows",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_routes_by_severity() {
        let mut report = ValidationReport::new();
        report.push(ValidationFinding::new(
            FindingCategory::NullValues,
            Some("a".into()),
            Severity::Info,
            "info",
        ));
        report.push(ValidationFinding::new(
            FindingCategory::Duplicates,
            Some("a".into()),
            Severity::Warning,
            "warn",
        ));
        report.push(ValidationFinding::new(
            FindingCategory::DateFormat,
            Some("a".into()),
            Severity::Error,
            "err",
        ));

        assert_eq!(report.passed.len(), 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.errors.len(), 1);
        assert!(report.has_issues());
    }

    #[test]
    fn test_finalize_appends_no_issues_only_when_clean() {
        let mut clean = ValidationReport::new();
        clean.finalize();
        assert_eq!(clean.passed.len(), 1);
        assert_eq!(clean.passed[0].category, FindingCategory::General);

        let mut flagged = ValidationReport::new();
        flagged.push(ValidationFinding::new(
            FindingCategory::Duplicates,
            None,
            Severity::Warning,
            "warn",
        ));
        flagged.finalize();
        assert!(flagged.passed.is_empty());
    }
}
