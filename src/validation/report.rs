//! Validation report types for structured error reporting.
//!
//! Violations are plain data: callers can print them, serialize them, or
//! filter them by code. Batch validation of a large collection reports
//! every violation instead of stopping at the first.

use std::fmt;

use serde::Serialize;

/// The result of validating a message.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ValidationReport {
    /// All issues found during validation, in traversal order.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Adds an issue to the report.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Returns the number of errors in the report.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Returns the number of warnings in the report.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns true if validation passed, counting warnings as failures
    /// when `strict` is set.
    pub fn passes(&self, strict: bool) -> bool {
        if strict {
            self.is_clean()
        } else {
            self.is_ok()
        }
    }

    /// Issues reported against exactly `field`.
    pub fn issues_at<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationIssue> {
        self.issues.iter().filter(move |i| i.field == field)
    }

    /// Returns true if any issue carries `code`.
    pub fn has(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(f, "Validation passed: no issues found");
        }

        writeln!(
            f,
            "Validation completed with {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single validation issue (error or warning).
#[derive(Clone, Debug, Serialize)]
pub struct ValidationIssue {
    /// The severity of the issue.
    pub severity: Severity,

    /// The violated rule.
    pub code: IssueCode,

    /// Path of the offending field, e.g. `annotations[2].box.truncation`.
    pub field: String,

    /// The offending value, rendered as text.
    pub value: String,

    /// A human-readable description of the issue.
    pub message: String,
}

impl ValidationIssue {
    /// Creates a new validation issue.
    pub fn new(
        severity: Severity,
        code: IssueCode,
        field: impl Into<String>,
        value: impl fmt::Display,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            field: field.into(),
            value: value.to_string(),
            message: message.into(),
        }
    }

    /// Creates a new error.
    pub fn error(
        code: IssueCode,
        field: impl Into<String>,
        value: impl fmt::Display,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Error, code, field, value, message)
    }

    /// Creates a new warning.
    pub fn warning(
        code: IssueCode,
        field: impl Into<String>,
        value: impl fmt::Display,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, code, field, value, message)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        let field = if self.field.is_empty() {
            "<message>"
        } else {
            self.field.as_str()
        };
        write!(
            f,
            "[{}] {:?} at {} = {}: {}",
            severity, self.code, field, self.value, self.message
        )
    }
}

/// The severity of a validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Suspicious but usable data.
    Warning,
    /// A violated schema invariant.
    Error,
}

/// A stable code identifying the violated rule.
///
/// These codes can be used for filtering, ignoring specific issues,
/// or programmatic handling of validation results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCode {
    // Classification
    /// `class_id` is not below the configured class count.
    ClassIdOutOfRange,
    /// Two annotations in one 3D box collection share an `instance_id`.
    DuplicateInstanceId,
    /// An attribute key is the empty string.
    EmptyAttributeKey,

    // Geometry presence
    /// A box, point or pose sub-message is absent.
    MissingGeometry,

    // 2D boxes
    /// A 2D box has zero width or height.
    EmptyBox2D,

    // 3D boxes
    /// Occlusion code outside {0, 1, 2, 3}.
    OcclusionOutOfRange,
    /// Truncation outside [0.0, 1.0] or NaN.
    TruncationOutOfRange,
    /// A 3D box dimension is negative or not finite.
    InvalidBoxDimensions,
    /// The pose rotation is not a unit quaternion.
    NonUnitRotation,

    // Vertex counts
    /// A polygon with fewer than 3 vertices.
    TooFewPolygonVertices,
    /// A key line with fewer than 2 vertices.
    TooFewKeyLineVertices,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_strictness() {
        let mut report = ValidationReport::new();
        assert!(report.is_clean());
        assert!(report.passes(true));

        report.add(ValidationIssue::warning(
            IssueCode::EmptyBox2D,
            "box.w",
            0,
            "zero width",
        ));
        assert_eq!(report.warning_count(), 1);
        assert!(report.passes(false));
        assert!(!report.passes(true));

        report.add(ValidationIssue::error(
            IssueCode::TruncationOutOfRange,
            "box.truncation",
            1.5,
            "out of range",
        ));
        assert_eq!(report.error_count(), 1);
        assert!(!report.is_ok());
        assert_eq!(report.issues_at("box.truncation").count(), 1);
        assert!(report.has(IssueCode::TruncationOutOfRange));
    }

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue::error(
            IssueCode::OcclusionOutOfRange,
            "annotations[0].box.occlusion",
            9,
            "occlusion must be one of 0, 1, 2, 3",
        );
        assert_eq!(
            issue.to_string(),
            "[ERROR] OcclusionOutOfRange at annotations[0].box.occlusion = 9: occlusion must be one of 0, 1, 2, 3"
        );
    }
}
