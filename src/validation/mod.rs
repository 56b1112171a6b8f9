//! Semantic validation of annotation messages.
//!
//! The codec only guarantees structure. This module checks the invariants
//! the wire format cannot express:
//! - Classification (class id bound, instance id uniqueness, attribute keys)
//! - Geometric domains (occlusion codes, truncation, box dimensions)
//! - Shape minimums (polygon and key line vertex counts)
//!
//! Validation never fails; every violation lands in the returned report.
//! Cross-file referential integrity (a `key` or `instance_id` matching
//! annotations in other files) is left to dataset-level tooling.

mod report;

pub use report::{IssueCode, Severity, ValidationIssue, ValidationReport};

use std::collections::HashMap;

use crate::schema::{
    Attributes, BoundingBox2D, BoundingBox2DAnnotation, BoundingBox2DAnnotations, BoundingBox3D,
    BoundingBox3DAnnotation, BoundingBox3DAnnotations, KeyLine2DAnnotation, KeyLine2DAnnotations,
    KeyPoint2DAnnotation, KeyPoint2DAnnotations, Polygon2DAnnotation, Polygon2DAnnotations, Pose,
};

/// Largest accepted deviation of a rotation quaternion's norm from 1.
const ROTATION_NORM_TOLERANCE: f64 = 1e-3;

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// Size of the class vocabulary. `class_id` must be below it. The
    /// check is skipped when unset, since the schema does not carry the
    /// vocabulary itself.
    pub num_classes: Option<u32>,

    /// If true, treat warnings as errors.
    pub strict: bool,
}

/// A message that can be checked against the schema's semantic rules.
pub trait Validate {
    /// Appends this message's violations to `report`, prefixing field
    /// paths with `path`.
    fn validate_into(&self, path: &str, opts: &ValidateOptions, report: &mut ValidationReport);
}

/// Validates a message and returns a report of all issues found.
pub fn validate<M: Validate + ?Sized>(message: &M, opts: &ValidateOptions) -> ValidationReport {
    let mut report = ValidationReport::new();
    message.validate_into("", opts, &mut report);
    report
}

fn join(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", path, field)
    }
}

fn index(path: &str, field: &str, i: usize) -> String {
    format!("{}[{}]", join(path, field), i)
}

fn check_class_id(path: &str, class_id: u32, opts: &ValidateOptions, report: &mut ValidationReport) {
    if let Some(num_classes) = opts.num_classes {
        if class_id >= num_classes {
            report.add(ValidationIssue::error(
                IssueCode::ClassIdOutOfRange,
                join(path, "class_id"),
                class_id,
                format!(
                    "class_id must lie in [0, {}]",
                    i64::from(num_classes) - 1
                ),
            ));
        }
    }
}

fn check_attributes(path: &str, attributes: &Attributes, report: &mut ValidationReport) {
    if attributes.contains_key("") {
        report.add(ValidationIssue::error(
            IssueCode::EmptyAttributeKey,
            join(path, "attributes"),
            "\"\"",
            "attribute keys must be non-empty",
        ));
    }
}

fn missing(path: &str, field: &str, report: &mut ValidationReport) {
    report.add(ValidationIssue::error(
        IssueCode::MissingGeometry,
        join(path, field),
        "<absent>",
        format!("{} is required", field),
    ));
}

/// Reports every `instance_id` seen before at a lower index.
fn check_unique_instance_ids<I>(path: &str, ids: I, report: &mut ValidationReport)
where
    I: IntoIterator<Item = u32>,
{
    let mut seen: HashMap<u32, usize> = HashMap::new();
    for (idx, id) in ids.into_iter().enumerate() {
        if let Some(first_idx) = seen.get(&id) {
            report.add(ValidationIssue::error(
                IssueCode::DuplicateInstanceId,
                join(&index(path, "annotations", idx), "instance_id"),
                id,
                format!(
                    "Duplicate instance_id {} (first seen at index {})",
                    id, first_idx
                ),
            ));
        } else {
            seen.insert(id, idx);
        }
    }
}

impl Validate for BoundingBox2D {
    fn validate_into(&self, path: &str, _opts: &ValidateOptions, report: &mut ValidationReport) {
        if self.w == 0 || self.h == 0 {
            report.add(ValidationIssue::warning(
                IssueCode::EmptyBox2D,
                path,
                format!("{}x{}", self.w, self.h),
                "box has zero width or height",
            ));
        }
    }
}

impl Validate for Pose {
    fn validate_into(&self, path: &str, _opts: &ValidateOptions, report: &mut ValidationReport) {
        let norm = self.rotation.map(|q| q.norm()).unwrap_or(0.0);
        if !norm.is_finite() || (norm - 1.0).abs() > ROTATION_NORM_TOLERANCE {
            report.add(ValidationIssue::warning(
                IssueCode::NonUnitRotation,
                join(path, "rotation"),
                format!("|q| = {}", norm),
                "rotation should be a unit quaternion",
            ));
        }
    }
}

impl Validate for BoundingBox3D {
    fn validate_into(&self, path: &str, opts: &ValidateOptions, report: &mut ValidationReport) {
        match &self.pose {
            Some(pose) => pose.validate_into(&join(path, "pose"), opts, report),
            None => missing(path, "pose", report),
        }

        for (field, value) in [
            ("width", self.width),
            ("length", self.length),
            ("height", self.height),
        ] {
            if !value.is_finite() || value < 0.0 {
                report.add(ValidationIssue::error(
                    IssueCode::InvalidBoxDimensions,
                    join(path, field),
                    value,
                    format!("{} must be finite and non-negative", field),
                ));
            }
        }

        if self.occlusion_level().is_none() {
            report.add(ValidationIssue::error(
                IssueCode::OcclusionOutOfRange,
                join(path, "occlusion"),
                self.occlusion,
                "occlusion must be one of 0, 1, 2, 3",
            ));
        }

        if !(0.0..=1.0).contains(&self.truncation) {
            report.add(ValidationIssue::error(
                IssueCode::TruncationOutOfRange,
                join(path, "truncation"),
                self.truncation,
                "truncation must lie in [0.0, 1.0]",
            ));
        }
    }
}

impl Validate for BoundingBox2DAnnotation {
    fn validate_into(&self, path: &str, opts: &ValidateOptions, report: &mut ValidationReport) {
        check_class_id(path, self.class_id, opts, report);
        match &self.r#box {
            Some(bbox) => bbox.validate_into(&join(path, "box"), opts, report),
            None => missing(path, "box", report),
        }
        check_attributes(path, &self.attributes, report);
    }
}

impl Validate for BoundingBox3DAnnotation {
    fn validate_into(&self, path: &str, opts: &ValidateOptions, report: &mut ValidationReport) {
        check_class_id(path, self.class_id, opts, report);
        match &self.r#box {
            Some(bbox) => bbox.validate_into(&join(path, "box"), opts, report),
            None => missing(path, "box", report),
        }
        check_attributes(path, &self.attributes, report);
    }
}

impl Validate for KeyPoint2DAnnotation {
    fn validate_into(&self, path: &str, opts: &ValidateOptions, report: &mut ValidationReport) {
        check_class_id(path, self.class_id, opts, report);
        if self.point.is_none() {
            missing(path, "point", report);
        }
        check_attributes(path, &self.attributes, report);
    }
}

impl Validate for KeyLine2DAnnotation {
    fn validate_into(&self, path: &str, opts: &ValidateOptions, report: &mut ValidationReport) {
        check_class_id(path, self.class_id, opts, report);
        if self.vertices.len() < 2 {
            report.add(ValidationIssue::error(
                IssueCode::TooFewKeyLineVertices,
                join(path, "vertices"),
                format!("{} vertices", self.vertices.len()),
                "a key line needs at least 2 vertices",
            ));
        }
        check_attributes(path, &self.attributes, report);
    }
}

impl Validate for Polygon2DAnnotation {
    fn validate_into(&self, path: &str, opts: &ValidateOptions, report: &mut ValidationReport) {
        check_class_id(path, self.class_id, opts, report);
        if self.vertices.len() < 3 {
            report.add(ValidationIssue::error(
                IssueCode::TooFewPolygonVertices,
                join(path, "vertices"),
                format!("{} vertices", self.vertices.len()),
                "a polygon needs at least 3 vertices",
            ));
        }
        check_attributes(path, &self.attributes, report);
    }
}

/// Validates every entry of a collection under `annotations[i]`.
fn validate_entries<T: Validate>(
    path: &str,
    entries: &[T],
    opts: &ValidateOptions,
    report: &mut ValidationReport,
) {
    for (i, entry) in entries.iter().enumerate() {
        entry.validate_into(&index(path, "annotations", i), opts, report);
    }
}

impl Validate for BoundingBox2DAnnotations {
    fn validate_into(&self, path: &str, opts: &ValidateOptions, report: &mut ValidationReport) {
        validate_entries(path, &self.annotations, opts, report);
    }
}

impl Validate for BoundingBox3DAnnotations {
    fn validate_into(&self, path: &str, opts: &ValidateOptions, report: &mut ValidationReport) {
        validate_entries(path, &self.annotations, opts, report);
        check_unique_instance_ids(path, self.iter().map(|a| a.instance_id), report);
    }
}

impl Validate for KeyPoint2DAnnotations {
    fn validate_into(&self, path: &str, opts: &ValidateOptions, report: &mut ValidationReport) {
        validate_entries(path, &self.annotations, opts, report);
    }
}

impl Validate for KeyLine2DAnnotations {
    fn validate_into(&self, path: &str, opts: &ValidateOptions, report: &mut ValidationReport) {
        validate_entries(path, &self.annotations, opts, report);
    }
}

impl Validate for Polygon2DAnnotations {
    fn validate_into(&self, path: &str, opts: &ValidateOptions, report: &mut ValidationReport) {
        validate_entries(path, &self.annotations, opts, report);
    }
}
