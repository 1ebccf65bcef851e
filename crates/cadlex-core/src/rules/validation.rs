//! Domain validation rules
//!
//! Each rule reports a violation instead of returning early, so a single
//! `Validation` error can name every offending field.

use crate::errors::{CadlexError, Result};
use crate::model::{Coordinate, OperationKind, ParameterValue, Parameters};

#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub field: String,
    pub reason: String,
}

impl Violation {
    fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

fn require_positive(params: &Parameters, field: &str, out: &mut Vec<Violation>) {
    if let Some(v) = params.scalar(field) {
        if v <= 0.0 {
            out.push(Violation::new(field, format!("must be > 0, got {}", v)));
        }
    }
}

fn require_non_negative(params: &Parameters, field: &str, out: &mut Vec<Violation>) {
    if let Some(v) = params.scalar(field) {
        if v < 0.0 {
            out.push(Violation::new(field, format!("must be >= 0, got {}", v)));
        }
    }
}

fn same_point(a: &Coordinate, b: &Coordinate) -> bool {
    a.x() == b.x() && a.y() == b.y() && a.z() == b.z()
}

fn distinct_count(points: &[Coordinate]) -> usize {
    let mut seen: Vec<&Coordinate> = Vec::with_capacity(points.len());
    for p in points {
        if !seen.iter().any(|s| same_point(s, p)) {
            seen.push(p);
        }
    }
    seen.len()
}

fn require_distinct_points(params: &Parameters, field: &str, min: usize, out: &mut Vec<Violation>) {
    if let Some(points) = params.points(field) {
        let distinct = distinct_count(points);
        if distinct < min {
            out.push(Violation::new(
                field,
                format!("needs at least {} distinct points, got {}", min, distinct),
            ));
        }
    }
}

/// Values that no grammar would produce but a caller could still hand over
fn check_well_formed(params: &Parameters, out: &mut Vec<Violation>) {
    for (name, value) in params.iter() {
        let finite = match value {
            ParameterValue::Scalar(v) => v.is_finite(),
            ParameterValue::Point2D(p) => p.x.is_finite() && p.y.is_finite(),
            ParameterValue::Point3D(p) => p.x.is_finite() && p.y.is_finite() && p.z.is_finite(),
            ParameterValue::PointList(points) => points
                .iter()
                .all(|p| p.x().is_finite() && p.y().is_finite() && p.z().is_finite()),
            _ => true,
        };
        if !finite {
            out.push(Violation::new(name, "must be finite"));
        }
        if let ParameterValue::Text(t) = value {
            if t.trim().is_empty() {
                out.push(Violation::new(name, "must not be empty"));
            }
        }
    }
}

/// Apply the cross-field and domain rules of `kind`
pub fn violations(kind: OperationKind, params: &Parameters) -> Vec<Violation> {
    let mut out = Vec::new();
    check_well_formed(params, &mut out);
    require_non_negative(params, "lineweight", &mut out);

    match kind {
        OperationKind::DrawCircle | OperationKind::DrawArc => {
            require_positive(params, "radius", &mut out);
        }
        OperationKind::DrawEllipse => {
            require_positive(params, "major_axis", &mut out);
            if let Some(ratio) = params.scalar("minor_ratio") {
                if !(ratio > 0.0 && ratio <= 1.0) {
                    out.push(Violation::new(
                        "minor_ratio",
                        format!("must be in (0, 1], got {}", ratio),
                    ));
                }
            }
        }
        OperationKind::DrawRectangle => {
            if let (Some(a), Some(b)) = (params.coordinate("corner1"), params.coordinate("corner2")) {
                if a.x() == b.x() && a.y() == b.y() {
                    out.push(Violation::new("corner1", "corners must not coincide"));
                    out.push(Violation::new("corner2", "corners must not coincide"));
                }
            }
        }
        OperationKind::DrawPolyline => require_distinct_points(params, "points", 2, &mut out),
        OperationKind::DrawHatch => {
            require_distinct_points(params, "boundary", 3, &mut out);
            require_positive(params, "scale", &mut out);
        }
        OperationKind::DrawText => require_positive(params, "height", &mut out),
        OperationKind::InsertBlock => require_positive(params, "scale", &mut out),
        OperationKind::RenameLayer => {
            if let (Some(old), Some(new)) = (params.text("old_name"), params.text("new_name")) {
                if old == new {
                    out.push(Violation::new("new_name", "must differ from old_name"));
                }
            }
        }
        OperationKind::DrawLine
        | OperationKind::CreateLayer
        | OperationKind::DeleteLayer
        | OperationKind::TurnLayerOn
        | OperationKind::TurnLayerOff
        | OperationKind::ListLayers => {}
    }

    out
}

/// Fold violations into one error naming every offending field
pub fn into_result(violations: Vec<Violation>) -> Result<()> {
    if violations.is_empty() {
        return Ok(());
    }
    let mut fields: Vec<String> = Vec::new();
    for v in &violations {
        if !fields.contains(&v.field) {
            fields.push(v.field.clone());
        }
    }
    let reason = violations
        .iter()
        .map(|v| format!("{} {}", v.field, v.reason))
        .collect::<Vec<_>>()
        .join("; ");
    Err(CadlexError::Validation { fields, reason })
}
