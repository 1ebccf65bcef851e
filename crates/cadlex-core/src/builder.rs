//! Command builder
//!
//! The only constructor of [`ParsedCommand`]. Both the interpreter and the
//! batch dispatcher end here, so required keys, value types and domain rules
//! are enforced in one place.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::errors::{CadlexError, Result};
use crate::interpret::grammar::{self, Grammar};
use crate::interpret::lexicon::Lexicon;
use crate::model::{
    Coordinate, Locale, OperationKind, ParameterValue, Parameters, ParsedCommand, Point2D, Point3D,
};
use crate::rules::catalog::{spec_for, ParamSpec, ParamType};
use crate::rules::validation::{self, Violation};

/// Fill missing parameters of `kind` from the catalog defaults
///
/// Returns the names that were defaulted, in catalog order.
///
/// # Errors
///
/// `MissingParameter` for the first required parameter that is absent when
/// `strict` is set or no default exists.
pub fn fill_defaults(kind: OperationKind, parameters: &mut Parameters, strict: bool) -> Result<Vec<String>> {
    let spec = spec_for(kind);
    let mut defaulted = Vec::new();

    for p in spec.required {
        if parameters.contains(p.name) {
            continue;
        }
        let default = if strict { None } else { p.default.to_value() };
        match default {
            Some(value) => {
                debug!(operation = %kind, field = p.name, "using default for required parameter");
                parameters.insert(p.name, value);
                defaulted.push(p.name.to_string());
            }
            None => {
                return Err(CadlexError::MissingParameter {
                    operation: kind.name().to_string(),
                    field: p.name.to_string(),
                })
            }
        }
    }

    for p in spec.optional {
        if parameters.contains(p.name) {
            continue;
        }
        if let Some(value) = p.default.to_value() {
            parameters.insert(p.name, value);
            defaulted.push(p.name.to_string());
        }
    }

    Ok(defaulted)
}

/// Assemble a validated command
///
/// # Errors
///
/// `MissingParameter` when a required key is absent; `Validation` naming
/// every field that has the wrong type, is not accepted by `kind`, or breaks
/// a domain rule, and for a non-finite `confidence`.
pub fn build(kind: OperationKind, mut parameters: Parameters, confidence: f64) -> Result<ParsedCommand> {
    if !confidence.is_finite() {
        return Err(CadlexError::invalid(
            "confidence",
            format!("must be finite, got {}", confidence),
        ));
    }

    let spec = spec_for(kind);
    if let Some(missing) = spec.required.iter().find(|p| !parameters.contains(p.name)) {
        return Err(CadlexError::MissingParameter {
            operation: kind.name().to_string(),
            field: missing.name.to_string(),
        });
    }

    let mut problems: Vec<Violation> = Vec::new();
    for (name, value) in parameters.iter() {
        match spec.find(name) {
            None => problems.push(Violation {
                field: name.clone(),
                reason: format!("is not accepted by {}", kind),
            }),
            Some(p) if !p.ty.accepts(value) => problems.push(Violation {
                field: name.clone(),
                reason: format!("expected {}, got {}", p.ty.name(), value.type_name()),
            }),
            Some(_) => {}
        }
    }
    problems.extend(validation::violations(kind, &parameters));
    validation::into_result(problems)?;

    if kind == OperationKind::DrawHatch {
        if let Some(pattern) = parameters.text("pattern") {
            let upper = pattern.to_uppercase();
            parameters.insert("pattern", ParameterValue::Text(upper));
        }
    }

    Ok(ParsedCommand {
        operation: kind,
        confidence: confidence.clamp(0.0, 1.0),
        parameters,
    })
}

/// Builds commands from raw JSON parameter maps (batch items)
///
/// Raw values use the `en` grammars: `.` decimals, `,` between components.
pub struct CommandBuilder {
    grammar: Grammar,
    lexicon: &'static Lexicon,
}

impl CommandBuilder {
    pub fn new() -> Result<Self> {
        Ok(Self {
            grammar: Grammar::new(Locale::En)?,
            lexicon: Lexicon::for_locale(Locale::En),
        })
    }

    /// Convert and validate one raw parameter map
    ///
    /// # Errors
    ///
    /// Same as [`build`], plus `InvalidParameterFormat` for values that do
    /// not convert to the declared type.
    pub fn from_raw(&self, kind: OperationKind, raw: &Map<String, Value>, strict: bool) -> Result<ParsedCommand> {
        let spec = spec_for(kind);
        let mut parameters = Parameters::new();

        for (key, value) in raw {
            let Some(param) = spec.find(key) else {
                warn!(operation = %kind, field = %key, "ignoring unknown parameter");
                continue;
            };
            if value.is_null() {
                continue;
            }
            parameters.insert(param.name, self.convert(param, value)?);
        }

        fill_defaults(kind, &mut parameters, strict)?;
        build(kind, parameters, 1.0)
    }

    fn convert(&self, param: &ParamSpec, value: &Value) -> Result<ParameterValue> {
        let field = param.name;
        match param.ty {
            ParamType::Point => self.point(field, value).map(ParameterValue::from),
            ParamType::Scalar => match value {
                Value::Number(n) => n
                    .as_f64()
                    .map(ParameterValue::Scalar)
                    .ok_or_else(|| CadlexError::format(field, n.to_string(), "a finite number")),
                Value::String(s) => self.grammar.parse_scalar(field, s).map(ParameterValue::Scalar),
                other => Err(mismatch(field, other, "a number")),
            },
            ParamType::Color => match value {
                Value::String(s) => grammar::parse_color(self.lexicon, field, s).map(ParameterValue::Color),
                other => Err(mismatch(field, other, "a color name")),
            },
            ParamType::Text => match value {
                Value::String(s) => grammar::parse_text(field, s).map(ParameterValue::Text),
                other => Err(mismatch(field, other, "a string")),
            },
            ParamType::PointList { min } => match value {
                Value::String(s) => self
                    .grammar
                    .parse_point_list(field, s, min)
                    .map(ParameterValue::PointList),
                Value::Array(items) => {
                    let points = items
                        .iter()
                        .map(|item| self.point(field, item))
                        .collect::<Result<Vec<_>>>()?;
                    grammar::check_point_count(field, &value.to_string(), points, min)
                        .map(ParameterValue::PointList)
                }
                other => Err(mismatch(field, other, "a list of points")),
            },
            ParamType::Flag => match value {
                Value::Bool(b) => Ok(ParameterValue::Flag(*b)),
                Value::String(s) => grammar::parse_flag(field, s).map(ParameterValue::Flag),
                other => Err(mismatch(field, other, "true or false")),
            },
        }
    }

    /// `"x,y"`, `[x, y]`, `[x, y, z]`, `{"x": .., "y": ..}` or with `"z"`
    fn point(&self, field: &str, value: &Value) -> Result<Coordinate> {
        let expected = "x,y, [x, y] or {\"x\": x, \"y\": y}";
        match value {
            Value::String(s) => self.grammar.parse_coordinate(field, s),
            Value::Array(parts) => {
                let numbers: Option<Vec<f64>> = parts.iter().map(Value::as_f64).collect();
                match numbers.as_deref() {
                    Some([x, y]) => Ok(Coordinate::Planar(Point2D::new(*x, *y))),
                    Some([x, y, z]) => Ok(Coordinate::Spatial(Point3D::new(*x, *y, *z))),
                    _ => Err(mismatch(field, value, expected)),
                }
            }
            Value::Object(obj) => {
                let axis = |name: &str| obj.get(name).and_then(Value::as_f64);
                let extra = obj.keys().any(|k| !matches!(k.as_str(), "x" | "y" | "z"));
                match (axis("x"), axis("y"), obj.get("z")) {
                    (Some(x), Some(y), None) if !extra => Ok(Coordinate::Planar(Point2D::new(x, y))),
                    (Some(x), Some(y), Some(z)) if !extra => match z.as_f64() {
                        Some(z) => Ok(Coordinate::Spatial(Point3D::new(x, y, z))),
                        None => Err(mismatch(field, value, expected)),
                    },
                    _ => Err(mismatch(field, value, expected)),
                }
            }
            other => Err(mismatch(field, other, expected)),
        }
    }
}

fn mismatch(field: &str, value: &Value, expected: &str) -> CadlexError {
    CadlexError::format(field, value.to_string(), expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {}", other),
        }
    }

    fn circle(radius: f64) -> Parameters {
        let mut p = Parameters::new();
        p.insert("center", ParameterValue::Point2D(Point2D::new(0.0, 0.0)));
        p.insert("radius", ParameterValue::Scalar(radius));
        p
    }

    #[test]
    fn test_build_valid_circle() {
        let cmd = build(OperationKind::DrawCircle, circle(5.0), 0.9).unwrap();
        assert_eq!(cmd.operation, OperationKind::DrawCircle);
        assert_eq!(cmd.confidence, 0.9);
    }

    #[test]
    fn test_radius_must_be_positive() {
        for radius in [0.0, -0.001, -10.0] {
            let err = build(OperationKind::DrawCircle, circle(radius), 1.0).unwrap_err();
            assert!(matches!(err, CadlexError::Validation { ref fields, .. } if fields == &["radius"]));
        }
    }

    #[test]
    fn test_confidence_is_clamped_and_must_be_finite() {
        assert_eq!(build(OperationKind::DrawCircle, circle(1.0), 7.0).unwrap().confidence, 1.0);
        assert_eq!(build(OperationKind::DrawCircle, circle(1.0), -1.0).unwrap().confidence, 0.0);
        let err = build(OperationKind::DrawCircle, circle(1.0), f64::NAN).unwrap_err();
        assert!(matches!(err, CadlexError::Validation { ref fields, .. } if fields == &["confidence"]));
    }

    #[test]
    fn test_missing_required_key() {
        let mut p = Parameters::new();
        p.insert("radius", ParameterValue::Scalar(1.0));
        let err = build(OperationKind::DrawCircle, p, 1.0).unwrap_err();
        assert!(matches!(err, CadlexError::MissingParameter { ref field, .. } if field == "center"));
    }

    #[test]
    fn test_wrong_type_and_unknown_key_are_both_named() {
        let mut p = circle(1.0);
        p.insert("radius", ParameterValue::Text("big".to_string()));
        p.insert("bogus", ParameterValue::Flag(true));
        let err = build(OperationKind::DrawCircle, p, 1.0).unwrap_err();
        match err {
            CadlexError::Validation { fields, .. } => {
                assert_eq!(fields, vec!["bogus".to_string(), "radius".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_hatch_pattern_is_upper_cased() {
        let builder = CommandBuilder::new().unwrap();
        let cmd = builder
            .from_raw(
                OperationKind::DrawHatch,
                &raw(json!({"boundary": "0,0|10,0|10,10", "pattern": "ansi31"})),
                true,
            )
            .unwrap();
        assert_eq!(cmd.parameters.text("pattern"), Some("ANSI31"));
    }

    #[test]
    fn test_from_raw_accepts_point_shapes() {
        let builder = CommandBuilder::new().unwrap();
        for start in [json!("1,2"), json!([1, 2]), json!({"x": 1, "y": 2})] {
            let cmd = builder
                .from_raw(
                    OperationKind::DrawLine,
                    &raw(json!({"start": start, "end": [5.5, 6, 7]})),
                    true,
                )
                .unwrap();
            assert_eq!(
                cmd.parameters.coordinate("start"),
                Some(Coordinate::Planar(Point2D::new(1.0, 2.0)))
            );
            assert_eq!(
                cmd.parameters.coordinate("end"),
                Some(Coordinate::Spatial(Point3D::new(5.5, 6.0, 7.0)))
            );
        }
    }

    #[test]
    fn test_from_raw_rejects_malformed_values() {
        let builder = CommandBuilder::new().unwrap();
        let cases = [
            json!({"center": "0, 0", "radius": 1}),
            json!({"center": [0], "radius": 1}),
            json!({"center": "0,0", "radius": "ten"}),
            json!({"center": "0,0", "radius": true}),
        ];
        for case in cases {
            let err = builder
                .from_raw(OperationKind::DrawCircle, &raw(case.clone()), true)
                .unwrap_err();
            assert!(
                matches!(err, CadlexError::InvalidParameterFormat { .. }),
                "{} gave {:?}",
                case,
                err
            );
        }
    }

    #[test]
    fn test_from_raw_defaults_follow_strict_mode() {
        let builder = CommandBuilder::new().unwrap();
        let err = builder
            .from_raw(OperationKind::DrawCircle, &raw(json!({"radius": 3})), true)
            .unwrap_err();
        assert!(matches!(err, CadlexError::MissingParameter { .. }));

        let cmd = builder
            .from_raw(OperationKind::DrawCircle, &raw(json!({"radius": 3})), false)
            .unwrap();
        assert_eq!(
            cmd.parameters.coordinate("center"),
            Some(Coordinate::Planar(Point2D::new(0.0, 0.0)))
        );
        assert_eq!(cmd.confidence, 1.0);
    }

    #[test]
    fn test_from_raw_ignores_unknown_keys_and_nulls() {
        let builder = CommandBuilder::new().unwrap();
        let cmd = builder
            .from_raw(
                OperationKind::CreateLayer,
                &raw(json!({"name": "Walls", "color": "Red", "layer": null, "shade": 3})),
                true,
            )
            .unwrap();
        assert_eq!(cmd.parameters.len(), 2);
        assert_eq!(cmd.parameters.color("color"), Some(crate::model::Color::Red));
    }

    #[test]
    fn test_from_raw_point_list_and_flag() {
        let builder = CommandBuilder::new().unwrap();
        let cmd = builder
            .from_raw(
                OperationKind::DrawPolyline,
                &raw(json!({"points": [[0, 0], "10,0", {"x": 10, "y": 10}], "closed": "true"})),
                true,
            )
            .unwrap();
        assert_eq!(cmd.parameters.points("points").map(|p| p.len()), Some(3));
        assert_eq!(cmd.parameters.flag("closed"), Some(true));
    }
}
