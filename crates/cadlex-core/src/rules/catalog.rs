//! Fixed parameter catalog
//!
//! One entry per operation kind: declared required and optional parameters
//! with their value type and default, plus the style attributes the kind
//! accepts. Nothing is registered at runtime.

use crate::model::{Coordinate, OperationKind, ParameterValue, Point2D};

/// Value type a parameter accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// 2D or 3D coordinate
    Point,
    Scalar,
    Color,
    Text,
    PointList { min: usize },
    Flag,
}

impl ParamType {
    pub fn name(&self) -> &'static str {
        match self {
            ParamType::Point => "point",
            ParamType::Scalar => "scalar",
            ParamType::Color => "color",
            ParamType::Text => "text",
            ParamType::PointList { .. } => "point_list",
            ParamType::Flag => "flag",
        }
    }

    /// Whether `value` has this type
    pub fn accepts(&self, value: &ParameterValue) -> bool {
        matches!(
            (self, value),
            (ParamType::Point, ParameterValue::Point2D(_))
                | (ParamType::Point, ParameterValue::Point3D(_))
                | (ParamType::Scalar, ParameterValue::Scalar(_))
                | (ParamType::Color, ParameterValue::Color(_))
                | (ParamType::Text, ParameterValue::Text(_))
                | (ParamType::PointList { .. }, ParameterValue::PointList(_))
                | (ParamType::Flag, ParameterValue::Flag(_))
        )
    }
}

/// Declared default of a parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    /// Must always be supplied
    None,
    Point(f64, f64),
    Scalar(f64),
    Text(&'static str),
    Flag(bool),
    /// 100 x 100 square anchored at the origin
    Square,
}

impl DefaultValue {
    pub fn to_value(&self) -> Option<ParameterValue> {
        match self {
            DefaultValue::None => None,
            DefaultValue::Point(x, y) => Some(ParameterValue::Point2D(Point2D::new(*x, *y))),
            DefaultValue::Scalar(v) => Some(ParameterValue::Scalar(*v)),
            DefaultValue::Text(t) => Some(ParameterValue::Text((*t).to_string())),
            DefaultValue::Flag(b) => Some(ParameterValue::Flag(*b)),
            DefaultValue::Square => Some(ParameterValue::PointList(
                [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)]
                    .into_iter()
                    .map(|(x, y)| Coordinate::Planar(Point2D::new(x, y)))
                    .collect(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub ty: ParamType,
    pub default: DefaultValue,
}

const fn param(name: &'static str, ty: ParamType, default: DefaultValue) -> ParamSpec {
    ParamSpec { name, ty, default }
}

/// Catalog entry for one operation kind
#[derive(Debug)]
pub struct OperationSpec {
    pub kind: OperationKind,
    pub required: &'static [ParamSpec],
    pub optional: &'static [ParamSpec],
    /// Style attributes: accepted, validated, never counted in coverage
    pub style: &'static [ParamSpec],
}

impl OperationSpec {
    /// Declared parameters (required, then optional)
    pub fn declared(&self) -> impl Iterator<Item = &'static ParamSpec> {
        self.required.iter().chain(self.optional.iter())
    }

    /// Every parameter the kind accepts
    pub fn accepted(&self) -> impl Iterator<Item = &'static ParamSpec> {
        self.declared().chain(self.style.iter())
    }

    pub fn find(&self, name: &str) -> Option<&'static ParamSpec> {
        self.accepted().find(|p| p.name == name)
    }

    pub fn declared_count(&self) -> usize {
        self.required.len() + self.optional.len()
    }
}

const ORIGIN: DefaultValue = DefaultValue::Point(0.0, 0.0);

const COLOR: ParamSpec = param("color", ParamType::Color, DefaultValue::None);
const LAYER: ParamSpec = param("layer", ParamType::Text, DefaultValue::None);
const LINEWEIGHT: ParamSpec = param("lineweight", ParamType::Scalar, DefaultValue::None);

const DRAWING_STYLE: &[ParamSpec] = &[COLOR, LAYER, LINEWEIGHT];
// A new layer is its own layer; only color and lineweight apply
const LAYER_STYLE: &[ParamSpec] = &[COLOR, LINEWEIGHT];

static CATALOG: [OperationSpec; 15] = [
    OperationSpec {
        kind: OperationKind::DrawLine,
        required: &[
            param("start", ParamType::Point, ORIGIN),
            param("end", ParamType::Point, DefaultValue::Point(100.0, 100.0)),
        ],
        optional: &[],
        style: DRAWING_STYLE,
    },
    OperationSpec {
        kind: OperationKind::DrawCircle,
        required: &[
            param("center", ParamType::Point, ORIGIN),
            param("radius", ParamType::Scalar, DefaultValue::Scalar(50.0)),
        ],
        optional: &[],
        style: DRAWING_STYLE,
    },
    OperationSpec {
        kind: OperationKind::DrawArc,
        required: &[
            param("center", ParamType::Point, ORIGIN),
            param("radius", ParamType::Scalar, DefaultValue::Scalar(50.0)),
        ],
        optional: &[
            param("start_angle", ParamType::Scalar, DefaultValue::Scalar(0.0)),
            param("end_angle", ParamType::Scalar, DefaultValue::Scalar(90.0)),
        ],
        style: DRAWING_STYLE,
    },
    OperationSpec {
        kind: OperationKind::DrawRectangle,
        required: &[
            param("corner1", ParamType::Point, ORIGIN),
            param("corner2", ParamType::Point, DefaultValue::Point(100.0, 100.0)),
        ],
        optional: &[],
        style: DRAWING_STYLE,
    },
    OperationSpec {
        kind: OperationKind::DrawPolyline,
        required: &[param(
            "points",
            ParamType::PointList { min: 2 },
            DefaultValue::Square,
        )],
        optional: &[param("closed", ParamType::Flag, DefaultValue::Flag(false))],
        style: DRAWING_STYLE,
    },
    OperationSpec {
        kind: OperationKind::DrawEllipse,
        required: &[
            param("center", ParamType::Point, ORIGIN),
            param("major_axis", ParamType::Scalar, DefaultValue::Scalar(100.0)),
        ],
        optional: &[param(
            "minor_ratio",
            ParamType::Scalar,
            DefaultValue::Scalar(0.5),
        )],
        style: DRAWING_STYLE,
    },
    OperationSpec {
        kind: OperationKind::DrawText,
        required: &[
            param("position", ParamType::Point, ORIGIN),
            param("text", ParamType::Text, DefaultValue::Text("Text")),
        ],
        optional: &[
            param("height", ParamType::Scalar, DefaultValue::Scalar(2.5)),
            param("rotation", ParamType::Scalar, DefaultValue::Scalar(0.0)),
        ],
        style: DRAWING_STYLE,
    },
    OperationSpec {
        kind: OperationKind::DrawHatch,
        required: &[param(
            "boundary",
            ParamType::PointList { min: 3 },
            DefaultValue::Square,
        )],
        optional: &[
            param("pattern", ParamType::Text, DefaultValue::Text("SOLID")),
            param("scale", ParamType::Scalar, DefaultValue::Scalar(1.0)),
        ],
        style: DRAWING_STYLE,
    },
    OperationSpec {
        kind: OperationKind::InsertBlock,
        required: &[
            param("block_name", ParamType::Text, DefaultValue::None),
            param("insertion_point", ParamType::Point, ORIGIN),
        ],
        optional: &[
            param("scale", ParamType::Scalar, DefaultValue::Scalar(1.0)),
            param("rotation", ParamType::Scalar, DefaultValue::Scalar(0.0)),
        ],
        style: DRAWING_STYLE,
    },
    OperationSpec {
        kind: OperationKind::CreateLayer,
        required: &[param("name", ParamType::Text, DefaultValue::None)],
        optional: &[],
        style: LAYER_STYLE,
    },
    OperationSpec {
        kind: OperationKind::RenameLayer,
        required: &[
            param("old_name", ParamType::Text, DefaultValue::None),
            param("new_name", ParamType::Text, DefaultValue::None),
        ],
        optional: &[],
        style: &[],
    },
    OperationSpec {
        kind: OperationKind::DeleteLayer,
        required: &[param("name", ParamType::Text, DefaultValue::None)],
        optional: &[],
        style: &[],
    },
    OperationSpec {
        kind: OperationKind::TurnLayerOn,
        required: &[param("name", ParamType::Text, DefaultValue::None)],
        optional: &[],
        style: &[],
    },
    OperationSpec {
        kind: OperationKind::TurnLayerOff,
        required: &[param("name", ParamType::Text, DefaultValue::None)],
        optional: &[],
        style: &[],
    },
    OperationSpec {
        kind: OperationKind::ListLayers,
        required: &[],
        optional: &[],
        style: &[],
    },
];

/// Catalog entry for `kind`
pub fn spec_for(kind: OperationKind) -> &'static OperationSpec {
    // CATALOG is laid out in declaration order
    &CATALOG[kind.rank()]
}

/// Value type of a parameter name in any kind
pub fn param_type(name: &str) -> Option<ParamType> {
    CATALOG
        .iter()
        .flat_map(|spec| spec.accepted())
        .find(|p| p.name == name)
        .map(|p| p.ty)
}
