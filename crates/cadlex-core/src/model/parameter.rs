//! Typed parameter values
//!
//! Every value an operation accepts is one variant of [`ParameterValue`].
//! Values are only constructed by the grammars in `interpret::grammar` or by
//! callers that already hold typed data, so a value of this type is always
//! well-formed; domain rules (positivity, distinctness) belong to the builder.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Point3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// A parsed coordinate, either planar or spatial
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Spatial(Point3D),
    Planar(Point2D),
}

impl Coordinate {
    pub fn x(&self) -> f64 {
        match self {
            Coordinate::Planar(p) => p.x,
            Coordinate::Spatial(p) => p.x,
        }
    }

    pub fn y(&self) -> f64 {
        match self {
            Coordinate::Planar(p) => p.y,
            Coordinate::Spatial(p) => p.y,
        }
    }

    /// z component; planar coordinates sit on z = 0
    pub fn z(&self) -> f64 {
        match self {
            Coordinate::Planar(_) => 0.0,
            Coordinate::Spatial(p) => p.z,
        }
    }
}

impl From<Coordinate> for ParameterValue {
    fn from(c: Coordinate) -> Self {
        match c {
            Coordinate::Planar(p) => ParameterValue::Point2D(p),
            Coordinate::Spatial(p) => ParameterValue::Point3D(p),
        }
    }
}

/// Fixed drawing color table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    Red,
    Yellow,
    Green,
    Cyan,
    Blue,
    Magenta,
    White,
    Gray,
    Orange,
}

impl Color {
    /// Canonical (English) name
    pub fn name(&self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Cyan => "cyan",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::White => "white",
            Color::Gray => "gray",
            Color::Orange => "orange",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tagged union over every value type an operation accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ParameterValue {
    #[serde(rename = "point2d")]
    Point2D(Point2D),
    #[serde(rename = "point3d")]
    Point3D(Point3D),
    #[serde(rename = "scalar")]
    Scalar(f64),
    #[serde(rename = "color")]
    Color(Color),
    #[serde(rename = "text")]
    Text(String),
    #[serde(rename = "point_list")]
    PointList(Vec<Coordinate>),
    #[serde(rename = "flag")]
    Flag(bool),
}

impl ParameterValue {
    /// Short type name used in validation messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ParameterValue::Point2D(_) => "point2d",
            ParameterValue::Point3D(_) => "point3d",
            ParameterValue::Scalar(_) => "scalar",
            ParameterValue::Color(_) => "color",
            ParameterValue::Text(_) => "text",
            ParameterValue::PointList(_) => "point_list",
            ParameterValue::Flag(_) => "flag",
        }
    }

    pub fn as_coordinate(&self) -> Option<Coordinate> {
        match self {
            ParameterValue::Point2D(p) => Some(Coordinate::Planar(*p)),
            ParameterValue::Point3D(p) => Some(Coordinate::Spatial(*p)),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            ParameterValue::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParameterValue::Text(t) => Some(t.as_str()),
            _ => None,
        }
    }

    pub fn as_points(&self) -> Option<&[Coordinate]> {
        match self {
            ParameterValue::PointList(points) => Some(points.as_slice()),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ParameterValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            ParameterValue::Color(c) => Some(*c),
            _ => None,
        }
    }
}

/// Ordered map of parameter name to value; keys are unique
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(BTreeMap<String, ParameterValue>);

impl Parameters {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert a value, replacing any previous value under the same name
    pub fn insert(&mut self, name: impl Into<String>, value: ParameterValue) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParameterValue)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn scalar(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ParameterValue::as_scalar)
    }

    pub fn coordinate(&self, name: &str) -> Option<Coordinate> {
        self.get(name).and_then(ParameterValue::as_coordinate)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParameterValue::as_text)
    }

    pub fn points(&self, name: &str) -> Option<&[Coordinate]> {
        self.get(name).and_then(ParameterValue::as_points)
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(ParameterValue::as_flag)
    }

    pub fn color(&self, name: &str) -> Option<Color> {
        self.get(name).and_then(ParameterValue::as_color)
    }
}

impl FromIterator<(String, ParameterValue)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (String, ParameterValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Parameters {
    type Item = (String, ParameterValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, ParameterValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
