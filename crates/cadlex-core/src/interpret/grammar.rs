//! Strict value grammars
//!
//! A located value either matches its grammar exactly or is rejected with
//! `InvalidParameterFormat`; nothing is trimmed, re-bracketed or guessed.

use regex::Regex;

use crate::errors::{CadlexError, Result};
use crate::model::{Color, Coordinate, Locale, Point2D, Point3D};

use super::lexicon::Lexicon;

/// Separator between points of a point list, in every locale
pub const POINT_LIST_SEPARATOR: char = '|';

/// Compiled grammars for one locale
#[derive(Debug, Clone)]
pub struct Grammar {
    locale: Locale,
    number: Regex,
}

impl Grammar {
    pub fn new(locale: Locale) -> Result<Self> {
        let decimal = regex::escape(&locale.decimal_separator().to_string());
        let pattern = format!(r"^[+-]?(?:\d+(?:{d}\d+)?|{d}\d+)$", d = decimal);
        let number = Regex::new(&pattern).map_err(|e| CadlexError::Internal {
            message: format!("number grammar failed to compile: {}", e),
        })?;
        Ok(Self { locale, number })
    }

    fn number(&self, raw: &str) -> Option<f64> {
        if !self.number.is_match(raw) {
            return None;
        }
        raw.replace(self.locale.decimal_separator(), ".")
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    /// Bare decimal number with optional sign
    pub fn parse_scalar(&self, field: &str, raw: &str) -> Result<f64> {
        self.number(raw)
            .ok_or_else(|| CadlexError::format(field, raw, "a decimal number"))
    }

    /// Two or three numbers joined by the locale's component separator, with
    /// no whitespace and no brackets
    pub fn parse_coordinate(&self, field: &str, raw: &str) -> Result<Coordinate> {
        let sep = self.locale.component_separator();
        let expected = format!("x{sep}y or x{sep}y{sep}z");
        let fail = || CadlexError::format(field, raw, expected.clone());

        if raw.chars().any(|c| c.is_whitespace() || c == '(' || c == ')') {
            return Err(fail());
        }

        let parts: Vec<&str> = raw.split(sep).collect();
        let values: Option<Vec<f64>> = parts.iter().map(|p| self.number(p)).collect();
        match values.as_deref() {
            Some([x, y]) => Ok(Coordinate::Planar(Point2D::new(*x, *y))),
            Some([x, y, z]) => Ok(Coordinate::Spatial(Point3D::new(*x, *y, *z))),
            _ => Err(fail()),
        }
    }

    /// `|`-separated coordinates, at least `min` of them
    pub fn parse_point_list(&self, field: &str, raw: &str, min: usize) -> Result<Vec<Coordinate>> {
        let points = raw
            .split(POINT_LIST_SEPARATOR)
            .map(|segment| self.parse_coordinate(field, segment))
            .collect::<Result<Vec<_>>>()
            .map_err(|_| {
                CadlexError::format(
                    field,
                    raw,
                    format!("coordinates separated by '{}'", POINT_LIST_SEPARATOR),
                )
            })?;
        check_point_count(field, raw, points, min)
    }

    /// Whether a token looks like it was meant as a coordinate or point list
    pub fn is_coordinate_like(&self, raw: &str) -> bool {
        let has_digit = raw.chars().any(|c| c.is_ascii_digit());
        raw.starts_with('(')
            || (has_digit
                && (raw.contains(self.locale.component_separator())
                    || raw.contains(POINT_LIST_SEPARATOR)))
    }

    /// Whether a token looks like a single number (possibly malformed)
    pub fn is_numeric_like(&self, raw: &str) -> bool {
        let first = raw.chars().next();
        matches!(first, Some(c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' || c == ',')
            && raw.chars().any(|c| c.is_ascii_digit())
    }
}

pub(crate) fn check_point_count(
    field: &str,
    raw: &str,
    points: Vec<Coordinate>,
    min: usize,
) -> Result<Vec<Coordinate>> {
    if points.len() < min {
        return Err(CadlexError::format(
            field,
            raw,
            format!("at least {} points", min),
        ));
    }
    Ok(points)
}

/// One entry of the color table, or a locale synonym of one
pub fn parse_color(lexicon: &Lexicon, field: &str, raw: &str) -> Result<Color> {
    lexicon
        .color(raw)
        .ok_or_else(|| CadlexError::format(field, raw, "a color from the fixed color table"))
}

/// Non-empty after trimming; case is kept
pub fn parse_text(field: &str, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CadlexError::format(field, raw, "non-empty text"));
    }
    Ok(trimmed.to_string())
}

/// `true` / `false` as written in raw batch items
pub fn parse_flag(field: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(CadlexError::format(field, raw, "true or false")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> Grammar {
        Grammar::new(Locale::En).unwrap()
    }

    fn es() -> Grammar {
        Grammar::new(Locale::Es).unwrap()
    }

    #[test]
    fn test_planar_coordinate() {
        let c = en().parse_coordinate("start", "0,0").unwrap();
        assert_eq!(c, Coordinate::Planar(Point2D::new(0.0, 0.0)));
    }

    #[test]
    fn test_spatial_coordinate_with_signs_and_fractions() {
        let c = en().parse_coordinate("center", "-1.5,+2,.25").unwrap();
        assert_eq!(c, Coordinate::Spatial(Point3D::new(-1.5, 2.0, 0.25)));
    }

    #[test]
    fn test_malformed_coordinates_are_rejected() {
        for raw in ["0, 0", "0", "a,b", "(0,0)", "1,2,3,4", "1,,2", "", "1,2,"] {
            let err = en().parse_coordinate("start", raw).unwrap_err();
            assert!(
                matches!(err, CadlexError::InvalidParameterFormat { ref field, .. } if field == "start"),
                "{:?} should be rejected, got {:?}",
                raw,
                err
            );
        }
    }

    #[test]
    fn test_spanish_separators() {
        let c = es().parse_coordinate("center", "1,5;2").unwrap();
        assert_eq!(c, Coordinate::Planar(Point2D::new(1.5, 2.0)));
        assert_eq!(es().parse_scalar("radius", "2,5").unwrap(), 2.5);
        assert!(es().parse_coordinate("center", "1,2").is_err());
    }

    #[test]
    fn test_scalar() {
        assert_eq!(en().parse_scalar("radius", "-3").unwrap(), -3.0);
        assert!(en().parse_scalar("radius", "3e5").is_err());
        assert!(en().parse_scalar("radius", "five").is_err());
    }

    #[test]
    fn test_point_list_minimum() {
        let g = en();
        assert_eq!(g.parse_point_list("points", "0,0|10,0", 2).unwrap().len(), 2);
        assert!(g.parse_point_list("boundary", "0,0|10,0", 3).is_err());
        assert!(g.parse_point_list("points", "0,0||10,0", 2).is_err());
    }

    #[test]
    fn test_coordinate_like_detection() {
        let g = en();
        assert!(g.is_coordinate_like("10,20"));
        assert!(g.is_coordinate_like("(10,20)"));
        assert!(g.is_coordinate_like("0,0|1,1"));
        assert!(!g.is_coordinate_like("walls"));
        assert!(!g.is_coordinate_like("25"));
        assert!(g.is_numeric_like("25"));
        assert!(!g.is_numeric_like("r2"));
    }

    #[test]
    fn test_text_and_flag() {
        assert_eq!(parse_text("text", "  Hi  ").unwrap(), "Hi");
        assert!(parse_text("text", "   ").is_err());
        assert!(parse_flag("closed", "TRUE").unwrap());
        assert!(parse_flag("closed", "yes").is_err());
    }

    #[test]
    fn test_color_uses_lexicon() {
        let es = Lexicon::for_locale(Locale::Es);
        assert_eq!(parse_color(es, "color", "Azul").unwrap(), Color::Blue);
        assert!(parse_color(es, "color", "azure").is_err());
    }
}
