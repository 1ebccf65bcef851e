//! Parameter extraction
//!
//! Values are located in four passes over the tokens:
//!
//! 1. labels, left to right (`from 0,0`, `radius of 5`, `layer Walls`);
//! 2. flag words (`closed`) and bare color names;
//! 3. positional fallback: unlabeled coordinates fill point parameters in
//!    declaration order, unlabeled quoted literals fill text parameters;
//! 4. defaults for whatever is still missing, subject to strict mode.
//!
//! Every located value goes through the strict grammars; a malformed value is
//! an error, never a reason to keep looking.

use crate::builder;
use crate::errors::{CadlexError, Result};
use crate::model::{Coordinate, Locale, OperationKind, ParameterValue, Parameters};
use crate::rules::catalog::{spec_for, ParamSpec, ParamType};

use super::grammar::{self, Grammar, POINT_LIST_SEPARATOR};
use super::lexicon::Lexicon;
use super::token::Token;

/// Parameters located in an instruction
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Located values plus defaults for the rest
    pub parameters: Parameters,
    /// Fraction of declared parameters actually found
    pub coverage: f64,
    /// Names of parameters found in the text
    pub found: Vec<String>,
    /// Names of declared parameters that received their default
    pub defaulted: Vec<String>,
}

/// Locale-bound parameter extractor
pub struct Extractor {
    lexicon: &'static Lexicon,
    grammar: Grammar,
}

/// Working state of one extraction
struct Scan<'t> {
    tokens: &'t [Token],
    consumed: Vec<bool>,
    found: Parameters,
}

impl<'t> Scan<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            consumed: vec![false; tokens.len()],
            found: Parameters::new(),
        }
    }

    fn free(&self, i: usize) -> bool {
        i < self.tokens.len() && !self.consumed[i]
    }

    fn consume(&mut self, from: usize, to: usize) {
        for flag in &mut self.consumed[from..to] {
            *flag = true;
        }
    }

    /// Free, unquoted tokens satisfying `pred`, in order
    fn free_words<F>(&self, pred: F) -> Vec<usize>
    where
        F: Fn(&Token) -> bool,
    {
        (0..self.tokens.len())
            .filter(|&i| self.free(i) && !self.tokens[i].quoted && pred(&self.tokens[i]))
            .collect()
    }
}

impl Extractor {
    pub fn new(locale: Locale) -> Result<Self> {
        Ok(Self {
            lexicon: Lexicon::for_locale(locale),
            grammar: Grammar::new(locale)?,
        })
    }

    /// Locate every parameter `kind` accepts in `tokens`
    ///
    /// # Errors
    ///
    /// `InvalidParameterFormat` when a located value is malformed;
    /// `MissingParameter` when a required parameter is absent and either
    /// `strict` is set or it has no default.
    pub fn extract(&self, kind: OperationKind, tokens: &[Token], strict: bool) -> Result<Extraction> {
        let spec = spec_for(kind);
        let accepted: Vec<&'static ParamSpec> = spec.accepted().collect();
        let mut scan = Scan::new(tokens);

        self.bind_labels(&accepted, &mut scan)?;
        self.bind_flags(&accepted, &mut scan);
        self.bind_bare_color(&accepted, &mut scan);
        self.bind_positional(&accepted, &mut scan)?;

        let found: Vec<String> = scan.found.keys().cloned().collect();
        let found_declared = spec.declared().filter(|p| scan.found.contains(p.name)).count();
        let coverage = if spec.declared_count() == 0 {
            1.0
        } else {
            found_declared as f64 / spec.declared_count() as f64
        };

        let mut parameters = scan.found;
        let defaulted = builder::fill_defaults(kind, &mut parameters, strict)?;

        Ok(Extraction {
            parameters,
            coverage,
            found,
            defaulted,
        })
    }

    // ----- pass 1: labels -----

    fn bind_labels(&self, accepted: &[&'static ParamSpec], scan: &mut Scan<'_>) -> Result<()> {
        let mut i = 0;
        while i < scan.tokens.len() {
            if !scan.free(i) || scan.tokens[i].quoted {
                i += 1;
                continue;
            }
            let Some((param, label_len)) = self.match_label(accepted, scan, i) else {
                i += 1;
                continue;
            };

            let value_at = self.skip_separators(scan, i + label_len);
            match self.bind_value(param, scan, value_at)? {
                Some((value, used)) => {
                    scan.found.insert(param.name, value);
                    scan.consume(i, value_at + used);
                    i = value_at + used;
                }
                // A label word used for something else ("layer" in "named")
                None => i += 1,
            }
        }
        Ok(())
    }

    /// Longest label phrase starting at `i` among still-unbound parameters
    fn match_label(
        &self,
        accepted: &[&'static ParamSpec],
        scan: &Scan<'_>,
        i: usize,
    ) -> Option<(&'static ParamSpec, usize)> {
        let mut best: Option<(&'static ParamSpec, usize)> = None;
        for param in accepted.iter().copied() {
            if param.ty == ParamType::Flag || scan.found.contains(param.name) {
                continue;
            }
            for phrase in self.lexicon.labels_for(param.name) {
                let words: Vec<&str> = phrase.split(' ').collect();
                let matches = words.iter().enumerate().all(|(k, w)| {
                    scan.free(i + k)
                        && !scan.tokens[i + k].quoted
                        && scan.tokens[i + k].lower == *w
                });
                if matches && best.map_or(true, |(_, len)| words.len() > len) {
                    best = Some((param, words.len()));
                }
            }
        }
        best
    }

    fn skip_separators(&self, scan: &Scan<'_>, mut j: usize) -> usize {
        while scan.free(j)
            && !scan.tokens[j].quoted
            && self.lexicon.is_separator(&scan.tokens[j].lower)
        {
            j += 1;
        }
        j
    }

    /// Whether a bare word can stand as a text value
    fn is_value_word(&self, token: &Token) -> bool {
        let w = token.lower.as_str();
        !(self.lexicon.is_filler(w) || self.lexicon.is_separator(w) || self.lexicon.is_label_word(w))
    }

    /// A value word that means nothing else to the lexicon
    fn is_stray_word(&self, token: &Token) -> bool {
        let w = token.lower.as_str();
        self.is_value_word(token)
            && !self.lexicon.is_keyword_word(w)
            && !self.lexicon.is_flag_word(w)
            && self.lexicon.color(w).is_none()
    }

    /// Parse the value at `j` for `param`; `None` when nothing there looks
    /// like a value of that type
    fn bind_value(
        &self,
        param: &ParamSpec,
        scan: &Scan<'_>,
        j: usize,
    ) -> Result<Option<(ParameterValue, usize)>> {
        if !scan.free(j) {
            return Ok(None);
        }
        let token = &scan.tokens[j];
        let raw = token.raw.as_str();
        let numeric = !token.quoted
            && (self.grammar.is_coordinate_like(raw) || self.grammar.is_numeric_like(raw));
        // A plain word where a number belongs is a malformed value, not a
        // reason to leave the parameter unbound
        let misplaced = !token.quoted && !numeric && self.is_stray_word(token);

        let bound = match param.ty {
            ParamType::Point if numeric || misplaced => {
                Some((self.grammar.parse_coordinate(param.name, raw)?.into(), 1))
            }
            ParamType::Scalar if numeric || misplaced => Some((
                ParameterValue::Scalar(self.grammar.parse_scalar(param.name, raw)?),
                1,
            )),
            ParamType::PointList { .. } if misplaced => {
                return Err(CadlexError::format(param.name, raw, "a list of coordinates"));
            }
            ParamType::Color if token.quoted || self.is_value_word(token) => Some((
                ParameterValue::Color(grammar::parse_color(self.lexicon, param.name, raw)?),
                1,
            )),
            ParamType::Text if token.quoted || self.is_value_word(token) => Some((
                ParameterValue::Text(grammar::parse_text(param.name, raw)?),
                1,
            )),
            ParamType::PointList { min } if numeric => {
                let (points, used) = self.point_run(param.name, scan, j, min)?;
                Some((ParameterValue::PointList(points), used))
            }
            _ => None,
        };
        Ok(bound)
    }

    /// A `|`-joined list at `j`, or the run of coordinates starting at `j`
    fn point_run(
        &self,
        field: &str,
        scan: &Scan<'_>,
        j: usize,
        min: usize,
    ) -> Result<(Vec<Coordinate>, usize)> {
        let first = scan.tokens[j].raw.as_str();
        if first.contains(POINT_LIST_SEPARATOR) {
            return Ok((self.grammar.parse_point_list(field, first, min)?, 1));
        }

        let mut points = Vec::new();
        let mut k = j;
        while scan.free(k)
            && !scan.tokens[k].quoted
            && self.grammar.is_coordinate_like(&scan.tokens[k].raw)
            && !scan.tokens[k].raw.contains(POINT_LIST_SEPARATOR)
        {
            points.push(self.grammar.parse_coordinate(field, &scan.tokens[k].raw)?);
            k += 1;
        }
        let used = (k - j).max(1);
        if points.is_empty() {
            // A lone number where a list was expected
            return Err(CadlexError::format(field, first, "a list of coordinates"));
        }
        let joined = scan.tokens[j..k]
            .iter()
            .map(|t| t.raw.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let points = grammar::check_point_count(field, &joined, points, min)?;
        Ok((points, used))
    }

    // ----- pass 2: flags and bare colors -----

    fn bind_flags(&self, accepted: &[&'static ParamSpec], scan: &mut Scan<'_>) {
        for param in accepted.iter().filter(|p| p.ty == ParamType::Flag) {
            let words = self.lexicon.flag_words_for(param.name);
            if let Some(&i) = scan.free_words(|t| words.contains(&t.lower.as_str())).first() {
                scan.found.insert(param.name, ParameterValue::Flag(true));
                scan.consume(i, i + 1);
            }
        }
    }

    fn bind_bare_color(&self, accepted: &[&'static ParamSpec], scan: &mut Scan<'_>) {
        let Some(param) = accepted.iter().find(|p| p.ty == ParamType::Color) else {
            return;
        };
        if scan.found.contains(param.name) {
            return;
        }
        let candidates = scan.free_words(|t| self.lexicon.color(&t.lower).is_some());
        if let Some(&i) = candidates.first() {
            if let Some(color) = self.lexicon.color(&scan.tokens[i].lower) {
                scan.found.insert(param.name, ParameterValue::Color(color));
                scan.consume(i, i + 1);
            }
        }
    }

    // ----- pass 3: positional fallback -----

    fn bind_positional(&self, accepted: &[&'static ParamSpec], scan: &mut Scan<'_>) -> Result<()> {
        for param in accepted.iter().copied() {
            if scan.found.contains(param.name) {
                continue;
            }
            match param.ty {
                ParamType::Point => {
                    // Bare numbers count too, so "0" fails here instead of
                    // letting the next coordinate shift into this slot
                    let candidates = scan.free_words(|t| {
                        (self.grammar.is_coordinate_like(&t.raw) || self.grammar.is_numeric_like(&t.raw))
                            && !t.raw.contains(POINT_LIST_SEPARATOR)
                    });
                    if let Some(&i) = candidates.first() {
                        let coordinate = self.grammar.parse_coordinate(param.name, &scan.tokens[i].raw)?;
                        scan.found.insert(param.name, coordinate.into());
                        scan.consume(i, i + 1);
                    }
                }
                ParamType::PointList { min } => {
                    let candidates = scan.free_words(|t| self.grammar.is_coordinate_like(&t.raw));
                    if let Some(&i) = candidates.first() {
                        let (points, used) = self.point_run(param.name, scan, i, min)?;
                        scan.found.insert(param.name, ParameterValue::PointList(points));
                        scan.consume(i, i + used);
                    }
                }
                ParamType::Text => {
                    let quoted: Vec<usize> = (0..scan.tokens.len())
                        .filter(|&i| scan.free(i) && scan.tokens[i].quoted)
                        .collect();
                    if let Some(&i) = quoted.first() {
                        let text = grammar::parse_text(param.name, &scan.tokens[i].raw)?;
                        scan.found.insert(param.name, ParameterValue::Text(text));
                        scan.consume(i, i + 1);
                    }
                }
                ParamType::Scalar | ParamType::Color | ParamType::Flag => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpret::token::tokenize;
    use crate::model::{Color, Point2D};

    fn extract(kind: OperationKind, text: &str, strict: bool) -> Result<Extraction> {
        Extractor::new(Locale::En)
            .unwrap()
            .extract(kind, &tokenize(text), strict)
    }

    fn planar(x: f64, y: f64) -> Option<Coordinate> {
        Some(Coordinate::Planar(Point2D::new(x, y)))
    }

    #[test]
    fn test_line_from_to() {
        let e = extract(OperationKind::DrawLine, "draw a line from 0,0 to 100,100", false).unwrap();
        assert_eq!(e.parameters.coordinate("start"), planar(0.0, 0.0));
        assert_eq!(e.parameters.coordinate("end"), planar(100.0, 100.0));
        assert_eq!(e.coverage, 1.0);
        assert!(e.defaulted.is_empty());
    }

    #[test]
    fn test_line_positional() {
        let e = extract(OperationKind::DrawLine, "line 1,2 3,4", true).unwrap();
        assert_eq!(e.parameters.coordinate("start"), planar(1.0, 2.0));
        assert_eq!(e.parameters.coordinate("end"), planar(3.0, 4.0));
    }

    #[test]
    fn test_circle_with_color_and_radius() {
        let e = extract(
            OperationKind::DrawCircle,
            "create a blue circle at 50,50 with radius 25",
            true,
        )
        .unwrap();
        assert_eq!(e.parameters.coordinate("center"), planar(50.0, 50.0));
        assert_eq!(e.parameters.scalar("radius"), Some(25.0));
        assert_eq!(e.parameters.color("color"), Some(Color::Blue));
        assert_eq!(e.coverage, 1.0);
    }

    #[test]
    fn test_separators_between_label_and_value() {
        let e = extract(OperationKind::DrawCircle, "circle at 0,0 r=5", true).unwrap();
        assert_eq!(e.parameters.scalar("radius"), Some(5.0));
        let e = extract(OperationKind::DrawCircle, "circle at 0,0 radius of 7", true).unwrap();
        assert_eq!(e.parameters.scalar("radius"), Some(7.0));
    }

    #[test]
    fn test_malformed_coordinate_is_an_error() {
        let err = extract(OperationKind::DrawLine, "draw a line from 0, 0 to 5,5", false).unwrap_err();
        assert!(matches!(
            err,
            CadlexError::InvalidParameterFormat { ref field, .. } if field == "start"
        ));
    }

    #[test]
    fn test_word_after_point_label_is_an_error() {
        for strict in [true, false] {
            let err = extract(OperationKind::DrawLine, "draw a line from a,b to 10,10", strict)
                .unwrap_err();
            assert!(matches!(
                err,
                CadlexError::InvalidParameterFormat { ref field, ref value, .. }
                    if field == "start" && value == "a,b"
            ));
        }
    }

    #[test]
    fn test_word_after_scalar_label_is_an_error() {
        for strict in [true, false] {
            let err = extract(OperationKind::DrawCircle, "circle at 0,0 radius big", strict)
                .unwrap_err();
            assert!(matches!(
                err,
                CadlexError::InvalidParameterFormat { ref field, .. } if field == "radius"
            ));
        }
    }

    #[test]
    fn test_color_after_point_label_is_not_a_value() {
        // "red" still binds as a bare color, the start falls back to positional
        let e = extract(OperationKind::DrawLine, "line from red 0,0 to 5,5", true).unwrap();
        assert_eq!(e.parameters.color("color"), Some(Color::Red));
        assert_eq!(e.parameters.coordinate("start"), planar(0.0, 0.0));
    }

    #[test]
    fn test_bare_number_does_not_shift_positional_points() {
        for strict in [true, false] {
            let err = extract(OperationKind::DrawLine, "draw a line 0 10,10", strict).unwrap_err();
            assert!(matches!(
                err,
                CadlexError::InvalidParameterFormat { ref field, ref value, .. }
                    if field == "start" && value == "0"
            ));
        }
    }

    #[test]
    fn test_strict_mode_requires_explicit_parameters() {
        let err = extract(OperationKind::DrawCircle, "draw a circle", true).unwrap_err();
        assert!(matches!(
            err,
            CadlexError::MissingParameter { ref field, .. } if field == "center"
        ));
    }

    #[test]
    fn test_non_strict_defaults_count_as_not_found() {
        let e = extract(OperationKind::DrawCircle, "draw a circle", false).unwrap();
        assert_eq!(e.parameters.coordinate("center"), planar(0.0, 0.0));
        assert_eq!(e.parameters.scalar("radius"), Some(50.0));
        assert_eq!(e.coverage, 0.0);
        assert_eq!(e.defaulted, vec!["center".to_string(), "radius".to_string()]);
    }

    #[test]
    fn test_required_without_default_fails_in_both_modes() {
        for strict in [true, false] {
            let err = extract(OperationKind::DeleteLayer, "delete layer", strict).unwrap_err();
            assert!(matches!(err, CadlexError::MissingParameter { .. }));
        }
    }

    #[test]
    fn test_optional_defaults_fill_in() {
        let e = extract(OperationKind::DrawArc, "arc at 0,0 radius 10 from 45", true).unwrap();
        assert_eq!(e.parameters.scalar("start_angle"), Some(45.0));
        assert_eq!(e.parameters.scalar("end_angle"), Some(90.0));
        assert_eq!(e.coverage, 0.75);
    }

    #[test]
    fn test_text_keeps_case_of_quoted_literal() {
        let e = extract(
            OperationKind::DrawText,
            "add text \"Hello World\" at 10,10 with height 5",
            true,
        )
        .unwrap();
        assert_eq!(e.parameters.text("text"), Some("Hello World"));
        assert_eq!(e.parameters.scalar("height"), Some(5.0));
        assert_eq!(e.parameters.scalar("rotation"), Some(0.0));
    }

    #[test]
    fn test_polyline_points_and_closed_flag() {
        let e = extract(
            OperationKind::DrawPolyline,
            "draw a closed polyline with points 0,0 100,0 100,100 0,100",
            true,
        )
        .unwrap();
        assert_eq!(e.parameters.points("points").map(|p| p.len()), Some(4));
        assert_eq!(e.parameters.flag("closed"), Some(true));
    }

    #[test]
    fn test_polyline_pipe_list() {
        let e = extract(OperationKind::DrawPolyline, "polyline 0,0|5,5|9,0", true).unwrap();
        assert_eq!(e.parameters.points("points").map(|p| p.len()), Some(3));
        assert_eq!(e.parameters.flag("closed"), Some(false));
    }

    #[test]
    fn test_hatch_boundary_minimum() {
        let err = extract(OperationKind::DrawHatch, "hatch through 0,0|5,5", true).unwrap_err();
        assert!(matches!(
            err,
            CadlexError::InvalidParameterFormat { ref field, .. } if field == "boundary"
        ));
    }

    #[test]
    fn test_layer_label_chain() {
        let e = extract(
            OperationKind::CreateLayer,
            "create a red layer called Walls",
            true,
        )
        .unwrap();
        assert_eq!(e.parameters.text("name"), Some("Walls"));
        assert_eq!(e.parameters.color("color"), Some(Color::Red));
    }

    #[test]
    fn test_rename_layer() {
        let e = extract(OperationKind::RenameLayer, "rename layer Walls to Partitions", true).unwrap();
        assert_eq!(e.parameters.text("old_name"), Some("Walls"));
        assert_eq!(e.parameters.text("new_name"), Some("Partitions"));

        let e = extract(OperationKind::RenameLayer, "rename 'A 1' to 'B 2'", true).unwrap();
        assert_eq!(e.parameters.text("old_name"), Some("A 1"));
        assert_eq!(e.parameters.text("new_name"), Some("B 2"));
    }

    #[test]
    fn test_drawing_on_layer() {
        let e = extract(
            OperationKind::DrawLine,
            "draw a line from 0,0 to 1,1 on layer Walls with lineweight 0.5",
            true,
        )
        .unwrap();
        assert_eq!(e.parameters.text("layer"), Some("Walls"));
        assert_eq!(e.parameters.scalar("lineweight"), Some(0.5));
        // Style attributes do not change coverage
        assert_eq!(e.coverage, 1.0);
    }

    #[test]
    fn test_unknown_color_after_label() {
        let err = extract(OperationKind::DrawLine, "line 0,0 1,1 color chartreuse", true).unwrap_err();
        assert!(matches!(
            err,
            CadlexError::InvalidParameterFormat { ref field, .. } if field == "color"
        ));
    }

    #[test]
    fn test_list_layers_full_coverage() {
        let e = extract(OperationKind::ListLayers, "list all layers", true).unwrap();
        assert!(e.parameters.is_empty());
        assert_eq!(e.coverage, 1.0);
    }

    #[test]
    fn test_insert_block() {
        let e = extract(
            OperationKind::InsertBlock,
            "insert block Door at 10,5 scale 2 rotation 90",
            true,
        )
        .unwrap();
        assert_eq!(e.parameters.text("block_name"), Some("Door"));
        assert_eq!(e.parameters.coordinate("insertion_point"), planar(10.0, 5.0));
        assert_eq!(e.parameters.scalar("scale"), Some(2.0));
        assert_eq!(e.parameters.scalar("rotation"), Some(90.0));
    }

    #[test]
    fn test_spanish_circle() {
        let e = Extractor::new(Locale::Es)
            .unwrap()
            .extract(
                OperationKind::DrawCircle,
                &tokenize("dibuja un círculo rojo en 1,5;2 radio de 2,5"),
                true,
            )
            .unwrap();
        assert_eq!(e.parameters.coordinate("center"), planar(1.5, 2.0));
        assert_eq!(e.parameters.scalar("radius"), Some(2.5));
        assert_eq!(e.parameters.color("color"), Some(Color::Red));
    }
}
