use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CadlexError;

/// Closed set of drafting operations the interpreter understands.
///
/// Declaration order is significant: when two kinds match keywords of the same
/// length, the kind declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    DrawLine,
    DrawCircle,
    DrawArc,
    DrawRectangle,
    DrawPolyline,
    DrawEllipse,
    DrawText,
    DrawHatch,
    InsertBlock,
    CreateLayer,
    RenameLayer,
    DeleteLayer,
    TurnLayerOn,
    TurnLayerOff,
    ListLayers,
}

impl OperationKind {
    /// All kinds in declaration order
    pub const ALL: [OperationKind; 15] = [
        OperationKind::DrawLine,
        OperationKind::DrawCircle,
        OperationKind::DrawArc,
        OperationKind::DrawRectangle,
        OperationKind::DrawPolyline,
        OperationKind::DrawEllipse,
        OperationKind::DrawText,
        OperationKind::DrawHatch,
        OperationKind::InsertBlock,
        OperationKind::CreateLayer,
        OperationKind::RenameLayer,
        OperationKind::DeleteLayer,
        OperationKind::TurnLayerOn,
        OperationKind::TurnLayerOff,
        OperationKind::ListLayers,
    ];

    /// Stable snake_case name (matches the serde representation)
    pub fn name(&self) -> &'static str {
        match self {
            OperationKind::DrawLine => "draw_line",
            OperationKind::DrawCircle => "draw_circle",
            OperationKind::DrawArc => "draw_arc",
            OperationKind::DrawRectangle => "draw_rectangle",
            OperationKind::DrawPolyline => "draw_polyline",
            OperationKind::DrawEllipse => "draw_ellipse",
            OperationKind::DrawText => "draw_text",
            OperationKind::DrawHatch => "draw_hatch",
            OperationKind::InsertBlock => "insert_block",
            OperationKind::CreateLayer => "create_layer",
            OperationKind::RenameLayer => "rename_layer",
            OperationKind::DeleteLayer => "delete_layer",
            OperationKind::TurnLayerOn => "turn_layer_on",
            OperationKind::TurnLayerOff => "turn_layer_off",
            OperationKind::ListLayers => "list_layers",
        }
    }

    /// Position in declaration order (tie-break rank)
    pub fn rank(&self) -> usize {
        Self::ALL.iter().position(|k| k == self).unwrap_or(usize::MAX)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OperationKind {
    type Err = CadlexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        OperationKind::ALL
            .iter()
            .copied()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| CadlexError::UnknownOperation {
                name: s.to_string(),
            })
    }
}

/// Language of the input text.
///
/// Selects keyword/label tables and numeric separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    /// Decimal separator inside a number
    pub fn decimal_separator(&self) -> char {
        match self {
            Locale::En => '.',
            Locale::Es => ',',
        }
    }

    /// Separator between the components of a coordinate
    pub fn component_separator(&self) -> char {
        match self {
            Locale::En => ',',
            Locale::Es => ';',
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }
}

impl FromStr for Locale {
    type Err = CadlexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept region-qualified tags such as "es-MX"
        let primary = s.trim().split(['-', '_']).next().unwrap_or("");
        match primary.to_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "es" => Ok(Locale::Es),
            _ => Err(CadlexError::Config {
                source_name: "locale".to_string(),
                reason: format!("unsupported locale '{}'", s),
            }),
        }
    }
}
