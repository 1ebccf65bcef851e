//! Data model shared by the interpreter, builder and batch engine

pub mod command;
pub mod operation;
pub mod parameter;

pub use command::{ParsedCommand, RawInput};
pub use operation::{Locale, OperationKind};
pub use parameter::{Color, Coordinate, ParameterValue, Parameters, Point2D, Point3D};
