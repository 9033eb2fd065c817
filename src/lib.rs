//! GCode Imager
//!
//! Turns slicer G-code into the 3D polyline the tool head follows, ready for
//! an external renderer.
//!
//! This library provides:
//! - Line parsing into metadata entries and moves
//! - A program document with its embedded configuration table
//! - A toolpath tracer with partial (progressive) tracing
//! - Frame production and serialisation for renderers

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod parser;
pub mod render;
pub mod tracer;

// Re-exports for clean public API
pub use config::Config;
pub use crate::core::{ConfigTable, ProgramDocument};
pub use error::{DocumentError, TraceError};
pub use parser::{parse_line, Move, ParamValue, Parameters, ParseOptions, ParsedLine};
pub use render::{Frame, Imager};
pub use tracer::{trace, trace_fraction, BoundingBox, MachineState, Point3, Toolpath};
