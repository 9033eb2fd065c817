//! Toolpath Tracer
//!
//! Replays parsed moves against a simulated machine and collects the
//! positions the tool head passes through.

pub mod arc;
pub mod engine;
pub mod state;
pub mod toolpath;

pub use engine::{trace, trace_fraction, trace_moves, BoundingBox, Trace};
pub use state::{step, MachineState, Positioning, Units};
pub use toolpath::{Point3, Toolpath};
