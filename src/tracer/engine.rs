//! Tracing Engine
//!
//! Resolves the printable volume from document metadata and replays the move
//! list through `step` to build a toolpath.

use serde::Serialize;

use crate::core::{ConfigTable, ProgramDocument};
use crate::error::TraceError;
use crate::parser::Move;
use crate::tracer::state::{self, MachineState};
use crate::tracer::toolpath::{Point3, Toolpath};

pub const PRINTABLE_AREA: &str = "printable_area";
pub const PRINTABLE_HEIGHT: &str = "printable_height";

/// Printable volume used to frame the rendered scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl BoundingBox {
    /// Read `printable_area` and `printable_height`.
    ///
    /// Only the third comma field of `printable_area` is used, as `<W>x<H>`.
    pub fn from_config(config: &ConfigTable) -> Result<Self, TraceError> {
        let area = config.get(PRINTABLE_AREA).ok_or(TraceError::MissingConfig {
            key: PRINTABLE_AREA,
        })?;
        let height = config
            .get(PRINTABLE_HEIGHT)
            .ok_or(TraceError::MissingConfig {
                key: PRINTABLE_HEIGHT,
            })?;

        let malformed_area = || TraceError::MalformedConfig {
            key: PRINTABLE_AREA,
            value: area.to_string(),
        };

        let extent = area.split(',').nth(2).ok_or_else(malformed_area)?.trim();
        let (w, h) = extent.split_once('x').ok_or_else(malformed_area)?;
        let width = parse_dimension(w).ok_or_else(malformed_area)?;
        let height_xy = parse_dimension(h).ok_or_else(malformed_area)?;

        let depth = parse_dimension(height).ok_or_else(|| TraceError::MalformedConfig {
            key: PRINTABLE_HEIGHT,
            value: height.to_string(),
        })?;

        Ok(Self {
            width,
            height: height_xy,
            depth,
        })
    }
}

fn parse_dimension(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Result of one trace run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub bounds: BoundingBox,
    pub path: Toolpath,
    /// State after the last processed move
    pub state: MachineState,
    /// Number of moves replayed
    pub moves_processed: usize,
}

/// Trace the whole document
pub fn trace(document: &ProgramDocument) -> Result<Trace, TraceError> {
    trace_fraction(document, 1.0)
}

/// Trace the first `floor(moves * fraction)` moves.
///
/// Every call replays from the initial state; nothing is cached between calls.
pub fn trace_fraction(document: &ProgramDocument, fraction: f64) -> Result<Trace, TraceError> {
    let count = moves_for_fraction(document.moves().len(), fraction)?;
    let bounds = BoundingBox::from_config(document.configs())?;

    let (path, state) = trace_moves(&document.moves()[..count])?;
    log::debug!(
        "traced {}/{} moves into {} points",
        count,
        document.moves().len(),
        path.len()
    );

    Ok(Trace {
        bounds,
        path,
        state,
        moves_processed: count,
    })
}

/// Replay moves from the origin. The path always starts with the origin.
pub fn trace_moves(moves: &[Move]) -> Result<(Toolpath, MachineState), TraceError> {
    let mut path = Toolpath::starting_at(Point3::ORIGIN);
    let mut machine = MachineState::default();

    for mv in moves {
        machine = state::step(machine, mv, &mut path)?;
    }

    Ok((path, machine))
}

/// Number of moves covered by `fraction` of `total`
pub fn moves_for_fraction(total: usize, fraction: f64) -> Result<usize, TraceError> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(TraceError::InvalidFraction(fraction));
    }
    Ok(((total as f64) * fraction).floor() as usize)
}
