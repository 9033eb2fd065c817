//! Machine State
//!
//! Simulated position and modal settings, advanced one move at a time by
//! `step`. Each trace owns its own state, so independent traces never share
//! anything mutable.

use serde::Serialize;

use crate::error::TraceError;
use crate::parser::Move;
use crate::tracer::arc;
use crate::tracer::toolpath::{Point3, Toolpath};

/// Whether coordinates are final positions or deltas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Positioning {
    #[default]
    Absolute,
    Relative,
}

/// Declared program units. Informational only; coordinates are never rescaled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Millimeters,
    Inches,
}

/// Simulated machine state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MachineState {
    pub position: Point3,
    pub positioning: Positioning,
    pub units: Units,
}

/// Apply one move, appending any visited points to `path`.
///
/// Only `G` moves are interpreted; anything else, and any unknown G code,
/// returns the state unchanged.
pub fn step(
    mut state: MachineState,
    mv: &Move,
    path: &mut Toolpath,
) -> Result<MachineState, TraceError> {
    if !mv.is_g() {
        return Ok(state);
    }

    let current = state.position;

    match mv.number.as_str() {
        "0" | "1" => {
            let mut target = resolve_xyz(mv, current)?;
            // Unset axes resolve to the current value first, so in relative
            // mode they are offset by it as well.
            if state.positioning == Positioning::Relative {
                target = target + current;
            }
            path.push(target);
            state.position = target;
        }
        "2" | "3" => {
            let i = axis(mv, 'I')?.unwrap_or(0.0);
            let j = axis(mv, 'J')?.unwrap_or(0.0);
            let end = resolve_xyz(mv, current)?;
            let points = arc::interpolate(current, i, j, end);
            if let Some(last) = points.last() {
                state.position = *last;
            }
            path.extend(points);
        }
        "20" => state.units = Units::Inches,
        "21" => state.units = Units::Millimeters,
        "28" => {
            path.push(Point3::ORIGIN);
            state.position = Point3::ORIGIN;
        }
        "90" => state.positioning = Positioning::Absolute,
        "91" => state.positioning = Positioning::Relative,
        "92" => {
            state.position = resolve_xyz(mv, current)?;
        }
        _ => log::debug!("ignoring unsupported {}", mv.code()),
    }

    Ok(state)
}

/// X/Y/Z from the move, each unset axis falling back to `current`
fn resolve_xyz(mv: &Move, current: Point3) -> Result<Point3, TraceError> {
    Ok(Point3::new(
        axis(mv, 'X')?.unwrap_or(current.x),
        axis(mv, 'Y')?.unwrap_or(current.y),
        axis(mv, 'Z')?.unwrap_or(current.z),
    ))
}

/// Numeric value of an axis parameter, `None` when unset
fn axis(mv: &Move, letter: char) -> Result<Option<f64>, TraceError> {
    let key = letter.to_string();
    if let Some(value) = mv.number_value(&key) {
        return Ok(Some(value));
    }

    match mv.parameter(&key) {
        None => Ok(None),
        Some(raw) => Err(TraceError::InvalidParameter {
            code: mv.code(),
            axis: letter,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lines: &[&str], state: MachineState) -> (MachineState, Toolpath) {
        let mut path = Toolpath::new();
        let mut state = state;
        for line in lines {
            let mv = Move::parse(line).expect("command line");
            state = step(state, &mv, &mut path).expect("step");
        }
        (state, path)
    }

    #[test]
    fn test_absolute_linear_move() {
        let start = MachineState {
            position: Point3::new(7.0, 7.0, 7.0),
            ..Default::default()
        };
        let (state, path) = run(&["G1 X10 Y20 Z5"], start);

        assert_eq!(path.points(), &[Point3::new(10.0, 20.0, 5.0)]);
        assert_eq!(state.position, Point3::new(10.0, 20.0, 5.0));
    }

    #[test]
    fn test_relative_linear_move() {
        let start = MachineState {
            position: Point3::new(1.0, 1.0, 1.0),
            positioning: Positioning::Relative,
            ..Default::default()
        };
        let (_, path) = run(&["G1 X10 Y20 Z5"], start);
        assert_eq!(path.points(), &[Point3::new(11.0, 21.0, 6.0)]);
    }

    #[test]
    fn test_relative_unset_axes_are_offset_too() {
        let start = MachineState {
            position: Point3::new(1.0, 2.0, 3.0),
            positioning: Positioning::Relative,
            ..Default::default()
        };
        let (state, _) = run(&["G0 X1"], start);
        assert_eq!(state.position, Point3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_modal_codes_do_not_touch_path() {
        let (state, path) = run(&["G91", "G20"], MachineState::default());
        assert!(path.is_empty());
        assert_eq!(state.positioning, Positioning::Relative);
        assert_eq!(state.units, Units::Inches);

        let (state, _) = run(&["G91", "G90", "G20", "G21"], MachineState::default());
        assert_eq!(state.positioning, Positioning::Absolute);
        assert_eq!(state.units, Units::Millimeters);
    }

    #[test]
    fn test_set_position_then_home() {
        let (state, path) = run(&["G92 X5"], MachineState::default());
        assert!(path.is_empty());
        assert_eq!(state.position, Point3::new(5.0, 0.0, 0.0));

        let (state, path) = run(&["G92 X5", "G28"], MachineState::default());
        assert_eq!(path.points(), &[Point3::ORIGIN]);
        assert_eq!(state.position, Point3::ORIGIN);
    }

    #[test]
    fn test_non_g_moves_are_inert() {
        let (state, path) = run(&["M2 X5", "T1", "M104 S210"], MachineState::default());
        assert!(path.is_empty());
        assert_eq!(state, MachineState::default());
    }

    #[test]
    fn test_unknown_g_code_ignored() {
        let (state, path) = run(&["G29", "G4 P100"], MachineState::default());
        assert!(path.is_empty());
        assert_eq!(state, MachineState::default());

        // Text parameters on an unsupported code are never inspected
        let (state, path) = run(&["G1 X3", "G29 Xskip", "G1 Y4"], MachineState::default());
        assert_eq!(path.points(), &[Point3::new(3.0, 0.0, 0.0), Point3::new(3.0, 4.0, 0.0)]);
        assert_eq!(state.position, Point3::new(3.0, 4.0, 0.0));
    }

    #[test]
    fn test_arc_updates_position_to_last_sample() {
        let (state, path) = run(&["G2 X10 Y10 I10 J0 Z1"], MachineState::default());
        assert_eq!(path.len(), arc::ARC_SAMPLES);
        assert_eq!(Some(&state.position), path.last());
        assert_eq!(state.position.z, 1.0);
    }

    #[test]
    fn test_non_numeric_axis_is_an_error() {
        let mv = Move::parse("G1 Xfast").unwrap();
        let err = step(MachineState::default(), &mv, &mut Toolpath::new()).unwrap_err();
        assert_eq!(
            err,
            TraceError::InvalidParameter {
                code: "G1".to_string(),
                axis: 'X',
                value: "fast".to_string()
            }
        );
    }
}
