//! Frame Writers
//!
//! Serialise frames for whatever draws them.

use std::io::Write;

use anyhow::Result;

use crate::render::imager::Frame;

/// Writes a sequence of frames to an output stream
pub trait FrameWriter {
    fn write_frames(&self, frames: &[Frame], out: &mut dyn Write) -> Result<()>;
}

/// JSON array of frames
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter {
    pub pretty: bool,
}

impl FrameWriter for JsonWriter {
    fn write_frames(&self, frames: &[Frame], out: &mut dyn Write) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, frames)?;
        } else {
            serde_json::to_writer(&mut *out, frames)?;
        }
        writeln!(out)?;
        Ok(())
    }
}

/// Plain `x y z` lines, one point per line, frames separated by a blank line
#[derive(Debug, Clone, Copy, Default)]
pub struct XyzWriter;

impl FrameWriter for XyzWriter {
    fn write_frames(&self, frames: &[Frame], out: &mut dyn Write) -> Result<()> {
        for (index, frame) in frames.iter().enumerate() {
            if index > 0 {
                writeln!(out)?;
            }
            for point in frame.path.points() {
                writeln!(out, "{} {} {}", point.x, point.y, point.z)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracer::{BoundingBox, Point3, Toolpath};

    fn frame(points: &[Point3]) -> Frame {
        let mut path = Toolpath::new();
        path.extend(points.iter().copied());
        Frame {
            index: 0,
            fraction: 1.0,
            bounds: BoundingBox {
                width: 10.0,
                height: 10.0,
                depth: 10.0,
            },
            path,
        }
    }

    #[test]
    fn test_xyz_output() {
        let frames = [
            frame(&[Point3::ORIGIN]),
            frame(&[Point3::ORIGIN, Point3::new(1.5, 2.0, 0.2)]),
        ];
        let mut out = Vec::new();
        XyzWriter.write_frames(&frames, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "0 0 0\n\n0 0 0\n1.5 2 0.2\n");
    }

    #[test]
    fn test_json_output() {
        let frames = [frame(&[Point3::new(1.0, 2.0, 3.0)])];
        let mut out = Vec::new();
        JsonWriter::default().write_frames(&frames, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["fraction"], 1.0);
        assert_eq!(value[0]["bounds"]["width"], 10.0);
        assert_eq!(value[0]["path"][0]["z"], 3.0);
    }
}
