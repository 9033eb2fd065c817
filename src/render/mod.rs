//! Rendering Boundary
//!
//! Frame production for progressive rendering and frame serialisation.
//! Drawing images is left to external tools.

pub mod imager;
pub mod writer;

pub use imager::{frame_fractions, render_frames, Frame, Imager};
pub use writer::{FrameWriter, JsonWriter, XyzWriter};
