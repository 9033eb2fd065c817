//! Imager
//!
//! Sequences tracing and frame production for an external renderer.
//! `render` is only valid after `trace`.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::ProgramDocument;
use crate::error::TraceError;
use crate::tracer::{self, BoundingBox, Toolpath, Trace};

/// What a renderer needs to draw one image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Position in an animation, 0 for a single render
    pub index: usize,
    /// Completion fraction this frame was traced at
    pub fraction: f64,
    pub bounds: BoundingBox,
    pub path: Toolpath,
}

/// Holds a document and, once traced, its full toolpath
#[derive(Debug, Clone)]
pub struct Imager {
    document: Arc<ProgramDocument>,
    traced: Option<Trace>,
}

impl Imager {
    pub fn new(document: Arc<ProgramDocument>) -> Self {
        Self {
            document,
            traced: None,
        }
    }

    pub fn document(&self) -> &ProgramDocument {
        &self.document
    }

    /// Resolve bounds and the complete toolpath
    pub fn trace(&mut self) -> Result<&Trace, TraceError> {
        let trace = tracer::trace(&self.document)?;
        Ok(&*self.traced.insert(trace))
    }

    pub fn is_traced(&self) -> bool {
        self.traced.is_some()
    }

    /// Result of the last successful `trace`
    pub fn traced(&self) -> Option<&Trace> {
        self.traced.as_ref()
    }

    /// Produce the frame for `fraction` of the moves.
    ///
    /// Fails with `TraceError::NotTraced` before `trace` has succeeded.
    pub fn render(&self, fraction: f64) -> Result<Frame, TraceError> {
        let full = self.traced.as_ref().ok_or(TraceError::NotTraced)?;

        let path = if fraction == 1.0 {
            full.path.clone()
        } else {
            tracer::trace_fraction(&self.document, fraction)?.path
        };

        Ok(Frame {
            index: 0,
            fraction,
            bounds: full.bounds,
            path,
        })
    }
}

/// Fractions for an animation of `frames` images: `(i + 1) / frames`
pub fn frame_fractions(frames: usize) -> impl Iterator<Item = f64> {
    (0..frames).map(move |i| (i + 1) as f64 / frames as f64)
}

/// Render every animation frame in parallel on the blocking pool.
///
/// Each frame replays the document with its own machine state. Frames are
/// returned in order.
pub async fn render_frames(imager: Arc<Imager>, frames: usize) -> Result<Vec<Frame>> {
    if !imager.is_traced() {
        return Err(TraceError::NotTraced.into());
    }

    let handles: Vec<_> = frame_fractions(frames)
        .enumerate()
        .map(|(index, fraction)| {
            let imager = Arc::clone(&imager);
            tokio::task::spawn_blocking(move || {
                log::debug!("generating frame {} of {}", index + 1, frames);
                imager
                    .render(fraction)
                    .map(|frame| Frame { index, ..frame })
            })
        })
        .collect();

    let mut rendered = Vec::with_capacity(frames);
    for (index, handle) in handles.into_iter().enumerate() {
        let frame = handle
            .await
            .with_context(|| format!("frame {} worker failed", index + 1))??;
        rendered.push(frame);
    }

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROGRAM: &str = "; printable_area = 0,0,200x200\n\
        ; printable_height = 150\n\
        G28\n\
        G1 X10 Y10\n\
        G1 X20\n\
        G1 Z5\n";

    fn imager() -> Imager {
        Imager::new(Arc::new(ProgramDocument::parse(PROGRAM)))
    }

    #[test]
    fn test_render_before_trace_fails() {
        let imager = imager();
        assert_eq!(imager.render(1.0), Err(TraceError::NotTraced));
    }

    #[test]
    fn test_render_full_and_partial() {
        let mut imager = imager();
        imager.trace().expect("trace");

        let full = imager.render(1.0).expect("full frame");
        assert_eq!(full.index, 0);
        assert_eq!(full.path.len(), 5);
        assert_eq!(full.bounds.depth, 150.0);

        let half = imager.render(0.5).expect("half frame");
        assert_eq!(half.path.len(), 3);
        assert_eq!(half.path.points(), full.path.prefix(3));
    }

    #[test]
    fn test_frame_fractions() {
        let fractions: Vec<f64> = frame_fractions(4).collect();
        assert_eq!(fractions, vec![0.25, 0.5, 0.75, 1.0]);
        assert_eq!(frame_fractions(0).count(), 0);
    }

    #[tokio::test]
    async fn test_render_frames_in_order() {
        let mut imager = imager();
        imager.trace().expect("trace");

        let frames = render_frames(Arc::new(imager), 4).await.expect("frames");
        let lengths: Vec<usize> = frames.iter().map(|f| f.path.len()).collect();
        assert_eq!(lengths, vec![2, 3, 4, 5]);

        let indices: Vec<usize> = frames.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(frames[1].fraction, 0.5);
    }

    #[tokio::test]
    async fn test_render_frames_requires_trace() {
        let err = render_frames(Arc::new(imager()), 2).await.unwrap_err();
        assert_eq!(err.downcast_ref::<TraceError>(), Some(&TraceError::NotTraced));
    }
}
