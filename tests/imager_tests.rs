//! Trace/render sequencing and progressive frames
use std::sync::Arc;

use gcode_imager::render::{frame_fractions, render_frames, FrameWriter, XyzWriter};
use gcode_imager::{Imager, ProgramDocument, TraceError};

const PROGRAM: &str = "; printable_area = 0,0,120x100\n\
    ; printable_height = 80\n\
    G28\n\
    G1 X10 Y10 Z0.2\n\
    G1 X20\n\
    G2 X30 Y10 I5 J0\n\
    G1 Y20\n\
    M84\n";

fn traced_imager() -> Imager {
    let mut imager = Imager::new(Arc::new(ProgramDocument::parse(PROGRAM)));
    imager.trace().expect("trace");
    imager
}

#[test]
fn test_render_requires_trace() {
    let imager = Imager::new(Arc::new(ProgramDocument::parse(PROGRAM)));
    assert!(!imager.is_traced());
    assert_eq!(imager.render(1.0).unwrap_err(), TraceError::NotTraced);
    assert_eq!(imager.render(0.5).unwrap_err(), TraceError::NotTraced);
}

#[test]
fn test_failed_trace_leaves_imager_untraced() {
    let mut imager = Imager::new(Arc::new(ProgramDocument::parse("G1 X1")));
    assert!(imager.trace().is_err());
    assert!(imager.traced().is_none());
    assert_eq!(imager.render(1.0).unwrap_err(), TraceError::NotTraced);
}

#[test]
fn test_full_frame_matches_trace() {
    let imager = traced_imager();
    let frame = imager.render(1.0).expect("frame");

    assert_eq!(frame.bounds.width, 120.0);
    assert_eq!(frame.bounds.height, 100.0);
    assert_eq!(frame.bounds.depth, 80.0);
    assert_eq!(Some(&frame.path), imager.traced().map(|t| &t.path));
    assert_eq!(frame.path.len(), 1 + 3 + 100 + 1);
}

#[test]
fn test_partial_frames_are_prefixes() {
    let imager = traced_imager();
    let full = imager.render(1.0).expect("full");

    for fraction in frame_fractions(6) {
        let frame = imager.render(fraction).expect("frame");
        assert_eq!(frame.fraction, fraction);
        assert_eq!(frame.path.points(), full.path.prefix(frame.path.len()));
    }
}

#[test]
fn test_rendering_is_repeatable() {
    let imager = traced_imager();
    assert_eq!(imager.render(0.5), imager.render(0.5));
}

#[tokio::test]
async fn test_parallel_frames_match_sequential() {
    let imager = Arc::new(traced_imager());
    let frames = render_frames(Arc::clone(&imager), 5).await.expect("frames");

    assert_eq!(frames.len(), 5);
    for (frame, fraction) in frames.iter().zip(frame_fractions(5)) {
        assert_eq!(frame, &imager.render(fraction).expect("sequential frame"));
    }
}

#[tokio::test]
async fn test_parallel_frames_write_as_xyz() {
    let imager = Arc::new(traced_imager());
    let frames = render_frames(imager, 2).await.expect("frames");

    let mut out = Vec::new();
    XyzWriter.write_frames(&frames, &mut out).expect("write");
    let text = String::from_utf8(out).expect("utf8");

    let blocks: Vec<&str> = text.split("\n\n").collect();
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].starts_with("0 0 0\n0 0 0\n10 10 0.2"));
}
