use std::sync::Arc;

use gcode_imager::render::render_frames;
use gcode_imager::{Imager, ProgramDocument};

const PROGRAM: &str = "; printable_area = 0,0,200x200
; printable_height = 150
G21
G90
G28
G1 Z0.2 F600
G1 X50 Y50
G1 X150 Y50
G1 X150 Y150
G3 X50 Y150 I-50 J0
G1 X50 Y50
";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let document = ProgramDocument::parse(PROGRAM);
    println!("=== Parsed document ===\n{}", document);

    let mut imager = Imager::new(Arc::new(document));
    let trace = imager.trace()?;
    println!("bounds: {:?}", trace.bounds);
    println!("points: {}", trace.path.len());

    let frames = render_frames(Arc::new(imager), 5).await?;
    for frame in &frames {
        println!(
            "frame at {:>4.0}%: {} points, ends at {:?}",
            frame.fraction * 100.0,
            frame.path.len(),
            frame.path.last()
        );
    }

    Ok(())
}
