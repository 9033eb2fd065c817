use anyhow::Result;
use gcode_imager::cli::run;

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}
