//! Command-line driver
//!
//! Loads a program from disk, traces it, and writes frames out.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};

use crate::config::Config;
use crate::core::ProgramDocument;
use crate::parser::ParseOptions;
use crate::render::{render_frames, Imager};

/// Parse arguments, set up logging and run
pub async fn run() -> Result<()> {
    let config = Config::from_args_and_env()?;
    init_logging(&config.log_level);
    execute(&config).await
}

/// Initialise `env_logger`, with `RUST_LOG` taking precedence over `level`
pub fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        log::debug!("keeping the installed logger: {}", e);
    }
}

/// Trace the configured input and write the resulting frames
pub async fn execute(config: &Config) -> Result<()> {
    let document = load_document(&config.input, &config.parse_options).await?;
    log::info!(
        "loaded {} ({} lines, {} moves)",
        config.input.display(),
        document.len(),
        document.moves().len()
    );

    let mut imager = Imager::new(Arc::new(document));
    let trace = imager
        .trace()
        .with_context(|| format!("Failed to trace {}", config.input.display()))?;
    log::info!("traced {} points", trace.path.len());

    let frames = match config.frames {
        Some(count) => render_frames(Arc::new(imager), count).await?,
        None => vec![imager.render(config.fraction)?],
    };

    let writer = config.format.writer();
    match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            writer.write_frames(&frames, &mut out)?;
            out.flush()?;
            log::info!("wrote {} frame(s) to {}", frames.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            writer.write_frames(&frames, &mut out)?;
            out.flush()?;
        }
    }

    Ok(())
}

/// Read and parse a program file
pub async fn load_document(path: &Path, options: &ParseOptions) -> Result<ProgramDocument> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(anyhow!("File {} not found", path.display()));
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    ProgramDocument::from_bytes_with(&bytes, options)
        .with_context(|| format!("Failed to parse {}", path.display()))
}
