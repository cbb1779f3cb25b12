//! paintview CLI
//!
//! Replays a scripted sequence of touch events and host calls against a paint
//! surface and writes the exported PNG.

mod script;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use paintview::{MainLooper, PaintView};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::script::Script;

#[derive(Parser)]
#[command(name = "paintview")]
#[command(author, version, about = "Replay touch scripts against a paintview surface", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a script and export the drawing as PNG
    Replay {
        /// Script file (TOML)
        script: PathBuf,

        /// Where to write the exported PNG
        #[arg(short, long, default_value = "paintview.png")]
        output: PathBuf,

        /// Also write the final on-screen frame, including in-flight strokes
        #[arg(long)]
        frame: Option<PathBuf>,
    },

    /// Parse a script and print the options it resolves to
    Check {
        /// Script file (TOML)
        script: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Replay {
            script,
            output,
            frame,
        } => cmd_replay(&script, &output, frame.as_deref()),
        Commands::Check { script } => cmd_check(&script),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn cmd_replay(script_path: &Path, output: &Path, frame: Option<&Path>) -> Result<()> {
    let script = Script::load(script_path)?;

    let looper = MainLooper::prepare();
    let mut view = PaintView::new(looper.handle());
    view.realize(script.surface_options())
        .context("Failed to create paint surface")?;
    script.replay(&view);

    let image = view
        .get_image()
        .context("Surface has nothing to export; does the script set a view size?")?;
    fs::write(output, &image.bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(
        path = %output.display(),
        width = image.width,
        height = image.height,
        dirty = view.get_dirty(),
        "exported drawing"
    );

    if let Some(frame_path) = frame {
        let raster = view.render().context("Surface has no view size to render")?;
        let png = paintview_image::encode_png(&raster).context("Failed to encode frame")?;
        fs::write(frame_path, png)
            .with_context(|| format!("Failed to write {}", frame_path.display()))?;
        info!(path = %frame_path.display(), "wrote frame");
    }

    view.destroy();
    Ok(())
}

fn cmd_check(script_path: &Path) -> Result<()> {
    let script = Script::load(script_path)?;
    let options = serde_json::to_string_pretty(&script.surface_options())
        .context("Failed to serialize surface options")?;

    println!("surface options:\n{options}");
    match script.view {
        Some(size) => println!("view: {}x{}", size.width, size.height),
        None => println!("view: not set (nothing will be drawn)"),
    }
    println!("steps: {}", script.steps.len());
    Ok(())
}
