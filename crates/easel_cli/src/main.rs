//! Easel CLI
//!
//! Load a TOML scene, render it through a recording canvas, and print the
//! paint commands of every layer.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod output;

use config::SceneConfig;
use easel_core::{Canvas, ElementKind};
use easel_image::ImageData;

#[derive(Parser)]
#[command(name = "easel")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render layered vector scenes", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a scene and print the recorded paint commands
    Render {
        /// Scene file
        scene: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Render a scene and report only whether it succeeded
    Check {
        /// Scene file
        scene: PathBuf,
    },

    /// List the supported element kinds
    Kinds,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Render { scene, format } => {
            let canvas = load_and_render(&scene)?;
            let stdout = std::io::stdout();
            output::write_canvas(&mut stdout.lock(), &canvas, format)?;
        }
        Commands::Check { scene } => {
            let canvas = load_and_render(&scene)?;
            let elements: usize = canvas.layers().map(|layer| layer.len()).sum();
            println!(
                "{}: ok ({} layers, {} elements)",
                scene.display(),
                canvas.layers().count(),
                elements
            );
        }
        Commands::Kinds => {
            for kind in ElementKind::ALL {
                println!("{kind}");
            }
        }
    }

    Ok(())
}

fn load_and_render(path: &Path) -> Result<Canvas> {
    let scene = SceneConfig::load_from_path(path)?;
    info!(
        "Loaded {} ({} layers, {} elements)",
        path.display(),
        scene.layers.len(),
        scene.element_count()
    );

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let mut canvas = build_canvas(scene, base)?;
    canvas
        .render()
        .with_context(|| format!("Failed to render {}", path.display()))?;
    Ok(canvas)
}

/// Build a recording canvas holding every layer and element of `scene`
fn build_canvas(scene: SceneConfig, base: &Path) -> Result<Canvas> {
    let mut canvas = Canvas::recording(scene.canvas);

    for (layer_index, layer_config) in scene.layers.into_iter().enumerate() {
        let layer = match layer_config.name {
            Some(name) => canvas.new_layer_named(name),
            None => canvas.new_layer(),
        };

        for (element_index, element) in layer_config.elements.into_iter().enumerate() {
            let source = element.image_source(base);
            let mut attributes = element.attributes;
            if let Some(source) = source {
                debug!("Loading image for element {element_index} of layer {layer_index}");
                let image = ImageData::load(source).with_context(|| {
                    format!("Failed to load image for element {element_index} of layer {layer_index}")
                })?;
                attributes.image = Some(Arc::new(image));
            }

            canvas
                .create_named(layer, &element.kind, attributes)
                .with_context(|| {
                    format!("Invalid element {element_index} of layer {layer_index}")
                })?;
        }

        if !layer_config.visible {
            canvas
                .set_layer_visible(layer, false)
                .with_context(|| format!("Failed to hide layer {layer_index}"))?;
        }
    }

    Ok(canvas)
}
