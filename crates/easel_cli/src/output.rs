//! Printing recorded frames

use anyhow::Result;
use easel_core::{Canvas, Layer, LayerId};
use easel_paint::{PaintCommand, PathCommand};
use serde::Serialize;
use std::io::Write;

use crate::Format;

#[derive(Serialize)]
struct CanvasReport<'a> {
    width: f32,
    height: f32,
    frames: u64,
    layers: Vec<LayerReport<'a>>,
}

#[derive(Serialize)]
struct LayerReport<'a> {
    id: LayerId,
    name: Option<&'a str>,
    visible: bool,
    commands: &'a [PaintCommand],
}

impl<'a> LayerReport<'a> {
    fn new(layer: &'a Layer) -> Self {
        Self {
            id: layer.id(),
            name: layer.name(),
            visible: layer.is_visible(),
            commands: layer.context().recorded().unwrap_or_default(),
        }
    }
}

/// Write every layer's last frame to `out`
pub fn write_canvas(out: &mut impl Write, canvas: &Canvas, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let report = CanvasReport {
                width: canvas.width(),
                height: canvas.height(),
                frames: canvas.frames(),
                layers: canvas.layers().map(LayerReport::new).collect(),
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
        Format::Text => {
            for layer in canvas.layers() {
                write_layer_text(out, &LayerReport::new(layer))?;
            }
        }
    }
    Ok(())
}

fn write_layer_text(out: &mut impl Write, layer: &LayerReport<'_>) -> Result<()> {
    let name = layer.name.unwrap_or("unnamed");
    let hidden = if layer.visible { "" } else { " [hidden]" };
    writeln!(out, "layer {} ({name}){hidden}", layer.id)?;
    for command in layer.commands {
        writeln!(out, "  {}", describe(command))?;
    }
    Ok(())
}

fn describe(command: &PaintCommand) -> String {
    match command {
        PaintCommand::FillPath { path, style } => {
            format!("fill {} {}", style.color, describe_path(path.commands()))
        }
        PaintCommand::StrokePath { path, style } => format!(
            "stroke {} width={} {}",
            style.color,
            style.width,
            describe_path(path.commands())
        ),
        PaintCommand::FillText {
            text,
            position,
            style,
        } => format!(
            "text {:?} at ({}, {}) size={} font={} {}",
            text, position.x, position.y, style.size, style.family, style.color
        ),
        PaintCommand::DrawImage {
            position,
            width,
            height,
            ..
        } => format!(
            "image {width}x{height} at ({}, {})",
            position.x, position.y
        ),
        PaintCommand::PushTransform { transform } => format!(
            "push [{} {} {} {} {} {}]",
            transform.a, transform.b, transform.c, transform.d, transform.e, transform.f
        ),
        PaintCommand::PopTransform => "pop".to_string(),
    }
}

fn describe_path(commands: &[PathCommand]) -> String {
    commands
        .iter()
        .map(|command| match command {
            PathCommand::MoveTo(p) => format!("M{},{}", p.x, p.y),
            PathCommand::LineTo(p) => format!("L{},{}", p.x, p.y),
            PathCommand::Arc { center, radius, .. } => {
                format!("A{},{} r{}", center.x, center.y, radius)
            }
            PathCommand::Rect(rect) => {
                format!("R{},{} {}x{}", rect.x, rect.y, rect.width, rect.height)
            }
            PathCommand::Close => "Z".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
