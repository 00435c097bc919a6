// SPDX-License-Identifier: GPL-3.0-or-later
// src/main.rs
//
// Command-line driver: load a source, position it and export the crop.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use sigma_cropper::Cropper;
use sigma_cropper::config::AppConfig;
use sigma_cropper::constant::CROPPER_MIN_SIZE_VAR;
use sigma_cropper::domain::Rect;

/// Crop a square region out of an image.
#[derive(Debug, Clone, Parser)]
#[command(name = "sigma-cropper", version, about)]
pub struct Args {
    /// Image to crop (path or file:// URL).
    pub src: String,

    /// Output format: jpeg, png or webp.
    #[arg(long)]
    pub format: Option<String>,

    /// Encoder quality between 0 and 1.
    #[arg(long)]
    pub quality: Option<String>,

    /// Crop viewport edge in pixels.
    #[arg(long)]
    pub min_size: Option<f64>,

    /// Zoom factor applied before moving.
    #[arg(long)]
    pub scale: Option<f64>,

    /// Drag step as `DX,DY`; may be repeated.
    #[arg(long = "move", value_parser = parse_delta, allow_hyphen_values = true)]
    pub moves: Vec<(f64, f64)>,

    /// Directory the crop is written to.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

fn parse_delta(value: &str) -> Result<(f64, f64), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY, got {value:?}"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid delta {part:?}: {e}"))
    };
    Ok((parse(x)?, parse(y)?))
}

/// Attached cropper whose wrapper and viewport match the whole-pixel crop size.
fn prepare_cropper(min_size: f64) -> anyhow::Result<Cropper> {
    let mut cropper = Cropper::new();
    cropper.set_style_property(CROPPER_MIN_SIZE_VAR, &format!("{min_size}px"));
    let edge = f64::from(cropper.crop_size().context("Invalid --min-size")?);
    cropper.assign_slot(vec![Rect::new(0.0, 0.0, edge, edge)]);
    cropper.on_attach();
    Ok(cropper)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = AppConfig::default();
    let mut cropper = prepare_cropper(args.min_size.unwrap_or(config.crop_size))?;

    if let Some(format) = &args.format {
        cropper
            .attribute_changed("format", format)
            .await
            .context("Invalid --format")?;
    }
    if let Some(quality) = &args.quality {
        cropper
            .attribute_changed("quality", quality)
            .await
            .context("Invalid --quality")?;
    }
    cropper
        .attribute_changed("src", &args.src)
        .await
        .with_context(|| format!("Failed to load {}", args.src))?;

    if let Some(scale) = args.scale {
        cropper.scale_image(scale)?;
    }
    for (delta_x, delta_y) in &args.moves {
        cropper.move_draggable(*delta_x, *delta_y)?;
    }

    let file = cropper.crop_image().await?;
    cropper.on_detach();

    let output_dir = args.output.unwrap_or(config.output_dir);
    tokio::fs::create_dir_all(&output_dir)
        .await
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let path = output_dir.join(&file.name);
    tokio::fs::write(&path, &file.bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    log::info!("wrote {} ({})", path.display(), file.mime_type);
    println!("{}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_parse_with_signs_and_spaces() {
        assert_eq!(parse_delta("20,0").unwrap(), (20.0, 0.0));
        assert_eq!(parse_delta("-4.5, 3").unwrap(), (-4.5, 3.0));
        assert!(parse_delta("20").is_err());
        assert!(parse_delta("a,b").is_err());
    }

    #[test]
    fn fractional_min_size_uses_whole_pixel_viewport() {
        let cropper = prepare_cropper(100.5).unwrap();
        let edge = f64::from(cropper.crop_size().unwrap());
        assert_eq!(edge, 100.0);
        assert_eq!(cropper.stage().viewport_rect().unwrap(), Rect::new(0.0, 0.0, edge, edge));
        assert_eq!(cropper.stage().wrapper(), Rect::new(0.0, 0.0, edge, edge));
        assert!(cropper.is_attached());
    }

    #[test]
    fn unusable_min_size_is_rejected() {
        assert!(prepare_cropper(0.0).is_err());
    }

    #[test]
    fn repeated_moves_are_collected() {
        let args = Args::try_parse_from([
            "sigma-cropper",
            "in.png",
            "--move",
            "10,0",
            "--move",
            "-5,2",
            "--format",
            "png",
        ])
        .unwrap();
        assert_eq!(args.moves, vec![(10.0, 0.0), (-5.0, 2.0)]);
        assert_eq!(args.format.as_deref(), Some("png"));
        assert_eq!(args.min_size, None);
    }
}
