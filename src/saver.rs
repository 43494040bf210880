//! Save orchestration: the prompt-saver output node
//! Formats metadata, resolves the templated output path and writes each
//! image as a PNG with an embedded "parameters" text chunk.

use std::borrow::Cow;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::DynamicImage;
use log::info;
use serde::Serialize;

use crate::config::SaverConfig;
use crate::metadata::{self, SamplerParams};
use crate::pixels::ImageTensor;
use crate::resolver;

/// UI descriptor for one saved image, handed back to the host for display.
#[derive(Debug, Clone, Serialize)]
pub struct SaveResult {
    pub filename: String,
    pub subfolder: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Output node that writes prompt-stamped PNGs under the host output root.
pub struct PromptSaver {
    output_root: PathBuf,
}

impl PromptSaver {
    /// Node category shown by the host.
    pub const CATEGORY: &'static str = "image";
    /// Display name registered with the host.
    pub const DISPLAY_NAME: &'static str = "Flux Prompt Saver";

    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }

    pub fn from_config(config: &SaverConfig) -> Self {
        Self::new(&config.output_root)
    }

    /// Save every image in the batch and return one UI descriptor per file.
    ///
    /// The metadata block is formatted once from the first parameter set.
    /// Each image re-resolves the template with its own dimensions, so its
    /// counter accounts for files written earlier in the same batch. A
    /// containment violation aborts the call before anything is written;
    /// a later I/O failure can leave earlier images on disk.
    #[allow(clippy::too_many_arguments)]
    pub fn save_images(
        &self,
        images: &[ImageTensor],
        params: &[SamplerParams],
        positive: &str,
        negative: &str,
        model_name: &str,
        save_path: &str,
        filename: &str,
    ) -> Result<Vec<SaveResult>> {
        let first = params.first().context("no sampler parameters supplied")?;
        let parameters = metadata::format_parameters(params, positive, negative, model_name)?;

        let template = if save_path.is_empty() {
            filename.to_string()
        } else {
            Path::new(save_path)
                .join(filename)
                .to_string_lossy()
                .into_owned()
        };

        let mut results = Vec::with_capacity(images.len());
        for image in images {
            let resolved = resolver::resolve(
                &template,
                &self.output_root,
                image.width,
                image.height,
                first.seed,
            )?;
            let file_name = format!("{}_{:05}.png", resolved.prefix, resolved.counter);
            let path = resolved.directory.join(&file_name);

            let buffer = image.to_image()?;
            write_png(&path, &buffer, &parameters)
                .with_context(|| format!("Failed to write image: {}", path.display()))?;
            info!("Saved {}", path.display());

            results.push(SaveResult {
                filename: file_name,
                subfolder: resolved.subfolder,
                kind: "output".to_string(),
            });
        }

        Ok(results)
    }
}

/// Host display payload for a completed save call.
pub fn ui_payload(results: &[SaveResult]) -> serde_json::Value {
    serde_json::json!({ "ui": { "images": results } })
}

/// Write `image` as an 8-bit PNG with a single `parameters` text chunk.
///
/// Latin-1 metadata goes into a tEXt chunk, anything wider into iTXt,
/// matching what generation-metadata readers expect.
fn write_png(path: &Path, image: &DynamicImage, parameters: &str) -> crate::error::Result<()> {
    let (color, width, height, raw): (png::ColorType, u32, u32, Cow<'_, [u8]>) = match image {
        DynamicImage::ImageRgb8(img) => (
            png::ColorType::Rgb,
            img.width(),
            img.height(),
            Cow::Borrowed(img.as_raw()),
        ),
        DynamicImage::ImageRgba8(img) => (
            png::ColorType::Rgba,
            img.width(),
            img.height(),
            Cow::Borrowed(img.as_raw()),
        ),
        other => {
            let rgb = other.to_rgb8();
            (
                png::ColorType::Rgb,
                rgb.width(),
                rgb.height(),
                Cow::Owned(rgb.into_raw()),
            )
        }
    };

    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(color);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Best);
    if parameters.chars().all(|c| (c as u32) < 0x100) {
        encoder.add_text_chunk("parameters".to_string(), parameters.to_string())?;
    } else {
        encoder.add_itxt_chunk("parameters".to_string(), parameters.to_string())?;
    }

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&raw)?;
    writer.finish()?;
    Ok(())
}
