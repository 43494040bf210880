//! Generation-parameter metadata formatting

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One sampler parameter set, as handed over by the host pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplerParams {
    pub sampler: String,
    pub scheduler: String,
    pub steps: u32,
    pub seed: u64,
    pub width: u32,
    pub height: u32,
    /// Hash of the checkpoint the image was sampled from, when known.
    #[serde(default)]
    pub model_hash: String,
}

/// Render the embeddable "parameters" text block for a saved image.
///
/// Only the first parameter set is consumed; an empty slice is an error.
/// The scheduler is folded into the sampler label unless it is "normal".
/// CFG scale is always reported as 1.0. Prompt text is interpolated
/// verbatim, embedded newlines included.
pub fn format_parameters(
    params: &[SamplerParams],
    positive: &str,
    negative: &str,
    model_name: &str,
) -> Result<String> {
    let p = params.first().context("no sampler parameters supplied")?;
    let sampler_label = if p.scheduler != "normal" {
        format!("{}_{}", p.sampler, p.scheduler)
    } else {
        p.sampler.clone()
    };
    Ok(format!(
        "{}\nNegative prompt: {}\nSteps: {}, Sampler: {}, CFG scale: 1.0, Seed: {}, \
         Size: {}x{}, Model hash: {}, Model: {}, Version: ComfyUI",
        positive,
        negative,
        p.steps,
        sampler_label,
        p.seed,
        p.width,
        p.height,
        p.model_hash,
        model_name
    ))
}
