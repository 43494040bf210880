//! Generate gradient test images and push them through the save pipeline.
//! Small smoke harness for the prompt saver node.

use anyhow::Result;
use flux_prompt_saver::{ImageTensor, PromptSaver, SamplerParams};

const TEST_PROMPTS: &[&str] = &[
    "a majestic mountain landscape at sunset",
    "a futuristic city with neon lights",
    "a serene forest with morning mist",
];

fn main() -> Result<()> {
    flux_prompt_saver::logging::init_logger();

    let saver = PromptSaver::new("output");

    for (idx, prompt) in TEST_PROMPTS.iter().enumerate() {
        let image = gradient_image(256, 256, idx);
        let params = vec![SamplerParams {
            sampler: "euler".to_string(),
            scheduler: "normal".to_string(),
            steps: 20,
            seed: 42 + idx as u64,
            width: 256,
            height: 256,
            model_hash: String::new(),
        }];

        let results = saver.save_images(
            &[image],
            &params,
            prompt,
            "",
            "demo.safetensors",
            "demo",
            "demo_%date:yyyy-MM-dd%_%seed%",
        )?;

        for result in &results {
            println!("Saved {}/{}", result.subfolder, result.filename);
        }
    }

    println!("\nAll demo images generated successfully!");
    Ok(())
}

fn gradient_image(width: u32, height: u32, idx: usize) -> ImageTensor {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.push(x as f32 / width as f32);
            data.push(y as f32 / height as f32);
            data.push((idx as f32 * 0.3).min(1.0));
        }
    }
    ImageTensor::new(width, height, 3, data)
}
