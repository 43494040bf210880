//! Prompt-stamped PNG saver node for image-generation pipeline hosts.
//! Resolves templated output paths under a contained output root and embeds
//! the generation parameters into every saved file.

pub mod config;
pub mod error;
pub mod metadata;
pub mod pixels;
pub mod resolver;
pub mod saver;
pub mod template;

// Re-export common types
pub use config::{load_config, SaverConfig};
pub use error::SaverError;
pub use metadata::{format_parameters, SamplerParams};
pub use pixels::ImageTensor;
pub use resolver::{resolve, ResolvedPath};
pub use saver::{ui_payload, PromptSaver, SaveResult};

pub mod logging {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    pub fn init_logger() {
        Builder::new()
            .format(|buf, record| {
                writeln!(
                    buf,
                    "{} [{}] - {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                    record.level(),
                    record.args()
                )
            })
            .filter(None, LevelFilter::Info)
            .init();
    }
}
