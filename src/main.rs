use anyhow::{Context, Result};
use multilingual_text::{config::Config, MultilingualText};
use std::io::Read;
use tracing::{debug, info};

/// Resolve a multilingual text payload under the configured viewing context.
///
/// Usage: `mltext [PAYLOAD_FILE]` (reads stdin when no file is given).
/// The resolved value is printed to stdout in the current wire shape.
fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays a clean payload
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("multilingual_text=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let ctx = config.view_context();
    debug!(?config, "Loaded configuration");

    let payload = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read payload file {}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read payload from stdin")?;
            buf
        }
    };

    let mut text = MultilingualText::from_json(&payload).context("Failed to decode payload")?;
    info!(translations = %text, "Decoded multilingual text");

    text.apply_translation_ctx(&ctx);
    info!(
        display = text.display(),
        second = text.second(),
        "Resolved multilingual text"
    );

    println!("{}", text.to_json().context("Failed to encode result")?);
    Ok(())
}
