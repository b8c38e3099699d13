use std::path::PathBuf;

use clap::{Parser, Subcommand};

use labelscan_extract::LabelExtractor;

#[derive(Debug, Parser)]
#[command(name = "labelscan-cli")]
#[command(about = "Run label extraction from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract a product record from a file of OCR text.
    ScanText {
        /// Path to a UTF-8 text file.
        file: PathBuf,
    },
    /// Extract a product record from an image file.
    ScanImage {
        /// Path to the image file.
        file: PathBuf,
        /// MIME type of the image (e.g. image/jpeg).
        #[arg(long, default_value = "image/jpeg")]
        mime_type: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = labelscan_core::load_app_config_from_env()?;
    let extractor = LabelExtractor::from_config(&config)
        .map_err(|e| anyhow::anyhow!("cannot build scan pipeline: {e}"))?;

    let outcome = match cli.command {
        Commands::ScanText { file } => {
            let text = std::fs::read_to_string(&file)?;
            extractor.scan_text(&text).await
        }
        Commands::ScanImage { file, mime_type } => {
            let bytes = std::fs::read(&file)?;
            extractor.scan_image(&bytes, &mime_type).await
        }
    };

    if outcome.failure.is_failure() {
        tracing::warn!(failure = ?outcome.failure, "scan did not complete cleanly");
    }
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
