use clap::Parser;
use listingmark::batch::{process_batch, BatchSummary, UploadItem};
use listingmark::config::Config;
use listingmark::watermark::{AssetLoader, ImageKind, WatermarkProcessor};
use std::path::PathBuf;

/// Listingmark - applies the brand watermark to listing photos and
/// produces upload-ready files with randomized object keys
#[derive(Parser, Debug)]
#[command(name = "listingmark")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Directory to write processed files to
    #[arg(short, long, default_value = "out")]
    output_dir: PathBuf,

    /// Bypass the watermark pipeline and pass files through unmodified
    #[arg(long)]
    no_watermark: bool,

    /// Image files to process
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging subsystem
    listingmark::logging::init_subscriber().expect("Failed to initialize logging subsystem");

    let args = Args::parse();

    let config = Config::from_file(&args.config).unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    tracing::info!(
        config_file = %args.config.display(),
        files = args.inputs.len(),
        opacity = config.watermark.opacity,
        width_percentage = config.watermark.width_percentage,
        enabled = config.enabled,
        "Configuration loaded successfully"
    );

    let catalog = config
        .asset_catalog()
        .map_err(|e| anyhow::anyhow!("Invalid asset configuration: {}", e))?;
    let loader = AssetLoader::new(catalog)?;
    let processor = WatermarkProcessor::new(loader, config.watermark)?;

    let watermark_enabled = config.enabled && !args.no_watermark;

    let mut items = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        // Media type inferred from the file extension
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        let media_type = match ImageKind::from_extension(&extension) {
            Ok(kind) => kind.content_type().to_string(),
            // Unsupported extensions fail per-file inside the pipeline
            Err(_) => "application/octet-stream".to_string(),
        };

        items.push(UploadItem {
            filename,
            media_type,
            data,
        });
    }

    tokio::fs::create_dir_all(&args.output_dir).await?;

    let outcomes = process_batch(&processor, items, watermark_enabled).await;

    for outcome in &outcomes {
        match &outcome.result {
            Ok(upload) => {
                let dest = args.output_dir.join(&upload.object_key);
                tokio::fs::write(&dest, &upload.data).await?;
                tracing::info!(
                    file = %outcome.filename,
                    object_key = %upload.object_key,
                    bytes = upload.data.len(),
                    watermarked = upload.watermarked,
                    "File processed"
                );
            }
            Err(e) => {
                tracing::error!(file = %outcome.filename, error = %e, "File failed");
            }
        }
    }

    let summary = BatchSummary::from_outcomes(&outcomes);
    tracing::info!(
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "{}",
        summary
    );

    if summary.failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}
