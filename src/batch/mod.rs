//! Concurrent batch processing of uploads.
//!
//! A batch of files (e.g. a user selecting several photos at once) is
//! processed as independent concurrent tasks. Each file gets its own
//! pipeline run with its own buffers; there is no ordering guarantee
//! between tasks while they run, but outcomes are returned in input
//! order so callers keep the input index association. One file's
//! failure never aborts its siblings.
//!
//! The caller owns a watermark on/off switch; when off, the source
//! bytes pass through unmodified but are still assigned an object key.

use futures::future::join_all;

use crate::watermark::{
    CompositeResult, ImageKind, SourceImage, WatermarkError, WatermarkProcessor,
};

/// One file submitted for upload.
#[derive(Debug, Clone)]
pub struct UploadItem {
    /// Original filename; used only for extension-preserving naming
    /// and for per-file reporting.
    pub filename: String,
    /// Declared media type (e.g. "image/jpeg").
    pub media_type: String,
    /// Raw encoded bytes.
    pub data: Vec<u8>,
}

/// An upload-ready blob with its generated object key.
#[derive(Debug, Clone)]
pub struct NamedUpload {
    /// Randomized object key (token + timestamp, extension preserved).
    pub object_key: String,
    /// Content-Type for upload metadata.
    pub content_type: String,
    /// The bytes to persist.
    pub data: Vec<u8>,
    /// Whether the watermark pipeline ran (false when bypassed).
    pub watermarked: bool,
}

/// Per-file outcome of a batch run.
#[derive(Debug)]
pub struct UploadOutcome {
    pub filename: String,
    pub result: Result<NamedUpload, WatermarkError>,
}

/// Aggregate counts for a batch, for "N of M uploaded" reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of {} files uploaded; {} failed",
            self.succeeded, self.total, self.failed
        )
    }
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[UploadOutcome]) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.result.is_ok()).count();
        Self {
            total: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
        }
    }
}

/// Generate a randomized object key preserving the file extension.
pub fn generate_object_key(extension: &str) -> String {
    format!(
        "{}-{}.{}",
        uuid::Uuid::new_v4().simple(),
        chrono::Utc::now().timestamp_millis(),
        extension
    )
}

fn extension_for(item: &UploadItem) -> String {
    match ImageKind::from_media_type(&item.media_type) {
        Ok(kind) => kind.extension().to_string(),
        // Fall back to the filename's own extension for reporting paths
        Err(_) => item
            .filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_else(|| "bin".to_string()),
    }
}

/// Process a batch of uploads concurrently.
///
/// Every item runs as an independent future; outcomes are returned in
/// input order. When `watermark_enabled` is false the entire pipeline
/// is bypassed and each item passes through unmodified.
pub async fn process_batch(
    processor: &WatermarkProcessor,
    items: Vec<UploadItem>,
    watermark_enabled: bool,
) -> Vec<UploadOutcome> {
    let tasks = items.into_iter().map(|item| async move {
        let filename = item.filename.clone();
        let result = process_one(processor, item, watermark_enabled).await;

        if let Err(ref e) = result {
            tracing::warn!(file = %filename, error = %e, "Upload preprocessing failed");
        }

        UploadOutcome { filename, result }
    });

    join_all(tasks).await
}

async fn process_one(
    processor: &WatermarkProcessor,
    item: UploadItem,
    watermark_enabled: bool,
) -> Result<NamedUpload, WatermarkError> {
    let extension = extension_for(&item);

    if !watermark_enabled {
        return Ok(NamedUpload {
            object_key: generate_object_key(&extension),
            content_type: item.media_type,
            data: item.data,
            watermarked: false,
        });
    }

    let source = SourceImage {
        data: item.data,
        media_type: item.media_type,
    };
    let composite: CompositeResult = processor.process(&source).await?;

    Ok(NamedUpload {
        object_key: generate_object_key(composite.kind.extension()),
        content_type: composite.content_type().to_string(),
        data: composite.data,
        watermarked: true,
    })
}
