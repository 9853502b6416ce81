//! End-to-end pipeline tests: classification, variant selection,
//! scaling, placement, re-encoding, and batch behavior.

use image::{Rgba, RgbaImage};
use listingmark::batch::{process_batch, BatchSummary, UploadItem};
use listingmark::watermark::{
    AssetCatalog, AssetLoader, AssetSource, ImageKind, SourceImage, WatermarkError,
    WatermarkOptions, WatermarkProcessor,
};
use std::io::Cursor;
use std::path::Path;

fn encode(img: RgbaImage, format: image::ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, format)
        .unwrap();
    buf.into_inner()
}

/// Write the two mark fixtures: standard is solid dark, light is solid
/// white. Both are 100x50 (2:1 aspect).
fn write_marks(dir: &Path) {
    let standard = RgbaImage::from_pixel(100, 50, Rgba([0, 0, 0, 255]));
    let light = RgbaImage::from_pixel(100, 50, Rgba([255, 255, 255, 255]));
    std::fs::write(
        dir.join("mark.png"),
        encode(standard, image::ImageFormat::Png),
    )
    .unwrap();
    std::fs::write(
        dir.join("mark-light.png"),
        encode(light, image::ImageFormat::Png),
    )
    .unwrap();
}

fn fixture_processor(dir: &Path, options: WatermarkOptions) -> WatermarkProcessor {
    write_marks(dir);
    let loader = AssetLoader::new(AssetCatalog {
        standard: AssetSource::Path(dir.join("mark.png")),
        light: AssetSource::Path(dir.join("mark-light.png")),
    })
    .unwrap();
    WatermarkProcessor::new(loader, options).unwrap()
}

#[tokio::test]
async fn opaque_jpeg_default_config_scenario() {
    // 1000x800 opaque JPEG, default config: output is a 1000x800 JPEG,
    // mark 600px wide (60% of 1000), 300px tall (2:1 asset), centered
    // at x=200, y=250.
    let dir = tempfile::tempdir().unwrap();
    let processor = fixture_processor(dir.path(), WatermarkOptions::default());

    let base = RgbaImage::from_pixel(1000, 800, Rgba([255, 255, 255, 255]));
    let source = SourceImage {
        data: encode(base, image::ImageFormat::Jpeg),
        media_type: "image/jpeg".to_string(),
    };

    let result = processor.process(&source).await.unwrap();
    assert_eq!(result.kind, ImageKind::Jpeg);
    assert_eq!(result.width, 1000);
    assert_eq!(result.height, 800);
    assert_eq!(&result.data[0..2], &[0xFF, 0xD8]);

    let output = image::load_from_memory(&result.data).unwrap().to_rgba8();
    assert_eq!(output.dimensions(), (1000, 800));

    // Inside the mark: darkened by the 0.4-opacity black overlay
    assert!(output.get_pixel(500, 400)[0] < 220);
    // Left of x=200 and above y=250: untouched white (JPEG tolerance)
    assert!(output.get_pixel(150, 400)[0] > 230);
    assert!(output.get_pixel(500, 100)[0] > 230);
    // Just inside the left edge of the mark
    assert!(output.get_pixel(220, 400)[0] < 220);
}

#[tokio::test]
async fn transparent_png_selects_light_variant_at_eighty_percent() {
    // 500x500 PNG with a transparent corner pixel: light asset, 400px
    // wide (80% of 500), centered at x=50.
    let dir = tempfile::tempdir().unwrap();
    let processor = fixture_processor(dir.path(), WatermarkOptions::default());

    let mut base = RgbaImage::from_pixel(500, 500, Rgba([10, 10, 10, 255]));
    base.put_pixel(499, 499, Rgba([10, 10, 10, 0]));
    let source = SourceImage {
        data: encode(base, image::ImageFormat::Png),
        media_type: "image/png".to_string(),
    };

    let result = processor.process(&source).await.unwrap();
    assert_eq!(result.kind, ImageKind::Png);
    assert_eq!((result.width, result.height), (500, 500));

    let output = image::load_from_memory(&result.data).unwrap().to_rgba8();
    // Center row: brightened by the white light mark
    assert!(output.get_pixel(250, 250)[0] > 50);
    // x=70 is inside the 80% mark (starts at 50) but would be outside a
    // 60% mark (which would start at 100): proves the width override
    assert!(output.get_pixel(70, 250)[0] > 50);
    // x=30 is left of the mark
    assert!(output.get_pixel(30, 250)[0] < 30);
}

#[tokio::test]
async fn caller_width_honored_for_opaque_images() {
    let dir = tempfile::tempdir().unwrap();
    let options = WatermarkOptions {
        width_percentage: 30.0,
        ..Default::default()
    };
    let processor = fixture_processor(dir.path(), options);

    // 400x400 opaque: mark 120px wide, centered at x=140
    let base = RgbaImage::from_pixel(400, 400, Rgba([255, 255, 255, 255]));
    let source = SourceImage {
        data: encode(base, image::ImageFormat::Png),
        media_type: "image/png".to_string(),
    };

    let result = processor.process(&source).await.unwrap();
    let output = image::load_from_memory(&result.data).unwrap().to_rgba8();

    assert!(output.get_pixel(200, 200)[0] < 220);
    // x=120 is outside a 30% mark but inside a 60% one
    assert_eq!(output.get_pixel(120, 200)[0], 255);
}

#[tokio::test]
async fn dimension_preservation_is_idempotent() {
    // Watermark-on-watermark still yields the original WxH
    let dir = tempfile::tempdir().unwrap();
    let processor = fixture_processor(dir.path(), WatermarkOptions::default());

    let base = RgbaImage::from_pixel(320, 240, Rgba([200, 200, 200, 255]));
    let source = SourceImage {
        data: encode(base, image::ImageFormat::Png),
        media_type: "image/png".to_string(),
    };

    let first = processor.process(&source).await.unwrap();
    let second = processor
        .process(&SourceImage {
            data: first.data.clone(),
            media_type: "image/png".to_string(),
        })
        .await
        .unwrap();

    assert_eq!((first.width, first.height), (320, 240));
    assert_eq!((second.width, second.height), (320, 240));
}

#[tokio::test]
async fn missing_asset_rejects_without_partial_output() {
    let dir = tempfile::tempdir().unwrap();
    let loader = AssetLoader::new(AssetCatalog {
        standard: AssetSource::Path(dir.path().join("nope.png")),
        light: AssetSource::Path(dir.path().join("nope-light.png")),
    })
    .unwrap();
    let processor = WatermarkProcessor::new(loader, WatermarkOptions::default()).unwrap();

    let base = RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255]));
    let source = SourceImage {
        data: encode(base, image::ImageFormat::Png),
        media_type: "image/png".to_string(),
    };

    let result = processor.process(&source).await;
    assert!(matches!(result, Err(WatermarkError::AssetLoad { .. })));
}

#[tokio::test]
async fn remote_asset_404_rejects_without_partial_output() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    // Local listener answering one request with a canned 404
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(b"HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
                .await;
            let _ = socket.shutdown().await;
        }
    });

    // Https sources are struct-constructed; the test listener speaks
    // plain HTTP, which parse() would refuse
    let loader = AssetLoader::new(AssetCatalog {
        standard: AssetSource::Https(format!("http://{}/mark.png", addr)),
        light: AssetSource::Https(format!("http://{}/mark-light.png", addr)),
    })
    .unwrap();
    let processor = WatermarkProcessor::new(loader, WatermarkOptions::default()).unwrap();

    let base = RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255]));
    let source = SourceImage {
        data: encode(base, image::ImageFormat::Png),
        media_type: "image/png".to_string(),
    };

    // The operation rejects with an asset error; no unwatermarked blob
    // is ever produced in its place
    let result = processor.process(&source).await;
    match result {
        Err(WatermarkError::AssetLoad { .. }) => {}
        other => panic!("expected AssetLoad error, got {:?}", other.map(|r| r.kind)),
    }
}

#[tokio::test]
async fn batch_with_one_corrupt_file_reports_independently() {
    // 3 files submitted concurrently, one with a corrupt header:
    // exactly 2 succeed, 1 fails with a decode error.
    let dir = tempfile::tempdir().unwrap();
    let processor = fixture_processor(dir.path(), WatermarkOptions::default());

    let good = |name: &str| UploadItem {
        filename: name.to_string(),
        media_type: "image/png".to_string(),
        data: encode(
            RgbaImage::from_pixel(80, 80, Rgba([128, 64, 32, 255])),
            image::ImageFormat::Png,
        ),
    };
    let corrupt = UploadItem {
        filename: "corrupt.png".to_string(),
        media_type: "image/png".to_string(),
        data: vec![0x89, 0x50, 0x4E, 0x47, 0xDE, 0xAD, 0xBE, 0xEF],
    };

    let outcomes = process_batch(
        &processor,
        vec![good("a.png"), corrupt, good("b.png")],
        true,
    )
    .await;

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].result.is_ok());
    assert!(matches!(
        outcomes[1].result,
        Err(WatermarkError::Decode { .. })
    ));
    assert!(outcomes[2].result.is_ok());

    let summary = BatchSummary::from_outcomes(&outcomes);
    assert_eq!(summary.to_string(), "2 of 3 files uploaded; 1 failed");
}

#[tokio::test]
async fn webp_source_stays_webp() {
    let dir = tempfile::tempdir().unwrap();
    let processor = fixture_processor(dir.path(), WatermarkOptions::default());

    let base = RgbaImage::from_pixel(64, 64, Rgba([100, 100, 100, 255]));
    let source = SourceImage {
        data: encode(base, image::ImageFormat::WebP),
        media_type: "image/webp".to_string(),
    };

    let result = processor.process(&source).await.unwrap();
    assert_eq!(result.kind, ImageKind::WebP);
    assert_eq!(&result.data[0..4], b"RIFF");
    assert_eq!(&result.data[8..12], b"WEBP");
}

#[tokio::test]
async fn tiny_image_classifies_and_composites() {
    // Sub-2x2 images are legal; sample positions coincide
    let dir = tempfile::tempdir().unwrap();
    let processor = fixture_processor(dir.path(), WatermarkOptions::default());

    let base = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));
    let source = SourceImage {
        data: encode(base, image::ImageFormat::Png),
        media_type: "image/png".to_string(),
    };

    let result = processor.process(&source).await.unwrap();
    assert_eq!((result.width, result.height), (1, 1));
}
