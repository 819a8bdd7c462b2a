use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::DynamicImage;
use log::{debug, info, warn};

use super::fragments::{self, PageFragments};
use super::PageLayout;
use crate::config::{LayoutConfig, PreprocessingOptions};
use crate::enhance::{deskew, enhance_with_report, resize_to_width, EnhanceOptions};
use crate::error::ScanError;
use crate::geometry::Rect;
use crate::model::TextFragment;

/// Represents the source of a page image
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Image from a file path
    Path(String),
    /// Image as base64-encoded data
    Base64(String),
    /// Image already decoded in memory
    Decoded(DynamicImage),
}

impl ImageSource {
    fn describe(&self) -> &str {
        match self {
            ImageSource::Path(path) => path,
            ImageSource::Base64(_) => "base64-image",
            ImageSource::Decoded(_) => "in-memory image",
        }
    }
}

/// Text recognition engine the image pipeline hands prepared pages to.
///
/// Fragment bounds must be in pixels of the image passed in, with the
/// origin at the bottom-left corner. Engines reporting top-left boxes can
/// convert with [`Rect::flipped_within`].
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    async fn recognize(&self, image: &DynamicImage) -> Result<Vec<TextFragment>, ScanError>;

    /// Page tilt in radians, counter-clockwise, if the engine can tell.
    async fn estimate_skew(&self, _image: &DynamicImage) -> Option<f32> {
        None
    }
}

/// Loads and decodes a page image
pub async fn load(source: &ImageSource) -> Result<DynamicImage, ScanError> {
    match source {
        ImageSource::Path(path) => {
            let bytes = tokio::fs::read(path).await?;
            Ok(image::load_from_memory(&bytes)?)
        }
        ImageSource::Base64(data) => {
            let bytes = STANDARD.decode(strip_data_url(data).trim())?;
            Ok(image::load_from_memory(&bytes)?)
        }
        ImageSource::Decoded(image) => Ok(image.clone()),
    }
}

/// Drops a `data:image/...;base64,` prefix if present.
fn strip_data_url(data: &str) -> &str {
    match data.split_once(";base64,") {
        Some((prefix, payload)) if prefix.starts_with("data:") => payload,
        _ => data,
    }
}

/// Scales, straightens and enhances one page. CPU-bound.
pub fn prepare_page(
    image: DynamicImage,
    skew: Option<f32>,
    preprocessing: &PreprocessingOptions,
    enhancement: &EnhanceOptions,
) -> DynamicImage {
    let mut image = resize_to_width(image, preprocessing.target_width);

    if preprocessing.deskew_image {
        if let Some(angle) = skew {
            image = deskew(image, angle);
        }
    }

    if !preprocessing.enhance_image {
        return image;
    }

    let options = enhancement.with_preprocessing(preprocessing);
    let (enhanced, report) = enhance_with_report(&image, &options);
    for skipped in &report.skipped {
        warn!("Skipped {} step: {}", skipped.step, skipped.reason);
    }
    enhanced
}

/// Runs every page through preparation, recognition and layout.
///
/// Pages are prepared in parallel on the blocking pool, recognized one
/// after another, and returned in input order.
pub async fn process(
    sources: &[ImageSource],
    recognizer: &dyn TextRecognizer,
    preprocessing: &PreprocessingOptions,
    enhancement: &EnhanceOptions,
    layout: &LayoutConfig,
) -> Result<Vec<PageLayout>, ScanError> {
    let mut handles = Vec::with_capacity(sources.len());
    for source in sources {
        debug!("Loading page image from {}", source.describe());
        let image = load(source).await?;
        let skew = if preprocessing.deskew_image {
            recognizer.estimate_skew(&image).await
        } else {
            None
        };

        let preprocessing = *preprocessing;
        let enhancement = *enhancement;
        handles.push(tokio::task::spawn_blocking(move || {
            prepare_page(image, skew, &preprocessing, &enhancement)
        }));
    }

    let mut pages = Vec::with_capacity(handles.len());
    for (page_index, handle) in handles.into_iter().enumerate() {
        let image = handle.await?;
        let page = Rect::new(0.0, 0.0, image.width() as f64, image.height() as f64);

        let recognized: Vec<TextFragment> = recognizer
            .recognize(&image)
            .await?
            .into_iter()
            .map(|fragment| fragment.on_page(page_index))
            .collect();
        info!(
            "Recognized {} fragments on page {}",
            recognized.len(),
            page_index
        );

        pages.push(fragments::process(
            page_index,
            &PageFragments::new(page, recognized),
            preprocessing,
            layout,
        ));
    }

    Ok(pages)
}
