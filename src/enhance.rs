//! Page image clean-up ahead of text recognition.
//!
//! [`enhance`] runs a fixed filter chain: grayscale, contrast, sharpen,
//! denoise, then adaptive thresholding. A step that cannot run on its input
//! is skipped and the chain carries on with the image it had; nothing here
//! returns an error.

use image::imageops::FilterType;
use image::{DynamicImage, ImageBuffer, Pixel, Rgb};
use imageproc::filter::{gaussian_blur_f32, median_filter};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::PreprocessingOptions;
use crate::geometry::Rect;

/// Blur radius used to sharpen.
const SHARPEN_SIGMA: f32 = 1.0;
/// Blur radius of the local background estimate for thresholding.
const THRESHOLD_SIGMA: f32 = 5.0;
const THRESHOLD_CONTRAST: f32 = 2.0;
const THRESHOLD_BRIGHTNESS: f32 = 0.2;
/// Denoise level to median radius.
const DENOISE_RADIUS_SCALE: f32 = 50.0;
const MAX_DENOISE_RADIUS: u32 = 3;
/// Rotations below this many degrees are left alone.
const MIN_DESKEW_DEGREES: f32 = 0.5;

/// Filter chain settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnhanceOptions {
    #[serde(default = "default_true")]
    pub grayscale: bool,
    /// Contrast multiplier around mid-gray; 1.0 leaves the image unchanged
    #[serde(default = "default_contrast_boost")]
    pub contrast_boost: f32,
    /// Unsharp-mask strength; 0 disables sharpening
    #[serde(default = "default_sharpen_amount")]
    pub sharpen_amount: f32,
    /// Median-filter strength; 0 disables denoising
    #[serde(default = "default_denoise_level")]
    pub denoise_level: f32,
    #[serde(default = "default_true")]
    pub adaptive_threshold: bool,
}

impl Default for EnhanceOptions {
    fn default() -> Self {
        Self {
            grayscale: true,
            contrast_boost: default_contrast_boost(),
            sharpen_amount: default_sharpen_amount(),
            denoise_level: default_denoise_level(),
            adaptive_threshold: true,
        }
    }
}

impl EnhanceOptions {
    /// Applies the grayscale and threshold switches of `preprocessing`.
    pub fn with_preprocessing(mut self, preprocessing: &PreprocessingOptions) -> Self {
        self.grayscale = preprocessing.convert_to_grayscale;
        self.adaptive_threshold = preprocessing.apply_thresholding;
        self
    }
}

fn default_true() -> bool {
    true
}

fn default_contrast_boost() -> f32 {
    1.3
}

fn default_sharpen_amount() -> f32 {
    0.5
}

fn default_denoise_level() -> f32 {
    0.02
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnhanceStep {
    Grayscale,
    Contrast,
    Sharpen,
    Denoise,
    AdaptiveThreshold,
}

impl fmt::Display for EnhanceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EnhanceStep::Grayscale => "grayscale",
            EnhanceStep::Contrast => "contrast",
            EnhanceStep::Sharpen => "sharpen",
            EnhanceStep::Denoise => "denoise",
            EnhanceStep::AdaptiveThreshold => "adaptive threshold",
        };
        f.write_str(name)
    }
}

/// A step left out of the chain and the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedStep {
    pub step: EnhanceStep,
    pub reason: String,
}

/// What the filter chain did to one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnhanceReport {
    pub applied: Vec<EnhanceStep>,
    pub skipped: Vec<SkippedStep>,
}

impl EnhanceReport {
    fn skip(&mut self, step: EnhanceStep, reason: impl Into<String>) {
        self.skipped.push(SkippedStep {
            step,
            reason: reason.into(),
        });
    }
}

/// Runs the filter chain and returns the enhanced image.
pub fn enhance(image: &DynamicImage, options: &EnhanceOptions) -> DynamicImage {
    enhance_with_report(image, options).0
}

/// Runs the filter chain, also reporting applied and skipped steps.
pub fn enhance_with_report(
    image: &DynamicImage,
    options: &EnhanceOptions,
) -> (DynamicImage, EnhanceReport) {
    let mut report = EnhanceReport::default();

    let enhanced = if options.grayscale {
        report.applied.push(EnhanceStep::Grayscale);
        DynamicImage::ImageLuma8(run_chain(image.to_luma8(), options, &mut report))
    } else {
        DynamicImage::ImageRgb8(run_chain(image.to_rgb8(), options, &mut report))
    };

    debug!(
        "Enhanced {}x{} image: applied {:?}, skipped {}",
        enhanced.width(),
        enhanced.height(),
        report.applied,
        report.skipped.len()
    );
    (enhanced, report)
}

fn run_chain<P>(
    mut image: ImageBuffer<P, Vec<u8>>,
    options: &EnhanceOptions,
    report: &mut EnhanceReport,
) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    let empty = image.width() == 0 || image.height() == 0;

    if options.contrast_boost != 1.0 {
        if !options.contrast_boost.is_finite() || options.contrast_boost < 0.0 {
            report.skip(EnhanceStep::Contrast, "contrast must be a non-negative number");
        } else {
            adjust_contrast(&mut image, options.contrast_boost, 0.0);
            report.applied.push(EnhanceStep::Contrast);
        }
    }

    if options.sharpen_amount != 0.0 {
        if empty {
            report.skip(EnhanceStep::Sharpen, "image has no pixels");
        } else if !options.sharpen_amount.is_finite() || options.sharpen_amount < 0.0 {
            report.skip(EnhanceStep::Sharpen, "amount must be a non-negative number");
        } else {
            let blurred = gaussian_blur_f32(&image, SHARPEN_SIGMA);
            let amount = options.sharpen_amount;
            for (value, soft) in image.iter_mut().zip(blurred.iter()) {
                let original = *value as f32;
                *value = to_channel(original + amount * (original - *soft as f32));
            }
            report.applied.push(EnhanceStep::Sharpen);
        }
    }

    if options.denoise_level != 0.0 {
        if empty {
            report.skip(EnhanceStep::Denoise, "image has no pixels");
        } else if !options.denoise_level.is_finite() || options.denoise_level < 0.0 {
            report.skip(EnhanceStep::Denoise, "level must be a non-negative number");
        } else {
            let radius = ((options.denoise_level * DENOISE_RADIUS_SCALE).ceil() as u32)
                .clamp(1, MAX_DENOISE_RADIUS);
            image = median_filter(&image, radius, radius);
            report.applied.push(EnhanceStep::Denoise);
        }
    }

    if options.adaptive_threshold {
        if empty {
            report.skip(EnhanceStep::AdaptiveThreshold, "image has no pixels");
        } else {
            let background = gaussian_blur_f32(&image, THRESHOLD_SIGMA);
            for (value, local) in image.iter_mut().zip(background.iter()) {
                *value = value.saturating_sub(*local);
            }
            adjust_contrast(&mut image, THRESHOLD_CONTRAST, THRESHOLD_BRIGHTNESS);
            report.applied.push(EnhanceStep::AdaptiveThreshold);
        }
    }

    image
}

/// Scales every channel around mid-gray, then shifts it by `brightness`
/// (a share of full range).
fn adjust_contrast<P>(image: &mut ImageBuffer<P, Vec<u8>>, contrast: f32, brightness: f32)
where
    P: Pixel<Subpixel = u8>,
{
    for value in image.iter_mut() {
        let normalized = *value as f32 / 255.0;
        *value = to_channel(((normalized - 0.5) * contrast + 0.5 + brightness) * 255.0);
    }
}

fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Scales the image down to `target_width`, keeping its aspect ratio.
/// Narrower images are returned unchanged.
pub fn resize_to_width(image: DynamicImage, target_width: u32) -> DynamicImage {
    if target_width == 0 || image.width() <= target_width {
        return image;
    }
    let scale = target_width as f64 / image.width() as f64;
    let height = ((image.height() as f64 * scale).round() as u32).max(1);
    debug!(
        "Resizing {}x{} to {}x{}",
        image.width(),
        image.height(),
        target_width,
        height
    );
    image.resize_exact(target_width, height, FilterType::CatmullRom)
}

/// Cuts the part of `image` covered by `bounds`.
///
/// `bounds` is in y-up page coordinates of `page`; the page maps onto the
/// whole image. The region is clamped to the image, and `None` is returned
/// when nothing is left.
pub fn crop_zone(image: &DynamicImage, bounds: &Rect, page: &Rect) -> Option<DynamicImage> {
    if page.is_empty() {
        return None;
    }
    let region = bounds.intersection(page).normalized_within(page);
    let (width, height) = (image.width() as f64, image.height() as f64);

    let left = (region.left() * width).floor().clamp(0.0, width);
    let right = (region.right() * width).ceil().clamp(0.0, width);
    let top = ((1.0 - region.top()) * height).floor().clamp(0.0, height);
    let bottom = ((1.0 - region.bottom()) * height).ceil().clamp(0.0, height);

    let crop_width = (right - left) as u32;
    let crop_height = (bottom - top) as u32;
    if crop_width == 0 || crop_height == 0 {
        return None;
    }
    Some(image.crop_imm(left as u32, top as u32, crop_width, crop_height))
}

/// Median of the reported baseline angles, in radians.
pub fn estimate_skew(angles: &[f32]) -> Option<f32> {
    let mut angles: Vec<f32> = angles.iter().copied().filter(|a| a.is_finite()).collect();
    if angles.is_empty() {
        return None;
    }
    angles.sort_by(f32::total_cmp);
    let middle = angles.len() / 2;
    if angles.len() % 2 == 0 {
        Some((angles[middle - 1] + angles[middle]) / 2.0)
    } else {
        Some(angles[middle])
    }
}

/// Rotates the page so a baseline tilted by `angle` radians (counter-
/// clockwise as seen) becomes level. Tilts of half a degree or less are
/// ignored. Uncovered corners are filled with white.
pub fn deskew(image: DynamicImage, angle: f32) -> DynamicImage {
    if !angle.is_finite() || angle.to_degrees().abs() <= MIN_DESKEW_DEGREES {
        return image;
    }
    debug!("Deskewing by {:.2} degrees", angle.to_degrees());
    let rgb = image.to_rgb8();
    DynamicImage::ImageRgb8(rotate_about_center(
        &rgb,
        angle,
        Interpolation::Bilinear,
        Rgb([255u8, 255u8, 255u8]),
    ))
}
