use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::enhance::EnhanceOptions;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ScanConfig {
    /// Named preprocessing preset; overrides `preprocessing` when set
    #[serde(default)]
    pub preset: Option<Preset>,
    /// Individually configured preprocessing switches
    #[serde(default)]
    pub preprocessing: PreprocessingOptions,
    /// Filter chain settings for image enhancement
    #[serde(default)]
    pub enhancement: EnhanceOptions,
    /// Thresholds used when turning fragments into lines
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Preprocessing switches applied to every page image before recognition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreprocessingOptions {
    /// Split the page into title/ingredient/instruction zones
    #[serde(default = "default_true")]
    pub auto_detect_zones: bool,
    /// Report the text rectangles inside each zone
    #[serde(default = "default_true")]
    pub detect_text_regions: bool,
    /// Run the enhancement filter chain
    #[serde(default = "default_true")]
    pub enhance_image: bool,
    /// Convert to grayscale before the other filters
    #[serde(default = "default_true")]
    pub convert_to_grayscale: bool,
    /// Apply adaptive thresholding at the end of the chain
    #[serde(default = "default_true")]
    pub apply_thresholding: bool,
    /// Straighten rotated pages
    #[serde(default = "default_true")]
    pub deskew_image: bool,
    /// Pages wider than this are scaled down (aspect ratio kept)
    #[serde(default = "default_target_width")]
    pub target_width: u32,
    /// Zones below this confidence are discarded
    #[serde(default = "default_minimum_zone_confidence")]
    pub minimum_zone_confidence: f32,
}

impl Default for PreprocessingOptions {
    fn default() -> Self {
        Self {
            auto_detect_zones: true,
            detect_text_regions: true,
            enhance_image: true,
            convert_to_grayscale: true,
            apply_thresholding: true,
            deskew_image: true,
            target_width: default_target_width(),
            minimum_zone_confidence: default_minimum_zone_confidence(),
        }
    }
}

impl PreprocessingOptions {
    pub fn high_quality() -> Self {
        Self {
            target_width: 1536,
            minimum_zone_confidence: 0.4,
            ..Self::default()
        }
    }

    pub fn fast() -> Self {
        Self {
            auto_detect_zones: false,
            detect_text_regions: false,
            enhance_image: true,
            convert_to_grayscale: true,
            apply_thresholding: false,
            deskew_image: false,
            target_width: 768,
            minimum_zone_confidence: 0.6,
        }
    }
}

/// Named bundles of [`PreprocessingOptions`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Default,
    HighQuality,
    Fast,
}

impl Preset {
    pub fn options(self) -> PreprocessingOptions {
        match self {
            Preset::Default => PreprocessingOptions::default(),
            Preset::HighQuality => PreprocessingOptions::high_quality(),
            Preset::Fast => PreprocessingOptions::fast(),
        }
    }
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "default" => Ok(Preset::Default),
            "high_quality" | "highquality" => Ok(Preset::HighQuality),
            "fast" => Ok(Preset::Fast),
            other => Err(format!("Unknown preset: {}", other)),
        }
    }
}

/// How fragments are put into reading order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingOrder {
    /// Group into rows, then keep or split columns per row
    #[default]
    Rows,
    /// Top-to-bottom then left-to-right, one line per fragment
    Sequential,
}

/// Layout thresholds, in the same units as the fragment bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Row threshold as a share of page height
    #[serde(default = "default_row_threshold_ratio")]
    pub row_threshold_ratio: f64,
    /// Upper bound for the row threshold
    #[serde(default = "default_row_threshold_cap")]
    pub row_threshold_cap: f64,
    /// Horizontal gap above which a row is read as separate columns
    #[serde(default = "default_column_gap")]
    pub column_gap: f64,
    #[serde(default)]
    pub reading_order: ReadingOrder,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_threshold_ratio: default_row_threshold_ratio(),
            row_threshold_cap: default_row_threshold_cap(),
            column_gap: default_column_gap(),
            reading_order: ReadingOrder::default(),
        }
    }
}

impl LayoutConfig {
    /// Maximum vertical distance between a fragment's top and its row anchor.
    pub fn row_threshold(&self, page_height: f64) -> f64 {
        (page_height * self.row_threshold_ratio).min(self.row_threshold_cap)
    }
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_target_width() -> u32 {
    1024
}

fn default_minimum_zone_confidence() -> f32 {
    0.5
}

fn default_row_threshold_ratio() -> f64 {
    0.10
}

fn default_row_threshold_cap() -> f64 {
    20.0
}

fn default_column_gap() -> f64 {
    30.0
}

impl ScanConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_SCAN__ prefix
    /// 2. recipe-scan.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_SCAN__LAYOUT__COLUMN_GAP
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// The preprocessing options in effect: the preset if one is named,
    /// otherwise the individual switches.
    pub fn preprocessing_options(&self) -> PreprocessingOptions {
        match self.preset {
            Some(preset) => preset.options(),
            None => self.preprocessing,
        }
    }
}

/// Load configuration from file and environment variables
///
/// See [`ScanConfig::load`] for the lookup order.
pub fn load_config() -> Result<ScanConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-scan").required(false))
        // Use double underscore for nested: RECIPE_SCAN__LAYOUT__COLUMN_GAP
        .add_source(
            Environment::with_prefix("RECIPE_SCAN")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
