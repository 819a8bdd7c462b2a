//! UniFFI bindings for recipe-scan
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! The line-level operations are synchronous; the scan entry point manages its own tokio runtime.

use std::collections::BTreeMap;
use std::fmt;

use crate::geometry::Rect;
use crate::model::{DuplicateRecord, ParsedIngredient, ParsedRecipe, TextFragment};
use crate::ScanError;

// Re-export UniFFI macro
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible ingredient structure
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiIngredient {
    /// Amount and unit, empty string if none
    pub imperial_amount: String,
    pub name: String,
    /// Metric side note, empty string if none
    pub metric_amount: String,
}

impl From<ParsedIngredient> for FfiIngredient {
    fn from(ingredient: ParsedIngredient) -> Self {
        FfiIngredient {
            imperial_amount: ingredient.imperial_amount,
            name: ingredient.name,
            metric_amount: ingredient.metric_amount.unwrap_or_default(),
        }
    }
}

/// FFI-compatible recipe structure
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipe {
    pub title: String,
    /// Servings line (empty string if none)
    pub servings: String,
    pub ingredients: Vec<FfiIngredient>,
    pub instructions: String,
}

impl From<ParsedRecipe> for FfiRecipe {
    fn from(recipe: ParsedRecipe) -> Self {
        FfiRecipe {
            title: recipe.title,
            servings: recipe.servings.unwrap_or_default(),
            ingredients: recipe.ingredients.into_iter().map(Into::into).collect(),
            instructions: recipe.instructions,
        }
    }
}

/// FFI-compatible duplicate record
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiDuplicate {
    pub original_index: u32,
    pub kept_position: u32,
    pub text: String,
}

impl From<DuplicateRecord> for FfiDuplicate {
    fn from(record: DuplicateRecord) -> Self {
        FfiDuplicate {
            original_index: record.original_index as u32,
            kept_position: record.kept_position as u32,
            text: record.text,
        }
    }
}

impl From<FfiDuplicate> for DuplicateRecord {
    fn from(ffi: FfiDuplicate) -> Self {
        DuplicateRecord {
            original_index: ffi.original_index as usize,
            kept_position: ffi.kept_position as usize,
            text: ffi.text,
        }
    }
}

/// Deduplicated lines and the removed duplicates
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiDeduplicated {
    pub kept: Vec<String>,
    pub removed: Vec<FfiDuplicate>,
}

/// Lines after restoring duplicates
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRestored {
    pub lines: Vec<String>,
    /// Final positions of the restored lines
    pub inserted_at: Vec<u32>,
    /// Duplicates still available for restoring, re-based onto `lines`
    pub remaining: Vec<FfiDuplicate>,
}

/// Lines after a merge
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiLineEdit {
    pub lines: Vec<String>,
    /// When true, every selection held on the previous list must be cleared
    pub invalidate_selections: bool,
}

/// FFI-compatible text fragment; bounds are y-up page coordinates
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiFragment {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub page_index: u32,
}

impl From<FfiFragment> for TextFragment {
    fn from(ffi: FfiFragment) -> Self {
        TextFragment::new(ffi.text, Rect::new(ffi.x, ffi.y, ffi.width, ffi.height))
            .on_page(ffi.page_index as usize)
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiScanError {
    /// Image could not be read or decoded
    ImageError { message: String },
    /// Text recognition failed
    RecognitionError { message: String },
    /// Invalid input provided
    InvalidInput { message: String },
    /// Builder configuration error
    BuilderError { message: String },
    /// Configuration error
    ConfigError { message: String },
    /// Runtime error (tokio)
    RuntimeError { message: String },
}

impl fmt::Display for FfiScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiScanError::ImageError { message } => write!(f, "Image error: {}", message),
            FfiScanError::RecognitionError { message } => {
                write!(f, "Recognition error: {}", message)
            }
            FfiScanError::InvalidInput { message } => write!(f, "Invalid input: {}", message),
            FfiScanError::BuilderError { message } => write!(f, "Builder error: {}", message),
            FfiScanError::ConfigError { message } => write!(f, "Config error: {}", message),
            FfiScanError::RuntimeError { message } => write!(f, "Runtime error: {}", message),
        }
    }
}

impl std::error::Error for FfiScanError {}

impl From<ScanError> for FfiScanError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::ImageError(e) => FfiScanError::ImageError {
                message: e.to_string(),
            },
            ScanError::IoError(e) => FfiScanError::ImageError {
                message: e.to_string(),
            },
            ScanError::Base64Error(e) => FfiScanError::ImageError {
                message: e.to_string(),
            },
            ScanError::JsonError(e) => FfiScanError::InvalidInput {
                message: e.to_string(),
            },
            ScanError::RecognitionError(msg) => FfiScanError::RecognitionError { message: msg },
            ScanError::TaskError(e) => FfiScanError::RuntimeError {
                message: e.to_string(),
            },
            ScanError::BuilderError(msg) => FfiScanError::BuilderError { message: msg },
            ScanError::InvalidInput(msg) => FfiScanError::InvalidInput { message: msg },
            ScanError::ConfigError(e) => FfiScanError::ConfigError {
                message: e.to_string(),
            },
        }
    }
}

/// Create a new tokio runtime for FFI calls
fn create_runtime() -> Result<tokio::runtime::Runtime, FfiScanError> {
    tokio::runtime::Runtime::new().map_err(|e| FfiScanError::RuntimeError {
        message: format!("Failed to create async runtime: {}", e),
    })
}

/// Parse recipe lines (already in reading order) into a recipe
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn parse_lines(lines: Vec<String>) -> FfiRecipe {
    crate::parse_lines(&lines).into()
}

/// Parse a single ingredient line
///
/// # Returns
/// `None` when the line is an instruction or has no ingredient name
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn parse_ingredient_line(line: String) -> Option<FfiIngredient> {
    crate::text::parse_ingredient(&line).map(Into::into)
}

/// Scan pages of recognized fragments
///
/// Fragments are grouped into pages by `page_index` and read in ascending
/// page order; all pages share the given size. Duplicated lines are removed.
/// Without fragments the result is an empty recipe.
///
/// # Arguments
/// * `fragments` - Recognized text with y-up bounds
/// * `page_width` - Page width in the fragments' units
/// * `page_height` - Page height in the fragments' units
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn scan_fragments(
    fragments: Vec<FfiFragment>,
    page_width: f64,
    page_height: f64,
) -> Result<FfiRecipe, FfiScanError> {
    let page = Rect::new(0.0, 0.0, page_width, page_height);

    let mut pages: BTreeMap<u32, Vec<TextFragment>> = BTreeMap::new();
    for fragment in fragments {
        let page_index = fragment.page_index;
        pages.entry(page_index).or_default().push(fragment.into());
    }
    if pages.is_empty() {
        pages.insert(0, Vec::new());
    }

    let rt = create_runtime()?;
    rt.block_on(async {
        let builder = pages
            .into_values()
            .fold(crate::RecipeScanner::builder(), |builder, fragments| {
                builder.page(page, fragments)
            });
        let result = builder.build().await?;
        Ok(result.recipe.into())
    })
}

/// Remove repeated lines, keeping the first occurrence
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn deduplicate_lines(lines: Vec<String>) -> FfiDeduplicated {
    let result = crate::lines::deduplicate(&lines);
    FfiDeduplicated {
        kept: result.kept,
        removed: result.removed.into_iter().map(Into::into).collect(),
    }
}

/// Restore selected duplicates (indices into `removed`)
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn restore_lines(kept: Vec<String>, removed: Vec<FfiDuplicate>, selected: Vec<u32>) -> FfiRestored {
    let removed: Vec<DuplicateRecord> = removed.into_iter().map(Into::into).collect();
    let selected: Vec<usize> = selected.into_iter().map(|index| index as usize).collect();
    let restored = crate::lines::restore(&kept, &removed, &selected);
    FfiRestored {
        lines: restored.lines,
        inserted_at: restored
            .inserted_at
            .into_iter()
            .map(|index| index as u32)
            .collect(),
        remaining: restored.remaining.into_iter().map(Into::into).collect(),
    }
}

/// Merge the line at `source` into the line at `dest`
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn merge_lines(lines: Vec<String>, source: u32, dest: u32) -> FfiLineEdit {
    let edit = crate::lines::merge(&lines, source as usize, dest as usize);
    FfiLineEdit {
        lines: edit.lines,
        invalidate_selections: edit.invalidate_selections,
    }
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
