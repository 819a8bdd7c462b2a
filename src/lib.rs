pub mod builder;
pub mod config;
pub mod enhance;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod lines;
pub mod model;
pub mod pipelines;
pub mod text;
pub mod uniffi_bindings;

// Re-export builder API
pub use builder::{RecipeScanner, RecipeScannerBuilder, ScanResult};

// Re-export configuration
pub use config::{LayoutConfig, PreprocessingOptions, Preset, ReadingOrder, ScanConfig};

// Re-export error type
pub use error::ScanError;

// Re-export data model
pub use geometry::Rect;
pub use model::{
    DuplicateRecord, ParsedIngredient, ParsedRecipe, ParsedRecipeText, Row, TextFragment, Zone,
    ZoneKind,
};

// Re-export pipeline seams
pub use enhance::{enhance, EnhanceOptions, EnhanceReport};
pub use lines::{deduplicate, merge, restore, Deduplicated, LineEdit, Restored};
pub use pipelines::fragments::PageFragments;
pub use pipelines::image::{ImageSource, TextRecognizer};
pub use pipelines::PageLayout;
pub use text::{parse_ingredient, segment};

// Re-export UniFFI bindings when feature is enabled
#[cfg(feature = "uniffi")]
pub use uniffi_bindings::*;

/// Parses a single page of recognized fragments into a recipe.
///
/// Uses default preprocessing and layout settings and does not
/// deduplicate. `page` is the rectangle the fragment bounds refer to.
pub fn parse_fragments(fragments: Vec<TextFragment>, page: Rect) -> ParsedRecipe {
    let layout = pipelines::fragments::process(
        0,
        &PageFragments::new(page, fragments),
        &PreprocessingOptions::default(),
        &LayoutConfig::default(),
    );
    pipelines::text::process(&layout.lines).1
}

/// Parses lines that are already in reading order.
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> ParsedRecipe {
    pipelines::text::process(lines).1
}

/// Parses a block of text, one recipe line per text line.
///
/// ```
/// let recipe = recipe_scan::parse_text("Curry\nServes 4\n2 cups rice\nHeat oil and cook.");
/// assert_eq!(recipe.title, "Curry");
/// assert_eq!(recipe.ingredients[0].name, "rice");
/// ```
pub fn parse_text(text: &str) -> ParsedRecipe {
    parse_lines(&pipelines::text::split_lines(text))
}
