use std::sync::Arc;

use log::{info, warn};

use crate::config::{LayoutConfig, PreprocessingOptions, ScanConfig};
use crate::enhance::EnhanceOptions;
use crate::error::ScanError;
use crate::geometry::Rect;
use crate::lines::{deduplicate, restore};
use crate::model::{DuplicateRecord, ParsedRecipe, ParsedRecipeText, TextFragment};
use crate::pipelines::fragments::{self, PageFragments};
use crate::pipelines::image::{self, ImageSource, TextRecognizer};
use crate::pipelines::{combined_lines, text, PageLayout};

/// Represents the input of a scan
#[derive(Debug, Clone)]
enum InputSource {
    /// Already recognized fragments, one entry per page
    Pages(Vec<PageFragments>),
    /// Page images that still need recognizing
    Images(Vec<ImageSource>),
    /// Lines in reading order (e.g. after manual editing)
    Lines(Vec<String>),
}

impl InputSource {
    fn kind(&self) -> &'static str {
        match self {
            InputSource::Pages(_) => "fragment pages",
            InputSource::Images(_) => "images",
            InputSource::Lines(_) => "lines",
        }
    }
}

/// Result of a scan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanResult {
    /// Recipe lines in reading order, after deduplication
    pub lines: Vec<String>,
    /// Lines removed as duplicates; restorable with [`ScanResult::restore_duplicates`]
    pub duplicates: Vec<DuplicateRecord>,
    /// The lines split into sections
    pub sections: ParsedRecipeText,
    /// Sections with parsed ingredients
    pub recipe: ParsedRecipe,
    /// Per-page layout; empty for line input
    pub pages: Vec<PageLayout>,
}

impl ScanResult {
    fn from_lines(lines: Vec<String>, duplicates: Vec<DuplicateRecord>, pages: Vec<PageLayout>) -> Self {
        let (sections, recipe) = text::process(&lines);
        Self {
            lines,
            duplicates,
            sections,
            recipe,
            pages,
        }
    }

    /// Puts the selected duplicates (indices into `duplicates`) back and
    /// re-segments the recipe. Unselected duplicates stay restorable.
    ///
    /// Line positions change, so selections held on the old `lines` are void.
    pub fn restore_duplicates(&self, selected: &[usize]) -> ScanResult {
        let restored = restore(&self.lines, &self.duplicates, selected);
        ScanResult::from_lines(restored.lines, restored.remaining, self.pages.clone())
    }
}

/// Builder for configuring and running recipe scans
#[derive(Default)]
pub struct RecipeScannerBuilder {
    source: Option<InputSource>,
    conflict: Option<&'static str>,
    recognizer: Option<Arc<dyn TextRecognizer>>,
    config: Option<ScanConfig>,
    preprocessing: Option<PreprocessingOptions>,
    enhancement: Option<EnhanceOptions>,
    layout: Option<LayoutConfig>,
    keep_duplicates: bool,
}

impl RecipeScannerBuilder {
    /// Add a page of recognized fragments
    ///
    /// `page` is the rectangle the fragment bounds are measured in. Pages
    /// are read in the order they are added.
    ///
    /// # Example
    /// ```
    /// use recipe_scan::{Rect, RecipeScanner, TextFragment};
    ///
    /// let builder = RecipeScanner::builder().page(
    ///     Rect::new(0.0, 0.0, 600.0, 800.0),
    ///     vec![TextFragment::new("Curry", Rect::new(50.0, 740.0, 200.0, 30.0))],
    /// );
    /// ```
    pub fn page(mut self, page: Rect, fragments: Vec<TextFragment>) -> Self {
        let page = PageFragments::new(page, fragments);
        match &mut self.source {
            Some(InputSource::Pages(pages)) => pages.push(page),
            Some(other) => self.conflict = Some(other.kind()),
            None => self.source = Some(InputSource::Pages(vec![page])),
        }
        self
    }

    /// Add a page image; requires a [`recognizer`](Self::recognizer)
    pub fn image(mut self, source: ImageSource) -> Self {
        match &mut self.source {
            Some(InputSource::Images(images)) => images.push(source),
            Some(other) => self.conflict = Some(other.kind()),
            None => self.source = Some(InputSource::Images(vec![source])),
        }
        self
    }

    /// Use lines that are already in reading order
    ///
    /// # Example
    /// ```
    /// use recipe_scan::RecipeScanner;
    ///
    /// let builder = RecipeScanner::builder()
    ///     .lines(["Curry", "Serves 4", "2 cups rice", "Heat oil and cook."]);
    /// ```
    pub fn lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        match &mut self.source {
            Some(InputSource::Lines(existing)) => existing.extend(lines),
            Some(other) => self.conflict = Some(other.kind()),
            None => self.source = Some(InputSource::Lines(lines)),
        }
        self
    }

    /// Use pasted text, one line per line of text
    pub fn text(self, content: &str) -> Self {
        self.lines(text::split_lines(content))
    }

    /// Set the text recognition engine used for image input
    pub fn recognizer(mut self, recognizer: Arc<dyn TextRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Use a loaded configuration; individually set options still win
    pub fn config(mut self, config: ScanConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn preprocessing(mut self, options: PreprocessingOptions) -> Self {
        self.preprocessing = Some(options);
        self
    }

    pub fn enhancement(mut self, options: EnhanceOptions) -> Self {
        self.enhancement = Some(options);
        self
    }

    pub fn layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Remove repeated lines before segmenting (default: true)
    pub fn deduplicate(mut self, enabled: bool) -> Self {
        self.keep_duplicates = !enabled;
        self
    }

    /// Build and execute the scan
    ///
    /// # Errors
    /// Input without any text is not an error: the result then holds an
    /// empty recipe and, for page input, the full-page fallback zone.
    ///
    /// Returns `ScanError` if:
    /// - No input was given, or different kinds of input were mixed
    /// - Images were given without a recognizer
    /// - An image cannot be loaded or decoded
    /// - The recognizer fails
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_scan::RecipeScanner;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let result = RecipeScanner::builder()
    ///     .lines(["Curry", "Serves 4", "2 cups rice", "Heat oil and cook."])
    ///     .build()
    ///     .await?;
    /// println!("{}", result.recipe.to_text());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<ScanResult, ScanError> {
        if let Some(kind) = self.conflict {
            return Err(ScanError::BuilderError(format!(
                "Cannot mix {} with other input kinds",
                kind
            )));
        }

        let source = self.source.ok_or_else(|| {
            ScanError::BuilderError(
                "No input specified. Use .page(), .image(), .lines() or .text()".to_string(),
            )
        })?;

        let config = self.config.unwrap_or_default();
        let preprocessing = self
            .preprocessing
            .unwrap_or_else(|| config.preprocessing_options());
        let enhancement = self.enhancement.unwrap_or(config.enhancement);
        let layout = self.layout.unwrap_or(config.layout);

        let (lines, pages) = match source {
            InputSource::Lines(lines) => (lines, Vec::new()),
            InputSource::Pages(pages) => {
                let pages = fragments::process_pages(&pages, &preprocessing, &layout);
                (combined_lines(&pages), pages)
            }
            InputSource::Images(images) => {
                let recognizer = self.recognizer.ok_or_else(|| {
                    ScanError::BuilderError(
                        "Image input needs a text recognizer. Use .recognizer()".to_string(),
                    )
                })?;
                let pages = image::process(
                    &images,
                    recognizer.as_ref(),
                    &preprocessing,
                    &enhancement,
                    &layout,
                )
                .await?;
                (combined_lines(&pages), pages)
            }
        };

        if lines.iter().all(|line| line.trim().is_empty()) {
            warn!("No text found in input, returning an empty recipe");
        }

        let result = if self.keep_duplicates {
            ScanResult::from_lines(lines, Vec::new(), pages)
        } else {
            let deduplicated = deduplicate(&lines);
            ScanResult::from_lines(deduplicated.kept, deduplicated.removed, pages)
        };

        info!(
            "Scanned \"{}\": {} lines, {} ingredients, {} duplicates",
            result.recipe.title,
            result.lines.len(),
            result.recipe.ingredients.len(),
            result.duplicates.len()
        );
        Ok(result)
    }
}

/// Main entry point for the builder API
pub struct RecipeScanner;

impl RecipeScanner {
    /// Creates a new builder for scanning recipes
    ///
    /// # Example
    /// ```
    /// use recipe_scan::RecipeScanner;
    ///
    /// let builder = RecipeScanner::builder();
    /// ```
    pub fn builder() -> RecipeScannerBuilder {
        RecipeScannerBuilder::default()
    }
}
