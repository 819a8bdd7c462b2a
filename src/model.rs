use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::Rect;

/// One piece of recognized text as handed over by the text-recognition engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    pub text: String,
    pub bounds: Rect,
    #[serde(default)]
    pub source_page_index: usize,
    /// Baseline angle in radians, when the recognizer reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_angle: Option<f32>,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, bounds: Rect) -> Self {
        Self {
            text: text.into(),
            bounds,
            source_page_index: 0,
            baseline_angle: None,
        }
    }

    pub fn on_page(mut self, page_index: usize) -> Self {
        self.source_page_index = page_index;
        self
    }
}

/// Kind of page region a [`Zone`] covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    Title,
    Ingredients,
    Instructions,
    Metadata,
    Decorative,
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ZoneKind::Title => "title",
            ZoneKind::Ingredients => "ingredients",
            ZoneKind::Instructions => "instructions",
            ZoneKind::Metadata => "metadata",
            ZoneKind::Decorative => "decorative",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub kind: ZoneKind,
    pub bounds: Rect,
    /// Fixed per-kind constant in `[0, 1]`, not an evidence score.
    pub confidence: f32,
}

/// Fragments judged to share one horizontal band of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Top edge of the fragment that opened the row.
    pub anchor_top: f64,
    pub fragments: Vec<TextFragment>,
}

/// Output of section segmentation: the recipe still as raw lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedRecipeText {
    pub title: String,
    pub servings: Option<String>,
    pub ingredient_lines: Vec<String>,
    pub instruction_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    /// `"{amount} {unit}"`, empty when the line carried no amount.
    pub imperial_amount: String,
    pub name: String,
    pub metric_amount: Option<String>,
}

/// A recipe with every ingredient line decomposed into fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedRecipe {
    pub title: String,
    pub servings: Option<String>,
    pub ingredients: Vec<ParsedIngredient>,
    pub instructions: String,
}

impl ParsedRecipe {
    /// Renders the recipe as plain text with a small frontmatter block.
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        if !self.title.is_empty() || self.servings.is_some() {
            output.push_str("---\n");
            if !self.title.is_empty() {
                output.push_str(&format!("title: {}\n", self.title));
            }
            if let Some(servings) = &self.servings {
                output.push_str(&format!("servings: {}\n", servings));
            }
            output.push_str("---\n\n");
        }

        for ingredient in &self.ingredients {
            output.push_str(&ingredient.to_string());
            output.push('\n');
        }

        if !self.instructions.is_empty() {
            if !self.ingredients.is_empty() {
                output.push('\n');
            }
            output.push_str(&self.instructions);
            output.push('\n');
        }

        output
    }
}

impl fmt::Display for ParsedIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.imperial_amount.is_empty() {
            write!(f, "{}", self.name)?;
        } else {
            write!(f, "{} {}", self.imperial_amount, self.name)?;
        }
        if let Some(metric) = &self.metric_amount {
            write!(f, " ({})", metric)?;
        }
        Ok(())
    }
}

/// A line removed by deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateRecord {
    /// Position in the sequence before deduplication.
    pub original_index: usize,
    /// Position in the deduplicated sequence the line was removed in front of.
    pub kept_position: usize,
    /// The removed line, untrimmed.
    pub text: String,
}
