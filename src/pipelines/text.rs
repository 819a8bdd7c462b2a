use crate::model::{ParsedRecipe, ParsedRecipeText};
use crate::text::{parse_ingredients, segment};

/// Segments lines into sections and parses every ingredient line.
pub fn process<S: AsRef<str>>(lines: &[S]) -> (ParsedRecipeText, ParsedRecipe) {
    let sections = segment(lines);
    let recipe = resolve(&sections);
    (sections, recipe)
}

/// Parses the ingredient lines of an already segmented recipe.
/// Lines that do not parse are left out.
pub fn resolve(sections: &ParsedRecipeText) -> ParsedRecipe {
    ParsedRecipe {
        title: sections.title.clone(),
        servings: sections.servings.clone(),
        ingredients: parse_ingredients(&sections.ingredient_lines),
        instructions: sections.instruction_text.clone(),
    }
}

/// Splits pasted or recognized text into lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(|line| line.trim_end().to_string()).collect()
}
