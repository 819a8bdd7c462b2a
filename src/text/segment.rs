use log::debug;

use crate::model::ParsedRecipeText;
use crate::text::vocabulary::{
    is_ingredient_header, is_instruction_header, is_instruction_line, is_servings_line,
};

/// Section boundaries found in a line sequence, as indices into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sections {
    pub servings: Option<usize>,
    pub ingredient_start: usize,
    pub ingredient_end: usize,
    pub instruction_start: usize,
}

/// Splits ordered lines into title, servings, ingredients and instructions.
///
/// Line 0 is always the title. Explicit headers ("Ingredients",
/// "Method", ...) win. Without any header the ingredient list starts after
/// the title, one line later when a servings line was found, and ends at
/// the first line that opens with a cooking verb.
pub fn segment<S: AsRef<str>>(lines: &[S]) -> ParsedRecipeText {
    let lines: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();
    let title = lines
        .first()
        .map(|line| line.trim().to_string())
        .unwrap_or_default();

    if lines.len() < 2 {
        return ParsedRecipeText {
            title,
            ..Default::default()
        };
    }

    let sections = find_sections(&lines);
    debug!("Detected sections: {:?}", sections);

    let servings = sections.servings.map(|index| lines[index].trim().to_string());
    let not_servings = |index: &usize| Some(*index) != sections.servings;

    let ingredient_lines = (sections.ingredient_start..sections.ingredient_end)
        .filter(not_servings)
        .map(|index| lines[index].trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    let instruction_text = (sections.instruction_start..lines.len())
        .filter(not_servings)
        .map(|index| lines[index])
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();

    ParsedRecipeText {
        title,
        servings,
        ingredient_lines,
        instruction_text,
    }
}

/// Locates the section boundaries. Expects at least two lines.
pub fn find_sections(lines: &[&str]) -> Sections {
    let count = lines.len();

    let instruction_header = (1..count).find(|&index| is_instruction_header(lines[index]));
    let header_limit = instruction_header.unwrap_or(count);

    let ingredient_header = (1..header_limit).find(|&index| is_ingredient_header(lines[index]));

    let servings = (1..header_limit).find(|&index| {
        let line = lines[index];
        !is_ingredient_header(line) && is_servings_line(line)
    });

    let ingredient_start = match ingredient_header {
        Some(index) => index + 1,
        // A servings line pushes the list down one
        None if servings.is_some() => 2,
        None => 1,
    }
    .min(count);

    let (ingredient_end, instruction_start) = match instruction_header {
        Some(index) => (index.max(ingredient_start), index + 1),
        // An ingredient header without an instruction header claims the rest
        None if ingredient_header.is_some() => (count, count),
        None => {
            let first_step = (ingredient_start..count)
                .find(|&index| Some(index) != servings && is_instruction_line(lines[index]));
            match first_step {
                Some(index) => (index, index),
                None => (count, count),
            }
        }
    };

    Sections {
        servings,
        ingredient_start,
        ingredient_end,
        instruction_start: instruction_start.min(count),
    }
}
