use log::debug;

use crate::model::ParsedIngredient;
use crate::text::vocabulary::{
    is_amount, is_instruction_line, is_unit, strip_list_marker, GLUED_AMOUNT_RE, METRIC_NOTE_RE,
};

/// Compound amounts such as "1 1/2" use at most this many tokens.
const MAX_AMOUNT_TOKENS: usize = 2;

/// Splits one ingredient line into amount, unit, name and metric note.
///
/// Returns `None` for instruction lines and for lines that leave no name
/// once the amount and unit are taken off ("2 cups" on its own).
///
/// ```
/// use recipe_scan::text::parse_ingredient;
///
/// let milk = parse_ingredient("1 cup (250ml) milk").unwrap();
/// assert_eq!(milk.imperial_amount, "1 cup");
/// assert_eq!(milk.name, "milk");
/// assert_eq!(milk.metric_amount.as_deref(), Some("250ml"));
/// ```
pub fn parse_ingredient(line: &str) -> Option<ParsedIngredient> {
    let trimmed = line.trim();
    if trimmed.is_empty() || is_instruction_line(trimmed) {
        return None;
    }

    let tokens = tokenize(strip_list_marker(trimmed));
    let mut cursor = 0;

    let mut amount: Vec<&str> = Vec::new();
    while cursor < tokens.len() && amount.len() < MAX_AMOUNT_TOKENS && is_amount(&tokens[cursor]) {
        amount.push(&tokens[cursor]);
        cursor += 1;
    }

    let mut unit = None;
    if !amount.is_empty() && cursor < tokens.len() && is_unit(&tokens[cursor]) {
        unit = Some(tokens[cursor].as_str());
        cursor += 1;
    }

    let remainder = tokens[cursor..].join(" ");
    let (remainder, metric_amount) = take_metric_note(&remainder);
    let name = remainder.split_whitespace().collect::<Vec<_>>().join(" ");

    if name.is_empty() {
        debug!("No ingredient name left in {:?}", line);
        return None;
    }

    let imperial_amount = match unit {
        Some(unit) => format!("{} {}", amount.join(" "), unit),
        None => amount.join(" "),
    };

    Some(ParsedIngredient {
        imperial_amount: imperial_amount.trim().to_string(),
        name,
        metric_amount,
    })
}

/// Parses a block of ingredient lines, re-joining measurements that the
/// recognizer split from their ingredient. Unparseable lines are skipped.
pub fn parse_ingredients<S: AsRef<str>>(lines: &[S]) -> Vec<ParsedIngredient> {
    combine_split_lines(lines)
        .iter()
        .filter_map(|line| parse_ingredient(line))
        .collect()
}

/// Joins a line holding only a measurement ("2 tsp.", "1-2", "10 mL") with
/// the line after it, unless that one is also only a measurement.
/// Blank lines are dropped.
pub fn combine_split_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let lines: Vec<&str> = lines
        .iter()
        .map(|line| line.as_ref().trim())
        .filter(|line| !line.is_empty())
        .collect();

    let mut combined = Vec::with_capacity(lines.len());
    let mut index = 0;
    while index < lines.len() {
        let line = lines[index];
        match lines.get(index + 1) {
            Some(next) if is_only_measurement(line) && !is_only_measurement(next) => {
                debug!("Combined split ingredient {:?} + {:?}", line, next);
                combined.push(format!("{} {}", line, next));
                index += 2;
            }
            _ => {
                combined.push(line.to_string());
                index += 1;
            }
        }
    }
    combined
}

/// Whether the line is nothing but an amount, a unit, or an amount and unit.
pub fn is_only_measurement(line: &str) -> bool {
    let tokens = tokenize(strip_list_marker(line.trim()));
    match tokens.as_slice() {
        [single] => is_amount(single) || is_unit(single),
        [first, second] => {
            is_amount(first) && (is_unit(second) || is_amount(second))
        }
        [first, second, third] => is_amount(first) && is_amount(second) && is_unit(third),
        _ => false,
    }
}

/// Whitespace tokens, with a glued leading amount (`250ml`, `2cups`) split
/// into amount and unit.
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = text.split_whitespace().map(str::to_string).collect();
    let glued = tokens
        .first()
        .filter(|first| !is_amount(first))
        .and_then(|first| GLUED_AMOUNT_RE.captures(first))
        .filter(|caps| is_unit(&caps[2]))
        .map(|caps| (caps[1].to_string(), caps[2].to_string()));
    if let Some((amount, unit)) = glued {
        tokens.splice(0..1, [amount, unit]);
    }
    tokens
}

/// Removes the first bracketed metric note from `text`, returning the rest
/// and the note's inner text.
fn take_metric_note(text: &str) -> (String, Option<String>) {
    match METRIC_NOTE_RE.captures(text) {
        Some(caps) => {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                return (text.to_string(), None);
            };
            let mut rest = String::with_capacity(text.len());
            rest.push_str(&text[..whole.start()]);
            rest.push(' ');
            rest.push_str(&text[whole.end()..]);
            (rest, Some(inner.as_str().trim().to_string()))
        }
        None => (text.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(line: &str) -> ParsedIngredient {
        parse_ingredient(line).unwrap_or_else(|| panic!("{line:?} should parse"))
    }

    #[test]
    fn test_compound_amount() {
        let flour = parsed("2 1/2 cups flour");
        assert_eq!(flour.imperial_amount, "2 1/2 cups");
        assert_eq!(flour.name, "flour");
        assert_eq!(flour.metric_amount, None);
    }

    #[test]
    fn test_name_only_line() {
        let salt = parsed("Salt to taste");
        assert_eq!(salt.imperial_amount, "");
        assert_eq!(salt.name, "Salt to taste");
    }

    #[test]
    fn test_metric_side_note() {
        let milk = parsed("1 cup (250ml) milk");
        assert_eq!(milk.imperial_amount, "1 cup");
        assert_eq!(milk.name, "milk");
        assert_eq!(milk.metric_amount.as_deref(), Some("250ml"));

        let stock = parsed("- 6 cups chicken stock [1.5L]");
        assert_eq!(stock.imperial_amount, "6 cups");
        assert_eq!(stock.name, "chicken stock");
        assert_eq!(stock.metric_amount.as_deref(), Some("1.5L"));
    }

    #[test]
    fn test_markers_are_stripped() {
        assert_eq!(parsed("• 2 eggs").name, "eggs");
        assert_eq!(parsed("• 2 eggs").imperial_amount, "2");
        assert_eq!(parsed("3. 1 tbsp butter").imperial_amount, "1 tbsp");
    }

    #[test]
    fn test_glyphs_and_ranges() {
        let sugar = parsed("½ cup sugar");
        assert_eq!(sugar.imperial_amount, "½ cup");
        let garlic = parsed("2-3 cloves garlic");
        assert_eq!(garlic.imperial_amount, "2-3 cloves");
        assert_eq!(garlic.name, "garlic");
    }

    #[test]
    fn test_glued_amount() {
        let cream = parsed("250ml cream");
        assert_eq!(cream.imperial_amount, "250 ml");
        assert_eq!(cream.name, "cream");
    }

    #[test]
    fn test_unit_needs_an_amount() {
        let can = parsed("can of tomatoes");
        assert_eq!(can.imperial_amount, "");
        assert_eq!(can.name, "can of tomatoes");
    }

    #[test]
    fn test_rejections() {
        assert!(parse_ingredient("2 cups").is_none());
        assert!(parse_ingredient("   ").is_none());
        assert!(parse_ingredient("Add 2 cups water").is_none());
        assert!(parse_ingredient("Preheat oven to 350").is_none());
        assert!(parse_ingredient("Cooked rice").is_none());
        assert!(parse_ingredient("- Mixed greens").is_none());
    }

    #[test]
    fn test_combine_split_lines() {
        let lines = ["2 tsp.", "baking powder", "", "1 cup", "250 ml"];
        assert_eq!(
            combine_split_lines(&lines),
            vec!["2 tsp. baking powder", "1 cup", "250 ml"]
        );
    }

    #[test]
    fn test_parse_ingredients_skips_failures() {
        let lines = ["1 1/2", "cups oats", "Stir well", "Salt"];
        let parsed = parse_ingredients(&lines);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].imperial_amount, "1 1/2 cups");
        assert_eq!(parsed[0].name, "oats");
        assert_eq!(parsed[1].name, "Salt");
    }
}
