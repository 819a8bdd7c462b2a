//! Fixed word lists and patterns shared by the segmenter and the
//! ingredient parser. Built once on first use and never mutated.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Headers that open the ingredient section.
pub const INGREDIENT_HEADERS: &[&str] = &["ingredients", "ingredients:"];

/// Headers that open the instruction section.
pub const INSTRUCTION_HEADERS: &[&str] = &[
    "instructions",
    "instructions:",
    "directions",
    "directions:",
    "method",
    "method:",
    "preparation",
    "preparation:",
];

/// Substrings marking a servings or yield line.
pub const SERVINGS_KEYWORDS: &[&str] = &["serves", "makes", "yield", "servings"];

/// Lowercase openings of an instruction sentence.
pub const INSTRUCTION_VERBS: &[&str] = &[
    "place",
    "mix",
    "combine",
    "heat",
    "cook",
    "bake",
    "add",
    "stir",
    "blend",
    "pour",
    "serve",
    "garnish",
    "marinate",
    "skewer",
    "grill",
    "baste",
    "chop",
    "preheat",
    "whisk",
    "fold",
    "sauté",
    "simmer",
    "bring to",
    "remove from",
    "set aside",
    "let stand",
];

/// Units of measure, lowercase, including frequent recognition typos.
pub static UNITS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "tsp", "tsps", "teaspoon", "teaspoons", "tbsp", "tbsps", "tbs", "tablespoon",
        "tablespoons", "tbsop", "tpsop", "cup", "cups", "c", "oz", "ounce", "ounces", "fl",
        "lb", "lbs", "pound", "pounds", "ml", "cl", "dl", "l", "g", "mg", "kg", "gram",
        "grams", "kilogram", "kilograms", "liter", "liters", "litre", "litres", "pint",
        "pints", "quart", "quarts", "qt", "qts", "gallon", "gallons", "bunch", "bunches",
        "pinch", "pinches", "dash", "dashes", "clove", "cloves", "sprig", "sprigs", "can",
        "cans", "package", "packages", "pkg", "slice", "slices", "stick", "sticks", "head",
        "heads",
    ]
    .into_iter()
    .collect()
});

/// Vulgar fraction glyphs accepted as amounts.
pub const VULGAR_FRACTIONS: &[char] = &[
    '½', '⅓', '⅔', '¼', '¾', '⅕', '⅖', '⅗', '⅘', '⅙', '⅚', '⅛', '⅜', '⅝', '⅞',
];

/// Leading list markers: bullets or `1. ` numbering.
pub static LIST_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[-–•*]\s*|\d+[.)]\s+)").expect("static regex"));

/// A single amount token: integer, decimal, fraction, range, or glyph.
pub static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:\d+(?:[.,]\d+)?(?:\s*[-–]\s*\d+(?:[.,]\d+)?)?|\d+/\d+|\d*[½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞])$",
    )
    .expect("static regex")
});

/// An amount glued to its unit, e.g. `250ml` or `2cups`.
pub static GLUED_AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+(?:[.,]\d+)?|\d+/\d+|\d*[½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞])([A-Za-z]+\.?)$")
        .expect("static regex")
});

/// A bracketed metric side note such as `(250ml)` or `[1.5 L]`.
pub static METRIC_NOTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)[(\[]\s*(\d+(?:[.,]\d+)?(?:\s*[-–]\s*\d+(?:[.,]\d+)?)?\s*(?:ml|cl|dl|mg|kg|g|l|litres?|liters?|grams?))\s*[)\]]",
    )
    .expect("static regex")
});

/// Endings accepted after a longer unit word (`teaspoonful`, `cupsful`).
const UNIT_SUFFIXES: &[&str] = &["s", "es", "ful", "fuls", "sful"];

/// Whether `token` is a unit of measure. Case, trailing dots and brackets are
/// ignored. Unit words of four letters or more may also carry a plural or
/// `-ful` ending; short ones (`g`, `l`, `cup`) only match exactly.
pub fn is_unit(token: &str) -> bool {
    let cleaned = token
        .trim_matches(|c: char| c == '(' || c == ')' || c == ',' || c == '~')
        .trim_end_matches('.')
        .to_lowercase();
    if cleaned.is_empty() {
        return false;
    }
    UNITS.contains(cleaned.as_str())
        || UNITS.iter().any(|unit| {
            unit.chars().count() >= 4
                && cleaned
                    .strip_prefix(unit)
                    .map(|rest| UNIT_SUFFIXES.contains(&rest))
                    .unwrap_or(false)
        })
}

/// Whether `token` is an amount on its own.
pub fn is_amount(token: &str) -> bool {
    AMOUNT_RE.is_match(token)
}

/// Drops one leading bullet or numbering marker.
pub fn strip_list_marker(line: &str) -> &str {
    match LIST_MARKER_RE.find(line) {
        Some(marker) => &line[marker.end()..],
        None => line,
    }
}

/// Whether the line reads as a cooking step rather than an ingredient.
///
/// Plain prefix match: "Chopped onions" and "Additional salt" count too.
pub fn is_instruction_line(line: &str) -> bool {
    let lower = strip_list_marker(line.trim()).trim_start().to_lowercase();
    INSTRUCTION_VERBS.iter().any(|verb| lower.starts_with(verb))
}

pub fn is_ingredient_header(line: &str) -> bool {
    INGREDIENT_HEADERS.contains(&line.trim().to_lowercase().as_str())
}

pub fn is_instruction_header(line: &str) -> bool {
    INSTRUCTION_HEADERS.contains(&line.trim().to_lowercase().as_str())
}

pub fn is_servings_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    SERVINGS_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}
