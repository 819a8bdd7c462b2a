use recipe_scan::text::{combine_split_lines, parse_ingredients};
use recipe_scan::{parse_ingredient, parse_text, segment};

#[test]
fn test_curry_without_headers() {
    let lines = ["Curry", "Serves 4", "2 cups rice", "1 onion", "Heat oil and cook."];
    let recipe = segment(&lines);

    assert_eq!(recipe.title, "Curry");
    assert_eq!(recipe.servings.as_deref(), Some("Serves 4"));
    assert_eq!(recipe.ingredient_lines, vec!["2 cups rice", "1 onion"]);
    assert_eq!(recipe.instruction_text, "Heat oil and cook.");
}

#[test]
fn test_ingredient_examples() {
    let flour = parse_ingredient("2 1/2 cups flour").unwrap();
    assert_eq!(flour.imperial_amount, "2 1/2 cups");
    assert_eq!(flour.name, "flour");
    assert_eq!(flour.metric_amount, None);

    let salt = parse_ingredient("Salt to taste").unwrap();
    assert_eq!(salt.imperial_amount, "");
    assert_eq!(salt.name, "Salt to taste");

    let milk = parse_ingredient("1 cup (250ml) milk").unwrap();
    assert_eq!(milk.imperial_amount, "1 cup");
    assert_eq!(milk.name, "milk");
    assert_eq!(milk.metric_amount.as_deref(), Some("250ml"));
}

#[test]
fn test_lines_without_a_name_are_skipped() {
    assert!(parse_ingredient("").is_none());
    assert!(parse_ingredient("2 cups").is_none());
    assert!(parse_ingredient("•").is_none());

    let parsed = parse_ingredients(&["1 egg", "  ", "Stir in the butter.", "3 tbsp"]);
    let names: Vec<&str> = parsed.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["egg"]);
}

#[test]
fn test_split_measurements_are_rejoined() {
    let lines = ["2 tsp.", "baking powder", "1-2", "eggs", "pinch of salt"];
    let combined = combine_split_lines(&lines);
    assert_eq!(
        combined,
        vec!["2 tsp. baking powder", "1-2 eggs", "pinch of salt"]
    );

    let parsed = parse_ingredients(&lines);
    assert_eq!(parsed[0].imperial_amount, "2 tsp.");
    assert_eq!(parsed[0].name, "baking powder");
    assert_eq!(parsed[1].imperial_amount, "1-2");
}

#[test]
fn test_full_text_with_headers() {
    let text = "Banana Bread\nMakes 1 loaf\nIngredients\n3 bananas\n• 2 cups flour\n1 tsp (5 g) baking soda\n\nMethod\nPreheat the oven to 180C.\nMash the bananas.\n";
    let recipe = parse_text(text);

    assert_eq!(recipe.title, "Banana Bread");
    assert_eq!(recipe.servings.as_deref(), Some("Makes 1 loaf"));
    assert_eq!(recipe.ingredients.len(), 3);
    assert_eq!(recipe.ingredients[1].name, "flour");
    assert_eq!(recipe.ingredients[2].metric_amount.as_deref(), Some("5 g"));
    assert_eq!(
        recipe.instructions,
        "Preheat the oven to 180C.\nMash the bananas."
    );
}

#[test]
fn test_recipe_to_text_lists_every_section() {
    let recipe = parse_text("Curry\nServes 4\n2 cups rice\nHeat oil and cook.");
    let text = recipe.to_text();
    assert!(text.starts_with("---\ntitle: Curry\nservings: Serves 4\n---"));
    assert!(text.contains("2 cups rice"));
    assert!(text.contains("Heat oil and cook."));
}
