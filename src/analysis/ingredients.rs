/// Split raw ingredient text into trimmed, non-empty entries
pub fn parse_ingredients(raw: &str) -> Vec<String> {
    raw.split([',', ';', '•'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Allergen groups and the keywords that suggest them
const ALLERGEN_KEYWORDS: &[(&str, &[&str])] = &[
    ("Milk", &["milk", "cream", "whey", "casein", "lactose", "curd", "cheese", "butter", "yogurt"]),
    ("Egg", &["egg", "albumin", "yolk", "mayonnaise"]),
    ("Peanut", &["peanut", "groundnut"]),
    ("Nut", &["nut", "almond", "cashew", "walnut", "pecan", "hazelnut", "pistachio", "macadamia"]),
    ("Soy", &["soy", "soya", "tofu", "bean curd", "lecithin"]),
    ("Fish", &["fish", "salmon", "tuna", "cod", "anchovy"]),
    ("Shellfish", &["shellfish", "shrimp", "prawn", "crab", "lobster", "clam", "mussel", "oyster"]),
    ("Wheat", &["wheat", "gluten", "barley", "rye", "oats", "flour", "bread", "pasta"]),
    ("Sesame", &["sesame", "tahini"]),
    ("Mustard", &["mustard"]),
    ("Celery", &["celery"]),
    ("Sulfites", &["sulfite", "sulphite", "sulfur", "sulphur", "metabisulfite", "dioxide"]),
];

/// Guess allergen groups from an ingredient list, in table order
pub fn infer_allergens(ingredients: &[String]) -> Vec<&'static str> {
    let text = ingredients.join(" ").to_lowercase();
    ALLERGEN_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| text.contains(kw)))
        .map(|(allergen, _)| *allergen)
        .collect()
}
