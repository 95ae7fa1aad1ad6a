//! Determinism tests: identical content must always produce identical hashes,
//! independent of instance identity, JSON round trips and cache state.

use recipefp::{
    Appliance, Container, CookDuration, HashFormat, Ingredient, Recipe, RecipeBuilder,
    SketchConfig, Temperature, Unit, decode, extract_features, hash_recipe, latte_demo,
    sketch_recipe,
};

fn pancakes() -> Recipe {
    RecipeBuilder::new("Pancakes")
        .serves(4)
        .ingredient(Ingredient::new("Flour").amount(200.0, Unit::Gram))
        .ingredient(Ingredient::new("Milk").amount(300.0, Unit::Milliliter))
        .ingredient(Ingredient::new("Egg").count(2.0))
        .step(|s| {
            s.add(Ingredient::new("Flour"), Container::new("Bowl"))
                .add(Ingredient::new("Milk"), Container::new("Bowl"))
                .mix(Container::new("Bowl"))
                .parallel(|t| {
                    t.heat(Temperature::celsius(190.0), Appliance::new("Griddle"))
                        .cue("visual", "water droplets dance")
                })
        })
        .step(|s| {
            s.wait(CookDuration::minutes(2.0))
                .sensory_check("visual", "bubbles on the surface", "flip")
        })
        .build()
        .expect("pancakes build")
}

#[test]
fn same_recipe_hashes_identically_across_calls() {
    let cfg = SketchConfig::default();
    let recipe = pancakes();
    let first = hash_recipe(&recipe, &cfg).unwrap();
    for _ in 0..5 {
        assert_eq!(hash_recipe(&recipe, &cfg).unwrap(), first);
    }
}

#[test]
fn independently_built_recipes_hash_identically() {
    let cfg = SketchConfig::default();
    assert_eq!(
        hash_recipe(&pancakes(), &cfg).unwrap(),
        hash_recipe(&pancakes(), &cfg).unwrap()
    );
}

#[test]
fn cached_and_fresh_hashes_agree() {
    let cfg = SketchConfig::default();
    let recipe = pancakes();
    let cached = hash_recipe(&recipe, &cfg).unwrap();
    assert!(!recipe.digests().is_empty());

    // A clone starts with an empty cache and must recompute the same value.
    let fresh = recipe.clone();
    assert!(fresh.digests().is_empty());
    assert_eq!(hash_recipe(&fresh, &cfg).unwrap(), cached);
}

#[test]
fn json_round_trip_preserves_hash() {
    let cfg = SketchConfig::default();
    let recipe = pancakes();
    let json = recipe.to_json().unwrap();
    let parsed = Recipe::from_json(&json).unwrap();
    assert_eq!(parsed, recipe);
    assert_eq!(
        hash_recipe(&parsed, &cfg).unwrap(),
        hash_recipe(&recipe, &cfg).unwrap()
    );
}

#[test]
fn feature_order_is_stable() {
    let recipe = pancakes();
    let keys: Vec<String> = extract_features(&recipe)
        .iter()
        .map(|t| t.hash_key())
        .collect();
    assert_eq!(
        keys,
        vec![
            "flour",
            "milk",
            "egg",
            "add",
            "flour",
            "bowl",
            "add",
            "milk",
            "bowl",
            "mix",
            "bowl",
            "heat",
            "190",
            "visual",
            "water droplets dance",
            "wait",
            "2",
            "visual",
            "bubbles on the surface",
        ]
    );
}

#[test]
fn token_count_matches_histogram_total() {
    let cfg = SketchConfig::default();
    let recipe = pancakes();
    let sketch = sketch_recipe(&recipe, &cfg).unwrap();
    assert_eq!(sketch.token_count, 19);
    assert_eq!(sketch.histogram.total(), 19);
    assert_eq!(decode(&sketch.encoded).unwrap(), sketch.histogram);
}

#[test]
fn sketch_json_carries_meta() {
    let cfg = SketchConfig::default();
    let sketch = sketch_recipe(&pancakes(), &cfg).unwrap();
    let json = serde_json::to_value(&sketch).unwrap();

    assert_eq!(json["meta"]["algorithm_name"], "md5bucket_gzip_b64_v1");
    assert_eq!(json["meta"]["buckets"], 256);
    assert_eq!(json["meta"]["format"], "wide");
    assert_eq!(json["token_count"], 19);
    assert_eq!(json["encoded"], sketch.encoded.as_str());
}

#[test]
fn mutation_changes_hash_and_refreshes_cache() {
    let cfg = SketchConfig::default();
    let mut recipe = latte_demo().unwrap();
    let before = hash_recipe(&recipe, &cfg).unwrap();

    recipe.substitute("Sugar", Ingredient::new("Honey")).unwrap();
    assert!(recipe.digests().is_empty());

    let after = hash_recipe(&recipe, &cfg).unwrap();
    assert_ne!(before, after);
    assert_eq!(hash_recipe(&recipe, &cfg).unwrap(), after);
}

#[test]
fn formats_are_cached_separately() {
    let recipe = latte_demo().unwrap();
    let wide = SketchConfig::default();
    let legacy = SketchConfig::default().with_format(HashFormat::Legacy);

    let wide_hash = hash_recipe(&recipe, &wide).unwrap();
    let legacy_hash = hash_recipe(&recipe, &legacy).unwrap();

    assert!(wide_hash.starts_with("v2:"));
    assert!(!legacy_hash.contains(':'));
    assert_eq!(recipe.digests().len(), 2);
    assert_eq!(decode(&wide_hash).unwrap(), decode(&legacy_hash).unwrap());
}

#[test]
fn bucket_count_changes_hash() {
    let recipe = latte_demo().unwrap();
    let small = hash_recipe(&recipe, &SketchConfig::default().with_buckets(16)).unwrap();
    let large = hash_recipe(&recipe, &SketchConfig::default()).unwrap();
    assert_ne!(small, large);
    assert_eq!(decode(&small).unwrap().len(), 16);
    assert_eq!(decode(&large).unwrap().len(), 256);
}
