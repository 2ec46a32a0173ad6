//! Integration tests for the enchanter recipe layer
//!
//! These tests verify the data-file pipeline (enchantment registry ->
//! recipe catalog, with fail-fast resolution) and the cost model's
//! invariants across randomized recipe parameters.

use proptest::prelude::*;

use emberworks::item::enchantment::{Enchantment, EnchantmentRegistry};
use emberworks::item::ingredient::Ingredient;
use emberworks::item::{items, ItemId, ItemStack};
use emberworks::recipe::enchanting::{
    EnchanterRecipe, EnchantingCatalog, BOOK_SLOT, LAPIS_SLOT, MATERIAL_SLOT,
};
use emberworks::recipe::{Recipe, RecipeLoadError};

fn enchanter_slots(material: &str, material_count: u32, lapis_count: u32) -> Vec<ItemStack> {
    vec![
        ItemStack::new(items::writable_book(), 1),
        ItemStack::new(ItemId::new(material), material_count),
        ItemStack::new(items::lapis_lazuli(), lapis_count),
    ]
}

// ============================================================================
// Data File Integration Tests
// ============================================================================

#[test]
fn test_load_catalogs_from_data_files() {
    use std::path::Path;

    let registry = EnchantmentRegistry::load_from_toml(Path::new("data/enchantments.toml"))
        .expect("Should load data/enchantments.toml");
    assert!(registry.get("sharpness").is_some());
    assert!(registry.get("mending").is_some());

    let catalog = EnchantingCatalog::load_from_toml(Path::new("data/enchanting.toml"), &registry)
        .expect("Should load data/enchanting.toml");

    let sharpness = catalog.get("sharpness").expect("Should have sharpness recipe");
    assert_eq!(sharpness.amount_per_level(), 12);
    assert_eq!(sharpness.enchantment().max_level, 5);

    let mending = catalog.get("mending").expect("Should have mending recipe");
    assert_eq!(mending.enchantment().max_level, 1);
}

#[test]
fn test_unknown_enchantment_fails_whole_load() {
    let registry = EnchantmentRegistry::with_defaults();
    let content = r#"
[[recipes]]
id = "sharpness"
input = "quartz"
enchantment = "sharpness"
amount_per_level = 12

[[recipes]]
id = "ghost"
input = "quartz"
enchantment = "sharpness_xi"
amount_per_level = 12
"#;
    let result = EnchantingCatalog::parse_toml(content, &registry);
    assert!(
        matches!(result, Err(RecipeLoadError::UnknownEnchantment { .. })),
        "one bad recipe fails the load, nothing is substituted"
    );
}

// ============================================================================
// Matching Scenario Tests
// ============================================================================

#[test]
fn test_match_and_assemble_through_catalog() {
    let registry = EnchantmentRegistry::with_defaults();
    let catalog = EnchantingCatalog::with_defaults(&registry).expect("defaults resolve");

    // 24 quartz = sharpness level 2, which needs 2 lapis
    let slots = enchanter_slots("quartz", 24, 2);
    let recipe = catalog.find_match(&slots).expect("sharpness should match");
    assert_eq!(recipe.id(), "sharpness");

    let result = recipe.result(&slots);
    assert_eq!(result.enchantment, "sharpness");
    assert_eq!(result.level, 2);
    assert!(recipe.assemble(&slots).is(&items::enchanted_book()));
    assert_eq!(recipe.material_amount(&slots), 24);
}

#[test]
fn test_match_fails_one_lapis_short() {
    let registry = EnchantmentRegistry::with_defaults();
    let catalog = EnchantingCatalog::with_defaults(&registry).expect("defaults resolve");

    // Level 3 needs 3 lapis; 2 is one short
    let satisfied = enchanter_slots("quartz", 36, 3);
    let short = enchanter_slots("quartz", 36, 2);
    assert!(catalog.find_match(&satisfied).is_some());
    assert!(catalog.find_match(&short).is_none());
}

#[test]
fn test_match_fails_without_blank_book() {
    let registry = EnchantmentRegistry::with_defaults();
    let catalog = EnchantingCatalog::with_defaults(&registry).expect("defaults resolve");

    let mut slots = enchanter_slots("quartz", 24, 5);
    slots[BOOK_SLOT] = ItemStack::empty();
    assert!(catalog.find_match(&slots).is_none());

    slots[BOOK_SLOT] = ItemStack::new(items::enchanted_book(), 1);
    assert!(catalog.find_match(&slots).is_none(), "already-enchanted book is not blank");
}

#[test]
fn test_level_scenario_from_counts() {
    let recipe = EnchanterRecipe::new(
        "test",
        Ingredient::of("quartz"),
        Enchantment {
            id: "sharpness".into(),
            max_level: 3,
            min_cost_base: 1,
            min_cost_per_level: 11,
        },
        10,
        1.0,
    );
    // 25 material at 10 per level is level 2 of a possible 3
    assert_eq!(recipe.enchantment_level(25), 2);
    let slots = enchanter_slots("quartz", 25, 2);
    assert!(recipe.matches(&slots));
    assert_eq!(recipe.material_amount(&slots), 20, "partial level is not consumed");
}

// ============================================================================
// Cost Model Properties
// ============================================================================

fn arbitrary_recipe() -> impl Strategy<Value = EnchanterRecipe> {
    (1u32..=10, 1u32..=64, 0u32..=40, 0u32..=15, 0.25f64..=2.5).prop_map(
        |(max_level, amount_per_level, base, per_level, modifier)| {
            EnchanterRecipe::new(
                "prop",
                Ingredient::of("quartz"),
                Enchantment {
                    id: "prop".into(),
                    max_level,
                    min_cost_base: base,
                    min_cost_per_level: per_level,
                },
                amount_per_level,
                modifier,
            )
        },
    )
}

proptest! {
    /// level(amount) never decreases as amount grows and never exceeds the cap
    #[test]
    fn prop_level_monotone_and_bounded(
        recipe in arbitrary_recipe(),
        a in 0u32..=10_000,
        b in 0u32..=10_000,
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(recipe.enchantment_level(low) <= recipe.enchantment_level(high));
        prop_assert!(recipe.enchantment_level(high) <= recipe.enchantment().max_level);
    }

    /// The level-skip floor holds: cost(level) >= cost(level + 1) / 2
    #[test]
    fn prop_cost_half_of_next_level_floor(recipe in arbitrary_recipe()) {
        let max_level = recipe.enchantment().max_level;
        for level in 1..max_level {
            prop_assert!(
                recipe.cost(level) >= recipe.cost(level + 1) / 2,
                "cost({}) = {} < cost({}) / 2 = {}",
                level,
                recipe.cost(level),
                level + 1,
                recipe.cost(level + 1) / 2
            );
        }
    }

    /// Every cost is at least 1
    #[test]
    fn prop_cost_at_least_one(recipe in arbitrary_recipe()) {
        for level in 0..=recipe.enchantment().max_level {
            prop_assert!(recipe.cost(level) >= 1);
        }
    }

    /// Lapis: flat 5 for single-level enchantments, else one per level (min 1)
    #[test]
    fn prop_lapis_rule(recipe in arbitrary_recipe(), level in 0u32..=10) {
        let expected = if recipe.enchantment().max_level == 1 {
            5
        } else {
            level.max(1)
        };
        prop_assert_eq!(recipe.lapis_required(level), expected);
    }
}

#[test]
fn test_lapis_slot_must_hold_lapis() {
    let registry = EnchantmentRegistry::with_defaults();
    let catalog = EnchantingCatalog::with_defaults(&registry).expect("defaults resolve");

    let mut slots = enchanter_slots("quartz", 24, 0);
    slots[LAPIS_SLOT] = ItemStack::new(ItemId::new("diamond"), 64);
    assert!(catalog.find_match(&slots).is_none());

    // And the material slot cannot stand in for it
    assert_eq!(slots[MATERIAL_SLOT].count(), 24);
}
