//! Enchanter recipes - material quantity to enchanted book
//!
//! The enchanter charges a blank book, a stack of material, and lapis.
//! The material count determines the enchantment level; the experience
//! cost for a level is floored at half the next level's cost so buying
//! two low-level books and combining them is never cheaper than buying
//! the higher level outright.

use serde::Deserialize;

use super::{Recipe, RecipeLoadError};
use crate::item::enchantment::{Enchantment, EnchantmentRegistry};
use crate::item::ingredient::Ingredient;
use crate::item::{items, ItemStack};

/// Slot holding the blank book
pub const BOOK_SLOT: usize = 0;
/// Slot holding the enchantable material
pub const MATERIAL_SLOT: usize = 1;
/// Slot holding the lapis payment
pub const LAPIS_SLOT: usize = 2;

/// An enchantment at a specific level, as produced by the enchanter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnchantmentInstance {
    pub enchantment: String,
    pub level: u32,
}

/// A single enchanter recipe
///
/// The enchantment is resolved against the registry at load time, so a
/// recipe in hand always refers to a real enchantment.
#[derive(Debug, Clone, PartialEq)]
pub struct EnchanterRecipe {
    id: String,
    input: Ingredient,
    enchantment: Enchantment,
    amount_per_level: u32,
    level_modifier: f64,
}

impl EnchanterRecipe {
    pub fn new(
        id: impl Into<String>,
        input: Ingredient,
        enchantment: Enchantment,
        amount_per_level: u32,
        level_modifier: f64,
    ) -> Self {
        Self {
            id: id.into(),
            input,
            enchantment,
            amount_per_level,
            level_modifier,
        }
    }

    pub fn input(&self) -> &Ingredient {
        &self.input
    }

    pub fn enchantment(&self) -> &Enchantment {
        &self.enchantment
    }

    pub fn amount_per_level(&self) -> u32 {
        self.amount_per_level
    }

    /// Level obtained from `amount` items of material
    pub fn enchantment_level(&self, amount: u32) -> u32 {
        (amount / self.amount_per_level).min(self.enchantment.max_level)
    }

    /// Experience cost before the level-skip floor
    fn raw_cost(&self, level: u32) -> u32 {
        let min = self.enchantment.min_cost(level).max(1) as f64;
        (min * self.level_modifier).round() as u32 + 1
    }

    /// Experience cost for a level
    ///
    /// Below the level cap the cost is floored at half the next level's
    /// cost. The recursion walks up to `max_level` and stops there.
    pub fn cost(&self, level: u32) -> u32 {
        let level = level.min(self.enchantment.max_level);
        let mut cost = self.raw_cost(level);
        if level < self.enchantment.max_level {
            cost = cost.max(self.cost(level + 1) / 2);
        }
        cost.max(1)
    }

    /// Lapis charged for a level
    ///
    /// Single-level enchantments charge a flat 5; others charge one per
    /// level, minimum 1.
    pub fn lapis_required(&self, level: u32) -> u32 {
        let amount = if self.enchantment.max_level == 1 { 5 } else { level };
        amount.max(1)
    }

    /// Experience cost for the material currently in the slots
    pub fn level_cost(&self, slots: &[ItemStack]) -> u32 {
        let count = slots.get(MATERIAL_SLOT).map(ItemStack::count).unwrap_or(0);
        self.cost(self.enchantment_level(count))
    }

    /// Material consumed on craft: the full levels' worth, not the stack
    pub fn material_amount(&self, slots: &[ItemStack]) -> u32 {
        if !self.matches(slots) {
            return 0;
        }
        let count = slots.get(MATERIAL_SLOT).map(ItemStack::count).unwrap_or(0);
        self.enchantment_level(count) * self.amount_per_level
    }

    /// The enchantment instance this craft would produce
    pub fn result(&self, slots: &[ItemStack]) -> EnchantmentInstance {
        let count = slots.get(MATERIAL_SLOT).map(ItemStack::count).unwrap_or(0);
        EnchantmentInstance {
            enchantment: self.enchantment.id.clone(),
            level: self.enchantment_level(count),
        }
    }
}

impl Recipe for EnchanterRecipe {
    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, slots: &[ItemStack]) -> bool {
        let (Some(book), Some(material), Some(lapis)) = (
            slots.get(BOOK_SLOT),
            slots.get(MATERIAL_SLOT),
            slots.get(LAPIS_SLOT),
        ) else {
            return false;
        };

        if !book.is(&items::writable_book()) {
            return false;
        }
        if !self.input.test(material) || material.count() < self.amount_per_level {
            return false;
        }
        let lapis_needed = self.lapis_required(self.enchantment_level(material.count()));
        if !lapis.is(&items::lapis_lazuli()) || lapis.count() < lapis_needed {
            return false;
        }
        true
    }

    fn assemble(&self, _slots: &[ItemStack]) -> ItemStack {
        ItemStack::new(items::enchanted_book(), 1)
    }
}

/// Catalog of all enchanter recipes
#[derive(Debug, Clone, Default)]
pub struct EnchantingCatalog {
    recipes: Vec<EnchanterRecipe>,
}

impl EnchantingCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the stock recipes against a registry (fallback for the data file)
    pub fn with_defaults(registry: &EnchantmentRegistry) -> Result<Self, RecipeLoadError> {
        let defaults = [
            ("sharpness", "quartz", "sharpness", 12, 1.0),
            ("protection", "obsidian", "protection", 4, 1.0),
            ("unbreaking", "obsidian", "unbreaking", 4, 1.0),
            ("fortune", "emerald", "fortune", 1, 1.0),
            ("mending", "ender_pearl", "mending", 4, 1.0),
        ];

        let mut catalog = Self::new();
        for (id, input, enchantment, amount_per_level, level_modifier) in defaults {
            catalog.add(resolve_recipe(
                registry,
                id.to_string(),
                Ingredient::of(input),
                enchantment.to_string(),
                amount_per_level,
                level_modifier,
            )?);
        }
        Ok(catalog)
    }

    /// Add a recipe to the catalog
    pub fn add(&mut self, recipe: EnchanterRecipe) {
        self.recipes.push(recipe);
    }

    /// Get a recipe by ID
    pub fn get(&self, id: &str) -> Option<&EnchanterRecipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// First recipe matching the three enchanter slots
    pub fn find_match(&self, slots: &[ItemStack]) -> Option<&EnchanterRecipe> {
        self.recipes.iter().find(|r| r.matches(slots))
    }

    /// Get all recipes
    pub fn all(&self) -> &[EnchanterRecipe] {
        &self.recipes
    }

    /// Load recipes from a TOML file, resolving enchantments eagerly
    pub fn load_from_toml(
        path: &std::path::Path,
        registry: &EnchantmentRegistry,
    ) -> Result<Self, RecipeLoadError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content, registry)
    }

    /// Parse recipes from a TOML string
    ///
    /// An unknown enchantment id fails the whole load; nothing is
    /// substituted in its place.
    pub fn parse_toml(
        content: &str,
        registry: &EnchantmentRegistry,
    ) -> Result<Self, RecipeLoadError> {
        let toml_data: TomlRecipes =
            toml::from_str(content).map_err(|e| RecipeLoadError::ParseError(e.to_string()))?;

        let mut catalog = Self::new();
        for recipe in toml_data.recipes {
            catalog.add(resolve_recipe(
                registry,
                recipe.id,
                recipe.input,
                recipe.enchantment,
                recipe.amount_per_level,
                recipe.level_modifier,
            )?);
        }
        tracing::info!(recipes = catalog.all().len(), "loaded enchanting catalog");
        Ok(catalog)
    }
}

fn resolve_recipe(
    registry: &EnchantmentRegistry,
    id: String,
    input: Ingredient,
    enchantment: String,
    amount_per_level: u32,
    level_modifier: f64,
) -> Result<EnchanterRecipe, RecipeLoadError> {
    if amount_per_level == 0 {
        return Err(RecipeLoadError::ZeroAmountPerLevel(id));
    }
    let Some(enchantment) = registry.get(&enchantment) else {
        return Err(RecipeLoadError::UnknownEnchantment {
            recipe: id,
            enchantment,
        });
    };
    Ok(EnchanterRecipe::new(
        id,
        input,
        enchantment.clone(),
        amount_per_level,
        level_modifier,
    ))
}

/// TOML representation of the enchanting recipes file
#[derive(Debug, Deserialize)]
struct TomlRecipes {
    recipes: Vec<TomlRecipe>,
}

/// TOML representation of a single recipe
#[derive(Debug, Deserialize)]
struct TomlRecipe {
    id: String,
    input: Ingredient,
    enchantment: String,
    amount_per_level: u32,
    #[serde(default = "default_level_modifier")]
    level_modifier: f64,
}

fn default_level_modifier() -> f64 {
    1.0
}
