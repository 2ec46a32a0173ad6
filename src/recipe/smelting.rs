//! Alloy smelting recipes - item inputs plus an energy cost
//!
//! Recipes specify input item amounts, the output stack, and the total
//! energy a task must pay before the output is produced.

use serde::{Deserialize, Serialize};

use super::{Recipe, RecipeLoadError};
use crate::item::{ItemId, ItemStack};

/// An alloy smelting recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmeltingRecipe {
    /// Unique identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Input items consumed, as (item, amount) pairs
    pub inputs: Vec<(ItemId, u32)>,
    /// Output item produced
    pub output: ItemId,
    /// Output count per completed task
    pub output_count: u32,
    /// Total energy a task must consume to complete
    pub energy_cost: u32,
}

impl SmeltingRecipe {
    /// Total of `amount` across all slots holding `item`
    fn available(slots: &[ItemStack], item: &ItemId) -> u32 {
        slots.iter().filter(|s| s.is(item)).map(|s| s.count()).sum()
    }

    /// Remove `amount` of `item` from the slots, front to back
    ///
    /// Callers check `matches` first; any shortfall is simply left
    /// unconsumed.
    pub fn consume_inputs(&self, slots: &mut [ItemStack]) {
        for (item, amount) in &self.inputs {
            let mut remaining = *amount;
            for slot in slots.iter_mut() {
                if remaining == 0 {
                    break;
                }
                if slot.is(item) {
                    let taken = remaining.min(slot.count());
                    slot.shrink(taken);
                    remaining -= taken;
                }
            }
        }
    }
}

impl Recipe for SmeltingRecipe {
    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, slots: &[ItemStack]) -> bool {
        self.inputs
            .iter()
            .all(|(item, amount)| Self::available(slots, item) >= *amount)
    }

    fn assemble(&self, _slots: &[ItemStack]) -> ItemStack {
        ItemStack::new(self.output.clone(), self.output_count)
    }
}

/// Catalog of all alloy smelting recipes
#[derive(Debug, Clone, Default)]
pub struct SmeltingCatalog {
    recipes: Vec<SmeltingRecipe>,
}

impl SmeltingCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the stock alloys (hardcoded fallback for the data file)
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();

        catalog.add(SmeltingRecipe {
            id: "electrical_steel".into(),
            name: "Electrical Steel".into(),
            inputs: vec![
                (ItemId::new("iron_ingot"), 1),
                (ItemId::new("coal_powder"), 1),
                (ItemId::new("silicon"), 1),
            ],
            output: ItemId::new("electrical_steel"),
            output_count: 1,
            energy_cost: 2400,
        });

        catalog.add(SmeltingRecipe {
            id: "energetic_alloy".into(),
            name: "Energetic Alloy".into(),
            inputs: vec![
                (ItemId::new("gold_ingot"), 1),
                (ItemId::new("redstone"), 1),
                (ItemId::new("glowstone_dust"), 1),
            ],
            output: ItemId::new("energetic_alloy"),
            output_count: 1,
            energy_cost: 4800,
        });

        catalog.add(SmeltingRecipe {
            id: "conductive_iron".into(),
            name: "Conductive Iron".into(),
            inputs: vec![(ItemId::new("iron_ingot"), 1), (ItemId::new("redstone"), 1)],
            output: ItemId::new("conductive_iron"),
            output_count: 1,
            energy_cost: 2400,
        });

        catalog
    }

    /// Add a recipe to the catalog
    pub fn add(&mut self, recipe: SmeltingRecipe) {
        self.recipes.push(recipe);
    }

    /// Get a recipe by ID
    pub fn get(&self, id: &str) -> Option<&SmeltingRecipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// First recipe matching the given input slots
    pub fn find_match(&self, slots: &[ItemStack]) -> Option<&SmeltingRecipe> {
        self.recipes.iter().find(|r| r.matches(slots))
    }

    /// Get all recipes
    pub fn all(&self) -> &[SmeltingRecipe] {
        &self.recipes
    }

    /// Load recipes from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self, RecipeLoadError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse recipes from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self, RecipeLoadError> {
        let toml_data: TomlRecipes =
            toml::from_str(content).map_err(|e| RecipeLoadError::ParseError(e.to_string()))?;

        let mut catalog = Self::new();
        for recipe in toml_data.recipes {
            catalog.add(recipe.into_recipe()?);
        }
        tracing::info!(recipes = catalog.all().len(), "loaded smelting catalog");
        Ok(catalog)
    }
}

/// TOML representation of the smelting recipes file
#[derive(Debug, Deserialize)]
struct TomlRecipes {
    recipes: Vec<TomlRecipe>,
}

/// TOML representation of a single recipe
#[derive(Debug, Deserialize)]
struct TomlRecipe {
    id: String,
    name: String,
    inputs: Vec<TomlItemAmount>,
    output: ItemId,
    #[serde(default = "default_output_count")]
    output_count: u32,
    energy_cost: u32,
}

fn default_output_count() -> u32 {
    1
}

/// TOML representation of an item amount
#[derive(Debug, Deserialize)]
struct TomlItemAmount {
    item: ItemId,
    amount: u32,
}

impl TomlRecipe {
    fn into_recipe(self) -> Result<SmeltingRecipe, RecipeLoadError> {
        if self.inputs.is_empty() {
            return Err(RecipeLoadError::NoInputs(self.id));
        }
        if self.output_count == 0 {
            return Err(RecipeLoadError::EmptyOutput(self.id));
        }

        Ok(SmeltingRecipe {
            inputs: self.inputs.into_iter().map(|ia| (ia.item, ia.amount)).collect(),
            id: self.id,
            name: self.name,
            output: self.output,
            output_count: self.output_count,
            energy_cost: self.energy_cost,
        })
    }
}
