//! Crafting recipes - matching, assembly, and data-file catalogs
//!
//! Each recipe kind implements the same small capability set over a slice
//! of inventory slots and ships its own TOML-backed catalog. Malformed
//! definitions fail at load time with a descriptive error; they are never
//! silently substituted.

pub mod enchanting;
pub mod smelting;

use crate::item::ItemStack;
use thiserror::Error;

/// Capability set shared by all recipe kinds
pub trait Recipe {
    /// Unique identifier within the recipe kind's catalog
    fn id(&self) -> &str;

    /// Whether the given slots satisfy this recipe
    ///
    /// Invalid slot contents are "no match", never an error.
    fn matches(&self, slots: &[ItemStack]) -> bool;

    /// The result stack for the given slots
    fn assemble(&self, slots: &[ItemStack]) -> ItemStack;
}

/// Errors that can occur when loading recipe definitions
#[derive(Debug, Error)]
pub enum RecipeLoadError {
    /// TOML parsing failed
    #[error("Parse error: {0}")]
    ParseError(String),
    /// A recipe referenced an enchantment missing from the registry
    #[error("The enchantment in recipe {recipe} does not exist: {enchantment}")]
    UnknownEnchantment { recipe: String, enchantment: String },
    /// An enchanter recipe declared amount_per_level 0
    #[error("Recipe {0} has amount_per_level 0")]
    ZeroAmountPerLevel(String),
    /// A smelting recipe listed no inputs
    #[error("Recipe {0} has no inputs")]
    NoInputs(String),
    /// A smelting recipe produces nothing
    #[error("Recipe {0} produces nothing")]
    EmptyOutput(String),
    /// File I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
