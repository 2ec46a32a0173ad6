//! Item identity, stacks, and item-keyed registries

pub mod enchantment;
pub mod fuel;
pub mod ingredient;
pub mod stack;

pub use stack::ItemStack;

use serde::{Deserialize, Serialize};

/// String-keyed item identity
///
/// Items are registered by the host; this crate only compares and maps
/// over their identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Well-known items referenced directly by machine and recipe logic
pub mod items {
    use super::ItemId;

    /// The blank book consumed by the enchanter
    pub fn writable_book() -> ItemId {
        ItemId::new("writable_book")
    }

    /// The currency item the enchanter charges per level
    pub fn lapis_lazuli() -> ItemId {
        ItemId::new("lapis_lazuli")
    }

    /// The enchanter's result item
    pub fn enchanted_book() -> ItemId {
        ItemId::new("enchanted_book")
    }
}
