//! Ingredient predicates for recipe matching
//!
//! An ingredient accepts either a single item or any item from a set.
//! Matching against an empty stack is always false.

use super::{ItemId, ItemStack};
use serde::{Deserialize, Serialize};

/// A predicate over item stacks used by recipe inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ingredient {
    /// Exactly one acceptable item
    Item(ItemId),
    /// Any item from the list is acceptable
    AnyOf(Vec<ItemId>),
}

impl Ingredient {
    pub fn of(item: impl Into<ItemId>) -> Self {
        Ingredient::Item(item.into())
    }

    /// Whether the stack's item satisfies this ingredient
    pub fn test(&self, stack: &ItemStack) -> bool {
        if stack.is_empty() {
            return false;
        }
        match self {
            Ingredient::Item(item) => stack.is(item),
            Ingredient::AnyOf(items) => items.iter().any(|item| stack.is(item)),
        }
    }
}
