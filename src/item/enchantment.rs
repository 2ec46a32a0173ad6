//! Enchantment definitions and registry
//!
//! The host game owns real enchantment behavior; recipes only need each
//! enchantment's level cap and its minimum-cost curve. The curve is
//! modeled as a base cost plus a per-level increment, which keeps it
//! monotonically non-decreasing in level.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on `max_level` accepted at load time
///
/// The enchant cost recursion walks from a level up to `max_level`, so
/// the cap keeps that walk trivially bounded.
pub const MAX_SUPPORTED_LEVEL: u32 = 32;

/// A single enchantment definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enchantment {
    /// Unique identifier, e.g. "sharpness"
    pub id: String,
    /// Highest obtainable level (>= 1)
    pub max_level: u32,
    /// Minimum experience cost at level 1
    pub min_cost_base: u32,
    /// Cost increment per level above 1
    pub min_cost_per_level: u32,
}

impl Enchantment {
    /// Minimum experience cost for the given level
    ///
    /// Non-decreasing in `level`; level 0 costs the same as level 1.
    pub fn min_cost(&self, level: u32) -> u32 {
        self.min_cost_base + self.min_cost_per_level * level.saturating_sub(1)
    }
}

/// Errors that can occur when loading enchantment definitions
#[derive(Debug, Error)]
pub enum EnchantmentLoadError {
    /// TOML parsing failed
    #[error("Parse error: {0}")]
    ParseError(String),
    /// An enchantment declared max_level 0
    #[error("Enchantment {0} has max_level 0")]
    ZeroMaxLevel(String),
    /// An enchantment declared an unsupported level cap
    #[error("Enchantment {id} has max_level {max_level}, supported maximum is {MAX_SUPPORTED_LEVEL}")]
    MaxLevelTooHigh { id: String, max_level: u32 },
    /// File I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Registry of known enchantments
#[derive(Debug, Clone, Default)]
pub struct EnchantmentRegistry {
    enchantments: AHashMap<String, Enchantment>,
}

impl EnchantmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the stock enchantment set (hardcoded fallback for the data file)
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for enchantment in [
            Enchantment { id: "sharpness".into(), max_level: 5, min_cost_base: 1, min_cost_per_level: 11 },
            Enchantment { id: "protection".into(), max_level: 4, min_cost_base: 1, min_cost_per_level: 11 },
            Enchantment { id: "efficiency".into(), max_level: 5, min_cost_base: 1, min_cost_per_level: 10 },
            Enchantment { id: "unbreaking".into(), max_level: 3, min_cost_base: 5, min_cost_per_level: 8 },
            Enchantment { id: "fortune".into(), max_level: 3, min_cost_base: 15, min_cost_per_level: 9 },
            Enchantment { id: "mending".into(), max_level: 1, min_cost_base: 25, min_cost_per_level: 0 },
        ] {
            registry.register(enchantment);
        }
        registry
    }

    /// Register an enchantment, replacing any previous entry with the same id
    pub fn register(&mut self, enchantment: Enchantment) {
        self.enchantments.insert(enchantment.id.clone(), enchantment);
    }

    pub fn get(&self, id: &str) -> Option<&Enchantment> {
        self.enchantments.get(id)
    }

    pub fn len(&self) -> usize {
        self.enchantments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enchantments.is_empty()
    }

    /// Load enchantment definitions from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self, EnchantmentLoadError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse enchantment definitions from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self, EnchantmentLoadError> {
        let toml_data: TomlEnchantments =
            toml::from_str(content).map_err(|e| EnchantmentLoadError::ParseError(e.to_string()))?;

        let mut registry = Self::new();
        for enchantment in toml_data.enchantments {
            if enchantment.max_level == 0 {
                return Err(EnchantmentLoadError::ZeroMaxLevel(enchantment.id));
            }
            if enchantment.max_level > MAX_SUPPORTED_LEVEL {
                return Err(EnchantmentLoadError::MaxLevelTooHigh {
                    id: enchantment.id,
                    max_level: enchantment.max_level,
                });
            }
            registry.register(enchantment);
        }
        tracing::info!(enchantments = registry.len(), "loaded enchantment registry");
        Ok(registry)
    }
}

/// TOML representation of the enchantments file
#[derive(Debug, Deserialize)]
struct TomlEnchantments {
    enchantments: Vec<Enchantment>,
}
