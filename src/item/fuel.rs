//! Fuel registry - burn durations keyed by item identity
//!
//! Machines ask the registry how long an item burns and what (if anything)
//! is left behind in the slot after consuming one unit. Items absent from
//! the registry are simply not fuel.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ItemId;

/// Burn behavior of a single fuel item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelProperties {
    /// Ticks one unit of this fuel sustains burning
    pub burn_ticks: u32,
    /// Item left in the slot after consuming one unit (e.g. an empty bucket)
    #[serde(default)]
    pub remainder: Option<ItemId>,
}

/// Errors that can occur when loading fuel definitions
#[derive(Debug, Error)]
pub enum FuelLoadError {
    /// TOML parsing failed
    #[error("Parse error: {0}")]
    ParseError(String),
    /// A fuel entry declared a zero burn duration
    #[error("Fuel {0} has a zero burn duration")]
    ZeroBurnTicks(String),
    /// File I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Registry of all burnable items
#[derive(Debug, Clone, Default)]
pub struct FuelRegistry {
    fuels: AHashMap<ItemId, FuelProperties>,
}

impl FuelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the stock fuel set (hardcoded fallback for the data file)
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(ItemId::new("coal"), FuelProperties { burn_ticks: 1600, remainder: None });
        registry.register(ItemId::new("charcoal"), FuelProperties { burn_ticks: 1600, remainder: None });
        registry.register(ItemId::new("coal_block"), FuelProperties { burn_ticks: 16000, remainder: None });
        registry.register(ItemId::new("blaze_rod"), FuelProperties { burn_ticks: 2400, remainder: None });
        registry.register(ItemId::new("oak_planks"), FuelProperties { burn_ticks: 300, remainder: None });
        registry.register(ItemId::new("stick"), FuelProperties { burn_ticks: 100, remainder: None });
        registry.register(
            ItemId::new("lava_bucket"),
            FuelProperties {
                burn_ticks: 20000,
                remainder: Some(ItemId::new("bucket")),
            },
        );

        registry
    }

    /// Register a fuel, replacing any previous entry for the item
    pub fn register(&mut self, item: ItemId, properties: FuelProperties) {
        self.fuels.insert(item, properties);
    }

    /// Burn duration lookup; 0 means "not fuel"
    pub fn burn_ticks(&self, item: &ItemId) -> u32 {
        self.fuels.get(item).map(|p| p.burn_ticks).unwrap_or(0)
    }

    pub fn properties(&self, item: &ItemId) -> Option<&FuelProperties> {
        self.fuels.get(item)
    }

    pub fn is_fuel(&self, item: &ItemId) -> bool {
        self.burn_ticks(item) > 0
    }

    pub fn len(&self) -> usize {
        self.fuels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fuels.is_empty()
    }

    /// Load fuel definitions from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self, FuelLoadError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse fuel definitions from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self, FuelLoadError> {
        let toml_data: TomlFuels =
            toml::from_str(content).map_err(|e| FuelLoadError::ParseError(e.to_string()))?;

        let mut registry = Self::new();
        for fuel in toml_data.fuels {
            if fuel.burn_ticks == 0 {
                return Err(FuelLoadError::ZeroBurnTicks(fuel.item.to_string()));
            }
            registry.register(
                fuel.item,
                FuelProperties {
                    burn_ticks: fuel.burn_ticks,
                    remainder: fuel.remainder,
                },
            );
        }
        tracing::info!(fuels = registry.len(), "loaded fuel registry");
        Ok(registry)
    }
}

/// TOML representation of the fuels file
#[derive(Debug, Deserialize)]
struct TomlFuels {
    fuels: Vec<TomlFuel>,
}

#[derive(Debug, Deserialize)]
struct TomlFuel {
    item: ItemId,
    burn_ticks: u32,
    #[serde(default)]
    remainder: Option<ItemId>,
}
