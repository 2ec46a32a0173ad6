//! Machine configuration with documented constants
//!
//! All tunable machine numbers are collected here with explanations of
//! their purpose and how they interact with each other.

/// Configuration for the machine systems
///
/// These values pace fuel economy and crafting speed.
/// Changing them affects how long machines run per unit of fuel.
#[derive(Debug, Clone)]
pub struct MachinesConfig {
    // === ENERGY ===
    /// Energy produced per tick by a stirling generator
    ///
    /// The primitive smelter's combustion source yields half of this
    /// while burning. At the default (40), a 1600-tick piece of coal is
    /// worth 32000 energy through a primitive machine.
    pub stirling_generator_production: u32,

    /// Maximum energy a smelting task may draw per tick
    ///
    /// Caps crafting speed independently of how much the energy source
    /// could supply. At 20, a 2000-energy recipe takes at least 100 ticks.
    pub smelter_max_draw_per_tick: u32,

    /// Energy buffer capacity of the standard (powered) alloy smelter
    pub alloy_smelter_capacity: u32,

    // === RENDERING ===
    /// Whether conduit facades start visible
    ///
    /// Runtime toggling goes through `conduit::facade`; this only seeds
    /// the flag at startup.
    pub facades_visible_default: bool,
}

impl Default for MachinesConfig {
    fn default() -> Self {
        Self {
            stirling_generator_production: 40,
            smelter_max_draw_per_tick: 20,
            alloy_smelter_capacity: 100_000,
            facades_visible_default: true,
        }
    }
}

impl MachinesConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.stirling_generator_production == 0 {
            return Err("stirling_generator_production must be positive".into());
        }

        if self.smelter_max_draw_per_tick == 0 {
            return Err("smelter_max_draw_per_tick must be positive".into());
        }

        // A buffer smaller than one tick of draw can never start a craft
        if self.alloy_smelter_capacity < self.smelter_max_draw_per_tick {
            return Err(format!(
                "alloy_smelter_capacity ({}) should be >= smelter_max_draw_per_tick ({})",
                self.alloy_smelter_capacity, self.smelter_max_draw_per_tick
            ));
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<MachinesConfig> = OnceLock::new();

/// Get the global machines config (initializes with defaults if not set)
pub fn config() -> &'static MachinesConfig {
    CONFIG.get_or_init(MachinesConfig::default)
}

/// Set the global machines config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: MachinesConfig) -> Result<(), MachinesConfig> {
    CONFIG.set(config)
}
