use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmberError {
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Unknown machine: {0:?}")]
    MachineNotFound(crate::core::types::MachineId),

    #[error("Recipe data error: {0}")]
    RecipeData(#[from] crate::recipe::RecipeLoadError),

    #[error("Fuel data error: {0}")]
    FuelData(#[from] crate::item::fuel::FuelLoadError),

    #[error("Enchantment data error: {0}")]
    EnchantmentData(#[from] crate::item::enchantment::EnchantmentLoadError),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EmberError>;
