use thiserror::Error;

use crate::core::types::EntityId;

#[derive(Error, Debug)]
pub enum SupermatterError {
    #[error("Entity not found: {0:?}")]
    EntityNotFound(EntityId),

    #[error("Infrastructure entity {0:?} is not a {1}")]
    WrongInfrastructureKind(EntityId, &'static str),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SupermatterError>;
