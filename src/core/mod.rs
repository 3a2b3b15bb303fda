pub mod config;
pub mod damage;
pub mod error;
pub mod types;

pub use config::{RadioChannel, SupermatterConfig};
pub use damage::{DamageSpecifier, DamageType};
pub use error::{Result, SupermatterError};
pub use types::{Color, EntityId, LocalityId, Position, Seconds, SimClock, TilePos};
