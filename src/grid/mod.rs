//! Station power grid: lights, breakers, storage and solar.

pub mod devices;
pub mod registry;

use crate::core::damage::DamageSpecifier;
use crate::core::error::Result;
use crate::core::types::{EntityId, LocalityId};

pub use devices::{Apc, Battery, BulbState, Device, PoweredLight, SolarPanel, StorageKind};
pub use registry::{GridRegistry, Infrastructure};

/// Infrastructure operations the failure cascade relies on
///
/// Queries return snapshots; mutations may fail if the entity is gone.
pub trait GridServices {
    fn lights_in(&self, locality: LocalityId) -> Vec<EntityId>;

    /// Breakers with their current enabled state
    fn breakers_in(&self, locality: LocalityId) -> Vec<(EntityId, bool)>;

    fn storage_in(&self, locality: LocalityId) -> Vec<(EntityId, StorageKind)>;

    fn solar_panels_in(&self, locality: LocalityId) -> Vec<EntityId>;

    fn destroy_bulb(&mut self, id: EntityId) -> Result<()>;

    fn toggle_breaker(&mut self, id: EntityId) -> Result<()>;

    fn set_charge(&mut self, id: EntityId, charge: f32) -> Result<()>;

    fn set_damage(&mut self, id: EntityId, damage: &DamageSpecifier) -> Result<()>;
}
