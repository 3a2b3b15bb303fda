//! Locality-indexed registry of grid infrastructure
//!
//! Entities live in one arena keyed by id; a secondary index maps each
//! locality to the ids inside it so a cascade only touches its own level.

use ahash::AHashMap;

use crate::core::damage::DamageSpecifier;
use crate::core::error::{Result, SupermatterError};
use crate::core::types::{EntityId, LocalityId, Position};
use crate::grid::devices::{Apc, Battery, BulbState, Device, PoweredLight, SolarPanel, StorageKind};
use crate::grid::GridServices;

/// One placed piece of infrastructure
#[derive(Debug, Clone)]
pub struct Infrastructure {
    pub id: EntityId,
    pub position: Position,
    pub device: Device,
}

#[derive(Debug, Default)]
pub struct GridRegistry {
    entities: AHashMap<EntityId, Infrastructure>,
    by_locality: AHashMap<LocalityId, Vec<EntityId>>,
}

impl GridRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, position: Position, device: Device) -> EntityId {
        let id = EntityId::new();
        self.entities.insert(
            id,
            Infrastructure {
                id,
                position,
                device,
            },
        );
        self.by_locality.entry(position.locality).or_default().push(id);
        id
    }

    pub fn spawn_light(&mut self, position: Position) -> EntityId {
        self.spawn(position, Device::Light(PoweredLight::default()))
    }

    pub fn spawn_apc(&mut self, position: Position) -> EntityId {
        self.spawn(position, Device::Breaker(Apc::default()))
    }

    pub fn spawn_storage(&mut self, position: Position, kind: StorageKind, max_charge: f32) -> EntityId {
        self.spawn(position, Device::Storage(Battery::new(kind, max_charge)))
    }

    pub fn spawn_solar_panel(&mut self, position: Position) -> EntityId {
        self.spawn(position, Device::Solar(SolarPanel::default()))
    }

    pub fn despawn(&mut self, id: EntityId) -> Option<Infrastructure> {
        let removed = self.entities.remove(&id)?;
        if let Some(ids) = self.by_locality.get_mut(&removed.position.locality) {
            ids.retain(|&e| e != id);
        }
        Some(removed)
    }

    pub fn get(&self, id: EntityId) -> Option<&Infrastructure> {
        self.entities.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All live infrastructure in a locality
    pub fn in_locality(&self, locality: LocalityId) -> impl Iterator<Item = &Infrastructure> + '_ {
        self.by_locality
            .get(&locality)
            .into_iter()
            .flatten()
            .filter_map(move |id| self.entities.get(id))
    }

    fn collect_ids<F>(&self, locality: LocalityId, pick: F) -> Vec<EntityId>
    where
        F: Fn(&Device) -> bool,
    {
        self.in_locality(locality)
            .filter(|infra| pick(&infra.device))
            .map(|infra| infra.id)
            .collect()
    }

    fn device_mut(&mut self, id: EntityId) -> Result<&mut Device> {
        self.entities
            .get_mut(&id)
            .map(|infra| &mut infra.device)
            .ok_or(SupermatterError::EntityNotFound(id))
    }

    pub fn bulb_state(&self, id: EntityId) -> Option<BulbState> {
        match self.get(id).map(|infra| &infra.device) {
            Some(Device::Light(light)) => Some(light.bulb),
            _ => None,
        }
    }

    pub fn breaker_enabled(&self, id: EntityId) -> Option<bool> {
        match self.get(id).map(|infra| &infra.device) {
            Some(Device::Breaker(apc)) => Some(apc.main_breaker_enabled),
            _ => None,
        }
    }

    pub fn charge(&self, id: EntityId) -> Option<f32> {
        match self.get(id).map(|infra| &infra.device) {
            Some(Device::Storage(battery)) => Some(battery.charge),
            _ => None,
        }
    }

    pub fn solar_damage(&self, id: EntityId) -> Option<&DamageSpecifier> {
        match self.get(id).map(|infra| &infra.device) {
            Some(Device::Solar(panel)) => Some(&panel.damage),
            _ => None,
        }
    }
}

impl GridServices for GridRegistry {
    fn lights_in(&self, locality: LocalityId) -> Vec<EntityId> {
        self.collect_ids(locality, |d| matches!(d, Device::Light(_)))
    }

    fn breakers_in(&self, locality: LocalityId) -> Vec<(EntityId, bool)> {
        self.in_locality(locality)
            .filter_map(|infra| match &infra.device {
                Device::Breaker(apc) => Some((infra.id, apc.main_breaker_enabled)),
                _ => None,
            })
            .collect()
    }

    fn storage_in(&self, locality: LocalityId) -> Vec<(EntityId, StorageKind)> {
        self.in_locality(locality)
            .filter_map(|infra| match &infra.device {
                Device::Storage(battery) => Some((infra.id, battery.kind)),
                _ => None,
            })
            .collect()
    }

    fn solar_panels_in(&self, locality: LocalityId) -> Vec<EntityId> {
        self.collect_ids(locality, |d| matches!(d, Device::Solar(_)))
    }

    fn destroy_bulb(&mut self, id: EntityId) -> Result<()> {
        match self.device_mut(id)? {
            Device::Light(light) => {
                light.bulb = BulbState::Broken;
                Ok(())
            }
            _ => Err(SupermatterError::WrongInfrastructureKind(id, "light")),
        }
    }

    fn toggle_breaker(&mut self, id: EntityId) -> Result<()> {
        match self.device_mut(id)? {
            Device::Breaker(apc) => {
                apc.main_breaker_enabled = !apc.main_breaker_enabled;
                Ok(())
            }
            _ => Err(SupermatterError::WrongInfrastructureKind(id, "breaker")),
        }
    }

    fn set_charge(&mut self, id: EntityId, charge: f32) -> Result<()> {
        match self.device_mut(id)? {
            Device::Storage(battery) => {
                battery.set_charge(charge);
                Ok(())
            }
            _ => Err(SupermatterError::WrongInfrastructureKind(id, "storage")),
        }
    }

    fn set_damage(&mut self, id: EntityId, damage: &DamageSpecifier) -> Result<()> {
        match self.device_mut(id)? {
            Device::Solar(panel) => {
                panel.damage = damage.clone();
                Ok(())
            }
            _ => Err(SupermatterError::WrongInfrastructureKind(id, "solar panel")),
        }
    }
}
