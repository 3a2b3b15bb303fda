//! Station - owns every live core and the world they act on

use ahash::AHashMap;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::SupermatterConfig;
use crate::core::error::{Result, SupermatterError};
use crate::core::types::{EntityId, Position, SimClock};
use crate::gas::TileAtmosphere;
use crate::grid::GridRegistry;
use crate::supermatter::{examine, handle_collision, Impactor, Readout, Supermatter, SupermatterEvent};

/// The simulated station: cores, atmosphere, power grid, clock and RNG
pub struct Station {
    pub clock: SimClock,
    pub atmosphere: TileAtmosphere,
    pub grid: GridRegistry,
    /// Global multiplier applied to projectile damage on contact
    pub projectile_damage_modifier: f32,
    pub(crate) supermatters: Vec<Supermatter>,
    index: AHashMap<EntityId, usize>,
    pub(crate) rng: ChaCha8Rng,
}

impl Station {
    pub fn new(seed: u64) -> Self {
        Self {
            clock: SimClock::new(),
            atmosphere: TileAtmosphere::new(),
            grid: GridRegistry::new(),
            projectile_damage_modifier: 1.0,
            supermatters: Vec::new(),
            index: AHashMap::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Place a core with a point light and radiation source
    pub fn spawn_supermatter(&mut self, position: Position, config: SupermatterConfig) -> EntityId {
        self.insert(Supermatter::new(position, config).with_light().with_radiation())
    }

    /// Place a pre-built core (e.g. one without optional components)
    pub fn insert(&mut self, supermatter: Supermatter) -> EntityId {
        let id = supermatter.id;
        self.index.insert(id, self.supermatters.len());
        self.supermatters.push(supermatter);
        tracing::debug!(entity = ?id, "supermatter spawned");
        id
    }

    /// Remove a core (e.g. after the explosion engine deleted it)
    pub fn despawn(&mut self, id: EntityId) -> Option<Supermatter> {
        let idx = self.index.remove(&id)?;
        let removed = self.supermatters.swap_remove(idx);
        if let Some(moved) = self.supermatters.get(idx) {
            self.index.insert(moved.id, idx);
        }
        Some(removed)
    }

    pub fn get(&self, id: EntityId) -> Option<&Supermatter> {
        self.index.get(&id).map(|&idx| &self.supermatters[idx])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Supermatter> {
        let idx = *self.index.get(&id)?;
        self.supermatters.get_mut(idx)
    }

    pub fn supermatters(&self) -> impl Iterator<Item = &Supermatter> + '_ {
        self.supermatters.iter()
    }

    pub fn supermatter_count(&self) -> usize {
        self.supermatters.len()
    }

    /// Contact event against a core, handled immediately outside the tick
    pub fn collide(&mut self, id: EntityId, impactor: &Impactor) -> Result<Option<SupermatterEvent>> {
        let modifier = self.projectile_damage_modifier;
        let sm = self.get_mut(id).ok_or(SupermatterError::EntityNotFound(id))?;
        Ok(handle_collision(sm, impactor, modifier))
    }

    /// Examine a core; draws one jitter value from the station RNG
    pub fn examine(&mut self, id: EntityId, in_details_range: bool) -> Result<Readout> {
        let jitter: f32 = self.rng.gen();
        let sm = self.get(id).ok_or(SupermatterError::EntityNotFound(id))?;
        Ok(examine(&sm.state, &sm.config, in_details_range, jitter))
    }
}
