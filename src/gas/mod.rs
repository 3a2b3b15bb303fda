//! Gas exchange with the atmosphere around a core.
//!
//! The core never owns gas. It asks the atmosphere for a sample at its tile,
//! reacts with it, and merges it back.

pub mod mixture;

use ahash::AHashMap;

use crate::core::types::Position;

pub use mixture::{Gas, GasMixture, T0C, TCMB};

/// Contract the update loop consumes for gas access
pub trait GasExchange {
    /// Total moles at `position`, or `None` when the tile holds no mixture
    /// (space, unsimulated tile)
    fn total_moles(&self, position: Position) -> Option<f32>;

    /// Pull `moles` out of the tile mixture. `None` when there is no mixture.
    fn remove(&mut self, position: Position, moles: f32) -> Option<GasMixture>;

    fn add_heat(&self, sample: &mut GasMixture, energy: f32);

    /// Return a (modified) sample to the tile
    fn merge(&mut self, position: Position, sample: GasMixture);
}

/// Simple per-tile atmosphere: one mixture per tile, no flow between tiles
#[derive(Debug, Default)]
pub struct TileAtmosphere {
    tiles: AHashMap<Position, GasMixture>,
}

impl TileAtmosphere {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tile(&mut self, position: Position, mixture: GasMixture) {
        self.tiles.insert(position, mixture);
    }

    /// Turn a tile into vacuum with no mixture at all
    pub fn clear_tile(&mut self, position: Position) -> Option<GasMixture> {
        self.tiles.remove(&position)
    }

    pub fn tile(&self, position: Position) -> Option<&GasMixture> {
        self.tiles.get(&position)
    }
}

impl GasExchange for TileAtmosphere {
    fn total_moles(&self, position: Position) -> Option<f32> {
        self.tiles.get(&position).map(GasMixture::total_moles)
    }

    fn remove(&mut self, position: Position, moles: f32) -> Option<GasMixture> {
        self.tiles.get_mut(&position).map(|mix| mix.remove(moles))
    }

    fn add_heat(&self, sample: &mut GasMixture, energy: f32) {
        sample.add_heat(energy);
    }

    fn merge(&mut self, position: Position, sample: GasMixture) {
        self.tiles
            .entry(position)
            .or_insert_with(|| GasMixture::new(sample.temperature))
            .merge(&sample);
    }
}
