//! Gas mixture value type
//!
//! A mixture is a set of mole counts at a single temperature. The core only
//! needs to read moles and temperature, adjust moles, and hand the sample
//! back; heat capacity exists so that added heat and merges conserve energy.

use serde::{Deserialize, Serialize};

/// 0 degrees Celsius in Kelvin
pub const T0C: f32 = 273.15;

/// Cosmic background temperature; nothing cools below this
pub const TCMB: f32 = 2.7;

/// Below this many moles a mixture is treated as empty
pub const MINIMUM_MOLES: f32 = 0.000_000_5;

/// Gases tracked by the mixture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gas {
    Oxygen,
    Nitrogen,
    CarbonDioxide,
    Plasma,
}

impl Gas {
    pub const COUNT: usize = 4;

    pub fn all() -> &'static [Gas] {
        &[Gas::Oxygen, Gas::Nitrogen, Gas::CarbonDioxide, Gas::Plasma]
    }

    fn index(self) -> usize {
        match self {
            Gas::Oxygen => 0,
            Gas::Nitrogen => 1,
            Gas::CarbonDioxide => 2,
            Gas::Plasma => 3,
        }
    }

    /// Molar specific heat, J/(mol*K)
    pub fn specific_heat(self) -> f32 {
        match self {
            Gas::Oxygen => 20.0,
            Gas::Nitrogen => 30.0,
            Gas::CarbonDioxide => 30.0,
            Gas::Plasma => 200.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasMixture {
    moles: [f32; Gas::COUNT],
    pub temperature: f32,
}

impl Default for GasMixture {
    fn default() -> Self {
        Self {
            moles: [0.0; Gas::COUNT],
            temperature: TCMB,
        }
    }
}

impl GasMixture {
    pub fn new(temperature: f32) -> Self {
        Self {
            moles: [0.0; Gas::COUNT],
            temperature: temperature.max(TCMB),
        }
    }

    /// Builder-style helper for tests and scenarios
    pub fn with_moles(mut self, gas: Gas, moles: f32) -> Self {
        self.set_moles(gas, moles);
        self
    }

    pub fn moles(&self, gas: Gas) -> f32 {
        self.moles[gas.index()]
    }

    pub fn set_moles(&mut self, gas: Gas, moles: f32) {
        self.moles[gas.index()] = moles.max(0.0);
    }

    /// Add (or with a negative amount, remove) moles of one gas
    pub fn adjust_moles(&mut self, gas: Gas, delta: f32) {
        let idx = gas.index();
        self.moles[idx] = (self.moles[idx] + delta).max(0.0);
    }

    pub fn total_moles(&self) -> f32 {
        self.moles.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_moles() < MINIMUM_MOLES
    }

    /// Total heat capacity, J/K
    pub fn heat_capacity(&self) -> f32 {
        Gas::all()
            .iter()
            .map(|gas| self.moles(*gas) * gas.specific_heat())
            .sum()
    }

    pub fn thermal_energy(&self) -> f32 {
        self.heat_capacity() * self.temperature
    }

    /// Split off `amount` moles proportionally across all gases
    ///
    /// The removed sample keeps this mixture's temperature.
    pub fn remove(&mut self, amount: f32) -> GasMixture {
        let total = self.total_moles();
        let mut removed = GasMixture::new(self.temperature);
        if total <= 0.0 || amount <= 0.0 {
            return removed;
        }

        let ratio = (amount / total).min(1.0);
        for gas in Gas::all() {
            let taken = self.moles(*gas) * ratio;
            removed.set_moles(*gas, taken);
            self.adjust_moles(*gas, -taken);
        }
        removed
    }

    /// Add thermal energy in joules. Empty mixtures cannot hold heat.
    pub fn add_heat(&mut self, energy: f32) {
        let capacity = self.heat_capacity();
        if capacity <= 0.0 || self.is_empty() {
            return;
        }
        self.temperature = (self.temperature + energy / capacity).max(TCMB);
    }

    /// Fold `other` into this mixture, conserving thermal energy
    pub fn merge(&mut self, other: &GasMixture) {
        let own_capacity = self.heat_capacity();
        let other_capacity = other.heat_capacity();
        let combined = own_capacity + other_capacity;
        if combined > 0.0 {
            self.temperature = (self.thermal_energy() + other.thermal_energy()) / combined;
        }
        for gas in Gas::all() {
            self.adjust_moles(*gas, other.moles(*gas));
        }
    }
}
