//! Damage specifiers carried by projectiles and applied by the cascade.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Kinds of damage an entity can receive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    Blunt,
    Slash,
    Piercing,
    Heat,
    Shock,
    Radiation,
    Structural,
}

/// A bundle of per-type damage amounts. Negative amounts heal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageSpecifier {
    amounts: AHashMap<DamageType, f32>,
}

impl DamageSpecifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(damage_type: DamageType, amount: f32) -> Self {
        let mut spec = Self::new();
        spec.add(damage_type, amount);
        spec
    }

    pub fn add(&mut self, damage_type: DamageType, amount: f32) {
        *self.amounts.entry(damage_type).or_insert(0.0) += amount;
    }

    pub fn get(&self, damage_type: DamageType) -> f32 {
        self.amounts.get(&damage_type).copied().unwrap_or(0.0)
    }

    /// Multiply every entry by `modifier` (e.g. the universal projectile modifier)
    pub fn scaled(&self, modifier: f32) -> Self {
        Self {
            amounts: self
                .amounts
                .iter()
                .map(|(ty, amount)| (*ty, amount * modifier))
                .collect(),
        }
    }

    pub fn any_positive(&self) -> bool {
        self.amounts.values().any(|amount| *amount > 0.0)
    }

    /// Sum of all entries as a single scalar
    pub fn total(&self) -> f32 {
        self.amounts.values().sum()
    }
}
