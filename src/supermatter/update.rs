//! Per-tick update for a single core
//!
//! Order within a tick:
//! classify -> branch on tier (cascade / light + announce / light) ->
//! gas reaction -> radiation -> passive power decay.
//!
//! A terminal tier fires the cascade and ends the tick for that core.

use rand::Rng;

use crate::core::config::SupermatterConfig;
use crate::core::types::Seconds;
use crate::gas::{Gas, GasExchange, GasMixture, T0C};
use crate::grid::GridServices;
use crate::supermatter::announcer::{announce, warning_due};
use crate::supermatter::cascade::trigger_cascade;
use crate::supermatter::events::SupermatterEvent;
use crate::supermatter::state::{RadiationSource, SupermatterState};
use crate::supermatter::threshold::{classify, Tier};
use crate::supermatter::Supermatter;

/// Oxygen ratio above which the reaction runs hot and glows
const GLOW_OXYGEN_RATIO: f32 = 0.8;
const EQUILIBRIUM_POWER_GLOWING: f32 = 400.0;
const EQUILIBRIUM_POWER_NORMAL: f32 = 250.0;

/// Most gas damage steps applied in one tick after a long frame
const MAX_CATCH_UP_STEPS: u32 = 8;

/// Radiation never reaches further than this many tiles
const MAX_RADIATION_RANGE: f32 = 31.0;

/// Advance one core by `frame_time` seconds
pub fn update_supermatter<G, S, R>(
    sm: &mut Supermatter,
    frame_time: f32,
    now: Seconds,
    gas: &mut G,
    grid: &mut S,
    rng: &mut R,
) -> Vec<SupermatterEvent>
where
    G: GasExchange + ?Sized,
    S: GridServices + ?Sized,
    R: Rng + ?Sized,
{
    let mut events = Vec::new();

    if sm.state.exploded {
        return events;
    }

    let tier = classify(sm.state.damage, &sm.config);
    if sm.state.tier != Some(tier) {
        tracing::debug!(entity = ?sm.id, ?tier, damage = sm.state.damage, "tier changed");
    }

    if tier == Tier::Terminal {
        radio(sm, now, &mut events);
        sm.state.exploded = true;
        sm.state.tier = Some(tier);
        events.extend(trigger_cascade(sm, grid, rng));
        return events;
    }

    shift_light(sm, tier, &mut events);
    if tier.announces() && warning_due(&sm.state, &sm.config, now) {
        radio(sm, now, &mut events);
    }

    react(sm, frame_time, gas, &mut events);

    if let Some(source) = sm.radiation.as_mut() {
        emit_radiation(source, sm.state.power, &sm.config);
    }

    decay_power(&mut sm.state, &sm.config);

    events
}

fn radio(sm: &mut Supermatter, now: Seconds, events: &mut Vec<SupermatterEvent>) {
    for announcement in announce(&mut sm.state, &sm.config, now) {
        tracing::info!(
            entity = ?sm.id,
            channel = %announcement.channel,
            message = %announcement.message,
            "supermatter announcement"
        );
        events.push(SupermatterEvent::Radio {
            entity: sm.id,
            channel: announcement.channel,
            message: announcement.message,
        });
    }
}

/// Move the point light to the tier's settings; no light, no shift
fn shift_light(sm: &mut Supermatter, tier: Tier, events: &mut Vec<SupermatterEvent>) {
    let previous = sm.state.tier.replace(tier);
    let Some(light) = sm.light.as_mut() else {
        return;
    };
    let Some((energy, color)) = tier.light(&sm.config) else {
        return;
    };
    if previous == Some(tier) && light.energy == energy && light.color == color {
        return;
    }
    light.energy = energy;
    light.color = color;
    events.push(SupermatterEvent::LightShifted {
        entity: sm.id,
        energy,
        color,
    });
}

/// Pull a gas sample, step damage, grow power, and release reaction products
fn react<G>(sm: &mut Supermatter, frame_time: f32, gas: &mut G, events: &mut Vec<SupermatterEvent>)
where
    G: GasExchange + ?Sized,
{
    let config = &sm.config;
    let state = &mut sm.state;

    let removed = gas
        .total_moles(sm.position)
        .and_then(|total| gas.remove(sm.position, config.gas_efficiency * total))
        .filter(|sample| sample.total_moles() > 0.0);

    state.damage_accumulator += frame_time;

    let steps = take_due_damage_steps(state, config);

    let Some(mut removed) = removed else {
        // The vacuum floor does not depend on prior damage; one step suffices
        if steps > 0 {
            vacuum_damage_step(state, config);
        }
        return;
    };

    for _ in 0..steps.min(MAX_CATCH_UP_STEPS) {
        gas_damage_step(state, config, removed.temperature);
    }

    let oxygen = oxygen_ratio(&removed, config.nitrogen_retardation_factor);
    let glowing = oxygen > GLOW_OXYGEN_RATIO;
    let equilibrium_power = if glowing {
        EQUILIBRIUM_POWER_GLOWING
    } else {
        EQUILIBRIUM_POWER_NORMAL
    };
    if glowing != state.glowing {
        state.glowing = glowing;
        events.push(SupermatterEvent::GlowChanged {
            entity: sm.id,
            glowing,
        });
    }

    let temp_factor = (equilibrium_power / config.decay_factor).powi(3) / 800.0;
    state.power = (removed.temperature * temp_factor * oxygen + state.power).max(0.0);

    let device_energy = state.power * config.reaction_power_modifier * frame_time * 2.0;
    removed.adjust_moles(
        Gas::Plasma,
        (device_energy / config.plasma_release_modifier).max(0.0),
    );
    removed.adjust_moles(
        Gas::Oxygen,
        ((device_energy + removed.temperature - T0C) / config.oxygen_release_modifier).max(0.0),
    );

    gas.add_heat(&mut removed, config.thermal_release_modifier * device_energy);
    gas.merge(sm.position, removed);
}

/// Withdraw every whole damage interval from the bank and return how many
/// were due. The leftover stays below `damage_frequency`. A non-positive
/// frequency (or a non-finite bank) never steps and clears the bank.
pub fn take_due_damage_steps(state: &mut SupermatterState, config: &SupermatterConfig) -> u32 {
    let frequency = config.damage_frequency;
    if frequency.is_nan() || frequency <= 0.0 || !state.damage_accumulator.is_finite() {
        state.damage_accumulator = 0.0;
        return 0;
    }
    if state.damage_accumulator < frequency {
        return 0;
    }

    let steps = (state.damage_accumulator / frequency).floor();
    state.damage_accumulator %= frequency;
    steps as u32
}

/// Starved of reactant: damage relaxes to a power-dependent floor
pub fn vacuum_damage_step(state: &mut SupermatterState, config: &SupermatterConfig) {
    state.damage_archived = state.damage;
    state.damage = ((state.power - 15.0 * config.power_factor) / 10.0).max(0.0);
}

/// Damage moves toward critical temperature, bounded both ways
pub fn gas_damage_step(state: &mut SupermatterState, config: &SupermatterConfig, temperature: f32) {
    let increase_limit =
        (state.power / 300.0) * (config.explosion_point / 1000.0) * config.damage_rate_limit;
    let delta = ((temperature - config.critical_temperature) / 150.0)
        .max(-config.damage_rate_limit)
        .min(increase_limit);

    state.damage_archived = state.damage;
    state.damage = (state.damage + delta).max(0.0);
}

/// Oxygen share of the sample after nitrogen retardation, within `[0, 1]`
pub fn oxygen_ratio(sample: &GasMixture, nitrogen_retardation: f32) -> f32 {
    let total = sample.total_moles();
    if total <= 0.0 {
        return 0.0;
    }
    let effective = sample.moles(Gas::Oxygen) - sample.moles(Gas::Nitrogen) * nitrogen_retardation;
    (effective / total).clamp(0.0, 1.0)
}

pub fn emit_radiation(source: &mut RadiationSource, power: f32, config: &SupermatterConfig) {
    let intensity = power * config.radiation_release_modifier;
    let range = (intensity / 0.15).sqrt().round().min(MAX_RADIATION_RANGE);

    source.intensity = intensity;
    source.slope = if range > 0.0 {
        intensity / range * 2.0
    } else {
        0.0
    };
}

/// Cubic self-damping; never drops below zero
pub fn decay_power(state: &mut SupermatterState, config: &SupermatterConfig) {
    state.power = (state.power - (state.power / config.decay_factor).powi(3)).max(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{LocalityId, Position};
    use crate::gas::TileAtmosphere;
    use crate::grid::GridRegistry;
    use crate::supermatter::announcer::{AlertMessage, AlertState};
    use crate::supermatter::state::PointLight;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn here() -> Position {
        Position::new(LocalityId(1), 0, 0)
    }

    struct Harness {
        atmos: TileAtmosphere,
        grid: GridRegistry,
        rng: ChaCha8Rng,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                atmos: TileAtmosphere::new(),
                grid: GridRegistry::new(),
                rng: ChaCha8Rng::seed_from_u64(11),
            }
        }

        fn tick(&mut self, sm: &mut Supermatter, frame_time: f32, now: Seconds) -> Vec<SupermatterEvent> {
            update_supermatter(sm, frame_time, now, &mut self.atmos, &mut self.grid, &mut self.rng)
        }
    }

    #[test]
    fn test_vacuum_damage_floor() {
        let mut h = Harness::new();
        let mut sm = Supermatter::new(here(), SupermatterConfig::default());
        sm.state.power = 115.0;

        h.tick(&mut sm, 1.0, 1.0);

        assert!((sm.state.damage - 10.0).abs() < 1e-4);
        assert_eq!(sm.state.damage_archived, 0.0);
        assert!(sm.state.damage_accumulator < sm.config.damage_frequency);
    }

    #[test]
    fn test_empty_mixture_counts_as_vacuum() {
        let mut h = Harness::new();
        h.atmos.set_tile(here(), GasMixture::new(300.0));
        let mut sm = Supermatter::new(here(), SupermatterConfig::default());
        sm.state.power = 115.0;

        h.tick(&mut sm, 1.0, 1.0);
        assert!((sm.state.damage - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_accumulator_carries_leftover_time() {
        let mut h = Harness::new();
        let mut sm = Supermatter::new(here(), SupermatterConfig::default());
        sm.state.power = 115.0;

        h.tick(&mut sm, 0.6, 0.6);
        assert_eq!(sm.state.damage, 0.0);
        assert!((sm.state.damage_accumulator - 0.6).abs() < 1e-6);

        h.tick(&mut sm, 0.6, 1.2);
        assert!(sm.state.damage > 0.0);
        assert!((sm.state.damage_accumulator - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_hot_gas_raises_damage_within_limit() {
        let config = SupermatterConfig::default();
        let mut state = SupermatterState::with_power(300.0);
        gas_damage_step(&mut state, &config, 100_000.0);
        // limit = (300/300) * (1000/1000) * 4.5
        assert!((state.damage - 4.5).abs() < 1e-4);
    }

    #[test]
    fn test_cold_gas_heals_at_fixed_rate() {
        let config = SupermatterConfig::default();
        let mut state = SupermatterState::with_power(300.0);
        state.damage = 50.0;
        gas_damage_step(&mut state, &config, 300.0);
        assert!((state.damage - 45.5).abs() < 1e-4);
        assert_eq!(state.damage_archived, 50.0);

        state.damage = 1.0;
        gas_damage_step(&mut state, &config, 300.0);
        assert_eq!(state.damage, 0.0);
    }

    #[test]
    fn test_oxygen_ratio_clamped_when_nitrogen_dominates() {
        let sample = GasMixture::new(300.0)
            .with_moles(Gas::Oxygen, 1.0)
            .with_moles(Gas::Nitrogen, 100.0);
        assert_eq!(oxygen_ratio(&sample, 0.15), 0.0);

        let pure = GasMixture::new(300.0).with_moles(Gas::Oxygen, 10.0);
        assert_eq!(oxygen_ratio(&pure, 0.15), 1.0);
    }

    #[test]
    fn test_oxygen_rich_gas_glows_and_grows_power() {
        let mut h = Harness::new();
        h.atmos
            .set_tile(here(), GasMixture::new(2000.0).with_moles(Gas::Oxygen, 100.0));
        let mut sm = Supermatter::new(here(), SupermatterConfig::default());

        let events = h.tick(&mut sm, 0.5, 0.5);

        assert!(sm.state.glowing);
        assert!(sm.state.power > 0.0);
        assert!(events
            .iter()
            .any(|e| matches!(e, SupermatterEvent::GlowChanged { glowing: true, .. })));
        let tile = h.atmos.tile(here()).unwrap();
        assert!(tile.moles(Gas::Plasma) > 0.0);
    }

    #[test]
    fn test_radiation_slope_and_range_cap() {
        let config = SupermatterConfig::default();
        let mut source = RadiationSource::default();

        emit_radiation(&mut source, 1000.0, &config);
        assert!((source.intensity - 400.0).abs() < 1e-3);
        // sqrt(400/0.15) ~ 51.6, capped at 31
        assert!((source.slope - 400.0 / 31.0 * 2.0).abs() < 1e-3);

        emit_radiation(&mut source, 0.0, &config);
        assert_eq!(source.intensity, 0.0);
        assert_eq!(source.slope, 0.0);
    }

    #[test]
    fn test_power_decay_is_cubic_and_non_negative() {
        let config = SupermatterConfig::default();
        let mut state = SupermatterState::with_power(1400.0);
        decay_power(&mut state, &config);
        assert!((state.power - 1392.0).abs() < 1e-2);

        let mut huge = SupermatterState::with_power(1.0e6);
        decay_power(&mut huge, &config);
        assert_eq!(huge.power, 0.0);
    }

    #[test]
    fn test_terminal_fires_cascade_once() {
        let mut h = Harness::new();
        let mut sm = Supermatter::new(here(), SupermatterConfig::default());
        sm.state.damage = 1500.0;

        let first = h.tick(&mut sm, 1.0, 1.0);
        let cascades = first
            .iter()
            .filter(|e| matches!(e, SupermatterEvent::CascadeFired { .. }))
            .count();
        assert_eq!(cascades, 1);
        assert!(sm.state.exploded);

        let second = h.tick(&mut sm, 1.0, 2.0);
        assert!(second.is_empty());
    }

    #[test]
    fn test_terminal_tick_stops_after_cascade() {
        let mut h = Harness::new();
        h.atmos
            .set_tile(here(), GasMixture::new(6000.0).with_moles(Gas::Oxygen, 100.0));
        let mut sm = Supermatter::new(here(), SupermatterConfig::default()).with_radiation();
        sm.state.damage = 1500.0;
        sm.state.power = 500.0;
        sm.state.damage_accumulator = 0.3;
        sm.radiation = Some(RadiationSource {
            intensity: 7.0,
            slope: 1.0,
        });

        let events = h.tick(&mut sm, 0.5, 1.0);

        assert!(events
            .iter()
            .any(|e| matches!(e, SupermatterEvent::CascadeFired { .. })));
        assert_eq!(sm.state.power, 500.0);
        assert_eq!(sm.state.damage, 1500.0);
        assert_eq!(sm.state.damage_accumulator, 0.3);
        assert_eq!(sm.radiation.unwrap().intensity, 7.0);
        let tile = h.atmos.tile(here()).unwrap();
        assert_eq!(tile.total_moles(), 100.0);
        assert_eq!(tile.moles(Gas::Plasma), 0.0);
    }

    #[test]
    fn test_huge_frame_time_finishes_with_small_leftover() {
        let mut h = Harness::new();
        let mut sm = Supermatter::new(here(), SupermatterConfig::default());
        sm.state.power = 115.0;

        h.tick(&mut sm, 2.0e7, 2.0e7);

        assert!((sm.state.damage - 10.0).abs() < 1e-3);
        assert!(sm.state.damage_accumulator < sm.config.damage_frequency);
        assert!(sm.state.damage_accumulator >= 0.0);
    }

    #[test]
    fn test_huge_frame_time_caps_gas_damage_steps() {
        let mut h = Harness::new();
        h.atmos
            .set_tile(here(), GasMixture::new(100_000.0).with_moles(Gas::Oxygen, 100.0));
        let mut sm = Supermatter::new(here(), SupermatterConfig::default());
        sm.state.power = 300.0;

        h.tick(&mut sm, 2.0e7, 2.0e7);

        // each step is capped at 4.5 at this power
        assert!(sm.state.damage <= 4.5 * MAX_CATCH_UP_STEPS as f32 + 1e-3);
        assert!(sm.state.damage > 0.0);
        assert!(sm.state.damage_accumulator < sm.config.damage_frequency);
    }

    #[test]
    fn test_non_positive_damage_frequency_never_steps() {
        let mut h = Harness::new();
        let mut config = SupermatterConfig::default();
        config.damage_frequency = 0.0;
        let mut sm = Supermatter::new(here(), config);
        sm.state.power = 115.0;

        h.tick(&mut sm, 0.5, 0.5);
        assert_eq!(sm.state.damage, 0.0);
        assert_eq!(sm.state.damage_accumulator, 0.0);

        sm.config.damage_frequency = -1.0;
        h.tick(&mut sm, 0.5, 1.0);
        assert_eq!(sm.state.damage, 0.0);
        assert_eq!(sm.state.damage_accumulator, 0.0);
    }

    #[test]
    fn test_due_steps_counts_whole_intervals() {
        let config = SupermatterConfig::default();
        let mut state = SupermatterState::new();
        state.damage_accumulator = 3.25;
        assert_eq!(take_due_damage_steps(&mut state, &config), 3);
        assert!((state.damage_accumulator - 0.25).abs() < 1e-6);

        state.damage_accumulator = 0.5;
        assert_eq!(take_due_damage_steps(&mut state, &config), 0);
        assert_eq!(state.damage_accumulator, 0.5);
    }

    #[test]
    fn test_terminal_announces_before_detonating() {
        let mut h = Harness::new();
        let mut sm = Supermatter::new(here(), SupermatterConfig::default());
        sm.state.damage = 1200.0;

        let events = h.tick(&mut sm, 1.0, 1.0);
        assert!(matches!(
            events.first(),
            Some(SupermatterEvent::Radio {
                message: AlertMessage::Emergency { integrity: 0 },
                ..
            })
        ));
        assert!(matches!(events.last(), Some(SupermatterEvent::Detonation { .. })));
    }

    #[test]
    fn test_light_shifts_only_on_tier_change() {
        let mut h = Harness::new();
        let config = SupermatterConfig::default();
        let mut sm = Supermatter::new(here(), config.clone()).with_light();
        sm.state.damage = 200.0;
        sm.state.power = 400.0;
        sm.state.last_warning = 0.0;

        let first = h.tick(&mut sm, 0.1, 0.1);
        assert!(first.contains(&SupermatterEvent::LightShifted {
            entity: sm.id,
            energy: config.warning_light_energy,
            color: config.warning_color,
        }));
        assert_eq!(
            sm.light,
            Some(PointLight {
                energy: config.warning_light_energy,
                color: config.warning_color,
            })
        );

        let second = h.tick(&mut sm, 0.1, 0.2);
        assert!(!second
            .iter()
            .any(|e| matches!(e, SupermatterEvent::LightShifted { .. })));
    }

    #[test]
    fn test_warning_tier_announces_when_due() {
        let mut h = Harness::new();
        let mut sm = Supermatter::new(here(), SupermatterConfig::default());
        sm.state.damage = 200.0;
        sm.state.damage_archived = 150.0;
        sm.state.power = 400.0;

        // not yet due
        let early = h.tick(&mut sm, 0.1, 10.0);
        assert!(!early.iter().any(|e| matches!(e, SupermatterEvent::Radio { .. })));

        let due = h.tick(&mut sm, 0.1, 250.0);
        assert!(due.iter().any(|e| matches!(
            e,
            SupermatterEvent::Radio {
                message: AlertMessage::Warning { .. },
                ..
            }
        )));
        assert_eq!(sm.state.alert, AlertState::Warning);
        assert_eq!(sm.state.last_warning, 250.0);
    }
}
