//! Property tests for the supermatter numeric model

use proptest::prelude::*;

use supermatter_sim::core::types::{LocalityId, Position};
use supermatter_sim::core::SupermatterConfig;
use supermatter_sim::gas::{Gas, GasMixture};
use supermatter_sim::simulation::{run_simulation_tick, Station};
use supermatter_sim::supermatter::integrity;
use supermatter_sim::supermatter::update::oxygen_ratio;

proptest! {
    #[test]
    fn integrity_is_monotonic_and_bounded(a in 0.0f32..5000.0, b in 0.0f32..5000.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let i_low = integrity(low, 1000.0);
        let i_high = integrity(high, 1000.0);
        prop_assert!(i_high <= i_low);
        prop_assert!(i_low <= 100);
    }

    #[test]
    fn integrity_full_when_undamaged(explosion in 1.0f32..10_000.0) {
        prop_assert_eq!(integrity(0.0, explosion), 100);
    }

    #[test]
    fn oxygen_ratio_stays_in_unit_interval(
        oxygen in 0.0f32..1000.0,
        nitrogen in 0.0f32..1000.0,
        plasma in 0.0f32..100.0,
        retardation in 0.0f32..2.0,
    ) {
        let sample = GasMixture::new(300.0)
            .with_moles(Gas::Oxygen, oxygen)
            .with_moles(Gas::Nitrogen, nitrogen)
            .with_moles(Gas::Plasma, plasma);
        let ratio = oxygen_ratio(&sample, retardation);
        prop_assert!((0.0..=1.0).contains(&ratio));
    }

    #[test]
    fn power_and_damage_never_negative(
        temperature in 3.0f32..50_000.0,
        oxygen in 0.0f32..500.0,
        nitrogen in 0.0f32..500.0,
        power in 0.0f32..5000.0,
        damage in 0.0f32..1000.0,
        frame_time in 0.05f32..2.0,
        seed in any::<u64>(),
    ) {
        let pos = Position::new(LocalityId(0), 0, 0);
        let mut station = Station::new(seed);
        let id = station.spawn_supermatter(pos, SupermatterConfig::default());
        {
            let sm = station.get_mut(id).unwrap();
            sm.state.power = power;
            sm.state.damage = damage;
        }
        station.atmosphere.set_tile(
            pos,
            GasMixture::new(temperature)
                .with_moles(Gas::Oxygen, oxygen)
                .with_moles(Gas::Nitrogen, nitrogen),
        );

        for _ in 0..5 {
            run_simulation_tick(&mut station, frame_time);
            let sm = station.get(id).unwrap();
            prop_assert!(sm.state.power >= 0.0);
            prop_assert!(sm.state.damage >= 0.0);
        }
    }
}
