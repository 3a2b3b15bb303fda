//! Warning announcer
//!
//! Hysteresis over radio announcements. The state remembers whether the
//! current crisis was already announced as stable and whether the public
//! channel was told about it, so each notice goes out once per crisis.

use serde::{Deserialize, Serialize};

use crate::core::config::{RadioChannel, SupermatterConfig};
use crate::core::types::Seconds;
use crate::supermatter::state::SupermatterState;
use crate::supermatter::threshold::integrity;

/// Where the announcer stands between crises
///
/// Entering emergency always clears "safe", so a core can never sit in a
/// safe-but-public state that would announce stabilization on every warning
/// tick. `PublicNotified` is the only state that remembers a public alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlertState {
    /// Stability has been announced (or nothing ever went wrong)
    #[default]
    Nominal,
    /// Damage rising, restricted channel only
    Warning,
    /// Past the emergency point, public channel alerted
    Emergency,
    /// Back below emergency but the public has not been stood down yet
    PublicNotified,
}

impl AlertState {
    pub fn safe_warned(self) -> bool {
        matches!(self, AlertState::Nominal)
    }

    pub fn public_alerted(self) -> bool {
        matches!(self, AlertState::Emergency | AlertState::PublicNotified)
    }
}

/// Radio message bodies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertMessage {
    Emergency { integrity: u32 },
    Warning { integrity: u32 },
    Stabilized,
    PublicEmergency,
}

impl std::fmt::Display for AlertMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertMessage::Emergency { integrity } => write!(
                f,
                "CRYSTAL DELAMINATION IMMINENT! Integrity at {}%!",
                integrity
            ),
            AlertMessage::Warning { integrity } => {
                write!(f, "Danger! Crystal hyperstructure integrity faltering! Integrity: {}%", integrity)
            }
            AlertMessage::Stabilized => {
                write!(f, "Crystalline hyperstructure returning to safe operating parameters.")
            }
            AlertMessage::PublicEmergency => write!(
                f,
                "The supermatter crystal is delaminating! All personnel evacuate the engine area."
            ),
        }
    }
}

/// One message on one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub channel: RadioChannel,
    pub message: AlertMessage,
}

/// Whether the regular warning interval has elapsed
pub fn warning_due(state: &SupermatterState, config: &SupermatterConfig, now: Seconds) -> bool {
    now - state.last_warning >= (config.warning_delay as Seconds) * 10.0
}

/// Decide what (if anything) to broadcast and advance the alert state.
pub fn announce(
    state: &mut SupermatterState,
    config: &SupermatterConfig,
    now: Seconds,
) -> Vec<Announcement> {
    let integrity = integrity(state.damage, config.explosion_point);
    let was_public = state.alert.public_alerted();
    let mut out = Vec::new();

    if state.damage > config.emergency_point {
        out.push(Announcement {
            channel: config.alert_channel.clone(),
            message: AlertMessage::Emergency { integrity },
        });
        if !was_public {
            out.push(Announcement {
                channel: config.public_channel.clone(),
                message: AlertMessage::PublicEmergency,
            });
        }
        // Emergencies repeat sooner than regular warnings
        state.last_warning = now - (config.warning_delay as Seconds) * 4.0;
        state.alert = AlertState::Emergency;
    } else if state.damage >= state.damage_archived {
        out.push(Announcement {
            channel: config.alert_channel.clone(),
            message: AlertMessage::Warning { integrity },
        });
        state.last_warning = now;
        state.alert = if was_public {
            AlertState::PublicNotified
        } else {
            AlertState::Warning
        };
    } else if !state.alert.safe_warned() {
        out.push(Announcement {
            channel: config.alert_channel.clone(),
            message: AlertMessage::Stabilized,
        });
        if was_public {
            out.push(Announcement {
                channel: config.public_channel.clone(),
                message: AlertMessage::Stabilized,
            });
        }
        state.last_warning = now;
        state.alert = AlertState::Nominal;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(damage: f32, archived: f32, alert: AlertState) -> SupermatterState {
        SupermatterState {
            damage,
            damage_archived: archived,
            alert,
            ..SupermatterState::default()
        }
    }

    #[test]
    fn test_decreasing_damage_announces_stabilized_once() {
        let config = SupermatterConfig::default();
        let mut s = state(300.0, 350.0, AlertState::Warning);

        let first = announce(&mut s, &config, 50.0);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].message, AlertMessage::Stabilized);
        assert_eq!(first[0].channel, config.alert_channel);
        assert!(s.alert.safe_warned());
        assert_eq!(s.last_warning, 50.0);

        let second = announce(&mut s, &config, 60.0);
        assert!(second.is_empty());
        assert_eq!(s.last_warning, 50.0);
    }

    #[test]
    fn test_rising_damage_warns_and_clears_safe() {
        let config = SupermatterConfig::default();
        let mut s = state(300.0, 250.0, AlertState::Nominal);

        let out = announce(&mut s, &config, 10.0);
        assert_eq!(out, vec![Announcement {
            channel: config.alert_channel.clone(),
            message: AlertMessage::Warning { integrity: 70 },
        }]);
        assert_eq!(s.alert, AlertState::Warning);
        assert!(!s.alert.safe_warned());
    }

    #[test]
    fn test_emergency_alerts_public_once_and_rewinds_timer() {
        let config = SupermatterConfig::default();
        let mut s = state(800.0, 790.0, AlertState::Warning);

        let out = announce(&mut s, &config, 500.0);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].message, AlertMessage::Emergency { integrity: 20 });
        assert_eq!(out[1].channel, config.public_channel);
        assert_eq!(out[1].message, AlertMessage::PublicEmergency);
        assert_eq!(s.last_warning, 500.0 - 80.0);
        assert_eq!(s.alert, AlertState::Emergency);

        let again = announce(&mut s, &config, 700.0);
        assert_eq!(again.len(), 1);
        assert_eq!(again[0].channel, config.alert_channel);
    }

    #[test]
    fn test_stand_down_reaches_public_channel() {
        let config = SupermatterConfig::default();
        let mut s = state(650.0, 660.0, AlertState::PublicNotified);

        let out = announce(&mut s, &config, 10.0);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|a| a.message == AlertMessage::Stabilized));
        assert_eq!(out[1].channel, config.public_channel);
        assert_eq!(s.alert, AlertState::Nominal);
        assert!(!s.alert.public_alerted());
    }

    #[test]
    fn test_rising_after_public_alert_keeps_public_flag() {
        let config = SupermatterConfig::default();
        let mut s = state(600.0, 600.0, AlertState::Emergency);
        let out = announce(&mut s, &config, 10.0);
        assert_eq!(out.len(), 1);
        assert_eq!(s.alert, AlertState::PublicNotified);
    }

    #[test]
    fn test_emergency_from_nominal_stands_down_exactly_once() {
        let config = SupermatterConfig::default();
        let mut s = state(800.0, 790.0, AlertState::Nominal);

        announce(&mut s, &config, 10.0);
        assert!(!s.alert.safe_warned());
        assert!(s.alert.public_alerted());

        s.damage = 650.0;
        s.damage_archived = 660.0;
        let stand_down = announce(&mut s, &config, 20.0);
        assert_eq!(stand_down.len(), 2);
        assert!(s.alert.safe_warned());
        assert!(!s.alert.public_alerted());

        for now in [30.0, 40.0, 50.0] {
            assert!(announce(&mut s, &config, now).is_empty());
        }
    }

    #[test]
    fn test_warning_due_uses_ten_delays() {
        let config = SupermatterConfig::default();
        let mut s = SupermatterState::default();
        s.last_warning = 0.0;
        assert!(!warning_due(&s, &config, 199.9));
        assert!(warning_due(&s, &config, 200.0));
    }
}
