use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::StoreError;

/// Longest accepted decay period, one day.
pub const MAX_DECAY_INTERVAL_SECS: u64 = 86_400;

/// How `avg_intensity` is folded across a pattern's entries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum IntensityAveraging {
    /// Arithmetic mean of every entry.
    Mean,
    /// `(previous + new) / 2`, seeded with the first entry; favours recent entries.
    Rolling,
}

impl Default for IntensityAveraging {
    fn default() -> Self {
        IntensityAveraging::Mean
    }
}

/// Tunable thresholds for the emotional store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EmotionalConfig {
    /// Entries strictly above this intensity raise the emotional load.
    pub high_intensity_threshold: u8,
    pub load_increment: u8,
    pub load_cap: u8,

    /// Load strictly above this triggers the compassionate-load message.
    pub compassionate_load_threshold: u8,

    /// Decay ticker: every `decay_interval_secs`, while load exceeds
    /// `decay_floor`, subtract `decay_step`.
    pub decay_interval_secs: u64,
    pub decay_step: u8,
    pub decay_floor: u8,

    /// Connection gap: within the last `recent_window` entries, at least
    /// `connection_gap_min` entries at or above `gap_intensity_threshold`
    /// whose context appears once in that window.
    pub recent_window: usize,
    pub connection_gap_min: usize,
    pub gap_intensity_threshold: u8,

    pub initial_emotion: String,
    pub initial_intensity: u8,
    pub initial_load: u8,

    pub averaging: IntensityAveraging,
}

impl Default for EmotionalConfig {
    fn default() -> Self {
        Self {
            high_intensity_threshold: 70,
            load_increment: 10,
            load_cap: 100,
            compassionate_load_threshold: 80,
            decay_interval_secs: 30,
            decay_step: 2,
            decay_floor: 50,
            recent_window: 10,
            connection_gap_min: 3,
            gap_intensity_threshold: 70,
            initial_emotion: "calm".into(),
            initial_intensity: 50,
            initial_load: 30,
            averaging: IntensityAveraging::Mean,
        }
    }
}

impl EmotionalConfig {
    pub fn decay_interval(&self) -> Duration {
        Duration::from_secs(self.decay_interval_secs.clamp(1, MAX_DECAY_INTERVAL_SECS))
    }

    /// Rejects thresholds that would let the load or intensities leave
    /// `0..=100`, or that make the heuristics meaningless.
    pub fn validate(&self) -> Result<(), StoreError> {
        let percent_fields = [
            ("loadCap", self.load_cap),
            ("initialIntensity", self.initial_intensity),
            ("initialLoad", self.initial_load),
            ("highIntensityThreshold", self.high_intensity_threshold),
            ("gapIntensityThreshold", self.gap_intensity_threshold),
            ("compassionateLoadThreshold", self.compassionate_load_threshold),
        ];
        for (name, value) in percent_fields {
            if value > 100 {
                return Err(invalid(format!("{name} {value} is outside 0..=100")));
            }
        }
        if self.decay_floor > self.load_cap {
            return Err(invalid(format!(
                "decayFloor {} exceeds loadCap {}",
                self.decay_floor, self.load_cap
            )));
        }
        if !(1..=MAX_DECAY_INTERVAL_SECS).contains(&self.decay_interval_secs) {
            return Err(invalid(format!(
                "decayIntervalSecs {} is outside 1..={MAX_DECAY_INTERVAL_SECS}",
                self.decay_interval_secs
            )));
        }
        if self.recent_window == 0 {
            return Err(invalid("recentWindow must be at least 1".into()));
        }
        if self.connection_gap_min == 0 {
            return Err(invalid("connectionGapMin must be at least 1".into()));
        }
        if self.initial_emotion.trim().is_empty() {
            return Err(invalid("initialEmotion must not be empty".into()));
        }
        Ok(())
    }
}

fn invalid(message: String) -> StoreError {
    StoreError::InvalidArgument(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: EmotionalConfig =
            serde_json::from_str(r#"{ "decayIntervalSecs": 5, "averaging": "rolling" }"#).unwrap();
        assert_eq!(config.decay_interval(), Duration::from_secs(5));
        assert_eq!(config.averaging, IntensityAveraging::Rolling);
        assert_eq!(config.recent_window, 10);
        assert_eq!(config.initial_emotion, "calm");
    }

    #[test]
    fn zero_interval_is_clamped() {
        let config = EmotionalConfig {
            decay_interval_secs: 0,
            ..EmotionalConfig::default()
        };
        assert_eq!(config.decay_interval(), Duration::from_secs(1));
    }

    #[test]
    fn huge_interval_is_clamped_to_a_day() {
        let config = EmotionalConfig {
            decay_interval_secs: u64::MAX,
            ..EmotionalConfig::default()
        };
        assert_eq!(
            config.decay_interval(),
            Duration::from_secs(MAX_DECAY_INTERVAL_SECS)
        );
    }

    fn assert_rejected(config: EmotionalConfig, field: &str) {
        match config.validate() {
            Err(StoreError::InvalidArgument(message)) => {
                assert!(message.contains(field), "{message} should name {field}")
            }
            other => panic!("expected {field} to be rejected, got {other:?}"),
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert_eq!(EmotionalConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_load_cap_above_hundred() {
        assert_rejected(
            EmotionalConfig {
                load_cap: 200,
                ..EmotionalConfig::default()
            },
            "loadCap",
        );
    }

    #[test]
    fn rejects_initial_intensity_above_hundred() {
        assert_rejected(
            EmotionalConfig {
                initial_intensity: 101,
                ..EmotionalConfig::default()
            },
            "initialIntensity",
        );
    }

    #[test]
    fn rejects_initial_load_above_hundred() {
        assert_rejected(
            EmotionalConfig {
                initial_load: 150,
                ..EmotionalConfig::default()
            },
            "initialLoad",
        );
    }

    #[test]
    fn rejects_high_intensity_threshold_above_hundred() {
        assert_rejected(
            EmotionalConfig {
                high_intensity_threshold: 101,
                ..EmotionalConfig::default()
            },
            "highIntensityThreshold",
        );
    }

    #[test]
    fn rejects_gap_intensity_threshold_above_hundred() {
        assert_rejected(
            EmotionalConfig {
                gap_intensity_threshold: 255,
                ..EmotionalConfig::default()
            },
            "gapIntensityThreshold",
        );
    }

    #[test]
    fn rejects_decay_floor_above_load_cap() {
        assert_rejected(
            EmotionalConfig {
                load_cap: 60,
                decay_floor: 70,
                ..EmotionalConfig::default()
            },
            "decayFloor",
        );
    }

    #[test]
    fn rejects_out_of_range_decay_interval() {
        for secs in [0, MAX_DECAY_INTERVAL_SECS + 1, u64::MAX] {
            assert_rejected(
                EmotionalConfig {
                    decay_interval_secs: secs,
                    ..EmotionalConfig::default()
                },
                "decayIntervalSecs",
            );
        }
    }

    #[test]
    fn rejects_empty_recent_window() {
        assert_rejected(
            EmotionalConfig {
                recent_window: 0,
                ..EmotionalConfig::default()
            },
            "recentWindow",
        );
    }

    #[test]
    fn rejects_zero_connection_gap_min() {
        assert_rejected(
            EmotionalConfig {
                connection_gap_min: 0,
                ..EmotionalConfig::default()
            },
            "connectionGapMin",
        );
    }
}
