use serde::Deserialize;

use crate::error::WaveError;

/// Timing and layout knobs for one scheduler, injected at construction
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Seconds one edge takes to grow or shrink its full length
    pub animation_duration: f32,
    /// Barrier timeout as a multiple of `animation_duration`
    pub barrier_timeout_factor: f32,
    /// World units the segment keeps clear of each node
    pub node_inset: f32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        WaveConfig {
            animation_duration: 0.6,
            barrier_timeout_factor: 15.0,
            node_inset: 0.0,
        }
    }
}

impl WaveConfig {
    pub fn with_duration(animation_duration: f32) -> Self {
        WaveConfig {
            animation_duration,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), WaveError> {
        check_duration(self.animation_duration)?;

        if !(self.barrier_timeout_factor.is_finite() && self.barrier_timeout_factor > 0.0) {
            return Err(WaveError::InvalidArgument(format!(
                "barrier timeout factor must be positive, got {}",
                self.barrier_timeout_factor
            )));
        }
        if !(self.node_inset.is_finite() && self.node_inset >= 0.0) {
            return Err(WaveError::InvalidArgument(format!(
                "node inset must be non-negative, got {}",
                self.node_inset
            )));
        }

        Ok(())
    }

    /// How long a level may take before its barrier reports a stuck animation
    pub fn barrier_timeout(&self) -> f32 {
        self.animation_duration * self.barrier_timeout_factor
    }
}

/// Reject zero, negative and non-finite durations
pub(crate) fn check_duration(duration: f32) -> Result<(), WaveError> {
    if duration.is_finite() && duration > 0.0 {
        Ok(())
    } else {
        Err(WaveError::InvalidArgument(format!(
            "animation duration must be positive, got {}",
            duration
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = WaveConfig::default();

        assert!(config.validate().is_ok());
        assert!((config.barrier_timeout() - 9.0).abs() < 1e-5);
    }

    #[test]
    fn test_rejects_non_positive_values() {
        for duration in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = WaveConfig::with_duration(duration);
            assert!(matches!(config.validate(), Err(WaveError::InvalidArgument(_))));
        }

        let no_timeout = WaveConfig {
            barrier_timeout_factor: 0.0,
            ..Default::default()
        };
        assert!(matches!(no_timeout.validate(), Err(WaveError::InvalidArgument(_))));

        let negative_inset = WaveConfig {
            node_inset: -0.5,
            ..Default::default()
        };
        assert!(matches!(negative_inset.validate(), Err(WaveError::InvalidArgument(_))));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: WaveConfig = serde_json::from_str(r#"{ "animation_duration": 1.5 }"#).unwrap();

        assert_eq!(config.animation_duration, 1.5);
        assert_eq!(config.barrier_timeout_factor, 15.0);
        assert_eq!(config.node_inset, 0.0);
    }
}
