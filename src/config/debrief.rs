//! Debrief conversation tuning

use serde::Deserialize;

use super::error::ValidationError;

/// Parameters applied to every completion request
#[derive(Debug, Clone, Deserialize)]
pub struct DebriefConfig {
    /// Number of most recent messages sent as context
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Response length cap in tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl DebriefConfig {
    /// Validate debrief configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.history_window == 0 {
            return Err(ValidationError::InvalidHistoryWindow);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidMaxTokens);
        }
        Ok(())
    }
}

impl Default for DebriefConfig {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_history_window() -> usize {
    5
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debrief_config_defaults() {
        let config = DebriefConfig::default();
        assert_eq!(config.history_window, 5);
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.max_tokens, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_window() {
        let config = DebriefConfig {
            history_window: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidHistoryWindow));
    }

    #[test]
    fn test_validation_rejects_out_of_range_temperature() {
        let config = DebriefConfig {
            temperature: 3.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTemperature));
    }

    #[test]
    fn test_validation_rejects_zero_max_tokens() {
        let config = DebriefConfig {
            max_tokens: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidMaxTokens));
    }
}
