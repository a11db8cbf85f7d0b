//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeatureFlags {
    /// Include the upstream cause in error responses (disable in production!)
    #[serde(default)]
    pub verbose_errors: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_flags_defaults() {
        let flags = FeatureFlags::default();
        assert!(!flags.verbose_errors);
    }

    #[test]
    fn test_feature_flags_deserialization() {
        let flags: FeatureFlags = serde_json::from_str(r#"{"verbose_errors": true}"#).unwrap();
        assert!(flags.verbose_errors);
    }
}
