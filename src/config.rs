//! Configuration for the math toolkit.

use serde::{Deserialize, Serialize};

/// Seed used by the seeded random sampler when no configuration is supplied.
pub const DEFAULT_SEED: u64 = 0x5EED_1234;

/// Math toolkit configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MathConfig {
    /// Seed for reproducible random sampling.
    pub seed: u64,
}

impl Default for MathConfig {
    fn default() -> Self {
        Self { seed: DEFAULT_SEED }
    }
}

impl MathConfig {
    /// Create a configuration with the given seed.
    pub const fn with_seed(seed: u64) -> Self {
        Self { seed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed() {
        assert_eq!(MathConfig::default().seed, DEFAULT_SEED);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: MathConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, MathConfig::default());

        let config: MathConfig = serde_json::from_str(r#"{"seed": 42}"#).unwrap();
        assert_eq!(config.seed, 42);
    }
}
