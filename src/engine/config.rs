//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Default number of leaf changes kept in history.
pub const DEFAULT_HISTORY_LIMIT: usize = 32;

/// Configuration applied when the engine is built.
///
/// Deserializable so hosts can keep it next to their own settings; missing
/// fields fall back to their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HfsmConfig {
    /// Leaf changes retained in [`Hfsm::history`](crate::Hfsm::history).
    /// `0` disables history.
    pub history_limit: usize,
}

impl HfsmConfig {
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }
}

impl Default for HfsmConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config: HfsmConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, HfsmConfig::default());
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn history_limit_is_read_from_json() {
        let config: HfsmConfig = serde_json::from_str(r#"{"history_limit": 4}"#).unwrap();
        assert_eq!(config, HfsmConfig::default().history_limit(4));
    }
}
