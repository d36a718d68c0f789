//! Library configuration

use serde::{Deserialize, Serialize};

/// Runtime version reported when no probe is available
pub const DEFAULT_RUNTIME_VERSION: f64 = 2.0;

/// Consumer options for an [`Environment`](crate::Environment)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Global alias bound to `query_single`
    pub single_alias: String,
    /// Global alias bound to `query_all`
    pub all_alias: String,
    /// Value memoized by `runtime_version`
    pub runtime_version: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            single_alias: "$".to_string(),
            all_alias: "$$".to_string(),
            runtime_version: DEFAULT_RUNTIME_VERSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_options_fill_defaults() {
        let options: Options = serde_json::from_str(r#"{ "single_alias": "qs" }"#).unwrap();
        assert_eq!(options.single_alias, "qs");
        assert_eq!(options.all_alias, "$$");
        assert_eq!(options.runtime_version, DEFAULT_RUNTIME_VERSION);
    }
}
