//! Defines the settings a `RouterBuilder` can be created from.
//!
//! `RouterConfig` derives serde's traits so that applications can keep the router policy next to
//! the rest of their configuration, in whatever format they already load.
use serde::{Deserialize, Serialize};

/// How the builder treats a route which is structurally identical to one already registered for
/// the same HTTP method.
///
/// Two routes are structurally identical when every segment is the same literal text or is a
/// parameter (whatever its name), and both carry the same custom method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Registering a duplicate fails.
    Strict,

    /// Duplicates are accepted. Which of the duplicate values a request resolves to is
    /// unspecified and must not be relied on.
    Lax,
}

impl Default for DuplicatePolicy {
    fn default() -> Self {
        DuplicatePolicy::Strict
    }
}

/// Settings for a `RouterBuilder`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Policy applied to structurally duplicate routes.
    pub duplicates: DuplicatePolicy,
}

impl RouterConfig {
    /// Creates a `RouterConfig` with the given duplicate policy.
    pub fn new(duplicates: DuplicatePolicy) -> Self {
        RouterConfig { duplicates }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_by_default() {
        assert_eq!(RouterConfig::default().duplicates, DuplicatePolicy::Strict);
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: RouterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RouterConfig::default());

        let config: RouterConfig = serde_json::from_str(r#"{"duplicates":"lax"}"#).unwrap();
        assert_eq!(config.duplicates, DuplicatePolicy::Lax);
    }

    #[test]
    fn rejects_unknown_policy() {
        assert!(serde_json::from_str::<RouterConfig>(r#"{"duplicates":"loose"}"#).is_err());
    }
}
