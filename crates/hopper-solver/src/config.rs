// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Solver configuration.
//!
//! `SolverConfig` deserializes from camelCase JSON; missing fields take
//! their defaults, so `{}` is a valid configuration.

use hopper_model::encode::UnresolvedRequirementPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Failure to read a `SolverConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid solver configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Limits and policies for one `optimize` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolverConfig {
    /// Maximum number of nodes popped from the frontier.
    pub max_nodes: u64,
    /// Wall-clock budget of the search in milliseconds.
    pub time_limit_ms: u64,
    /// Treatment of requirements that reference an unknown resource.
    pub unresolved_requirements: UnresolvedRequirementPolicy,
    /// Progress logging interval in milliseconds; `None` disables it.
    pub log_interval_ms: Option<u64>,
}

impl SolverConfig {
    pub const DEFAULT_MAX_NODES: u64 = 100_000;
    pub const DEFAULT_TIME_LIMIT_MS: u64 = 10_000;

    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    #[inline]
    pub fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Sets the time limit, saturating at `u64::MAX` milliseconds.
    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[inline]
    pub fn with_unresolved_requirements(mut self, policy: UnresolvedRequirementPolicy) -> Self {
        self.unresolved_requirements = policy;
        self
    }

    #[inline]
    pub fn with_log_interval(mut self, interval: Duration) -> Self {
        self.log_interval_ms = Some(u64::try_from(interval.as_millis()).unwrap_or(u64::MAX));
        self
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }

    #[inline]
    pub fn log_interval(&self) -> Option<Duration> {
        self.log_interval_ms.map(Duration::from_millis)
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_nodes: Self::DEFAULT_MAX_NODES,
            time_limit_ms: Self::DEFAULT_TIME_LIMIT_MS,
            unresolved_requirements: UnresolvedRequirementPolicy::Ignore,
            log_interval_ms: None,
        }
    }
}

impl std::fmt::Display for SolverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SolverConfig(max_nodes: {}, time_limit: {}ms, unresolved_requirements: {}",
            self.max_nodes, self.time_limit_ms, self.unresolved_requirements
        )?;
        match self.log_interval_ms {
            Some(ms) => write!(f, ", log_interval: {}ms)", ms),
            None => write!(f, ")"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.max_nodes, 100_000);
        assert_eq!(config.time_limit(), Duration::from_secs(10));
        assert_eq!(
            config.unresolved_requirements,
            UnresolvedRequirementPolicy::Ignore
        );
        assert!(config.log_interval().is_none());
    }

    #[test]
    fn test_empty_json_yields_defaults() {
        let config = SolverConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SolverConfig::default());
    }

    #[test]
    fn test_partial_json_overrides_fields() {
        let config = SolverConfig::from_json_str(
            r#"{ "maxNodes": 500, "unresolvedRequirements": "reject", "logIntervalMs": 250 }"#,
        )
        .unwrap();

        assert_eq!(config.max_nodes, 500);
        assert_eq!(config.time_limit_ms, SolverConfig::DEFAULT_TIME_LIMIT_MS);
        assert_eq!(
            config.unresolved_requirements,
            UnresolvedRequirementPolicy::Reject
        );
        assert_eq!(config.log_interval(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_malformed_json_is_a_config_error() {
        let err = SolverConfig::from_json_str(r#"{ "maxNodes": "many" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().starts_with("invalid solver configuration"));

        let err = SolverConfig::from_json_str(r#"{ "unresolvedRequirements": "warn" }"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_builders() {
        let config = SolverConfig::new()
            .with_max_nodes(42)
            .with_time_limit(Duration::from_millis(1500))
            .with_unresolved_requirements(UnresolvedRequirementPolicy::Reject)
            .with_log_interval(Duration::from_secs(2));

        assert_eq!(config.max_nodes, 42);
        assert_eq!(config.time_limit_ms, 1500);
        assert_eq!(config.log_interval_ms, Some(2000));
        assert_eq!(
            format!("{}", config),
            "SolverConfig(max_nodes: 42, time_limit: 1500ms, unresolved_requirements: reject, log_interval: 2000ms)"
        );
    }
}
