//! Report configuration: the tunables of the analytics and graph layers.
//!
//! Defaults match the long-standing dashboard constants. A TOML file can
//! override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunable knobs for analytics, graph building, and report rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// How many structural patterns the most/least-frequent views keep.
    pub pattern_ranking_count: usize,
    /// How many relations the domain/range diversity view keeps.
    pub diverse_relation_count: usize,
    /// How many evidence snippets an aggregated edge retains for tooltips.
    pub evidence_sample_size: usize,
    /// Node count above which the graph switches to the smaller size caps.
    pub large_graph_threshold: usize,
    /// Default neighborhood expansion distance for the graph view.
    pub default_hops: usize,
    /// Title printed at the top of the HTML report.
    pub report_title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            pattern_ranking_count: 150,
            diverse_relation_count: 20,
            evidence_sample_size: 3,
            large_graph_threshold: 300,
            default_hops: 0,
            report_title: "Relation Extraction Dashboard".into(),
        }
    }
}

impl ReportConfig {
    /// Parse a TOML document. Unknown keys are rejected.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_constants() {
        let config = ReportConfig::default();
        assert_eq!(config.pattern_ranking_count, 150);
        assert_eq!(config.diverse_relation_count, 20);
        assert_eq!(config.default_hops, 0);
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config = ReportConfig::from_toml_str("pattern_ranking_count = 25\n").unwrap();
        assert_eq!(config.pattern_ranking_count, 25);
        assert_eq!(config.diverse_relation_count, 20);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = ReportConfig::from_toml_str("pattern_ranking_count = \"lots\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
