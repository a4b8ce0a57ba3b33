use serde::{Deserialize, Serialize};

use crate::core::Severity;

/// Length thresholds (in edges) for severity classification, plus the weight
/// below which a cycle counts as weak
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeverityThresholds {
    /// Cycles of at most this length are critical
    #[serde(default = "default_critical_cycle_length")]
    pub critical_cycle_length: usize,

    /// Cycles of at most this length are high severity
    #[serde(default = "default_high_cycle_length")]
    pub high_cycle_length: usize,

    /// Cycles of at most this length are medium severity
    #[serde(default = "default_medium_cycle_length")]
    pub medium_cycle_length: usize,

    /// Average edge weight below which a cycle counts as weak; weak cycles
    /// get a confidence boost on every breaking-point candidate
    #[serde(default = "default_weak_cycle_weight")]
    pub weak_cycle_weight: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            critical_cycle_length: default_critical_cycle_length(),
            high_cycle_length: default_high_cycle_length(),
            medium_cycle_length: default_medium_cycle_length(),
            weak_cycle_weight: default_weak_cycle_weight(),
        }
    }
}

/// Caller-supplied knobs for one detection run. Every field carries a serde
/// default, so a partial config document deserializes into a valid whole.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectionConfig {
    /// Longest cycle (in edges) the enumerator will record
    #[serde(default = "default_max_cycle_length")]
    pub max_cycle_length: usize,

    /// Cycles below this severity are dropped from the report
    #[serde(default = "default_min_severity_level")]
    pub min_severity_level: Severity,

    /// Keep edges whose target resolves outside the analyzed codebase
    #[serde(default)]
    pub include_external: bool,

    /// Depth bound on the search; branches are pruned, never failed, when
    /// the path reaches this many edges
    #[serde(default = "default_detection_depth")]
    pub detection_depth: usize,

    /// Keep weak-strength edges; disable to focus on hard coupling only
    #[serde(default = "default_analyze_weak_cycles")]
    pub analyze_weak_cycles: bool,

    /// Populate the per-language report sections
    #[serde(default = "default_group_by_language")]
    pub group_by_language: bool,

    #[serde(default)]
    pub severity_thresholds: SeverityThresholds,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            max_cycle_length: default_max_cycle_length(),
            min_severity_level: default_min_severity_level(),
            include_external: false,
            detection_depth: default_detection_depth(),
            analyze_weak_cycles: default_analyze_weak_cycles(),
            group_by_language: default_group_by_language(),
            severity_thresholds: SeverityThresholds::default(),
        }
    }
}

impl DetectionConfig {
    /// Validate bounds before the pipeline starts
    pub fn validate(&self) -> Result<(), String> {
        if self.max_cycle_length == 0 {
            return Err("max_cycle_length must be positive".to_string());
        }
        if self.detection_depth == 0 {
            return Err("detection_depth must be positive".to_string());
        }
        Ok(())
    }

    /// Effective bound on path growth: the search never extends a path past
    /// the smaller of the two caps
    pub fn effective_depth(&self) -> usize {
        self.detection_depth.min(self.max_cycle_length)
    }
}

fn default_max_cycle_length() -> usize {
    10
}
fn default_min_severity_level() -> Severity {
    Severity::Low
}
fn default_detection_depth() -> usize {
    20
}
fn default_analyze_weak_cycles() -> bool {
    true
}
fn default_group_by_language() -> bool {
    true
}
fn default_critical_cycle_length() -> usize {
    2
}
fn default_high_cycle_length() -> usize {
    3
}
fn default_medium_cycle_length() -> usize {
    5
}
fn default_weak_cycle_weight() -> f64 {
    0.5
}
