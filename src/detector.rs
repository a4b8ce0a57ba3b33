//! Detection pipeline: graph construction, cycle enumeration, scoring,
//! filtering, and report assembly.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::advisor::{self, recommendations, strategies};
use crate::analysis::{self, impact};
use crate::config::DetectionConfig;
use crate::core::errors::{DetectionError, Result};
use crate::core::{BreakingPoint, CircularDependencyReport, DependencyGraphInput};
use crate::graph::{self, enumerate};
use crate::scoring;

/// Runs the full analysis for one dependency graph snapshot.
pub struct CircularDependencyDetector {
    config: DetectionConfig,
}

impl Default for CircularDependencyDetector {
    fn default() -> Self {
        Self::new(DetectionConfig::default())
    }
}

impl CircularDependencyDetector {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Analyze `input` and produce the full report.
    ///
    /// An input with no dependencies at all is a valid, cycle-free graph; an
    /// input whose every dependency was filtered away is an error, since the
    /// caller probably did not intend that.
    pub fn detect(&self, input: &DependencyGraphInput) -> Result<CircularDependencyReport> {
        self.config
            .validate()
            .map_err(DetectionError::invalid_config)?;

        log::debug!(
            "analyzing {} dependencies from {}",
            input.dependencies.len(),
            input.repository
        );

        let graph = graph::build_graph(input, &self.config)?;
        let raw = enumerate::enumerate_cycles(&graph, &self.config);
        let scored = scoring::score_cycles(raw, input, &self.config.severity_thresholds);
        let mut cycles = analysis::filter_cycles(scored, &self.config);
        advisor::annotate_cycles(&mut cycles);

        let total_nodes = graph.universe().len();
        let summary = analysis::summarize(&cycles, total_nodes);
        let impact_analysis =
            impact::analyze_impact(&cycles, total_nodes, self.config.group_by_language);

        let cycles_by_language = if self.config.group_by_language {
            analysis::group_by_language(&cycles)
        } else {
            BTreeMap::new()
        };

        let breaking_strategies: BTreeMap<String, Vec<BreakingPoint>> = cycles
            .iter()
            .map(|cycle| {
                let points =
                    advisor::identify_breaking_points(cycle, &self.config.severity_thresholds);
                (cycle.id.clone(), points)
            })
            .collect();

        let recommendations =
            recommendations::build_recommendations(&summary, &impact_analysis, &cycles);

        log::info!(
            "{}: {} cycles retained across {} nodes",
            input.repository,
            summary.total_cycles,
            summary.affected_nodes
        );

        Ok(CircularDependencyReport {
            summary,
            cycles_by_length: analysis::group_by_length(&cycles),
            cycles_by_severity: analysis::group_by_severity(&cycles),
            cycles_by_language,
            impact_analysis,
            breaking_strategies,
            remediation_plans: strategies::remediation_plans(&cycles),
            recommendations,
            cycles,
            generated_at: Utc::now(),
        })
    }
}

/// One-shot convenience wrapper around [`CircularDependencyDetector`].
pub fn detect_circular_dependencies(
    input: &DependencyGraphInput,
    config: DetectionConfig,
) -> Result<CircularDependencyReport> {
    CircularDependencyDetector::new(config).detect(input)
}
