pub mod errors;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::errors::Result;

/// A single declared dependency edge between two modules.
///
/// Edges arrive from an external scanner; `from`/`to` are globally unique
/// path-like identifiers, so nodes from different languages never collide.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Dependency {
    pub from: String,
    pub to: String,
    pub kind: DependencyKind,
    pub language: String,
    pub strength: DependencyStrength,
    #[serde(default)]
    pub external: bool,
}

impl Dependency {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        kind: DependencyKind,
        language: impl Into<String>,
        strength: DependencyStrength,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
            language: language.into(),
            strength,
            external: false,
        }
    }

    pub fn external(mut self) -> Self {
        self.external = true;
        self
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Import,
    Require,
    Include,
    Other,
}

impl std::fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(DependencyKind, &str)] = &[
            (DependencyKind::Import, "import"),
            (DependencyKind::Require, "require"),
            (DependencyKind::Include, "include"),
            (DependencyKind::Other, "other"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(k, _)| k == self)
            .map(|(_, s)| *s)
            .unwrap_or("other");

        write!(f, "{display_str}")
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DependencyStrength {
    Strong,
    Weak,
    Optional,
}

impl std::fmt::Display for DependencyStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(DependencyStrength, &str)] = &[
            (DependencyStrength::Strong, "strong"),
            (DependencyStrength::Weak, "weak"),
            (DependencyStrength::Optional, "optional"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(s, _)| s == self)
            .map(|(_, s)| *s)
            .unwrap_or("strong");

        write!(f, "{display_str}")
    }
}

/// One analyzed module, keyed by its unique path. Modules with no outgoing
/// edges still count toward the node universe.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ModuleInfo {
    pub path: String,
    pub language: String,
}

impl ModuleInfo {
    pub fn new(path: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            language: language.into(),
        }
    }
}

/// The complete edge list handed to the detector by an external scanner.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DependencyGraphInput {
    pub repository: String,
    pub dependencies: Vec<Dependency>,
    #[serde(default)]
    pub modules: BTreeMap<String, ModuleInfo>,
}

impl DependencyGraphInput {
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            dependencies: Vec::new(),
            modules: BTreeMap::new(),
        }
    }

    /// Resolved language of a node: module mapping first, then the edge's
    /// own tag, then "unknown" for nodes nothing ever described.
    pub fn node_language(&self, node: &str, edge_tag: &str) -> String {
        if let Some(module) = self.modules.get(node) {
            return module.language.clone();
        }
        if !edge_tag.is_empty() {
            return edge_tag.to_string();
        }
        "unknown".to_string()
    }
}

/// Severity of a detected cycle, ordered from least to most urgent.
#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(Severity, &str)] = &[
            (Severity::Low, "low"),
            (Severity::Medium, "medium"),
            (Severity::High, "high"),
            (Severity::Critical, "critical"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(s, _)| s == self)
            .map(|(_, s)| *s)
            .unwrap_or("low");

        write!(f, "{display_str}")
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum CycleType {
    Direct,
    Indirect,
    CrossLanguage,
}

impl std::fmt::Display for CycleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(CycleType, &str)] = &[
            (CycleType::Direct, "direct"),
            (CycleType::Indirect, "indirect"),
            (CycleType::CrossLanguage, "cross-language"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(t, _)| t == self)
            .map(|(_, s)| *s)
            .unwrap_or("indirect");

        write!(f, "{display_str}")
    }
}

/// One edge of a detected cycle. `language` is the resolved language of the
/// `from` node, `weight` the scored strength of the edge.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CycleEdge {
    pub from: String,
    pub to: String,
    pub kind: DependencyKind,
    pub strength: DependencyStrength,
    pub language: String,
    pub weight: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CycleMetrics {
    pub total_weight: f64,
    pub average_weight: f64,
    pub strong_edges: usize,
    pub weak_edges: usize,
    pub optional_edges: usize,
    /// Edges whose endpoints resolve to different languages
    pub cross_language_edges: usize,
    /// Strictly positive; grows with edge-weight variance and the share of
    /// strong edges
    pub complexity: f64,
}

/// A detected circular dependency with everything downstream consumers need:
/// scoring, classification, and remediation context.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnhancedCycle {
    /// Stable identifier derived from the canonical cycle key
    pub id: String,
    /// Closed path in canonical rotation; `edges[i].to == edges[i+1].from`
    /// and the last edge returns to `edges[0].from`
    pub edges: Vec<CycleEdge>,
    pub length: usize,
    /// Sorted, distinct resolved languages of the edges' `from` nodes
    pub languages: Vec<String>,
    pub weight: f64,
    pub severity: Severity,
    pub cycle_type: CycleType,
    pub metrics: CycleMetrics,
    pub description: String,
    pub impact: String,
    pub suggestions: Vec<String>,
    /// Ids of other retained cycles sharing at least one node
    pub related_cycles: Vec<String>,
}

impl EnhancedCycle {
    /// Node sequence of the closed path, first node repeated at the end:
    /// `A -> B -> C` yields `[A, B, C, A]`.
    pub fn node_path(&self) -> Vec<String> {
        let mut path: Vec<String> = self.edges.iter().map(|e| e.from.clone()).collect();
        if let Some(first) = self.edges.first() {
            path.push(first.from.clone());
        }
        path
    }

    pub fn contains_node(&self, node: &str) -> bool {
        self.edges.iter().any(|e| e.from == node)
    }

    pub fn is_cross_language(&self) -> bool {
        self.languages.len() > 1
    }
}

/// Top-level counts over the retained cycle set.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CycleSummary {
    pub total_cycles: usize,
    /// Distinct nodes in the analyzed universe (modules plus edge endpoints)
    pub total_nodes: usize,
    /// Distinct nodes appearing in at least one retained cycle
    pub affected_nodes: usize,
    pub critical_cycles: usize,
    pub high_severity_cycles: usize,
    pub average_cycle_length: f64,
    pub max_cycle_length: usize,
    /// Language -> distinct affected nodes of that language
    pub language_breakdown: BTreeMap<String, usize>,
    pub severity_distribution: BTreeMap<Severity, usize>,
}

/// Aggregate effect of the retained cycles on one language's modules.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LanguageImpact {
    pub language: String,
    pub cycle_count: usize,
    pub affected_modules: usize,
    pub complexity_score: f64,
    pub recommendations: Vec<String>,
}

/// A node that participates in more than one retained cycle.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AffectedNode {
    pub node: String,
    pub cycle_count: usize,
}

/// System-wide impact scores on a 0-10 scale.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImpactAnalysis {
    pub system_complexity: f64,
    pub testability_score: f64,
    pub maintainability_score: f64,
    pub language_impact: BTreeMap<String, LanguageImpact>,
    pub most_affected_nodes: Vec<AffectedNode>,
    /// Node runs shared by more than one critical or high severity cycle
    pub critical_paths: Vec<Vec<String>>,
}

impl Default for ImpactAnalysis {
    fn default() -> Self {
        Self {
            system_complexity: 0.0,
            testability_score: 10.0,
            maintainability_score: 10.0,
            language_impact: BTreeMap::new(),
            most_affected_nodes: Vec::new(),
            critical_paths: Vec::new(),
        }
    }
}

/// How a breaking-point candidate should be executed.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum BreakingStrategyKind {
    IntroduceAbstraction,
    ExtractSharedModule,
    InvertDependency,
    DeferViaIndirection,
    RemoveUnused,
}

impl std::fmt::Display for BreakingStrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(BreakingStrategyKind, &str)] = &[
            (BreakingStrategyKind::IntroduceAbstraction, "introduce-abstraction"),
            (BreakingStrategyKind::ExtractSharedModule, "extract-shared-module"),
            (BreakingStrategyKind::InvertDependency, "invert-dependency"),
            (BreakingStrategyKind::DeferViaIndirection, "defer-via-indirection"),
            (BreakingStrategyKind::RemoveUnused, "remove-unused"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(k, _)| k == self)
            .map(|(_, s)| *s)
            .unwrap_or("introduce-abstraction");

        write!(f, "{display_str}")
    }
}

#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum EffortLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for EffortLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(EffortLevel, &str)] = &[
            (EffortLevel::Low, "low"),
            (EffortLevel::Medium, "medium"),
            (EffortLevel::High, "high"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(e, _)| e == self)
            .map(|(_, s)| *s)
            .unwrap_or("medium");

        write!(f, "{display_str}")
    }
}

/// A candidate edge to sever within one cycle, ranked by confidence.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BreakingPoint {
    pub from_node: String,
    pub to_node: String,
    /// 0-1; higher means cheaper to sever without behavioral change
    pub confidence: f64,
    pub impact: String,
    pub strategy: BreakingStrategyKind,
    pub description: String,
    pub effort: EffortLevel,
    pub rationale: String,
}

/// A report-level playbook for applying one breaking strategy across the
/// cycles it fits.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RemediationPlan {
    pub strategy: BreakingStrategyKind,
    pub name: String,
    pub description: String,
    pub applicable_to: Vec<String>,
    pub priority: u8,
    pub effort: EffortLevel,
    pub impact: String,
    pub steps: Vec<String>,
    pub risks: Vec<String>,
}

/// The complete, immutable result of one detection run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CircularDependencyReport {
    pub summary: CycleSummary,
    /// Retained cycles sorted by canonical key
    pub cycles: Vec<EnhancedCycle>,
    pub cycles_by_language: BTreeMap<String, Vec<String>>,
    pub cycles_by_length: BTreeMap<usize, Vec<String>>,
    pub cycles_by_severity: BTreeMap<Severity, Vec<String>>,
    pub impact_analysis: ImpactAnalysis,
    pub breaking_strategies: BTreeMap<String, Vec<BreakingPoint>>,
    pub remediation_plans: Vec<RemediationPlan>,
    pub recommendations: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl CircularDependencyReport {
    /// Canonical JSON form for renderers; the engine itself performs no I/O.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn find_cycle(&self, id: &str) -> Option<&EnhancedCycle> {
        self.cycles.iter().find(|c| c.id == id)
    }
}
