// Export modules for library usage
pub mod advisor;
pub mod analysis;
pub mod config;
pub mod core;
pub mod detector;
pub mod graph;
pub mod scoring;

// Re-export commonly used types
pub use crate::core::errors::{DetectionError, Result};
pub use crate::core::{
    AffectedNode, BreakingPoint, BreakingStrategyKind, CircularDependencyReport, CycleEdge,
    CycleMetrics, CycleSummary, CycleType, Dependency, DependencyGraphInput, DependencyKind,
    DependencyStrength, EffortLevel, EnhancedCycle, ImpactAnalysis, LanguageImpact, ModuleInfo,
    RemediationPlan, Severity,
};

pub use crate::config::{DetectionConfig, SeverityThresholds};

pub use crate::detector::{detect_circular_dependencies, CircularDependencyDetector};

pub use crate::graph::{build_graph, DependencyGraph};

pub use crate::scoring::{cycle_id, edge_weight};
