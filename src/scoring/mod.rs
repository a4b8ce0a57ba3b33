//! Edge and cycle scoring: weights, metrics, severity, type, stable ids.

use sha2::{Digest, Sha256};

use crate::config::SeverityThresholds;
use crate::core::{
    CycleEdge, CycleMetrics, CycleType, Dependency, DependencyGraphInput, DependencyKind,
    DependencyStrength, EnhancedCycle, Severity,
};
use crate::graph::enumerate::RawCycle;

/// Weight of a single edge: strength x kind x locality.
pub fn edge_weight(dep: &Dependency) -> f64 {
    strength_multiplier(dep.strength) * kind_multiplier(dep.kind) * locality_multiplier(dep.external)
}

fn strength_multiplier(strength: DependencyStrength) -> f64 {
    match strength {
        DependencyStrength::Strong => 3.0,
        DependencyStrength::Weak => 1.0,
        DependencyStrength::Optional => 0.3,
    }
}

fn kind_multiplier(kind: DependencyKind) -> f64 {
    match kind {
        DependencyKind::Import => 1.0,
        DependencyKind::Require => 1.2,
        DependencyKind::Include => 0.8,
        DependencyKind::Other => 1.0,
    }
}

fn locality_multiplier(external: bool) -> f64 {
    if external {
        0.5
    } else {
        1.0
    }
}

/// Stable cycle identifier derived from the canonical key
pub fn cycle_id(canonical_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_key.as_bytes());
    let hash = format!("{:x}", hasher.finalize());
    format!("cycle_{}", &hash[..12])
}

/// Score every enumerated cycle. Input order (canonical-key order) is
/// preserved; narrative fields are filled in later, for retained cycles only.
pub fn score_cycles(
    raw_cycles: Vec<RawCycle>,
    input: &DependencyGraphInput,
    thresholds: &SeverityThresholds,
) -> Vec<EnhancedCycle> {
    raw_cycles
        .into_iter()
        .map(|raw| score_cycle(raw, input, thresholds))
        .collect()
}

fn score_cycle(
    raw: RawCycle,
    input: &DependencyGraphInput,
    thresholds: &SeverityThresholds,
) -> EnhancedCycle {
    let languages_per_edge: Vec<String> = raw
        .edges
        .iter()
        .map(|dep| input.node_language(&dep.from, &dep.language))
        .collect();

    let edges: Vec<CycleEdge> = raw
        .edges
        .iter()
        .zip(&languages_per_edge)
        .map(|(dep, language)| CycleEdge {
            from: dep.from.clone(),
            to: dep.to.clone(),
            kind: dep.kind,
            strength: dep.strength,
            language: language.clone(),
            weight: edge_weight(dep),
        })
        .collect();

    let mut languages: Vec<String> = languages_per_edge.clone();
    languages.sort();
    languages.dedup();

    let metrics = cycle_metrics(&edges, &languages_per_edge);
    let length = edges.len();
    let severity = classify_severity(length, languages.len(), thresholds);
    let cycle_type = classify_type(length, languages.len());

    EnhancedCycle {
        id: cycle_id(&raw.key),
        edges,
        length,
        languages,
        weight: metrics.total_weight,
        severity,
        cycle_type,
        metrics,
        description: String::new(),
        impact: String::new(),
        suggestions: Vec::new(),
        related_cycles: Vec::new(),
    }
}

/// Per-cycle aggregates. In a closed path edge i's target is edge i+1's
/// source, so an edge crosses languages exactly when consecutive resolved
/// languages differ.
fn cycle_metrics(edges: &[CycleEdge], languages_per_edge: &[String]) -> CycleMetrics {
    let length = edges.len();
    let total_weight: f64 = edges.iter().map(|e| e.weight).sum();
    let average_weight = if length > 0 {
        total_weight / length as f64
    } else {
        0.0
    };

    let strong_edges = edges
        .iter()
        .filter(|e| e.strength == DependencyStrength::Strong)
        .count();
    let weak_edges = edges
        .iter()
        .filter(|e| e.strength == DependencyStrength::Weak)
        .count();
    let optional_edges = edges
        .iter()
        .filter(|e| e.strength == DependencyStrength::Optional)
        .count();

    let cross_language_edges = (0..length)
        .filter(|&i| languages_per_edge[i] != languages_per_edge[(i + 1) % length])
        .count();

    let complexity = cycle_complexity(edges, average_weight, strong_edges);

    CycleMetrics {
        total_weight,
        average_weight,
        strong_edges,
        weak_edges,
        optional_edges,
        cross_language_edges,
        complexity,
    }
}

/// Strictly positive; grows with the variance of edge weights and with the
/// share of strong edges.
fn cycle_complexity(edges: &[CycleEdge], average_weight: f64, strong_edges: usize) -> f64 {
    if edges.is_empty() {
        return 1.0;
    }
    let variance = edges
        .iter()
        .map(|e| (e.weight - average_weight).powi(2))
        .sum::<f64>()
        / edges.len() as f64;
    let strong_fraction = strong_edges as f64 / edges.len() as f64;
    1.0 + variance + strong_fraction
}

/// First matching rule wins. Self-loops are critical outright; cross-language
/// cycles never fall below medium no matter how long they are.
pub fn classify_severity(
    length: usize,
    language_count: usize,
    thresholds: &SeverityThresholds,
) -> Severity {
    if length == 1 {
        return Severity::Critical;
    }
    if length <= thresholds.critical_cycle_length {
        return Severity::Critical;
    }
    if length <= thresholds.high_cycle_length {
        return Severity::High;
    }
    if length <= thresholds.medium_cycle_length {
        return Severity::Medium;
    }
    if language_count > 1 {
        return Severity::Medium;
    }
    Severity::Low
}

pub fn classify_type(length: usize, language_count: usize) -> CycleType {
    if language_count > 1 {
        CycleType::CrossLanguage
    } else if length <= 2 {
        CycleType::Direct
    } else {
        CycleType::Indirect
    }
}
