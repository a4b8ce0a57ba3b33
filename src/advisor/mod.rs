//! Breaking-point advice and cycle narratives.
//!
//! Every edge of a retained cycle is a candidate breaking point. Candidates
//! are ranked by confidence: how likely cutting that edge is to dissolve the
//! cycle without collateral damage. Optional and weak edges rank high,
//! load-bearing strong edges rank low.

pub mod recommendations;
pub mod strategies;

use std::cmp::Ordering;

use crate::config::SeverityThresholds;
use crate::core::{
    BreakingPoint, BreakingStrategyKind, CycleEdge, CycleType, EffortLevel, EnhancedCycle,
    Severity,
};

/// Rank every edge of `cycle` as a breaking-point candidate.
pub fn identify_breaking_points(
    cycle: &EnhancedCycle,
    thresholds: &SeverityThresholds,
) -> Vec<BreakingPoint> {
    let mut points: Vec<BreakingPoint> = cycle
        .edges
        .iter()
        .enumerate()
        .map(|(i, edge)| {
            let crosses = crosses_language(cycle, i);
            BreakingPoint {
                from_node: edge.from.clone(),
                to_node: edge.to.clone(),
                confidence: edge_confidence(cycle, edge, crosses, thresholds),
                impact: impact_label(cycle, edge).to_string(),
                strategy: pick_strategy(edge, crosses),
                description: describe_cut(edge),
                effort: estimate_effort(cycle, edge),
                rationale: explain_choice(edge, crosses),
            }
        })
        .collect();

    points.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.from_node.cmp(&b.from_node))
            .then_with(|| a.to_node.cmp(&b.to_node))
    });
    points
}

/// True when edge `i` lands in a different language than it starts in. The
/// target's language is read off the next edge around the closed path.
fn crosses_language(cycle: &EnhancedCycle, i: usize) -> bool {
    let next = (i + 1) % cycle.edges.len();
    cycle.edges[i].language != cycle.edges[next].language
}

fn edge_confidence(
    cycle: &EnhancedCycle,
    edge: &CycleEdge,
    crosses: bool,
    thresholds: &SeverityThresholds,
) -> f64 {
    let mut confidence: f64 = 0.5;

    confidence += match edge.strength {
        crate::core::DependencyStrength::Optional => 0.4,
        crate::core::DependencyStrength::Weak => 0.2,
        crate::core::DependencyStrength::Strong => -0.1,
    };
    if edge.kind == crate::core::DependencyKind::Include {
        confidence += 0.2;
    }
    if crosses {
        confidence += 0.1;
    }
    if cycle.metrics.average_weight < thresholds.weak_cycle_weight {
        confidence += 0.05;
    }

    confidence.clamp(0.0, 1.0)
}

fn pick_strategy(edge: &CycleEdge, crosses: bool) -> BreakingStrategyKind {
    use crate::core::{DependencyKind, DependencyStrength};

    if edge.strength == DependencyStrength::Optional {
        BreakingStrategyKind::RemoveUnused
    } else if edge.kind == DependencyKind::Include {
        BreakingStrategyKind::ExtractSharedModule
    } else if edge.strength == DependencyStrength::Weak {
        BreakingStrategyKind::InvertDependency
    } else if crosses {
        BreakingStrategyKind::DeferViaIndirection
    } else {
        BreakingStrategyKind::IntroduceAbstraction
    }
}

fn estimate_effort(cycle: &EnhancedCycle, edge: &CycleEdge) -> EffortLevel {
    use crate::core::DependencyStrength;

    match edge.strength {
        DependencyStrength::Optional => EffortLevel::Low,
        DependencyStrength::Weak => EffortLevel::Medium,
        DependencyStrength::Strong if cycle.length <= 3 => EffortLevel::High,
        DependencyStrength::Strong => EffortLevel::Medium,
    }
}

fn impact_label(cycle: &EnhancedCycle, edge: &CycleEdge) -> &'static str {
    use crate::core::DependencyStrength;

    match edge.strength {
        DependencyStrength::Optional => "low",
        DependencyStrength::Weak => "medium",
        _ if cycle.length <= 3 => "high",
        _ => "medium",
    }
}

fn describe_cut(edge: &CycleEdge) -> String {
    format!(
        "Break the {} {} dependency from {} to {}",
        edge.strength, edge.kind, edge.from, edge.to
    )
}

fn explain_choice(edge: &CycleEdge, crosses: bool) -> String {
    use crate::core::{DependencyKind, DependencyStrength};

    if edge.strength == DependencyStrength::Optional {
        format!(
            "{} only optionally depends on {}, so the edge can likely be dropped outright",
            edge.from, edge.to
        )
    } else if edge.kind == DependencyKind::Include {
        format!(
            "The include from {} to {} suggests shared declarations that belong in their own module",
            edge.from, edge.to
        )
    } else if edge.strength == DependencyStrength::Weak {
        format!(
            "The weak coupling from {} to {} is cheap to invert behind an interface",
            edge.from, edge.to
        )
    } else if crosses {
        format!(
            "{} and {} sit in different languages, so an explicit boundary fits naturally here",
            edge.from, edge.to
        )
    } else {
        format!(
            "Strong dependency from {} to {}; extracting an abstraction is the safest cut",
            edge.from, edge.to
        )
    }
}

/// Fill in the narrative fields of each retained cycle.
pub fn annotate_cycles(cycles: &mut [EnhancedCycle]) {
    let ids_and_nodes: Vec<(String, Vec<String>)> = cycles
        .iter()
        .map(|cycle| {
            let nodes = cycle
                .edges
                .iter()
                .map(|edge| edge.from.clone())
                .collect::<Vec<_>>();
            (cycle.id.clone(), nodes)
        })
        .collect();

    for cycle in cycles.iter_mut() {
        cycle.description = describe_cycle(cycle);
        cycle.impact = describe_impact(cycle);
        cycle.suggestions = suggest_fixes(cycle);
        cycle.related_cycles = related_cycles(cycle, &ids_and_nodes);
    }
}

fn type_label(cycle_type: CycleType) -> &'static str {
    match cycle_type {
        CycleType::Direct => "Direct",
        CycleType::Indirect => "Indirect",
        CycleType::CrossLanguage => "Cross-language",
    }
}

fn describe_cycle(cycle: &EnhancedCycle) -> String {
    format!(
        "{} cycle of length {}: {}",
        type_label(cycle.cycle_type),
        cycle.length,
        cycle.node_path().join(" → ")
    )
}

fn describe_impact(cycle: &EnhancedCycle) -> String {
    match cycle.severity {
        Severity::Critical => {
            "Blocks independent builds and testing of the involved modules".to_string()
        }
        Severity::High => {
            "Makes changes risky: edits to one module ripple through the whole loop".to_string()
        }
        Severity::Medium => {
            "Complicates refactoring and obscures the intended layering".to_string()
        }
        Severity::Low => "Minor coupling that is worth untangling opportunistically".to_string(),
    }
}

fn suggest_fixes(cycle: &EnhancedCycle) -> Vec<String> {
    let mut suggestions = Vec::new();

    match cycle.cycle_type {
        CycleType::Direct => {
            suggestions
                .push("Merge the two modules or extract their shared part into a third".to_string());
        }
        CycleType::Indirect => {
            suggestions.push(
                "Map the full chain and break it at its weakest edge".to_string(),
            );
        }
        CycleType::CrossLanguage => {
            suggestions.push(
                "Define an explicit API contract at the language boundary".to_string(),
            );
        }
    }

    if cycle.severity >= Severity::High {
        suggestions.push("Prioritize this cycle in the next refactoring iteration".to_string());
    }
    if cycle.metrics.optional_edges > 0 {
        suggestions.push("Audit the optional edges first; some may be dead".to_string());
    }
    if cycle.metrics.average_weight < 1.0 {
        suggestions.push("Coupling is light here, a small patch should suffice".to_string());
    }

    suggestions
}

fn related_cycles(cycle: &EnhancedCycle, ids_and_nodes: &[(String, Vec<String>)]) -> Vec<String> {
    ids_and_nodes
        .iter()
        .filter(|(id, nodes)| {
            *id != cycle.id && nodes.iter().any(|node| cycle.contains_node(node))
        })
        .map(|(id, _)| id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CycleMetrics, DependencyKind, DependencyStrength};

    fn edge(
        from: &str,
        to: &str,
        kind: DependencyKind,
        strength: DependencyStrength,
        language: &str,
    ) -> CycleEdge {
        CycleEdge {
            from: from.to_string(),
            to: to.to_string(),
            kind,
            strength,
            language: language.to_string(),
            weight: 1.0,
        }
    }

    fn cycle_of(id: &str, edges: Vec<CycleEdge>) -> EnhancedCycle {
        let mut languages: Vec<String> = edges.iter().map(|e| e.language.clone()).collect();
        languages.sort();
        languages.dedup();
        let length = edges.len();

        EnhancedCycle {
            id: id.to_string(),
            length,
            languages: languages.clone(),
            weight: edges.iter().map(|e| e.weight).sum(),
            severity: Severity::High,
            cycle_type: if languages.len() > 1 {
                CycleType::CrossLanguage
            } else if length <= 2 {
                CycleType::Direct
            } else {
                CycleType::Indirect
            },
            metrics: CycleMetrics {
                average_weight: 1.0,
                ..CycleMetrics::default()
            },
            edges,
            description: String::new(),
            impact: String::new(),
            suggestions: Vec::new(),
            related_cycles: Vec::new(),
        }
    }

    #[test]
    fn optional_edges_outrank_strong_ones() {
        let cycle = cycle_of(
            "c1",
            vec![
                edge("a", "b", DependencyKind::Import, DependencyStrength::Strong, "rust"),
                edge("b", "a", DependencyKind::Import, DependencyStrength::Optional, "rust"),
            ],
        );

        let points = identify_breaking_points(&cycle, &SeverityThresholds::default());

        assert_eq!(points[0].from_node, "b");
        assert_eq!(points[0].strategy, BreakingStrategyKind::RemoveUnused);
        assert_eq!(points[0].effort, EffortLevel::Low);
        assert_eq!(points[0].impact, "low");
        assert!(points[0].confidence > points[1].confidence);
        assert_eq!(points[1].strategy, BreakingStrategyKind::IntroduceAbstraction);
        assert_eq!(points[1].effort, EffortLevel::High);
    }

    #[test]
    fn equal_confidence_breaks_ties_by_node_names() {
        let cycle = cycle_of(
            "c1",
            vec![
                edge("b", "a", DependencyKind::Import, DependencyStrength::Weak, "rust"),
                edge("a", "b", DependencyKind::Import, DependencyStrength::Weak, "rust"),
            ],
        );

        let points = identify_breaking_points(&cycle, &SeverityThresholds::default());
        assert_eq!(points[0].from_node, "a");
        assert_eq!(points[1].from_node, "b");
    }

    #[test]
    fn include_edges_suggest_extraction() {
        let cycle = cycle_of(
            "c1",
            vec![
                edge("ui.h", "core.h", DependencyKind::Include, DependencyStrength::Strong, "c"),
                edge("core.h", "ui.h", DependencyKind::Import, DependencyStrength::Strong, "c"),
            ],
        );

        let points = identify_breaking_points(&cycle, &SeverityThresholds::default());
        assert_eq!(points[0].from_node, "ui.h");
        assert_eq!(points[0].strategy, BreakingStrategyKind::ExtractSharedModule);
    }

    #[test]
    fn cross_language_edge_defers_via_indirection() {
        let cycle = cycle_of(
            "c1",
            vec![
                edge("svc", "lib", DependencyKind::Import, DependencyStrength::Strong, "go"),
                edge("lib", "svc", DependencyKind::Import, DependencyStrength::Strong, "python"),
            ],
        );

        let points = identify_breaking_points(&cycle, &SeverityThresholds::default());
        // both edges cross, so both defer
        assert!(points
            .iter()
            .all(|p| p.strategy == BreakingStrategyKind::DeferViaIndirection));
        assert!(points.iter().all(|p| (p.confidence - 0.5).abs() < 0.01));
    }

    #[test]
    fn weak_cycle_average_raises_confidence() {
        let mut cycle = cycle_of(
            "c1",
            vec![
                edge("a", "b", DependencyKind::Import, DependencyStrength::Weak, "rust"),
                edge("b", "a", DependencyKind::Import, DependencyStrength::Weak, "rust"),
            ],
        );
        cycle.metrics.average_weight = 0.3;

        let points = identify_breaking_points(&cycle, &SeverityThresholds::default());
        assert!((points[0].confidence - 0.75).abs() < 0.001);
    }

    #[test]
    fn confidence_stays_within_unit_interval() {
        let mut cycle = cycle_of(
            "c1",
            vec![
                edge("a", "b", DependencyKind::Include, DependencyStrength::Optional, "go"),
                edge("b", "a", DependencyKind::Import, DependencyStrength::Optional, "python"),
            ],
        );
        cycle.metrics.average_weight = 0.1;

        let points = identify_breaking_points(&cycle, &SeverityThresholds::default());
        for point in points {
            assert!(point.confidence <= 1.0);
            assert!(point.confidence >= 0.0);
        }
    }

    #[test]
    fn annotation_fills_narrative_fields() {
        let mut cycles = vec![cycle_of(
            "c1",
            vec![
                edge("a", "b", DependencyKind::Import, DependencyStrength::Strong, "rust"),
                edge("b", "a", DependencyKind::Import, DependencyStrength::Strong, "rust"),
            ],
        )];

        annotate_cycles(&mut cycles);

        assert_eq!(cycles[0].description, "Direct cycle of length 2: a → b → a");
        assert!(!cycles[0].impact.is_empty());
        assert!(!cycles[0].suggestions.is_empty());
        assert!(cycles[0].related_cycles.is_empty());
    }

    #[test]
    fn related_cycles_share_at_least_one_node() {
        let mut cycles = vec![
            cycle_of(
                "c1",
                vec![
                    edge("a", "b", DependencyKind::Import, DependencyStrength::Strong, "rust"),
                    edge("b", "a", DependencyKind::Import, DependencyStrength::Strong, "rust"),
                ],
            ),
            cycle_of(
                "c2",
                vec![
                    edge("b", "c", DependencyKind::Import, DependencyStrength::Strong, "rust"),
                    edge("c", "b", DependencyKind::Import, DependencyStrength::Strong, "rust"),
                ],
            ),
            cycle_of(
                "c3",
                vec![
                    edge("x", "y", DependencyKind::Import, DependencyStrength::Strong, "rust"),
                    edge("y", "x", DependencyKind::Import, DependencyStrength::Strong, "rust"),
                ],
            ),
        ];

        annotate_cycles(&mut cycles);

        assert_eq!(cycles[0].related_cycles, vec!["c2"]);
        assert_eq!(cycles[1].related_cycles, vec!["c1"]);
        assert!(cycles[2].related_cycles.is_empty());
    }

    #[test]
    fn high_severity_cycles_get_priority_suggestion() {
        let mut cycles = vec![cycle_of(
            "c1",
            vec![
                edge("a", "b", DependencyKind::Import, DependencyStrength::Strong, "rust"),
                edge("b", "a", DependencyKind::Import, DependencyStrength::Strong, "rust"),
            ],
        )];
        cycles[0].severity = Severity::Critical;

        annotate_cycles(&mut cycles);
        assert!(cycles[0]
            .suggestions
            .iter()
            .any(|s| s.contains("next refactoring iteration")));
    }
}
