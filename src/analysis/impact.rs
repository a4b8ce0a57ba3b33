//! System-wide impact scoring over the retained cycle set.
//!
//! All three scores live on a 0-10 scale. An empty retained set is the best
//! case: zero complexity, full testability and maintainability.

use std::collections::BTreeMap;

use crate::core::{AffectedNode, EnhancedCycle, ImpactAnalysis, LanguageImpact, Severity};

const MOST_AFFECTED_LIMIT: usize = 10;
const CRITICAL_PATH_LIMIT: usize = 10;

pub fn analyze_impact(
    cycles: &[EnhancedCycle],
    total_nodes: usize,
    group_by_language: bool,
) -> ImpactAnalysis {
    let language_impact = if group_by_language {
        language_impact(cycles)
    } else {
        BTreeMap::new()
    };

    ImpactAnalysis {
        system_complexity: system_complexity(cycles, total_nodes),
        testability_score: testability_score(cycles),
        maintainability_score: maintainability_score(cycles),
        language_impact,
        most_affected_nodes: most_affected_nodes(cycles),
        critical_paths: critical_paths(cycles),
    }
}

fn severity_weight(severity: Severity) -> f64 {
    match severity {
        Severity::Critical => 4.0,
        Severity::High => 3.0,
        Severity::Medium => 2.0,
        Severity::Low => 1.0,
    }
}

/// Severity-weighted cycle complexity, normalized by the size of the
/// analyzed universe
fn system_complexity(cycles: &[EnhancedCycle], total_nodes: usize) -> f64 {
    if cycles.is_empty() || total_nodes == 0 {
        return 0.0;
    }

    let weighted: f64 = cycles
        .iter()
        .map(|cycle| cycle.metrics.complexity * severity_weight(cycle.severity))
        .sum();

    (weighted / total_nodes as f64).clamp(0.0, 10.0)
}

fn testability_score(cycles: &[EnhancedCycle]) -> f64 {
    let mut score: f64 = 10.0;
    for cycle in cycles {
        score -= match cycle.severity {
            Severity::Critical => 2.0,
            Severity::High => 1.5,
            Severity::Medium => 1.0,
            Severity::Low => 0.5,
        };
        if cycle.is_cross_language() {
            score -= 0.3;
        }
    }
    score.clamp(0.0, 10.0)
}

fn maintainability_score(cycles: &[EnhancedCycle]) -> f64 {
    let mut score: f64 = 10.0;
    for cycle in cycles {
        score -= match cycle.severity {
            Severity::Critical => 1.5,
            Severity::High => 1.0,
            Severity::Medium => 0.7,
            Severity::Low => 0.3,
        };
        if cycle.length > 5 {
            score -= 0.2;
        }
        if cycle.is_cross_language() {
            score -= 0.2;
        }
        if cycle.metrics.strong_edges > cycle.metrics.weak_edges {
            score -= 0.1;
        }
    }
    score.clamp(0.0, 10.0)
}

fn language_impact(cycles: &[EnhancedCycle]) -> BTreeMap<String, LanguageImpact> {
    let mut by_language: BTreeMap<String, Vec<&EnhancedCycle>> = BTreeMap::new();
    for cycle in cycles {
        for language in &cycle.languages {
            by_language.entry(language.clone()).or_default().push(cycle);
        }
    }

    by_language
        .into_iter()
        .map(|(language, members)| {
            let affected_modules = members
                .iter()
                .flat_map(|cycle| cycle.edges.iter())
                .filter(|edge| edge.language == language)
                .map(|edge| edge.from.as_str())
                .collect::<std::collections::BTreeSet<_>>()
                .len();

            let complexity_score = members
                .iter()
                .map(|cycle| cycle.metrics.complexity)
                .sum::<f64>()
                / members.len() as f64;

            let mut impact = LanguageImpact {
                language: language.clone(),
                cycle_count: members.len(),
                affected_modules,
                complexity_score,
                recommendations: Vec::new(),
            };
            impact.recommendations = language_recommendations(&impact);
            (language, impact)
        })
        .collect()
}

/// Hints tuned per ecosystem, emitted only once a language's cycle load or
/// complexity crosses its tolerance; anything unrecognized gets the generic
/// one unconditionally
fn language_recommendations(impact: &LanguageImpact) -> Vec<String> {
    let mut hints = Vec::new();

    match impact.language.as_str() {
        "go" => {
            if impact.cycle_count > 3 {
                hints.push(
                    "Extract shared behavior into interfaces consumed by both packages"
                        .to_string(),
                );
                hints.push("Move common types into a separate leaf package".to_string());
            }
            if impact.complexity_score > 5.0 {
                hints.push("Break packages into smaller, focused modules".to_string());
            }
        }
        "javascript" | "typescript" => {
            if impact.cycle_count > 2 {
                hints.push(
                    "Use dynamic import() to defer loading one side of the cycle".to_string(),
                );
                hints.push(
                    "Inject dependencies at call time instead of importing at module load"
                        .to_string(),
                );
            }
            if impact.complexity_score > 4.0 {
                hints.push("Split entangled bundles into smaller feature modules".to_string());
            }
        }
        "python" => {
            if impact.cycle_count > 2 {
                hints.push("Move the import inside the function that needs it".to_string());
                hints.push("Depend on a Protocol instead of the concrete module".to_string());
            }
            if impact.complexity_score > 4.0 {
                hints.push("Break large modules into smaller packages".to_string());
            }
        }
        "java" => {
            if impact.cycle_count > 3 {
                hints.push("Let a dependency-injection container wire the two beans".to_string());
                hints.push("Split the shared contract into its own package".to_string());
            }
        }
        "rust" => {
            if impact.cycle_count > 3 {
                hints.push("Depend on a trait object owned by a lower crate".to_string());
                hints.push(
                    "Split the shared types into a leaf crate both sides import".to_string(),
                );
            }
            if impact.complexity_score > 5.0 {
                hints.push("Break the crate into smaller workspace members".to_string());
            }
        }
        _ => {
            hints.push(
                "Introduce a layering rule so lower modules never import upward".to_string(),
            );
        }
    }

    if impact.cycle_count > 5 {
        hints.push("Consider a broader architectural refactoring".to_string());
    }
    if impact.affected_modules > 10 {
        hints.push("Clarify module boundaries; too many modules are entangled".to_string());
    }

    hints
}

/// Nodes caught in more than one retained cycle, most entangled first
fn most_affected_nodes(cycles: &[EnhancedCycle]) -> Vec<AffectedNode> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for cycle in cycles {
        for edge in &cycle.edges {
            *counts.entry(edge.from.as_str()).or_insert(0) += 1;
        }
    }

    let mut affected: Vec<AffectedNode> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(node, cycle_count)| AffectedNode {
            node: node.to_string(),
            cycle_count,
        })
        .collect();

    affected.sort_by(|a, b| {
        b.cycle_count
            .cmp(&a.cycle_count)
            .then_with(|| a.node.cmp(&b.node))
    });
    affected.truncate(MOST_AFFECTED_LIMIT);
    affected
}

/// Node runs shared by more than one critical or high severity cycle,
/// most frequent first.
///
/// A run is a contiguous slice of two to four nodes taken from the
/// canonical path; runs never wrap past the closing edge. A shared run is
/// a segment whose removal would break more than one severe cycle at once.
fn critical_paths(cycles: &[EnhancedCycle]) -> Vec<Vec<String>> {
    let mut counts: BTreeMap<Vec<String>, usize> = BTreeMap::new();
    for cycle in cycles {
        if cycle.severity < Severity::High {
            continue;
        }
        let path = cycle.node_path();
        for i in 0..path.len() - 1 {
            for j in (i + 1)..(path.len() - 1).min(i + 4) {
                *counts.entry(path[i..=j].to_vec()).or_insert(0) += 1;
            }
        }
    }

    let mut shared: Vec<(Vec<String>, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .collect();
    shared.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    shared.truncate(CRITICAL_PATH_LIMIT);
    shared.into_iter().map(|(path, _)| path).collect()
}
