//! Retained-cycle analysis: filtering, grouping, and summary counts.

pub mod impact;

use std::collections::{BTreeMap, BTreeSet};

use crate::config::DetectionConfig;
use crate::core::{CycleSummary, EnhancedCycle, Severity};

/// Drop cycles the config excludes: first by length, then by severity on the
/// ordinal scale low < medium < high < critical. Everything downstream only
/// ever sees the survivors.
pub fn filter_cycles(cycles: Vec<EnhancedCycle>, config: &DetectionConfig) -> Vec<EnhancedCycle> {
    let before = cycles.len();
    let retained: Vec<EnhancedCycle> = cycles
        .into_iter()
        .filter(|cycle| cycle.length <= config.max_cycle_length)
        .filter(|cycle| cycle.severity >= config.min_severity_level)
        .collect();

    if retained.len() < before {
        log::debug!(
            "filtered cycles: {} retained of {} detected",
            retained.len(),
            before
        );
    }

    retained
}

/// Cycle ids keyed by every language the cycle touches; a cross-language
/// cycle appears under each of them.
pub fn group_by_language(cycles: &[EnhancedCycle]) -> BTreeMap<String, Vec<String>> {
    cycles.iter().fold(BTreeMap::new(), |mut acc, cycle| {
        for language in &cycle.languages {
            acc.entry(language.clone()).or_default().push(cycle.id.clone());
        }
        acc
    })
}

pub fn group_by_length(cycles: &[EnhancedCycle]) -> BTreeMap<usize, Vec<String>> {
    cycles.iter().fold(BTreeMap::new(), |mut acc, cycle| {
        acc.entry(cycle.length).or_default().push(cycle.id.clone());
        acc
    })
}

pub fn group_by_severity(cycles: &[EnhancedCycle]) -> BTreeMap<Severity, Vec<String>> {
    cycles.iter().fold(BTreeMap::new(), |mut acc, cycle| {
        acc.entry(cycle.severity).or_default().push(cycle.id.clone());
        acc
    })
}

/// Count-level view of the retained set. `total_nodes` covers the whole
/// analyzed universe, `affected_nodes` only cycle participants.
pub fn summarize(cycles: &[EnhancedCycle], total_nodes: usize) -> CycleSummary {
    let affected: BTreeSet<&str> = cycles
        .iter()
        .flat_map(|cycle| cycle.edges.iter().map(|edge| edge.from.as_str()))
        .collect();

    let language_breakdown = cycles
        .iter()
        .flat_map(|cycle| cycle.edges.iter())
        .fold(
            BTreeMap::<String, BTreeSet<&str>>::new(),
            |mut acc, edge| {
                acc.entry(edge.language.clone())
                    .or_default()
                    .insert(edge.from.as_str());
                acc
            },
        )
        .into_iter()
        .map(|(language, nodes)| (language, nodes.len()))
        .collect();

    let severity_distribution = cycles.iter().fold(BTreeMap::new(), |mut acc, cycle| {
        *acc.entry(cycle.severity).or_insert(0) += 1;
        acc
    });

    let critical_cycles = cycles
        .iter()
        .filter(|c| c.severity == Severity::Critical)
        .count();
    let high_severity_cycles = cycles
        .iter()
        .filter(|c| c.severity == Severity::High)
        .count();

    let average_cycle_length = if cycles.is_empty() {
        0.0
    } else {
        cycles.iter().map(|c| c.length).sum::<usize>() as f64 / cycles.len() as f64
    };
    let max_cycle_length = cycles.iter().map(|c| c.length).max().unwrap_or(0);

    CycleSummary {
        total_cycles: cycles.len(),
        total_nodes,
        affected_nodes: affected.len(),
        critical_cycles,
        high_severity_cycles,
        average_cycle_length,
        max_cycle_length,
        language_breakdown,
        severity_distribution,
    }
}
