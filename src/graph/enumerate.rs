//! Bounded elementary-cycle enumeration.
//!
//! Every start node gets its own depth-first search that only records paths
//! closing back at that start. A cycle of k nodes is therefore discovered up
//! to k times; a canonical key (the node sequence rotated to begin at the
//! lexicographically smallest id) collapses those rotations to one entity.
//! Rotation only, never reversal: a cycle and its reverse traversal are
//! different cycles.
//!
//! Worst-case cost is exponential in dense graphs. `max_cycle_length` and
//! `detection_depth` are the only bounds; callers feeding very large, very
//! dense graphs are expected to tighten them.

use rayon::prelude::*;
use std::collections::HashSet;

use crate::config::DetectionConfig;
use crate::core::Dependency;
use crate::graph::DependencyGraph;

/// A discovered cycle before scoring: the closed edge path in canonical
/// rotation, plus the key that identifies the rotation class.
#[derive(Clone, Debug, PartialEq)]
pub struct RawCycle {
    pub edges: Vec<Dependency>,
    pub key: String,
}

impl RawCycle {
    fn from_path(path: &[&Dependency], closing: &Dependency) -> Self {
        let mut edges: Vec<Dependency> = path.iter().map(|dep| (*dep).clone()).collect();
        edges.push(closing.clone());
        canonicalize(edges)
    }
}

/// Rotate the edge sequence so the path starts at the smallest node id.
/// Edges travel with their from-nodes, so one rotation fixes both.
fn canonicalize(mut edges: Vec<Dependency>) -> RawCycle {
    let min_pos = edges
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.from.cmp(&b.from))
        .map(|(pos, _)| pos)
        .unwrap_or(0);
    edges.rotate_left(min_pos);
    let key = cycle_key(&edges);
    RawCycle { edges, key }
}

/// Canonical key of an already-rotated edge sequence
pub fn cycle_key(edges: &[Dependency]) -> String {
    edges
        .iter()
        .map(|dep| dep.from.as_str())
        .collect::<Vec<_>>()
        .join("->")
}

/// Discover all distinct elementary cycles up to the configured length.
///
/// Start nodes are searched in parallel; results are merged in sorted start
/// order with first-discovery-wins semantics, so the outcome is identical to
/// a sequential sweep. The final list is sorted by canonical key.
pub fn enumerate_cycles(graph: &DependencyGraph, config: &DetectionConfig) -> Vec<RawCycle> {
    let starts: Vec<&String> = graph.start_nodes().collect();

    let discovered: Vec<Vec<RawCycle>> = starts
        .par_iter()
        .map(|start| search_from(graph, start.as_str(), config))
        .collect();

    let mut seen: HashSet<String> = HashSet::new();
    let mut cycles: Vec<RawCycle> = Vec::new();
    for found in discovered {
        for cycle in found {
            if seen.insert(cycle.key.clone()) {
                cycles.push(cycle);
            }
        }
    }

    cycles.sort_by(|a, b| a.key.cmp(&b.key));

    log::debug!(
        "enumerated {} distinct cycles from {} start nodes",
        cycles.len(),
        starts.len()
    );

    cycles
}

fn search_from<'g>(
    graph: &'g DependencyGraph,
    start: &'g str,
    config: &DetectionConfig,
) -> Vec<RawCycle> {
    let mut found = Vec::new();
    let mut path: Vec<&Dependency> = Vec::new();
    let mut on_path: HashSet<&str> = HashSet::new();
    on_path.insert(start);

    visit(graph, start, start, config, &mut path, &mut on_path, &mut found);

    found
}

/// One DFS step from `current`. The recursion depth is capped by
/// `effective_depth`, so the native stack is safe without an explicit one.
fn visit<'g>(
    graph: &'g DependencyGraph,
    current: &str,
    start: &str,
    config: &DetectionConfig,
    path: &mut Vec<&'g Dependency>,
    on_path: &mut HashSet<&'g str>,
    found: &mut Vec<RawCycle>,
) {
    for edge in graph.out_edges(current) {
        if edge.to == start {
            if path.len() + 1 <= config.max_cycle_length {
                found.push(RawCycle::from_path(path, edge));
            }
            continue;
        }

        // Re-entering a node already on the path would make the cycle
        // non-elementary; the shorter cycle is found from its own start.
        if on_path.contains(edge.to.as_str()) {
            continue;
        }

        // Any elementary cycle through `start` stays inside its component.
        if !graph.same_component(start, &edge.to) {
            continue;
        }

        if path.len() >= config.effective_depth() {
            continue;
        }

        path.push(edge);
        on_path.insert(edge.to.as_str());
        visit(graph, &edge.to, start, config, path, on_path, found);
        on_path.remove(edge.to.as_str());
        path.pop();
    }
}
