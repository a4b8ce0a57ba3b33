//! Dependency graph construction for cycle search.
//!
//! The builder turns the caller's flat edge list into an adjacency view,
//! applying the configured inclusion filters. Parallel edges between the same
//! two nodes are all retained: each represents an independent relationship
//! with its own strength and kind, and breaking-point analysis needs to see
//! every one of them.

pub mod enumerate;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::config::DetectionConfig;
use crate::core::errors::{DetectionError, Result};
use crate::core::{Dependency, DependencyGraphInput, DependencyStrength};

/// Adjacency view of the filtered input, read-only for the rest of the run.
pub struct DependencyGraph {
    /// Node -> surviving outgoing edges, input order preserved
    adjacency: BTreeMap<String, Vec<Dependency>>,
    /// Distinct nodes under analysis: declared modules plus the endpoints of
    /// every surviving edge
    universe: BTreeSet<String>,
    /// Node -> strongly connected component index
    components: HashMap<String, usize>,
    edge_count: usize,
}

impl DependencyGraph {
    pub fn out_edges(&self, node: &str) -> &[Dependency] {
        self.adjacency
            .get(node)
            .map(|edges| edges.as_slice())
            .unwrap_or(&[])
    }

    /// Nodes with at least one outgoing edge, in sorted order. Only these can
    /// start a cycle.
    pub fn start_nodes(&self) -> impl Iterator<Item = &String> {
        self.adjacency.keys()
    }

    /// True when both nodes sit in the same strongly connected component.
    /// Every elementary cycle lies entirely within one component, so the
    /// search never needs to leave the start node's.
    pub fn same_component(&self, a: &str, b: &str) -> bool {
        match (self.components.get(a), self.components.get(b)) {
            (Some(ca), Some(cb)) => ca == cb,
            _ => false,
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn node_count(&self) -> usize {
        self.universe.len()
    }

    pub fn universe(&self) -> &BTreeSet<String> {
        &self.universe
    }
}

/// Build the adjacency view, dropping edges the config excludes.
///
/// Fails with [`DetectionError::EmptyGraph`] only when the input had edges
/// and the filters removed every one of them; an input with no dependencies
/// at all is valid and produces an empty graph.
pub fn build_graph(
    input: &DependencyGraphInput,
    config: &DetectionConfig,
) -> Result<DependencyGraph> {
    let mut adjacency: BTreeMap<String, Vec<Dependency>> = BTreeMap::new();
    let mut universe: BTreeSet<String> = input.modules.keys().cloned().collect();
    let mut kept = 0usize;

    for dep in &input.dependencies {
        if dep.external && !config.include_external {
            continue;
        }
        if dep.strength == DependencyStrength::Weak && !config.analyze_weak_cycles {
            continue;
        }
        universe.insert(dep.from.clone());
        universe.insert(dep.to.clone());
        adjacency.entry(dep.from.clone()).or_default().push(dep.clone());
        kept += 1;
    }

    let supplied = input.dependencies.len();
    if kept == 0 && supplied > 0 {
        return Err(DetectionError::empty_graph(supplied, supplied));
    }

    let components = compute_components(&adjacency);

    log::debug!(
        "built dependency graph: {} nodes, {} edges ({} dropped by filters)",
        universe.len(),
        kept,
        supplied - kept
    );

    Ok(DependencyGraph {
        adjacency,
        universe,
        components,
        edge_count: kept,
    })
}

/// Tarjan strongly-connected-component pass over the surviving edges
fn compute_components(adjacency: &BTreeMap<String, Vec<Dependency>>) -> HashMap<String, usize> {
    let mut graph: DiGraph<&str, ()> = DiGraph::new();
    let mut node_map: HashMap<&str, NodeIndex> = HashMap::new();

    for (from, edges) in adjacency {
        let from_idx = *node_map
            .entry(from.as_str())
            .or_insert_with(|| graph.add_node(from.as_str()));
        for dep in edges {
            let to_idx = *node_map
                .entry(dep.to.as_str())
                .or_insert_with(|| graph.add_node(dep.to.as_str()));
            graph.add_edge(from_idx, to_idx, ());
        }
    }

    tarjan_scc(&graph)
        .into_iter()
        .enumerate()
        .flat_map(|(component, members)| {
            members
                .into_iter()
                .map(move |idx| (idx, component))
        })
        .fold(HashMap::new(), |mut acc, (idx, component)| {
            acc.insert(graph[idx].to_string(), component);
            acc
        })
}
