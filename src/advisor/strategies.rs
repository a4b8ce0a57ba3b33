//! Remediation plan catalog.
//!
//! Plans are report-level: each one names the retained cycles it applies to
//! and carries concrete steps plus the risks of following them. Per-edge
//! advice lives with the breaking points instead.

use crate::core::{BreakingStrategyKind, CycleType, EffortLevel, EnhancedCycle, RemediationPlan};

/// Build the plan catalog for the retained cycle set, highest priority first.
pub fn remediation_plans(cycles: &[EnhancedCycle]) -> Vec<RemediationPlan> {
    if cycles.is_empty() {
        return Vec::new();
    }

    let mut plans = Vec::new();

    let abstraction_targets = matching_ids(cycles, |cycle| {
        cycle.cycle_type == CycleType::Direct && cycle.metrics.strong_edges >= 1
    });
    if !abstraction_targets.is_empty() {
        plans.push(interface_extraction(abstraction_targets));
    }

    let inversion_targets = matching_ids(cycles, |cycle| cycle.metrics.strong_edges >= 2);
    if !inversion_targets.is_empty() {
        plans.push(dependency_injection(inversion_targets));
    }

    plans.push(extract_shared_module(
        cycles.iter().map(|cycle| cycle.id.clone()).collect(),
    ));

    let boundary_targets = matching_ids(cycles, |cycle| {
        cycle.cycle_type == CycleType::CrossLanguage
    });
    if !boundary_targets.is_empty() {
        plans.push(event_driven_decoupling(boundary_targets));
    }

    plans.sort_by(|a, b| b.priority.cmp(&a.priority));
    plans
}

fn matching_ids<F>(cycles: &[EnhancedCycle], predicate: F) -> Vec<String>
where
    F: Fn(&EnhancedCycle) -> bool,
{
    cycles
        .iter()
        .filter(|cycle| predicate(cycle))
        .map(|cycle| cycle.id.clone())
        .collect()
}

fn interface_extraction(applicable_to: Vec<String>) -> RemediationPlan {
    RemediationPlan {
        strategy: BreakingStrategyKind::IntroduceAbstraction,
        name: "Interface Extraction".to_string(),
        description: "Replace one direction of a tight two-module cycle with a \
                      shared interface so only one side keeps a concrete dependency"
            .to_string(),
        applicable_to,
        priority: 8,
        effort: EffortLevel::Medium,
        impact: "Breaks the cycle while preserving behavior".to_string(),
        steps: vec![
            "Identify the methods one module actually calls on the other".to_string(),
            "Define an interface covering exactly those methods".to_string(),
            "Move the interface next to its consumer".to_string(),
            "Have the former dependency implement the interface".to_string(),
        ],
        risks: vec![
            "Over-wide interfaces recreate the coupling in disguise".to_string(),
        ],
    }
}

fn dependency_injection(applicable_to: Vec<String>) -> RemediationPlan {
    RemediationPlan {
        strategy: BreakingStrategyKind::InvertDependency,
        name: "Dependency Injection".to_string(),
        description: "Pass collaborators in from above instead of importing them, \
                      so the import graph points one way"
            .to_string(),
        applicable_to,
        priority: 7,
        effort: EffortLevel::High,
        impact: "Removes hard links between strongly coupled modules".to_string(),
        steps: vec![
            "Pick the edge whose direction contradicts the intended layering".to_string(),
            "Turn the callee into a parameter or constructor argument".to_string(),
            "Wire the concrete value at the composition root".to_string(),
        ],
        risks: vec![
            "Construction order becomes explicit and must be maintained".to_string(),
            "Call sites grow an extra parameter".to_string(),
        ],
    }
}

fn extract_shared_module(applicable_to: Vec<String>) -> RemediationPlan {
    RemediationPlan {
        strategy: BreakingStrategyKind::ExtractSharedModule,
        name: "Extract Shared Module".to_string(),
        description: "Move the declarations both sides need into a new leaf module \
                      neither side owns"
            .to_string(),
        applicable_to,
        priority: 6,
        effort: EffortLevel::Medium,
        impact: "Converts a cycle into two one-way dependencies".to_string(),
        steps: vec![
            "List the symbols used in both directions".to_string(),
            "Create a module containing only those symbols".to_string(),
            "Point both former cycle members at the new module".to_string(),
            "Delete the now-unused direct edges".to_string(),
        ],
        risks: vec![
            "The shared module can grow into a grab-bag without ownership".to_string(),
        ],
    }
}

fn event_driven_decoupling(applicable_to: Vec<String>) -> RemediationPlan {
    RemediationPlan {
        strategy: BreakingStrategyKind::DeferViaIndirection,
        name: "Event-Driven Decoupling".to_string(),
        description: "Replace the back-edge of a cross-language cycle with events \
                      or callbacks crossing an explicit boundary"
            .to_string(),
        applicable_to,
        priority: 5,
        effort: EffortLevel::High,
        impact: "Decouples components living in different runtimes".to_string(),
        steps: vec![
            "Choose the direction that should remain synchronous".to_string(),
            "Model the reverse direction as emitted events".to_string(),
            "Document the event contract at the language boundary".to_string(),
        ],
        risks: vec![
            "Control flow becomes harder to trace end to end".to_string(),
            "Event delivery failures need their own handling".to_string(),
        ],
    }
}
