//! Report-level recommendation text.

use crate::core::{CycleSummary, EnhancedCycle, ImpactAnalysis};

/// Compose the human-readable recommendation list for a finished analysis.
pub fn build_recommendations(
    summary: &CycleSummary,
    impact: &ImpactAnalysis,
    cycles: &[EnhancedCycle],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    recommendations.push(overall_assessment(summary.total_cycles));

    if summary.critical_cycles > 0 {
        recommendations.push(format!(
            "🔥 {} critical cycles require immediate resolution",
            summary.critical_cycles
        ));
    }

    if impact.system_complexity > 7.0 {
        recommendations.push(
            "System complexity is high; plan a broader architectural review".to_string(),
        );
    }
    if impact.testability_score < 6.0 {
        recommendations.push(
            "Cycles are hurting testability; break them before expanding the test suite"
                .to_string(),
        );
    }
    if impact.maintainability_score < 6.0 {
        recommendations.push(
            "Maintainability is degraded; schedule cycle removal into regular work".to_string(),
        );
    }

    for language_impact in impact.language_impact.values() {
        if language_impact.cycle_count > 3 {
            recommendations.push(format!(
                "Language {} participates in {} cycles; review its module boundaries",
                language_impact.language, language_impact.cycle_count
            ));
        }
    }

    if cycles.iter().any(|cycle| cycle.is_cross_language()) {
        recommendations.push(
            "Define clear API boundaries between languages to prevent cross-language cycles"
                .to_string(),
        );
    }

    recommendations
}

fn overall_assessment(total_cycles: usize) -> String {
    if total_cycles == 0 {
        "✅ No circular dependencies detected - excellent architecture!".to_string()
    } else if total_cycles <= 3 {
        "Minor circular dependencies detected - address when convenient".to_string()
    } else if total_cycles <= 10 {
        "⚠️ Moderate number of circular dependencies - plan refactoring".to_string()
    } else {
        "🚨 High number of circular dependencies - immediate attention required".to_string()
    }
}
