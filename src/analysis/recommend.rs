/// Recommendation tiers and result assembly

use crate::state::data::{max_probability, AnalysisResult, ModelOutput};

/// Severity above which the urgent advice is given
pub const URGENT_SEVERITY: f64 = 70.0;

/// Severity above which the moderate advice is given
pub const MODERATE_SEVERITY: f64 = 40.0;

const NORMAL: [&str; 3] = [
    "Maintain a heart-healthy lifestyle",
    "Continue regular check-ups",
    "Stay physically active with moderate exercise",
];

const URGENT: [&str; 4] = [
    "Seek immediate medical attention",
    "Avoid all strenuous physical activity",
    "Contact your cardiologist as soon as possible",
    "Continue taking any prescribed medications",
];

const MODERATE: [&str; 4] = [
    "Consult with a cardiologist within 48 hours",
    "Limit strenuous physical activity",
    "Monitor symptoms closely",
    "Continue prescribed medications",
];

const MILD: [&str; 4] = [
    "Schedule a follow-up with your doctor",
    "Moderate your physical activity",
    "Continue prescribed medications",
    "Monitor for any changes in symptoms",
];

/// Advice for a result, tiered by the highest condition probability
pub fn recommend(abnormal: bool, severity: f64) -> Vec<String> {
    let tier: &[&str] = if !abnormal {
        &NORMAL
    } else if severity > URGENT_SEVERITY {
        &URGENT
    } else if severity > MODERATE_SEVERITY {
        &MODERATE
    } else {
        &MILD
    };

    tier.iter().map(|s| s.to_string()).collect()
}

/// Package model output into the caller-facing result
pub fn assemble(output: ModelOutput) -> AnalysisResult {
    let severity = max_probability(&output.conditions);
    let recommendations = recommend(output.abnormal, severity);

    AnalysisResult {
        abnormal: output.abnormal,
        confidence_score: output.confidence_score,
        conditions: output.conditions,
        recommendations,
    }
}
