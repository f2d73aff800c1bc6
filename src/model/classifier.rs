/// Deterministic classifier
///
/// Maps a feature vector to a screening decision without any randomness: a
/// position-weighted sum of the features is folded into [0, 1) and every output
/// is a fixed function of that value and of a few feature-group means. The same
/// image therefore always gets the same answer.

use std::cmp::Ordering;

use super::catalog::CONDITIONS;
use crate::state::data::{Condition, EcgMetrics};

/// Hash values above this are classified abnormal
pub const ABNORMAL_THRESHOLD: f64 = 0.3;

pub const CONFIDENCE_BASE: f64 = 75.0;
pub const CONFIDENCE_SPAN: f64 = 23.0;

pub const SEVERITY_BASE: f64 = 40.0;
pub const SEVERITY_SPAN: f64 = 60.0;

/// Number and size of the contiguous feature groups
pub const FEATURE_GROUPS: usize = 5;
pub const FEATURE_GROUP_SIZE: usize = 100;

/// Probability swing per unit of group mean away from 0.5
pub const MODIFIER_SCALE: f64 = 30.0;

pub const MIN_PROBABILITY: f64 = 5.0;
pub const MAX_PROBABILITY: f64 = 98.0;

/// Maximum number of reported conditions
pub const MAX_PREDICTIONS: usize = 3;

/// Output of `classify`
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub abnormal: bool,
    pub confidence_score: f64,
    /// Sorted by probability, highest first; empty unless abnormal
    pub predictions: Vec<Condition>,
}

/// Position-weighted feature sum folded into [0, 1)
pub fn normalized_hash(features: &[f64]) -> f64 {
    let hash: f64 = features
        .iter()
        .enumerate()
        .map(|(i, f)| f * (i + 1) as f64)
        .sum();

    (hash % 1000.0) / 1000.0
}

/// Mean of each contiguous group, always divided by the nominal group size
fn group_means(features: &[f64]) -> [f64; FEATURE_GROUPS] {
    let mut means = [0.0; FEATURE_GROUPS];
    for (g, mean) in means.iter_mut().enumerate() {
        let start = (g * FEATURE_GROUP_SIZE).min(features.len());
        let end = ((g + 1) * FEATURE_GROUP_SIZE).min(features.len());
        let sum: f64 = features[start..end].iter().sum();
        *mean = sum / FEATURE_GROUP_SIZE as f64;
    }
    means
}

pub fn classify(features: &[f64]) -> Classification {
    let nh = normalized_hash(features);
    let abnormal = nh > ABNORMAL_THRESHOLD;
    let confidence_score = CONFIDENCE_BASE + nh * CONFIDENCE_SPAN;

    let predictions = if abnormal {
        rank_conditions(features, nh)
    } else {
        Vec::new()
    };

    Classification {
        abnormal,
        confidence_score,
        predictions,
    }
}

fn rank_conditions(features: &[f64], nh: f64) -> Vec<Condition> {
    let base_severity = SEVERITY_BASE + nh * SEVERITY_SPAN;
    let groups = group_means(features);

    let mut candidates: Vec<Condition> = CONDITIONS
        .iter()
        .enumerate()
        .map(|(k, name)| {
            let modifier = (groups[k % FEATURE_GROUPS] - 0.5) * MODIFIER_SCALE;
            Condition {
                name: name.to_string(),
                probability: (base_severity + modifier).clamp(MIN_PROBABILITY, MAX_PROBABILITY),
            }
        })
        .collect();

    // stable: ties keep catalog order
    candidates.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(Ordering::Equal)
    });

    let count = ((nh * MAX_PREDICTIONS as f64).floor() as usize + 1).min(MAX_PREDICTIONS);
    candidates.truncate(count);
    candidates
}

/// Synthetic vitals from the mean feature value
pub fn derive_metrics(features: &[f64], abnormal: bool) -> EcgMetrics {
    let mean = if features.is_empty() {
        0.0
    } else {
        features.iter().sum::<f64>() / features.len() as f64
    };

    let heart_rate = if abnormal {
        (40.0 + mean * 140.0).floor()
    } else {
        (60.0 + mean * 40.0).floor()
    };

    EcgMetrics {
        heart_rate: heart_rate.max(0.0) as u32,
        qtc_interval: 0.35 + mean * 0.15,
        pr_interval: 0.12 + mean * 0.08,
        qrs_width: 0.06 + mean * 0.04,
        st_deviation: if abnormal {
            mean * 0.6 - 0.3
        } else {
            mean * 0.2 - 0.1
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::is_known;
    use crate::model::features::FEATURE_LEN;

    /// A vector whose weighted sum is exactly `weight * position`
    fn spike(position: usize, weight: f64) -> Vec<f64> {
        let mut features = vec![0.0; FEATURE_LEN];
        features[position - 1] = weight;
        features
    }

    #[test]
    fn test_hash_folding() {
        assert_eq!(normalized_hash(&spike(500, 1.0)), 0.5);
        assert_eq!(normalized_hash(&spike(100, 1.0)), 0.1);
        // 1.0 * 512 * 3 = 1536 -> 536
        assert!((normalized_hash(&spike(512, 3.0)) - 0.536).abs() < 1e-12);
    }

    #[test]
    fn test_abnormal_scenario() {
        // hash = 500 -> nh = 0.5
        let result = classify(&spike(500, 1.0));

        assert!(result.abnormal);
        assert_eq!(result.confidence_score, 86.5);
        assert_eq!(result.predictions.len(), 2);

        // group 4 mean is 0.01, the rest are 0: base 70 shifted by -14.7 vs -15
        let top = &result.predictions[0];
        let second = &result.predictions[1];
        assert_eq!(top.name, "Sinus Tachycardia");
        assert_eq!(second.name, "Premature Ventricular Contractions");
        assert!((top.probability - 55.3).abs() < 1e-9);
        assert!((second.probability - 55.3).abs() < 1e-9);
    }

    #[test]
    fn test_normal_scenario() {
        let result = classify(&spike(100, 1.0));

        assert!(!result.abnormal);
        assert!((result.confidence_score - 77.3).abs() < 1e-9);
        assert!(result.predictions.is_empty());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let result = classify(&spike(300, 1.0));
        assert!(!result.abnormal);
        assert!(result.predictions.is_empty());
    }

    #[test]
    fn test_probabilities_are_clamped() {
        // weighted sum of all ones = 512 * 513 / 2 = 131_328 -> nh = 0.328
        let features = vec![1.0; FEATURE_LEN];
        let result = classify(&features);
        assert!(result.abnormal);
        for c in &result.predictions {
            assert!((MIN_PROBABILITY..=MAX_PROBABILITY).contains(&c.probability));
        }

        // nh near 1 with bright groups saturates at the cap
        let mut features = vec![1.0; FEATURE_LEN];
        features[511] = 1.0 + (999.0 - 328.0) / 512.0;
        let result = classify(&features);
        assert_eq!(result.predictions.len(), 3);
        assert!(result.predictions.iter().all(|c| c.probability == MAX_PROBABILITY));
    }

    #[test]
    fn test_predictions_sorted_and_bounded() {
        for seed in 0..200u32 {
            let features: Vec<f64> = (0..FEATURE_LEN)
                .map(|i| ((i as u32 * 31 + seed * 17) % 256) as f64 / 255.0)
                .collect();
            let result = classify(&features);

            assert!(result.confidence_score >= 75.0 && result.confidence_score < 98.0);
            assert!(result.predictions.len() <= 3);
            assert_eq!(result.predictions.is_empty(), !result.abnormal);
            assert!(result.predictions.iter().all(|c| is_known(&c.name)));
            assert!(result
                .predictions
                .windows(2)
                .all(|w| w[0].probability >= w[1].probability));
        }
    }

    #[test]
    fn test_metrics_formulas() {
        let features = vec![0.5; FEATURE_LEN];

        let abnormal = derive_metrics(&features, true);
        assert_eq!(abnormal.heart_rate, 110);
        assert!((abnormal.qtc_interval - 0.425).abs() < 1e-12);
        assert!((abnormal.pr_interval - 0.16).abs() < 1e-12);
        assert!((abnormal.qrs_width - 0.08).abs() < 1e-12);
        assert!(abnormal.st_deviation.abs() < 1e-12);

        let normal = derive_metrics(&features, false);
        assert_eq!(normal.heart_rate, 80);
        assert!(normal.st_deviation.abs() < 1e-12);
    }
}
