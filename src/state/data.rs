/// Shared data structures for the analysis pipeline
///
/// These structs represent the data model that flows between the pipeline
/// stages and out to callers. Field names serialize in camelCase so JSON output
/// keeps the shape the web front end consumes.

use serde::{Deserialize, Serialize};

/// Outcome of the ECG-likeness check
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationVerdict {
    pub fn valid() -> Self {
        Self { is_valid: true, message: None }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self { is_valid: false, message: Some(message.into()) }
    }
}

/// A named heart condition with its probability in percent
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Condition {
    pub name: String,
    pub probability: f64,
}

/// Synthetic ECG measurements derived alongside the classification
///
/// Not part of `AnalysisResult`; kept on `ModelOutput` for callers that want them.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EcgMetrics {
    /// Beats per minute
    pub heart_rate: u32,
    /// Seconds
    pub qtc_interval: f64,
    /// Seconds
    pub pr_interval: f64,
    /// Seconds
    pub qrs_width: f64,
    /// Millivolts
    pub st_deviation: f64,
}

impl Default for EcgMetrics {
    /// Resting values reported when the image could not be analyzed
    fn default() -> Self {
        Self {
            heart_rate: 75,
            qtc_interval: 0.40,
            pr_interval: 0.16,
            qrs_width: 0.08,
            st_deviation: 0.0,
        }
    }
}

/// Everything the model produces for one image
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelOutput {
    pub abnormal: bool,
    pub confidence_score: f64,
    pub conditions: Vec<Condition>,
    #[serde(flatten)]
    pub metrics: EcgMetrics,
}

/// The result handed back to callers
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub abnormal: bool,
    pub confidence_score: f64,
    pub conditions: Vec<Condition>,
    pub recommendations: Vec<String>,
}

impl AnalysisResult {
    /// Highest condition probability, or 0 when there are none
    pub fn max_probability(&self) -> f64 {
        max_probability(&self.conditions)
    }
}

/// Highest probability among `conditions`, or 0 when empty
pub fn max_probability(conditions: &[Condition]) -> f64 {
    conditions
        .iter()
        .map(|c| c.probability)
        .fold(None, |acc: Option<f64>, p| Some(acc.map_or(p, |m| m.max(p))))
        .unwrap_or(0.0)
}

/// Static description of the screening model
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    pub version: String,
    pub accuracy: f64,
    pub architecture: String,
    pub supported_conditions: u32,
    pub citation_index: String,
}
