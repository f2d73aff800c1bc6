/// ECG analysis service
///
/// Orchestrates validation, the simulated processing delay and the model. All
/// pixel work runs on the blocking thread pool so callers on the async runtime
/// are never stalled by large uploads.

use std::sync::Arc;
use tokio::task;
use tracing::{error, info};

use super::recommend::assemble;
use crate::error::{EcgError, Result, DEFAULT_INVALID_MESSAGE};
use crate::model::EcgModel;
use crate::raster::{load_raster, ImageCrateDecoder, ImageDecoder};
use crate::state::config::AnalyzerConfig;
use crate::state::data::{AnalysisResult, ModelInfo, ModelOutput, ValidationVerdict};
use crate::validate::{validate_decoded, CONTEXT_FAILED_MESSAGE};

/// Validates and analyzes ECG images
///
/// Cheap to clone; clones share the decoder and configuration. Calls are
/// independent of each other and may run concurrently.
#[derive(Clone)]
pub struct EcgAnalyzer {
    decoder: Arc<dyn ImageDecoder>,
    model: EcgModel,
    config: Arc<AnalyzerConfig>,
}

impl Default for EcgAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

impl EcgAnalyzer {
    /// Analyzer backed by the `image` crate decoder
    pub fn new(config: AnalyzerConfig) -> Self {
        Self::with_decoder(Arc::new(ImageCrateDecoder), config)
    }

    pub fn with_decoder(decoder: Arc<dyn ImageDecoder>, config: AnalyzerConfig) -> Self {
        Self {
            decoder,
            model: EcgModel::new(),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Check whether an image looks like an ECG
    ///
    /// Always resolves to a verdict; decode problems become invalid verdicts.
    pub async fn validate(&self, data_url: &str) -> ValidationVerdict {
        let decoder = Arc::clone(&self.decoder);
        let config = Arc::clone(&self.config);
        let data_url = data_url.to_string();

        let outcome = task::spawn_blocking(move || {
            validate_decoded(load_raster(decoder.as_ref(), &data_url), &config.validator)
        })
        .await;

        match outcome {
            Ok(verdict) => verdict,
            Err(e) => {
                error!("❌ Validation task failed: {}", e);
                ValidationVerdict::invalid(CONTEXT_FAILED_MESSAGE)
            }
        }
    }

    /// Validate, wait out the processing delay, then classify
    ///
    /// A rejected image surfaces as `EcgError::InvalidEcg` carrying the
    /// validator's message.
    pub async fn analyze(&self, data_url: &str) -> Result<AnalysisResult> {
        let verdict = self.validate(data_url).await;
        if !verdict.is_valid {
            let message = verdict
                .message
                .unwrap_or_else(|| DEFAULT_INVALID_MESSAGE.to_string());
            info!("🚫 Image rejected: {}", message);
            return Err(EcgError::InvalidEcg(message));
        }

        let delay = self.config.analysis_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let output = self.run_model(data_url).await?;
        let result = assemble(output);

        info!(
            "🔬 Analysis complete: abnormal={}, confidence={:.1}%, {} condition(s)",
            result.abnormal,
            result.confidence_score,
            result.conditions.len()
        );

        Ok(result)
    }

    /// Full model output for an image, including the synthetic vitals
    ///
    /// Skips validation and the delay.
    pub async fn run_model(&self, data_url: &str) -> Result<ModelOutput> {
        let decoder = Arc::clone(&self.decoder);
        let model = self.model;
        let data_url = data_url.to_string();

        task::spawn_blocking(move || model.analyze(load_raster(decoder.as_ref(), &data_url)))
            .await
            .map_err(|e| {
                error!("❌ Error analyzing ECG: {}", e);
                EcgError::AnalysisFailed
            })
    }

    pub fn model_info(&self) -> ModelInfo {
        self.model.info()
    }
}

/// Validate with the default configuration
pub async fn validate_ecg_image(data_url: &str) -> ValidationVerdict {
    EcgAnalyzer::default().validate(data_url).await
}

/// Analyze with the default configuration (including the 2.5 s delay)
pub async fn analyze_ecg_image(data_url: &str) -> Result<AnalysisResult> {
    EcgAnalyzer::default().analyze(data_url).await
}

pub fn ecg_model_info() -> ModelInfo {
    EcgModel::new().info()
}
