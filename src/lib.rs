//! Heuristic ECG image screening
//!
//! Decides whether an uploaded image looks like an ECG chart and, if it does,
//! produces a repeatable screening result: abnormal/normal, a confidence score,
//! up to three ranked conditions and tiered recommendations.
//!
//! This is not a medical device. The classifier is deterministic arithmetic
//! over pixel samples, not a trained model.
//!
//! ```no_run
//! # async fn run(data_url: &str) -> ecg_analyzer::error::Result<()> {
//! let analyzer = ecg_analyzer::EcgAnalyzer::default();
//! if analyzer.validate(data_url).await.is_valid {
//!     let result = analyzer.analyze(data_url).await?;
//!     println!("abnormal: {}", result.abnormal);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod batch;
pub mod color;
pub mod error;
pub mod model;
pub mod raster;
pub mod report;
pub mod state;
pub mod upload;
pub mod validate;

#[cfg(test)]
mod testutil;

pub use analysis::{analyze_ecg_image, ecg_model_info, validate_ecg_image, EcgAnalyzer};
pub use error::{DecodeError, EcgError, UploadError};
pub use raster::{ImageCrateDecoder, ImageDecoder, Raster};
pub use state::config::{AnalyzerConfig, ValidatorThresholds};
pub use state::data::{AnalysisResult, Condition, EcgMetrics, ModelInfo, ModelOutput, ValidationVerdict};
