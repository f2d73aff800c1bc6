/// Analysis orchestration
///
/// - `service.rs` - validate, delay, classify
/// - `recommend.rs` - severity-tiered advice and result assembly

pub mod recommend;
pub mod service;

pub use recommend::{assemble, recommend};
pub use service::{analyze_ecg_image, ecg_model_info, validate_ecg_image, EcgAnalyzer};
