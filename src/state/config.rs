/// Analyzer configuration
///
/// Every heuristic threshold lives here with its default. The defaults are the
/// values the screening behavior was tuned against, so changing them changes
/// which uploads are accepted. Configuration is stored as JSON, either passed
/// on the command line or found in the user's config directory:
/// - Linux: ~/.config/ecg-analyzer/config.json
/// - macOS: ~/Library/Application Support/ecg-analyzer/config.json
/// - Windows: %APPDATA%\ecg-analyzer\config.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::error::Result;

/// Simulated processing latency before classification
pub const DEFAULT_ANALYSIS_DELAY_MS: u64 = 2500;

/// Largest upload accepted (5 MB)
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Thresholds used by the ECG-likeness validator
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ValidatorThresholds {
    // ========== Sampling ==========

    /// Nominal number of pixels to sample
    pub sample_target: usize,

    // ========== Waveform ==========

    /// Sliding window length (in samples) for waveform detection
    pub waveform_window: usize,
    /// Brightness jump between neighbours that counts as a change
    pub waveform_step: f64,
    /// A window with more changes than this is a waveform pattern
    pub waveform_min_changes: usize,
    /// Waveform patterns must exceed this fraction of the sample
    pub waveform_ratio: f64,

    // ========== Text / labels ==========

    /// Brightness band (exclusive) where label ink is expected
    pub text_brightness_min: f64,
    pub text_brightness_max: f64,
    /// Maximum brightness difference to the next pixel for a text hit
    pub text_neighbor_delta: f64,
    /// Text hits must exceed this fraction of the sample
    pub text_ratio: f64,
    /// Histogram peak count range (inclusive) that suggests labels
    pub text_peaks_min: usize,
    pub text_peaks_max: usize,

    // ========== Grid ==========

    /// Number of leading rows/columns tracked
    pub grid_extent: usize,
    /// Pixels darker than this count toward their row/column
    pub grid_dark_brightness: f64,
    /// Row/column counter jump that counts as a line edge
    pub grid_line_delta: u32,
    /// More edges than this along either axis is a grid
    pub grid_min_lines: usize,

    // ========== Acceptance ratios ==========

    pub standard_light_ratio: f64,
    pub standard_dark_ratio: f64,
    pub colored_lead_ratio: f64,
    pub monochrome_dark_ratio: f64,
    pub monochrome_light_ratio: f64,
}

impl Default for ValidatorThresholds {
    fn default() -> Self {
        Self {
            sample_target: 20_000,

            waveform_window: 10,
            waveform_step: 10.0,
            waveform_min_changes: 2,
            waveform_ratio: 0.005,

            text_brightness_min: 20.0,
            text_brightness_max: 180.0,
            text_neighbor_delta: 30.0,
            text_ratio: 0.01,
            text_peaks_min: 3,
            text_peaks_max: 15,

            grid_extent: 100,
            grid_dark_brightness: 200.0,
            grid_line_delta: 3,
            grid_min_lines: 2,

            standard_light_ratio: 0.4,
            standard_dark_ratio: 0.05,
            colored_lead_ratio: 0.02,
            monochrome_dark_ratio: 0.1,
            monochrome_light_ratio: 0.7,
        }
    }
}

/// Top-level analyzer configuration
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Delay between a successful validation and classification, in ms
    pub analysis_delay_ms: u64,
    /// Upload size limit in bytes
    pub max_upload_bytes: u64,
    pub validator: ValidatorThresholds,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            analysis_delay_ms: DEFAULT_ANALYSIS_DELAY_MS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            validator: ValidatorThresholds::default(),
        }
    }
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }

    /// Same configuration with a different processing delay
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.analysis_delay_ms = delay_ms;
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        info!("⚙️  Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Explicit file if given, else the user config file if it exists, else defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Where the user configuration file is expected
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("ecg-analyzer");
        path.push("config.json");
        Some(path)
    }
}
