/// Batch screening of a folder of ECG images
///
/// Walks the folder recursively, screens every image file and tallies the
/// outcomes. One bad file never stops the batch.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::analysis::EcgAnalyzer;
use crate::error::{EcgError, UploadError};
use crate::state::data::AnalysisResult;
use crate::upload::{has_image_extension, read_image_as_data_url};

/// What happened to one file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Analyzed { result: AnalysisResult },
    Rejected { message: String },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// Result of a folder screening
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub analyzed_count: usize,
    pub abnormal_count: usize,
    pub rejected_count: usize,
    pub failed_count: usize,
    pub files: Vec<FileReport>,
}

impl BatchSummary {
    fn record(&mut self, path: PathBuf, outcome: FileOutcome) {
        match &outcome {
            FileOutcome::Analyzed { result } => {
                self.analyzed_count += 1;
                if result.abnormal {
                    self.abnormal_count += 1;
                }
            }
            FileOutcome::Rejected { .. } => self.rejected_count += 1,
            FileOutcome::Failed { .. } => self.failed_count += 1,
        }
        self.files.push(FileReport { path, outcome });
    }
}

/// Image files under `folder`, sorted for a stable report order
pub fn collect_images(folder: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(folder)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && has_image_extension(p))
        .collect();
    paths.sort();
    paths
}

/// Screen one file
pub async fn screen_file(analyzer: &EcgAnalyzer, path: &Path) -> FileOutcome {
    let data_url = match read_image_as_data_url(path, analyzer.config().max_upload_bytes).await {
        Ok(url) => url,
        Err(e @ UploadError::Io(_)) => return FileOutcome::Failed { message: e.to_string() },
        Err(e) => return FileOutcome::Rejected { message: e.to_string() },
    };

    match analyzer.analyze(&data_url).await {
        Ok(result) => FileOutcome::Analyzed { result },
        Err(EcgError::InvalidEcg(message)) => FileOutcome::Rejected { message },
        Err(e) => FileOutcome::Failed { message: e.to_string() },
    }
}

/// Screen every image in a folder, one file at a time
pub async fn screen_folder(analyzer: &EcgAnalyzer, folder: &Path) -> BatchSummary {
    info!("🔍 Scanning folder: {}", folder.display());

    let mut summary = BatchSummary::default();
    for path in collect_images(folder) {
        let outcome = screen_file(analyzer, &path).await;
        if let FileOutcome::Failed { message } = &outcome {
            warn!("⚠️  Error screening {}: {}", path.display(), message);
        }
        summary.record(path, outcome);

        let done = summary.files.len();
        if done % 25 == 0 {
            info!("⏳ Screened {} files...", done);
        }
    }

    info!(
        "✅ Batch complete: {} analyzed ({} abnormal), {} rejected, {} failed",
        summary.analyzed_count, summary.abnormal_count, summary.rejected_count, summary.failed_count
    );

    summary
}
