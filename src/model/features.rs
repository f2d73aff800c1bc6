/// Feature extraction
///
/// Reduces an image to a fixed-length vector of normalized luma values taken at
/// evenly spaced pixel positions. The same raster always yields the same vector.

use crate::raster::{stride_for, Raster};

/// Length of every feature vector
pub const FEATURE_LEN: usize = 512;

/// Extract `FEATURE_LEN` luma samples in [0, 1]
///
/// Rasters smaller than `FEATURE_LEN` pixels wrap around so the vector keeps
/// its length.
pub fn extract_features(raster: &Raster) -> Vec<f64> {
    let total = raster.pixel_count();
    let stride = stride_for(total, FEATURE_LEN);

    (0..FEATURE_LEN)
        .map(|i| {
            raster
                .pixel((i * stride) % total)
                .map_or(0.0, |px| px.luma() / 255.0)
        })
        .collect()
}
