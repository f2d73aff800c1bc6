/// ECG-likeness validation
///
/// - `detector.rs` - statistics pass and acceptance rule
/// - `grid.rs` - row/column gridline counters
/// - `histogram.rs` - brightness histogram and peak counting

pub mod detector;
pub mod grid;
pub mod histogram;

pub use detector::{
    validate_decoded, validate_raster, Criteria, PixelStats, CONTEXT_FAILED_MESSAGE,
    LOAD_FAILED_MESSAGE, NOT_AN_ECG_MESSAGE,
};
