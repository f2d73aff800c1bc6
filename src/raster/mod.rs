/// Image decoding and pixel sampling module
///
/// This module handles:
/// - Parsing data URLs into raw image bytes
/// - Decoding bytes into an RGBA raster behind the `ImageDecoder` trait
/// - Strided pixel sampling shared by the validator and the feature extractor

pub mod data_url;
pub mod loader;
pub mod sampler;

pub use loader::{load_raster, ImageCrateDecoder, ImageDecoder, Raster};
pub use sampler::{stride_for, PixelSampler, SampledPixel};
