/// Strided pixel sampling
///
/// Walks the raster at a fixed stride instead of scanning every pixel, so the
/// heuristics cost the same on a phone photo and on a thumbnail.

use super::loader::Raster;
use crate::color::Rgb;

/// Stride that spreads `target` samples over `total` pixels (at least 1)
pub fn stride_for(total: usize, target: usize) -> usize {
    if target == 0 {
        return 1;
    }
    (total / target).max(1)
}

/// One sampled pixel with its position in the raster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampledPixel {
    pub index: usize,
    pub x: usize,
    pub y: usize,
    pub rgb: Rgb,
}

/// Strided view over a raster
#[derive(Debug, Clone, Copy)]
pub struct PixelSampler<'a> {
    raster: &'a Raster,
    sample_size: usize,
    stride: usize,
}

impl<'a> PixelSampler<'a> {
    /// Sample roughly `target` pixels
    ///
    /// The nominal sample size is `min(target, total)`. Every `stride`-th pixel
    /// of the whole buffer is visited, which can yield a few more pixels than
    /// the nominal size when the division is not exact.
    pub fn new(raster: &'a Raster, target: usize) -> Self {
        let total = raster.pixel_count();
        let sample_size = target.min(total).max(1);
        Self {
            raster,
            sample_size,
            stride: stride_for(total, sample_size),
        }
    }

    /// Nominal sample size, used as the denominator for all ratios
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn raster(&self) -> &'a Raster {
        self.raster
    }

    pub fn iter(&self) -> impl Iterator<Item = SampledPixel> + 'a {
        let raster = self.raster;
        (0..raster.pixel_count())
            .step_by(self.stride)
            .filter_map(move |index| {
                let rgb = raster.pixel(index)?;
                let (x, y) = raster.position(index);
                Some(SampledPixel { index, x, y, rgb })
            })
    }
}
