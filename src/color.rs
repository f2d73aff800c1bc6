/// Pixel color utilities
///
/// This module handles the per-pixel measurements every heuristic is built on:
/// - Brightness (plain channel average)
/// - Luma (perceptual weighting used by the feature extractor)
/// - Dominant-channel classification (colored ECG leads)

/// Perceptual luma weights for R, G and B
const LUMA_WEIGHTS: [f64; 3] = [0.3, 0.59, 0.11];

/// Channel level above which a channel counts as "strong" for lead colors
pub const STRONG_CHANNEL: u8 = 150;

/// Channel level below which a channel counts as "weak" (lead colors, dark lines)
pub const WEAK_CHANNEL: u8 = 100;

/// Channel level above which all three channels make a light pixel
pub const LIGHT_CHANNEL: u8 = 200;

/// A single RGB pixel (alpha is ignored by every heuristic)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Dominant color of a saturated pixel, as drawn by digital ECG exports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadColor {
    Red,
    Green,
    Blue,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from an RGBA quad, dropping alpha
    pub const fn from_rgba([r, g, b, _]: [u8; 4]) -> Self {
        Self::new(r, g, b)
    }

    /// Plain average of the three channels, in [0, 255]
    pub fn brightness(&self) -> f64 {
        (self.r as f64 + self.g as f64 + self.b as f64) / 3.0
    }

    /// Perceptual luma in [0, 255]
    pub fn luma(&self) -> f64 {
        self.r as f64 * LUMA_WEIGHTS[0]
            + self.g as f64 * LUMA_WEIGHTS[1]
            + self.b as f64 * LUMA_WEIGHTS[2]
    }

    /// All channels above the light threshold (paper background, grid)
    pub fn is_light(&self) -> bool {
        self.r > LIGHT_CHANNEL && self.g > LIGHT_CHANNEL && self.b > LIGHT_CHANNEL
    }

    /// All channels below the weak threshold (trace or grid ink)
    pub fn is_dark(&self) -> bool {
        self.r < WEAK_CHANNEL && self.g < WEAK_CHANNEL && self.b < WEAK_CHANNEL
    }

    /// Classify a pixel with one strong channel and two weak ones
    pub fn lead_color(&self) -> Option<LeadColor> {
        let strong = |c: u8| c > STRONG_CHANNEL;
        let weak = |c: u8| c < WEAK_CHANNEL;

        if strong(self.r) && weak(self.g) && weak(self.b) {
            Some(LeadColor::Red)
        } else if weak(self.r) && weak(self.g) && strong(self.b) {
            Some(LeadColor::Blue)
        } else if weak(self.r) && strong(self.g) && weak(self.b) {
            Some(LeadColor::Green)
        } else {
            None
        }
    }
}
