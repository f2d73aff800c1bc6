/// ECG-likeness detector
///
/// Gathers pixel statistics in a single strided pass and accepts the image if
/// any one of several loose criteria holds. Phone screenshots, scans, colored
/// digital exports and annotated printouts should all get through; only images
/// with no contrast, structure or color are turned away.

use std::collections::VecDeque;
use tracing::debug;

use super::grid::GridCounters;
use super::histogram::BrightnessHistogram;
use crate::color::LeadColor;
use crate::error::DecodeError;
use crate::raster::{PixelSampler, Raster};
use crate::state::config::ValidatorThresholds;
use crate::state::data::ValidationVerdict;

/// Shown when the image decodes but matches none of the criteria
pub const NOT_AN_ECG_MESSAGE: &str = "This doesn't appear to be an ECG. Please upload a clearer ECG image (standard clinical format, smartphone ECG, printout, digital export, or annotated ECG).";

/// Shown when the upload cannot be decoded
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load image";

/// Shown when the image decodes but yields no pixel buffer
pub const CONTEXT_FAILED_MESSAGE: &str = "Failed to analyze image";

/// Raw counts from one pass over the sample
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PixelStats {
    /// Nominal sample size (denominator for every ratio)
    pub sample_size: usize,
    pub light_pixels: usize,
    pub dark_line_pixels: usize,
    pub red_pixels: usize,
    pub blue_pixels: usize,
    pub green_pixels: usize,
    pub waveform_patterns: usize,
    pub text_like_pixels: usize,
    pub horizontal_lines: usize,
    pub vertical_lines: usize,
    pub text_peak_count: usize,
}

/// The individual acceptance criteria
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Criteria {
    pub has_waveforms: bool,
    pub is_standard_ecg: bool,
    pub has_colored_leads: bool,
    pub is_monochrome_ecg: bool,
    pub grid_like_pattern: bool,
    pub has_labels: bool,
}

impl Criteria {
    pub fn is_ecg(&self) -> bool {
        self.has_waveforms
            || self.is_standard_ecg
            || self.has_colored_leads
            || self.is_monochrome_ecg
            || self.grid_like_pattern
            || self.has_labels
    }
}

impl PixelStats {
    /// Collect statistics over a strided sample of the raster
    pub fn collect(raster: &Raster, t: &ValidatorThresholds) -> Self {
        let sampler = PixelSampler::new(raster, t.sample_target);
        let mut stats = PixelStats {
            sample_size: sampler.sample_size(),
            ..Default::default()
        };

        let mut window: VecDeque<f64> = VecDeque::with_capacity(t.waveform_window);
        let mut grid = GridCounters::new(raster.width() as usize, raster.height() as usize, t.grid_extent);
        let mut histogram = BrightnessHistogram::new();

        for px in sampler.iter() {
            let brightness = px.rgb.brightness();
            histogram.add(brightness);

            if brightness < t.grid_dark_brightness {
                grid.mark(px.x, px.y);
            }

            if px.rgb.is_light() {
                stats.light_pixels += 1;
            }
            if px.rgb.is_dark() {
                stats.dark_line_pixels += 1;
            }
            match px.rgb.lead_color() {
                Some(LeadColor::Red) => stats.red_pixels += 1,
                Some(LeadColor::Blue) => stats.blue_pixels += 1,
                Some(LeadColor::Green) => stats.green_pixels += 1,
                None => {}
            }

            if t.waveform_window > 0 {
                if window.len() >= t.waveform_window {
                    window.pop_front();
                }
                window.push_back(brightness);

                if window.len() == t.waveform_window {
                    let changes = window
                        .iter()
                        .zip(window.iter().skip(1))
                        .filter(|(a, b)| (*b - *a).abs() > t.waveform_step)
                        .count();
                    if changes > t.waveform_min_changes {
                        stats.waveform_patterns += 1;
                    }
                }
            }

            // Label ink: mid-tone pixel followed by a similar neighbour
            if brightness > t.text_brightness_min && brightness < t.text_brightness_max {
                if let Some(next) = raster.pixel(px.index + 1) {
                    if (brightness - next.brightness()).abs() < t.text_neighbor_delta {
                        stats.text_like_pixels += 1;
                    }
                }
            }
        }

        stats.horizontal_lines = grid.horizontal_lines(t.grid_line_delta);
        stats.vertical_lines = grid.vertical_lines(t.grid_line_delta);
        stats.text_peak_count = histogram.peak_count();
        stats
    }

    fn ratio(&self, count: usize) -> f64 {
        count as f64 / self.sample_size.max(1) as f64
    }

    pub fn light_ratio(&self) -> f64 {
        self.ratio(self.light_pixels)
    }

    pub fn dark_ratio(&self) -> f64 {
        self.ratio(self.dark_line_pixels)
    }

    pub fn text_ratio(&self) -> f64 {
        self.ratio(self.text_like_pixels)
    }

    /// Evaluate every criterion against the thresholds
    pub fn criteria(&self, t: &ValidatorThresholds) -> Criteria {
        let light = self.light_ratio();
        let dark = self.dark_ratio();
        let grid_like_pattern =
            self.horizontal_lines > t.grid_min_lines || self.vertical_lines > t.grid_min_lines;
        let has_distinct_text_peaks =
            (t.text_peaks_min..=t.text_peaks_max).contains(&self.text_peak_count);

        Criteria {
            has_waveforms: self.waveform_patterns as f64 > self.sample_size as f64 * t.waveform_ratio,
            is_standard_ecg: light > t.standard_light_ratio
                && dark > t.standard_dark_ratio
                && grid_like_pattern,
            has_colored_leads: [self.red_pixels, self.blue_pixels, self.green_pixels]
                .iter()
                .any(|&c| self.ratio(c) > t.colored_lead_ratio),
            is_monochrome_ecg: dark > t.monochrome_dark_ratio && light > t.monochrome_light_ratio,
            grid_like_pattern,
            has_labels: self.text_ratio() > t.text_ratio || has_distinct_text_peaks,
        }
    }
}

/// Judge a decoded raster
pub fn validate_raster(raster: &Raster, t: &ValidatorThresholds) -> ValidationVerdict {
    let stats = PixelStats::collect(raster, t);
    let criteria = stats.criteria(t);

    debug!(
        light_ratio = stats.light_ratio(),
        dark_ratio = stats.dark_ratio(),
        text_ratio = stats.text_ratio(),
        horizontal_lines = stats.horizontal_lines,
        vertical_lines = stats.vertical_lines,
        waveform_patterns = stats.waveform_patterns,
        text_peak_count = stats.text_peak_count,
        ?criteria,
        "ECG detection stats"
    );

    if criteria.is_ecg() {
        debug!(
            "ECG detected: {}",
            if criteria.has_labels { "with labels" } else { "without labels" }
        );
        ValidationVerdict::valid()
    } else {
        ValidationVerdict::invalid(NOT_AN_ECG_MESSAGE)
    }
}

/// Judge the outcome of a decode attempt
///
/// Decode failures become invalid verdicts; they are never propagated.
pub fn validate_decoded(
    decoded: Result<Raster, DecodeError>,
    t: &ValidatorThresholds,
) -> ValidationVerdict {
    match decoded {
        Ok(raster) => validate_raster(&raster, t),
        Err(DecodeError::Load(reason)) => {
            debug!("validation: image failed to load: {}", reason);
            ValidationVerdict::invalid(LOAD_FAILED_MESSAGE)
        }
        Err(DecodeError::Context(reason)) => {
            debug!("validation: no raster to analyze: {}", reason);
            ValidationVerdict::invalid(CONTEXT_FAILED_MESSAGE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    fn judge(raster: &Raster) -> ValidationVerdict {
        validate_raster(raster, &ValidatorThresholds::default())
    }

    #[test]
    fn test_grid_ecg_is_accepted_as_standard() {
        let raster = testutil::raster_from(&testutil::ecg_chart(100, 100));
        let t = ValidatorThresholds::default();
        let stats = PixelStats::collect(&raster, &t);
        let criteria = stats.criteria(&t);

        assert!(criteria.grid_like_pattern);
        assert!(criteria.is_standard_ecg);
        assert_eq!(judge(&raster), ValidationVerdict::valid());
    }

    #[test]
    fn test_uniform_pale_image_is_rejected() {
        let raster = testutil::raster_from(&testutil::solid(64, 64, [190, 190, 190]));
        let t = ValidatorThresholds::default();
        let stats = PixelStats::collect(&raster, &t);

        assert_eq!(stats.sample_size, 64 * 64);
        assert_eq!(stats.text_like_pixels, 0);
        assert_eq!(stats.horizontal_lines, 0);
        assert_eq!(stats.text_peak_count, 1);
        assert_eq!(judge(&raster), ValidationVerdict::invalid(NOT_AN_ECG_MESSAGE));
    }

    #[test]
    fn test_uniform_near_black_is_rejected() {
        let raster = testutil::raster_from(&testutil::solid(64, 64, [10, 10, 10]));
        assert_eq!(judge(&raster), ValidationVerdict::invalid(NOT_AN_ECG_MESSAGE));
    }

    #[test]
    fn test_uniform_mid_gray_passes_only_on_text_heuristic() {
        let raster = testutil::raster_from(&testutil::solid(64, 64, [128, 128, 128]));
        let t = ValidatorThresholds::default();
        let criteria = PixelStats::collect(&raster, &t).criteria(&t);

        assert_eq!(
            criteria,
            Criteria { has_labels: true, ..Default::default() }
        );
        assert!(judge(&raster).is_valid);
    }

    #[test]
    fn test_colored_lead_is_accepted() {
        let mut img = testutil::solid(64, 64, [255, 255, 255]);
        for x in 0..64 {
            for dy in 0..4 {
                img.put_pixel(x, 30 + dy, image::Rgb([230, 20, 20]));
            }
        }
        let raster = testutil::raster_from(&img);
        let t = ValidatorThresholds::default();
        let stats = PixelStats::collect(&raster, &t);

        assert_eq!(stats.red_pixels, 64 * 4);
        assert!(stats.criteria(&t).has_colored_leads);
        assert!(judge(&raster).is_valid);
    }

    #[test]
    fn test_noisy_stripes_count_as_waveforms() {
        // alternating black/white columns flip brightness on every sample
        let mut img = testutil::solid(64, 64, [255, 255, 255]);
        for y in 0..64 {
            for x in (0..64).step_by(2) {
                img.put_pixel(x, y, image::Rgb([0, 0, 0]));
            }
        }
        let raster = testutil::raster_from(&img);
        let t = ValidatorThresholds::default();
        let criteria = PixelStats::collect(&raster, &t).criteria(&t);

        assert!(criteria.has_waveforms);
        assert!(judge(&raster).is_valid);
    }

    #[test]
    fn test_tightened_thresholds_reject_mid_gray() {
        let raster = testutil::raster_from(&testutil::solid(64, 64, [128, 128, 128]));
        let t = ValidatorThresholds {
            text_ratio: 2.0,
            ..Default::default()
        };
        assert!(!validate_raster(&raster, &t).is_valid);
    }

    #[test]
    fn test_decode_failures_have_distinct_messages() {
        let t = ValidatorThresholds::default();

        let load = validate_decoded(Err(DecodeError::Load("corrupt".into())), &t);
        assert_eq!(load, ValidationVerdict::invalid(LOAD_FAILED_MESSAGE));

        let context = validate_decoded(Err(DecodeError::Context("empty".into())), &t);
        assert_eq!(context, ValidationVerdict::invalid(CONTEXT_FAILED_MESSAGE));
    }
}
