/// Brightness histogram
/// Labeled charts tend to show a handful of distinct brightness peaks (paper,
/// grid, trace, label ink), which the validator uses as a text hint.

/// 256-bin histogram of pixel brightness
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrightnessHistogram {
    pub data: [u32; 256],
}

impl Default for BrightnessHistogram {
    fn default() -> Self {
        Self { data: [0; 256] }
    }
}

impl BrightnessHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a brightness value in [0, 255] (fractions are floored)
    pub fn add(&mut self, brightness: f64) {
        let bin = (brightness.floor().max(0.0) as usize).min(255);
        self.data[bin] += 1;
    }

    pub fn total(&self) -> u64 {
        self.data.iter().map(|&c| c as u64).sum()
    }

    /// Number of strict local maxima
    ///
    /// The first and last bins are never peaks since they lack a neighbour.
    pub fn peak_count(&self) -> usize {
        self.data
            .windows(3)
            .filter(|w| w[1] > w[0] && w[1] > w[2])
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_floors_and_clamps() {
        let mut hist = BrightnessHistogram::new();
        hist.add(127.9);
        hist.add(255.0);
        hist.add(0.4);

        assert_eq!(hist.data[127], 1);
        assert_eq!(hist.data[255], 1);
        assert_eq!(hist.data[0], 1);
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn test_single_value_has_one_peak() {
        let mut hist = BrightnessHistogram::new();
        for _ in 0..10 {
            hist.add(128.0);
        }
        assert_eq!(hist.peak_count(), 1);
    }

    #[test]
    fn test_edges_and_plateaus_are_not_peaks() {
        let mut hist = BrightnessHistogram::new();
        hist.data[0] = 50;
        hist.data[255] = 50;
        hist.data[10] = 5;
        hist.data[11] = 5;
        hist.data[100] = 3;
        hist.data[200] = 7;

        assert_eq!(hist.peak_count(), 2);
    }
}
