/// Row/column grid detection
///
/// Counts dark samples in the first rows and columns of the image. Chart paper
/// alternates between gridlines and blank paper, so the per-row (or per-column)
/// counters jump whenever a gridline starts or ends.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCounters {
    rows: Vec<u32>,
    cols: Vec<u32>,
}

impl GridCounters {
    /// Track at most `extent` rows and columns of a `width` x `height` image
    pub fn new(width: usize, height: usize, extent: usize) -> Self {
        Self {
            rows: vec![0; extent.min(height)],
            cols: vec![0; extent.min(width)],
        }
    }

    /// Record a dark sample at (x, y)
    pub fn mark(&mut self, x: usize, y: usize) {
        if let Some(col) = self.cols.get_mut(x) {
            *col += 1;
        }
        if let Some(row) = self.rows.get_mut(y) {
            *row += 1;
        }
    }

    /// Adjacent row pairs whose counters differ by more than `delta`
    pub fn horizontal_lines(&self, delta: u32) -> usize {
        edges(&self.rows, delta)
    }

    /// Adjacent column pairs whose counters differ by more than `delta`
    pub fn vertical_lines(&self, delta: u32) -> usize {
        edges(&self.cols, delta)
    }
}

fn edges(counts: &[u32], delta: u32) -> usize {
    counts
        .windows(2)
        .filter(|w| w[0].abs_diff(w[1]) > delta)
        .count()
}
