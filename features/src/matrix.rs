//! Extracted feature matrix.

use serde::Serialize;

/// One row per analysis frame, one column per mel channel.
///
/// All rows have exactly [`FeatureMatrix::num_channels`] entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureMatrix {
    step_size_seconds: f64,
    num_channels: usize,
    rows: Vec<Vec<f32>>,
}

impl FeatureMatrix {
    pub(crate) fn new(rows: Vec<Vec<f32>>, num_channels: usize, step_size_seconds: f64) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == num_channels));
        Self { step_size_seconds, num_channels, rows }
    }

    /// Number of analysis frames.
    pub fn num_frames(&self) -> usize {
        self.rows.len()
    }

    /// Length of every row.
    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    pub fn step_size_seconds(&self) -> f64 {
        self.step_size_seconds
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[f32]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Start time of frame `index` in seconds.
    pub fn frame_time(&self, index: usize) -> f64 {
        index as f64 * self.step_size_seconds
    }

    pub fn into_rows(self) -> Vec<Vec<f32>> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let m = FeatureMatrix::new(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]], 2, 0.01);
        assert_eq!(m.num_frames(), 3);
        assert_eq!(m.num_channels(), 2);
        assert!(!m.is_empty());
        assert_eq!(m.row(1), Some(&[3.0f32, 4.0][..]));
        assert_eq!(m.row(3), None);
        assert!((m.frame_time(2) - 0.02).abs() < 1e-12);
        assert_eq!(m.into_rows().len(), 3);
    }

    #[test]
    fn test_serialize() {
        let m = FeatureMatrix::new(vec![vec![0.5, -1.0]], 2, 0.01);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["num_channels"], 2);
        assert_eq!(json["rows"][0][1], -1.0);
    }
}
