//! Vertex display sizes.
//!
//! Sizes are a rendering attribute only: each course's dependency count is
//! min-max rescaled into a [`SizeRange`].

use super::error::{GraphError, GraphResult};

/// Closed interval of vertex display sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeRange {
    min: f64,
    max: f64,
}

impl Default for SizeRange {
    fn default() -> Self {
        Self { min: 0.2, max: 0.8 }
    }
}

impl SizeRange {
    /// Creates a size range, rejecting non-finite or inverted bounds.
    pub fn new(min: f64, max: f64) -> GraphResult<Self> {
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(GraphError::InvalidSizeRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Size used when every count is equal.
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Rescales counts linearly so the smallest maps to `min` and the
    /// largest to `max`.
    ///
    /// When all counts are equal there is no spread to rescale, so every
    /// vertex gets [`SizeRange::midpoint`].
    ///
    /// # Example
    ///
    /// ```
    /// use coursegraph::graph::SizeRange;
    ///
    /// let range = SizeRange::default();
    /// let sizes = range.normalize(&[0, 1, 2]);
    /// assert!((sizes[0] - 0.2).abs() < 1e-9);
    /// assert!((sizes[1] - 0.5).abs() < 1e-9);
    /// assert!((sizes[2] - 0.8).abs() < 1e-9);
    ///
    /// assert_eq!(range.normalize(&[3, 3]), vec![0.5, 0.5]);
    /// ```
    pub fn normalize(&self, counts: &[usize]) -> Vec<f64> {
        let (Some(&lo), Some(&hi)) = (counts.iter().min(), counts.iter().max()) else {
            return Vec::new();
        };

        if lo == hi {
            return vec![self.midpoint(); counts.len()];
        }

        let spread = (hi - lo) as f64;
        counts
            .iter()
            .map(|&c| (c - lo) as f64 / spread * (self.max - self.min) + self.min)
            .collect()
    }
}
