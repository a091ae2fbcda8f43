use std::fmt;

use crate::clustering::SimilarityMeasure;

/// A symmetric distance matrix with an implicit zero diagonal, storing only
/// the strict upper triangle in single precision.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    dimension: usize,
    values: Vec<f32>,
}

impl DistanceMatrix {
    /// A matrix of `dimension` points with every distance set to `fill`
    pub fn new(dimension: usize, fill: f32) -> Self {
        let size = dimension * dimension.saturating_sub(1) / 2;
        Self {
            dimension,
            values: vec![fill; size],
        }
    }

    /// Fill a matrix with `1 - similarity` for every pair of `data`.
    /// Similarities outside `[0, 1]` are clamped and non-finite similarities
    /// are treated as 0.
    pub fn from_similarity<T, S: SimilarityMeasure<T>>(data: &[T], measure: &S) -> Self {
        let mut matrix = Self::new(data.len(), 1.0);
        for (i, a) in data.iter().enumerate() {
            for (j, b) in data.iter().enumerate().skip(i + 1) {
                let mut sim = measure.similarity(a, b);
                if !sim.is_finite() {
                    sim = 0.0;
                }
                matrix.set(i, j, (1.0 - sim.clamp(0.0, 1.0)) as f32);
            }
        }
        matrix
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        i * self.dimension - i * (i + 1) / 2 + (j - i - 1)
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        if i == j {
            0.0
        } else {
            self.values[self.offset(i, j)]
        }
    }

    /// Set the distance between `i` and `j`. Writes to the diagonal are ignored.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f32) {
        if i != j {
            let k = self.offset(i, j);
            self.values[k] = value;
        }
    }
}

impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.dimension {
            let row: Vec<String> = (0..self.dimension)
                .map(|j| format!("{:.3}", self.get(i, j)))
                .collect();
            writeln!(f, "{}", row.join("\t"))?;
        }
        Ok(())
    }
}
