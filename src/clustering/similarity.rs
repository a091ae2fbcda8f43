use crate::clustering::SimilarityMeasure;

/// A precursor ion located in retention time (seconds) and m/z
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PrecursorPoint {
    pub rt: f64,
    pub mz: f64,
}

impl PrecursorPoint {
    pub fn new(rt: f64, mz: f64) -> Self {
        Self { rt, mz }
    }
}

/// Similarity of two precursors that are close in both retention time and m/z.
///
/// Two points further apart than `rt_tolerance` seconds or `mz_tolerance` Da
/// have similarity 0. Otherwise the similarity is
/// `1 - (d_rt / rt_tolerance + d_mz / mz_tolerance) / 2`.
///
/// The weights are carried for configuration round-trips but do not enter
/// the measure.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PrecursorSimilarity {
    pub rt_tolerance: f64,
    pub rt_weight: f64,
    pub mz_tolerance: f64,
    pub mz_weight: f64,
}

impl Default for PrecursorSimilarity {
    fn default() -> Self {
        Self {
            rt_tolerance: 10.0,
            rt_weight: 1.0,
            mz_tolerance: 1.0,
            mz_weight: 10.0,
        }
    }
}

impl PrecursorSimilarity {
    pub fn new(rt_tolerance: f64, mz_tolerance: f64) -> Self {
        Self {
            rt_tolerance,
            mz_tolerance,
            ..Default::default()
        }
    }

    /// The similarity for absolute differences in retention time and m/z
    pub fn similarity_of_deltas(&self, d_rt: f64, d_mz: f64) -> f64 {
        if d_rt > self.rt_tolerance || d_mz > self.mz_tolerance {
            return 0.0;
        }
        let sim = 1.0 - (d_rt / self.rt_tolerance + d_mz / self.mz_tolerance) / 2.0;
        sim.clamp(0.0, 1.0)
    }
}

impl SimilarityMeasure<PrecursorPoint> for PrecursorSimilarity {
    fn similarity(&self, first: &PrecursorPoint, second: &PrecursorPoint) -> f64 {
        let d_rt = (first.rt - second.rt).abs();
        let d_mz = (first.mz - second.mz).abs();
        self.similarity_of_deltas(d_rt, d_mz)
    }
}
