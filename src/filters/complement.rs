use crate::filters::SpectrumFilter;
use crate::spectrum::scan_properties::IonProperties;
use crate::spectrum::{Spectrum, SpectrumLike};

/// Total intensity of peak pairs that could be complementary singly charged
/// fragments of the precursor, i.e. whose m/z values sum to the precursor m/z
/// within `tolerance`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComplementFilter {
    pub tolerance: f64,
}

impl Default for ComplementFilter {
    fn default() -> Self {
        Self { tolerance: 1.1 }
    }
}

impl ComplementFilter {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Score a list of peaks already sorted by m/z against `parent_mz`.
    ///
    /// A single pass walks one cursor up from the lightest peak and one down
    /// from the heaviest. When the sum matches the parent exactly the lower
    /// cursor advances, so a pair sharing its upper endpoint with the next
    /// match can be missed. A cursor may meet itself, in which case that peak
    /// is paired with itself.
    pub fn score_sorted(&self, mzs_and_intensities: &[(f64, f32)], parent_mz: f64) -> f64 {
        let n = mzs_and_intensities.len();
        if n < 2 {
            return 0.0;
        }
        let mut result = 0.0;
        let mut i = 0usize;
        let mut j = n - 1;
        while i <= j {
            let (mz_i, int_i) = mzs_and_intensities[i];
            let (mz_j, int_j) = mzs_and_intensities[j];
            let sum = mz_i + mz_j;
            if (sum - parent_mz).abs() < self.tolerance {
                result += int_i as f64 + int_j as f64;
            }
            if sum > parent_mz {
                if j == 0 {
                    break;
                }
                j -= 1;
            } else {
                i += 1;
            }
        }
        result
    }
}

impl SpectrumFilter for ComplementFilter {
    fn name(&self) -> &'static str {
        "ComplementFilter"
    }

    /// Sorts the spectrum's peaks by m/z and scores them. Spectra with fewer
    /// than two peaks or without a precursor score 0.
    fn apply(&self, spectrum: &mut Spectrum) -> f64 {
        if spectrum.peaks.len() < 2 {
            return 0.0;
        }
        let parent_mz = match spectrum.precursor() {
            Some(prec) => prec.mz(),
            None => return 0.0,
        };
        spectrum.peaks.sort_by_position();
        let pairs: Vec<(f64, f32)> = spectrum
            .peaks
            .iter()
            .map(|p| (p.mz, p.intensity))
            .collect();
        self.score_sorted(&pairs, parent_mz)
    }
}
