//! An ordered, editable list of centroid peaks.
//!
//! Unlike [`mzpeaks::PeakSet`], a [`PeakList`] does not keep itself sorted on
//! insertion. Peaks are appended as given and the list is put in m/z order
//! explicitly with [`PeakList::sort_by_position`].
use std::fmt;
use std::ops;
use std::slice;

pub use mzpeaks::CentroidPeak;
use mzpeaks::IndexType;

#[derive(Default, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeakList {
    peaks: Vec<CentroidPeak>,
}

impl PeakList {
    pub fn new(peaks: Vec<CentroidPeak>) -> Self {
        Self { peaks }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            peaks: Vec::with_capacity(capacity),
        }
    }

    pub fn empty() -> Self {
        Self::with_capacity(0)
    }

    /// Build a list from `(m/z, intensity)` pairs, in the order given.
    pub fn from_pairs<I: IntoIterator<Item = (f64, f32)>>(pairs: I) -> Self {
        pairs
            .into_iter()
            .map(|(mz, intensity)| CentroidPeak {
                mz,
                intensity,
                ..CentroidPeak::default()
            })
            .collect()
    }

    /// Append a peak at the end of the list without restoring m/z order.
    pub fn push(&mut self, peak: CentroidPeak) {
        self.peaks.push(peak);
    }

    pub fn extend_from_peaks(&mut self, other: &PeakList) {
        self.peaks.extend_from_slice(&other.peaks);
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&CentroidPeak> {
        self.peaks.get(i)
    }

    pub fn first(&self) -> Option<&CentroidPeak> {
        self.peaks.first()
    }

    pub fn iter(&self) -> slice::Iter<'_, CentroidPeak> {
        self.peaks.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, CentroidPeak> {
        self.peaks.iter_mut()
    }

    pub fn as_slice(&self) -> &[CentroidPeak] {
        &self.peaks
    }

    pub fn clear(&mut self) {
        self.peaks.clear()
    }

    /// Sort the peaks by m/z. The sort is stable so peaks with equal m/z keep
    /// their insertion order, and every peak's index is reset to its new
    /// position.
    pub fn sort_by_position(&mut self) {
        self.peaks.sort_by(|a, b| a.mz.total_cmp(&b.mz));
        for (i, p) in self.peaks.iter_mut().enumerate() {
            p.index = i as IndexType;
        }
    }

    pub fn is_sorted(&self) -> bool {
        self.peaks.windows(2).all(|w| w[0].mz <= w[1].mz)
    }

    /// The total ion current of the list
    pub fn tic(&self) -> f32 {
        self.peaks.iter().map(|p| p.intensity).sum()
    }

    pub fn into_inner(self) -> Vec<CentroidPeak> {
        self.peaks
    }
}

impl ops::Index<usize> for PeakList {
    type Output = CentroidPeak;

    fn index(&self, i: usize) -> &Self::Output {
        &self.peaks[i]
    }
}

impl ops::IndexMut<usize> for PeakList {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.peaks[i]
    }
}

impl fmt::Display for PeakList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PeakList(<{} Peaks>)", self.len())
    }
}

impl From<Vec<CentroidPeak>> for PeakList {
    fn from(v: Vec<CentroidPeak>) -> PeakList {
        PeakList::new(v)
    }
}

impl FromIterator<CentroidPeak> for PeakList {
    fn from_iter<T: IntoIterator<Item = CentroidPeak>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Extend<CentroidPeak> for PeakList {
    fn extend<T: IntoIterator<Item = CentroidPeak>>(&mut self, iter: T) {
        self.peaks.extend(iter)
    }
}

impl IntoIterator for PeakList {
    type Item = CentroidPeak;
    type IntoIter = std::vec::IntoIter<CentroidPeak>;

    fn into_iter(self) -> Self::IntoIter {
        self.peaks.into_iter()
    }
}

impl<'a> IntoIterator for &'a PeakList {
    type Item = &'a CentroidPeak;
    type IntoIter = slice::Iter<'a, CentroidPeak>;

    fn into_iter(self) -> Self::IntoIter {
        self.peaks.iter()
    }
}

impl<'a> IntoIterator for &'a mut PeakList {
    type Item = &'a mut CentroidPeak;
    type IntoIter = slice::IterMut<'a, CentroidPeak>;

    fn into_iter(self) -> Self::IntoIter {
        self.peaks.iter_mut()
    }
}
