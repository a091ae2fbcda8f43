use mzpeaks::IndexType;

use crate::mass_error::MassErrorType;
use crate::peaks::PeakList;

/// Collapse runs of nearby peaks in an m/z sorted list.
///
/// Walking the list in order, a peak closer than `width` to the current
/// output peak has its intensity added to it. Otherwise it starts a new
/// output peak. The output peak keeps the m/z of the first peak of its run,
/// and PPM distances are relative to that m/z. Output peaks are indexed by
/// their position in the result.
pub fn consolidate_peaks(sorted: &PeakList, width: f64, unit: MassErrorType) -> PeakList {
    let mut result = PeakList::with_capacity(sorted.len());
    let mut iter = sorted.iter();
    let Some(first) = iter.next() else {
        return result;
    };
    let mut current = first.clone();
    for peak in iter {
        if unit.distance(current.mz, peak.mz) < width {
            current.intensity += peak.intensity;
        } else {
            current.index = result.len() as IndexType;
            result.push(current);
            current = peak.clone();
        }
    }
    current.index = result.len() as IndexType;
    result.push(current);
    result
}
