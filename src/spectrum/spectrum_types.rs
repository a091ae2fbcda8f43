use crate::params::{ParamDescribed, ParamList};
use crate::peaks::{CentroidPeak, PeakList};
use crate::spectrum::scan_properties::{Precursor, SpectrumDescription};

/// A trait for providing a uniform delegated access to spectrum metadata
pub trait SpectrumLike: ParamDescribed {
    /// The method to access the spectrum description itself, which supplies
    /// the data for most other methods on this trait.
    fn description(&self) -> &SpectrumDescription;

    /// The method to access the spectrum descript itself, mutably.
    fn description_mut(&mut self) -> &mut SpectrumDescription;

    /// Access the (first) precursor information, if it exists.
    #[inline]
    fn precursor(&self) -> Option<&Precursor> {
        self.description().precursor.first()
    }

    /// Iterate over all precursors of the spectrum
    fn precursor_iter(&self) -> impl Iterator<Item = &Precursor> {
        self.description().precursor.iter()
    }

    #[inline]
    fn has_precursor(&self) -> bool {
        !self.description().precursor.is_empty()
    }

    /// The retention time of the scan, in seconds
    #[inline]
    fn start_time(&self) -> f64 {
        self.description().start_time
    }

    /// Access the MS exponentiation level
    #[inline]
    fn ms_level(&self) -> u8 {
        self.description().ms_level
    }

    /// Access the native ID string for the spectrum
    #[inline]
    fn id(&self) -> &str {
        &self.description().id
    }

    /// Access the index of the spectrum in the source run
    #[inline]
    fn index(&self) -> usize {
        self.description().index
    }
}

#[derive(Default, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// A centroided mass spectrum
pub struct Spectrum {
    /// The spectrum metadata describing acquisition conditions and details.
    pub description: SpectrumDescription,
    /// The centroid peaks, not necessarily in m/z order
    pub peaks: PeakList,
}

impl Spectrum {
    pub fn new(description: SpectrumDescription, peaks: PeakList) -> Self {
        Self { description, peaks }
    }

    /// Create an empty spectrum of the given MS level acquired at
    /// `start_time` seconds.
    pub fn at(ms_level: u8, start_time: f64) -> Self {
        Self {
            description: SpectrumDescription {
                ms_level,
                start_time,
                ..Default::default()
            },
            peaks: PeakList::empty(),
        }
    }

    pub fn with_id<S: Into<String>>(mut self, id: S, index: usize) -> Self {
        self.description.id = id.into();
        self.description.index = index;
        self
    }

    pub fn with_precursor(mut self, precursor: Precursor) -> Self {
        self.description.precursor.push(precursor);
        self
    }

    pub fn with_peaks(mut self, peaks: PeakList) -> Self {
        self.peaks = peaks;
        self
    }

    pub fn set_ms_level(&mut self, ms_level: u8) {
        self.description.ms_level = ms_level;
    }

    pub fn set_start_time(&mut self, start_time: f64) {
        self.description.start_time = start_time;
    }

    pub fn precursors(&self) -> &[Precursor] {
        &self.description.precursor
    }

    pub fn set_precursors(&mut self, precursors: Vec<Precursor>) {
        self.description.precursor = precursors;
    }

    pub fn push(&mut self, peak: CentroidPeak) {
        self.peaks.push(peak);
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    /// Merge the metadata of `other` into this spectrum. Conflicting
    /// parameter names take `other`'s value. Precursors, peaks, MS level and
    /// retention time are left alone.
    pub fn unify(&mut self, other: &Spectrum) {
        self.description.unify_params(&other.description.params);
    }
}

impl ParamDescribed for Spectrum {
    fn params(&self) -> &ParamList {
        <SpectrumDescription as ParamDescribed>::params(&self.description)
    }

    fn params_mut(&mut self) -> &mut ParamList {
        <SpectrumDescription as ParamDescribed>::params_mut(&mut self.description)
    }
}

impl SpectrumLike for Spectrum {
    #[inline]
    fn description(&self) -> &SpectrumDescription {
        &self.description
    }

    #[inline]
    fn description_mut(&mut self) -> &mut SpectrumDescription {
        &mut self.description
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::params::Param;

    #[test]
    fn test_spectrum_behavior() {
        let spec = Spectrum::at(2, 12.5)
            .with_id("scan=3", 2)
            .with_precursor(Precursor::new(400.0))
            .with_precursor(Precursor::new(410.0))
            .with_peaks(PeakList::from_pairs([(100.0, 1.0), (50.0, 2.0)]));
        assert_eq!(spec.id(), "scan=3");
        assert_eq!(spec.index(), 2);
        assert_eq!(spec.ms_level(), 2);
        assert_eq!(spec.start_time(), 12.5);
        assert!(spec.has_precursor());
        assert_eq!(spec.precursor().unwrap().ion.mz, 400.0);
        assert_eq!(spec.precursor_iter().count(), 2);
        assert_eq!(spec.len(), 2);
    }

    #[test]
    fn test_unify() {
        let mut a = Spectrum::at(1, 0.0);
        a.add_param(Param::new_key_value("filter", "FTMS + p"));
        a.add_param(Param::new_key_value("lock mass", "off"));

        let mut b = Spectrum::at(2, 10.0).with_precursor(Precursor::new(500.0));
        b.add_param(Param::new_key_value("lock mass", "on"));
        b.add_param(Param::new_key_value("source", "ESI"));

        a.unify(&b);
        assert_eq!(a.params().len(), 3);
        assert_eq!(a.get_param_by_name("lock mass").unwrap().value, "on");
        assert_eq!(a.get_param_by_name("source").unwrap().value, "ESI");
        assert!(!a.has_precursor());
        assert_eq!(a.ms_level(), 1);
        assert_eq!(a.start_time(), 0.0);
    }
}
