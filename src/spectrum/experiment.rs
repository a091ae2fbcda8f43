use std::collections::BTreeSet;
use std::ops;
use std::slice;

use crate::spectrum::spectrum_types::{Spectrum, SpectrumLike};

/// An ordered collection of [`Spectrum`] from a single run.
///
/// Spectra are kept in the order they were added until
/// [`Experiment::sort_spectra`] puts them in retention time order.
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Experiment {
    spectra: Vec<Spectrum>,
}

impl Experiment {
    pub fn new(spectra: Vec<Spectrum>) -> Self {
        Self { spectra }
    }

    pub fn push(&mut self, spectrum: Spectrum) {
        self.spectra.push(spectrum);
    }

    pub fn len(&self) -> usize {
        self.spectra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spectra.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Spectrum> {
        self.spectra.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Spectrum> {
        self.spectra.get_mut(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, Spectrum> {
        self.spectra.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, Spectrum> {
        self.spectra.iter_mut()
    }

    pub fn as_slice(&self) -> &[Spectrum] {
        &self.spectra
    }

    /// Remove every spectrum for which `predicate` returns `true`, keeping
    /// the relative order of the rest. Returns the number removed.
    pub fn remove_if<F: FnMut(&Spectrum) -> bool>(&mut self, mut predicate: F) -> usize {
        let before = self.spectra.len();
        self.spectra.retain(|s| !predicate(s));
        before - self.spectra.len()
    }

    /// Sort the spectra by retention time. Spectra with equal retention
    /// times keep their current relative order.
    pub fn sort_spectra(&mut self) {
        self.spectra
            .sort_by(|a, b| a.start_time().total_cmp(&b.start_time()));
    }

    pub fn is_sorted(&self) -> bool {
        self.spectra
            .windows(2)
            .all(|w| w[0].start_time() <= w[1].start_time())
    }

    /// The distinct MS levels present, in ascending order
    pub fn ms_levels(&self) -> Vec<u8> {
        self.spectra
            .iter()
            .map(|s| s.ms_level())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Move all spectra out of the experiment, leaving it empty
    pub fn take_spectra(&mut self) -> Vec<Spectrum> {
        std::mem::take(&mut self.spectra)
    }

    /// Swap in a new list of spectra, returning the old list
    pub fn replace_spectra(&mut self, spectra: Vec<Spectrum>) -> Vec<Spectrum> {
        std::mem::replace(&mut self.spectra, spectra)
    }
}

impl ops::Index<usize> for Experiment {
    type Output = Spectrum;

    fn index(&self, index: usize) -> &Self::Output {
        &self.spectra[index]
    }
}

impl ops::IndexMut<usize> for Experiment {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.spectra[index]
    }
}

impl From<Vec<Spectrum>> for Experiment {
    fn from(value: Vec<Spectrum>) -> Self {
        Self::new(value)
    }
}

impl FromIterator<Spectrum> for Experiment {
    fn from_iter<T: IntoIterator<Item = Spectrum>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Extend<Spectrum> for Experiment {
    fn extend<T: IntoIterator<Item = Spectrum>>(&mut self, iter: T) {
        self.spectra.extend(iter)
    }
}

impl IntoIterator for Experiment {
    type Item = Spectrum;
    type IntoIter = std::vec::IntoIter<Spectrum>;

    fn into_iter(self) -> Self::IntoIter {
        self.spectra.into_iter()
    }
}

impl<'a> IntoIterator for &'a Experiment {
    type Item = &'a Spectrum;
    type IntoIter = slice::Iter<'a, Spectrum>;

    fn into_iter(self) -> Self::IntoIter {
        self.spectra.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn make_run() -> Experiment {
        [(1, 5.0), (2, 1.0), (2, 5.0), (1, 0.5)]
            .into_iter()
            .enumerate()
            .map(|(i, (level, rt))| Spectrum::at(level, rt).with_id(format!("scan={i}"), i))
            .collect()
    }

    #[test]
    fn test_sort_spectra_is_stable() {
        let mut exp = make_run();
        assert!(!exp.is_sorted());
        exp.sort_spectra();
        assert!(exp.is_sorted());
        let ids: Vec<_> = exp.iter().map(|s| s.id().to_string()).collect();
        assert_eq!(ids, ["scan=3", "scan=1", "scan=0", "scan=2"]);
    }

    #[test]
    fn test_remove_if() {
        let mut exp = make_run();
        let removed = exp.remove_if(|s| s.ms_level() == 2);
        assert_eq!(removed, 2);
        assert_eq!(exp.len(), 2);
        assert_eq!(exp[0].id(), "scan=0");
        assert_eq!(exp[1].id(), "scan=3");
    }

    #[test]
    fn test_ms_levels_and_swap() {
        let mut exp = make_run();
        assert_eq!(exp.ms_levels(), [1, 2]);
        let old = exp.replace_spectra(vec![Spectrum::at(3, 1.0)]);
        assert_eq!(old.len(), 4);
        assert_eq!(exp.ms_levels(), [3]);
        let taken = exp.take_spectra();
        assert_eq!(taken.len(), 1);
        assert!(exp.is_empty());
    }
}
