//! Scoring operators that summarize a single spectrum as one number.
pub mod complement;

pub use crate::filters::complement::ComplementFilter;

use crate::spectrum::Spectrum;

/// A score computed from one spectrum. Implementations may reorder the
/// spectrum's peaks but must not otherwise change it.
pub trait SpectrumFilter {
    /// The name the filter is registered under
    fn name(&self) -> &'static str;

    fn apply(&self, spectrum: &mut Spectrum) -> f64;
}
