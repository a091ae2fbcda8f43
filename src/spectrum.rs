//! The spectrum data model: peaks plus acquisition metadata, and the
//! [`Experiment`] container that owns a run's spectra in acquisition order.
pub mod experiment;
pub mod scan_properties;
pub mod spectrum_types;

pub use crate::spectrum::experiment::Experiment;
pub use crate::spectrum::scan_properties::*;
pub use crate::spectrum::spectrum_types::{Spectrum, SpectrumLike};
