//! `mzmerge` combines related mass spectra of a run into consensus spectra.
//!
//! Spectra are held in an [`Experiment`] and merged either in blocks of
//! consecutive scans or by clustering MS2 scans on their precursor's
//! retention time and m/z, see [`SpectraMerger`].
//!
//! ```
//! use mzmerge::prelude::*;
//! use mzmerge::{Experiment, PeakList, Precursor, Spectrum, SpectraMerger};
//!
//! let mut experiment: Experiment = (0..4)
//!     .map(|i| {
//!         Spectrum::at(2, i as f64)
//!             .with_precursor(Precursor::new(450.0))
//!             .with_peaks(PeakList::from_pairs([(200.0, 1.0)]))
//!     })
//!     .collect();
//!
//! let merger = SpectraMerger::default();
//! let stats = merger.merge_spectra_precursors(&mut experiment)?;
//! assert_eq!(experiment.len(), 1);
//! assert_eq!(experiment[0].peaks[0].intensity, 4.0);
//! assert_eq!(stats.consensus_count, 1);
//! # Ok::<(), mzmerge::MergeError>(())
//! ```
//!
//! The crate also carries a few building blocks the merger is made of:
//! a generic [`HierarchicalClusterer`], the [`ComplementFilter`] spectrum
//! score and a [`ResidueModification`] record.
pub mod chemistry;
pub mod clustering;
pub mod filters;
pub mod mass_error;
pub mod merger;
pub mod params;
pub mod peaks;
pub mod prelude;
pub mod spectrum;
pub mod utils;

pub use crate::chemistry::{ResidueModification, SourceClassification, TermSpecificity};
pub use crate::clustering::{HierarchicalClusterer, Linkage, PrecursorSimilarity};
pub use crate::filters::ComplementFilter;
pub use crate::mass_error::MassErrorType;
pub use crate::merger::{MergeBlocks, MergeError, MergeStats, MergerParams, SpectraMerger};
pub use crate::params::{Param, ParamDescribed, ParamList, Unit};
pub use crate::peaks::{CentroidPeak, PeakList};
pub use crate::spectrum::{Experiment, Precursor, Spectrum, SpectrumDescription, SpectrumLike};
