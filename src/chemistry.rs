//! Chemical descriptors that travel alongside spectra as metadata.
pub mod modification;

pub use crate::chemistry::modification::{
    ModificationError, ResidueModification, SourceClassification, TermSpecificity,
};
