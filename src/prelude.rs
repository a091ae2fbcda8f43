//! The traits needed to call methods on the crate's types
pub use crate::clustering::SimilarityMeasure;
pub use crate::filters::SpectrumFilter;
pub use crate::params::ParamDescribed;
pub use crate::spectrum::{IonProperties, SpectrumLike};
