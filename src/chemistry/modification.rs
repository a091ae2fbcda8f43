//! Describe a residue modification, as found in modification databases
//! like Unimod or PSI-MOD.
use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

/// Where in a peptide a modification is allowed to occur.
///
/// This does not describe which amino acids a modification may occur on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TermSpecificity {
    #[default]
    Anywhere,
    CTerm,
    NTerm,
}

impl TermSpecificity {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Anywhere => "Anywhere",
            Self::CTerm => "C-term",
            Self::NTerm => "N-term",
        }
    }
}

impl Display for TermSpecificity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TermSpecificity {
    type Err = ModificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Anywhere" => Ok(Self::Anywhere),
            "C-term" => Ok(Self::CTerm),
            "N-term" => Ok(Self::NTerm),
            _ => Err(ModificationError::UnknownTermSpecificity(s.to_string())),
        }
    }
}

/// The origin of a modification, a coarse version of the PSI-MOD classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SourceClassification {
    #[default]
    Artifact,
    Hypothetical,
    Natural,
}

impl SourceClassification {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Artifact => "Artifact",
            Self::Hypothetical => "Hypothetical",
            Self::Natural => "Natural",
        }
    }
}

impl Display for SourceClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceClassification {
    type Err = ModificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Artifact" => Ok(Self::Artifact),
            "Hypothetical" => Ok(Self::Hypothetical),
            "Natural" => Ok(Self::Natural),
            _ => Err(ModificationError::UnknownSourceClassification(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModificationError {
    #[error("Unknown terminal specificity {0:?}, expected one of Anywhere, C-term or N-term")]
    UnknownTermSpecificity(String),
    #[error("Unknown source classification {0:?}, expected one of Artifact, Hypothetical or Natural")]
    UnknownSourceClassification(String),
}

/// A modification of an amino acid residue.
///
/// The `id` is the primary key of a modification. Two descriptors are equal
/// when every attribute is equal, with synonyms compared as a set.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResidueModification {
    pub id: String,
    /// The PSI-MS label if available, e.g. the name Mascot uses
    pub name: String,
    pub full_name: String,
    pub term_specificity: TermSpecificity,
    pub source_classification: SourceClassification,
    /// The one letter code of the residue the modification applies to
    pub origin: String,
    pub average_mass: f64,
    pub mono_mass: f64,
    pub diff_average_mass: f64,
    pub diff_mono_mass: f64,
    pub formula: String,
    pub diff_formula: String,
    synonyms: BTreeSet<String>,
}

impl ResidueModification {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set the terminal specificity from its name
    pub fn set_term_specificity_name(&mut self, name: &str) -> Result<(), ModificationError> {
        self.term_specificity = name.parse()?;
        Ok(())
    }

    pub fn term_specificity_name(&self) -> &'static str {
        self.term_specificity.name()
    }

    /// Set the source classification from its name
    pub fn set_source_classification_name(
        &mut self,
        name: &str,
    ) -> Result<(), ModificationError> {
        self.source_classification = name.parse()?;
        Ok(())
    }

    pub fn source_classification_name(&self) -> &'static str {
        self.source_classification.name()
    }

    pub fn synonyms(&self) -> &BTreeSet<String> {
        &self.synonyms
    }

    pub fn set_synonyms<I: IntoIterator<Item = S>, S: Into<String>>(&mut self, synonyms: I) {
        self.synonyms = synonyms.into_iter().map(|s| s.into()).collect();
    }

    /// Add a synonym, returning `false` if it was already known
    pub fn add_synonym<S: Into<String>>(&mut self, synonym: S) -> bool {
        self.synonyms.insert(synonym.into())
    }

    pub fn has_synonym(&self, synonym: &str) -> bool {
        self.synonyms.contains(synonym)
    }
}

impl Display for ResidueModification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.origin.is_empty() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{} ({})", self.id, self.origin)
        }
    }
}
