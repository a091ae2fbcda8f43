//! Free-form metadata attached to spectra, precursors and configuration.
//!
//! A [`ParamList`] is an ordered bag of named values. Lookups are by name, and
//! [`ParamDescribed::unify_params`] merges one bag into another with the
//! last writer winning on conflicting names.
use std::fmt::Display;
use std::str::{self, FromStr};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Param {
    pub name: String,
    pub value: String,
    pub unit: Unit,
}

impl Param {
    pub fn new() -> Param {
        Param {
            ..Default::default()
        }
    }

    pub fn new_key_value<K: Into<String>, V: ToString>(name: K, value: V) -> Param {
        let mut inst = Self::new();
        inst.name = name.into();
        inst.value = value.to_string();
        inst
    }

    pub fn coerce<T: str::FromStr>(&self) -> Result<T, T::Err> {
        self.value.parse::<T>()
    }

    pub fn with_unit_t(mut self, unit: &Unit) -> Param {
        self.unit = *unit;
        self
    }
}

impl Display for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.unit {
            Unit::Unknown => write!(f, "{}={}", self.name, self.value),
            _ => write!(f, "{}={} {}", self.name, self.value, self.unit.name()),
        }
    }
}

pub type ParamList = Vec<Param>;

pub trait ParamDescribed {
    fn params(&self) -> &ParamList;
    fn params_mut(&mut self) -> &mut ParamList;

    fn add_param(&mut self, param: Param) {
        self.params_mut().push(param);
    }

    fn remove_param(&mut self, index: usize) -> Param {
        self.params_mut().remove(index)
    }

    fn get_param_by_name(&self, name: &str) -> Option<&Param> {
        self.params().iter().find(|param| param.name == name)
    }

    /// Store `param`, replacing the value and unit of the first entry with the
    /// same name if there is one.
    fn set_param_by_name(&mut self, param: Param) {
        let params = self.params_mut();
        match params.iter_mut().find(|p| p.name == param.name) {
            Some(existing) => {
                existing.value = param.value;
                existing.unit = param.unit;
            }
            None => params.push(param),
        }
    }

    /// Merge every entry of `other` into this bag. Entries already present by
    /// name are overwritten, new names are appended in the order of `other`.
    fn unify_params(&mut self, other: &ParamList) {
        for param in other.iter() {
            self.set_param_by_name(param.clone());
        }
    }
}

#[macro_export]
macro_rules! impl_param_described {
    ($($t:ty), +) => {$(

        impl $crate::params::ParamDescribed for $t {
            fn params(&self) -> &$crate::params::ParamList {
                return &self.params
            }

            fn params_mut(&mut self) -> &mut $crate::params::ParamList {
                return &mut self.params
            }
        }
    )+};
}

/// Units that a parameter's value might have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    // Mass
    MZ,
    Mass,
    PartsPerMillion,

    // Time
    Minute,
    Second,

    // Intensity
    DetectorCounts,

    #[default]
    Unknown,
}

impl Unit {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MZ => "m/z",
            Self::Mass => "dalton",
            Self::PartsPerMillion => "parts per million",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::DetectorCounts => "number of detector counts",
            Self::Unknown => "",
        }
    }

    pub fn from_name(name: &str) -> Unit {
        match name {
            "m/z" => Self::MZ,
            "dalton" | "Da" => Self::Mass,
            "parts per million" | "ppm" => Self::PartsPerMillion,
            "minute" => Self::Minute,
            "second" => Self::Second,
            "number of detector counts" => Self::DetectorCounts,
            _ => Self::Unknown,
        }
    }
}

impl FromStr for Unit {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}
