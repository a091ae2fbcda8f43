use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

/// The unit in which an m/z difference is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MassErrorType {
    /// Absolute difference in Daltons
    Da,
    /// Difference relative to the reference m/z, in parts per million
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "ppm"))]
    PPM,
}

impl MassErrorType {
    /// The unsigned distance from `reference` to `query`. PPM distances are
    /// relative to `reference`, so this is not symmetric in that unit.
    #[inline]
    pub fn distance(&self, reference: f64, query: f64) -> f64 {
        match self {
            Self::Da => (reference - query).abs(),
            Self::PPM => (reference - query).abs() * 1e6 / reference,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Da => "Da",
            Self::PPM => "ppm",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Unknown mass error unit {0:?}, expected \"Da\" or \"ppm\"")]
pub struct MassErrorTypeParseError(pub String);

impl FromStr for MassErrorType {
    type Err = MassErrorTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Da" => Ok(Self::Da),
            "ppm" => Ok(Self::PPM),
            _ => Err(MassErrorTypeParseError(s.to_string())),
        }
    }
}

impl Display for MassErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_distance() {
        assert!((MassErrorType::Da.distance(500.0, 500.25) - 0.25).abs() < 1e-12);
        let ppm = MassErrorType::PPM.distance(500.0, 500.0025);
        assert!((ppm - 5.0).abs() < 1e-6, "{ppm}");
    }

    #[test]
    fn test_parse() {
        assert_eq!("Da".parse::<MassErrorType>().unwrap(), MassErrorType::Da);
        assert_eq!("ppm".parse::<MassErrorType>().unwrap(), MassErrorType::PPM);
        assert!("mmu".parse::<MassErrorType>().is_err());
        assert_eq!(MassErrorType::PPM.to_string(), "ppm");
    }
}
