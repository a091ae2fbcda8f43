//! The merger's configuration, addressable as a struct or as flat
//! `key = value` parameters.
use std::fmt::Display;
use std::str::FromStr;

use crate::clustering::PrecursorSimilarity;
use crate::mass_error::MassErrorType;
use crate::merger::MergeError;
use crate::params::{Param, ParamList, Unit};

pub const MS_LEVELS: &str = "block_method:ms_levels";
pub const RT_BLOCK_SIZE: &str = "block_method:rt_block_size";
pub const RT_MAX_LENGTH: &str = "block_method:rt_max_length";
pub const RT_TOLERANCE: &str = "precursor_method:rt_tolerance";
pub const RT_WEIGHT: &str = "precursor_method:rt_weight";
pub const MZ_TOLERANCE: &str = "precursor_method:mz_tolerance";
pub const MZ_WEIGHT: &str = "precursor_method:mz_weight";
pub const MZ_BINNING_WIDTH: &str = "mz_binning_width";
pub const MZ_BINNING_WIDTH_UNIT: &str = "mz_binning_width_unit";

/// Every parameter name the merger understands
pub const PARAMETER_NAMES: [&str; 9] = [
    MS_LEVELS,
    RT_BLOCK_SIZE,
    RT_MAX_LENGTH,
    RT_TOLERANCE,
    RT_WEIGHT,
    MZ_TOLERANCE,
    MZ_WEIGHT,
    MZ_BINNING_WIDTH,
    MZ_BINNING_WIDTH_UNIT,
];

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MergerParams {
    /// The MS levels merged block-wise, other levels are left untouched
    pub ms_levels: Vec<u8>,
    /// The maximum number of consecutive scans in a block
    pub rt_block_size: usize,
    /// The maximum retention time span of a block in seconds, 0 for no limit
    pub rt_max_length: f64,
    /// How precursors are compared when merging by precursor
    pub precursor: PrecursorSimilarity,
    /// Peaks of a consensus spectrum closer than this are summed
    pub mz_binning_width: f64,
    pub mz_binning_width_unit: MassErrorType,
}

impl Default for MergerParams {
    fn default() -> Self {
        Self {
            ms_levels: vec![1],
            rt_block_size: 5,
            rt_max_length: 0.0,
            precursor: PrecursorSimilarity::default(),
            mz_binning_width: 5.0,
            mz_binning_width_unit: MassErrorType::PPM,
        }
    }
}

fn invalid<N: Into<String>, R: Display>(name: N, reason: R) -> MergeError {
    MergeError::InvalidParameter {
        name: name.into(),
        reason: reason.to_string(),
    }
}

fn parse_value<T>(name: &str, value: &str) -> Result<T, MergeError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| invalid(name, format!("could not parse {value:?}: {e}")))
}

fn parse_level_list(name: &str, value: &str) -> Result<Vec<u8>, MergeError> {
    value
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tok| !tok.is_empty())
        .map(|tok| parse_value::<u8>(name, tok))
        .collect()
}

impl MergerParams {
    /// Check every value, reporting the first one out of range
    pub fn validate(&self) -> Result<(), MergeError> {
        if self.ms_levels.is_empty() {
            return Err(invalid(MS_LEVELS, "at least one MS level is required"));
        }
        if let Some(level) = self.ms_levels.iter().find(|level| **level == 0) {
            return Err(invalid(MS_LEVELS, format!("MS level {level} is not valid")));
        }
        if self.rt_block_size == 0 {
            return Err(invalid(RT_BLOCK_SIZE, "must be a positive integer"));
        }
        if !(self.rt_max_length.is_finite() && self.rt_max_length >= 0.0) {
            return Err(invalid(
                RT_MAX_LENGTH,
                format!("{} is not a non-negative number", self.rt_max_length),
            ));
        }
        for (name, tolerance) in [
            (RT_TOLERANCE, self.precursor.rt_tolerance),
            (MZ_TOLERANCE, self.precursor.mz_tolerance),
        ] {
            if !(tolerance.is_finite() && tolerance > 0.0) {
                return Err(invalid(name, format!("{tolerance} is not a positive number")));
            }
        }
        for (name, weight) in [
            (RT_WEIGHT, self.precursor.rt_weight),
            (MZ_WEIGHT, self.precursor.mz_weight),
        ] {
            if !(weight.is_finite() && weight >= 0.0) {
                return Err(invalid(name, format!("{weight} is not a non-negative number")));
            }
        }
        if !(self.mz_binning_width.is_finite() && self.mz_binning_width >= 0.0) {
            return Err(invalid(
                MZ_BINNING_WIDTH,
                format!("{} is not a non-negative number", self.mz_binning_width),
            ));
        }
        Ok(())
    }

    /// Set a single parameter by name. The update is only kept if the
    /// resulting configuration is valid.
    pub fn set_param(&mut self, name: &str, value: &str) -> Result<(), MergeError> {
        let mut candidate = self.clone();
        candidate.apply(name, value)?;
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }

    fn apply(&mut self, name: &str, value: &str) -> Result<(), MergeError> {
        match name {
            MS_LEVELS => self.ms_levels = parse_level_list(name, value)?,
            RT_BLOCK_SIZE => {
                let size: i64 = parse_value(name, value)?;
                if size <= 0 {
                    return Err(invalid(name, format!("{size} is not a positive integer")));
                }
                self.rt_block_size = size as usize;
            }
            RT_MAX_LENGTH => self.rt_max_length = parse_value(name, value)?,
            RT_TOLERANCE => self.precursor.rt_tolerance = parse_value(name, value)?,
            RT_WEIGHT => self.precursor.rt_weight = parse_value(name, value)?,
            MZ_TOLERANCE => self.precursor.mz_tolerance = parse_value(name, value)?,
            MZ_WEIGHT => self.precursor.mz_weight = parse_value(name, value)?,
            MZ_BINNING_WIDTH => self.mz_binning_width = parse_value(name, value)?,
            MZ_BINNING_WIDTH_UNIT => self.mz_binning_width_unit = parse_value(name, value)?,
            _ => return Err(invalid(name, "unknown parameter")),
        }
        Ok(())
    }

    /// Build a configuration from the defaults overridden by `params`
    pub fn from_params(params: &ParamList) -> Result<Self, MergeError> {
        let mut this = Self::default();
        for param in params.iter() {
            this.apply(&param.name, &param.value)?;
        }
        this.validate()?;
        Ok(this)
    }

    /// The configuration as flat parameters, one per name in [`PARAMETER_NAMES`]
    pub fn to_params(&self) -> ParamList {
        let levels: Vec<String> = self.ms_levels.iter().map(|l| l.to_string()).collect();
        let width_unit = match self.mz_binning_width_unit {
            MassErrorType::Da => Unit::Mass,
            MassErrorType::PPM => Unit::PartsPerMillion,
        };
        vec![
            Param::new_key_value(MS_LEVELS, levels.join(",")),
            Param::new_key_value(RT_BLOCK_SIZE, self.rt_block_size),
            Param::new_key_value(RT_MAX_LENGTH, self.rt_max_length).with_unit_t(&Unit::Second),
            Param::new_key_value(RT_TOLERANCE, self.precursor.rt_tolerance)
                .with_unit_t(&Unit::Second),
            Param::new_key_value(RT_WEIGHT, self.precursor.rt_weight),
            Param::new_key_value(MZ_TOLERANCE, self.precursor.mz_tolerance)
                .with_unit_t(&Unit::Mass),
            Param::new_key_value(MZ_WEIGHT, self.precursor.mz_weight),
            Param::new_key_value(MZ_BINNING_WIDTH, self.mz_binning_width).with_unit_t(&width_unit),
            Param::new_key_value(MZ_BINNING_WIDTH_UNIT, self.mz_binning_width_unit),
        ]
    }

    /// Read a configuration from a JSON document. Missing fields take their
    /// default values and the result is validated.
    #[cfg(feature = "serde")]
    pub fn from_json(document: &str) -> Result<Self, MergeError> {
        let this: Self = serde_json::from_str(document)
            .map_err(|e| MergeError::InvalidConfiguration(e.to_string()))?;
        this.validate()?;
        Ok(this)
    }

    /// Write the configuration as a JSON document
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, MergeError> {
        serde_json::to_string_pretty(self).map_err(|e| MergeError::InvalidConfiguration(e.to_string()))
    }

    /// The maximum block span, with the 0 "no limit" marker resolved
    pub(crate) fn effective_rt_max_length(&self) -> f64 {
        if self.rt_max_length == 0.0 {
            f64::INFINITY
        } else {
            self.rt_max_length
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = MergerParams::default();
        params.validate().unwrap();
        assert_eq!(params.precursor.rt_tolerance, 10.0);
        assert_eq!(params.precursor.mz_tolerance, 1.0);
        assert_eq!(params.precursor.rt_weight, 1.0);
        assert_eq!(params.precursor.mz_weight, 10.0);
        assert_eq!(params.effective_rt_max_length(), f64::INFINITY);
    }

    #[test]
    fn test_set_param() {
        let mut params = MergerParams::default();
        params.set_param(MS_LEVELS, "[1, 2]").unwrap();
        assert_eq!(params.ms_levels, [1, 2]);
        params.set_param(RT_BLOCK_SIZE, "3").unwrap();
        assert_eq!(params.rt_block_size, 3);
        params.set_param(MZ_BINNING_WIDTH_UNIT, "Da").unwrap();
        assert_eq!(params.mz_binning_width_unit, MassErrorType::Da);
        params.set_param(RT_MAX_LENGTH, "30.5").unwrap();
        assert_eq!(params.effective_rt_max_length(), 30.5);
        params.set_param(MZ_WEIGHT, "2").unwrap();
        assert_eq!(params.precursor.mz_weight, 2.0);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut params = MergerParams::default();
        for (name, value) in [
            (RT_BLOCK_SIZE, "0"),
            (RT_BLOCK_SIZE, "-4"),
            (RT_BLOCK_SIZE, "two"),
            (MZ_BINNING_WIDTH_UNIT, "mmu"),
            (MS_LEVELS, ""),
            (MS_LEVELS, "0,1"),
            (RT_TOLERANCE, "0"),
            (MZ_TOLERANCE, "-1"),
            (RT_MAX_LENGTH, "-5"),
            (MZ_BINNING_WIDTH, "NaN"),
            ("block_method:unknown", "1"),
        ] {
            let err = params.set_param(name, value).unwrap_err();
            assert!(
                matches!(err, MergeError::InvalidParameter { .. }),
                "{name}={value} gave {err}"
            );
        }
        assert_eq!(params, MergerParams::default());
    }

    #[test]
    fn test_param_list_round_trip() {
        let mut params = MergerParams::default();
        params.set_param(MS_LEVELS, "1 2 3").unwrap();
        params.set_param(RT_TOLERANCE, "15.5").unwrap();
        params.set_param(MZ_BINNING_WIDTH_UNIT, "Da").unwrap();
        params.set_param(MZ_BINNING_WIDTH, "0.01").unwrap();

        let list = params.to_params();
        let names: Vec<&str> = list.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, PARAMETER_NAMES);
        assert_eq!(list[0].value, "1,2,3");
        assert_eq!(list[7].unit, Unit::Mass);

        let restored = MergerParams::from_params(&list).unwrap();
        assert_eq!(restored, params);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json() {
        let params = MergerParams::from_json(
            r#"{"ms_levels": [2], "rt_block_size": 2, "mz_binning_width_unit": "Da"}"#,
        )
        .unwrap();
        assert_eq!(params.ms_levels, [2]);
        assert_eq!(params.rt_block_size, 2);
        assert_eq!(params.mz_binning_width_unit, MassErrorType::Da);
        assert_eq!(params.mz_binning_width, 5.0);

        let restored = MergerParams::from_json(&params.to_json().unwrap()).unwrap();
        assert_eq!(restored, params);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_errors() {
        let err = MergerParams::from_json("{ms_levels: ").unwrap_err();
        assert!(matches!(err, MergeError::InvalidConfiguration(_)));
        let err = MergerParams::from_json(r#"{"rt_block_size": 0}"#).unwrap_err();
        assert!(matches!(err, MergeError::InvalidParameter { .. }));
        let err = MergerParams::from_json(r#"{"mz_binning_width_unit": "mmu"}"#).unwrap_err();
        assert!(matches!(err, MergeError::InvalidConfiguration(_)));
    }
}
