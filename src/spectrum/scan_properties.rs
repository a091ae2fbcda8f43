use crate::impl_param_described;
use crate::params::ParamList;

pub trait IonProperties {
    fn mz(&self) -> f64;
    fn neutral_mass(&self) -> f64;
    fn charge(&self) -> Option<i32>;
    fn has_charge(&self) -> bool {
        self.charge().is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// Describes a single selected ion from a precursor isolation
pub struct SelectedIon {
    /// The selected ion's m/z as reported, may not be the monoisotopic peak.
    pub mz: f64,
    pub intensity: f32,
    /// The reported precursor ion's charge state. May be absent in
    /// some source files.
    pub charge: Option<i32>,
    pub params: ParamList,
}

impl IonProperties for SelectedIon {
    fn mz(&self) -> f64 {
        self.mz
    }

    fn neutral_mass(&self) -> f64 {
        crate::utils::neutral_mass(self.mz, self.charge.unwrap_or(1))
    }

    fn charge(&self) -> Option<i32> {
        self.charge
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// Describes the precursor ion of the owning spectrum.
pub struct Precursor {
    /// Describes the selected ion's properties
    pub ion: SelectedIon,
    /// The precursor scan ID, if given
    pub precursor_id: Option<String>,
    /// Additional parameters describing this precursor ion
    pub params: ParamList,
}

impl Precursor {
    pub fn new(mz: f64) -> Self {
        Self {
            ion: SelectedIon {
                mz,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn with_charge(mut self, charge: i32) -> Self {
        self.ion.charge = Some(charge);
        self
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.ion.intensity = intensity;
        self
    }

    pub fn set_mz(&mut self, mz: f64) {
        self.ion.mz = mz;
    }
}

impl IonProperties for Precursor {
    fn mz(&self) -> f64 {
        self.ion.mz()
    }

    fn neutral_mass(&self) -> f64 {
        self.ion.neutral_mass()
    }

    fn charge(&self) -> Option<i32> {
        self.ion.charge()
    }
}

/**
The set of descriptive metadata that give context for how a mass spectrum was acquired
within a particular run. This forms the basis for a large portion of the
[`SpectrumLike`](crate::spectrum::SpectrumLike) trait.
*/
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpectrumDescription {
    pub id: String,
    pub index: usize,
    pub ms_level: u8,
    /// The retention time the scan started at, in seconds
    pub start_time: f64,

    pub params: ParamList,
    pub precursor: Vec<Precursor>,
}

impl_param_described!(Precursor, SelectedIon, SpectrumDescription);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_precursor_builder() {
        let prec = Precursor::new(400.5).with_charge(2).with_intensity(1e4);
        assert_eq!(prec.mz(), 400.5);
        assert!(prec.has_charge());
        assert_eq!(prec.ion.intensity, 1e4);
        let expected = 801.0 - 2.0 * crate::utils::PROTON;
        assert!((prec.neutral_mass() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_uncharged_precursor_assumes_singly_charged() {
        let prec = Precursor::new(1001.0);
        assert!(!prec.has_charge());
        assert!((prec.neutral_mass() - (1001.0 - crate::utils::PROTON)).abs() < 1e-9);
    }
}
