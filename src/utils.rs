/// The mass of a proton in Daltons
pub const PROTON: f64 = 1.00727646677;

/// Convert an m/z to a neutral mass, assuming protonation for positive
/// charges and deprotonation for negative ones.
#[inline]
pub fn neutral_mass(mz: f64, z: i32) -> f64 {
    (mz * z.abs() as f64) - z as f64 * PROTON
}
