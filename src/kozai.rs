//! # Kozai–Lidov invariant
//!
//! Under secular, quadrupole-order dynamics of a hierarchical triple, the component of
//! the inner orbit's angular momentum along the outer orbit's normal is conserved. In
//! terms of the inner orbit elements this gives the classical constant
//!
//! ```text
//! Θ = (1 − e²) · cos²(i)
//! ```
//!
//! Eccentricity and inclination therefore oscillate in anti-phase while Θ stays fixed.
//! Large oscillations only occur above the critical inclination
//! `i₀ = acos(√(3/5)) ≈ 39.2°`.
//!
//! Θ is a derived column of every orbital-element [`Trajectory`](crate::trajectory::Trajectory);
//! [`theta`] is also exposed on its own to evaluate hand-entered initial conditions.
use crate::constants::Degree;

/// Kozai–Lidov constant `Θ = (1 − e²)·cos²(i)`.
///
/// Arguments
/// ---------
/// * `eccentricity`: orbital eccentricity (unitless)
/// * `inclination`: inclination in **degrees**
///
/// Return
/// ------
/// * Θ (unitless)
#[inline]
pub fn theta(eccentricity: f64, inclination: Degree) -> f64 {
    let cos_i = inclination.to_radians().cos();
    (1.0 - eccentricity * eccentricity) * cos_i * cos_i
}

/// Critical inclination of the Kozai–Lidov mechanism, in degrees (≈ 39.23°).
pub fn critical_inclination() -> Degree {
    (3.0_f64 / 5.0).sqrt().acos().to_degrees()
}
