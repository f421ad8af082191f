use crate::constants::{
    Degree, JupiterMass, SolarMass, JUPITER_MASS_IN_SOLAR, SOLAR_MASS_IN_JUPITER,
};
use crate::nine_errors::NineError;

/// Parse a numeric field written by the Fortran integrator.
///
/// Accepts the usual Rust float syntax plus the Fortran double-precision exponent
/// marker (`1.5D-03`, `2.0d+01`).
///
/// Arguments
/// ---------
/// * `field`: a single whitespace-free numeric token
///
/// Return
/// ------
/// * `Some(value)` if the token is a number, `None` otherwise
pub fn parse_fortran_f64(field: &str) -> Option<f64> {
    let field = field.trim();
    field.parse::<f64>().ok().or_else(|| {
        let is_fortran_exp = |c: char| c == 'd' || c == 'D';
        if field.contains(is_fortran_exp) {
            field.replace(is_fortran_exp, "e").parse::<f64>().ok()
        } else {
            None
        }
    })
}

/// Convert a Jupiter mass, or a minimum mass `M_J·sin(i)`, to solar masses.
///
/// Without inclination the mass is simply scaled by [`JUPITER_MASS_IN_SOLAR`].
/// With an inclination, the value is treated as the observational minimum mass
/// `M_J·sin(i)` and divided by `sin(i)`. Negative inclinations follow the observational
/// sign convention and are mapped onto `[0°, 360°)` by adding 360° before the sine.
///
/// Arguments
/// ---------
/// * `mass`: mass in Jupiter masses (or `M_J·sin(i)` when `inclination` is given)
/// * `inclination`: optional inclination in degrees
///
/// Return
/// ------
/// * The mass in solar masses
/// * [`NineError::NumericDomain`] if an input is not finite, if `sin(i)` is zero
///   (inclination is a multiple of 180°), or if the de-projected mass overflows
pub fn jupiter_to_solar_mass(
    mass: JupiterMass,
    inclination: Option<Degree>,
) -> Result<SolarMass, NineError> {
    if !mass.is_finite() {
        return Err(NineError::NumericDomain(format!(
            "Jupiter mass must be finite, got {mass}"
        )));
    }
    let solar = mass * JUPITER_MASS_IN_SOLAR;

    let Some(incl) = inclination else {
        return Ok(solar);
    };
    if !incl.is_finite() {
        return Err(NineError::NumericDomain(format!(
            "inclination must be finite, got {incl}"
        )));
    }

    let incl = if incl < 0.0 { incl + 360.0 } else { incl };
    if incl % 180.0 == 0.0 {
        return Err(NineError::NumericDomain(format!(
            "sin({incl}°) is zero, cannot recover the mass from M·sin(i)"
        )));
    }

    let deprojected = solar / incl.to_radians().sin();
    if !deprojected.is_finite() {
        return Err(NineError::NumericDomain(format!(
            "{mass} M_J / sin({incl}°) overflows"
        )));
    }
    Ok(deprojected)
}

/// Convert a mass in solar masses to Jupiter masses.
///
/// Uses the rounded factor [`SOLAR_MASS_IN_JUPITER`] (1048), so it is not the exact
/// inverse of [`jupiter_to_solar_mass`]: the round trip is off by a factor
/// `1048 · 9.5458e-4 ≈ 1.0004`.
pub fn solar_to_jupiter_mass(mass: SolarMass) -> JupiterMass {
    mass * SOLAR_MASS_IN_JUPITER
}

/// Mass of a body as it is known before integration.
///
/// Catalog masses are given either directly in solar masses, in Jupiter masses, or only
/// as the radial-velocity minimum mass `M_J·sin(i)`. The variant is chosen once when the
/// body is described, so consumers never re-check which field is present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyMass {
    /// Mass in solar masses.
    Solar(SolarMass),
    /// Mass in Jupiter masses.
    Jupiter(JupiterMass),
    /// Minimum mass `M_J·sin(i)` with the inclination (degrees) used to de-project it.
    JupiterMinimum {
        m_sin_i: JupiterMass,
        inclination: Degree,
    },
}

impl BodyMass {
    /// Resolve the mass in solar masses.
    ///
    /// Return
    /// ------
    /// * The mass in solar masses, or [`NineError::NumericDomain`] when a minimum mass
    ///   cannot be de-projected (see [`jupiter_to_solar_mass`]).
    pub fn to_solar(&self) -> Result<SolarMass, NineError> {
        match *self {
            BodyMass::Solar(m) => Ok(m),
            BodyMass::Jupiter(m) => jupiter_to_solar_mass(m, None),
            BodyMass::JupiterMinimum {
                m_sin_i,
                inclination,
            } => jupiter_to_solar_mass(m_sin_i, Some(inclination)),
        }
    }

    /// Resolve the mass in Jupiter masses (through solar masses, as in reports).
    pub fn to_jupiter(&self) -> Result<JupiterMass, NineError> {
        self.to_solar().map(solar_to_jupiter_mass)
    }
}
