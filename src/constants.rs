//! # Constants and type definitions for ninetraj
//!
//! This module centralizes the **unit conversion factors** and the **type aliases** used
//! throughout the crate when interpreting the output of the N-body integrator.
//!
//! ## Overview
//!
//! - Time-axis scaling (days → years → kiloyears → megayears)
//! - Mass conversions between Jovian and solar masses
//! - Core type aliases (angles, distances, masses, time)
//!
//! The integrator writes its time axis in **days**, distances in **AU**, and angles in
//! **degrees**. Every derived quantity in this crate is computed from those raw units.

// -------------------------------------------------------------------------------------------------
// Time-axis scaling
// -------------------------------------------------------------------------------------------------

/// Mean Gregorian year in days
pub const DAYS_PER_YEAR: f64 = 365.2425;

/// Years in a kiloyear
pub const YEARS_PER_KYR: f64 = 1000.0;

/// Kiloyears in a megayear
pub const KYR_PER_MYR: f64 = 1000.0;

// -------------------------------------------------------------------------------------------------
// Mass conversions
// -------------------------------------------------------------------------------------------------

/// Jupiter mass expressed in solar masses
pub const JUPITER_MASS_IN_SOLAR: f64 = 9.5458e-4;

/// Solar mass expressed in Jupiter masses (rounded convention used in reports)
pub const SOLAR_MASS_IN_JUPITER: f64 = 1048.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Time in days (raw unit of the integrator output)
pub type Day = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Mass in solar masses
pub type SolarMass = f64;
/// Mass in Jupiter masses
pub type JupiterMass = f64;
/// Name of a simulated body, as written in the last column of a record
pub type BodyName = String;
