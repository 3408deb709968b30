//! Statistics routines for the measurement data.
//!
//! All of the functions in this module are pure: they read their inputs and
//! allocate their outputs, nothing is cached or mutated in place.

pub mod bivariate;
pub mod univariate;

mod float;

pub use self::float::Float;
