//! Celestial bodies
//!
//! [`mechanics`] holds the pure physics. [`body`] holds the state each body
//! carries and its validated configuration. The scripts in [`scripts`]
//! compose the two and write the result into their object's transform.

pub mod body;
pub mod mechanics;
pub mod scripts;

pub use body::{
    BodyConfig, BodyScales, CelestialBody, PlanetConfig, PlanetData, StarConfig, StarData,
};
pub use scripts::{PlanetScript, StarScript};
