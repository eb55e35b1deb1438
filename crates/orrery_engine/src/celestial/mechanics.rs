//! Celestial mechanics
//!
//! Stateless helpers over SI quantities (metres, seconds, kilograms, watts).
//! Orbits are circular and lie in the x-z plane with y up. Integration is the
//! caller's job: each function advances by the `dt` it is handed.

use crate::foundation::math::{DMat4, DVec3};
use nalgebra::Vector3;
use std::f64::consts::PI;

/// Gravitational constant (m³ kg⁻¹ s⁻²)
pub const G: f64 = 6.674_30e-11;

/// Stefan-Boltzmann constant (W m⁻² K⁻⁴)
pub const STEFAN_BOLTZMANN: f64 = 5.67e-8;

/// Bond albedo assumed for planets
pub const DEFAULT_ALBEDO: f64 = 0.3;

/// Spin angle covered in `dt` by a body with the given rotation period
///
/// `period` must be positive; validated configs guarantee it.
pub fn rotation_angle(period: f64, dt: f64) -> f64 {
    2.0 * PI * dt / period
}

/// Advance a circular orbit by `dt`
///
/// Returns the new angle (not wrapped) and the position relative to the orbit
/// centre, `(d·cos θ, 0, d·sin θ)`.
pub fn orbital_position(distance: f64, angular_velocity: f64, angle: f64, dt: f64) -> (f64, DVec3) {
    let new_angle = angle + angular_velocity * dt;
    let position = DVec3::new(
        distance * new_angle.cos(),
        0.0,
        distance * new_angle.sin(),
    );
    (new_angle, position)
}

/// Irradiance (W/m²) at `distance` from a source of the given luminosity
pub fn light_intensity(luminosity: f64, distance: f64) -> f64 {
    luminosity / (4.0 * PI * distance * distance)
}

/// Equilibrium surface temperature (K) of a body of `radius` at `distance`
/// from a star, using [`DEFAULT_ALBEDO`] and [`STEFAN_BOLTZMANN`]
pub fn surface_temperature(luminosity: f64, distance: f64, radius: f64) -> f64 {
    surface_temperature_with(luminosity, distance, radius, DEFAULT_ALBEDO, STEFAN_BOLTZMANN)
}

/// [`surface_temperature`] with explicit albedo and radiation constant
pub fn surface_temperature_with(
    luminosity: f64,
    distance: f64,
    radius: f64,
    albedo: f64,
    sigma: f64,
) -> f64 {
    let cross_section = PI * radius * radius;
    let absorbed = (1.0 - albedo) * cross_section * light_intensity(luminosity, distance);
    let emitting_area = 4.0 * PI * radius * radius;
    (absorbed / (emitting_area * sigma)).powf(0.25)
}

/// Orientation of a tilted spin axis: `Rz(yaw) · Rx(obliquity) · Rz(argument)`
///
/// All angles in degrees.
pub fn tilt_matrix(obliquity: f64, argument_of_obliquity: f64, yaw: f64) -> DMat4 {
    let z = Vector3::z_axis();
    let x = Vector3::x_axis();
    DMat4::from_axis_angle(&z, yaw.to_radians())
        * DMat4::from_axis_angle(&x, obliquity.to_radians())
        * DMat4::from_axis_angle(&z, argument_of_obliquity.to_radians())
}

/// Newtonian attraction (N) between two masses
pub fn gravitational_force(mass_a: f64, mass_b: f64, distance: f64) -> f64 {
    G * mass_a * mass_b / (distance * distance)
}

/// Speed (m/s) of a circular orbit at `distance` around `central_mass`
pub fn orbital_velocity(central_mass: f64, distance: f64) -> f64 {
    (G * central_mass / distance).sqrt()
}

/// Kepler's third law: period (s) of an orbit with the given semi-major axis
pub fn orbital_period(central_mass: f64, semi_major_axis: f64) -> f64 {
    2.0 * PI * (semi_major_axis.powi(3) / (G * central_mass)).sqrt()
}
