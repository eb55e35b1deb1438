//! Celestial body state and its validated configuration

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use super::mechanics;
use crate::config::{require_positive, ConfigError};
use crate::ecs::ObjectId;
use crate::foundation::math::{utils, DMat4, DVec3, Vec3};
use nalgebra::Vector3;

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Factors mapping SI quantities onto the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyScales {
    /// Scene units per metre for positions
    pub distance: f64,
    /// Scene units per metre for radii
    pub size: f64,
    /// Simulated seconds per unit of clock delta
    pub time: f64,
}

impl BodyScales {
    /// 1 unit = 1e9 m for distances and 1e7 m for sizes
    pub const DISTANCE: f64 = 1e-9;
    /// See [`BodyScales::DISTANCE`]
    pub const SIZE: f64 = 1e-7;
    /// One simulated hour per ideal frame
    pub const TIME: f64 = 3_600.0;

    /// Simulated seconds for a frame with the given normalized delta
    pub fn simulated_seconds(&self, delta: f64) -> f64 {
        delta * self.time
    }
}

impl Default for BodyScales {
    fn default() -> Self {
        Self {
            distance: Self::DISTANCE,
            size: Self::SIZE,
            time: Self::TIME,
        }
    }
}

/// Parameters shared by stars and planets
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    /// Display name, also used as the scene object name
    pub name: String,
    /// Mass in kilograms
    pub mass: f64,
    /// Mean radius in metres
    pub radius: f64,
    /// Initial surface temperature in kelvin
    pub surface_temperature: f64,
    /// Sidereal rotation period in seconds
    pub rotation_period: f64,
    /// Axial tilt in degrees
    pub obliquity: f64,
    /// Rotation of the tilt about the original spin axis, in degrees
    pub argument_of_obliquity: f64,
    /// Heading of the tilted axis, in degrees
    pub yaw: f64,
    /// Initial position in metres
    pub position: [f64; 3],
}

impl BodyConfig {
    /// Reject non-positive mass, radius or rotation period
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive(&self.field("mass"), self.mass)?;
        require_positive(&self.field("radius"), self.radius)?;
        require_positive(&self.field("rotation_period"), self.rotation_period)
    }

    fn field(&self, name: &str) -> String {
        if self.name.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.name, name)
        }
    }
}

/// Star configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StarConfig {
    /// Common body parameters
    #[serde(flatten)]
    pub body: BodyConfig,
    /// Radiated power in watts
    pub luminosity: f64,
}

impl StarConfig {
    /// The Sun
    pub fn sun() -> Self {
        Self {
            body: BodyConfig {
                name: "Sun".to_string(),
                mass: 1.989e30,
                radius: 696_340_000.0,
                surface_temperature: 5_778.0,
                rotation_period: 25.38 * SECONDS_PER_DAY,
                obliquity: 7.25,
                ..BodyConfig::default()
            },
            luminosity: 3.828e26,
        }
    }

    /// Body checks plus a positive luminosity
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.body.validate()?;
        require_positive(&self.body.field("luminosity"), self.luminosity)
    }
}

/// Planet configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetConfig {
    /// Common body parameters
    #[serde(flatten)]
    pub body: BodyConfig,
    /// Time for one orbit in seconds
    pub orbital_period: f64,
    /// Orbit radius in metres
    pub orbital_distance: f64,
    /// Orbital angle at start, in radians
    pub initial_angle: f64,
    /// Orbital angular velocity in rad/s; `2π / orbital_period` when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angular_velocity: Option<f64>,
}

impl PlanetConfig {
    /// Earth
    pub fn earth() -> Self {
        Self {
            body: BodyConfig {
                name: "Earth".to_string(),
                mass: 5.972e24,
                radius: 6_371_000.0,
                surface_temperature: 288.0,
                rotation_period: SECONDS_PER_DAY,
                obliquity: 23.44,
                ..BodyConfig::default()
            },
            orbital_period: 365.256 * SECONDS_PER_DAY,
            orbital_distance: 149.6e9,
            initial_angle: 0.0,
            angular_velocity: None,
        }
    }

    /// Body checks plus positive orbital period and distance
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.body.validate()?;
        require_positive(&self.body.field("orbital_period"), self.orbital_period)?;
        require_positive(&self.body.field("orbital_distance"), self.orbital_distance)?;
        if let Some(omega) = self.angular_velocity {
            if !omega.is_finite() {
                return Err(ConfigError::invalid(
                    self.body.field("angular_velocity"),
                    "must be finite",
                ));
            }
        }
        Ok(())
    }

    /// Configured angular velocity or the one implied by the period
    pub fn resolved_angular_velocity(&self) -> f64 {
        self.angular_velocity.unwrap_or(TAU / self.orbital_period)
    }
}

/// Physical state common to every body
///
/// Quantities are SI. `rotation.y` holds the accumulated spin angle in
/// radians; the other components are reserved for precession.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    /// Display name
    pub name: String,
    /// Mass in kilograms
    pub mass: f64,
    /// Mean radius in metres
    pub radius: f64,
    /// Surface temperature in kelvin
    pub surface_temperature: f64,
    /// Orbital angular velocity in rad/s (zero for a fixed star)
    pub angular_velocity: f64,
    /// Sidereal rotation period in seconds
    pub rotation_period: f64,
    /// Axial tilt in degrees
    pub obliquity: f64,
    /// Argument of obliquity in degrees
    pub argument_of_obliquity: f64,
    /// Heading of the tilted axis in degrees
    pub yaw: f64,
    /// Accumulated rotation in radians
    pub rotation: DVec3,
    /// Position in metres
    pub position: DVec3,
}

impl CelestialBody {
    /// Build from a config the caller has validated
    pub fn from_config(config: &BodyConfig) -> Self {
        Self {
            name: config.name.clone(),
            mass: config.mass,
            radius: config.radius,
            surface_temperature: config.surface_temperature,
            angular_velocity: 0.0,
            rotation_period: config.rotation_period,
            obliquity: config.obliquity,
            argument_of_obliquity: config.argument_of_obliquity,
            yaw: config.yaw,
            rotation: DVec3::zeros(),
            position: DVec3::from(config.position),
        }
    }

    /// Advance the spin by `dt` seconds, keeping the angle in [0, 2π)
    pub fn spin(&mut self, dt: f64) {
        let step = mechanics::rotation_angle(self.rotation_period, dt);
        self.rotation.y = (self.rotation.y + step).rem_euclid(TAU);
    }

    /// Position in scene units
    pub fn scaled_position(&self, scales: &BodyScales) -> Vec3 {
        utils::scale_to_scene(&self.position, scales.distance)
    }

    /// Radius in scene units
    pub fn scaled_radius(&self, scales: &BodyScales) -> f32 {
        (self.radius * scales.size) as f32
    }

    /// Euler rotation for the transform, in degrees: spin about y, tilt about z
    pub fn transform_rotation(&self) -> Vec3 {
        Vec3::new(
            self.rotation.x.to_degrees() as f32,
            self.rotation.y.to_degrees() as f32,
            self.obliquity as f32,
        )
    }

    /// Full orientation: the tilt matrix followed by the spin about y
    pub fn orientation_matrix(&self) -> DMat4 {
        mechanics::tilt_matrix(self.obliquity, self.argument_of_obliquity, self.yaw)
            * DMat4::from_axis_angle(&Vector3::y_axis(), self.rotation.y)
    }
}

/// Star-only state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarData {
    /// Radiated power in watts
    pub luminosity: f64,
}

impl StarData {
    /// Irradiance at `distance` metres from the star
    pub fn light_intensity_at(&self, distance: f64) -> f64 {
        mechanics::light_intensity(self.luminosity, distance)
    }
}

/// Planet-only orbital state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetData {
    /// Time for one orbit in seconds
    pub orbital_period: f64,
    /// Orbit radius in metres
    pub orbital_distance: f64,
    /// Current orbital angle in radians, kept in [0, 2π)
    pub angle: f64,
    /// Star this planet orbits and is heated by
    pub central_star: Option<ObjectId>,
}

impl PlanetData {
    /// Take the orbital part of a config
    pub fn from_config(config: &PlanetConfig) -> Self {
        Self {
            orbital_period: config.orbital_period,
            orbital_distance: config.orbital_distance,
            angle: config.initial_angle.rem_euclid(TAU),
            central_star: None,
        }
    }

    /// Advance the orbit by `dt` seconds; returns the offset from the centre
    pub fn advance(&mut self, angular_velocity: f64, dt: f64) -> DVec3 {
        let (angle, offset) =
            mechanics::orbital_position(self.orbital_distance, angular_velocity, self.angle, dt);
        self.angle = angle.rem_euclid(TAU);
        offset
    }
}
