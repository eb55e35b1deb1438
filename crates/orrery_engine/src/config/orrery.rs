//! Config sections for the orrery scene

use serde::{Deserialize, Serialize};

use super::{require_positive, Config, ConfigError};
use crate::celestial::{BodyConfig, BodyScales, PlanetConfig, StarConfig};
use crate::foundation::math::Vec3;
use crate::foundation::time::IDEAL_FRAME_INTERVAL_MS;
use crate::render::camera;

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    /// Projection planes
    pub projection: ProjectionConfig,
    /// Initial camera placement and input scaling
    pub camera: CameraConfig,
    /// Frame clock
    pub clock: ClockConfig,
    /// Log filter
    pub logging: LoggingConfig,
    /// Initial viewport size
    pub viewport: ViewportConfig,
    /// Bodies and scale factors
    pub simulation: SimulationConfig,
}

impl Config for OrreryConfig {}

impl OrreryConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.projection.validate()?;
        self.camera.validate()?;
        self.clock.validate()?;
        self.viewport.validate()?;
        self.simulation.validate()
    }
}

/// Perspective projection planes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Near clip plane distance
    pub near: f32,
    /// Far clip plane distance
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            near: 0.5,
            far: 10_000.0,
        }
    }
}

impl ProjectionConfig {
    /// Require `0 < near < far`
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("projection.near", self.near)?;
        if self.far <= self.near || !self.far.is_finite() {
            return Err(ConfigError::invalid(
                "projection.far",
                format!("must be finite and greater than near ({}), got {}", self.near, self.far),
            ));
        }
        Ok(())
    }
}

/// Orbit camera initial state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Orbit centre
    pub target: Vec3,
    /// Distance from target to eye
    pub radius: f32,
    /// Horizontal angle in degrees
    pub yaw: f32,
    /// Vertical angle in degrees
    pub pitch: f32,
    /// Pan speed
    pub movement_speed: f32,
    /// Rotation sensitivity
    pub mouse_sensitivity: f32,
    /// Initial zoom (vertical field of view in degrees)
    pub zoom: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            target: Vec3::zeros(),
            radius: camera::DEFAULT_RADIUS,
            yaw: camera::DEFAULT_YAW,
            pitch: camera::DEFAULT_PITCH,
            movement_speed: camera::DEFAULT_SPEED,
            mouse_sensitivity: camera::DEFAULT_SENSITIVITY,
            zoom: camera::DEFAULT_ZOOM,
        }
    }
}

impl CameraConfig {
    /// Require a positive radius, pitch within the clamp range and zoom in [1, 45]
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("camera.radius", self.radius)?;
        if self.pitch.abs() > camera::PITCH_LIMIT {
            return Err(ConfigError::invalid(
                "camera.pitch",
                format!("must be within ±{}, got {}", camera::PITCH_LIMIT, self.pitch),
            ));
        }
        if !(camera::MIN_ZOOM..=camera::MAX_ZOOM).contains(&self.zoom) {
            return Err(ConfigError::invalid(
                "camera.zoom",
                format!(
                    "must be within [{}, {}], got {}",
                    camera::MIN_ZOOM,
                    camera::MAX_ZOOM,
                    self.zoom
                ),
            ));
        }
        Ok(())
    }
}

/// Frame clock settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Frame interval that yields a delta of exactly 1.0
    pub ideal_frame_interval_ms: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            ideal_frame_interval_ms: IDEAL_FRAME_INTERVAL_MS,
        }
    }
}

impl ClockConfig {
    /// Require a positive interval
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("clock.ideal_frame_interval_ms", self.ideal_frame_interval_ms)
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter, overridden by `RUST_LOG`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Initial viewport size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl ViewportConfig {
    /// Require a non-zero width; a zero height is tolerated (minimized window)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::invalid("viewport.width", "must be non-zero"));
        }
        Ok(())
    }
}

/// Star and planets plus the factors mapping SI units onto the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Scene units per metre for positions
    pub distance_scale: f64,
    /// Scene units per metre for body radii
    pub size_scale: f64,
    /// Simulated seconds per unit of clock delta
    pub time_scale: f64,
    /// Central star
    pub star: StarConfig,
    /// Planets orbiting the star
    pub planets: Vec<PlanetConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let scales = BodyScales::default();
        Self {
            distance_scale: scales.distance,
            size_scale: scales.size,
            time_scale: scales.time,
            star: StarConfig::sun(),
            planets: vec![PlanetConfig::earth()],
        }
    }
}

impl SimulationConfig {
    /// Scale factors as one value
    pub fn scales(&self) -> BodyScales {
        BodyScales {
            distance: self.distance_scale,
            size: self.size_scale,
            time: self.time_scale,
        }
    }

    /// Validate scale factors and every body
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("simulation.distance_scale", self.distance_scale)?;
        require_positive("simulation.size_scale", self.size_scale)?;
        require_positive("simulation.time_scale", self.time_scale)?;
        self.star.validate()?;
        for planet in &self.planets {
            planet.validate()?;
        }
        Ok(())
    }

    /// Look up a planet by name
    pub fn planet(&self, name: &str) -> Option<&PlanetConfig> {
        self.planets.iter().find(|p| p.body.name == name)
    }

    /// Every configured body, star first
    pub fn bodies(&self) -> impl Iterator<Item = &BodyConfig> {
        std::iter::once(&self.star.body).chain(self.planets.iter().map(|p| &p.body))
    }
}
