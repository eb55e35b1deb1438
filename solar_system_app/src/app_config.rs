//! Application configuration
//!
//! The engine sections (`[projection]`, `[camera]`, `[simulation]`...) sit at
//! the top level of the file next to the app-only `[assets]` and `[run]`.

use orrery_engine::config::{Config, ConfigError, OrreryConfig};
use orrery_engine::render::ShaderSourcePaths;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Whole application config file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Engine sections
    #[serde(flatten)]
    pub orrery: OrreryConfig,
    /// Asset locations
    #[serde(default)]
    pub assets: AssetsConfig,
    /// Frame loop settings
    #[serde(default)]
    pub run: RunConfig,
}

impl Config for AppConfig {}

impl AppConfig {
    /// Validate engine and app sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.orrery.validate()?;
        if self.run.report_every == 0 {
            return Err(ConfigError::invalid("run.report_every", "must be non-zero"));
        }
        if let Some(name) = &self.run.follow {
            if self.orrery.simulation.bodies().all(|b| &b.name != name) {
                return Err(ConfigError::invalid(
                    "run.follow",
                    format!("no body named '{name}'"),
                ));
            }
        }
        Ok(())
    }
}

/// Where to find meshes, textures and shaders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory every other asset path is relative to
    pub root: PathBuf,
    /// OBJ file used for every body; a generated sphere when absent
    pub body_mesh: Option<PathBuf>,
    /// Skybox image
    pub skybox_texture: String,
    /// Lit body shader
    pub body_shader: ShaderSourcePaths,
    /// Skybox shader
    pub skybox_shader: ShaderSourcePaths,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("solar_system_app/assets"),
            body_mesh: None,
            skybox_texture: "textures/stars.png".to_string(),
            body_shader: ShaderSourcePaths::new("shaders/body.vert", "shaders/body.frag"),
            skybox_shader: ShaderSourcePaths::new("shaders/skybox.vert", "shaders/skybox.frag"),
        }
    }
}

/// Frame loop settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Frames to simulate; 0 runs until interrupted
    pub frames: u64,
    /// Pace frames with the wall clock instead of a fixed timeline
    pub realtime: bool,
    /// Log body positions every this many frames
    pub report_every: u64,
    /// Body the camera follows
    pub follow: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            realtime: false,
            report_every: 60,
            follow: None,
        }
    }
}
