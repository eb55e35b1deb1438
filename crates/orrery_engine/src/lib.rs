//! # Orrery Engine
//!
//! Scene orchestration for a small interactive solar-system renderer.
//!
//! ## Features
//!
//! - **Scene Objects**: transform + mesh + shader + ordered behavior scripts
//! - **Frame Dispatch**: start once, then update every frame in registration order
//! - **Orbit Camera**: yaw/pitch/radius around a target, pan/rotate/zoom
//! - **Celestial Mechanics**: circular orbits, spin, irradiance, equilibrium temperature
//! - **Backend Seam**: everything GPU-related goes through [`render::GraphicsDevice`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use orrery_engine::prelude::*;
//! use std::rc::Rc;
//!
//! fn main() -> Result<(), SceneError> {
//!     let mut device = HeadlessDevice::new();
//!     let config = OrreryConfig::default();
//!     let scales = config.simulation.scales();
//!
//!     let shader = Rc::new(Shader::compile(
//!         &mut device,
//!         "body",
//!         PASSTHROUGH_VERTEX_SHADER,
//!         FLAT_FRAGMENT_SHADER,
//!     )?);
//!     let sphere = Rc::new(uv_sphere(1.0, 16, 32));
//!
//!     let sun = SceneObject::new("Sun")
//!         .with_mesh(Mesh::new(Rc::clone(&sphere)))
//!         .with_shader(Rc::clone(&shader))
//!         .with_script(StarScript::new(&config.simulation.star, scales)?);
//!     let earth = SceneObject::new("Earth")
//!         .with_mesh(Mesh::new(sphere))
//!         .with_shader(shader)
//!         .with_script(
//!             PlanetScript::new(&config.simulation.planets[0], scales)?.orbiting(sun.id()),
//!         );
//!
//!     let mut scene = Scene::new(
//!         vec![sun, earth],
//!         Camera::from_config(&config.camera),
//!         Box::new(FixedViewport::new(1280, 720)),
//!         config.projection,
//!     )?;
//!
//!     let mut clock = Clock::new();
//!     scene.start(&clock, &mut device)?;
//!     for frame in 1..=60 {
//!         clock.tick(f64::from(frame) * 1000.0 / 60.0);
//!         scene.update(&clock, &mut device)?;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod celestial;
pub mod config;
pub mod ecs;
pub mod foundation;
pub mod input;
pub mod render;
pub mod scene;
pub mod scripts;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, AssetLoader, ImageData, MeshData, PendingImage},
        celestial::{BodyScales, PlanetConfig, PlanetScript, StarConfig, StarScript},
        config::{Config, ConfigError, OrreryConfig, ProjectionConfig},
        ecs::{ObjectId, TransformComponent},
        foundation::{
            math::{Mat4, Vec3},
            time::Clock,
        },
        input::{CameraInput, InputEvent, MouseButton},
        render::{
            headless::{FLAT_FRAGMENT_SHADER, PASSTHROUGH_VERTEX_SHADER},
            primitives::{skybox_cube, uv_sphere},
            Camera, FixedViewport, GraphicsDevice, HeadlessDevice, Mesh, RenderError, Shader,
            Viewport,
        },
        scene::{
            BehaviorScript, FrameStats, Scene, SceneError, SceneObject, SceneResult,
            ScriptContext,
        },
        scripts::{
            Axis, CameraFollowScript, OrbitMoverScript, OscillatorScript, RotatorScript,
            SkyboxScript,
        },
    };
}
