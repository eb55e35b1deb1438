//! Scene orchestration
//!
//! Objects carry a transform, an optional mesh and shader, and an ordered
//! list of behavior scripts. The [`Scene`] drives them once per frame:
//!
//! ```text
//! Clock tick
//!      ↓
//! Scene::update ── projection from zoom + aspect, body snapshot
//!      ↓
//! per object: push {model, view, projection, viewPos}
//!             → scripts update (attachment order)
//!             → mesh draw
//! ```

mod frame;
mod scene_manager;
mod scene_object;
mod script;

pub use frame::{BodySnapshot, BodyState, FrameContext, FrameStats};
pub use scene_manager::{Scene, SceneId};
pub use scene_object::SceneObject;
pub use script::{BehaviorScript, ScriptContext};

use crate::assets::AssetError;
use crate::config::ConfigError;
use crate::ecs::ObjectId;
use crate::render::RenderError;
use thiserror::Error;

/// Scene errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// Device or shader failure
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Asset could not be loaded
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Configuration rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No object with this id is registered
    #[error("Unknown object {0}")]
    UnknownObject(ObjectId),

    /// `update` was called before `start`
    #[error("Scene updated before start")]
    NotStarted,

    /// A celestial body failed validation
    #[error("Invalid body '{name}': {source}")]
    InvalidBody {
        /// Body name
        name: String,
        /// Validation failure
        #[source]
        source: ConfigError,
    },
}

/// Result type for scene operations
pub type SceneResult<T> = Result<T, SceneError>;
