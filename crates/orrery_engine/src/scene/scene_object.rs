//! Scene objects

use std::rc::Rc;

use super::frame::{BodySnapshot, FrameContext, FrameStats};
use super::scene_manager::SceneId;
use super::script::{BehaviorScript, ScriptContext};
use super::SceneResult;
use crate::ecs::{ObjectId, TransformComponent};
use crate::foundation::time::Clock;
use crate::render::shader::push_camera_uniforms;
use crate::render::{Camera, DrawOutcome, GraphicsDevice, Mesh, Shader};

/// An entity in the scene
///
/// Owns its transform and scripts. The mesh is per object (each object
/// uploads its own buffers); the shader is shared between objects.
pub struct SceneObject {
    id: ObjectId,
    name: String,
    transform: TransformComponent,
    mesh: Option<Mesh>,
    shader: Option<Rc<Shader>>,
    scripts: Vec<Box<dyn BehaviorScript>>,
    scene: Option<SceneId>,
    started: bool,
}

impl SceneObject {
    /// Create an empty object at the origin
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::next(),
            name: name.into(),
            transform: TransformComponent::identity(),
            mesh: None,
            shader: None,
            scripts: Vec::new(),
            scene: None,
            started: false,
        }
    }

    /// Builder pattern: set the initial transform
    pub fn with_transform(mut self, transform: TransformComponent) -> Self {
        self.transform = transform;
        self
    }

    /// Builder pattern: give the object a mesh
    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Builder pattern: give the object a shader
    pub fn with_shader(mut self, shader: Rc<Shader>) -> Self {
        self.shader = Some(shader);
        self
    }

    /// Builder pattern: attach a script
    pub fn with_script(mut self, script: impl BehaviorScript) -> Self {
        self.attach(script);
        self
    }

    /// Append a script; it runs after every script attached before it
    pub fn attach(&mut self, script: impl BehaviorScript) {
        log::debug!("Attaching '{}' to '{}' ({})", script.name(), self.name, self.id);
        self.scripts.push(Box::new(script));
    }

    /// Unique id
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Object name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current transform
    pub fn transform(&self) -> &TransformComponent {
        &self.transform
    }

    /// Mutable transform
    pub fn transform_mut(&mut self) -> &mut TransformComponent {
        &mut self.transform
    }

    /// Mesh, if any
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    /// Shader, if any
    pub fn shader(&self) -> Option<&Shader> {
        self.shader.as_deref()
    }

    /// Scene this object is registered with
    pub fn scene(&self) -> Option<SceneId> {
        self.scene
    }

    /// Attached scripts in attachment order
    pub fn scripts(&self) -> &[Box<dyn BehaviorScript>] {
        &self.scripts
    }

    /// First attached script of type `T`
    pub fn script<T: BehaviorScript>(&self) -> Option<&T> {
        self.scripts.iter().find_map(|s| s.as_any().downcast_ref::<T>())
    }

    /// First attached script of type `T`, mutably
    pub fn script_mut<T: BehaviorScript>(&mut self) -> Option<&mut T> {
        self.scripts
            .iter_mut()
            .find_map(|s| s.as_any_mut().downcast_mut::<T>())
    }

    pub(crate) fn set_scene(&mut self, scene: Option<SceneId>) {
        self.scene = scene;
    }

    pub(crate) fn is_started(&self) -> bool {
        self.started
    }

    /// Body published by the first script that has one
    pub(crate) fn body_snapshot(&self) -> Option<BodySnapshot> {
        self.scripts.iter().find_map(|s| s.body_state()).map(|state| BodySnapshot {
            object: self.id,
            scene_position: self.transform.position,
            state,
        })
    }

    /// Run every script's `start`, then upload the mesh
    pub(crate) fn start(
        &mut self,
        camera: &mut Camera,
        clock: &Clock,
        frame: &FrameContext,
        device: &mut dyn GraphicsDevice,
    ) -> SceneResult<()> {
        let mut stats = FrameStats::default();
        let shader = self.shader.as_ref().map(|s| s.handle());
        for script in &mut self.scripts {
            let mut ctx = ScriptContext {
                object: self.id,
                transform: &mut self.transform,
                shader,
                camera: &mut *camera,
                clock,
                frame,
                device: &mut *device,
                stats: &mut stats,
            };
            script.start(&mut ctx)?;
        }

        if let Some(mesh) = &mut self.mesh {
            let handle = mesh.setup(device)?;
            log::debug!("Uploaded mesh for '{}' as {:?}", self.name, handle);
        }
        self.started = true;
        Ok(())
    }

    /// Push camera uniforms, run every script's `update`, then draw
    pub(crate) fn update(
        &mut self,
        camera: &mut Camera,
        clock: &Clock,
        frame: &FrameContext,
        device: &mut dyn GraphicsDevice,
        stats: &mut FrameStats,
    ) -> SceneResult<()> {
        let shader = self.shader.as_ref().map(|s| s.handle());

        if let Some(handle) = shader {
            push_camera_uniforms(
                device,
                handle,
                self.transform.to_matrix(),
                camera.view_matrix(),
                frame.projection,
                camera.position(),
            )?;
        }

        for script in &mut self.scripts {
            let mut ctx = ScriptContext {
                object: self.id,
                transform: &mut self.transform,
                shader,
                camera: &mut *camera,
                clock,
                frame,
                device: &mut *device,
                stats: &mut *stats,
            };
            script.update(&mut ctx)?;
        }

        if let (Some(mesh), Some(handle)) = (&self.mesh, shader) {
            match mesh.draw(device, handle)? {
                DrawOutcome::Drawn => stats.draws_issued += 1,
                DrawOutcome::Skipped => {
                    log::trace!("Mesh of '{}' not uploaded yet, skipping draw", self.name);
                    stats.draws_skipped += 1;
                }
            }
        }
        stats.objects_updated += 1;
        Ok(())
    }
}

impl std::fmt::Debug for SceneObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneObject")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("transform", &self.transform)
            .field("scripts", &self.scripts.iter().map(|s| s.name()).collect::<Vec<_>>())
            .field("has_mesh", &self.mesh.is_some())
            .field("shader", &self.shader.as_ref().map(|s| s.label()))
            .finish()
    }
}
