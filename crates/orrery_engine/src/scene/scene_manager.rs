//! The scene and its frame loop

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use super::frame::{FrameContext, FrameStats};
use super::scene_object::SceneObject;
use super::{SceneError, SceneResult};
use crate::config::ProjectionConfig;
use crate::ecs::ObjectId;
use crate::foundation::math::{utils, Mat4, Mat4Ext};
use crate::foundation::time::Clock;
use crate::render::{Camera, GraphicsDevice, Viewport};

static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

/// Scene identifier, stored in each registered object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneId(u32);

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene#{}", self.0)
    }
}

/// Ordered objects plus the camera and viewport they are seen through
///
/// Objects are visited in registration order every frame. Objects added
/// after [`Scene::start`] are started at the beginning of the next update.
pub struct Scene {
    id: SceneId,
    objects: Vec<SceneObject>,
    camera: Camera,
    viewport: Box<dyn Viewport>,
    projection: ProjectionConfig,
    started: bool,
}

impl Scene {
    /// Register `objects` in the given order
    pub fn new(
        objects: Vec<SceneObject>,
        camera: Camera,
        viewport: Box<dyn Viewport>,
        projection: ProjectionConfig,
    ) -> SceneResult<Self> {
        projection.validate()?;

        let id = SceneId(NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed));
        let mut scene = Self {
            id,
            objects: Vec::with_capacity(objects.len()),
            camera,
            viewport,
            projection,
            started: false,
        };
        for object in objects {
            scene.add_object(object);
        }
        Ok(scene)
    }

    /// Append an object; returns its id
    pub fn add_object(&mut self, mut object: SceneObject) -> ObjectId {
        object.set_scene(Some(self.id));
        let id = object.id();
        log::debug!("Registered '{}' ({}) with {}", object.name(), id, self.id);
        self.objects.push(object);
        id
    }

    /// Take an object out of the scene
    pub fn remove_object(&mut self, id: ObjectId) -> SceneResult<SceneObject> {
        let index = self
            .objects
            .iter()
            .position(|o| o.id() == id)
            .ok_or(SceneError::UnknownObject(id))?;
        let mut object = self.objects.remove(index);
        object.set_scene(None);
        log::debug!("Removed '{}' ({}) from {}", object.name(), id, self.id);
        Ok(object)
    }

    /// Run the start phase once
    ///
    /// Calling it again is a no-op. If an object fails to start, a retry only
    /// starts the objects that have not started yet.
    pub fn start(&mut self, clock: &Clock, device: &mut dyn GraphicsDevice) -> SceneResult<()> {
        if self.started {
            log::warn!("{} already started", self.id);
            return Ok(());
        }

        let frame = self.frame_context(clock);
        let Self {
            objects, camera, ..
        } = self;
        // Objects started by an earlier, failed attempt keep their state.
        for object in objects.iter_mut().filter(|o| !o.is_started()) {
            object.start(camera, clock, &frame, device)?;
        }

        self.started = true;
        log::info!("{} started with {} objects", self.id, self.objects.len());
        Ok(())
    }

    /// Run one frame
    ///
    /// The clock must already be ticked for this frame. Stops at the first
    /// script or device error and returns it.
    pub fn update(
        &mut self,
        clock: &Clock,
        device: &mut dyn GraphicsDevice,
    ) -> SceneResult<FrameStats> {
        if !self.started {
            return Err(SceneError::NotStarted);
        }

        let frame = self.frame_context(clock);
        let mut stats = FrameStats {
            frame: clock.frame_count(),
            ..FrameStats::default()
        };

        let Self {
            objects, camera, ..
        } = self;
        for object in objects.iter_mut() {
            if !object.is_started() {
                object.start(camera, clock, &frame, device)?;
            }
            object.update(camera, clock, &frame, device, &mut stats)?;
        }

        log::trace!(
            "Frame {}: {} objects, {} draws, {} skipped",
            stats.frame,
            stats.objects_updated,
            stats.draws_issued,
            stats.draws_skipped
        );
        Ok(stats)
    }

    /// Perspective projection from the camera zoom and viewport aspect
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(
            utils::deg_to_rad(self.camera.zoom_level()),
            self.viewport.aspect_ratio(),
            self.projection.near,
            self.projection.far,
        )
    }

    fn frame_context(&self, clock: &Clock) -> FrameContext {
        let bodies = self
            .objects
            .iter()
            .filter_map(SceneObject::body_snapshot)
            .collect();
        FrameContext::new(
            clock.frame_count(),
            self.projection_matrix(),
            self.viewport.aspect_ratio(),
            bodies,
        )
    }

    /// Scene id
    pub fn id(&self) -> SceneId {
        self.id
    }

    /// Whether [`Scene::start`] has run
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Objects in registration order
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Object by id
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    /// Object by id, mutably
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    /// First object with the given name
    pub fn find_by_name(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name() == name)
    }

    /// The camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The camera, mutably (input handling)
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// The viewport
    pub fn viewport(&self) -> &dyn Viewport {
        self.viewport.as_ref()
    }

    /// Swap the viewport, e.g. after a window was recreated
    pub fn set_viewport(&mut self, viewport: Box<dyn Viewport>) {
        self.viewport = viewport;
    }

    /// Projection planes
    pub fn projection_config(&self) -> ProjectionConfig {
        self.projection
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("objects", &self.objects)
            .field("camera", &self.camera)
            .field("viewport", &self.viewport.size())
            .field("started", &self.started)
            .finish()
    }
}
