//! End-to-end scene scenarios driven through the headless device

use std::any::Any;
use std::cell::RefCell;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::rc::Rc;

use approx::assert_relative_eq;
use orrery_engine::celestial::mechanics;
use orrery_engine::foundation::math::DVec3;
use orrery_engine::foundation::time::IDEAL_FRAME_INTERVAL_MS;
use orrery_engine::prelude::*;
use orrery_engine::render::shader::uniforms;
use orrery_engine::render::{DeviceCall, UniformValue};

type EventLog = Rc<RefCell<Vec<String>>>;

/// Records every call it receives
struct Recorder {
    label: &'static str,
    log: EventLog,
}

impl BehaviorScript for Recorder {
    fn name(&self) -> &str {
        self.label
    }

    fn start(&mut self, ctx: &mut ScriptContext<'_>) -> SceneResult<()> {
        self.log.borrow_mut().push(format!("start:{}", self.label));
        // Leave a mark in the device log so start order can be checked against mesh uploads.
        if let Some(shader) = ctx.shader {
            ctx.device.set_uniform(shader, self.label, UniformValue::Float(0.0))?;
        }
        Ok(())
    }

    fn update(&mut self, _ctx: &mut ScriptContext<'_>) -> SceneResult<()> {
        self.log.borrow_mut().push(format!("update:{}", self.label));
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Fails its first `start`, succeeds afterwards
struct FailsFirstStart {
    attempts: u32,
}

impl BehaviorScript for FailsFirstStart {
    fn name(&self) -> &str {
        "fails-first-start"
    }

    fn start(&mut self, ctx: &mut ScriptContext<'_>) -> SceneResult<()> {
        self.attempts += 1;
        if self.attempts == 1 {
            return Err(SceneError::UnknownObject(ctx.object));
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn recorder(label: &'static str, log: &EventLog) -> Recorder {
    Recorder {
        label,
        log: Rc::clone(log),
    }
}

fn flat_shader(device: &mut HeadlessDevice, label: &str) -> Rc<Shader> {
    Rc::new(Shader::compile(device, label, PASSTHROUGH_VERTEX_SHADER, FLAT_FRAGMENT_SHADER).unwrap())
}

fn new_scene(objects: Vec<SceneObject>) -> Scene {
    Scene::new(
        objects,
        Camera::default(),
        Box::new(FixedViewport::new(1280, 720)),
        ProjectionConfig::default(),
    )
    .unwrap()
}

fn tick(clock: &mut Clock) {
    let next = clock.last_timestamp_ms() + IDEAL_FRAME_INTERVAL_MS;
    clock.tick(next);
}

/// Sun and Earth sharing one sphere and shader
fn sun_and_earth(device: &mut HeadlessDevice, scales: BodyScales) -> (Scene, ObjectId, ObjectId) {
    let shader = flat_shader(device, "planet");
    let sphere = Rc::new(uv_sphere(1.0, 8, 16));

    let sun = SceneObject::new("Sun")
        .with_mesh(Mesh::new(Rc::clone(&sphere)))
        .with_shader(Rc::clone(&shader))
        .with_script(StarScript::new(&StarConfig::sun(), scales).unwrap());
    let sun_id = sun.id();

    let earth = SceneObject::new("Earth")
        .with_mesh(Mesh::new(sphere))
        .with_shader(shader)
        .with_script(PlanetScript::new(&PlanetConfig::earth(), scales).unwrap().orbiting(sun_id));
    let earth_id = earth.id();

    (new_scene(vec![sun, earth]), sun_id, earth_id)
}

#[test]
fn start_runs_once_per_object_in_registration_order_before_any_update() {
    let log = EventLog::default();
    let mut device = HeadlessDevice::new();

    let first = SceneObject::new("first")
        .with_mesh(Mesh::new(Rc::new(skybox_cube())))
        .with_script(recorder("a1", &log))
        .with_script(recorder("a2", &log));
    let second = SceneObject::new("second")
        .with_mesh(Mesh::new(Rc::new(skybox_cube())))
        .with_script(recorder("b1", &log));
    let mut scene = new_scene(vec![first, second]);

    let mut clock = Clock::new();
    scene.start(&clock, &mut device).unwrap();
    assert_eq!(*log.borrow(), ["start:a1", "start:a2", "start:b1"]);
    assert_eq!(device.mesh_count(), 2);

    scene.start(&clock, &mut device).unwrap();
    assert_eq!(log.borrow().len(), 3);
    assert_eq!(device.mesh_count(), 2);

    tick(&mut clock);
    scene.update(&clock, &mut device).unwrap();
    tick(&mut clock);
    scene.update(&clock, &mut device).unwrap();
    assert_eq!(
        *log.borrow(),
        [
            "start:a1", "start:a2", "start:b1",
            "update:a1", "update:a2", "update:b1",
            "update:a1", "update:a2", "update:b1",
        ]
    );
}

#[test]
fn each_object_uploads_its_mesh_before_the_next_object_starts() {
    let log = EventLog::default();
    let mut device = HeadlessDevice::new();
    let shader = flat_shader(&mut device, "flat");

    let first = SceneObject::new("first")
        .with_mesh(Mesh::new(Rc::new(skybox_cube())))
        .with_shader(Rc::clone(&shader))
        .with_script(recorder("a1", &log))
        .with_script(recorder("a2", &log));
    let second = SceneObject::new("second")
        .with_mesh(Mesh::new(Rc::new(skybox_cube())))
        .with_shader(shader)
        .with_script(recorder("b1", &log));
    let mut scene = new_scene(vec![first, second]);

    device.clear_calls();
    scene.start(&Clock::new(), &mut device).unwrap();
    let sequence: Vec<String> = device
        .calls()
        .iter()
        .filter_map(|call| match call {
            DeviceCall::SetUniform { name, .. } => Some(format!("start:{name}")),
            DeviceCall::CreateMesh(_) => Some("mesh".to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(sequence, ["start:a1", "start:a2", "mesh", "start:b1", "mesh"]);
}

#[test]
fn retrying_a_failed_start_does_not_restart_finished_objects() {
    let log = EventLog::default();
    let mut device = HeadlessDevice::new();

    let first = SceneObject::new("first")
        .with_mesh(Mesh::new(Rc::new(skybox_cube())))
        .with_script(recorder("a", &log));
    let second = SceneObject::new("second")
        .with_mesh(Mesh::new(Rc::new(skybox_cube())))
        .with_script(FailsFirstStart { attempts: 0 });
    let second_id = second.id();
    let mut scene = new_scene(vec![first, second]);

    let clock = Clock::new();
    assert!(matches!(
        scene.start(&clock, &mut device),
        Err(SceneError::UnknownObject(id)) if id == second_id
    ));
    assert!(!scene.is_started());
    assert_eq!(device.mesh_count(), 1);

    scene.start(&clock, &mut device).unwrap();
    assert!(scene.is_started());
    assert_eq!(*log.borrow(), ["start:a"]);
    assert_eq!(device.mesh_count(), 2);
    assert_eq!(
        scene
            .object(second_id)
            .and_then(|o| o.script::<FailsFirstStart>())
            .map(|s| s.attempts),
        Some(2)
    );
}

#[test]
fn earth_quarter_year_lands_on_positive_z() {
    let earth = PlanetConfig::earth();
    let scales = BodyScales {
        time: earth.orbital_period / 4.0,
        ..BodyScales::default()
    };
    let mut device = HeadlessDevice::new();
    let (mut scene, _sun, earth_id) = sun_and_earth(&mut device, scales);

    let mut clock = Clock::new();
    scene.start(&clock, &mut device).unwrap();
    tick(&mut clock);
    assert_relative_eq!(clock.delta(), 1.0);
    scene.update(&clock, &mut device).unwrap();

    let object = scene.object(earth_id).unwrap();
    let planet = object.script::<PlanetScript>().unwrap();
    assert_relative_eq!(planet.planet().angle, FRAC_PI_2, epsilon = 1e-9);
    assert_relative_eq!(
        planet.body().position,
        DVec3::new(0.0, 0.0, earth.orbital_distance),
        epsilon = 1.0
    );
    // 149.6e9 m at 1e-9 units per metre
    assert_relative_eq!(object.transform().position.z, 149.6, epsilon = 1e-3);
    assert_relative_eq!(object.transform().position.x, 0.0, epsilon = 1e-3);
}

#[test]
fn full_year_of_frames_returns_earth_to_start() {
    let earth = PlanetConfig::earth();
    let frames = 365;
    let scales = BodyScales {
        time: earth.orbital_period / f64::from(frames),
        ..BodyScales::default()
    };
    let mut device = HeadlessDevice::new();
    let (mut scene, _sun, earth_id) = sun_and_earth(&mut device, scales);

    // Timestamps on the ideal grid keep every delta at 1.0 up to rounding.
    let mut clock = Clock::new();
    scene.start(&clock, &mut device).unwrap();
    for frame in 1..=frames {
        clock.tick(f64::from(frame) * IDEAL_FRAME_INTERVAL_MS);
        scene.update(&clock, &mut device).unwrap();
    }

    let planet = scene.object(earth_id).unwrap().script::<PlanetScript>().unwrap();
    let angle = planet.planet().angle;
    assert!(angle < 1e-6 || TAU - angle < 1e-6, "angle {angle}");
}

#[test]
fn earth_temperature_and_light_uniforms_follow_the_sun() {
    let mut device = HeadlessDevice::new();
    let (mut scene, _sun, earth_id) = sun_and_earth(&mut device, BodyScales::default());
    let shader = scene.object(earth_id).unwrap().shader().unwrap().handle();

    let mut clock = Clock::new();
    scene.start(&clock, &mut device).unwrap();
    tick(&mut clock);
    let stats = scene.update(&clock, &mut device).unwrap();
    assert_eq!(stats.objects_updated, 2);
    assert_eq!(stats.draws_issued, 2);

    let planet = scene.object(earth_id).unwrap().script::<PlanetScript>().unwrap();
    let expected = mechanics::surface_temperature(
        3.828e26,
        planet.body().position.norm(),
        planet.body().radius,
    );
    assert_relative_eq!(planet.body().surface_temperature, expected, max_relative = 1e-9);
    assert!(planet.body().surface_temperature < 288.0);

    assert_eq!(
        device.uniform(shader, uniforms::LIGHT_POSITION),
        Some(&UniformValue::Vec3(Vec3::zeros()))
    );
    assert_eq!(
        device.uniform(shader, uniforms::LIGHT_COLOR),
        Some(&UniformValue::Vec3(Vec3::new(1.0, 1.0, 1.0)))
    );
}

#[test]
fn planet_orbiting_an_unregistered_star_fails_at_start() {
    let mut device = HeadlessDevice::new();
    let ghost = SceneObject::new("ghost").id();
    let planet = SceneObject::new("Earth").with_script(
        PlanetScript::new(&PlanetConfig::earth(), BodyScales::default())
            .unwrap()
            .orbiting(ghost),
    );
    let mut scene = new_scene(vec![planet]);
    let result = scene.start(&Clock::new(), &mut device);
    assert!(matches!(result, Err(SceneError::UnknownObject(id)) if id == ghost));
}

#[test]
fn skybox_draws_only_after_texture_loads() {
    let mut device = HeadlessDevice::new();
    let skybox_shader = flat_shader(&mut device, "skybox");
    let (sender, pending) = PendingImage::channel("stars.png");
    let skybox = SceneObject::new("skybox")
        .with_script(SkyboxScript::new(Rc::clone(&skybox_shader), pending));
    let mut scene = new_scene(vec![skybox]);

    let mut clock = Clock::new();
    scene.start(&clock, &mut device).unwrap();

    for _ in 0..5 {
        tick(&mut clock);
        let stats = scene.update(&clock, &mut device).unwrap();
        assert_eq!(stats.draws_issued, 0);
        assert_eq!(stats.draws_skipped, 1);
    }
    assert_eq!(device.draws_with(skybox_shader.handle()), 0);

    sender.send(Ok(ImageData::solid([10, 10, 40, 255]))).unwrap();
    tick(&mut clock);
    let stats = scene.update(&clock, &mut device).unwrap();
    assert_eq!(stats.draws_issued, 1);
    assert_eq!(device.draws_with(skybox_shader.handle()), 1);
    assert!(device
        .calls()
        .iter()
        .any(|c| matches!(c, DeviceCall::CreateTexture(_))));
}

#[test]
fn broken_shader_is_a_construction_error() {
    let mut device = HeadlessDevice::new();
    let result = Shader::compile(&mut device, "broken", "void main() {}", FLAT_FRAGMENT_SHADER);
    assert!(matches!(result, Err(RenderError::ShaderLink(_))));

    let result = Shader::compile(&mut device, "empty", PASSTHROUGH_VERTEX_SHADER, "   ");
    let err = SceneError::from(result.unwrap_err());
    assert!(err.to_string().contains("fragment shader failed"), "{err}");
}

#[test]
fn invalid_planet_config_is_rejected_before_the_scene_exists() {
    let mut config = PlanetConfig::earth();
    config.body.rotation_period = 0.0;
    let err = PlanetScript::new(&config, BodyScales::default()).unwrap_err();
    assert!(matches!(err, SceneError::InvalidBody { .. }));
    assert!(err.to_string().contains("rotation_period"), "{err}");
}

#[test]
fn camera_input_drives_the_scene_camera() {
    let mut scene = new_scene(Vec::new());
    let mut input = CameraInput::new();
    let before = scene.camera().zoom_level();
    input.handle(scene.camera_mut(), InputEvent::Wheel { delta_y: -1.0 });
    assert_relative_eq!(scene.camera().zoom_level(), before - 1.0);

    input.handle(scene.camera_mut(), InputEvent::ButtonPressed(MouseButton::Left));
    for _ in 0..1_000 {
        input.handle(scene.camera_mut(), InputEvent::MouseMoved { dx: 0.0, dy: -500.0 });
    }
    assert!(scene.camera().pitch() <= 89.0);
}

#[test]
fn config_file_builds_a_valid_simulation() {
    let config = OrreryConfig::from_toml_str(
        r#"
        [simulation]
        time_scale = 86400.0

        [simulation.star]
        name = "Sun"
        mass = 1.989e30
        radius = 696340000.0
        rotation_period = 2192832.0
        obliquity = 7.25
        luminosity = 3.828e26

        [[simulation.planets]]
        name = "Earth"
        mass = 5.972e24
        radius = 6371000.0
        surface_temperature = 288.0
        rotation_period = 86400.0
        obliquity = 23.44
        orbital_period = 31558118.4
        orbital_distance = 149.6e9
        "#,
    )
    .unwrap();
    config.validate().unwrap();

    let scales = config.simulation.scales();
    assert_relative_eq!(scales.time, 86_400.0);
    StarScript::new(&config.simulation.star, scales).unwrap();
    let earth = config.simulation.planet("Earth").unwrap();
    PlanetScript::new(earth, scales).unwrap();
}
