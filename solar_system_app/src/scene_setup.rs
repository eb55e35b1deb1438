//! Builds the Sun, its planets and the skybox from configuration

use std::path::Path;
use std::rc::Rc;

use orrery_engine::assets::{AssetLoader, MeshData};
use orrery_engine::ecs::ObjectId;
use orrery_engine::prelude::*;
use orrery_engine::render::primitives;

use crate::app_config::AppConfig;
use crate::AppError;

/// Scene plus the ids the frame loop reports on
pub struct SolarSystem {
    /// The assembled scene
    pub scene: Scene,
    /// Object owning the star
    pub star: ObjectId,
    /// Objects owning the planets, in config order
    pub planets: Vec<ObjectId>,
}

/// Load shaders and meshes, then wire every body into a scene
pub fn build(
    config: &AppConfig,
    loader: &dyn AssetLoader,
    device: &mut dyn GraphicsDevice,
) -> Result<SolarSystem, AppError> {
    let assets = &config.assets;
    let simulation = &config.orrery.simulation;
    let scales = simulation.scales();

    let body_shader = Rc::new(Shader::from_files(
        device,
        "body",
        &assets.body_shader.resolve(&assets.root),
    )?);
    let skybox_shader = Rc::new(Shader::from_files(
        device,
        "skybox",
        &assets.skybox_shader.resolve(&assets.root),
    )?);
    let sphere = Rc::new(body_mesh(loader, assets.body_mesh.as_deref())?);

    let mut objects = Vec::with_capacity(simulation.planets.len() + 2);

    let star = body_object(
        &simulation.star.body.name,
        &sphere,
        &body_shader,
        StarScript::new(&simulation.star, scales)?,
        config,
    );
    let star_id = star.id();
    objects.push(star);

    let mut planets = Vec::with_capacity(simulation.planets.len());
    for planet in &simulation.planets {
        let script = PlanetScript::new(planet, scales)?.orbiting(star_id);
        let object = body_object(&planet.body.name, &sphere, &body_shader, script, config);
        planets.push(object.id());
        objects.push(object);
    }

    let skybox = SceneObject::new("skybox").with_script(SkyboxScript::new(
        skybox_shader,
        loader.load_image(&assets.skybox_texture),
    ));
    objects.push(skybox);

    let scene = Scene::new(
        objects,
        Camera::from_config(&config.orrery.camera),
        Box::new(FixedViewport::new(
            config.orrery.viewport.width,
            config.orrery.viewport.height,
        )),
        config.orrery.projection,
    )?;
    log::info!(
        "Built solar system: 1 star, {} planets, skybox '{}'",
        planets.len(),
        assets.skybox_texture
    );

    Ok(SolarSystem {
        scene,
        star: star_id,
        planets,
    })
}

fn body_mesh(loader: &dyn AssetLoader, path: Option<&Path>) -> Result<MeshData, AppError> {
    match path {
        Some(path) => Ok(loader.load_mesh_file(path)?),
        None => Ok(primitives::uv_sphere(1.0, 32, 64)),
    }
}

fn body_object(
    name: &str,
    sphere: &Rc<MeshData>,
    shader: &Rc<Shader>,
    script: impl BehaviorScript,
    config: &AppConfig,
) -> SceneObject {
    let mut object = SceneObject::new(name)
        .with_mesh(Mesh::new(Rc::clone(sphere)))
        .with_shader(Rc::clone(shader))
        .with_script(script);
    if config.run.follow.as_deref() == Some(name) {
        object.attach(CameraFollowScript::new());
    }
    object
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::assets::{AssetResult, ImageData, PendingImage};
    use std::path::PathBuf;

    /// Serves a generated sphere and a one-pixel sky
    struct StubLoader;

    impl AssetLoader for StubLoader {
        fn load_mesh_file(&self, _path: &Path) -> AssetResult<MeshData> {
            Ok(primitives::uv_sphere(1.0, 4, 8))
        }

        fn load_image(&self, url: &str) -> PendingImage {
            PendingImage::ready(url, ImageData::solid([0, 0, 0, 255]))
        }
    }

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.assets.root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets");
        config
    }

    #[test]
    fn test_build_and_run_a_few_frames() {
        let mut config = config();
        config.run.follow = Some("Earth".to_string());
        let mut device = HeadlessDevice::new();
        let mut system = build(&config, &StubLoader, &mut device).unwrap();
        assert_eq!(system.scene.objects().len(), 3);
        assert_eq!(system.planets.len(), 1);

        let mut clock = Clock::new();
        system.scene.start(&clock, &mut device).unwrap();
        for frame in 1..=3 {
            clock.tick(f64::from(frame) * 1000.0 / 60.0);
            let stats = system.scene.update(&clock, &mut device).unwrap();
            assert_eq!(stats.objects_updated, 3);
            // star, planet and skybox
            assert_eq!(stats.draws_issued, 3);
        }

        let earth = system.scene.object(system.planets[0]).unwrap();
        approx::assert_relative_eq!(
            system.scene.camera().target(),
            earth.transform().position,
            epsilon = 1e-4
        );
        assert!(system.scene.object(system.star).is_some());
    }

    #[test]
    fn test_missing_shader_files_fail_the_build() {
        let mut config = config();
        config.assets.body_shader =
            orrery_engine::render::ShaderSourcePaths::new("missing.vert", "missing.frag");
        let mut device = HeadlessDevice::new();
        let result = build(&config, &StubLoader, &mut device);
        assert!(matches!(result, Err(AppError::Render(_))));
    }
}
