//! Star and planet behaviors

use std::any::Any;

use super::body::{BodyScales, CelestialBody, PlanetConfig, PlanetData, StarConfig, StarData};
use super::mechanics;
use crate::config::ConfigError;
use crate::ecs::{ObjectId, TransformComponent};
use crate::foundation::math::{DVec3, Vec3};
use crate::render::shader::uniforms;
use crate::render::UniformValue;
use crate::scene::{BehaviorScript, BodyState, SceneError, SceneResult, ScriptContext};

/// Closest approach for which irradiance is evaluated, in metres
const MIN_HEATING_DISTANCE: f64 = 1.0;

fn invalid_body(name: &str, source: ConfigError) -> SceneError {
    SceneError::InvalidBody {
        name: name.to_string(),
        source,
    }
}

fn apply_transform(body: &CelestialBody, scales: &BodyScales, transform: &mut TransformComponent) {
    transform.position = body.scaled_position(scales);
    transform.rotation = body.transform_rotation();
    transform.scale = Vec3::repeat(body.scaled_radius(scales));
}

/// A fixed, self-luminous body
#[derive(Debug, Clone)]
pub struct StarScript {
    body: CelestialBody,
    star: StarData,
    scales: BodyScales,
}

impl StarScript {
    /// Validate `config` and build the script
    pub fn new(config: &StarConfig, scales: BodyScales) -> SceneResult<Self> {
        config
            .validate()
            .map_err(|e| invalid_body(&config.body.name, e))?;
        Ok(Self {
            body: CelestialBody::from_config(&config.body),
            star: StarData {
                luminosity: config.luminosity,
            },
            scales,
        })
    }

    /// Physical state
    pub fn body(&self) -> &CelestialBody {
        &self.body
    }

    /// Star-only state
    pub fn star(&self) -> &StarData {
        &self.star
    }
}

impl BehaviorScript for StarScript {
    fn name(&self) -> &str {
        "star"
    }

    fn start(&mut self, ctx: &mut ScriptContext<'_>) -> SceneResult<()> {
        apply_transform(&self.body, &self.scales, ctx.transform);
        log::info!(
            "Star '{}' at {:?}, luminosity {:.3e} W",
            self.body.name,
            ctx.transform.position,
            self.star.luminosity
        );
        Ok(())
    }

    fn update(&mut self, ctx: &mut ScriptContext<'_>) -> SceneResult<()> {
        let dt = self.scales.simulated_seconds(ctx.delta());
        self.body.spin(dt);
        apply_transform(&self.body, &self.scales, ctx.transform);
        Ok(())
    }

    fn body_state(&self) -> Option<BodyState> {
        Some(BodyState {
            position: self.body.position,
            radius: self.body.radius,
            luminosity: Some(self.star.luminosity),
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A body on a circular orbit, lit and heated by its central star
#[derive(Debug, Clone)]
pub struct PlanetScript {
    body: CelestialBody,
    planet: PlanetData,
    scales: BodyScales,
    light_color: Vec3,
}

impl PlanetScript {
    /// Validate `config` and build the script
    pub fn new(config: &PlanetConfig, scales: BodyScales) -> SceneResult<Self> {
        config
            .validate()
            .map_err(|e| invalid_body(&config.body.name, e))?;
        let mut body = CelestialBody::from_config(&config.body);
        body.angular_velocity = config.resolved_angular_velocity();
        Ok(Self {
            body,
            planet: PlanetData::from_config(config),
            scales,
            light_color: Vec3::new(1.0, 1.0, 1.0),
        })
    }

    /// Builder pattern: orbit the star owned by `star`
    pub fn orbiting(mut self, star: ObjectId) -> Self {
        self.planet.central_star = Some(star);
        self
    }

    /// Builder pattern: colour pushed as `lightColor`
    pub fn with_light_color(mut self, color: Vec3) -> Self {
        self.light_color = color;
        self
    }

    /// Physical state
    pub fn body(&self) -> &CelestialBody {
        &self.body
    }

    /// Orbital state
    pub fn planet(&self) -> &PlanetData {
        &self.planet
    }

    fn orbit_centre(&self, ctx: &ScriptContext<'_>) -> DVec3 {
        self.planet
            .central_star
            .and_then(|id| ctx.frame.body(id))
            .map_or_else(DVec3::zeros, |star| star.state.position)
    }

    fn update_surface_temperature(&mut self, ctx: &ScriptContext<'_>) {
        let Some(star) = self.planet.central_star.and_then(|id| ctx.frame.body(id)) else {
            return;
        };
        let Some(luminosity) = star.state.luminosity else {
            return;
        };
        let distance = (self.body.position - star.state.position).norm();
        if distance > MIN_HEATING_DISTANCE {
            self.body.surface_temperature =
                mechanics::surface_temperature(luminosity, distance, self.body.radius);
        }
    }

    fn push_light_uniforms(&self, ctx: &mut ScriptContext<'_>) -> SceneResult<()> {
        let Some(shader) = ctx.shader else {
            return Ok(());
        };
        let light_position = self
            .planet
            .central_star
            .and_then(|id| ctx.frame.body(id))
            .map_or_else(Vec3::zeros, |star| star.scene_position);
        ctx.device
            .set_uniform(shader, uniforms::LIGHT_POSITION, UniformValue::Vec3(light_position))?;
        ctx.device
            .set_uniform(shader, uniforms::LIGHT_COLOR, UniformValue::Vec3(self.light_color))?;
        Ok(())
    }
}

impl BehaviorScript for PlanetScript {
    fn name(&self) -> &str {
        "planet"
    }

    fn start(&mut self, ctx: &mut ScriptContext<'_>) -> SceneResult<()> {
        if let Some(star) = self.planet.central_star {
            if ctx.frame.body(star).is_none() {
                return Err(SceneError::UnknownObject(star));
            }
        }
        let offset = self.planet.advance(self.body.angular_velocity, 0.0);
        self.body.position = self.orbit_centre(ctx) + offset;
        apply_transform(&self.body, &self.scales, ctx.transform);
        log::info!(
            "Planet '{}' orbiting at {:.3e} m, period {:.1} days",
            self.body.name,
            self.planet.orbital_distance,
            self.planet.orbital_period / super::body::SECONDS_PER_DAY
        );
        Ok(())
    }

    fn update(&mut self, ctx: &mut ScriptContext<'_>) -> SceneResult<()> {
        let dt = self.scales.simulated_seconds(ctx.delta());
        self.body.spin(dt);

        let offset = self.planet.advance(self.body.angular_velocity, dt);
        self.body.position = self.orbit_centre(ctx) + offset;
        apply_transform(&self.body, &self.scales, ctx.transform);

        self.update_surface_temperature(ctx);
        self.push_light_uniforms(ctx)?;
        log::trace!(
            "'{}' angle {:.4} rad, {:.1} K",
            self.body.name,
            self.planet.angle,
            self.body.surface_temperature
        );
        Ok(())
    }

    fn body_state(&self) -> Option<BodyState> {
        Some(BodyState {
            position: self.body.position,
            radius: self.body.radius,
            luminosity: None,
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
