//! Textured skybox
//!
//! The cube is uploaded when the scene starts. The texture arrives through a
//! [`PendingImage`]; until it does, the skybox is not drawn. A failed load is
//! reported once and the skybox stays hidden.

use std::any::Any;
use std::rc::Rc;

use crate::assets::PendingImage;
use crate::foundation::math::Mat4Ext;
use crate::render::shader::uniforms;
use crate::render::{
    primitives, DrawOutcome, Mesh, RenderState, Shader, TextureHandle, UniformValue,
};
use crate::scene::{BehaviorScript, SceneResult, ScriptContext};

#[derive(Debug)]
enum TextureState {
    Loading(PendingImage),
    Ready(TextureHandle),
    Failed,
}

/// Draws a cube around the camera with depth writes off
#[derive(Debug)]
pub struct SkyboxScript {
    shader: Rc<Shader>,
    mesh: Mesh,
    texture: TextureState,
}

impl SkyboxScript {
    /// Skybox drawn with `shader` once `texture` has loaded
    pub fn new(shader: Rc<Shader>, texture: PendingImage) -> Self {
        Self {
            shader,
            mesh: Mesh::new(Rc::new(primitives::skybox_cube())),
            texture: TextureState::Loading(texture),
        }
    }

    /// Whether the texture is on the device
    pub fn is_visible(&self) -> bool {
        matches!(self.texture, TextureState::Ready(_))
    }

    /// Whether the texture load failed
    pub fn has_failed(&self) -> bool {
        matches!(self.texture, TextureState::Failed)
    }

    fn poll_texture(&mut self, ctx: &mut ScriptContext<'_>) {
        let TextureState::Loading(pending) = &mut self.texture else {
            return;
        };
        let Some(result) = pending.poll() else {
            log::trace!("Waiting for skybox texture '{}'", pending.label());
            return;
        };

        let label = pending.label().to_string();
        self.texture = match result {
            Ok(image) => match ctx.device.create_texture(&image) {
                Ok(handle) => {
                    log::info!("Skybox texture '{}' loaded ({}x{})", label, image.width, image.height);
                    TextureState::Ready(handle)
                }
                Err(e) => {
                    log::warn!("Skybox texture '{}' rejected by the device: {}", label, e);
                    TextureState::Failed
                }
            },
            Err(e) => {
                log::warn!("Skybox texture '{}' failed to load: {}", label, e);
                TextureState::Failed
            }
        };
    }

    fn draw(&self, ctx: &mut ScriptContext<'_>, texture: TextureHandle) -> SceneResult<DrawOutcome> {
        let shader = self.shader.handle();
        let view = ctx.camera.view_matrix().without_translation();

        ctx.device.set_render_state(RenderState::SKYBOX)?;
        ctx.device.set_uniform(
            shader,
            uniforms::SKYBOX_PROJECTION,
            UniformValue::Mat4(ctx.frame.projection),
        )?;
        ctx.device
            .set_uniform(shader, uniforms::SKYBOX_VIEW, UniformValue::Mat4(view))?;
        ctx.device
            .set_uniform(shader, uniforms::SKYBOX_SAMPLER, UniformValue::Texture(texture))?;
        let outcome = self.mesh.draw(ctx.device, shader)?;
        ctx.device.set_render_state(RenderState::OPAQUE)?;
        Ok(outcome)
    }
}

impl BehaviorScript for SkyboxScript {
    fn name(&self) -> &str {
        "skybox"
    }

    fn start(&mut self, ctx: &mut ScriptContext<'_>) -> SceneResult<()> {
        self.mesh.setup(ctx.device)?;
        log::debug!("Skybox cube ready for shader '{}'", self.shader.label());
        Ok(())
    }

    fn update(&mut self, ctx: &mut ScriptContext<'_>) -> SceneResult<()> {
        self.poll_texture(ctx);
        match self.texture {
            TextureState::Ready(texture) => {
                let outcome = self.draw(ctx, texture)?;
                ctx.record_draw(outcome);
            }
            TextureState::Loading(_) => ctx.record_draw(DrawOutcome::Skipped),
            TextureState::Failed => {}
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetError, ImageData};
    use crate::render::headless::{HeadlessDevice, FLAT_FRAGMENT_SHADER, PASSTHROUGH_VERTEX_SHADER};
    use crate::render::DeviceCall;
    use crate::scene::SceneObject;
    use crate::scripts::test_support::Harness;
    use std::path::PathBuf;

    fn skybox_harness(texture: PendingImage) -> (Harness, Rc<Shader>) {
        let mut device = HeadlessDevice::new();
        let shader = Rc::new(
            Shader::compile(&mut device, "skybox", PASSTHROUGH_VERTEX_SHADER, FLAT_FRAGMENT_SHADER)
                .unwrap(),
        );
        let object = SceneObject::new("skybox").with_script(SkyboxScript::new(Rc::clone(&shader), texture));
        (Harness::with_device(object, device), shader)
    }

    #[test]
    fn test_hidden_until_texture_arrives() {
        let (sender, pending) = PendingImage::channel("stars.png");
        let (mut harness, shader) = skybox_harness(pending);
        assert_eq!(harness.device.mesh_count(), 1);

        for _ in 0..3 {
            let stats = harness.step();
            assert_eq!(stats.draws_skipped, 1);
        }
        assert_eq!(harness.device.draws_with(shader.handle()), 0);

        sender.send(Ok(ImageData::solid([0, 0, 32, 255]))).unwrap();
        let stats = harness.step();
        assert_eq!(stats.draws_issued, 1);
        assert_eq!(harness.device.draws_with(shader.handle()), 1);
        assert!(harness.object().script::<SkyboxScript>().unwrap().is_visible());
    }

    #[test]
    fn test_draw_uses_skybox_state_and_restores_it() {
        let (mut harness, shader) = skybox_harness(PendingImage::ready("stars.png", ImageData::solid([255; 4])));
        harness.device.clear_calls();
        harness.step();

        let calls = harness.device.calls();
        let draw_at = calls
            .iter()
            .position(|c| matches!(c, DeviceCall::Draw { .. }))
            .unwrap();
        assert!(calls[..draw_at].contains(&DeviceCall::SetRenderState(RenderState::SKYBOX)));
        assert_eq!(calls.last(), Some(&DeviceCall::SetRenderState(RenderState::OPAQUE)));
        assert_eq!(harness.device.render_state(), RenderState::OPAQUE);

        match harness.device.uniform(shader.handle(), uniforms::SKYBOX_VIEW) {
            Some(UniformValue::Mat4(view)) => {
                assert_eq!(view[(0, 3)], 0.0);
                assert_eq!(view[(1, 3)], 0.0);
                assert_eq!(view[(2, 3)], 0.0);
            }
            other => panic!("unexpected view uniform {other:?}"),
        }
        assert!(matches!(
            harness.device.uniform(shader.handle(), uniforms::SKYBOX_SAMPLER),
            Some(UniformValue::Texture(_))
        ));
    }

    #[test]
    fn test_failed_load_keeps_skybox_hidden() {
        let pending = PendingImage::failed("missing.png", AssetError::NotFound(PathBuf::from("missing.png")));
        let (mut harness, shader) = skybox_harness(pending);
        for _ in 0..3 {
            let stats = harness.step();
            assert_eq!(stats.draws_issued, 0);
            assert_eq!(stats.draws_skipped, 0);
        }
        assert_eq!(harness.device.draws_with(shader.handle()), 0);
        assert!(harness.object().script::<SkyboxScript>().unwrap().has_failed());
    }
}
