use crate::bloom::BloomPass;
use crate::context::GpuContext;
use crate::film::FilmPass;
use crate::fullscreen::{self, RenderTarget};
use crate::raymarch::RaymarchPass;
use crate::textures::SceneTextures;
use wormhole_assets::TextureSet;
use wormhole_kernel::{PostConfig, Simulation};
use wormhole_render::{FilmClock, FrameUniforms, Viewport};

/// Raymarch, bloom and film passes, in that order, onto the surface.
///
/// The raymarch and bloom composite happen in an offscreen target at the
/// viewport's scaled resolution; the film pass upsamples onto the surface.
pub struct WormholeRenderer {
    sampled_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    hdr_format: wgpu::TextureFormat,
    raymarch: RaymarchPass,
    bloom: BloomPass,
    film: FilmPass,
    scene_target: RenderTarget,
    uniforms: FrameUniforms,
    clock: FilmClock,
    viewport: Viewport,
}

impl WormholeRenderer {
    pub fn new(
        gpu: &GpuContext,
        textures: &TextureSet,
        post: &PostConfig,
        sim: &Simulation,
        viewport: Viewport,
    ) -> Self {
        let device = &gpu.device;
        let hdr_format = gpu.hdr_format();
        let sampled_layout = fullscreen::sampled_layout(device, "post_input_layout");
        let sampler = fullscreen::linear_sampler(device, "post_sampler");

        let uniforms = FrameUniforms::for_frame(sim, &viewport);
        let scene_textures = SceneTextures::upload(device, &gpu.queue, textures);
        let raymarch = RaymarchPass::new(device, scene_textures, hdr_format, &uniforms);
        let bloom = BloomPass::new(device, &sampled_layout, &sampler, hdr_format, &post.bloom);
        let film = FilmPass::new(device, &sampled_layout, gpu.surface_format(), &post.film);
        let scene_target = RenderTarget::new(
            device,
            &sampled_layout,
            &sampler,
            hdr_format,
            viewport.render_size(),
            "scene_target",
        );

        Self {
            sampled_layout,
            sampler,
            hdr_format,
            raymarch,
            bloom,
            film,
            scene_target,
            uniforms,
            clock: FilmClock::new(post.film.time_step),
            viewport,
        }
    }

    /// Size of the offscreen scene target.
    pub fn render_size(&self) -> (u32, u32) {
        (self.scene_target.width, self.scene_target.height)
    }

    /// Adopt a new window size or resolution scale.
    ///
    /// The scene target is recreated whenever its scaled size changes.
    pub fn resize(&mut self, device: &wgpu::Device, viewport: Viewport) {
        self.viewport = viewport;
        let size = viewport.render_size();
        if size == self.render_size() {
            return;
        }
        tracing::debug!(
            "scene target {}x{} -> {}x{}",
            self.scene_target.width,
            self.scene_target.height,
            size.0,
            size.1
        );
        self.scene_target = RenderTarget::new(
            device,
            &self.sampled_layout,
            &self.sampler,
            self.hdr_format,
            size,
            "scene_target",
        );
    }

    /// Draw one frame of `sim` onto `surface` and submit it.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface: &wgpu::TextureView,
        sim: &Simulation,
    ) {
        self.uniforms.update(sim, &self.viewport);
        self.raymarch.update(queue, &self.uniforms);
        self.film.set_time(queue, self.clock.tick());

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame_encoder"),
        });
        self.raymarch.record(&mut encoder, &self.scene_target);
        self.bloom.record(&mut encoder, &self.scene_target);
        self.film.record(&mut encoder, &self.scene_target, surface);
        queue.submit(std::iter::once(encoder.finish()));
    }
}
