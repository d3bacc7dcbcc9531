use crate::fullscreen::{self, ADDITIVE, RenderTarget};
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use wormhole_kernel::BloomSettings;
use wormhole_render::gaussian_kernel;

/// Centre tap plus up to 15 one-sided taps.
const MAX_WEIGHTS: usize = 16;

/// GPU uniform for one blur direction. Must match `Blur` in the shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct BlurParams {
    direction: [f32; 2],
    half_taps: u32,
    strength: f32,
    weights: [[f32; 4]; 4],
}

impl BlurParams {
    pub(crate) fn new(settings: &BloomSettings, direction: [f32; 2]) -> Self {
        let kernel = gaussian_kernel(settings.kernel_size, settings.sigma);
        let mut flat = [0.0f32; MAX_WEIGHTS];
        let taps = kernel.len().min(MAX_WEIGHTS);
        flat[..taps].copy_from_slice(&kernel[..taps]);

        let mut weights = [[0.0; 4]; 4];
        for (i, w) in flat.iter().enumerate() {
            weights[i / 4][i % 4] = *w;
        }
        Self {
            direction,
            half_taps: taps.saturating_sub(1) as u32,
            strength: settings.strength,
            weights,
        }
    }
}

/// Texture-space distance between blur taps: half a texel of the blur targets.
pub(crate) fn blur_step(settings: &BloomSettings) -> f32 {
    0.5 / settings.resolution.max(1) as f32
}

/// Gaussian bloom: blur the scene horizontally then vertically into small
/// square targets, then add the result back onto the scene.
pub struct BloomPass {
    blur_pipeline: wgpu::RenderPipeline,
    composite_pipeline: wgpu::RenderPipeline,
    horizontal: wgpu::BindGroup,
    vertical: wgpu::BindGroup,
    blur_x: RenderTarget,
    blur_y: RenderTarget,
}

impl BloomPass {
    pub fn new(
        device: &wgpu::Device,
        sampled_layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        format: wgpu::TextureFormat,
        settings: &BloomSettings,
    ) -> Self {
        let step = blur_step(settings);
        let uniform_layout = fullscreen::uniform_layout(device, "bloom_uniform_layout");
        let make_group = |params: BlurParams, label: &str| {
            let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::bytes_of(&params),
                usage: wgpu::BufferUsages::UNIFORM,
            });
            fullscreen::uniform_bind_group(device, &uniform_layout, &buffer, label)
        };
        let horizontal = make_group(BlurParams::new(settings, [step, 0.0]), "bloom_blur_x");
        let vertical = make_group(BlurParams::new(settings, [0.0, step]), "bloom_blur_y");

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("bloom_pipeline_layout"),
            bind_group_layouts: &[&uniform_layout, sampled_layout],
            push_constant_ranges: &[],
        });
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("bloom_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::BLOOM_SHADER.into()),
        });
        let blur_pipeline = fullscreen::create_pipeline(
            device,
            &shader,
            &layout,
            "fs_blur",
            format,
            None,
            "bloom_blur",
        );
        let composite_pipeline = fullscreen::create_pipeline(
            device,
            &shader,
            &layout,
            "fs_composite",
            format,
            Some(ADDITIVE),
            "bloom_composite",
        );

        let size = (settings.resolution, settings.resolution);
        let blur_x = RenderTarget::new(device, sampled_layout, sampler, format, size, "bloom_x");
        let blur_y = RenderTarget::new(device, sampled_layout, sampler, format, size, "bloom_y");

        Self {
            blur_pipeline,
            composite_pipeline,
            horizontal,
            vertical,
            blur_x,
            blur_y,
        }
    }

    /// Blur `scene` and add the glow back onto it.
    pub fn record(&self, encoder: &mut wgpu::CommandEncoder, scene: &RenderTarget) {
        let clear = wgpu::LoadOp::Clear(wgpu::Color::BLACK);
        fullscreen::draw(
            encoder,
            &self.blur_pipeline,
            &[&self.horizontal, &scene.bind_group],
            &self.blur_x.view,
            clear,
            "bloom_blur_x",
        );
        fullscreen::draw(
            encoder,
            &self.blur_pipeline,
            &[&self.vertical, &self.blur_x.bind_group],
            &self.blur_y.view,
            clear,
            "bloom_blur_y",
        );
        fullscreen::draw(
            encoder,
            &self.composite_pipeline,
            &[&self.horizontal, &self.blur_y.bind_group],
            &scene.view,
            wgpu::LoadOp::Load,
            "bloom_composite",
        );
    }
}
