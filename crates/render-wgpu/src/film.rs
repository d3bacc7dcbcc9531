use crate::fullscreen::{self, RenderTarget};
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use wormhole_kernel::FilmSettings;

/// GPU layout of the film uniforms. Must match `Film` in the shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct FilmParams {
    time: f32,
    noise_intensity: f32,
    scanline_intensity: f32,
    scanline_count: f32,
    grayscale: u32,
    _pad: [u32; 3],
}

impl FilmParams {
    pub(crate) fn new(settings: &FilmSettings, time: f32) -> Self {
        Self {
            time,
            noise_intensity: settings.noise_intensity,
            scanline_intensity: settings.scanline_intensity,
            scanline_count: settings.scanline_count,
            grayscale: settings.grayscale as u32,
            _pad: [0; 3],
        }
    }
}

/// Film grain and scanlines, drawn from the scene target onto the surface.
pub struct FilmPass {
    pipeline: wgpu::RenderPipeline,
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    settings: FilmSettings,
}

impl FilmPass {
    pub fn new(
        device: &wgpu::Device,
        sampled_layout: &wgpu::BindGroupLayout,
        surface_format: wgpu::TextureFormat,
        settings: &FilmSettings,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("film_uniforms"),
            contents: bytemuck::bytes_of(&FilmParams::new(settings, 0.0)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let uniform_layout = fullscreen::uniform_layout(device, "film_uniform_layout");
        let bind_group =
            fullscreen::uniform_bind_group(device, &uniform_layout, &buffer, "film_bind_group");

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("film_pipeline_layout"),
            bind_group_layouts: &[&uniform_layout, sampled_layout],
            push_constant_ranges: &[],
        });
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("film_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::FILM_SHADER.into()),
        });
        let pipeline = fullscreen::create_pipeline(
            device,
            &shader,
            &layout,
            "fs_film",
            surface_format,
            None,
            "film_pipeline",
        );

        Self {
            pipeline,
            buffer,
            bind_group,
            settings: settings.clone(),
        }
    }

    pub fn set_time(&self, queue: &wgpu::Queue, time: f32) {
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::bytes_of(&FilmParams::new(&self.settings, time)),
        );
    }

    pub fn record(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        scene: &RenderTarget,
        surface: &wgpu::TextureView,
    ) {
        fullscreen::draw(
            encoder,
            &self.pipeline,
            &[&self.bind_group, &scene.bind_group],
            surface,
            wgpu::LoadOp::Clear(wgpu::Color::BLACK),
            "film_pass",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn film_params_are_32_bytes() {
        assert_eq!(std::mem::size_of::<FilmParams>(), 32);
    }

    #[test]
    fn grayscale_flag_maps_to_int() {
        let mut settings = FilmSettings::default();
        assert_eq!(FilmParams::new(&settings, 0.5).grayscale, 0);
        settings.grayscale = true;
        let params = FilmParams::new(&settings, 0.5);
        assert_eq!(params.grayscale, 1);
        assert_eq!(params.time, 0.5);
        assert_eq!(params.scanline_count, 2048.0);
    }
}
