use crate::fullscreen::{self, RenderTarget};
use crate::shaders;
use crate::textures::SceneTextures;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use wgpu::util::DeviceExt;
use wormhole_render::FrameUniforms;

/// GPU layout of the raymarch uniforms. Must match `Scene` in the shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct SceneUniforms {
    ray_matrix: [[f32; 4]; 4],
    camera_position: [f32; 4],
    wormhole: [f32; 4],
    blackhole: [f32; 4],
    saturn: [f32; 4],
    planet: [f32; 4],
    blackhole_disk: [f32; 4],
    saturn_rings: [f32; 4],
    planet_diffuse: [f32; 4],
    planet_specular: [f32; 4],
    light_direction: [f32; 4],
    gravity_wormhole: f32,
    gravity_blackhole: f32,
    light_speed: f32,
    step_size: f32,
    start_galaxy: i32,
    _pad: [i32; 3],
}

fn point(v: Vec3) -> [f32; 4] {
    v.extend(0.0).to_array()
}

impl From<&FrameUniforms> for SceneUniforms {
    fn from(u: &FrameUniforms) -> Self {
        Self {
            ray_matrix: u.ray_matrix.to_cols_array_2d(),
            camera_position: point(u.camera_position),
            wormhole: u.wormhole.to_array(),
            blackhole: u.blackhole.to_array(),
            saturn: u.saturn.to_array(),
            planet: u.planet.to_array(),
            blackhole_disk: u.blackhole_disk.to_array(),
            saturn_rings: u.saturn_rings.to_array(),
            planet_diffuse: point(u.planet_diffuse),
            planet_specular: point(u.planet_specular),
            light_direction: point(u.light_direction),
            gravity_wormhole: u.gravity_wormhole,
            gravity_blackhole: u.gravity_blackhole,
            light_speed: u.light_speed,
            step_size: u.step_size,
            start_galaxy: u.start_galaxy,
            _pad: [0; 3],
        }
    }
}

/// Full-screen raymarch into the offscreen scene target.
pub struct RaymarchPass {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    textures: SceneTextures,
}

impl RaymarchPass {
    pub fn new(
        device: &wgpu::Device,
        textures: SceneTextures,
        target_format: wgpu::TextureFormat,
        initial: &FrameUniforms,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("raymarch_uniforms"),
            contents: bytemuck::bytes_of(&SceneUniforms::from(initial)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let uniform_layout = fullscreen::uniform_layout(device, "raymarch_uniform_layout");
        let uniform_bind_group = fullscreen::uniform_bind_group(
            device,
            &uniform_layout,
            &uniform_buffer,
            "raymarch_uniform_bind_group",
        );

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("raymarch_pipeline_layout"),
            bind_group_layouts: &[&uniform_layout, &textures.layout],
            push_constant_ranges: &[],
        });
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("raymarch_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::RAYMARCH_SHADER.into()),
        });
        let pipeline = fullscreen::create_pipeline(
            device,
            &shader,
            &pipeline_layout,
            "fs_raymarch",
            target_format,
            None,
            "raymarch_pipeline",
        );

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            textures,
        }
    }

    pub fn update(&self, queue: &wgpu::Queue, uniforms: &FrameUniforms) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&SceneUniforms::from(uniforms)),
        );
    }

    pub fn record(&self, encoder: &mut wgpu::CommandEncoder, target: &RenderTarget) {
        fullscreen::draw(
            encoder,
            &self.pipeline,
            &[&self.uniform_bind_group, &self.textures.bind_group],
            &target.view,
            wgpu::LoadOp::Clear(wgpu::Color::BLACK),
            "raymarch_pass",
        );
    }
}
