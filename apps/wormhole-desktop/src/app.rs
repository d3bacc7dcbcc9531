use crate::bindings::{self, Command};
use crate::overlay::{Overlay, OverlayResponse, OverlayView};
use egui::Context as EguiContext;
use std::sync::Arc;
use web_time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoopProxy};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};
use wormhole_assets::TextureSet;
use wormhole_input::{InputRouter, PointerButton};
use wormhole_kernel::{AppConfig, SimEvent, Simulation};
use wormhole_render::{FrameStats, ResolutionScale, Viewport};
use wormhole_render_wgpu::{GpuContext, RenderError, WormholeRenderer};

/// Events delivered through the event-loop proxy.
pub enum UserEvent {
    /// GPU setup finished, possibly asynchronously.
    GpuReady(Result<GpuContext, RenderError>),
}

/// Everything that survives without a GPU.
struct ViewerState {
    config: AppConfig,
    sim: Simulation,
    input: InputRouter,
    textures: TextureSet,
    scale: ResolutionScale,
    stats: FrameStats,
    overlay: Overlay,
    last_frame: Instant,
}

impl ViewerState {
    fn new(config: AppConfig, textures: TextureSet) -> Self {
        let scale = ResolutionScale::new(config.display.resolution_scale).unwrap_or_default();
        Self {
            sim: Simulation::new(config.scene.clone()),
            input: InputRouter::new(&config.controls),
            overlay: Overlay::new(config.display.show_overlay),
            textures,
            scale,
            stats: FrameStats::default(),
            last_frame: Instant::now(),
            config,
        }
    }

    /// Advance the simulation by the wall time since the last frame.
    fn step(&mut self) {
        let now = Instant::now();
        let elapsed = now - self.last_frame;
        self.last_frame = now;
        self.stats.record(elapsed);

        let dt = elapsed.as_secs_f32().min(0.1);
        self.sim.advance(dt, &mut self.input.controls());
        for event in self.sim.drain_events() {
            if let SimEvent::WormholeCrossed { frame, galaxy, .. } = event {
                tracing::debug!(frame, "now in {:?} galaxy", galaxy);
            }
        }
    }
}

pub struct App {
    state: ViewerState,
    proxy: EventLoopProxy<UserEvent>,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<WormholeRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    tablet_class: bool,
    #[cfg(target_arch = "wasm32")]
    orientation: crate::web::OrientationQueue,
}

impl App {
    pub fn new(config: AppConfig, textures: TextureSet, proxy: EventLoopProxy<UserEvent>) -> Self {
        Self {
            state: ViewerState::new(config, textures),
            proxy,
            window: None,
            gpu: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
            tablet_class: false,
            #[cfg(target_arch = "wasm32")]
            orientation: crate::web::listen_orientation(),
        }
    }

    fn viewport(&self) -> Option<Viewport> {
        let (width, height) = self.gpu.as_ref()?.size();
        Some(Viewport::new(width, height, self.state.scale))
    }

    fn set_scale(&mut self, scale: ResolutionScale) {
        if scale == self.state.scale {
            return;
        }
        self.state.scale = scale;
        tracing::info!("render resolution {}", scale.label());
        let viewport = self.viewport();
        if let (Some(gpu), Some(renderer), Some(viewport)) =
            (&self.gpu, &mut self.renderer, viewport)
        {
            renderer.resize(&gpu.device, viewport);
        }
    }

    fn command(&mut self, event_loop: &ActiveEventLoop, command: Command) {
        match command {
            Command::ToggleOverlay => self.state.overlay.toggle(),
            Command::Resolution(i) => {
                if let Some(scale) = ResolutionScale::presets().nth(i) {
                    self.set_scale(scale);
                }
            }
            Command::Reset => self.state.sim.reset(),
            Command::Quit => event_loop.exit(),
        }
    }

    #[cfg_attr(target_arch = "wasm32", allow(unused_variables))]
    fn gpu_ready(&mut self, event_loop: &ActiveEventLoop, result: Result<GpuContext, RenderError>) {
        let mut gpu = match result {
            Ok(gpu) => gpu,
            Err(e) => {
                tracing::error!("{e}");
                #[cfg(target_arch = "wasm32")]
                crate::web::show_error(&e.to_string());
                #[cfg(not(target_arch = "wasm32"))]
                event_loop.exit();
                return;
            }
        };
        let Some(window) = self.window.clone() else {
            return;
        };

        // The window may have been resized while the GPU was being set up.
        let size = window.inner_size();
        if (size.width, size.height) != gpu.size() {
            gpu.resize(size.width, size.height);
        }

        let (width, height) = gpu.size();
        let viewport = Viewport::new(width, height, self.state.scale);
        let renderer = WormholeRenderer::new(
            &gpu,
            &self.state.textures,
            &self.state.config.post,
            &self.state.sim,
            viewport,
        );
        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer =
            egui_wgpu::Renderer::new(&gpu.device, gpu.surface_format(), None, 1, false);

        self.gpu = Some(gpu);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);
        self.state.last_frame = Instant::now();
        window.request_redraw();
    }

    fn sync_tablet_class(&mut self) {
        let tablet = self.state.input.tablet_mode();
        if tablet == self.tablet_class {
            return;
        }
        self.tablet_class = tablet;
        #[cfg(target_arch = "wasm32")]
        crate::web::set_tablet_class(tablet);
    }

    fn redraw(&mut self) {
        #[cfg(target_arch = "wasm32")]
        {
            let samples: Vec<_> = self.orientation.borrow_mut().drain(..).collect();
            for sample in &samples {
                self.state.input.orientation(sample);
            }
        }
        self.state.step();
        self.sync_tablet_class();

        let (Some(window), Some(gpu), Some(renderer)) =
            (&self.window, &self.gpu, &mut self.renderer)
        else {
            return;
        };

        let frame = match gpu.acquire() {
            Ok(Some(frame)) => frame,
            Ok(None) => return,
            Err(e) => {
                tracing::error!("{e}");
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        renderer.render(&gpu.device, &gpu.queue, &view, &self.state.sim);

        let (Some(egui_winit), Some(egui_renderer)) =
            (&mut self.egui_winit, &mut self.egui_renderer)
        else {
            frame.present();
            return;
        };

        let overlay_view = OverlayView {
            stats: &self.state.stats,
            galaxy: self.state.sim.galaxy(),
            crossings: self.state.sim.crossing_count(),
            render_size: renderer.render_size(),
            tablet_mode: self.state.input.tablet_mode(),
            drag_to_look: self.state.input.keyboard().drag_to_look(),
        };
        let raw_input = egui_winit.take_egui_input(window);
        let mut response = OverlayResponse::default();
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            response = self.state.overlay.show(ctx, &overlay_view, self.state.scale);
        });
        egui_winit.handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }
        frame.present();

        if let Some(scale) = response.scale {
            self.set_scale(scale);
        }
        if response.reset {
            self.state.sim.reset();
        }
    }
}

impl ApplicationHandler<UserEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        #[allow(unused_mut)]
        let mut attrs = Window::default_attributes()
            .with_title("Wormhole")
            .with_inner_size(PhysicalSize::new(1280u32, 720));

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::WindowAttributesExtWebSys;
            attrs = attrs.with_canvas(crate::web::create_canvas());
        }

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("cannot create window: {e}");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = match instance.create_surface(window.clone()) {
            Ok(surface) => surface,
            Err(e) => {
                self.gpu_ready(event_loop, Err(e.into()));
                return;
            }
        };
        let size = window.inner_size();

        let proxy = self.proxy.clone();
        let init = async move {
            let result = GpuContext::new(&instance, surface, size.width, size.height).await;
            if proxy.send_event(UserEvent::GpuReady(result)).is_err() {
                tracing::error!("event loop closed before the GPU was ready");
            }
        };

        #[cfg(not(target_arch = "wasm32"))]
        pollster::block_on(init);

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(init);
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::GpuReady(result) => self.gpu_ready(event_loop, result),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size.width, size.height);
                }
                let viewport = self.viewport();
                if let (Some(gpu), Some(renderer), Some(viewport)) =
                    (&self.gpu, &mut self.renderer, viewport)
                {
                    renderer.resize(&gpu.device, viewport);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                let pressed = state == ElementState::Pressed;
                if pressed {
                    if let Some(command) = bindings::command_for(key) {
                        self.command(event_loop, command);
                    }
                }
                self.state.input.key(bindings::action_for(key), pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    self.state.input.pointer_moved(
                        position.x as f32,
                        position.y as f32,
                        size.width as f32,
                        size.height as f32,
                    );
                }
            }
            WindowEvent::CursorLeft { .. } => self.state.input.pointer_left(),
            WindowEvent::MouseInput { button, state, .. } => {
                let button = match button {
                    MouseButton::Left => PointerButton::Primary,
                    MouseButton::Right => PointerButton::Secondary,
                    _ => PointerButton::Other,
                };
                self.state
                    .input
                    .pointer_button(button, state == ElementState::Pressed);
            }
            WindowEvent::Touch(touch) => match touch.phase {
                TouchPhase::Started => self.state.input.touch(touch.id, true),
                TouchPhase::Ended | TouchPhase::Cancelled => {
                    self.state.input.touch(touch.id, false)
                }
                TouchPhase::Moved => {}
            },
            WindowEvent::RedrawRequested => {
                self.redraw();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
