use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

mod config;
mod geometry;
mod logging;
mod renderer;
mod scene;
mod ui;

use config::{AppConfig, Cli};
use logging::{LoggingConfig, init_logging};
use renderer::gpu::GpuMesh;
use renderer::{FrameRecorder, GpuState};
use scene::{DemoKind, FrameStats, MeshSet, demo, draw_frame};
use ui::{PanelStats, UiActions, UiState, apply_theme, draw_side_panel};

struct App {
    config: AppConfig,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    meshes: Option<MeshSet<Rc<GpuMesh>>>,
    egui_state: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    egui_ctx: egui::Context,

    ui_state: UiState,
    last_vsync_state: bool,
    last_demo: DemoKind,

    clock: f32,
    last_frame: Instant,
    frame_count: u32,
    fps_timer: Instant,
    fps: f32,
    frame_stats: FrameStats,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let ui_state = UiState::from(&config);
        Self {
            window: None,
            gpu: None,
            meshes: None,
            egui_state: None,
            egui_renderer: None,
            egui_ctx: egui::Context::default(),

            last_vsync_state: config.vsync,
            last_demo: config.demo,
            ui_state,
            config,

            clock: 0.0,
            last_frame: Instant::now(),
            frame_count: 0,
            fps_timer: Instant::now(),
            fps: 0.0,
            frame_stats: FrameStats::default(),
        }
    }

    fn init_gpu(&mut self, window: Arc<Window>) -> Result<()> {
        let mut gpu = pollster::block_on(GpuState::new(window.clone()))?;
        gpu.set_vsync(self.config.vsync);

        let meshes = MeshSet::upload(&mut gpu, self.ui_state.segments);

        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            self.egui_ctx.viewport_id(),
            &window,
            Some(window.scale_factor() as f32),
            None,
            Some(2048),
        );

        let egui_renderer =
            egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, None, 1, false);

        apply_theme(&self.egui_ctx);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.meshes = Some(meshes);
        self.egui_state = Some(egui_state);
        self.egui_renderer = Some(egui_renderer);
        Ok(())
    }

    fn update(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        if !self.ui_state.paused {
            self.clock += dt;
        }

        self.frame_count += 1;
        let elapsed = self.fps_timer.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            self.fps = self.frame_count as f32 / elapsed;
            self.frame_count = 0;
            self.fps_timer = Instant::now();
        }
    }

    fn handle_ui_actions(&mut self, actions: UiActions) {
        if actions.reset_clock {
            self.clock = 0.0;
        }

        if self.ui_state.demo != self.last_demo {
            log::info!("switching to {} demo", demo(self.ui_state.demo).name);
            self.last_demo = self.ui_state.demo;
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        match key {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::Space => self.ui_state.paused = !self.ui_state.paused,
            KeyCode::Digit1 => self.ui_state.demo = DemoKind::Robot,
            KeyCode::Digit2 => self.ui_state.demo = DemoKind::Phong,
            KeyCode::Digit3 => self.ui_state.demo = DemoKind::Shapes,
            _ => {}
        }
    }

    fn render(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(egui_state)) = (&self.window, &mut self.egui_state) else {
            return;
        };

        let raw_input = egui_state.take_egui_input(window);

        let stats = PanelStats {
            fps: self.fps,
            frame: self.frame_stats,
            time: self.clock,
        };

        let mut ui_actions = UiActions::default();
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            ui_actions = draw_side_panel(ctx, &mut self.ui_state, &stats);
        });

        self.handle_ui_actions(ui_actions);

        let Some(gpu) = &mut self.gpu else { return };
        let Some(meshes) = &mut self.meshes else { return };
        let Some(window) = &self.window else { return };
        let Some(egui_state) = &mut self.egui_state else {
            return;
        };
        let Some(egui_renderer) = &mut self.egui_renderer else {
            return;
        };

        egui_state.handle_platform_output(window, full_output.platform_output);

        if self.ui_state.vsync_enabled != self.last_vsync_state {
            gpu.set_vsync(self.ui_state.vsync_enabled);
            self.last_vsync_state = self.ui_state.vsync_enabled;
        }

        meshes.rebuild_cylinder(gpu, self.ui_state.segments);

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.resize(gpu.size);
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of GPU memory");
                event_loop.exit();
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timeout, skipping frame");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let aspect = gpu.aspect();
        match draw_frame(gpu, demo(self.ui_state.demo), meshes, aspect, self.clock) {
            Ok(frame_stats) => self.frame_stats = frame_stats,
            Err(err) => {
                log::error!("failed to draw {:?}: {err}", self.ui_state.demo);
                event_loop.exit();
                return;
            }
        }

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, delta) in full_output.textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, id, &delta);
        }

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Main Encoder"),
            });

        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        gpu.render_scene(&view, &mut encoder);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in full_output.textures_delta.free {
            egui_renderer.free_texture(&id);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Shapes 3D")
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        if let Err(err) = self.init_gpu(window) {
            log::error!("failed to initialise renderer: {err:#}");
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(egui_state) = &mut self.egui_state {
            if let Some(window) = &self.window {
                let response = egui_state.on_window_event(window, &event);
                if response.consumed {
                    return;
                }
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let (PhysicalKey::Code(key), ElementState::Pressed) =
                    (event.physical_key, event.state)
                {
                    self.handle_key(event_loop, key);
                }
            }

            WindowEvent::RedrawRequested => {
                self.update();
                self.render(event_loop);
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

/// Records a single frame at time zero against the in-memory context and logs it.
fn dump_frame(config: &AppConfig) -> Result<()> {
    let mut recorder = FrameRecorder::new();
    let meshes = MeshSet::upload(&mut recorder, config.segments);
    let stats = draw_frame(
        &mut recorder,
        demo(config.demo),
        &meshes,
        config.aspect(),
        0.0,
    )?;
    recorder.log_frame();
    log::info!(
        "{:?}: {} draw calls, {} triangles",
        config.demo,
        stats.draw_calls,
        stats.triangles
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig {
        filter: cli.log_filter.clone(),
    });
    let config = AppConfig::from(&cli);

    if config.dump_frame {
        return dump_frame(&config);
    }

    log::info!(
        "starting {:?} demo at {}x{}",
        config.demo,
        config.width,
        config.height
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
