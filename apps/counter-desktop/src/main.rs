use anyhow::{Context, Result};
use clap::Parser;
use counter_common::Command;
use counter_input::InputMap;
use counter_kernel::Counter;
use counter_render::{Page, render};
use counter_tools::CounterInspector;
use egui::Context as EguiContext;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "counter-desktop", about = "Counter desktop application")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initial window width in physical pixels
    #[arg(long, default_value = "480")]
    width: u32,

    /// Initial window height in physical pixels
    #[arg(long, default_value = "320")]
    height: u32,

    /// Show the inspector panel on start (toggle with F1)
    #[arg(long)]
    inspector: bool,
}

/// Events kept for the inspector's recent list. The log is trimmed back to
/// this size once it grows to twice as many.
const EVENT_LOG_CAP: usize = 256;

/// Application state. Owns the counter for the lifetime of the run loop.
struct AppState {
    counter: Counter,
    keys: InputMap,
    show_inspector: bool,
}

impl AppState {
    fn new(show_inspector: bool) -> Self {
        Self {
            counter: Counter::new(),
            keys: InputMap::default(),
            show_inspector,
        }
    }

    fn dispatch(&mut self, command: Command) {
        let state = self.counter.dispatch(command);
        tracing::info!(%command, count = %state.count, "update");
        if self.counter.events().len() >= 2 * EVENT_LOG_CAP {
            let dropped = self.counter.trim_events(EVENT_LOG_CAP);
            tracing::debug!(dropped, "trimmed event log");
        }
    }

    /// Returns true if the key changed anything that needs a redraw.
    fn handle_key(&mut self, event: &KeyEvent) -> bool {
        if event.state != ElementState::Pressed || event.repeat {
            return false;
        }

        if event.physical_key == PhysicalKey::Code(KeyCode::F1) {
            self.show_inspector = !self.show_inspector;
            return true;
        }

        if let Key::Character(text) = &event.logical_key {
            if let Some(command) = self.keys.resolve_text(text.as_str()) {
                self.dispatch(command);
                return true;
            }
        }
        false
    }

    /// Lay out the page. Returns each control's command and response,
    /// left to right.
    fn draw_ui(&self, ctx: &EguiContext) -> Vec<(Command, egui::Response)> {
        let page = render(self.counter.state());
        let mut controls = Vec::new();

        if self.show_inspector {
            self.draw_inspector(ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);
                ui.heading(&page.heading);
                ui.add_space(8.0);
                ui.label(egui::RichText::new(&page.count_text).size(48.0).strong());
                ui.add_space(8.0);
                controls = draw_controls(ui, &page);
                ui.add_space(12.0);
                ui.label(&page.footer);
            });
        });

        controls
    }

    fn draw_inspector(&self, ctx: &EguiContext) {
        let summary = CounterInspector::summary(&self.counter);

        egui::SidePanel::right("inspector")
            .default_width(180.0)
            .show(ctx, |ui| {
                ui.heading("Inspector");
                ui.separator();
                ui.label(format!("Count: {}", summary.count));
                ui.label(format!("Dispatched: {}", summary.dispatched));
                ui.label(format!(
                    "+{}  -{}  reset {}",
                    summary.increments, summary.decrements, summary.resets
                ));
                ui.separator();
                ui.label("Recent:");
                for command in CounterInspector::recent_commands(&self.counter, 8)
                    .iter()
                    .rev()
                {
                    ui.monospace(command.name());
                }
                ui.separator();
                ui.small("F1: Toggle Inspector | + - r: Keys");
            });
    }
}

/// Commands whose controls were clicked, in left-to-right order.
fn clicked(controls: &[(Command, egui::Response)]) -> Vec<Command> {
    controls
        .iter()
        .filter(|(_, response)| response.clicked())
        .map(|(command, _)| *command)
        .collect()
}

fn draw_controls(ui: &mut egui::Ui, page: &Page) -> Vec<(Command, egui::Response)> {
    // Center the row: horizontal layouts inside vertical_centered start at the left edge.
    let button_size = egui::vec2(64.0, 32.0);
    let spacing = ui.spacing().item_spacing.x;
    let n = page.controls.len() as f32;
    let row_width = n * button_size.x + (n - 1.0).max(0.0) * spacing;
    let pad = ((ui.available_width() - row_width) / 2.0).max(0.0);

    ui.horizontal(|ui| {
        ui.add_space(pad);
        page.controls
            .iter()
            .map(|control| {
                let button = egui::Button::new(&control.label).min_size(button_size);
                (control.command, ui.add(button))
            })
            .collect::<Vec<_>>()
    })
    .inner
}

/// Window and GPU resources, created once the event loop resumes.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, ctx: &EguiContext, size: PhysicalSize<u32>) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("Elm Counter App")
            .with_inner_size(size);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible graphics adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("counter_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("failed to create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let egui_winit = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.config.width = new_size.width.max(1);
        self.config.height = new_size.height.max(1);
        self.surface.configure(&self.device, &self.config);
    }
}

struct GpuApp {
    state: AppState,
    initial_size: PhysicalSize<u32>,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    startup_error: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(cli: &Cli) -> Self {
        Self {
            state: AppState::new(cli.inspector),
            initial_size: PhysicalSize::new(cli.width, cli.height),
            gpu: None,
            egui_ctx: EguiContext::default(),
            startup_error: None,
        }
    }

    fn request_redraw(&self) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }

    /// Draw one frame, then apply any commands clicked during it.
    fn redraw(&mut self) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                gpu.window.request_redraw();
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let mut clicked_now = Vec::new();
        let state = &self.state;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            clicked_now = clicked(&state.draw_ui(ctx));
        });

        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        gpu.egui_renderer.update_buffers(
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
                            load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }
        output.present();

        let repaint_now = full_output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .is_some_and(|v| v.repaint_delay.is_zero());

        // Commands are applied after the frame that produced them, then the
        // page is redrawn before the next input is handled.
        let dispatched = !clicked_now.is_empty();
        for command in clicked_now {
            self.state.dispatch(command);
        }
        if dispatched || repaint_now {
            self.request_redraw();
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match Gpu::new(event_loop, &self.egui_ctx, self.initial_size) {
            Ok(gpu) => {
                gpu.window.request_redraw();
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("startup failed: {e:#}");
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
        if response.repaint {
            gpu.window.request_redraw();
        }
        if response.consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("{}", CounterInspector::summary(&self.state.counter));
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                gpu.resize(new_size);
                gpu.window.request_redraw();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if self.state.handle_key(&event) {
                    self.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("counter-desktop starting");

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = GpuApp::new(&cli);
    event_loop.run_app(&mut app)?;

    match app.startup_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
