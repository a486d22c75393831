use anyhow::{Context, Result};
use clap::Parser;
use egui::Context as EguiContext;
use std::sync::Arc;
use tetraview_common::Key;
use tetraview_input::{self as input, Action, KeyAction, Modifiers};
use tetraview_kernel::{Scene, SceneConfig, VertexAnimator};
use tetraview_render::{Projection, submit_frame};
use tetraview_render_wgpu::{GpuContext, WgpuRenderer};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(
    name = "tetraview-desktop",
    about = "Spinning tetrahedron. Arrows move the camera, shift+arrows turn it, F1 shows state"
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initial window width in pixels
    #[arg(long, default_value_t = 200)]
    width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = 200)]
    height: u32,

    /// Mesh spin in radians per frame
    #[arg(long, default_value_t = VertexAnimator::DEFAULT_ANGLE)]
    spin: f64,

    /// Camera step per key press (units, and radians when turning)
    #[arg(long, default_value_t = 0.1)]
    camera_speed: f32,

    /// Keep the camera direction at unit length after each turn
    #[arg(long)]
    renormalize: bool,

    /// Show the state overlay at startup
    #[arg(long)]
    overlay: bool,
}

impl Cli {
    fn scene_config(&self) -> SceneConfig {
        SceneConfig {
            camera_speed: self.camera_speed,
            spin_per_frame: self.spin,
            renormalize: self.renormalize,
        }
    }
}

/// Arrow keys map to their `Key`; winit exposes no stable integer for the
/// rest, so they all become `Key::Other(0)`.
fn key_from_code(code: KeyCode) -> Key {
    match code {
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        _ => Key::Other(0),
    }
}

fn key_action(state: ElementState, repeat: bool) -> KeyAction {
    match (state, repeat) {
        (ElementState::Released, _) => KeyAction::Release,
        (ElementState::Pressed, true) => KeyAction::Repeat,
        (ElementState::Pressed, false) => KeyAction::Press,
    }
}

fn modifiers_from_state(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        control: state.control_key(),
        alt: state.alt_key(),
        super_key: state.super_key(),
    }
}

/// Application state.
struct AppState {
    scene: Scene,
    projection: Projection,
    modifiers: Modifiers,
    show_overlay: bool,
}

impl AppState {
    fn new(config: SceneConfig, show_overlay: bool) -> Self {
        Self {
            scene: Scene::new(config),
            projection: Projection::default(),
            modifiers: Modifiers::NONE,
            show_overlay,
        }
    }

    fn handle_key(&mut self, event: input::KeyEvent) {
        match input::map_key_event(&event) {
            Action::Camera { key, modifier } => {
                self.scene.handle_key(key, modifier);
            }
            Action::Noop => {}
        }
    }

    /// Spin the mesh one frame. Desktop sessions are never replayed, so the
    /// event log is emptied every frame.
    fn advance(&mut self) {
        self.scene.step();
        self.scene.drain_events();
    }

    fn draw_ui(&self, ctx: &EguiContext) {
        let camera = self.scene.camera();
        egui::Window::new("tetraview")
            .default_pos([4.0, 4.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Frame: {}", self.scene.frame()));
                ui.label(format!(
                    "Position: ({:.2}, {:.2}, {:.2})",
                    camera.position.x, camera.position.y, camera.position.z
                ));
                ui.label(format!(
                    "Front: ({:.2}, {:.2}, {:.2}) |{:.3}|",
                    camera.front.x,
                    camera.front.y,
                    camera.front.z,
                    camera.front.length()
                ));
                ui.separator();
                ui.small("Arrows: Move | Shift+Arrows: Turn | F1: Hide");
            });
    }
}

/// Everything that exists only while a window is open.
struct Graphics {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Graphics {
    fn new(event_loop: &ActiveEventLoop, size: PhysicalSize<u32>, egui_ctx: &EguiContext) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("tetraview")
            .with_inner_size(size)
            .with_resizable(true);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let size = window.inner_size();
        let gpu = GpuContext::new(window.clone(), size.width, size.height)
            .context("failed to initialize GPU")?;
        let renderer = WgpuRenderer::new(&gpu.device, gpu.format(), size.width, size.height);

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.format(), None, 1, false);

        Ok(Self {
            window,
            gpu,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.gpu.resize(size.width, size.height);
        let (width, height) = self.gpu.size();
        self.renderer.resize(&self.gpu.device, width, height);
    }

    fn paint_overlay(&mut self, ctx: &EguiContext, view: &wgpu::TextureView, state: &AppState) {
        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = ctx.run(raw_input, |ctx| {
            state.draw_ui(ctx);
        });
        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let (width, height) = self.gpu.size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let device = &self.gpu.device;
        let queue = &self.gpu.queue;
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui_encoder"),
        });
        self.egui_renderer.update_buffers(
            device,
            queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
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
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

struct App {
    state: AppState,
    initial_size: PhysicalSize<u32>,
    graphics: Option<Graphics>,
    egui_ctx: EguiContext,
    /// Set when window or GPU setup fails; returned from `main`.
    fatal: Option<anyhow::Error>,
}

impl App {
    fn new(cli: &Cli) -> Self {
        Self {
            state: AppState::new(cli.scene_config(), cli.overlay),
            initial_size: PhysicalSize::new(cli.width.max(1), cli.height.max(1)),
            graphics: None,
            egui_ctx: EguiContext::default(),
            fatal: None,
        }
    }

    fn redraw(&mut self) {
        let Some(g) = self.graphics.as_mut() else {
            return;
        };

        let output = match g.gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                g.gpu.reconfigure();
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        self.state.advance();

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut frame = g.renderer.frame(&g.gpu.device, &g.gpu.queue, &view);
        if let Err(e) = submit_frame(&mut frame, &self.state.scene, &self.state.projection) {
            tracing::error!("frame rejected: {e}");
        }

        if self.state.show_overlay {
            g.paint_overlay(&self.egui_ctx, &view, &self.state);
        }

        output.present();
        g.window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }

        match Graphics::new(event_loop, self.initial_size, &self.egui_ctx) {
            Ok(graphics) => self.graphics = Some(graphics),
            Err(e) => {
                tracing::error!("{e:#}");
                self.fatal = Some(e);
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
        if let Some(g) = &mut self.graphics {
            if self.state.show_overlay {
                let response = g.egui_winit.on_window_event(&g.window, &event);
                if response.consumed {
                    return;
                }
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(g) = &mut self.graphics {
                    g.resize(new_size);
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.state.modifiers = modifiers_from_state(modifiers.state());
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        repeat,
                        ..
                    },
                ..
            } => {
                if code == KeyCode::F1 && key_state == ElementState::Pressed && !repeat {
                    self.state.show_overlay = !self.state.show_overlay;
                    return;
                }
                self.state.handle_key(input::KeyEvent {
                    key: key_from_code(code),
                    action: key_action(key_state, repeat),
                    modifiers: self.state.modifiers,
                });
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(g) = &self.graphics {
            g.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("tetraview-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(&cli);
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_codes_map_to_keys() {
        assert_eq!(key_from_code(KeyCode::ArrowLeft), Key::Left);
        assert_eq!(key_from_code(KeyCode::ArrowDown), Key::Down);
        assert_eq!(key_from_code(KeyCode::KeyW), Key::Other(0));
    }

    #[test]
    fn held_keys_repeat() {
        assert_eq!(key_action(ElementState::Pressed, false), KeyAction::Press);
        assert_eq!(key_action(ElementState::Pressed, true), KeyAction::Repeat);
        assert_eq!(key_action(ElementState::Released, true), KeyAction::Release);
    }

    #[test]
    fn modifier_state_converts() {
        assert_eq!(modifiers_from_state(ModifiersState::SHIFT), Modifiers::SHIFT);
        let m = modifiers_from_state(ModifiersState::SHIFT | ModifiersState::CONTROL);
        assert!(m.shift && m.control && !m.is_shift_only());
    }

    #[test]
    fn shift_arrow_turns_camera() {
        let mut state = AppState::new(SceneConfig::default(), false);
        let before = state.scene.camera().front;
        state.modifiers = Modifiers::SHIFT;
        state.handle_key(input::KeyEvent::press(Key::Left, state.modifiers));
        assert_ne!(state.scene.camera().front, before);
        assert_eq!(state.scene.camera().position, Scene::default().camera().position);
    }

    #[test]
    fn event_log_stays_empty_across_frames() {
        let mut state = AppState::new(SceneConfig::default(), false);
        for i in 0..10_000 {
            if i % 100 == 0 {
                state.handle_key(input::KeyEvent::press(Key::Up, Modifiers::NONE));
            }
            state.advance();
            assert!(state.scene.events().is_empty());
        }
        assert_eq!(state.scene.frame(), 10_000);
    }

    #[test]
    fn advance_steps_exactly_one_frame() {
        let mut state = AppState::new(SceneConfig::default(), false);
        let mut expected = Scene::default();
        state.advance();
        expected.step();
        assert_eq!(state.scene.frame(), 1);
        assert_eq!(state.scene.mesh(), expected.mesh());
    }

    #[test]
    fn cli_defaults_match_scene_defaults() {
        let cli = Cli::parse_from(["tetraview-desktop"]);
        assert_eq!(cli.scene_config(), SceneConfig::default());
        assert_eq!((cli.width, cli.height), (200, 200));
    }
}
