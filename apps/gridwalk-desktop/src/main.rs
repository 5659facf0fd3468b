use anyhow::{Context, Result};
use clap::Parser;
use gridwalk_common::{GridConfig, Tuning};
use gridwalk_frame::{FrameLoop, Session};
use gridwalk_input::{Action, InputEvent};
use gridwalk_mesh::TerrainMesh;
use gridwalk_render_wgpu::TerrainRenderer;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

#[derive(Parser)]
#[command(name = "gridwalk-desktop", about = "First-person terrain walker")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Terrain width in cells
    #[arg(long, default_value = "66")]
    width_cells: u32,

    /// Terrain length in cells
    #[arg(long, default_value = "66")]
    length_cells: u32,
}

/// Map a physical key to a held action. The aggregator never sees key codes.
fn map_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::KeyW => Some(Action::MoveForward),
        KeyCode::KeyS => Some(Action::MoveBack),
        KeyCode::KeyA => Some(Action::StrafeLeft),
        KeyCode::KeyD => Some(Action::StrafeRight),
        KeyCode::ArrowUp => Some(Action::LookUp),
        KeyCode::ArrowDown => Some(Action::LookDown),
        KeyCode::ArrowLeft => Some(Action::LookLeft),
        KeyCode::ArrowRight => Some(Action::LookRight),
        _ => None,
    }
}

struct App {
    frame_loop: FrameLoop,
    mesh: TerrainMesh,
    start: Instant,
    captured: bool,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<TerrainRenderer>,
}

impl App {
    fn new(grid: GridConfig) -> Self {
        let mesh = TerrainMesh::build(&grid);
        let session = Session::new(&grid, Tuning::default());
        Self {
            frame_loop: FrameLoop::new(session),
            mesh,
            start: Instant::now(),
            captured: false,
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
        }
    }

    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Grab the cursor and go active. Touch-driven sessions activate the
    /// loop the same way without grabbing.
    fn enter_capture(&mut self, grab: bool) {
        if self.captured {
            return;
        }
        if grab && let Some(window) = &self.window {
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(e) = grabbed {
                tracing::warn!("cursor grab unavailable: {e}");
            }
            window.set_cursor_visible(false);
        }
        self.captured = true;
        self.frame_loop.start(self.now());
    }

    fn leave_capture(&mut self) {
        if !self.captured {
            return;
        }
        if let Some(window) = &self.window {
            let _ = window.set_cursor_grab(CursorGrabMode::None);
            window.set_cursor_visible(true);
        }
        self.captured = false;
        self.frame_loop.stop();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("gridwalk")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("gridwalk_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.frame_loop.session_mut().set_viewport(size.width, size.height);

        let renderer =
            TerrainRenderer::new(&device, surface_format, size.width, size.height, &self.mesh);

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        // Draw the static scene once before the loop goes active.
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Focused(false) => {
                self.leave_capture();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
                // While idle this yields one frame so the static scene
                // picks up the new aspect ratio.
                if self
                    .frame_loop
                    .resize(new_size.width, new_size.height)
                    .is_some()
                    && let Some(window) = &self.window
                {
                    window.request_redraw();
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        ..
                    },
                ..
            } => {
                if key == KeyCode::Escape && state == ElementState::Pressed {
                    self.leave_capture();
                    return;
                }
                if !self.captured {
                    return;
                }
                if let Some(action) = map_key(key) {
                    let event = match state {
                        ElementState::Pressed => InputEvent::ActionPressed(action),
                        ElementState::Released => InputEvent::ActionReleased(action),
                    };
                    self.frame_loop.session_mut().handle_input(event);
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: ElementState::Pressed,
                ..
            } => {
                self.enter_capture(true);
            }
            WindowEvent::Touch(touch) => {
                let (x, y) = (touch.location.x as f32, touch.location.y as f32);
                let event = match touch.phase {
                    TouchPhase::Started => {
                        self.enter_capture(false);
                        InputEvent::TouchStart { id: touch.id, x, y }
                    }
                    TouchPhase::Moved => InputEvent::TouchMove { id: touch.id, x, y },
                    TouchPhase::Ended => InputEvent::TouchEnd { id: touch.id },
                    TouchPhase::Cancelled => InputEvent::TouchCancel { id: touch.id },
                };
                if self.captured {
                    self.frame_loop.session_mut().handle_input(event);
                }
            }
            WindowEvent::RedrawRequested => {
                let (Some(surface), Some(device), Some(queue)) =
                    (&self.surface, &self.device, &self.queue)
                else {
                    return;
                };

                // Tick while active; when idle (startup, resize) draw the
                // static scene as-is.
                let view_projection = match self.frame_loop.tick(self.now()) {
                    Some(frame) => frame.view_projection,
                    None => self.frame_loop.session().view_projection(),
                };

                let output = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let Some(config) = &self.config {
                            surface.configure(device, config);
                        }
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

                if let Some(renderer) = &self.renderer {
                    renderer.render(device, queue, &view, view_projection);
                }

                output.present();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event
            && self.captured
        {
            self.frame_loop.session_mut().handle_input(InputEvent::PointerDelta {
                dx: delta.0 as f32,
                dy: delta.1 as f32,
            });
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Reschedule only while active; an idle scene redraws on demand.
        if self.frame_loop.is_active()
            && let Some(window) = &self.window
        {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let grid = GridConfig::new(cli.width_cells, cli.length_cells);
    grid.validate().context("invalid grid configuration")?;

    tracing::info!(
        width = grid.width_cells,
        length = grid.length_cells,
        "gridwalk-desktop starting"
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(grid);
    event_loop.run_app(&mut app)?;

    Ok(())
}
