//! Marbles - interactive physics demo
//!
//! A floor, some marbles, and a camera you can fly around. Click a marble to
//! pick it up, Space to throw it, Enter to respawn the oldest thrown marble.

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use marbles::config::AppConfig;
use marbles::stage::Stage;
use marbles::systems::{RenderSystem, SimulationSystem, WindowSystem};
use marbles_core::Vec3;
use marbles_input::{CameraController, InputAction, InputMapper, Pointer};
use marbles_render::{Camera, RenderError};

/// Main application state
struct App {
    config: AppConfig,
    stage: Stage,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    simulation: SimulationSystem,
    camera: Camera,
    controller: CameraController,
    pointer: Pointer,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let camera = Camera::looking_at(
            Vec3::from_array(config.camera.start_position),
            Vec3::from_array(config.camera.look_at),
        )
        .with_projection(config.camera.fov, config.camera.near, config.camera.far);

        let controller = CameraController::new()
            .with_move_speed(config.input.move_speed)
            .with_mouse_sensitivity(config.input.mouse_sensitivity)
            .with_smoothing_half_life(config.input.smoothing_half_life)
            .with_smoothing(config.input.smoothing_enabled);

        let pointer = Pointer::new(config.window.width, config.window.height);

        Self {
            config,
            stage: Stage::Loading,
            window: None,
            render: None,
            simulation: SimulationSystem::new(),
            camera,
            controller,
            pointer,
        }
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Select | InputAction::Throw | InputAction::Respawn => {
                self.stage.dispatch(action, &self.camera, self.pointer.ndc());
            }
            InputAction::ResetCamera => {
                self.camera.reset();
                log::info!("Camera reset to starting position");
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::ToggleSmoothing => {
                let enabled = self.controller.toggle_smoothing();
                log::info!("Input smoothing: {}", if enabled { "ON" } else { "OFF" });
            }
            InputAction::Exit => event_loop.exit(),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        // 1. Camera, carry, one physics step, transform sync
        self.simulation
            .update(&mut self.camera, &mut self.controller, self.stage.running_mut());

        if self.config.debug.show_position_in_title {
            if let Some(window) = &self.window {
                window.update_title(self.camera.position, self.stage.status());
            }
        }

        // 2. Render whatever scene the stage has
        if let (Some(render), Some(scene)) = (&mut self.render, self.stage.scene()) {
            match render.render_frame(scene, &self.camera) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => {
                    log::warn!("Surface lost, reconfiguring");
                    render.reconfigure();
                }
                Err(RenderError::OutOfMemory) => {
                    log::error!("GPU out of memory, exiting");
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        // 3. Uniforms are uploaded; the next frame starts clean
        self.stage.clear_dirty();

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let render = match RenderSystem::new(window.window().clone(), self.config.window.vsync) {
            Ok(render) => render,
            Err(e) => {
                log::error!("Failed to initialise rendering: {}", e);
                event_loop.exit();
                return;
            }
        };

        let (width, height) = render.size();
        self.camera.set_aspect(render.aspect_ratio());
        self.pointer.resize(width, height);

        self.stage = Stage::init(&self.config);
        self.window = Some(window);
        self.render = Some(render);

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render {
                    render.resize(physical_size.width, physical_size.height);
                }
                self.camera.resize(physical_size.width, physical_size.height);
                self.pointer.resize(physical_size.width, physical_size.height);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, event.state, event.repeat) {
                        self.handle_action(action, event_loop);
                    }
                    // Movement keys go straight to the controller
                    self.controller.process_keyboard(key, event.state);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.pointer.moved(position.x, position.y);
            }

            WindowEvent::CursorLeft { .. } => {
                self.pointer.left();
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(action) = InputMapper::map_mouse_button(button, state) {
                    self.handle_action(action, event_loop);
                }
                self.controller.process_mouse_button(button, state);
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.controller.process_mouse_motion(delta.0, delta.1);
        }
    }
}

fn main() {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // RUST_LOG wins; debug.log_level is the fallback filter
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting Marbles");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app).expect("Event loop error");
}
