//! Main application handler owning the event loop

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::KeyCode;
use winit::window::WindowId;

use super::controls::CameraController;
use super::frame::{FrameClock, FrameLimit, FramePacer, FrameStats};
use super::graphics::GraphicsContext;
use super::input::{InputCollector, KeyboardState};
use super::lifecycle::{LifecycleState, LoopControl, ShutdownReason};
use super::window::{stats_title, window_attributes_with_icon};
use crate::camera::FlyCamera;
use crate::config::AppConfig;
use crate::error::{BootstrapError, ContextError};
use crate::platform::Platform;

/// Bootstrapper: owns the window, the rendering context and the main loop
pub struct App {
    config: AppConfig,
    platform: Platform,
    control: LoopControl,
    context: Option<GraphicsContext>,
    input: InputCollector,
    controller: CameraController,
    camera: FlyCamera,
    clock: FrameClock,
    stats: FrameStats,
    pacer: FramePacer,
    frame_limit: FrameLimit,
    fatal: Option<BootstrapError>,
}

impl App {
    /// Creates the application for an already resolved platform
    pub fn new(config: AppConfig, platform: Platform) -> Self {
        info!(profile = %config.profile, %platform, "Starting CubeGl");
        info!(window = ?config.window, "Window configuration");

        let camera = FlyCamera::from_config(
            &config.camera,
            config.window.width as u32,
            config.window.height as u32,
        );

        Self {
            controller: CameraController::from_config(&config.camera),
            camera,
            clock: FrameClock::new(config.frame.max_delta_secs),
            stats: FrameStats::new(config.frame.stats_interval_secs),
            pacer: FramePacer::new(config.frame.target_fps),
            config,
            platform,
            control: LoopControl::new(),
            context: None,
            input: InputCollector::new(),
            frame_limit: FrameLimit::default(),
            fatal: None,
        }
    }

    /// Requests a cooperative shutdown once `frames` frames have been presented
    pub fn with_max_frames(mut self, frames: Option<u64>) -> Self {
        self.frame_limit = FrameLimit::new(frames);
        self
    }

    /// Resolves the host platform, then runs the main loop until shutdown
    ///
    /// An unsupported platform fails before any native resource is acquired.
    pub fn run(config: AppConfig, max_frames: Option<u64>) -> Result<(), BootstrapError> {
        let platform = Platform::resolve(config.platform.os_name.as_deref())?;
        info!(
            %platform,
            native_bundle = platform.native_bundle(),
            "Selected native bundle"
        );

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(config, platform).with_max_frames(max_frames);
        event_loop.run_app(&mut app)?;

        app.finish()
    }

    /// Returns the fatal error that ended the loop, if any
    pub fn finish(mut self) -> Result<(), BootstrapError> {
        // The loop can also end without `exiting` (e.g. startup abort)
        self.release_context();

        match self.fatal.take() {
            Some(err) => Err(err),
            None => {
                info!(
                    reason = ?self.control.lifecycle().shutdown_reason(),
                    frames = self.frame_limit.presented(),
                    "Shut down cleanly"
                );
                Ok(())
            }
        }
    }

    pub fn lifecycle_state(&self) -> LifecycleState {
        self.control.state()
    }

    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    /// Flags the loop for shutdown; the first reason wins
    pub fn request_close(&mut self, reason: ShutdownReason) {
        self.control.request_close(reason);
    }

    pub fn pending_close(&self) -> Option<&ShutdownReason> {
        self.control.pending_close()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: BootstrapError) {
        error!(error = %err, "Fatal error");
        self.control.fail(err.to_string());

        self.fatal.get_or_insert(err);
        self.release_context();
        event_loop.exit();
    }

    fn release_context(&mut self) {
        self.context = None;
    }

    fn startup(&mut self, event_loop: &ActiveEventLoop) -> Result<(), BootstrapError> {
        let attributes = window_attributes_with_icon(&self.config.window)?;
        let window = Arc::new(event_loop.create_window(attributes)?);

        let size = window.inner_size();
        info!(
            window.width = size.width,
            window.height = size.height,
            "Window created successfully"
        );

        // winit's event loop is synchronous; wgpu setup is async
        let runtime = tokio::runtime::Runtime::new().map_err(ContextError::from)?;
        let context = runtime.block_on(GraphicsContext::new(
            window.clone(),
            &self.config.graphics,
            self.config.window.vsync,
            self.platform,
        ))?;

        let size = context.size();
        self.camera.set_viewport(size.width, size.height);
        window.set_visible(true);

        self.context = Some(context);
        self.control.start()?;
        info!("Graphics context ready, entering main loop");
        Ok(())
    }

    fn render(&mut self, event_loop: &ActiveEventLoop) {
        let Some(context) = self.context.as_mut() else {
            return;
        };

        match context.render_clear() {
            Ok(()) => {
                if self.frame_limit.record_presented() {
                    self.request_close(ShutdownReason::FrameLimitReached);
                }
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost, reconfiguring");
                context.reconfigure();
            }
            Err(wgpu::SurfaceError::Timeout) => {
                debug!("Surface timeout, skipping frame");
            }
            Err(e @ wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, e.into());
            }
            Err(e) => {
                error!(error = %e, "Render error");
            }
        }
    }

    fn update_frame(&mut self, now: Instant) {
        let time = self.clock.tick(now);
        self.pacer.frame_started(now);

        if self
            .controller
            .apply(&self.input.state().keyboard, time.delta, &mut self.camera)
        {
            debug!(position = ?self.camera.position(), yaw = self.camera.yaw(), "Camera moved");
        }

        // Edges have been consumed for this frame
        self.input.advance_frame();

        if let Some(fps) = self.stats.record(now) {
            debug!(fps, frame = time.frame, "Frame stats");
            if self.config.window.show_stats_in_title
                && let Some(context) = &self.context
            {
                let title = stats_title(
                    &self.config.window.title,
                    fps,
                    self.camera.position().to_array(),
                );
                context.window().set_title(&title);
            }
        }
    }
}

/// Close request carried by a window event, if any
///
/// Must run after the event has reached the input collector.
fn close_reason(event: &WindowEvent, keyboard: &KeyboardState) -> Option<ShutdownReason> {
    match event {
        WindowEvent::CloseRequested => Some(ShutdownReason::CloseRequested),
        WindowEvent::KeyboardInput { .. } => escape_reason(keyboard),
        _ => None,
    }
}

fn escape_reason(keyboard: &KeyboardState) -> Option<ShutdownReason> {
    keyboard
        .is_just_pressed(KeyCode::Escape)
        .then_some(ShutdownReason::EscapePressed)
}

impl ApplicationHandler for App {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, _cause: StartCause) {
        if let Some(reason) = self.control.begin_iteration() {
            info!(?reason, "Shutting down");
            self.release_context();
            event_loop.exit();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.control.state() != LifecycleState::Uninitialized {
            return;
        }

        if let Err(err) = self.startup(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.control.is_running() || self.control.pending_close().is_some() {
            return;
        }

        if self.frame_limit.is_reached() {
            self.request_close(ShutdownReason::FrameLimitReached);
            return;
        }

        let now = Instant::now();
        if !self.pacer.is_due(now) {
            if let Some(deadline) = self.pacer.next_deadline() {
                event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
            return;
        }

        self.update_frame(now);

        match self.pacer.next_deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Poll),
        }

        if let Some(context) = &self.context {
            context.window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.input.handle_window_event(&event);

        if let Some(reason) = close_reason(&event, &self.input.state().keyboard) {
            self.request_close(reason);
        }

        match event {
            WindowEvent::Resized(new_size) => {
                if let Some(context) = &mut self.context {
                    context.resize(new_size);
                    self.camera.set_viewport(new_size.width, new_size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                if self.control.is_running() {
                    self.render(event_loop);
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.release_context();
        self.control.exit();

        info!(state = ?self.control.state(), "Event loop exiting");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_close_maps_to_close_requested() {
        let keyboard = KeyboardState::default();
        assert_eq!(
            close_reason(&WindowEvent::CloseRequested, &keyboard),
            Some(ShutdownReason::CloseRequested)
        );
        assert_eq!(close_reason(&WindowEvent::Focused(true), &keyboard), None);
    }

    #[test]
    fn test_escape_press_maps_to_escape_pressed() {
        let mut keyboard = KeyboardState::default();
        assert_eq!(escape_reason(&keyboard), None);

        keyboard.press(KeyCode::Escape);
        assert_eq!(
            escape_reason(&keyboard),
            Some(ShutdownReason::EscapePressed)
        );

        let mut other = KeyboardState::default();
        other.press(KeyCode::KeyW);
        assert_eq!(escape_reason(&other), None);
    }

    #[test]
    fn test_escape_ignored_outside_keyboard_events() {
        let mut keyboard = KeyboardState::default();
        keyboard.press(KeyCode::Escape);
        assert_eq!(close_reason(&WindowEvent::Focused(false), &keyboard), None);
    }

    #[test]
    fn test_new_app_is_uninitialized_and_keeps_first_close() {
        let mut app = App::new(AppConfig::default(), Platform::Linux).with_max_frames(Some(1));
        assert_eq!(app.lifecycle_state(), LifecycleState::Uninitialized);
        assert!(app.pending_close().is_none());

        app.request_close(ShutdownReason::EscapePressed);
        app.request_close(ShutdownReason::CloseRequested);
        assert_eq!(app.pending_close(), Some(&ShutdownReason::EscapePressed));

        // Nothing ran, so finishing is clean
        assert!(app.finish().is_ok());
    }
}
