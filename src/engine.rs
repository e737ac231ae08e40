//! Core rendering engine.
//!
//! The [`Engine`] owns everything one window needs: the framebuffer, the
//! scene, the camera, input state, the event bus and the frame clock. The
//! host loop feeds it events, then calls [`Engine::update`] and
//! [`Engine::render`] once per frame and presents [`Engine::frame_buffer`].

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use crate::camera::Camera;
use crate::clock::Clock;
use crate::config::Config;
use crate::error::EngineError;
use crate::events::{Event, EventBus, EventKind, Key, SubscriptionHandle};
use crate::input::InputState;
use crate::render::{FrameBuffer, RenderStats, Renderer3D, Surface, NDC_EYE};
use crate::scene::Scene;

/// State reachable from event subscribers.
pub struct EngineState {
    pub camera: Camera,
    pub input: InputState,
    running: bool,
    screenshot_requested: bool,
}

pub struct Engine {
    state: EngineState,
    bus: EventBus<EngineState>,
    subscriptions: Vec<SubscriptionHandle>,
    scene: Scene,
    framebuffer: FrameBuffer,
    renderer: Renderer3D,
    clock: Clock,
    background: u32,
    frame: u64,
    last_stats: RenderStats,
}

impl Engine {
    /// Loads the configured model and sets up the camera and controls.
    pub fn new(config: &Config) -> Result<Self, EngineError> {
        let scene = Scene::load(&config.model_path, config.model_distance)?;
        Ok(Self::with_scene(config, scene))
    }

    pub fn with_scene(config: &Config, scene: Scene) -> Self {
        let state = EngineState {
            camera: Camera::new(config.projection(), config.camera),
            input: InputState::new(),
            running: true,
            screenshot_requested: false,
        };

        let mut engine = Self {
            state,
            bus: EventBus::new(),
            subscriptions: Vec::new(),
            scene,
            framebuffer: FrameBuffer::new(config.width, config.height),
            renderer: Renderer3D::new(config.style),
            clock: Clock::new(),
            background: config.background,
            frame: 0,
            last_stats: RenderStats::default(),
        };
        engine.subscribe_controls();
        engine
    }

    fn subscribe_controls(&mut self) {
        let bus = &mut self.bus;

        // Application keys first, so Escape sees mouse look before the
        // camera releases it.
        self.subscriptions.push(bus.subscribe(EventKind::Keyboard, |event, state| {
            if let Event::Keyboard { key, pressed: true } = *event {
                match key {
                    Key::Escape if !state.camera.mouse_look() => state.running = false,
                    Key::F12 => state.screenshot_requested = true,
                    _ => {}
                }
            }
        }));
        self.subscriptions
            .push(bus.subscribe(EventKind::Quit, |_, state| state.running = false));

        for kind in [EventKind::Keyboard, EventKind::MouseButton, EventKind::MouseMotion] {
            self.subscriptions
                .push(bus.subscribe(kind, |event, state| state.input.handle_event(event)));
            self.subscriptions
                .push(bus.subscribe(kind, |event, state| state.camera.handle_event(event)));
        }
    }

    /// Releases every control subscription; events are ignored afterwards.
    pub fn unsubscribe_controls(&mut self) {
        for handle in self.subscriptions.drain(..) {
            self.bus.unsubscribe(handle);
        }
    }

    pub fn handle_event(&mut self, event: &Event) {
        if let Event::Resize { width, height } = *event {
            self.resize(width, height);
        }
        self.bus.emit(event, &mut self.state);
    }

    /// Zero sizes (minimised windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.framebuffer.resize(width, height);
        self.state
            .camera
            .projection_mut()
            .set_aspect_ratio(width as f32 / height as f32);
        debug!(width, height, "resized");
    }

    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    /// Advances the clock to `now`, moves the camera and animates the scene.
    pub fn update_at(&mut self, now: Instant) {
        self.clock.update_at(now);
        let state = &mut self.state;
        state.camera.update(&state.input, self.clock.delta_seconds());
        self.scene.update(self.clock.elapsed_seconds());
        state.input.begin_frame();
    }

    pub fn render(&mut self) -> RenderStats {
        self.framebuffer.set_draw_color(self.background);
        self.framebuffer.clear();

        let model_view_projection = self.state.camera.view_projection() * self.scene.model_matrix();
        self.last_stats = self.renderer.render(
            &mut self.framebuffer,
            self.scene.triangles(),
            &model_view_projection,
            NDC_EYE,
        );
        self.frame += 1;
        self.last_stats
    }

    /// Writes the current frame as a PNG into `dir` and returns its path.
    pub fn save_screenshot<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, EngineError> {
        let path = dir.as_ref().join(format!("screenshot-{:05}.png", self.frame));
        self.framebuffer.save_image(&path)?;
        info!(path = %path.display(), "saved screenshot");
        Ok(path)
    }

    /// Returns and clears a pending F12 request.
    pub fn take_screenshot_request(&mut self) -> bool {
        std::mem::take(&mut self.state.screenshot_requested)
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn mouse_look(&self) -> bool {
        self.state.camera.mouse_look()
    }

    pub fn camera(&self) -> &Camera {
        &self.state.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.state.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn last_stats(&self) -> RenderStats {
        self.last_stats
    }
}
