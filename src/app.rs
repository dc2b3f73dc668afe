//! Windowed demo driver.
//!
//! The application is the composition root: it owns the engine, the overlay
//! effects and the renderer, and plays the role of the "external caller" -
//! input events spawn effects, visibility changes pause and resume, and the
//! redraw cycle drives [`ParticleEngine::tick`].

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::Key,
    window::{Window, WindowId},
};

use crate::config::EngineConfig;
use crate::engine::ParticleEngine;
use crate::overlay::OverlayEffects;
use crate::particle::Instance;
use crate::render::Renderer;
use crate::spawn::SpawnOptions;

pub struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    engine: ParticleEngine,
    overlay: OverlayEffects,
    instances: Vec<Instance>,
    cursor: (f32, f32),
}

impl App {
    pub fn new(config: EngineConfig) -> Self {
        let overlay = OverlayEffects::new(config.seed);
        Self {
            window: None,
            renderer: None,
            engine: ParticleEngine::new(config),
            overlay,
            instances: Vec::new(),
            cursor: (0.0, 0.0),
        }
    }

    /// Run the demo until the window closes.
    pub fn run(config: EngineConfig) -> Result<(), winit::error::EventLoopError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(config);
        event_loop.run_app(&mut app)
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn surface_width(&self) -> f32 {
        self.engine.surface_size().x
    }

    fn on_key(&mut self, key: Key<&str>) {
        let (x, y) = self.cursor;
        let now = self.engine.elapsed();
        let center = self.engine.surface_size() * 0.5;
        match key {
            Key::Character("b") => self.engine.spawn_burst(x, y, 24, &SpawnOptions::default()),
            Key::Character("e") => {
                self.engine
                    .spawn_explosion(center.x, center.y, 32, &SpawnOptions::default())
            }
            Key::Character("f") => {
                self.engine
                    .spawn_fountain(center.x, center.y, 16, &SpawnOptions::default())
            }
            Key::Character("c") => self.overlay.spawn_confetti(40, self.surface_width(), now),
            Key::Character("r") => self.overlay.spawn_rain(30, self.surface_width(), now),
            Key::Character("x") => self.engine.clear(),
            Key::Character("p") => {
                if self.engine.state() == crate::engine::EngineState::Paused {
                    self.engine.resume();
                    self.request_redraw();
                } else {
                    self.engine.pause();
                }
            }
            Key::Character("s") => {
                let stats = self.engine.stats();
                log::info!(
                    "particles {}/{} (pool {}), overlay {}, {:.0} fps, surface {:.0}x{:.0}",
                    stats.active_particles,
                    stats.max_particles,
                    stats.pool_capacity,
                    self.overlay.live_count(),
                    stats.fps,
                    stats.surface_size.0,
                    stats.surface_size.1,
                );
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window_attrs = Window::default_attributes()
                .with_title("embers")
                .with_inner_size(winit::dpi::LogicalSize::new(960, 640));

            let window = match event_loop.create_window(window_attrs) {
                Ok(window) => Arc::new(window),
                Err(e) => {
                    log::error!("Failed to create window: {e}");
                    event_loop.exit();
                    return;
                }
            };

            match pollster::block_on(Renderer::new(window.clone())) {
                Ok(renderer) => {
                    let (w, h) = renderer.logical_size();
                    self.engine.resize(w, h);
                    self.renderer = Some(renderer);
                    window.request_redraw();
                    self.window = Some(window);
                }
                Err(e) => {
                    // No surface means no effects at all; report and stop
                    // instead of running a half-alive loop.
                    log::error!("Renderer unavailable: {e}");
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.engine.destroy();
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                    let (w, h) = renderer.logical_size();
                    self.engine.resize(w, h);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.set_scale_factor(scale_factor);
                    let (w, h) = renderer.logical_size();
                    self.engine.resize(w, h);
                }
            }
            WindowEvent::Occluded(occluded) => {
                // The desktop analog of a page-visibility change.
                if occluded {
                    self.engine.pause();
                } else {
                    self.engine.resume();
                    self.request_redraw();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let scale = self
                    .window
                    .as_ref()
                    .map(|w| w.scale_factor())
                    .unwrap_or(1.0);
                let logical = position.to_logical::<f64>(scale);
                self.cursor = (logical.x as f32, logical.y as f32);
                self.engine
                    .spawn_trail(self.cursor.0, self.cursor.1, 1, &SpawnOptions::default());
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                let (x, y) = self.cursor;
                self.engine.spawn_explosion(x, y, 32, &SpawnOptions::default());
                self.overlay.spawn_ripple(x, y, self.engine.elapsed());
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    self.on_key(event.logical_key.as_ref());
                }
            }
            WindowEvent::RedrawRequested => {
                let keep_going = self.engine.tick();
                let now = self.engine.elapsed();
                self.overlay.update(now);

                self.instances.clear();
                self.engine.emit_instances(&mut self.instances);
                self.overlay.instances(now, &mut self.instances);

                if let Some(renderer) = &mut self.renderer {
                    match renderer.render(&self.instances) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            renderer.reconfigure()
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("Surface out of memory");
                            event_loop.exit();
                        }
                        // Keep the loop alive; one bad frame must not end
                        // the animation.
                        Err(e) => log::warn!("Render error: {e:?}"),
                    }
                }

                if keep_going {
                    self.request_redraw();
                }
            }
            _ => {}
        }
    }
}
