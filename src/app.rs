use std::sync::Arc;

use instant::Instant;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::flip::FlipController;
use crate::render::GpuState;
use crate::ui::CardUi;

/// Initial window size — enough for the card plus margins.
const WINDOW_WIDTH: u32 = 720;
const WINDOW_HEIGHT: u32 = 640;
/// How often to log FPS (seconds).
const FPS_LOG_INTERVAL: f64 = 5.0;

// ---------------------------------------------------------------------------
// Frame timing
// ---------------------------------------------------------------------------

struct FrameStats {
    frame_count: u64,
    last_log_time: Instant,
    frame_time_sum: f64,
    frames_since_log: u32,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            frame_count: 0,
            last_log_time: Instant::now(),
            frame_time_sum: 0.0,
            frames_since_log: 0,
        }
    }

    fn record_frame(&mut self, dt: f64) {
        self.frame_count += 1;
        self.frames_since_log += 1;
        self.frame_time_sum += dt;

        let elapsed = self.last_log_time.elapsed().as_secs_f64();
        if elapsed >= FPS_LOG_INTERVAL {
            let avg_ms = (self.frame_time_sum / self.frames_since_log as f64) * 1000.0;
            let fps = self.frames_since_log as f64 / elapsed;
            log::info!(
                "FPS: {:.0} | avg: {:.2}ms | total frames: {}",
                fps,
                avg_ms,
                self.frame_count,
            );
            self.last_log_time = Instant::now();
            self.frame_time_sum = 0.0;
            self.frames_since_log = 0;
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Top-level application state.
struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    ui: Option<CardUi>,

    /// The flip core: frame table, outcome, animation run, winner.
    flip: FlipController,

    // Frame timing
    last_frame_time: Option<Instant>,
    frame_stats: FrameStats,

    // Surface dimensions
    width: u32,
    height: u32,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            gpu: None,
            ui: None,
            flip: FlipController::new(),
            last_frame_time: None,
            frame_stats: FrameStats::new(),
            width: 0,
            height: 0,
        }
    }

    /// SPACE starts a flip. Held-key repeats are ignored so one press is
    /// one flip; re-triggering mid-run is ignored by the controller.
    fn handle_key(&mut self, event: &winit::event::KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        if event.physical_key == PhysicalKey::Code(KeyCode::Space) {
            self.flip.start(Instant::now());
        }
    }

    fn redraw(&mut self) {
        // --- Timing ---
        let now = Instant::now();
        if let Some(last) = self.last_frame_time {
            let dt = now.duration_since(last).as_secs_f64();
            self.frame_stats.record_frame(dt);
        }
        self.last_frame_time = Some(now);

        // --- Advance the flip once per displayed frame ---
        self.flip.tick(now);
        let snap = self.flip.snapshot();

        // --- Render ---
        let (Some(window), Some(gpu), Some(ui)) =
            (self.window.as_ref(), self.gpu.as_ref(), self.ui.as_mut())
        else {
            return;
        };

        let (primitives, textures_delta, screen_descriptor) =
            ui.run_frame(window, self.width, self.height, &snap);

        let Some(mut frame) = gpu.begin_frame() else {
            return;
        };

        let ui_cmd_bufs = ui.prepare(
            &gpu.device,
            &gpu.queue,
            &mut frame.encoder,
            &primitives,
            &textures_delta,
            &screen_descriptor,
        );

        {
            let mut render_pass = GpuState::begin_ui_pass(&mut frame.encoder, &frame.view);
            ui.render(&mut render_pass, &primitives, &screen_descriptor);
        }

        gpu.finish_frame(frame.encoder, frame.output, ui_cmd_bufs);
        ui.free_textures(&textures_delta);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title("FlipToy")
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .expect("failed to create window"),
        );

        let size = window.inner_size();
        self.width = size.width;
        self.height = size.height;

        log::info!("Window created: {}x{}", size.width, size.height);

        let gpu = GpuState::new(window.clone());
        let ui = CardUi::new(&window, &gpu);
        self.gpu = Some(gpu);
        self.ui = Some(ui);
        log::info!("wgpu + card UI initialized");

        // Continuous redraw loop — plays the role of the display refresh
        // callback driving the animation.
        event_loop.set_control_flow(ControlFlow::Poll);

        self.window = Some(window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui observe events first (hover, scale changes).
        if let (Some(window), Some(ui)) = (self.window.as_ref(), self.ui.as_mut()) {
            ui.on_window_event(window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                    self.width = new_size.width;
                    self.height = new_size.height;
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(&event);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Event-loop teardown: no more input events or redraws can arrive
        // after this, so any in-flight run simply stops here.
        log::info!(
            "Event loop exiting after {} frames",
            self.frame_stats.frame_count
        );
    }
}

/// Entry point — create event loop and run.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}
