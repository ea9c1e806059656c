//! Window/event-loop harness shared by both demos.
//!
//! A demo is a struct implementing [`Demo`]: build GPU resources in
//! [`init`](Demo::init), render one tick in [`frame`](Demo::frame). The
//! harness owns the window, the [`GpuContext`], the [`Input`] state, and the
//! frame clock, and drives a perpetual redraw-requested loop until the window
//! closes.
//!
//! Failure model: an error from `init` aborts startup; an error from `frame`
//! is logged and the loop is **not** re-armed — the window stays open showing
//! its last frame. Lost or outdated surfaces are reconfigured and the tick is
//! retried on the next redraw.

use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::error::DemoError;
use crate::gpu::GpuContext;
use crate::input::Input;

/// One of the crate's interactive demos.
pub trait Demo: Sized + 'static {
    /// Build all GPU resources. Called once, after the window and device exist.
    fn init(gpu: &GpuContext) -> Result<Self, DemoError>;

    /// Render one tick into `view`. `time` is seconds since startup.
    ///
    /// The demo encodes and submits its own command buffer; the harness
    /// acquires and presents the surface texture around this call.
    fn frame(
        &mut self,
        gpu: &GpuContext,
        input: &Input,
        view: &wgpu::TextureView,
        time: f32,
    ) -> Result<(), DemoError>;
}

/// Window configuration for a demo.
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Vitrine".to_string(),
            width: 800,
            height: 600,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Run a demo until its window is closed.
///
/// Returns an error if the event loop, window, device, or the demo's own
/// `init` fails. Per-frame errors do not end the loop; they freeze it (see
/// the module docs).
pub fn run<D: Demo>(config: AppConfig) -> Result<(), DemoError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::<D> {
        config,
        state: State::Pending,
        init_error: None,
    };
    event_loop.run_app(&mut app)?;

    match app.init_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App<D: Demo> {
    config: AppConfig,
    state: State<D>,
    /// Captured from `resumed`, where errors cannot propagate directly.
    init_error: Option<DemoError>,
}

enum State<D> {
    Pending,
    Running(Running<D>),
}

struct Running<D> {
    window: Arc<Window>,
    gpu: GpuContext,
    input: Input,
    demo: D,
    start_time: Instant,
    /// Set after a frame error; no further redraws are requested.
    frozen: bool,
}

impl<D: Demo> App<D> {
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<Running<D>, DemoError> {
        let window_attrs = WindowAttributes::default()
            .with_title(&self.config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.width,
                self.config.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = GpuContext::new(window.clone())?;
        let demo = D::init(&gpu)?;

        Ok(Running {
            window,
            gpu,
            input: Input::new(),
            demo,
            start_time: Instant::now(),
            frozen: false,
        })
    }
}

impl<D: Demo> ApplicationHandler for App<D> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if matches!(self.state, State::Pending) {
            match self.start(event_loop) {
                Ok(running) => {
                    running.window.request_redraw();
                    self.state = State::Running(running);
                }
                Err(e) => {
                    tracing::error!(error = %e, "initialization failed");
                    self.init_error = Some(e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let State::Running(running) = &mut self.state else {
            return;
        };

        running.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                running.gpu.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                if running.frozen {
                    return;
                }

                let output = match running.gpu.surface.get_current_texture() {
                    Ok(output) => output,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        // Transient; reconfigure and try again next redraw.
                        running.gpu.reconfigure();
                        running.window.request_redraw();
                        return;
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "lost the surface; freezing the demo");
                        running.frozen = true;
                        return;
                    }
                };

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                let time = running.start_time.elapsed().as_secs_f32();

                if let Err(e) = running
                    .demo
                    .frame(&running.gpu, &running.input, &view, time)
                {
                    tracing::error!(error = %e, "render tick failed; freezing the demo");
                    running.frozen = true;
                    return;
                }

                output.present();
                running.input.begin_frame();
                running.window.request_redraw();
            }
            _ => {}
        }
    }
}
