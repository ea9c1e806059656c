//! # Vitrine
//!
//! **Two small interactive GPU demos behind one tiny harness.**
//!
//! - `museum` — a first-person scene with a spinning cube exhibit, a floating
//!   pyramid, and a ground plane. WASD walks, arrow keys look, X/Y/Z pick the
//!   cube's rotation axis.
//! - `kaleidoscope` — a full-screen fragment-shader kaleidoscope steered by
//!   the pointer, with tunable segment count, speed, and color scheme.
//!
//! Run either with `cargo run --bin museum` or `cargo run --bin kaleidoscope`
//! (`RUST_LOG=debug` for chatty output).
//!
//! The crate deliberately carries its own fixed-function-style math in
//! [`math`]: row-major 4x4 matrices built by `translate`/`rotate`/`look_at`/
//! `perspective` and serialized column-major at upload time. Everything else
//! is straight-line wgpu: one pipeline per demo, uniforms written each tick,
//! a perpetual redraw loop.

mod app;
mod camera;
mod error;
mod gpu;
mod input;
mod kaleidoscope;
pub mod math;
mod museum;
mod scene;

pub use app::{AppConfig, Demo, run};
pub use camera::FirstPersonCamera;
pub use error::DemoError;
pub use gpu::GpuContext;
pub use input::Input;
pub use kaleidoscope::{KaleidoParams, KaleidoscopeDemo};
pub use museum::{MuseumDemo, SpinState};
pub use scene::{DrawRange, MuseumRanges, SceneGeometry, museum_scene};
