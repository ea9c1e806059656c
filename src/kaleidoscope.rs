//! The kaleidoscope visualizer: one full-screen quad whose fragment shader
//! folds the screen into mirrored segments around the center.
//!
//! The host side only parameterizes the pattern. Each tick uploads time,
//! resolution, pointer position, and the three user parameters as uniforms,
//! then draws a single 4-vertex triangle strip; everything visual happens in
//! `shaders/kaleidoscope.wgsl`.
//!
//! # Controls
//!
//! - **Mouse / touch**: steer the pattern
//! - **Up/Down**: segment count, **Left/Right**: animation speed
//! - **C**: next color scheme, **R**: reset to defaults

use wgpu::util::DeviceExt;
use winit::keyboard::KeyCode;

use crate::app::Demo;
use crate::error::DemoError;
use crate::gpu::GpuContext;
use crate::input::Input;

const MIN_SEGMENTS: i32 = 2;
const MAX_SEGMENTS: i32 = 32;
const SPEED_STEP: f32 = 0.05;
const COLOR_SCHEMES: i32 = 3;

/// The three user-tunable parameters, with their reset defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KaleidoParams {
    /// Number of mirror segments.
    pub segments: i32,
    /// Animation speed in the 0..=1 range.
    pub speed: f32,
    /// Index of the active color scheme.
    pub color_scheme: i32,
}

impl Default for KaleidoParams {
    fn default() -> Self {
        Self {
            segments: 8,
            speed: 0.5,
            color_scheme: 0,
        }
    }
}

impl KaleidoParams {
    /// Apply one frame of key presses: adjust, cycle, or reset.
    pub fn handle_input(&mut self, input: &Input) {
        if input.key_pressed(KeyCode::ArrowUp) {
            self.segments = (self.segments + 1).min(MAX_SEGMENTS);
        }
        if input.key_pressed(KeyCode::ArrowDown) {
            self.segments = (self.segments - 1).max(MIN_SEGMENTS);
        }
        if input.key_pressed(KeyCode::ArrowRight) {
            self.speed = (self.speed + SPEED_STEP).min(1.0);
        }
        if input.key_pressed(KeyCode::ArrowLeft) {
            self.speed = (self.speed - SPEED_STEP).max(0.0);
        }
        if input.key_pressed(KeyCode::KeyC) {
            self.color_scheme = (self.color_scheme + 1) % COLOR_SCHEMES;
        }
        if input.key_pressed(KeyCode::KeyR) {
            *self = Self::default();
        }
    }
}

/// Uniforms pushed to the fragment shader every tick.
///
/// Layout matches the WGSL struct in `shaders/kaleidoscope.wgsl` (32 bytes,
/// 16-byte aligned).
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct KaleidoUniforms {
    /// Canvas resolution in pixels.
    resolution: [f32; 2],
    /// Raw pointer position in pixels.
    pointer: [f32; 2],
    /// Seconds since startup.
    time: f32,
    speed: f32,
    segments: i32,
    color_scheme: i32,
}

/// The kaleidoscope demo.
pub struct KaleidoscopeDemo {
    pipeline: wgpu::RenderPipeline,
    quad_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    params: KaleidoParams,
}

impl Demo for KaleidoscopeDemo {
    fn init(gpu: &GpuContext) -> Result<Self, DemoError> {
        let device = &gpu.device;

        // Full-screen quad as a 4-vertex triangle strip.
        let quad: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [-1.0, 1.0], [1.0, 1.0]];
        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Kaleidoscope Quad"),
            contents: bytemuck::cast_slice(&quad),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Kaleidoscope Uniforms"),
            size: std::mem::size_of::<KaleidoUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Kaleidoscope Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Kaleidoscope Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Kaleidoscope Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/kaleidoscope.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Kaleidoscope Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Kaleidoscope Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[wgpu::VertexAttribute {
                        offset: 0,
                        shader_location: 0,
                        format: wgpu::VertexFormat::Float32x2,
                    }],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Ok(Self {
            pipeline,
            quad_buffer,
            uniform_buffer,
            bind_group,
            params: KaleidoParams::default(),
        })
    }

    fn frame(
        &mut self,
        gpu: &GpuContext,
        input: &Input,
        view: &wgpu::TextureView,
        time: f32,
    ) -> Result<(), DemoError> {
        self.params.handle_input(input);

        let uniforms = KaleidoUniforms {
            resolution: [gpu.width() as f32, gpu.height() as f32],
            pointer: input.pointer_position(),
            time,
            speed: self.params.speed,
            segments: self.params.segments,
            color_scheme: self.params.color_scheme,
        };
        gpu.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Kaleidoscope Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Kaleidoscope Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
            render_pass.draw(0..4, 0..1);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reset_values() {
        let params = KaleidoParams::default();
        assert_eq!(params.segments, 8);
        assert_eq!(params.speed, 0.5);
        assert_eq!(params.color_scheme, 0);
    }

    #[test]
    fn segments_are_clamped() {
        let mut params = KaleidoParams {
            segments: MAX_SEGMENTS,
            ..Default::default()
        };
        let mut input = Input::new();
        input.press(KeyCode::ArrowUp);
        params.handle_input(&input);
        assert_eq!(params.segments, MAX_SEGMENTS);

        params.segments = MIN_SEGMENTS;
        let mut input = Input::new();
        input.press(KeyCode::ArrowDown);
        params.handle_input(&input);
        assert_eq!(params.segments, MIN_SEGMENTS);
    }

    #[test]
    fn speed_stays_in_range() {
        let mut params = KaleidoParams {
            speed: 0.99,
            ..Default::default()
        };
        let mut input = Input::new();
        input.press(KeyCode::ArrowRight);
        params.handle_input(&input);
        assert_eq!(params.speed, 1.0);

        params.speed = 0.02;
        let mut input = Input::new();
        input.press(KeyCode::ArrowLeft);
        params.handle_input(&input);
        assert_eq!(params.speed, 0.0);
    }

    #[test]
    fn color_scheme_cycles_and_wraps() {
        let mut params = KaleidoParams::default();
        let mut input = Input::new();
        input.press(KeyCode::KeyC);

        for expected in [1, 2, 0, 1] {
            params.handle_input(&input);
            assert_eq!(params.color_scheme, expected);
        }
    }

    #[test]
    fn reset_restores_defaults() {
        let mut params = KaleidoParams {
            segments: 17,
            speed: 0.85,
            color_scheme: 2,
        };
        let mut input = Input::new();
        input.press(KeyCode::KeyR);
        params.handle_input(&input);
        assert_eq!(params, KaleidoParams::default());
    }

    #[test]
    fn uniforms_match_the_wgsl_layout() {
        assert_eq!(std::mem::size_of::<KaleidoUniforms>(), 32);
    }
}
