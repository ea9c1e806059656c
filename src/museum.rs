//! The museum scene: a spinning cube exhibit, a floating pyramid, and a
//! ground plane, walked with a first-person camera.
//!
//! Per tick: update the camera from held keys, advance the active rotation
//! axis by a fixed 2 degrees, rebuild view/projection, then issue three
//! ranged draws (ground, pyramid, cube) out of one shared vertex buffer,
//! each with its own model matrix.
//!
//! # Controls
//!
//! - **W/A/S/D** walk, **arrow keys** look
//! - **X/Y/Z** select which axis the cube accumulates rotation on

use wgpu::util::DeviceExt;
use winit::keyboard::KeyCode;

use crate::app::Demo;
use crate::camera::FirstPersonCamera;
use crate::error::DemoError;
use crate::gpu::GpuContext;
use crate::input::Input;
use crate::math::{Mat4, flatten, flatten_vec4s, identity, perspective, rotate, translate, vec3};
use crate::scene::{MuseumRanges, museum_scene};

/// Degrees added to the active axis each frame.
const SPIN_STEP: f32 = 2.0;
/// Uniform-buffer slot stride; wgpu's required dynamic-offset alignment.
const MODEL_SLOT_STRIDE: u64 = 256;

/// Per-frame uniforms shared by all three draws.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct FrameUniforms {
    view: [f32; 16],
    projection: [f32; 16],
}

/// Per-object uniforms, one 256-byte slot per draw group.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ModelUniforms {
    model: [f32; 16],
}

/// Rotation accumulated by the cube, one angle per axis, with a selectable
/// active axis.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpinState {
    /// Accumulated degrees about X, Y, Z.
    pub theta: [f32; 3],
    /// Which axis [`advance`](Self::advance) feeds.
    pub axis: usize,
}

impl SpinState {
    /// Switch the active axis when X, Y, or Z is pressed.
    pub fn handle_input(&mut self, input: &Input) {
        if input.key_pressed(KeyCode::KeyX) {
            self.axis = 0;
        }
        if input.key_pressed(KeyCode::KeyY) {
            self.axis = 1;
        }
        if input.key_pressed(KeyCode::KeyZ) {
            self.axis = 2;
        }
    }

    /// Advance the active axis by the fixed per-frame step.
    pub fn advance(&mut self) {
        self.theta[self.axis] += SPIN_STEP;
    }

    /// Compound orientation `Rz * Ry * Rx` from the accumulated angles.
    pub fn model(&self) -> Mat4 {
        let m = rotate(identity(), self.theta[0], vec3(1.0, 0.0, 0.0));
        let m = rotate(m, self.theta[1], vec3(0.0, 1.0, 0.0));
        rotate(m, self.theta[2], vec3(0.0, 0.0, 1.0))
    }
}

/// Model matrix for the pyramid's floating animation: a slow vertical
/// sine around one unit above its rest height.
fn pyramid_model(time: f32) -> Mat4 {
    translate(0.0, (time * 2.0).sin() * 0.5 + 1.0, -2.0)
}

/// The museum scene demo.
pub struct MuseumDemo {
    pipeline: wgpu::RenderPipeline,
    position_buffer: wgpu::Buffer,
    color_buffer: wgpu::Buffer,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    depth_size: (u32, u32),
    ranges: MuseumRanges,
    camera: FirstPersonCamera,
    spin: SpinState,
}

impl MuseumDemo {
    fn create_depth_view(gpu: &GpuContext) -> wgpu::TextureView {
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Museum Depth Texture"),
            size: wgpu::Extent3d {
                width: gpu.width(),
                height: gpu.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Recreate the depth buffer if the window was resized since last frame.
    fn ensure_depth_size(&mut self, gpu: &GpuContext) {
        if self.depth_size != (gpu.width(), gpu.height()) {
            self.depth_view = Self::create_depth_view(gpu);
            self.depth_size = (gpu.width(), gpu.height());
        }
    }

    /// Write one object's model matrix into its dynamic-offset slot.
    fn write_model(&self, gpu: &GpuContext, slot: u64, model: Mat4) {
        let uniforms = ModelUniforms {
            model: flatten(model),
        };
        gpu.queue.write_buffer(
            &self.model_buffer,
            slot * MODEL_SLOT_STRIDE,
            bytemuck::cast_slice(&[uniforms]),
        );
    }
}

impl Demo for MuseumDemo {
    fn init(gpu: &GpuContext) -> Result<Self, DemoError> {
        let device = &gpu.device;

        let (geometry, ranges) = museum_scene();
        tracing::debug!(vertices = geometry.len(), "museum scene built");

        let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Museum Positions"),
            contents: bytemuck::cast_slice(&flatten_vec4s(&geometry.positions)),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let color_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Museum Colors"),
            contents: bytemuck::cast_slice(&flatten_vec4s(&geometry.colors)),
            usage: wgpu::BufferUsages::VERTEX,
        });

        // Frame uniforms (group 0): view + projection, written once per tick.
        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Museum Frame Uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Museum Frame Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Museum Frame Bind Group"),
            layout: &frame_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        // Model uniforms (group 1): three 256-byte slots selected per draw
        // with a dynamic offset, so ground, pyramid, and cube each read their
        // own matrix within the single render pass.
        let model_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Museum Model Uniforms"),
            size: 3 * MODEL_SLOT_STRIDE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let model_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Museum Model Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<ModelUniforms>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let model_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Museum Model Bind Group"),
            layout: &model_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &model_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ModelUniforms>() as u64),
                }),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Museum Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/museum.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Museum Pipeline Layout"),
            bind_group_layouts: &[&frame_bind_group_layout, &model_bind_group_layout],
            push_constant_ranges: &[],
        });

        let vec4_stride = std::mem::size_of::<[f32; 4]>() as u64;
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Museum Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs"),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: vec4_stride,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &[wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x4,
                        }],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: vec4_stride,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &[wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32x4,
                        }],
                    },
                ],
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
                topology: wgpu::PrimitiveTopology::TriangleList,
                // The shared corner table gives the cube faces mixed winding,
                // so culling must stay off.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let depth_view = Self::create_depth_view(gpu);

        Ok(Self {
            pipeline,
            position_buffer,
            color_buffer,
            frame_buffer,
            frame_bind_group,
            model_buffer,
            model_bind_group,
            depth_view,
            depth_size: (gpu.width(), gpu.height()),
            ranges,
            camera: FirstPersonCamera::new(),
            spin: SpinState::default(),
        })
    }

    fn frame(
        &mut self,
        gpu: &GpuContext,
        input: &Input,
        view: &wgpu::TextureView,
        time: f32,
    ) -> Result<(), DemoError> {
        self.ensure_depth_size(gpu);

        self.camera.update(input);
        self.spin.handle_input(input);
        self.spin.advance();

        let frame_uniforms = FrameUniforms {
            view: flatten(self.camera.view()),
            projection: flatten(perspective(45.0, gpu.aspect(), 0.1, 100.0)),
        };
        gpu.queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::cast_slice(&[frame_uniforms]));

        self.write_model(gpu, 0, identity()); // ground
        self.write_model(gpu, 1, pyramid_model(time));
        self.write_model(gpu, 2, self.spin.model());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Museum Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Museum Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.1,
                            g: 0.1,
                            b: 0.15,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.position_buffer.slice(..));
            render_pass.set_vertex_buffer(1, self.color_buffer.slice(..));

            for (slot, range) in [
                (0u32, self.ranges.ground),
                (1, self.ranges.pyramid),
                (2, self.ranges.cube),
            ] {
                render_pass.set_bind_group(
                    1,
                    &self.model_bind_group,
                    &[slot * MODEL_SLOT_STRIDE as u32],
                );
                render_pass.draw(range.vertices(), 0..1);
            }
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{transform, vec4};

    #[test]
    fn spin_advances_only_the_active_axis() {
        let mut spin = SpinState::default();
        spin.advance();
        spin.advance();
        assert_eq!(spin.theta, [4.0, 0.0, 0.0]);

        let mut input = Input::new();
        input.press(KeyCode::KeyY);
        spin.handle_input(&input);
        spin.advance();
        assert_eq!(spin.theta, [4.0, 2.0, 0.0]);
    }

    #[test]
    fn spin_model_composes_all_axes() {
        // Rx(90) takes +Y to +Z, then Ry(90) takes +Z to +X. If the axes did
        // not compose, only one of the two turns would be visible.
        let spin = SpinState {
            theta: [90.0, 90.0, 0.0],
            axis: 0,
        };
        let v = transform(spin.model(), vec4(0.0, 1.0, 0.0, 0.0));
        for (got, want) in v.iter().zip([1.0, 0.0, 0.0, 0.0]) {
            assert!((got - want).abs() < 1e-6, "{:?}", v);
        }
    }

    #[test]
    fn pyramid_floats_around_rest_height() {
        // sin peaks at t = pi/4 for the 2 rad/s animation.
        let top = transform(
            pyramid_model(std::f32::consts::FRAC_PI_4),
            vec4(0.0, 0.0, 0.0, 1.0),
        );
        assert!((top[1] - 1.5).abs() < 1e-5);
        assert_eq!(top[2], -2.0);

        let rest = transform(pyramid_model(0.0), vec4(0.0, 0.0, 0.0, 1.0));
        assert_eq!(rest[1], 1.0);
    }

    #[test]
    fn uniform_structs_are_gpu_sized() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 128);
        assert_eq!(std::mem::size_of::<ModelUniforms>(), 64);
        assert!(std::mem::size_of::<ModelUniforms>() as u64 <= MODEL_SLOT_STRIDE);
    }
}
