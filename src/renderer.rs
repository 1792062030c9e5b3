//! GPU rendering for the cube pair.
//!
//! This module handles all graphics rendering using wgpu: resource
//! management, the render pipeline, and per-frame drawing. Both cubes share
//! one pipeline and one instance buffer; each is drawn into its own half of
//! the widget bounds with its own camera, which keeps the two views fully
//! independent.

use iced::widget::shader::wgpu::{self, CommandEncoder, Device, Queue, TextureFormat, TextureView};
use iced::{Rectangle, Size};
use nalgebra::{Matrix4, Vector3};
use wgpu::util::DeviceExt;

use crate::camera::{Camera, CameraUniform, Projection, ViewAngle};
use crate::cube::{Color, Cube};

/// Sticker face dimensions relative to the unit cubie.
const STICKER_SIZE: f64 = 0.90;
const STICKER_THICKNESS: f64 = 0.01;

/// 27 bases plus 54 stickers per cube.
const INSTANCES_PER_CUBE: usize = 81;

/// 36 vertices for a unit cube (6 faces, 2 triangles each), spanning
/// -1..1 on every axis; instances scale them down to half extents.
#[rustfmt::skip]
pub(crate) const CUBE_VERTICES: [[f32; 3]; 36] = [
    // Front face
    [-1.0, -1.0, -1.0],
    [ 1.0, -1.0, -1.0],
    [ 1.0,  1.0, -1.0],
    [ 1.0,  1.0, -1.0],
    [-1.0,  1.0, -1.0],
    [-1.0, -1.0, -1.0],
    // Right face
    [ 1.0, -1.0, -1.0],
    [ 1.0, -1.0,  1.0],
    [ 1.0,  1.0,  1.0],
    [ 1.0,  1.0,  1.0],
    [ 1.0,  1.0, -1.0],
    [ 1.0, -1.0, -1.0],
    // Back face
    [ 1.0, -1.0,  1.0],
    [-1.0, -1.0,  1.0],
    [-1.0,  1.0,  1.0],
    [-1.0,  1.0,  1.0],
    [ 1.0,  1.0,  1.0],
    [ 1.0, -1.0,  1.0],
    // Left face
    [-1.0, -1.0,  1.0],
    [-1.0, -1.0, -1.0],
    [-1.0,  1.0, -1.0],
    [-1.0,  1.0, -1.0],
    [-1.0,  1.0,  1.0],
    [-1.0, -1.0,  1.0],
    // Top face
    [-1.0,  1.0, -1.0],
    [ 1.0,  1.0, -1.0],
    [ 1.0,  1.0,  1.0],
    [ 1.0,  1.0,  1.0],
    [-1.0,  1.0,  1.0],
    [-1.0,  1.0, -1.0],
    // Bottom face
    [-1.0, -1.0,  1.0],
    [ 1.0, -1.0,  1.0],
    [ 1.0, -1.0, -1.0],
    [ 1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0,  1.0],
];

/// GPU-compatible per-instance data: one box (cubie base or sticker).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct InstanceRaw {
    /// 4x4 model transformation matrix
    model: [[f32; 4]; 4],
    /// RGBA color values
    color: [f32; 4],
}

fn instance(model: Matrix4<f64>, color: Color) -> InstanceRaw {
    InstanceRaw {
        model: model.cast::<f32>().into(),
        color: color.rgba(),
    }
}

/// Extracts the drawable instances of one cube: a black base box per cubie
/// plus a thin colored box per sticker. Pure snapshot, no mutation.
pub(crate) fn generate_instances(cube: &Cube) -> Vec<InstanceRaw> {
    let mut instances = Vec::with_capacity(INSTANCES_PER_CUBE);
    for cubie in cube.cubies() {
        let placement =
            Matrix4::new_translation(&cubie.position) * cubie.orientation.to_homogeneous();
        instances.push(instance(
            placement * Matrix4::new_scaling(0.5),
            Color::Black,
        ));
        for sticker in &cubie.stickers {
            let mut half_extents =
                Vector3::new(STICKER_SIZE / 2.0, STICKER_SIZE / 2.0, STICKER_SIZE / 2.0);
            half_extents[sticker.axis.index()] = STICKER_THICKNESS / 2.0;
            let model = placement
                * Matrix4::new_translation(&sticker.offset())
                * Matrix4::new_nonuniform_scaling(&half_extents);
            instances.push(instance(model, sticker.color));
        }
    }
    instances
}

/// Renderer owning the GPU resources for both cube views.
#[derive(Debug)]
pub(crate) struct Renderer {
    /// Bounds within the viewport to render to.
    bounds: Rectangle<f32>,
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    /// Instance count for the primary cube; the secondary's follow it.
    split: u32,
    num_instances: u32,
    camera_buffers: [wgpu::Buffer; 2],
    camera_bind_groups: [wgpu::BindGroup; 2],
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
}

impl Renderer {
    pub(crate) fn new(
        device: &Device,
        format: TextureFormat,
        bounds: Rectangle<f32>,
        viewport_size: Size<u32>,
    ) -> Self {
        let (depth_texture, depth_view) = create_depth_texture(device, viewport_size);

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
                label: Some("Camera Bind Group Layout"),
            });

        let camera_buffers = [0usize, 1].map(|index| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("Camera Buffer {index}")),
                contents: bytemuck::cast_slice(&[CameraUniform::new()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            })
        });

        let camera_bind_groups = [0usize, 1].map(|index| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &camera_bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffers[index].as_entire_binding(),
                }],
                label: Some(&format!("Camera Bind Group {index}")),
            })
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[&camera_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            1 => Float32x4,
                            2 => Float32x4,
                            3 => Float32x4,
                            4 => Float32x4,
                            5 => Float32x4,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Cw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&CUBE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (2 * INSTANCES_PER_CUBE * std::mem::size_of::<InstanceRaw>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            bounds,
            render_pipeline,
            vertex_buffer,
            instance_buffer,
            split: 0,
            num_instances: 0,
            camera_buffers,
            camera_bind_groups,
            depth_texture,
            depth_view,
        }
    }

    /// Recreates size-dependent resources when the widget bounds or the
    /// window size change.
    pub(crate) fn resize(
        &mut self,
        device: &Device,
        new_bounds: Rectangle<f32>,
        new_size: Size<u32>,
    ) {
        if new_bounds.width > 0.0 && new_bounds.height > 0.0 {
            self.bounds = new_bounds;
        }
        if new_size.width > 0
            && new_size.height > 0
            && (self.depth_texture.size().width != new_size.width
                || self.depth_texture.size().height != new_size.height)
        {
            let (texture, view) = create_depth_texture(device, new_size);
            self.depth_texture = texture;
            self.depth_view = view;
        }
    }

    /// Uploads this frame's instances. `split` is the count belonging to the
    /// primary cube.
    pub(crate) fn upload_instances(&mut self, queue: &Queue, instances: &[InstanceRaw], split: u32) {
        self.split = split;
        self.num_instances = instances.len() as u32;
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(instances));
    }

    pub(crate) fn update_cameras(
        &mut self,
        queue: &Queue,
        projection: &Projection,
        angles: [ViewAngle; 2],
    ) {
        for (buffer, angle) in self.camera_buffers.iter().zip(angles) {
            let mut uniform = CameraUniform::new();
            uniform.update_view_proj(&Camera::for_angle(angle), projection);
            queue.write_buffer(buffer, 0, bytemuck::cast_slice(&[uniform]));
        }
    }

    /// Draws both cube views: primary into the left half of the bounds,
    /// secondary into the right half, each with its own camera.
    pub(crate) fn render(&self, encoder: &mut CommandEncoder, target: &TextureView) {
        if self.bounds.width < 2.0 || self.bounds.height < 1.0 || self.num_instances == 0 {
            return;
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
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

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

        let half_width = self.bounds.width / 2.0;
        let halves = [
            (self.bounds.x, 0..self.split),
            (self.bounds.x + half_width, self.split..self.num_instances),
        ];
        for ((x, instances), bind_group) in halves.into_iter().zip(&self.camera_bind_groups) {
            render_pass.set_viewport(x, self.bounds.y, half_width, self.bounds.height, 0.0, 1.0);
            render_pass.set_bind_group(0, bind_group, &[]);
            render_pass.draw(0..CUBE_VERTICES.len() as u32, instances);
        }
    }
}

fn create_depth_texture(
    device: &Device,
    size: Size<u32>,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: size.width.max(1),
            height: size.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth32Float,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}
