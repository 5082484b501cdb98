// src/rendering_lib/renderer.rs

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use shape_canvas::tessellator::Mesh;
use shape_canvas::vertex::Vertex;

const INITIAL_MAX_VERTICES: usize = 16 * 1024;
const INITIAL_MAX_INDICES: usize = 32 * 1024;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ScreenDimensionsUniform {
    width: f32,
    height: f32,
    _padding1: f32,
    _padding2: f32,
}

/// Physical-pixel rectangle the canvas is clipped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One vertex/index buffer pair, drawn with a single indexed call.
struct GpuBatch {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    index_capacity: usize,
    index_count: u32,
}

impl GpuBatch {
    fn new(device: &wgpu::Device, vertex_capacity: usize, index_capacity: usize) -> Self {
        Self {
            vertex_buffer: create_vertex_buffer(device, vertex_capacity),
            index_buffer: create_index_buffer(device, index_capacity),
            vertex_capacity,
            index_capacity,
            index_count: 0,
        }
    }

    fn reserve(&mut self, device: &wgpu::Device, vertices: usize, indices: usize, limits: BufferLimits) {
        if vertices > self.vertex_capacity {
            self.vertex_capacity = grown_capacity(vertices, limits.max_vertices);
            log::debug!("growing vertex buffer to {} vertices", self.vertex_capacity);
            self.vertex_buffer = create_vertex_buffer(device, self.vertex_capacity);
        }
        if indices > self.index_capacity {
            self.index_capacity = grown_capacity(indices, limits.max_indices);
            log::debug!("growing index buffer to {} indices", self.index_capacity);
            self.index_buffer = create_index_buffer(device, self.index_capacity);
        }
    }
}

/// Largest vertex and index counts a single buffer may hold on this device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BufferLimits {
    max_vertices: usize,
    max_indices: usize,
}

impl BufferLimits {
    fn from_max_buffer_size(max_buffer_size: u64) -> Self {
        let bytes = usize::try_from(max_buffer_size).unwrap_or(usize::MAX);
        Self {
            max_vertices: (bytes / std::mem::size_of::<Vertex>()).max(3),
            max_indices: (bytes / std::mem::size_of::<u32>() / 3 * 3).max(3),
        }
    }
}

fn grown_capacity(needed: usize, limit: usize) -> usize {
    needed.checked_next_power_of_two().unwrap_or(limit).min(limit)
}

pub struct Renderer {
    render_pipeline: wgpu::RenderPipeline,
    batches: Vec<GpuBatch>,
    active_batches: usize,
    limits: BufferLimits,
    rebased_indices: Vec<u32>,

    screen_uniform_buffer: wgpu::Buffer,
    screen_bind_group: wgpu::BindGroup,
}

impl Renderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        shader_source: &str,
        initial_screen_width: f32,
        initial_screen_height: f32,
    ) -> Self {
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Canvas Shader Module"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let screen_uniform_data = ScreenDimensionsUniform {
            width: initial_screen_width,
            height: initial_screen_height,
            _padding1: 0.0,
            _padding2: 0.0,
        };
        let screen_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Screen Dimensions Uniform Buffer"),
            contents: bytemuck::bytes_of(&screen_uniform_data),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let screen_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
            label: Some("screen_dimensions_bind_group_layout"),
        });

        let screen_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &screen_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: screen_uniform_buffer.as_entire_binding(),
            }],
            label: Some("screen_dimensions_bind_group"),
        });

        let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Canvas Pipeline Layout"),
            bind_group_layouts: &[&screen_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Canvas Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let limits = BufferLimits::from_max_buffer_size(device.limits().max_buffer_size);
        let first_batch = GpuBatch::new(
            device,
            INITIAL_MAX_VERTICES.min(limits.max_vertices),
            INITIAL_MAX_INDICES.min(limits.max_indices),
        );

        Self {
            render_pipeline,
            batches: vec![first_batch],
            active_batches: 0,
            limits,
            rebased_indices: Vec::new(),
            screen_uniform_buffer,
            screen_bind_group,
        }
    }

    /// Copies a tessellated frame to the GPU. Meshes larger than one buffer
    /// allows are split into several batches, each drawn separately.
    pub fn upload_mesh(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, mesh: &Mesh) {
        let batches = mesh.batches(self.limits.max_vertices, self.limits.max_indices);
        if batches.len() > 1 {
            log::debug!("canvas mesh split into {} draws", batches.len());
        }

        for (slot, batch) in batches.iter().enumerate() {
            if slot == self.batches.len() {
                self.batches.push(GpuBatch::new(device, batch.vertices.len(), batch.indices.len()));
            }
            let gpu = &mut self.batches[slot];
            gpu.reserve(device, batch.vertices.len(), batch.indices.len(), self.limits);

            let base = batch.vertices.start as u32;
            let indices = &mesh.indices[batch.indices.clone()];
            let indices = if base == 0 {
                indices
            } else {
                self.rebased_indices.clear();
                self.rebased_indices.extend(indices.iter().map(|i| i - base));
                &self.rebased_indices
            };
            queue.write_buffer(&gpu.vertex_buffer, 0, bytemuck::cast_slice(&mesh.vertices[batch.vertices.clone()]));
            queue.write_buffer(&gpu.index_buffer, 0, bytemuck::cast_slice(indices));
            gpu.index_count = indices.len() as u32;
        }

        self.active_batches = batches.len();
        self.batches.truncate(self.active_batches.max(1));
    }

    pub fn render_canvas(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        output_view: &wgpu::TextureView,
        screen_width: f32,
        screen_height: f32,
        clip: ClipRect,
        clear_color: wgpu::Color,
    ) {
        let screen_uniform_data = ScreenDimensionsUniform {
            width: screen_width,
            height: screen_height,
            _padding1: 0.0,
            _padding2: 0.0,
        };
        queue.write_buffer(&self.screen_uniform_buffer, 0, bytemuck::bytes_of(&screen_uniform_data));

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Canvas Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output_view,
                resolve_target: None,
                ops: wgpu::Operations { load: wgpu::LoadOp::Clear(clear_color), store: wgpu::StoreOp::Store },
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        if self.active_batches == 0 || clip.width == 0 || clip.height == 0 {
            return;
        }

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(0, &self.screen_bind_group, &[]);
        render_pass.set_scissor_rect(clip.x, clip.y, clip.width, clip.height);
        for batch in &self.batches[..self.active_batches] {
            if batch.index_count == 0 {
                continue;
            }
            render_pass.set_vertex_buffer(0, batch.vertex_buffer.slice(..));
            render_pass.set_index_buffer(batch.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..batch.index_count, 0, 0..1);
        }
    }
}
