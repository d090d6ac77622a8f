//! Render-target adapter consuming the streaming core's output.
//!
//! Owns a fixed-size GPU vertex buffer created once at construction and
//! refreshed per frame with `queue.write_buffer`, mirroring the CPU side's
//! no-reallocation contract. The series line draws as a `LineStrip` bounded
//! by the draw count; grid and axis overlays draw as a `LineList`.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

/// Uniforms shared by the line and grid pipelines.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct LineUniforms {
    view_proj: [[f32; 4]; 4],
    color: [f32; 4],
}

/// Maximum grid/axis vertices the overlay buffer can hold.
const MAX_GRID_VERTICES: usize = 1024;

fn position_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: (std::mem::size_of::<f32>() * 3) as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        }],
    }
}

fn create_line_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    topology: wgpu::PrimitiveTopology,
    label: &str,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::include_wgsl!("shader_line.wgsl"));

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[position_layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
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
        cache: None,
    })
}

/// Pixel-space orthographic projection with Y growing downward, matching the
/// coordinate frame's device space.
fn ortho_view_proj(width: f32, height: f32) -> [[f32; 4]; 4] {
    glam::Mat4::orthographic_rh(0.0, width, height, 0.0, -1.0, 1.0).to_cols_array_2d()
}

/// GPU renderer for one streaming line series plus grid/axis overlays.
pub struct LineRenderer {
    line_pipeline: wgpu::RenderPipeline,
    grid_pipeline: wgpu::RenderPipeline,
    line_vertex_buffer: wgpu::Buffer,
    grid_vertex_buffer: wgpu::Buffer,
    line_uniform_buffer: wgpu::Buffer,
    grid_uniform_buffer: wgpu::Buffer,
    line_bind_group: wgpu::BindGroup,
    grid_bind_group: wgpu::BindGroup,
    line_uniforms: LineUniforms,
    grid_uniforms: LineUniforms,
    capacity: usize,
    line_vertex_count: u32,
    grid_vertex_count: u32,
    clear_color: wgpu::Color,
}

impl LineRenderer {
    /// Create a renderer for a series of at most `capacity` samples on a
    /// `width` x `height` canvas.
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        capacity: usize,
        width: u32,
        height: u32,
        line_color: [f32; 4],
    ) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("line_bind_group_layout"),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Line Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let line_pipeline = create_line_pipeline(
            device,
            &pipeline_layout,
            color_format,
            wgpu::PrimitiveTopology::LineStrip,
            "Series Line Pipeline",
        );
        let grid_pipeline = create_line_pipeline(
            device,
            &pipeline_layout,
            color_format,
            wgpu::PrimitiveTopology::LineList,
            "Grid Line Pipeline",
        );

        // Vertex buffers are sized once; per-frame data is written into a
        // prefix and the draw call bounded by the vertex count.
        let line_vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Series Vertex Buffer"),
            size: (capacity * 3 * std::mem::size_of::<f32>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let grid_vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Grid Vertex Buffer"),
            size: (MAX_GRID_VERTICES * 3 * std::mem::size_of::<f32>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let view_proj = ortho_view_proj(width as f32, height as f32);
        let line_uniforms = LineUniforms {
            view_proj,
            color: line_color,
        };
        let grid_uniforms = LineUniforms {
            view_proj,
            color: [0.25, 0.25, 0.3, 1.0],
        };

        let line_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Series Uniform Buffer"),
            contents: bytemuck::cast_slice(&[line_uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let grid_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Grid Uniform Buffer"),
            contents: bytemuck::cast_slice(&[grid_uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let line_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: line_uniform_buffer.as_entire_binding(),
            }],
            label: Some("line_bind_group"),
        });
        let grid_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: grid_uniform_buffer.as_entire_binding(),
            }],
            label: Some("grid_bind_group"),
        });

        log::debug!(
            "line renderer created: capacity {}, canvas {}x{}",
            capacity,
            width,
            height
        );

        Self {
            line_pipeline,
            grid_pipeline,
            line_vertex_buffer,
            grid_vertex_buffer,
            line_uniform_buffer,
            grid_uniform_buffer,
            line_bind_group,
            grid_bind_group,
            line_uniforms,
            grid_uniforms,
            capacity,
            line_vertex_count: 0,
            grid_vertex_count: 0,
            clear_color: wgpu::Color {
                r: 0.02,
                g: 0.02,
                b: 0.03,
                a: 1.0,
            },
        }
    }

    /// Upload the series' vertex positions for this frame.
    ///
    /// `positions` is the valid prefix returned by `StreamingSeries::update`
    /// ((x, y, z) triplets); `draw_count` bounds the line strip.
    pub fn upload_series(&mut self, queue: &wgpu::Queue, positions: &[f32], draw_count: usize) {
        let count = draw_count.min(self.capacity);
        if count > 0 {
            queue.write_buffer(
                &self.line_vertex_buffer,
                0,
                bytemuck::cast_slice(&positions[..count * 3]),
            );
        }
        self.line_vertex_count = count as u32;
    }

    /// Upload grid/axis overlay vertices ((x, y, z) triplets, two per line).
    pub fn upload_grid(&mut self, queue: &wgpu::Queue, vertices: &[f32]) {
        let floats = vertices.len().min(MAX_GRID_VERTICES * 3);
        if floats > 0 {
            queue.write_buffer(
                &self.grid_vertex_buffer,
                0,
                bytemuck::cast_slice(&vertices[..floats]),
            );
        }
        self.grid_vertex_count = (floats / 3) as u32;
    }

    /// Rebuild the view-projection for a new canvas size.
    pub fn resize(&mut self, queue: &wgpu::Queue, width: u32, height: u32) {
        let view_proj = ortho_view_proj(width as f32, height as f32);
        self.line_uniforms.view_proj = view_proj;
        self.grid_uniforms.view_proj = view_proj;
        queue.write_buffer(
            &self.line_uniform_buffer,
            0,
            bytemuck::cast_slice(&[self.line_uniforms]),
        );
        queue.write_buffer(
            &self.grid_uniform_buffer,
            0,
            bytemuck::cast_slice(&[self.grid_uniforms]),
        );
    }

    /// Record a render pass drawing the grid then the series line.
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Chart Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if self.grid_vertex_count > 0 {
            render_pass.set_pipeline(&self.grid_pipeline);
            render_pass.set_bind_group(0, &self.grid_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.grid_vertex_buffer.slice(..));
            render_pass.draw(0..self.grid_vertex_count, 0..1);
        }

        if self.line_vertex_count > 0 {
            render_pass.set_pipeline(&self.line_pipeline);
            render_pass.set_bind_group(0, &self.line_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.line_vertex_buffer.slice(..));
            render_pass.draw(0..self.line_vertex_count, 0..1);
        }
    }
}
