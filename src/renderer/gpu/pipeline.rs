use std::borrow::Cow;

use crate::renderer::extract::{DrawUniforms, FrameUniforms, VERTEX_FLOATS};
use crate::renderer::gpu::context::{DEPTH_FORMAT, WgpuContext};

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 11] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32x3,
    2 => Float32x4,
    3 => Float32x3,
    4 => Float32x3,
    5 => Float32x3,
    6 => Float32x3,
    7 => Float32x3,
    8 => Float32x3,
    9 => Float32x3,
    10 => Float32x3,
];

/// The lit mesh pipeline, in a back-face-culled and a double-sided variant.
pub struct MeshPipeline {
    pub frame_buffer: wgpu::Buffer,
    pub frame_bind_group: wgpu::BindGroup,
    pub draw_layout: wgpu::BindGroupLayout,
    culled: wgpu::RenderPipeline,
    double_sided: wgpu::RenderPipeline,
}

impl MeshPipeline {
    pub fn new(ctx: &WgpuContext) -> Self {
        let device = &ctx.device;

        let frame_layout = Self::uniform_layout(device, "Frame Layout", size_of::<FrameUniforms>());
        let draw_layout = Self::uniform_layout(device, "Draw Layout", size_of::<DrawUniforms>());

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Uniforms"),
            size: size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(include_str!("../shaders/mesh.wgsl"))),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Pipeline Layout"),
            bind_group_layouts: &[&frame_layout, &draw_layout],
            immediate_size: 0,
        });

        let culled = Self::create_pipeline(ctx, &module, &layout, Some(wgpu::Face::Back));
        let double_sided = Self::create_pipeline(ctx, &module, &layout, None);

        Self {
            frame_buffer,
            frame_bind_group,
            draw_layout,
            culled,
            double_sided,
        }
    }

    #[must_use]
    pub fn variant(&self, double_sided: bool) -> &wgpu::RenderPipeline {
        if double_sided { &self.double_sided } else { &self.culled }
    }

    fn uniform_layout(device: &wgpu::Device, label: &str, size: usize) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(size as u64),
                },
                count: None,
            }],
        })
    }

    fn create_pipeline(
        ctx: &WgpuContext,
        module: &wgpu::ShaderModule,
        layout: &wgpu::PipelineLayout,
        cull_mode: Option<wgpu::Face>,
    ) -> wgpu::RenderPipeline {
        ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(if cull_mode.is_some() { "Mesh Pipeline" } else { "Mesh Pipeline (double-sided)" }),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: (VERTEX_FLOATS * size_of::<f32>()) as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &VERTEX_ATTRIBUTES,
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.view_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: ctx.sample_count,
                ..Default::default()
            },
            multiview_mask: None,
            cache: None,
        })
    }
}
