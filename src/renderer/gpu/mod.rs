//! wgpu backend for the page canvas.
//!
//! Geometry is uploaded once per shared [`Geometry`] and kept while any node
//! still uses it. Each drawn primitive owns a small uniform buffer that is
//! rewritten every frame from [`collect_draws`].

pub mod context;
pub mod pipeline;

use std::sync::Arc;

use glam::{Mat4, Vec3};
use rustc_hash::FxHashMap;
use wgpu::util::DeviceExt;

use crate::errors::{GiantError, Result};
use crate::renderer::extract::{DrawUniforms, FrameUniforms, collect_draws, pack_vertices};
use crate::renderer::settings::RenderSettings;
use crate::resources::Geometry;
use crate::scene::{NodeHandle, Scene};

pub use context::WgpuContext;
pub use pipeline::MeshPipeline;

struct GpuGeometry {
    /// Keeps the source alive so its address stays a valid cache key.
    source: Arc<Geometry>,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

struct DrawSlot {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct GpuBackend {
    ctx: WgpuContext,
    pipeline: MeshPipeline,
    geometries: FxHashMap<usize, GpuGeometry>,
    slots: FxHashMap<(NodeHandle, usize), DrawSlot>,
}

fn geometry_key(geometry: &Arc<Geometry>) -> usize {
    Arc::as_ptr(geometry) as usize
}

impl GpuBackend {
    pub async fn for_canvas(
        canvas: web_sys::HtmlCanvasElement,
        settings: &RenderSettings,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let ctx = WgpuContext::for_canvas(canvas, settings, width, height).await?;
        let pipeline = MeshPipeline::new(&ctx);
        Ok(Self {
            ctx,
            pipeline,
            geometries: FxHashMap::default(),
            slots: FxHashMap::default(),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.ctx.resize(width, height);
    }

    /// Draws every mesh primitive of `scene`. Returns the number of draws.
    pub fn render(&mut self, scene: &Scene, view_projection: Mat4, camera_position: Vec3) -> Result<usize> {
        let output = match self.ctx.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost, reconfiguring");
                self.ctx.reconfigure();
                return Ok(0);
            }
            Err(wgpu::SurfaceError::Timeout) => return Ok(0),
            Err(e) => return Err(GiantError::Render(e.to_string())),
        };
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.ctx.view_format),
            ..Default::default()
        });

        let frame = FrameUniforms::new(view_projection, camera_position, scene);
        self.ctx
            .queue
            .write_buffer(&self.pipeline.frame_buffer, 0, bytemuck::bytes_of(&frame));

        let draws = collect_draws(scene);
        for draw in &draws {
            self.upload_geometry(&draw.primitive.geometry);
            let key = (draw.node, draw.primitive_index);
            self.ensure_draw_slot(key);
            if let Some(slot) = self.slots.get(&key) {
                self.ctx
                    .queue
                    .write_buffer(&slot.uniform_buffer, 0, bytemuck::bytes_of(&draw.uniforms));
            }
        }

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let (target, resolve_target) = match &self.ctx.msaa_view {
                Some(msaa) => (msaa, Some(&view)),
                None => (&view, None),
            };
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            pass.set_bind_group(0, &self.pipeline.frame_bind_group, &[]);
            for draw in &draws {
                let (Some(geometry), Some(slot)) = (
                    self.geometries.get(&geometry_key(&draw.primitive.geometry)),
                    self.slots.get(&(draw.node, draw.primitive_index)),
                ) else {
                    continue;
                };
                pass.set_pipeline(self.pipeline.variant(draw.primitive.material.double_sided));
                pass.set_bind_group(1, &slot.bind_group, &[]);
                pass.set_vertex_buffer(0, geometry.vertex_buffer.slice(..));
                pass.set_index_buffer(geometry.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..geometry.index_count, 0, 0..1);
            }
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        self.prune(scene);
        Ok(draws.len())
    }

    fn upload_geometry(&mut self, geometry: &Arc<Geometry>) {
        let device = &self.ctx.device;
        self.geometries.entry(geometry_key(geometry)).or_insert_with(|| {
            let vertices = pack_vertices(geometry);
            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Index Buffer"),
                contents: bytemuck::cast_slice(&geometry.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            log::debug!(
                "Uploaded geometry: {} vertices, {} indices",
                geometry.vertex_count(),
                geometry.indices.len()
            );
            GpuGeometry {
                source: Arc::clone(geometry),
                vertex_buffer,
                index_buffer,
                index_count: geometry.indices.len() as u32,
            }
        });
    }

    fn ensure_draw_slot(&mut self, key: (NodeHandle, usize)) {
        let device = &self.ctx.device;
        let layout = &self.pipeline.draw_layout;
        self.slots.entry(key).or_insert_with(|| {
            let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Draw Uniforms"),
                size: size_of::<DrawUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Draw Bind Group"),
                layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });
            DrawSlot {
                uniform_buffer,
                bind_group,
            }
        });
    }

    /// Drops slots of removed nodes and geometry nothing else references.
    fn prune(&mut self, scene: &Scene) {
        self.slots.retain(|(node, _), _| scene.get_node(*node).is_some());
        self.geometries
            .retain(|_, geometry| Arc::strong_count(&geometry.source) > 1);
    }
}
