use std::collections::HashMap;

use batchr_common::Color;
use glam::Mat4;
use tracing::{debug, error, info, warn};
use wgpu::util::DeviceExt;

use super::pipeline::{camera_layout, create_pipeline, texture_layout, SAMPLER_BINDING};
use super::types::{padded_bytes_per_row, vertex_buffer_size, CameraUniform, TARGET_FORMAT};
use crate::arena::INDICES_PER_QUAD;
use crate::backend::RenderBackend;
use crate::gpu::{GpuContext, PhysicalSize, RendererError};
use crate::texture::{Texture, TextureId};
use crate::MAX_TEXTURE_SLOTS;

struct GpuTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

/// Geometry buffers sized from the uploaded index template.
struct Geometry {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_capacity: u32,
}

/// Renders batches into an offscreen RGBA8 target with wgpu.
///
/// Every draw call is its own submission so the vertex buffer can be
/// rewritten between flushes of the same frame.
pub struct WgpuBackend {
    ctx: GpuContext,
    pipeline: wgpu::RenderPipeline,
    texture_layout: wgpu::BindGroupLayout,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,
    geometry: Option<Geometry>,
    textures: HashMap<TextureId, GpuTexture>,
    /// Bound to units the batch leaves empty.
    fallback: GpuTexture,
    bound: [Option<TextureId>; MAX_TEXTURE_SLOTS as usize],
    active_units: usize,
    uploaded_bytes: u64,
    target: GpuTexture,
    size: PhysicalSize,
    clear_color: Color,
    frame_cleared: bool,
    next_texture: u64,
}

impl WgpuBackend {
    pub fn new(
        ctx: GpuContext,
        width: u32,
        height: u32,
        clear_color: Color,
    ) -> Result<Self, RendererError> {
        let size = PhysicalSize { width, height };
        check_size(size, ctx.device.limits().max_texture_dimension_2d)?;

        let camera_layout = camera_layout(&ctx.device);
        let texture_layout = texture_layout(&ctx.device);
        let pipeline = create_pipeline(
            &ctx.device,
            TARGET_FORMAT,
            &camera_layout,
            &texture_layout,
        );

        let camera_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("batch camera"),
                contents: bytemuck::cast_slice(&[CameraUniform::new(Mat4::IDENTITY)]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let camera_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("batch camera bind group"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("batch sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let fallback = upload_texture(&ctx, "batch fallback texture", 1, 1, &[0xff; 4]);
        let target = create_target(&ctx.device, size);

        info!(
            width,
            height,
            adapter = %ctx.adapter_info.name,
            "wgpu batch backend ready"
        );

        Ok(Self {
            ctx,
            pipeline,
            texture_layout,
            camera_buffer,
            camera_bind_group,
            sampler,
            geometry: None,
            textures: HashMap::new(),
            fallback,
            bound: [None; MAX_TEXTURE_SLOTS as usize],
            active_units: MAX_TEXTURE_SLOTS as usize,
            uploaded_bytes: 0,
            target,
            size,
            clear_color,
            frame_cleared: false,
            next_texture: 0,
        })
    }

    pub fn context(&self) -> &GpuContext {
        &self.ctx
    }

    pub fn size(&self) -> PhysicalSize {
        self.size
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    /// Copy the render target back to the CPU.
    ///
    /// Blocks until every submitted draw has finished.
    pub fn read_pixels(&self) -> Result<image::RgbaImage, RendererError> {
        let PhysicalSize { width, height } = self.size;
        let padded_row = padded_bytes_per_row(width);

        let output = self.ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("batch readback"),
            size: padded_row as u64 * height as u64,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("batch readback encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.target.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &output,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(height),
                },
            },
            self.target.texture.size(),
        );
        self.ctx.queue.submit(Some(encoder.finish()));

        let slice = output.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            tx.send(result).ok();
        });
        self.ctx.device.poll(wgpu::Maintain::Wait);
        rx.recv()
            .map_err(|e| RendererError::ReadbackError(e.to_string()))?
            .map_err(|e| RendererError::ReadbackError(e.to_string()))?;

        let row_bytes = (width * 4) as usize;
        let mut rgba = Vec::with_capacity(row_bytes * height as usize);
        {
            let view = slice.get_mapped_range();
            for row in view.chunks(padded_row as usize) {
                rgba.extend_from_slice(&row[..row_bytes]);
            }
        }
        output.unmap();

        image::RgbaImage::from_raw(width, height, rgba).ok_or_else(|| {
            RendererError::ReadbackError(format!("{width}x{height} readback was truncated"))
        })
    }

    fn texture_view(&self, unit: usize) -> &wgpu::TextureView {
        self.bound[unit]
            .and_then(|id| self.textures.get(&id))
            .map_or(&self.fallback.view, |t| &t.view)
    }

    fn texture_bind_group(&self) -> wgpu::BindGroup {
        let mut entries: Vec<wgpu::BindGroupEntry> = (0..MAX_TEXTURE_SLOTS as usize)
            .map(|unit| {
                let view = if unit < self.active_units {
                    self.texture_view(unit)
                } else {
                    &self.fallback.view
                };
                wgpu::BindGroupEntry {
                    binding: unit as u32,
                    resource: wgpu::BindingResource::TextureView(view),
                }
            })
            .collect();
        entries.push(wgpu::BindGroupEntry {
            binding: SAMPLER_BINDING,
            resource: wgpu::BindingResource::Sampler(&self.sampler),
        });

        self.ctx
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("batch texture bind group"),
                layout: &self.texture_layout,
                entries: &entries,
            })
    }

    /// First pass of a frame clears the target, later ones load it.
    fn load_op(&mut self) -> wgpu::LoadOp<wgpu::Color> {
        if self.frame_cleared {
            wgpu::LoadOp::Load
        } else {
            self.frame_cleared = true;
            let [r, g, b, a] = self.clear_color.to_array().map(f64::from);
            wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a })
        }
    }

    fn submit_pass(&mut self, draw: Option<(&wgpu::BindGroup, u32)>) {
        let load = self.load_op();
        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("batch encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("batch pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.target.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let (Some((textures, index_count)), Some(geometry)) = (draw, &self.geometry) {
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.camera_bind_group, &[]);
                pass.set_bind_group(1, textures, &[]);
                pass.set_vertex_buffer(0, geometry.vertex_buffer.slice(..self.uploaded_bytes));
                pass.set_index_buffer(geometry.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..index_count, 0, 0..1);
            }
        }

        self.ctx.queue.submit(Some(encoder.finish()));
    }
}

impl RenderBackend for WgpuBackend {
    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> Result<Texture, RendererError> {
        check_size(
            PhysicalSize { width, height },
            self.ctx.device.limits().max_texture_dimension_2d,
        )?;
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(RendererError::TextureError(format!(
                "{width}x{height} texture needs {expected} bytes, got {}",
                rgba.len()
            )));
        }

        let id = TextureId::new(self.next_texture);
        self.next_texture += 1;

        let gpu = upload_texture(&self.ctx, "batch texture", width, height, rgba);
        self.textures.insert(id, gpu);
        debug!(%id, width, height, "texture created");

        Ok(Texture::new(id, width, height))
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        match self.textures.remove(&texture) {
            Some(gpu) => gpu.texture.destroy(),
            None => warn!("destroy of unknown texture {texture}"),
        }
    }

    fn upload_indices(&mut self, indices: &[u32]) {
        let max_quads = indices.len() as u64 / INDICES_PER_QUAD as u64;
        let max_buffer = self.ctx.device.limits().max_buffer_size;
        if vertex_buffer_size(max_quads) > max_buffer {
            error!(
                max_quads,
                max_buffer,
                "vertex buffer would exceed the device limit, batching disabled"
            );
            self.geometry = None;
            return;
        }

        let index_buffer = self
            .ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("batch indices"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        let vertex_buffer = self.ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("batch vertices"),
            size: vertex_buffer_size(max_quads),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        debug!(
            indices = indices.len(),
            vertex_bytes = vertex_buffer.size(),
            "geometry buffers allocated"
        );

        self.geometry = Some(Geometry {
            vertex_buffer,
            index_buffer,
            index_capacity: indices.len() as u32,
        });
    }

    fn set_sampler_slots(&mut self, slots: &[i32]) {
        // wgpu binds by fixed binding index, so only the count matters
        self.active_units = slots.len().min(MAX_TEXTURE_SLOTS as usize);
    }

    fn set_view_projection(&mut self, view_projection: Mat4) {
        self.ctx.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[CameraUniform::new(view_projection)]),
        );
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        let size = PhysicalSize { width, height };
        if size == self.size {
            return;
        }
        if let Err(e) = check_size(size, self.ctx.device.limits().max_texture_dimension_2d) {
            warn!("ignoring viewport resize: {e}");
            return;
        }
        self.target.texture.destroy();
        self.target = create_target(&self.ctx.device, size);
        self.size = size;
        info!(width, height, "render target resized");
    }

    fn upload_vertices(&mut self, bytes: &[u8]) {
        let Some(geometry) = &self.geometry else {
            warn!("vertex upload before the index template");
            return;
        };
        if bytes.len() as u64 > geometry.vertex_buffer.size() {
            warn!(
                "vertex upload of {} bytes exceeds the {}-byte buffer",
                bytes.len(),
                geometry.vertex_buffer.size()
            );
            return;
        }
        self.ctx.queue.write_buffer(&geometry.vertex_buffer, 0, bytes);
        self.uploaded_bytes = bytes.len() as u64;
    }

    fn bind_texture(&mut self, texture: TextureId, unit: u32) {
        let Some(slot) = self.bound.get_mut(unit as usize) else {
            warn!("texture unit {unit} out of range");
            return;
        };
        if !self.textures.contains_key(&texture) {
            warn!("bind of unknown texture {texture} to unit {unit}");
        }
        *slot = Some(texture);
    }

    fn draw_indexed(&mut self, index_count: u32) {
        let Some(geometry) = &self.geometry else {
            warn!("draw before the index template was uploaded");
            return;
        };
        if index_count > geometry.index_capacity || self.uploaded_bytes == 0 {
            warn!(
                index_count,
                capacity = geometry.index_capacity,
                "skipping draw that does not match the uploaded geometry"
            );
            return;
        }

        let textures = self.texture_bind_group();
        self.submit_pass(Some((&textures, index_count)));
        self.bound = [None; MAX_TEXTURE_SLOTS as usize];
        self.uploaded_bytes = 0;
    }

    fn begin_frame(&mut self) {
        self.frame_cleared = false;
    }

    fn end_frame(&mut self) {
        // Empty frames still show the clear color
        if !self.frame_cleared {
            self.submit_pass(None);
        }
    }
}

/// Both dimensions must be in `[1, max_dimension]`.
pub(crate) fn check_size(size: PhysicalSize, max_dimension: u32) -> Result<(), RendererError> {
    let PhysicalSize { width, height } = size;
    if width == 0 || height == 0 {
        return Err(RendererError::TextureError(format!(
            "{width}x{height} texture is empty"
        )));
    }
    if width > max_dimension || height > max_dimension {
        return Err(RendererError::TextureError(format!(
            "{width}x{height} exceeds the device limit of {max_dimension}"
        )));
    }
    Ok(())
}

fn create_target(device: &wgpu::Device, size: PhysicalSize) -> GpuTexture {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("batch target"),
        size: wgpu::Extent3d {
            width: size.width,
            height: size.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: TARGET_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    GpuTexture { texture, view }
}

fn upload_texture(
    ctx: &GpuContext,
    label: &str,
    width: u32,
    height: u32,
    rgba: &[u8],
) -> GpuTexture {
    let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: TARGET_FORMAT,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    ctx.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(width * 4),
            rows_per_image: Some(height),
        },
        texture.size(),
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    GpuTexture { texture, view }
}
