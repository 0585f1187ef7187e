use super::types::{CameraUniform, VERTEX_ATTRIBUTES};
use crate::arena::Vertex;
use crate::MAX_TEXTURE_SLOTS;

/// Batch shader: one camera uniform, sixteen textures and a shared sampler.
///
/// Explicit LOD sampling keeps the per-vertex slot switch legal under WGSL's
/// uniformity rules.
pub(crate) const SHADER_SOURCE: &str = r#"
struct Camera {
    view_projection: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: Camera;

@group(1) @binding(0) var t0: texture_2d<f32>;
@group(1) @binding(1) var t1: texture_2d<f32>;
@group(1) @binding(2) var t2: texture_2d<f32>;
@group(1) @binding(3) var t3: texture_2d<f32>;
@group(1) @binding(4) var t4: texture_2d<f32>;
@group(1) @binding(5) var t5: texture_2d<f32>;
@group(1) @binding(6) var t6: texture_2d<f32>;
@group(1) @binding(7) var t7: texture_2d<f32>;
@group(1) @binding(8) var t8: texture_2d<f32>;
@group(1) @binding(9) var t9: texture_2d<f32>;
@group(1) @binding(10) var t10: texture_2d<f32>;
@group(1) @binding(11) var t11: texture_2d<f32>;
@group(1) @binding(12) var t12: texture_2d<f32>;
@group(1) @binding(13) var t13: texture_2d<f32>;
@group(1) @binding(14) var t14: texture_2d<f32>;
@group(1) @binding(15) var t15: texture_2d<f32>;
@group(1) @binding(16) var s: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
    @location(2) uv: vec2<f32>,
    @location(3) texture_slot: u32,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) @interpolate(flat) texture_slot: u32,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = camera.view_projection * vec4<f32>(in.position, 1.0);
    out.color = in.color;
    // Image rows run top-down, v runs bottom-up
    out.uv = vec2<f32>(in.uv.x, 1.0 - in.uv.y);
    out.texture_slot = in.texture_slot;
    return out;
}

fn sample_slot(slot: u32, uv: vec2<f32>) -> vec4<f32> {
    switch slot {
        case 1u: { return textureSampleLevel(t1, s, uv, 0.0); }
        case 2u: { return textureSampleLevel(t2, s, uv, 0.0); }
        case 3u: { return textureSampleLevel(t3, s, uv, 0.0); }
        case 4u: { return textureSampleLevel(t4, s, uv, 0.0); }
        case 5u: { return textureSampleLevel(t5, s, uv, 0.0); }
        case 6u: { return textureSampleLevel(t6, s, uv, 0.0); }
        case 7u: { return textureSampleLevel(t7, s, uv, 0.0); }
        case 8u: { return textureSampleLevel(t8, s, uv, 0.0); }
        case 9u: { return textureSampleLevel(t9, s, uv, 0.0); }
        case 10u: { return textureSampleLevel(t10, s, uv, 0.0); }
        case 11u: { return textureSampleLevel(t11, s, uv, 0.0); }
        case 12u: { return textureSampleLevel(t12, s, uv, 0.0); }
        case 13u: { return textureSampleLevel(t13, s, uv, 0.0); }
        case 14u: { return textureSampleLevel(t14, s, uv, 0.0); }
        case 15u: { return textureSampleLevel(t15, s, uv, 0.0); }
        case 0u, default: { return textureSampleLevel(t0, s, uv, 0.0); }
    }
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return sample_slot(in.texture_slot, in.uv) * in.color;
}
"#;

/// Binding index of the shared sampler in the texture bind group.
pub(crate) const SAMPLER_BINDING: u32 = MAX_TEXTURE_SLOTS;

pub(crate) fn camera_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("batch camera layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(
                    std::mem::size_of::<CameraUniform>() as u64
                ),
            },
            count: None,
        }],
    })
}

/// Sixteen sampled textures followed by the sampler.
pub(crate) fn texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let mut entries: Vec<wgpu::BindGroupLayoutEntry> = (0..MAX_TEXTURE_SLOTS)
        .map(|binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        })
        .collect();
    entries.push(wgpu::BindGroupLayoutEntry {
        binding: SAMPLER_BINDING,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    });

    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("batch texture layout"),
        entries: &entries,
    })
}

pub(crate) fn create_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    camera_layout: &wgpu::BindGroupLayout,
    texture_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("batch shader"),
        source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("batch pipeline layout"),
        bind_group_layouts: &[camera_layout, texture_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("batch pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &VERTEX_ATTRIBUTES,
            }],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
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
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
