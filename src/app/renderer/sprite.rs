//! Sprite renderer for drawing textured rectangles
//!
//! Each sprite is a quad (two triangles) in screen coordinates, sampled from
//! its own texture. Textures are bound per draw at group 1; the screen size
//! uniform lives at group 0.

use wgpu::{
    BindGroup, BindGroupLayout, Buffer, Device, Queue, RenderPass, RenderPipeline, Sampler,
    TextureFormat, TextureView, util::DeviceExt,
};

use super::texture::Texture;
use crate::scene::ScreenRect;

/// WGSL shader code for sprite rendering
const SPRITE_SHADER: &str = r#"
struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) uv: vec2<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
}

struct Uniforms {
    screen_size: vec2<f32>,
}

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var sprite_texture: texture_2d<f32>;

@group(1) @binding(1)
var sprite_sampler: sampler;

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;

    // Screen coordinates: (0, 0) at top-left, (width, height) at bottom-right
    let clip_x = (in.position.x / uniforms.screen_size.x) * 2.0 - 1.0;
    let clip_y = 1.0 - (in.position.y / uniforms.screen_size.y) * 2.0;

    out.clip_position = vec4<f32>(clip_x, clip_y, 0.0, 1.0);
    out.uv = in.uv;

    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(sprite_texture, sprite_sampler, in.uv);
}
"#;

const VERTICES_PER_SPRITE: u32 = 6;

/// Vertex data for sprite rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Uniform buffer for screen size
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    screen_size: [f32; 2],
}

/// A texture placed at a destination rectangle for one frame
#[derive(Clone, Copy)]
pub struct Sprite<'a> {
    pub dest: ScreenRect,
    pub texture: &'a Texture,
}

/// Generates the two triangles covering `dest`, with the full texture mapped
/// onto it
pub fn quad_vertices(dest: &ScreenRect) -> [Vertex; 6] {
    let (l, t) = (dest.x, dest.y);
    let (r, b) = (dest.x + dest.width, dest.y + dest.height);

    let tl = Vertex {
        position: [l, t],
        uv: [0.0, 0.0],
    };
    let bl = Vertex {
        position: [l, b],
        uv: [0.0, 1.0],
    };
    let br = Vertex {
        position: [r, b],
        uv: [1.0, 1.0],
    };
    let tr = Vertex {
        position: [r, t],
        uv: [1.0, 0.0],
    };

    [tl, bl, br, tl, br, tr]
}

/// Textured quad pipeline
pub struct SpriteRenderer {
    pipeline: RenderPipeline,
    texture_layout: BindGroupLayout,
    sampler: Sampler,
    uniform_buffer: Buffer,
    uniform_bind_group: BindGroup,
    vertex_buffer: Option<Buffer>,
    vertex_count: u32,
}

impl SpriteRenderer {
    /// Builds the pipeline for a surface of the given format
    pub fn new(device: &Device, format: TextureFormat, screen_size: [f32; 2]) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Uniform Buffer"),
            contents: bytemuck::cast_slice(&[Uniforms { screen_size }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Sprite Uniform Layout"),
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

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Sprite Uniform Bind Group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Sprite Texture Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Sprite Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(SPRITE_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&uniform_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
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
        });

        Self {
            pipeline,
            texture_layout,
            sampler,
            uniform_buffer,
            uniform_bind_group,
            vertex_buffer: None,
            vertex_count: 0,
        }
    }

    /// Creates the group 1 bind group for a texture view
    pub fn bind_texture(&self, device: &Device, view: &TextureView, label: &str) -> BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }

    /// Uploads the screen size and the vertices for this frame's sprites
    pub fn prepare(
        &mut self,
        device: &Device,
        queue: &Queue,
        screen_size: [f32; 2],
        sprites: &[Sprite<'_>],
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[Uniforms { screen_size }]),
        );

        let vertices: Vec<Vertex> = sprites
            .iter()
            .flat_map(|sprite| quad_vertices(&sprite.dest))
            .collect();

        self.vertex_count = vertices.len() as u32;

        if vertices.is_empty() {
            self.vertex_buffer = None;
            return;
        }

        self.vertex_buffer = Some(
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Sprite Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            }),
        );
    }

    /// Draws the sprites passed to the last [`prepare`](Self::prepare), in order
    pub fn render(&self, rpass: &mut RenderPass<'_>, sprites: &[Sprite<'_>]) {
        let Some(vertex_buffer) = &self.vertex_buffer else {
            return;
        };
        if self.vertex_count == 0 {
            return;
        }

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.uniform_bind_group, &[]);
        rpass.set_vertex_buffer(0, vertex_buffer.slice(..));

        for (i, sprite) in sprites.iter().enumerate() {
            let first = i as u32 * VERTICES_PER_SPRITE;
            if first >= self.vertex_count {
                break;
            }
            rpass.set_bind_group(1, &sprite.texture.bind_group, &[]);
            rpass.draw(first..first + VERTICES_PER_SPRITE, 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_covers_destination() {
        let dest = ScreenRect {
            x: 200.0,
            y: 50.0,
            width: 400.0,
            height: 200.0,
        };
        let vertices = quad_vertices(&dest);

        let xs: Vec<f32> = vertices.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = vertices.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 200.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 600.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 50.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 250.0);
    }

    #[test]
    fn test_quad_maps_texture_corners_upright() {
        let dest = ScreenRect {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 20.0,
        };
        for vertex in quad_vertices(&dest) {
            let expected_uv = [vertex.position[0] / 10.0, vertex.position[1] / 20.0];
            assert_eq!(vertex.uv, expected_uv);
        }
    }
}
