//! GPU upload of generated meshes.
//!
//! [`GpuMesh`] is the one consumer of a finished [`MeshData`]: the parallel
//! position/texcoord buffers are interleaved into [`PrimitiveVertex`] records
//! and uploaded once. After that the mesh never changes shape.

use wgpu::util::DeviceExt;

use crate::geometry::MeshData;

/// Anything with a GPU vertex buffer layout.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// Interleaved vertex record: position and texture coordinates.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PrimitiveVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex for PrimitiveVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<PrimitiveVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// A mesh resident on the GPU.
#[derive(Debug)]
pub struct GpuMesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
}

impl GpuMesh {
    /// Validate and upload a finished mesh.
    pub fn new(device: &wgpu::Device, name: &str, data: &MeshData) -> anyhow::Result<Self> {
        data.validate()?;

        let positions = data.positions();
        let tex_coords = data.tex_coords();
        let vertices = (0..data.vertex_count())
            .map(|i| PrimitiveVertex {
                position: [positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]],
                tex_coords: [tex_coords[i * 2], tex_coords[i * 2 + 1]],
            })
            .collect::<Vec<_>>();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} Vertex Buffer")),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} Index Buffer")),
            contents: bytemuck::cast_slice(data.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });

        Ok(Self {
            name: name.to_string(),
            vertex_buffer,
            index_buffer,
            num_indices: data.indices().len() as u32,
        })
    }
}

/// Draw calls for [`GpuMesh`] values on a render pass.
pub trait DrawPrimitive {
    fn draw_mesh(
        &mut self,
        mesh: &GpuMesh,
        texture_bind_group: &wgpu::BindGroup,
        camera_bind_group: &wgpu::BindGroup,
    );
}

impl DrawPrimitive for wgpu::RenderPass<'_> {
    fn draw_mesh(
        &mut self,
        mesh: &GpuMesh,
        texture_bind_group: &wgpu::BindGroup,
        camera_bind_group: &wgpu::BindGroup,
    ) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.set_bind_group(0, texture_bind_group, &[]);
        self.set_bind_group(1, camera_bind_group, &[]);
        self.draw_indexed(0..mesh.num_indices, 0, 0..1);
    }
}
