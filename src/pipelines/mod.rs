//! Render pipeline construction for the solid render modes.
//!
//! One shader, three pipelines: filled triangles, wireframe and points. The
//! wireframe/point variants need the `POLYGON_MODE_LINE`/`POLYGON_MODE_POINT`
//! device features; where an adapter lacks them the affected pipeline falls
//! back to fill so render-mode cycling still works everywhere.

use crate::data_structures::{
    mesh::{PrimitiveVertex, Vertex},
    texture::Texture,
};

/// The pipelines for each render mode, built once at context creation.
#[derive(Debug)]
pub struct Pipelines {
    pub fill: wgpu::RenderPipeline,
    pub line: wgpu::RenderPipeline,
    pub point: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        texture_bind_group_layout: &wgpu::BindGroupLayout,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Solid Pipeline Layout"),
            bind_group_layouts: &[texture_bind_group_layout, camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Solid Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("solid_shader.wgsl").into()),
        });

        let features = device.features();
        let line_mode = if features.contains(wgpu::Features::POLYGON_MODE_LINE) {
            wgpu::PolygonMode::Line
        } else {
            log::warn!("adapter cannot rasterize lines; wireframe mode renders filled");
            wgpu::PolygonMode::Fill
        };
        let point_mode = if features.contains(wgpu::Features::POLYGON_MODE_POINT) {
            wgpu::PolygonMode::Point
        } else {
            log::warn!("adapter cannot rasterize points; point mode renders filled");
            wgpu::PolygonMode::Fill
        };

        Self {
            fill: mk_render_pipeline(
                device,
                &layout,
                config.format,
                &shader,
                wgpu::PolygonMode::Fill,
            ),
            line: mk_render_pipeline(device, &layout, config.format, &shader, line_mode),
            point: mk_render_pipeline(device, &layout, config.format, &shader, point_mode),
        }
    }
}

pub fn mk_render_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    shader: &wgpu::ShaderModule,
    polygon_mode: wgpu::PolygonMode,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some("Solid Render Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[PrimitiveVertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState {
                    alpha: wgpu::BlendComponent::REPLACE,
                    color: wgpu::BlendComponent::REPLACE,
                }),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            polygon_mode,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: Texture::DEPTH_FORMAT,
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
    })
}
