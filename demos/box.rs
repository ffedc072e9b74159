//! Textured box.
//!
//! WASD moves, holding the right mouse button looks around, scrolling zooms
//! and `M` cycles the render mode (fill / wireframe / point / both).

use instant::Duration;
use solid_ngin::{
    Vector3,
    context::{Context, InitContext},
    data_structures::{mesh::GpuMesh, texture::Texture},
    flow::{self, SceneFlow, flow_constructor},
    geometry::solids,
    render::{Primitive, Render},
    resources,
};

struct BoxScene {
    mesh: GpuMesh,
    texture: solid_ngin::BindGroup,
}

impl BoxScene {
    async fn new(ctx: InitContext) -> Self {
        let data = solids::create_box(Vector3::ZERO, 1.0, 1.0, 1.0);
        let mesh = GpuMesh::new(&ctx.device, "box", &data).expect("generated box is consistent");

        let checker = Texture::checkerboard(
            &ctx.device,
            &ctx.queue,
            256,
            8,
            [222, 184, 135, 255],
            [92, 51, 23, 255],
        );
        let texture = resources::texture::diffuse_bind_group(
            &ctx.device,
            &ctx.texture_layout,
            &checker,
        );

        Self { mesh, texture }
    }
}

impl SceneFlow for BoxScene {
    fn on_init(&mut self, ctx: &mut Context) {
        ctx.camera.camera.position = Vector3::new(0.0, 1.0, 3.0);
        ctx.clear_colour = solid_ngin::Color {
            r: 0.05,
            g: 0.05,
            b: 0.08,
            a: 1.0,
        };
    }

    fn on_update(&mut self, _: &mut Context, _: Duration) {}

    fn on_device_events(&mut self, _: &Context, _: &solid_ngin::DeviceEvent) {}

    fn on_window_events(&mut self, _: &Context, _: &solid_ngin::WindowEvent) {}

    fn on_render(&self) -> Render<'_> {
        Render::Solid(Primitive {
            mesh: &self.mesh,
            texture: &self.texture,
        })
    }
}

fn main() -> anyhow::Result<()> {
    flow::run(vec![flow_constructor(BoxScene::new)])
}
