//! Tessellated sphere.
//!
//! Press `M` to cycle through fill, wireframe, point and combined rendering —
//! the wireframe makes the stack/sector tessellation visible.

use instant::Duration;
use solid_ngin::{
    Vector3,
    context::{Context, InitContext},
    data_structures::{mesh::GpuMesh, texture::Texture},
    flow::{self, SceneFlow, flow_constructor},
    geometry::solids,
    render::{Primitive, Render, RenderMode},
    resources,
};

const SECTORS: u32 = 36;
const STACKS: u32 = 18;

struct SphereScene {
    mesh: GpuMesh,
    texture: solid_ngin::BindGroup,
}

impl SphereScene {
    async fn new(ctx: InitContext) -> Self {
        let data = solids::create_sphere(Vector3::ZERO, 1.0, SECTORS, STACKS)
            .expect("sector and stack counts are above the minimum");
        let mesh = GpuMesh::new(&ctx.device, "sphere", &data)
            .expect("generated sphere is consistent");

        let checker = Texture::checkerboard(
            &ctx.device,
            &ctx.queue,
            512,
            16,
            [70, 130, 180, 255],
            [240, 248, 255, 255],
        );
        let texture = resources::texture::diffuse_bind_group(
            &ctx.device,
            &ctx.texture_layout,
            &checker,
        );

        Self { mesh, texture }
    }
}

impl SceneFlow for SphereScene {
    fn on_init(&mut self, ctx: &mut Context) {
        ctx.camera.camera.position = Vector3::new(0.0, 0.0, 4.0);
        ctx.render_mode = RenderMode::Both;
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
    flow::run(vec![flow_constructor(SphereScene::new)])
}
