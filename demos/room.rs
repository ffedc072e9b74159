//! Walkable textured room.
//!
//! A floor, four walls and a few solids to walk around. The camera is kept
//! inside the room by clamping its position against the walls each frame.

use instant::Duration;
use solid_ngin::{
    Vector3,
    context::{Context, InitContext},
    data_structures::{mesh::GpuMesh, texture::Texture},
    flow::{self, SceneFlow, flow_constructor},
    geometry::{MeshData, solids},
    render::{Primitive, Render},
    resources,
};

const ROOM_SIZE: f32 = 20.0;
const WALL_HEIGHT: f32 = 4.0;
const WALL_THICKNESS: f32 = 0.2;
/// Fraction of the room kept between the camera and the walls.
const COLLISION_PADDING: f32 = 0.05;

struct Solid {
    mesh: GpuMesh,
    texture: solid_ngin::BindGroup,
}

impl Solid {
    fn new(ctx: &InitContext, name: &str, data: &MeshData, checker: &Texture) -> Self {
        let mesh = GpuMesh::new(&ctx.device, name, data).expect("generated mesh is consistent");
        let texture =
            resources::texture::diffuse_bind_group(&ctx.device, &ctx.texture_layout, checker);
        Self { mesh, texture }
    }
}

struct RoomScene {
    solids: Vec<Solid>,
}

impl RoomScene {
    async fn new(ctx: InitContext) -> Self {
        let half = ROOM_SIZE / 2.0;
        let wall_mid = WALL_HEIGHT / 2.0;

        let floor_texture = Texture::checkerboard(
            &ctx.device,
            &ctx.queue,
            512,
            16,
            [180, 180, 180, 255],
            [90, 90, 90, 255],
        );
        let wall_texture = Texture::checkerboard(
            &ctx.device,
            &ctx.queue,
            256,
            32,
            [178, 94, 78, 255],
            [140, 66, 52, 255],
        );
        let accent_texture = Texture::checkerboard(
            &ctx.device,
            &ctx.queue,
            256,
            8,
            [218, 165, 32, 255],
            [40, 40, 40, 255],
        );

        let floor = solids::create_box(
            Vector3::new(0.0, -WALL_THICKNESS / 2.0, 0.0),
            ROOM_SIZE,
            WALL_THICKNESS,
            ROOM_SIZE,
        );
        let walls = [
            solids::create_box(
                Vector3::new(0.0, wall_mid, -half),
                ROOM_SIZE,
                WALL_HEIGHT,
                WALL_THICKNESS,
            ),
            solids::create_box(
                Vector3::new(0.0, wall_mid, half),
                ROOM_SIZE,
                WALL_HEIGHT,
                WALL_THICKNESS,
            ),
            solids::create_box(
                Vector3::new(-half, wall_mid, 0.0),
                WALL_THICKNESS,
                WALL_HEIGHT,
                ROOM_SIZE,
            ),
            solids::create_box(
                Vector3::new(half, wall_mid, 0.0),
                WALL_THICKNESS,
                WALL_HEIGHT,
                ROOM_SIZE,
            ),
        ];
        let pyramid = solids::create_pyramid(Vector3::new(-3.0, 1.0, -2.0), 2.0, 2.0, 2.0);
        let sphere = solids::create_sphere(Vector3::new(3.0, 1.2, 2.0), 1.2, 24, 16)
            .expect("sector and stack counts are above the minimum");
        let crate_box = solids::create_box(Vector3::new(0.0, 0.75, -4.0), 1.5, 1.5, 1.5);

        let mut solids = vec![Solid::new(&ctx, "floor", &floor, &floor_texture)];
        for (i, wall) in walls.iter().enumerate() {
            solids.push(Solid::new(&ctx, &format!("wall{i}"), wall, &wall_texture));
        }
        solids.push(Solid::new(&ctx, "pyramid", &pyramid, &accent_texture));
        solids.push(Solid::new(&ctx, "sphere", &sphere, &accent_texture));
        solids.push(Solid::new(&ctx, "crate", &crate_box, &accent_texture));

        Self { solids }
    }
}

impl SceneFlow for RoomScene {
    fn on_init(&mut self, ctx: &mut Context) {
        ctx.camera.camera.position = Vector3::new(0.0, 1.7, 8.0);
        ctx.camera.camera.speed = 5.0;
        ctx.clear_colour = solid_ngin::Color {
            r: 0.1,
            g: 0.12,
            b: 0.16,
            a: 1.0,
        };
    }

    fn on_update(&mut self, ctx: &mut Context, _: Duration) {
        // Keep the camera between the walls.
        let bound = (ROOM_SIZE / 2.0) * (1.0 - COLLISION_PADDING);
        let position = &mut ctx.camera.camera.position;
        position.x = position.x.clamp(-bound, bound);
        position.z = position.z.clamp(-bound, bound);
    }

    fn on_device_events(&mut self, _: &Context, _: &solid_ngin::DeviceEvent) {}

    fn on_window_events(&mut self, _: &Context, _: &solid_ngin::WindowEvent) {}

    fn on_render(&self) -> Render<'_> {
        Render::Solids(
            self.solids
                .iter()
                .map(|solid| Primitive {
                    mesh: &solid.mesh,
                    texture: &solid.texture,
                })
                .collect(),
        )
    }
}

fn main() -> anyhow::Result<()> {
    flow::run(vec![flow_constructor(RoomScene::new)])
}
