//! Procedural generators for canonical solids.
//!
//! Each generator takes a world-space center and per-axis extents and returns
//! a finished [`MeshData`]. Faces are wound counter-clockwise as seen from
//! outside the solid, so the meshes survive back-face culling. Identical
//! inputs always produce bit-identical buffers.

use std::f32::consts::PI;

use crate::geometry::{GeometryError, MeshData};
use crate::math::Vector3;

/// An axis-aligned box centered on `center`.
///
/// Emits 24 vertices (four per face, so every face carries a full unit-square
/// texture mapping) and 36 indices in face order back, front, left, right,
/// bottom, top.
pub fn create_box(center: Vector3, size_x: f32, size_y: f32, size_z: f32) -> MeshData {
    let h = Vector3::new(size_x / 2.0, size_y / 2.0, size_z / 2.0);
    let c = center;

    // Each face lists bottom-left, bottom-right, top-right, top-left as seen
    // from outside the box.
    let faces: [[Vector3; 4]; 6] = [
        // Back (-z)
        [
            Vector3::new(c.x + h.x, c.y - h.y, c.z - h.z),
            Vector3::new(c.x - h.x, c.y - h.y, c.z - h.z),
            Vector3::new(c.x - h.x, c.y + h.y, c.z - h.z),
            Vector3::new(c.x + h.x, c.y + h.y, c.z - h.z),
        ],
        // Front (+z)
        [
            Vector3::new(c.x - h.x, c.y - h.y, c.z + h.z),
            Vector3::new(c.x + h.x, c.y - h.y, c.z + h.z),
            Vector3::new(c.x + h.x, c.y + h.y, c.z + h.z),
            Vector3::new(c.x - h.x, c.y + h.y, c.z + h.z),
        ],
        // Left (-x)
        [
            Vector3::new(c.x - h.x, c.y - h.y, c.z - h.z),
            Vector3::new(c.x - h.x, c.y - h.y, c.z + h.z),
            Vector3::new(c.x - h.x, c.y + h.y, c.z + h.z),
            Vector3::new(c.x - h.x, c.y + h.y, c.z - h.z),
        ],
        // Right (+x)
        [
            Vector3::new(c.x + h.x, c.y - h.y, c.z + h.z),
            Vector3::new(c.x + h.x, c.y - h.y, c.z - h.z),
            Vector3::new(c.x + h.x, c.y + h.y, c.z - h.z),
            Vector3::new(c.x + h.x, c.y + h.y, c.z + h.z),
        ],
        // Bottom (-y)
        [
            Vector3::new(c.x - h.x, c.y - h.y, c.z - h.z),
            Vector3::new(c.x + h.x, c.y - h.y, c.z - h.z),
            Vector3::new(c.x + h.x, c.y - h.y, c.z + h.z),
            Vector3::new(c.x - h.x, c.y - h.y, c.z + h.z),
        ],
        // Top (+y)
        [
            Vector3::new(c.x - h.x, c.y + h.y, c.z + h.z),
            Vector3::new(c.x + h.x, c.y + h.y, c.z + h.z),
            Vector3::new(c.x + h.x, c.y + h.y, c.z - h.z),
            Vector3::new(c.x - h.x, c.y + h.y, c.z - h.z),
        ],
    ];

    let mut mesh = MeshData::with_capacity(24, 12);
    for (face, corners) in faces.iter().enumerate() {
        for &corner in corners {
            mesh.push_position(corner);
        }
        for uv in [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]] {
            mesh.push_tex_coord(uv);
        }
        let base = face as u32 * 4;
        mesh.push_triangle(base, base + 1, base + 2);
        mesh.push_triangle(base + 2, base + 3, base);
    }
    mesh
}

/// A single quad in the `z = center.z` plane, facing +z.
pub fn create_plane(center: Vector3, size_x: f32, size_y: f32) -> MeshData {
    let hx = size_x / 2.0;
    let hy = size_y / 2.0;

    let mut mesh = MeshData::with_capacity(4, 2);
    for (corner, uv) in [
        (Vector3::new(center.x - hx, center.y - hy, center.z), [0.0, 0.0]),
        (Vector3::new(center.x + hx, center.y - hy, center.z), [1.0, 0.0]),
        (Vector3::new(center.x + hx, center.y + hy, center.z), [1.0, 1.0]),
        (Vector3::new(center.x - hx, center.y + hy, center.z), [0.0, 1.0]),
    ] {
        mesh.push_position(corner);
        mesh.push_tex_coord(uv);
    }
    mesh.push_triangle(0, 1, 2);
    mesh.push_triangle(2, 3, 0);
    mesh
}

/// A rectangular-base pyramid with its apex above the center of the base.
///
/// Emits 16 vertices (four for the base, three per side face) and 18 indices.
/// The base carries a unit-square texture mapping; every side triangle maps
/// to (0,0), (1,0), (0.5,1).
pub fn create_pyramid(center: Vector3, size_x: f32, size_y: f32, size_z: f32) -> MeshData {
    let hx = size_x / 2.0;
    let hy = size_y / 2.0;
    let hz = size_z / 2.0;

    let base = center.y - hy;
    let apex = Vector3::new(center.x, center.y + hy, center.z);
    let back_left = Vector3::new(center.x - hx, base, center.z - hz);
    let back_right = Vector3::new(center.x + hx, base, center.z - hz);
    let front_left = Vector3::new(center.x - hx, base, center.z + hz);
    let front_right = Vector3::new(center.x + hx, base, center.z + hz);

    let mut mesh = MeshData::with_capacity(16, 6);

    // Base, seen from below.
    for corner in [back_left, back_right, front_right, front_left] {
        mesh.push_position(corner);
    }
    for uv in [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]] {
        mesh.push_tex_coord(uv);
    }
    mesh.push_triangle(0, 1, 2);
    mesh.push_triangle(2, 3, 0);

    // Side faces, each listed left, right, apex as seen from outside.
    let sides = [
        [front_left, front_right, apex],
        [back_right, back_left, apex],
        [back_left, front_left, apex],
        [front_right, back_right, apex],
    ];
    for (side, corners) in sides.iter().enumerate() {
        for &corner in corners {
            mesh.push_position(corner);
        }
        for uv in [[0.0, 0.0], [1.0, 0.0], [0.5, 1.0]] {
            mesh.push_tex_coord(uv);
        }
        let first = 4 + side as u32 * 3;
        mesh.push_triangle(first, first + 1, first + 2);
    }
    mesh
}

/// A UV sphere from stack/sector tessellation.
///
/// Stacks partition the polar angle from pole to pole, sectors the azimuth.
/// The poles are singleton vertices closed by triangle fans; each interior
/// band carries `sectors + 1` vertices (the seam vertex is duplicated so
/// texture coordinates stay continuous) and splits into two triangles per
/// quad. Texture coordinates follow `s = sector / sectors`,
/// `t = stack / stacks`; the poles use `s = 0.5`.
///
/// Resolutions below three sectors or stacks cannot close a volume and are
/// rejected with [`GeometryError::InvalidTessellation`].
pub fn create_sphere(
    center: Vector3,
    radius: f32,
    sectors: u32,
    stacks: u32,
) -> Result<MeshData, GeometryError> {
    const MIN_RESOLUTION: u32 = 3;
    if sectors < MIN_RESOLUTION || stacks < MIN_RESOLUTION {
        return Err(GeometryError::InvalidTessellation { sectors, stacks });
    }

    let vertex_count = 2 + (stacks - 1) * (sectors + 1);
    let triangle_count = 2 * sectors + (stacks - 2) * sectors * 2;
    let mut mesh = MeshData::with_capacity(vertex_count as usize, triangle_count as usize);

    let stack_step = PI / stacks as f32;
    let sector_step = 2.0 * PI / sectors as f32;

    // North pole.
    mesh.push_position(Vector3::new(center.x, center.y + radius, center.z));
    mesh.push_tex_coord([0.5, 0.0]);

    for stack in 1..stacks {
        let theta = stack as f32 * stack_step;
        let ring_radius = radius * theta.sin();
        let y = center.y + radius * theta.cos();
        for sector in 0..=sectors {
            let phi = sector as f32 * sector_step;
            mesh.push_position(Vector3::new(
                center.x + ring_radius * phi.cos(),
                y,
                center.z + ring_radius * phi.sin(),
            ));
            mesh.push_tex_coord([
                sector as f32 / sectors as f32,
                stack as f32 / stacks as f32,
            ]);
        }
    }

    // South pole.
    mesh.push_position(Vector3::new(center.x, center.y - radius, center.z));
    mesh.push_tex_coord([0.5, 1.0]);

    let ring_stride = sectors + 1;
    let south = vertex_count - 1;

    // Cap fans. The northern fan walks the ring against the azimuth so both
    // caps face outward.
    for sector in 0..sectors {
        mesh.push_triangle(0, 1 + sector + 1, 1 + sector);
    }
    for band in 0..stacks - 2 {
        for sector in 0..sectors {
            let upper = 1 + band * ring_stride + sector;
            let lower = upper + ring_stride;
            mesh.push_triangle(upper, upper + 1, lower);
            mesh.push_triangle(upper + 1, lower + 1, lower);
        }
    }
    let last_ring = south - ring_stride;
    for sector in 0..sectors {
        mesh.push_triangle(south, last_ring + sector, last_ring + sector + 1);
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn box_has_four_vertices_per_face() {
        let mesh = create_box(Vector3::ZERO, 1.0, 1.0, 1.0);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.indices().len(), 36);
        assert_eq!(mesh.validate(), Ok(()));

        // All corners sit on the half-extent cube.
        for chunk in mesh.positions().chunks_exact(3) {
            for &component in chunk {
                assert_relative_eq!(component.abs(), 0.5);
            }
        }
        // Each face covers the full unit square.
        for face in mesh.tex_coords().chunks_exact(8) {
            let mut corners: Vec<_> = face.chunks_exact(2).map(|c| (c[0], c[1])).collect();
            corners.sort_by(|a, b| a.partial_cmp(b).unwrap());
            assert_eq!(corners, vec![(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)]);
        }
    }

    #[test]
    fn box_is_centered() {
        let mesh = create_box(Vector3::new(2.0, -1.0, 3.0), 4.0, 2.0, 6.0);
        let (mut min, mut max) = ([f32::MAX; 3], [f32::MIN; 3]);
        for chunk in mesh.positions().chunks_exact(3) {
            for axis in 0..3 {
                min[axis] = min[axis].min(chunk[axis]);
                max[axis] = max[axis].max(chunk[axis]);
            }
        }
        assert_eq!(min, [0.0, -2.0, 0.0]);
        assert_eq!(max, [4.0, 0.0, 6.0]);
    }

    #[test]
    fn plane_is_a_single_quad() {
        let mesh = create_plane(Vector3::new(0.0, 0.0, 1.5), 2.0, 2.0);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.validate(), Ok(()));
        // The quad lies in the z = center.z plane.
        for chunk in mesh.positions().chunks_exact(3) {
            assert_eq!(chunk[2], 1.5);
        }
    }

    #[test]
    fn pyramid_has_sixteen_vertices_and_six_triangles() {
        let mesh = create_pyramid(Vector3::ZERO, 1.0, 1.0, 1.0);
        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.indices().len(), 18);
        assert_eq!(mesh.validate(), Ok(()));

        // The apex appears in all four side faces.
        let apex_count = mesh
            .positions()
            .chunks_exact(3)
            .filter(|v| v[0] == 0.0 && v[1] == 0.5 && v[2] == 0.0)
            .count();
        assert_eq!(apex_count, 4);
    }

    #[test]
    fn sphere_vertex_and_index_counts_follow_the_tessellation() {
        let mesh = create_sphere(Vector3::ZERO, 1.0, 12, 12).unwrap();
        // 2 poles + (stacks - 1) rings of (sectors + 1) vertices.
        assert_eq!(mesh.vertex_count(), 2 + 11 * 13);
        // 2 cap fans + (stacks - 2) bands of quads split in two.
        assert_eq!(mesh.indices().len(), 2 * 12 * 3 + 10 * 12 * 6);
        assert_eq!(mesh.validate(), Ok(()));
    }

    #[test]
    fn sphere_vertices_lie_on_the_radius() {
        let center = Vector3::new(1.0, 2.0, 3.0);
        let mesh = create_sphere(center, 2.0, 8, 6).unwrap();
        for chunk in mesh.positions().chunks_exact(3) {
            let v = Vector3::new(chunk[0], chunk[1], chunk[2]) - center;
            assert_relative_eq!(v.magnitude(), 2.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn sphere_tex_coords_cover_the_unit_square() {
        let mesh = create_sphere(Vector3::ZERO, 1.0, 6, 4).unwrap();
        let (mut s_max, mut t_max) = (0.0f32, 0.0f32);
        for uv in mesh.tex_coords().chunks_exact(2) {
            assert!((0.0..=1.0).contains(&uv[0]));
            assert!((0.0..=1.0).contains(&uv[1]));
            s_max = s_max.max(uv[0]);
            t_max = t_max.max(uv[1]);
        }
        assert_eq!(s_max, 1.0);
        assert_eq!(t_max, 1.0);
    }

    #[test]
    fn sphere_rejects_too_coarse_tessellations() {
        for (sectors, stacks) in [(2, 12), (12, 2), (0, 0)] {
            assert_eq!(
                create_sphere(Vector3::ZERO, 1.0, sectors, stacks),
                Err(GeometryError::InvalidTessellation { sectors, stacks })
            );
        }
    }

    #[test]
    fn generators_are_deterministic() {
        let a = create_sphere(Vector3::new(0.5, 0.5, 0.5), 3.0, 24, 16).unwrap();
        let b = create_sphere(Vector3::new(0.5, 0.5, 0.5), 3.0, 24, 16).unwrap();
        assert_eq!(a, b);

        let a = create_pyramid(Vector3::unit_y(), 2.0, 1.0, 2.0);
        let b = create_pyramid(Vector3::unit_y(), 2.0, 1.0, 2.0);
        assert_eq!(a, b);
    }
}
