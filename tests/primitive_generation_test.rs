//! Generator properties exercised through the public API.

use solid_ngin::Vector3;
use solid_ngin::geometry::{GeometryError, solids};

#[test]
fn unit_box_counts() {
    let mesh = solids::create_box(Vector3::ZERO, 1.0, 1.0, 1.0);
    assert_eq!(mesh.vertex_count(), 24);
    assert_eq!(mesh.positions().len(), 72);
    assert_eq!(mesh.tex_coords().len(), 48);
    assert_eq!(mesh.indices().len(), 36);
    assert_eq!(mesh.triangle_count(), 12);
    mesh.validate().expect("generator output is consistent");
}

#[test]
fn box_faces_each_cover_the_unit_square() {
    let mesh = solids::create_box(Vector3::new(5.0, 5.0, 5.0), 3.0, 1.0, 2.0);
    // 6 faces x 4 corners x 2 components.
    for face in mesh.tex_coords().chunks_exact(8) {
        let s: Vec<f32> = face.iter().step_by(2).copied().collect();
        let t: Vec<f32> = face.iter().skip(1).step_by(2).copied().collect();
        for axis in [s, t] {
            assert_eq!(axis.iter().cloned().fold(f32::MAX, f32::min), 0.0);
            assert_eq!(axis.iter().cloned().fold(f32::MIN, f32::max), 1.0);
        }
    }
}

#[test]
fn pyramid_counts() {
    let mesh = solids::create_pyramid(Vector3::ZERO, 1.0, 1.0, 1.0);
    assert_eq!(mesh.vertex_count(), 16);
    assert_eq!(mesh.indices().len(), 18);
    mesh.validate().expect("generator output is consistent");
}

#[test]
fn plane_counts() {
    let mesh = solids::create_plane(Vector3::ZERO, 4.0, 4.0);
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.indices().len(), 6);
    mesh.validate().expect("generator output is consistent");
}

#[test]
fn sphere_counts_for_several_resolutions() {
    for (sectors, stacks) in [(3, 3), (12, 12), (36, 18), (7, 5)] {
        let mesh = solids::create_sphere(Vector3::ZERO, 1.0, sectors, stacks).unwrap();
        let expected_vertices = 2 + (stacks - 1) * (sectors + 1);
        let expected_indices = 2 * sectors * 3 + (stacks - 2) * sectors * 6;
        assert_eq!(
            mesh.vertex_count(),
            expected_vertices as usize,
            "vertices for {sectors}x{stacks}"
        );
        assert_eq!(
            mesh.indices().len(),
            expected_indices as usize,
            "indices for {sectors}x{stacks}"
        );
        mesh.validate().expect("generator output is consistent");
    }
}

#[test]
fn sphere_fails_fast_below_minimum_resolution() {
    let err = solids::create_sphere(Vector3::ZERO, 1.0, 2, 8).unwrap_err();
    assert_eq!(
        err,
        GeometryError::InvalidTessellation {
            sectors: 2,
            stacks: 8
        }
    );
    // The error names both offending parameters.
    assert!(err.to_string().contains("2x8"));
}

#[test]
fn identical_inputs_produce_identical_meshes() {
    let center = Vector3::new(-1.0, 0.5, 2.25);
    assert_eq!(
        solids::create_box(center, 1.5, 2.5, 3.5),
        solids::create_box(center, 1.5, 2.5, 3.5)
    );
    assert_eq!(
        solids::create_sphere(center, 0.75, 15, 11).unwrap(),
        solids::create_sphere(center, 0.75, 15, 11).unwrap()
    );
}
