//! Camera and transform behaviour exercised through the public API.

use approx::assert_relative_eq;
use solid_ngin::camera::{Camera, PITCH, Projection, YAW};
use solid_ngin::math::{Matrix3, Vector4};

#[test]
fn a_point_ahead_of_the_camera_lands_in_front_in_clip_space() {
    let camera = Camera::new([0.0, 0.0, 5.0], YAW, PITCH);
    let projection = Projection::new(800, 600, 0.1, 100.0);
    let view_proj = projection.matrix(camera.zoom()) * camera.view_matrix();

    let clip = view_proj * Vector4::new(0.0, 0.0, 0.0, 1.0);
    assert!(clip.w > 0.0);
    let depth = clip.z / clip.w;
    assert!((0.0..=1.0).contains(&depth), "depth {depth} outside clip range");
    assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-5);
    assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-5);
}

#[test]
fn orientation_churn_keeps_the_view_matrix_rigid() {
    let mut camera = Camera::new([2.0, 1.0, -4.0], YAW, PITCH);
    for (dx, dy) in [(500.0, -900.0), (-123.4, 456.7), (9999.0, 9999.0)] {
        camera.orient(dx, dy);
    }

    // The rotation block of a rigid transform has determinant one.
    let view = camera.view_matrix();
    let rotation = Matrix3::new(
        view[(0, 0)],
        view[(0, 1)],
        view[(0, 2)],
        view[(1, 0)],
        view[(1, 1)],
        view[(1, 2)],
        view[(2, 0)],
        view[(2, 1)],
        view[(2, 2)],
    );
    assert_relative_eq!(rotation.determinant(), 1.0, epsilon = 1e-5);

    // And it is invertible, with the inverse equal to its transpose.
    let inverse = rotation.inverse().unwrap();
    for i in 0..3 {
        for j in 0..3 {
            assert_relative_eq!(inverse[(i, j)], rotation[(j, i)], epsilon = 1e-4);
        }
    }
}

#[test]
fn zoom_narrows_the_projection() {
    let mut camera = Camera::new([0.0, 0.0, 0.0], YAW, PITCH);
    let projection = Projection::new(1024, 768, 0.1, 100.0);

    let wide = projection.matrix(camera.zoom());
    // Scrolling in reduces the field of view, which scales clip x/y up.
    camera.adjust_zoom(20.0);
    let narrow = projection.matrix(camera.zoom());
    assert!(narrow[(0, 0)] > wide[(0, 0)]);
    assert!(narrow[(1, 1)] > wide[(1, 1)]);
}

#[test]
fn walking_a_square_returns_to_the_start() {
    use solid_ngin::camera::CameraMovement::*;

    let mut camera = Camera::new([0.0, 0.0, 0.0], YAW, PITCH);
    camera.speed = 1.0;
    let start = camera.position;
    for direction in [Forward, Left, Backward, Right] {
        camera.translate(direction, 2.0);
    }
    assert_relative_eq!((camera.position - start).magnitude(), 0.0, epsilon = 1e-5);
}
