//! Shape generation for 2D primitives
//!
//! Every shape is built in world space and pushed through the camera
//! transform, producing screen-space triangles.

use glam::{Affine2, Vec2};

use super::vertex::Vertex;
use crate::sim::Rect;

/// Push a triangle
pub fn triangle(out: &mut Vec<Vertex>, xf: &Affine2, corners: [Vec2; 3], color: [f32; 4]) {
    for corner in corners {
        let p = xf.transform_point2(corner);
        out.push(Vertex::new(p.x, p.y, color));
    }
}

/// Push a quad as two triangles; corners go around the quad in order
pub fn quad(out: &mut Vec<Vertex>, xf: &Affine2, corners: [Vec2; 4], color: [f32; 4]) {
    let [a, b, c, d] = corners;
    triangle(out, xf, [a, b, c], color);
    triangle(out, xf, [a, c, d], color);
}

/// Filled axis-aligned rectangle
pub fn rect(out: &mut Vec<Vertex>, xf: &Affine2, r: &Rect, color: [f32; 4]) {
    quad(
        out,
        xf,
        [
            Vec2::new(r.left(), r.top()),
            Vec2::new(r.right(), r.top()),
            Vec2::new(r.right(), r.bottom()),
            Vec2::new(r.left(), r.bottom()),
        ],
        color,
    );
}

/// Filled square of edge `size` centered on `center`, rotated by `degrees`
pub fn rotated_square(
    out: &mut Vec<Vertex>,
    xf: &Affine2,
    center: Vec2,
    size: f32,
    degrees: f32,
    color: [f32; 4],
) {
    let half = size * 0.5;
    let rot = Vec2::from_angle(degrees.to_radians());
    let corners = [
        Vec2::new(-half, -half),
        Vec2::new(half, -half),
        Vec2::new(half, half),
        Vec2::new(-half, half),
    ]
    .map(|c| center + rot.rotate(c));
    quad(out, xf, corners, color);
}
