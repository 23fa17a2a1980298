//! 2D follow camera
//!
//! `target` (world space) is drawn at `offset` (screen space), scaled by
//! `zoom` and rotated by `rotation` degrees around that point.

use glam::{Affine2, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    pub target: Vec2,
    pub offset: Vec2,
    pub zoom: f32,
    /// Degrees
    pub rotation: f32,
}

impl Camera2D {
    /// Camera keeping `target` at the center of a screen of `screen_size`
    pub fn centered(screen_size: Vec2, target: Vec2) -> Self {
        Self {
            target,
            offset: screen_size * 0.5,
            zoom: 1.0,
            rotation: 0.0,
        }
    }

    pub fn follow(&mut self, target: Vec2) {
        self.target = target;
    }

    /// World to screen transform
    pub fn transform(&self) -> Affine2 {
        Affine2::from_translation(self.offset)
            * Affine2::from_angle(self.rotation.to_radians())
            * Affine2::from_scale(Vec2::splat(self.zoom))
            * Affine2::from_translation(-self.target)
    }

    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        self.transform().transform_point2(point)
    }

    pub fn screen_to_world(&self, point: Vec2) -> Vec2 {
        self.transform().inverse().transform_point2(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_target_maps_to_offset() {
        let camera = Camera2D::centered(Vec2::new(800.0, 450.0), Vec2::new(1400.0, 150.0));
        assert!(approx(camera.world_to_screen(camera.target), Vec2::new(400.0, 225.0)));
        assert!(approx(
            camera.world_to_screen(Vec2::new(1410.0, 160.0)),
            Vec2::new(410.0, 235.0)
        ));
    }

    #[test]
    fn test_zoom_scales_around_target() {
        let mut camera = Camera2D::centered(Vec2::new(800.0, 450.0), Vec2::ZERO);
        camera.zoom = 2.0;
        assert!(approx(camera.world_to_screen(Vec2::new(10.0, -5.0)), Vec2::new(420.0, 215.0)));
    }

    #[test]
    fn test_round_trip_with_rotation() {
        let mut camera = Camera2D::centered(Vec2::new(800.0, 450.0), Vec2::new(100.0, 100.0));
        camera.rotation = 30.0;
        camera.zoom = 1.5;
        let world = Vec2::new(250.0, -40.0);
        let back = camera.screen_to_world(camera.world_to_screen(world));
        assert!(approx(back, world));
    }

    #[test]
    fn test_follow() {
        let mut camera = Camera2D::centered(Vec2::new(800.0, 450.0), Vec2::ZERO);
        camera.follow(Vec2::new(300.0, 360.0));
        assert!(approx(camera.world_to_screen(Vec2::new(300.0, 360.0)), camera.offset));
    }
}
