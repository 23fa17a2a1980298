//! Scene composition
//!
//! Turns the simulation state into screen-space triangles and text labels
//! through the camera. No GPU access here; the pipeline uploads the result.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::camera::Camera2D;
use crate::consts::{LABEL_FONT_SIZE, LABEL_OFFSET_X, LABEL_OFFSET_Y, PLAYER_SIZE};
use crate::sim::{Color, GameState, Rect};

/// Text to overlay on the canvas (the GPU pipeline draws no glyphs)
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: &'static str,
    /// Screen-space top-left
    pub pos: Vec2,
    pub font_size: f32,
    pub color: Color,
}

/// One composed frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub clear: [f32; 4],
    pub vertices: Vec<Vertex>,
    pub labels: Vec<Label>,
}

/// Compose the scene: platforms, spikes, flag, player, particles
pub fn compose(state: &GameState, camera: &Camera2D) -> Frame {
    let xf = camera.transform();
    let mut vertices = Vec::with_capacity(6 * (state.platforms.len() + state.particles.len() + 2));
    let mut labels = Vec::new();
    let label_offset = Vec2::new(LABEL_OFFSET_X, LABEL_OFFSET_Y);
    let font_size = LABEL_FONT_SIZE * camera.zoom;

    for platform in &state.platforms {
        shapes::rect(&mut vertices, &xf, &platform.rect, platform.color.to_f32());
    }

    for spike in &state.spikes {
        shapes::triangle(&mut vertices, &xf, spike.corners(), colors::SPIKE.to_f32());
    }

    let flag = &state.flag;
    shapes::rect(&mut vertices, &xf, &flag.rect(), colors::FLAG.to_f32());
    if flag.reached {
        labels.push(Label {
            text: "You Win!",
            pos: camera.world_to_screen(flag.pos + label_offset),
            font_size,
            color: colors::WIN_TEXT,
        });
    }

    let player = &state.player;
    if player.alive {
        let body = Rect::from_pos_size(player.pos, Vec2::splat(PLAYER_SIZE));
        shapes::rect(&mut vertices, &xf, &body, colors::PLAYER.to_f32());
    } else {
        labels.push(Label {
            text: "You Died!",
            pos: camera.world_to_screen(player.pos + label_offset),
            font_size,
            color: colors::DEATH_TEXT,
        });
    }

    for particle in state.particles.iter() {
        shapes::rotated_square(
            &mut vertices,
            &xf,
            particle.pos,
            particle.size,
            particle.rotation,
            particle.color.fade(particle.life).to_f32(),
        );
    }

    Frame {
        clear: colors::BACKGROUND.to_f32(),
        vertices,
        labels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::tuning::Tuning;

    fn camera_on(state: &GameState) -> Camera2D {
        Camera2D::centered(Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT), state.player.pos)
    }

    #[test]
    fn test_initial_scene() {
        let state = GameState::new(1, Tuning::default());
        let frame = compose(&state, &camera_on(&state));
        // 5 platforms + flag + player
        assert_eq!(frame.vertices.len(), 7 * 6);
        assert!(frame.labels.is_empty());
        assert_eq!(frame.clear, Color::SKY_BLUE.to_f32());
    }

    #[test]
    fn test_player_drawn_at_screen_center() {
        let state = GameState::new(1, Tuning::default());
        let frame = compose(&state, &camera_on(&state));
        let player_color = colors::PLAYER.to_f32();
        let player_verts: Vec<&Vertex> =
            frame.vertices.iter().filter(|v| v.color == player_color).collect();
        assert_eq!(player_verts.len(), 6);
        let min_x = player_verts.iter().map(|v| v.position[0]).fold(f32::INFINITY, f32::min);
        let min_y = player_verts.iter().map(|v| v.position[1]).fold(f32::INFINITY, f32::min);
        assert!((min_x - SCREEN_WIDTH / 2.0).abs() < 1e-3);
        assert!((min_y - SCREEN_HEIGHT / 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_win_and_death_labels() {
        let mut state = GameState::new(1, Tuning::default());
        state.flag.reached = true;
        state.player.alive = false;
        let frame = compose(&state, &camera_on(&state));
        let texts: Vec<&str> = frame.labels.iter().map(|l| l.text).collect();
        assert_eq!(texts, vec!["You Win!", "You Died!"]);
        // Dead player body is not drawn
        assert_eq!(frame.vertices.len(), 6 * 6);
    }

    #[test]
    fn test_particles_fade_with_life() {
        let mut state = GameState::new(1, Tuning::default());
        let origin = state.player.center();
        state.emit_burst(origin, Color::WHITE);
        state.particles.update(0.75);
        let frame = compose(&state, &camera_on(&state));
        let particle_verts = frame.vertices.len() - 7 * 6;
        assert_eq!(particle_verts, state.particles.len() * 6);
        let last = frame.vertices.last().expect("particle vertices");
        assert!((last.color[3] - 0.25).abs() < 0.01);
    }
}
