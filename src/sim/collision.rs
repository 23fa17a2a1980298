//! Collision detection and response
//!
//! Player vs platform uses minimum-overlap resolution: the player is pushed
//! out along whichever side needs the smallest correction. Flag, spike and
//! fall-out checks are plain overlap / threshold tests.

use super::rect::Rect;
use super::state::{Flag, Platform, Player, Spike};
use crate::consts::SCREEN_HEIGHT;
use crate::tuning::Tuning;

/// Side of a platform the player was pushed out through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Landed on the platform
    Top,
    /// Bumped the underside
    Bottom,
    /// Pushed back past the left edge
    Left,
    /// Pushed back past the right edge
    Right,
}

/// A resolved player/platform contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    /// Index into the platform list
    pub platform: usize,
    pub side: Side,
}

/// Pick the separation side for two overlapping rectangles.
///
/// Returns `None` when they do not overlap. Equal overlaps resolve in the
/// order top, bottom, left, right.
pub fn separation_side(mover: &Rect, solid: &Rect) -> Option<(Side, f32)> {
    if !mover.overlaps(solid) {
        return None;
    }

    let candidates = [
        (Side::Top, mover.bottom() - solid.top()),
        (Side::Bottom, solid.bottom() - mover.top()),
        (Side::Left, mover.right() - solid.left()),
        (Side::Right, solid.right() - mover.left()),
    ];

    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.1 < best.1 {
            best = *candidate;
        }
    }
    Some(best)
}

/// Push the player out of every platform it overlaps.
///
/// Platforms are visited in order and the player box is rebuilt after each
/// correction. Landing on a top zeroes vertical velocity, refills jumps and
/// sets `grounded`; horizontal pushes leave velocity alone. `contacts` is
/// cleared and refilled with one entry per platform pushed against.
pub fn resolve_platform_collisions(
    player: &mut Player,
    platforms: &[Platform],
    contacts: &mut Vec<Contact>,
) {
    contacts.clear();
    player.grounded = false;

    for (index, platform) in platforms.iter().enumerate() {
        let player_rect = player.rect();
        let Some((side, _)) = separation_side(&player_rect, &platform.rect) else {
            continue;
        };

        let solid = &platform.rect;
        match side {
            Side::Top => {
                player.pos.y = solid.top() - player_rect.h;
                player.vel.y = 0.0;
                player.jump_count = 0;
                player.grounded = true;
            }
            Side::Bottom => {
                player.pos.y = solid.bottom();
                player.vel.y = 0.0;
            }
            Side::Left => {
                player.pos.x = solid.left() - player_rect.w;
            }
            Side::Right => {
                player.pos.x = solid.right();
            }
        }

        contacts.push(Contact {
            platform: index,
            side,
        });
    }
}

/// Latch the flag when the player touches it. Returns true only on the
/// tick the flag becomes reached.
pub fn check_flag_touch(player: &Player, flag: &mut Flag) -> bool {
    if flag.reached || !player.rect().overlaps(&flag.rect()) {
        return false;
    }
    flag.reached = true;
    true
}

/// Respawn the player if it fell far enough below the screen. Returns true
/// when a respawn happened.
pub fn check_fall_out(player: &mut Player, tuning: &Tuning) -> bool {
    if player.pos.y > SCREEN_HEIGHT + tuning.fall_margin {
        player.respawn(tuning);
        return true;
    }
    false
}

/// Whether the player box touches any spike
pub fn touches_spike(player: &Player, spikes: &[Spike]) -> bool {
    let rect = player.rect();
    spikes.iter().any(|spike| rect.overlaps(&spike.rect()))
}
