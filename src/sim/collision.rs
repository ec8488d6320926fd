//! Collision tests and bounds culling
//!
//! Every hit test in the game is point-in-rectangle containment of the
//! projectile's origin against the target's bounding rectangle - not
//! rectangle-rectangle overlap. A sufficiently fast projectile can tunnel
//! through a target within one frame; that is defined behavior.

use glam::Vec2;

use super::weapons::Projectile;
use crate::Arena;

/// Player projectiles leave play off the top, left, or right edge. The
/// vertical test is predictive: a shot that will cross the top edge this
/// frame is culled before it gets there.
pub fn player_shot_exited(shot: &Projectile, arena: &Arena, dt: f32) -> bool {
    shot.kin.pos.y + shot.kin.vel.y * dt < arena.min_y
        || shot.kin.pos.x < arena.min_x
        || shot.kin.pos.x > arena.max_x
}

/// Enemy projectiles leave play off the bottom edge only.
pub fn enemy_shot_exited(shot: &Projectile, arena: &Arena, dt: f32) -> bool {
    shot.kin.pos.y + shot.kin.vel.y * dt > arena.max_y
}

/// Powerups are culled once they fall past the bottom edge.
pub fn powerup_exited(pos: Vec2, arena: &Arena) -> bool {
    pos.y > arena.max_y
}
