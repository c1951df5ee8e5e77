//! Bounds and radius-based hit tests
//!
//! All collisions in the arena reduce to one Euclidean distance check,
//! shared between projectile-enemy hits and enemy-player contact.

use glam::Vec2;

use super::state::Enemy;
use crate::consts::{ARENA_SIZE, HIT_RADIUS};

/// True while both coordinates are inside the arena [0, ARENA_SIZE].
#[inline]
pub fn in_bounds(pos: Vec2) -> bool {
    (0.0..=ARENA_SIZE).contains(&pos.x) && (0.0..=ARENA_SIZE).contains(&pos.y)
}

/// Distance-based hit test.
#[inline]
pub fn within_hit_radius(a: Vec2, b: Vec2) -> bool {
    a.distance(b) < HIT_RADIUS
}

/// Index of the first enemy within hit radius of `pos`, in collection order.
pub fn find_enemy_hit(pos: Vec2, enemies: &[Enemy]) -> Option<usize> {
    enemies.iter().position(|e| within_hit_radius(pos, e.pos))
}
