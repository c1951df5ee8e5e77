//! Combat Arena - a grid arena shooter simulation core
//!
//! Core modules:
//! - `sim`: frame-synchronous simulation (entities, per-frame step, collisions)
//! - `camera`: orbit camera state consumed by an external renderer
//!
//! Rendering and raw input mapping live outside this crate: a frontend reads
//! committed session state after each `step` and feeds input back through the
//! session's mutators between frames.

pub mod camera;
pub mod sim;

pub use camera::{Camera, CameraMode};
pub use sim::{Session, step};

use glam::Vec2;

/// Game configuration constants, fixed at process start.
pub mod consts {
    /// Arena side length in world units; positions live in [0, ARENA_SIZE].
    pub const ARENA_SIZE: f32 = 15.0;
    /// Enemy population the simulation tops back up to each frame.
    pub const ENEMY_COUNT: usize = 5;

    /// Projectile travel per frame.
    pub const PROJECTILE_VELOCITY: f32 = 0.3;
    /// Radius for both enemy hits and player collisions.
    pub const HIT_RADIUS: f32 = 0.5;

    /// Enemy pursuit step per frame.
    pub const ENEMY_SPEED: f32 = 0.0015;
    /// Pulse animation bounds and per-frame increment.
    pub const SCALE_MIN: f32 = 0.6;
    pub const SCALE_MAX: f32 = 1.2;
    pub const SCALE_STEP: f32 = 0.002;

    /// Player defaults
    pub const PLAYER_START_HEALTH: u32 = 5;
    pub const KILL_POINTS: u32 = 10;
    /// Manual misses that end the run.
    pub const MISS_LIMIT: u32 = 10;
    pub const MOVE_STEP: f32 = 0.2;
    pub const TURN_STEP: f32 = 5.0;
    /// Post-move clamp margin from the arena edge.
    pub const PLAYER_MARGIN: f32 = 0.5;

    /// Auto-targeting rotation per frame and fire cooldown in frames.
    pub const AUTO_TURN_STEP: f32 = 2.0;
    pub const AUTO_FIRE_DELAY: u32 = 60;

    /// Spawn positions are uniform in [SPAWN_MARGIN, ARENA_SIZE - SPAWN_MARGIN]².
    pub const SPAWN_MARGIN: f32 = 1.0;
    /// Steady-state spawn exclusion around the player, per axis.
    pub const SPAWN_EXCLUSION: f32 = 3.0;
    /// Initial/reset population uses a looser exclusion than steady-state
    /// respawns. Two distinct constants, not to be unified.
    pub const INITIAL_SPAWN_EXCLUSION: f32 = 2.0;
    /// Rejection sampling retry cap before the deterministic fallback.
    pub const SPAWN_MAX_ATTEMPTS: u32 = 100;

    /// Camera orbit parameter ranges and defaults.
    pub const CAMERA_RADIUS_MIN: f32 = 10.0;
    pub const CAMERA_RADIUS_MAX: f32 = 30.0;
    pub const CAMERA_ELEVATION_MIN: f32 = 12.0;
    pub const CAMERA_ELEVATION_MAX: f32 = 20.0;
    pub const CAMERA_START_RADIUS: f32 = 15.0;
    pub const CAMERA_START_ELEVATION: f32 = 18.0;
    pub const CAMERA_ORBIT_STEP: f32 = 5.0;
}

/// Wrap an angle in degrees to [0, 360).
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}

/// Unit direction for a heading in degrees: (sin θ, cos θ). The vector's y
/// component carries the world z axis.
#[inline]
pub fn heading(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.sin(), rad.cos())
}
