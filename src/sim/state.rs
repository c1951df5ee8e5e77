//! Session state and entity records
//!
//! Everything a frontend reads between frames lives here, plus the input
//! mutators it calls. The session exclusively owns both entity collections.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, CameraMode};
use crate::consts::*;
use crate::{heading, wrap_degrees};

/// Player movement relative to the current facing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Back,
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// World position; the vector's y component is the world z axis
    pub pos: Vec2,
    /// Facing in degrees, wrapped to [0, 360)
    pub rotation: f32,
    pub health: u32,
    pub points: u32,
    /// Manual shots that left the arena without a hit
    pub shots_missed: u32,
    /// Rotation and fire driven by the simulation when set
    pub auto_mode: bool,
    /// Frames until the next auto shot
    pub fire_delay: u32,
    /// Monotonic round-robin cursor over live enemies
    pub target_index: usize,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::splat(ARENA_SIZE / 2.0),
            rotation: 0.0,
            health: PLAYER_START_HEALTH,
            points: 0,
            shots_missed: 0,
            auto_mode: false,
            fire_delay: 0,
            target_index: 0,
        }
    }
}

/// A roaming hostile unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    /// Render scale, oscillating in [SCALE_MIN, SCALE_MAX]
    pub scale: f32,
    /// Pulse direction flag
    pub shrinking: bool,
}

impl Enemy {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            scale: 1.0,
            shrinking: true,
        }
    }

    /// Fixed-magnitude step toward the target's current position. A
    /// zero-length pursuit vector moves nothing.
    pub fn pursue(&mut self, target: Vec2) {
        self.pos += (target - self.pos).normalize_or_zero() * ENEMY_SPEED;
    }

    /// Two-state scale oscillator; reaching a bound flips the direction.
    pub fn pulse(&mut self) {
        if self.shrinking {
            self.scale -= SCALE_STEP;
            if self.scale <= SCALE_MIN {
                self.scale = SCALE_MIN;
                self.shrinking = false;
            }
        } else {
            self.scale += SCALE_STEP;
            if self.scale >= SCALE_MAX {
                self.scale = SCALE_MAX;
                self.shrinking = true;
            }
        }
    }
}

/// A fired projectile; direction never changes after creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Firing angle in degrees, fixed at creation
    pub angle: f32,
    /// Fired by auto-targeting; such shots never count as misses
    pub auto: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, angle: f32, auto: bool) -> Self {
        Self { pos, angle, auto }
    }

    /// Unit direction of travel
    pub fn heading(&self) -> Vec2 {
        heading(self.angle)
    }
}

/// The mutable aggregate for one play-through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG driving all spawn placement
    pub rng: Pcg32,
    /// Frames simulated so far
    pub frame: u64,
    /// Terminal flag; halts all simulation once set
    pub is_finished: bool,
    pub player: Player,
    pub camera: Camera,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
}

impl Session {
    /// Create a session with the initial enemy population in place.
    pub fn new(seed: u64) -> Self {
        let mut session = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            frame: 0,
            is_finished: false,
            player: Player::default(),
            camera: Camera::default(),
            enemies: Vec::with_capacity(ENEMY_COUNT),
            projectiles: Vec::new(),
        };
        session.populate_enemies(INITIAL_SPAWN_EXCLUSION);
        session
    }

    /// Spawn one enemy by rejection sampling: uniform over the spawn area,
    /// accepted when both axes are farther than `exclusion` from the player.
    /// Falls back to the corner farthest from the player once the retry cap
    /// is hit, so the loop always terminates.
    pub fn spawn_enemy(&mut self, exclusion: f32) -> Enemy {
        let player = self.player.pos;
        for _ in 0..SPAWN_MAX_ATTEMPTS {
            let pos = Vec2::new(
                self.rng.random_range(SPAWN_MARGIN..=ARENA_SIZE - SPAWN_MARGIN),
                self.rng.random_range(SPAWN_MARGIN..=ARENA_SIZE - SPAWN_MARGIN),
            );
            if (pos.x - player.x).abs() > exclusion && (pos.y - player.y).abs() > exclusion {
                return Enemy::new(pos);
            }
        }
        log::warn!("spawn sampling exhausted after {SPAWN_MAX_ATTEMPTS} attempts");
        Enemy::new(farthest_corner(player))
    }

    /// Rebuild the full enemy population from scratch.
    pub fn populate_enemies(&mut self, exclusion: f32) {
        self.enemies.clear();
        while self.enemies.len() < ENEMY_COUNT {
            let enemy = self.spawn_enemy(exclusion);
            self.enemies.push(enemy);
        }
    }

    // Input mutators. These apply between frames; all are no-ops once the
    // run is finished, except `restart`.

    /// Translate along the current facing, clamped away from the walls.
    pub fn move_player(&mut self, direction: MoveDirection) {
        if self.is_finished {
            return;
        }
        let step = match direction {
            MoveDirection::Forward => MOVE_STEP,
            MoveDirection::Back => -MOVE_STEP,
        };
        let pos = self.player.pos + heading(self.player.rotation) * step;
        self.player.pos = pos.clamp(
            Vec2::splat(PLAYER_MARGIN),
            Vec2::splat(ARENA_SIZE - PLAYER_MARGIN),
        );
    }

    pub fn rotate_player(&mut self, delta: f32) {
        if self.is_finished {
            return;
        }
        self.player.rotation = wrap_degrees(self.player.rotation + delta);
    }

    /// Fire from the player's position along their facing.
    pub fn fire_manual(&mut self) {
        if self.is_finished {
            return;
        }
        log::debug!("projectile fired at {:.0} degrees", self.player.rotation);
        self.projectiles
            .push(Projectile::new(self.player.pos, self.player.rotation, false));
    }

    pub fn toggle_auto_mode(&mut self) {
        if self.is_finished {
            return;
        }
        self.player.auto_mode = !self.player.auto_mode;
    }

    pub fn toggle_camera_mode(&mut self) {
        if self.is_finished {
            return;
        }
        self.camera.toggle_mode();
    }

    pub fn adjust_camera(&mut self, radius_delta: f32, elevation_delta: f32) {
        if self.is_finished {
            return;
        }
        self.camera.adjust(radius_delta, elevation_delta);
    }

    pub fn orbit_camera(&mut self, delta: f32) {
        if self.is_finished {
            return;
        }
        self.camera.orbit(delta);
    }

    /// Start a fresh run. Only valid once the current one is finished.
    pub fn restart(&mut self) {
        if !self.is_finished {
            return;
        }
        self.reset();
    }

    /// Full-state reset: player back to defaults, third-person camera,
    /// projectiles cleared, fresh population with the loose exclusion.
    /// Auto-targeting state carries across runs.
    fn reset(&mut self) {
        self.player.pos = Vec2::splat(ARENA_SIZE / 2.0);
        self.player.rotation = 0.0;
        self.player.health = PLAYER_START_HEALTH;
        self.player.points = 0;
        self.player.shots_missed = 0;
        self.camera.mode = CameraMode::ThirdPerson;
        self.is_finished = false;
        self.projectiles.clear();
        self.populate_enemies(INITIAL_SPAWN_EXCLUSION);
    }
}

/// Arena corner (inset by the spawn margin) farthest from `pos`.
fn farthest_corner(pos: Vec2) -> Vec2 {
    let lo = SPAWN_MARGIN;
    let hi = ARENA_SIZE - SPAWN_MARGIN;
    Vec2::new(
        if pos.x < ARENA_SIZE / 2.0 { hi } else { lo },
        if pos.y < ARENA_SIZE / 2.0 { hi } else { lo },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_enemy_pursue_fixed_step() {
        let mut enemy = Enemy::new(Vec2::ZERO);
        let target = Vec2::new(6.0, 8.0); // distance 10
        enemy.pursue(target);
        assert!((enemy.pos.length() - ENEMY_SPEED).abs() < 1e-7);
        assert!((enemy.pos - Vec2::new(0.0009, 0.0012)).length() < 1e-6);

        // Zero-length pursuit vector moves nothing
        let mut stacked = Enemy::new(Vec2::splat(3.0));
        stacked.pursue(Vec2::splat(3.0));
        assert_eq!(stacked.pos, Vec2::splat(3.0));
    }

    #[test]
    fn test_enemy_pulse_flips_at_bounds() {
        let mut enemy = Enemy::new(Vec2::ZERO);
        let mut pulses = 0;
        while enemy.shrinking {
            enemy.pulse();
            pulses += 1;
            assert!(enemy.scale >= SCALE_MIN && enemy.scale <= SCALE_MAX);
            assert!(pulses < 1000, "never reached the lower bound");
        }
        assert_eq!(enemy.scale, SCALE_MIN);
        assert_eq!(pulses, 201);

        pulses = 0;
        while !enemy.shrinking {
            enemy.pulse();
            pulses += 1;
            assert!(enemy.scale >= SCALE_MIN && enemy.scale <= SCALE_MAX);
            assert!(pulses < 1000, "never reached the upper bound");
        }
        assert_eq!(enemy.scale, SCALE_MAX);
        assert_eq!(pulses, 301);
    }

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new(7);
        assert!(!session.is_finished);
        assert_eq!(session.player.pos, Vec2::splat(7.5));
        assert_eq!(session.player.health, PLAYER_START_HEALTH);
        assert_eq!(session.player.points, 0);
        assert_eq!(session.enemies.len(), ENEMY_COUNT);
        assert!(session.projectiles.is_empty());
    }

    #[test]
    fn test_initial_spawns_respect_loose_exclusion() {
        let session = Session::new(42);
        let p = session.player.pos;
        for enemy in &session.enemies {
            assert!((enemy.pos.x - p.x).abs() > INITIAL_SPAWN_EXCLUSION);
            assert!((enemy.pos.y - p.y).abs() > INITIAL_SPAWN_EXCLUSION);
        }
    }

    #[test]
    fn test_spawn_fallback_terminates() {
        let mut session = Session::new(3);
        // Impossible exclusion forces the retry cap and the corner fallback
        let enemy = session.spawn_enemy(ARENA_SIZE);
        assert_eq!(enemy.pos, Vec2::splat(SPAWN_MARGIN));
    }

    #[test]
    fn test_move_player_translates_and_clamps() {
        let mut session = Session::new(1);
        session.move_player(MoveDirection::Forward);
        // Facing 0° moves along +z
        assert!((session.player.pos.y - 7.7).abs() < 1e-5);
        assert!((session.player.pos.x - 7.5).abs() < 1e-5);

        for _ in 0..100 {
            session.move_player(MoveDirection::Forward);
        }
        assert_eq!(session.player.pos.y, ARENA_SIZE - PLAYER_MARGIN);
    }

    #[test]
    fn test_rotate_player_wraps() {
        let mut session = Session::new(1);
        session.rotate_player(-TURN_STEP);
        assert_eq!(session.player.rotation, 355.0);
        session.rotate_player(TURN_STEP);
        assert_eq!(session.player.rotation, 0.0);
    }

    #[test]
    fn test_fire_manual_uses_pose() {
        let mut session = Session::new(1);
        session.rotate_player(TURN_STEP);
        session.fire_manual();
        let shot = &session.projectiles[0];
        assert_eq!(shot.pos, session.player.pos);
        assert_eq!(shot.angle, TURN_STEP);
        assert!(!shot.auto);
    }

    #[test]
    fn test_mutators_inert_when_finished() {
        let mut session = Session::new(1);
        session.is_finished = true;
        let before = session.player.clone();

        session.move_player(MoveDirection::Forward);
        session.rotate_player(TURN_STEP);
        session.fire_manual();
        session.toggle_auto_mode();
        session.orbit_camera(CAMERA_ORBIT_STEP);
        session.adjust_camera(1.0, 1.0);

        assert_eq!(session.player.pos, before.pos);
        assert_eq!(session.player.rotation, before.rotation);
        assert_eq!(session.player.auto_mode, before.auto_mode);
        assert!(session.projectiles.is_empty());
        assert_eq!(session.camera, Camera::default());
    }

    #[test]
    fn test_restart_only_when_finished() {
        let mut session = Session::new(1);
        session.player.points = 50;
        session.restart();
        assert_eq!(session.player.points, 50);

        session.is_finished = true;
        session.restart();
        assert!(!session.is_finished);
        assert_eq!(session.player.points, 0);
        assert_eq!(session.player.health, PLAYER_START_HEALTH);
        assert_eq!(session.player.shots_missed, 0);
        assert_eq!(session.player.pos, Vec2::splat(7.5));
        assert_eq!(session.player.rotation, 0.0);
        assert_eq!(session.enemies.len(), ENEMY_COUNT);
        for enemy in &session.enemies {
            assert!((enemy.pos.x - 7.5).abs() > INITIAL_SPAWN_EXCLUSION);
            assert!((enemy.pos.y - 7.5).abs() > INITIAL_SPAWN_EXCLUSION);
        }
    }

    #[test]
    fn test_restart_forces_third_person() {
        let mut session = Session::new(1);
        session.toggle_camera_mode();
        assert_eq!(session.camera.mode, CameraMode::FirstPerson);
        session.is_finished = true;
        session.restart();
        assert_eq!(session.camera.mode, CameraMode::ThirdPerson);
    }

    #[test]
    fn test_session_snapshot_round_trip() {
        let session = Session::new(99);
        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.seed, session.seed);
        assert_eq!(restored.enemies.len(), session.enemies.len());
        assert_eq!(restored.player.pos, session.player.pos);
    }

    proptest! {
        #[test]
        fn player_stays_clamped(seed in 0u64..1000, moves in prop::collection::vec(0u8..4, 0..200)) {
            let mut session = Session::new(seed);
            for m in moves {
                match m {
                    0 => session.move_player(MoveDirection::Forward),
                    1 => session.move_player(MoveDirection::Back),
                    2 => session.rotate_player(TURN_STEP),
                    _ => session.rotate_player(-TURN_STEP),
                }
            }
            let p = session.player.pos;
            prop_assert!(p.x >= PLAYER_MARGIN && p.x <= ARENA_SIZE - PLAYER_MARGIN);
            prop_assert!(p.y >= PLAYER_MARGIN && p.y <= ARENA_SIZE - PLAYER_MARGIN);
        }

        #[test]
        fn spawns_always_inside_spawn_area(seed in 0u64..1000) {
            let mut session = Session::new(seed);
            let enemy = session.spawn_enemy(SPAWN_EXCLUSION);
            prop_assert!(enemy.pos.x >= SPAWN_MARGIN && enemy.pos.x <= ARENA_SIZE - SPAWN_MARGIN);
            prop_assert!(enemy.pos.y >= SPAWN_MARGIN && enemy.pos.y <= ARENA_SIZE - SPAWN_MARGIN);
            prop_assert!((enemy.pos.x - 7.5).abs() > SPAWN_EXCLUSION);
            prop_assert!((enemy.pos.y - 7.5).abs() > SPAWN_EXCLUSION);
        }
    }
}
