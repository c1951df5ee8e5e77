//! Frame-synchronous simulation module
//!
//! All gameplay logic lives here. One `step` runs per rendered frame; input
//! mutators apply between frames, so no step ever observes a half-applied
//! input. Determinism comes from the seeded session RNG.

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{find_enemy_hit, in_bounds, within_hit_radius};
pub use state::{Enemy, MoveDirection, Player, Projectile, Session};
pub use tick::step;
