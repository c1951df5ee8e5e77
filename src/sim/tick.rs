//! Per-frame simulation step
//!
//! Runs once per rendered frame: auto-targeting, projectile advancement,
//! enemy advancement, game-over check, in that order. A finished session is
//! inert until `restart`.

use super::collision::{find_enemy_hit, in_bounds, within_hit_radius};
use super::state::{Projectile, Session};
use crate::consts::*;
use crate::wrap_degrees;

/// Advance the session by one frame. No-op once the run is finished.
pub fn step(session: &mut Session) {
    if session.is_finished {
        return;
    }
    session.frame += 1;

    if session.player.auto_mode {
        auto_target(session);
    }
    advance_projectiles(session);
    advance_enemies(session);
    check_game_over(session);
}

/// Continuous rotation plus round-robin fire on a cooldown. Runs before the
/// projectile pass, so a shot fired here starts moving in the same frame.
fn auto_target(session: &mut Session) {
    let player = &mut session.player;
    player.rotation = wrap_degrees(player.rotation + AUTO_TURN_STEP);

    if player.fire_delay > 0 {
        player.fire_delay -= 1;
    }
    if player.fire_delay == 0 && !session.enemies.is_empty() {
        // Best-effort selection: the live count shifts as enemies die and
        // respawn, so the cursor is reduced modulo the current population.
        let target = &session.enemies[player.target_index % session.enemies.len()];
        let delta = target.pos - player.pos;
        let angle = delta.x.atan2(delta.y).to_degrees();
        session
            .projectiles
            .push(Projectile::new(player.pos, angle, true));
        player.target_index += 1;
        player.fire_delay = AUTO_FIRE_DELAY;
    }
}

/// Move every projectile one velocity step and resolve its outcome. The
/// next-state collection is built explicitly since removal happens mid-pass.
fn advance_projectiles(session: &mut Session) {
    let mut retained = Vec::with_capacity(session.projectiles.len());
    for mut shot in std::mem::take(&mut session.projectiles) {
        shot.pos += shot.heading() * PROJECTILE_VELOCITY;

        if !in_bounds(shot.pos) {
            if !shot.auto {
                session.player.shots_missed += 1;
                log::debug!("projectile missed: {}", session.player.shots_missed);
            }
            continue;
        }
        if let Some(idx) = find_enemy_hit(shot.pos, &session.enemies) {
            session.enemies.remove(idx);
            session.player.points += KILL_POINTS;
            continue;
        }
        retained.push(shot);
    }
    session.projectiles = retained;
}

/// Pursuit, pulse, and player contact for every live enemy, then top the
/// population back up with the steady-state exclusion.
fn advance_enemies(session: &mut Session) {
    let player_pos = session.player.pos;
    let mut survivors = Vec::with_capacity(session.enemies.len());
    for mut enemy in std::mem::take(&mut session.enemies) {
        enemy.pursue(player_pos);
        enemy.pulse();

        if within_hit_radius(enemy.pos, player_pos) {
            // A zero-health player still absorbs the enemy without another
            // decrement.
            if session.player.health > 0 {
                session.player.health -= 1;
                log::debug!("player hit, health {}", session.player.health);
            }
            continue;
        }
        survivors.push(enemy);
    }
    session.enemies = survivors;

    while session.enemies.len() < ENEMY_COUNT {
        let enemy = session.spawn_enemy(SPAWN_EXCLUSION);
        session.enemies.push(enemy);
    }
}

/// Terminal when health is exhausted or too many manual shots went wide.
fn check_game_over(session: &mut Session) {
    if session.player.health == 0 || session.player.shots_missed >= MISS_LIMIT {
        session.is_finished = true;
        log::info!(
            "game over after {} frames: score {}, misses {}",
            session.frame,
            session.player.points,
            session.player.shots_missed
        );
    }
}
