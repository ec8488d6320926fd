//! Per-frame session engine
//!
//! One [`tick`] advances the whole session by `dt` in a strict order:
//! player clamping, player fire, projectile hits, death sweep (and boss
//! spawn), bounds culling, powerup pickup, enemy fire, player hits, motion
//! integration, animation cleanup, win/lose evaluation, and finally the
//! scripted milestone triggers. All collection removal is expressed as
//! retain/compact, never index juggling.

use rand::Rng;

use super::collision::{enemy_shot_exited, player_shot_exited, powerup_exited};
use super::nav::{Nav, Outcome};
use super::ships::EnemyShip;
use super::state::{GameState, PlayState, Powerup, PowerupKind, SoundCue};
use crate::consts::*;

/// Input snapshot for one frame. Movement and fire keys are level-triggered
/// ("is the key held"); the one-shot fields are edges the shell clears
/// after each consumed tick.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Primary fire (laser pattern).
    pub fire: bool,
    /// Secondary fire (missile cluster).
    pub missile: bool,
    /// One-shot: toggle the debug overlay.
    pub debug_toggle: bool,
    /// One-shot: grant both powerups.
    pub debug_cheat: bool,
    pub menu_up: bool,
    pub menu_down: bool,
    pub confirm: bool,
    pub cancel: bool,
    /// Some key went down this frame; end screens only care about this.
    pub any_key: bool,
}

/// Advance the session by one frame. Win/lose transitions are written into
/// `nav`; the frame ends early once the session is decided.
pub fn tick(state: &mut GameState, nav: &mut Nav, input: &TickInput, dt: f32) {
    if input.debug_toggle {
        state.debug_overlay = !state.debug_overlay;
    }
    if input.debug_cheat {
        state.player.shield = true;
        state.player.fire = true;
    }

    // 1. Bound the player to the arena (using last frame's integration).
    state.player.clamp_to_arena(&state.arena);

    // 2. Player fire, gated on the shared cooldown being exactly zero.
    if state.laser_cooldown != 0.0 {
        state.laser_cooldown = (state.laser_cooldown - dt).max(0.0);
    }
    if input.fire && state.laser_cooldown == 0.0 {
        state.laser_cooldown = PLAYER_RATE_OF_FIRE;
        let shots = state.player.fire_lasers();
        state.player_shots.extend(shots);
        state.push_sound(SoundCue::PlayerLaser);
    }
    if input.missile && state.laser_cooldown == 0.0 {
        state.laser_cooldown = PLAYER_RATE_OF_FIRE;
        let shots = state.player.fire_missiles(&state.arena);
        state.player_shots.extend(shots);
        state.push_sound(SoundCue::PlayerMissile);
    }

    // 3. Player shots against enemy ships: the first ship containing the
    // shot's origin takes the damage and the shot is consumed.
    {
        let GameState {
            player_shots,
            enemies,
            ..
        } = state;
        player_shots.retain(|shot| {
            match enemies
                .iter_mut()
                .find(|e| e.bounds().contains(shot.kin.pos))
            {
                Some(enemy) => {
                    enemy.hit(shot.damage);
                    false
                }
                None => true,
            }
        });
    }

    // 4. Sweep the dead: effects, score, sound, and possibly the boss.
    let mut kills = Vec::new();
    state.enemies.retain(|e| {
        if e.hp <= 0 {
            kills.push(e.kin.pos);
            false
        } else {
            true
        }
    });
    for pos in kills {
        state.spawn_kill_effects(pos);
        state.push_sound(SoundCue::Explosion);
    }
    if state.enemies.is_empty() && !state.boss_active {
        state.enemies.push(EnemyShip::boss(&state.arena));
        state.boss_active = true;
    }

    // 5. Cull whatever left the arena.
    let arena = state.arena;
    state
        .player_shots
        .retain(|s| !player_shot_exited(s, &arena, dt));
    state
        .enemy_shots
        .retain(|s| !enemy_shot_exited(s, &arena, dt));
    state.powerups.retain(|p| !powerup_exited(p.kin.pos, &arena));

    // 6. Powerup pickup. The effect escalates by what the player already
    // holds, not by the drop's own kind: shield first, then fire.
    {
        let GameState {
            player, powerups, ..
        } = state;
        let bounds = player.bounds();
        powerups.retain(|p| {
            if bounds.contains(p.kin.pos) {
                if player.shield {
                    player.fire = true;
                }
                player.shield = true;
                false
            } else {
                true
            }
        });
    }

    // 7. Enemy volley on its own cooldown: one random clear-to-fire ship,
    // plus the bonus ship concurrently if one is designated.
    if state.enemy_laser_cooldown != 0.0 {
        state.enemy_laser_cooldown = (state.enemy_laser_cooldown - dt).max(0.0);
    }
    if state.enemy_laser_cooldown == 0.0 && !state.enemies.is_empty() {
        state.enemy_laser_cooldown = ENEMY_RATE_OF_FIRE;
        let mut fired = false;
        if let Some(i) = pick_clear_shooter(state) {
            let shots = state.enemies[i].fire();
            state.enemy_shots.extend(shots);
            fired = true;
        }
        if let Some(bonus) = state.bonus_index {
            if let Some(ship) = state.enemies.iter().find(|e| e.index == bonus) {
                let shots = ship.fire();
                state.enemy_shots.extend(shots);
                fired = true;
            }
        }
        if fired {
            state.push_sound(SoundCue::EnemyLaser);
        }
    }

    // 8. Enemy shots against the player.
    {
        let GameState {
            player,
            enemy_shots,
            ..
        } = state;
        let bounds = player.bounds();
        enemy_shots.retain(|shot| {
            if bounds.contains(shot.kin.pos) {
                player.hit(shot.damage);
                false
            } else {
                true
            }
        });
    }

    // 9. Integrate motion for everything still alive.
    state.player.steer(input.left, input.right);
    state.player.kin.integrate(dt);
    for enemy in &mut state.enemies {
        enemy.update(dt);
    }
    for shot in &mut state.player_shots {
        shot.update(dt);
    }
    for shot in &mut state.enemy_shots {
        shot.update(dt);
    }
    for powerup in &mut state.powerups {
        powerup.kin.integrate(dt);
    }
    for anim in &mut state.animations {
        anim.update(dt);
    }
    {
        // Starfield scroll; stars wrap back to the bottom at a fresh column.
        let GameState {
            stars, rng, arena, ..
        } = state;
        for star in stars.iter_mut() {
            star.y -= dt * STAR_SPEED;
            if star.y < arena.min_y {
                star.y = arena.max_y;
                star.x = rng.random_range(arena.min_x..arena.max_x);
            }
        }
    }

    // 10. Drop finished animations.
    state.animations.retain(|a| a.state != PlayState::Stopped);

    // 11. Win/lose. The frame ends with the session.
    if state.enemies.is_empty() {
        state.boss_active = false;
        nav.finish_session(Outcome::Victory);
        return;
    }
    if state.player.hp <= 0 {
        nav.finish_session(Outcome::Defeat);
        return;
    }
    if state.enemies.iter().any(|e| e.kin.pos.y > state.arena.max_y) {
        nav.finish_session(Outcome::Defeat);
        return;
    }

    // 12. Scripted milestones, keyed on the roster size. Either trigger
    // retries on a later frame if no ship is clear to act right now.
    if state.powerup_milestones.first().copied() == Some(state.enemies.len()) {
        if let Some(i) = pick_clear_shooter(state) {
            let kind = if state.player.shield {
                PowerupKind::Fire
            } else {
                PowerupKind::Shield
            };
            let pos = state.enemies[i].kin.pos;
            state.powerups.push(Powerup::new(pos, kind));
            state.powerup_milestones.remove(0);
        }
    }
    if state.bonus_milestones.first().copied() == Some(state.enemies.len()) {
        if let Some(i) = pick_clear_shooter(state) {
            let arena = state.arena;
            state.bonus_index = Some(state.enemies[i].index);
            state.enemies[i].begin_escape(&arena);
            state.bonus_milestones.remove(0);
        }
    }
}

/// Pick a random enemy that is clear to fire: no other ship in the roster
/// sits directly below it (its shot would hit a friend). Returns `None`
/// when every ship is shadowed, in which case the caller skips this frame.
fn pick_clear_shooter(state: &mut GameState) -> Option<usize> {
    let eligible: Vec<usize> = (0..state.enemies.len())
        .filter(|&i| {
            let shooter = &state.enemies[i];
            !state.enemies.iter().enumerate().any(|(j, other)| {
                let b = other.bounds();
                j != i
                    && shooter.kin.pos.x > b.min.x
                    && shooter.kin.pos.x < b.max.x
                    && shooter.kin.pos.y < b.min.y
            })
        })
        .collect();
    if eligible.is_empty() {
        return None;
    }
    let pick = state.rng.random_range(0..eligible.len());
    Some(eligible[pick])
}
