//! Session state - everything the game mutates frame to frame
//!
//! One [`GameState`] owns every live collection plus the score, cooldown
//! timers and the seeded RNG. It is created once by the shell and *reset*
//! (not recreated) at the start of each session; nothing carries over.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{Kinematics, SpriteId};
use super::ships::{EnemyShip, PlayerShip};
use super::weapons::Projectile;
use crate::consts::*;
use crate::{ARENA, Arena};

/// Powerup drop kinds; drops escalate shield-first within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerupKind {
    Shield,
    Fire,
}

/// A falling pickup. Destroyed on pickup or on leaving the arena.
#[derive(Debug, Clone)]
pub struct Powerup {
    pub kin: Kinematics,
    pub kind: PowerupKind,
}

impl Powerup {
    pub fn new(pos: Vec2, kind: PowerupKind) -> Self {
        let sprite = match kind {
            PowerupKind::Shield => SpriteId::PowerupShield,
            PowerupKind::Fire => SpriteId::PowerupFire,
        };
        Self {
            kin: Kinematics::new(pos, POWERUP_FALL, POWERUP_FALL, POWERUP_SIZE, sprite),
            kind,
        }
    }
}

/// Loop policy for sheet animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    Once,
    Repeat(u32),
    Infinite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Playing,
    Stopped,
    Paused,
}

/// A sprite-sheet animation with its own motion: explosion VFX and the
/// floating score popups. Culled by the engine once it reaches `Stopped`.
#[derive(Debug, Clone)]
pub struct Animation {
    pub kin: Kinematics,
    pub duration: f32,
    pub elapsed: f32,
    pub loop_mode: LoopMode,
    loops_done: u32,
    /// Size of one sheet cell; frame selection happens at render time.
    pub frame_size: Vec2,
    pub state: PlayState,
}

impl Animation {
    pub fn new(kin: Kinematics, duration: f32, frame_size: Vec2, loop_mode: LoopMode) -> Self {
        Self {
            kin,
            duration,
            elapsed: 0.0,
            loop_mode,
            loops_done: 0,
            frame_size,
            state: PlayState::Playing,
        }
    }

    /// Motion integrates regardless of play state; only the clock pauses.
    pub fn update(&mut self, dt: f32) {
        self.kin.integrate(dt);
        if self.state == PlayState::Playing {
            self.elapsed += dt;
        }
        if self.elapsed >= self.duration {
            match self.loop_mode {
                LoopMode::Once => self.state = PlayState::Stopped,
                LoopMode::Infinite => self.elapsed = 0.0,
                LoopMode::Repeat(n) => {
                    if self.loops_done < n {
                        self.loops_done += 1;
                        self.elapsed = 0.0;
                    } else {
                        self.state = PlayState::Stopped;
                    }
                }
            }
        }
    }

    /// Fraction of the current loop played, in [0, 1].
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }
}

/// One-shot sound cues; fire-and-forget, no completion feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    PlayerLaser,
    PlayerMissile,
    EnemyLaser,
    Explosion,
}

/// Events the simulation surfaces to the platform layer, drained by the
/// shell once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Sound(SoundCue),
}

/// Complete session state.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed, for reproducing a run.
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Read-only copy of the arena bounds, passed into every subsystem.
    pub arena: Arena,
    pub score: u32,
    pub player: PlayerShip,
    pub enemies: Vec<EnemyShip>,
    /// Player lasers and missiles share one collection; insertion order is
    /// the documented collision tie-break.
    pub player_shots: Vec<Projectile>,
    pub enemy_shots: Vec<Projectile>,
    pub powerups: Vec<Powerup>,
    pub animations: Vec<Animation>,
    /// Starfield points, scrolled each frame and respawned at the top.
    pub stars: Vec<Vec2>,
    /// Shared cooldown for both player weapons; fires only at exactly zero.
    pub laser_cooldown: f32,
    pub enemy_laser_cooldown: f32,
    /// Roster sizes that trigger a powerup drop, head first.
    pub powerup_milestones: Vec<usize>,
    /// Roster sizes that promote a random ship to the bonus escape role.
    pub bonus_milestones: Vec<usize>,
    /// Spawn index of the current bonus shooter, if one was promoted.
    pub bonus_index: Option<usize>,
    pub boss_active: bool,
    pub debug_overlay: bool,
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            arena: ARENA,
            score: 0,
            player: PlayerShip::new(&ARENA),
            enemies: Vec::new(),
            player_shots: Vec::new(),
            enemy_shots: Vec::new(),
            powerups: Vec::new(),
            animations: Vec::new(),
            stars: Vec::new(),
            laser_cooldown: 0.0,
            enemy_laser_cooldown: 0.0,
            powerup_milestones: Vec::new(),
            bonus_milestones: Vec::new(),
            bonus_index: None,
            boss_active: false,
            debug_overlay: false,
            events: Vec::new(),
        };
        state.reset(seed);
        state
    }

    /// Full session reinitialization: every collection cleared and
    /// re-seeded, score and player rebuilt. No partial carry-over.
    pub fn reset(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.score = 0;
        self.player = PlayerShip::new(&self.arena);
        self.enemies.clear();
        self.player_shots.clear();
        self.enemy_shots.clear();
        self.powerups.clear();
        self.animations.clear();
        self.laser_cooldown = 0.0;
        self.enemy_laser_cooldown = 0.0;
        self.powerup_milestones = vec![17, 9, 1];
        self.bonus_milestones = vec![19, 13, 7];
        self.bonus_index = None;
        self.boss_active = false;
        self.debug_overlay = false;
        self.events.clear();

        for i in 0..ENEMY_COUNT {
            self.enemies.push(EnemyShip::grunt(i, &self.arena));
        }

        self.stars.clear();
        for _ in 0..STAR_COUNT {
            let x = self.rng.random_range(self.arena.min_x..self.arena.max_x);
            let y = self.rng.random_range(self.arena.min_y..self.arena.max_y);
            self.stars.push(Vec2::new(x, y));
        }
    }

    /// Explosion plus floating score popup at a kill position, and the
    /// per-kill score increment.
    pub fn spawn_kill_effects(&mut self, pos: Vec2) {
        self.animations.push(Animation::new(
            Kinematics::new(
                pos,
                Vec2::ZERO,
                Vec2::ZERO,
                EXPLOSION_SIZE,
                SpriteId::ExplosionSheet,
            ),
            EXPLOSION_DURATION,
            EXPLOSION_SIZE,
            LoopMode::Once,
        ));
        // The popup drifts up and sideways, then falls away.
        self.animations.push(Animation::new(
            Kinematics::new(
                pos + Vec2::new(20.0, -20.0),
                Vec2::new(30.0, -100.0),
                Vec2::new(0.0, 100.0),
                SCORE_POPUP_SIZE,
                SpriteId::ScorePopupSheet,
            ),
            SCORE_POPUP_DURATION,
            SCORE_POPUP_SIZE,
            LoopMode::Repeat(SCORE_POPUP_LOOPS),
        ));
        self.score += SCORE_PER_KILL;
    }

    pub fn push_sound(&mut self, cue: SoundCue) {
        self.events.push(GameEvent::Sound(cue));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_restores_a_fresh_session() {
        let mut state = GameState::new(7);
        state.score = 5000;
        state.player.hp = 3;
        state.player.shield = true;
        state.enemies.drain(0..10);
        let shots = state.player.fire_lasers();
        state.player_shots.extend(shots);
        state
            .powerups
            .push(Powerup::new(Vec2::new(800.0, 400.0), PowerupKind::Fire));
        state.spawn_kill_effects(Vec2::new(700.0, 300.0));
        state.powerup_milestones.remove(0);
        state.bonus_index = Some(3);
        state.boss_active = true;

        state.reset(8);

        assert_eq!(state.score, 0);
        assert_eq!(state.player.hp, PLAYER_HP);
        assert!(!state.player.shield);
        assert_eq!(state.enemies.len(), ENEMY_COUNT);
        assert!(state.player_shots.is_empty());
        assert!(state.enemy_shots.is_empty());
        assert!(state.powerups.is_empty());
        assert!(state.animations.is_empty());
        assert_eq!(state.powerup_milestones, vec![17, 9, 1]);
        assert_eq!(state.bonus_milestones, vec![19, 13, 7]);
        assert_eq!(state.bonus_index, None);
        assert!(!state.boss_active);

        // Grid layout is re-seeded at the original slots.
        let first = &state.enemies[0];
        assert_eq!(first.index, 0);
        assert_eq!(first.kin.pos, Vec2::new(525.0, 70.0));
        let last = &state.enemies[ENEMY_COUNT - 1];
        assert_eq!(last.kin.pos, Vec2::new(1025.0, 220.0));
    }

    #[test]
    fn one_shot_animation_stops_at_duration() {
        let kin = Kinematics::new(
            Vec2::ZERO,
            Vec2::ZERO,
            Vec2::ZERO,
            EXPLOSION_SIZE,
            SpriteId::ExplosionSheet,
        );
        let mut anim = Animation::new(kin, 0.2, EXPLOSION_SIZE, LoopMode::Once);
        anim.update(0.1);
        assert_eq!(anim.state, PlayState::Playing);
        anim.update(0.1);
        assert_eq!(anim.state, PlayState::Stopped);
    }

    #[test]
    fn repeating_animation_rewinds_then_stops() {
        let kin = Kinematics::new(
            Vec2::ZERO,
            Vec2::ZERO,
            Vec2::ZERO,
            SCORE_POPUP_SIZE,
            SpriteId::ScorePopupSheet,
        );
        let mut anim = Animation::new(kin, 0.5, SCORE_POPUP_SIZE, LoopMode::Repeat(2));
        // Three full passes: the initial play plus two repeats.
        for pass in 0..3 {
            anim.update(0.5);
            if pass < 2 {
                assert_eq!(anim.state, PlayState::Playing, "pass {pass}");
                assert_eq!(anim.elapsed, 0.0);
            }
        }
        assert_eq!(anim.state, PlayState::Stopped);
    }

    #[test]
    fn paused_animation_keeps_moving_but_not_playing() {
        let kin = Kinematics::new(
            Vec2::ZERO,
            Vec2::new(30.0, -100.0),
            Vec2::ZERO,
            SCORE_POPUP_SIZE,
            SpriteId::ScorePopupSheet,
        );
        let mut anim = Animation::new(kin, 0.5, SCORE_POPUP_SIZE, LoopMode::Once);
        anim.state = PlayState::Paused;
        anim.update(0.25);
        assert_eq!(anim.elapsed, 0.0);
        assert!(anim.kin.pos.x > 0.0);
    }

    #[test]
    fn same_seed_reproduces_the_starfield() {
        let a = GameState::new(42);
        let b = GameState::new(42);
        assert_eq!(a.stars, b.stars);
        let c = GameState::new(43);
        assert_ne!(a.stars, c.stars);
    }
}
