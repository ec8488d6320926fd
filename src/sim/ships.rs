//! Ship behaviors
//!
//! The player ship maps held keys straight onto horizontal velocity; enemy
//! ships run a small movement state machine: horizontal patrol with a
//! stepped descent at each patrol bound, plus a scripted Bezier escape loop
//! the session can trigger on a designated bonus ship.

use glam::Vec2;

use super::entity::{BezierPath, Kinematics, Rect, SpriteId};
use super::weapons::{self, FiringPattern, Projectile, WeaponSpec};
use crate::consts::*;
use crate::Arena;

/// The player-controlled ship. Single instance, owned by the session and
/// rebuilt whole on every session reset.
#[derive(Debug, Clone)]
pub struct PlayerShip {
    pub kin: Kinematics,
    pub hp: i32,
    /// Absorbs the next hit, then drops together with `fire`.
    pub shield: bool,
    /// Upgrades the laser pattern from single to burst.
    pub fire: bool,
    /// Engine flares for rendering; thrusting left lights the right engine.
    pub left_engine: bool,
    pub right_engine: bool,
    speed: f32,
    single: FiringPattern,
    burst: FiringPattern,
}

impl PlayerShip {
    pub fn new(arena: &Arena) -> Self {
        let laser = WeaponSpec {
            sprite: SpriteId::PlayerLaser,
            size: PLAYER_LASER_SIZE,
            speed: PLAYER_LASER_SPEED,
            damage: PLAYER_LASER_DAMAGE,
        };
        Self {
            kin: Kinematics::new(
                Vec2::new(arena.center_x(), arena.max_y - 50.0),
                Vec2::ZERO,
                Vec2::ZERO,
                PLAYER_SIZE,
                SpriteId::PlayerShip,
            ),
            hp: PLAYER_HP,
            shield: false,
            fire: false,
            left_engine: false,
            right_engine: false,
            speed: PLAYER_SPEED,
            single: FiringPattern::SingleLaser(laser),
            burst: FiringPattern::BurstLaser(laser),
        }
    }

    /// Rebuild the horizontal velocity from held movement keys. Right wins
    /// when both are held.
    pub fn steer(&mut self, left: bool, right: bool) {
        self.kin.vel = Vec2::ZERO;
        self.right_engine = left;
        self.left_engine = right;
        if left {
            self.kin.vel.x = -self.speed;
        }
        if right {
            self.kin.vel.x = self.speed;
        }
    }

    /// Snap back inside the arena's horizontal bounds after integration.
    pub fn clamp_to_arena(&mut self, arena: &Arena) {
        let half = self.kin.size.x / 2.0;
        if self.kin.pos.x - half < arena.min_x {
            self.kin.pos.x = arena.min_x + half;
        }
        if self.kin.pos.x + half > arena.max_x {
            self.kin.pos.x = arena.max_x - half;
        }
    }

    /// Apply an incoming hit. An active shield absorbs it but costs both
    /// powerups in the same call; otherwise hp drops by the full damage
    /// (no floor - defeat checks hp <= 0). Returns the resulting hp.
    pub fn hit(&mut self, damage: i32) -> i32 {
        if self.shield {
            self.shield = false;
            self.fire = false;
        } else {
            self.hp -= damage;
        }
        self.hp
    }

    /// Fire the currently selected laser pattern: burst while the fire
    /// powerup is held, single otherwise.
    pub fn fire_lasers(&self) -> Vec<Projectile> {
        let pattern = if self.fire { &self.burst } else { &self.single };
        pattern.fire(self.kin.pos)
    }

    /// Fire the missile cluster (secondary weapon).
    pub fn fire_missiles(&self, arena: &Arena) -> Vec<Projectile> {
        let spec = WeaponSpec {
            sprite: SpriteId::Missile,
            size: PLAYER_MISSILE_SIZE,
            speed: PLAYER_MISSILE_SPEED,
            damage: PLAYER_MISSILE_DAMAGE,
        };
        weapons::fire_missile_cluster(spec, self.kin.pos, arena)
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.kin.bounds()
    }
}

/// Enemy movement modes.
#[derive(Debug, Clone)]
pub enum Movement {
    /// Horizontal patrol between the ship's bounds with a stepped descent
    /// at each reversal.
    Default,
    /// Scripted escape loop; reverts to `Default` when the path time runs
    /// out.
    Bezier(BezierPath),
}

/// An enemy ship (the boss is the same ship with more hp and its movement
/// locked to patrol).
#[derive(Debug, Clone)]
pub struct EnemyShip {
    pub kin: Kinematics,
    /// Spawn slot in the grid; identifies the ship across the session.
    pub index: usize,
    pub hp: i32,
    pub speed: f32,
    pub patrol_min_x: f32,
    pub patrol_max_x: f32,
    pub movement: Movement,
    pub weapon: FiringPattern,
    pub boss: bool,
}

impl EnemyShip {
    /// A grid grunt in spawn slot `index` (row-major, 6 per row).
    pub fn grunt(index: usize, arena: &Arena) -> Self {
        let col = (index % ENEMY_COLS) as f32;
        let row = (index / ENEMY_COLS) as f32;
        let pos = Vec2::new(
            arena.min_x + 200.0 + col * ENEMY_GRID_STEP_X + 25.0,
            arena.min_y + row * ENEMY_GRID_STEP_Y + 20.0,
        );
        Self {
            kin: Kinematics::new(
                pos,
                Vec2::new(ENEMY_SPEED, 0.0),
                Vec2::ZERO,
                ENEMY_SIZE,
                SpriteId::Enemy,
            ),
            index,
            hp: ENEMY_HP,
            speed: ENEMY_SPEED,
            patrol_min_x: pos.x - ENEMY_PATROL_HALF_WIDTH,
            patrol_max_x: pos.x + ENEMY_PATROL_HALF_WIDTH,
            movement: Movement::Default,
            weapon: enemy_laser(),
            boss: false,
        }
    }

    /// The boss: spawned centered near the top once the grid is cleared.
    /// It cruises faster than it patrols - the reversal at the first bound
    /// drops it back to patrol speed.
    pub fn boss(arena: &Arena) -> Self {
        let pos = Vec2::new(arena.center_x(), arena.min_y + 100.0);
        Self {
            kin: Kinematics::new(
                pos,
                Vec2::new(BOSS_CRUISE_SPEED, 0.0),
                Vec2::ZERO,
                BOSS_SIZE,
                SpriteId::Boss,
            ),
            index: ENEMY_COUNT,
            hp: BOSS_HP,
            speed: ENEMY_SPEED,
            patrol_min_x: pos.x - ENEMY_PATROL_HALF_WIDTH,
            patrol_max_x: pos.x + ENEMY_PATROL_HALF_WIDTH,
            movement: Movement::Default,
            weapon: enemy_laser(),
            boss: true,
        }
    }

    pub fn update(&mut self, dt: f32) {
        match &mut self.movement {
            Movement::Default => {
                self.kin.integrate(dt);
                if self.kin.pos.x < self.patrol_min_x || self.kin.pos.x > self.patrol_max_x {
                    // Reverse and begin a row step: downward velocity with
                    // an upward acceleration that cancels it out.
                    self.kin.vel = Vec2::new(-self.kin.vel.x, self.speed);
                    self.kin.accel.y = -self.speed;
                }
                if self.kin.vel.y < 0.0 {
                    // Row step complete.
                    self.kin.vel.y = 0.0;
                    self.kin.accel.y = 0.0;
                }
            }
            Movement::Bezier(path) => {
                self.kin.pos = path.advance(dt);
                if path.finished() {
                    self.kin.accel = Vec2::ZERO;
                    self.kin.vel = Vec2::new(self.speed, 0.0);
                    self.movement = Movement::Default;
                }
            }
        }
    }

    /// Switch to the scripted escape loop: down to mid-height, across to
    /// the nearer patrol bound, back up to the original height. No-op for
    /// the boss, whose movement stays locked to patrol.
    pub fn begin_escape(&mut self, arena: &Arena) {
        if self.boss {
            return;
        }
        let pos = self.kin.pos;
        let bound = if pos.x - self.patrol_min_x > self.patrol_max_x - pos.x {
            self.patrol_max_x
        } else {
            self.patrol_min_x
        };
        let mid_y = arena.max_y / 2.0;
        let points = vec![
            pos,
            Vec2::new(pos.x, mid_y),
            Vec2::new(bound, mid_y),
            Vec2::new(bound, pos.y),
        ];
        let total_time = ((self.patrol_max_x - self.patrol_min_x) / self.speed).abs();
        self.movement = Movement::Bezier(BezierPath::new(points, total_time));
    }

    /// Enemies have no shielding; damage always lands. Returns the
    /// resulting hp.
    pub fn hit(&mut self, damage: i32) -> i32 {
        self.hp -= damage;
        self.hp
    }

    pub fn fire(&self) -> Vec<Projectile> {
        self.weapon.fire(self.kin.pos)
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.kin.bounds()
    }

    pub fn in_escape(&self) -> bool {
        matches!(self.movement, Movement::Bezier(_))
    }
}

fn enemy_laser() -> FiringPattern {
    FiringPattern::SingleLaser(WeaponSpec {
        sprite: SpriteId::EnemyLaser,
        size: ENEMY_LASER_SIZE,
        // Negative speed fires downward.
        speed: -ENEMY_LASER_SPEED,
        damage: ENEMY_LASER_DAMAGE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ARENA;

    #[test]
    fn shielded_hit_clears_both_powerups_and_keeps_hp() {
        let mut player = PlayerShip::new(&ARENA);
        player.shield = true;
        player.fire = true;
        let hp = player.hit(0);
        assert_eq!(hp, PLAYER_HP);
        assert!(!player.shield);
        assert!(!player.fire);

        player.shield = true;
        player.hit(10_000);
        assert_eq!(player.hp, PLAYER_HP);
        assert!(!player.shield);
    }

    #[test]
    fn unshielded_hit_subtracts_exactly_and_can_go_negative() {
        let mut player = PlayerShip::new(&ARENA);
        assert_eq!(player.hit(30), 70);
        assert_eq!(player.hit(100), -30);
    }

    #[test]
    fn fire_powerup_selects_burst() {
        let mut player = PlayerShip::new(&ARENA);
        assert_eq!(player.fire_lasers().len(), 1);
        player.fire = true;
        assert_eq!(player.fire_lasers().len(), 3);
    }

    #[test]
    fn steer_and_clamp_respect_arena_bounds() {
        let mut player = PlayerShip::new(&ARENA);
        player.steer(true, false);
        assert_eq!(player.kin.vel.x, -PLAYER_SPEED);
        assert!(player.right_engine);
        assert!(!player.left_engine);

        // Drive well past the left bound, then clamp.
        player.kin.pos.x = ARENA.min_x - 40.0;
        player.clamp_to_arena(&ARENA);
        assert_eq!(player.kin.pos.x, ARENA.min_x + PLAYER_SIZE.x / 2.0);
    }

    #[test]
    fn patrol_reversal_steps_down_then_levels_out() {
        let mut ship = EnemyShip::grunt(0, &ARENA);
        let start_y = ship.kin.pos.y;
        // Just shy of the bound, moving toward it: the next step crosses.
        ship.kin.pos.x = ship.patrol_max_x - 0.5;
        let vx = ship.kin.vel.x;

        ship.update(1.0 / 120.0);
        assert_eq!(ship.kin.vel.x, -vx);
        assert_eq!(ship.kin.vel.y, ENEMY_SPEED);
        assert_eq!(ship.kin.accel.y, -ENEMY_SPEED);

        // The upward acceleration cancels the step in about a second.
        for _ in 0..150 {
            ship.update(1.0 / 120.0);
        }
        assert_eq!(ship.kin.vel.y, 0.0);
        assert_eq!(ship.kin.accel.y, 0.0);
        assert!(ship.kin.pos.y > start_y);
    }

    #[test]
    fn escape_path_targets_nearer_bound_and_reverts() {
        let mut ship = EnemyShip::grunt(3, &ARENA);
        // Push the ship toward its max bound: the escape should loop there.
        ship.kin.pos.x = ship.patrol_max_x - 10.0;
        let origin = ship.kin.pos;
        ship.begin_escape(&ARENA);

        let Movement::Bezier(path) = &ship.movement else {
            panic!("escape did not switch to curve-following");
        };
        assert_eq!(path.points()[0], origin);
        assert_eq!(path.points()[1], Vec2::new(origin.x, ARENA.max_y / 2.0));
        assert_eq!(
            path.points()[3],
            Vec2::new(ship.patrol_max_x, origin.y)
        );
        assert!((path.total_time - 4.0).abs() < 1e-3);

        // Run the loop out; the ship must revert to patrol with a clean
        // horizontal velocity.
        for _ in 0..600 {
            ship.update(1.0 / 120.0);
        }
        assert!(matches!(ship.movement, Movement::Default));
    }

    #[test]
    fn boss_ignores_escape_promotion() {
        let mut boss = EnemyShip::boss(&ARENA);
        assert_eq!(boss.hp, BOSS_HP);
        boss.begin_escape(&ARENA);
        assert!(matches!(boss.movement, Movement::Default));
    }
}
