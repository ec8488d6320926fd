//! Firing patterns - strategies that turn a firing actor into projectiles
//!
//! Decouples "who is firing" from "what pattern of projectiles results".
//! Patterns never fail: an actor that cannot resolve a pattern is a
//! programming error, not a runtime condition.

use std::f32::consts::PI;

use glam::Vec2;

use super::entity::{BezierPath, Kinematics, SpriteId};
use crate::Arena;

/// A projectile in flight. Lasers fly straight; missiles follow a Bezier
/// path until its allotted time runs out, then continue linearly.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub kin: Kinematics,
    pub damage: i32,
    pub kind: ProjectileKind,
}

#[derive(Debug, Clone)]
pub enum ProjectileKind {
    Laser,
    Missile { path: BezierPath, speed: f32 },
}

impl Projectile {
    pub fn update(&mut self, dt: f32) {
        match &mut self.kind {
            ProjectileKind::Laser => self.kin.integrate(dt),
            ProjectileKind::Missile { path, speed } => {
                if path.finished() {
                    self.kin.integrate(dt);
                } else {
                    self.kin.pos = path.advance(dt);
                    if path.finished() {
                        // Terminal hand-off: curve time is spent, continue
                        // on a straight exit trajectory.
                        self.kin.accel = Vec2::ZERO;
                        self.kin.vel = Vec2::new(*speed, 0.0);
                    }
                }
            }
        }
    }

    pub fn is_missile(&self) -> bool {
        matches!(self.kind, ProjectileKind::Missile { .. })
    }
}

/// Per-pattern projectile configuration.
#[derive(Debug, Clone, Copy)]
pub struct WeaponSpec {
    pub sprite: SpriteId,
    pub size: Vec2,
    /// Muzzle speed along the vertical firing axis; shots leave at
    /// `(0, -speed)`, so positive fires up (player) and negative fires
    /// down (enemy).
    pub speed: f32,
    pub damage: i32,
}

/// Uniform firing strategies, polymorphic over `fire(origin)`.
#[derive(Debug, Clone)]
pub enum FiringPattern {
    /// One shot straight along the firing axis.
    SingleLaser(WeaponSpec),
    /// Three shots: one straight, two splayed 5π/12 rad off the vertical.
    BurstLaser(WeaponSpec),
}

impl FiringPattern {
    pub fn fire(&self, origin: Vec2) -> Vec<Projectile> {
        match self {
            FiringPattern::SingleLaser(spec) => {
                vec![laser(spec, origin, Vec2::new(0.0, -spec.speed))]
            }
            FiringPattern::BurstLaser(spec) => {
                let angle = 5.0 * PI / 12.0;
                vec![
                    laser(spec, origin, Vec2::new(0.0, -spec.speed)),
                    laser(
                        spec,
                        origin,
                        Vec2::new(spec.speed * angle.cos(), -spec.speed * angle.sin()),
                    ),
                    laser(
                        spec,
                        origin,
                        Vec2::new(-spec.speed * angle.cos(), -spec.speed * angle.sin()),
                    ),
                ]
            }
        }
    }
}

fn laser(spec: &WeaponSpec, origin: Vec2, vel: Vec2) -> Projectile {
    Projectile {
        kin: Kinematics::new(origin, vel, Vec2::ZERO, spec.size, spec.sprite),
        damage: spec.damage,
        kind: ProjectileKind::Laser,
    }
}

/// The richer, context-dependent volley: four missiles splitting off on
/// hand-authored Bezier paths relative to the firing position, two curving
/// screen-right and two screen-left. Deliberately a distinct named
/// operation rather than a [`FiringPattern`] variant - it needs the arena,
/// not just an origin.
pub fn fire_missile_cluster(spec: WeaponSpec, origin: Vec2, arena: &Arena) -> Vec<Projectile> {
    let h = arena.height();
    let total_time = (h / spec.speed).abs();

    // `dir` mirrors a path to the other side of the screen.
    let near = |dir: f32| {
        vec![
            origin,
            origin + Vec2::new(dir * 100.0, 0.0),
            origin + Vec2::new(dir * 100.0, -h / 3.0),
            origin + Vec2::new(-dir * 100.0, -h / 3.0),
            origin + Vec2::new(-dir * 100.0, -2.0 * h / 3.0),
            origin + Vec2::new(dir * 100.0, -arena.max_y),
        ]
    };
    let far = |dir: f32| {
        vec![
            origin,
            origin + Vec2::new(dir * 150.0, 0.0),
            origin + Vec2::new(dir * 150.0, -2.0 * h / 3.0),
            origin + Vec2::new(-dir * 150.0, -arena.max_y),
        ]
    };

    [near(1.0), far(1.0), near(-1.0), far(-1.0)]
        .into_iter()
        .map(|points| Projectile {
            kin: Kinematics::new(origin, Vec2::ZERO, Vec2::ZERO, spec.size, spec.sprite),
            damage: spec.damage,
            kind: ProjectileKind::Missile {
                path: BezierPath::new(points, total_time),
                speed: spec.speed,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ARENA;
    use crate::consts::*;

    fn player_laser_spec() -> WeaponSpec {
        WeaponSpec {
            sprite: SpriteId::PlayerLaser,
            size: PLAYER_LASER_SIZE,
            speed: PLAYER_LASER_SPEED,
            damage: PLAYER_LASER_DAMAGE,
        }
    }

    #[test]
    fn single_laser_fires_up_for_positive_speed() {
        let pattern = FiringPattern::SingleLaser(player_laser_spec());
        let shots = pattern.fire(Vec2::new(800.0, 700.0));
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].kin.vel, Vec2::new(0.0, -400.0));
        assert_eq!(shots[0].damage, 100);
    }

    #[test]
    fn single_laser_fires_down_for_negative_speed() {
        let spec = WeaponSpec {
            sprite: SpriteId::EnemyLaser,
            size: ENEMY_LASER_SIZE,
            speed: -ENEMY_LASER_SPEED,
            damage: ENEMY_LASER_DAMAGE,
        };
        let shots = FiringPattern::SingleLaser(spec).fire(Vec2::new(500.0, 100.0));
        assert_eq!(shots[0].kin.vel, Vec2::new(0.0, 400.0));
    }

    #[test]
    fn burst_laser_splays_three_shots_at_equal_speed() {
        let pattern = FiringPattern::BurstLaser(player_laser_spec());
        let shots = pattern.fire(Vec2::new(800.0, 700.0));
        assert_eq!(shots.len(), 3);
        assert_eq!(shots[0].kin.vel, Vec2::new(0.0, -400.0));
        // Side shots mirror each other and keep the speed magnitude.
        assert!((shots[1].kin.vel.x + shots[2].kin.vel.x).abs() < 1e-3);
        assert!((shots[1].kin.vel.y - shots[2].kin.vel.y).abs() < 1e-3);
        for shot in &shots {
            assert!((shot.kin.vel.length() - 400.0).abs() < 1e-2);
        }
        // sin(5*pi/12) ~ 0.966: the vertical component still dominates.
        assert!(shots[1].kin.vel.y < -350.0);
    }

    #[test]
    fn missile_cluster_splits_two_per_side() {
        let spec = WeaponSpec {
            sprite: SpriteId::Missile,
            size: PLAYER_MISSILE_SIZE,
            speed: PLAYER_MISSILE_SPEED,
            damage: PLAYER_MISSILE_DAMAGE,
        };
        let origin = Vec2::new(800.0, 700.0);
        let missiles = fire_missile_cluster(spec, origin, &ARENA);
        assert_eq!(missiles.len(), 4);

        let mut right = 0;
        let mut left = 0;
        for m in &missiles {
            assert_eq!(m.kin.pos, origin);
            assert_eq!(m.damage, 200);
            let ProjectileKind::Missile { path, .. } = &m.kind else {
                panic!("cluster produced a non-missile");
            };
            assert_eq!(path.points()[0], origin);
            assert!((path.total_time - ARENA.height() / 200.0).abs() < 1e-3);
            // Second control point decides the initial curve direction.
            if path.points()[1].x > origin.x {
                right += 1;
            } else {
                left += 1;
            }
        }
        assert_eq!(right, 2);
        assert_eq!(left, 2);
    }

    #[test]
    fn missile_hands_off_to_linear_motion() {
        let spec = WeaponSpec {
            sprite: SpriteId::Missile,
            size: PLAYER_MISSILE_SIZE,
            speed: PLAYER_MISSILE_SPEED,
            damage: PLAYER_MISSILE_DAMAGE,
        };
        let mut missile = fire_missile_cluster(spec, Vec2::new(800.0, 700.0), &ARENA)
            .into_iter()
            .next()
            .unwrap();

        // Burn through the whole curve time.
        let total = ARENA.height() / 200.0;
        let steps = (total / 0.016).ceil() as u32 + 2;
        for _ in 0..steps {
            missile.update(0.016);
        }
        assert_eq!(missile.kin.vel, Vec2::new(200.0, 0.0));
        assert_eq!(missile.kin.accel, Vec2::ZERO);

        // Linear from here on.
        let before = missile.kin.pos;
        missile.update(0.5);
        assert!((missile.kin.pos.x - (before.x + 100.0)).abs() < 1e-2);
        assert!((missile.kin.pos.y - before.y).abs() < 1e-3);
    }
}
