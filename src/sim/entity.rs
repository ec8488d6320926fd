//! Kinematic entity primitives and Bezier-curve motion
//!
//! Every live game object embeds a [`Kinematics`] record and is advanced at
//! most once per frame with semi-implicit Euler integration. Curve followers
//! (missiles, escaping enemies) bypass integration and write their position
//! from a [`BezierPath`] until the path runs out of time, then hand off back
//! to straight-line motion.

use glam::Vec2;

/// Opaque drawable handles. The shell loads the actual assets once at
/// startup; the core only ever passes these around by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteId {
    PlayerShip,
    LeftEngine,
    RightEngine,
    ShieldAura,
    PlayerLaser,
    Missile,
    EnemyLaser,
    Enemy,
    Boss,
    PowerupShield,
    PowerupFire,
    ExplosionSheet,
    ScorePopupSheet,
    BackgroundFar,
    BackgroundNear,
    MenuBackground,
    StartButton,
    StartButtonSelected,
    ExitButton,
    ExitButtonSelected,
    VictoryBanner,
    DefeatBanner,
}

/// Axis-aligned rectangle in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Point containment, edges inclusive.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// Common kinematic sub-record shared by every entity variant.
#[derive(Debug, Clone)]
pub struct Kinematics {
    pub pos: Vec2,
    pub vel: Vec2,
    pub accel: Vec2,
    /// Visual extent in world units, centered on `pos`.
    pub size: Vec2,
    pub sprite: SpriteId,
}

impl Kinematics {
    pub fn new(pos: Vec2, vel: Vec2, accel: Vec2, size: Vec2, sprite: SpriteId) -> Self {
        Self {
            pos,
            vel,
            accel,
            size,
            sprite,
        }
    }

    /// Semi-implicit Euler step: velocity from acceleration first, then
    /// position from the updated velocity.
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.vel += self.accel * dt;
        self.pos += self.vel * dt;
    }

    /// Screen-space bounding rectangle used by all collision tests.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.pos, self.size)
    }
}

/// Evaluate a Bezier curve over `control` at parameter `t` with De
/// Casteljau's algorithm: repeatedly lerp adjacent points until one remains.
/// Values of `t` outside [0, 1] extrapolate the polynomial.
pub fn de_casteljau(control: &[Vec2], t: f32) -> Vec2 {
    debug_assert!(!control.is_empty());
    let mut pts = control.to_vec();
    for i in (1..pts.len()).rev() {
        for j in 0..i {
            pts[j] = pts[j].lerp(pts[j + 1], t);
        }
    }
    pts[0]
}

/// A timed Bezier flight path. `advance` maps elapsed time onto the curve
/// parameter `t = elapsed / total_time`; once `elapsed` exceeds
/// `total_time` the path reports [`finished`](Self::finished) and the owner
/// switches the entity back to linear motion.
#[derive(Debug, Clone)]
pub struct BezierPath {
    points: Vec<Vec2>,
    pub elapsed: f32,
    pub total_time: f32,
}

impl BezierPath {
    pub fn new(points: Vec<Vec2>, total_time: f32) -> Self {
        debug_assert!(points.len() >= 2);
        debug_assert!(total_time > 0.0);
        Self {
            points,
            elapsed: 0.0,
            total_time,
        }
    }

    /// Advance by `dt` and return the new curve position.
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        self.elapsed += dt;
        self.eval(self.elapsed / self.total_time)
    }

    /// Evaluate the curve at parameter `t` without advancing time.
    pub fn eval(&self, t: f32) -> Vec2 {
        de_casteljau(&self.points, t)
    }

    /// True once the allotted flight time has been used up.
    #[inline]
    pub fn finished(&self) -> bool {
        self.elapsed > self.total_time
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }
}
