//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - One update per frame, uniform `dt`
//! - Seeded RNG only
//! - Stable iteration order (insertion order is the collision tie-break)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod nav;
pub mod ships;
pub mod state;
pub mod tick;
pub mod weapons;

pub use entity::{BezierPath, Kinematics, Rect, SpriteId, de_casteljau};
pub use nav::{MenuAction, Nav, Outcome, Screen};
pub use ships::{EnemyShip, Movement, PlayerShip};
pub use state::{
    Animation, GameEvent, GameState, LoopMode, PlayState, Powerup, PowerupKind, SoundCue,
};
pub use tick::{TickInput, tick};
pub use weapons::{FiringPattern, Projectile, ProjectileKind, WeaponSpec, fire_missile_cluster};
