//! Invaders - a wave-based space shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, firing patterns, collisions, game state)
//! - `render`: Frame building - simulation state to an ordered draw batch
//! - `settings`: User preferences
//!
//! Rendering, audio playback and raw key polling live outside this crate:
//! the shell feeds a [`sim::TickInput`] snapshot each frame and consumes the
//! draw batch and sound cues the core produces.

pub mod render;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;

    /// Window dimensions
    pub const WINDOW_WIDTH: f32 = 1600.0;
    pub const WINDOW_HEIGHT: f32 = 800.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 400.0;
    pub const PLAYER_HP: i32 = 100;
    pub const PLAYER_SIZE: Vec2 = Vec2::new(50.0, 50.0);
    /// Seconds between player shots (shared by lasers and missiles)
    pub const PLAYER_RATE_OF_FIRE: f32 = 0.25;

    /// Player weapons
    pub const PLAYER_LASER_SPEED: f32 = 400.0;
    pub const PLAYER_LASER_DAMAGE: i32 = 100;
    pub const PLAYER_LASER_SIZE: Vec2 = Vec2::new(7.5, 20.0);
    pub const PLAYER_MISSILE_SPEED: f32 = 200.0;
    pub const PLAYER_MISSILE_DAMAGE: i32 = 200;
    pub const PLAYER_MISSILE_SIZE: Vec2 = Vec2::new(10.0, 25.0);

    /// Enemy grid (6 columns x 4 rows)
    pub const ENEMY_COLS: usize = 6;
    pub const ENEMY_ROWS: usize = 4;
    pub const ENEMY_COUNT: usize = ENEMY_COLS * ENEMY_ROWS;
    /// Horizontal spacing between grid columns
    pub const ENEMY_GRID_STEP_X: f32 = 100.0;
    /// Vertical spacing between grid rows
    pub const ENEMY_GRID_STEP_Y: f32 = 50.0;

    /// Enemy defaults
    pub const ENEMY_HP: i32 = 100;
    pub const ENEMY_SPEED: f32 = 100.0;
    pub const ENEMY_SIZE: Vec2 = Vec2::new(50.0, 40.0);
    /// Half-width of each ship's patrol band around its spawn column
    pub const ENEMY_PATROL_HALF_WIDTH: f32 = 200.0;
    pub const ENEMY_LASER_SPEED: f32 = 400.0;
    pub const ENEMY_LASER_DAMAGE: i32 = 100;
    pub const ENEMY_LASER_SIZE: Vec2 = Vec2::new(7.5, 20.0);
    /// Seconds between enemy volleys
    pub const ENEMY_RATE_OF_FIRE: f32 = 0.5;

    /// Boss variant
    pub const BOSS_HP: i32 = 2000;
    pub const BOSS_SIZE: Vec2 = Vec2::new(150.0, 100.0);
    /// Initial horizontal cruise speed; bound reversal falls back to ENEMY_SPEED
    pub const BOSS_CRUISE_SPEED: f32 = 400.0;

    /// Powerups fall straight down, accelerating
    pub const POWERUP_SIZE: Vec2 = Vec2::new(30.0, 30.0);
    pub const POWERUP_FALL: Vec2 = Vec2::new(0.0, 100.0);

    /// Effects
    pub const EXPLOSION_DURATION: f32 = 0.2;
    pub const EXPLOSION_SIZE: Vec2 = Vec2::new(50.0, 50.0);
    pub const SCORE_POPUP_DURATION: f32 = 0.5;
    pub const SCORE_POPUP_LOOPS: u32 = 5;
    pub const SCORE_POPUP_SIZE: Vec2 = Vec2::new(40.0, 20.0);
    pub const SCORE_PER_KILL: u32 = 100;

    /// Starfield background
    pub const STAR_COUNT: usize = 50;
    pub const STAR_SPEED: f32 = 100.0;

    /// End-screen lockout before the next key press is accepted
    pub const NAV_COOLDOWN: f32 = 2.0;
    /// Menu selection repeat delay
    pub const MENU_SELECT_COOLDOWN: f32 = 0.25;
}

/// The fixed rectangular play field, shared read-only by every subsystem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Arena {
    #[inline]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.min_x + self.width() / 2.0
    }
}

/// Startup arena bounds; never mutated at runtime.
pub const ARENA: Arena = Arena {
    min_x: 300.0,
    max_x: 1300.0,
    min_y: 50.0,
    max_y: 750.0,
};
