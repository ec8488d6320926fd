//! Frame building
//!
//! Pure translation from simulation state to an ordered draw batch, issued
//! exactly once per frame. Rasterization is someone else's job: a command
//! only names an opaque [`SpriteId`] (or a primitive) plus its transform.
//! Paint order is back to front - backgrounds first, the player ship last.

use glam::Vec2;

use crate::Settings;
use crate::consts::*;
use crate::sim::entity::{Rect, SpriteId};
use crate::sim::nav::{Nav, Screen};
use crate::sim::state::{Animation, GameState};
use crate::{ARENA, Arena};

/// One draw request.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// A sprite (or one cell of a sheet) centered at `pos`.
    Sprite {
        sprite: SpriteId,
        pos: Vec2,
        size: Vec2,
        frame: u32,
    },
    /// Single pixels; the starfield.
    Points(Vec<Vec2>),
    /// Open polyline; debug box and the boss bar outline.
    LineStrip(Vec<Vec2>),
    /// Filled rectangle; the boss bar fill.
    FillRect(Rect),
    /// HUD text anchored at a fixed position.
    Text { text: String, pos: Vec2 },
}

/// Cells per sheet, for render-time frame selection.
pub fn frame_count(sprite: SpriteId) -> u32 {
    match sprite {
        SpriteId::ExplosionSheet => 8,
        _ => 1,
    }
}

/// Build the draw batch for the current screen.
pub fn build_frame(state: &GameState, nav: &Nav, settings: &Settings) -> Vec<DrawCommand> {
    match nav.screen {
        Screen::Menu => menu_frame(nav),
        Screen::Game | Screen::Pause => game_frame(state, settings),
        Screen::GameOver => end_frame(SpriteId::DefeatBanner),
        Screen::Victory => end_frame(SpriteId::VictoryBanner),
    }
}

fn sprite_cmd(sprite: SpriteId, pos: Vec2, size: Vec2) -> DrawCommand {
    DrawCommand::Sprite {
        sprite,
        pos,
        size,
        frame: 0,
    }
}

fn animation_cmd(anim: &Animation) -> DrawCommand {
    let frames = frame_count(anim.kin.sprite);
    let frame = ((anim.progress() * frames as f32) as u32).min(frames - 1);
    DrawCommand::Sprite {
        sprite: anim.kin.sprite,
        pos: anim.kin.pos,
        size: anim.kin.size,
        frame,
    }
}

fn arena_center(arena: &Arena) -> Vec2 {
    Vec2::new(
        arena.center_x(),
        arena.min_y + arena.height() / 2.0,
    )
}

fn game_frame(state: &GameState, settings: &Settings) -> Vec<DrawCommand> {
    let arena = &state.arena;
    let arena_size = Vec2::new(arena.width(), arena.height());
    let mut batch = Vec::new();

    // Scrolling background layers cover the whole arena.
    batch.push(sprite_cmd(
        SpriteId::BackgroundFar,
        arena_center(arena),
        arena_size,
    ));
    batch.push(sprite_cmd(
        SpriteId::BackgroundNear,
        arena_center(arena),
        arena_size,
    ));
    if settings.starfield {
        batch.push(DrawCommand::Points(state.stars.clone()));
    }

    if state.debug_overlay {
        batch.push(DrawCommand::LineStrip(vec![
            Vec2::new(arena.min_x, arena.min_y),
            Vec2::new(arena.max_x, arena.min_y),
            Vec2::new(arena.max_x, arena.max_y),
            Vec2::new(arena.min_x, arena.max_y),
            Vec2::new(arena.min_x, arena.min_y),
        ]));
        batch.push(DrawCommand::Text {
            text: format!("Enemies: {}", state.enemies.len()),
            pos: Vec2::new(50.0, 100.0),
        });
    }

    batch.push(DrawCommand::Text {
        text: format!("Score: {}", state.score),
        pos: Vec2::new(50.0, 50.0),
    });

    for enemy in &state.enemies {
        batch.push(sprite_cmd(enemy.kin.sprite, enemy.kin.pos, enemy.kin.size));
    }
    for anim in &state.animations {
        batch.push(animation_cmd(anim));
    }
    for shot in &state.player_shots {
        batch.push(sprite_cmd(shot.kin.sprite, shot.kin.pos, shot.kin.size));
    }
    for shot in &state.enemy_shots {
        batch.push(sprite_cmd(shot.kin.sprite, shot.kin.pos, shot.kin.size));
    }
    for powerup in &state.powerups {
        batch.push(sprite_cmd(
            powerup.kin.sprite,
            powerup.kin.pos,
            powerup.kin.size,
        ));
    }

    if state.boss_active {
        if let Some(boss) = state.enemies.iter().find(|e| e.boss) {
            batch.extend(boss_health_bar(arena, boss.hp));
        }
    }

    // The player paints last: ship, engine flares, shield aura on top.
    let player = &state.player;
    batch.push(sprite_cmd(player.kin.sprite, player.kin.pos, player.kin.size));
    let flare_size = Vec2::new(20.0, 30.0);
    if player.left_engine {
        batch.push(sprite_cmd(
            SpriteId::LeftEngine,
            player.kin.pos + Vec2::new(-60.0, 0.0),
            flare_size,
        ));
    }
    if player.right_engine {
        batch.push(sprite_cmd(
            SpriteId::RightEngine,
            player.kin.pos + Vec2::new(20.0, 0.0),
            flare_size,
        ));
    }
    if player.shield {
        batch.push(sprite_cmd(SpriteId::ShieldAura, player.kin.pos, player.kin.size));
    }

    batch
}

/// Boss health bar along the strip above the arena: outline plus a fill
/// proportional to remaining hp.
fn boss_health_bar(arena: &Arena, hp: i32) -> Vec<DrawCommand> {
    let top = 5.0;
    let fraction = (hp.max(0) as f32) / BOSS_HP as f32;
    let fill_right = arena.min_x + arena.width() * fraction;
    vec![
        DrawCommand::LineStrip(vec![
            Vec2::new(arena.min_x, arena.min_y),
            Vec2::new(arena.max_x, arena.min_y),
            Vec2::new(arena.max_x, top),
            Vec2::new(arena.min_x, top),
            Vec2::new(arena.min_x, arena.min_y),
        ]),
        DrawCommand::FillRect(Rect {
            min: Vec2::new(arena.min_x, top),
            max: Vec2::new(fill_right, arena.min_y),
        }),
    ]
}

fn menu_frame(nav: &Nav) -> Vec<DrawCommand> {
    let anchor = Vec2::new(
        ARENA.min_x + ARENA.width() / 3.0,
        ARENA.min_y + ARENA.height() / 2.0,
    );
    let start = if nav.menu.selected == 0 {
        SpriteId::StartButtonSelected
    } else {
        SpriteId::StartButton
    };
    let exit = if nav.menu.selected == 1 {
        SpriteId::ExitButtonSelected
    } else {
        SpriteId::ExitButton
    };
    vec![
        sprite_cmd(SpriteId::MenuBackground, anchor, Vec2::new(200.0, 200.0)),
        sprite_cmd(start, anchor + Vec2::new(5.0, 125.0), Vec2::new(190.0, 60.0)),
        sprite_cmd(exit, anchor + Vec2::new(5.0, 175.0), Vec2::new(190.0, 60.0)),
    ]
}

fn end_frame(banner: SpriteId) -> Vec<DrawCommand> {
    let anchor = Vec2::new(
        ARENA.min_x + ARENA.width() / 3.0,
        ARENA.min_y + ARENA.height() / 2.0,
    );
    vec![sprite_cmd(banner, anchor, Vec2::new(400.0, 200.0))]
}
