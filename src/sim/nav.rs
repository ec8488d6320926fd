//! Top-level navigation state machine
//!
//! MENU -> GAME -> {VICTORY | GAME_OVER} -> MENU, looping. End screens hold
//! a lockout cooldown before the next key press is accepted. PAUSE is
//! declared but no transition reaches it (reserved).

use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Game,
    GameOver,
    Victory,
    /// Reserved; nothing transitions here.
    Pause,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat,
}

/// Menu resolutions surfaced to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    StartGame,
    Quit,
}

/// Main menu cursor: two options cycled with a repeat cooldown so a held
/// key does not spin the selection every frame.
#[derive(Debug, Clone)]
pub struct MenuState {
    pub selected: usize,
    options: usize,
    repeat_cooldown: f32,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            selected: 0,
            options: 2,
            repeat_cooldown: 0.0,
        }
    }
}

impl MenuState {
    fn tick(&mut self, up: bool, down: bool, dt: f32) {
        if self.repeat_cooldown > 0.0 {
            self.repeat_cooldown = (self.repeat_cooldown - dt).max(0.0);
        }
        if (up || down) && self.repeat_cooldown == 0.0 {
            self.selected = (self.selected + 1) % self.options;
            self.repeat_cooldown = MENU_SELECT_COOLDOWN;
        }
    }
}

/// Process-wide navigation state. Owned by the shell next to the session
/// state; the per-frame engine writes the win/lose transitions into it.
#[derive(Debug, Clone)]
pub struct Nav {
    pub screen: Screen,
    /// End-screen lockout; key presses are ignored until it runs out.
    pub cooldown: f32,
    /// Set when a session ends; the controller reinitializes the session
    /// on the next entry into GAME and clears it.
    pub pending_reset: bool,
    pub menu: MenuState,
}

impl Default for Nav {
    fn default() -> Self {
        Self {
            screen: Screen::Menu,
            cooldown: 0.0,
            pending_reset: false,
            menu: MenuState::default(),
        }
    }
}

impl Nav {
    /// Menu frame: cycle the cursor, resolve confirm into an action.
    pub fn menu_tick(&mut self, up: bool, down: bool, confirm: bool, dt: f32) -> Option<MenuAction> {
        self.menu.tick(up, down, dt);
        if confirm {
            if self.menu.selected == 0 {
                self.screen = Screen::Game;
                return Some(MenuAction::StartGame);
            }
            return Some(MenuAction::Quit);
        }
        None
    }

    /// Game-over / victory frame: run down the lockout, then return to the
    /// menu on the next key press.
    pub fn end_screen_tick(&mut self, any_key: bool, dt: f32) {
        if self.cooldown > 0.0 {
            self.cooldown -= dt;
        } else if any_key {
            self.screen = Screen::Menu;
            self.menu = MenuState::default();
        }
    }

    /// Session resolution, written by the per-frame engine.
    pub fn finish_session(&mut self, outcome: Outcome) {
        self.screen = match outcome {
            Outcome::Victory => Screen::Victory,
            Outcome::Defeat => Screen::GameOver,
        };
        self.cooldown = NAV_COOLDOWN;
        self.pending_reset = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 120.0;

    #[test]
    fn menu_cursor_cycles_with_repeat_cooldown() {
        let mut nav = Nav::default();
        assert_eq!(nav.menu.selected, 0);

        nav.menu_tick(false, true, false, DT);
        assert_eq!(nav.menu.selected, 1);

        // Held key: cooldown swallows the repeat.
        nav.menu_tick(false, true, false, DT);
        assert_eq!(nav.menu.selected, 1);

        // After the repeat delay it cycles again (and wraps).
        for _ in 0..40 {
            nav.menu_tick(false, false, false, DT);
        }
        nav.menu_tick(true, false, false, DT);
        assert_eq!(nav.menu.selected, 0);
    }

    #[test]
    fn confirm_resolves_start_or_quit() {
        let mut nav = Nav::default();
        assert_eq!(
            nav.menu_tick(false, false, true, DT),
            Some(MenuAction::StartGame)
        );
        assert_eq!(nav.screen, Screen::Game);

        let mut nav = Nav::default();
        nav.menu.selected = 1;
        assert_eq!(nav.menu_tick(false, false, true, DT), Some(MenuAction::Quit));
    }

    #[test]
    fn end_screen_ignores_keys_until_cooldown_runs_out() {
        let mut nav = Nav::default();
        nav.screen = Screen::Game;
        nav.finish_session(Outcome::Defeat);
        assert_eq!(nav.screen, Screen::GameOver);
        assert!(nav.pending_reset);

        // Mashing keys during the lockout does nothing.
        for _ in 0..120 {
            nav.end_screen_tick(true, DT);
        }
        assert_eq!(nav.screen, Screen::GameOver);

        // Run the cooldown out, then one key press returns to the menu.
        for _ in 0..150 {
            nav.end_screen_tick(false, DT);
        }
        nav.end_screen_tick(true, DT);
        assert_eq!(nav.screen, Screen::Menu);
    }

    #[test]
    fn victory_routes_to_victory_screen() {
        let mut nav = Nav::default();
        nav.screen = Screen::Game;
        nav.finish_session(Outcome::Victory);
        assert_eq!(nav.screen, Screen::Victory);
    }
}
