use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::celebration::Celebration;
use crate::clock::Clock;
use crate::controller::Controller;
use crate::cues::CueSink;
use crate::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
}

/// Terminal-facing state: the controller plus purely decorative extras
pub struct App<C: Clock, S: CueSink> {
    pub controller: Controller<C, S>,
    pub celebration: Celebration,
    pub celebrate: bool,
    tick_secs: f64,
}

impl<C: Clock, S: CueSink> App<C, S> {
    pub fn new(controller: Controller<C, S>, celebrate: bool, tick_ms: u64) -> Self {
        Self {
            controller,
            celebration: Celebration::new(),
            celebrate,
            tick_secs: tick_ms as f64 / 1000.0,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent, width: u16, height: u16) -> AppAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppAction::Quit;
        }

        let before = self.controller.state();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('s') => {
                if self.controller.start().is_ok() {
                    self.celebration.stop();
                }
            }
            KeyCode::Char('r') => {
                self.celebration.stop();
                self.controller.restart();
            }
            KeyCode::Char('x') | KeyCode::Backspace => {
                self.celebration.stop();
                self.controller.reset();
            }
            _ => {}
        }
        self.after_update(before, width, height);
        AppAction::Continue
    }

    pub fn on_tick(&mut self, width: u16, height: u16) {
        let before = self.controller.state();
        self.controller.on_tick();
        self.celebration.update(self.tick_secs);
        self.after_update(before, width, height);
    }

    pub fn on_focus_gained(&mut self, width: u16, height: u16) {
        let before = self.controller.state();
        self.controller.on_visible();
        self.after_update(before, width, height);
    }

    /// Whether the screen changes on its own and should be redrawn every tick
    pub fn is_animating(&self) -> bool {
        self.controller.state().is_running() || self.celebration.is_active
    }

    /// Shut down: drop the active countdown
    pub fn shutdown(&mut self) {
        self.controller.reset();
        self.celebration.stop();
    }

    fn after_update(&mut self, before: SessionState, width: u16, height: u16) {
        let now = self.controller.state();
        if self.celebrate && before != SessionState::Complete && now == SessionState::Complete {
            self.celebration.start(width, height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::cues::RecordingCues;
    use crate::locale::Locale;

    fn app(celebrate: bool) -> (App<ManualClock, RecordingCues>, ManualClock) {
        let clock = ManualClock::new(0);
        let controller = Controller::new(Locale::Russian, clock.clone(), RecordingCues::default());
        (App::new(controller, celebrate, 100), clock)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn quit_keys() {
        let (mut app, _) = app(true);
        assert_eq!(app.on_key(key(KeyCode::Esc), 80, 24), AppAction::Quit);
        assert_eq!(app.on_key(key(KeyCode::Char('q')), 80, 24), AppAction::Quit);
        assert_eq!(
            app.on_key(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                80,
                24
            ),
            AppAction::Quit
        );
    }

    #[test]
    fn enter_starts_and_second_enter_is_ignored() {
        let (mut app, _) = app(true);
        app.on_key(key(KeyCode::Enter), 80, 24);
        assert_eq!(app.controller.state(), SessionState::Prepare);
        assert!(app.is_animating());

        app.controller.advance();
        app.on_key(key(KeyCode::Enter), 80, 24);
        assert_eq!(app.controller.session().cursor.index(), Some(1));
    }

    #[test]
    fn reset_and_restart_keys() {
        let (mut app, _) = app(true);
        app.on_key(key(KeyCode::Char('s')), 80, 24);
        app.controller.advance();

        app.on_key(key(KeyCode::Char('x')), 80, 24);
        assert_eq!(app.controller.state(), SessionState::Initial);

        app.on_key(key(KeyCode::Char('r')), 80, 24);
        assert_eq!(app.controller.state(), SessionState::Prepare);
    }

    #[test]
    fn completion_starts_celebration() {
        let (mut app, clock) = app(true);
        app.on_key(key(KeyCode::Enter), 80, 24);
        let remaining = app.controller.plan().len();
        for _ in 0..remaining - 1 {
            app.controller.advance();
        }
        clock.advance(180_000);
        app.on_tick(80, 24);

        assert_eq!(app.controller.state(), SessionState::Complete);
        assert!(app.celebration.is_active);
    }

    #[test]
    fn celebration_can_be_disabled() {
        let (mut app, clock) = app(false);
        app.on_key(key(KeyCode::Enter), 80, 24);
        for _ in 0..app.controller.plan().len() - 1 {
            app.controller.advance();
        }
        clock.advance(180_000);
        app.on_focus_gained(80, 24);

        assert_eq!(app.controller.state(), SessionState::Complete);
        assert!(!app.celebration.is_active);
    }

    #[test]
    fn shutdown_cancels_countdown() {
        let (mut app, _) = app(true);
        app.on_key(key(KeyCode::Enter), 80, 24);
        app.shutdown();
        assert!(app.controller.session().countdown.is_none());
        assert!(!app.is_animating());
    }
}
