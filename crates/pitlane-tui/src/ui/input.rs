//! Keyboard input handling for the TUI.
//!
//! Keys are translated into `App` navigation calls, which in turn dispatch
//! actions to the browser state machine.

use crossterm::event::{KeyCode, KeyEvent};

use pitlane_core::browse::{Action, ViewState};
use pitlane_core::models::Season;

use crate::app::{App, AppState, Focus, PAGE_SCROLL_SIZE};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    // Blocking notification swallows everything until acknowledged
    if app.browser.notification().is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.dispatch(Action::DismissNotification);
        }
        return false;
    }

    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return false;
    }

    // Handle entity dialogs
    if app.browser.dialog().is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            app.dispatch(Action::CloseDialog);
        }
        return false;
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::Quitting;
            return true;
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
            return false;
        }
        KeyCode::Char('h') => {
            app.go_home();
            return false;
        }
        _ => {}
    }

    match app.browser.state() {
        ViewState::Home => handle_home_input(app, key),
        ViewState::Loading(_) => {
            if key.code == KeyCode::Esc {
                app.go_home();
            }
        }
        ViewState::BrowsingRaces | ViewState::ViewingRaceDetail => handle_browse_input(app, key),
    }

    false
}

fn handle_home_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::Enter => app.select_highlighted_season(),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            if index < Season::ALL.len() {
                app.season_selection = index;
                app.select_highlighted_season();
            }
        }
        _ => {}
    }
}

fn handle_browse_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::PageUp => app.move_selection(-(PAGE_SCROLL_SIZE as isize)),
        KeyCode::PageDown => app.move_selection(PAGE_SCROLL_SIZE as isize),
        KeyCode::Tab => app.cycle_focus(true),
        KeyCode::BackTab => app.cycle_focus(false),
        KeyCode::Enter => match app.focus {
            Focus::Races => app.open_highlighted_race(),
            Focus::Qualifying | Focus::Results => app.open_entity(true),
        },
        KeyCode::Char('d') => app.open_entity(true),
        KeyCode::Char('c') => app.open_entity(false),
        KeyCode::Char('o') => app.open_circuit(),
        KeyCode::Esc => {
            if app.focus == Focus::Races {
                app.go_home();
            } else {
                app.focus = Focus::Races;
            }
        }
        _ => {}
    }
}
