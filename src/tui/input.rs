use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::tabs::button::TabAction;
use crate::tui::render::overflow_menu::{entry_at, menu_rect};
use crate::tui::render::tab_bar::close_column;

use super::app::App;

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.bar.menu().is_some() {
        handle_menu_key(app, key);
        return;
    }

    let vertical = app.bar.placement().is_vertical();
    match key.code {
        KeyCode::Left if !vertical => step_selection(app, -1),
        KeyCode::Right if !vertical => step_selection(app, 1),
        KeyCode::Up if vertical => step_selection(app, -1),
        KeyCode::Down if vertical => step_selection(app, 1),
        KeyCode::Char('o') => open_menu(app),
        KeyCode::Char('a') => {
            app.bar.activate(TabAction::AddTab);
        }
        KeyCode::Char('x') => {
            if let Some(id) = app.bar.selected_item().map(|item| item.id()) {
                app.bar.activate(TabAction::Close(id));
            }
        }
        KeyCode::Char('p') => {
            let next = app.bar.placement().cycle();
            app.bar.set_placement(next);
        }
        KeyCode::Char('c') => app.toggle_form_factor(),
        KeyCode::Char('[') => app.shrink(),
        KeyCode::Char(']') => app.grow(),
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    let len = app.bar.menu().map_or(0, |menu| menu.len());
    match key.code {
        KeyCode::Up => {
            app.menu_cursor = if app.menu_cursor == 0 {
                len.saturating_sub(1)
            } else {
                app.menu_cursor - 1
            };
        }
        KeyCode::Down => {
            app.menu_cursor = if app.menu_cursor + 1 >= len {
                0
            } else {
                app.menu_cursor + 1
            };
        }
        KeyCode::Enter => {
            app.bar.choose_menu_entry(app.menu_cursor);
        }
        KeyCode::Esc | KeyCode::Char('o') | KeyCode::Char('q') => {
            app.bar.dismiss_menu();
        }
        _ => {}
    }
}

/// Move the selection by one tab, clamped to the ends.
fn step_selection(app: &mut App, delta: isize) {
    if app.bar.is_empty() {
        return;
    }
    let last = app.bar.len() - 1;
    let next = match app.bar.selected() {
        Some(i) => i.saturating_add_signed(delta).min(last),
        None => 0,
    };
    app.bar.select_index(next);
}

fn open_menu(app: &mut App) {
    if app.bar.activate(TabAction::OpenOverflow) {
        app.menu_cursor = 0;
    }
}

/// Handle a mouse event: hover tracking, taps on buttons and menu entries,
/// and dismissing the menu with a click outside it.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let pos = Position::new(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Moved => set_hover(app, pos),
        MouseEventKind::Down(MouseButton::Left) => click(app, pos),
        MouseEventKind::Up(MouseButton::Left) => release(app),
        _ => {}
    }
}

fn visible_ids(app: &App) -> Vec<crate::model::TabId> {
    app.bar.visible_buttons().map(|(item, _)| item.id()).collect()
}

fn set_hover(app: &mut App, pos: Position) {
    for id in visible_ids(app) {
        if let Some(button) = app.bar.button_mut(id) {
            button.hovered = button.rect.contains(pos);
        }
    }
}

fn release(app: &mut App) {
    for id in visible_ids(app) {
        if let Some(button) = app.bar.button_mut(id) {
            button.pressed = false;
        }
    }
}

fn click(app: &mut App, pos: Position) {
    if let Some(menu) = app.bar.menu() {
        let geometry = app.bar.geometry();
        let rect = menu_rect(
            menu,
            app.bar.placement(),
            app.bar.options().metrics.indicator_thickness,
            geometry.area,
        );
        match entry_at(menu, rect, app.menu_cursor, pos) {
            Some(j) => {
                app.bar.choose_menu_entry(j);
            }
            // Clicks on the menu border do nothing; anything else dismisses
            None if rect.contains(pos) => {}
            None => {
                app.bar.dismiss_menu();
            }
        }
        return;
    }

    let padding = app.bar.options().metrics.padding;
    let hit = app
        .bar
        .visible_buttons()
        .find(|(_, button)| button.rect.contains(pos))
        .map(|(item, button)| {
            let on_close = button.closable
                && pos.x == close_column(button, padding)
                && pos.y == button.rect.bottom().saturating_sub(1);
            let action = if on_close {
                button.on_closed
            } else {
                button.on_tapped
            };
            (item.id(), action)
        });

    if let Some((id, action)) = hit {
        if let Some(button) = app.bar.button_mut(id) {
            button.pressed = true;
        }
        app.bar.activate(action);
        return;
    }

    let add = app
        .bar
        .add_button()
        .filter(|add| add.rect.contains(pos))
        .map(|add| add.action);
    if let Some(action) = add {
        app.bar.activate(action);
        return;
    }

    let overflow = app.bar.overflow_button();
    if overflow.visible && overflow.rect.contains(pos) {
        open_menu(app);
    }
}
