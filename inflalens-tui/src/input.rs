//! Keyboard input dispatch — overlays → global keys → panel-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay, Panel};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::Search => {
            handle_search_overlay(app, key);
            return;
        }
        Overlay::DataInfo => {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('i')
            ) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char(c @ '1'..='5') => {
            if let Some(panel) = c.to_digit(10).and_then(|d| Panel::from_index(d as usize - 1)) {
                app.active_panel = panel;
            }
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
            return;
        }
        KeyCode::Char('i') => {
            app.overlay = Overlay::DataInfo;
            return;
        }
        KeyCode::Char('x') => {
            app.export_report();
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Symbols => handle_symbols_key(app, key),
        Panel::Risk => {} // display only
        Panel::Trends => handle_focus_key(app, key),
        Panel::Summary => handle_summary_key(app, key),
        Panel::Help => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

/// Live filter: every keystroke narrows the symbol list.
fn handle_search_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.search_input.clear();
            app.symbols.filter.clear();
            app.overlay = Overlay::None;
        }
        KeyCode::Enter => {
            app.overlay = Overlay::None;
            let shown = app.symbols.visible().len();
            if app.symbols.filter.is_empty() {
                app.set_status("Filter cleared");
            } else {
                app.set_status(format!("Filter '{}': {shown} symbols", app.symbols.filter));
            }
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            app.symbols.filter = app.search_input.clone();
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            app.symbols.filter = app.search_input.clone();
        }
        _ => {}
    }
    app.symbols.clamp_cursor();
}

fn handle_symbols_key(app: &mut AppState, key: KeyEvent) {
    let row_count = app.symbols.visible().len();

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if row_count > 0 && app.symbols.cursor + 1 < row_count {
                app.symbols.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.symbols.cursor = app.symbols.cursor.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.symbols.cursor = 0;
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.symbols.cursor = row_count.saturating_sub(1);
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            if let Some(symbol) = app.symbols.cursor_symbol() {
                app.toggle_symbol(&symbol);
            }
        }
        KeyCode::Char('a') => app.select_all(),
        KeyCode::Char('d') => app.clear_selection(),
        KeyCode::Char('/') | KeyCode::Char('s') => {
            app.search_input = app.symbols.filter.clone();
            app.overlay = Overlay::Search;
        }
        KeyCode::Esc => {
            if !app.symbols.filter.is_empty() {
                app.symbols.filter.clear();
                app.search_input.clear();
                app.symbols.clamp_cursor();
                app.set_status("Filter cleared");
            }
        }
        _ => {}
    }
}

/// Switch the focused symbol.
fn handle_focus_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Char(']') => app.focus_next(),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('[') => app.focus_prev(),
        _ => {}
    }
}

fn handle_summary_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            let last = app.focused_record_count().saturating_sub(1);
            app.analysis.summary_scroll = (app.analysis.summary_scroll + 1).min(last);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.analysis.summary_scroll = app.analysis.summary_scroll.saturating_sub(1);
        }
        _ => handle_focus_key(app, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_app;

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut AppState, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn number_keys_switch_panels() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.active_panel, Panel::Trends);
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.active_panel, Panel::Help);
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.active_panel, Panel::Help);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_panel, Panel::Symbols);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.active_panel, Panel::Help);
    }

    #[test]
    fn q_quits() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn welcome_overlay_swallows_first_key() {
        let mut app = sample_app();
        app.overlay = Overlay::Welcome;
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn space_toggles_symbol_under_cursor() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('j'));
        let expected = app.symbols.all[1].clone();
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.symbols.selected, vec![expected]);
        assert!(!app.analysis.records.is_empty());
        press(&mut app, KeyCode::Char(' '));
        assert!(app.symbols.selected.is_empty());
        assert!(app.analysis.is_empty());
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.symbols.cursor, 0);
        for _ in 0..100 {
            press(&mut app, KeyCode::Char('j'));
        }
        assert_eq!(app.symbols.cursor, app.symbols.all.len() - 1);
    }

    #[test]
    fn search_filters_live_and_escape_clears() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.overlay, Overlay::Search);
        type_str(&mut app, "tcs");
        assert_eq!(app.symbols.visible(), vec!["TCS"]);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.overlay, Overlay::None);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.symbols.selected, vec!["TCS"]);

        press(&mut app, KeyCode::Esc);
        assert!(app.symbols.filter.is_empty());
        assert_eq!(app.symbols.visible().len(), app.symbols.all.len());
    }

    #[test]
    fn search_keys_do_not_trigger_globals() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('s'));
        type_str(&mut app, "q1x");
        assert!(app.running);
        assert_eq!(app.active_panel, Panel::Symbols);
        assert_eq!(app.search_input, "q1x");
    }

    #[test]
    fn overlays_toggle() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.overlay, Overlay::DataInfo);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.overlay, Overlay::None);
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.overlay, Overlay::ErrorHistory);
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn trends_panel_cycles_focus() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('3'));
        let first = app.focused_symbol().map(String::from);
        press(&mut app, KeyCode::Char('l'));
        assert_ne!(app.focused_symbol().map(String::from), first);
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.focused_symbol().map(String::from), first);
    }

    #[test]
    fn summary_scroll_stops_at_last_record() {
        let mut app = sample_app();
        app.toggle_symbol("TCS");
        press(&mut app, KeyCode::Char('4'));
        let count = app.focused_record_count();
        assert!(count > 1);

        for _ in 0..count + 20 {
            press(&mut app, KeyCode::Char('j'));
        }
        assert_eq!(app.analysis.summary_scroll, count - 1);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.analysis.summary_scroll, count - 2);
    }
}
