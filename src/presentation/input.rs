use crate::application::{App, AppMode};
use crate::infrastructure::CsvExporter;
use crossterm::event::{KeyCode, KeyModifiers};

const HELP_PAGE: isize = 5;

/// Maps key presses to [`App`] actions according to the current mode.
pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key),
            AppMode::Search => Self::handle_search_mode(app, key),
            AppMode::Form => Self::handle_form_mode(app, key, modifiers),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::ExportCsv => Self::handle_filename_input_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode) {
        app.status_message = None;

        match key {
            KeyCode::Up | KeyCode::Char('k') => app.move_cursor_up(),
            KeyCode::Down | KeyCode::Char('j') => app.move_cursor_down(),
            KeyCode::Left | KeyCode::Char('h') => app.previous_page(),
            KeyCode::Right | KeyCode::Char('l') => app.next_page(),
            KeyCode::Char('p') => app.cycle_page_size(),
            KeyCode::Char(c @ '1'..='7') => {
                let index = c as usize - '1' as usize;
                app.sort_by_column(index);
            }
            KeyCode::Char(' ') => app.toggle_cursor_row(),
            KeyCode::Char('a') => app.toggle_select_all(),
            KeyCode::Char('D') => app.delete_selected(),
            KeyCode::Char('d') | KeyCode::Delete => app.delete_cursor_row(),
            KeyCode::Char('n') => app.start_create(),
            KeyCode::Char('e') | KeyCode::Enter => app.start_edit(),
            KeyCode::Char('/') => app.start_search(),
            KeyCode::Char('x') => app.start_csv_export(),
            KeyCode::F(1) | KeyCode::Char('?') => app.open_help(),
            KeyCode::Esc => app.table.dismiss_toast(),
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
    }

    fn handle_search_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Esc => app.finish_search(),
            KeyCode::Backspace => app.search_pop(),
            KeyCode::Char(c) => app.search_push(c),
            _ => {}
        }
    }

    fn handle_form_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Enter => app.submit_form(),
            KeyCode::Esc => app.cancel_form(),
            KeyCode::BackTab | KeyCode::Up => app.focus_previous_field(),
            KeyCode::Tab if modifiers.contains(KeyModifiers::SHIFT) => app.focus_previous_field(),
            KeyCode::Tab | KeyCode::Down => app.focus_next_field(),
            KeyCode::Left => app.form_cycle_choice(false),
            KeyCode::Right => app.form_cycle_choice(true),
            KeyCode::Backspace => app.form_backspace(),
            KeyCode::Char(c) => app.form_input_char(c),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => app.close_help(),
            KeyCode::Up | KeyCode::Char('k') => app.scroll_help(-1),
            KeyCode::Down | KeyCode::Char('j') => app.scroll_help(1),
            KeyCode::PageUp => app.scroll_help(-HELP_PAGE),
            KeyCode::PageDown => app.scroll_help(HELP_PAGE),
            KeyCode::Home => app.help_scroll = 0,
            _ => {}
        }
    }

    fn handle_filename_input_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let filename = app.get_csv_export_filename();
                let result = CsvExporter::export_users(app.table.sorted_rows(), &filename)
                    .map_err(|e| e.to_string());
                app.set_csv_export_result(result);
            }
            KeyCode::Esc => {
                app.cancel_filename_input();
            }
            KeyCode::Backspace => {
                app.filename_input.pop();
            }
            KeyCode::Char(c) => {
                app.filename_input.push(c);
            }
            _ => {}
        }
    }
}
