//! Terminal session state.
//!
//! [`App`] wraps the table controller with what only the terminal needs:
//! the input mode, which visible row the cursor is on, which form field has
//! focus and the filename prompt.

use tracing::warn;

use super::controller::{SelectAllState, SubmitError, TableController};
use crate::domain::{DraftField, Role, Shift, SortField, UserRecord};

/// Represents the current mode of the application.
///
/// The mode decides how key presses are interpreted and which popups are
/// drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Table navigation, shortcuts available
    Normal,
    /// Typing into the search box
    Search,
    /// Create/edit form is open
    Form,
    /// Help screen is displayed
    Help,
    /// CSV export filename prompt
    ExportCsv,
}

/// Main application state: the table controller plus terminal UI state.
///
/// # Examples
///
/// ```
/// use usertable::application::{App, AppMode, TableController};
///
/// let table = TableController::new(usertable::infrastructure::default_users()).unwrap();
/// let app = App::new(table);
/// assert_eq!(app.mode, AppMode::Normal);
/// assert_eq!(app.cursor_row, 0);
/// ```
pub struct App {
    pub table: TableController,
    /// Current application mode
    pub mode: AppMode,
    /// Cursor position within the visible page
    pub cursor_row: usize,
    /// Field with focus while the form is open
    pub focused_field: DraftField,
    /// Input buffer for filename entry
    pub filename_input: String,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Status line message for export results
    pub status_message: Option<String>,
}

impl App {
    /// Creates a session over `table` in normal mode with the cursor on the
    /// first visible row.
    ///
    /// # Arguments
    ///
    /// * `table` - Controller holding the rows and table view state
    pub fn new(table: TableController) -> Self {
        Self {
            table,
            mode: AppMode::Normal,
            cursor_row: 0,
            focused_field: DraftField::Name,
            filename_input: String::new(),
            help_scroll: 0,
            status_message: None,
        }
    }

    /// Advances timers; returns whether anything visible changed.
    pub fn tick(&mut self) -> bool {
        let changed = self.table.tick();
        if changed {
            self.clamp_cursor();
        }
        changed
    }

    /// The record under the cursor, or `None` when the page is empty.
    pub fn cursor_record(&self) -> Option<&UserRecord> {
        self.table.visible_rows().get(self.cursor_row)
    }

    fn clamp_cursor(&mut self) {
        let visible = self.table.visible_rows().len();
        self.cursor_row = self.cursor_row.min(visible.saturating_sub(1));
    }

    // ===== Navigation =====

    pub fn move_cursor_up(&mut self) {
        self.cursor_row = self.cursor_row.saturating_sub(1);
    }

    /// Moves down one row, stopping at the last visible row.
    pub fn move_cursor_down(&mut self) {
        if self.cursor_row + 1 < self.table.visible_rows().len() {
            self.cursor_row += 1;
        }
    }

    /// Advances one page unless already on the last one. The cursor returns
    /// to the top.
    pub fn next_page(&mut self) {
        let page = self.table.page();
        if page + 1 < self.table.page_count() {
            self.table.set_page(page + 1);
            self.cursor_row = 0;
        }
    }

    pub fn previous_page(&mut self) {
        let page = self.table.page();
        if page > 0 {
            self.table.set_page(page - 1);
            self.cursor_row = 0;
        }
    }

    /// Steps through 5, 10 and 25 rows per page.
    pub fn cycle_page_size(&mut self) {
        let next = self.table.page_size().next();
        self.table.set_page_size(next);
        self.cursor_row = 0;
    }

    /// Sorts by the `index`-th visible column (zero-based).
    pub fn sort_by_column(&mut self, index: usize) {
        if let Some(field) = SortField::COLUMNS.get(index) {
            self.table.set_sort_key(*field);
        }
    }

    // ===== Selection =====

    /// Toggles selection of the row under the cursor.
    pub fn toggle_cursor_row(&mut self) {
        if let Some(id) = self.cursor_record().map(|record| record.id) {
            self.table.toggle_row(id);
        }
    }

    /// Behaves like the header checkbox: anything short of fully checked
    /// selects everything.
    pub fn toggle_select_all(&mut self) {
        let checked = self.table.select_all_state() != SelectAllState::Checked;
        self.table.toggle_select_all(checked);
    }

    // ===== Deletion =====

    /// Deletes the user under the cursor and keeps the cursor on a
    /// remaining row.
    pub fn delete_cursor_row(&mut self) {
        if let Some(id) = self.cursor_record().map(|record| record.id) {
            self.table.delete_user(id);
            self.clamp_cursor();
        }
    }

    pub fn delete_selected(&mut self) {
        self.table.delete_selected();
        self.clamp_cursor();
    }

    // ===== Search =====

    /// Moves keyboard focus to the search box.
    pub fn start_search(&mut self) {
        self.mode = AppMode::Search;
        self.status_message = None;
    }

    /// Appends `c` to the search text. The box updates now; the table
    /// follows once the debounce fires.
    ///
    /// # Arguments
    ///
    /// * `c` - Typed character
    pub fn search_push(&mut self, c: char) {
        let mut text = self.table.search_text().to_string();
        text.push(c);
        self.table.set_search_text(text);
        self.cursor_row = 0;
    }

    pub fn search_pop(&mut self) {
        let mut text = self.table.search_text().to_string();
        if text.pop().is_some() {
            self.table.set_search_text(text);
            self.cursor_row = 0;
        }
    }

    pub fn finish_search(&mut self) {
        self.mode = AppMode::Normal;
    }

    // ===== Form =====

    /// Opens a blank create form with focus on the name field.
    pub fn start_create(&mut self) {
        self.table.open_create();
        self.focused_field = DraftField::Name;
        self.mode = AppMode::Form;
    }

    /// Opens the edit form on the row under the cursor, if any.
    pub fn start_edit(&mut self) {
        let Some(id) = self.cursor_record().map(|record| record.id) else {
            return;
        };
        if self.table.open_edit(id) {
            self.focused_field = DraftField::Name;
            self.mode = AppMode::Form;
        }
    }

    /// Closes the form and drops the draft.
    pub fn cancel_form(&mut self) {
        self.table.close();
        self.mode = AppMode::Normal;
    }

    pub fn focus_next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn focus_previous_field(&mut self) {
        self.focused_field = self.focused_field.previous();
    }

    /// Types `c` into the focused field. On the active checkbox a space
    /// toggles it; other choice fields ignore typing.
    pub fn form_input_char(&mut self, c: char) {
        let field = self.focused_field;
        let Some(draft) = self.table.draft_mut() else {
            return;
        };
        if let Some(text) = draft.text_field_mut(field) {
            text.push(c);
        } else if field == DraftField::Active && c == ' ' {
            draft.active = !draft.active;
        }
    }

    pub fn form_backspace(&mut self) {
        let field = self.focused_field;
        if let Some(text) = self.table.draft_mut().and_then(|draft| draft.text_field_mut(field)) {
            text.pop();
        }
    }

    /// Steps the focused choice field (role, shift, active) forward or back.
    pub fn form_cycle_choice(&mut self, forward: bool) {
        let field = self.focused_field;
        let Some(draft) = self.table.draft_mut() else {
            return;
        };
        match field {
            DraftField::Role => {
                let keys: Vec<&str> = Role::ALL.iter().map(|role| role.as_str()).collect();
                draft.role = cycle(&keys, &draft.role, forward).to_string();
            }
            DraftField::Shift => {
                let keys: Vec<&str> = Shift::ALL.iter().map(|shift| shift.as_str()).collect();
                draft.shift = cycle(&keys, &draft.shift, forward).to_string();
            }
            DraftField::Active => draft.active = !draft.active,
            _ => {}
        }
    }

    /// Submits the form. On rejection the form stays open with focus on the
    /// first field in error.
    pub fn submit_form(&mut self) {
        match self.table.submit_current() {
            Ok(_) => {
                self.mode = AppMode::Normal;
                self.cursor_row = 0;
            }
            Err(SubmitError::Invalid(errors)) => {
                if let Some((field, _)) = errors.iter().next() {
                    self.focused_field = field;
                }
            }
            Err(SubmitError::DialogClosed) => {
                warn!("form submitted without an open dialog");
                self.mode = AppMode::Normal;
            }
            Err(err @ SubmitError::NotFound(_)) => {
                self.status_message = Some(format!("Edit discarded: {err}"));
                self.mode = AppMode::Normal;
                self.clamp_cursor();
            }
            Err(SubmitError::Domain(err)) => {
                warn!(%err, "user could not be saved");
                self.table.close();
                self.status_message = Some(format!("Could not save user: {err}"));
                self.mode = AppMode::Normal;
            }
        }
    }

    // ===== Help =====

    pub fn open_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Scrolls the help popup by `lines`; the renderer stops at the end.
    pub fn scroll_help(&mut self, lines: isize) {
        self.help_scroll = self.help_scroll.saturating_add_signed(lines);
    }

    // ===== CSV export =====

    /// Opens the filename prompt prefilled with `users.csv`.
    pub fn start_csv_export(&mut self) {
        self.mode = AppMode::ExportCsv;
        self.filename_input = "users.csv".to_string();
        self.status_message = None;
    }

    pub fn cancel_filename_input(&mut self) {
        self.mode = AppMode::Normal;
        self.filename_input.clear();
    }

    /// Returns the filename input if not empty, otherwise the default.
    pub fn get_csv_export_filename(&self) -> String {
        if self.filename_input.is_empty() {
            "users.csv".to_string()
        } else {
            self.filename_input.clone()
        }
    }

    /// Reports an export in the status line and leaves the prompt.
    ///
    /// # Arguments
    ///
    /// * `result` - Written filename, or the error text
    pub fn set_csv_export_result(&mut self, result: Result<String, String>) {
        match result {
            Ok(filename) => {
                self.status_message = Some(format!("Exported to {}", filename));
            }
            Err(error) => {
                self.status_message = Some(format!("Export failed: {}", error));
            }
        }

        self.mode = AppMode::Normal;
        self.filename_input.clear();
    }
}

fn cycle<'a>(keys: &[&'a str], current: &str, forward: bool) -> &'a str {
    let len = keys.len();
    let next = match keys.iter().position(|key| *key == current) {
        Some(index) if forward => (index + 1) % len,
        Some(index) => (index + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };
    keys[next]
}
