//! Table state management.
//!
//! [`TableController`] owns the user rows and every piece of view state the
//! table needs (search, sort, paging, selection, the create/edit dialog and
//! the toast). The presentation layer calls its handlers and renders from its
//! accessors; derived views are recomputed eagerly after every change.

use std::collections::BTreeSet;
use std::time::Duration;

use tracing::{debug, info};

use super::dialog::DialogState;
use super::timer::{Clock, SingleShotTimer, SystemClock};
use super::toast::Toast;
use crate::domain::{
    DomainError, DomainResult, PageSize, SortDirection, SortField, UserDraft, UserFormValidator,
    UserId, UserPayload, UserRecord, ValidationErrors, Validator, check_rows, empty_rows,
    filter_rows, next_free_id, page_count, page_window, sort_rows, total_salary,
};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// State of the header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
    Unchecked,
    Indeterminate,
    Checked,
}

/// What a successful [`TableController::submit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(UserId),
    Edited(UserId),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error("no dialog is open")]
    DialogClosed,
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
    /// The record being edited was deleted while the dialog was open.
    #[error("user {0} no longer exists")]
    NotFound(UserId),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Owns the rows and all table view state for one session.
///
/// # Examples
///
/// ```
/// use usertable::application::TableController;
/// use usertable::domain::SortField;
///
/// let mut table = TableController::new(usertable::infrastructure::default_users()).unwrap();
/// table.set_sort_key(SortField::Salary);
/// let first = table.visible_rows()[0].salary;
/// assert!(table.visible_rows().iter().all(|row| row.salary >= first));
/// ```
pub struct TableController<C: Clock = SystemClock, V: Validator = UserFormValidator> {
    clock: C,
    validator: V,
    rows: Vec<UserRecord>,
    /// `None` once `u64::MAX` has been handed out.
    next_id: Option<u64>,
    search_text: String,
    applied_query: String,
    filtered_rows: Vec<UserRecord>,
    search_timer: SingleShotTimer,
    search_recomputations: u64,
    sort_key: SortField,
    sort_direction: SortDirection,
    page: usize,
    page_size: PageSize,
    selection: BTreeSet<UserId>,
    dialog: DialogState,
    toast: Toast,
    sorted_rows: Vec<UserRecord>,
    total_salary: f64,
}

impl TableController {
    /// Builds a controller on the system clock and the standard form rules.
    ///
    /// # Errors
    ///
    /// See [`TableController::with_parts`].
    pub fn new(seed: Vec<UserRecord>) -> DomainResult<Self> {
        Self::with_parts(seed, SystemClock, UserFormValidator)
    }
}

impl<C: Clock, V: Validator> TableController<C, V> {
    /// Builds a controller over `seed`.
    ///
    /// # Errors
    ///
    /// Rejects seeds with duplicate ids or invalid salaries, and seeds whose
    /// largest id leaves no room for new users.
    pub fn with_parts(seed: Vec<UserRecord>, clock: C, validator: V) -> DomainResult<Self> {
        check_rows(&seed)?;
        let next_id = Some(next_free_id(&seed)?);
        let mut controller = Self {
            clock,
            validator,
            filtered_rows: seed.clone(),
            rows: seed,
            next_id,
            search_text: String::new(),
            applied_query: String::new(),
            search_timer: SingleShotTimer::default(),
            search_recomputations: 0,
            sort_key: SortField::Name,
            sort_direction: SortDirection::Ascending,
            page: 0,
            page_size: PageSize::default(),
            selection: BTreeSet::new(),
            dialog: DialogState::Closed,
            toast: Toast::default(),
            sorted_rows: Vec::new(),
            total_salary: 0.0,
        };
        controller.refresh_derived();
        Ok(controller)
    }

    /// Starts with `page_size` rows per page instead of the default.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    // ===== Timers =====

    /// Fires any timer whose deadline has passed. Returns whether state
    /// changed, so the caller knows to redraw.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        let mut changed = false;
        if self.search_timer.fire_if_due(now) {
            self.apply_search();
            changed = true;
        }
        if self.toast.tick(now) {
            changed = true;
        }
        changed
    }

    // ===== Snapshot =====

    /// Every row in table order, ignoring search.
    pub fn rows(&self) -> &[UserRecord] {
        &self.rows
    }

    /// The rows in effect: everything when no search text is set, otherwise
    /// the result of the last applied search.
    pub fn active_rows(&self) -> &[UserRecord] {
        if self.search_text.is_empty() {
            &self.rows
        } else {
            &self.filtered_rows
        }
    }

    /// Row count for the pagination footer.
    pub fn active_count(&self) -> usize {
        self.sorted_rows.len()
    }

    /// The current page of the sorted active rows.
    pub fn visible_rows(&self) -> &[UserRecord] {
        let window = page_window(self.sorted_rows.len(), self.page, self.page_size.rows());
        &self.sorted_rows[window]
    }

    /// All active rows in sort order, across every page.
    pub fn sorted_rows(&self) -> &[UserRecord] {
        &self.sorted_rows
    }

    /// Salary total over the active rows, in lacs.
    pub fn total_salary(&self) -> f64 {
        self.total_salary
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Whether typed search text is still waiting for its debounce.
    pub fn is_search_pending(&self) -> bool {
        self.search_timer.is_pending()
    }

    /// How many times the debounced search has actually run.
    pub fn search_recomputations(&self) -> u64 {
        self.search_recomputations
    }

    pub fn sort_key(&self) -> SortField {
        self.sort_key
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        page_count(self.sorted_rows.len(), self.page_size.rows())
    }

    /// Filler rows that pad a short last page.
    pub fn empty_rows(&self) -> usize {
        empty_rows(self.sorted_rows.len(), self.page, self.page_size.rows())
    }

    pub fn selection(&self) -> &BTreeSet<UserId> {
        &self.selection
    }

    pub fn is_selected(&self, id: UserId) -> bool {
        self.selection.contains(&id)
    }

    /// Header checkbox state: checked when every active row is selected,
    /// indeterminate for a partial selection.
    pub fn select_all_state(&self) -> SelectAllState {
        let selected = self.selection.len();
        let count = self.active_count();
        if count > 0 && selected == count {
            SelectAllState::Checked
        } else if selected > 0 && selected < count {
            SelectAllState::Indeterminate
        } else {
            SelectAllState::Unchecked
        }
    }

    pub fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    /// The toast message while it is visible.
    pub fn toast(&self) -> Option<&str> {
        self.toast.message()
    }

    // ===== Sorting and paging =====

    /// Sorts by `field`; asking for the current field again flips direction.
    pub fn set_sort_key(&mut self, field: SortField) {
        if self.sort_key == field {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_key = field;
            self.sort_direction = SortDirection::Ascending;
        }
        debug!(?field, direction = ?self.sort_direction, "sort changed");
        self.refresh_derived();
    }

    /// Moves to page `page`. Pages past the end are allowed and show no rows.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Changes rows per page and goes back to the first page.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 0;
    }

    // ===== Selection =====

    /// Selects every active row (not just the visible page), or clears the
    /// selection.
    pub fn toggle_select_all(&mut self, checked: bool) {
        if checked {
            self.selection = self.active_rows().iter().map(|row| row.id).collect();
        } else {
            self.selection.clear();
        }
    }

    /// Adds `id` to the selection, or removes it if already there.
    pub fn toggle_row(&mut self, id: UserId) {
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
    }

    // ===== Search =====

    /// Updates the search box right away and schedules the filter to run
    /// once typing has paused for [`SEARCH_DEBOUNCE`].
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.search_timer.schedule(self.clock.now(), SEARCH_DEBOUNCE);
        self.refresh_derived();
    }

    fn apply_search(&mut self) {
        self.applied_query = self.search_text.clone();
        self.filtered_rows = filter_rows(&self.rows, &self.applied_query);
        self.search_recomputations += 1;
        debug!(query = %self.applied_query, matches = self.filtered_rows.len(), "search applied");
        self.refresh_derived();
    }

    // ===== CRUD =====

    /// Adds a user at the top of the table under a freshly allocated id.
    ///
    /// # Arguments
    ///
    /// * `payload` - Validated field values for the new user
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IdSpaceExhausted`] when every id above the
    /// largest one ever used has been handed out. Rows are left unchanged.
    pub fn create_user(&mut self, payload: UserPayload) -> DomainResult<UserId> {
        let id = self.allocate_id()?;
        self.rows.insert(0, payload.into_record(id));
        info!(%id, "user created");
        self.rows_changed();
        self.show_toast("User created");
        Ok(id)
    }

    /// Replaces the user with `id` in place, keeping its id and position.
    /// Unknown ids are ignored; returns whether a row was replaced.
    pub fn edit_user(&mut self, id: UserId, payload: UserPayload) -> bool {
        let Some(row) = self.rows.iter_mut().find(|row| row.id == id) else {
            debug!(%id, "edit ignored, no such user");
            return false;
        };
        *row = payload.into_record(id);
        info!(%id, "user edited");
        self.rows_changed();
        self.show_toast("User edited");
        true
    }

    /// Removes the user with `id`. Unknown ids are ignored. The selection is
    /// left alone; stale ids in it match nothing on a later bulk delete.
    pub fn delete_user(&mut self, id: UserId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        if self.rows.len() == before {
            debug!(%id, "delete ignored, no such user");
            return false;
        }
        info!(%id, "user deleted");
        self.rows_changed();
        self.show_toast("User deleted");
        true
    }

    /// Removes every selected user and clears the selection. Returns how many
    /// rows were removed.
    pub fn delete_selected(&mut self) -> usize {
        let before = self.rows.len();
        let selection = std::mem::take(&mut self.selection);
        self.rows.retain(|row| !selection.contains(&row.id));
        let removed = before - self.rows.len();
        info!(removed, "selected users deleted");
        self.rows_changed();
        let message = match removed {
            0 => "No users deleted".to_string(),
            1 => "User deleted".to_string(),
            n => format!("{n} users deleted"),
        };
        self.show_toast(message);
        removed
    }

    fn allocate_id(&mut self) -> DomainResult<UserId> {
        let Some(next) = self.next_id else {
            return Err(DomainError::IdSpaceExhausted(UserId(u64::MAX)));
        };
        self.next_id = next.checked_add(1);
        Ok(UserId(next))
    }

    // ===== Dialog =====

    /// Opens the create dialog with a blank draft.
    pub fn open_create(&mut self) {
        self.dialog = DialogState::create();
    }

    /// Opens the edit dialog on a snapshot of the user with `id`, with the
    /// draft prefilled from it. Unknown ids leave the dialog as it was.
    pub fn open_edit(&mut self, id: UserId) -> bool {
        let Some(record) = self.rows.iter().find(|row| row.id == id) else {
            debug!(%id, "edit dialog not opened, no such user");
            return false;
        };
        self.dialog = DialogState::edit(record);
        true
    }

    /// Closes the dialog and throws its draft away.
    pub fn close(&mut self) {
        self.dialog = DialogState::Closed;
    }

    /// The open dialog's draft, for the form to type into.
    pub fn draft_mut(&mut self) -> Option<&mut UserDraft> {
        self.dialog.draft_mut()
    }

    /// Validates `draft` and creates or edits according to the open dialog.
    ///
    /// On success the dialog closes.
    ///
    /// # Errors
    ///
    /// * [`SubmitError::DialogClosed`] - no dialog is open
    /// * [`SubmitError::Invalid`] - rows are untouched and the dialog stays
    ///   open, keeping the field errors for display
    /// * [`SubmitError::NotFound`] - the user being edited was deleted in the
    ///   meantime; nothing is written and the dialog closes
    /// * [`SubmitError::Domain`] - a new id could not be allocated; the
    ///   dialog stays open
    pub fn submit(&mut self, draft: UserDraft) -> Result<SubmitOutcome, SubmitError> {
        if !self.dialog.is_open() {
            return Err(SubmitError::DialogClosed);
        }
        let payload = match self.validator.validate(&draft) {
            Ok(payload) => payload,
            Err(errors) => {
                debug!(%errors, "submission rejected");
                self.dialog.set_errors(errors.clone());
                return Err(SubmitError::Invalid(errors));
            }
        };
        let editing = match &self.dialog {
            DialogState::OpenEdit { record, .. } => Some(record.id),
            _ => None,
        };
        let outcome = match editing {
            Some(id) => {
                if !self.edit_user(id, payload) {
                    self.dialog = DialogState::Closed;
                    return Err(SubmitError::NotFound(id));
                }
                SubmitOutcome::Edited(id)
            }
            None => SubmitOutcome::Created(self.create_user(payload)?),
        };
        self.dialog = DialogState::Closed;
        Ok(outcome)
    }

    /// Submits the dialog's own draft.
    pub fn submit_current(&mut self) -> Result<SubmitOutcome, SubmitError> {
        let draft = self.dialog.draft().cloned().ok_or(SubmitError::DialogClosed)?;
        self.submit(draft)
    }

    // ===== Toast =====

    /// Shows `message`, replacing any visible toast, and restarts the
    /// auto-dismiss countdown.
    pub fn show_toast(&mut self, message: impl Into<String>) {
        let now = self.clock.now();
        self.toast.show(message, now);
    }

    /// Hides the toast now and cancels its countdown.
    pub fn dismiss_toast(&mut self) {
        self.toast.dismiss();
    }

    // ===== Derived state =====

    fn rows_changed(&mut self) {
        self.filtered_rows = filter_rows(&self.rows, &self.applied_query);
        self.refresh_derived();
    }

    fn refresh_derived(&mut self) {
        let active = self.active_rows();
        let sorted = sort_rows(active, self.sort_key, self.sort_direction);
        let total = total_salary(active);
        self.sorted_rows = sorted;
        self.total_salary = total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::timer::ManualClock;
    use crate::domain::{DraftField, Role, Shift};

    fn user(id: u64, name: &str, salary: f64) -> UserRecord {
        UserRecord {
            id: UserId(id),
            name: name.to_string(),
            role: Role::Frontend,
            email: format!("{}@example.com", name.to_lowercase()),
            dob: "1990-01-01".to_string(),
            active: true,
            bio: String::new(),
            shift: Shift::Day,
            salary,
        }
    }

    fn payload(name: &str, salary: f64) -> UserPayload {
        UserPayload {
            name: name.to_string(),
            role: Role::Backend,
            email: format!("{}@example.com", name.to_lowercase()),
            dob: "1995-05-05".to_string(),
            active: true,
            bio: String::new(),
            shift: Shift::Night,
            salary,
        }
    }

    fn draft(name: &str, salary: &str) -> UserDraft {
        UserDraft {
            name: name.to_string(),
            role: "backend".to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            dob: "1995-05-05".to_string(),
            active: false,
            bio: String::new(),
            shift: "day".to_string(),
            salary: salary.to_string(),
        }
    }

    fn controller(rows: Vec<UserRecord>) -> (TableController<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let table = TableController::with_parts(rows, clock.clone(), UserFormValidator).unwrap();
        (table, clock)
    }

    fn names(rows: &[UserRecord]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    fn ann_and_bob() -> Vec<UserRecord> {
        vec![user(1, "Ann", 10.0), user(2, "Bob", 20.0)]
    }

    #[test]
    fn test_defaults() {
        let (table, _) = controller(ann_and_bob());
        assert_eq!(table.sort_key(), SortField::Name);
        assert_eq!(table.sort_direction(), SortDirection::Ascending);
        assert_eq!(table.page(), 0);
        assert_eq!(table.page_size(), PageSize::Ten);
        assert!(table.selection().is_empty());
        assert!(!table.dialog().is_open());
        assert_eq!(table.toast(), None);
        assert_eq!(table.total_salary(), 30.0);
    }

    #[test]
    fn test_duplicate_seed_ids_rejected() {
        let clock = ManualClock::new();
        let result = TableController::with_parts(
            vec![user(1, "Ann", 1.0), user(1, "Bob", 2.0)],
            clock,
            UserFormValidator,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_sort_toggle_and_delete_scenario() {
        let (mut table, _) = controller(ann_and_bob());
        table.set_sort_key(SortField::Salary);
        assert_eq!(names(table.visible_rows()), vec!["Ann", "Bob"]);
        table.set_sort_key(SortField::Salary);
        assert_eq!(table.sort_direction(), SortDirection::Descending);
        assert_eq!(names(table.visible_rows()), vec!["Bob", "Ann"]);

        assert!(table.delete_user(UserId(1)));
        assert_eq!(table.rows().len(), 1);
        assert_eq!(table.rows()[0].id, UserId(2));
        assert_eq!(table.total_salary(), 20.0);
        assert_eq!(table.toast(), Some("User deleted"));
    }

    #[test]
    fn test_new_sort_key_resets_to_ascending() {
        let (mut table, _) = controller(ann_and_bob());
        table.set_sort_key(SortField::Name);
        assert_eq!(table.sort_direction(), SortDirection::Descending);
        table.set_sort_key(SortField::Salary);
        assert_eq!(table.sort_key(), SortField::Salary);
        assert_eq!(table.sort_direction(), SortDirection::Ascending);
    }

    #[test]
    fn test_create_prepends_with_fresh_id() {
        let (mut table, _) = controller(ann_and_bob());
        let id = table.create_user(payload("Cal", 5.0)).unwrap();
        assert_ne!(id, UserId(1));
        assert_ne!(id, UserId(2));
        assert_eq!(table.rows()[0].name, "Cal");
        assert_eq!(table.rows()[0].id, id);
        assert_eq!(table.total_salary(), 35.0);
        assert_eq!(table.toast(), Some("User created"));
    }

    #[test]
    fn test_rapid_creations_never_share_ids() {
        let (mut table, _) = controller(ann_and_bob());
        for i in 0..100 {
            table.create_user(payload("Dup", i as f64)).unwrap();
        }
        let ids: BTreeSet<UserId> = table.rows().iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), table.rows().len());
        assert_eq!(ids.len(), 102);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let (mut table, _) = controller(ann_and_bob());
        let first = table.create_user(payload("Cal", 1.0)).unwrap();
        table.delete_user(first);
        let second = table.create_user(payload("Dee", 1.0)).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_edit_keeps_id_and_position() {
        let (mut table, _) = controller(vec![user(1, "Ann", 1.0), user(2, "Bob", 2.0), user(3, "Cal", 3.0)]);
        assert!(table.edit_user(UserId(2), payload("Bea", 9.0)));
        assert_eq!(names(table.rows()), vec!["Ann", "Bea", "Cal"]);
        assert_eq!(table.rows()[1].id, UserId(2));
        assert_eq!(table.total_salary(), 13.0);
        assert_eq!(table.toast(), Some("User edited"));
    }

    #[test]
    fn test_missing_ids_are_no_ops() {
        let (mut table, _) = controller(ann_and_bob());
        assert!(!table.edit_user(UserId(99), payload("Zed", 1.0)));
        assert!(!table.delete_user(UserId(99)));
        assert_eq!(table.rows(), ann_and_bob().as_slice());
        assert_eq!(table.toast(), None);
    }

    #[test]
    fn test_select_all_then_none() {
        let (mut table, _) = controller(ann_and_bob());
        table.toggle_select_all(true);
        assert_eq!(table.selection().len(), 2);
        assert_eq!(table.select_all_state(), SelectAllState::Checked);
        table.toggle_select_all(false);
        assert!(table.selection().is_empty());
        assert_eq!(table.select_all_state(), SelectAllState::Unchecked);
    }

    #[test]
    fn test_select_all_covers_every_page() {
        let rows = (1..=12).map(|i| user(i, "User", i as f64)).collect();
        let (mut table, _) = controller(rows);
        table.set_page_size(PageSize::Five);
        assert_eq!(table.visible_rows().len(), 5);
        table.toggle_select_all(true);
        assert_eq!(table.selection().len(), 12);
    }

    #[test]
    fn test_select_all_on_filtered_set() {
        let (mut table, clock) = controller(vec![user(1, "Alice", 1.0), user(2, "Bob", 2.0), user(3, "Malik", 3.0)]);
        table.set_search_text("li");
        clock.advance(SEARCH_DEBOUNCE);
        table.tick();
        table.toggle_select_all(true);
        let selected: Vec<UserId> = table.selection().iter().copied().collect();
        assert_eq!(selected, vec![UserId(1), UserId(3)]);
    }

    #[test]
    fn test_toggle_row_and_indeterminate_header() {
        let (mut table, _) = controller(ann_and_bob());
        table.toggle_row(UserId(2));
        assert!(table.is_selected(UserId(2)));
        assert_eq!(table.select_all_state(), SelectAllState::Indeterminate);
        table.toggle_row(UserId(2));
        assert!(!table.is_selected(UserId(2)));
    }

    #[test]
    fn test_selection_survives_sort_and_paging() {
        let rows = (1..=12).map(|i| user(i, "User", i as f64)).collect();
        let (mut table, _) = controller(rows);
        table.toggle_row(UserId(12));
        table.set_sort_key(SortField::Salary);
        table.set_page_size(PageSize::Five);
        table.set_page(1);
        assert!(table.is_selected(UserId(12)));
        assert!(table.visible_rows().iter().all(|r| r.id != UserId(12)));
    }

    #[test]
    fn test_delete_selected_removes_exactly_selected() {
        let (mut table, _) = controller(vec![user(1, "Ann", 1.0), user(2, "Bob", 2.0), user(3, "Cal", 3.0)]);
        table.toggle_row(UserId(1));
        table.toggle_row(UserId(3));
        assert_eq!(table.delete_selected(), 2);
        assert_eq!(names(table.rows()), vec!["Bob"]);
        assert!(table.selection().is_empty());
        assert_eq!(table.toast(), Some("2 users deleted"));
        assert_eq!(table.total_salary(), 2.0);
    }

    #[test]
    fn test_delete_selected_ignores_stale_ids() {
        let (mut table, _) = controller(vec![user(1, "Ann", 1.0), user(2, "Bob", 2.0), user(3, "Cal", 3.0)]);
        table.toggle_row(UserId(1));
        table.toggle_row(UserId(2));
        table.delete_user(UserId(1));
        assert!(table.is_selected(UserId(1)));
        assert_eq!(table.delete_selected(), 1);
        assert_eq!(names(table.rows()), vec!["Cal"]);
        assert!(table.selection().is_empty());
        assert_eq!(table.toast(), Some("User deleted"));
    }

    #[test]
    fn test_debounced_search_runs_once_with_latest_text() {
        let (mut table, clock) = controller(vec![user(1, "Alice", 1.0), user(2, "Alan", 2.0), user(3, "Bob", 3.0)]);
        for text in ["a", "al", "ali"] {
            table.set_search_text(text);
            assert_eq!(table.search_text(), text);
            clock.advance(Duration::from_millis(100));
            assert!(!table.tick());
        }
        assert_eq!(table.search_recomputations(), 0);

        clock.advance(Duration::from_millis(199));
        table.tick();
        assert_eq!(table.search_recomputations(), 0);

        clock.advance(Duration::from_millis(1));
        assert!(table.tick());
        assert_eq!(table.search_recomputations(), 1);
        assert_eq!(names(table.active_rows()), vec!["Alice"]);

        clock.advance(Duration::from_secs(1));
        table.tick();
        assert_eq!(table.search_recomputations(), 1);
    }

    #[test]
    fn test_search_matches_email_and_clearing_restores_rows() {
        let mut rows = vec![user(1, "Ann", 1.0), user(2, "Bob", 2.0)];
        rows[1].email = "robert@corp.io".to_string();
        let (mut table, clock) = controller(rows);
        table.set_search_text("CORP");
        clock.advance(SEARCH_DEBOUNCE);
        table.tick();
        assert_eq!(names(table.active_rows()), vec!["Bob"]);
        assert_eq!(table.total_salary(), 2.0);
        assert_eq!(table.active_count(), 1);

        table.set_search_text("");
        assert_eq!(table.active_count(), 2);
        assert_eq!(table.total_salary(), 3.0);
    }

    #[test]
    fn test_mutations_keep_applied_filter() {
        let (mut table, clock) = controller(vec![user(1, "Alice", 1.0), user(2, "Bob", 2.0)]);
        table.set_search_text("ali");
        clock.advance(SEARCH_DEBOUNCE);
        table.tick();
        table.create_user(payload("Zed", 5.0)).unwrap();
        assert_eq!(names(table.active_rows()), vec!["Alice"]);
        table.create_user(payload("Alina", 7.0)).unwrap();
        assert_eq!(names(table.active_rows()), vec!["Alina", "Alice"]);
        assert_eq!(table.total_salary(), 8.0);
    }

    #[test]
    fn test_pagination_window_and_page_size_reset() {
        let rows = (1..=12).map(|i| user(i, &format!("User{:02}", i), i as f64)).collect();
        let (mut table, _) = controller(rows);
        table.set_page_size(PageSize::Five);
        table.set_page(2);
        assert_eq!(names(table.visible_rows()), vec!["User11", "User12"]);
        assert_eq!(table.page_count(), 3);
        assert_eq!(table.empty_rows(), 3);

        table.set_page_size(PageSize::Ten);
        assert_eq!(table.page(), 0);
        assert_eq!(table.visible_rows().len(), 10);
    }

    #[test]
    fn test_page_is_not_clamped_after_deletes() {
        let rows = (1..=6).map(|i| user(i, &format!("User{i}"), 1.0)).collect();
        let (mut table, _) = controller(rows);
        table.set_page_size(PageSize::Five);
        table.set_page(1);
        assert_eq!(table.visible_rows().len(), 1);
        table.delete_user(UserId(6));
        assert_eq!(table.page(), 1);
        assert!(table.visible_rows().is_empty());
    }

    #[test]
    fn test_total_salary_tracks_mutations() {
        let (mut table, _) = controller(ann_and_bob());
        let id = table.create_user(payload("Cal", 5.0)).unwrap();
        assert_eq!(table.total_salary(), 35.0);
        table.edit_user(id, payload("Cal", 7.5));
        assert_eq!(table.total_salary(), 37.5);
        table.delete_user(UserId(2));
        assert_eq!(table.total_salary(), 17.5);
    }

    #[test]
    fn test_submit_create_with_empty_name_is_rejected() {
        let (mut table, _) = controller(ann_and_bob());
        table.open_create();
        let result = table.submit(draft("", "5"));
        match result {
            Err(SubmitError::Invalid(errors)) => {
                assert_eq!(errors.get(DraftField::Name), Some("*Mandatory Field"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(table.rows(), ann_and_bob().as_slice());
        assert!(table.dialog().is_open());
        assert!(table.dialog().errors().is_some_and(|e| e.get(DraftField::Name).is_some()));
        assert_eq!(table.toast(), None);
    }

    #[test]
    fn test_submit_create_closes_dialog() {
        let (mut table, _) = controller(ann_and_bob());
        table.open_create();
        let outcome = table.submit(draft("Cal", "5")).unwrap();
        let SubmitOutcome::Created(id) = outcome else {
            panic!("expected create, got {outcome:?}");
        };
        assert_eq!(table.rows()[0].id, id);
        assert_eq!(table.rows()[0].name, "Cal");
        assert!(!table.dialog().is_open());
        assert_eq!(table.toast(), Some("User created"));
    }

    #[test]
    fn test_submit_edit_replaces_record() {
        let (mut table, _) = controller(ann_and_bob());
        assert!(table.open_edit(UserId(2)));
        let draft = table.draft_mut().unwrap();
        draft.salary = "25".to_string();
        assert_eq!(table.submit_current(), Ok(SubmitOutcome::Edited(UserId(2))));
        assert_eq!(table.rows()[1].salary, 25.0);
        assert_eq!(table.rows()[1].id, UserId(2));
        assert_eq!(table.toast(), Some("User edited"));
        assert!(!table.dialog().is_open());
    }

    #[test]
    fn test_open_edit_unknown_id_is_no_op() {
        let (mut table, _) = controller(ann_and_bob());
        assert!(!table.open_edit(UserId(99)));
        assert!(!table.dialog().is_open());

        table.open_create();
        assert!(!table.open_edit(UserId(99)));
        assert_eq!(table.dialog().title(), Some("Create User"));
    }

    #[test]
    fn test_submit_edit_of_deleted_user_reports_not_found() {
        let (mut table, _) = controller(ann_and_bob());
        assert!(table.open_edit(UserId(1)));
        table.delete_user(UserId(1));

        assert_eq!(table.submit_current(), Err(SubmitError::NotFound(UserId(1))));
        let ids: Vec<UserId> = table.rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![UserId(2)]);
        assert!(!table.dialog().is_open());
        assert_eq!(table.toast(), Some("User deleted"));
    }

    #[test]
    fn test_seed_with_max_id_is_rejected() {
        let result = TableController::with_parts(
            vec![user(0, "Ann", 1.0), user(u64::MAX, "Bob", 2.0)],
            ManualClock::new(),
            UserFormValidator,
        );
        assert!(matches!(
            result,
            Err(DomainError::IdSpaceExhausted(UserId(u64::MAX)))
        ));
    }

    #[test]
    fn test_create_stops_when_ids_run_out() {
        let (mut table, _) = controller(vec![user(u64::MAX - 1, "Ann", 1.0)]);
        assert_eq!(table.create_user(payload("Bob", 2.0)), Ok(UserId(u64::MAX)));
        assert_eq!(
            table.create_user(payload("Cal", 3.0)),
            Err(DomainError::IdSpaceExhausted(UserId(u64::MAX)))
        );
        assert_eq!(names(table.rows()), vec!["Bob", "Ann"]);

        table.open_create();
        let result = table.submit(draft("Cal", "3"));
        assert!(matches!(result, Err(SubmitError::Domain(DomainError::IdSpaceExhausted(_)))));
        assert!(table.dialog().is_open());
        assert_eq!(table.rows().len(), 2);
    }

    #[test]
    fn test_seed_with_negative_salary_is_rejected() {
        let result = TableController::with_parts(
            vec![user(1, "Ann", -5.0)],
            ManualClock::new(),
            UserFormValidator,
        );
        assert!(matches!(result, Err(DomainError::InvalidSalary { id: UserId(1), .. })));
    }

    #[test]
    fn test_close_discards_draft() {
        let (mut table, _) = controller(ann_and_bob());
        table.open_create();
        if let Some(draft) = table.draft_mut() {
            draft.name = "Ghost".to_string();
        }
        table.close();
        assert!(!table.dialog().is_open());
        assert_eq!(table.submit_current(), Err(SubmitError::DialogClosed));
        assert_eq!(table.rows().len(), 2);
    }

    #[test]
    fn test_submit_without_dialog() {
        let (mut table, _) = controller(ann_and_bob());
        assert_eq!(table.submit(draft("Cal", "5")), Err(SubmitError::DialogClosed));
    }

    #[test]
    fn test_toast_auto_dismisses_via_tick() {
        let (mut table, clock) = controller(ann_and_bob());
        table.delete_user(UserId(1));
        clock.advance(Duration::from_secs(4));
        assert!(table.tick());
        assert_eq!(table.toast(), None);
    }

    #[test]
    fn test_dismiss_toast() {
        let (mut table, _) = controller(ann_and_bob());
        table.show_toast("hello");
        table.dismiss_toast();
        assert_eq!(table.toast(), None);
    }
}
