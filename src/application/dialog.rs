use crate::domain::{UserDraft, UserRecord, ValidationErrors};

/// The create/edit form.
///
/// `errors` holds the messages of the last rejected submission so the form
/// can show them next to each field.
#[derive(Debug, Clone, Default)]
pub enum DialogState {
    #[default]
    Closed,
    OpenCreate {
        draft: UserDraft,
        errors: ValidationErrors,
    },
    OpenEdit {
        record: UserRecord,
        draft: UserDraft,
        errors: ValidationErrors,
    },
}

impl DialogState {
    pub fn create() -> Self {
        DialogState::OpenCreate {
            draft: UserDraft::blank(),
            errors: ValidationErrors::new(),
        }
    }

    pub fn edit(record: &UserRecord) -> Self {
        DialogState::OpenEdit {
            record: record.clone(),
            draft: UserDraft::from(record),
            errors: ValidationErrors::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, DialogState::Closed)
    }

    pub fn title(&self) -> Option<&'static str> {
        match self {
            DialogState::Closed => None,
            DialogState::OpenCreate { .. } => Some("Create User"),
            DialogState::OpenEdit { .. } => Some("Edit User"),
        }
    }

    pub fn draft(&self) -> Option<&UserDraft> {
        match self {
            DialogState::Closed => None,
            DialogState::OpenCreate { draft, .. } | DialogState::OpenEdit { draft, .. } => Some(draft),
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut UserDraft> {
        match self {
            DialogState::Closed => None,
            DialogState::OpenCreate { draft, .. } | DialogState::OpenEdit { draft, .. } => Some(draft),
        }
    }

    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            DialogState::Closed => None,
            DialogState::OpenCreate { errors, .. } | DialogState::OpenEdit { errors, .. } => Some(errors),
        }
    }

    pub(crate) fn set_errors(&mut self, new_errors: ValidationErrors) {
        match self {
            DialogState::Closed => {}
            DialogState::OpenCreate { errors, .. } | DialogState::OpenEdit { errors, .. } => {
                *errors = new_errors;
            }
        }
    }
}
