use std::collections::BTreeMap;

use super::models::{DraftField, UserId};

/// Field-level messages produced when a draft is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{} invalid field(s): {}", .fields.len(), summary(.fields))]
pub struct ValidationErrors {
    fields: BTreeMap<DraftField, String>,
}

fn summary(fields: &BTreeMap<DraftField, String>) -> String {
    fields
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field`. The first message per field wins.
    pub fn add(&mut self, field: DraftField, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: DraftField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DraftField, &str)> {
        self.fields.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Reasons a set of rows or an operation on them is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("duplicate user id {0}")]
    DuplicateId(UserId),
    #[error("user {id} has invalid salary {salary}")]
    InvalidSalary { id: UserId, salary: f64 },
    /// No id above the largest one in use is left to hand out.
    #[error("no user ids left after {0}")]
    IdSpaceExhausted(UserId),
}

pub type DomainResult<T> = Result<T, DomainError>;
