//! Form validation for create and edit submissions.
//!
//! The controller only talks to the [`Validator`] trait; the rules below are
//! the ones the user form ships with.

use std::sync::LazyLock;

use regex::Regex;

use super::errors::ValidationErrors;
use super::formatters::parse_date;
use super::models::{DraftField, Role, Shift, UserDraft, UserPayload};

pub const MANDATORY: &str = "*Mandatory Field";
pub const SALARY_LIMIT: f64 = 10_000.0;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z ]*$").expect("name pattern is valid"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Checks a draft and shapes it into a payload, or reports what is wrong
/// with each field.
pub trait Validator {
    fn validate(&self, draft: &UserDraft) -> Result<UserPayload, ValidationErrors>;
}

/// The default rule set of the user form.
///
/// # Examples
///
/// ```
/// use usertable::domain::{DraftField, UserDraft, UserFormValidator, Validator};
///
/// let errors = UserFormValidator.validate(&UserDraft::blank()).unwrap_err();
/// assert_eq!(errors.get(DraftField::Name), Some("*Mandatory Field"));
/// assert!(errors.get(DraftField::Bio).is_none());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct UserFormValidator;

impl Validator for UserFormValidator {
    fn validate(&self, draft: &UserDraft) -> Result<UserPayload, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = draft.name.trim();
        if name.is_empty() {
            errors.add(DraftField::Name, MANDATORY);
        } else if !NAME_RE.is_match(name) {
            errors.add(DraftField::Name, "Only alphabets and spaces are allowed");
        }

        let email = draft.email.trim();
        if email.is_empty() {
            errors.add(DraftField::Email, MANDATORY);
        } else if !EMAIL_RE.is_match(email) {
            errors.add(DraftField::Email, "Invalid email");
        }

        let role = required(&mut errors, DraftField::Role, &draft.role).and_then(|key| {
            let role = Role::from_key(key);
            if role.is_none() {
                errors.add(DraftField::Role, "Invalid role");
            }
            role
        });

        let dob = required(&mut errors, DraftField::DateOfBirth, &draft.dob).and_then(|value| {
            let date = parse_date(value);
            if date.is_none() {
                errors.add(DraftField::DateOfBirth, "Invalid date");
            }
            date
        });

        let shift = required(&mut errors, DraftField::Shift, &draft.shift).and_then(|key| {
            let shift = Shift::from_key(key);
            if shift.is_none() {
                errors.add(DraftField::Shift, "Invalid shift");
            }
            shift
        });

        let salary = required(&mut errors, DraftField::Salary, &draft.salary)
            .and_then(|value| check_salary(&mut errors, value));

        match (role, dob, shift, salary) {
            (Some(role), Some(dob), Some(shift), Some(salary)) if errors.is_empty() => Ok(UserPayload {
                name: name.to_string(),
                role,
                email: email.to_string(),
                dob: dob.format("%Y-%m-%d").to_string(),
                active: draft.active,
                bio: draft.bio.clone(),
                shift,
                salary,
            }),
            _ => Err(errors),
        }
    }
}

fn required<'a>(errors: &mut ValidationErrors, field: DraftField, value: &'a str) -> Option<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, MANDATORY);
        None
    } else {
        Some(value)
    }
}

fn check_salary(errors: &mut ValidationErrors, value: &str) -> Option<f64> {
    let salary = match value.parse::<f64>() {
        Ok(salary) if salary.is_finite() => salary,
        _ => {
            errors.add(DraftField::Salary, "Salary must be a number");
            return None;
        }
    };
    if salary < 0.0 {
        errors.add(DraftField::Salary, "Salary cannot be negative");
        None
    } else if salary >= SALARY_LIMIT {
        errors.add(DraftField::Salary, "Salary must be less than 10,000 lacs");
        None
    } else {
        Some(salary)
    }
}
