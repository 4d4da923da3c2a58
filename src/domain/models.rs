use std::fmt;
use serde::{Deserialize, Serialize};

/// Opaque identifier of a user row. Assigned once, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Frontend,
    Backend,
    Devops,
    UiDesigner,
    ContentWriter,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Frontend,
        Role::Backend,
        Role::Devops,
        Role::UiDesigner,
        Role::ContentWriter,
    ];

    /// Stored key, also the value used for sorting.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Frontend => "frontend",
            Role::Backend => "backend",
            Role::Devops => "devops",
            Role::UiDesigner => "uiDesigner",
            Role::ContentWriter => "contentWriter",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Frontend => "Frontend",
            Role::Backend => "Backend",
            Role::Devops => "DevOps",
            Role::UiDesigner => "UI Designer",
            Role::ContentWriter => "Content Writer",
        }
    }

    pub fn from_key(key: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.as_str() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    Day,
    Night,
    Flexible,
}

impl Shift {
    pub const ALL: [Shift; 3] = [Shift::Day, Shift::Night, Shift::Flexible];

    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Day => "day",
            Shift::Night => "night",
            Shift::Flexible => "flexible",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Shift::Day => "Day",
            Shift::Night => "Night",
            Shift::Flexible => "Flexible",
        }
    }

    pub fn from_key(key: &str) -> Option<Shift> {
        Shift::ALL.into_iter().find(|shift| shift.as_str() == key)
    }
}

/// One person in the table.
///
/// Field names on the wire match the seed files (`dob`, camelCase role keys).
/// `dob` holds an ISO-8601 date, or the empty string when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub role: Role,
    pub email: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub bio: String,
    pub shift: Shift,
    /// Salary in lacs.
    pub salary: f64,
}

/// Raw form values collected before validation.
///
/// Everything the operator types is kept as text so a half-finished form
/// can be represented; [`crate::domain::Validator`] turns it into a
/// [`UserPayload`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDraft {
    pub name: String,
    pub role: String,
    pub email: String,
    pub dob: String,
    pub active: bool,
    pub bio: String,
    pub shift: String,
    pub salary: String,
}

impl UserDraft {
    pub fn blank() -> Self {
        Self::default()
    }

    /// Mutable access to a text field, `None` for fields picked from a fixed set.
    pub fn text_field_mut(&mut self, field: DraftField) -> Option<&mut String> {
        match field {
            DraftField::Name => Some(&mut self.name),
            DraftField::Email => Some(&mut self.email),
            DraftField::DateOfBirth => Some(&mut self.dob),
            DraftField::Salary => Some(&mut self.salary),
            DraftField::Bio => Some(&mut self.bio),
            DraftField::Role | DraftField::Shift | DraftField::Active => None,
        }
    }
}

impl From<&UserRecord> for UserDraft {
    fn from(record: &UserRecord) -> Self {
        Self {
            name: record.name.clone(),
            role: record.role.as_str().to_string(),
            email: record.email.clone(),
            dob: record.dob.clone(),
            active: record.active,
            bio: record.bio.clone(),
            shift: record.shift.as_str().to_string(),
            salary: record.salary.to_string(),
        }
    }
}

/// A validated submission. Becomes a [`UserRecord`] once an id is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct UserPayload {
    pub name: String,
    pub role: Role,
    pub email: String,
    pub dob: String,
    pub active: bool,
    pub bio: String,
    pub shift: Shift,
    pub salary: f64,
}

impl UserPayload {
    pub fn into_record(self, id: UserId) -> UserRecord {
        UserRecord {
            id,
            name: self.name,
            role: self.role,
            email: self.email,
            dob: self.dob,
            active: self.active,
            bio: self.bio,
            shift: self.shift,
            salary: self.salary,
        }
    }
}

/// Form fields, in the order the create/edit form shows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DraftField {
    Name,
    Email,
    Role,
    Salary,
    DateOfBirth,
    Shift,
    Active,
    Bio,
}

impl DraftField {
    pub const ALL: [DraftField; 8] = [
        DraftField::Name,
        DraftField::Email,
        DraftField::Role,
        DraftField::Salary,
        DraftField::DateOfBirth,
        DraftField::Shift,
        DraftField::Active,
        DraftField::Bio,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Name => "Name*",
            DraftField::Email => "Email*",
            DraftField::Role => "Role*",
            DraftField::Salary => "Current Salary*",
            DraftField::DateOfBirth => "Date of birth*",
            DraftField::Shift => "Shift*",
            DraftField::Active => "Active",
            DraftField::Bio => "Bio",
        }
    }

    /// Whether the field is typed in rather than picked from a fixed set.
    pub fn is_text(&self) -> bool {
        !matches!(self, DraftField::Role | DraftField::Shift | DraftField::Active)
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            DraftField::Name => "name",
            DraftField::Email => "email",
            DraftField::Role => "role",
            DraftField::Salary => "salary",
            DraftField::DateOfBirth => "dob",
            DraftField::Shift => "shift",
            DraftField::Active => "active",
            DraftField::Bio => "bio",
        };
        f.write_str(key)
    }
}

/// Column a table can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Id,
    Name,
    Email,
    Role,
    DateOfBirth,
    Salary,
    Shift,
    Active,
    Bio,
}

impl SortField {
    /// Sortable columns in display order.
    pub const COLUMNS: [SortField; 7] = [
        SortField::Name,
        SortField::Email,
        SortField::Role,
        SortField::DateOfBirth,
        SortField::Salary,
        SortField::Shift,
        SortField::Active,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortField::Id => "Id",
            SortField::Name => "Name",
            SortField::Email => "Email",
            SortField::Role => "Role",
            SortField::DateOfBirth => "DOB",
            SortField::Salary => "Salary (in lacs)",
            SortField::Shift => "Shift Timing",
            SortField::Active => "Status",
            SortField::Bio => "Bio",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Rows per page. The table offers a fixed set of sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    Five,
    #[default]
    Ten,
    TwentyFive,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::Five, PageSize::Ten, PageSize::TwentyFive];

    pub fn rows(&self) -> usize {
        match self {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
        }
    }

    pub fn from_rows(rows: usize) -> Option<PageSize> {
        PageSize::ALL.into_iter().find(|size| size.rows() == rows)
    }

    /// Next size in the option list, wrapping around.
    pub fn next(self) -> Self {
        match self {
            PageSize::Five => PageSize::Ten,
            PageSize::Ten => PageSize::TwentyFive,
            PageSize::TwentyFive => PageSize::Five,
        }
    }
}
