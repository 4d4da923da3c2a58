//! Table operations over user rows: ordering, search matching, paging and
//! aggregates.
//!
//! Everything here is a pure function of its inputs so the controller can
//! recompute derived views eagerly whenever one of them changes.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::ops::Range;

use super::errors::{DomainError, DomainResult};
use super::models::{SortDirection, SortField, UserRecord};

/// Compares two users on a single column using the natural order of its
/// value: lexical for text (role and shift compare by their stored keys,
/// `dob` by its ISO string), numeric for `id` and `salary`, and
/// `false < true` for `active`.
pub fn compare_by(field: SortField, a: &UserRecord, b: &UserRecord) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Name => a.name.cmp(&b.name),
        SortField::Email => a.email.cmp(&b.email),
        SortField::Role => a.role.as_str().cmp(b.role.as_str()),
        SortField::DateOfBirth => a.dob.cmp(&b.dob),
        SortField::Salary => a.salary.partial_cmp(&b.salary).unwrap_or(Ordering::Equal),
        SortField::Shift => a.shift.as_str().cmp(b.shift.as_str()),
        SortField::Active => a.active.cmp(&b.active),
        SortField::Bio => a.bio.cmp(&b.bio),
    }
}

/// Returns `rows` ordered by `field`.
///
/// The sort is stable in both directions: rows that compare equal keep the
/// order they had in `rows`. Descending reverses the comparator rather than
/// the output, which is what keeps ties in their original order.
///
/// # Examples
///
/// ```
/// use usertable::domain::{sort_rows, SortDirection, SortField};
///
/// let rows = usertable::infrastructure::default_users();
/// let by_salary = sort_rows(&rows, SortField::Salary, SortDirection::Descending);
/// assert!(by_salary.windows(2).all(|w| w[0].salary >= w[1].salary));
/// ```
pub fn sort_rows(rows: &[UserRecord], field: SortField, direction: SortDirection) -> Vec<UserRecord> {
    let mut sorted = rows.to_vec();
    match direction {
        SortDirection::Ascending => sorted.sort_by(|a, b| compare_by(field, a, b)),
        SortDirection::Descending => sorted.sort_by(|a, b| compare_by(field, a, b).reverse()),
    }
    sorted
}

/// Case-insensitive substring match on name or email.
pub fn matches_query(row: &UserRecord, query: &str) -> bool {
    let needle = query.to_lowercase();
    row.name.to_lowercase().contains(&needle) || row.email.to_lowercase().contains(&needle)
}

/// Rows matching `query` per [`matches_query`], in their original order.
/// An empty query matches everything.
pub fn filter_rows(rows: &[UserRecord], query: &str) -> Vec<UserRecord> {
    rows.iter()
        .filter(|row| matches_query(row, query))
        .cloned()
        .collect()
}

/// Index range of page `page` in a set of `len` rows.
///
/// The range is clipped to the set; a page past the end yields an empty
/// range rather than being moved back.
pub fn page_window(len: usize, page: usize, page_size: usize) -> Range<usize> {
    let start = page.saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// Number of pages needed for `len` rows; zero for an empty set.
///
/// # Examples
///
/// ```
/// use usertable::domain::page_count;
///
/// assert_eq!(page_count(12, 5), 3);
/// assert_eq!(page_count(0, 5), 0);
/// ```
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Number of blank filler rows needed to keep a short last page the same
/// height as a full one. The first page is never padded.
pub fn empty_rows(len: usize, page: usize, page_size: usize) -> usize {
    if page == 0 {
        return 0;
    }
    (page + 1).saturating_mul(page_size).saturating_sub(len)
}

/// Sum of salaries in lacs over every row given, not just one page.
pub fn total_salary(rows: &[UserRecord]) -> f64 {
    rows.iter().map(|row| row.salary).sum()
}

/// Checks that no two rows share an id.
pub fn ensure_unique_ids(rows: &[UserRecord]) -> DomainResult<()> {
    let mut seen = HashSet::with_capacity(rows.len());
    for row in rows {
        if !seen.insert(row.id) {
            return Err(DomainError::DuplicateId(row.id));
        }
    }
    Ok(())
}

/// Checks that every salary is a non-negative number.
pub fn ensure_valid_salaries(rows: &[UserRecord]) -> DomainResult<()> {
    match rows.iter().find(|row| row.salary.is_nan() || row.salary < 0.0) {
        Some(row) => Err(DomainError::InvalidSalary {
            id: row.id,
            salary: row.salary,
        }),
        None => Ok(()),
    }
}

/// Checks rows coming from outside the table (seed files, the built-in
/// sample) before a controller takes ownership of them.
pub fn check_rows(rows: &[UserRecord]) -> DomainResult<()> {
    ensure_unique_ids(rows)?;
    ensure_valid_salaries(rows)
}

/// First id a new row may take: one past the largest id in `rows`, or 1 for
/// an empty set.
///
/// # Errors
///
/// Returns [`DomainError::IdSpaceExhausted`] when the largest id is already
/// `u64::MAX`.
pub fn next_free_id(rows: &[UserRecord]) -> DomainResult<u64> {
    match rows.iter().map(|row| row.id).max() {
        None => Ok(1),
        Some(max) => max.0.checked_add(1).ok_or(DomainError::IdSpaceExhausted(max)),
    }
}
