//! Built-in sample users, used when no seed file is given.

use crate::domain::{Role, Shift, UserId, UserRecord};

#[allow(clippy::too_many_arguments)]
fn user(
    id: u64,
    name: &str,
    role: Role,
    email: &str,
    dob: &str,
    active: bool,
    shift: Shift,
    salary: f64,
    bio: &str,
) -> UserRecord {
    UserRecord {
        id: UserId(id),
        name: name.to_string(),
        role,
        email: email.to_string(),
        dob: dob.to_string(),
        active,
        bio: bio.to_string(),
        shift,
        salary,
    }
}

pub fn default_users() -> Vec<UserRecord> {
    vec![
        user(1, "Aarav Sharma", Role::Frontend, "aarav.sharma@example.com", "1994-03-12", true, Shift::Day, 12.5, "Owns the design system."),
        user(2, "Priya Nair", Role::Backend, "priya.nair@example.com", "1991-07-08", true, Shift::Flexible, 24.0, ""),
        user(3, "Rohan Mehta", Role::Devops, "rohan.mehta@example.com", "1989-11-23", false, Shift::Night, 18.0, "On call for the payments cluster."),
        user(4, "Ananya Iyer", Role::UiDesigner, "ananya.iyer@example.com", "1997-01-30", true, Shift::Day, 9.5, ""),
        user(5, "Kabir Singh", Role::ContentWriter, "kabir.singh@example.com", "", true, Shift::Flexible, 6.0, "Writes release notes."),
        user(6, "Meera Pillai", Role::Backend, "meera.pillai@example.com", "1993-05-17", true, Shift::Night, 21.0, ""),
        user(7, "Vikram Rao", Role::Frontend, "vikram.rao@example.com", "1990-09-02", false, Shift::Day, 15.0, ""),
        user(8, "Sneha Kulkarni", Role::Devops, "sneha.kulkarni@example.com", "1995-12-19", true, Shift::Flexible, 17.5, "Maintains CI."),
        user(9, "Arjun Das", Role::Backend, "arjun.das@example.com", "1988-04-04", true, Shift::Day, 30.0, ""),
        user(10, "Isha Verma", Role::UiDesigner, "isha.verma@example.com", "1999-08-14", false, Shift::Day, 8.0, ""),
        user(11, "Nikhil Joshi", Role::Frontend, "nikhil.joshi@example.com", "1996-02-27", true, Shift::Night, 11.0, ""),
        user(12, "Tara Menon", Role::ContentWriter, "tara.menon@example.com", "1992-10-05", true, Shift::Day, 7.5, "Docs lead."),
        user(13, "Dev Patel", Role::Devops, "dev.patel@example.com", "1987-06-21", true, Shift::Night, 26.0, ""),
        user(14, "Lakshmi Reddy", Role::Backend, "lakshmi.reddy@example.com", "1998-03-09", false, Shift::Flexible, 14.0, ""),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::check_rows;

    #[test]
    fn test_default_users_are_valid_seed() {
        let users = default_users();
        assert_eq!(users.len(), 14);
        assert!(check_rows(&users).is_ok());
        assert!(users.iter().all(|u| u.salary >= 0.0 && u.salary < 10_000.0));
    }
}
