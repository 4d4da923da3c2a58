//! usertable - Terminal User Administration Table
//!
//! View, search, sort, paginate, select, create, edit and delete an
//! in-memory collection of user records from the terminal.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
