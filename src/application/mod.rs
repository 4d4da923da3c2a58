//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! the table controller, its timers, the dialog and toast, and the terminal
//! session state.

pub mod controller;
pub mod dialog;
pub mod state;
pub mod timer;
pub mod toast;

pub use controller::*;
pub use dialog::*;
pub use state::*;
pub use timer::*;
pub use toast::*;
