//! Presentation layer handling terminal UI and user input.
//!
//! This module draws the user table with ratatui and maps key presses to
//! table handlers.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
