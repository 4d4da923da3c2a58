pub mod models;
pub mod services;
pub mod errors;
pub mod validation;
pub mod formatters;

pub use models::*;
pub use services::*;
pub use errors::*;
pub use validation::*;
pub use formatters::*;
