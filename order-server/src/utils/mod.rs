//! Utilities: logging setup and request validation helpers

pub mod logger;
pub mod validation;

pub use logger::init_logger;
