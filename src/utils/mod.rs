pub mod error;
pub mod escape;
pub mod format;
pub mod logger;
pub mod validation;
