//! Core error types shared by the command line.
//!
//! See [`error`] for the error enum and the user-facing error reports.

pub mod error;

pub use error::{ErrorContext, UxrError, user_friendly_error};
