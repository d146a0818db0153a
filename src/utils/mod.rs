//! Utility functions used across the application:
//!
//! - [`code_generator`] - Short code generation and alias validation
//! - [`url_validator`] - Destination URL validation
//! - [`db_error`] - Database constraint violation helpers

pub mod code_generator;
pub mod db_error;
pub mod url_validator;
