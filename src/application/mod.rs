//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers, the click worker and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Code allocation, lookup, deletion and click accounting

pub mod services;
