//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`error`] - Failure taxonomy shared by all layers
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click processing worker
//!
//! # Click Processing Flow
//!
//! 1. HTTP handler resolves the code and answers with a redirect
//! 2. [`click_event::ClickEvent`] is sent to a bounded channel without waiting
//! 3. [`click_worker::run_click_worker`] records it with retry logic
//! 4. The counter update is a single atomic increment in the repository

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod error;
pub mod repositories;
