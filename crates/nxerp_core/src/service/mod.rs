//! Core use-case services.
//!
//! # Responsibility
//! - Gate repository writes behind required-field validation.
//! - Keep UI callers decoupled from storage details.

pub mod master_service;
pub mod store;
