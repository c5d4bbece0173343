//! Master-data domain records and paging envelopes.
//!
//! # Responsibility
//! - Define plain records for customers, suppliers and categories.
//! - Define the page request/result shapes shared by every entity.
//!
//! # Invariants
//! - `code` is the sole identity of a record and compares case-insensitively.
//! - `updated_at` is assigned by storage on every write.

pub mod category;
pub mod customer;
pub mod page;
pub mod supplier;
