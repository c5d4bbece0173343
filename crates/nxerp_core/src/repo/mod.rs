//! Repository layer: one generic paged engine plus per-entity mappings.
//!
//! # Responsibility
//! - Define the data access contract shared by customers, suppliers and
//!   categories ([`MasterRepository`]).
//! - Keep SQL, row encoding and demo seeding inside the persistence boundary.
//!
//! # Invariants
//! - Repositories never validate required fields; that is the service gate.
//! - Absence is `None` / `false`, never an error.

pub mod category_repo;
pub mod codec;
pub mod customer_repo;
pub mod master_repo;
pub mod memory_repo;
pub mod query;
pub mod record;
pub mod seed;
pub mod supplier_repo;

pub use category_repo::SqliteCategoryRepository;
pub use customer_repo::SqliteCustomerRepository;
pub use master_repo::{MasterRepository, SqliteMasterRepository};
pub use memory_repo::InMemoryMasterRepository;
pub use record::MasterRecord;
pub use supplier_repo::SqliteSupplierRepository;
