//! Core master-data logic for NxERP.
//! This crate owns storage, demo seeding and the validation gate for
//! customers, suppliers and categories.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{SeedOptions, StoreConfig};
pub use db::{SchemaIssue, StorageError, StorageResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::Category;
pub use model::customer::Customer;
pub use model::page::{Page, PageQuery};
pub use model::supplier::Supplier;
pub use repo::{
    InMemoryMasterRepository, MasterRecord, MasterRepository, SqliteCategoryRepository,
    SqliteCustomerRepository, SqliteMasterRepository, SqliteSupplierRepository,
};
pub use service::master_service::{
    CategoryService, CustomerService, MasterService, ServiceError, ServiceResult,
    SupplierService, ValidationError,
};
pub use service::store::MasterData;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
