//! One-call wiring of every master-data service over a shared database file.

use crate::config::StoreConfig;
use crate::db::StorageResult;
use crate::repo::master_repo::SqliteMasterRepository;
use crate::service::master_service::{CategoryService, CustomerService, SupplierService};
use log::{error, info};
use std::time::Instant;

/// Customer, supplier and category services sharing one database file.
pub struct MasterData {
    pub customers: CustomerService,
    pub suppliers: SupplierService,
    pub categories: CategoryService,
}

impl MasterData {
    /// Bootstraps all three tables (seeding empty ones when enabled) and
    /// returns services over them.
    pub fn open(config: &StoreConfig) -> StorageResult<Self> {
        let started_at = Instant::now();
        let result = Self::build(config);
        match &result {
            Ok(_) => info!(
                "event=store_open module=service status=ok db_path={} duration_ms={}",
                config.db_path.display(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=store_open module=service status=error db_path={} duration_ms={} error={}",
                config.db_path.display(),
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    fn build(config: &StoreConfig) -> StorageResult<Self> {
        Ok(Self {
            customers: CustomerService::new(SqliteMasterRepository::try_new(config)?),
            suppliers: SupplierService::new(SqliteMasterRepository::try_new(config)?),
            categories: CategoryService::new(SqliteMasterRepository::try_new(config)?),
        })
    }
}
