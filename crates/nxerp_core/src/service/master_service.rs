//! Master-data use-case service.
//!
//! # Responsibility
//! - Reject records with a blank code or name before any storage call.
//! - Treat blank lookup/delete codes as "not found" without touching storage.
//! - Provide the caller-side page clamp used by list views.
//!
//! # Invariants
//! - Validation failures perform zero repository calls.
//! - Storage errors pass through unchanged inside [`ServiceError::Storage`].

use crate::db::StorageError;
use crate::model::category::Category;
use crate::model::customer::Customer;
use crate::model::page::{Page, PageQuery};
use crate::model::supplier::Supplier;
use crate::repo::master_repo::{MasterRepository, SqliteMasterRepository};
use crate::repo::record::MasterRecord;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

/// A required field is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError {
    /// Entity label, e.g. `Customer`.
    pub entity: &'static str,
    /// Field name, e.g. `code`.
    pub field: &'static str,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} is required.", self.entity, self.field)
    }
}

impl Error for ValidationError {}

/// Service error for master-data use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Input rejected before reaching storage.
    Validation(ValidationError),
    /// Persistence-layer failure.
    Storage(StorageError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for ServiceError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Customer service over the SQLite repository.
pub type CustomerService = MasterService<Customer>;
/// Supplier service over the SQLite repository.
pub type SupplierService = MasterService<Supplier>;
/// Category service over the SQLite repository.
pub type CategoryService = MasterService<Category>;

/// Validation gate in front of a master-data repository.
pub struct MasterService<E: MasterRecord, R: MasterRepository<E> = SqliteMasterRepository<E>> {
    repo: R,
    _record: PhantomData<fn() -> E>,
}

impl<E: MasterRecord, R: MasterRepository<E>> MasterService<E, R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            _record: PhantomData,
        }
    }

    /// Borrows the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Lists one page as requested. Pages past the end come back empty.
    pub fn get_page(&self, query: &PageQuery) -> ServiceResult<Page<E>> {
        Ok(self.repo.get_page(query)?)
    }

    /// Lists one page, re-querying the last page when the requested one lies
    /// past the end (e.g. after deletes shrank the result set).
    ///
    /// The returned page's `page_number` is the page actually served.
    pub fn get_page_clamped(&self, query: &PageQuery) -> ServiceResult<Page<E>> {
        let page = self.repo.get_page(query)?;
        if !page.is_past_end() {
            return Ok(page);
        }

        let last_page = page.total_pages();
        debug!(
            "event=page_clamp module=service entity={} requested={} served={}",
            E::ENTITY,
            page.page_number,
            last_page
        );
        let clamped = PageQuery {
            page_number: last_page,
            ..query.clone()
        };
        Ok(self.repo.get_page(&clamped)?)
    }

    /// Looks up one record. Blank codes return `None` without a storage call.
    pub fn get_by_code(&self, code: &str) -> ServiceResult<Option<E>> {
        if code.trim().is_empty() {
            return Ok(None);
        }
        Ok(self.repo.get_by_code(code)?)
    }

    /// Validates and stores one record, returning the persisted form.
    ///
    /// # Errors
    /// - [`ServiceError::Validation`] when code or name is blank; nothing is
    ///   written.
    /// - [`ServiceError::Storage`] when persistence fails.
    pub fn upsert(&self, record: &E) -> ServiceResult<E> {
        validate_required::<E>(record)?;
        Ok(self.repo.upsert(record)?)
    }

    /// Deletes one record. Blank codes return `false` without a storage call.
    pub fn delete(&self, code: &str) -> ServiceResult<bool> {
        if code.trim().is_empty() {
            return Ok(false);
        }
        Ok(self.repo.delete(code)?)
    }

    /// Total number of stored records.
    pub fn count(&self) -> ServiceResult<u64> {
        Ok(self.repo.count()?)
    }
}

fn validate_required<E: MasterRecord>(record: &E) -> Result<(), ValidationError> {
    if record.code().trim().is_empty() {
        return Err(ValidationError {
            entity: E::ENTITY,
            field: "code",
        });
    }
    if record.name().trim().is_empty() {
        return Err(ValidationError {
            entity: E::ENTITY,
            field: "name",
        });
    }
    Ok(())
}
