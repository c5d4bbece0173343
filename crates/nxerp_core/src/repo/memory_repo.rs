//! Non-persistent master-data repository.
//!
//! Mirrors [`super::SqliteMasterRepository`] semantics (case-insensitive
//! codes, ASCII case-insensitive substring search, `updated_at DESC, code ASC`
//! ordering, full-row upsert) over a mutex-guarded map. Used for demos and
//! for exercising services without a database file.

use crate::config::SeedOptions;
use crate::db::StorageResult;
use crate::model::page::{Page, PageQuery};
use crate::repo::master_repo::MasterRepository;
use crate::repo::record::MasterRecord;
use crate::repo::seed::generate_seed_rows;
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// In-memory repository keyed by ASCII-lowercased code.
pub struct InMemoryMasterRepository<E: MasterRecord> {
    rows: Mutex<BTreeMap<String, E>>,
}

impl<E: MasterRecord> InMemoryMasterRepository<E> {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
        }
    }

    /// Creates a repository pre-filled with the entity's demo rows.
    pub fn seeded(options: &SeedOptions) -> Self {
        let repo = Self::new();
        if options.enabled {
            let seed = generate_seed_rows::<E>(options);
            let mut rows = repo.lock();
            for record in seed.bulk.into_iter().chain(seed.known) {
                rows.insert(code_key(record.code()), record);
            }
        }
        repo
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, E>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E: MasterRecord> Default for InMemoryMasterRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: MasterRecord> MasterRepository<E> for InMemoryMasterRepository<E> {
    fn get_page(&self, query: &PageQuery) -> StorageResult<Page<E>> {
        let normalized = query.normalized();
        let needle = normalized.search_term().map(str::to_ascii_lowercase);
        let rows = self.lock();

        let mut matching = rows
            .values()
            .filter(|record| match needle.as_deref() {
                Some(needle) => record
                    .search_fields()
                    .iter()
                    .any(|field| field.to_ascii_lowercase().contains(needle)),
                None => true,
            })
            .collect::<Vec<_>>();
        matching.sort_by(|left, right| newest_first(*left, *right));

        let offset = usize::try_from(normalized.offset()).unwrap_or(usize::MAX);
        let page_size = usize::try_from(normalized.page_size).unwrap_or(usize::MAX);
        let items = matching
            .iter()
            .skip(offset)
            .take(page_size)
            .map(|record| (*record).clone())
            .collect();

        Ok(Page {
            items,
            total_count: u64::try_from(matching.len()).unwrap_or(u64::MAX),
            page_number: normalized.page_number,
            page_size: normalized.page_size,
        })
    }

    fn get_by_code(&self, code: &str) -> StorageResult<Option<E>> {
        Ok(self.lock().get(&code_key(code)).cloned())
    }

    fn upsert(&self, record: &E) -> StorageResult<E> {
        let mut stored = record.clone();
        stored.normalize();
        stored.stamp(Utc::now());
        self.lock().insert(code_key(stored.code()), stored.clone());
        Ok(stored)
    }

    fn delete(&self, code: &str) -> StorageResult<bool> {
        Ok(self.lock().remove(&code_key(code)).is_some())
    }

    fn count(&self) -> StorageResult<u64> {
        Ok(u64::try_from(self.lock().len()).unwrap_or(u64::MAX))
    }
}

fn code_key(code: &str) -> String {
    code.trim().to_ascii_lowercase()
}

fn newest_first<E: MasterRecord>(left: &E, right: &E) -> Ordering {
    right
        .updated_at()
        .cmp(&left.updated_at())
        .then_with(|| code_key(left.code()).cmp(&code_key(right.code())))
}
