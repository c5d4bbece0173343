//! Explicit storage configuration.
//!
//! # Responsibility
//! - Carry the database location and demo-seed options into repositories.
//!
//! # Invariants
//! - The core never derives the database location on its own; callers pass
//!   it in, so tests can point at ephemeral directories.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Database file name used inside an application data directory.
pub const DEFAULT_DB_FILE_NAME: &str = "nxerp-local.db";

/// Seed used for the bulk demo series unless overridden.
pub const DEFAULT_RNG_SEED: u64 = 42;

/// `2026-01-01T00:00:00Z`, the default point demo timestamps count back from.
pub const DEFAULT_SEED_ANCHOR_SECS: i64 = 1_767_225_600;

/// Options for first-run demo data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedOptions {
    /// When `false`, empty tables stay empty.
    pub enabled: bool,
    /// Fixed pseudo-random seed for the bulk series.
    pub rng_seed: u64,
    /// Overrides every entity's default bulk row count when set.
    pub bulk_rows: Option<usize>,
    /// Reference time for demo dates and timestamps. Fixed so that two fresh
    /// databases hold identical rows.
    pub anchor: DateTime<Utc>,
}

impl SeedOptions {
    /// Options that skip seeding entirely.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Default options with an explicit bulk row count for every entity.
    pub fn with_bulk_rows(rows: usize) -> Self {
        Self {
            bulk_rows: Some(rows),
            ..Self::default()
        }
    }

    pub fn with_anchor(mut self, anchor: DateTime<Utc>) -> Self {
        self.anchor = anchor;
        self
    }
}

/// [`DEFAULT_SEED_ANCHOR_SECS`] as a UTC timestamp.
pub fn default_seed_anchor() -> DateTime<Utc> {
    DateTime::from_timestamp(DEFAULT_SEED_ANCHOR_SECS, 0).unwrap_or_default()
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            rng_seed: DEFAULT_RNG_SEED,
            bulk_rows: None,
            anchor: default_seed_anchor(),
        }
    }
}

/// Location and bootstrap options of the master-data store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite database file shared by every entity table.
    pub db_path: PathBuf,
    pub seed: SeedOptions,
}

impl StoreConfig {
    /// Uses `db_path` with default seeding.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            seed: SeedOptions::default(),
        }
    }

    /// Uses [`DEFAULT_DB_FILE_NAME`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_DB_FILE_NAME))
    }

    pub fn with_seed(mut self, seed: SeedOptions) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{SeedOptions, StoreConfig, DEFAULT_DB_FILE_NAME, DEFAULT_RNG_SEED};
    use chrono::{TimeZone, Utc};
    use std::path::Path;

    #[test]
    fn in_dir_appends_default_file_name() {
        let config = StoreConfig::in_dir("/var/lib/nxerp");
        assert_eq!(
            config.db_path,
            Path::new("/var/lib/nxerp").join(DEFAULT_DB_FILE_NAME)
        );
        assert!(config.seed.enabled);
        assert_eq!(config.seed.rng_seed, DEFAULT_RNG_SEED);
    }

    #[test]
    fn disabled_seed_keeps_fixed_rng_seed() {
        let seed = SeedOptions::disabled();
        assert!(!seed.enabled);
        assert_eq!(seed.rng_seed, DEFAULT_RNG_SEED);
        assert_eq!(SeedOptions::with_bulk_rows(7).bulk_rows, Some(7));
    }

    #[test]
    fn default_anchor_is_start_of_2026() {
        let expected = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(SeedOptions::default().anchor, expected);
        assert_eq!(SeedOptions::disabled().anchor, expected);

        let later = Utc.with_ymd_and_hms(2027, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(SeedOptions::default().with_anchor(later).anchor, later);
    }
}
