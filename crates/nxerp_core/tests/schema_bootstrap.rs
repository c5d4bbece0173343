use nxerp_core::db::schema::table_exists;
use nxerp_core::db::{open_db, SchemaIssue};
use nxerp_core::{
    Category, Customer, MasterData, MasterRepository, SeedOptions, SqliteCategoryRepository,
    SqliteCustomerRepository, SqliteSupplierRepository, StorageError, StoreConfig, Supplier,
};

fn unseeded(dir: &tempfile::TempDir) -> StoreConfig {
    StoreConfig::in_dir(dir.path()).with_seed(SeedOptions::disabled())
}

#[test]
fn bootstrap_creates_missing_directory_and_tables() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path().join("nested").join("data").join("erp.db"))
        .with_seed(SeedOptions::disabled());

    let store = MasterData::open(&config).unwrap();
    assert!(config.db_path.exists());

    let conn = open_db(&config.db_path).unwrap();
    for table in ["customers", "suppliers", "categories"] {
        assert!(table_exists(&conn, table).unwrap(), "missing table {table}");
    }
    assert_eq!(store.customers.count().unwrap(), 0);
    assert_eq!(store.suppliers.count().unwrap(), 0);
    assert_eq!(store.categories.count().unwrap(), 0);
}

#[test]
fn reopening_keeps_existing_rows() {
    let dir = tempfile::tempdir().unwrap();
    let config = unseeded(&dir);

    let repo = SqliteCustomerRepository::try_new(&config).unwrap();
    repo.upsert(&Customer::new("CUS-1", "Acme Traders")).unwrap();
    drop(repo);

    let reopened = SqliteCustomerRepository::try_new(&config).unwrap();
    assert_eq!(reopened.count().unwrap(), 1);
    assert_eq!(
        reopened.get_by_code("CUS-1").unwrap().unwrap().name,
        "Acme Traders"
    );
}

#[test]
fn three_entities_share_one_file_without_interference() {
    let dir = tempfile::tempdir().unwrap();
    let config = unseeded(&dir);

    let customers = SqliteCustomerRepository::try_new(&config).unwrap();
    let suppliers = SqliteSupplierRepository::try_new(&config).unwrap();
    let categories = SqliteCategoryRepository::try_new(&config).unwrap();

    customers.upsert(&Customer::new("X-1", "Customer X")).unwrap();
    suppliers.upsert(&Supplier::new("X-1", "Supplier X")).unwrap();
    categories.upsert(&Category::new("X-1", "Category X")).unwrap();

    assert!(customers.delete("X-1").unwrap());
    assert_eq!(customers.count().unwrap(), 0);
    assert_eq!(suppliers.get_by_code("X-1").unwrap().unwrap().name, "Supplier X");
    assert_eq!(categories.get_by_code("x-1").unwrap().unwrap().name, "Category X");
}

#[test]
fn existing_table_missing_a_column_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = unseeded(&dir);

    let conn = open_db(&config.db_path).unwrap();
    conn.execute_batch(
        "CREATE TABLE suppliers (
            code TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL
        );",
    )
    .unwrap();
    drop(conn);

    let err = match SqliteSupplierRepository::try_new(&config) {
        Ok(_) => panic!("bootstrap should reject an incompatible table"),
        Err(err) => err,
    };
    assert!(matches!(
        err,
        StorageError::SchemaMismatch {
            table: "suppliers",
            column: "type",
            issue: SchemaIssue::MissingColumn,
        }
    ));
}

#[test]
fn existing_table_with_case_sensitive_code_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = unseeded(&dir);

    let conn = open_db(&config.db_path).unwrap();
    conn.execute_batch(
        "CREATE TABLE customers (
            code TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            type TEXT NOT NULL,
            contact TEXT NOT NULL,
            opening_date TEXT NOT NULL,
            opening_balance TEXT NOT NULL,
            is_active INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );",
    )
    .unwrap();
    drop(conn);

    let err = match SqliteCustomerRepository::try_new(&config) {
        Ok(_) => panic!("bootstrap should reject a case-sensitive code column"),
        Err(err) => err,
    };
    assert!(matches!(
        err,
        StorageError::SchemaMismatch {
            table: "customers",
            column: "code",
            issue: SchemaIssue::CaseSensitiveKey,
        }
    ));
}

#[test]
fn unreadable_location_surfaces_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"file in the way").unwrap();

    let config =
        StoreConfig::new(blocker.join("erp.db")).with_seed(SeedOptions::disabled());
    assert!(MasterData::open(&config).is_err());
}
