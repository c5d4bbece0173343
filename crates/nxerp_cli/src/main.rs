//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open the master-data store the way a desktop shell would and print the
//!   first-page totals of every entity.
//! - Resolve the user-local database location; the core never does this.

use clap::Parser;
use log::error;
use nxerp_core::{
    core_version, default_log_level, init_logging, MasterData, Page, PageQuery, StoreConfig,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

const APP_DIR_NAME: &str = "NxERP";
const LOG_DIR_NAME: &str = "logs";

#[derive(Parser)]
#[command(name = "nxerp_cli")]
#[command(about = "Open the NxERP master-data store and print first-page totals", long_about = None)]
struct Args {
    /// Database file. Defaults to the user-local data directory.
    db_path: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={}", err);
            eprintln!("nxerp_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let db_path = resolve_db_path(args.db_path)?;
    let log_dir = db_path
        .parent()
        .map(|dir| dir.join(LOG_DIR_NAME))
        .ok_or("database path has no parent directory")?;
    init_logging(default_log_level(), &log_dir)?;

    let store = MasterData::open(&StoreConfig::new(&db_path))?;
    let first_page = PageQuery::default();

    println!("nxerp_core version={}", core_version());
    println!("db_path={}", db_path.display());
    print_totals("customers", &store.customers.get_page(&first_page)?);
    print_totals("suppliers", &store.suppliers.get_page(&first_page)?);
    print_totals("categories", &store.categories.get_page(&first_page)?);
    Ok(())
}

/// Uses the argument when given (made absolute), else the OS data directory.
fn resolve_db_path(arg: Option<PathBuf>) -> Result<PathBuf, Box<dyn Error>> {
    let path = match arg {
        Some(path) => path,
        None => dirs::data_local_dir()
            .ok_or("could not determine the local data directory")?
            .join(APP_DIR_NAME)
            .join(nxerp_core::config::DEFAULT_DB_FILE_NAME),
    };
    Ok(std::path::absolute(path)?)
}

fn print_totals<T>(label: &str, page: &Page<T>) {
    println!(
        "{label} total_count={} total_pages={} first_page_rows={}",
        page.total_count,
        page.total_pages(),
        page.items.len()
    );
}

#[cfg(test)]
mod tests {
    use super::{resolve_db_path, Args};
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn args_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn help_is_not_taken_as_a_database_path() {
        let err = match Args::try_parse_from(["nxerp_cli", "--help"]) {
            Ok(_) => panic!("--help must not parse as a path"),
            Err(err) => err,
        };
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn extra_arguments_are_rejected() {
        assert!(Args::try_parse_from(["nxerp_cli", "a.db", "b.db"]).is_err());
    }

    #[test]
    fn optional_path_is_made_absolute() {
        let args = Args::try_parse_from(["nxerp_cli", "data/erp.db"]).unwrap();
        assert_eq!(args.db_path, Some(PathBuf::from("data/erp.db")));

        let resolved = resolve_db_path(args.db_path).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("data/erp.db"));

        let none = Args::try_parse_from(["nxerp_cli"]).unwrap();
        assert!(none.db_path.is_none());
    }
}
