use std::path::Path;

use anyhow::Result;
use clap::ArgMatches;

use ldpops_core::config::ImportConfig;
use ldpops_import::{CatalogDb, run_import};

pub fn run_import_cmd(matches: &ArgMatches) -> Result<()> {
    let config = matches
        .get_one::<String>("config")
        .expect("A configuration file path is required.");

    let db = matches
        .get_one::<String>("db")
        .expect("A database path is required.");

    let config = ImportConfig::from_file(Path::new(config))?;
    let mut db = CatalogDb::open(Path::new(db))?;

    run_import(&mut db, &config)
}
