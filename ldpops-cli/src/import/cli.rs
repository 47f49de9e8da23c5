use clap::{Arg, Command};

use crate::import::consts::IMPORT_CMD;

/// Creates the import CLI Command object
pub fn create_import_cli() -> Command {
    Command::new(IMPORT_CMD)
        .about("Expand gene boundaries with population LD splines and merge them into the catalog")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Path to the importer configuration file")
                .required(true),
        )
        .arg(
            Arg::new("db")
                .long("db")
                .short('d')
                .help("Path to the region catalog database")
                .required(true),
        )
}
