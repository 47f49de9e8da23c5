mod import;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "ldpops";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Imports population-specific LD-derived region boundaries into a region catalog database.")
        .subcommand_required(true)
        .subcommand(import::cli::create_import_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // IMPORT
        //
        Some((import::consts::IMPORT_CMD, matches)) => {
            import::handlers::run_import_cmd(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
