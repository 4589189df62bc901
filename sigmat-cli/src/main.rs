mod matrix;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "sigmat";
    pub const BIN_NAME: &str = "sigmat";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Generate per-sample mutation-context count matrices from variant-call files for mutational-signature analysis.")
        .subcommand_required(true)
        .subcommand(matrix::cli::create_matrix_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // MATRIX GENERATION
        //
        Some((matrix::cli::MATRIX_CMD, matches)) => {
            matrix::handlers::run_matrix(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
