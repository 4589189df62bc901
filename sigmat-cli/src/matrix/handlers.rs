use std::path::PathBuf;

use anyhow::Result;
use clap::ArgMatches;

use sigmat_matrix::{MatrixParams, generate_matrices};

pub fn run_matrix(matches: &ArgMatches) -> Result<()> {
    let project = matches
        .get_one::<String>("project")
        .expect("A project identifier is required.");

    let genome = matches
        .get_one::<String>("genome")
        .expect("A reference genome name is required.");

    let default_root = ".".to_string();
    let root = matches.get_one::<String>("root").unwrap_or(&default_root);

    let mut params = MatrixParams::new(project, genome, PathBuf::from(root));
    params.exome = matches.get_flag("exome");
    params.indel = matches.get_flag("indel");
    params.indel_extended = matches.get_flag("extended-indel");
    params.chrom_based = matches.get_flag("chrom-based");
    params.plot = matches.get_flag("plot");
    params.bed_file = matches.get_one::<String>("bed").cloned();

    let matrices = generate_matrices(&params)?;

    let output_dir = params.matrix_dir();
    for (context, table) in &matrices {
        let path = output_dir.join(format!("{}.{}.matrix.tsv", project, context));
        table.write_tsv(&path)?;
        println!(
            "Wrote the {} context matrix ({} samples) to {:?}",
            context,
            table.samples().len(),
            path
        );
    }

    Ok(())
}
