use clap::{Arg, ArgAction, Command, arg};

pub const MATRIX_CMD: &str = "matrix";

pub fn create_matrix_cli() -> Command {
    Command::new(MATRIX_CMD)
        .about("Generate mutation-context count matrices for one project.")
        .arg(arg!(--project <project>).required(true))
        .arg(arg!(--genome <genome>).required(true))
        .arg(arg!(--root <root>))
        .arg(arg!(--bed <bed>))
        .arg(
            Arg::new("exome")
                .long("exome")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("indel")
                .long("indel")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("extended-indel")
                .long("extended-indel")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("chrom-based")
                .long("chrom-based")
                .action(ArgAction::SetTrue),
        )
        .arg(Arg::new("plot").long("plot").action(ArgAction::SetTrue))
}
