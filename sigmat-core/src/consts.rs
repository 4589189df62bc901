pub const PKG_NAME: &str = "sigmat";

/// Emission order for chromosome labels. Downstream catalogue builders scan
/// one chromosome at a time and rely on records arriving grouped in exactly
/// this order, independent of the reference assembly.
pub const CHROM_ORDER: &[&str] = &[
    "X", "Y", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12",
    "13", "14", "15", "16", "17", "18", "19", "20", "21", "22",
];

/// RefSeq accession aliases for chromosome labels.
pub const NCBI_CHROM: &[(&str, &str)] = &[
    ("NC_000067.6", "1"),
    ("NC_000068.7", "2"),
    ("NC_000069.6", "3"),
    ("NC_000070.6", "4"),
    ("NC_000071.6", "5"),
    ("NC_000072.6", "6"),
    ("NC_000073.6", "7"),
    ("NC_000074.6", "8"),
    ("NC_000075.6", "9"),
    ("NC_000076.6", "10"),
    ("NC_000077.6", "11"),
    ("NC_000078.6", "12"),
    ("NC_000079.6", "13"),
    ("NC_000080.6", "14"),
    ("NC_000081.6", "15"),
    ("NC_000082.6", "16"),
    ("NC_000083.6", "17"),
    ("NC_000084.6", "18"),
    ("NC_000085.6", "19"),
    ("NC_000086.7", "X"),
    ("NC_000087.7", "Y"),
];

// Project-scoped directory layout under the data root.
pub const VCF_FILES_DIR: &str = "vcf_files";
pub const SCRATCH_DIR: &str = "single";
pub const BED_DIR: &str = "BED";
pub const MATRIX_DIR: &str = "matrix";
pub const LOG_DIR: &str = "logs";
pub const CHROM_STRING_DIR: &str = "references/chromosomes/chrom_string";
