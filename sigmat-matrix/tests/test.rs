use std::path::{Path, PathBuf};

use rstest::*;
use tempfile::TempDir;

use sigmat_core::errors::SigmatError;
use sigmat_matrix::{MatrixParams, generate_matrices};

const PROJECT: &str = "TestA";
const GENOME: &str = "GRCh37";

/// A data root with one chromosome-1 reference sequence: 200 bases of A
/// with a C at position 100 and another at position 120.
fn data_root() -> TempDir {
    let root = tempfile::tempdir().unwrap();

    let chrom_dir = root
        .path()
        .join("references/chromosomes/chrom_string")
        .join(GENOME);
    std::fs::create_dir_all(&chrom_dir).unwrap();

    let mut sequence = vec![b'A'; 200];
    sequence[99] = b'C';
    sequence[119] = b'C';
    std::fs::write(chrom_dir.join("1.txt"), sequence).unwrap();

    root
}

fn snv_dir(root: &Path) -> PathBuf {
    let dir = root.join("vcf_files").join(PROJECT).join("SNV");
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn indel_dir(root: &Path) -> PathBuf {
    let dir = root.join("vcf_files").join(PROJECT).join("INDEL");
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_vcf(dir: &Path, name: &str, body: &[&str]) {
    let mut contents = String::from("##fileformat=VCFv4.2\n#CHROM\tPOS\tID\tREF\tALT\n");
    for line in body {
        contents.push_str(line);
        contents.push('\n');
    }
    std::fs::write(dir.join(name), contents).unwrap();
}

fn params(root: &Path) -> MatrixParams {
    MatrixParams::new(PROJECT, GENOME, root.to_path_buf())
}

mod tests {
    use super::*;

    #[rstest]
    fn test_single_substitution_scenario() {
        let root = data_root();
        write_vcf(
            &snv_dir(root.path()),
            "PD1001a.vcf",
            &["chr1\t100\t.\tC\tT\t.\tPASS\t."],
        );

        let matrices = generate_matrices(&params(root.path())).unwrap();

        let table = &matrices["96"];
        assert_eq!(table.nonzero(), vec![("PD1001a", "A[C>T]A", 1)]);
        assert_eq!(table.total(), 1);

        assert_eq!(matrices["DINUC"].sample_total("PD1001a"), 0);
        assert_eq!(matrices["192"].sample_total("PD1001a"), 0);
        assert_eq!(matrices["6"].get("PD1001a", "C>T"), 1);
        assert_eq!(matrices["12"].get("PD1001a", "C>T"), 1);
    }

    #[rstest]
    fn test_indel_disabled_leaves_no_indel_context() {
        let root = data_root();
        write_vcf(
            &snv_dir(root.path()),
            "PD1001a.vcf",
            &["chr1\t100\t.\tC\tT\t.\tPASS\t."],
        );

        let matrices = generate_matrices(&params(root.path())).unwrap();

        assert!(!matrices.contains_key("INDEL"));
        let contexts: Vec<&str> = matrices.keys().map(String::as_str).collect();
        assert_eq!(
            contexts,
            vec!["12", "1536", "192", "3072", "6", "96", "DINUC"]
        );
    }

    #[rstest]
    fn test_plot_flag_implies_indel_processing() {
        let root = data_root();
        write_vcf(
            &snv_dir(root.path()),
            "PD1001a.vcf",
            &["chr1\t100\t.\tC\tT\t.\tPASS\t."],
        );
        write_vcf(
            &indel_dir(root.path()),
            "PD1001a.vcf",
            &["chr1\t150\t.\tA\tAT\t.\tPASS\t."],
        );

        let mut params = params(root.path());
        params.plot = true;
        assert!(!params.indel);

        let matrices = generate_matrices(&params).unwrap();

        assert!(matrices.contains_key("INDEL"));
        assert_eq!(matrices["INDEL"].get("PD1001a", "Ins:1"), 1);
    }

    #[rstest]
    fn test_conversion_is_idempotent() {
        let root = data_root();
        write_vcf(
            &snv_dir(root.path()),
            "PD1001a.vcf",
            &[
                "chr1\t100\t.\tC\tT\t.\tPASS\t.",
                "chr1\t120\t.\tC\tG\t.\tPASS\t.",
            ],
        );

        let first = generate_matrices(&params(root.path())).unwrap();
        let second = generate_matrices(&params(root.path())).unwrap();

        assert_eq!(first, second);
    }

    #[rstest]
    fn test_bed_filtering_is_exclusive() {
        let root = data_root();
        write_vcf(
            &snv_dir(root.path()),
            "PD1001a.vcf",
            &[
                "chr1\t100\t.\tC\tT\t.\tPASS\t.",
                "chr1\t120\t.\tC\tT\t.\tPASS\t.",
            ],
        );

        let unfiltered = generate_matrices(&params(root.path())).unwrap();
        assert_eq!(unfiltered["96"].total(), 2);

        // only position 100 falls inside the interval
        let bed_dir = root.path().join("vcf_files/BED").join(PROJECT);
        std::fs::create_dir_all(&bed_dir).unwrap();
        std::fs::write(bed_dir.join("capture.bed"), "chr1\t90\t110\n").unwrap();

        let mut params = params(root.path());
        params.bed_file = Some("capture.bed".to_string());
        let filtered = generate_matrices(&params).unwrap();

        assert_eq!(filtered["96"].total(), 1);
        assert_eq!(filtered["96"].get("PD1001a", "A[C>T]A"), 1);
    }

    #[rstest]
    fn test_unsupported_extension_surfaces() {
        let root = data_root();
        let dir = snv_dir(root.path());
        std::fs::write(dir.join("variants.xyz"), "not a variant file\n").unwrap();

        let error = generate_matrices(&params(root.path())).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<SigmatError>(),
            Some(SigmatError::UnsupportedFormat(_))
        ));
    }

    #[rstest]
    fn test_empty_input_directory_is_fatal() {
        let root = data_root();
        snv_dir(root.path());

        let error = generate_matrices(&params(root.path())).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<SigmatError>(),
            Some(SigmatError::EmptyInput(_))
        ));
    }

    #[rstest]
    fn test_scratch_area_is_cleaned_up() {
        let root = data_root();
        write_vcf(
            &snv_dir(root.path()),
            "PD1001a.vcf",
            &["chr1\t100\t.\tC\tT\t.\tPASS\t."],
        );

        generate_matrices(&params(root.path())).unwrap();

        let scratch = root.path().join("vcf_files/single");
        assert!(!scratch.exists());
    }

    #[rstest]
    fn test_chrom_based_output_files() {
        let root = data_root();
        write_vcf(
            &snv_dir(root.path()),
            "PD1001a.vcf",
            &["chr1\t100\t.\tC\tT\t.\tPASS\t."],
        );

        let mut params = params(root.path());
        params.chrom_based = true;
        generate_matrices(&params).unwrap();

        let per_chrom = params.matrix_dir().join("TestA.96.chr1.tsv");
        assert!(per_chrom.is_file());

        let contents = std::fs::read_to_string(per_chrom).unwrap();
        assert!(contents.contains("A[C>T]A\t1"));
    }
}
