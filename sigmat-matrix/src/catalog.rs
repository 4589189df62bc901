use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use sigmat_convert::{ConvertRequest, InputFormat, converter};
use sigmat_core::consts::{
    BED_DIR, CHROM_STRING_DIR, LOG_DIR, MATRIX_DIR, SCRATCH_DIR, VCF_FILES_DIR,
};
use sigmat_core::errors::SigmatError;
use sigmat_core::models::{BedRanges, MutationContext, VariantClass};
use sigmat_core::utils::list_input_files;

use crate::assemble::{self, CountTable};
use crate::builders::{BuildContext, DirGenome, ReferenceGenome, SampleMatrix, builder_for};
use crate::logging::RunLogger;
use crate::sort::sort_canonical_file;
use crate::staging::ScratchDir;

///
/// Configuration surface of one matrix-generation run.
///
#[derive(Debug, Clone)]
pub struct MatrixParams {
    /// Sample-set identifier; names the input, BED, and output directories.
    pub project: String,
    /// Reference assembly name.
    pub genome: String,
    /// Data root holding `vcf_files/`, `matrix/`, `logs/`, `references/`.
    pub root: PathBuf,
    /// Restrict counting to exome regions (honored by the builders).
    pub exome: bool,
    /// Enable INDEL processing.
    pub indel: bool,
    /// Use the extended INDEL context key set instead of the limited one.
    pub indel_extended: bool,
    /// File name of an optional BED inclusion filter, resolved under the
    /// project-scoped BED directory.
    pub bed_file: Option<String>,
    /// Also emit one matrix file per chromosome.
    pub chrom_based: bool,
    /// Enable downstream plotting; implies INDEL processing.
    pub plot: bool,
}

impl MatrixParams {
    pub fn new(project: &str, genome: &str, root: PathBuf) -> MatrixParams {
        MatrixParams {
            project: project.to_string(),
            genome: genome.to_string(),
            root,
            exome: false,
            indel: false,
            indel_extended: false,
            bed_file: None,
            chrom_based: false,
            plot: false,
        }
    }

    pub fn indel_enabled(&self) -> bool {
        self.indel || self.plot
    }

    fn input_dir(&self, class: VariantClass) -> PathBuf {
        self.root
            .join(VCF_FILES_DIR)
            .join(&self.project)
            .join(class.tag())
    }

    fn scratch_dir(&self) -> PathBuf {
        self.root.join(VCF_FILES_DIR).join(SCRATCH_DIR)
    }

    fn bed_path(&self) -> Option<PathBuf> {
        self.bed_file.as_ref().map(|name| {
            self.root
                .join(VCF_FILES_DIR)
                .join(BED_DIR)
                .join(&self.project)
                .join(name)
        })
    }

    pub fn matrix_dir(&self) -> PathBuf {
        self.root.join(MATRIX_DIR).join(&self.project)
    }

    fn log_dir(&self) -> PathBuf {
        self.root.join(LOG_DIR)
    }

    fn chrom_string_dir(&self) -> PathBuf {
        self.root.join(CHROM_STRING_DIR).join(&self.genome)
    }
}

///
/// Generate the per-context count matrices for one project.
///
/// Runs the full pipeline for each variant class in fixed order (SNV, then
/// INDEL when enabled): list input files, convert them to canonical
/// records, sort, optionally filter through BED ranges, run every
/// applicable context builder, and assemble the collected tables into the
/// final mapping of context name to count table.
///
/// An unsupported input format aborts only the class it was found in; the
/// error still surfaces when no class produced a table. Errors that would
/// corrupt the sort or the chromosome mapping abort the whole run.
///
/// # Arguments
///
/// - params: the run configuration
///
pub fn generate_matrices(params: &MatrixParams) -> Result<BTreeMap<String, CountTable>> {
    let genome = DirGenome::new(params.chrom_string_dir());
    generate_matrices_with(params, &genome)
}

///
/// [`generate_matrices`] with explicit reference-sequence access, for
/// callers that hold the assembly somewhere other than the data root.
///
pub fn generate_matrices_with(
    params: &MatrixParams,
    genome: &dyn ReferenceGenome,
) -> Result<BTreeMap<String, CountTable>> {
    let mut logger = RunLogger::create(&params.log_dir(), &params.project, &params.genome)?;
    let indel_enabled = params.indel_enabled();

    let mut parts: Vec<(MutationContext, SampleMatrix)> = Vec::new();
    let mut skipped: Option<anyhow::Error> = None;

    for class in VariantClass::ALL {
        if class == VariantClass::Indel && !indel_enabled {
            logger.info("INDEL processing is disabled; skipping the INDEL class");
            continue;
        }

        match process_class(class, params, genome, &mut logger) {
            Ok(mut class_parts) => parts.append(&mut class_parts),
            Err(error) => {
                let recoverable = matches!(
                    error.downcast_ref::<SigmatError>(),
                    Some(SigmatError::UnsupportedFormat(_))
                );
                logger.error(&error.to_string());

                if recoverable {
                    // one class's format problem must not sink the other class
                    eprintln!("{}", error);
                    if skipped.is_none() {
                        skipped = Some(error);
                    }
                    continue;
                }

                return Err(error);
            }
        }
    }

    if parts.is_empty() {
        return match skipped {
            Some(error) => Err(error),
            None => Err(SigmatError::EmptyInput(VariantClass::Snv.tag().to_string()).into()),
        };
    }

    assemble::collect(parts)
}

fn process_class(
    class: VariantClass,
    params: &MatrixParams,
    genome: &dyn ReferenceGenome,
    logger: &mut RunLogger,
) -> Result<Vec<(MutationContext, SampleMatrix)>> {
    let input_dir = params.input_dir(class);
    logger.info(&format!("Processing the {} variant class", class));

    let files = list_input_files(&input_dir)?;
    if files.is_empty() {
        return Err(SigmatError::EmptyInput(class.tag().to_string()).into());
    }

    // the first file's extension decides the converter for the whole class
    let format = InputFormat::from_path(&files[0]).ok_or_else(|| {
        let extension = files[0]
            .extension()
            .and_then(|extension| extension.to_str())
            .unwrap_or_default();
        SigmatError::UnsupportedFormat(extension.to_string())
    })?;

    let scratch = ScratchDir::acquire(&params.scratch_dir())?;
    let canonical = scratch.file(&format!(
        "{}.{}.{}.txt",
        params.project,
        params.genome,
        class.tag()
    ));

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed}] {msg}")
            .unwrap()
            .tick_strings(&["-", "\\", "|", "/"]),
    );
    spinner.set_message(format!(
        "Converting {} {} input files...",
        files.len(),
        class
    ));

    let convert = converter(class, format);
    let request = ConvertRequest {
        project: &params.project,
        genome: &params.genome,
        class,
        input_dir: &input_dir,
        output: canonical.clone(),
    };
    let converted = convert(&request)?;

    spinner.finish_with_message(format!("Converted {} {} records", converted, class));
    logger.info(&format!(
        "Converted {} {} records from {} input files",
        converted,
        class,
        files.len()
    ));

    let sorted = sort_canonical_file(&canonical, class)?;
    logger.info(&format!("Sorted {} canonical records", sorted));
    println!(
        "Sorting complete...\nDetermining mutation type for each variant, one chromosome at a time. Starting catalogue generation..."
    );

    // loaded once per class and shared by every builder of the class
    let bed = match params.bed_path() {
        Some(path) => Some(BedRanges::from_file(&path)?),
        None => None,
    };

    let output_dir = params.matrix_dir();
    let build_context = BuildContext {
        project: &params.project,
        genome,
        exome: params.exome,
        bed: bed.as_ref(),
        chrom_based: params.chrom_based,
        plot: params.plot,
        output_dir: Some(&output_dir),
    };

    let mut parts = Vec::new();
    for context in class.contexts() {
        let builder = builder_for(*context, params.indel_extended);
        let matrix = builder.build(&canonical, &build_context).map_err(|error| {
            SigmatError::BuilderFailure(context.name().to_string(), error.to_string())
        })?;

        logger.info(&format!(
            "Catalogue for the {} context is complete.",
            context
        ));
        println!("Catalogue for the {} context is complete.", context);
        parts.push((*context, matrix));
    }

    // once per class, after the last builder: the builders shared the
    // sorted scratch file
    scratch.remove()?;

    Ok(parts)
}
