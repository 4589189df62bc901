use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use sigmat_core::consts::PKG_NAME;

///
/// An explicit per-run logger, scoped to one pipeline invocation.
///
/// Creates `<log_dir>/sigmat_<project>_<genome>_<date>.log` and a matching
/// `.err` file. Pre-existing files with the same names are deleted, not
/// appended. Messages also go to the `log` facade so a host application's
/// logger picks them up. Buffers are flushed when the logger is dropped at
/// the end of the run.
///
#[derive(Debug)]
pub struct RunLogger {
    out: BufWriter<File>,
    err: BufWriter<File>,
    out_path: PathBuf,
    err_path: PathBuf,
}

impl RunLogger {
    ///
    /// Create the log directory and open fresh log and error files for one
    /// run.
    ///
    /// # Arguments
    ///
    /// - log_dir: directory to hold the per-run files
    /// - project: sample-set identifier
    /// - genome: reference assembly name
    ///
    pub fn create(log_dir: &Path, project: &str, genome: &str) -> Result<RunLogger> {
        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {:?}", log_dir))?;

        let date = Local::now().format("%Y-%m-%d");
        let base = format!("{}_{}_{}_{}", PKG_NAME, project, genome, date);
        let out_path = log_dir.join(format!("{}.log", base));
        let err_path = log_dir.join(format!("{}.err", base));

        for path in [&out_path, &err_path] {
            if path.exists() {
                fs::remove_file(path)
                    .with_context(|| format!("Failed to delete old log file: {:?}", path))?;
            }
        }

        let out = BufWriter::new(File::create(&out_path)?);
        let err = BufWriter::new(File::create(&err_path)?);

        Ok(RunLogger {
            out,
            err,
            out_path,
            err_path,
        })
    }

    pub fn info(&mut self, message: &str) {
        log::info!("{}", message);
        let _ = writeln!(self.out, "{}\t{}", Self::timestamp(), message);
    }

    pub fn error(&mut self, message: &str) {
        log::error!("{}", message);
        let _ = writeln!(self.err, "{}\t{}", Self::timestamp(), message);
    }

    pub fn log_path(&self) -> &Path {
        &self.out_path
    }

    pub fn err_path(&self) -> &Path {
        &self.err_path
    }

    fn timestamp() -> String {
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl Drop for RunLogger {
    fn drop(&mut self) {
        let _ = self.out.flush();
        let _ = self.err.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_old_files_are_deleted_not_appended() {
        let tempdir = tempfile::tempdir().unwrap();
        let log_dir = tempdir.path().join("logs");

        let first_path = {
            let mut logger = RunLogger::create(&log_dir, "TestA", "GRCh37").unwrap();
            logger.info("first run");
            logger.log_path().to_path_buf()
        };

        let contents = fs::read_to_string(&first_path).unwrap();
        assert!(contents.contains("first run"));

        {
            let mut logger = RunLogger::create(&log_dir, "TestA", "GRCh37").unwrap();
            logger.info("second run");
        }

        let contents = fs::read_to_string(&first_path).unwrap();
        assert!(!contents.contains("first run"));
        assert!(contents.contains("second run"));
    }

    #[rstest]
    fn test_errors_go_to_the_err_file() {
        let tempdir = tempfile::tempdir().unwrap();
        let log_dir = tempdir.path().join("logs");

        let err_path = {
            let mut logger = RunLogger::create(&log_dir, "TestA", "GRCh37").unwrap();
            logger.error("conversion failed");
            logger.err_path().to_path_buf()
        };

        let contents = fs::read_to_string(&err_path).unwrap();
        assert_eq!(contents.contains("conversion failed"), true);
    }
}
