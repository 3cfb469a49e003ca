use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use failure::Fail;
use flate2::read::GzDecoder;

const GZIP_EXTENSION: &str = "gz";

#[derive(Debug, Fail)]
pub enum InputError {
    #[fail(display = "Path {} is not valid.", path)]
    InvalidPath { path: String },
}

/// Resolves `path` into the log files to analyze.
///
/// A file is taken as is. A directory is listed (not recursively) for files
/// named `*.<extension>` or `*.<extension>.gz`, sorted by path.
pub fn log_files(path: &Path, extension: &str) -> Result<Vec<PathBuf>, failure::Error> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        return Err(InputError::InvalidPath {
            path: path.display().to_string(),
        }
        .into());
    }

    let mut files: Vec<PathBuf> = Vec::new();

    for dir_entry in fs::read_dir(path)? {
        let file_path = dir_entry?.path();

        if file_path.is_file() && has_log_extension(&file_path, extension) {
            files.push(file_path);
        }
    }

    files.sort();

    if files.is_empty() {
        warn!("No *.{} files found in {}", extension, path.display());
    }

    Ok(files)
}

fn has_log_extension(path: &Path, extension: &str) -> bool {
    let name = match path.file_name().and_then(OsStr::to_str) {
        Some(name) => name,
        None => return false,
    };

    let plain = format!(".{}", extension);
    let compressed = format!(".{}.{}", extension, GZIP_EXTENSION);

    name.ends_with(&plain) || name.ends_with(&compressed)
}

fn is_gzip(path: &Path) -> bool {
    path.extension() == Some(OsStr::new(GZIP_EXTENSION))
}

/// Opens a log file for line-wise reading, decompressing `*.gz` files.
pub fn open(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;

    if is_gzip(path) {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// `logs/access.log` becomes `logs/access<suffix>.json`. Only the last
/// extension is dropped, so `access.log.gz` becomes `access.log<suffix>.json`
/// and does not overwrite the summary of a plain `access.log` next to it.
pub fn output_path(path: &Path, suffix: &str) -> PathBuf {
    let stem_path = path.with_extension("");

    let mut file_name = stem_path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    file_name.push(suffix);
    file_name.push(".json");

    stem_path.with_file_name(file_name)
}
