use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{AGGREGATE_FILE, CSV_FILE, YAML_EXT};
use crate::csv::write_row;
use crate::entry::Entry;
use crate::error::{Result, ScrapeError};
use crate::roda::{to_row, AggregateRecord, SeparateRecord, CSV_HEADER};

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> ScrapeError + '_ {
    move |source| ScrapeError::Io {
        path: path.to_path_buf(),
        source,
    }
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(io_err(dir))
}

fn write_yaml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let yaml = serde_yaml::to_string(value)?;
    fs::write(path, yaml).map_err(io_err(path))
}

/// `<dir>/<id>.yaml` for one dataset.
pub fn write_separate(dir: &Path, entry: &Entry) -> Result<PathBuf> {
    let path = dir.join(format!("{}.{}", entry.id, YAML_EXT));
    write_yaml(&path, &SeparateRecord::from(entry))?;
    Ok(path)
}

pub fn write_aggregate(dir: &Path, record: &AggregateRecord) -> Result<PathBuf> {
    let path = dir.join(AGGREGATE_FILE);
    write_yaml(&path, record)?;
    Ok(path)
}

/// Debug table of `entries`, one row each, with a header.
pub fn write_csv(dir: &Path, entries: &[Entry]) -> Result<PathBuf> {
    let path = dir.join(CSV_FILE);
    let file = File::create(&path).map_err(io_err(&path))?;
    let mut w = BufWriter::new(file);
    write_row(&mut w, &CSV_HEADER[..]).map_err(io_err(&path))?;
    for entry in entries {
        write_row(&mut w, &to_row(entry)[..]).map_err(io_err(&path))?;
    }
    w.flush().map_err(io_err(&path))?;
    Ok(path)
}
