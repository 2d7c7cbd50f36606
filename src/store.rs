//! Flat-file café store.
//!
//! One café per line, comma separated, no header row. Fields are quoted
//! only when they contain a delimiter, quote, or line break, so the file
//! stays readable and editable by hand.
//!
//! The file is opened inside each call and closed before it returns; there
//! is no cached handle and no locking between concurrent writers.

use anyhow::{bail, Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::models::{CafeRecord, CafeRow};

#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.store.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty store file if none exists. Returns `true` when a file
    /// was created; an existing file is left untouched.
    pub fn init(&self) -> Result<bool> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
        }

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to create cafe store: {}", self.path.display())),
        }
    }

    /// Lazily iterate over every row in file order.
    ///
    /// Each call re-opens the file, so the returned iterator always reflects
    /// the file as it is now. A missing file is an error.
    pub fn list_all(&self) -> Result<Rows> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                bail!("cafe store not found: {}", self.path.display())
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to open cafe store: {}", self.path.display())
                })
            }
        };

        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        Ok(Rows {
            records: reader.into_records(),
            path: self.path.clone(),
        })
    }

    /// Append one record as a single line.
    pub fn append(&self, record: &CafeRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open cafe store: {}", self.path.display()))?;

        // A hand-edited file may lack its final newline.
        if !ends_with_newline(&mut file)? {
            file.write_all(b"\n")?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Necessary)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(file);

        writer
            .write_record(record.fields())
            .with_context(|| format!("Failed to write to cafe store: {}", self.path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to write to cafe store: {}", self.path.display()))?;

        Ok(())
    }
}

/// Empty files count as ending with a newline.
fn ends_with_newline(file: &mut File) -> Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Iterator over the rows of a store file.
pub struct Rows {
    records: csv::StringRecordsIntoIter<File>,
    path: PathBuf,
}

impl Iterator for Rows {
    type Item = Result<CafeRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(
            record
                .map(|r| r.iter().map(str::to_string).collect())
                .with_context(|| format!("Failed to parse cafe store: {}", self.path.display())),
        )
    }
}
