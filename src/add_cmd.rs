//! `cafes add`: submit a café from the command line.
//!
//! Runs the same validation and encoding as `POST /add`, without the CSRF
//! check, and appends the result to the store.

use anyhow::{bail, Result};
use std::sync::Arc;

use crate::config::Config;
use crate::form::{CafeForm, CafeSubmission};
use crate::rating::RatingChoices;
use crate::store::CsvStore;

pub fn run_add(config: &Config, submission: &CafeSubmission) -> Result<()> {
    let form = CafeForm::new(Arc::new(RatingChoices::new()));

    let record = match form.submit(submission) {
        Ok(record) => record,
        Err(errors) => {
            for (field, message) in errors.fields() {
                eprintln!("{:<14} {}", field, message);
            }
            bail!("cafe was not added");
        }
    };

    let store = CsvStore::from_config(config);
    store.append(&record)?;

    println!("Added {} to {}", record.name, store.path().display());
    println!("  {}", record.fields().join(","));

    Ok(())
}
