//! CSV Data Loader Module
//! Loads the athlete events CSV with Polars and anonymizes athlete names.

use polars::prelude::*;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// Load a CSV file using Polars lazy scanning.
pub fn load_csv(path: &str) -> Result<DataFrame, LoaderError> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10000))
        .with_ignore_errors(true)
        .finish()?
        .collect()?;

    info!(rows = df.height(), cols = df.width(), path, "athlete events loaded");
    Ok(df)
}

/// Replace the Name column with the SHA-256 hex digest of each name.
///
/// The digest is deterministic, so repeated appearances of one athlete
/// still group together after anonymization.
pub fn anonymize_names(mut df: DataFrame) -> Result<DataFrame, LoaderError> {
    let names = df.column("Name")?.clone();
    let mut hashed: Vec<Option<String>> = Vec::with_capacity(names.len());

    for i in 0..names.len() {
        let value = names.get(i)?;
        if value.is_null() {
            hashed.push(None);
        } else {
            let name = value.to_string();
            let mut hasher = Sha256::new();
            hasher.update(name.trim_matches('"').as_bytes());
            hashed.push(Some(format!("{:x}", hasher.finalize())));
        }
    }

    df.with_column(Column::new("Name".into(), hashed))?;
    Ok(df)
}
