use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Could not read catalog [{path}]: {source}")]
    Read {
        path: String,
        #[source]
        source: csv::Error
    },
    #[error("Could not write enriched data [{path}]: {source}")]
    Write {
        path: String,
        #[source]
        source: csv::Error
    }
}

impl CatalogError {
    pub fn read(path: &Path, source: csv::Error) -> Self {
        Self::Read { path: path.display().to_string(), source }
    }

    pub fn write(path: &Path, source: csv::Error) -> Self {
        Self::Write { path: path.display().to_string(), source }
    }
}
