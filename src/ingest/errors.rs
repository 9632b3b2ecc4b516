use std::io;
use std::path::Path;

use csv::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("File [{path}] does not exist")]
    NotFound {
        path: String
    },
    #[error("File [{path}] is not UTF-8 encoded (line {line})")]
    Encoding {
        path: String,
        line: u64
    },
    #[error("I/O error on [{path}]: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error
    },
    #[error("Malformed file [{path}]: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error
    }
}

impl IngestError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        let path = path.display().to_string();

        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source }
        }
    }

    pub fn csv(path: &Path, source: csv::Error) -> Self {
        let path = path.display().to_string();

        if let ErrorKind::Utf8 { pos, .. } = source.kind() {
            let line = pos.as_ref().map(|position| position.line()).unwrap_or_default();
            return Self::Encoding { path, line };
        }

        Self::Csv { path, source }
    }
}
