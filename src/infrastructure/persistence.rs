use std::fs;
use std::io;
use std::path::Path;

use tracing::info;

use crate::domain::{DomainError, UserRecord, check_rows};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid seed file - {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV export failed - {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Reads seed users from disk.
pub struct FileRepository;

impl FileRepository {
    /// Loads a JSON array of users.
    ///
    /// # Errors
    ///
    /// Fails on unreadable files and malformed JSON, and rejects files with
    /// duplicate ids or negative salaries.
    pub fn load_users(path: &Path) -> Result<Vec<UserRecord>, RepositoryError> {
        let content = fs::read_to_string(path).map_err(|source| RepositoryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let users: Vec<UserRecord> = serde_json::from_str(&content)?;
        check_rows(&users)?;
        info!(path = %path.display(), count = users.len(), "loaded seed users");
        Ok(users)
    }
}

/// Writes table rows out as CSV, one line per user under a header row.
pub struct CsvExporter;

impl CsvExporter {
    pub fn export_users(rows: &[UserRecord], filename: &str) -> Result<String, RepositoryError> {
        let mut writer = csv::Writer::from_path(filename)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush().map_err(|source| RepositoryError::Io {
            path: filename.to_string(),
            source,
        })?;
        info!(filename, count = rows.len(), "exported users");
        Ok(filename.to_string())
    }
}
