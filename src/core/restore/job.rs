//! Restore input loading

use crate::domain::{Record, Result};
use std::path::Path;

/// The records to replay, as read from a backup file
#[derive(Debug, Clone, Default)]
pub struct RestoreJob {
    pub records: Vec<Record>,
}

impl RestoreJob {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Reads a backup file: a single JSON array of objects
    ///
    /// An unreadable file is an I/O error; anything that is not an array of
    /// objects is a serialization error. Either way nothing is replayed.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path.as_ref()).await?;
        let records: Vec<Record> = serde_json::from_slice(&bytes)?;

        tracing::debug!(
            path = %path.as_ref().display(),
            records = records.len(),
            "Loaded restore input"
        );
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CognitoBackupError;
    use std::io::Write;

    #[tokio::test]
    async fn test_loads_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"Username": "alice"}}, {{"Username": "bob", "Groups": ["ops"]}}]"#
        )
        .unwrap();

        let job = RestoreJob::from_file(file.path()).await.unwrap();
        assert_eq!(job.len(), 2);
        assert_eq!(job.records[1].groups(), vec!["ops"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let err = RestoreJob::from_file("/nonexistent/users.json")
            .await
            .unwrap_err();
        assert!(matches!(err, CognitoBackupError::Io(_)));
    }

    #[tokio::test]
    async fn test_rejects_non_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Username": "alice"}}"#).unwrap();

        let err = RestoreJob::from_file(file.path()).await.unwrap_err();
        assert!(matches!(err, CognitoBackupError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_rejects_truncated_backup() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[\n{{\"Username\": \"alice\"}},\n").unwrap();

        assert!(RestoreJob::from_file(file.path()).await.is_err());
    }
}
