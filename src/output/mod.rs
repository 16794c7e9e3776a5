use crate::collect::{Dataset, TelemetryKind};
use chrono::Local;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("cannot create output directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("output file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes each dataset as one timestamped CSV snapshot. File names carry a
/// subsecond timestamp so every cycle gets a fresh file; an existing file of
/// the same name is an error, never overwritten.
pub struct CsvWriter {
    directory: PathBuf,
}

impl CsvWriter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn persist(&self, dataset: &Dataset, kind: TelemetryKind) -> Result<PathBuf, WriteError> {
        std::fs::create_dir_all(&self.directory).map_err(|source| WriteError::CreateDir {
            path: self.directory.clone(),
            source,
        })?;

        let stamp = Local::now().format("%d-%m-%y-%H-%M-%S-%6f");
        let file_name = format!("{}-{}.csv", kind.file_prefix(), stamp);
        let path = self.directory.join(file_name);
        if path.exists() {
            return Err(WriteError::AlreadyExists(path));
        }

        debug!(path = %path.display(), rows = dataset.rows.len(), "Writing snapshot");

        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(&dataset.header)?;
        for row in &dataset.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset_with_rows(kind: TelemetryKind, rows: Vec<Vec<String>>) -> Dataset {
        let mut dataset = Dataset::new(kind);
        dataset.rows = rows;
        dataset
    }

    #[test]
    fn test_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::new(dir.path());

        let row: Vec<String> = (0..10).map(|i| i.to_string()).collect();
        let dataset = dataset_with_rows(TelemetryKind::AccessPoints, vec![row]);
        let path = writer.persist(&dataset, TelemetryKind::AccessPoints).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert!(lines.next().unwrap().starts_with("radioMacAddress,name"));
        assert_eq!(lines.next().unwrap(), "0,1,2,3,4,5,6,7,8,9");
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_header_only_dataset_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::new(dir.path());

        let dataset = Dataset::new(TelemetryKind::Clients);
        let path = writer.persist(&dataset, TelemetryKind::Clients).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
    }

    #[test]
    fn test_creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("snapshots").join("cmx");
        let writer = CsvWriter::new(&nested);

        let dataset = Dataset::new(TelemetryKind::AccessPoints);
        writer.persist(&dataset, TelemetryKind::AccessPoints).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_file_prefix_distinguishes_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::new(dir.path());

        let ap_path = writer
            .persist(&Dataset::new(TelemetryKind::AccessPoints), TelemetryKind::AccessPoints)
            .unwrap();
        let client_path = writer
            .persist(&Dataset::new(TelemetryKind::Clients), TelemetryKind::Clients)
            .unwrap();

        assert!(ap_path.file_name().unwrap().to_str().unwrap().starts_with("ap_data-"));
        assert!(client_path
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("user_data-"));
    }
}
