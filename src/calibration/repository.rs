use super::table::CalibrationTable;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: std::io::Error },
    Format { path: PathBuf, source: serde_json::Error },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io { path, source } => {
                write!(f, "calibration store {}: {source}", path.display())
            }
            StoreError::Format { path, source } => {
                write!(f, "calibration store {} is malformed: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            StoreError::Format { source, .. } => Some(source),
        }
    }
}

/// Persistence for the calibration table. The regression never reads this;
/// it only feeds the offline fit.
pub trait CalibrationRepository {
    /// Current table, empty when nothing has been stored yet.
    fn load(&self) -> Result<CalibrationTable, StoreError>;
    fn save(&mut self, table: &CalibrationTable) -> Result<(), StoreError>;

    /// Load, apply `edit`, save.
    fn update<F>(&mut self, edit: F) -> Result<CalibrationTable, StoreError>
    where
        F: FnOnce(&mut CalibrationTable),
        Self: Sized,
    {
        let mut table = self.load()?;
        edit(&mut table);
        self.save(&table)?;
        Ok(table)
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryRepository {
    table: CalibrationTable,
}

impl MemoryRepository {
    pub fn new(table: CalibrationTable) -> Self {
        Self { table }
    }
}

impl CalibrationRepository for MemoryRepository {
    fn load(&self) -> Result<CalibrationTable, StoreError> {
        Ok(self.table.clone())
    }

    fn save(&mut self, table: &CalibrationTable) -> Result<(), StoreError> {
        self.table = table.clone();
        Ok(())
    }
}

/// Table stored as one JSON document.
#[derive(Clone, Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CalibrationRepository for JsonFileRepository {
    fn load(&self) -> Result<CalibrationTable, StoreError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no calibration store at {}, starting empty", self.path.display());
                return Ok(CalibrationTable::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };
        serde_json::from_str(&data).map_err(|source| StoreError::Format {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&mut self, table: &CalibrationTable) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }
        let json = serde_json::to_string_pretty(table).map_err(|source| StoreError::Format {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_repository_round_trips_edits() {
        let mut repo = MemoryRepository::default();
        repo.update(|t| t.record(30.0, 32.0, 10, 7.25)).unwrap();
        let table = repo.load().unwrap();
        assert_eq!(table.get(30.0, 32.0, 10), Some(7.3));
    }

    #[test]
    fn json_repository_persists_and_reports_malformed_files() {
        let dir = std::env::temp_dir().join(format!("ocular-calib-{}", std::process::id()));
        let path = dir.join("nested").join("xaxis.json");
        let mut repo = JsonFileRepository::new(&path);
        assert!(repo.load().unwrap().is_empty());

        repo.update(|t| t.record(20.0, 40.0, 15, -9.0)).unwrap();
        let reopened = JsonFileRepository::new(&path);
        assert_eq!(reopened.load().unwrap().get(20.0, 40.0, 15), Some(-9.0));

        fs::write(&path, "{not json").unwrap();
        let err = reopened.load().unwrap_err();
        assert!(matches!(err, StoreError::Format { .. }));
        let _ = fs::remove_dir_all(&dir);
    }
}
