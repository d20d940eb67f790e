use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::warn;

use crate::error::{Error, Result};
use crate::models::assessment::AssessmentRecord;
use crate::utils::time;

/// File-backed record store: one JSON document per submission, named
/// `{user_id}_{YYYYmmdd_HHMMSS}.json` inside the data directory. The
/// directory path is carried explicitly so callers never depend on
/// process-wide state.
#[derive(Clone, Debug)]
pub struct RecordStore {
    data_dir: PathBuf,
}

/// Result of scanning the whole store. Unparseable files are reported by
/// name rather than failing the scan.
#[derive(Debug, Default)]
pub struct StoreListing {
    pub records: Vec<(String, AssessmentRecord)>,
    pub skipped: Vec<String>,
}

impl RecordStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir).await?;
        Ok(())
    }

    /// Persists one record and returns the path written. Distinct users
    /// always write distinct files; same-user submissions within one
    /// second overwrite (last writer wins, per the naming granularity).
    pub async fn save(&self, record: &AssessmentRecord) -> Result<PathBuf> {
        self.ensure_dir().await?;
        let stamp = time::file_stamp(time::now());
        let filename = format!("{}_{}.json", record.user_id, stamp);
        let path = self.data_dir.join(&filename);
        let body = serde_json::to_vec_pretty(record)?;
        fs::write(&path, body).await?;
        Ok(path)
    }

    /// Loads the most recent record for a user, by the lexicographic order
    /// of the timestamped file names.
    pub async fn load_latest(&self, user_id: &str) -> Result<(String, AssessmentRecord)> {
        let prefix = format!("{}_", user_id);
        let mut matches = Vec::new();
        for name in self.file_names().await? {
            if name.starts_with(&prefix) {
                matches.push(name);
            }
        }
        matches.sort();
        let filename = matches
            .pop()
            .ok_or_else(|| Error::NotFound(format!("No assessment found for {}", user_id)))?;
        let record = self.read_record(&filename).await?;
        Ok((filename, record))
    }

    /// Reads every stored record. A file that fails to parse is skipped
    /// and reported so one bad record cannot take down the listing.
    pub async fn list_all(&self) -> Result<StoreListing> {
        let mut listing = StoreListing::default();
        for name in self.file_names().await? {
            match self.read_record(&name).await {
                Ok(record) => listing.records.push((name, record)),
                Err(Error::CorruptRecord(file, reason)) => {
                    warn!(file = %file, %reason, "skipping corrupt record");
                    listing.skipped.push(file);
                }
                Err(other) => return Err(other),
            }
        }
        Ok(listing)
    }

    async fn read_record(&self, filename: &str) -> Result<AssessmentRecord> {
        let raw = fs::read(self.data_dir.join(filename)).await?;
        serde_json::from_slice(&raw)
            .map_err(|e| Error::CorruptRecord(filename.to_string(), e.to_string()))
    }

    async fn file_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = match fs::read_dir(&self.data_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(names),
            Err(e) => return Err(e.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(".json") {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}
