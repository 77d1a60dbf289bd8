//! Filesystem transcript store.
//!
//! Transcripts are produced by an external process as `<recording_id>.json`
//! files in a single directory. This store only reads them.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use super::traits::{BaseTranscriptStore, StoredTranscript};

const EXTENSION: &str = ".json";

#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("Transcript not found")]
    NotFound,

    #[error("Invalid recording id")]
    InvalidId,

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON in {file}: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct FsTranscriptStore {
    dir: PathBuf,
}

impl FsTranscriptStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, recording_id: &str) -> Result<PathBuf, TranscriptError> {
        if !is_valid_id(recording_id) {
            return Err(TranscriptError::InvalidId);
        }
        Ok(self.dir.join(format!("{}{}", recording_id, EXTENSION)))
    }
}

/// Ids become file names, so anything that could leave the directory is refused
fn is_valid_id(recording_id: &str) -> bool {
    !recording_id.is_empty()
        && !recording_id.contains("..")
        && !recording_id.contains('/')
        && !recording_id.contains('\\')
        && !recording_id.contains('\0')
}

async fn read_json(path: &Path) -> Result<Value, TranscriptError> {
    let raw = tokio::fs::read_to_string(path).await?;
    serde_json::from_str(&raw).map_err(|source| TranscriptError::Json {
        file: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        source,
    })
}

#[async_trait]
impl BaseTranscriptStore for FsTranscriptStore {
    async fn list(&self) -> Result<Vec<StoredTranscript>, TranscriptError> {
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        let mut transcripts = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name();
            let Some(recording_id) = file_name
                .to_str()
                .and_then(|name| name.strip_suffix(EXTENSION))
            else {
                continue;
            };

            // metadata follows symlinks, matching what `get` reads
            if !tokio::fs::metadata(entry.path()).await?.is_file() {
                continue;
            }

            transcripts.push(StoredTranscript {
                recording_id: recording_id.to_string(),
                data: read_json(&entry.path()).await?,
            });
        }

        transcripts.sort_by(|a, b| a.recording_id.cmp(&b.recording_id));
        Ok(transcripts)
    }

    async fn get(&self, recording_id: &str) -> Result<Value, TranscriptError> {
        let path = self.path_for(recording_id)?;

        match read_json(&path).await {
            Err(TranscriptError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                Err(TranscriptError::NotFound)
            }
            other => other,
        }
    }
}
