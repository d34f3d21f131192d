//! Filesystem-backed JSON persistence for ledger snapshots.
//!
//! Snapshots are pretty-printed JSON files under a single root directory.
//! Saves go through a temp file and an atomic rename so a crash mid-write
//! never leaves a truncated snapshot behind.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use lazyledger_core::{CoreError, SnapshotStorage};
use lazyledger_domain::LedgerSnapshot;

const SNAPSHOT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// JSON implementation of [`SnapshotStorage`].
#[derive(Debug, Clone)]
pub struct JsonSnapshotStorage {
    root: PathBuf,
}

impl JsonSnapshotStorage {
    /// Opens (and creates, if needed) a storage root.
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Opens the platform-default data directory
    /// (`<data dir>/lazyledger/snapshots`).
    pub fn open_default() -> Result<Self, CoreError> {
        let base = dirs::data_dir()
            .ok_or_else(|| CoreError::Storage("no platform data directory".into()))?;
        Self::new(base.join("lazyledger").join("snapshots"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file a snapshot name maps to.
    pub fn snapshot_path(&self, name: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_name(name), SNAPSHOT_EXTENSION))
    }
}

impl SnapshotStorage for JsonSnapshotStorage {
    fn save_snapshot(&self, name: &str, snapshot: &LedgerSnapshot) -> Result<(), CoreError> {
        let path = self.snapshot_path(name);
        let data = serde_json::to_string_pretty(snapshot)?;
        let tmp = tmp_path(&path);
        write_all(&tmp, &data)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn load_snapshot(&self, name: &str) -> Result<LedgerSnapshot, CoreError> {
        let path = self.snapshot_path(name);
        if !path.exists() {
            return Err(CoreError::SnapshotNotFound(canonical_name(name)));
        }
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn list_snapshots(&self) -> Result<Vec<String>, CoreError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(SNAPSHOT_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete_snapshot(&self, name: &str) -> Result<(), CoreError> {
        let path = self.snapshot_path(name);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "ledger".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_all(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
