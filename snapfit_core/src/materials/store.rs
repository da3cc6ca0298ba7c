//! Custom Material Storage
//!
//! User-saved materials are persisted as one blob under a fixed key and are
//! always read and written whole: there are no partial updates, and the last
//! save wins. [`MaterialStore`] is the seam; [`JsonFileStore`] keeps the blob
//! in a JSON file in the data directory and [`MemoryStore`] keeps it in memory
//! (tests, embedding, or a frontend that flushes elsewhere).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MaterialProperties;
use crate::errors::CalcResult;
use crate::file_io::{self, FileLock, SCHEMA_VERSION};

/// File name used by [`JsonFileStore::in_dir`]
pub const CUSTOM_MATERIALS_FILE: &str = "custom_materials.json";

/// Name → properties mapping of user-saved materials
pub type CustomMaterials = BTreeMap<String, MaterialProperties>;

/// Whole-blob storage for custom materials.
///
/// Contract: `load` after `save` returns what was saved; `clear` removes
/// every custom entry (built-ins are never stored and are unaffected); a
/// store that has never been written loads as an empty mapping.
pub trait MaterialStore {
    /// Read the full custom material mapping
    fn load(&self) -> CalcResult<CustomMaterials>;

    /// Replace the full custom material mapping
    fn save(&mut self, materials: &CustomMaterials) -> CalcResult<()>;

    /// Remove every custom material
    fn clear(&mut self) -> CalcResult<()>;
}

/// In-memory store with no persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    materials: Option<CustomMaterials>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with materials
    pub fn with_materials(materials: CustomMaterials) -> Self {
        MemoryStore {
            materials: Some(materials),
        }
    }
}

impl MaterialStore for MemoryStore {
    fn load(&self) -> CalcResult<CustomMaterials> {
        Ok(self.materials.clone().unwrap_or_default())
    }

    fn save(&mut self, materials: &CustomMaterials) -> CalcResult<()> {
        self.materials = Some(materials.clone());
        Ok(())
    }

    fn clear(&mut self) -> CalcResult<()> {
        self.materials = None;
        Ok(())
    }
}

/// On-disk layout of the custom material file.
///
/// ```json
/// {
///   "version": "0.1.0",
///   "modified": "2026-10-19T12:00:00Z",
///   "materials": {
///     "PA66 GF30": { "E": 870000.0, "eps": 0.018 }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialLibraryFile {
    /// Schema version (for migration compatibility)
    pub version: String,
    /// When the file was last written
    pub modified: DateTime<Utc>,
    /// Saved materials keyed by name
    pub materials: CustomMaterials,
}

impl MaterialLibraryFile {
    fn new(materials: CustomMaterials) -> Self {
        MaterialLibraryFile {
            version: SCHEMA_VERSION.to_string(),
            modified: Utc::now(),
            materials,
        }
    }
}

/// JSON file store with atomic writes and an exclusive lock per write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    user_id: String,
}

impl JsonFileStore {
    /// Store backed by an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore {
            path: path.into(),
            user_id: file_io::current_user(),
        }
    }

    /// Store backed by `custom_materials.json` inside a data directory
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(CUSTOM_MATERIALS_FILE))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MaterialStore for JsonFileStore {
    fn load(&self) -> CalcResult<CustomMaterials> {
        let Some(file) = file_io::read_json::<MaterialLibraryFile>(&self.path)? else {
            tracing::debug!(path = %self.path.display(), "no custom material file, using empty library");
            return Ok(CustomMaterials::new());
        };
        file_io::validate_version(&file.version)?;
        tracing::debug!(
            path = %self.path.display(),
            count = file.materials.len(),
            "loaded custom materials"
        );
        Ok(file.materials)
    }

    fn save(&mut self, materials: &CustomMaterials) -> CalcResult<()> {
        file_io::ensure_parent_dir(&self.path)?;
        let _lock = FileLock::acquire(&self.path, self.user_id.clone())?;
        file_io::write_json_atomic(&self.path, &MaterialLibraryFile::new(materials.clone()))?;
        tracing::info!(
            path = %self.path.display(),
            count = materials.len(),
            "saved custom materials"
        );
        Ok(())
    }

    fn clear(&mut self) -> CalcResult<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let _lock = FileLock::acquire(&self.path, self.user_id.clone())?;
        file_io::remove_if_exists(&self.path)?;
        tracing::info!(path = %self.path.display(), "cleared custom materials");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CustomMaterials {
        let mut materials = CustomMaterials::new();
        materials.insert("PA66 GF30".to_string(), MaterialProperties::new(870_000.0, 0.018));
        materials
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());

        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), sample());

        store.clear().unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::in_dir(&dir.path().join("fresh"));

        store.save(&sample()).unwrap();
        assert!(store.path().exists());

        let reopened = JsonFileStore::in_dir(&dir.path().join("fresh"));
        assert_eq!(reopened.load().unwrap(), sample());
    }

    #[test]
    fn test_file_store_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::in_dir(dir.path());

        store.save(&sample()).unwrap();
        let mut second = CustomMaterials::new();
        second.insert("POM".to_string(), MaterialProperties::new(400_000.0, 0.02));
        store.save(&second).unwrap();

        assert_eq!(store.load().unwrap(), second);
    }

    #[test]
    fn test_file_store_survives_rejected_nan_save() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::in_dir(dir.path());
        store.save(&sample()).unwrap();

        let bad = MaterialProperties::new(f64::NAN, 0.02);
        assert!(super::super::save_material(&mut store, "Broken", bad).is_err());

        let reopened = JsonFileStore::in_dir(dir.path());
        assert_eq!(reopened.load().unwrap(), sample());
    }

    #[test]
    fn test_file_store_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::in_dir(dir.path());

        store.save(&sample()).unwrap();
        store.clear().unwrap();

        assert!(!store.path().exists());
        assert!(store.load().unwrap().is_empty());
        // Clearing an already-empty store is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_accepts_browser_blob_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CUSTOM_MATERIALS_FILE);
        std::fs::write(
            &path,
            r#"{
                "version": "0.1.0",
                "modified": "2026-01-01T00:00:00Z",
                "materials": { "My PC": { "E": 345000, "eps": 0.021 } }
            }"#,
        )
        .unwrap();

        let loaded = JsonFileStore::new(&path).load().unwrap();
        assert_eq!(loaded["My PC"], MaterialProperties::new(345_000.0, 0.021));
    }

    #[test]
    fn test_file_store_rejects_newer_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CUSTOM_MATERIALS_FILE);
        std::fs::write(
            &path,
            r#"{ "version": "0.9.0", "modified": "2026-01-01T00:00:00Z", "materials": {} }"#,
        )
        .unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");
    }
}
