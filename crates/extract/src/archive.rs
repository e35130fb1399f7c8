//! Read-only access to an extraction result archive.
//!
//! The conversion service returns a zip holding `structuredData.json` and
//! the figure/table renditions it references (`figures/*.png`,
//! `tables/*.csv`).

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use structura_core::{AppError, AppResult};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::artifact::ArtifactSource;
use crate::types::StructuredData;

/// Entry holding the structure description.
pub const STRUCTURE_ENTRY: &str = "structuredData.json";

/// Zip archive produced by the extraction service.
pub struct ExtractArchive<R> {
    inner: ZipArchive<R>,
}

impl<R: Read + Seek> ExtractArchive<R> {
    pub fn new(reader: R) -> AppResult<Self> {
        let inner = ZipArchive::new(reader)
            .map_err(|e| AppError::Archive(format!("Failed to open archive: {}", e)))?;
        tracing::debug!("Opened extraction archive with {} entries", inner.len());
        Ok(Self { inner })
    }

    /// Entry names in archive order.
    pub fn entry_names(&self) -> Vec<String> {
        self.inner.file_names().map(str::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.index_for_name(name).is_some()
    }

    /// Read a whole entry into memory.
    pub fn read_entry(&mut self, name: &str) -> AppResult<Vec<u8>> {
        let mut entry = self.inner.by_name(name).map_err(|e| match e {
            ZipError::FileNotFound => AppError::ArtifactNotFound(name.to_string()),
            other => AppError::Archive(format!("Failed to open entry {}: {}", name, other)),
        })?;

        let mut bytes = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
        entry.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    fn read_structure_bytes(&mut self) -> AppResult<Vec<u8>> {
        match self.read_entry(STRUCTURE_ENTRY) {
            Err(AppError::ArtifactNotFound(_)) => Err(AppError::Archive(format!(
                "Archive has no {} entry",
                STRUCTURE_ENTRY
            ))),
            other => other,
        }
    }

    /// Parse the structure description into typed elements.
    pub fn structure(&mut self) -> AppResult<StructuredData> {
        let bytes = self.read_structure_bytes()?;
        let data: StructuredData = serde_json::from_slice(&bytes)?;
        tracing::debug!("Parsed structure with {} elements", data.elements.len());
        Ok(data)
    }

    /// Parse the structure description without interpreting it.
    pub fn structure_value(&mut self) -> AppResult<serde_json::Value> {
        let bytes = self.read_structure_bytes()?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl ExtractArchive<Cursor<Vec<u8>>> {
    /// Wrap an in-memory archive blob.
    pub fn from_bytes(bytes: Vec<u8>) -> AppResult<Self> {
        Self::new(Cursor::new(bytes))
    }
}

impl ExtractArchive<BufReader<File>> {
    /// Open an archive stored on disk.
    pub fn open(path: &Path) -> AppResult<Self> {
        let file = File::open(path).map_err(|e| {
            AppError::Archive(format!("Failed to open archive {:?}: {}", path, e))
        })?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> ArtifactSource for ExtractArchive<R> {
    fn read_artifact(&mut self, name: &str) -> AppResult<Vec<u8>> {
        self.read_entry(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::fixtures::ArchiveBuilder;
    use serde_json::json;

    #[test]
    fn test_entry_names_in_archive_order() {
        let bytes = ArchiveBuilder::new()
            .structure(json!({"elements": []}))
            .entry("tables/fileoutpart1.csv", "a,b\n1,2\n")
            .entry("figures/fileoutpart0.png", b"\x89PNG")
            .build();
        let archive = ExtractArchive::from_bytes(bytes).unwrap();
        assert_eq!(
            archive.entry_names(),
            vec![
                "structuredData.json",
                "tables/fileoutpart1.csv",
                "figures/fileoutpart0.png"
            ]
        );
        assert_eq!(archive.len(), 3);
        assert!(archive.contains("tables/fileoutpart1.csv"));
    }

    #[test]
    fn test_read_missing_entry() {
        let bytes = ArchiveBuilder::new()
            .structure(json!({"elements": []}))
            .build();
        let mut archive = ExtractArchive::from_bytes(bytes).unwrap();
        let err = archive.read_entry("figures/missing.png").unwrap_err();
        assert!(matches!(err, AppError::ArtifactNotFound(name) if name == "figures/missing.png"));
    }

    #[test]
    fn test_missing_structure_entry() {
        let bytes = ArchiveBuilder::new()
            .entry("figures/fileoutpart0.png", b"\x89PNG")
            .build();
        let mut archive = ExtractArchive::from_bytes(bytes).unwrap();
        assert!(matches!(archive.structure(), Err(AppError::Archive(_))));
    }

    #[test]
    fn test_invalid_structure_json() {
        let bytes = ArchiveBuilder::new()
            .entry(STRUCTURE_ENTRY, "{\"elements\": [")
            .build();
        let mut archive = ExtractArchive::from_bytes(bytes).unwrap();
        assert!(matches!(
            archive.structure_value(),
            Err(AppError::Serialization(_))
        ));
    }

    #[test]
    fn test_not_a_zip() {
        let result = ExtractArchive::from_bytes(b"%PDF-1.7 not a zip".to_vec());
        assert!(matches!(result, Err(AppError::Archive(_))));
    }

    #[test]
    fn test_open_from_disk() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("extract.zip");
        let bytes = ArchiveBuilder::new()
            .structure(json!({"elements": [{"Path": "//Document/P", "Text": "x"}]}))
            .build();
        std::fs::write(&path, bytes).unwrap();

        let mut archive = ExtractArchive::open(&path).unwrap();
        assert_eq!(archive.structure().unwrap().elements.len(), 1);
    }
}
