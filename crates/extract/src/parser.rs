//! Mode dispatch from an extraction archive to documents.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::iter::FusedIterator;
use std::path::Path;

use structura_core::{AppConfig, AppResult, ExtractMode};

use crate::archive::ExtractArchive;
use crate::scan::ArtifactScan;
use crate::types::{ContentKind, Document};
use crate::walker::{StructureWalker, WalkOptions};

/// Parser settings, already validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    pub mode: ExtractMode,
    pub embed_figures: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            mode: ExtractMode::Chunks,
            embed_figures: true,
        }
    }
}

impl ParserConfig {
    /// Build from a mode name; unknown names are `InvalidConfiguration`.
    pub fn new(mode: &str, embed_figures: bool) -> AppResult<Self> {
        Ok(Self {
            mode: mode.parse()?,
            embed_figures,
        })
    }

    pub fn from_app_config(config: &AppConfig) -> AppResult<Self> {
        Ok(Self {
            mode: config.extract_mode()?,
            embed_figures: config.embed_figures,
        })
    }
}

/// Turns extraction archives into lazy document streams.
#[derive(Debug, Clone, Default)]
pub struct StructureParser {
    config: ParserConfig,
}

impl StructureParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Start producing documents from an opened archive.
    ///
    /// The structure description is read up front for the json and chunks
    /// modes; artifacts are read only as documents are pulled.
    pub fn parse<R: Read + Seek>(&self, mut archive: ExtractArchive<R>) -> AppResult<Documents<R>> {
        tracing::debug!(
            "Parsing archive in {} mode (embed_figures={})",
            self.config.mode,
            self.config.embed_figures
        );

        match self.config.mode {
            ExtractMode::Json => {
                let value = archive.structure_value()?;
                let document = Document::content(serde_json::to_string(&value)?, ContentKind::Json);
                Ok(Documents::Structure(Some(document)))
            }
            ExtractMode::Chunks => {
                let data = archive.structure()?;
                let options = WalkOptions {
                    embed_figures: self.config.embed_figures,
                };
                Ok(Documents::Chunks(StructureWalker::new(
                    data.elements,
                    archive,
                    options,
                )))
            }
            ExtractMode::Data => Ok(Documents::Data(ArtifactScan::new(archive))),
        }
    }

    /// Parse an in-memory archive blob.
    pub fn parse_bytes(&self, bytes: Vec<u8>) -> AppResult<Documents<Cursor<Vec<u8>>>> {
        self.parse(ExtractArchive::from_bytes(bytes)?)
    }

    /// Parse an archive stored on disk.
    pub fn parse_path(&self, path: &Path) -> AppResult<Documents<BufReader<File>>> {
        tracing::info!("Parsing extraction archive {:?}", path);
        self.parse(ExtractArchive::open(path)?)
    }
}

/// Document stream for one archive.
pub enum Documents<R> {
    Structure(Option<Document>),
    Chunks(StructureWalker<ExtractArchive<R>>),
    Data(ArtifactScan<R>),
}

impl<R: Read + Seek> Iterator for Documents<R> {
    type Item = AppResult<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Documents::Structure(document) => document.take().map(Ok),
            Documents::Chunks(walker) => walker.next().map(|r| r.map(Document::from)),
            Documents::Data(scan) => scan.next(),
        }
    }
}

impl<R: Read + Seek> FusedIterator for Documents<R> {}
