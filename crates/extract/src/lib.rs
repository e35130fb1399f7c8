//! Reconstruction of PDF extraction archives into retrieval-ready documents.
//!
//! An extraction archive holds `structuredData.json`, a flat ordered list
//! of elements tagged with structural paths, plus the figure and table
//! renditions those elements reference. Depending on the configured mode
//! the archive becomes:
//! - `chunks`: heading-scoped chunks carrying a breadcrumb and a page
//! - `data`: one document per image (base64) or table (markdown) entry
//! - `json`: the structure description itself
//!
//! # Example
//! ```no_run
//! use std::path::Path;
//! use structura_extract::{ParserConfig, StructureParser};
//!
//! let parser = StructureParser::new(ParserConfig::new("chunks", true)?);
//! for document in parser.parse_path(Path::new("extract.zip"))? {
//!     let document = document?;
//!     println!("{:?}: {}", document.headers(), document.content);
//! }
//! # Ok::<(), structura_core::AppError>(())
//! ```

pub mod archive;
pub mod artifact;
pub mod parser;
pub mod path;
pub mod scan;
pub mod types;
pub mod walker;

#[cfg(test)]
mod tests;

pub use archive::{ExtractArchive, STRUCTURE_ENTRY};
pub use artifact::{ArtifactResolver, ArtifactSource};
pub use parser::{Documents, ParserConfig, StructureParser};
pub use scan::{ArtifactKind, ArtifactScan};
pub use types::{
    Chunk, ContentKind, Document, DocumentMetadata, Element, StructureSummary, StructuredData,
};
pub use walker::{HeadingStack, StructureWalker, WalkOptions};
