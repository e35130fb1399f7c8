//! Flat scan of artifact entries, ignoring the structure description.

use std::io::{Read, Seek};

use structura_core::AppResult;

use crate::archive::ExtractArchive;
use crate::artifact::{csv_to_markdown, encode_base64};
use crate::types::{ContentKind, Document};

/// Kind of artifact an entry name suggests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Image,
    Table,
    Other,
}

impl ArtifactKind {
    /// Guess from the entry name's extension.
    pub fn from_name(name: &str) -> Self {
        match mime_guess::from_path(name).first() {
            Some(mime) if mime.essence_str() == "image/png" => Self::Image,
            Some(mime) if mime.essence_str() == "text/csv" => Self::Table,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Table => "table",
            Self::Other => "other",
        }
    }
}

/// Lazy iterator yielding one document per image or table entry, in
/// archive order.
pub struct ArtifactScan<R> {
    archive: ExtractArchive<R>,
    names: std::vec::IntoIter<String>,
    finished: bool,
}

impl<R: Read + Seek> ArtifactScan<R> {
    pub fn new(archive: ExtractArchive<R>) -> Self {
        let names = archive.entry_names().into_iter();
        Self {
            archive,
            names,
            finished: false,
        }
    }

    fn load(&mut self, name: &str, kind: ArtifactKind) -> AppResult<Document> {
        let bytes = self.archive.read_entry(name)?;
        match kind {
            ArtifactKind::Image => Ok(Document::content(encode_base64(&bytes), ContentKind::Base64)),
            _ => Ok(Document::content(
                csv_to_markdown(name, &bytes)?,
                ContentKind::Markdown,
            )),
        }
    }
}

impl<R: Read + Seek> Iterator for ArtifactScan<R> {
    type Item = AppResult<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        while let Some(name) = self.names.next() {
            let kind = ArtifactKind::from_name(&name);
            if kind == ArtifactKind::Other {
                tracing::trace!("Skipping non-artifact entry {}", name);
                continue;
            }

            let result = self.load(&name, kind);
            if result.is_err() {
                self.finished = true;
            }
            return Some(result);
        }

        self.finished = true;
        None
    }
}
