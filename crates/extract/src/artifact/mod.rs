//! Artifact resolution for figure and table renditions.
//!
//! Elements reference archive entries by name. Images resolve to base64
//! text, CSV tables to markdown.

mod image;
mod table;

pub use image::encode_base64;
pub use table::{csv_to_markdown, render_markdown_table};

use std::collections::HashMap;

use structura_core::{AppError, AppResult};

/// Random-access store of named byte streams.
pub trait ArtifactSource {
    /// Read the named entry. Missing entries are `ArtifactNotFound`.
    fn read_artifact(&mut self, name: &str) -> AppResult<Vec<u8>>;
}

impl<S: ArtifactSource + ?Sized> ArtifactSource for &mut S {
    fn read_artifact(&mut self, name: &str) -> AppResult<Vec<u8>> {
        (**self).read_artifact(name)
    }
}

impl ArtifactSource for HashMap<String, Vec<u8>> {
    fn read_artifact(&mut self, name: &str) -> AppResult<Vec<u8>> {
        self.get(name)
            .cloned()
            .ok_or_else(|| AppError::ArtifactNotFound(name.to_string()))
    }
}

/// Turns artifact references into inline representations.
pub struct ArtifactResolver<S> {
    source: S,
}

impl<S: ArtifactSource> ArtifactResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Base64 text of an image entry.
    pub fn resolve_image(&mut self, reference: &str) -> AppResult<String> {
        let bytes = self.source.read_artifact(reference)?;
        tracing::trace!("Encoding image {} ({} bytes)", reference, bytes.len());
        Ok(encode_base64(&bytes))
    }

    /// Markdown rendering of a CSV table entry.
    pub fn resolve_table(&mut self, reference: &str) -> AppResult<String> {
        let bytes = self.source.read_artifact(reference)?;
        csv_to_markdown(reference, &bytes)
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> HashMap<String, Vec<u8>> {
        let mut source = HashMap::new();
        source.insert("figures/fileoutpart0.png".to_string(), b"png!".to_vec());
        source.insert(
            "tables/fileoutpart1.csv".to_string(),
            b"Name,Qty\nBolt,4\n".to_vec(),
        );
        source
    }

    #[test]
    fn test_resolve_image() {
        let mut resolver = ArtifactResolver::new(source());
        assert_eq!(
            resolver.resolve_image("figures/fileoutpart0.png").unwrap(),
            "cG5nIQ=="
        );
    }

    #[test]
    fn test_resolve_table() {
        let mut resolver = ArtifactResolver::new(source());
        assert_eq!(
            resolver.resolve_table("tables/fileoutpart1.csv").unwrap(),
            "| Name | Qty |\n| --- | --- |\n| Bolt | 4 |"
        );
    }

    #[test]
    fn test_missing_artifact() {
        let mut resolver = ArtifactResolver::new(source());
        assert!(matches!(
            resolver.resolve_image("figures/nope.png"),
            Err(AppError::ArtifactNotFound(_))
        ));
        assert!(matches!(
            resolver.resolve_table("tables/nope.csv"),
            Err(AppError::ArtifactNotFound(_))
        ));
    }

    #[test]
    fn test_borrowed_source() {
        let mut owned = source();
        let mut resolver = ArtifactResolver::new(&mut owned);
        assert!(resolver.resolve_image("figures/fileoutpart0.png").is_ok());
    }
}
