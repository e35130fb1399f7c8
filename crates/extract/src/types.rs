//! Extraction type definitions.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::path::ElementPath;

/// One structural unit from the structure description.
///
/// Only the keys the chunker needs are read; bounds, fonts and the rest
/// of the element attributes are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Structural path, e.g. `//Document/Sect/H2`
    #[serde(rename = "Path", default)]
    pub path: String,

    /// Plain text payload
    #[serde(rename = "Text", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// 0-based page index
    #[serde(rename = "Page", default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Archive entries holding renditions of this element
    #[serde(rename = "filePaths", default, skip_serializing_if = "Vec::is_empty")]
    pub file_paths: Vec<String>,
}

impl Element {
    /// Text payload, empty when absent.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn structural_path(&self) -> ElementPath<'_> {
        ElementPath::new(&self.path)
    }
}

/// Parsed `structuredData.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuredData {
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl StructuredData {
    /// Count elements by the role the chunker assigns them.
    pub fn summary(&self) -> StructureSummary {
        let mut summary = StructureSummary {
            elements: self.elements.len(),
            ..Default::default()
        };
        let mut pages = BTreeSet::new();

        for element in &self.elements {
            let path = element.structural_path();
            if let Some(page) = element.page {
                pages.insert(page);
            }

            if path.is_figure() {
                summary.figures += 1;
            } else if let Some(level) = path.heading_level() {
                summary.headings += 1;
                summary.max_heading_level = summary.max_heading_level.max(level);
            } else if path.is_table() {
                summary.tables += 1;
            } else if path.is_label() {
                summary.labels += 1;
            }

            summary.artifact_refs += element.file_paths.len();
        }

        summary.pages = pages.len();
        summary
    }
}

/// Element counts for a structure description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructureSummary {
    pub elements: usize,
    pub headings: usize,
    pub figures: usize,
    pub tables: usize,
    pub labels: usize,
    pub artifact_refs: usize,
    pub max_heading_level: u8,
    pub pages: usize,
}

/// A heading-scoped section of reconstructed content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Merged, trimmed section text
    pub content: String,

    /// Breadcrumb of open headings when the section was flushed
    pub headers: Vec<String>,

    /// 1-based page of the opening heading, else of the latest body element
    pub page: Option<u32>,

    /// Structural path -> base64 images embedded in this section
    pub figures: BTreeMap<String, Vec<String>>,
}

/// Encoding of a content-only document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Base64,
    Markdown,
    Json,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base64 => "base64",
            Self::Markdown => "markdown",
            Self::Json => "json",
        }
    }
}

/// Metadata attached to a [`Document`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentMetadata {
    Chunk {
        headers: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        page: Option<u32>,
        figures: BTreeMap<String, Vec<String>>,
    },
    Content {
        content_type: ContentKind,
    },
}

/// Output unit shared by every extraction mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub metadata: DocumentMetadata,
}

impl Document {
    pub fn content(content: String, content_type: ContentKind) -> Self {
        Self {
            content,
            metadata: DocumentMetadata::Content { content_type },
        }
    }

    /// Breadcrumb for chunk documents, empty otherwise.
    pub fn headers(&self) -> &[String] {
        match &self.metadata {
            DocumentMetadata::Chunk { headers, .. } => headers,
            DocumentMetadata::Content { .. } => &[],
        }
    }
}

impl From<Chunk> for Document {
    fn from(chunk: Chunk) -> Self {
        Self {
            content: chunk.content,
            metadata: DocumentMetadata::Chunk {
                headers: chunk.headers,
                page: chunk.page,
                figures: chunk.figures,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_deserialize_ignores_extra_keys() {
        let json = r#"{
            "Bounds": [72.0, 700.1, 300.4, 720.0],
            "Font": {"name": "Helvetica"},
            "Path": "//Document/Figure",
            "Page": 3,
            "filePaths": ["figures/fileoutpart2.png"]
        }"#;
        let element: Element = serde_json::from_str(json).unwrap();
        assert_eq!(element.path, "//Document/Figure");
        assert_eq!(element.text(), "");
        assert_eq!(element.page, Some(3));
        assert_eq!(element.file_paths, vec!["figures/fileoutpart2.png"]);
    }

    #[test]
    fn test_summary_counts() {
        let data: StructuredData = serde_json::from_str(
            r#"{"elements": [
                {"Path": "//Document/H1", "Text": "Intro", "Page": 0},
                {"Path": "//Document/P", "Text": "Body", "Page": 0},
                {"Path": "//Document/Sect/H3", "Text": "Deep", "Page": 1},
                {"Path": "//Document/Table", "Page": 1, "filePaths": ["tables/a.csv"]},
                {"Path": "//Document/Figure/H2", "Text": "Caption", "Page": 2},
                {"Path": "//Document/L/LI/Lbl", "Text": "1.", "Page": 2}
            ]}"#,
        )
        .unwrap();

        let summary = data.summary();
        assert_eq!(summary.elements, 6);
        assert_eq!(summary.headings, 2);
        assert_eq!(summary.max_heading_level, 3);
        assert_eq!(summary.figures, 1);
        assert_eq!(summary.tables, 1);
        assert_eq!(summary.labels, 1);
        assert_eq!(summary.artifact_refs, 1);
        assert_eq!(summary.pages, 3);
    }

    #[test]
    fn test_document_metadata_shape() {
        let doc = Document::from(Chunk {
            content: "Hello".to_string(),
            headers: vec!["Intro".to_string()],
            page: Some(1),
            figures: BTreeMap::new(),
        });
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["metadata"]["headers"][0], "Intro");
        assert_eq!(value["metadata"]["page"], 1);
        assert!(value["metadata"]["figures"].as_object().unwrap().is_empty());

        let doc = Document::content("aGk=".to_string(), ContentKind::Base64);
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["metadata"]["content_type"], "base64");
        assert!(doc.headers().is_empty());
    }
}
