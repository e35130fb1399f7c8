//! Mode selection across json, chunks and data.

use crate::parser::{ParserConfig, StructureParser};
use crate::tests::fixtures::ArchiveBuilder;
use crate::types::{ContentKind, Document, DocumentMetadata};
use serde_json::json;
use structura_core::{AppError, AppResult};

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_archive() -> Vec<u8> {
        ArchiveBuilder::new()
            .structure(json!({"elements": [
                {"Path": "//Document/H1", "Text": "Report", "Page": 0},
                {"Path": "//Document/Figure", "Page": 0, "filePaths": ["figures/fileoutpart0.png"]},
                {"Path": "//Document/Table", "Page": 1, "filePaths": ["tables/fileoutpart1.csv"]}
            ]}))
            .entry("figures/fileoutpart0.png", "ab")
            .entry("tables/fileoutpart1.csv", "x,y\n1,2\n")
            .build()
    }

    fn run(mode: &str, bytes: Vec<u8>) -> AppResult<Vec<Document>> {
        let parser = StructureParser::new(ParserConfig::new(mode, true)?);
        parser.parse_bytes(bytes)?.collect()
    }

    #[test]
    fn test_json_mode_yields_structure_once() {
        let docs = run("json", sample_archive()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(
            docs[0].metadata,
            DocumentMetadata::Content {
                content_type: ContentKind::Json
            }
        );

        let value: serde_json::Value = serde_json::from_str(&docs[0].content).unwrap();
        assert_eq!(value["elements"].as_array().unwrap().len(), 3);
        assert_eq!(value["elements"][0]["Text"], "Report");
    }

    #[test]
    fn test_chunks_mode_combines_figure_and_table() {
        let docs = run("chunks", sample_archive()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(
            docs[0].content,
            "{figures/fileoutpart0.png}\n| x | y |\n| --- | --- |\n| 1 | 2 |"
        );
        assert_eq!(docs[0].headers(), ["Report"]);
    }

    #[test]
    fn test_data_mode_ignores_structure() {
        let docs = run("data", sample_archive()).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0], Document::content("YWI=".to_string(), ContentKind::Base64));
        assert_eq!(
            docs[1],
            Document::content("| x | y |\n| --- | --- |\n| 1 | 2 |".to_string(), ContentKind::Markdown)
        );
    }

    #[test]
    fn test_data_mode_without_structure_entry() {
        let bytes = ArchiveBuilder::new()
            .entry("figures/fileoutpart0.png", "ab")
            .build();
        let docs = run("data", bytes).unwrap();
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn test_invalid_mode_fails_before_reading() {
        // Not even a zip: the mode is rejected first
        let result = run("markdown", b"garbage".to_vec());
        assert!(matches!(result, Err(AppError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_chunks_mode_requires_structure() {
        let bytes = ArchiveBuilder::new()
            .entry("figures/fileoutpart0.png", "ab")
            .build();
        assert!(matches!(run("chunks", bytes), Err(AppError::Archive(_))));
    }

    #[test]
    fn test_parse_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("report.zip");
        std::fs::write(&path, sample_archive()).unwrap();

        let parser = StructureParser::default();
        let docs: Vec<Document> = parser
            .parse_path(&path)
            .unwrap()
            .collect::<AppResult<_>>()
            .unwrap();
        assert_eq!(docs.len(), 1);
    }
}
