//! Parse command handler.
//!
//! Turns extraction archives into documents on stdout.

use clap::Args;
use std::io::Write;
use std::path::{Path, PathBuf};
use structura_core::{config::AppConfig, AppError, AppResult};
use structura_extract::{ContentKind, Document, DocumentMetadata, ParserConfig, StructureParser};
use walkdir::WalkDir;

/// Parse extraction archives into documents
#[derive(Args, Debug)]
pub struct ParseCommand {
    /// Archives, or directories searched recursively for `*.zip`
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output mode (json, chunks, data)
    #[arg(long)]
    pub mode: Option<String>,

    /// Keep figure captions instead of embedding images
    #[arg(long)]
    pub no_embed_figures: bool,

    /// Stop after this many documents per archive
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output one JSON object per line
    #[arg(long)]
    pub json: bool,
}

impl ParseCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let config = config.clone().with_overrides(
            self.mode.clone(),
            self.no_embed_figures.then_some(false),
            None,
            false,
            false,
            false,
        );
        let parser = StructureParser::new(ParserConfig::from_app_config(&config)?);

        let archives = collect_archives(&self.paths)?;
        tracing::info!(
            "Parsing {} archive(s) in {} mode",
            archives.len(),
            parser.config().mode
        );

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let limit = self.limit.unwrap_or(usize::MAX);
        let mut total = 0usize;

        for archive in &archives {
            let documents = parser.parse_path(archive)?;
            for (index, document) in documents.take(limit).enumerate() {
                let document = document?;
                if self.json {
                    write_json_line(&mut out, archive, &document)?;
                } else {
                    write_human(&mut out, archive, index, &document)?;
                }
                total += 1;
            }
        }

        tracing::info!("Wrote {} documents", total);
        Ok(())
    }
}

/// Expand directories into the `*.zip` files beneath them.
pub fn collect_archives(paths: &[PathBuf]) -> AppResult<Vec<PathBuf>> {
    let mut archives = Vec::new();

    for path in paths {
        if path.is_file() {
            archives.push(path.clone());
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if entry.file_type().is_file() && is_zip(entry.path()) {
                    archives.push(entry.into_path());
                }
            }
        } else {
            return Err(AppError::Other(format!("Path does not exist: {:?}", path)));
        }
    }

    if archives.is_empty() {
        tracing::warn!("No archives found under the given paths");
    }

    Ok(archives)
}

fn is_zip(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"))
}

fn write_json_line(out: &mut impl Write, archive: &Path, document: &Document) -> AppResult<()> {
    let mut value = serde_json::to_value(document)?;
    value["source"] = serde_json::Value::String(archive.display().to_string());
    writeln!(out, "{}", serde_json::to_string(&value)?)?;
    Ok(())
}

fn write_human(
    out: &mut impl Write,
    archive: &Path,
    index: usize,
    document: &Document,
) -> AppResult<()> {
    let name = archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match &document.metadata {
        DocumentMetadata::Chunk {
            headers,
            page,
            figures,
        } => {
            let page = page.map(|p| p.to_string()).unwrap_or_else(|| "?".to_string());
            let figure_count: usize = figures.values().map(Vec::len).sum();
            writeln!(
                out,
                "== {} #{} [{}] (page {}, {} figures)",
                name,
                index + 1,
                headers.join(" > "),
                page,
                figure_count
            )?;
            writeln!(out, "{}", document.content)?;
        }
        DocumentMetadata::Content { content_type } => {
            writeln!(
                out,
                "== {} #{} ({}, {} chars)",
                name,
                index + 1,
                content_type.as_str(),
                document.content.len()
            )?;
            if *content_type == ContentKind::Markdown {
                writeln!(out, "{}", document.content)?;
            }
        }
    }
    writeln!(out)?;
    Ok(())
}
