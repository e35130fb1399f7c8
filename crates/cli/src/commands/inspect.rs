//! Inspect command handler.
//!
//! Lists archive entries and summarizes the structure description.

use clap::Args;
use std::path::PathBuf;
use structura_core::{AppError, AppResult};
use structura_extract::{ArtifactKind, ExtractArchive, StructureSummary, STRUCTURE_ENTRY};

/// Show the entries and element counts of an extraction archive
#[derive(Args, Debug)]
pub struct InspectCommand {
    /// Archive to inspect
    pub archive: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl InspectCommand {
    pub fn execute(&self) -> AppResult<()> {
        tracing::info!("Inspecting archive {:?}", self.archive);

        let mut archive = ExtractArchive::open(&self.archive)?;
        let entries: Vec<(String, ArtifactKind)> = archive
            .entry_names()
            .into_iter()
            .map(|name| {
                let kind = ArtifactKind::from_name(&name);
                (name, kind)
            })
            .collect();

        let summary = if archive.contains(STRUCTURE_ENTRY) {
            Some(archive.structure()?.summary())
        } else {
            tracing::warn!("Archive has no {}", STRUCTURE_ENTRY);
            None
        };

        if self.json {
            let output = serde_json::json!({
                "archive": self.archive.display().to_string(),
                "entries": entries
                    .iter()
                    .map(|(name, kind)| serde_json::json!({"name": name, "kind": kind.as_str()}))
                    .collect::<Vec<_>>(),
                "structure": summary,
            });
            let rendered = serde_json::to_string_pretty(&output)
                .map_err(|e| AppError::Serialization(format!("JSON serialization failed: {}", e)))?;
            println!("{}", rendered);
        } else {
            println!("Archive: {}", self.archive.display());
            println!("Entries:");
            for (name, kind) in &entries {
                println!("  {:<6} {}", kind.as_str(), name);
            }
            if let Some(summary) = summary {
                print_summary(&summary);
            }
        }

        Ok(())
    }
}

fn print_summary(summary: &StructureSummary) {
    println!("Structure:");
    println!("  Elements: {}", summary.elements);
    println!(
        "  Headings: {} (deepest H{})",
        summary.headings, summary.max_heading_level
    );
    println!("  Figures: {}", summary.figures);
    println!("  Tables: {}", summary.tables);
    println!("  Labels: {}", summary.labels);
    println!("  Artifact refs: {}", summary.artifact_refs);
    println!("  Pages: {}", summary.pages);
}
