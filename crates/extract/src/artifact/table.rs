//! CSV table decoding and markdown rendering.

use structura_core::{AppError, AppResult};

/// Parse a CSV table (first row is the header) and render it as markdown.
///
/// Rows with more fields than the header, or rows the reader cannot
/// decode, are skipped with a warning. Short rows are padded.
pub fn csv_to_markdown(name: &str, bytes: &[u8]) -> AppResult<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| malformed(name, e.to_string()))?
        .iter()
        .map(clean_cell)
        .collect();

    if headers.is_empty() {
        return Err(malformed(name, "no header columns".to_string()));
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        match result {
            Ok(record) if record.len() > headers.len() => {
                skipped += 1;
                tracing::warn!(
                    "Skipping line {} of {}: expected {} fields, saw {}",
                    record.position().map(|p| p.line()).unwrap_or(0),
                    name,
                    headers.len(),
                    record.len()
                );
            }
            Ok(record) => {
                let mut row: Vec<String> = record.iter().map(clean_cell).collect();
                row.resize(headers.len(), String::new());
                rows.push(row);
            }
            Err(e) => {
                skipped += 1;
                tracing::warn!(
                    "Skipping line {} of {}: {}",
                    e.position().map(|p| p.line()).unwrap_or(0),
                    name,
                    e
                );
            }
        }
    }

    tracing::debug!(
        "Rendered table {}: {} columns, {} rows, {} skipped",
        name,
        headers.len(),
        rows.len(),
        skipped
    );

    Ok(render_markdown_table(&headers, &rows))
}

/// Render a header row, an alignment row and the data rows.
///
/// The result has no trailing newline.
pub fn render_markdown_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(markdown_row(headers));
    lines.push(markdown_row(&vec!["---".to_string(); headers.len()]));
    for row in rows {
        lines.push(markdown_row(row));
    }
    lines.join("\n")
}

fn markdown_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

fn clean_cell(cell: &str) -> String {
    cell.trim()
        .replace("\r\n", " ")
        .replace('\n', " ")
        .replace('|', "\\|")
}

fn malformed(name: &str, reason: String) -> AppError {
    AppError::MalformedTabularData {
        path: name.to_string(),
        reason,
    }
}
