//! Heading-scoped chunk reconstruction.
//!
//! The walker reads elements in document order and keeps a breadcrumb of
//! open headings. Body text accumulates under the current breadcrumb and
//! is flushed into a [`Chunk`] whenever a new heading arrives and once
//! more when the element stream runs out.
//!
//! Chunks are produced lazily: artifacts are only resolved when the
//! consumer pulls far enough to reach the element that references them.

mod headings;

pub use headings::HeadingStack;

use std::collections::BTreeMap;
use std::iter::FusedIterator;
use std::mem;

use structura_core::AppResult;

use crate::artifact::{ArtifactResolver, ArtifactSource};
use crate::types::{Chunk, Element};

/// Options that change how body elements are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Inline figure renditions as base64; when off, keep caption text
    pub embed_figures: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            embed_figures: true,
        }
    }
}

/// Accumulator for the section currently being built.
#[derive(Debug, Default)]
struct Section {
    headings: HeadingStack,
    paragraphs: Vec<String>,
    header_page: Option<u32>,
    paragraph_page: Option<u32>,
    last_header_level: Option<u8>,
    figures: BTreeMap<String, Vec<String>>,
}

impl Section {
    /// Emit the buffered content, if any, and reset the buffers.
    fn flush(&mut self) -> Option<Chunk> {
        if self.paragraphs.is_empty() {
            return None;
        }

        let content = mem::take(&mut self.paragraphs).concat().trim().to_string();
        let figures = mem::take(&mut self.figures);
        let page = self.header_page.or(self.paragraph_page).map(|p| p + 1);

        tracing::debug!(
            "Flushing chunk: depth={}, chars={}, figures={}",
            self.headings.depth(),
            content.len(),
            figures.values().map(Vec::len).sum::<usize>()
        );

        Some(Chunk {
            content,
            headers: self.headings.snapshot(),
            page,
            figures,
        })
    }
}

/// Lazy iterator of chunks over an element stream.
///
/// The walker owns its artifact source. Dropping the walker, whether
/// after exhaustion, an early stop or an error, drops the source with it.
/// After the first error no further chunks are produced.
pub struct StructureWalker<S> {
    elements: std::vec::IntoIter<Element>,
    resolver: ArtifactResolver<S>,
    options: WalkOptions,
    section: Section,
    emitted: usize,
    finished: bool,
}

impl<S: ArtifactSource> StructureWalker<S> {
    pub fn new(elements: Vec<Element>, source: S, options: WalkOptions) -> Self {
        Self {
            elements: elements.into_iter(),
            resolver: ArtifactResolver::new(source),
            options,
            section: Section::default(),
            emitted: 0,
            finished: false,
        }
    }

    /// Breadcrumb as it stands after the last processed element.
    pub fn current_headers(&self) -> &[String] {
        self.section.headings.as_slice()
    }

    /// Feed one element, returning a chunk if it closed a section.
    fn process(&mut self, element: Element) -> AppResult<Option<Chunk>> {
        let path = element.structural_path();

        if !element.text().is_empty() {
            if let Some(level) = path.heading_level() {
                if path.is_figure() {
                    // Heading-shaped figure captions never open a section
                    tracing::debug!("Skipping heading-shaped figure at {}", element.path);
                    return Ok(None);
                }

                let chunk = self.section.flush();
                let previous = self.section.last_header_level;
                self.section.headings.enter(element.text(), level, previous);
                self.section.last_header_level = Some(level);
                self.section.header_page = element.page;
                return Ok(chunk);
            }
        }

        self.section.paragraph_page = element.page;
        let has_refs = !element.file_paths.is_empty();

        if path.is_figure() && has_refs && self.options.embed_figures {
            for reference in &element.file_paths {
                let encoded = self.resolver.resolve_image(reference)?;
                self.section
                    .figures
                    .entry(element.path.clone())
                    .or_default()
                    .push(encoded);
                self.section.paragraphs.push(format!("{{{}}}\n", reference));
            }
        } else if path.is_figure() && !element.text().is_empty() && !self.options.embed_figures {
            self.section.paragraphs.push(format!("{}\n", element.text()));
        } else if path.is_table() && has_refs {
            for reference in &element.file_paths {
                let table = self.resolver.resolve_table(reference)?;
                self.section.paragraphs.push(format!("{}\n", table));
            }
        } else if path.is_label() {
            self.section.paragraphs.push(format!("{} ", element.text()));
        } else if !path.is_table() {
            self.section.paragraphs.push(format!("{}\n", element.text()));
        } else {
            tracing::debug!("Dropping table without renditions at {}", element.path);
        }

        Ok(None)
    }
}

impl<S: ArtifactSource> Iterator for StructureWalker<S> {
    type Item = AppResult<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        while let Some(element) = self.elements.next() {
            match self.process(element) {
                Ok(Some(chunk)) => {
                    self.emitted += 1;
                    return Some(Ok(chunk));
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Chunk reconstruction aborted: {}", e);
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }

        self.finished = true;
        let last = self.section.flush();
        if last.is_some() {
            self.emitted += 1;
        }
        tracing::info!("Structure walk complete: {} chunks", self.emitted);
        last.map(Ok)
    }
}

impl<S: ArtifactSource> FusedIterator for StructureWalker<S> {}
