//! Structural path classification.
//!
//! Paths look like `//Document/Sect[2]/H2`, `//Document/Figure[3]` or
//! `//Document/L/LI/Lbl`. The role of an element is read from substrings
//! of its path, not from a parsed tree.

const HEADING_MARKER: &str = "/H";

/// Borrowed view of an element's structural path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementPath<'a>(&'a str);

impl<'a> ElementPath<'a> {
    pub fn new(path: &'a str) -> Self {
        Self(path)
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Whether the path contains a heading marker at all.
    pub fn has_heading_marker(&self) -> bool {
        self.0.contains(HEADING_MARKER)
    }

    /// Heading depth from the digit after the last `/H` marker.
    ///
    /// `//Document/Sect/H3[2]` is level 3. Returns `None` when there is
    /// no marker or the marker is not followed by a digit.
    pub fn heading_level(&self) -> Option<u8> {
        if !self.has_heading_marker() {
            return None;
        }
        let tail = self.0.rsplit(HEADING_MARKER).next()?;
        let digit = tail.chars().next()?.to_digit(10)?;
        u8::try_from(digit).ok()
    }

    pub fn is_figure(&self) -> bool {
        self.0.contains("Figure")
    }

    pub fn is_table(&self) -> bool {
        self.0.contains("Table")
    }

    /// List labels (bullets, numbers) that run inline with the next text.
    pub fn is_label(&self) -> bool {
        self.0.contains("Lbl")
    }
}
