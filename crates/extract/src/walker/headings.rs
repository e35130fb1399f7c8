//! Heading breadcrumb stack.

/// Texts of the currently open headings, outermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingStack {
    open: Vec<String>,
}

impl HeadingStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>) {
        self.open.push(text.into());
    }

    /// Close every heading deeper than `depth`.
    pub fn truncate_to(&mut self, depth: usize) {
        self.open.truncate(depth);
    }

    /// Open a heading at `level`, given the level of the previous heading.
    ///
    /// A strictly deeper level nests under the current breadcrumb. Any
    /// other transition (sibling, ancestor, or first heading) keeps only
    /// the `level - 1` outermost entries before pushing.
    pub fn enter(&mut self, text: impl Into<String>, level: u8, previous: Option<u8>) {
        match previous {
            Some(last) if last < level => {}
            _ => self.truncate_to(usize::from(level.saturating_sub(1))),
        }
        self.push(text);
    }

    /// Owned copy of the breadcrumb.
    pub fn snapshot(&self) -> Vec<String> {
        self.open.clone()
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(headings: &[(&str, u8)]) -> HeadingStack {
        let mut stack = HeadingStack::new();
        let mut previous = None;
        for (text, level) in headings {
            stack.enter(*text, *level, previous);
            previous = Some(*level);
        }
        stack
    }

    #[test]
    fn test_increasing_levels_nest() {
        let stack = walk(&[("A", 1), ("B", 2), ("C", 3), ("D", 4)]);
        assert_eq!(stack.as_slice(), ["A", "B", "C", "D"]);
    }

    #[test]
    fn test_sibling_replaces_deeper_levels() {
        let stack = walk(&[("A", 1), ("B", 2), ("C", 3), ("B2", 2)]);
        assert_eq!(stack.as_slice(), ["A", "B2"]);
    }

    #[test]
    fn test_same_level_replaces() {
        let stack = walk(&[("A", 1), ("A2", 1)]);
        assert_eq!(stack.as_slice(), ["A2"]);
    }

    #[test]
    fn test_skipped_level_nests_one_deep() {
        // H1 -> H3 pushes once; the breadcrumb depth is 2, not 3
        let stack = walk(&[("A", 1), ("C", 3)]);
        assert_eq!(stack.as_slice(), ["A", "C"]);

        let stack = walk(&[("A", 1), ("C", 3), ("B", 2)]);
        assert_eq!(stack.as_slice(), ["A", "B"]);
    }

    #[test]
    fn test_first_heading_below_top_level() {
        let stack = walk(&[("Deep", 3)]);
        assert_eq!(stack.as_slice(), ["Deep"]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut stack = walk(&[("A", 1)]);
        let snapshot = stack.snapshot();
        stack.enter("B", 1, Some(1));
        assert_eq!(snapshot, vec!["A".to_string()]);
        assert_eq!(stack.depth(), 1);
    }
}
