//! Delimiter parity state threaded through the normalizer's scan.

/// Parity counters for one open array/tabular-like environment.
#[derive(Debug, Default, Clone)]
struct Frame {
    single: u32,
    double: u32,
}

/// Stack of environment frames, one per open `table`/`tabular` environment.
///
/// The root frame (document-level math) always exists and is never popped.
/// Each frame keeps independent parity counters for single- and
/// double-dollar occurrences, so delimiters opened outside an environment
/// are not closed by dollars inside it.
#[derive(Debug, Default)]
pub struct DollarTracker {
    root: Frame,
    nested: Vec<Frame>,
}

impl DollarTracker {
    pub fn new() -> DollarTracker {
        DollarTracker::default()
    }

    /// Enter a tracked environment.
    pub fn push_frame(&mut self) {
        self.nested.push(Frame::default());
    }

    /// Leave a tracked environment; the root frame stays.
    pub fn pop_frame(&mut self) {
        self.nested.pop();
    }

    /// Nesting depth including the root frame.
    pub fn depth(&self) -> usize {
        self.nested.len() + 1
    }

    fn current_mut(&mut self) -> &mut Frame {
        self.nested.last_mut().unwrap_or(&mut self.root)
    }

    /// Record a single-dollar occurrence; `true` when it opens a region.
    pub fn bump_single(&mut self) -> bool {
        let frame = self.current_mut();
        let opens = frame.single % 2 == 0;
        frame.single += 1;
        opens
    }

    /// Record a double-dollar occurrence; `true` when it opens a region.
    pub fn bump_double(&mut self) -> bool {
        let frame = self.current_mut();
        let opens = frame.double % 2 == 0;
        frame.double += 1;
        opens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity_alternates_per_frame() {
        let mut tracker = DollarTracker::new();
        assert!(tracker.bump_single());
        assert!(!tracker.bump_single());
        assert!(tracker.bump_single());

        // Double-dollar parity is independent.
        assert!(tracker.bump_double());
    }

    #[test]
    fn test_nested_frame_has_fresh_parity() {
        let mut tracker = DollarTracker::new();
        assert!(tracker.bump_single()); // open at document level
        tracker.push_frame();
        assert!(tracker.bump_single()); // opens inside the environment
        assert!(!tracker.bump_single());
        tracker.pop_frame();
        assert!(!tracker.bump_single()); // closes the document-level region
    }

    #[test]
    fn test_root_frame_never_popped() {
        let mut tracker = DollarTracker::new();
        tracker.pop_frame();
        tracker.pop_frame();
        assert_eq!(tracker.depth(), 1);
        assert!(tracker.bump_single());
    }
}
