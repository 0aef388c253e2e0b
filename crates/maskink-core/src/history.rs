//! Linear undo/redo over full document snapshots.

use crate::document::Document;

/// Snapshot history with a cursor into a linear entry list.
///
/// Entries strictly before the cursor are undo-able, entries after it are
/// redo-able; a new snapshot truncates the redo branch first, so the history
/// never branches. Entry 0 is the baseline: the document state at editor
/// creation, which makes the very first committed mutation undoable while
/// `undo` stays a strict no-op at the baseline itself.
///
/// Entries are full deep copies, decoupling captured past states from the
/// live document; stored entries are never mutated. Depth is unbounded.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Document>,
    cursor: usize,
}

impl History {
    /// Create a history seeded with a baseline snapshot of `initial`.
    pub fn new(initial: &Document) -> Self {
        Self {
            entries: vec![initial.clone()],
            cursor: 0,
        }
    }

    /// Capture the document after a committed mutation: truncate the redo
    /// branch, append a deep copy, and move the cursor onto it.
    pub fn snapshot(&mut self, document: &Document) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(document.clone());
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one entry and return a copy of it for the live document.
    /// `None` at the baseline.
    pub fn undo(&mut self) -> Option<Document> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Step forward one entry and return a copy of it for the live
    /// document. `None` at the newest entry.
    pub fn redo(&mut self) -> Option<Document> {
        if self.cursor == self.entries.len() - 1 {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].clone())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len() - 1
    }

    /// Number of entries, baseline included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{ClassDefinition, ClassPalette};

    fn palette() -> ClassPalette {
        ClassPalette::from_classes(vec![
            ClassDefinition::from_hex(1, "cat", "#FF0000").unwrap(),
        ])
    }

    #[test]
    fn test_baseline_blocks_undo() {
        let doc = Document::new();
        let mut history = History::new(&doc);

        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_undo_restores_previous_entry() {
        let palette = palette();
        let mut doc = Document::new();
        let mut history = History::new(&doc);

        doc.create_layer(&palette, 1).unwrap();
        history.snapshot(&doc);

        let restored = history.undo().unwrap();
        assert!(restored.is_empty());

        let redone = history.redo().unwrap();
        assert_eq!(redone.len(), 1);
    }

    #[test]
    fn test_snapshot_truncates_redo_branch() {
        let palette = palette();
        let mut doc = Document::new();
        let mut history = History::new(&doc);

        doc.create_layer(&palette, 1).unwrap();
        history.snapshot(&doc);
        doc.create_layer(&palette, 1).unwrap();
        history.snapshot(&doc);
        assert_eq!(history.len(), 3);

        doc = history.undo().unwrap();
        assert_eq!(doc.len(), 1);
        doc = history.undo().unwrap();
        assert!(doc.is_empty());

        doc.create_layer(&palette, 1).unwrap();
        history.snapshot(&doc);

        // The discarded future branch is unreachable.
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
        assert_eq!(history.len(), history.cursor() + 1);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_snapshots_are_decoupled_from_live_document() {
        let palette = palette();
        let mut doc = Document::new();
        let mut history = History::new(&doc);

        doc.create_layer(&palette, 1).unwrap();
        history.snapshot(&doc);

        // Mutating the live document must not leak into the stored entry.
        doc.create_layer(&palette, 1).unwrap();
        let restored = history.undo().unwrap();
        assert!(restored.is_empty());
        let redone = history.redo().unwrap();
        assert_eq!(redone.len(), 1);
    }
}
