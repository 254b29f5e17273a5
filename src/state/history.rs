// Bounded undo/redo list of board snapshots.
use crate::model::Snapshot;
use crate::settings::HISTORY_LIMIT;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: Vec<Snapshot>,
    /// Index of the entry matching the current board, `None` before init.
    cursor: Option<usize>,
}

impl History {
    pub fn new(initial: Snapshot) -> Self {
        let mut history = Self::default();
        history.init(initial);
        history
    }

    pub fn init(&mut self, initial: Snapshot) {
        self.entries = vec![initial];
        self.cursor = Some(0);
    }

    /// Append a snapshot after the cursor, dropping any redo branch.
    /// Returns false when it equals the current entry.
    pub fn record(&mut self, snapshot: Snapshot) -> bool {
        let Some(cursor) = self.cursor else {
            self.init(snapshot);
            return true;
        };
        if self.entries.get(cursor) == Some(&snapshot) {
            return false;
        }
        self.entries.truncate(cursor + 1);
        self.entries.push(snapshot);
        if self.entries.len() > HISTORY_LIMIT {
            self.entries.remove(0);
        } else {
            self.cursor = Some(cursor + 1);
        }
        true
    }

    pub fn undo(&mut self) -> Option<&Snapshot> {
        let cursor = self.cursor.filter(|&c| c > 0)? - 1;
        self.cursor = Some(cursor);
        self.entries.get(cursor)
    }

    pub fn redo(&mut self) -> Option<&Snapshot> {
        let cursor = self.cursor? + 1;
        if cursor >= self.entries.len() {
            return None;
        }
        self.cursor = Some(cursor);
        self.entries.get(cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.get(self.cursor?)
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
