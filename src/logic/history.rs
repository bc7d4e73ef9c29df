use crate::models::layout::FarmGrid;

/// Linear undo/redo log of full grid snapshots.
///
/// Holds at least one snapshot at all times; `index` always points at a valid
/// entry. Entries after `index` are the redo future and are discarded as soon as
/// a new snapshot is committed.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    entries: Vec<FarmGrid>,
    index: usize,
}

impl HistoryStack {
    pub fn new(initial: FarmGrid) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    /// Appends `grid` after the current entry, dropping any redo future.
    pub fn commit(&mut self, grid: FarmGrid) {
        self.entries.truncate(self.index + 1);
        self.entries.push(grid);
        self.index = self.entries.len() - 1;
    }

    /// Steps back one entry. Returns false at the oldest entry.
    pub fn undo(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Steps forward one entry. Returns false at the newest entry.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn current(&self) -> &FarmGrid {
        &self.entries[self.index]
    }

    /// Replaces the whole log with a single entry.
    pub fn reset(&mut self, initial: FarmGrid) {
        self.entries.clear();
        self.entries.push(initial);
        self.index = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{plant::PlantTemplate, Coordinate};

    /// Distinct grids: `grid(n)` has `n` occupied plots on the first row.
    fn grid(n: usize) -> FarmGrid {
        let plant = PlantTemplate::default().validate().unwrap();
        (0..n).fold(FarmGrid::empty(4, 8), |g, c| {
            g.with_cell(Coordinate::new(0, c), Some(plant.clone()))
        })
    }

    #[test]
    fn test_new_has_single_entry() {
        let history = HistoryStack::new(grid(0));
        assert_eq!(history.len(), 1);
        assert_eq!(history.index(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_commit_advances() {
        let mut history = HistoryStack::new(grid(0));
        history.commit(grid(1));
        history.commit(grid(2));
        assert_eq!(history.len(), 3);
        assert_eq!(history.index(), 2);
        assert_eq!(history.current(), &grid(2));
    }

    #[test]
    fn test_undo_at_start_is_noop() {
        let mut history = HistoryStack::new(grid(0));
        assert!(!history.undo());
        assert_eq!(history.index(), 0);
        assert_eq!(history.current(), &grid(0));
    }

    #[test]
    fn test_redo_at_end_is_noop() {
        let mut history = HistoryStack::new(grid(0));
        history.commit(grid(1));
        assert!(!history.redo());
        assert_eq!(history.current(), &grid(1));
    }

    #[test]
    fn test_undo_then_redo() {
        let mut history = HistoryStack::new(grid(0));
        history.commit(grid(1));
        history.commit(grid(2));
        assert!(history.undo());
        assert_eq!(history.current(), &grid(1));
        assert!(history.redo());
        assert_eq!(history.current(), &grid(2));
    }

    #[test]
    fn test_commit_after_undo_drops_redo_branch() {
        let mut history = HistoryStack::new(grid(0));
        history.commit(grid(1));
        history.commit(grid(2));
        history.undo();
        history.undo();
        assert_eq!(history.index(), 0);

        history.commit(grid(3));
        assert_eq!(history.len(), 2);
        assert_eq!(history.index(), 1);
        assert_eq!(history.current(), &grid(3));
        assert!(!history.redo());
        assert!(history.undo());
        assert_eq!(history.current(), &grid(0));
    }

    #[test]
    fn test_reset_discards_everything() {
        let mut history = HistoryStack::new(grid(0));
        history.commit(grid(1));
        history.commit(grid(2));
        history.undo();
        history.reset(grid(5));
        assert_eq!(history.len(), 1);
        assert_eq!(history.index(), 0);
        assert_eq!(history.current(), &grid(5));
        assert!(!history.undo());
        assert!(!history.redo());
    }

    /// Replays a scripted mix of commits and moves against a model that only
    /// keeps the surviving commits, and checks both agree at every step.
    #[test]
    fn test_interleaved_operations_match_model() {
        enum Op {
            Commit(usize),
            Undo,
            Redo,
        }
        let script = [
            Op::Commit(1),
            Op::Commit(2),
            Op::Undo,
            Op::Redo,
            Op::Redo,
            Op::Undo,
            Op::Undo,
            Op::Undo,
            Op::Commit(3),
            Op::Commit(4),
            Op::Undo,
            Op::Commit(5),
            Op::Redo,
            Op::Undo,
            Op::Undo,
            Op::Redo,
        ];

        let mut history = HistoryStack::new(grid(0));
        let mut model: Vec<usize> = vec![0];
        let mut pos = 0usize;

        for op in script {
            match op {
                Op::Commit(n) => {
                    history.commit(grid(n));
                    model.truncate(pos + 1);
                    model.push(n);
                    pos = model.len() - 1;
                }
                Op::Undo => {
                    history.undo();
                    pos = pos.saturating_sub(1);
                }
                Op::Redo => {
                    history.redo();
                    if pos + 1 < model.len() {
                        pos += 1;
                    }
                }
            }
            assert_eq!(history.current(), &grid(model[pos]));
            assert_eq!(history.len(), model.len());
            assert_eq!(history.index(), pos);
        }
    }
}
