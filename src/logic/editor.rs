use std::collections::BTreeSet;

use log::debug;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::EditorError,
    logic::history::HistoryStack,
    models::{
        layout::{clamp_dimension, FarmGrid},
        plant::PlantTemplate,
        Coordinate,
    },
};

pub const DEFAULT_ROWS: usize = 8;
pub const DEFAULT_COLS: usize = 12;

/// What a click on a plot means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    #[default]
    Add,
    Remove,
    Select,
}

/// Occupied plots picked for a bulk delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet(BTreeSet<Coordinate>);

impl SelectionSet {
    /// Flips membership; returns true when `at` is now selected.
    pub fn toggle(&mut self, at: Coordinate) -> bool {
        if self.0.remove(&at) {
            false
        } else {
            self.0.insert(at);
            true
        }
    }

    pub fn contains(&self, at: Coordinate) -> bool {
        self.0.contains(&at)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coordinate> {
        self.0.iter()
    }

    /// Drops coordinates whose plot is empty in `grid`.
    pub fn retain_occupied(&mut self, grid: &FarmGrid) {
        self.0.retain(|at| grid.is_occupied(*at));
    }
}

/// A destructive action waiting for the user to confirm it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum PendingAction {
    RemoveCell { row: usize, col: usize },
    BulkDelete { count: usize, cells: Vec<Coordinate> },
}

/// Result of clicking a plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ClickOutcome {
    Placed,
    ConfirmationRequired { pending: PendingAction },
    Selected,
    Deselected,
    NoOp,
}

/// Editing state of one farm layout: snapshot history, current mode, the
/// bulk-delete selection, the plant template used in Add mode and at most one
/// pending confirmation. Any editor action other than `confirm` drops a
/// pending confirmation.
#[derive(Debug, Clone)]
pub struct LayoutEditor {
    history: HistoryStack,
    mode: EditorMode,
    selection: SelectionSet,
    template: PlantTemplate,
    pending: Option<PendingAction>,
}

impl Default for LayoutEditor {
    fn default() -> Self {
        Self::new(FarmGrid::empty(DEFAULT_ROWS, DEFAULT_COLS))
    }
}

impl LayoutEditor {
    pub fn new(grid: FarmGrid) -> Self {
        Self {
            history: HistoryStack::new(grid),
            mode: EditorMode::default(),
            selection: SelectionSet::default(),
            template: PlantTemplate::default(),
            pending: None,
        }
    }

    pub fn grid(&self) -> &FarmGrid {
        self.history.current()
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn template(&self) -> &PlantTemplate {
        &self.template
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    pub fn set_mode(&mut self, mode: EditorMode) {
        debug!("editor mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.selection.clear();
        self.pending = None;
    }

    /// Stores the template as given; it is only validated when placing a plant.
    pub fn set_template(&mut self, template: PlantTemplate) {
        self.template = template;
        self.pending = None;
    }

    /// Resizes the grid to the clamped dimensions. The resized grid becomes the
    /// only history entry, so edits made before a resize can no longer be undone.
    /// Returns the dimensions actually applied.
    pub fn set_dimensions(&mut self, rows: usize, cols: usize) -> (usize, usize) {
        let rows = clamp_dimension(rows);
        let cols = clamp_dimension(cols);
        self.pending = None;
        let current = self.grid();
        if current.rows() == rows && current.cols() == cols {
            return (rows, cols);
        }
        debug!(
            "resizing grid {}x{} -> {rows}x{cols}",
            current.rows(),
            current.cols()
        );
        let resized = current.resize(rows, cols);
        self.history.reset(resized);
        self.selection.clear();
        (rows, cols)
    }

    /// Replaces the layout with a freshly loaded grid. Not undoable.
    pub fn load(&mut self, grid: FarmGrid) {
        self.history.reset(grid);
        self.selection.clear();
        self.pending = None;
    }

    pub fn click_cell(&mut self, row: usize, col: usize) -> Result<ClickOutcome, EditorError> {
        self.pending = None;
        let at = Coordinate::new(row, col);
        let grid = self.grid();
        if !grid.contains(at) {
            return Ok(ClickOutcome::NoOp);
        }
        let occupied = grid.is_occupied(at);

        let outcome = match (self.mode, occupied) {
            (EditorMode::Add, false) => {
                let plant = self.template.validate()?;
                let next = self.grid().with_cell(at, Some(plant));
                self.history.commit(next);
                ClickOutcome::Placed
            }
            (EditorMode::Remove, true) => {
                let pending = PendingAction::RemoveCell { row, col };
                self.pending = Some(pending.clone());
                ClickOutcome::ConfirmationRequired { pending }
            }
            (EditorMode::Select, true) => {
                if self.selection.toggle(at) {
                    ClickOutcome::Selected
                } else {
                    ClickOutcome::Deselected
                }
            }
            _ => ClickOutcome::NoOp,
        };
        debug!("click ({row}, {col}) in {:?} mode -> {outcome:?}", self.mode);
        Ok(outcome)
    }

    /// Asks to clear every selected plot in one step.
    pub fn request_bulk_delete(&mut self) -> Result<PendingAction, EditorError> {
        self.pending = None;
        if self.selection.is_empty() {
            return Err(EditorError::EmptySelection);
        }
        let cells: Vec<Coordinate> = self.selection.iter().copied().collect();
        let pending = PendingAction::BulkDelete {
            count: cells.len(),
            cells,
        };
        self.pending = Some(pending.clone());
        Ok(pending)
    }

    /// Applies the pending action, if any, and returns it.
    pub fn confirm(&mut self) -> Option<PendingAction> {
        let pending = self.pending.take()?;
        match &pending {
            PendingAction::RemoveCell { row, col } => {
                let at = Coordinate::new(*row, *col);
                if self.grid().is_occupied(at) {
                    let next = self.grid().with_cell(at, None);
                    self.history.commit(next);
                }
                self.selection.retain_occupied(self.history.current());
            }
            PendingAction::BulkDelete { cells, .. } => {
                let next = self.grid().with_cleared(cells);
                self.history.commit(next);
                self.selection.clear();
            }
        }
        debug!("confirmed {pending:?}");
        Some(pending)
    }

    pub fn cancel(&mut self) -> Option<PendingAction> {
        self.pending.take()
    }

    pub fn undo(&mut self) -> bool {
        self.pending = None;
        let moved = self.history.undo();
        if moved {
            self.selection.retain_occupied(self.history.current());
        }
        moved
    }

    pub fn redo(&mut self) -> bool {
        self.pending = None;
        let moved = self.history.redo();
        if moved {
            self.selection.retain_occupied(self.history.current());
        }
        moved
    }
}
