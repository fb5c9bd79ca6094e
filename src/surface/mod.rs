//! The capability interface between the grid editor and whatever draws the cells.
//!
//! The editor reads and writes cells only through `CellSurface`, so the same editor can drive a
//! real widget tree or the in-memory `MemoryGrid` used by the command line and by tests.

mod memory;
mod notifier;

use crate::model::{RowCol, Tone};

pub use memory::MemoryGrid;
pub use notifier::{LogNotifier, Notifier, RecordingNotifier};

/// What sort of control a cell holds.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum CellKind {
    /// A drop-down. Only values in the cell's option list (or `""`) are accepted.
    Select,
    Date,
    Amount,
    Text,
    /// The per-row delete button. Holds no value.
    Action,
}

/// Visual state derived from the editor's selection and fill state.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub struct CellMarks {
    pub active: bool,
    pub selected: bool,
    pub filling: bool,
}

/// A snapshot of one cell.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Cell {
    pub kind: CellKind,
    pub value: String,
    /// Option values for `Select` cells, including the leading empty option.
    pub options: Vec<String>,
    pub tone: Tone,
    pub marks: CellMarks,
}

impl Cell {
    pub(crate) fn new(kind: CellKind) -> Self {
        Self {
            kind,
            value: String::new(),
            options: Vec::new(),
            tone: Tone::Neutral,
            marks: CellMarks::default(),
        }
    }

    pub(crate) fn select<S: Into<String>>(options: impl IntoIterator<Item = S>) -> Self {
        let mut cell = Self::new(CellKind::Select);
        cell.options = std::iter::once(String::new())
            .chain(options.into_iter().map(Into::into))
            .collect();
        cell
    }

    /// Whether `value` may be stored in this cell.
    pub fn accepts(&self, value: &str) -> bool {
        match self.kind {
            CellKind::Select => value.is_empty() || self.options.iter().any(|o| o == value),
            CellKind::Action => false,
            CellKind::Date | CellKind::Amount | CellKind::Text => true,
        }
    }
}

/// Cell access for the grid editor. Coordinates are zero-based; out-of-bounds reads return `None`
/// and out-of-bounds writes are ignored.
pub trait CellSurface {
    /// The number of rows currently rendered.
    fn row_count(&self) -> usize;

    /// A snapshot of the cell at `at`.
    fn cell(&self, at: RowCol) -> Option<Cell>;

    /// The value of the cell at `at`.
    fn value(&self, at: RowCol) -> Option<String> {
        self.cell(at).map(|c| c.value)
    }

    /// Writes `value` into the cell at `at`. Returns false when nothing was written, either
    /// because the cell does not exist or because it does not accept the value.
    fn set_value(&mut self, at: RowCol, value: &str) -> bool;

    /// Moves input focus to the cell at `at`.
    fn focus(&mut self, at: RowCol);

    /// The cell that currently has input focus.
    fn focused(&self) -> Option<RowCol>;

    /// Appends one blank row and returns its index.
    fn append_row(&mut self) -> usize;

    /// Removes the row at `row`. Returns false when there is no such row.
    fn remove_row(&mut self, row: usize) -> bool;

    /// Removes every row.
    fn clear_rows(&mut self);

    /// Sets the 1-based number shown in the row header.
    fn set_row_number(&mut self, row: usize, number: usize);

    /// The number shown in the row header.
    fn row_number(&self, row: usize) -> Option<usize>;

    /// Replaces the options of a select cell. The leading empty option is added by the surface.
    fn set_options(&mut self, at: RowCol, options: &[String]);

    fn set_tone(&mut self, at: RowCol, tone: Tone);

    fn set_marks(&mut self, at: RowCol, marks: CellMarks);
}
