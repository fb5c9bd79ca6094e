//! Implements `CellSurface` with plain vectors.
//!
//! Note: this is compiled even in the "production" version of this app so that the command line
//! can drive a grid without any widget toolkit.

use crate::model::{Column, RowCol, Tone, ASSETS};
use crate::surface::{Cell, CellKind, CellMarks, CellSurface};

/// An in-memory grid. Every row always holds exactly one cell per `Column`.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct MemoryGrid {
    rows: Vec<MemoryRow>,
    focused: Option<RowCol>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
struct MemoryRow {
    number: usize,
    cells: Vec<Cell>,
}

impl MemoryRow {
    fn blank() -> Self {
        let cells = Column::ALL
            .iter()
            .map(|col| match col {
                Column::Type => Cell::select(["income", "expense"]),
                Column::Date => Cell::new(CellKind::Date),
                Column::Asset => Cell::select(ASSETS),
                Column::Category => Cell::select(Vec::<String>::new()),
                Column::Amount => Cell::new(CellKind::Amount),
                Column::Content | Column::Memo => Cell::new(CellKind::Text),
                Column::Actions => Cell::new(CellKind::Action),
            })
            .collect();
        Self { number: 0, cells }
    }
}

impl MemoryGrid {
    /// Creates a grid with `rows` blank rows. Row numbers are left at zero; the editor numbers
    /// rows when it takes ownership.
    pub fn new(rows: usize) -> Self {
        Self {
            rows: (0..rows).map(|_| MemoryRow::blank()).collect(),
            focused: None,
        }
    }

    fn cell_mut(&mut self, at: RowCol) -> Option<&mut Cell> {
        self.rows.get_mut(at.row())?.cells.get_mut(at.col())
    }

    fn cell_ref(&self, at: RowCol) -> Option<&Cell> {
        self.rows.get(at.row())?.cells.get(at.col())
    }

    /// The values of one row, in column order.
    pub fn row_values(&self, row: usize) -> Option<Vec<String>> {
        self.rows
            .get(row)
            .map(|r| r.cells.iter().map(|c| c.value.clone()).collect())
    }
}

impl CellSurface for MemoryGrid {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cell(&self, at: RowCol) -> Option<Cell> {
        self.cell_ref(at).cloned()
    }

    fn value(&self, at: RowCol) -> Option<String> {
        self.cell_ref(at).map(|c| c.value.clone())
    }

    fn set_value(&mut self, at: RowCol, value: &str) -> bool {
        match self.cell_mut(at) {
            Some(cell) if cell.accepts(value) => {
                cell.value = value.to_string();
                true
            }
            _ => false,
        }
    }

    fn focus(&mut self, at: RowCol) {
        if self.cell_ref(at).is_some() {
            self.focused = Some(at);
        }
    }

    fn focused(&self) -> Option<RowCol> {
        self.focused
    }

    fn append_row(&mut self) -> usize {
        self.rows.push(MemoryRow::blank());
        self.rows.len() - 1
    }

    fn remove_row(&mut self, row: usize) -> bool {
        if row >= self.rows.len() {
            return false;
        }
        self.rows.remove(row);
        self.focused = match self.focused {
            Some(f) if f.row() == row => None,
            Some(f) if f.row() > row => Some(RowCol::new(f.row() - 1, f.col())),
            other => other,
        };
        true
    }

    fn clear_rows(&mut self) {
        self.rows.clear();
        self.focused = None;
    }

    fn set_row_number(&mut self, row: usize, number: usize) {
        if let Some(r) = self.rows.get_mut(row) {
            r.number = number;
        }
    }

    fn row_number(&self, row: usize) -> Option<usize> {
        self.rows.get(row).map(|r| r.number)
    }

    fn set_options(&mut self, at: RowCol, options: &[String]) {
        if let Some(cell) = self.cell_mut(at) {
            if cell.kind != CellKind::Select {
                return;
            }
            cell.options = std::iter::once(String::new())
                .chain(options.iter().cloned())
                .collect();
            if !cell.options.contains(&cell.value) {
                cell.value.clear();
            }
        }
    }

    fn set_tone(&mut self, at: RowCol, tone: Tone) {
        if let Some(cell) = self.cell_mut(at) {
            cell.tone = tone;
        }
    }

    fn set_marks(&mut self, at: RowCol, marks: CellMarks) {
        if let Some(cell) = self.cell_mut(at) {
            cell.marks = marks;
        }
    }
}
