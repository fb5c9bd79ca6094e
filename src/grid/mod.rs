//! The bulk-entry grid: a spreadsheet-like editor over a fixed set of columns and a growable list
//! of rows.
//!
//! `GridEditor` owns the selection, fill and save state. Cell values live in the `CellSurface` it
//! wraps, and the visual marks on each cell (active, selected, filling) are derived from the
//! editor's state and pushed to the surface after every change.

mod keys;

use crate::api::Backend;
use crate::error::{ApiError, SaveError, ValidationError};
use crate::model::{
    digits_only, format_amount, is_iso_date, strip_separators, Categories, CellRange, Column,
    RowCol, Tone, Transaction, TransactionType,
};
use crate::surface::{CellMarks, CellSurface, Notifier};
use tracing::{debug, info, trace, warn};

pub use keys::{Direction, EditorState, FillMode, Key};

/// A fill gesture in progress.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct Fill {
    start: RowCol,
    end: Option<RowCol>,
}

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
enum Gesture {
    #[default]
    Idle,
    Selecting,
    Filling(Fill),
}

/// The bulk-entry grid editor.
#[derive(Debug)]
pub struct GridEditor<S: CellSurface> {
    surface: S,
    categories: Categories,
    fill_mode: FillMode,
    /// The corner the selection grows from.
    anchor: Option<RowCol>,
    active: Option<RowCol>,
    selection: Option<CellRange>,
    gesture: Gesture,
    saving: bool,
}

impl<S: CellSurface> GridEditor<S> {
    /// Wraps `surface`, numbers its rows and, if it has any, activates the first cell.
    pub fn new(surface: S, categories: Categories, fill_mode: FillMode) -> Self {
        let mut editor = Self {
            surface,
            categories,
            fill_mode,
            anchor: None,
            active: None,
            selection: None,
            gesture: Gesture::Idle,
            saving: false,
        };
        editor.renumber();
        editor.set_active_cell(0, 0, false);
        editor
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn categories(&self) -> &Categories {
        &self.categories
    }

    pub fn fill_mode(&self) -> FillMode {
        self.fill_mode
    }

    pub fn row_count(&self) -> usize {
        self.surface.row_count()
    }

    /// The number of navigable columns.
    pub fn column_count(&self) -> usize {
        Column::EDITABLE
    }

    pub fn active_cell(&self) -> Option<RowCol> {
        self.active
    }

    pub fn anchor(&self) -> Option<RowCol> {
        self.anchor
    }

    pub fn selection(&self) -> Option<CellRange> {
        self.selection
    }

    /// The region the current fill gesture would write to, if the handle has been dragged over a
    /// cell.
    pub fn fill_range(&self) -> Option<CellRange> {
        match self.gesture {
            Gesture::Filling(Fill {
                start,
                end: Some(end),
            }) => Some(self.fill_region(start, end)),
            _ => None,
        }
    }

    pub fn state(&self) -> EditorState {
        if self.saving {
            return EditorState::Saving;
        }
        match self.gesture {
            Gesture::Idle => EditorState::Idle,
            Gesture::Selecting => EditorState::Selecting,
            Gesture::Filling(_) => EditorState::Filling,
        }
    }

    /// The value of the cell at (`row`, `col`).
    pub fn value(&self, row: usize, col: Column) -> Option<String> {
        self.surface.value(RowCol::new(row, col.index()))
    }

    fn in_bounds(&self, at: RowCol) -> bool {
        at.within(self.row_count(), self.column_count())
    }

    // ---------------------------------------------------------------------------------------------
    // Selection and navigation
    // ---------------------------------------------------------------------------------------------

    /// Moves focus to (`row`, `col`). Unless `keep_selection` is set, the selection collapses to
    /// that cell and it becomes the new anchor. Out-of-bounds coordinates are ignored and false is
    /// returned.
    pub fn set_active_cell(&mut self, row: usize, col: usize, keep_selection: bool) -> bool {
        let at = RowCol::new(row, col);
        if !self.in_bounds(at) {
            trace!("Ignoring out-of-bounds active cell {at}");
            return false;
        }
        if self.active != Some(at) {
            self.blur();
        }
        if !keep_selection {
            self.anchor = Some(at);
            self.selection = Some(CellRange::cell(at));
        }
        self.active = Some(at);
        if at.col() == Column::Amount.index() {
            let shown = self.surface.value(at).unwrap_or_default();
            self.surface.set_value(at, &digits_only(&shown));
        }
        self.surface.focus(at);
        self.render();
        true
    }

    /// Formats the active cell for display if it is an amount cell. Called when focus leaves it.
    pub fn blur(&mut self) {
        if let Some(at) = self.active {
            if at.col() == Column::Amount.index() {
                if let Some(value) = self.surface.value(at) {
                    self.surface.set_value(at, &format_amount(&value));
                }
            }
        }
    }

    /// Selects the bounding box of the anchor and (`row`, `col`).
    pub fn extend_selection(&mut self, row: usize, col: usize) -> bool {
        let at = RowCol::new(row, col);
        match self.anchor {
            Some(anchor) if self.in_bounds(at) => {
                self.selection = Some(CellRange::spanning(anchor, at));
                self.render();
                true
            }
            _ => false,
        }
    }

    /// Moves the active cell one step. Returns false if nothing moved.
    pub fn move_active_cell(&mut self, direction: Direction) -> bool {
        let Some(current) = self.active else {
            return false;
        };
        let target = self.step(current, direction);
        if target == current && direction.is_arrow() {
            return false;
        }
        self.set_active_cell(target.row(), target.col(), false)
    }

    /// The cell one `direction` step away from `from`, clamped to the grid.
    fn step(&self, from: RowCol, direction: Direction) -> RowCol {
        let last_row = self.row_count().saturating_sub(1);
        let last_col = self.column_count() - 1;
        let (row, col) = (from.row(), from.col());
        let (row, col) = match direction {
            Direction::Up | Direction::ShiftEnter => (row.saturating_sub(1), col),
            Direction::Down | Direction::Enter => ((row + 1).min(last_row), col),
            Direction::Left => (row, col.saturating_sub(1)),
            Direction::Right => (row, (col + 1).min(last_col)),
            Direction::Tab if col < last_col => (row, col + 1),
            Direction::Tab if row < last_row => (row + 1, 0),
            Direction::Tab => (row, col),
            Direction::BackTab if col > 0 => (row, col - 1),
            Direction::BackTab if row > 0 => (row - 1, last_col),
            Direction::BackTab => (row, col),
        };
        RowCol::new(row, col)
    }

    /// Handles a key press. Returns true if the grid changed.
    pub fn key_down(&mut self, key: Key) -> bool {
        match key {
            Key::Delete => self.delete_selection() > 0,
            Key::Move(direction) => self.move_active_cell(direction),
        }
    }

    /// Clears every cell in the selection. Rows are kept. Returns the number of cells cleared.
    pub fn delete_selection(&mut self) -> usize {
        let Some(selection) = self.selection else {
            return 0;
        };
        let cleared = selection
            .cells()
            .filter(|at| self.write_cell(*at, ""))
            .count();
        debug!("Cleared {cleared} cells");
        cleared
    }

    // ---------------------------------------------------------------------------------------------
    // Pointer gestures
    // ---------------------------------------------------------------------------------------------

    /// The pointer went down on a cell: start selecting from it. Cancels any fill gesture.
    pub fn pointer_down(&mut self, at: RowCol) -> bool {
        if !self.in_bounds(at) {
            return false;
        }
        self.gesture = Gesture::Selecting;
        self.set_active_cell(at.row(), at.col(), false)
    }

    /// The pointer moved over a cell while held down.
    pub fn pointer_over(&mut self, at: RowCol) -> bool {
        match self.gesture {
            Gesture::Selecting => self.extend_selection(at.row(), at.col()),
            Gesture::Filling(fill) if self.in_bounds(at) => {
                self.gesture = Gesture::Filling(Fill {
                    end: Some(at),
                    ..fill
                });
                self.render();
                true
            }
            _ => false,
        }
    }

    /// The pointer went down on the fill handle of the active cell. Cancels any selection gesture.
    pub fn fill_handle_down(&mut self) -> bool {
        match self.active {
            Some(start) => {
                self.gesture = Gesture::Filling(Fill { start, end: None });
                true
            }
            None => false,
        }
    }

    /// The pointer was released. Completes a fill gesture if the handle was dragged over a cell.
    /// Returns the number of cells filled.
    pub fn pointer_up(&mut self) -> usize {
        let gesture = std::mem::take(&mut self.gesture);
        let filled = match gesture {
            Gesture::Filling(Fill {
                start,
                end: Some(end),
            }) => self.drag_fill(start, end),
            _ => 0,
        };
        self.render();
        filled
    }

    // ---------------------------------------------------------------------------------------------
    // Bulk edits
    // ---------------------------------------------------------------------------------------------

    /// Writes a block of tab-separated lines starting at (`origin_row`, `origin_col`). Values that
    /// would land outside the grid are dropped; the grid never grows. Returns the number of cells
    /// written.
    pub fn paste_block(&mut self, text: &str, origin_row: usize, origin_col: usize) -> usize {
        let origin = RowCol::new(origin_row, origin_col);
        let mut lines: Vec<&str> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        // Clipboard text from spreadsheets ends with a line break.
        if lines.len() > 1 && lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        let mut written = 0;
        for (i, line) in lines.iter().enumerate() {
            for (j, value) in line.split('\t').enumerate() {
                let target = origin.offset(i, j);
                if self.in_bounds(target) && self.write_cell(target, value) {
                    written += 1;
                }
            }
        }
        debug!("Pasted {written} cells at {origin}");
        written
    }

    /// Copies the value of `start` into the fill region between `start` and `end`. Returns the
    /// number of cells written, not counting `start`.
    pub fn drag_fill(&mut self, start: RowCol, end: RowCol) -> usize {
        if !self.in_bounds(start) || !self.in_bounds(end) {
            return 0;
        }
        let value = self.surface.value(start).unwrap_or_default();
        let region = self.fill_region(start, end);
        let filled = region
            .cells()
            .filter(|at| *at != start)
            .filter(|at| self.write_cell(*at, &value))
            .count();
        debug!("Filled {filled} cells from {start} with '{value}'");
        filled
    }

    fn fill_region(&self, start: RowCol, end: RowCol) -> CellRange {
        match self.fill_mode {
            FillMode::Rectangle => CellRange::spanning(start, end),
            FillMode::Column => CellRange::spanning(start, RowCol::new(end.row(), start.col())),
        }
    }

    /// Handles text typed into a cell. Amount cells keep digits only and type cells update the
    /// row's categories.
    pub fn input(&mut self, at: RowCol, text: &str) -> bool {
        if !self.in_bounds(at) {
            return false;
        }
        if at.col() == Column::Amount.index() {
            return self.surface.set_value(at, &digits_only(text));
        }
        self.write_cell(at, text)
    }

    /// Writes a value the way a user edit would: a changed type triggers `on_type_changed` and
    /// amount cells are shown formatted unless they have focus.
    fn write_cell(&mut self, at: RowCol, value: &str) -> bool {
        match Column::from_index(at.col()) {
            Some(Column::Type) => {
                let ty = TransactionType::from_cell(value);
                if ty.is_none() && !value.trim().is_empty() {
                    return false;
                }
                let Some(current) = self.surface.value(at) else {
                    return false;
                };
                if TransactionType::from_cell(&current) == ty {
                    // Same type: the row's category stays as chosen.
                    return true;
                }
                self.on_type_changed(at.row(), ty)
            }
            Some(Column::Amount) => {
                let shown = if self.active == Some(at) {
                    digits_only(value)
                } else {
                    format_amount(value)
                };
                self.surface.set_value(at, &shown)
            }
            Some(col) if col.is_editable() => self.surface.set_value(at, value),
            _ => false,
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Rows
    // ---------------------------------------------------------------------------------------------

    /// Appends one blank row.
    pub fn add_row(&mut self) -> usize {
        let row = self.surface.append_row();
        self.renumber();
        self.clamp_cursor();
        row
    }

    /// Discards every row and creates `default_row_count` blank ones.
    pub fn reset_grid(&mut self, default_row_count: usize) {
        self.surface.clear_rows();
        for _ in 0..default_row_count {
            self.surface.append_row();
        }
        self.renumber();
        self.active = None;
        self.anchor = None;
        self.selection = None;
        self.gesture = Gesture::Idle;
        self.clamp_cursor();
        info!("Reset the grid to {default_row_count} rows");
    }

    /// Removes one row. Returns false when there is no such row.
    pub fn delete_row(&mut self, row: usize) -> bool {
        if !self.surface.remove_row(row) {
            return false;
        }
        self.renumber();
        self.clamp_cursor();
        true
    }

    /// Sets every row header to its 1-based position.
    fn renumber(&mut self) {
        for row in 0..self.row_count() {
            self.surface.set_row_number(row, row + 1);
        }
    }

    /// Keeps the anchor and active cell inside the grid after its rows changed.
    fn clamp_cursor(&mut self) {
        let rows = self.row_count();
        if rows == 0 {
            self.active = None;
            self.anchor = None;
            self.selection = None;
            self.gesture = Gesture::Idle;
            return;
        }
        match self.active {
            None => {
                self.set_active_cell(0, 0, false);
            }
            Some(active) if active.row() >= rows => {
                self.active = None;
                self.set_active_cell(rows - 1, active.col(), false);
            }
            Some(active) => {
                let anchor_ok = self.anchor.is_some_and(|a| self.in_bounds(a));
                if !anchor_ok {
                    self.set_active_cell(active.row(), active.col(), false);
                } else {
                    if let Gesture::Filling(fill) = self.gesture {
                        if !self.in_bounds(fill.start) {
                            self.gesture = Gesture::Idle;
                        }
                    }
                    self.render();
                }
            }
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Categories
    // ---------------------------------------------------------------------------------------------

    /// Sets the type of `row` and replaces its category options with the list for that type. The
    /// category resets to empty and the type control takes the type's tone. Returns false when the
    /// row does not exist.
    pub fn on_type_changed(&mut self, row: usize, new_type: Option<TransactionType>) -> bool {
        let options = self.categories.for_type(new_type).to_vec();
        self.apply_type(row, new_type, &options)
    }

    /// Like `on_type_changed` but asks the backend for the category list. If the request fails the
    /// configured list is used instead.
    pub async fn refresh_categories(
        &mut self,
        row: usize,
        new_type: TransactionType,
        backend: &dyn Backend,
    ) -> bool {
        let options = match backend.categories(new_type).await {
            Ok(entries) => entries.into_iter().map(|c| c.name).collect(),
            Err(e) => {
                warn!("Unable to fetch {new_type} categories, using the configured list: {e}");
                self.categories.for_type(Some(new_type)).to_vec()
            }
        };
        self.apply_type(row, Some(new_type), &options)
    }

    fn apply_type(&mut self, row: usize, ty: Option<TransactionType>, options: &[String]) -> bool {
        if row >= self.row_count() {
            return false;
        }
        let type_cell = RowCol::new(row, Column::Type.index());
        let category_cell = RowCol::new(row, Column::Category.index());
        let value = ty.map(|t| t.to_string()).unwrap_or_default();
        if !self.surface.set_value(type_cell, &value) {
            return false;
        }
        self.surface.set_tone(type_cell, Tone::for_type(ty));
        self.surface.set_options(category_cell, options);
        self.surface.set_value(category_cell, "");
        true
    }

    // ---------------------------------------------------------------------------------------------
    // Validation and saving
    // ---------------------------------------------------------------------------------------------

    /// Checks one row. Rows with neither a type nor an amount are not submitted and yield
    /// `Ok(None)`. Otherwise a type, an amount and a `YYYY-MM-DD` date are required, and the
    /// error names the first one missing.
    pub fn validate_row(&self, row: usize) -> Result<Option<Transaction>, ValidationError> {
        let get = |col: Column| self.value(row, col).unwrap_or_default();
        let type_value = get(Column::Type);
        let amount = strip_separators(get(Column::Amount).trim());
        if type_value.trim().is_empty() && amount.is_empty() {
            return Ok(None);
        }

        let ty = TransactionType::from_cell(&type_value)
            .ok_or_else(|| ValidationError::new(row, Column::Type, "Select a type"))?;
        if amount.is_empty() {
            return Err(ValidationError::new(row, Column::Amount, "Enter an amount"));
        }
        if !amount.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::new(
                row,
                Column::Amount,
                "The amount must be a whole number",
            ));
        }
        let date = get(Column::Date).trim().to_string();
        if !is_iso_date(&date) {
            return Err(ValidationError::new(
                row,
                Column::Date,
                "Enter a date as YYYY-MM-DD",
            ));
        }

        let mut transaction = Transaction::new(ty, date, amount);
        transaction.asset = get(Column::Asset);
        transaction.category = get(Column::Category);
        transaction.content = get(Column::Content);
        transaction.memo = get(Column::Memo);
        Ok(Some(transaction))
    }

    /// Builds the batch to submit, in row order. The first invalid row aborts the whole batch.
    pub fn collect_transactions(&self) -> Result<Vec<Transaction>, ValidationError> {
        let mut transactions = Vec::new();
        for row in 0..self.row_count() {
            if let Some(t) = self.validate_row(row)? {
                transactions.push(t);
            }
        }
        Ok(transactions)
    }

    /// First half of a save: collects the batch and marks the grid as saving. Fails when a save is
    /// already in flight, when a row is invalid, or when there is nothing to send.
    pub fn begin_save(&mut self) -> Result<Vec<Transaction>, SaveError> {
        if self.saving {
            return Err(SaveError::InFlight);
        }
        let transactions = self.collect_transactions()?;
        if transactions.is_empty() {
            return Err(SaveError::NothingToSave);
        }
        self.saving = true;
        Ok(transactions)
    }

    /// Second half of a save: records the outcome and returns the grid to idle. The grid contents
    /// are left untouched either way.
    pub fn finish_save(&mut self, outcome: Result<usize, ApiError>) -> Result<usize, SaveError> {
        self.saving = false;
        outcome.map_err(SaveError::from)
    }

    /// Validates the grid and submits it through `backend`. Every outcome is reported through
    /// `notifier`; on success the hosting view is reloaded.
    pub async fn save(
        &mut self,
        backend: &dyn Backend,
        notifier: &mut dyn Notifier,
    ) -> Result<usize, SaveError> {
        let transactions = match self.begin_save() {
            Ok(t) => t,
            Err(e) => {
                notifier.alert(&e.user_message());
                return Err(e);
            }
        };
        info!("Saving {} transactions", transactions.len());
        let outcome = backend
            .save_bulk(&transactions)
            .await
            .map(|_| transactions.len());
        match self.finish_save(outcome) {
            Ok(count) => {
                notifier.alert("Saved.");
                notifier.reload();
                Ok(count)
            }
            Err(e) => {
                warn!("Bulk save failed: {e}");
                notifier.alert(&e.user_message());
                Err(e)
            }
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Rendering
    // ---------------------------------------------------------------------------------------------

    /// Pushes the marks derived from the current state to every cell.
    fn render(&mut self) {
        let fill = self.fill_range();
        for row in 0..self.row_count() {
            for col in 0..self.column_count() {
                let at = RowCol::new(row, col);
                let marks = CellMarks {
                    active: self.active == Some(at),
                    selected: self.selection.is_some_and(|s| s.contains(at)),
                    filling: fill.is_some_and(|f| f.contains(at)),
                };
                self.surface.set_marks(at, marks);
            }
        }
    }
}

#[cfg(test)]
mod tests;
