use serde::{Deserialize, Serialize};

/// A keyboard movement of the active cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    /// Right, wrapping to the first column of the next row.
    Tab,
    /// Shift+Tab: left, wrapping to the last column of the previous row.
    BackTab,
    /// Down one row in the same column.
    Enter,
    /// Shift+Enter: up one row in the same column.
    ShiftEnter,
}

impl Direction {
    /// Arrow keys are the only moves that do nothing at an edge. The others still re-select the
    /// active cell.
    pub(crate) fn is_arrow(self) -> bool {
        matches!(
            self,
            Direction::Up | Direction::Down | Direction::Left | Direction::Right
        )
    }
}

/// A key press the grid reacts to.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Key {
    Delete,
    Move(Direction),
}

/// The region a drag-fill gesture writes to.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// Every cell in the rectangle between the start and end cells.
    #[default]
    Rectangle,
    /// Only the start cell's column, between the start and end rows.
    Column,
}

serde_plain::derive_display_from_serialize!(FillMode);
serde_plain::derive_fromstr_from_deserialize!(FillMode);

/// What the editor is doing right now.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub enum EditorState {
    #[default]
    Idle,
    /// The pointer is held down over cells.
    Selecting,
    /// The fill handle is being dragged.
    Filling,
    /// A bulk save request is in flight.
    Saving,
}
