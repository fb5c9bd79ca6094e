use serde::{Deserialize, Serialize};

/// The fixed columns of the bulk-entry grid, in display order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Type,
    Date,
    Asset,
    Category,
    Amount,
    Content,
    Memo,
    /// Holds the row's delete control. It never carries a value and navigation skips it.
    Actions,
}

serde_plain::derive_display_from_serialize!(Column);
serde_plain::derive_fromstr_from_deserialize!(Column);

impl Column {
    /// Every column, in display order.
    pub const ALL: [Column; 8] = [
        Column::Type,
        Column::Date,
        Column::Asset,
        Column::Category,
        Column::Amount,
        Column::Content,
        Column::Memo,
        Column::Actions,
    ];

    /// The number of columns that hold values. These come first, so column indices
    /// `0..EDITABLE` are the editable ones.
    pub const EDITABLE: usize = 7;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(ix: usize) -> Option<Column> {
        Self::ALL.get(ix).copied()
    }

    pub fn is_editable(self) -> bool {
        self.index() < Self::EDITABLE
    }

    /// The label used in validation messages.
    pub fn label(self) -> &'static str {
        match self {
            Column::Type => "Type",
            Column::Date => "Date",
            Column::Asset => "Asset",
            Column::Category => "Category",
            Column::Amount => "Amount",
            Column::Content => "Content",
            Column::Memo => "Memo",
            Column::Actions => "Actions",
        }
    }
}
