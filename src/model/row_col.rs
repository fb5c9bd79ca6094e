use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The address of a single grid cell as zero-based (row, column) indices.
/// Serializes to a string like "(0, 1)".
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RowCol(pub usize, pub usize);

impl RowCol {
    pub const fn new(row: usize, col: usize) -> Self {
        Self(row, col)
    }

    pub const fn row(&self) -> usize {
        self.0
    }

    pub const fn col(&self) -> usize {
        self.1
    }

    /// Returns the cell `rows` down and `cols` right of this one.
    pub const fn offset(&self, rows: usize, cols: usize) -> Self {
        Self(self.0 + rows, self.1 + cols)
    }

    /// True when this cell lies inside a grid of `rows` x `cols`.
    pub const fn within(&self, rows: usize, cols: usize) -> bool {
        self.0 < rows && self.1 < cols
    }
}

impl fmt::Display for RowCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

impl FromStr for RowCol {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let inner = s
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| anyhow::anyhow!("RowCol must be in format '(row, col)', got: {s}"))?;

        let parts: Vec<&str> = inner.split(',').map(|p| p.trim()).collect();
        if parts.len() != 2 {
            anyhow::bail!("RowCol must have exactly 2 components, got: {s}");
        }

        let row = parts[0]
            .parse::<usize>()
            .map_err(|e| anyhow::anyhow!("Invalid row index: {e}"))?;
        let col = parts[1]
            .parse::<usize>()
            .map_err(|e| anyhow::anyhow!("Invalid column index: {e}"))?;

        Ok(RowCol(row, col))
    }
}

impl Serialize for RowCol {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RowCol {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RowCol::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// An inclusive rectangle of cells.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct CellRange {
    top: usize,
    left: usize,
    bottom: usize,
    right: usize,
}

impl CellRange {
    /// The single-cell range at `at`.
    pub const fn cell(at: RowCol) -> Self {
        Self {
            top: at.0,
            left: at.1,
            bottom: at.0,
            right: at.1,
        }
    }

    /// The bounding box of `a` and `b`, in whichever order they were given.
    pub fn spanning(a: RowCol, b: RowCol) -> Self {
        Self {
            top: a.0.min(b.0),
            left: a.1.min(b.1),
            bottom: a.0.max(b.0),
            right: a.1.max(b.1),
        }
    }

    pub fn top_left(&self) -> RowCol {
        RowCol(self.top, self.left)
    }

    pub fn bottom_right(&self) -> RowCol {
        RowCol(self.bottom, self.right)
    }

    pub fn contains(&self, at: RowCol) -> bool {
        (self.top..=self.bottom).contains(&at.0) && (self.left..=self.right).contains(&at.1)
    }

    pub fn len(&self) -> usize {
        (self.bottom - self.top + 1) * (self.right - self.left + 1)
    }

    /// Always false: a range covers at least the cell it was spanned from.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every cell in the range, row by row.
    pub fn cells(&self) -> impl Iterator<Item = RowCol> {
        let (left, right) = (self.left, self.right);
        (self.top..=self.bottom)
            .flat_map(move |row| (left..=right).map(move |col| RowCol(row, col)))
    }
}
