//! The monthly record list with its row checkboxes and the alert bar that appears when rows are
//! checked.

use crate::api::{Backend, SearchRecord};
use crate::error::ApiError;
use std::error::Error as StdError;
use std::fmt::{Display, Formatter};
use tracing::{debug, info};

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RecordsError {
    NothingSelected,
    Api(ApiError),
}

impl Display for RecordsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordsError::NothingSelected => write!(f, "Select the items to delete."),
            RecordsError::Api(ApiError::Server { .. }) => {
                write!(f, "An error occurred while deleting.")
            }
            RecordsError::Api(_) => write!(f, "There was a problem talking to the server."),
        }
    }
}

impl StdError for RecordsError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            RecordsError::Api(e) => Some(e),
            RecordsError::NothingSelected => None,
        }
    }
}

/// One line of the list.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordRow {
    pub record: SearchRecord,
    pub checked: bool,
}

/// The transactions shown for a month, each with a checkbox.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordList {
    rows: Vec<RecordRow>,
}

impl From<Vec<SearchRecord>> for RecordList {
    fn from(records: Vec<SearchRecord>) -> Self {
        Self {
            rows: records
                .into_iter()
                .map(|record| RecordRow {
                    record,
                    checked: false,
                })
                .collect(),
        }
    }
}

impl RecordList {
    pub fn rows(&self) -> &[RecordRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Checks or unchecks the row with `id`. Returns false if there is no such row.
    pub fn set_checked(&mut self, id: i64, checked: bool) -> bool {
        match self.rows.iter_mut().find(|r| r.record.id == id) {
            Some(row) => {
                row.checked = checked;
                true
            }
            None => false,
        }
    }

    /// The header checkbox: checks or unchecks every row.
    pub fn set_all(&mut self, checked: bool) {
        for row in &mut self.rows {
            row.checked = checked;
        }
    }

    /// The header checkbox state. Checked only when every row is.
    pub fn master_checked(&self) -> bool {
        !self.rows.is_empty() && self.rows.iter().all(|r| r.checked)
    }

    pub fn clear_selection(&mut self) {
        self.set_all(false);
    }

    pub fn checked_ids(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter(|r| r.checked)
            .map(|r| r.record.id.to_string())
            .collect()
    }

    pub fn checked_count(&self) -> usize {
        self.rows.iter().filter(|r| r.checked).count()
    }

    /// The alert bar text, or `None` when the bar is hidden.
    pub fn alert_bar(&self) -> Option<String> {
        match self.checked_count() {
            0 => None,
            n => Some(format!("{n} items selected.")),
        }
    }

    /// Deletes the checked rows on the server and then from the list. Nothing changes locally if
    /// the request fails. Returns the number of rows removed.
    pub async fn delete_selected(&mut self, backend: &dyn Backend) -> Result<usize, RecordsError> {
        let ids = self.checked_ids();
        if ids.is_empty() {
            return Err(RecordsError::NothingSelected);
        }
        debug!("Deleting records {ids:?}");
        backend.delete(&ids).await.map_err(RecordsError::Api)?;
        let before = self.rows.len();
        self.rows.retain(|r| !r.checked);
        let removed = before - self.rows.len();
        info!("Deleted {removed} records");
        Ok(removed)
    }
}
