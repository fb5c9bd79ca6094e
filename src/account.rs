//! Client-side checks of the account-creation form.

use crate::api::Backend;
use std::error::Error as StdError;
use std::fmt::{Display, Formatter};
use tracing::{debug, warn};

const TAKEN: &str = "This account number already exists.";
const CHECK_FAILED: &str = "An error occurred. Please try again.";
const MISMATCH: &str = "Passwords do not match";

/// Why the form may not be submitted.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AccountError {
    AccountNumberTaken,
    PasswordMismatch,
}

impl Display for AccountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountError::AccountNumberTaken => write!(
                f,
                "This account number already exists. Please enter a different number."
            ),
            AccountError::PasswordMismatch => write!(f, "The passwords do not match."),
        }
    }
}

impl StdError for AccountError {}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct AccountForm {
    pub acc_num: String,
    pub password: String,
    pub password_confirm: String,
    acc_num_taken: bool,
    acc_num_error: String,
    password_error: String,
}

impl AccountForm {
    pub fn new(
        acc_num: impl Into<String>,
        password: impl Into<String>,
        password_confirm: impl Into<String>,
    ) -> Self {
        Self {
            acc_num: acc_num.into(),
            password: password.into(),
            password_confirm: password_confirm.into(),
            ..Self::default()
        }
    }

    pub fn acc_num_taken(&self) -> bool {
        self.acc_num_taken
    }

    /// The message under the account number field. Empty when there is nothing to report.
    pub fn acc_num_error(&self) -> &str {
        &self.acc_num_error
    }

    /// The message under the password confirmation field.
    pub fn password_error(&self) -> &str {
        &self.password_error
    }

    /// Runs when the account number field loses focus. A failed request leaves the taken flag as
    /// it was.
    pub async fn check_account_number(&mut self, backend: &dyn Backend) {
        if self.acc_num.is_empty() {
            self.acc_num_error.clear();
            self.acc_num_taken = false;
            return;
        }
        match backend.check_account_number(&self.acc_num).await {
            Ok(taken) => {
                debug!("Account number {} taken: {taken}", self.acc_num);
                self.acc_num_taken = taken;
                self.acc_num_error = if taken { TAKEN.into() } else { String::new() };
            }
            Err(e) => {
                warn!("Unable to check the account number: {e}");
                self.acc_num_error = CHECK_FAILED.into();
            }
        }
    }

    /// Checks the form before it is posted. Both problems are recorded, and a taken account
    /// number is reported ahead of a password mismatch.
    pub fn submit(&mut self) -> Result<(), AccountError> {
        let mismatch = self.password != self.password_confirm;
        self.password_error = if mismatch { MISMATCH.into() } else { String::new() };
        if self.acc_num_taken {
            Err(AccountError::AccountNumberTaken)
        } else if mismatch {
            Err(AccountError::PasswordMismatch)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TestBackend;
    use crate::error::ApiError;

    #[tokio::test]
    async fn test_taken_number() {
        let backend = TestBackend::default();
        let mut form = AccountForm::new("110-234-567890", "pw", "pw");
        form.check_account_number(&backend).await;
        assert!(form.acc_num_taken());
        assert_eq!(form.acc_num_error(), TAKEN);
        assert_eq!(form.submit(), Err(AccountError::AccountNumberTaken));
    }

    #[tokio::test]
    async fn test_free_number() {
        let backend = TestBackend::default();
        let mut form = AccountForm::new("999-000-111111", "pw", "pw");
        form.check_account_number(&backend).await;
        assert!(!form.acc_num_taken());
        assert_eq!(form.acc_num_error(), "");
        assert_eq!(form.submit(), Ok(()));
    }

    #[tokio::test]
    async fn test_empty_number_clears_error() {
        let backend = TestBackend::default();
        let mut form = AccountForm::new("110-234-567890", "", "");
        form.check_account_number(&backend).await;
        form.acc_num.clear();
        form.check_account_number(&backend).await;
        assert!(!form.acc_num_taken());
        assert_eq!(form.acc_num_error(), "");
        assert_eq!(backend.state().calls, 1);
    }

    #[tokio::test]
    async fn test_check_failure_keeps_taken_flag() {
        let backend = TestBackend::default();
        let mut form = AccountForm::new("110-234-567890", "a", "a");
        form.check_account_number(&backend).await;
        backend.fail_next(ApiError::Transport(String::from("timeout")));
        form.check_account_number(&backend).await;
        assert!(form.acc_num_taken());
        assert_eq!(form.acc_num_error(), CHECK_FAILED);
    }

    #[tokio::test]
    async fn test_taken_number_reported_before_mismatch() {
        let backend = TestBackend::default();
        let mut form = AccountForm::new("110-234-567890", "a", "b");
        form.check_account_number(&backend).await;
        assert_eq!(form.submit(), Err(AccountError::AccountNumberTaken));
        assert_eq!(form.password_error(), MISMATCH);
    }

    #[test]
    fn test_password_mismatch() {
        let mut form = AccountForm::new("1", "a", "b");
        assert_eq!(form.submit(), Err(AccountError::PasswordMismatch));
        assert_eq!(form.password_error(), "Passwords do not match");
        form.password_confirm = String::from("a");
        assert_eq!(form.submit(), Ok(()));
        assert_eq!(form.password_error(), "");
    }
}
