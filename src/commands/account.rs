use crate::account::AccountForm;
use crate::api::Backend;
use crate::commands::Out;
use crate::Result;
use anyhow::bail;

/// Checks whether `acc_num` is already registered. The structure is true when it is taken.
pub async fn check_account(backend: &dyn Backend, acc_num: &str) -> Result<Out<bool>> {
    let mut form = AccountForm::new(acc_num, "", "");
    form.check_account_number(backend).await;
    if form.acc_num_taken() {
        return Ok(Out::new(form.acc_num_error(), true));
    }
    if !form.acc_num_error().is_empty() {
        bail!("{}", form.acc_num_error());
    }
    Ok(Out::new(
        format!("The account number {acc_num} is available."),
        false,
    ))
}
