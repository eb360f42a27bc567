//! New-bill form: receipt selection and submission.

use std::sync::Arc;

use shared::{
    domain::{BillStatus, ExpenseType},
    protocol::CreatedBill,
};
use tracing::{info, warn};

use crate::{
    error::SubmitError, file_validator::is_accepted_image, AttachedReceipt, BillsApi,
    NewBillPayload, Navigator, ReceiptFile, Route, SessionContext, RECEIPT_FORM_KEY,
};

pub const FILE_TYPE_NOT_ALLOWED: &str =
    "This file type is not allowed. Please choose a jpg, jpeg or png image.";

const DEFAULT_PCT: i64 = 20;

/// Field values of the new-bill form at submit time, as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBillForm {
    pub expense_type: ExpenseType,
    pub name: String,
    pub amount: String,
    pub date: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

pub struct NewBillController {
    store: Arc<dyn BillsApi>,
    navigator: Arc<dyn Navigator>,
    session: Arc<SessionContext>,
    file_input_value: String,
    receipt: Option<AttachedReceipt>,
    file_error: Option<&'static str>,
}

impl NewBillController {
    pub fn new(
        store: Arc<dyn BillsApi>,
        navigator: Arc<dyn Navigator>,
        session: Arc<SessionContext>,
    ) -> Self {
        Self {
            store,
            navigator,
            session,
            file_input_value: String::new(),
            receipt: None,
            file_error: None,
        }
    }

    /// Value currently shown by the receipt file input.
    pub fn file_input_value(&self) -> &str {
        &self.file_input_value
    }

    /// Inline error shown under the file input, if any.
    pub fn file_error(&self) -> Option<&str> {
        self.file_error
    }

    pub fn receipt(&self) -> Option<&AttachedReceipt> {
        self.receipt.as_ref()
    }

    /// Handles a change of the receipt file input. Only the first file is considered.
    ///
    /// A file without a jpg/jpeg/png extension is not kept: the input is
    /// cleared and [`FILE_TYPE_NOT_ALLOWED`] is shown instead.
    pub fn on_file_selected(&mut self, files: Vec<ReceiptFile>) {
        let Some(file) = files.into_iter().next() else {
            self.file_input_value.clear();
            self.receipt = None;
            self.file_error = None;
            return;
        };

        if !is_accepted_image(&file.name) {
            warn!(
                file_name = %file.name,
                mime_type = file.mime_type.as_deref().unwrap_or("unknown"),
                "rejected receipt with unsupported file type"
            );
            self.file_input_value.clear();
            self.receipt = None;
            self.file_error = Some(FILE_TYPE_NOT_ALLOWED);
            return;
        }

        self.file_input_value = file.name.clone();
        self.receipt = Some(AttachedReceipt {
            form_key: RECEIPT_FORM_KEY.to_string(),
            file,
        });
        self.file_error = None;
    }

    /// Submits the form. On success the view moves to the bills list.
    ///
    /// Store failures are returned untouched so the caller can hand them to
    /// the bills page.
    pub async fn on_submit(&mut self, form: &NewBillForm) -> Result<CreatedBill, SubmitError> {
        let amount = parse_int_prefix(&form.amount)
            .ok_or_else(|| SubmitError::InvalidAmount(form.amount.clone()))?;
        let user = self
            .session
            .current_user()
            .await
            .ok_or(SubmitError::NotSignedIn)?;

        let payload = NewBillPayload {
            email: user.email,
            expense_type: form.expense_type,
            name: form.name.trim().to_string(),
            amount,
            date: form.date.trim().to_string(),
            vat: non_empty(&form.vat),
            pct: parse_int_prefix(&form.pct)
                .filter(|pct| *pct != 0)
                .unwrap_or(DEFAULT_PCT),
            commentary: non_empty(&form.commentary),
            status: BillStatus::Pending,
            receipt: self.receipt.clone(),
        };

        info!(
            email = %payload.email,
            amount = payload.amount,
            has_receipt = payload.receipt.is_some(),
            "submitting new bill"
        );
        let created = self.store.create(&payload).await?;
        info!(bill_id = %created.id, "bill created");

        self.file_input_value.clear();
        self.receipt = None;
        self.navigator.navigate(Route::Bills);
        Ok(created)
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Leading-integer parse: `"42.5"` is 42, `"abc"` is `None`.
fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::parse_int_prefix;

    #[test]
    fn parses_leading_integers() {
        assert_eq!(parse_int_prefix("348"), Some(348));
        assert_eq!(parse_int_prefix("  42.5"), Some(42));
        assert_eq!(parse_int_prefix("-7€"), Some(-7));
        assert_eq!(parse_int_prefix("+3"), Some(3));
    }

    #[test]
    fn rejects_text_without_leading_digits() {
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix("99999999999999999999"), None);
    }
}
