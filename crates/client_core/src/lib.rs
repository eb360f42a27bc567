use async_trait::async_trait;
use shared::{
    domain::{BillId, BillStatus, ExpenseType},
    error::StoreError,
    protocol::{Bill, BillUpdate, CreatedBill},
};

pub mod controller;
pub mod error;
pub mod file_validator;
pub mod format;
pub mod http_store;
pub mod session;

pub use controller::{
    bills::{BillRow, BillsListController, BillsPageState, EyeIcon},
    new_bill::{NewBillController, NewBillForm, FILE_TYPE_NOT_ALLOWED},
};
pub use error::SubmitError;
pub use file_validator::is_accepted_image;
pub use http_store::HttpBillStore;
pub use session::{CurrentUser, SessionContext};

/// Form-data key the receipt is uploaded under.
pub const RECEIPT_FORM_KEY: &str = "file";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Bills,
    NewBill,
    Dashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Bills => "#employee/bills",
            Route::NewBill => "#employee/bill/new",
            Route::Dashboard => "#admin/dashboard",
        }
    }
}

/// Replaces the current view with the one behind `route`.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptPreview {
    pub url: String,
    pub width: u32,
}

/// Modal surface used to preview a receipt image.
pub trait ReceiptModal: Send + Sync {
    fn width(&self) -> u32;
    fn show(&self, preview: ReceiptPreview);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptFile {
    pub name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedReceipt {
    pub form_key: String,
    pub file: ReceiptFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBillPayload {
    pub email: String,
    pub expense_type: ExpenseType,
    pub name: String,
    pub amount: i64,
    pub date: String,
    pub vat: Option<String>,
    pub pct: i64,
    pub commentary: Option<String>,
    pub status: BillStatus,
    pub receipt: Option<AttachedReceipt>,
}

#[async_trait]
pub trait BillsApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Bill>, StoreError>;
    async fn create(&self, payload: &NewBillPayload) -> Result<CreatedBill, StoreError>;
    async fn update(&self, bill_id: &BillId, update: &BillUpdate) -> Result<Bill, StoreError>;
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
