//! Bills list page: fetch, ordering, page state and receipt preview.

use std::{cmp::Reverse, sync::Arc};

use shared::{error::StoreError, protocol::Bill};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::{
    format::{format_date, format_status, parse_bill_date},
    BillsApi, Navigator, ReceiptModal, ReceiptPreview, Route,
};

/// One line of the bills table, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct BillRow {
    pub bill: Bill,
    pub display_date: String,
    pub display_status: &'static str,
}

impl BillRow {
    fn from_bill(bill: Bill) -> Self {
        let display_date = match format_date(&bill.date) {
            Some(formatted) => formatted,
            None => {
                warn!(bill_id = %bill.id, date = %bill.date, "bill date does not parse; showing raw value");
                bill.date.clone()
            }
        };
        let display_status = format_status(bill.status);
        Self {
            bill,
            display_date,
            display_status,
        }
    }

    /// Preview control for this row's receipt, when it has one.
    pub fn eye_icon(&self) -> Option<EyeIcon> {
        self.bill.file_url.as_ref().map(|url| EyeIcon {
            bill_url: url.clone(),
        })
    }
}

/// Per-row preview control carrying the receipt URL it opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EyeIcon {
    pub bill_url: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum BillsPageState {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<BillRow>),
    Errored(String),
}

pub struct BillsListController {
    store: Option<Arc<dyn BillsApi>>,
    navigator: Arc<dyn Navigator>,
    modal: Arc<dyn ReceiptModal>,
    state: watch::Sender<BillsPageState>,
}

impl BillsListController {
    pub fn new(
        store: Option<Arc<dyn BillsApi>>,
        navigator: Arc<dyn Navigator>,
        modal: Arc<dyn ReceiptModal>,
    ) -> Self {
        let (state, _) = watch::channel(BillsPageState::Idle);
        Self {
            store,
            navigator,
            modal,
            state,
        }
    }

    /// Page state updates, including the transient `Loading` state.
    pub fn subscribe(&self) -> watch::Receiver<BillsPageState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> BillsPageState {
        self.state.borrow().clone()
    }

    /// Whether `load_bills` will reach the store (and pass through `Loading`).
    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    /// Fetches the bills, most recent expense date first.
    ///
    /// Without a store the page stays idle and the list is empty.
    pub async fn load_bills(&mut self) -> Result<Vec<BillRow>, StoreError> {
        let Some(store) = self.store.clone() else {
            return Ok(Vec::new());
        };

        self.state.send_replace(BillsPageState::Loading);
        match store.list().await {
            Ok(mut bills) => {
                sort_bills_by_date_desc(&mut bills);
                let rows: Vec<BillRow> = bills.into_iter().map(BillRow::from_bill).collect();
                info!(count = rows.len(), "bills loaded");
                self.state.send_replace(BillsPageState::Loaded(rows.clone()));
                Ok(rows)
            }
            Err(err) => {
                error!(code = ?err.code, "failed to load bills: {err}");
                self.state
                    .send_replace(BillsPageState::Errored(err.message().to_string()));
                Err(err)
            }
        }
    }

    /// Shows a store failure from another page, e.g. a rejected bill creation.
    pub fn surface_error(&mut self, err: &StoreError) {
        self.state
            .send_replace(BillsPageState::Errored(err.message().to_string()));
    }

    pub fn handle_click_new_bill(&self) {
        debug!(route = Route::NewBill.path(), "navigating to new bill form");
        self.navigator.navigate(Route::NewBill);
    }

    pub fn handle_click_icon_eye(&self, icon: &EyeIcon) {
        let preview = ReceiptPreview {
            url: icon.bill_url.clone(),
            width: self.modal.width() / 2,
        };
        debug!(url = %preview.url, width = preview.width, "opening receipt preview");
        self.modal.show(preview);
    }
}

/// Stable sort by expense date, most recent first. Unparseable dates go last.
pub fn sort_bills_by_date_desc(bills: &mut [Bill]) {
    // Reverse(None) orders after every Reverse(Some(_)).
    bills.sort_by_cached_key(|bill| Reverse(parse_bill_date(&bill.date)));
}
