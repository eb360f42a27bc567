use std::fmt::Write as _;

use client_core::{BillRow, BillsListController, BillsPageState};
use shared::error::StoreError;

const HEADERS: [&str; 5] = ["Type", "Nom", "Date", "Montant", "Statut"];

pub fn render_bills_page(state: &BillsPageState) -> String {
    match state {
        BillsPageState::Idle => String::new(),
        BillsPageState::Loading => "Loading...".to_string(),
        BillsPageState::Errored(message) => format!("Erreur\n{message}"),
        BillsPageState::Loaded(rows) => render_table(rows),
    }
}

/// Loads the bills and emits each page the user sees, `Loading` included.
///
/// `Loading` is emitted before the request starts, so a store that answers
/// immediately still shows it.
pub async fn load_bills_page(
    page: &mut BillsListController,
    mut emit: impl FnMut(String),
) -> Result<Vec<BillRow>, StoreError> {
    if page.has_store() {
        emit(render_bills_page(&BillsPageState::Loading));
    }
    let loaded = page.load_bills().await;
    emit(render_bills_page(&page.state()));
    loaded
}

fn render_table(rows: &[BillRow]) -> String {
    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|row| {
            [
                row.bill.expense_type.label().to_string(),
                row.bill.name.clone(),
                row.display_date.clone(),
                format!("{} €", row.bill.amount),
                row.display_status.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::from("Mes notes de frais\n");
    push_line(&mut out, "#", &HEADERS.map(str::to_string), &widths);
    for (index, line) in cells.iter().enumerate() {
        push_line(&mut out, &(index + 1).to_string(), line, &widths);
    }
    if cells.is_empty() {
        out.push_str("(aucune note de frais)\n");
    }
    out
}

fn push_line(out: &mut String, index: &str, cells: &[String; 5], widths: &[usize; 5]) {
    let _ = write!(out, "{index:>3} ");
    for (cell, width) in cells.iter().zip(widths) {
        let pad = width.saturating_sub(cell.chars().count());
        let _ = write!(out, "| {cell}{} ", " ".repeat(pad));
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use client_core::{BillsApi, NewBillPayload, Route};
    use shared::{
        domain::{BillId, BillStatus, ExpenseType},
        error::ErrorCode,
        protocol::{Bill, BillUpdate, CreatedBill},
    };

    use crate::terminal::{TerminalModal, TerminalNavigator};

    /// Answers `list` without ever yielding.
    struct ReadyStore {
        result: Result<Vec<Bill>, StoreError>,
    }

    #[async_trait]
    impl BillsApi for ReadyStore {
        async fn list(&self) -> Result<Vec<Bill>, StoreError> {
            self.result.clone()
        }

        async fn create(&self, _payload: &NewBillPayload) -> Result<CreatedBill, StoreError> {
            Err(StoreError::new(ErrorCode::Internal, "unused"))
        }

        async fn update(&self, _bill_id: &BillId, _update: &BillUpdate) -> Result<Bill, StoreError> {
            Err(StoreError::new(ErrorCode::Internal, "unused"))
        }
    }

    fn page_with(store: Option<ReadyStore>) -> BillsListController {
        BillsListController::new(
            store.map(|store| Arc::new(store) as Arc<dyn BillsApi>),
            Arc::new(TerminalNavigator::new(Route::Bills)),
            Arc::new(TerminalModal::new(800)),
        )
    }

    fn row(name: &str, display_date: &str) -> BillRow {
        BillRow {
            bill: Bill {
                id: BillId(name.to_string()),
                email: "a@a".to_string(),
                expense_type: ExpenseType::Transports,
                name: name.to_string(),
                amount: 100,
                date: "2021-01-01".to_string(),
                vat: None,
                pct: None,
                commentary: None,
                comment_admin: None,
                file_url: None,
                file_name: None,
                status: BillStatus::Accepted,
            },
            display_date: display_date.to_string(),
            display_status: "Accepté",
        }
    }

    #[test]
    fn error_page_shows_message_verbatim() {
        let page = render_bills_page(&BillsPageState::Errored("Erreur 404".to_string()));
        assert!(page.contains("Erreur 404"));
    }

    #[test]
    fn table_keeps_row_order() {
        let page = render_bills_page(&BillsPageState::Loaded(vec![
            row("recent", "5 Mar. 22"),
            row("older", "1 Jan. 21"),
        ]));
        let recent = page.find("5 Mar. 22").expect("recent row");
        let older = page.find("1 Jan. 21").expect("older row");
        assert!(recent < older);
        assert!(page.contains("Accepté"));
        assert!(page.contains("100 €"));
    }

    #[test]
    fn empty_list_and_loading_have_their_own_text() {
        assert!(render_bills_page(&BillsPageState::Loaded(Vec::new())).contains("aucune"));
        assert_eq!(render_bills_page(&BillsPageState::Loading), "Loading...");
        assert_eq!(render_bills_page(&BillsPageState::Idle), "");
    }

    #[tokio::test]
    async fn immediate_store_still_shows_loading_first() {
        let mut page = page_with(Some(ReadyStore {
            result: Ok(vec![row("taxi", "").bill]),
        }));
        let mut pages = Vec::new();

        let rows = load_bills_page(&mut page, |text| pages.push(text))
            .await
            .expect("rows");

        assert_eq!(rows.len(), 1);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0], "Loading...");
        assert!(pages[1].contains("taxi"));
    }

    #[tokio::test]
    async fn failed_load_shows_loading_then_error() {
        let mut page = page_with(Some(ReadyStore {
            result: Err(StoreError::from_status(404, None)),
        }));
        let mut pages = Vec::new();

        let err = load_bills_page(&mut page, |text| pages.push(text))
            .await
            .expect_err("must fail");

        assert_eq!(err.message(), "Erreur 404");
        assert_eq!(pages, vec!["Loading...".to_string(), "Erreur\nErreur 404".to_string()]);
    }

    #[tokio::test]
    async fn page_without_store_never_shows_loading() {
        let mut page = page_with(None);
        let mut pages = Vec::new();

        let rows = load_bills_page(&mut page, |text| pages.push(text))
            .await
            .expect("rows");

        assert!(rows.is_empty());
        assert_eq!(pages, vec![String::new()]);
    }
}
