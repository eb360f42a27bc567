//! Display formatting for the bills table.

use chrono::{DateTime, Datelike, NaiveDate};
use shared::domain::BillStatus;

// French short month names, first three letters, capitalized.
const MONTHS_FR: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// Parses a bill's expense date. Accepts `YYYY-MM-DD` and full RFC 3339 timestamps.
pub fn parse_bill_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// `2004-04-04` becomes `4 Avr. 04`.
pub fn format_date(raw: &str) -> Option<String> {
    let date = parse_bill_date(raw)?;
    let month = MONTHS_FR[date.month0() as usize];
    let year = date.year().rem_euclid(100);
    Some(format!("{} {month}. {year:02}", date.day()))
}

pub fn format_status(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "En attente",
        BillStatus::Accepted => "Accepté",
        BillStatus::Refused => "Refused",
    }
}
