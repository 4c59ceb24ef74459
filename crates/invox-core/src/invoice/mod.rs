//! Heuristics locating the invoice date and the line-item table in an
//! analyzed document.

mod dates;

pub use dates::parse_invoice_date;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::document::{Document, Table};

/// Substring that marks the line-item table's header row.
const PRODUCT_NAME_MARKER: &str = "product name";

/// Locate the invoice date among a document's key/value pairs.
///
/// Walks the pairs in the order the service emitted them; every key
/// containing `"date"` (case-insensitive) has its trimmed value handed to
/// [`parse_invoice_date`]. The first pair whose value parses wins; pairs
/// with unparseable values are skipped and the scan continues.
///
/// Invoices carry several date-labeled fields (invoice date, issue date,
/// delivery date). They fall within days of one another, so any one of them
/// serves — first-match is a policy, not a correctness guarantee.
pub fn locate_invoice_date(document: &Document) -> Option<NaiveDate> {
    for kv in &document.key_values {
        if !kv.key.to_lowercase().contains("date") {
            continue;
        }
        if let Some(date) = parse_invoice_date(kv.value.trim()) {
            debug!(key = %kv.key, %date, "located invoice date");
            return Some(date);
        }
    }

    None
}

/// Locate the line-item table among the document's tables.
///
/// Returns the index of the first table whose row 0 contains a cell with
/// "Product Name" (case-insensitive substring) — that header has been a
/// reliable marker of the detail list. Tables with no rows are
/// non-matching, not errors. `None` when no table qualifies.
pub fn locate_invoice_table(tables: &[Table]) -> Option<usize> {
    tables.iter().position(|table| {
        table.header().is_some_and(|row0| {
            row0.iter()
                .any(|cell| cell.to_lowercase().contains(PRODUCT_NAME_MARKER))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::KeyValue;
    use pretty_assertions::assert_eq;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn table_with_header(cells: &[&str]) -> Table {
        Table::new(vec![cells.iter().map(|c| c.to_string()).collect()])
    }

    #[test]
    fn test_locate_date_skips_non_date_keys() {
        let document = Document::new(
            vec![
                KeyValue::new("Foo", "bar"),
                KeyValue::new("Invoice Date:", "23 June, 2018"),
            ],
            vec![],
        );

        assert_eq!(locate_invoice_date(&document), Some(ymd(2018, 6, 23)));
    }

    #[test]
    fn test_locate_date_first_parseable_wins() {
        let document = Document::new(
            vec![
                KeyValue::new("DELIVERY TIME :", "Friday, 22 June, 2018"),
                KeyValue::new("Issue date:", "2019-10-31"),
            ],
            vec![],
        );

        assert_eq!(locate_invoice_date(&document), Some(ymd(2018, 6, 22)));
    }

    #[test]
    fn test_locate_date_skips_unparseable_values() {
        let document = Document::new(
            vec![
                KeyValue::new("Due date", "upon receipt"),
                KeyValue::new("Issue date:", "  2019-10-31  "),
            ],
            vec![],
        );

        // The first date-labeled pair does not parse; the scan continues.
        assert_eq!(locate_invoice_date(&document), Some(ymd(2019, 10, 31)));
    }

    #[test]
    fn test_locate_date_none_found() {
        let document = Document::new(
            vec![
                KeyValue::new("Total", "42.00"),
                KeyValue::new("Order date", "whenever"),
            ],
            vec![],
        );

        assert_eq!(locate_invoice_date(&document), None);
    }

    #[test]
    fn test_locate_table_returns_first_match() {
        let tables = vec![
            table_with_header(&["Description", "Qty"]),
            table_with_header(&["Product Name", "Price"]),
        ];

        assert_eq!(locate_invoice_table(&tables), Some(1));
    }

    #[test]
    fn test_locate_table_is_case_insensitive() {
        let tables = vec![table_with_header(&["No.", "PRODUCT NAME", "Amount"])];

        assert_eq!(locate_invoice_table(&tables), Some(0));
    }

    #[test]
    fn test_locate_table_not_found() {
        let tables = vec![table_with_header(&["Description", "Qty"])];

        assert_eq!(locate_invoice_table(&tables), None);
    }

    #[test]
    fn test_locate_table_skips_empty_tables() {
        let tables = vec![
            Table::default(),
            table_with_header(&["Product Name", "Price"]),
        ];

        assert_eq!(locate_invoice_table(&tables), Some(1));
    }

    #[test]
    fn test_locate_table_only_inspects_header_row() {
        // "Product Name" in a data row must not match.
        let tables = vec![Table::new(vec![
            vec!["Description".to_string(), "Qty".to_string()],
            vec!["Product Name".to_string(), "3".to_string()],
        ])];

        assert_eq!(locate_invoice_table(&tables), None);
    }
}
