//! Invoice date parsing.

use chrono::NaiveDate;

/// Date formats observed on the invoices, in priority order. Values such as:
///
/// ```text
/// DELIVERY TIME : Friday, 22 June, 2018
/// Invoice Date: : 23 June, 2018
/// Issue date: 2019-10-31
/// ```
const DATE_FORMATS: [&str; 3] = ["%d %B, %Y", "%A, %d %B, %Y", "%Y-%m-%d"];

/// Parse a free-text string against the known invoice date formats.
///
/// The first format that parses wins; returns `None` when none match. Month
/// and weekday names are English, matching the formats above. There is no
/// fuzzy fallback.
pub fn parse_invoice_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_parse_day_month_year() {
        assert_eq!(parse_invoice_date("22 June, 2018"), Some(ymd(2018, 6, 22)));
    }

    #[test]
    fn test_parse_with_weekday() {
        assert_eq!(
            parse_invoice_date("Friday, 22 June, 2018"),
            Some(ymd(2018, 6, 22))
        );
    }

    #[test]
    fn test_parse_iso() {
        assert_eq!(parse_invoice_date("2019-10-31"), Some(ymd(2019, 10, 31)));
    }

    #[test]
    fn test_parse_rejects_non_dates() {
        assert_eq!(parse_invoice_date("not a date"), None);
        assert_eq!(parse_invoice_date(""), None);
        assert_eq!(parse_invoice_date("32 June, 2018"), None);
    }

    #[test]
    fn test_round_trips_own_formatting() {
        let dates = [ymd(2018, 6, 22), ymd(2019, 10, 31), ymd(2024, 1, 5)];

        for date in dates {
            for format in DATE_FORMATS {
                let rendered = date.format(format).to_string();
                assert_eq!(
                    parse_invoice_date(&rendered),
                    Some(date),
                    "format {format:?} did not round-trip via {rendered:?}"
                );
            }
        }
    }
}
