//! Common utilities for notice generation.
//!
//! Shared helpers for date formatting and output file naming.

use chrono::{Local, NaiveDate};

/// Prefix of every generated notice file.
pub const FILENAME_PREFIX: &str = "Aviso_";

/// Current date on the local calendar.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a date as `DD/MM/YYYY` (e.g., "05/03/2026").
pub fn format_fecha(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Keep only ASCII letters and digits from a client name.
///
/// Accented letters are dropped too, so "Juan Pérez #123" becomes "JuanPrez123".
pub fn sanitize_client_name(name: &str) -> String {
    name.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Output filename for a client, e.g. `Aviso_AnaRuiz.pdf`.
///
/// A name with no usable characters collapses to `Aviso_.pdf`.
pub fn notice_filename(client_name: &str) -> String {
    format!("{}{}.pdf", FILENAME_PREFIX, sanitize_client_name(client_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fecha_zero_pads() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(format_fecha(date), "05/03/2026");
    }

    #[test]
    fn test_sanitize_strips_everything_but_alnum() {
        assert_eq!(sanitize_client_name("Juan Pérez #123"), "JuanPrez123");
        assert_eq!(sanitize_client_name("  "), "");
    }

    #[test]
    fn test_notice_filename() {
        assert_eq!(notice_filename("Ana Ruiz"), "Aviso_AnaRuiz.pdf");
        assert_eq!(notice_filename("¿?"), "Aviso_.pdf");
    }
}
