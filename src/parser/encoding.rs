//! Decoding of PDF text strings and dates.

use chrono::{DateTime, NaiveDate, Utc};

/// Decode the bytes of a PDF text string.
///
/// UTF-16BE with a byte order mark first, then UTF-8, then Latin-1.
pub fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Parse a PDF date string (`D:YYYYMMDDHHmmSS...`). Missing parts default to
/// the start of their range; the timezone suffix is ignored.
pub fn parse_pdf_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.strip_prefix("D:").unwrap_or(s);

    let year: i32 = s.get(0..4)?.parse().ok()?;
    let month: u32 = s.get(4..6).and_then(|m| m.parse().ok()).unwrap_or(1);
    let day: u32 = s.get(6..8).and_then(|d| d.parse().ok()).unwrap_or(1);
    let hour: u32 = s.get(8..10).and_then(|h| h.parse().ok()).unwrap_or(0);
    let minute: u32 = s.get(10..12).and_then(|m| m.parse().ok()).unwrap_or(0);
    let second: u32 = s.get(12..14).and_then(|s| s.parse().ok()).unwrap_or(0);

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode_text_string(b"Hello"), "Hello");
    }

    #[test]
    fn test_decode_latin1() {
        // 0xE9 = 'é' in Latin-1
        assert_eq!(decode_text_string(&[0x48, 0x65, 0x6C, 0x6C, 0xE9]), "Hellé");
    }

    #[test]
    fn test_decode_utf16be() {
        assert_eq!(decode_text_string(&[0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69]), "Hi");
        // Odd trailing byte is dropped
        assert_eq!(decode_text_string(&[0xFE, 0xFF, 0x00, 0x48, 0x00]), "H");
    }

    #[test]
    fn test_parse_pdf_date() {
        let date = parse_pdf_date("D:20240115103045+01'00'").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);
        assert_eq!(date.hour(), 10);
    }

    #[test]
    fn test_parse_pdf_date_minimal() {
        let date = parse_pdf_date("D:2024").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 1, 1));
        assert!(parse_pdf_date("D:20").is_none());
        assert!(parse_pdf_date("yesterday").is_none());
    }
}
