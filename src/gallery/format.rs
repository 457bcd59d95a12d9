//! Human-readable formatting for sizes and dates.

use chrono::{Local, TimeZone};

/// Binary-prefixed size string. Bytes print as an integer; KB and above get
/// one decimal place. TB is the ceiling unit for arbitrarily large values.
///
/// `0` -> "0 B", `1024` -> "1.0 KB", `1536` -> "1.5 KB".
pub fn human_size(n: u64) -> String {
    let mut v = n as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if v < 1024.0 {
            return if unit == "B" {
                format!("{n} B")
            } else {
                format!("{v:.1} {unit}")
            };
        }
        v /= 1024.0;
    }
    format!("{v:.1} TB")
}

/// Local-time date for a unix timestamp, as YYYY-MM-DD.
pub fn human_date(unix: i64) -> String {
    Local
        .timestamp_opt(unix, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_print_as_integer() {
        assert_eq!(human_size(0), "0 B");
        assert_eq!(human_size(1), "1 B");
        assert_eq!(human_size(999), "999 B");
        assert_eq!(human_size(1023), "1023 B");
    }

    #[test]
    fn kib_and_above_get_one_decimal() {
        assert_eq!(human_size(1024), "1.0 KB");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(2048), "2.0 KB");
        assert_eq!(human_size(1024 * 1024), "1.0 MB");
        assert_eq!(human_size(1024 * 1024 * 1024), "1.0 GB");
    }

    #[test]
    fn tb_is_the_ceiling_unit() {
        let one_tb: u64 = 1024u64.pow(4);
        assert_eq!(human_size(one_tb), "1.0 TB");
        // No PB unit: stays in TB
        assert_eq!(human_size(one_tb * 2048), "2048.0 TB");
    }

    #[test]
    fn date_formats_as_ymd() {
        // 2023-11-14T22:13:20Z; local offset shifts the day at most by one,
        // so just check the shape.
        let s = human_date(1_700_000_000);
        assert_eq!(s.len(), 10);
        assert!(s.starts_with("2023-11-1"));
    }
}
