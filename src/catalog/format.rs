//! Display helpers for prices and dates.

use chrono::NaiveDate;

/// `1200` -> `"KSH 1,200"`.
pub fn format_price(price: u64) -> String {
    let digits = price.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("KSH {grouped}")
}

/// `2024-06-15` -> `"June 15, 2024"`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Like [`format_date`] but for raw `YYYY-MM-DD` strings; unparseable input is returned as-is.
pub fn format_date_str(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => format_date(date),
        Err(_) => raw.to_string(),
    }
}
