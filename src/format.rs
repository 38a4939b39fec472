//! Indonesian currency and date formatting for user-facing output

use chrono::{Datelike, NaiveDate, Weekday};

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Senin",
        Weekday::Tue => "Selasa",
        Weekday::Wed => "Rabu",
        Weekday::Thu => "Kamis",
        Weekday::Fri => "Jumat",
        Weekday::Sat => "Sabtu",
        Weekday::Sun => "Minggu",
    }
}

fn month_name(date: NaiveDate) -> &'static str {
    MONTHS[date.month0() as usize]
}

/// Format an amount as whole rupiah with `.` thousands separators.
///
/// `format_rupiah(1_500_000.0, true)` gives `Rp 1.500.000`.
#[must_use]
pub fn format_rupiah(amount: f64, with_symbol: bool) -> String {
    if !amount.is_finite() {
        return if with_symbol { "Rp 0" } else { "0" }.to_string();
    }

    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    if with_symbol {
        format!("{sign}Rp {grouped}")
    } else {
        format!("{sign}{grouped}")
    }
}

/// `Senin, 1 Januari 2024`
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    format!("{}, {}", weekday_name(date.weekday()), format_long_date(date))
}

/// `1 Januari 2024`
#[must_use]
pub fn format_long_date(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), month_name(date), date.year())
}

/// Compact range: shared month and year are written once
#[must_use]
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    if start.year() == end.year() && start.month() == end.month() {
        if start.day() == end.day() {
            return format_long_date(end);
        }
        return format!("{} - {}", start.day(), format_long_date(end));
    }

    if start.year() == end.year() {
        return format!(
            "{} {} - {}",
            start.day(),
            month_name(start),
            format_long_date(end)
        );
    }

    format!("{} - {}", format_long_date(start), format_long_date(end))
}
